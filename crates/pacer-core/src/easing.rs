//! Easing curves mapping linear progress to eased progress.
//!
//! The engine feeds a linear fraction in [0, 1] through an [`Interpolator`]
//! and passes the result on unclamped, so overshooting curves are allowed.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::str::FromStr;
use thiserror::Error;

/// Maps linear progress to eased progress.
///
/// Implementations are expected to be pure; the engine calls this once per
/// tick with the clamped linear fraction. Outputs outside [0, 1] are passed
/// through to value interpolation unclamped.
pub trait Interpolator {
    fn interpolate(&self, t: f32) -> f32;
}

/// Built-in easing curves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    /// Cosine ease-in/ease-out; the default curve applied at `start()`.
    #[default]
    AccelerateDecelerate,
    /// Cubic bezier (0.4, 0.0, 0.2, 1.0).
    FastOutSlowIn,
    /// Arbitrary cubic bezier with control points (x1, y1, x2, y2).
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Apply the curve to a progress value in [0, 1].
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
            Easing::FastOutSlowIn => bezier_ease(t, 0.4, 0.0, 0.2, 1.0),
            Easing::CubicBezier(x1, y1, x2, y2) => bezier_ease(t, x1, y1, x2, y2),
        }
    }
}

impl Interpolator for Easing {
    fn interpolate(&self, t: f32) -> f32 {
        self.apply(t)
    }
}

/// Adapts a plain closure into an [`Interpolator`].
pub struct EasingFn<F>(pub F);

impl<F: Fn(f32) -> f32> Interpolator for EasingFn<F> {
    fn interpolate(&self, t: f32) -> f32 {
        (self.0)(t)
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
#[error("unknown easing curve `{0}`")]
pub struct ParseEasingError(String);

impl FromStr for Easing {
    type Err = ParseEasingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Easing::Linear),
            "accelerate-decelerate" => Ok(Easing::AccelerateDecelerate),
            "fast-out-slow-in" => Ok(Easing::FastOutSlowIn),
            other => Err(ParseEasingError(other.to_string())),
        }
    }
}

/// Cubic Bezier basis function
#[inline]
fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Given control points (x1, y1, x2, y2) and an input t in [0,1],
/// compute the eased y by inverting the x bezier via binary search.
/// Y control points outside [0, 1] produce overshoot and are not clamped.
fn bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    // Fast path: Bezier(0,0,1,1) is exactly linear -> eased t == t
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    let t = t.clamp(0.0, 1.0);
    // Monotonic X in [0,1] assumed for x1/x2 in [0,1]
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = t;
    for _ in 0..24 {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}
