//! Pacer core (host-loop agnostic)
//!
//! A polling value-animation driver: it advances a normalized fraction from
//! 0.0 to 1.0 over a configured duration by scheduling coarse timer ticks,
//! applies an easing curve, derives interpolated int/float values, and
//! notifies listeners on every tick and at lifecycle transitions.
//!
//! This crate defines the facade ([`ValueAnimator`]) and backend contract,
//! the polling engine itself, easing curves, scalar interpolation helpers,
//! and the scheduler/clock abstractions that let the engine run against a
//! real timer loop or a virtual clock in tests.

pub mod animator;
pub mod config;
pub mod easing;
pub mod engine;
pub mod interp;
pub mod scheduler;

// Re-exports for consumers (drivers and embedders)
pub use animator::{
    AnimationListener, AnimatorBackend, AnimatorFactory, LifecycleProxy, PollingAnimatorFactory,
    ValueAnimator,
};
pub use config::Config;
pub use easing::{Easing, EasingFn, Interpolator, ParseEasingError};
pub use engine::PollingEngine;
pub use interp::{constrain, lerp_f32, lerp_i32};
pub use scheduler::{Clock, ManualScheduler, TickFn, TickHandle, TickScheduler};
