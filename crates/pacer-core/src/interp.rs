//! Scalar interpolation helpers.

/// Linear interpolation between `a` and `b` by `t`.
/// `t` is not clamped; overshooting easing curves flow through here.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Integer interpolation, rounding half away from zero (`f32::round`),
/// so `lerp_i32(10, 20, 0.25) == 13` and `lerp_i32(0, -10, 0.25) == -3`.
#[inline]
pub fn lerp_i32(a: i32, b: i32, t: f32) -> i32 {
    a + (t * (b - a) as f32).round() as i32
}

/// Clamp `x` into [lo, hi].
#[inline]
pub fn constrain(x: f32, lo: f32, hi: f32) -> f32 {
    if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// it should interpolate floats without rounding
    #[test]
    fn float_lerp_exact() {
        assert_eq!(lerp_f32(0.0, 1.0, 0.25), 0.25);
        assert_eq!(lerp_f32(10.0, 20.0, 0.5), 15.0);
        assert_eq!(lerp_f32(1.0, -1.0, 0.5), 0.0);
    }

    /// it should round integer interpolation to the nearest value
    #[test]
    fn int_lerp_rounds_to_nearest() {
        assert_eq!(lerp_i32(10, 20, 0.5), 15);
        assert_eq!(lerp_i32(10, 20, 0.33), 13); // round(13.3)
        assert_eq!(lerp_i32(10, 20, 0.37), 14); // round(13.7)
    }

    /// it should round halves away from zero, including for negative deltas
    #[test]
    fn int_lerp_rounds_half_away_from_zero() {
        assert_eq!(lerp_i32(10, 20, 0.25), 13); // 12.5 -> 13
        assert_eq!(lerp_i32(0, -10, 0.25), -3); // -2.5 -> -3
        assert_eq!(lerp_i32(0, -10, 0.35), -4); // -3.5 -> -4
    }

    /// it should clamp outside the range and pass values inside through
    #[test]
    fn constrain_bounds() {
        assert_eq!(constrain(-0.5, 0.0, 1.0), 0.0);
        assert_eq!(constrain(0.5, 0.0, 1.0), 0.5);
        assert_eq!(constrain(1.5, 0.0, 1.0), 1.0);
        assert_eq!(constrain(f32::INFINITY, 0.0, 1.0), 1.0);
    }
}
