//! Scalar helpers shared by the noise interpolation and the spring ramp.

/// Quintic smoothstep `6t⁵ − 15t⁴ + 10t³`.
///
/// Maps [0, 1] onto [0, 1] with zero first and second derivatives at both
/// ends. Inputs outside [0, 1] are not clamped; callers feed fractional
/// distances that are already in range.
pub fn smoothstep(t: f64) -> f64 {
    6.0 * t.powi(5) - 15.0 * t.powi(4) + 10.0 * t.powi(3)
}

/// Linear position of `value` inside `[lo, hi]`, clamped to [0, 1].
///
/// Zero at or below `lo`, one at or above `hi`. Callers must ensure
/// `hi > lo`; parameter validation enforces this for the spring band.
pub fn unit_ramp(value: f64, lo: f64, hi: f64) -> f64 {
    ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
}
