/// Floored modulo, always in [0, b) for positive b
pub fn modulus(a: f64, b: f64) -> f64 {
    ((a % b) + b) % b
}

/// Arc-cosine with the argument clamped to [-1, 1] so rounding overshoot
/// cannot produce NaN.
pub fn clamped_acos(cos: f64) -> f64 {
    cos.clamp(-1., 1.).acos()
}

#[cfg(test)]
#[track_caller]
pub fn assert_almost_eq(a: f64, b: f64, tolerance: f64) {
    assert!(
        (a - b).abs() <= tolerance,
        "{a} and {b} differ by more than {tolerance}"
    );
}
