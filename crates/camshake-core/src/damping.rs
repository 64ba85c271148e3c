/// Exponent used when `damping_percent` is 0 (close to a quadratic falloff).
const EXPONENT_LOW_DAMPING: f32 = 2.0;
/// Exponent used when `damping_percent` is 1 (magnitude holds, then drops sharply).
const EXPONENT_HIGH_DAMPING: f32 = 0.25;

/// Decay factor for a shake at `x` (fraction of duration elapsed).
///
/// `x` is clamped to `[0, 1]`. Returns `(1 - x^a)^3` where
/// `a = lerp(2.0, 0.25, damping_percent)`, so the result falls from 1 at
/// the start of the shake to exactly 0 once the duration has elapsed.
pub fn damping_curve(x: f32, damping_percent: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    let a = EXPONENT_LOW_DAMPING + (EXPONENT_HIGH_DAMPING - EXPONENT_LOW_DAMPING) * damping_percent;
    let b = 1.0 - x.powf(a);
    b * b * b
}
