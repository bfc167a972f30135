//! Fixed-point primitives shared by the BRR encoder and decoder.
//!
//! These must not rely on platform-defined two's-complement overflow
//! behavior: every wrap and shift here is expressed with explicit masking
//! and sign extension so the result is the same on any target.

/// Reduce `n` modulo 2^16 into the signed range `[-32768, 32767]`.
///
/// Equivalent to sign-extending the low 16 bits of `n`.
pub fn wrap16(n: i32) -> i16 {
    (n as u32 as u16) as i16
}

/// Saturate `n` to `[-32768, 32767]`, rounding fractional input to the
/// nearest integer (ties away from zero).
pub fn clamp16(n: f32) -> i16 {
    n.round().clamp(i16::MIN as f32, i16::MAX as f32) as i16
}

/// One of the four fixed IIR-like BRR predictor filters.
///
/// Coefficients are hardware-exact dyadic rationals (15/16, 61/32, 115/64,
/// 13/16). Computing in `f64` and rounding at the end matches the SPC700
/// reference exactly because every intermediate value fits well within
/// `f64`'s mantissa.
pub fn predict(filter: u8, p1: i16, p2: i16) -> i16 {
    let p1 = p1 as f64;
    let p2 = p2 as f64;
    let prediction = match filter {
        0 => 0.0,
        1 => p1 * 15.0 / 16.0,
        2 => p1 * 61.0 / 32.0 - p2 * 15.0 / 16.0,
        3 => p1 * 115.0 / 64.0 - p2 * 13.0 / 16.0,
        _ => unreachable!("BRR filter index out of range: {filter}"),
    };
    wrap16(prediction.round() as i32)
}
