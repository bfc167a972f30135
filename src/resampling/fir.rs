//! Internal windowed-sinc FIR downsampler.
//!
//! Used when `target_sr < 8000`, where a general-purpose host resampler's
//! aliasing behavior becomes harder to trust at such a narrow passband. The
//! kernel is a 64-tap windowed sinc low-pass, generated fresh per call since
//! its cutoff depends on the target rate; callers that downsample the same
//! `(original_sr, target_sr)` pair repeatedly may cache the kernel
//! themselves.

const TAPS: usize = 64;

/// Generate the windowed-sinc low-pass kernel for cutoff `target_sr / 2`
/// at `original_sr`, normalized so the coefficients sum to 1 (unity DC
/// gain).
pub fn generate_kernel(original_sr: u32, target_sr: u32) -> Vec<f64> {
    let fc = (target_sr as f64 / 2.0) / original_sr as f64;
    let mut h = vec![0.0f64; TAPS];

    for (i, coeff) in h.iter_mut().enumerate() {
        let x = i as f64 - (TAPS - 1) as f64 / 2.0;
        let sinc = if x == 0.0 {
            1.0
        } else {
            (2.0 * std::f64::consts::PI * fc * x).sin() / (2.0 * std::f64::consts::PI * fc * x)
        };
        let blackman = 0.42 - 0.5 * (2.0 * std::f64::consts::PI * i as f64 / (TAPS - 1) as f64).cos()
            + 0.08 * (4.0 * std::f64::consts::PI * i as f64 / (TAPS - 1) as f64).cos();
        *coeff = sinc * blackman;
    }

    let sum: f64 = h.iter().sum();
    if sum != 0.0 {
        for coeff in h.iter_mut() {
            *coeff /= sum;
        }
    }

    h
}

/// Filter `x` with `kernel` (zero-padded linear convolution) then decimate
/// by `ratio = original_sr / target_sr`, producing `floor(N / ratio)`
/// output samples.
pub fn downsample(x: &[f32], original_sr: u32, target_sr: u32) -> Vec<f32> {
    if x.is_empty() {
        return Vec::new();
    }

    let kernel = generate_kernel(original_sr, target_sr);
    let half = TAPS / 2;
    let ratio = original_sr as f64 / target_sr as f64;
    let out_len = (x.len() as f64 / ratio).floor() as usize;

    let mut out = Vec::with_capacity(out_len);
    for i in 0..out_len {
        let center = (i as f64 * ratio).floor() as i64;
        let mut acc = 0.0f64;
        for (j, &h) in kernel.iter().enumerate() {
            let src = center - half as i64 + j as i64;
            if src >= 0 && (src as usize) < x.len() {
                acc += x[src as usize] as f64 * h;
            }
        }
        out.push(acc as f32);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_has_unity_dc_gain() {
        let kernel = generate_kernel(44100, 4000);
        let sum: f64 = kernel.iter().sum();
        assert!((sum - 1.0).abs() <= 1e-6);
    }

    #[test]
    fn kernel_length_is_64_taps() {
        assert_eq!(generate_kernel(44100, 4000).len(), 64);
    }

    #[test]
    fn output_length_matches_floor_ratio_law() {
        let x = vec![0.0f32; 44100];
        let out = downsample(&x, 44100, 4000);
        assert_eq!(out.len(), (44100.0f64 / (44100.0 / 4000.0)).floor() as usize);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(downsample(&[], 44100, 4000).is_empty());
    }

    #[test]
    fn silence_downsamples_to_silence() {
        let x = vec![0.0f32; 8000];
        let out = downsample(&x, 44100, 4000);
        assert!(out.iter().all(|&s| s.abs() < 1e-9));
    }
}
