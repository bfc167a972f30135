//! Test signal generation for codec testing.
//!
//! Standard signals used in the scenario tests (S1-S6): sine waves, a single
//! impulse, white noise, and DC. All generators return mono samples.

/// Generate a sine wave.
pub fn generate_sine_wave(frequency: f32, sample_rate: u32, duration: f32, amplitude: f32) -> Vec<f32> {
    let num_samples = (sample_rate as f32 * duration) as usize;
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            (2.0 * std::f32::consts::PI * frequency * t).sin() * amplitude
        })
        .collect()
}

/// Generate white noise.
#[cfg(feature = "test-utils")]
pub fn generate_white_noise(sample_rate: u32, duration: f32, amplitude: f32) -> Vec<f32> {
    let num_samples = (sample_rate as f32 * duration) as usize;
    (0..num_samples)
        .map(|_| (rand::random::<f32>() * 2.0 - 1.0) * amplitude)
        .collect()
}

/// Generate a single-sample impulse at 10% of the buffer.
pub fn generate_impulse(sample_rate: u32, duration: f32, amplitude: f32) -> Vec<f32> {
    let num_samples = (sample_rate as f32 * duration) as usize;
    let mut samples = vec![0.0; num_samples];
    let impulse_position = num_samples / 10;
    if impulse_position < samples.len() {
        samples[impulse_position] = amplitude;
    }
    samples
}

/// Generate a constant (DC) signal.
pub fn generate_dc(sample_rate: u32, duration: f32, amplitude: f32) -> Vec<f32> {
    let num_samples = (sample_rate as f32 * duration) as usize;
    vec![amplitude; num_samples]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_wave_has_expected_length_and_peak() {
        let signal = generate_sine_wave(440.0, 44100, 1.0, 1.0);
        assert_eq!(signal.len(), 44100);
        let max_amplitude = signal.iter().map(|s| s.abs()).fold(0.0f32, f32::max);
        assert!(max_amplitude > 0.99 && max_amplitude <= 1.0);
    }

    #[test]
    fn impulse_is_mostly_silent() {
        let signal = generate_impulse(44100, 0.1, 1.0);
        let non_zero_count = signal.iter().filter(|&&s| s.abs() > 0.0001).count();
        assert_eq!(non_zero_count, 1);
    }

    #[test]
    fn dc_signal_is_constant() {
        let signal = generate_dc(1000, 0.01, 0.5);
        assert!(signal.iter().all(|&s| s == 0.5));
    }
}
