//! Resampling quality presets for the host (`rubato`) backend.
//!
//! These presets give the host path a concrete, testable configuration to
//! select from rather than hardcoding one fixed kernel.

/// Resampling quality presets, trading CPU for passband width / stopband
/// attenuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResamplingQuality {
    /// Low CPU, good for real-time streaming.
    Fast,
    /// Moderate CPU, good quality. The default.
    Balanced,
    /// Higher CPU, excellent quality.
    High,
    /// Highest CPU, audiophile quality.
    Maximum,
}

impl Default for ResamplingQuality {
    fn default() -> Self {
        Self::Balanced
    }
}

impl ResamplingQuality {
    /// Sinc interpolation length used by the `rubato` host backend.
    pub fn sinc_len(&self) -> usize {
        match self {
            Self::Fast => 64,
            Self::Balanced => 128,
            Self::High => 256,
            Self::Maximum => 512,
        }
    }

    /// Normalized cutoff relative to Nyquist.
    pub fn f_cutoff(&self) -> f32 {
        match self {
            Self::Fast => 0.90,
            Self::Balanced => 0.95,
            Self::High => 0.99,
            Self::Maximum => 0.995,
        }
    }

    pub fn oversampling_factor(&self) -> usize {
        match self {
            Self::Fast => 128,
            Self::Balanced => 256,
            Self::High => 512,
            Self::Maximum => 1024,
        }
    }

    /// Transition band width, normalized to Nyquist (0.0-1.0).
    pub fn transition_band(&self) -> f64 {
        match self {
            Self::Fast => 0.10,
            Self::Balanced => 0.05,
            Self::High => 0.01,
            Self::Maximum => 0.005,
        }
    }

    /// Approximate stopband attenuation in dB.
    pub fn stopband_attenuation_db(&self) -> f64 {
        match self {
            Self::Fast => 60.0,
            Self::Balanced => 100.0,
            Self::High => 140.0,
            Self::Maximum => 180.0,
        }
    }
}
