//! Host resampler path: delegated to for targets at or above 8 kHz, where
//! aliasing risk from a simpler kernel is low. Implemented with `rubato`'s
//! sinc interpolator, mirroring how this codebase already leans on `rubato`
//! for playback-rate conversion.

use rubato::{Resampler as RubatoResamplerTrait, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction};

use super::quality::ResamplingQuality;
use crate::error::{CodecError, Result};

fn params_for(quality: ResamplingQuality) -> SincInterpolationParameters {
    SincInterpolationParameters {
        sinc_len: quality.sinc_len(),
        f_cutoff: quality.f_cutoff(),
        interpolation: SincInterpolationType::Cubic,
        oversampling_factor: quality.oversampling_factor(),
        window: WindowFunction::BlackmanHarris2,
    }
}

/// Resample a single mono channel from `input_rate` to `output_rate` using
/// the host backend. Processes the whole buffer through `rubato` in chunks
/// sized to what the resampler asks for next.
fn resample_mono(samples: &[f32], input_rate: u32, output_rate: u32, quality: ResamplingQuality) -> Result<Vec<f32>> {
    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let ratio = output_rate as f64 / input_rate as f64;
    let params = params_for(quality);
    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, 1024, 1).map_err(|e| {
        CodecError::ResamplerUnavailable {
            target_sr: output_rate,
            reason: e.to_string(),
        }
    })?;

    let mut output = Vec::new();
    let mut processed = 0usize;

    while processed < samples.len() {
        let needed = resampler.input_frames_next();
        let available = samples.len() - processed;
        let take = available.min(needed);
        if take == 0 {
            break;
        }

        let chunk = vec![samples[processed..processed + take].to_vec()];
        let out_chunks = if take == needed {
            resampler.process(&chunk, None)
        } else {
            resampler.process_partial(Some(&chunk), None)
        }
        .map_err(|e| CodecError::ResamplerUnavailable {
            target_sr: output_rate,
            reason: e.to_string(),
        })?;

        output.extend_from_slice(&out_chunks[0]);
        processed += take;
    }

    Ok(output)
}

/// Downsample one mono channel using the host path (for `target_sr >=
/// 8000`).
pub fn downsample(samples: &[f32], original_sr: u32, target_sr: u32, quality: ResamplingQuality) -> Result<Vec<f32>> {
    resample_mono(samples, original_sr, target_sr, quality)
}

/// The lowest rate most host resamplers will accept directly (commonly
/// 8 kHz). Below this, [`upsample`] declares a higher rate to the backend
/// and returns a playback-rate multiplier the caller must apply.
pub const HOST_RATE_FLOOR: u32 = 8000;

/// Result of an upsample that may have had to declare a rate above the
/// signal's true `original_sr` to satisfy the host backend's floor.
pub struct UpsampleResult {
    pub samples: Vec<f32>,
    /// Rate actually declared to the host backend.
    pub declared_sr: u32,
    /// Multiply by this at playback time to recover the true duration
    /// (`original_sr / declared_sr`); `1.0` if no compensation was needed.
    pub playback_rate_multiplier: f64,
}

/// Upsample one mono channel to `target_sr`, honoring the true duration
/// `N / original_sr` even when `original_sr` is below the host floor by
/// presenting a higher declared rate and reporting the compensating
/// multiplier.
pub fn upsample(
    samples: &[f32],
    original_sr: u32,
    target_sr: u32,
    quality: ResamplingQuality,
) -> Result<UpsampleResult> {
    let declared_sr = original_sr.max(HOST_RATE_FLOOR);
    let playback_rate_multiplier = original_sr as f64 / declared_sr as f64;

    let out = resample_mono(samples, declared_sr, target_sr, quality)?;

    Ok(UpsampleResult {
        samples: out,
        declared_sr,
        playback_rate_multiplier,
    })
}
