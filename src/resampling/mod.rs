//! Sample rate conversion: a router over two implementations.
//!
//! - [`fir`] — the internal windowed-sinc FIR path, used when downsampling
//!   to below 8 kHz.
//! - [`host`] — the `rubato`-backed path, used otherwise, and for all
//!   upsampling (preview only).
//!
//! Both paths produce an output length of `floor(N * target_sr / sr)`.

pub mod fir;
pub mod host;
pub mod quality;

pub use host::UpsampleResult;
pub use quality::ResamplingQuality;

use crate::error::Result;
use crate::types::SignalF;

/// Targets below this use the internal FIR path instead of the host
/// resampler.
pub const FIR_ROUTER_THRESHOLD_HZ: u32 = 8000;

/// Downsample a mono signal to `target_sr`, routing to the internal FIR
/// path below [`FIR_ROUTER_THRESHOLD_HZ`] and to the host path otherwise.
pub fn downsample(signal: &SignalF, target_sr: u32, quality: ResamplingQuality) -> Result<SignalF> {
    let samples = if target_sr < FIR_ROUTER_THRESHOLD_HZ {
        tracing::debug!("resampler: routing downsample to {target_sr} Hz via internal FIR path");
        fir::downsample(&signal.samples, signal.sr, target_sr)
    } else {
        tracing::debug!("resampler: routing downsample to {target_sr} Hz via host (rubato) path");
        host::downsample(&signal.samples, signal.sr, target_sr, quality)?
    };
    SignalF::new(samples, target_sr)
}

/// Upsample a mono signal to `target_sr` for preview playback. Always uses
/// the host path; see [`host::upsample`] for the sub-8kHz floor
/// compensation.
pub fn upsample(signal: &SignalF, target_sr: u32, quality: ResamplingQuality) -> Result<(SignalF, f64)> {
    let result = host::upsample(&signal.samples, signal.sr, target_sr, quality)?;
    let out = SignalF::new(result.samples, target_sr)?;
    Ok((out, result.playback_rate_multiplier))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn router_picks_fir_below_threshold() {
        let signal = SignalF::new(vec![0.0; 44100], 44100).unwrap();
        let out = downsample(&signal, 4000, ResamplingQuality::Balanced).unwrap();
        assert_eq!(out.sr, 4000);
        assert_eq!(out.len(), (44100.0f64 / (44100.0 / 4000.0)).floor() as usize);
    }

    #[test]
    fn router_picks_host_above_threshold() {
        let signal = SignalF::new(vec![0.0; 44100], 44100).unwrap();
        let out = downsample(&signal, 32000, ResamplingQuality::Fast).unwrap();
        assert_eq!(out.sr, 32000);
        assert!(!out.is_empty());
    }
}
