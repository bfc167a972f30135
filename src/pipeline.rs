//! The pipeline orchestrator: wires Mid/Side, resampling, and BRR encode/
//! decode into the crate's primary entry point.
//!
//! A thin layer over independently testable stages, with no DSP logic of
//! its own.

use crate::brr::{self, BrrBlock};
use crate::error::{CodecError, Result};
use crate::gauss;
use crate::mid_side;
use crate::resampling::{self, ResamplingQuality};
use crate::types::{MidSide, PredState, SignalF, StereoF};

/// Configuration for a [`BrrPipeline`] run.
///
/// There is no environment variable or file-based configuration; every
/// field is supplied by the caller at construction time.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    pub mid_target_sr: u32,
    pub side_target_sr: u32,
    /// Whether [`BrrPipeline::decode`] applies the Gauss post-filter.
    pub gauss_on_decode: bool,
    pub resampling_quality: ResamplingQuality,
}

impl PipelineConfig {
    pub fn new(mid_target_sr: u32, side_target_sr: u32) -> Result<Self> {
        if mid_target_sr == 0 {
            return Err(CodecError::InvalidInput(
                "mid_target_sr must be positive".into(),
            ));
        }
        if side_target_sr == 0 {
            return Err(CodecError::InvalidInput(
                "side_target_sr must be positive".into(),
            ));
        }
        Ok(Self {
            mid_target_sr,
            side_target_sr,
            gauss_on_decode: false,
            resampling_quality: ResamplingQuality::default(),
        })
    }

    pub fn with_gauss_on_decode(mut self, on: bool) -> Self {
        self.gauss_on_decode = on;
        self
    }

    pub fn with_resampling_quality(mut self, quality: ResamplingQuality) -> Self {
        self.resampling_quality = quality;
        self
    }
}

/// The two encoded BRR streams produced by [`BrrPipeline::encode`], plus the
/// predictor states needed to continue encoding later chunks of the same
/// stereo source.
pub struct EncodedChannels {
    pub mid: Vec<BrrBlock>,
    pub side: Vec<BrrBlock>,
    pub mid_state: PredState,
    pub side_state: PredState,
    pub mid_sr: u32,
    pub side_sr: u32,
    /// The coupled normalization gain applied before encoding (1.0 if none).
    pub normalization_gain: f32,
}

/// Stereo float PCM decoded back from a pair of BRR streams.
pub struct DecodedStereo {
    pub stereo: StereoF,
    pub mid_state: PredState,
    pub side_state: PredState,
}

/// Converts stereo PCM into a pair of BRR bitstreams (Mid, Side), each
/// targeted at an independently configurable sample rate, and back.
pub struct BrrPipeline {
    config: PipelineConfig,
}

impl BrrPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the full forward pipeline: split → coupled normalize → downsample
    /// each channel to its configured target rate → BRR-encode each with a
    /// fresh (zeroed) predictor state.
    pub fn encode(&self, stereo: &StereoF) -> Result<EncodedChannels> {
        let mut mid_side = mid_side::split(stereo)?;
        let gain = mid_side::normalize_coupled(&mut mid_side);

        let MidSide { mid, side, sr } = mid_side;
        let mid_signal = SignalF::new(mid, sr)?;
        let side_signal = SignalF::new(side, sr)?;

        let mid_resampled = resampling::downsample(&mid_signal, self.config.mid_target_sr, self.config.resampling_quality)?;
        let side_resampled = resampling::downsample(&side_signal, self.config.side_target_sr, self.config.resampling_quality)?;

        let (mid_blocks, mid_state) = brr::encoder::encode(&mid_resampled.samples, PredState::default());
        let (side_blocks, side_state) = brr::encoder::encode(&side_resampled.samples, PredState::default());

        tracing::debug!(
            "pipeline: encoded mid={} blocks @{}Hz, side={} blocks @{}Hz, normalization_gain={gain:.4}",
            mid_blocks.len(),
            self.config.mid_target_sr,
            side_blocks.len(),
            self.config.side_target_sr,
        );

        Ok(EncodedChannels {
            mid: mid_blocks,
            side: side_blocks,
            mid_state,
            side_state,
            mid_sr: self.config.mid_target_sr,
            side_sr: self.config.side_target_sr,
            normalization_gain: gain,
        })
    }

    /// Run the inverse path for preview/round-trip purposes: BRR-decode each
    /// channel, optionally apply the Gauss filter, upsample each back to
    /// `playback_sr`, then recombine into stereo.
    ///
    /// Mid and Side are upsampled independently; if their post-upsample
    /// lengths differ, [`mid_side::recombine`]'s zero-pad policy applies.
    pub fn decode(&self, encoded: &EncodedChannels, playback_sr: u32) -> Result<DecodedStereo> {
        let (mid_pcm, mid_state) = brr::decoder::decode_to_f32(&encoded.mid, PredState::default());
        let (side_pcm, side_state) = brr::decoder::decode_to_f32(&encoded.side, PredState::default());

        let mid_pcm = if self.config.gauss_on_decode {
            gauss::apply(&mid_pcm)
        } else {
            mid_pcm
        };
        let side_pcm = if self.config.gauss_on_decode {
            gauss::apply(&side_pcm)
        } else {
            side_pcm
        };

        let mid_signal = SignalF::new(mid_pcm, encoded.mid_sr)?;
        let side_signal = SignalF::new(side_pcm, encoded.side_sr)?;

        let (mid_up, _) = resampling::upsample(&mid_signal, playback_sr, self.config.resampling_quality)?;
        let (side_up, _) = resampling::upsample(&side_signal, playback_sr, self.config.resampling_quality)?;

        let stereo = mid_side::recombine(&mid_up.samples, &side_up.samples, playback_sr);

        Ok(DecodedStereo {
            stereo,
            mid_state,
            side_state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_nonpositive_rates() {
        assert!(PipelineConfig::new(0, 8000).is_err());
        assert!(PipelineConfig::new(8000, 0).is_err());
        assert!(PipelineConfig::new(8000, 8000).is_ok());
    }

    #[test]
    fn encode_silence_yields_silent_streams() {
        let stereo = StereoF::new(vec![0.0; 256], vec![0.0; 256], 32000).unwrap();
        let config = PipelineConfig::new(16000, 8000).unwrap();
        let pipeline = BrrPipeline::new(config);
        let encoded = pipeline.encode(&stereo).unwrap();
        assert!(!encoded.mid.is_empty());
        assert!(!encoded.side.is_empty());
        assert_eq!(encoded.normalization_gain, 1.0);

        let (pcm, _) = brr::decoder::decode(&encoded.mid, PredState::default());
        assert!(pcm.iter().all(|&s| s == 0));
    }

    #[test]
    fn encode_then_decode_round_trip_preserves_shape() {
        let samples: Vec<f32> = (0..512).map(|i| ((i as f32) * 0.05).sin() * 0.3).collect();
        let stereo = StereoF::new(samples.clone(), samples, 32000).unwrap();
        let config = PipelineConfig::new(16000, 16000).unwrap();
        let pipeline = BrrPipeline::new(config);

        let encoded = pipeline.encode(&stereo).unwrap();
        let decoded = pipeline.decode(&encoded, 32000).unwrap();

        assert!(!decoded.stereo.is_empty());
        assert_eq!(decoded.stereo.left.len(), decoded.stereo.right.len());
    }

    #[test]
    fn encode_applies_coupled_normalization_when_clipping() {
        let left = vec![0.99f32; 64];
        let right = vec![0.99f32; 64];
        let stereo = StereoF::new(left, right, 32000).unwrap();
        let config = PipelineConfig::new(16000, 16000).unwrap();
        let pipeline = BrrPipeline::new(config);
        let encoded = pipeline.encode(&stereo).unwrap();
        assert!(encoded.normalization_gain < 1.0);
    }

    #[test]
    fn gauss_on_decode_toggle_changes_output() {
        let samples: Vec<f32> = (0..256).map(|i| ((i as f32) * 0.3).sin() * 0.5).collect();
        let stereo = StereoF::new(samples.clone(), samples, 32000).unwrap();

        let plain_config = PipelineConfig::new(16000, 16000).unwrap();
        let gauss_config = plain_config.with_gauss_on_decode(true);

        let plain_pipeline = BrrPipeline::new(plain_config);
        let gauss_pipeline = BrrPipeline::new(gauss_config);

        let encoded = plain_pipeline.encode(&stereo).unwrap();
        let plain_decoded = plain_pipeline.decode(&encoded, 32000).unwrap();
        let gauss_decoded = gauss_pipeline.decode(&encoded, 32000).unwrap();

        assert_ne!(plain_decoded.stereo.left, gauss_decoded.stereo.left);
    }

    #[test]
    fn full_scale_left_impulse_reconstructs_with_greater_left_peak() {
        // S2: a full-scale impulse on the left channel only splits to
        // Mid[0]=Side[0]=0.5; normalization leaves it untouched (0.5 is
        // below the 0.95 ceiling), BRR round-trip preserves a peak near 0.5,
        // and the reconstructed left channel's peak exceeds the right's.
        let n = 64;
        let mut left = vec![0.0f32; n];
        left[0] = 1.0;
        let right = vec![0.0f32; n];
        let stereo = StereoF::new(left, right, 44100).unwrap();

        let mut split = mid_side::split(&stereo).unwrap();
        assert!((split.mid[0] - 0.5).abs() < 1e-6);
        assert!((split.side[0] - 0.5).abs() < 1e-6);

        let gain = mid_side::normalize_coupled(&mut split);
        assert_eq!(gain, 1.0);

        let (mid_blocks, _) = brr::encoder::encode(&split.mid, PredState::default());
        let (side_blocks, _) = brr::encoder::encode(&split.side, PredState::default());
        let (mid_pcm, _) = brr::decoder::decode_to_f32(&mid_blocks, PredState::default());
        let (side_pcm, _) = brr::decoder::decode_to_f32(&side_blocks, PredState::default());

        let mid_peak = mid_pcm.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
        assert!((mid_peak - 0.5).abs() / 0.5 < 0.05);

        let stereo_back = mid_side::recombine(&mid_pcm, &side_pcm, 44100);
        let left_peak = stereo_back.left.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
        let right_peak = stereo_back.right.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
        assert!(left_peak > right_peak);
    }
}
