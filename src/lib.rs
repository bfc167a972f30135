//! BRR codec pipeline
//!
//! Converts stereo PCM audio into a pair of compressed SNES SPC700 BRR
//! bitstreams (Mid, Side), each targeted at an independently configurable
//! sample rate, and decodes them back. Four subsystems carry the
//! complexity:
//!
//! - [`mid_side`] — Mid/Side transform with coupled peak normalization.
//! - [`resampling`] — windowed-sinc polyphase downsampler, with a
//!   host-resampler (`rubato`) path for targets at or above 8 kHz.
//! - [`brr`] — the BRR encoder (brute-force 13×4 parameter search per
//!   16-sample block) and decoder (faithful SPC700 decode emulation).
//! - [`gauss`] — the optional decode-side Gauss post-filter.
//!
//! [`pipeline::BrrPipeline`] is the primary entry point, wiring these stages
//! together.
//!
//! # Example
//!
//! ```
//! use brr_codec::pipeline::{BrrPipeline, PipelineConfig};
//! use brr_codec::types::StereoF;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let samples: Vec<f32> = (0..256).map(|i| ((i as f32) * 0.05).sin() * 0.3).collect();
//! let stereo = StereoF::new(samples.clone(), samples, 32000)?;
//!
//! let config = PipelineConfig::new(16000, 16000)?;
//! let pipeline = BrrPipeline::new(config);
//! let encoded = pipeline.encode(&stereo)?;
//! let decoded = pipeline.decode(&encoded, 32000)?;
//! println!("decoded {} stereo frames", decoded.stereo.len());
//! # Ok(())
//! # }
//! ```
//!
//! Out of scope: container decoding of compressed formats (MP3/OGG), UI,
//! playback, anti-imaging upsample filtering, ROM image production,
//! transcoding to non-BRR formats.

pub mod brr;
pub mod error;
pub mod gauss;
pub mod mid_side;
pub mod pipeline;
pub mod resampling;
pub mod types;
pub mod wav;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{CodecError, Result};
pub use pipeline::{BrrPipeline, PipelineConfig};
