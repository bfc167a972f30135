//! Codec-wide error type

use thiserror::Error;

/// Result type alias using [`CodecError`]
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors surfaced at the pipeline boundary.
///
/// Internal encoder trials never produce an error: an out-of-range
/// reconstruction is penalized in the MSE search (see [`crate::brr::encoder`])
/// rather than propagated.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Non-stereo input to [`crate::mid_side::split`], mismatched channel
    /// lengths, or a non-positive sample rate.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The host resampler declined a sample rate and no internal fallback
    /// was available.
    #[error("resampler unavailable for {target_sr} Hz: {reason}")]
    ResamplerUnavailable { target_sr: u32, reason: String },

    /// Malformed WAV container.
    #[error("invalid WAV data: {0}")]
    InvalidWav(String),

    /// I/O error while reading or writing a WAV buffer.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
