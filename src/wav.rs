//! RIFF/WAVE PCM16 container, via `hound`.
//!
//! The BRR core treats file I/O as an external collaborator; this module
//! exists because a complete crate needs *some* way to get PCM in and out
//! for testing and tooling. It is adjacent to the pipeline, not wired into
//! its public API, mirroring how this codebase uses `hound::WavReader` for
//! impulse-response loading: WAV I/O is tooling around the DSP core, not
//! part of it.

use std::io::Cursor;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::{CodecError, Result};

/// Encode interleaved float PCM samples (clamped to `[-1, 1]`) as a
/// RIFF/WAVE PCM16 byte buffer.
///
/// `channels` must be 1 (mono) or 2 (stereo, L/R interleaved).
pub fn write(samples: &[f32], sample_rate: u32, channels: u16) -> Result<Vec<u8>> {
    if channels == 0 {
        return Err(CodecError::InvalidInput("channel count must be positive".into()));
    }

    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::new(Cursor::new(Vec::new()), spec)
        .map_err(|e| CodecError::InvalidWav(e.to_string()))?;

    for &s in samples {
        let clamped = s.clamp(-1.0, 1.0);
        let quantized = if clamped < 0.0 {
            (clamped * 32768.0) as i16
        } else {
            (clamped * 32767.0) as i16
        };
        writer
            .write_sample(quantized)
            .map_err(|e| CodecError::InvalidWav(e.to_string()))?;
    }

    let cursor = writer.into_inner().map_err(|e| CodecError::InvalidWav(e.to_string()))?;
    Ok(cursor.into_inner())
}

/// A demuxed WAV payload.
pub struct WavData {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

/// Parse a RIFF/WAVE PCM16 buffer into interleaved float PCM.
pub fn read(bytes: &[u8]) -> Result<WavData> {
    let mut reader = WavReader::new(Cursor::new(bytes)).map_err(|e| CodecError::InvalidWav(e.to_string()))?;
    let spec = reader.spec();

    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(CodecError::InvalidWav(format!(
            "unsupported WAV format {:?}/{}-bit, only 16-bit PCM is supported",
            spec.sample_format, spec.bits_per_sample
        )));
    }

    let samples = reader
        .samples::<i16>()
        .map(|s| s.map(|s| s as f32 / 32768.0).map_err(|e| CodecError::InvalidWav(e.to_string())))
        .collect::<Result<Vec<f32>>>()?;

    Ok(WavData {
        samples,
        sample_rate: spec.sample_rate,
        channels: spec.channels,
    })
}
