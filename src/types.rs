//! Core value types shared across pipeline stages.
//!
//! Every type here is an immutable value object: a stage creates one, hands
//! it to the next stage, and never mutates it afterward.

use crate::error::{CodecError, Result};

/// A 16-bit signed PCM sample, as consumed/produced by the BRR codec.
pub type Pcm16 = i16;

/// A floating-point PCM sample, nominally in `[-1.0, 1.0]`.
pub type PcmF = f32;

/// A mono signal at a fixed integer sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalF {
    pub samples: Vec<PcmF>,
    pub sr: u32,
}

impl SignalF {
    pub fn new(samples: Vec<PcmF>, sr: u32) -> Result<Self> {
        if sr == 0 {
            return Err(CodecError::InvalidInput(format!(
                "sample rate must be positive, got {sr}"
            )));
        }
        Ok(Self { samples, sr })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
    }
}

/// A stereo signal: two equal-length mono signals sharing a sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct StereoF {
    pub left: Vec<PcmF>,
    pub right: Vec<PcmF>,
    pub sr: u32,
}

impl StereoF {
    pub fn new(left: Vec<PcmF>, right: Vec<PcmF>, sr: u32) -> Result<Self> {
        if sr == 0 {
            return Err(CodecError::InvalidInput(format!(
                "sample rate must be positive, got {sr}"
            )));
        }
        if left.len() != right.len() {
            return Err(CodecError::InvalidInput(format!(
                "left/right length mismatch: {} vs {}",
                left.len(),
                right.len()
            )));
        }
        Ok(Self { left, right, sr })
    }

    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}

/// A decorrelated Mid/Side pair. `mid` and `side` are always equal-length
/// while a `MidSide` value is alive; they may be independently resampled
/// afterward (see [`crate::mid_side::recombine`]'s zero-pad policy).
#[derive(Debug, Clone, PartialEq)]
pub struct MidSide {
    pub mid: Vec<PcmF>,
    pub side: Vec<PcmF>,
    pub sr: u32,
}

impl MidSide {
    pub fn new(mid: Vec<PcmF>, side: Vec<PcmF>, sr: u32) -> Result<Self> {
        if sr == 0 {
            return Err(CodecError::InvalidInput(format!(
                "sample rate must be positive, got {sr}"
            )));
        }
        if mid.len() != side.len() {
            return Err(CodecError::InvalidInput(format!(
                "mid/side length mismatch: {} vs {}",
                mid.len(),
                side.len()
            )));
        }
        Ok(Self { mid, side, sr })
    }

    pub fn len(&self) -> usize {
        self.mid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mid.is_empty()
    }
}

/// Two-sample predictor history carried between consecutive BRR blocks.
///
/// Values are always wrapped 16-bit signed integers; `PredState::default()`
/// is the all-zero state a stream starts (and a decoder starts) from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PredState {
    pub p1: i16,
    pub p2: i16,
}

impl PredState {
    pub fn advance(&mut self, sample: i16) {
        self.p2 = self.p1;
        self.p1 = sample;
    }
}
