//! Mid/Side transform with coupled peak normalization.
//!
//! `Mid = (L + R) / 2`, `Side = (L - R) / 2`. Normalizing the pair with a
//! single shared gain (rather than normalizing each channel independently)
//! preserves the Mid:Side ratio and therefore the stereo image; see
//! [`normalize_coupled`].

use crate::error::{CodecError, Result};
use crate::types::{MidSide, PcmF, StereoF};

/// Peaks above this value are scaled down to it by [`normalize_coupled`].
const PEAK_CEILING: f32 = 0.95;

/// Split a stereo signal into Mid/Side. Fails if `left.len() != right.len()`.
pub fn split(stereo: &StereoF) -> Result<MidSide> {
    if stereo.left.len() != stereo.right.len() {
        return Err(CodecError::InvalidInput(format!(
            "stereo channels must have equal length, got {} and {}",
            stereo.left.len(),
            stereo.right.len()
        )));
    }

    let mid: Vec<PcmF> = stereo
        .left
        .iter()
        .zip(&stereo.right)
        .map(|(&l, &r)| (l + r) * 0.5)
        .collect();
    let side: Vec<PcmF> = stereo
        .left
        .iter()
        .zip(&stereo.right)
        .map(|(&l, &r)| (l - r) * 0.5)
        .collect();

    MidSide::new(mid, side, stereo.sr)
}

/// Recombine Mid/Side back into stereo. When `mid` and `side` have unequal
/// lengths (as can happen after independently resampling each to its own
/// target rate), the output length is the longer of the two and the shorter
/// signal is treated as zero-padded on the right.
pub fn recombine(mid: &[PcmF], side: &[PcmF], sr: u32) -> StereoF {
    let len = mid.len().max(side.len());
    let mut left = Vec::with_capacity(len);
    let mut right = Vec::with_capacity(len);

    for i in 0..len {
        let m = mid.get(i).copied().unwrap_or(0.0);
        let s = side.get(i).copied().unwrap_or(0.0);
        left.push(m + s);
        right.push(m - s);
    }

    StereoF { left, right, sr }
}

/// Coupled peak normalization: if `max(max|M|, max|S|) > 0.95`, scale both
/// signals by `0.95 / peak`; otherwise leave them unchanged. Returns the
/// multiplier that was applied (`1.0` if no scaling occurred) so callers can
/// log it.
pub fn normalize_coupled(mid_side: &mut MidSide) -> f32 {
    let peak_mid = mid_side.mid.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
    let peak_side = mid_side.side.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
    let peak = peak_mid.max(peak_side);

    if peak > PEAK_CEILING {
        let gain = PEAK_CEILING / peak;
        for s in mid_side.mid.iter_mut() {
            *s *= gain;
        }
        for s in mid_side.side.iter_mut() {
            *s *= gain;
        }
        tracing::debug!("mid/side: coupled normalization applied, gain={gain:.4} (peak was {peak:.4})");
        gain
    } else {
        1.0
    }
}
