//! BRR decoder: a faithful emulation of the SPC700 decode path.

use super::block::BrrBlock;
use super::primitives::{clamp16, predict, wrap16};
use crate::types::{Pcm16, PredState};

/// Decode one 4-bit nibble (already sign-extended to `i8`/range [-8,7])
/// into the next PCM sample, advancing `state` in place.
fn decode_sample(nibble: i8, shift: u8, filter: u8, state: &mut PredState) -> Pcm16 {
    let mut sample: i32 = if shift <= 12 {
        ((nibble as i32) << shift) >> 1
    } else {
        // Hardware quirk: shifts 13-15 clamp the raw differential instead of
        // shifting it.
        if nibble < 0 {
            -2048
        } else {
            2048
        }
    };

    sample += predict(filter, state.p1, state.p2) as i32;
    let mut sample = clamp16(sample as f32) as i32;

    // 15-bit wrap: SPC700-specific post-clamp narrow-range wrap.
    if sample > 16383 {
        sample -= 32768;
    } else if sample < -16384 {
        sample += 32768;
    }

    let sample = sample as i16;
    state.advance(sample);

    wrap16((sample as i32) * 2)
}

/// Decode a sequence of BRR blocks into PCM16 samples.
///
/// Output length is always `blocks.len() * 16`. Returns the final
/// predictor state, which is useful for decoding a stream in chunks.
pub fn decode(blocks: &[BrrBlock], initial_state: PredState) -> (Vec<Pcm16>, PredState) {
    let mut state = initial_state;
    let mut out = Vec::with_capacity(blocks.len() * 16);

    for block in blocks {
        let shift = block.shift();
        let filter = block.filter();
        for &byte in block.data() {
            let high = sign_extend_nibble((byte >> 4) & 0x0F);
            let low = sign_extend_nibble(byte & 0x0F);
            out.push(decode_sample(high, shift, filter, &mut state));
            out.push(decode_sample(low, shift, filter, &mut state));
        }
    }

    (out, state)
}

/// Decode a BRR stream directly to float PCM in `[-1, 1]` (`s / 32768.0`).
pub fn decode_to_f32(blocks: &[BrrBlock], initial_state: PredState) -> (Vec<f32>, PredState) {
    let (pcm, state) = decode(blocks, initial_state);
    let floats = pcm.iter().map(|&s| s as f32 / 32768.0).collect();
    (floats, state)
}

fn sign_extend_nibble(nibble: u8) -> i8 {
    if nibble & 0x08 != 0 {
        (nibble as i8) - 16
    } else {
        nibble as i8
    }
}
