//! BRR encoder: brute-force per-block parameter search.
//!
//! For each 16-sample block the encoder tries all 13 shifts × 4 filters (52
//! candidates), runs a trial quantization against each, and keeps the
//! candidate with the lowest mean squared error. Ties are broken by search
//! order (`shift` outer, `filter` inner — first-found wins), which is why
//! the loops below are nested in that exact order.

use super::block::BrrBlock;
use super::primitives::{clamp16, predict, wrap16};
use crate::types::{Pcm16, PcmF, PredState};

const BLOCK_LEN: usize = 16;
const SHIFTS: std::ops::RangeInclusive<u8> = 0..=12;
const FILTERS: std::ops::RangeInclusive<u8> = 0..=3;

/// Penalty added to a trial's MSE when a reconstructed sample falls outside
/// `i16` range, so the search discards the candidate without disqualifying
/// it outright (kept additive rather than a hard disqualification, so the
/// search space is never empty).
const OUT_OF_RANGE_PENALTY: f64 = 1.0e12;

/// Result of quantizing one 16-sample block with a fixed `(shift, filter)`.
struct Trial {
    mse: f64,
    nibbles: [i8; BLOCK_LEN],
    final_state: PredState,
    out_of_range: bool,
}

/// Quantize `block` (must be exactly [`BLOCK_LEN`] samples) with the given
/// parameters, starting from `state`.
fn quantize_block(block: &[i16; BLOCK_LEN], shift: u8, filter: u8, state: PredState) -> Trial {
    let mut p1 = state.p1;
    let mut p2 = state.p2;
    let mut nibbles = [0i8; BLOCK_LEN];
    let mut error = 0.0f64;
    let mut out_of_range = false;

    let step = 1i32 << shift;

    for (i, &pcm) in block.iter().enumerate() {
        let pred = predict(filter, p1, p2);
        let vlin = (pred as i32) >> 1;

        let mut diff = ((pcm as i32) >> 1) - vlin;
        if diff > 16384 && diff < 32768 {
            diff -= 32768;
        } else if diff < -16384 && diff > -32768 {
            diff += 32768;
        }

        let d = diff + (step << 2) + (step >> 2);

        let c = if d > 0 {
            let c = if step > 1 { d / (step >> 1) } else { d * 2 };
            c.min(15)
        } else {
            0
        };

        let nibble = (c - 8) as i8; // range [-8, 7]
        nibbles[i] = nibble;

        let dp = ((nibble as i32) << shift) >> 1;
        let half = vlin + dp;
        let clamped_half = clamp16(half as f32);
        let recon = (clamped_half as i32) * 2;
        if !(i16::MIN as i32..=i16::MAX as i32).contains(&recon) {
            out_of_range = true;
        }
        let wrapped_recon = wrap16(recon);

        let diff_f = pcm as f64 - wrapped_recon as f64;
        error += diff_f * diff_f;

        p2 = p1;
        p1 = wrapped_recon;
    }

    let mut mse = error / BLOCK_LEN as f64;
    if out_of_range {
        mse += OUT_OF_RANGE_PENALTY;
    }

    Trial {
        mse,
        nibbles,
        final_state: PredState { p1, p2 },
        out_of_range,
    }
}

fn pack_nibbles(nibbles: &[i8; BLOCK_LEN]) -> [u8; 8] {
    let mut data = [0u8; 8];
    for (i, &nibble) in nibbles.iter().enumerate() {
        let nib = (nibble & 0x0F) as u8;
        if i % 2 == 0 {
            data[i / 2] = nib << 4;
        } else {
            data[i / 2] |= nib;
        }
    }
    data
}

/// Encode one zero-padded 16-sample block, searching all 52 candidates.
/// Returns the emitted block and the predictor state to carry into the
/// next block.
fn encode_block(block: &[i16; BLOCK_LEN], state: PredState, is_last: bool) -> (BrrBlock, PredState) {
    let mut best: Option<(u8, u8, Trial)> = None;

    for shift in SHIFTS {
        for filter in FILTERS {
            let trial = quantize_block(block, shift, filter, state);
            let better = match &best {
                None => true,
                Some((_, _, current_best)) => trial.mse < current_best.mse,
            };
            if trial.out_of_range {
                tracing::warn!(
                    "brr encoder: trial (shift={shift}, filter={filter}) reconstructs outside i16 range"
                );
            }
            if better {
                best = Some((shift, filter, trial));
            }
        }
    }

    // The search space is exhaustive and `quantize_block` always returns a
    // finite MSE, so `best` is never `None`; the shift=0/filter=0 fallback
    // is unreachable in practice but kept rather than an `unwrap`.
    let (shift, filter, trial) = best.unwrap_or_else(|| {
        let trial = quantize_block(block, 0, 0, state);
        (0, 0, trial)
    });

    tracing::trace!("brr encoder: block shift={shift} filter={filter} mse={:.3}", trial.mse);

    let data = pack_nibbles(&trial.nibbles);
    let emitted = BrrBlock::new(shift, filter, is_last, data);
    (emitted, trial.final_state)
}

/// Encode a float PCM signal into a BRR byte stream.
///
/// Floats are converted to `i16` via `clamp16(x * 32767)`, then the sequence
/// is zero-padded on the right to a multiple of 16 samples. An empty input
/// yields an empty stream (no END bit anywhere).
pub fn encode(samples: &[PcmF], initial_state: PredState) -> (Vec<BrrBlock>, PredState) {
    if samples.is_empty() {
        return (Vec::new(), initial_state);
    }

    let pcm: Vec<Pcm16> = samples.iter().map(|&s| clamp16(s * 32767.0)).collect();
    let padded_len = pcm.len().div_ceil(BLOCK_LEN) * BLOCK_LEN;
    let mut padded = pcm;
    padded.resize(padded_len, 0);

    let num_blocks = padded_len / BLOCK_LEN;
    let mut blocks = Vec::with_capacity(num_blocks);
    let mut state = initial_state;

    for (i, chunk) in padded.chunks_exact(BLOCK_LEN).enumerate() {
        let block: &[i16; BLOCK_LEN] = chunk.try_into().unwrap();
        let is_last = i == num_blocks - 1;
        let (emitted, next_state) = encode_block(block, state, is_last);
        blocks.push(emitted);
        state = next_state;
    }

    (blocks, state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brr::decoder::decode;

    #[test]
    fn empty_input_yields_empty_stream() {
        let (blocks, _) = encode(&[], PredState::default());
        assert!(blocks.is_empty());
    }

    #[test]
    fn block_count_matches_ceil_div_16() {
        let samples = vec![0.1f32; 33];
        let (blocks, _) = encode(&samples, PredState::default());
        assert_eq!(blocks.len(), 3); // ceil(33/16) = 3
    }

    #[test]
    fn only_final_block_has_end_bit() {
        let samples = vec![0.2f32; 40];
        let (blocks, _) = encode(&samples, PredState::default());
        for (i, block) in blocks.iter().enumerate() {
            assert_eq!(block.is_end(), i == blocks.len() - 1);
            assert!(!block.is_loop());
        }
    }

    #[test]
    fn silence_encodes_to_silence() {
        let samples = vec![0.0f32; 64];
        let (blocks, _) = encode(&samples, PredState::default());
        let (pcm, _) = decode(&blocks, PredState::default());
        assert!(pcm.iter().all(|&s| s == 0));
    }

    #[test]
    fn streaming_state_continuity_matches_single_call() {
        let samples: Vec<f32> = (0..64)
            .map(|i| ((i as f32) * 0.1).sin() * 0.5)
            .collect();

        let (whole, _) = encode(&samples, PredState::default());

        let (first_half, mid_state) = encode(&samples[0..32], PredState::default());
        let (second_half, _) = encode(&samples[32..], mid_state);

        let mut split = first_half;
        split.extend(second_half);

        assert_eq!(whole, split);
    }

    #[test]
    fn search_is_locally_optimal() {
        let samples: Vec<f32> = (0..16).map(|i| (i as f32 / 16.0) * 0.9 - 0.45).collect();
        let block: [i16; BLOCK_LEN] = samples
            .iter()
            .map(|&s| clamp16(s * 32767.0))
            .collect::<Vec<_>>()
            .try_into()
            .unwrap();

        let mut best_mse = f64::INFINITY;
        for shift in SHIFTS {
            for filter in FILTERS {
                let trial = quantize_block(&block, shift, filter, PredState::default());
                best_mse = best_mse.min(trial.mse);
            }
        }

        let (emitted, _) = encode_block(&block, PredState::default(), true);
        let chosen_trial = quantize_block(&block, emitted.shift(), emitted.filter(), PredState::default());
        assert!((chosen_trial.mse - best_mse).abs() < 1e-9);
    }

    #[test]
    fn nibble_layout_matches_known_block() {
        // S5: sample 0 must land in the high nibble of data byte 1
        // (`BrrBlock::data()[0]`'s upper four bits), sample 1 in its low
        // nibble.
        let mut nibbles = [0i8; BLOCK_LEN];
        nibbles[0] = 7;
        nibbles[1] = -3;
        let data = pack_nibbles(&nibbles);
        assert_eq!(data[0], 0x7D); // high nibble 0x7, low nibble 0xD (-3 in 4-bit two's complement)

        let block = BrrBlock::new(12, 3, true, data);
        assert_eq!(block.bytes[0], (12 << 4) | (3 << 2) | 0x01);
        assert_eq!(block.data()[0], 0x7D);
    }

    #[test]
    fn predictor_wrap_boundary_block_decodes_within_i16() {
        // S4: history chosen so filter 2's unwrapped prediction
        // (61/32*p1 - 15/16*p2) exceeds i16::MAX before wrap16 narrows it
        // back into range.
        let extreme_state = PredState {
            p1: i16::MAX,
            p2: i16::MIN,
        };
        let unwrapped = 61.0 / 32.0 * extreme_state.p1 as f64 - 15.0 / 16.0 * extreme_state.p2 as f64;
        assert!(unwrapped > i16::MAX as f64);

        let block: [i16; BLOCK_LEN] = [i16::MAX, i16::MIN]
            .iter()
            .cycle()
            .take(BLOCK_LEN)
            .copied()
            .collect::<Vec<_>>()
            .try_into()
            .unwrap();

        let (emitted, _) = encode_block(&block, extreme_state, true);
        let (decoded, _) = decode(&[emitted], extreme_state);
        assert_eq!(decoded.len(), BLOCK_LEN);
        assert!(decoded
            .iter()
            .all(|&s| (i16::MIN as i32..=i16::MAX as i32).contains(&(s as i32))));
    }
}
