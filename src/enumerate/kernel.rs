//! Codeword weight kernels
//!
//! Codeword bit `j` for a packed message `m` is the parity of
//! `popcount(mask_j & m)`; the codeword weight counts the odd columns.
//! The batched kernels evaluate `LANES` adjacent columns side by side so the
//! inner loop maps onto vector registers. Columns left over after the last
//! full batch go through the scalar path, so every column is counted.

use super::packing::ColumnMasks;

/// Parity of `popcount(mask & message)` accumulated over all words
#[inline]
pub fn column_bit(mask: &[u64], message: &[u64]) -> u32 {
    mask.iter()
        .zip(message)
        .fold(0u32, |acc, (&c, &m)| acc ^ (c & m).count_ones())
        & 1
}

/// Codeword weight with one column at a time
pub fn scalar_weight(masks: &ColumnMasks, message: &[u64]) -> usize {
    let w = masks.words_per_mask();
    masks
        .words()
        .chunks_exact(w)
        .map(|mask| column_bit(mask, message) as usize)
        .sum()
}

/// Codeword weight with `LANES` columns per batch
pub fn batched_weight<const LANES: usize>(masks: &ColumnMasks, message: &[u64]) -> usize {
    let w = masks.words_per_mask();
    let batches = masks.words().chunks_exact(LANES * w);
    let tail = batches.remainder();

    let mut weight = 0;
    for batch in batches {
        let mut parity = [0u32; LANES];
        for (word, &m) in message.iter().enumerate() {
            for (lane, p) in parity.iter_mut().enumerate() {
                *p ^= (batch[lane * w + word] & m).count_ones();
            }
        }
        weight += parity.iter().map(|&p| (p & 1) as usize).sum::<usize>();
    }

    weight
        + tail
            .chunks_exact(w)
            .map(|mask| column_bit(mask, message) as usize)
            .sum::<usize>()
}

/// Codeword weight for a lane width only known at run time
pub fn dynamic_batched_weight(masks: &ColumnMasks, message: &[u64], lanes: usize) -> usize {
    let w = masks.words_per_mask();
    let batches = masks.words().chunks_exact(lanes * w);
    let tail = batches.remainder();

    let mut parity = vec![0u32; lanes];
    let mut weight = 0;
    for batch in batches {
        parity.iter_mut().for_each(|p| *p = 0);
        for (word, &m) in message.iter().enumerate() {
            for (lane, p) in parity.iter_mut().enumerate() {
                *p ^= (batch[lane * w + word] & m).count_ones();
            }
        }
        weight += parity.iter().map(|&p| (p & 1) as usize).sum::<usize>();
    }

    weight
        + tail
            .chunks_exact(w)
            .map(|mask| column_bit(mask, message) as usize)
            .sum::<usize>()
}

/// Codeword weight using the kernel for `lane_width`
///
/// Common register widths get a monomorphized kernel; any other width
/// falls back to the dynamic one. `lane_width` must be at least 1.
pub fn codeword_weight(masks: &ColumnMasks, message: &[u64], lane_width: usize) -> usize {
    match lane_width {
        1 => scalar_weight(masks, message),
        2 => batched_weight::<2>(masks, message),
        4 => batched_weight::<4>(masks, message),
        8 => batched_weight::<8>(masks, message),
        16 => batched_weight::<16>(masks, message),
        n => dynamic_batched_weight(masks, message, n),
    }
}
