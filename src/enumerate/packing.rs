//! Bit-packed generator columns
//!
//! Column `j` of a `K × N` generator becomes a mask whose bit `p` is set iff
//! message bit `p` feeds codeword bit `j`. Masks span as many 64-bit words as
//! `K` needs, so message length is not capped at one machine word.

use aligned_vec::AVec;

use crate::constants::MASK_ALIGNMENT;
use crate::error::{CodeError, CodeResult};
use crate::matrix::{ensure_binary, BinMatrix, SparseBinaryMatrix};

const WORD_BITS: usize = u64::BITS as usize;

/// Generator columns packed into multi-word bit masks
pub struct ColumnMasks {
    n_message_bits: usize,
    n_columns: usize,
    words_per_mask: usize,
    /// Column-major: column `j` occupies `words[j * words_per_mask..][..words_per_mask]`
    words: AVec<u64>,
}

impl ColumnMasks {
    /// Packs the columns of a dense `K × N` generator matrix
    pub fn from_generator(g: &BinMatrix) -> CodeResult<Self> {
        ensure_binary(g)?;

        let (n_message_bits, n_columns) = g.dim();
        let mut masks = Self::empty(n_message_bits, n_columns);

        for ((p, j), &v) in g.indexed_iter() {
            if v == 1 {
                masks.set(p, j);
            }
        }

        Ok(masks)
    }

    /// Packs the columns of a sparse generator matrix
    pub fn from_sparse(g: &SparseBinaryMatrix) -> Self {
        let mut masks = Self::empty(g.n_rows, g.n_cols);

        for j in 0..g.n_cols {
            for &p in g.col(j) {
                masks.set(p, j);
            }
        }

        masks
    }

    fn empty(n_message_bits: usize, n_columns: usize) -> Self {
        let words_per_mask = words_for(n_message_bits);
        let words = AVec::from_iter(
            MASK_ALIGNMENT,
            std::iter::repeat(0u64).take(words_per_mask * n_columns),
        );

        Self {
            n_message_bits,
            n_columns,
            words_per_mask,
            words,
        }
    }

    fn set(&mut self, bit: usize, column: usize) {
        let idx = column * self.words_per_mask + bit / WORD_BITS;
        self.words[idx] |= 1u64 << (bit % WORD_BITS);
    }

    /// Message length K
    pub fn n_message_bits(&self) -> usize {
        self.n_message_bits
    }

    /// Codeword length N
    pub fn n_columns(&self) -> usize {
        self.n_columns
    }

    /// Words in one mask, and in one packed message
    pub fn words_per_mask(&self) -> usize {
        self.words_per_mask
    }

    /// All masks, column-major
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Mask of column `j`
    pub fn mask(&self, j: usize) -> &[u64] {
        let start = j * self.words_per_mask;
        &self.words[start..start + self.words_per_mask]
    }

    /// Packs message bits (least significant first) into mask-sized words
    pub fn pack_message(&self, bits: &[u8]) -> CodeResult<Vec<u64>> {
        if bits.len() != self.n_message_bits {
            return Err(CodeError::Dimension(format!(
                "message has {} bits, generator expects {}",
                bits.len(),
                self.n_message_bits
            )));
        }

        let mut words = vec![0u64; self.words_per_mask];
        for (p, &b) in bits.iter().enumerate() {
            if b & 1 == 1 {
                words[p / WORD_BITS] |= 1u64 << (p % WORD_BITS);
            }
        }
        Ok(words)
    }

    /// Packed message for candidate index `i`: bit `p` of `i` is message bit `p`
    pub fn index_message(&self, i: u64) -> Vec<u64> {
        let mut words = vec![0u64; self.words_per_mask];
        words[0] = i;
        words
    }
}

/// Number of words needed for `bits` bits, at least one
fn words_for(bits: usize) -> usize {
    ((bits + WORD_BITS - 1) / WORD_BITS).max(1)
}
