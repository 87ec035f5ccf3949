//! Hamming-weight distribution of a binary linear code
//!
//! Candidate message `i` is read as a K-bit vector (bit `p` of `i` is message
//! bit `p`), encoded through the packed generator columns and its codeword
//! weight is counted. Messages are independent, so the range of indices is
//! split across a rayon pool; each worker fills its own histogram and the
//! histograms are summed once at the end.

pub mod kernel;
pub mod packing;

use std::fmt;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::{CodeError, CodeResult};
use crate::matrix::{AsBinaryMatrix, EnumerationConfig, EnumerationMode};

pub use kernel::codeword_weight;
pub use packing::ColumnMasks;

/// Codeword counts indexed by Hamming weight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightHistogram {
    /// `counts[w]` messages produced a codeword of weight `w`, for `w` in `0..=N`
    pub counts: Vec<u64>,

    /// Whether the whole message space was covered
    pub mode: EnumerationMode,

    /// Wall time spent enumerating
    pub elapsed: Duration,
}

impl WeightHistogram {
    /// Number of messages evaluated
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Count for weight `w`, 0 when `w > N`
    pub fn count(&self, w: usize) -> u64 {
        self.counts.get(w).copied().unwrap_or(0)
    }

    /// `(weight, count)` pairs with a nonzero count
    pub fn nonzero(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(w, &c)| (w, c))
    }

    /// Smallest nonzero codeword weight seen
    ///
    /// For an exhaustive run this is the minimum distance of the code; for
    /// a sampled run it is an upper bound.
    pub fn min_nonzero_weight(&self) -> Option<usize> {
        self.nonzero().map(|(w, _)| w).find(|&w| w > 0)
    }
}

impl fmt::Display for WeightHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (w, c) in self.counts.iter().enumerate() {
            writeln!(f, "{}: {}", w, c)?;
        }
        Ok(())
    }
}

/// Enumerates codeword weights over the message space chosen by `config.mode`
///
/// `g` is a `K × N` generator matrix, dense or sparse.
pub fn enumerate_weights<G: AsBinaryMatrix + ?Sized>(
    g: &G,
    config: &EnumerationConfig,
) -> CodeResult<WeightHistogram> {
    let masks = ColumnMasks::from_generator(&g.as_binary())?;
    enumerate_masks(&masks, config)
}

/// Enumerates exactly `candidate_count` messages, indices `0..candidate_count`
///
/// The run is exhaustive when `candidate_count == 2^K`, otherwise sampled;
/// the returned histogram records which.
pub fn enumerate<G: AsBinaryMatrix + ?Sized>(
    g: &G,
    candidate_count: u64,
    config: &EnumerationConfig,
) -> CodeResult<WeightHistogram> {
    let masks = ColumnMasks::from_generator(&g.as_binary())?;
    let exhaustive = EnumerationMode::Exhaustive
        .candidate_count(masks.n_message_bits())
        .map_or(false, |n| n == candidate_count);

    let mode = if exhaustive {
        EnumerationMode::Exhaustive
    } else {
        EnumerationMode::Sampled(candidate_count)
    };

    enumerate_masks(&masks, &config.clone().with_mode(mode))
}

/// Enumerates codeword weights for already packed generator columns
pub fn enumerate_masks(
    masks: &ColumnMasks,
    config: &EnumerationConfig,
) -> CodeResult<WeightHistogram> {
    config.validate()?;

    let k = masks.n_message_bits();
    let n = masks.n_columns();
    let candidates = config.mode.candidate_count(k)?;

    if let EnumerationMode::Sampled(count) = config.mode {
        if k < u64::BITS as usize && count > 1u64 << k {
            return Err(CodeError::Dimension(format!(
                "{} samples requested from a space of 2^{} messages",
                count, k
            )));
        }
        warn!(
            candidates,
            message_bits = k,
            "sampled enumeration: histogram covers a prefix of the message space"
        );
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.n_threads)
        .build()?;

    let lane_width = config.lane_width;
    let start = Instant::now();

    let counts = pool.install(|| {
        (0..candidates)
            .into_par_iter()
            .fold(
                || (vec![0u64; n + 1], masks.index_message(0)),
                |(mut hist, mut message), i| {
                    message[0] = i;
                    hist[codeword_weight(masks, &message, lane_width)] += 1;
                    (hist, message)
                },
            )
            .map(|(hist, _)| hist)
            .reduce(
                || vec![0u64; n + 1],
                |mut acc, hist| {
                    acc.iter_mut().zip(&hist).for_each(|(a, &h)| *a += h);
                    acc
                },
            )
    });

    let elapsed = start.elapsed();
    info!(
        candidates,
        message_bits = k,
        code_length = n,
        lane_width,
        architecture = ?config.architecture,
        threads = config.n_threads,
        exhaustive = config.mode.is_exhaustive(),
        elapsed_ms = elapsed.as_millis() as u64,
        "weight enumeration finished"
    );

    Ok(WeightHistogram {
        counts,
        mode: config.mode,
        elapsed,
    })
}
