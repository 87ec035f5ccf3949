//! Binary Gauss-Jordan elimination
//!
//! Reduces a 0/1 matrix to row-reduced echelon form while recording every row
//! operation in a square transform `P`, so that `P · X_original ≡ X_reduced
//! (mod 2)`. Pivot selection is sequential: each column's pivot depends on
//! the rows confirmed by the columns before it.

use ndarray::{s, Array1, Array2, ArrayViewMut1};
use tracing::debug;

use super::{argmax, swap_rows};
use crate::error::{CodeError, CodeResult};
use crate::matrix::BinMatrix;

/// Outcome of one elimination run
#[derive(Debug, Clone)]
pub struct Elimination {
    /// Row-operation transform, `n_rows × n_rows`
    pub transform: BinMatrix,

    /// Number of pivots found
    pub rank: usize,

    /// Column of each pivot, in pivot-row order
    pub pivot_columns: Vec<usize>,

    /// Row count of the reduced matrix
    pub n_rows: usize,
}

impl Elimination {
    /// Returns true when every row received a pivot
    pub fn is_full_row_rank(&self) -> bool {
        self.rank == self.n_rows
    }

    /// Converts a rank-deficient outcome into an error
    pub fn require_full_row_rank(self) -> CodeResult<Self> {
        if self.is_full_row_rank() {
            Ok(self)
        } else {
            Err(CodeError::RankDeficiency {
                rank: self.rank,
                required: self.n_rows,
            })
        }
    }
}

/// Reduces `x` in place to row-reduced echelon form over GF(2)
///
/// Columns are scanned left to right. For each column the first row at or
/// below the next pivot position holding a 1 becomes the pivot; it is swapped
/// into place and added to every other row with a 1 in that column. The scan
/// stops once every row has a pivot.
///
/// A result with `rank < n_rows` is rank deficient; use
/// [`gauss_jordan_full_rank`] when that must be an error.
pub fn gauss_jordan(x: &mut BinMatrix) -> Elimination {
    let (n_rows, n_cols) = x.dim();
    let mut transform = Array2::eye(n_rows);
    let mut pivot_columns = Vec::with_capacity(n_rows.min(n_cols));
    let mut rank = 0;

    for j in 0..n_cols {
        if rank == n_rows {
            debug!(rank, column = j, "full row rank reached, stopping early");
            break;
        }

        let candidate = argmax(x.slice(s![rank.., j..j + 1])) + rank;
        if x[[candidate, j]] == 0 {
            continue;
        }

        swap_rows(x, candidate, rank);
        swap_rows(&mut transform, candidate, rank);

        let pivot_row = x.row(rank).to_owned();
        let pivot_transform = transform.row(rank).to_owned();

        for i in 0..n_rows {
            if i != rank && x[[i, j]] != 0 {
                add_row(x.row_mut(i), &pivot_row);
                add_row(transform.row_mut(i), &pivot_transform);
            }
        }

        pivot_columns.push(j);
        rank += 1;
    }

    debug!(n_rows, n_cols, rank, "binary elimination finished");

    Elimination {
        transform,
        rank,
        pivot_columns,
        n_rows,
    }
}

/// [`gauss_jordan`] that fails with a rank deficiency error when some row
/// receives no pivot
pub fn gauss_jordan_full_rank(x: &mut BinMatrix) -> CodeResult<Elimination> {
    gauss_jordan(x).require_full_row_rank()
}

/// `row += pivot` over GF(2), written as `|row - pivot|`
fn add_row(mut row: ArrayViewMut1<'_, i32>, pivot: &Array1<i32>) {
    row.zip_mut_with(pivot, |a, &b| *a = (*a - b).abs());
}
