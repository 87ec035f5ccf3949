//! Conversion functions between matrix formats
//!
//! Dense GF(2) matrices are `ndarray::Array2<i32>` holding 0/1 values; the
//! compressed sparse form is a `sprs::CsMat<i32>` in CSC storage.

use std::borrow::Cow;

use ndarray::Array2;
use num_traits::{One, PrimInt};
use sprs::CsMat;

use crate::error::{CodeError, CodeResult};
use crate::matrix::SparseBinaryMatrix;

/// Dense 0/1 matrix over GF(2)
pub type BinMatrix = Array2<i32>;

impl SparseBinaryMatrix {
    /// Expands the matrix into a dense 0/1 grid of size `n_rows × n_cols`
    pub fn to_dense(&self) -> BinMatrix {
        self.to_dense_as::<i32>()
    }

    /// Dense expansion with a caller-chosen integer cell type
    pub fn to_dense_as<T: PrimInt>(&self) -> Array2<T> {
        let mut dense = Array2::from_elem((self.n_rows, self.n_cols), T::zero());

        for j in 0..self.n_cols {
            for &i in self.col(j) {
                dense[[i, j]] = T::one();
            }
        }

        dense
    }

    /// Builds the compressed sparse column form
    ///
    /// Index storage is reserved up front from the largest column weight so
    /// the fill never reallocates.
    pub fn to_csc(&self) -> CsMat<i32> {
        let reserve = self.n_cols * self.max_col_weight();
        let mut indptr = Vec::with_capacity(self.n_cols + 1);
        let mut indices = Vec::with_capacity(reserve);

        indptr.push(0);
        for j in 0..self.n_cols {
            indices.extend_from_slice(self.col(j));
            indptr.push(indices.len());
        }

        let data = vec![i32::one(); indices.len()];
        CsMat::new_csc((self.n_rows, self.n_cols), indptr, indices, data)
    }

    /// Collects the nonzero pattern of a dense matrix
    ///
    /// Any nonzero cell counts as a 1; values are not reduced mod 2 first.
    pub fn from_dense(dense: &BinMatrix) -> Self {
        let (n_rows, n_cols) = dense.dim();
        let mut matrix = Self::zeros(n_rows, n_cols);

        // Row-major traversal keeps both adjacency views sorted
        for ((i, j), &v) in dense.indexed_iter() {
            if v != 0 {
                matrix.rows[i].push(j);
                matrix.cols[j].push(i);
            }
        }

        matrix
    }

    /// Collects the pattern of stored entries with an odd value
    pub fn from_sprs(matrix: &CsMat<i32>) -> CodeResult<Self> {
        let (n_rows, n_cols) = matrix.shape();
        let entries = matrix
            .iter()
            .filter(|(&v, _)| v.rem_euclid(2) == 1)
            .map(|(_, (i, j))| (i, j))
            .collect::<Vec<_>>();

        Self::from_entries(n_rows, n_cols, entries)
    }
}

/// Anything that can be viewed as a dense 0/1 matrix
///
/// Generator derivation accepts dense and sparse inputs through this seam;
/// sparse inputs are densified, dense inputs are borrowed as-is.
pub trait AsBinaryMatrix {
    /// Dense 0/1 view of the matrix
    fn as_binary(&self) -> Cow<'_, BinMatrix>;
}

impl AsBinaryMatrix for BinMatrix {
    fn as_binary(&self) -> Cow<'_, BinMatrix> {
        Cow::Borrowed(self)
    }
}

impl AsBinaryMatrix for SparseBinaryMatrix {
    fn as_binary(&self) -> Cow<'_, BinMatrix> {
        Cow::Owned(self.to_dense())
    }
}

impl AsBinaryMatrix for CsMat<i32> {
    fn as_binary(&self) -> Cow<'_, BinMatrix> {
        let mut dense = Array2::zeros(self.shape());
        for (&v, (i, j)) in self.iter() {
            dense[[i, j]] = v.rem_euclid(2);
        }
        Cow::Owned(dense)
    }
}

/// Checks that every cell of a dense matrix is 0 or 1
pub fn ensure_binary(matrix: &BinMatrix) -> CodeResult<()> {
    match matrix.indexed_iter().find(|(_, &v)| v != 0 && v != 1) {
        None => Ok(()),
        Some(((i, j), v)) => Err(CodeError::Dimension(format!(
            "entry ({}, {}) is {}, expected 0 or 1",
            i, j, v
        ))),
    }
}
