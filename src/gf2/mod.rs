//! Linear algebra over GF(2)
//!
//! Dense binary matrices are `Array2<i32>` grids of 0/1 values. Keeping them
//! as machine integers lets row addition be written as a subtraction followed
//! by an absolute value, which equals XOR on {0, 1}.
//!
//! This module holds the shared matrix primitives; elimination and generator
//! derivation live in the submodules.

pub mod elimination;
pub mod generator;

use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};
use num_traits::Num;

use crate::error::{CodeError, CodeResult};
use crate::matrix::BinMatrix;

pub use elimination::{gauss_jordan, gauss_jordan_full_rank, Elimination};
pub use generator::{
    check_orthogonality, derive_generator, derive_generator_systematic, GeneratorMethod,
};

/// Swaps rows `a` and `b` in place
pub fn swap_rows<A>(matrix: &mut Array2<A>, a: usize, b: usize) {
    if a == b {
        return;
    }
    for col in 0..matrix.ncols() {
        matrix.swap([a, col], [b, col]);
    }
}

/// Swaps columns `a` and `b` in place
pub fn swap_columns<A>(matrix: &mut Array2<A>, a: usize, b: usize) {
    if a == b {
        return;
    }
    for row in 0..matrix.nrows() {
        matrix.swap([row, a], [row, b]);
    }
}

/// Removes one row, moving every later row up by one
pub fn remove_row<A: Clone>(matrix: &mut Array2<A>, row: usize) -> CodeResult<()> {
    let n_rows = matrix.nrows();
    if row >= n_rows {
        return Err(CodeError::Dimension(format!(
            "cannot remove row {} from a matrix with {} rows",
            row, n_rows
        )));
    }

    let kept: Vec<usize> = (0..n_rows).filter(|&r| r != row).collect();
    *matrix = matrix.select(ndarray::Axis(0), &kept);
    Ok(())
}

/// Pads or crops `src` to `n_rows × n_cols` keeping its top-right corner fixed
///
/// Growing adds zero columns on the left and zero rows at the bottom;
/// shrinking drops leftmost columns and bottom rows. `[A | B]` cropped to the
/// width of `B` yields `B`.
pub fn resize_top_right(src: ArrayView2<'_, i32>, n_rows: usize, n_cols: usize) -> BinMatrix {
    let mut out = Array2::zeros((n_rows, n_cols));
    let (src_rows, src_cols) = src.dim();
    let min_rows = n_rows.min(src_rows);
    let min_cols = n_cols.min(src_cols);

    if n_cols > src_cols {
        let offset = n_cols - src_cols;
        out.slice_mut(s![..min_rows, offset..offset + min_cols])
            .assign(&src.slice(s![..min_rows, ..min_cols]));
    } else {
        let offset = src_cols - n_cols;
        out.slice_mut(s![..min_rows, ..min_cols])
            .assign(&src.slice(s![..min_rows, offset..offset + min_cols]));
    }

    out
}

/// Flattened row-major index of the first maximum, 0 for an empty matrix
pub fn argmax<A: Copy + PartialOrd>(matrix: ArrayView2<'_, A>) -> usize {
    let mut iter = matrix.iter().enumerate();
    let Some((_, &first)) = iter.next() else {
        return 0;
    };

    let mut best = first;
    let mut best_idx = 0;
    for (idx, &v) in iter {
        if v > best {
            best = v;
            best_idx = idx;
        }
    }
    best_idx
}

/// Matrix product reduced mod 2
pub fn binary_product(x: &BinMatrix, y: &BinMatrix) -> CodeResult<BinMatrix> {
    if x.ncols() != y.nrows() {
        return Err(CodeError::Dimension(format!(
            "binary product of {}×{} and {}×{}",
            x.nrows(),
            x.ncols(),
            y.nrows(),
            y.ncols()
        )));
    }

    Ok(x.dot(y).mapv_into(|v| v.rem_euclid(2)))
}

/// Elementwise product of two equally shaped matrices
pub fn elementwise_product<A>(x: &Array2<A>, y: &Array2<A>) -> CodeResult<Array2<A>>
where
    A: Copy + Num,
{
    if x.dim() != y.dim() {
        return Err(CodeError::dimension_mismatch("elementwise product", x.dim(), y.dim()));
    }

    Ok(ndarray::Zip::from(x).and(y).map_collect(|&a, &b| a * b))
}

/// Repeats every element `n` times: `[a, b]` becomes `[a, a, b, b]` for `n = 2`
pub fn repeat<A: Clone>(values: ArrayView1<'_, A>, n: usize) -> Array1<A> {
    values
        .iter()
        .flat_map(|v| std::iter::repeat(v.clone()).take(n))
        .collect()
}

/// Returns true when every entry is 0
pub fn is_zero(matrix: &BinMatrix) -> bool {
    matrix.iter().all(|&v| v == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_swaps() {
        let mut m = array![[1, 2, 3], [4, 5, 6]];
        swap_rows(&mut m, 0, 1);
        assert_eq!(m, array![[4, 5, 6], [1, 2, 3]]);

        swap_columns(&mut m, 0, 2);
        assert_eq!(m, array![[6, 5, 4], [3, 2, 1]]);

        swap_columns(&mut m, 1, 1);
        assert_eq!(m, array![[6, 5, 4], [3, 2, 1]]);
    }

    #[test]
    fn test_remove_row() {
        let mut m = array![[1, 1], [2, 2], [3, 3]];
        remove_row(&mut m, 1).unwrap();
        assert_eq!(m, array![[1, 1], [3, 3]]);

        remove_row(&mut m, 1).unwrap();
        assert_eq!(m, array![[1, 1]]);

        assert!(remove_row(&mut m, 1).is_err());
    }

    #[test]
    fn test_resize_top_right_crop() {
        // [A | B] -> B
        let m = array![[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12]];
        assert_eq!(resize_top_right(m.view(), 2, 2), array![[3, 4], [7, 8]]);
    }

    #[test]
    fn test_resize_top_right_pad() {
        let m = array![[1, 2], [3, 4]];
        assert_eq!(
            resize_top_right(m.view(), 3, 4),
            array![[0, 0, 1, 2], [0, 0, 3, 4], [0, 0, 0, 0]]
        );
        assert_eq!(resize_top_right(m.view(), 2, 2), m);
    }

    #[test]
    fn test_argmax_first_occurrence() {
        let m = array![[0, 3, 1], [3, 2, 0]];
        assert_eq!(argmax(m.view()), 1);

        let zeros = Array2::<i32>::zeros((3, 1));
        assert_eq!(argmax(zeros.view()), 0);

        let column = array![[0], [0], [1], [1]];
        assert_eq!(argmax(column.view()), 2);
    }

    #[test]
    fn test_binary_product() {
        let x = array![[1, 1, 0], [0, 1, 1]];
        let y = array![[1, 0], [1, 1], [1, 0]];
        assert_eq!(binary_product(&x, &y).unwrap(), array![[0, 1], [0, 1]]);

        assert!(binary_product(&x, &x).is_err());
    }

    #[test]
    fn test_elementwise_product() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let y = array![[2.0, 0.5], [0.0, 1.0]];
        assert_eq!(
            elementwise_product(&x, &y).unwrap(),
            array![[2.0, 1.0], [0.0, 4.0]]
        );

        let z = array![[1.0, 2.0]];
        assert!(elementwise_product(&x, &z).is_err());
    }

    #[test]
    fn test_is_zero() {
        assert!(is_zero(&Array2::zeros((2, 3))));
        assert!(is_zero(&Array2::zeros((0, 3))));
        assert!(!is_zero(&array![[0, 0], [0, 1]]));
    }

    #[test]
    fn test_repeat() {
        let v = array![1, 2, 3, 4];
        assert_eq!(
            repeat(v.view(), 3),
            array![1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4]
        );
        assert_eq!(repeat(v.view(), 0).len(), 0);
    }
}
