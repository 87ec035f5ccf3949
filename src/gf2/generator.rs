//! Generator matrices from parity-check matrices
//!
//! Two derivations are provided:
//!
//! - [`derive_generator`]: exact, built from two binary eliminations. This is
//!   the primary path.
//! - [`derive_generator_systematic`]: produces `G = [P | I]` by inverting the
//!   leading square block of `H` over the reals and rounding back to GF(2).
//!   Rounding a real inverse is not a GF(2) inverse in general, so every
//!   result of this path is checked against `G · H^T ≡ 0` before it is
//!   returned.

use ndarray::Array2;
use tracing::{info, warn};

use super::{binary_product, gauss_jordan, is_zero, resize_top_right};
use crate::constants::FLOAT_PIVOT_EPSILON;
use crate::error::{CodeError, CodeResult};
use crate::matrix::{ensure_binary, AsBinaryMatrix, BinMatrix};

/// Strategy for turning a parity-check matrix into a generator matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorMethod {
    /// Double Gauss-Jordan elimination
    Elimination,
    /// Systematic form via a rounded real-valued inverse
    Systematic,
}

impl GeneratorMethod {
    /// Runs the selected derivation
    pub fn derive<H: AsBinaryMatrix + ?Sized>(&self, h: &H) -> CodeResult<BinMatrix> {
        match self {
            GeneratorMethod::Elimination => derive_generator(h),
            GeneratorMethod::Systematic => derive_generator_systematic(h),
        }
    }
}

/// Derives a generator matrix `G` with `G · H^T ≡ 0 (mod 2)`
///
/// `H` is `M × N` with `M < N` and full row rank; `G` is `K × N` with
/// `K = N - M`. The rows of `G` are the rows of the transform that
/// eliminates `H^T` which map onto its zero rows, so they are linearly
/// independent and span the null space of `H`.
///
/// # Errors
///
/// - [`CodeError::Dimension`] when `H` is not binary or `M >= N`
/// - [`CodeError::RankDeficiency`] when `H` does not have full row rank
pub fn derive_generator<H: AsBinaryMatrix + ?Sized>(h: &H) -> CodeResult<BinMatrix> {
    let binary = h.as_binary();
    let h: &BinMatrix = &binary;
    let (n_checks, n_code) = check_shape(h)?;

    let mut h_cols = h.t().to_owned();
    let q = gauss_jordan(&mut h_cols).transform.reversed_axes();

    let mut h_diag = h.to_owned();
    let rank = gauss_jordan(&mut h_diag).require_full_row_rank()?.rank;

    let n_bits = n_code - rank;
    let mut y = Array2::zeros((n_code, n_bits));
    for i in 0..n_bits {
        y[[n_code - n_bits + i, i]] = 1;
    }

    let g = binary_product(&q, &y)?.reversed_axes();

    info!(n_checks, n_code, n_bits, "derived generator by elimination");
    Ok(g)
}

/// Derives a systematic generator `G = [P | I_K]`
///
/// The leading `M × M` block of `H` is inverted over the reals, rescaled by
/// the negative reciprocal of its smallest coefficient and rounded mod 2.
/// That candidate inverse is only correct when the block survives the
/// rounding, so the finished `G` is checked for orthogonality with `H`.
///
/// # Errors
///
/// - [`CodeError::Dimension`] when `H` is not binary or `M >= N`
/// - [`CodeError::RankDeficiency`] when the leading block is singular over the reals
/// - [`CodeError::NotOrthogonal`] when the rounded inverse was not a GF(2) inverse
pub fn derive_generator_systematic<H: AsBinaryMatrix + ?Sized>(h: &H) -> CodeResult<BinMatrix> {
    let binary = h.as_binary();
    let h: &BinMatrix = &binary;
    let (n_checks, n_code) = check_shape(h)?;
    let n_bits = n_code - n_checks;

    warn!(
        n_checks,
        n_code, "systematic derivation rounds a real-valued inverse; verifying result"
    );

    // Rows of H^T for the first M code bits, and for the remaining K bits
    let h_p = resize_top_right(h.t(), n_checks, n_checks);
    let h_s = resize_top_right(h.view(), n_checks, n_bits).reversed_axes();

    let h_p_inv = rounded_inverse(&h_p)?;
    let parity = binary_product(&h_s, &h_p_inv)?;

    let mut g = resize_top_right(parity.t(), n_code, n_bits);
    for r in 0..n_bits {
        g[[r + n_checks, r]] = 1;
    }
    let g = g.reversed_axes();

    check_orthogonality(&g, h)?;

    info!(n_checks, n_code, n_bits, "derived systematic generator");
    Ok(g)
}

/// Verifies `G · H^T ≡ 0 (mod 2)`
pub fn check_orthogonality(g: &BinMatrix, h: &BinMatrix) -> CodeResult<()> {
    let product = binary_product(g, &h.t().to_owned())?;
    if is_zero(&product) {
        return Ok(());
    }

    let violations = product.iter().filter(|&&v| v != 0).count();
    Err(CodeError::NotOrthogonal { violations })
}

fn check_shape(h: &BinMatrix) -> CodeResult<(usize, usize)> {
    ensure_binary(h)?;

    let (n_checks, n_code) = h.dim();
    if n_checks >= n_code {
        return Err(CodeError::Dimension(format!(
            "parity-check matrix is {}×{}; it needs fewer rows than columns",
            n_checks, n_code
        )));
    }

    Ok((n_checks, n_code))
}

/// Candidate GF(2) inverse of a square 0/1 matrix from its real inverse
fn rounded_inverse(a: &BinMatrix) -> CodeResult<BinMatrix> {
    let inverse = real_inverse(a)?;

    let min = inverse.iter().copied().fold(f64::INFINITY, f64::min);
    let scale = if min.abs() > FLOAT_PIVOT_EPSILON {
        -1.0 / min
    } else {
        1.0
    };

    Ok(inverse.mapv(|x| ((x * scale).abs() + 0.5) as i64 as i32 % 2))
}

/// Gauss-Jordan inversion over f64 with partial pivoting
fn real_inverse(a: &BinMatrix) -> CodeResult<Array2<f64>> {
    let n = a.nrows();
    let mut work = a.mapv(f64::from);
    let mut inverse = Array2::<f64>::eye(n);

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| work[[i, col]].abs().total_cmp(&work[[j, col]].abs()))
            .unwrap_or(col);

        if work[[pivot, col]].abs() < FLOAT_PIVOT_EPSILON {
            return Err(CodeError::RankDeficiency {
                rank: col,
                required: n,
            });
        }

        super::swap_rows(&mut work, pivot, col);
        super::swap_rows(&mut inverse, pivot, col);

        let scale = work[[col, col]];
        work.row_mut(col).mapv_inplace(|v| v / scale);
        inverse.row_mut(col).mapv_inplace(|v| v / scale);

        let pivot_row = work.row(col).to_owned();
        let pivot_inv = inverse.row(col).to_owned();

        for i in 0..n {
            let factor = work[[i, col]];
            if i != col && factor != 0.0 {
                work.row_mut(i).scaled_add(-factor, &pivot_row);
                inverse.row_mut(i).scaled_add(-factor, &pivot_inv);
            }
        }
    }

    Ok(inverse)
}
