//! # codeweight: generator matrices and weight distributions over GF(2)
//!
//! Given the parity-check matrix `H` of a binary linear code, this crate
//! derives a generator matrix `G` with `G · H^T ≡ 0 (mod 2)` and computes the
//! Hamming-weight distribution of the code by encoding candidate messages in
//! parallel.
//!
//! ## Components
//!
//! 1. **Sparse binary matrices** ([`SparseBinaryMatrix`]): row/column
//!    adjacency lists loaded from and saved to alist files, convertible to
//!    dense `ndarray` or compressed `sprs` matrices.
//!
//! 2. **GF(2) linear algebra** ([`gf2`]): binary Gauss-Jordan elimination
//!    with a recorded transform, an exact generator derivation and a
//!    systematic one checked for orthogonality.
//!
//! 3. **Weight enumeration** ([`enumerate`](mod@enumerate)): word-packed generator columns,
//!    lane-batched parity kernels and a rayon-parallel histogram.
//!
//! ## Usage
//!
//! ```
//! use codeweight::{derive_generator, enumerate_weights, EnumerationConfig};
//! use ndarray::array;
//!
//! // Hamming(7,4) parity-check matrix
//! let h = array![
//!     [1, 1, 0, 1, 1, 0, 0],
//!     [1, 0, 1, 1, 0, 1, 0],
//!     [0, 1, 1, 1, 0, 0, 1],
//! ];
//!
//! let g = derive_generator(&h).unwrap();
//! let hist = enumerate_weights(&g, &EnumerationConfig::default()).unwrap();
//!
//! assert_eq!(hist.counts, vec![1, 0, 0, 7, 7, 0, 0, 1]);
//! ```

pub mod constants;
pub mod enumerate;
pub mod error;
pub mod gf2;
pub mod matrix;

// Re-export primary components
pub use enumerate::{enumerate, enumerate_masks, enumerate_weights, ColumnMasks, WeightHistogram};
pub use error::{CodeError, CodeResult};
pub use gf2::{
    binary_product, check_orthogonality, derive_generator, derive_generator_systematic,
    gauss_jordan, gauss_jordan_full_rank, Elimination, GeneratorMethod,
};
pub use matrix::{
    detect_architecture, AsBinaryMatrix, Architecture, BinMatrix, EnumerationConfig,
    EnumerationMode, SparseBinaryMatrix,
};

/// Version information for the codeweight library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
