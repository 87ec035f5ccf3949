//! Tests for alist loading and saving

use std::path::PathBuf;

use codeweight::{CodeError, SparseBinaryMatrix};
use ndarray::Array2;
use proptest::prelude::*;

/// Unique scratch path inside the system temp directory
fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("codeweight-{}-{}.alist", name, std::process::id()))
}

/// Creates a banded test matrix: row i holds columns i, i+1, i+3 (mod n)
fn create_banded(n_rows: usize, n_cols: usize) -> SparseBinaryMatrix {
    let rows: Vec<Vec<usize>> = (0..n_rows)
        .map(|i| vec![i % n_cols, (i + 1) % n_cols, (i + 3) % n_cols])
        .collect();
    SparseBinaryMatrix::from_rows(n_rows, n_cols, &rows).unwrap()
}

#[test]
fn test_save_then_load() {
    let original = create_banded(12, 20);
    let path = scratch_path("banded");

    original.save(&path).unwrap();
    let loaded = SparseBinaryMatrix::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, original);
    assert_eq!(loaded.row_weights(), original.row_weights());
    assert_eq!(loaded.col_weights(), original.col_weights());
    assert_eq!(loaded.max_col_weight(), original.max_col_weight());
}

#[test]
fn test_load_missing_file() {
    let err = SparseBinaryMatrix::load(scratch_path("does-not-exist")).unwrap_err();
    assert!(matches!(err, CodeError::Io(_)));
}

#[test]
fn test_dense_conversion_marks_entries() {
    let m = create_banded(4, 6);
    let dense = m.to_dense();

    assert_eq!(dense.dim(), (4, 6));
    assert_eq!(dense.iter().filter(|&&v| v == 1).count(), m.nnz());
    for i in 0..4 {
        for j in 0..6 {
            assert_eq!(dense[[i, j]] == 1, m.contains(i, j));
        }
    }
}

fn binary_matrix() -> impl Strategy<Value = Array2<i32>> {
    (1usize..8, 1usize..12).prop_flat_map(|(m, n)| {
        proptest::collection::vec(0i32..2, m * n)
            .prop_map(move |cells| Array2::from_shape_vec((m, n), cells).unwrap())
    })
}

proptest! {
    #[test]
    fn prop_write_read_roundtrip(dense in binary_matrix()) {
        let original = SparseBinaryMatrix::from_dense(&dense);

        let mut buffer = Vec::new();
        original.write(&mut buffer).unwrap();
        let parsed = SparseBinaryMatrix::read(buffer.as_slice()).unwrap();

        prop_assert_eq!(&parsed, &original);
        prop_assert_eq!(parsed.to_dense(), dense);
    }

    #[test]
    fn prop_views_consistent(dense in binary_matrix()) {
        let m = SparseBinaryMatrix::from_dense(&dense);
        for i in 0..m.n_rows {
            for j in 0..m.n_cols {
                prop_assert_eq!(m.row(i).contains(&j), m.col(j).contains(&i));
            }
        }
    }
}
