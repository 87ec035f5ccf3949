//! Property tests for elimination, generator derivation and enumeration

use codeweight::{
    binary_product, check_orthogonality, derive_generator, enumerate_weights, gauss_jordan,
    EnumerationConfig,
};
use ndarray::Array2;
use proptest::prelude::*;

fn binary_matrix(
    rows: std::ops::Range<usize>,
    cols: std::ops::Range<usize>,
) -> impl Strategy<Value = Array2<i32>> {
    (rows, cols).prop_flat_map(|(m, n)| {
        proptest::collection::vec(0i32..2, m * n)
            .prop_map(move |cells| Array2::from_shape_vec((m, n), cells).unwrap())
    })
}

/// `[A | I_M]` with its columns shuffled: always full row rank
fn full_rank_parity_check() -> impl Strategy<Value = Array2<i32>> {
    (1usize..6, 1usize..6).prop_flat_map(|(m, k)| {
        let n = m + k;
        (
            proptest::collection::vec(0i32..2, m * k),
            Just((0..n).collect::<Vec<_>>()).prop_shuffle(),
        )
            .prop_map(move |(a, order)| {
                let mut h = Array2::<i32>::zeros((m, n));
                for i in 0..m {
                    for j in 0..k {
                        h[[i, order[j]]] = a[i * k + j];
                    }
                    h[[i, order[k + i]]] = 1;
                }
                h
            })
    })
}

/// Histogram by encoding every message directly
fn brute_force_histogram(g: &Array2<i32>) -> Vec<u64> {
    let (k, n) = g.dim();
    let mut counts = vec![0u64; n + 1];
    for i in 0..(1u64 << k) {
        let weight = (0..n)
            .filter(|&j| (0..k).filter(|&p| (i >> p) & 1 == 1).map(|p| g[[p, j]]).sum::<i32>() % 2 == 1)
            .count();
        counts[weight] += 1;
    }
    counts
}

proptest! {
    #[test]
    fn prop_transform_reproduces_reduced_form(original in binary_matrix(1..8, 1..10)) {
        let mut reduced = original.clone();
        let elim = gauss_jordan(&mut reduced);

        prop_assert_eq!(binary_product(&elim.transform, &original).unwrap(), reduced.clone());
        prop_assert!(elim.rank <= original.nrows().min(original.ncols()));
        prop_assert_eq!(elim.pivot_columns.len(), elim.rank);

        for (t, &col) in elim.pivot_columns.iter().enumerate() {
            for i in 0..reduced.nrows() {
                prop_assert_eq!(reduced[[i, col]], if i == t { 1 } else { 0 });
            }
        }

        // The transform is a product of invertible row operations
        let mut p = elim.transform.clone();
        prop_assert_eq!(gauss_jordan(&mut p).rank, original.nrows());
    }

    #[test]
    fn prop_generator_is_orthogonal(h in full_rank_parity_check()) {
        let (m, n) = h.dim();
        let g = derive_generator(&h).unwrap();

        prop_assert_eq!(g.dim(), (n - m, n));
        prop_assert!(check_orthogonality(&g, &h).is_ok());

        let mut g_copy = g.clone();
        prop_assert_eq!(gauss_jordan(&mut g_copy).rank, n - m);
    }

    #[test]
    fn prop_histogram_matches_direct_encoding(
        g in binary_matrix(1..9, 1..20),
        lanes in 1usize..12,
        threads in 1usize..4,
    ) {
        let config = EnumerationConfig::default()
            .with_lane_width(lanes)
            .with_threads(threads);
        let hist = enumerate_weights(&g, &config).unwrap();

        prop_assert_eq!(hist.total(), 1u64 << g.nrows());
        prop_assert!(hist.counts[0] >= 1);
        prop_assert_eq!(hist.counts.len(), g.ncols() + 1);
        prop_assert_eq!(hist.counts, brute_force_histogram(&g));
    }
}
