//! End-to-end tests: parity-check matrix to weight distribution

use codeweight::{
    check_orthogonality, derive_generator, derive_generator_systematic, enumerate,
    enumerate_masks, enumerate_weights, CodeError, ColumnMasks, EnumerationConfig,
    EnumerationMode, SparseBinaryMatrix,
};
use ndarray::{array, Array2};

const HAMMING_ALIST: &str = "7 3
3 4
2 2 2 3 1 1 1
4 4 4
1 2 0
1 3 0
2 3 0
1 2 3
1 0 0
2 0 0
3 0 0
1 2 4 5
1 3 4 6
2 3 4 7
";

fn config() -> EnumerationConfig {
    EnumerationConfig::default().with_threads(4)
}

#[test]
fn test_hamming_7_4_weight_enumerator() {
    let h = SparseBinaryMatrix::read(HAMMING_ALIST.as_bytes()).unwrap();
    let g = derive_generator(&h).unwrap();

    assert_eq!(g.dim(), (4, 7));
    assert!(check_orthogonality(&g, &h.to_dense()).is_ok());

    let hist = enumerate(&g, 16, &config()).unwrap();

    assert_eq!(hist.mode, EnumerationMode::Exhaustive);
    assert_eq!(hist.counts, vec![1, 0, 0, 7, 7, 0, 0, 1]);
    assert_eq!(hist.total(), 16);
    assert_eq!(hist.min_nonzero_weight(), Some(3));
}

#[test]
fn test_extended_hamming_8_4() {
    let h = array![
        [1, 1, 0, 1, 1, 0, 0, 0],
        [1, 0, 1, 1, 0, 1, 0, 0],
        [0, 1, 1, 1, 0, 0, 1, 0],
        [1, 1, 1, 1, 1, 1, 1, 1]
    ];
    let g = derive_generator(&h).unwrap();
    let hist = enumerate_weights(&g, &config()).unwrap();

    assert_eq!(hist.counts, vec![1, 0, 0, 0, 14, 0, 0, 0, 1]);
}

#[test]
fn test_zero_message_only() {
    let h = SparseBinaryMatrix::read(HAMMING_ALIST.as_bytes()).unwrap();
    let g = derive_generator(&h).unwrap();

    let hist = enumerate(&g, 1, &config()).unwrap();

    assert_eq!(hist.mode, EnumerationMode::Sampled(1));
    assert_eq!(hist.counts, vec![1, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn test_lane_width_does_not_change_histogram() {
    let h = SparseBinaryMatrix::read(HAMMING_ALIST.as_bytes()).unwrap();
    let g = derive_generator(&h).unwrap();

    let scalar = enumerate_weights(&g, &config().with_lane_width(1)).unwrap();
    for lanes in [2, 3, 4, 8, 16] {
        let batched = enumerate_weights(&g, &config().with_lane_width(lanes)).unwrap();
        assert_eq!(batched.counts, scalar.counts, "lane width {}", lanes);
    }
}

#[test]
fn test_thread_count_does_not_change_histogram() {
    let h = SparseBinaryMatrix::read(HAMMING_ALIST.as_bytes()).unwrap();
    let g = derive_generator(&h).unwrap();

    let single = enumerate_weights(&g, &config().with_threads(1)).unwrap();
    let many = enumerate_weights(&g, &config().with_threads(8)).unwrap();
    assert_eq!(single.counts, many.counts);
}

#[test]
fn test_systematic_generator_same_code() {
    // Hamming(7,4) with the check bits first
    let h = array![
        [1, 0, 0, 1, 1, 0, 1],
        [0, 1, 0, 1, 0, 1, 1],
        [0, 0, 1, 0, 1, 1, 1]
    ];

    let exact = derive_generator(&h).unwrap();
    let systematic = derive_generator_systematic(&h).unwrap();

    let a = enumerate_weights(&exact, &config()).unwrap();
    let b = enumerate_weights(&systematic, &config()).unwrap();
    assert_eq!(a.counts, b.counts);
    assert_eq!(a.counts, vec![1, 0, 0, 7, 7, 0, 0, 1]);
}

#[test]
fn test_rank_deficient_parity_check_is_reported() {
    // Third row is the sum of the first two
    let h = array![
        [1, 1, 0, 1, 1, 0, 0],
        [1, 0, 1, 1, 0, 1, 0],
        [0, 1, 1, 0, 1, 1, 0]
    ];

    let err = derive_generator(&h).unwrap_err();
    assert!(matches!(err, CodeError::RankDeficiency { rank: 2, required: 3 }));
}

#[test]
fn test_exhaustive_rejected_past_word_width() {
    let g = Array2::<i32>::eye(64);
    let err = enumerate_weights(&g, &config()).unwrap_err();
    assert!(matches!(err, CodeError::Dimension(_)));
}

#[test]
fn test_sampled_long_messages() {
    // [I_70 | 1]: codeword weight is popcount(m) plus its parity bit
    let k = 70;
    let mut g = Array2::<i32>::zeros((k, k + 1));
    for p in 0..k {
        g[[p, p]] = 1;
        g[[p, k]] = 1;
    }

    let masks = ColumnMasks::from_generator(&g).unwrap();
    assert_eq!(masks.words_per_mask(), 2);

    let samples = 1000u64;
    let cfg = config().with_mode(EnumerationMode::Sampled(samples));
    let hist = enumerate_masks(&masks, &cfg).unwrap();

    let mut expected = vec![0u64; k + 2];
    for i in 0..samples {
        let ones = i.count_ones() as usize;
        expected[ones + ones % 2] += 1;
    }

    assert_eq!(hist.counts, expected);
    assert_eq!(hist.total(), samples);
    assert_eq!(hist.mode, EnumerationMode::Sampled(samples));
}
