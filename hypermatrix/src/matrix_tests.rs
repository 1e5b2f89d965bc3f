//! Tests for Matrix

use std::collections::HashMap;

use super::config::StorageConfig;
use super::error::StorageError;
use super::matrix::{Matrix, Representation};

/// Small xorshift generator so write sequences are reproducible.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, bound: usize) -> usize {
        (self.next() % bound as u64) as usize
    }
}

/// Check every cell of `m` against a reference map.
fn assert_matches(m: &Matrix<i32>, expected: &HashMap<(usize, usize), i32>) {
    let (rows, cols) = m.shape();
    for r in 0..rows {
        for c in 0..cols {
            let want = expected.get(&(r, c)).copied().unwrap_or(*m.default_value());
            assert_eq!(*m.get(r, c), want, "cell ({}, {})", r, c);
        }
    }
    let non_default = expected.values().filter(|v| **v != *m.default_value()).count();
    assert_eq!(m.nnz(), non_default);
    assert_eq!(m.iter().count(), non_default);
}

// ========================================================================
// Construction
// ========================================================================

#[test]
fn test_new_starts_sparse() {
    let m = Matrix::new(40_000, 20_000, 0i32).unwrap();
    assert_eq!(m.shape(), (40_000, 20_000));
    assert_eq!(m.representation(), Representation::Sparse);
    assert_eq!(m.nnz(), 0);
    assert!(!m.is_symmetric());
}

#[test]
#[cfg(target_pointer_width = "64")]
fn test_huge_matrix_memory_stays_bounded() {
    const N: usize = 1 << 31;
    let mut m = Matrix::new(N, N, 0u8).unwrap();
    assert!(m.memory_bytes() < 1 << 20);

    m.set(0, 0, 1);
    m.set(N - 1, 12_345, 2);
    m.set(77_777, N - 1, 3);
    assert_eq!(*m.get(N - 1, 12_345), 2);
    assert_eq!(*m.get(77_777, N - 1), 3);
    assert_eq!(*m.get(12_345, N - 1), 0);
    assert_eq!(m.nnz(), 3);
    assert!(m.memory_bytes() < 1 << 20);

    m.set(N - 1, 12_345, 0);
    assert_eq!(m.nnz(), 2);
}

#[test]
fn test_symmetric_requires_square() {
    let config = StorageConfig::new().symmetric();
    let result = Matrix::with_config(3, 4, 0i32, &config);
    assert_eq!(
        result.unwrap_err(),
        StorageError::SymmetricShape { rows: 3, cols: 4 }
    );
}

#[test]
fn test_invalid_thresholds_rejected() {
    let config = StorageConfig::new().promote_shift(4).demote_shift(2);
    let result = Matrix::with_config(4, 4, 0i32, &config);
    assert!(matches!(result, Err(StorageError::InvalidThresholds { .. })));
}

#[test]
fn test_capacity_overflow_rejected() {
    let result = Matrix::new(usize::MAX, 2, 0u8);
    assert!(matches!(result, Err(StorageError::CapacityOverflow { .. })));
}

// ========================================================================
// Element access
// ========================================================================

#[test]
fn test_scenario_four_by_four() {
    let mut m = Matrix::new(4, 4, 0).unwrap();
    m.set(0, 0, 5);
    m.set(3, 3, 9);
    assert_eq!(*m.get(0, 0), 5);
    assert_eq!(*m.get(3, 3), 9);
    assert_eq!(*m.get(1, 2), 0);
}

#[test]
fn test_scenario_symmetric_three_by_three() {
    let config = StorageConfig::new().symmetric();
    let mut m = Matrix::with_config(3, 3, 0, &config).unwrap();
    m.set(2, 0, 7);
    assert_eq!(*m.get(0, 2), 7);
    assert_eq!(*m.get(2, 0), 7);
}

#[test]
fn test_default_read_for_unwritten_cells() {
    let m = Matrix::new(50, 30, -1i32).unwrap();
    for r in 0..50 {
        for c in 0..30 {
            assert_eq!(*m.get(r, c), -1);
        }
    }
}

#[test]
fn test_out_of_range_reads_default_and_ignores_writes() {
    let mut m = Matrix::new(4, 6, 0i32).unwrap();
    m.set(4, 0, 1);
    m.set(0, 6, 1);
    m.set(usize::MAX, usize::MAX, 1);
    assert_eq!(m.nnz(), 0);
    assert_eq!(*m.get(4, 0), 0);
    assert_eq!(*m.get(0, 6), 0);
    assert_eq!(*m.get(usize::MAX, 0), 0);
    assert!(m.iter().next().is_none());
}

#[test]
fn test_out_of_range_ignored_while_dense() {
    let mut m = Matrix::new(2, 2, 0i32).unwrap();
    m.set(0, 0, 1);
    m.set(0, 1, 1);
    assert!(m.is_dense());
    m.set(2, 2, 5);
    assert_eq!(*m.get(2, 2), 0);
    assert_eq!(m.nnz(), 2);
}

#[test]
fn test_read_after_write_random() {
    let mut rng = XorShift(0x9e37_79b9_7f4a_7c15);
    let mut m = Matrix::new(37, 53, 0i32).unwrap();
    let mut expected = HashMap::new();
    for _ in 0..3000 {
        let (r, c) = (rng.below(37), rng.below(53));
        // Roughly a third of writes reset the cell
        let v = if rng.below(3) == 0 { 0 } else { rng.below(1000) as i32 + 1 };
        m.set(r, c, v);
        assert_eq!(*m.get(r, c), v);
        expected.insert((r, c), v);
    }
    assert_matches(&m, &expected);
}

#[test]
fn test_writing_default_to_unset_cell_is_noop() {
    let mut m = Matrix::new(8, 8, 0i32).unwrap();
    m.set(3, 3, 0);
    assert_eq!(m.nnz(), 0);
    assert_eq!(m.representation(), Representation::Sparse);
}

// ========================================================================
// Representation transparency
// ========================================================================

#[test]
fn test_promotion_is_transparent() {
    let mut m = Matrix::new(16, 12, 0i32).unwrap();
    let mut expected = HashMap::new();
    let mut promoted_at = None;

    for i in 0..60 {
        // 7 is coprime with 192, so every step lands on a fresh cell
        let idx = (i * 7) % 192;
        let (r, c) = (idx / 12, idx % 12);
        m.set(r, c, i as i32 + 1);
        expected.insert((r, c), i as i32 + 1);
        if promoted_at.is_none() && m.is_dense() {
            promoted_at = Some(m.nnz());
        }
    }

    // 16 * 12 = 192 cells; promotion fires on the 49th non-default cell
    assert_eq!(promoted_at, Some(49));
    assert_matches(&m, &expected);
}

#[test]
fn test_tall_matrix_transposed_block() {
    let mut m = Matrix::new(500, 3, 0i32).unwrap();
    let mut expected = HashMap::new();
    for r in (0..500).step_by(7) {
        for c in 0..3 {
            m.set(r, c, (r * 3 + c) as i32 + 1);
            expected.insert((r, c), (r * 3 + c) as i32 + 1);
        }
    }
    assert_eq!(m.representation(), Representation::Sparse);
    assert_matches(&m, &expected);
}

#[test]
fn test_transpose_disabled_matches_enabled() {
    let config = StorageConfig::new().transpose(false);
    let mut plain = Matrix::with_config(200, 5, 0i32, &config).unwrap();
    let mut transposed = Matrix::new(200, 5, 0i32).unwrap();
    let mut rng = XorShift(42);
    for _ in 0..150 {
        let (r, c, v) = (rng.below(200), rng.below(5), rng.below(4) as i32);
        plain.set(r, c, v);
        transposed.set(r, c, v);
    }
    assert_eq!(plain.to_dense(), transposed.to_dense());
    assert_eq!(plain.nnz(), transposed.nnz());
}

#[test]
fn test_density_hysteresis() {
    // 8x8: promote above 16 non-default cells, demote below 4
    let mut m = Matrix::new(8, 8, 0i32).unwrap();
    let mut expected = HashMap::new();

    for i in 0..20 {
        m.set(i / 8, i % 8, i as i32 + 1);
        expected.insert((i / 8, i % 8), i as i32 + 1);
    }
    assert!(m.is_dense());
    assert_matches(&m, &expected);

    for i in 2..20 {
        m.set(i / 8, i % 8, 0);
        expected.insert((i / 8, i % 8), 0);
    }
    assert_eq!(m.representation(), Representation::Sparse);
    assert_matches(&m, &expected);

    for i in 30..50 {
        m.set(i / 8, i % 8, -(i as i32));
        expected.insert((i / 8, i % 8), -(i as i32));
    }
    assert!(m.is_dense());
    assert_matches(&m, &expected);
}

#[test]
fn test_single_cell_oscillation_does_not_thrash() {
    let mut m = Matrix::new(8, 8, 0i32).unwrap();
    for i in 0..17 {
        m.set(i / 8, i % 8, 1);
    }
    assert!(m.is_dense());
    for _ in 0..10 {
        m.set(7, 7, 1);
        assert!(m.is_dense());
        m.set(7, 7, 0);
        assert!(m.is_dense());
    }
    assert_eq!(m.nnz(), 17);
}

#[test]
fn test_overwrite_in_dense_keeps_count() {
    let mut m = Matrix::new(4, 4, 0i32).unwrap();
    for c in 0..4 {
        m.set(0, c, 1);
        m.set(1, c, 1);
    }
    assert!(m.is_dense());
    m.set(0, 0, 5);
    assert_eq!(m.nnz(), 8);
    assert_eq!(*m.get(0, 0), 5);
}

#[test]
fn test_non_zero_default_value() {
    let mut m = Matrix::new(6, 6, 7u8).unwrap();
    for r in 0..6 {
        m.set(r, r, 0);
    }
    assert_eq!(m.nnz(), 6);
    assert_eq!(*m.get(2, 2), 0);
    assert_eq!(*m.get(2, 3), 7);
    m.set(2, 2, 7);
    assert_eq!(m.nnz(), 5);
}

#[test]
fn test_string_values() {
    let mut m = Matrix::new(3, 3, String::new()).unwrap();
    m.set(1, 2, "x".to_string());
    assert_eq!(m.get(1, 2), "x");
    assert_eq!(m.get(2, 1), "");
    m.set(1, 2, String::new());
    assert_eq!(m.nnz(), 0);
}

// ========================================================================
// Symmetric matrices
// ========================================================================

#[test]
fn test_symmetric_canonicalization_all_pairs() {
    let config = StorageConfig::new().symmetric();
    let mut m = Matrix::with_config(12, 12, 0i32, &config).unwrap();
    for i in 0..12 {
        for j in 0..12 {
            let v = (i.max(j) * 100 + i.min(j)) as i32 + 1;
            m.set(i, j, v);
            assert_eq!(*m.get(j, i), v);
        }
    }
    // 12 * 13 / 2 distinct cells
    assert_eq!(m.nnz(), 78);
    assert!(m.is_dense());
}

#[test]
fn test_symmetric_lower_triangle_then_clone() {
    let config = StorageConfig::new().symmetric();
    let mut m = Matrix::with_config(100, 100, 0usize, &config).unwrap();
    for i in 0..100 {
        for j in 0..=i {
            m.set(i, j, i * 1000 + j);
        }
    }
    let copy = m.clone();
    for i in 0..100 {
        for j in 0..=i {
            assert_eq!(*copy.get(j, i), i * 1000 + j);
        }
    }
}

#[test]
fn test_symmetric_demotion() {
    let config = StorageConfig::new().symmetric();
    let mut m = Matrix::with_config(8, 8, 0i32, &config).unwrap();
    // 36 stored cells: promote above 9, demote below 2
    for i in 0..8 {
        for j in 0..=i {
            m.set(i, j, 1);
        }
    }
    assert!(m.is_dense());
    for i in 0..8 {
        for j in 0..=i {
            if (i, j) != (5, 2) {
                m.set(j, i, 0);
            }
        }
    }
    assert_eq!(m.representation(), Representation::Sparse);
    assert_eq!(m.nnz(), 1);
    assert_eq!(*m.get(2, 5), 1);
    assert_eq!(*m.get(5, 2), 1);
}

// ========================================================================
// Clone and snapshots
// ========================================================================

#[test]
fn test_clone_is_independent() {
    let mut m = Matrix::new(10, 10, 0i32).unwrap();
    m.set(1, 1, 1);
    let mut copy = m.clone();
    copy.set(1, 1, 2);
    copy.set(2, 2, 3);
    assert_eq!(*m.get(1, 1), 1);
    assert_eq!(*m.get(2, 2), 0);
    assert_eq!(m.nnz(), 1);
    assert_eq!(copy.nnz(), 2);
}

#[test]
fn test_iter_matches_to_dense() {
    let mut m = Matrix::new(5, 7, 0i32).unwrap();
    m.set(4, 6, 1);
    m.set(0, 3, 2);
    m.set(2, 2, 3);
    let dense = m.to_dense();
    for (r, c, v) in m.iter() {
        assert_eq!(dense[r * 7 + c], *v);
    }
    assert_eq!(dense.iter().filter(|v| **v != 0).count(), 3);
}
