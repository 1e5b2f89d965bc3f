//! Density-driven promotion and demotion between sparse and dense storage.
//!
//! Promotion fires above `capacity >> promote_shift` non-default cells and
//! demotion below `capacity >> demote_shift`. The validated config keeps the
//! demotion threshold under the promotion threshold, so one write can never
//! bounce the matrix straight back.

use tracing::debug;

use super::{Matrix, Storage};
use crate::dense::DenseStore;

impl<V: Clone + PartialEq> Matrix<V> {
    /// Non-default count above which sparse storage is promoted.
    #[inline]
    pub(crate) fn promote_threshold(&self) -> usize {
        threshold(self.capacity, self.config.get_promote_shift())
    }

    /// Non-default count below which dense storage is demoted.
    #[inline]
    pub(crate) fn demote_threshold(&self) -> usize {
        threshold(self.capacity, self.config.get_demote_shift())
    }

    /// Rebuild the matrix as a dense array and drop the sparse block.
    pub(super) fn promote(&mut self) {
        let Storage::Sparse(block) = &self.storage else {
            return;
        };
        let mut dense = DenseStore::with_len(
            self.capacity,
            self.shape.1,
            self.default.clone(),
            self.is_symmetric(),
        );
        block.materialize_into(&mut dense);

        debug!(
            rows = self.shape.0,
            cols = self.shape.1,
            nnz = self.non_default,
            capacity = self.capacity,
            "promoted matrix to dense storage"
        );
        self.storage = Storage::Dense(dense);
    }

    /// Rebuild the matrix as a sparse block and drop the dense array.
    pub(super) fn demote(&mut self) {
        let Storage::Dense(dense) = &self.storage else {
            return;
        };
        let increments = self.config.demote_increments(self.block_axes());
        let mut block = self.empty_block(increments);
        for (row, col, value) in dense.iter() {
            if *value != self.default {
                block.set(row, col, value.clone());
            }
        }

        debug!(
            rows = self.shape.0,
            cols = self.shape.1,
            nnz = self.non_default,
            capacity = self.capacity,
            "demoted matrix to sparse storage"
        );
        self.storage = Storage::Sparse(block);
    }
}

/// `capacity >> shift`, zero once the shift exceeds the word size.
#[inline]
fn threshold(capacity: usize, shift: u32) -> usize {
    capacity.checked_shr(shift).unwrap_or(0)
}
