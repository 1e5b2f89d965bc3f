//! Occupancy and memory statistics for Matrix.

use super::{Matrix, Storage};

impl<V> Matrix<V> {
    /// Count non-default cells.
    ///
    /// Symmetric matrices count each mirrored pair once.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.non_default
    }

    /// Number of cells the matrix stores: rows * cols, or the lower triangle
    /// when symmetric.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Calculate density as ratio of non-default to stored cells.
    /// Returns 1.0 for a fully dense matrix, 0.0 for an empty one.
    pub fn density(&self) -> f32 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.non_default as f32 / self.capacity as f32
    }

    /// Calculate total memory usage in bytes.
    ///
    /// Includes the Matrix itself and the heap buffers of whichever
    /// representation is active.
    pub fn memory_bytes(&self) -> usize {
        let storage_bytes = match &self.storage {
            Storage::Sparse(block) => block.memory_bytes(),
            Storage::Dense(dense) => dense.memory_bytes(),
        };
        std::mem::size_of::<Self>() + storage_bytes
    }
}
