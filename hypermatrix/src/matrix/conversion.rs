//! Conversions between Matrix and flat row-major buffers.

use super::Matrix;
use crate::config::StorageConfig;
use crate::error::{Result, StorageError};

impl<V: Clone + PartialEq> Matrix<V> {
    /// Create a Matrix from dense row-major data.
    ///
    /// Only non-default values are written, so the matrix settles in whichever
    /// representation its density calls for. Symmetric configs read the lower
    /// triangle (`col <= row`) and ignore the rest.
    ///
    /// # Arguments
    /// - `data`: Dense row-major data (length must be rows * cols)
    /// - `shape`: Matrix dimensions (rows, cols)
    /// - `default`: Value treated as empty
    /// - `config`: Storage configuration
    ///
    /// # Errors
    /// - `DataLength` if `data.len() != rows * cols`
    /// - Any error from `Matrix::with_config`
    pub fn from_dense(
        data: &[V],
        shape: (usize, usize),
        default: V,
        config: &StorageConfig,
    ) -> Result<Self> {
        let (rows, cols) = shape;
        let mut matrix = Self::with_config(rows, cols, default, config)?;
        let expected = rows
            .checked_mul(cols)
            .ok_or(StorageError::CapacityOverflow { rows, cols })?;
        if data.len() != expected {
            return Err(StorageError::DataLength {
                expected,
                got: data.len(),
            });
        }

        let symmetric = matrix.is_symmetric();
        for (row, chunk) in data.chunks(cols.max(1)).enumerate() {
            let chunk = if symmetric { &chunk[..=row] } else { chunk };
            for (col, value) in chunk.iter().enumerate() {
                if *value != matrix.default {
                    matrix.set(row, col, value.clone());
                }
            }
        }
        Ok(matrix)
    }

    /// Snapshot the matrix as dense row-major data of length rows * cols.
    ///
    /// Symmetric matrices are mirrored into both triangles.
    pub fn to_dense(&self) -> Vec<V> {
        let (rows, cols) = self.shape;
        let mut out = vec![self.default.clone(); rows * cols];
        for (row, col, value) in self.iter() {
            out[row * cols + col] = value.clone();
            if self.is_symmetric() && row != col {
                out[col * cols + row] = value.clone();
            }
        }
        out
    }
}
