//! Error types for hypermatrix

use thiserror::Error;

/// Result type alias using hypermatrix's StorageError
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors raised while constructing a matrix.
///
/// Element access never fails: out-of-range reads return the default value and
/// out-of-range writes are ignored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Symmetric storage requested for a non-square shape
    #[error("Symmetric matrix must be square, got {rows}x{cols}")]
    SymmetricShape {
        /// Requested row count
        rows: usize,
        /// Requested column count
        cols: usize,
    },

    /// Promotion and demotion thresholds leave no hysteresis gap
    #[error(
        "Demote shift {demote_shift} must be greater than promote shift {promote_shift}"
    )]
    InvalidThresholds {
        /// Shift used for the promotion threshold
        promote_shift: u32,
        /// Shift used for the demotion threshold
        demote_shift: u32,
    },

    /// Cell count does not fit in usize
    #[error("Matrix shape {rows}x{cols} overflows the addressable cell count")]
    CapacityOverflow {
        /// Requested row count
        rows: usize,
        /// Requested column count
        cols: usize,
    },

    /// Dense input does not match the requested shape
    #[error("Data length {got} doesn't match expected {expected}")]
    DataLength {
        /// Cell count implied by the shape
        expected: usize,
        /// Length of the provided slice
        got: usize,
    },
}
