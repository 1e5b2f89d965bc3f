//! Hypermatrix - adaptive sparse/dense matrix storage.
//!
//! A `Matrix` is conceptually filled with a single default value. Non-default
//! cells are kept in per-row linked lists while they are rare; once more than a
//! quarter of the cells are set the matrix promotes itself to a flat array, and
//! it demotes back to sparse rows when fewer than a sixteenth remain.
//!
//! # Storage
//! - `SparseBlock`: a sorted table of `SparseRow`s, one per primary index that
//!   holds a cell. The smaller of the two dimensions is used as the primary
//!   axis, so a 40000x20000 matrix never keeps more than 20000 rows.
//! - `DenseStore`: row-major array, or the lower triangle for symmetric matrices
//!
//! # Usage
//! ```
//! use hypermatrix::{Matrix, StorageConfig};
//!
//! let mut m = Matrix::new(40_000, 20_000, 0i32)?;
//! m.set(39_999, 7, 12);
//! assert_eq!(*m.get(39_999, 7), 12);
//! assert_eq!(*m.get(40_000, 7), 0); // out of range reads the default
//!
//! let config = StorageConfig::new().symmetric();
//! let mut s = Matrix::with_config(3, 3, 0i32, &config)?;
//! s.set(2, 0, 7);
//! assert_eq!(*s.get(0, 2), 7);
//! # Ok::<(), hypermatrix::StorageError>(())
//! ```

pub mod config;
pub mod dense;
pub mod error;
pub mod matrix;
pub mod sparse;

#[cfg(test)]
mod matrix_tests;

// Re-exports
pub use config::StorageConfig;
pub use dense::DenseStore;
pub use error::{Result, StorageError};
pub use matrix::{Matrix, Representation};
pub use sparse::{Orientation, SparseBlock, Transition};
