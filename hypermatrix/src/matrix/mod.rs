//! Matrix - adaptive container switching between sparse and dense storage.

use crate::config::StorageConfig;
use crate::dense::{cell_capacity, DenseStore};
use crate::error::{Result, StorageError};
use crate::sparse::{Orientation, SparseBlock};

mod conversion;
mod policy;
mod stats;

/// Active storage of a Matrix.
#[derive(Debug, Clone)]
enum Storage<V> {
    Sparse(SparseBlock<V>),
    Dense(DenseStore<V>),
}

/// Which representation a Matrix currently uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    Sparse,
    Dense,
}

/// Two-dimensional matrix conceptually pre-filled with a default value.
///
/// Starts with sparse rows and promotes itself to a flat dense array once more
/// than a quarter of the cells are non-default, demoting back when fewer than a
/// sixteenth remain. Reads and writes outside the shape are not errors: reads
/// return the default and writes are ignored.
///
/// # Example
/// ```
/// use hypermatrix::Matrix;
///
/// let mut m = Matrix::new(4, 4, 0).unwrap();
/// m.set(0, 0, 5);
/// m.set(3, 3, 9);
/// assert_eq!(*m.get(0, 0), 5);
/// assert_eq!(*m.get(1, 2), 0);
/// assert_eq!(*m.get(10, 10), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Matrix<V> {
    /// Logical dimensions (rows, cols)
    shape: (usize, usize),
    /// Stored cells: rows * cols, or the lower triangle when symmetric
    capacity: usize,
    /// Stored cells whose value differs from `default`
    non_default: usize,
    default: V,
    storage: Storage<V>,
    config: StorageConfig,
}

impl<V: Clone + PartialEq> Matrix<V> {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a matrix with the default StorageConfig.
    pub fn new(rows: usize, cols: usize, default: V) -> Result<Self> {
        Self::with_config(rows, cols, default, &StorageConfig::default())
    }

    /// Create a matrix from a StorageConfig.
    ///
    /// # Errors
    /// - `SymmetricShape` if the config is symmetric and `rows != cols`
    /// - `InvalidThresholds` if the config thresholds overlap
    /// - `CapacityOverflow` if the cell count does not fit in usize
    pub fn with_config(
        rows: usize,
        cols: usize,
        default: V,
        config: &StorageConfig,
    ) -> Result<Self> {
        config.validate()?;
        if config.is_symmetric() && rows != cols {
            return Err(StorageError::SymmetricShape { rows, cols });
        }
        let capacity = cell_capacity((rows, cols), config.is_symmetric())
            .ok_or(StorageError::CapacityOverflow { rows, cols })?;

        let shape = (rows, cols);
        let orientation = block_orientation(shape, config);
        let (table_increment, row_increment) =
            config.initial_increments(block_axes(shape, orientation));
        let block = SparseBlock::new(
            shape,
            default.clone(),
            orientation,
            config.is_symmetric(),
            table_increment,
            row_increment,
        );

        Ok(Self {
            shape,
            capacity,
            non_default: 0,
            default,
            storage: Storage::Sparse(block),
            config: config.clone(),
        })
    }

    // ========================================================================
    // Element access
    // ========================================================================

    /// Read the cell at `(row, col)`; out-of-range cells read as the default.
    pub fn get(&self, row: usize, col: usize) -> &V {
        let Some((row, col)) = self.canonical(row, col) else {
            return &self.default;
        };
        match &self.storage {
            Storage::Sparse(block) => block.get(row, col),
            Storage::Dense(dense) => dense.get(row, col),
        }
    }

    /// Write the cell at `(row, col)`; out-of-range writes are ignored.
    ///
    /// May migrate the whole matrix to the other representation when the
    /// non-default count crosses a threshold.
    pub fn set(&mut self, row: usize, col: usize, value: V) {
        let Some((row, col)) = self.canonical(row, col) else {
            return;
        };
        match &mut self.storage {
            Storage::Sparse(block) => {
                let transition = block.set(row, col, value);
                self.non_default = transition.apply(self.non_default);
                if self.non_default > self.promote_threshold() {
                    self.promote();
                }
            }
            Storage::Dense(dense) => {
                let filled = value != self.default;
                let was_filled = dense.set(row, col, value) != self.default;
                match (was_filled, filled) {
                    (false, true) => self.non_default += 1,
                    (true, false) => self.non_default -= 1,
                    _ => {}
                }
                if self.non_default < self.demote_threshold() {
                    self.demote();
                }
            }
        }
    }

    /// Iterate non-default cells as `(row, col, value)`.
    ///
    /// Symmetric matrices yield each stored cell once, with `row >= col`.
    /// Order depends on the active representation.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (usize, usize, &V)> + '_> {
        match &self.storage {
            Storage::Sparse(block) => Box::new(block.iter()),
            Storage::Dense(dense) => {
                let default = &self.default;
                Box::new(dense.iter().filter(move |(_, _, v)| *v != default))
            }
        }
    }
}

impl<V> Matrix<V> {
    /// Get matrix dimensions (rows, cols).
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    #[inline]
    pub fn default_value(&self) -> &V {
        &self.default
    }

    #[inline]
    pub fn is_symmetric(&self) -> bool {
        self.config.is_symmetric()
    }

    #[inline]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Representation currently backing the matrix.
    pub fn representation(&self) -> Representation {
        match self.storage {
            Storage::Sparse(_) => Representation::Sparse,
            Storage::Dense(_) => Representation::Dense,
        }
    }

    #[inline]
    pub fn is_dense(&self) -> bool {
        self.representation() == Representation::Dense
    }

    /// Bounds-check and fold symmetric coordinates into the lower triangle.
    #[inline]
    fn canonical(&self, row: usize, col: usize) -> Option<(usize, usize)> {
        if row >= self.shape.0 || col >= self.shape.1 {
            return None;
        }
        if self.is_symmetric() && col > row {
            Some((col, row))
        } else {
            Some((row, col))
        }
    }

    /// Lengths of the sparse block's (primary, secondary) axes.
    #[inline]
    fn block_axes(&self) -> (usize, usize) {
        block_axes(self.shape, block_orientation(self.shape, &self.config))
    }

    /// Fresh sparse block growing by `(table_increment, row_increment)`.
    fn empty_block(&self, increments: (usize, usize)) -> SparseBlock<V>
    where
        V: Clone,
    {
        SparseBlock::new(
            self.shape,
            self.default.clone(),
            block_orientation(self.shape, &self.config),
            self.is_symmetric(),
            increments.0,
            increments.1,
        )
    }
}

/// Primary axis the sparse block uses for `shape`.
fn block_orientation(shape: (usize, usize), config: &StorageConfig) -> Orientation {
    let allow_transpose = config.should_transpose() && !config.is_symmetric();
    Orientation::for_shape(shape.0, shape.1, allow_transpose)
}

#[inline]
fn block_axes(shape: (usize, usize), orientation: Orientation) -> (usize, usize) {
    match orientation {
        Orientation::RowMajor => shape,
        Orientation::Transposed => (shape.1, shape.0),
    }
}
