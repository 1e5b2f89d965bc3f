//! SparseBlock - array of sparse rows indexed by the primary axis.

use tracing::trace;

use super::entry::Transition;
use super::row::SparseRow;
use crate::dense::DenseStore;

/// Which logical axis the block's rows follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Block rows are matrix rows
    RowMajor,
    /// Block rows are matrix columns (used when there are fewer columns than rows)
    Transposed,
}

impl Orientation {
    /// Pick the orientation whose primary axis is the smaller dimension.
    pub fn for_shape(rows: usize, cols: usize, allow_transpose: bool) -> Self {
        if allow_transpose && cols < rows {
            Self::Transposed
        } else {
            Self::RowMajor
        }
    }

    /// Map logical `(row, col)` to block `(primary, secondary)`. Self-inverse.
    #[inline]
    fn swap(self, a: usize, b: usize) -> (usize, usize) {
        match self {
            Self::RowMajor => (a, b),
            Self::Transposed => (b, a),
        }
    }
}

/// Sparse representation of a whole matrix.
///
/// Rows are created on their first non-default write and dropped once they
/// empty, so an untouched block holds only its reserved row table. The table
/// stays sorted by primary index. Symmetric blocks keep only the lower
/// triangle, so row `i` never stores a secondary index above `i`.
#[derive(Debug, Clone)]
pub struct SparseBlock<V> {
    /// Non-empty rows, sorted by primary index
    rows: Vec<SparseRow<V>>,
    shape: (usize, usize),
    orientation: Orientation,
    symmetric: bool,
    default: V,
    /// Rows reserved each time the table fills up
    table_increment: usize,
    /// Slots each row reserves when it fills up
    row_increment: usize,
}

impl<V> SparseBlock<V> {
    /// Create an empty block.
    ///
    /// # Arguments
    /// - `shape`: Logical matrix dimensions (rows, cols)
    /// - `default`: Value reported for every cell not stored
    /// - `orientation`: Primary axis; ignored for symmetric blocks
    /// - `symmetric`: Keep only the lower triangle
    /// - `table_increment`: Rows the table reserves up front and on each growth
    /// - `row_increment`: Slots each row reserves when it fills up
    pub fn new(
        shape: (usize, usize),
        default: V,
        orientation: Orientation,
        symmetric: bool,
        table_increment: usize,
        row_increment: usize,
    ) -> Self {
        let orientation = if symmetric {
            Orientation::RowMajor
        } else {
            orientation
        };
        let table_increment = table_increment.max(1);

        Self {
            rows: Vec::with_capacity(table_increment),
            shape,
            orientation,
            symmetric,
            default,
            table_increment,
            row_increment: row_increment.max(1),
        }
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub fn default_value(&self) -> &V {
        &self.default
    }

    /// Number of rows currently holding at least one cell.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Count stored (non-default) cells.
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(SparseRow::len).sum()
    }

    /// Heap bytes held by the row array and every row's slot buffer.
    pub fn memory_bytes(&self) -> usize {
        let rows_size = self.rows.capacity() * std::mem::size_of::<SparseRow<V>>();
        let slots_size: usize = self.rows.iter().map(SparseRow::memory_bytes).sum();
        rows_size + slots_size
    }

    /// Map logical coordinates to `(primary, secondary)`, or None if out of range.
    #[inline]
    fn locate(&self, row: usize, col: usize) -> Option<(usize, usize)> {
        if row >= self.shape.0 || col >= self.shape.1 {
            return None;
        }
        let (primary, secondary) = self.orientation.swap(row, col);
        if self.symmetric && secondary > primary {
            Some((secondary, primary))
        } else {
            Some((primary, secondary))
        }
    }

    /// Read the cell at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> &V {
        self.locate(row, col)
            .and_then(|(primary, secondary)| self.row(primary)?.get(secondary))
            .unwrap_or(&self.default)
    }

    fn row(&self, primary: usize) -> Option<&SparseRow<V>> {
        let index = self
            .rows
            .binary_search_by_key(&primary, SparseRow::primary)
            .ok()?;
        Some(&self.rows[index])
    }

    /// Empty row for `primary`; symmetric rows never need more than `primary + 1` slots.
    fn new_row(&self, primary: usize) -> SparseRow<V> {
        let first_alloc = if self.symmetric {
            (primary + 1).min(self.row_increment)
        } else {
            self.row_increment
        };
        SparseRow::new(primary, first_alloc, self.row_increment)
    }

    fn reserve_row(&mut self) {
        if self.rows.len() < self.rows.capacity() {
            return;
        }
        self.rows.reserve_exact(self.table_increment);
        trace!(
            rows = self.rows.len(),
            capacity = self.rows.capacity(),
            "sparse row table grew"
        );
    }

    /// Iterate stored cells as `(row, col, value)` in logical coordinates.
    ///
    /// Symmetric blocks yield each cell once, with `row >= col`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &V)> + '_ {
        let orientation = self.orientation;
        self.rows.iter().flat_map(move |row| {
            let primary = row.primary();
            row.iter().map(move |(secondary, value)| {
                let (r, c) = orientation.swap(primary, secondary);
                (r, c, value)
            })
        })
    }
}

impl<V: PartialEq> SparseBlock<V> {
    /// Write the cell at `(row, col)`, reporting any default/non-default change.
    pub fn set(&mut self, row: usize, col: usize, value: V) -> Transition {
        let Some((primary, secondary)) = self.locate(row, col) else {
            return Transition::Unchanged;
        };
        match self.rows.binary_search_by_key(&primary, SparseRow::primary) {
            Ok(index) => {
                let transition = self.rows[index].set(secondary, value, &self.default);
                if self.rows[index].is_empty() {
                    // Drop the row with its slot buffer once the last cell clears
                    self.rows.remove(index);
                }
                transition
            }
            Err(index) => {
                if value == self.default {
                    return Transition::Unchanged;
                }
                let mut row = self.new_row(primary);
                let transition = row.set(secondary, value, &self.default);
                self.reserve_row();
                self.rows.insert(index, row);
                transition
            }
        }
    }
}

impl<V: Clone> SparseBlock<V> {
    /// Copy every stored cell into `dense`, undoing the block orientation.
    pub fn materialize_into(&self, dense: &mut DenseStore<V>) {
        for (row, col, value) in self.iter() {
            dense.set(row, col, value.clone());
        }
    }
}
