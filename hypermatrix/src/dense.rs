//! DenseStore - flat array covering the full grid or its lower triangle.

use crate::error::{Result, StorageError};

/// Number of cells a dense store needs for `shape`.
///
/// Symmetric stores hold the lower triangle only. Returns None on overflow.
pub(crate) fn cell_capacity(shape: (usize, usize), symmetric: bool) -> Option<usize> {
    let (rows, cols) = shape;
    if symmetric {
        let n = rows;
        // n * (n + 1) / 2 without overflowing on the intermediate product
        if n % 2 == 0 {
            (n / 2).checked_mul(n.checked_add(1)?)
        } else {
            n.checked_mul(n.checked_add(1)? / 2)
        }
    } else {
        rows.checked_mul(cols)
    }
}

/// Row-major (or triangular) flat storage pre-filled with the default value.
#[derive(Debug, Clone)]
pub struct DenseStore<V> {
    data: Vec<V>,
    cols: usize,
    symmetric: bool,
}

impl<V> DenseStore<V> {
    /// Flat offset of `(row, col)`. Symmetric stores canonicalize to `row >= col`.
    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        if self.symmetric {
            let (r, c) = if col > row { (col, row) } else { (row, col) };
            r * (r + 1) / 2 + c
        } else {
            row * self.cols + col
        }
    }

    /// Total stored cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read the cell at `(row, col)`.
    ///
    /// # Panics
    /// Panics if the cell lies outside the store
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> &V {
        &self.data[self.offset(row, col)]
    }

    /// Write the cell at `(row, col)` and return the previous value.
    ///
    /// # Panics
    /// Panics if the cell lies outside the store
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: V) -> V {
        let offset = self.offset(row, col);
        std::mem::replace(&mut self.data[offset], value)
    }

    /// Heap bytes held by the flat array.
    pub fn memory_bytes(&self) -> usize {
        self.data.capacity() * std::mem::size_of::<V>()
    }

    /// Iterate every stored cell as `(row, col, value)` in storage order.
    pub fn iter(&self) -> DenseIter<'_, V> {
        DenseIter {
            data: &self.data,
            pos: 0,
            row: 0,
            col: 0,
            cols: self.cols,
            symmetric: self.symmetric,
        }
    }
}

impl<V: Clone> DenseStore<V> {
    /// Allocate a store for `shape` filled with `default`.
    ///
    /// # Errors
    /// Returns `CapacityOverflow` if the cell count does not fit in usize
    pub fn new(shape: (usize, usize), default: V, symmetric: bool) -> Result<Self> {
        let len = cell_capacity(shape, symmetric).ok_or(StorageError::CapacityOverflow {
            rows: shape.0,
            cols: shape.1,
        })?;
        Ok(Self::with_len(len, shape.1, default, symmetric))
    }

    /// Allocate `len` cells; `len` must come from `cell_capacity`.
    pub(crate) fn with_len(len: usize, cols: usize, default: V, symmetric: bool) -> Self {
        Self {
            data: vec![default; len],
            cols,
            symmetric,
        }
    }
}

/// Iterator over the cells of a DenseStore.
pub struct DenseIter<'a, V> {
    data: &'a [V],
    pos: usize,
    row: usize,
    col: usize,
    cols: usize,
    symmetric: bool,
}

impl<'a, V> Iterator for DenseIter<'a, V> {
    type Item = (usize, usize, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.data.get(self.pos)?;
        let item = (self.row, self.col, value);

        self.pos += 1;
        self.col += 1;
        let row_end = if self.symmetric { self.row + 1 } else { self.cols };
        if self.col == row_end {
            self.row += 1;
            self.col = 0;
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.data.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl<V> ExactSizeIterator for DenseIter<'_, V> {}
