//! Configuration types for Matrix construction.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StorageError};

/// Default shift applied to the block dimensions to size sparse growth.
pub const DEFAULT_BLOCK_SHIFT: u32 = 4;
/// Default shift used when rebuilding sparse rows after a demotion.
pub const DEFAULT_DEMOTE_BLOCK_SHIFT: u32 = 2;
/// Upper bound on the row table and per-row allocation increments.
pub const DEFAULT_MAX_BLOCK_WIDTH: usize = 0x400;
/// Promote once more than `capacity >> 2` (25%) cells are non-default.
pub const DEFAULT_PROMOTE_SHIFT: u32 = 2;
/// Demote once fewer than `capacity >> 4` (6.25%) cells are non-default.
pub const DEFAULT_DEMOTE_SHIFT: u32 = 4;

/// Configuration for Matrix construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    symmetric: bool,
    transpose: bool,
    block_shift: u32,
    demote_block_shift: u32,
    max_block_width: usize,
    promote_shift: u32,
    demote_shift: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            symmetric: false,
            transpose: true,
            block_shift: DEFAULT_BLOCK_SHIFT,
            demote_block_shift: DEFAULT_DEMOTE_BLOCK_SHIFT,
            max_block_width: DEFAULT_MAX_BLOCK_WIDTH,
            promote_shift: DEFAULT_PROMOTE_SHIFT,
            demote_shift: DEFAULT_DEMOTE_SHIFT,
        }
    }
}

impl StorageConfig {
    /// Create a new StorageConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store only the lower triangle; requires a square shape.
    pub fn symmetric(mut self) -> Self {
        self.symmetric = true;
        self
    }

    /// Allow the sparse block to use the smaller dimension as its primary axis.
    pub fn transpose(mut self, enabled: bool) -> Self {
        self.transpose = enabled;
        self
    }

    /// Set the shift that derives the initial allocation increments.
    pub fn block_shift(mut self, shift: u32) -> Self {
        self.block_shift = shift;
        self
    }

    /// Set the shift that derives the allocation increments after demotion.
    pub fn demote_block_shift(mut self, shift: u32) -> Self {
        self.demote_block_shift = shift;
        self
    }

    /// Cap the row table and per-row allocation increments.
    pub fn max_block_width(mut self, width: usize) -> Self {
        self.max_block_width = width.max(1);
        self
    }

    /// Set the promotion threshold as `capacity >> shift`.
    pub fn promote_shift(mut self, shift: u32) -> Self {
        self.promote_shift = shift;
        self
    }

    /// Set the demotion threshold as `capacity >> shift`.
    pub fn demote_shift(mut self, shift: u32) -> Self {
        self.demote_shift = shift;
        self
    }

    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    pub fn should_transpose(&self) -> bool {
        self.transpose
    }

    pub fn get_block_shift(&self) -> u32 {
        self.block_shift
    }

    pub fn get_demote_block_shift(&self) -> u32 {
        self.demote_block_shift
    }

    pub fn get_max_block_width(&self) -> usize {
        self.max_block_width
    }

    pub fn get_promote_shift(&self) -> u32 {
        self.promote_shift
    }

    pub fn get_demote_shift(&self) -> u32 {
        self.demote_shift
    }

    /// Check that the thresholds leave a gap between promotion and demotion.
    pub fn validate(&self) -> Result<()> {
        if self.demote_shift <= self.promote_shift {
            return Err(StorageError::InvalidThresholds {
                promote_shift: self.promote_shift,
                demote_shift: self.demote_shift,
            });
        }
        Ok(())
    }

    /// `(row table, per-row)` allocation increments of a fresh block whose
    /// axes are `(primary, secondary)` long.
    pub(crate) fn initial_increments(&self, axes: (usize, usize)) -> (usize, usize) {
        self.increments(axes, self.block_shift)
    }

    /// Allocation increments of a block rebuilt by demotion.
    pub(crate) fn demote_increments(&self, axes: (usize, usize)) -> (usize, usize) {
        self.increments(axes, self.demote_block_shift)
    }

    fn increments(&self, (primary, secondary): (usize, usize), shift: u32) -> (usize, usize) {
        (
            shrink(primary, shift, self.max_block_width),
            shrink(secondary, shift, self.max_block_width),
        )
    }
}

/// `len >> shift`, floored at 1 and capped at `max`.
#[inline]
fn shrink(len: usize, shift: u32, max: usize) -> usize {
    len.checked_shr(shift).unwrap_or(0).clamp(1, max.max(1))
}
