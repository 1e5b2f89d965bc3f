//! Sparse cell record stored in a row's slot buffer.

use std::num::NonZeroUsize;

/// Forward link to another slot in the same row.
///
/// Slot 0 is always the list head, so a link never points at it and the
/// non-zero niche keeps `Option<Link>` the size of a `usize`. `None` ends the list.
pub(crate) type Link = Option<NonZeroUsize>;

/// One non-default cell of a sparse row.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Entry<V> {
    pub(crate) column: usize,
    pub(crate) value: V,
    pub(crate) next: Link,
}

impl<V> Entry<V> {
    /// Create a list tail entry.
    #[inline]
    pub(crate) fn new(column: usize, value: V) -> Self {
        Self {
            column,
            value,
            next: None,
        }
    }

    /// Slot index of the following entry, if any.
    #[inline]
    pub(crate) fn next_slot(&self) -> Option<usize> {
        self.next.map(NonZeroUsize::get)
    }
}

/// Link to `slot`; slot 0 cannot be a link target.
#[inline]
pub(crate) fn link_to(slot: usize) -> Link {
    NonZeroUsize::new(slot)
}

/// Whether the entry reports a transition between default and non-default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The cell kept its default/non-default status
    Unchanged,
    /// A default cell now holds a non-default value
    Filled,
    /// A non-default cell was reset to the default
    Cleared,
}

impl Transition {
    /// Change this transition applies to a non-default counter.
    #[inline]
    pub(crate) fn apply(self, count: usize) -> usize {
        match self {
            Self::Unchanged => count,
            Self::Filled => count + 1,
            Self::Cleared => count - 1,
        }
    }
}
