//! Array-backed singly linked list holding the non-default cells of one row.

use tracing::trace;

use super::entry::{link_to, Entry, Transition};

/// Sparse row: a linked list threaded through a growable slot buffer.
///
/// Slot 0 is the list head and holds a live entry whenever the row is
/// non-empty. Free slots are `None` and are reused before the buffer grows.
/// The buffer never shrinks; the owning block drops the row once it empties.
#[derive(Debug, Clone)]
pub(crate) struct SparseRow<V> {
    /// Primary index this row covers (a matrix row, or a column when transposed)
    primary: usize,
    slots: Vec<Option<Entry<V>>>,
    /// Live entries
    len: usize,
    /// Slots reserved on the first insertion
    first_alloc: usize,
    /// Slots reserved each time the buffer fills up
    growth: usize,
}

/// Result of searching a row for a column.
enum Lookup {
    Found { slot: usize, prev: Option<usize> },
    Missing { tail: Option<usize> },
}

impl<V> SparseRow<V> {
    /// Create an empty row. No memory is reserved until the first insertion.
    pub(crate) fn new(primary: usize, first_alloc: usize, growth: usize) -> Self {
        Self {
            primary,
            slots: Vec::new(),
            len: 0,
            first_alloc: first_alloc.max(1),
            growth: growth.max(1),
        }
    }

    #[inline]
    pub(crate) fn primary(&self) -> usize {
        self.primary
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate live `(column, value)` pairs in list order.
    pub(crate) fn iter(&self) -> RowIter<'_, V> {
        RowIter {
            slots: &self.slots,
            cursor: if self.is_empty() { None } else { Some(0) },
        }
    }

    /// Look up the value stored for `column`.
    pub(crate) fn get(&self, column: usize) -> Option<&V> {
        self.iter().find(|(c, _)| *c == column).map(|(_, v)| v)
    }

    /// Heap bytes held by the slot buffer.
    pub(crate) fn memory_bytes(&self) -> usize {
        self.slots.capacity() * std::mem::size_of::<Option<Entry<V>>>()
    }

    fn locate(&self, column: usize) -> Lookup {
        let mut prev = None;
        let mut cursor = if self.is_empty() { None } else { Some(0) };
        while let Some(slot) = cursor {
            let Some(entry) = self.slots[slot].as_ref() else {
                break;
            };
            if entry.column == column {
                return Lookup::Found { slot, prev };
            }
            prev = Some(slot);
            cursor = entry.next_slot();
        }
        Lookup::Missing { tail: prev }
    }

    /// Remove the entry in `slot`, whose predecessor is `prev`.
    fn unlink(&mut self, slot: usize, prev: Option<usize>) {
        let Some(removed) = self.slots[slot].take() else {
            return;
        };
        self.len -= 1;
        match prev {
            // Head removal: pull the second entry forward so slot 0 stays the head.
            None => {
                if let Some(next) = removed.next_slot() {
                    self.slots[0] = self.slots[next].take();
                }
            }
            Some(prev) => {
                if let Some(entry) = self.slots[prev].as_mut() {
                    entry.next = removed.next;
                }
            }
        }
    }

    /// Pick the slot for a new entry, growing the buffer if none is free.
    fn claim_slot(&mut self) -> usize {
        if self.is_empty() {
            if self.slots.is_empty() {
                self.reserve_slot();
                self.slots.push(None);
            }
            return 0;
        }
        if self.len < self.slots.len() {
            if let Some(free) = self.slots[1..].iter().position(Option::is_none) {
                return free + 1;
            }
        }
        self.reserve_slot();
        self.slots.push(None);
        self.slots.len() - 1
    }

    fn reserve_slot(&mut self) {
        if self.slots.len() < self.slots.capacity() {
            return;
        }
        let additional = if self.slots.capacity() == 0 {
            self.first_alloc
        } else {
            self.growth
        };
        self.slots.reserve_exact(additional);
        trace!(
            primary = self.primary,
            capacity = self.slots.capacity(),
            "sparse row grew"
        );
    }
}

impl<V: PartialEq> SparseRow<V> {
    /// Write `value` at `column`, keeping only non-default values in the list.
    pub(crate) fn set(&mut self, column: usize, value: V, default: &V) -> Transition {
        match self.locate(column) {
            Lookup::Found { slot, prev } => {
                if value == *default {
                    self.unlink(slot, prev);
                    Transition::Cleared
                } else {
                    if let Some(entry) = self.slots[slot].as_mut() {
                        entry.value = value;
                    }
                    Transition::Unchanged
                }
            }
            Lookup::Missing { tail } => {
                if value == *default {
                    return Transition::Unchanged;
                }
                let slot = self.claim_slot();
                self.slots[slot] = Some(Entry::new(column, value));
                if let Some(tail) = tail {
                    if let Some(entry) = self.slots[tail].as_mut() {
                        entry.next = link_to(slot);
                    }
                }
                self.len += 1;
                Transition::Filled
            }
        }
    }
}

/// Iterator over the live entries of a SparseRow.
pub(crate) struct RowIter<'a, V> {
    slots: &'a [Option<Entry<V>>],
    cursor: Option<usize>,
}

impl<'a, V> Iterator for RowIter<'a, V> {
    type Item = (usize, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.cursor?;
        let entry = self.slots.get(slot)?.as_ref()?;
        self.cursor = entry.next_slot();
        Some((entry.column, &entry.value))
    }
}
