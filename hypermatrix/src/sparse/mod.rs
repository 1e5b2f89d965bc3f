//! Sparse representation: cell entries, linked rows and the block that indexes them

mod block;
mod entry;
mod row;

pub use block::{Orientation, SparseBlock};
pub use entry::Transition;
