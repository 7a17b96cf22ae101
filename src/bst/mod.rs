//! Binary search tree framework shared by the tree variants.
//!
//! `Tree` owns the nodes and performs the ordered descents for lookups, insertions and removals.
//! What happens after a node is found, inserted or selected for removal is decided by a
//! `Strategy` chosen at compile time.

pub(crate) mod node;
mod strategy;
mod tree;

pub use self::strategy::{Strategy, Unbalanced};
pub use self::tree::{IntoIter, Iter, IterMut, Tree};
