//! Ordered collections built on a self-adjusting splay tree.
//!
//! Nodes live in a generational arena and link to each other through handles, so restructuring
//! never moves or reallocates an entry. The tree framework in `bst` performs ordered descents and
//! delegates post-access behaviour to a compile-time `Strategy`; `splay_tree` supplies the
//! splaying strategy together with the `SplayMap` and `SplaySet` front-ends.

mod entry;
mod error;
pub mod arena;
pub mod bst;
pub mod compare;
pub mod config;
pub mod logger;
pub mod splay_tree;

pub use crate::entry::Entry;
pub use crate::error::{Error, Result};

#[cfg(test)]
mod proptests;
