//! Self-adjusting binary search tree with the additional property that recently accessed elements
//! are quick to access again.
//!
//! Every lookup and insertion rotates the touched node to the root through zig, zig-zig and
//! zig-zag steps. Removal splays the doomed node to the root, drops it, splays the maximum of the
//! left half to that half's root and hangs the right half off it.

mod map;
mod set;
mod tree;

pub use self::map::{SplayMap, SplayMapIntoIter, SplayMapIter, SplayMapIterMut};
pub use self::set::{SplaySet, SplaySetIntoIter, SplaySetIter};
pub use self::tree::Splay;

#[cfg(test)]
pub(crate) use self::tree::splay;
