use crate::arena::Handle;
use crate::entry::Entry;

/// A tree node. Child links own their subtrees; the parent link is a back-reference.
#[derive(Clone, Debug)]
pub struct Node<K, V> {
    pub entry: Entry<K, V>,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
    pub parent: Option<Handle>,
}

impl<K, V> Node<K, V> {
    pub fn new(entry: Entry<K, V>) -> Self {
        Node {
            entry,
            left: None,
            right: None,
            parent: None,
        }
    }

    pub fn is_detached(&self) -> bool {
        self.left.is_none() && self.right.is_none() && self.parent.is_none()
    }
}
