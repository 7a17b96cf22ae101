use crate::arena::Handle;
use crate::bst::{Strategy, Tree};
use crate::entry::Entry;

/// Self-adjusting strategy: every node that is found or inserted is rotated up to the root.
#[derive(Clone, Copy, Debug, Default)]
pub struct Splay;

/// Rotates `node` up until it has no parent and makes it the root of `tree`.
///
/// Only the shape changes. No key is compared, and every handle keeps denoting the same entry.
pub(crate) fn splay<K, V, C>(tree: &mut Tree<K, V, C, Splay>, node: Handle) {
    let mut steps = 0;
    while let Some(parent) = tree.arena[node].parent {
        let node_is_left = tree.arena[parent].left == Some(node);
        match tree.arena[parent].parent {
            // zig
            None => {
                if node_is_left {
                    tree.rotate_right(parent);
                } else {
                    tree.rotate_left(parent);
                }
            },
            Some(grandparent) => {
                let parent_is_left = tree.arena[grandparent].left == Some(parent);
                match (parent_is_left, node_is_left) {
                    // zig-zig
                    (true, true) => {
                        tree.rotate_right(grandparent);
                        tree.rotate_right(parent);
                    },
                    (false, false) => {
                        tree.rotate_left(grandparent);
                        tree.rotate_left(parent);
                    },
                    // zig-zag
                    (true, false) => {
                        tree.rotate_left(parent);
                        tree.rotate_right(grandparent);
                    },
                    (false, true) => {
                        tree.rotate_right(parent);
                        tree.rotate_left(grandparent);
                    },
                }
            },
        }
        steps += 1;
    }
    tree.root = Some(node);
    tree.logger.trace(format_args!("splayed node {:?} to the root in {} steps", node, steps));
}

impl Strategy for Splay {
    fn on_search_complete<K, V, C>(tree: &mut Tree<K, V, C, Self>, node: Option<Handle>) {
        if let Some(node) = node {
            splay(tree, node);
        }
    }

    fn on_insert_complete<K, V, C>(tree: &mut Tree<K, V, C, Self>, node: Option<Handle>) {
        if let Some(node) = node {
            splay(tree, node);
        }
    }

    fn on_erase<K, V, C>(tree: &mut Tree<K, V, C, Self>, node: Option<Handle>) -> Option<Entry<K, V>> {
        let node = node?;
        splay(tree, node);

        let left = tree.arena[node].left.take();
        let right = tree.arena[node].right.take();
        if let Some(left) = left {
            tree.arena[left].parent = None;
        }
        if let Some(right) = right {
            tree.arena[right].parent = None;
        }
        let entry = Self::destroy_node(tree, Some(node));
        tree.root = None;

        match left {
            None => tree.root = right,
            Some(left) => {
                // The maximum of the left half has no right child once splayed, so the right half
                // can hang there without violating the order.
                let max = tree.subtree_max(left);
                splay(tree, max);
                tree.arena[max].right = right;
                if let Some(right) = right {
                    tree.arena[right].parent = Some(max);
                }
                tree.root = Some(max);
            },
        }
        tree.logger.debug(format_args!("erased node {:?}, new root {:?}", node, tree.root));
        entry
    }
}
