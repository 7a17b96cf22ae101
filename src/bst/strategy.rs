use crate::arena::Handle;
use crate::bst::node::Node;
use crate::bst::tree::Tree;
use crate::entry::Entry;
use crate::error::Result;

/// Post-access behaviour plugged into `Tree`.
///
/// The tree performs every ordered descent itself and then hands the node it found, created or
/// selected for removal to the strategy. Strategies restructure the tree only through its
/// rotation primitives and link helpers, and must leave the ordering and parent links intact when
/// they return.
pub trait Strategy: Sized {
    /// Allocates a detached node holding `entry`.
    fn create_node<K, V, C>(tree: &mut Tree<K, V, C, Self>, entry: Entry<K, V>) -> Result<Handle> {
        let ret = tree.arena.allocate(Node::new(entry));
        match ret {
            Ok(handle) => tree.logger.trace(format_args!("created node {:?}", handle)),
            Err(ref error) => tree.logger.warn(format_args!("could not create node: {}", error)),
        }
        ret
    }

    /// Releases a detached node and returns its entry. Does nothing for `None`.
    fn destroy_node<K, V, C>(
        tree: &mut Tree<K, V, C, Self>,
        node: Option<Handle>,
    ) -> Option<Entry<K, V>> {
        let handle = node?;
        let node = tree
            .arena
            .free(handle)
            .expect("Expected node to be owned by the tree.");
        debug_assert!(node.is_detached());
        tree.logger.trace(format_args!("destroyed node {:?}", handle));
        Some(node.entry)
    }

    /// Called with the matched node after a lookup, or with the last node visited on a miss.
    fn on_search_complete<K, V, C>(tree: &mut Tree<K, V, C, Self>, node: Option<Handle>);

    /// Called with a node that was just linked into the tree.
    fn on_insert_complete<K, V, C>(tree: &mut Tree<K, V, C, Self>, node: Option<Handle>);

    /// Unlinks and destroys `node`, returning its entry. Does nothing for `None`.
    fn on_erase<K, V, C>(tree: &mut Tree<K, V, C, Self>, node: Option<Handle>) -> Option<Entry<K, V>>;
}

/// A plain binary search tree: accesses never restructure the tree.
///
/// Removal splices the in-order successor into the removed node's position, so every other node
/// keeps its handle.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unbalanced;

impl Strategy for Unbalanced {
    fn on_search_complete<K, V, C>(_: &mut Tree<K, V, C, Self>, _: Option<Handle>) {}

    fn on_insert_complete<K, V, C>(_: &mut Tree<K, V, C, Self>, _: Option<Handle>) {}

    fn on_erase<K, V, C>(tree: &mut Tree<K, V, C, Self>, node: Option<Handle>) -> Option<Entry<K, V>> {
        let node = node?;
        let left = tree.arena[node].left;
        let right = tree.arena[node].right;
        match (left, right) {
            (None, _) => tree.transplant(node, right),
            (Some(_), None) => tree.transplant(node, left),
            (Some(left), Some(right)) => {
                let successor = tree.subtree_min(right);
                if successor != right {
                    let successor_right = tree.arena[successor].right;
                    tree.transplant(successor, successor_right);
                    tree.arena[successor].right = Some(right);
                    tree.arena[right].parent = Some(successor);
                }
                tree.transplant(node, Some(successor));
                tree.arena[successor].left = Some(left);
                tree.arena[left].parent = Some(successor);
            },
        }

        let removed = &mut tree.arena[node];
        removed.left = None;
        removed.right = None;
        removed.parent = None;
        Self::destroy_node(tree, Some(node))
    }
}
