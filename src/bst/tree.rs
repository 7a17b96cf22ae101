use crate::arena::{Handle, TypedArena};
use crate::bst::node::Node;
use crate::bst::strategy::Strategy;
use crate::compare::Comparator;
use crate::config::Config;
use crate::entry::Entry;
use crate::error::Result;
use crate::logger::Logger;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::iter::Flatten;
use std::marker::PhantomData;
use std::mem;
use std::vec;

/// An arena-backed binary search tree whose post-access behaviour is chosen by `S`.
///
/// Nodes never move in memory once allocated: restructuring only rewrites the `left`, `right` and
/// `parent` handles, so a `Handle` obtained from a lookup keeps denoting the same entry until that
/// entry is removed.
pub struct Tree<K, V, C, S> {
    pub(crate) arena: TypedArena<Node<K, V>>,
    pub(crate) root: Option<Handle>,
    pub(crate) len: usize,
    pub(crate) comparator: C,
    pub(crate) logger: Logger,
    strategy: PhantomData<S>,
}

impl<K, V, C, S> Tree<K, V, C, S> {
    pub fn new(comparator: C, config: Config) -> Self {
        let arena = match config.node_limit {
            Some(limit) => TypedArena::with_capacity_limit(config.chunk_size, limit),
            None => TypedArena::new(config.chunk_size),
        };
        Tree {
            arena,
            root: None,
            len: 0,
            comparator,
            logger: config.logger,
            strategy: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Returns the handle of the root node.
    pub fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Returns the entry stored at `handle`, or `None` if the handle is not live.
    pub fn entry(&self, handle: Handle) -> Option<&Entry<K, V>> {
        self.arena.get(handle).map(|node| &node.entry)
    }

    pub fn parent(&self, handle: Handle) -> Option<Handle> {
        self.arena.get(handle).and_then(|node| node.parent)
    }

    pub fn left(&self, handle: Handle) -> Option<Handle> {
        self.arena.get(handle).and_then(|node| node.left)
    }

    pub fn right(&self, handle: Handle) -> Option<Handle> {
        self.arena.get(handle).and_then(|node| node.right)
    }

    /// Points `parent`'s link to `old` at `new` instead. A missing parent means `old` was the
    /// root.
    pub(crate) fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let parent = &mut self.arena[parent];
                if parent.left == Some(old) {
                    parent.left = new;
                } else {
                    parent.right = new;
                }
            },
        }
    }

    /// Moves the subtree rooted at `new` into the position held by `old`.
    pub(crate) fn transplant(&mut self, old: Handle, new: Option<Handle>) {
        let parent = self.arena[old].parent;
        self.replace_child(parent, old, new);
        if let Some(new) = new {
            self.arena[new].parent = parent;
        }
    }

    /// Rotates the right child of `node` into `node`'s position.
    ///
    /// # Panics
    ///
    /// Panics if `node` has no right child.
    pub fn rotate_left(&mut self, node: Handle) {
        let child = self.arena[node].right.expect("Expected right child node to be `Some`.");
        let parent = self.arena[node].parent;
        let inner = self.arena[child].left;

        self.arena[node].right = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(node);
        }
        self.arena[child].left = Some(node);
        self.arena[node].parent = Some(child);
        self.arena[child].parent = parent;
        self.replace_child(parent, node, Some(child));
    }

    /// Rotates the left child of `node` into `node`'s position.
    ///
    /// # Panics
    ///
    /// Panics if `node` has no left child.
    pub fn rotate_right(&mut self, node: Handle) {
        let child = self.arena[node].left.expect("Expected left child node to be `Some`.");
        let parent = self.arena[node].parent;
        let inner = self.arena[child].right;

        self.arena[node].left = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(node);
        }
        self.arena[child].right = Some(node);
        self.arena[node].parent = Some(child);
        self.arena[child].parent = parent;
        self.replace_child(parent, node, Some(child));
    }

    pub(crate) fn subtree_min(&self, mut node: Handle) -> Handle {
        while let Some(left) = self.arena[node].left {
            node = left;
        }
        node
    }

    pub(crate) fn subtree_max(&self, mut node: Handle) -> Handle {
        while let Some(right) = self.arena[node].right {
            node = right;
        }
        node
    }

    /// Returns the entry with the minimum key. Does not restructure the tree.
    pub fn min(&self) -> Option<&Entry<K, V>> {
        self.root.map(|root| &self.arena[self.subtree_min(root)].entry)
    }

    /// Returns the entry with the maximum key. Does not restructure the tree.
    pub fn max(&self) -> Option<&Entry<K, V>> {
        self.root.map(|root| &self.arena[self.subtree_max(root)].entry)
    }

    pub(crate) fn handles_in_order(&self) -> Vec<Handle> {
        let mut ret = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut current = self.root;
        loop {
            while let Some(handle) = current {
                stack.push(handle);
                current = self.arena[handle].left;
            }
            match stack.pop() {
                Some(handle) => {
                    ret.push(handle);
                    current = self.arena[handle].right;
                },
                None => return ret,
            }
        }
    }

    /// Removes every entry, releasing all nodes at once.
    pub fn clear(&mut self) {
        self.logger.debug(format_args!("clearing tree of {} nodes", self.len));
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    /// Exchanges the contents of two trees, including their comparators and loggers. No node is
    /// touched.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    pub fn iter(&self) -> Iter<K, V> {
        Iter {
            arena: &self.arena,
            current: self.root,
            stack: Vec::new(),
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<K, V> {
        let rank: HashMap<Handle, usize> = self
            .handles_in_order()
            .into_iter()
            .enumerate()
            .map(|(index, handle)| (handle, index))
            .collect();
        let mut slots = Vec::with_capacity(rank.len());
        slots.resize_with(rank.len(), || None);
        for (handle, node) in self.arena.iter_mut() {
            if let Some(&index) = rank.get(&handle) {
                let entry = &mut node.entry;
                slots[index] = Some((&entry.key, &mut entry.value));
            }
        }
        IterMut {
            inner: slots.into_iter().flatten(),
        }
    }

    fn descend<Q>(&self, key: &Q) -> (Option<Handle>, Option<Handle>)
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut last = None;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = &self.arena[handle];
            last = Some(handle);
            current = match self.comparator.compare(key, node.entry.key.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return (Some(handle), last),
            };
        }
        (None, last)
    }

    /// Returns the handle of the node holding `key` without restructuring the tree.
    pub fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.descend(key).0
    }

    /// Returns the value associated with `key` without restructuring the tree.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.find(key).map(|handle| &self.arena[handle].entry.value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.find(key).is_some()
    }

    /// Returns the entry with the greatest key less than or equal to `key`.
    pub fn floor<Q>(&self, key: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut ret = None;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = &self.arena[handle];
            current = match self.comparator.compare(key, node.entry.key.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => {
                    ret = Some(&node.entry);
                    node.right
                },
                Ordering::Equal => return Some(&node.entry),
            };
        }
        ret
    }

    /// Returns the entry with the least key greater than or equal to `key`.
    pub fn ceil<Q>(&self, key: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut ret = None;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = &self.arena[handle];
            current = match self.comparator.compare(key, node.entry.key.borrow()) {
                Ordering::Greater => node.right,
                Ordering::Less => {
                    ret = Some(&node.entry);
                    node.left
                },
                Ordering::Equal => return Some(&node.entry),
            };
        }
        ret
    }
}

impl<K, V, C, S> Tree<K, V, C, S>
where
    S: Strategy,
{
    /// Looks up `key` and reports the access to the strategy. On a miss, the last node visited
    /// by the descent is reported instead.
    pub fn search<Q>(&mut self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let (found, last) = self.descend(key);
        S::on_search_complete(self, found.or(last));
        found
    }

    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let handle = self.search(key)?;
        Some(&self.arena[handle].entry.value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let handle = self.search(key)?;
        Some(&mut self.arena[handle].entry.value)
    }

    /// Inserts a key-value pair. If the key already exists, the stored entry is replaced and the
    /// old one is returned.
    ///
    /// # Errors
    ///
    /// Fails only if the node allocator refuses a new node; the tree is left unchanged.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<Entry<K, V>>>
    where
        C: Comparator<K>,
    {
        let mut parent = None;
        let mut ordering = Ordering::Equal;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = &self.arena[handle];
            ordering = self.comparator.compare(&key, &node.entry.key);
            current = match ordering {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => {
                    let old_entry = mem::replace(
                        &mut self.arena[handle].entry,
                        Entry::new(key, value),
                    );
                    S::on_search_complete(self, Some(handle));
                    return Ok(Some(old_entry));
                },
            };
            parent = Some(handle);
        }

        let node = S::create_node(self, Entry::new(key, value))?;
        self.arena[node].parent = parent;
        match parent {
            None => self.root = Some(node),
            Some(parent) => {
                if ordering == Ordering::Less {
                    self.arena[parent].left = Some(node);
                } else {
                    self.arena[parent].right = Some(node);
                }
            },
        }
        self.len += 1;
        S::on_insert_complete(self, Some(node));
        Ok(None)
    }

    /// Removes the entry with key `key`, if any. A miss leaves the tree untouched.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let target = self.find(key);
        let entry = S::on_erase(self, target)?;
        self.len -= 1;
        Some(entry)
    }

    /// Builds a tree by inserting every pair in order.
    pub fn from_iter_with<I>(iter: I, comparator: C, config: Config) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        C: Comparator<K>,
    {
        let mut tree = Tree::new(comparator, config);
        for (key, value) in iter {
            tree.try_insert(key, value)?;
        }
        Ok(tree)
    }
}

impl<K, V, C, S> Clone for Tree<K, V, C, S>
where
    K: Clone,
    V: Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        Tree {
            arena: self.arena.clone(),
            root: self.root,
            len: self.len,
            comparator: self.comparator.clone(),
            logger: self.logger.clone(),
            strategy: PhantomData,
        }
    }
}

impl<K, V, C, S> Default for Tree<K, V, C, S>
where
    C: Default,
{
    fn default() -> Self {
        Tree::new(C::default(), Config::default())
    }
}

impl<K, V, C, S> fmt::Debug for Tree<K, V, C, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C, S> IntoIterator for Tree<K, V, C, S> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            order: self.handles_in_order().into_iter(),
            arena: self.arena,
        }
    }
}

/// An owning iterator over the entries of a tree, in key order.
pub struct IntoIter<K, V> {
    arena: TypedArena<Node<K, V>>,
    order: vec::IntoIter<Handle>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(handle) = self.order.next() {
            if let Ok(node) = self.arena.free(handle) {
                return Some(node.entry.into_pair());
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

/// An iterator over the entries of a tree, in key order.
pub struct Iter<'a, K, V> {
    arena: &'a TypedArena<Node<K, V>>,
    current: Option<Handle>,
    stack: Vec<Handle>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        while let Some(handle) = self.current {
            self.stack.push(handle);
            self.current = arena[handle].left;
        }
        self.stack.pop().map(|handle| {
            let node = &arena[handle];
            self.current = node.right;
            self.remaining -= 1;
            (&node.entry.key, &node.entry.value)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// A mutable iterator over the entries of a tree, in key order.
pub struct IterMut<'a, K, V> {
    inner: Flatten<vec::IntoIter<Option<(&'a K, &'a mut V)>>>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

#[cfg(test)]
impl<K, V, C, S> Tree<K, V, C, S>
where
    C: Comparator<K>,
{
    /// Checks ordering, parent-link consistency and bookkeeping of the whole tree.
    pub(crate) fn assert_invariants(&self) {
        if let Some(root) = self.root {
            assert_eq!(self.arena[root].parent, None, "root must not have a parent");
        }

        let mut count = 0;
        let mut stack: Vec<Handle> = self.root.into_iter().collect();
        while let Some(handle) = stack.pop() {
            count += 1;
            let node = &self.arena[handle];
            for child in node.left.iter().chain(node.right.iter()) {
                assert_eq!(self.arena[*child].parent, Some(handle), "broken parent link");
                stack.push(*child);
            }
        }
        assert_eq!(count, self.len);
        assert_eq!(self.arena.len(), self.len);

        let order = self.handles_in_order();
        for pair in order.windows(2) {
            let lhs = &self.arena[pair[0]].entry.key;
            let rhs = &self.arena[pair[1]].entry.key;
            assert_eq!(self.comparator.compare(lhs, rhs), Ordering::Less, "keys out of order");
        }
    }
}

#[cfg(test)]
impl<K, V, C, S> Tree<K, V, C, S> {
    /// Reinterprets the same nodes under another strategy, so tests can build exact shapes with
    /// `Unbalanced` and then restructure them.
    pub(crate) fn with_strategy<T>(self) -> Tree<K, V, C, T> {
        Tree {
            arena: self.arena,
            root: self.root,
            len: self.len,
            comparator: self.comparator,
            logger: self.logger,
            strategy: PhantomData,
        }
    }

    /// Every link of every node, in key order.
    pub(crate) fn shape(&self) -> Vec<(Handle, Option<Handle>, Option<Handle>, Option<Handle>)> {
        self.handles_in_order()
            .into_iter()
            .map(|handle| {
                let node = &self.arena[handle];
                (handle, node.parent, node.left, node.right)
            })
            .collect()
    }
}
