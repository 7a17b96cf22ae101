use crate::bst::{self, Tree};
use crate::compare::{Comparator, Natural};
use crate::config::Config;
use crate::error::Result;
use crate::splay_tree::tree::Splay;
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::ops::Index;

/// An iterator for `SplayMap<K, V, C>`, yielding entries in key order.
pub type SplayMapIter<'a, K, V> = bst::Iter<'a, K, V>;

/// A mutable iterator for `SplayMap<K, V, C>`, yielding entries in key order.
pub type SplayMapIterMut<'a, K, V> = bst::IterMut<'a, K, V>;

/// An owning iterator for `SplayMap<K, V, C>`, yielding entries in key order.
pub type SplayMapIntoIter<K, V> = bst::IntoIter<K, V>;

/// An ordered map implemented using a splay tree.
///
/// A splay tree is a self-adjusting binary search tree with the additional property that recently
/// accessed items are quick to access again. After each lookup or insertion, the item that was
/// touched is "splayed" to the root of the tree. No balance information is stored; operations run
/// in amortized logarithmic time.
///
/// Keys are ordered by a `Comparator`, which defaults to the keys' `Ord` implementation.
///
/// # Examples
///
/// ```
/// use splay_collections::splay_tree::SplayMap;
///
/// let mut map = SplayMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some(&0));
/// assert_eq!(map.ceil(&2), Some(&3));
///
/// assert_eq!(map.get(&0), Some(&1));
/// assert_eq!(map.root(), Some((&0, &1)));
///
/// assert_eq!(map.remove(&0), Some((0, 1)));
/// assert_eq!(map.remove(&1), None);
/// ```
pub struct SplayMap<K, V, C = Natural> {
    tree: Tree<K, V, C, Splay>,
}

impl<K, V> SplayMap<K, V> {
    /// Constructs a new, empty `SplayMap<K, V>` ordered by `K`'s `Ord` implementation.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let map: SplayMap<u32, u32> = SplayMap::new();
    /// ```
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K, V, C> SplayMap<K, V, C> {
    /// Constructs a new, empty `SplayMap<K, V, C>` ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_config(comparator, Config::default())
    }

    /// Constructs a new, empty `SplayMap<K, V, C>` with a specific allocator and logger
    /// configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::compare::Natural;
    /// use splay_collections::config::Config;
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let map: SplayMap<u32, u32> = SplayMap::with_config(Natural, Config::default().chunk_size(16));
    /// assert!(map.is_empty());
    /// ```
    pub fn with_config(comparator: C, config: Config) -> Self {
        SplayMap {
            tree: Tree::new(comparator, config),
        }
    }

    /// Constructs a map by inserting every pair of `iter` in order. The last inserted key ends up
    /// at the root.
    ///
    /// # Errors
    ///
    /// Fails if `config` sets a node limit that `iter` exceeds.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::compare::Natural;
    /// use splay_collections::config::Config;
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let map = SplayMap::from_iter_with(vec![(2, 'b'), (1, 'a')], Natural, Config::default())
    ///     .unwrap();
    /// assert_eq!(map.root(), Some((&1, &'a')));
    /// ```
    pub fn from_iter_with<I>(iter: I, comparator: C, config: Config) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        C: Comparator<K>,
    {
        Tree::from_iter_with(iter, comparator, config).map(|tree| SplayMap { tree })
    }

    /// Inserts a key-value pair into the map. If the key already exists in the map, it will
    /// return and replace the old key-value pair. The key ends up at the root.
    ///
    /// # Panics
    ///
    /// Panics if the map was configured with a node limit that is already reached. Use
    /// `try_insert` to handle that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.insert(1, 2), Some((1, 1)));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)>
    where
        C: Comparator<K>,
    {
        match self.try_insert(key, value) {
            Ok(ret) => ret,
            Err(error) => panic!("Error: {}.", error),
        }
    }

    /// Inserts a key-value pair into the map, returning the replaced pair if the key already
    /// existed.
    ///
    /// # Errors
    ///
    /// Fails if the configured node limit is reached; the map is left unchanged.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<(K, V)>>
    where
        C: Comparator<K>,
    {
        self.tree
            .try_insert(key, value)
            .map(|entry| entry.map(|entry| entry.into_pair()))
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None` and leave the tree untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.remove(key).map(|entry| entry.into_pair())
    }

    /// Checks if a key exists in the map, splaying the key (or the closest key visited) to the
    /// root.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.search(key).is_some()
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map. The key is splayed to the root; on a
    /// miss, the last key visited is splayed instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.get(key)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.get_mut(key)
    }

    /// Returns an immutable reference to the value associated with a particular key. Note that
    /// `peek` does not splay the tree in order to use a non-mutable reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// assert_eq!(map.peek(&1), Some(&1));
    /// assert_eq!(map.root(), Some((&2, &2)));
    /// ```
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.peek(key)
    }

    /// Returns the entry at the root of the tree, which is the most recently accessed entry.
    pub fn root(&self) -> Option<(&K, &V)> {
        self.tree
            .root()
            .and_then(|handle| self.tree.entry(handle))
            .map(|entry| (&entry.key, &entry.value))
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchanges the contents of two maps in constant time.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut a = SplayMap::new();
    /// a.insert(1, 1);
    /// let mut b = SplayMap::new();
    /// a.swap(&mut b);
    /// assert!(a.is_empty());
    /// assert_eq!(b.len(), 1);
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    /// Returns a key in the map that is less than or equal to a particular key. Returns `None` if
    /// such a key does not exist. Note that `floor` does not splay the tree in order to use a
    /// non-mutable reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.floor(&0), None);
    /// assert_eq!(map.floor(&2), Some(&1));
    /// ```
    pub fn floor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.floor(key).map(|entry| &entry.key)
    }

    /// Returns a key in the map that is greater than or equal to a particular key. Returns `None`
    /// if such a key does not exist. Note that `ceil` does not splay the tree in order to use a
    /// non-mutable reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.ceil(&0), Some(&1));
    /// assert_eq!(map.ceil(&2), None);
    /// ```
    pub fn ceil<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.ceil(key).map(|entry| &entry.key)
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty. Note that `min`
    /// does not splay the tree in order to use a non-mutable reference.
    pub fn min(&self) -> Option<&K> {
        self.tree.min().map(|entry| &entry.key)
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty. Note that `max`
    /// does not splay the tree in order to use a non-mutable reference.
    pub fn max(&self) -> Option<&K> {
        self.tree.max().map(|entry| &entry.key)
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> SplayMapIter<K, V> {
        self.tree.iter()
    }

    /// Returns a mutable iterator over the map. The iterator will yield key-value pairs using
    /// in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// for (key, value) in &mut map {
    ///     *value += 1;
    /// }
    ///
    /// let mut iterator = map.iter_mut();
    /// assert_eq!(iterator.next(), Some((&1, &mut 2)));
    /// assert_eq!(iterator.next(), Some((&2, &mut 3)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter_mut(&mut self) -> SplayMapIterMut<K, V> {
        self.tree.iter_mut()
    }
}

impl<K, V, C> IntoIterator for SplayMap<K, V, C> {
    type IntoIter = SplayMapIntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a SplayMap<K, V, C>
where
    K: 'a,
    V: 'a,
{
    type IntoIter = SplayMapIter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut SplayMap<K, V, C>
where
    K: 'a,
    V: 'a,
{
    type IntoIter = SplayMapIterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, C> FromIterator<(K, V)> for SplayMap<K, V, C>
where
    C: Comparator<K> + Default,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = SplayMap::with_comparator(C::default());
        map.extend(iter);
        map
    }
}

impl<K, V, C> Extend<(K, V)> for SplayMap<K, V, C>
where
    C: Comparator<K>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, C, const N: usize> From<[(K, V); N]> for SplayMap<K, V, C>
where
    C: Comparator<K> + Default,
{
    fn from(pairs: [(K, V); N]) -> Self {
        SplayMap::from_iter(pairs)
    }
}

impl<K, V, C> Clone for SplayMap<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        SplayMap {
            tree: self.tree.clone(),
        }
    }
}

impl<K, V, C> Default for SplayMap<K, V, C>
where
    C: Default,
{
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C> PartialEq for SplayMap<K, V, C>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V, C> Eq for SplayMap<K, V, C>
where
    K: Eq,
    V: Eq,
{
}

impl<K, V, C> fmt::Debug for SplayMap<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

impl<'a, K, V, C, Q> Index<&'a Q> for SplayMap<K, V, C>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<Q>,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        self.peek(key).expect("Error: key does not exist.")
    }
}

#[cfg(test)]
mod tests {
    use super::SplayMap;
    use crate::compare::{Natural, Reverse};
    use crate::config::Config;
    use crate::Error;

    #[test]
    fn test_len_empty() {
        let map: SplayMap<u32, u32> = SplayMap::new();
        assert_eq!(map.len(), 0);
        assert_eq!(map.root(), None);
    }

    #[test]
    fn test_min_max_empty() {
        let map: SplayMap<u32, u32> = SplayMap::new();
        assert_eq!(map.min(), None);
        assert_eq!(map.max(), None);
    }

    #[test]
    fn test_insert() {
        let mut map = SplayMap::new();
        assert_eq!(map.insert(1, 1), None);
        assert!(map.contains_key(&1));
        assert_eq!(map.get(&1), Some(&1));
    }

    #[test]
    fn test_insert_replace() {
        let mut map = SplayMap::new();
        assert_eq!(map.insert(1, 1), None);
        map.insert(2, 2);
        assert_eq!(map.insert(1, 3), Some((1, 1)));
        assert_eq!(map.root(), Some((&1, &3)));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_remove() {
        let mut map = SplayMap::new();
        map.insert(1, 1);
        assert_eq!(map.remove(&1), Some((1, 1)));
        assert!(!map.contains_key(&1));
        assert!(map.is_empty());
        assert_eq!(map.root(), None);
    }

    #[test]
    fn test_get_splays() {
        let mut map: SplayMap<u32, u32> = (1..10).map(|key| (key, key * 2)).collect();
        assert_eq!(map.root(), Some((&9, &18)));
        assert_eq!(map.get(&4), Some(&8));
        assert_eq!(map.root(), Some((&4, &8)));
        assert_eq!(map.get(&100), None);
        assert_eq!(map.root(), Some((&9, &18)));
    }

    #[test]
    fn test_peek_does_not_splay() {
        let mut map = SplayMap::new();
        map.insert(1, 1);
        map.insert(2, 2);
        assert_eq!(map.peek(&1), Some(&1));
        assert_eq!(map[&1], 1);
        assert_eq!(map.root(), Some((&2, &2)));
    }

    #[test]
    fn test_get_mut() {
        let mut map = SplayMap::new();
        map.insert(1, 1);
        {
            let value = map.get_mut(&1);
            *value.unwrap() = 3;
        }
        assert_eq!(map.get(&1), Some(&3));
    }

    #[test]
    fn test_borrowed_lookup() {
        let mut map = SplayMap::new();
        map.insert(String::from("b"), 2);
        map.insert(String::from("a"), 1);
        assert_eq!(map.get("b"), Some(&2));
        assert_eq!(map.remove("a"), Some((String::from("a"), 1)));
    }

    #[test]
    fn test_floor_ceil() {
        let mut map = SplayMap::new();
        map.insert(1, 1);
        map.insert(3, 3);
        map.insert(5, 5);

        assert_eq!(map.floor(&0), None);
        assert_eq!(map.floor(&2), Some(&1));
        assert_eq!(map.floor(&4), Some(&3));
        assert_eq!(map.floor(&6), Some(&5));

        assert_eq!(map.ceil(&0), Some(&1));
        assert_eq!(map.ceil(&2), Some(&3));
        assert_eq!(map.ceil(&4), Some(&5));
        assert_eq!(map.ceil(&6), None);
    }

    #[test]
    fn test_reverse_comparator() {
        let mut map = SplayMap::with_comparator(Reverse);
        map.insert(1, 1);
        map.insert(3, 3);
        map.insert(2, 2);
        assert_eq!(map.iter().map(|(k, _)| *k).collect::<Vec<u32>>(), vec![3, 2, 1]);
        assert_eq!(map.floor(&0), Some(&1));
    }

    #[test]
    fn test_from_literal_list() {
        let map: SplayMap<u32, char> = SplayMap::from([(5, 'e'), (3, 'c'), (8, 'h')]);
        assert_eq!(map.root(), Some((&8, &'h')));
        assert_eq!(
            map.iter().collect::<Vec<(&u32, &char)>>(),
            vec![(&3, &'c'), (&5, &'e'), (&8, &'h')],
        );
    }

    #[test]
    fn test_try_insert_node_limit() {
        let mut map = SplayMap::with_config(Natural, Config::default().node_limit(1));
        assert_eq!(map.try_insert(1, 1), Ok(None));
        assert_eq!(map.try_insert(1, 2), Ok(Some((1, 1))));
        assert_eq!(map.try_insert(2, 2), Err(Error::CapacityExceeded(1)));
        assert_eq!(map.len(), 1);
    }

    #[test]
    #[should_panic]
    fn test_insert_past_node_limit() {
        let mut map = SplayMap::with_config(Natural, Config::default().node_limit(0));
        map.insert(1, 1);
    }

    #[test]
    fn test_from_iter_with_node_limit() {
        let ret = SplayMap::from_iter_with(
            vec![(1, 1), (2, 2), (3, 3)],
            Natural,
            Config::default().node_limit(2),
        );
        assert_eq!(ret.err(), Some(Error::CapacityExceeded(2)));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut map = SplayMap::new();
        map.insert(1, 1);
        map.insert(2, 2);

        let mut copy = map.clone();
        assert_eq!(copy, map);
        copy.remove(&1);
        copy.insert(3, 3);

        assert_eq!(map.iter().collect::<Vec<_>>(), vec![(&1, &1), (&2, &2)]);
        assert_eq!(copy.iter().collect::<Vec<_>>(), vec![(&2, &2), (&3, &3)]);
        assert_ne!(copy, map);
    }

    #[test]
    fn test_move_leaves_empty_map() {
        let mut map = SplayMap::new();
        map.insert(1, 1);
        let moved = std::mem::take(&mut map);
        assert!(map.is_empty());
        assert_eq!(map.root(), None);
        assert_eq!(moved.len(), 1);
    }

    #[test]
    fn test_swap() {
        let mut lhs: SplayMap<u32, u32> = SplayMap::from([(1, 1), (2, 2)]);
        let mut rhs: SplayMap<u32, u32> = SplayMap::from([(3, 3)]);
        lhs.swap(&mut rhs);
        assert_eq!(lhs.root(), Some((&3, &3)));
        assert_eq!(rhs.len(), 2);
        assert_eq!(rhs.root(), Some((&2, &2)));
    }

    #[test]
    fn test_debug() {
        let map: SplayMap<u32, char> = SplayMap::from([(2, 'b'), (1, 'a')]);
        assert_eq!(format!("{:?}", map), "{1: 'a', 2: 'b'}");
    }

    #[test]
    fn test_into_iter() {
        let mut map = SplayMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        assert_eq!(
            map.into_iter().collect::<Vec<(u32, u32)>>(),
            vec![(1, 2), (3, 4), (5, 6)],
        );
    }

    #[test]
    fn test_iter_mut() {
        let mut map = SplayMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        for (_, value) in &mut map {
            *value += 1;
        }

        assert_eq!(
            map.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&1, &3), (&3, &5), (&5, &7)],
        );
    }
}
