use crate::compare::{Comparator, Natural};
use crate::config::Config;
use crate::error::Result;
use crate::splay_tree::map::{SplayMap, SplayMapIntoIter, SplayMapIter};
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;

/// An ordered set implemented using a splay tree.
///
/// A splay tree is a self-adjusting binary search tree with the additional property that recently
/// accessed items are quick to access again. After each lookup or insertion, the item that was
/// touched is "splayed" to the root of the tree.
///
/// # Examples
///
/// ```
/// use splay_collections::splay_tree::SplaySet;
///
/// let mut set = SplaySet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(set.min(), Some(&0));
/// assert_eq!(set.ceil(&2), Some(&3));
///
/// assert!(set.contains(&0));
/// assert_eq!(set.root(), Some(&0));
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
pub struct SplaySet<T, C = Natural> {
    map: SplayMap<T, (), C>,
}

impl<T> SplaySet<T> {
    /// Constructs a new, empty `SplaySet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplaySet;
    ///
    /// let set: SplaySet<u32> = SplaySet::new();
    /// ```
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T, C> SplaySet<T, C> {
    /// Constructs a new, empty `SplaySet<T, C>` ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        SplaySet {
            map: SplayMap::with_comparator(comparator),
        }
    }

    /// Constructs a new, empty `SplaySet<T, C>` with a specific allocator and logger
    /// configuration.
    pub fn with_config(comparator: C, config: Config) -> Self {
        SplaySet {
            map: SplayMap::with_config(comparator, config),
        }
    }

    /// Constructs a set by inserting every key of `iter` in order.
    pub fn from_iter_with<I>(iter: I, comparator: C, config: Config) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        C: Comparator<T>,
    {
        SplayMap::from_iter_with(iter.into_iter().map(|key| (key, ())), comparator, config)
            .map(|map| SplaySet { map })
    }

    /// Inserts a key into the set. If the key already exists in the set, it will return and
    /// replace the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    /// assert_eq!(set.insert(1), None);
    /// assert!(set.contains(&1));
    /// assert_eq!(set.insert(1), Some(1));
    /// ```
    pub fn insert(&mut self, key: T) -> Option<T>
    where
        C: Comparator<T>,
    {
        self.map.insert(key, ()).map(|pair| pair.0)
    }

    /// Inserts a key into the set, failing if the configured node limit is reached.
    pub fn try_insert(&mut self, key: T) -> Result<Option<T>>
    where
        C: Comparator<T>,
    {
        self.map
            .try_insert(key, ())
            .map(|pair| pair.map(|pair| pair.0))
    }

    /// Removes a key from the set. If the key exists in the set, it will return the associated
    /// key. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.map.remove(key).map(|pair| pair.0)
    }

    /// Checks if a key exists in the set, splaying the key (or the closest key visited) to the
    /// root.
    pub fn contains<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.map.contains_key(key)
    }

    /// Checks if a key exists in the set. Note that `peek` does not splay the tree in order to use
    /// a non-mutable reference.
    pub fn peek<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.map.peek(key).is_some()
    }

    /// Returns the key at the root of the tree, which is the most recently accessed key.
    pub fn root(&self) -> Option<&T> {
        self.map.root().map(|pair| pair.0)
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Clears the set, removing all values.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Exchanges the contents of two sets in constant time.
    pub fn swap(&mut self, other: &mut Self) {
        self.map.swap(&mut other.map);
    }

    /// Returns a key in the set that is less than or equal to a particular key. Returns `None` if
    /// such a key does not exist. Note that `floor` does not splay the tree.
    pub fn floor<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.map.floor(key)
    }

    /// Returns a key in the set that is greater than or equal to a particular key. Returns `None`
    /// if such a key does not exist. Note that `ceil` does not splay the tree.
    pub fn ceil<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.map.ceil(key)
    }

    /// Returns the minimum key of the set. Returns `None` if the set is empty.
    pub fn min(&self) -> Option<&T> {
        self.map.min()
    }

    /// Returns the maximum key of the set. Returns `None` if the set is empty.
    pub fn max(&self) -> Option<&T> {
        self.map.max()
    }

    /// Returns an iterator over the set. The iterator will yield keys using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    /// set.insert(1);
    /// set.insert(2);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&2));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> SplaySetIter<T> {
        SplaySetIter {
            map_iter: self.map.iter(),
        }
    }
}

impl<T, C> IntoIterator for SplaySet<T, C> {
    type IntoIter = SplaySetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        SplaySetIntoIter {
            map_iter: self.map.into_iter(),
        }
    }
}

impl<'a, T, C> IntoIterator for &'a SplaySet<T, C>
where
    T: 'a,
{
    type IntoIter = SplaySetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `SplaySet<T, C>`.
///
/// This iterator traverses the elements of the set in-order and yields owned keys.
pub struct SplaySetIntoIter<T> {
    map_iter: SplayMapIntoIter<T, ()>,
}

impl<T> Iterator for SplaySetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.map_iter.next().map(|pair| pair.0)
    }
}

/// An iterator for `SplaySet<T, C>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct SplaySetIter<'a, T>
where
    T: 'a,
{
    map_iter: SplayMapIter<'a, T, ()>,
}

impl<'a, T> Iterator for SplaySetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.map_iter.next().map(|pair| pair.0)
    }
}

impl<T, C> FromIterator<T> for SplaySet<T, C>
where
    C: Comparator<T> + Default,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        SplaySet {
            map: iter.into_iter().map(|key| (key, ())).collect(),
        }
    }
}

impl<T, C> Extend<T> for SplaySet<T, C>
where
    C: Comparator<T>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.map.extend(iter.into_iter().map(|key| (key, ())));
    }
}

impl<T, C, const N: usize> From<[T; N]> for SplaySet<T, C>
where
    C: Comparator<T> + Default,
{
    fn from(keys: [T; N]) -> Self {
        SplaySet::from_iter(keys)
    }
}

impl<T, C> Clone for SplaySet<T, C>
where
    T: Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        SplaySet {
            map: self.map.clone(),
        }
    }
}

impl<T, C> Default for SplaySet<T, C>
where
    C: Default,
{
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C> PartialEq for SplaySet<T, C>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T, C> Eq for SplaySet<T, C> where T: Eq {}

impl<T, C> fmt::Debug for SplaySet<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::SplaySet;
    use crate::compare::Natural;
    use crate::config::Config;
    use crate::Error;

    #[test]
    fn test_len_empty() {
        let set: SplaySet<u32> = SplaySet::new();
        assert_eq!(set.len(), 0);
        assert!(set.is_empty());
    }

    #[test]
    fn test_insert_moves_to_root() {
        let mut set = SplaySet::new();
        for key in &[5, 3, 8, 1, 4, 7, 9] {
            assert_eq!(set.insert(*key), None);
            assert_eq!(set.root(), Some(key));
        }
        assert_eq!(set.insert(3), Some(3));
        assert_eq!(set.root(), Some(&3));
    }

    #[test]
    fn test_contains_splays_but_peek_does_not() {
        let mut set = SplaySet::from_iter_with(vec![1, 2, 3], Natural, Config::default()).unwrap();
        assert!(set.peek(&1));
        assert_eq!(set.root(), Some(&3));
        assert!(set.contains(&1));
        assert_eq!(set.root(), Some(&1));
    }

    #[test]
    fn test_remove() {
        let mut set = SplaySet::new();
        set.insert(1);
        assert_eq!(set.remove(&1), Some(1));
        assert!(!set.contains(&1));
        assert_eq!(set.root(), None);
    }

    #[test]
    fn test_min_max_floor_ceil() {
        let set: SplaySet<u32> = SplaySet::from([1, 3, 5]);
        assert_eq!(set.min(), Some(&1));
        assert_eq!(set.max(), Some(&5));
        assert_eq!(set.floor(&4), Some(&3));
        assert_eq!(set.ceil(&4), Some(&5));
    }

    #[test]
    fn test_try_insert_node_limit() {
        let mut set = SplaySet::with_config(Natural, Config::default().node_limit(1));
        assert_eq!(set.try_insert(1), Ok(None));
        assert_eq!(set.try_insert(2), Err(Error::CapacityExceeded(1)));
    }

    #[test]
    fn test_clone_swap_eq() {
        let mut lhs: SplaySet<u32> = (0..4).collect();
        let mut rhs = lhs.clone();
        assert_eq!(lhs, rhs);
        rhs.remove(&0);
        lhs.swap(&mut rhs);
        assert_eq!(lhs.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
        assert_eq!(rhs.len(), 4);
        assert_ne!(lhs, rhs);
    }

    #[test]
    fn test_into_iter_and_debug() {
        let mut set = SplaySet::new();
        set.extend(vec![3, 1, 2]);
        assert_eq!(format!("{:?}", set), "{1, 2, 3}");
        assert_eq!(set.into_iter().collect::<Vec<u32>>(), vec![1, 2, 3]);
    }
}
