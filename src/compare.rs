//! Key orderings used by the trees.

use std::cmp::Ordering;
use std::fmt;

/// A total order over keys of type `T`.
///
/// Implementations must behave as a strict weak order: the trees rely on it to keep keys sorted
/// and unique, and never check it.
pub trait Comparator<T: ?Sized> {
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering;
}

/// Orders keys by their `Ord` implementation.
///
/// `Natural` is a comparator for every `Ord` type at once, which lets lookups use any borrowed
/// form of the key.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Natural;

impl<T> Comparator<T> for Natural
where
    T: Ord + ?Sized,
{
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        lhs.cmp(rhs)
    }
}

/// Orders keys by the reverse of their `Ord` implementation.
///
/// # Examples
///
/// ```
/// use splay_collections::compare::Reverse;
/// use splay_collections::splay_tree::SplayMap;
///
/// let mut map = SplayMap::with_comparator(Reverse);
/// map.insert(1, "a");
/// map.insert(2, "b");
/// assert_eq!(map.min(), Some(&2));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Reverse;

impl<T> Comparator<T> for Reverse
where
    T: Ord + ?Sized,
{
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        rhs.cmp(lhs)
    }
}

/// Orders keys with a closure.
///
/// # Examples
///
/// ```
/// use splay_collections::compare::ByFn;
/// use splay_collections::splay_tree::SplaySet;
///
/// let mut set = SplaySet::with_comparator(ByFn(|a: &String, b: &String| {
///     a.len().cmp(&b.len()).then_with(|| a.cmp(b))
/// }));
/// set.insert(String::from("ccc"));
/// set.insert(String::from("a"));
/// set.insert(String::from("bb"));
/// assert_eq!(set.iter().collect::<Vec<_>>(), vec!["a", "bb", "ccc"]);
/// ```
#[derive(Clone, Copy, Default)]
pub struct ByFn<F>(pub F);

impl<T, F> Comparator<T> for ByFn<F>
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        (self.0)(lhs, rhs)
    }
}

impl<F> fmt::Debug for ByFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("ByFn(..)")
    }
}
