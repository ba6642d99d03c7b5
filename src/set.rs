pub use crate::avl::Node;
use crate::avl::Tree;
use std::{
    borrow::Borrow,
    cmp::{Eq, Ord, Ordering, PartialEq, PartialOrd},
    default::Default,
    fmt::{self, Debug, Formatter},
    hash::{Hash, Hasher},
    iter::FromIterator,
};

/// An ordered set of unique elements backed by a height balanced
/// binary search tree. Insert, remove, and contains all run in log(N)
/// time regardless of the order elements are added or removed in; the
/// tree rebalances itself with local rotations as it is mutated.
/// # Examples
/// ```
/// use balanced_set::set::Set;
///
/// let mut s = Set::new();
/// assert_eq!(s.insert(String::from("1")), true);
/// assert_eq!(s.insert(String::from("2")), true);
/// assert_eq!(s.insert(String::from("2")), false);
///
/// assert_eq!(s.contains("1"), true);
/// assert_eq!(s.contains("2"), true);
/// assert_eq!(s.contains("3"), false);
/// assert_eq!(s.len(), 2);
/// ```
#[derive(Clone)]
pub struct Set<T: Ord>(Tree<T>);

impl<T: Ord> Default for Set<T> {
    fn default() -> Set<T> {
        Set::new()
    }
}

impl<T: Ord> Hash for Set<T>
where
    T: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        for elt in self.0.iter() {
            elt.hash(state)
        }
    }
}

impl<T: Ord> PartialEq for Set<T> {
    fn eq(&self, other: &Set<T>) -> bool {
        self.len() == other.len()
            && self.0.iter().zip(other.0.iter()).all(|(e0, e1)| e0 == e1)
    }
}

impl<T: Ord> Eq for Set<T> {}

impl<T: Ord> PartialOrd for Set<T> {
    fn partial_cmp(&self, other: &Set<T>) -> Option<Ordering> {
        self.0.iter().partial_cmp(other.0.iter())
    }
}

impl<T: Ord> Ord for Set<T> {
    fn cmp(&self, other: &Set<T>) -> Ordering {
        self.0.iter().cmp(other.0.iter())
    }
}

impl<T: Ord + Debug> Debug for Set<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_set().entries(self.0.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut s = Set::new();
        s.extend(iter);
        s
    }
}

impl<T: Ord> Extend<T> for Set<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elt in iter {
            self.insert(elt);
        }
    }
}

impl<T: Ord> Set<T> {
    /// Create a new empty set
    pub fn new() -> Self {
        Set(Tree::new())
    }

    /// Insert an element into the set. Returns true if the element was
    /// newly inserted, and false if an equal element was already
    /// present, in which case the set is left exactly as it was. Runs
    /// in log(N) time where N is the size of the set.
    ///
    /// # Examples
    /// ```
    /// use balanced_set::set::Set;
    ///
    /// let mut s = Set::new();
    /// assert_eq!(s.insert(42), true);
    /// assert_eq!(s.insert(42), false);
    /// assert_eq!(s.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        self.0.insert(value)
    }

    /// Remove an element from the set. Returns true if an equal
    /// element was present and has been removed, and false if it was
    /// absent, in which case the set is left exactly as it was. Runs
    /// in log(N) time where N is the size of the set.
    ///
    /// # Examples
    /// ```
    /// use balanced_set::set::Set;
    ///
    /// let mut s: Set<i32> = (0..10).collect();
    /// assert_eq!(s.remove(&5), true);
    /// assert_eq!(s.remove(&5), false);
    /// assert_eq!(s.contains(&5), false);
    /// assert_eq!(s.len(), 9);
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        Q: ?Sized + Ord,
        T: Borrow<Q>,
    {
        self.0.remove(value)
    }

    /// Return true if the set contains an element equal to the given
    /// value, else false. Runs in log(N) time and constant space,
    /// where N is the size of the set.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        Q: ?Sized + Ord,
        T: Borrow<Q>,
    {
        self.0.get(value).is_some()
    }

    /// Return a reference to the element in the set that is equal to
    /// the given value, or None if no such element exists.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        Q: ?Sized + Ord,
        T: Borrow<Q>,
    {
        self.0.get(value)
    }

    /// Remove every element from the set. A no-op on an empty set.
    pub fn clear(&mut self) {
        self.0.clear()
    }

    /// Get the number of elements in the set in constant time
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the set holds no elements
    pub fn is_empty(&self) -> bool {
        self.0.len() == 0
    }

    /// Return a read only handle to the root node of the tree, or None
    /// if the set is empty. Node handles expose the stored value, the
    /// child subtrees, and the cached subtree height, which is enough
    /// for external code (a test harness, say) to verify the tree
    /// shape; they give no way to mutate it.
    ///
    /// # Examples
    /// ```
    /// use balanced_set::set::Set;
    ///
    /// // seven ascending inserts settle with the median at the root
    /// let s: Set<i32> = (1..=7).collect();
    /// let root = s.root().unwrap();
    /// assert_eq!(*root.value(), 4);
    /// assert_eq!(root.height(), 3);
    /// ```
    pub fn root(&self) -> Option<&Node<T>> {
        self.0.root()
    }
}

impl<T: Ord> Set<T> {
    #[allow(dead_code)]
    pub(crate) fn invariant(&self) {
        self.0.invariant()
    }
}
