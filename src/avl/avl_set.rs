use super::{write_listing, AvlMap};
use crate::ordering::{ByText, Compare, FloatOrder, Natural};
use std::borrow::Borrow;
use std::cell::OnceCell;
use std::fmt::{Debug, Display, Formatter};
use std::io;

/// A sorted set of values.
///
/// The implementation is mostly a thin wrapper around [`AvlMap`].  Like the
/// map, the set memoizes its ascending list of values for
/// [`values`](#method.values) and drops it on every change.
///
/// # Examples
/// ```
/// use ordtree::AvlSet;
///
/// let mut s = AvlSet::new();
/// s.insert_all([9, 4, 2, 6, 8, 0, 3, 1, 7, 5]);
/// s.insert_all([9, 4, 2, 6, 8, 0, 3, 1, 7, 5]);
/// assert_eq!(s.len(), 10);
/// assert_eq!(s.get(&2), Some(&2));
/// assert_eq!(s.pop_last(), Some(9));
/// assert_eq!(s.pop_first(), Some(0));
/// assert_eq!(s.to_string(), "[1 2 3 4 5 6 7 8]");
/// ```
pub struct AvlSet<T, C = Natural> {
    map: AvlMap<T, (), C>,
    snapshot: OnceCell<Vec<T>>,
}

impl<T: Clone, C: Clone> Clone for AvlSet<T, C> {
    fn clone(&self) -> Self {
        AvlSet {
            map: self.map.clone(),
            snapshot: self.snapshot.clone(),
        }
    }
}

impl<T: Debug, C> Debug for AvlSet<T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.map.keys()).finish()
    }
}

/// Renders the values in ascending order, e.g. `[1 2 3]`.
impl<T: Display, C> Display for AvlSet<T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_listing(f, self.map.keys())
    }
}

impl<T: PartialEq, C> PartialEq for AvlSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T: Eq, C> Eq for AvlSet<T, C> {}

impl<T: Ord> AvlSet<T> {
    /// Returns a new, empty set ordered by the values' `Ord` implementation.
    pub fn new() -> Self {
        Self::with_ordering(Natural)
    }
}

impl<T> AvlSet<T, FloatOrder>
where
    FloatOrder: Compare<T>,
{
    /// Returns a new, empty set of `f32` or `f64` values.
    ///
    /// # Examples
    /// ```
    /// use ordtree::AvlSet;
    ///
    /// let mut s = AvlSet::<f64, _>::new_float();
    /// s.insert_all([2.5, -1.0, 0.25]);
    /// assert_eq!(s.to_string(), "[-1 0.25 2.5]");
    /// ```
    pub fn new_float() -> Self {
        Self::with_ordering(FloatOrder)
    }
}

impl<T: Display> AvlSet<T, ByText> {
    /// Returns a new, empty set ordered by the text of its values.
    pub fn new_text() -> Self {
        Self::with_ordering(ByText)
    }
}

impl<T, C: Compare<T> + Default> Default for AvlSet<T, C> {
    fn default() -> Self {
        Self::with_ordering(C::default())
    }
}

impl<T, C: Compare<T>> AvlSet<T, C> {
    /// Returns a new, empty set that orders its values with `cmp`.
    pub fn with_ordering(cmp: C) -> Self {
        AvlSet {
            map: AvlMap::with_ordering(cmp),
            snapshot: OnceCell::new(),
        }
    }

    /// Returns the set's ordering strategy.
    pub fn ordering(&self) -> &C {
        self.map.ordering()
    }

    /// Removes all the entries from self.
    pub fn clear(&mut self) {
        self.snapshot.take();
        self.map.clear();
    }

    /// Inserts the given value and returns true if self did not already have
    /// the value and returns false otherwise.
    ///
    /// A value that compares equal to a member replaces it in place; the
    /// tree's shape does not change.
    pub fn insert(&mut self, value: T) -> bool {
        self.snapshot.take();
        self.map.insert_replacing_key(value, ()).is_none()
    }

    /// Inserts each of the values and returns the set for further chaining.
    pub fn insert_all<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
    {
        for v in values {
            self.insert(v);
        }
        self
    }

    /// Removes the given value from self returning true if the value was
    /// present and false otherwise.
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes and returns the set member that matches value.
    pub fn take(&mut self, value: &T) -> Option<T> {
        self.snapshot.take();
        self.map.remove_entry(value).map(|e| e.0)
    }

    /// Removes each of the values and returns the set for further chaining.
    /// Values that are not members are ignored.
    ///
    /// # Examples
    /// ```
    /// use ordtree::AvlSet;
    ///
    /// let mut s: AvlSet<_> = [1, 2, 3].into_iter().collect();
    /// assert!(s.remove_all([1, 2, 3, 4]).is_empty());
    /// assert_eq!(s.first(), None);
    /// assert_eq!(s.get(&2), None);
    /// ```
    pub fn remove_all<Q, I>(&mut self, values: I) -> &mut Self
    where
        Q: Borrow<T>,
        I: IntoIterator<Item = Q>,
    {
        for v in values {
            self.remove(v.borrow());
        }
        self
    }

    /// Removes and returns the least value.
    pub fn pop_first(&mut self) -> Option<T> {
        self.snapshot.take();
        self.map.pop_first().map(|e| e.0)
    }

    /// Removes and returns the greatest value.
    pub fn pop_last(&mut self) -> Option<T> {
        self.snapshot.take();
        self.map.pop_last().map(|e| e.0)
    }

    /// Returns a reference to the member matching value, if it exists
    pub fn get(&self, value: &T) -> Option<&T> {
        self.map.get_key_value(value).map(|e| e.0)
    }

    /// Tests if self contains the given value.
    pub fn contains(&self, value: &T) -> bool {
        self.map.contains_key(value)
    }

    /// Tests if self contains at least one of the values.
    pub fn contains_any<Q, I>(&self, values: I) -> bool
    where
        Q: Borrow<T>,
        I: IntoIterator<Item = Q>,
    {
        self.map.contains_any(values)
    }

    /// Tests if self contains every one of the values.
    pub fn contains_all<Q, I>(&self, values: I) -> bool
    where
        Q: Borrow<T>,
        I: IntoIterator<Item = Q>,
    {
        self.map.contains_all(values)
    }

    /// Returns the ascending list of the set's values.
    ///
    /// The list is built on the first call and reused until the set is next
    /// modified.
    pub fn values(&self) -> &[T]
    where
        T: Clone,
    {
        self.snapshot
            .get_or_init(|| self.map.keys().cloned().collect())
    }

    /// Calls `f` on each value in ascending order, along with the value's
    /// position, until `f` returns false.
    pub fn ascend<F>(&self, mut f: F)
    where
        F: FnMut(&T, usize) -> bool,
    {
        self.map.ascend(|v, _, i| f(v, i));
    }

    /// Calls `f` on each value in descending order, along with the value's
    /// position, until `f` returns false.
    ///
    /// # Examples
    /// ```
    /// use ordtree::AvlSet;
    ///
    /// let s: AvlSet<_> = (1..=3).collect();
    /// let mut desc = [0; 3];
    /// s.descend(|&v, i| {
    ///     desc[i] = v;
    ///     true
    /// });
    /// assert_eq!(desc, [3, 2, 1]);
    /// ```
    pub fn descend<F>(&self, mut f: F)
    where
        F: FnMut(&T, usize) -> bool,
    {
        self.map.descend(|v, _, i| f(v, i));
    }
}

impl<T, C> AvlSet<T, C> {
    /// Returns true if self is the empty set, false otherwise.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the number of elements in self.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns the height of the underlying tree.
    pub fn height(&self) -> usize {
        self.map.height()
    }

    /// Returns the value at the root of the underlying tree.
    pub fn root(&self) -> Option<&T> {
        self.map.root().map(|e| e.0)
    }

    /// Returns the least value in the set.
    pub fn first(&self) -> Option<&T> {
        self.map.first_key_value().map(|(k, _)| k)
    }

    /// Returns the greatest value in self.
    pub fn last(&self) -> Option<&T> {
        self.map.last_key_value().map(|e| e.0)
    }

    /// Returns an iterator over self's values in sorted order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.map.keys()
    }

    /// Writes a description of the tree's shape to `out`.  See
    /// [`AvlMap::dump`].
    pub fn dump<W: io::Write>(&self, out: &mut W) -> io::Result<()>
    where
        T: Display,
    {
        self.map.dump(out)
    }

    /// Emits the lines of [`dump`](#method.dump) as `tracing` debug events.
    pub fn log_dump(&self)
    where
        T: Display,
    {
        self.map.log_dump()
    }

    #[cfg(test)]
    fn chk(&self)
    where
        C: Compare<T>,
    {
        self.map.chk();
    }
}

impl<T, C: Compare<T>> Extend<T> for AvlSet<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<T, C: Compare<T> + Default> FromIterator<T> for AvlSet<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut s = AvlSet::default();
        s.extend(iter);
        s
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for AvlSet<T> {
    fn from(vs: [T; N]) -> Self {
        AvlSet::from_iter(vs)
    }
}

#[cfg(test)]
mod test {
    extern crate quickcheck;
    use super::*;
    use quickcheck::quickcheck;
    use std::collections::BTreeSet;

    #[test]
    fn duplicates_do_not_count() {
        let keys = [0, 2, 5, 10, 15, 20, 12, 14, 13, 25];
        let mut s = AvlSet::new();
        s.insert_all(keys).insert_all(keys);
        assert_eq!(s.len(), 10);
        s.chk();
    }

    #[test]
    fn string_listing() {
        let s = AvlSet::from([1, 2, 3, 4, 5, 6]);
        assert_eq!(s.to_string(), "[1 2 3 4 5 6]");
        assert_eq!(format!("{:?}", s), "{1, 2, 3, 4, 5, 6}");
    }

    #[test]
    fn pop_and_pull() {
        let mut s = AvlSet::from([1, 2, 3]);
        assert_eq!(s.pop_last(), Some(3));
        assert_eq!(s.values(), &[1, 2]);
        assert_eq!(s.pop_first(), Some(1));
        assert_eq!(s.values(), &[2]);
        assert_eq!(s.pop_last(), Some(2));
        assert!(s.is_empty());
        assert_eq!(s.pop_last(), None);
        assert_eq!(s.pop_first(), None);
    }

    #[test]
    fn head_and_tail() {
        let mut s = AvlSet::from([2, 3, 1]);
        assert_eq!(s.first(), Some(&1));
        assert_eq!(s.last(), Some(&3));
        s.clear();
        assert_eq!(s.first(), None);
        assert_eq!(s.last(), None);
    }

    #[test]
    fn values_then_descend() {
        let mut s = AvlSet::from([1, 2]);
        assert_eq!(s.values(), &[1, 2]);
        s.insert(3);

        let mut desc = Vec::new();
        s.descend(|&v, i| {
            assert_eq!(i, desc.len());
            desc.push(v);
            true
        });
        assert_eq!(desc, vec![3, 2, 1]);
        assert_eq!(s.values(), &[1, 2, 3]);
    }

    #[test]
    fn contains_family() {
        let s: AvlSet<_> = (1..=1000).collect();
        assert!(s.contains(&1));
        assert!(s.contains_all([1, 2, 3, 4]));
        assert!(s.contains_any([5]));
        assert!(!s.contains_any([5000, 2000]));
        assert!(s.contains_any(&[5000, 999]));
    }

    #[test]
    fn insert_replaces_equal_member() {
        // ordered by length only, so "bb" and "cc" are the same member
        let mut s = AvlSet::with_ordering(|a: &String, b: &String| a.len().cmp(&b.len()));
        assert!(s.insert("bb".to_string()));
        assert!(!s.insert("cc".to_string()));
        assert_eq!(s.len(), 1);
        assert_eq!(s.values(), &["cc".to_string()]);
    }

    #[test]
    fn reinsert_keeps_shape() {
        let mut s = AvlSet::from([1, 2, 3, 4]);
        let mut before = Vec::new();
        s.dump(&mut before).unwrap();
        let (root, height) = (s.root().copied(), s.height());
        assert_eq!(root, Some(2));

        for v in [2, 1, 4, 3] {
            assert!(!s.insert(v));
            assert_eq!(s.root().copied(), root);
            assert_eq!(s.height(), height);
        }

        let mut after = Vec::new();
        s.dump(&mut after).unwrap();
        assert_eq!(after, before);
        assert_eq!(s.len(), 4);
        s.chk();
    }

    fn set_test(vs: Vec<(bool, u8)>) {
        let mut s = AvlSet::new();
        let mut t = BTreeSet::new();
        for (add, v) in vs {
            if add {
                assert_eq!(s.insert(v), t.insert(v));
            } else {
                assert_eq!(s.remove(&v), t.remove(&v));
            }
            assert_eq!(s.len(), t.len());
            assert!(s.iter().eq(t.iter()));
            assert!(s.iter().rev().eq(t.iter().rev()));
            assert_eq!(s.first(), t.first());
            assert_eq!(s.last(), t.last());
            s.chk();
        }
    }

    quickcheck! {
        fn qc_set_test(vs: Vec<(bool, u8)>) -> () {
            set_test(vs);
        }

        fn qc_round_trip(vs: Vec<u8>, x: u8) -> bool {
            let mut s: AvlSet<_> = vs.into_iter().filter(|&v| v != x).collect();
            let before = s.values().to_vec();
            s.insert(x);
            s.remove(&x);
            s.values() == before.as_slice()
        }
    }
}
