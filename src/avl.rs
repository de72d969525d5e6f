#![warn(missing_docs)]
use crate::ordering::{ByText, Compare, FloatOrder, Natural};
use node::{height, Node, OptNode};
use std::borrow::Borrow;
use std::cell::OnceCell;
use std::cmp::Ordering::*;
use std::fmt::{Debug, Display, Formatter};
use std::io;
use tracing::debug;

mod avl_set;
mod iter;
pub(crate) mod node;

pub use avl_set::AvlSet;
pub use iter::Iter;

const DUMP_RULE: &str =
    "----------------------------------------------------------------------------------------------";

/// A map from keys to values sorted by key.
///
/// Internally, the map is an [AVL tree](https://en.wikipedia.org/wiki/AVL_tree):
/// a binary search tree in which the heights of the two subtrees of every node
/// differ by at most one.  Lookups, insertions and removals take O(log n)
/// comparisons.
///
/// Keys are ordered by the strategy `C` (see [`crate::ordering`]).  The
/// default, [`Natural`], uses the key's `Ord` implementation.
///
/// The map memoizes the ascending list of its values for
/// [`values`](#method.values).  Every mutating method drops the memo.
pub struct AvlMap<K, V, C = Natural> {
    len: usize,
    root: OptNode<K, V>,
    cmp: C,
    snapshot: OnceCell<Vec<V>>,
}

impl<K: Clone, V: Clone, C: Clone> Clone for AvlMap<K, V, C> {
    fn clone(&self) -> Self {
        AvlMap {
            len: self.len,
            root: self.root.clone(),
            cmp: self.cmp.clone(),
            snapshot: self.snapshot.clone(),
        }
    }
}

impl<K: Debug, V: Debug, C> Debug for AvlMap<K, V, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.root {
            None => f.write_str("AvlMap(EMPTY)"),
            Some(n) => {
                // use Node's Debug formatter
                f.write_fmt(format_args!("AvlMap(#{}, {:?})", self.len, n))
            }
        }
    }
}

/// Renders the values in ascending key order, e.g. `[1 2 3]`.
impl<K, V: Display, C> Display for AvlMap<K, V, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_listing(f, Iter::new(&self.root, self.len).map(|(_, v)| v))
    }
}

pub(crate) fn write_listing<T: Display>(
    f: &mut Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> std::fmt::Result {
    f.write_str("[")?;
    for (i, x) in items.enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        x.fmt(f)?;
    }
    f.write_str("]")
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for AvlMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && Iter::new(&self.root, self.len)
                .zip(Iter::new(&other.root, other.len))
                .all(|(x, y)| x == y)
    }
}

impl<K: Eq, V: Eq, C> Eq for AvlMap<K, V, C> {}

impl<K, V, C> std::ops::Index<&K> for AvlMap<K, V, C>
where
    C: Compare<K>,
{
    type Output = V;

    fn index(&self, index: &K) -> &Self::Output {
        match self.get(index) {
            Some(v) => v,
            None => panic!("Key not found in AvlMap"),
        }
    }
}

impl<K: Ord, V> AvlMap<K, V> {
    /// Creates a new, empty map ordered by the keys' `Ord` implementation.
    /// # Examples
    /// ```
    /// use ordtree::AvlMap;
    /// let m: AvlMap<usize, usize> = AvlMap::new();
    /// assert!(m.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_ordering(Natural)
    }
}

impl<K, V> AvlMap<K, V, FloatOrder>
where
    FloatOrder: Compare<K>,
{
    /// Creates a new, empty map with `f32` or `f64` keys.
    ///
    /// # Examples
    /// ```
    /// use ordtree::AvlMap;
    /// let mut m = AvlMap::new_float();
    /// m.insert(2.5f64, "b");
    /// m.insert(-1.0, "a");
    /// assert_eq!(m.to_string(), "[a b]");
    /// ```
    pub fn new_float() -> Self {
        Self::with_ordering(FloatOrder)
    }
}

impl<K: Display, V> AvlMap<K, V, ByText> {
    /// Creates a new, empty map ordered by the text of its keys.
    pub fn new_text() -> Self {
        Self::with_ordering(ByText)
    }
}

impl<K, V, C: Compare<K> + Default> Default for AvlMap<K, V, C> {
    fn default() -> Self {
        Self::with_ordering(C::default())
    }
}

impl<K, V, C: Compare<K>> AvlMap<K, V, C> {
    /// Creates a new, empty map that orders its keys with `cmp`.
    ///
    /// # Examples
    /// ```
    /// use ordtree::AvlMap;
    ///
    /// let mut m = AvlMap::with_ordering(|a: &&str, b: &&str| a.len().cmp(&b.len()));
    /// m.insert("ccc", 3);
    /// m.insert("a", 1);
    /// m.insert("bb", 2);
    /// assert_eq!(m.to_string(), "[1 2 3]");
    /// ```
    pub fn with_ordering(cmp: C) -> Self {
        AvlMap {
            len: 0,
            root: None,
            cmp,
            snapshot: OnceCell::new(),
        }
    }

    /// Returns the map's ordering strategy.
    pub fn ordering(&self) -> &C {
        &self.cmp
    }

    fn invalidate(&mut self) {
        self.snapshot.take();
    }

    /// Drops all elements from the map.
    pub fn clear(&mut self) {
        self.len = 0;
        self.root = None;
        self.invalidate();
    }

    /// Inserts a key-value pair in the map and returns the value it replaced.
    ///
    /// Inserting a key that is already present replaces its value in place;
    /// the map's length and shape stay the same.
    ///
    /// # Examples
    /// ```
    /// use ordtree::AvlMap;
    ///
    /// let mut fmap = AvlMap::new();
    /// assert_eq!(fmap.insert(0, "a"), None);
    /// assert_eq!(fmap.insert(0, "b"), Some("a"));
    /// assert_eq!(fmap.get(&0), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, val: V) -> Option<V> {
        self.upsert(key, val, false)
    }

    /// Like [`insert`](#method.insert), but an existing entry also takes the
    /// new key.  The tree keeps its shape either way.
    pub(crate) fn insert_replacing_key(&mut self, key: K, val: V) -> Option<V> {
        self.upsert(key, val, true)
    }

    fn upsert(&mut self, key: K, val: V, replace_key: bool) -> Option<V> {
        self.invalidate();
        let ins = node::insert(&mut self.root, key, val, replace_key, &self.cmp);
        self.len += ins.old.is_none() as usize;
        ins.old
    }

    /// Inserts each of the entries and returns the map for further chaining.
    ///
    /// # Examples
    /// ```
    /// use ordtree::AvlMap;
    ///
    /// let mut fmap = AvlMap::new();
    /// fmap.insert_all([(1, 'a'), (2, 'b')]).insert_all([(1, 'c')]);
    /// assert_eq!(fmap.len(), 2);
    /// assert_eq!(fmap.get(&1), Some(&'c'));
    /// ```
    pub fn insert_all<I>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in entries {
            self.insert(k, v);
        }
        self
    }

    /// Removes a key from a map and returns the unmapped value.
    ///
    /// # Examples
    /// ```
    /// use ordtree::AvlMap;
    ///
    /// let mut fmap = AvlMap::new();
    /// fmap.insert(1, 2);
    /// fmap.insert(2, 3);
    /// assert_eq!(fmap.remove(&2), Some(3));
    /// assert_eq!(fmap.remove(&2), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|e| e.1)
    }

    /// Removes a key from a map and returns the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        self.invalidate();
        let kv = node::remove(&mut self.root, key, &self.cmp);
        self.len -= kv.is_some() as usize;
        kv
    }

    /// Removes each of the keys and returns the map for further chaining.
    /// Absent keys are ignored.
    pub fn remove_all<Q, I>(&mut self, keys: I) -> &mut Self
    where
        Q: Borrow<K>,
        I: IntoIterator<Item = Q>,
    {
        for k in keys {
            self.remove(k.borrow());
        }
        self
    }

    /// Removes and returns the entry with the least key.
    ///
    /// # Examples
    /// ```
    /// use ordtree::AvlMap;
    ///
    /// let mut fmap = AvlMap::from([(2, 'b'), (1, 'a')]);
    /// assert_eq!(fmap.pop_first(), Some((1, 'a')));
    /// assert_eq!(fmap.pop_first(), Some((2, 'b')));
    /// assert_eq!(fmap.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.invalidate();
        let kv = node::pop_first(&mut self.root);
        self.len -= kv.is_some() as usize;
        kv
    }

    /// Removes and returns the entry with the greatest key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.invalidate();
        let kv = node::pop_last(&mut self.root);
        self.len -= kv.is_some() as usize;
        kv
    }

    /// Returns a reference to the value associated with k.
    ///
    /// # Example
    /// ```
    /// use ordtree::AvlMap;
    ///
    /// let mut fmap = AvlMap::new();
    /// fmap.insert(0, 100);
    ///
    /// assert_eq!(fmap.get(&0), Some(&100));
    /// assert_eq!(fmap.get(&1), None);
    /// ```
    pub fn get(&self, k: &K) -> Option<&V> {
        self.get_key_value(k).map(|e| e.1)
    }

    /// Returns the stored key and its value for a key that compares equal to
    /// k.
    pub fn get_key_value(&self, k: &K) -> Option<(&K, &V)> {
        let mut curr = &self.root;
        while let Some(n) = curr {
            match self.cmp.compare(k, &n.key) {
                Less => curr = &n.left,
                Equal => return Some((&n.key, &n.val)),
                Greater => curr = &n.right,
            }
        }

        None
    }

    /// Returns a mutable reference to the value associated with k.
    ///
    /// # Example
    /// ```
    /// use ordtree::AvlMap;
    ///
    /// let mut fmap = AvlMap::new();
    /// fmap.insert(1, 7);
    ///
    /// *fmap.get_mut(&1).unwrap() = 2;
    /// assert_eq!(fmap.get(&1), Some(&2));
    /// ```
    pub fn get_mut(&mut self, k: &K) -> Option<&mut V> {
        // the caller may change the value
        self.snapshot.take();

        let mut curr = self.root.as_deref_mut();
        while let Some(n) = curr {
            match self.cmp.compare(k, &n.key) {
                Less => curr = n.left.as_deref_mut(),
                Equal => return Some(&mut n.val),
                Greater => curr = n.right.as_deref_mut(),
            }
        }

        None
    }

    /// Tests if self contains an entry for the given key.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Tests if self contains an entry for at least one of the keys.
    ///
    /// # Examples
    /// ```
    /// use ordtree::AvlMap;
    ///
    /// let fmap = AvlMap::from([(1, ()), (2, ())]);
    /// assert!(fmap.contains_any([5, 2]));
    /// assert!(!fmap.contains_any([5, 6]));
    /// assert!(!fmap.contains_any(Vec::<i32>::new()));
    /// ```
    pub fn contains_any<Q, I>(&self, keys: I) -> bool
    where
        Q: Borrow<K>,
        I: IntoIterator<Item = Q>,
    {
        keys.into_iter().any(|k| self.contains_key(k.borrow()))
    }

    /// Tests if self contains an entry for every one of the keys.
    pub fn contains_all<Q, I>(&self, keys: I) -> bool
    where
        Q: Borrow<K>,
        I: IntoIterator<Item = Q>,
    {
        keys.into_iter().all(|k| self.contains_key(k.borrow()))
    }

    /// Returns the ascending list of the map's values.
    ///
    /// The list is built on the first call and reused until the map is next
    /// modified.
    ///
    /// # Examples
    /// ```
    /// use ordtree::AvlMap;
    ///
    /// let mut fmap = AvlMap::from([(2, 'b'), (1, 'a')]);
    /// assert_eq!(fmap.values(), &['a', 'b']);
    /// fmap.insert(0, 'z');
    /// assert_eq!(fmap.values(), &['z', 'a', 'b']);
    /// ```
    pub fn values(&self) -> &[V]
    where
        V: Clone,
    {
        self.snapshot
            .get_or_init(|| self.values_iter().cloned().collect())
    }

    /// Calls `f` on each entry in ascending key order, along with the entry's
    /// position, until `f` returns false.
    ///
    /// # Examples
    /// ```
    /// use ordtree::AvlMap;
    ///
    /// let fmap: AvlMap<_, _> = (0..10).map(|i| (i, i * i)).collect();
    /// let mut squares = Vec::new();
    /// fmap.ascend(|_, v, _| {
    ///     squares.push(*v);
    ///     squares.len() < 3
    /// });
    /// assert_eq!(squares, vec![0, 1, 4]);
    /// ```
    pub fn ascend<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V, usize) -> bool,
    {
        if let Some(n) = self.root.as_ref() {
            n.ascend(&mut f, &mut 0);
        }
    }

    /// Calls `f` on each entry in descending key order, along with the
    /// entry's position, until `f` returns false.
    pub fn descend<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V, usize) -> bool,
    {
        if let Some(n) = self.root.as_ref() {
            n.descend(&mut f, &mut 0);
        }
    }

    #[cfg(test)]
    fn chk(&self) {
        assert_eq!(self.len, node::chk(&self.root, None, &self.cmp).0);
    }
}

impl<K, V, C> AvlMap<K, V, C> {
    /// Returns true if self contains no entries, false otherwise.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of entries in self.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the height of the tree: 0 when empty, 1 for a single entry.
    pub fn height(&self) -> usize {
        height(&self.root) as usize
    }

    /// Returns the entry at the root of the tree.
    pub fn root(&self) -> Option<(&K, &V)> {
        self.root.as_ref().map(|n| (&n.key, &n.val))
    }

    /// Returns the key-value pair for the least key in the map
    ///
    /// # Examples
    /// ```
    /// use ordtree::AvlMap;
    ///
    /// let fmap = AvlMap::from([(2,0), (1,0)]);
    /// assert_eq!(fmap.first_key_value(), Some((&1, &0)));
    /// ```
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let mut curr = self.root.as_ref()?;
        while let Some(n) = curr.left.as_ref() {
            curr = n;
        }
        Some((&curr.key, &curr.val))
    }

    /// Returns the key-value pair for the greatest key in the map
    ///
    /// # Examples
    /// ```
    /// use ordtree::AvlMap;
    ///
    /// let fmap = AvlMap::from([(2,0), (1,0)]);
    /// assert_eq!(fmap.last_key_value(), Some((&2, &0)));
    /// ```
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let mut curr = self.root.as_ref()?;
        while let Some(n) = curr.right.as_ref() {
            curr = n;
        }
        Some((&curr.key, &curr.val))
    }

    /// Creates an iterator over the map entries, sorted by key.
    ///
    /// The iterator is double-ended: `iter().rev()` walks the entries in
    /// descending order.
    ///
    /// # Examples
    /// ```
    /// use ordtree::AvlMap;
    ///
    /// let m = AvlMap::from([(0,1), (1,2), (2, 3)]);
    /// for (i, (k, v)) in m.iter().enumerate() {
    ///     assert_eq!(&i, k);
    ///     assert_eq!(&(i+1), v);
    /// }
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root, self.len)
    }

    /// Produces an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.iter().map(|p| p.0)
    }

    /// Produces an iterator over the values of the map, ordered by their
    /// associated keys.
    ///
    /// Unlike [`values`](#method.values), this neither builds nor consults
    /// the memoized list.
    pub fn values_iter(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.iter().map(|p| p.1)
    }

    /// Writes a description of the tree's shape to `out`: the number of
    /// entries, then one line per node in key order with its height, balance
    /// factor and children.
    ///
    /// The format is meant for people and may change.
    pub fn dump<W: io::Write>(&self, out: &mut W) -> io::Result<()>
    where
        K: Display,
    {
        for line in self.dump_lines() {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    /// Emits the lines of [`dump`](#method.dump) as `tracing` debug events.
    pub fn log_dump(&self)
    where
        K: Display,
    {
        for line in self.dump_lines() {
            debug!("{}", line);
        }
    }

    fn dump_lines(&self) -> Vec<String>
    where
        K: Display,
    {
        fn walk<K: Display, V>(n: &Node<K, V>, is_root: bool, out: &mut Vec<String>) {
            if let Some(lf) = n.left.as_ref() {
                walk(lf, false, out);
            }

            let children = match (&n.left, &n.right) {
                (None, None) => "no children |".to_string(),
                (Some(lf), Some(rt)) => {
                    format!("left child:{} right child:{}", lf.key, rt.key)
                }
                (None, Some(rt)) => format!("right child:{}", rt.key),
                (Some(lf), None) => format!("left child:{}", lf.key),
            };

            out.push(format!(
                "{}{} | height {} | balance {} | {}",
                if is_root { "ROOT ** " } else { "" },
                n.key,
                n.height(),
                n.bal(),
                children
            ));

            if let Some(rt) = n.right.as_ref() {
                walk(rt, false, out);
            }
        }

        let mut lines = vec![DUMP_RULE.to_string()];
        match self.root.as_ref() {
            None => lines.push("tree is empty".to_string()),
            Some(n) => {
                lines.push(format!("{} elements", self.len));
                walk(n, true, &mut lines);
            }
        }
        lines.push(DUMP_RULE.to_string());
        lines
    }
}

impl<'a, K, V, C> IntoIterator for &'a AvlMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C: Compare<K>> Extend<(K, V)> for AvlMap<K, V, C> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.insert_all(iter);
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for AvlMap<K, V> {
    fn from(vs: [(K, V); N]) -> Self {
        AvlMap::from_iter(vs)
    }
}

impl<K, V, C: Compare<K> + Default> FromIterator<(K, V)> for AvlMap<K, V, C> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut fmap = AvlMap::default();
        fmap.extend(iter);
        fmap
    }
}
