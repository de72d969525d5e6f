//! # Ordered collections backed by AVL trees
//!
//! `ordtree` provides a sorted map and a sorted set built on a height-balanced
//! binary search tree.  Every update rebalances the tree, so the height stays
//! within about 1.44 log2(n) and lookups, inserts and removals take
//! logarithmic time.
//!
//! The trees are parameterized by an ordering strategy (see [`ordering`]).
//! The default, [`Natural`], uses the key's `Ord`; floats, `Display` text,
//! reversed orders and arbitrary closures are also available.  Keys of mixed
//! types can share a tree through [`DynKey`].
//!
//! ```
//! use ordtree::AvlSet;
//!
//! let mut s = AvlSet::new();
//! s.insert_all([5, 1, 4, 2, 3]).remove_all([4]);
//! assert_eq!(s.to_string(), "[1 2 3 5]");
//! assert_eq!(s.values(), &[1, 2, 3, 5]);
//! ```

mod avl;
pub use avl::AvlMap;
pub use avl::AvlSet;
pub use avl::Iter;

mod dyn_key;
pub use dyn_key::DynKey;

mod error;
pub use error::OrderingError;

pub mod ordering;
pub use ordering::{ByText, Compare, FloatOrder, Natural, Reversed};

/// A set whose members may be keys of any type.
///
/// # Examples
/// ```
/// use ordtree::{DynKey, DynSet};
///
/// let mut s = DynSet::new();
/// s.insert_all([DynKey::from(3i32), DynKey::from(1i32)]);
/// assert_eq!(s.first().and_then(|k| k.downcast_ref::<i32>()), Some(&1));
/// ```
pub type DynSet = AvlSet<DynKey>;
