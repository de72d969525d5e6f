//! Dynamically typed keys for trees that mix key types.
//!
//! Most trees hold one key type and order it at compile time through a
//! [`Compare`](crate::ordering::Compare) strategy.  When a single tree really
//! must hold keys of several types, wrap each key in a [`DynKey`], which
//! records what the key can do:
//!
//! * [`DynKey::ordered`] keys carry their own `Ord`.  They compare with other
//!   ordered keys of the same concrete type.
//! * [`DynKey::textual`] keys are ordered by their `Display` text, and compare
//!   with any other textual key.
//! * [`DynKey::opaque`] keys can do neither.  Any comparison involving one is
//!   an error.
//!
//! ```
//! use ordtree::{DynKey, DynSet};
//!
//! let mut s = DynSet::new();
//! s.insert_all([DynKey::textual("pear"), DynKey::textual(7), DynKey::textual("apple")]);
//! assert_eq!(s.to_string(), "[7 apple pear]");
//! ```
use crate::error::OrderingError;
use std::any::{type_name, Any};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Capability {
    Ordered,
    Textual,
    Opaque,
}

trait KeyObject {
    fn capability(&self) -> Capability;
    fn type_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;

    // Compares against another key object wrapping the same concrete type.
    // Returns None when other is a different type.
    fn cmp_same(&self, _other: &dyn Any) -> Option<Ordering> {
        None
    }

    fn text(&self) -> Option<String> {
        None
    }

    fn render(&self, f: &mut Formatter<'_>) -> fmt::Result;
}

struct Ordered<T>(T);
struct Textual<T>(T);
struct Opaque<T>(T);

impl<T: Ord + Display + 'static> KeyObject for Ordered<T> {
    fn capability(&self) -> Capability {
        Capability::Ordered
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn cmp_same(&self, other: &dyn Any) -> Option<Ordering> {
        other
            .downcast_ref::<Ordered<T>>()
            .map(|rhs| self.0.cmp(&rhs.0))
    }

    fn render(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<T: Display + 'static> KeyObject for Textual<T> {
    fn capability(&self) -> Capability {
        Capability::Textual
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn text(&self) -> Option<String> {
        Some(self.0.to_string())
    }

    fn render(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<T: Debug + 'static> KeyObject for Opaque<T> {
    fn capability(&self) -> Capability {
        Capability::Opaque
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn render(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

/// A key of any type, tagged with the way it can be ordered.
///
/// Cloning a `DynKey` is cheap; clones share the wrapped value.
///
/// # Panics
/// The `Ord` and `PartialEq` implementations panic when
/// [`try_cmp`](DynKey::try_cmp) fails.  An incomparable key in a tree is a
/// bug in the calling code, not a condition to recover from.
#[derive(Clone)]
pub struct DynKey {
    inner: Rc<dyn KeyObject>,
}

impl DynKey {
    /// Wraps a key that is ordered by its own `Ord` implementation and
    /// rendered with `Display`.
    pub fn ordered<T: Ord + Display + 'static>(key: T) -> Self {
        DynKey {
            inner: Rc::new(Ordered(key)),
        }
    }

    /// Wraps a key that is ordered by its `Display` text.
    pub fn textual<T: Display + 'static>(key: T) -> Self {
        DynKey {
            inner: Rc::new(Textual(key)),
        }
    }

    /// Wraps a key that cannot be ordered at all.
    ///
    /// Opaque keys are useful only to exercise the failure path; inserting one
    /// into a non-empty tree panics.
    pub fn opaque<T: Debug + 'static>(key: T) -> Self {
        DynKey {
            inner: Rc::new(Opaque(key)),
        }
    }

    /// Returns the name of the wrapped type.
    pub fn type_name(&self) -> &'static str {
        self.inner.type_name()
    }

    /// Returns a reference to the wrapped key if it has type `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        let any = self.inner.as_any();
        if let Some(Ordered(k)) = any.downcast_ref::<Ordered<T>>() {
            Some(k)
        } else if let Some(Textual(k)) = any.downcast_ref::<Textual<T>>() {
            Some(k)
        } else {
            any.downcast_ref::<Opaque<T>>().map(|Opaque(k)| k)
        }
    }

    /// Compares two keys, reporting keys that cannot be ordered.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, OrderingError> {
        use Capability::*;

        let lhs = self.inner.as_ref();
        let rhs = other.inner.as_ref();
        let mismatched = || OrderingError::Mismatched {
            left: lhs.type_name(),
            right: rhs.type_name(),
        };

        match (lhs.capability(), rhs.capability()) {
            (Opaque, _) => Err(OrderingError::Incomparable {
                type_name: lhs.type_name(),
            }),

            (_, Opaque) => Err(OrderingError::Incomparable {
                type_name: rhs.type_name(),
            }),

            (Ordered, Ordered) => {
                lhs.cmp_same(rhs.as_any()).ok_or_else(mismatched)
            }

            (Textual, Textual) => Ok(lhs.text().cmp(&rhs.text())),

            _ => Err(mismatched()),
        }
    }
}

impl PartialEq for DynKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for DynKey {}

impl PartialOrd for DynKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DynKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.try_cmp(other) {
            Ok(ord) => ord,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Display for DynKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.inner.render(f)
    }
}

impl Debug for DynKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("DynKey(")?;
        self.inner.render(f)?;
        f.write_str(")")
    }
}

macro_rules! ordered_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for DynKey {
                fn from(key: $t) -> Self {
                    DynKey::ordered(key)
                }
            }
        )*
    };
}

ordered_from!(i8, i16, i32, i64, i128, isize);
ordered_from!(u8, u16, u32, u64, u128, usize);
ordered_from!(char, bool, String, &'static str);
