//! Key ordering strategies.
//!
//! Every tree in this crate is parameterized by a strategy `C: Compare<K>`
//! that it consults for each key comparison.  The strategy is fixed when the
//! tree is built and must describe a strict total order for the life of the
//! tree.  A strategy that changes its answers after keys were inserted will
//! silently break the search order.
//!
//! The strategies provided here cover the common cases:
//!
//! * [`Natural`] uses the key's own [`Ord`] implementation.  This covers the
//!   integer types, `char`, `String` and `&str`, and any user type that
//!   implements `Ord` itself.
//! * [`FloatOrder`] orders `f32` and `f64`.  NaN has no place in a total order
//!   and comparing one panics.
//! * [`ByText`] orders keys by their [`Display`] text.  It is the fallback for
//!   key types that can render themselves but have no comparison of their own.
//! * [`Reversed`] flips another strategy.
//! * Any closure `Fn(&K, &K) -> Ordering` is a strategy.
//!
//! ```
//! use ordtree::AvlSet;
//! use ordtree::ordering::Reversed;
//! use ordtree::Natural;
//!
//! let mut s = AvlSet::with_ordering(Reversed(Natural));
//! s.insert_all([1, 3, 2]);
//! assert_eq!(s.to_string(), "[3 2 1]");
//! ```
use std::cmp::Ordering;
use std::fmt::Display;

/// A three-way comparison over keys of type `K`.
pub trait Compare<K: ?Sized> {
    /// Compares two keys.
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering;
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<K: Ord + ?Sized> Compare<K> for Natural {
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        lhs.cmp(rhs)
    }
}

/// Orders IEEE floating point keys.
///
/// # Panics
/// Comparing NaN with anything panics.  Trees of floats must not hold NaN.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FloatOrder;

macro_rules! float_order {
    ($($t:ty),*) => {
        $(
            impl Compare<$t> for FloatOrder {
                fn compare(&self, lhs: &$t, rhs: &$t) -> Ordering {
                    match lhs.partial_cmp(rhs) {
                        Some(ord) => ord,
                        None => panic!(
                            "cannot order {} and {}: NaN is not a valid key",
                            lhs, rhs
                        ),
                    }
                }
            }
        )*
    };
}

float_order!(f32, f64);

/// Orders keys by the text produced by their [`Display`] implementation.
///
/// Two keys that render identically compare equal, so they occupy the same
/// slot in a tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ByText;

impl<K: Display + ?Sized> Compare<K> for ByText {
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        lhs.to_string().cmp(&rhs.to_string())
    }
}

/// Inverts the wrapped strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reversed<C>(pub C);

impl<K: ?Sized, C: Compare<K>> Compare<K> for Reversed<C> {
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        self.0.compare(rhs, lhs)
    }
}

impl<K: ?Sized, F> Compare<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        self(lhs, rhs)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use Ordering::*;

    #[test]
    fn natural_orders_primitives() {
        assert_eq!(Natural.compare(&-3i8, &2), Less);
        assert_eq!(Natural.compare(&u64::MAX, &0), Greater);
        assert_eq!(Natural.compare("abc", "abd"), Less);
        assert_eq!(Natural.compare(&'z', &'a'), Greater);
        assert_eq!(Natural.compare(&7u8, &7u8), Equal);
    }

    #[test]
    fn float_order() {
        assert_eq!(FloatOrder.compare(&1.5f64, &2.0), Less);
        assert_eq!(FloatOrder.compare(&-0.0f32, &0.0), Equal);
        assert_eq!(FloatOrder.compare(&f64::INFINITY, &1e300), Greater);
    }

    #[test]
    #[should_panic(expected = "NaN")]
    fn float_order_rejects_nan() {
        FloatOrder.compare(&f64::NAN, &1.0);
    }

    #[test]
    fn by_text_uses_display() {
        // 10 < 9 when compared as text
        assert_eq!(ByText.compare(&10, &9), Less);
        assert_eq!(ByText.compare(&"b", &"a"), Greater);
    }

    #[test]
    fn reversed_and_closures() {
        assert_eq!(Reversed(Natural).compare(&1, &2), Greater);
        let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
        assert_eq!(by_len.compare(&"aaa", &"b"), Greater);
        assert_eq!(Reversed(by_len).compare(&"aaa", &"b"), Less);
    }
}
