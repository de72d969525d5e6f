//! Error types.

use thiserror::Error;

/// Why two dynamically typed keys could not be ordered.
///
/// Failing to order keys is a programming error: the tree cannot place the
/// key anywhere.  [`DynKey`](crate::DynKey) reports it through `try_cmp`, and
/// its `Ord` implementation (which the trees use) panics with this message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderingError {
    /// The key supports neither explicit comparison nor a text form.
    #[error("key of type `{type_name}` supports neither comparison nor a text representation")]
    Incomparable {
        /// Type name of the offending key.
        type_name: &'static str,
    },

    /// The keys have comparison capabilities that cannot be used together,
    /// e.g. two ordered keys of different concrete types.
    #[error("cannot compare key of type `{left}` with key of type `{right}`")]
    Mismatched {
        /// Type name of the left-hand key.
        left: &'static str,
        /// Type name of the right-hand key.
        right: &'static str,
    },
}
