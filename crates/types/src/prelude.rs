// Path: crates/types/src/prelude.rs

//! A curated set of commonly used traits and types.

pub use crate::app::{Mno, ServiceCall};
pub use crate::error::{ErrorCode, RegistryError, StateError, TransactionError};

/// An extension trait for `Option` that provides a convenient `required` method
/// to convert an `Option` to a `Result` with a specific error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, E>`, returning the error built by
    /// `err` if the option is `None`.
    fn required<E>(self, err: impl FnOnce() -> E) -> Result<T, E>;
}

impl<T> OptionExt<T> for Option<T> {
    fn required<E>(self, err: impl FnOnce() -> E) -> Result<T, E> {
        self.ok_or_else(err)
    }
}
