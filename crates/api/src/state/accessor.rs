// Path: crates/api/src/state/accessor.rs
//! Defines the `StateAccess` trait for key-value ledger operations.

use crate::state::StateScanIter;
use mno_types::error::StateError;
use std::ops::Bound;

/// A dyn-safe trait that provides the complete interface the record store
/// needs from a ledger: single-item access, atomic batch application, and
/// ordered range scans.
///
/// The store only ever sees this trait, passed in by reference, so the same
/// code runs against a replica's real ledger, an in-memory ledger in tests, or
/// a `StateOverlay` buffering one transaction.
pub trait StateAccess: Send + Sync {
    /// Gets a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError>;

    /// Inserts or replaces a key-value pair.
    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError>;

    /// Deletes a key-value pair. Deleting an absent key is not an error.
    fn delete(&mut self, key: &[u8]) -> Result<(), StateError>;

    /// Atomically applies a batch of deletes followed by inserts/updates.
    /// This is the method used to commit a transaction's write set.
    fn batch_apply(
        &mut self,
        inserts: &[(Vec<u8>, Vec<u8>)],
        deletes: &[Vec<u8>],
    ) -> Result<(), StateError>;

    /// Scans all key-value pairs with `start <= key < end`, in ascending
    /// lexicographic key order.
    ///
    /// An empty `start` means the beginning of the keyspace and an empty `end`
    /// means the end of the keyspace, so `range_scan(b"", b"")` visits every
    /// entry.
    fn range_scan(&self, start: &[u8], end: &[u8]) -> Result<StateScanIter<'_>, StateError>;
}

/// Converts the `(start, end)` convention of [`StateAccess::range_scan`] into
/// standard range bounds over owned keys.
pub fn scan_bounds(start: &[u8], end: &[u8]) -> (Bound<Vec<u8>>, Bound<Vec<u8>>) {
    let lower = if start.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Included(start.to_vec())
    };
    let upper = if end.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Excluded(end.to_vec())
    };
    (lower, upper)
}

/// Returns true when `[start, end)` cannot contain any key. Ledgers must
/// answer such a scan with an empty iterator rather than an error.
pub fn is_empty_range(start: &[u8], end: &[u8]) -> bool {
    !start.is_empty() && !end.is_empty() && start >= end
}

// Blanket implementation to allow `StateAccess` to be used behind a `Box` trait object.
impl<T: StateAccess + ?Sized> StateAccess for Box<T> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        (**self).get(key)
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        (**self).insert(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        (**self).delete(key)
    }

    fn batch_apply(
        &mut self,
        inserts: &[(Vec<u8>, Vec<u8>)],
        deletes: &[Vec<u8>],
    ) -> Result<(), StateError> {
        (**self).batch_apply(inserts, deletes)
    }

    fn range_scan(&self, start: &[u8], end: &[u8]) -> Result<StateScanIter<'_>, StateError> {
        (**self).range_scan(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bounds_are_unbounded() {
        assert_eq!(
            scan_bounds(b"", b""),
            (Bound::Unbounded, Bound::Unbounded)
        );
    }

    #[test]
    fn inverted_or_degenerate_ranges_are_empty() {
        assert!(is_empty_range(b"b", b"a"));
        assert!(is_empty_range(b"a", b"a"));
        assert!(!is_empty_range(b"a", b"b"));
        assert!(!is_empty_range(b"z", b""));
        assert!(!is_empty_range(b"", b"a"));
    }

    #[test]
    fn non_empty_bounds_are_half_open() {
        assert_eq!(
            scan_bounds(b"asset0", b"asset9"),
            (
                Bound::Included(b"asset0".to_vec()),
                Bound::Excluded(b"asset9".to_vec())
            )
        );
    }
}
