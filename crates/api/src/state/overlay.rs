// Path: crates/api/src/state/overlay.rs

//! A copy-on-write ledger overlay that buffers one transaction's writes.

use crate::state::{is_empty_range, scan_bounds, StateAccess, StateKVPair, StateScanIter};
use mno_types::error::StateError;
use std::cmp::Ordering;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::iter::{Fuse, Peekable};
use std::sync::Arc;

/// A batch of key-value pairs to be inserted or updated in the state.
pub type StateInserts = Vec<(Vec<u8>, Vec<u8>)>;

/// A batch of keys to be deleted from the state.
pub type StateDeletes = Vec<Vec<u8>>;

/// A complete set of state changes (inserts/updates and deletes) from a transaction.
pub type StateChangeSet = (StateInserts, StateDeletes);

struct MergingIterator<'a> {
    base: Peekable<Fuse<StateScanIter<'a>>>,
    writes: Peekable<btree_map::Range<'a, Vec<u8>, Option<Vec<u8>>>>,
}

impl<'a> Iterator for MergingIterator<'a> {
    type Item = Result<StateKVPair, StateError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // A base error is surfaced immediately rather than merged.
            if matches!(self.base.peek(), Some(Err(_))) {
                return self.base.next();
            }

            let base_key = self
                .base
                .peek()
                .and_then(|res| res.as_ref().ok().map(|(k, _)| k.as_ref()));
            let write_key = self.writes.peek().map(|(k, _)| k.as_slice());

            let decision = match (base_key, write_key) {
                (Some(bk), Some(wk)) => Some(bk.cmp(wk)),
                (Some(_), None) => Some(Ordering::Less),
                (None, Some(_)) => Some(Ordering::Greater),
                (None, None) => None,
            };

            match decision {
                Some(Ordering::Less) => return self.base.next(),
                Some(Ordering::Greater) => {
                    if let Some(item) = self.next_write() {
                        return Some(item);
                    }
                }
                Some(Ordering::Equal) => {
                    self.base.next(); // Shadowed by the buffered write.
                    if let Some(item) = self.next_write() {
                        return Some(item);
                    }
                }
                None => return None,
            }
        }
    }
}

impl<'a> MergingIterator<'a> {
    /// Consumes the next buffered write, yielding it unless it is a delete.
    fn next_write(&mut self) -> Option<Result<StateKVPair, StateError>> {
        let (key, val_opt) = self.writes.next()?;
        val_opt
            .as_ref()
            .map(|val| Ok((Arc::from(key.as_slice()), Arc::from(val.as_slice()))))
    }
}

/// An in-memory, copy-on-write overlay for any `StateAccess`.
///
/// Reads are first checked against the local `writes` cache. If a key is not
/// found, the read is passed through to the underlying `base` state.
/// All writes are captured in the local cache and do not affect the `base` state
/// until the caller applies [`StateOverlay::into_ordered_batch`] to it.
#[derive(Clone)]
pub struct StateOverlay<'a> {
    base: &'a dyn StateAccess,
    writes: BTreeMap<Vec<u8>, Option<Vec<u8>>>, // BTreeMap for deterministic commit order.
}

impl<'a> StateOverlay<'a> {
    /// Creates a new, empty overlay on top of a base state accessor.
    pub fn new(base: &'a dyn StateAccess) -> Self {
        Self {
            base,
            writes: BTreeMap::new(),
        }
    }

    /// Returns true if no write has been buffered.
    pub fn is_clean(&self) -> bool {
        self.writes.is_empty()
    }

    /// Consumes the overlay and returns its writes in ascending key order.
    /// This is used to commit the transaction's state changes back to the base state.
    pub fn into_ordered_batch(self) -> StateChangeSet {
        let mut inserts = Vec::new();
        let mut deletes = Vec::new();

        for (key, value_opt) in self.writes {
            match value_opt {
                Some(value) => inserts.push((key, value)),
                None => deletes.push(key),
            }
        }
        (inserts, deletes)
    }
}

impl<'a> StateAccess for StateOverlay<'a> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        match self.writes.get(key) {
            // A buffered write wins, including a buffered delete (`None`).
            Some(value_opt) => Ok(value_opt.clone()),
            None => self.base.get(key),
        }
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        self.writes.insert(key.to_vec(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.writes.insert(key.to_vec(), None);
        Ok(())
    }

    fn batch_apply(
        &mut self,
        inserts: &[(Vec<u8>, Vec<u8>)],
        deletes: &[Vec<u8>],
    ) -> Result<(), StateError> {
        for key in deletes {
            self.delete(key)?;
        }
        for (key, value) in inserts {
            self.insert(key, value)?;
        }
        Ok(())
    }

    fn range_scan(&self, start: &[u8], end: &[u8]) -> Result<StateScanIter<'_>, StateError> {
        if is_empty_range(start, end) {
            return Ok(Box::new(std::iter::empty()));
        }
        let base = self.base.range_scan(start, end)?.fuse().peekable();
        let writes = self.writes.range(scan_bounds(start, end)).peekable();

        Ok(Box::new(MergingIterator { base, writes }))
    }
}
