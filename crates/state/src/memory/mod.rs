// Path: crates/state/src/memory/mod.rs

//! An ordered in-memory ledger.

mod guard;

pub use guard::ScanGuard;

use mno_api::state::{is_empty_range, scan_bounds, StateAccess, StateKVPair, StateScanIter};
use mno_types::codec::{from_bytes_canonical, to_bytes_canonical};
use mno_types::error::StateError;
use parity_scale_codec::{Decode, Encode};
use sha2::{Digest, Sha256};
use std::collections::{btree_map, BTreeMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// The persisted form of a ledger: every entry, in ascending key order.
#[derive(Encode, Decode)]
struct LedgerSnapshot {
    entries: Vec<(Vec<u8>, Vec<u8>)>,
}

/// A `BTreeMap`-backed ledger. Keys iterate in ascending byte order, which is
/// the order every range scan observes.
#[derive(Debug, Default)]
pub struct MemoryState {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    open_scans: Arc<AtomicUsize>,
}

impl MemoryState {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in the ledger.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the ledger holds no entries.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of range scans currently alive against this ledger.
    pub fn open_scans(&self) -> usize {
        self.open_scans.load(Ordering::Acquire)
    }

    /// Serializes the whole ledger into its canonical SCALE form.
    pub fn snapshot(&self) -> Result<Vec<u8>, StateError> {
        let snapshot = LedgerSnapshot {
            entries: self
                .data
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        };
        to_bytes_canonical(&snapshot).map_err(StateError::Backend)
    }

    /// Rebuilds a ledger from bytes produced by [`MemoryState::snapshot`].
    ///
    /// Entries must be in strictly ascending key order; anything else did not
    /// come from `snapshot` and is rejected.
    pub fn from_snapshot(bytes: &[u8]) -> Result<Self, StateError> {
        let snapshot: LedgerSnapshot = from_bytes_canonical(bytes).map_err(StateError::Decode)?;

        let mut data = BTreeMap::new();
        for (key, value) in snapshot.entries {
            if data.last_key_value().is_some_and(|(last, _)| *last >= key) {
                return Err(StateError::Decode(
                    "snapshot entries are not in strictly ascending key order".into(),
                ));
            }
            data.insert(key, value);
        }
        tracing::debug!(target: "state", entries = data.len(), "restored ledger from snapshot");
        Ok(Self {
            data,
            open_scans: Arc::default(),
        })
    }

    /// The hex-encoded SHA-256 of the ledger's snapshot. Two replicas hold the
    /// same ledger exactly when their digests are equal.
    pub fn digest(&self) -> Result<String, StateError> {
        let bytes = self.snapshot()?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}

/// A range scan that holds its ledger's scan count for as long as it lives.
struct GuardedScan<'a> {
    inner: btree_map::Range<'a, Vec<u8>, Vec<u8>>,
    _guard: ScanGuard,
}

impl<'a> Iterator for GuardedScan<'a> {
    type Item = Result<StateKVPair, StateError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(k, v)| Ok((Arc::from(k.as_slice()), Arc::from(v.as_slice()))))
    }
}

impl StateAccess for MemoryState {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self.data.get(key).cloned())
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.data.remove(key);
        Ok(())
    }

    fn batch_apply(
        &mut self,
        inserts: &[(Vec<u8>, Vec<u8>)],
        deletes: &[Vec<u8>],
    ) -> Result<(), StateError> {
        // Neither operation can fail, so the batch lands whole.
        for key in deletes {
            self.data.remove(key);
        }
        for (key, value) in inserts {
            self.data.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    fn range_scan(&self, start: &[u8], end: &[u8]) -> Result<StateScanIter<'_>, StateError> {
        if is_empty_range(start, end) {
            return Ok(Box::new(std::iter::empty()));
        }
        Ok(Box::new(GuardedScan {
            inner: self.data.range(scan_bounds(start, end)),
            _guard: ScanGuard::new(self.open_scans.clone()),
        }))
    }
}
