// Path: crates/state/src/memory/guard.rs

//! Tracks how many range scans are alive against a ledger.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// An RAII guard that counts one open scan on creation and releases it on drop.
///
/// The guard is owned by the scan iterator, so the count falls back whether the
/// scan is exhausted, abandoned early, or dropped while unwinding from an error.
#[must_use = "ScanGuard must be held by the scan it accounts for"]
#[derive(Debug)]
pub struct ScanGuard {
    open: Arc<AtomicUsize>,
}

impl ScanGuard {
    /// Creates a new guard, immediately counting one open scan.
    pub fn new(open: Arc<AtomicUsize>) -> Self {
        open.fetch_add(1, Ordering::AcqRel);
        Self { open }
    }
}

impl Drop for ScanGuard {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::AcqRel);
    }
}
