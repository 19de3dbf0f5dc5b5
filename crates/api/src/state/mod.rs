// Path: crates/api/src/state/mod.rs
//! Core traits and types for ledger access.
//!
//! This module defines the interface the record store consumes from the ledger:
//! - `StateAccess`: keyed get/insert/delete, atomic batch application, and
//!   ordered range scans.
//! - `StateOverlay`: a copy-on-write view that buffers one transaction's writes
//!   so they can be committed atomically or discarded.

use mno_types::error::StateError;
use std::sync::Arc;

// --- Type Aliases for common state patterns ---
/// An atomically reference-counted, owned key slice.
pub type StateKey = Arc<[u8]>;
/// An atomically reference-counted, owned value slice.
pub type StateVal = Arc<[u8]>;
/// An owned key-value pair from the state, using cheap-to-clone Arcs.
pub type StateKVPair = (StateKey, StateVal);
/// A streaming iterator over key-value pairs from the state, in ascending key order.
///
/// Any backend-side scan state is owned by the iterator and released when it
/// is dropped, whether it was exhausted or abandoned early.
pub type StateScanIter<'a> = Box<dyn Iterator<Item = Result<StateKVPair, StateError>> + Send + 'a>;

// --- Module Structure ---

mod accessor;
mod overlay;

// --- Public Exports ---

pub use accessor::*;
pub use overlay::*;
