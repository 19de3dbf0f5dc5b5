// Path: crates/state/src/lib.rs
//! # MNO Registry State Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::indexing_slicing
    )
)]
//! # MNO Registry State
//!
//! An ordered, in-memory ledger implementing `StateAccess`. Every replica and
//! every test runs the record store against it; snapshots make it durable
//! between CLI invocations and digests make replicas comparable.

pub mod memory;

/// A prelude for easily importing the most common types.
pub mod prelude {
    pub use crate::memory::{MemoryState, ScanGuard};
}
