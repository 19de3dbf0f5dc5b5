// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]

//! # MNO Registry Types
//!
//! This crate is the foundational library for the MNO registry, containing the
//! record type stored on the ledger, the canonical codecs, error types, and
//! configuration objects.
//!
//! ## Architectural Role
//!
//! As the base crate, `mno-types` has minimal dependencies and is itself a
//! dependency for every other crate in the workspace. This prevents circular
//! dependencies and gives one canonical definition of `Mno`, the codecs and the
//! error enums that every replica must agree on.

/// The maximum size in bytes for a single value read from the ledger.
pub const MAX_STATE_VALUE_BYTES: usize = 256 * 1024; // 256 KiB

/// Core application-level data structures, most importantly the `Mno` record.
pub mod app;
/// The canonical, deterministic codecs for ledger values and write sets.
pub mod codec;
/// Configuration structures for the registry service and its bootstrap set.
pub mod config;
/// A unified set of all error types used across the workspace.
pub mod error;
/// Well-known ledger keys and key construction helpers.
pub mod keys;
/// A prelude containing useful extension traits like `OptionExt`.
pub mod prelude;
