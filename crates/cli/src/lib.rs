// Path: crates/cli/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # MNO Registry CLI
//!
//! A local, single-replica ledger session backing the `mno-registry` binary.

pub mod session;

pub use session::LedgerSession;
