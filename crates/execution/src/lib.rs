// Path: crates/execution/src/lib.rs
//! # MNO Registry Execution Crate Lints
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
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]
//! # MNO Registry Execution
//!
//! Runs service calls against a ledger so that each call commits all of its
//! writes or none of them.

pub mod app;

pub use crate::app::{ExecutionReceipt, TransactionExecutor};
