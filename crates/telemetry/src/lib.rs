// Path: crates/telemetry/src/lib.rs
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

//! # MNO Registry Telemetry
//!
//! Structured logging initialization for the MNO registry binaries.

/// The initialization routine for global structured logging.
pub mod init;

pub use init::init_tracing;
