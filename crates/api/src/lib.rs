// Path: crates/api/src/lib.rs

//! # MNO Registry API Crate Lints
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
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
//! # MNO Registry API
//!
//! Core traits and interfaces for the MNO registry. This crate defines the
//! stable contract between the record store, the ledger it runs on, and the
//! host that dispatches operations into it.

/// Re-exports all core error types from the central `mno-types` crate.
pub mod error;
/// Traits for ledger services and the explicit method table used to dispatch into them.
pub mod services;
/// Core traits for ledger access, including `StateAccess` and `StateOverlay`.
pub mod state;

/// A curated set of the most commonly used traits and types.
pub mod prelude {
    pub use crate::error::{
        ErrorCode, RegistryError, ServiceError, StateError, TransactionError,
    };
    pub use crate::services::{LedgerService, MethodIntent, MethodTable};
    pub use crate::state::{StateAccess, StateOverlay};
}
