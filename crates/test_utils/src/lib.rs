// Path: crates/test_utils/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # MNO Registry Test Utilities
//!
//! Fixtures and assertion macros shared by the registry's unit and
//! integration tests.

pub mod assertions;
pub mod fixtures;

#[doc(hidden)]
pub mod __private {
    pub use mno_types::error::ErrorCode;
}
