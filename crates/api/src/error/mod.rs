// Path: crates/api/src/error/mod.rs
// Re-export all core error types from the central types crate.
pub use mno_types::error::{
    ConfigError, ErrorCode, RegistryError, ServiceError, StateError, TransactionError,
};
