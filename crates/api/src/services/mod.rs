// Path: crates/api/src/services/mod.rs
//! Traits for pluggable ledger services.

use crate::state::StateAccess;
use mno_types::error::TransactionError;
use std::any::Any;

pub mod dispatch;

pub use dispatch::{validate_method_name, MethodHandler, MethodTable, MethodTableBuilder};

/// Whether a method's writes are meant to be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodIntent {
    /// The method mutates the ledger; a successful call's write set is committed.
    Submit,
    /// The method only reads; its call is never committed.
    Evaluate,
}

/// The base trait for any service the host can dispatch calls into.
///
/// # Storage Invariant: Explicit Ledger Capability
///
/// A service holds no ledger handle of its own. Every call receives the ledger
/// as `&mut dyn StateAccess` from the host, which decides whether that is the
/// replica's ledger directly or a `StateOverlay` whose writes are committed
/// only if the call succeeds.
pub trait LedgerService: Any + Send + Sync {
    /// A unique, static, lowercase string identifier for the service.
    /// This is used for deterministic ordering and for dispatching calls.
    fn id(&self) -> &str;

    /// The version of the ABI the service exposes to the host.
    fn abi_version(&self) -> u32;

    /// A string identifying the schema of the state this service reads/writes.
    fn state_schema(&self) -> &str;

    /// Provides access to the concrete type for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns the intent of a method, or `None` if the service does not expose it.
    fn method_intent(&self, method: &str) -> Option<MethodIntent> {
        let _ = method;
        None
    }

    /// Handles a dispatched call and returns the method's JSON-encoded result.
    /// This is the primary entry point for all service logic.
    ///
    /// # Default Implementation
    /// The default implementation returns an `Unsupported` error. Services must override
    /// this method to expose callable functions.
    fn handle_service_call(
        &self,
        state: &mut dyn StateAccess,
        method: &str,
        params: &[u8],
    ) -> Result<Vec<u8>, TransactionError> {
        let _ = (state, params);
        Err(TransactionError::Unsupported(format!(
            "Service '{}' does not implement the handle_service_call capability or the method '{}'",
            self.id(),
            method
        )))
    }
}
