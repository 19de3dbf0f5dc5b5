// Path: crates/types/src/app/mod.rs
//! Core application-level data structures.

use serde::{Deserialize, Serialize};

mod mno;
pub use mno::Mno;

/// A request to invoke one named method of one ledger service.
///
/// This is the payload an external transaction envelope carries once it has
/// been authenticated and ordered; the envelope itself is not modelled here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServiceCall {
    /// The id of the target service (e.g. `mno_registry`).
    pub service_id: String,
    /// The versioned method name (e.g. `create@v1`).
    pub method: String,
    /// The JSON-encoded method arguments.
    pub params: Vec<u8>,
}

impl ServiceCall {
    /// Creates a call with raw parameter bytes.
    pub fn new(
        service_id: impl Into<String>,
        method: impl Into<String>,
        params: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            service_id: service_id.into(),
            method: method.into(),
            params: params.into(),
        }
    }
}
