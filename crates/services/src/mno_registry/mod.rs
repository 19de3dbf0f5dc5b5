// Path: crates/services/src/mno_registry/mod.rs
//! The MNO registry: create, read, update, delete and list operator records
//! stored one per key on the ledger.
//!
//! Every operation takes the ledger as an explicit `StateAccess` capability.
//! Nothing here touches wall clocks, randomness or unordered iteration, so
//! replicas running the same calls against the same ledger produce the same
//! bytes.

use mno_api::services::{LedgerService, MethodIntent, MethodTable};
use mno_api::state::StateAccess;
use mno_types::app::Mno;
use mno_types::codec;
use mno_types::config::RegistryConfig;
use mno_types::error::{RegistryError, ServiceError, TransactionError};
use mno_types::keys::{mno_key, KEYSPACE_END, KEYSPACE_START};
use mno_types::prelude::OptionExt;
use serde::{Deserialize, Serialize};
use std::any::Any;

#[cfg(test)]
mod tests;

/// Versioned method names exposed by the registry.
pub mod methods {
    /// Creates the configured bootstrap records.
    pub const SEED: &str = "seed@v1";
    /// Creates one record.
    pub const CREATE: &str = "create@v1";
    /// Reads one record.
    pub const READ: &str = "read@v1";
    /// Replaces one record.
    pub const UPDATE: &str = "update@v1";
    /// Removes one record.
    pub const DELETE: &str = "delete@v1";
    /// Reports whether a record exists.
    pub const EXISTS: &str = "exists@v1";
    /// Lists every record in id order.
    pub const LIST_ALL: &str = "listAll@v1";
}

// --- Service Method Parameter Structs (The Service's Public ABI) ---

/// Arguments of `create@v1` and `update@v1`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MnoParams {
    #[serde(rename = "mnoId")]
    pub mno_id: String,
    #[serde(rename = "mnoName")]
    pub mno_name: String,
    pub endpoint: String,
}

/// Arguments of `read@v1`, `delete@v1` and `exists@v1`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MnoIdParams {
    #[serde(rename = "mnoId")]
    pub mno_id: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NoParams {}

/// The MNO record store, exposed as a ledger service.
pub struct MnoRegistryService {
    config: RegistryConfig,
    methods: MethodTable<Self>,
}

impl MnoRegistryService {
    /// Builds the service and validates its method table.
    pub fn new(config: RegistryConfig) -> Result<Self, ServiceError> {
        let methods = MethodTable::builder(config.service_id.clone())
            .method(methods::SEED, MethodIntent::Submit, Self::handle_seed)
            .method(methods::CREATE, MethodIntent::Submit, Self::handle_create)
            .method(methods::READ, MethodIntent::Evaluate, Self::handle_read)
            .method(methods::UPDATE, MethodIntent::Submit, Self::handle_update)
            .method(methods::DELETE, MethodIntent::Submit, Self::handle_delete)
            .method(methods::EXISTS, MethodIntent::Evaluate, Self::handle_exists)
            .method(methods::LIST_ALL, MethodIntent::Evaluate, Self::handle_list_all)
            .build()?;
        Ok(Self { config, methods })
    }

    /// The configuration the service was built with.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The registered method names, in ascending order.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.method_names()
    }

    // --- Record store operations ---

    /// Creates every configured bootstrap record, in configuration order.
    ///
    /// Stops at the first id that already exists. Writes made before that
    /// point are only discarded if the caller runs this inside an overlay.
    pub fn seed(&self, state: &mut dyn StateAccess) -> Result<(), RegistryError> {
        for record in &self.config.seed {
            self.create(state, &record.mno_id, &record.mno_name, &record.endpoint)?;
        }
        tracing::info!(
            target: "mno_registry",
            count = self.config.seed.len(),
            "seeded bootstrap records"
        );
        Ok(())
    }

    /// Creates a record. Fails with `AlreadyExists` if the id is taken.
    pub fn create(
        &self,
        state: &mut dyn StateAccess,
        mno_id: &str,
        mno_name: &str,
        endpoint: &str,
    ) -> Result<Mno, RegistryError> {
        if self.exists(&*state, mno_id)? {
            let err = RegistryError::AlreadyExists(mno_id.to_string());
            tracing::warn!(target: "mno_registry", error = %err, "create rejected");
            return Err(err);
        }
        let mno = Mno::new(mno_id, mno_name, endpoint)?;
        state.insert(mno_key(mno.id()), &mno.to_canonical_bytes()?)?;
        tracing::info!(target: "mno_registry", mno_id, "created record");
        Ok(mno)
    }

    /// Reads a record. An empty stored value counts as absent.
    pub fn read(&self, state: &dyn StateAccess, mno_id: &str) -> Result<Mno, RegistryError> {
        let bytes = state
            .get(mno_key(mno_id))?
            .filter(|v| !v.is_empty())
            .required(|| RegistryError::NotFound(mno_id.to_string()))?;
        tracing::debug!(target: "mno_registry", mno_id, "read record");
        decode_stored(mno_key(mno_id), &bytes)
    }

    /// Replaces a record wholesale. Fails with `NotFound` if it is absent.
    pub fn update(
        &self,
        state: &mut dyn StateAccess,
        mno_id: &str,
        mno_name: &str,
        endpoint: &str,
    ) -> Result<Mno, RegistryError> {
        self.require_existing(&*state, mno_id, "update")?;
        let mno = Mno::new(mno_id, mno_name, endpoint)?;
        state.insert(mno_key(mno.id()), &mno.to_canonical_bytes()?)?;
        tracing::info!(target: "mno_registry", mno_id, "updated record");
        Ok(mno)
    }

    /// Removes a record. Fails with `NotFound` if it is absent.
    pub fn delete(&self, state: &mut dyn StateAccess, mno_id: &str) -> Result<(), RegistryError> {
        self.require_existing(&*state, mno_id, "delete")?;
        state.delete(mno_key(mno_id))?;
        tracing::info!(target: "mno_registry", mno_id, "deleted record");
        Ok(())
    }

    /// True iff the ledger holds a non-empty value under `mno_id`.
    pub fn exists(&self, state: &dyn StateAccess, mno_id: &str) -> Result<bool, RegistryError> {
        Ok(state
            .get(mno_key(mno_id))?
            .is_some_and(|v| !v.is_empty()))
    }

    /// Returns every record in ascending id byte order.
    ///
    /// The first undecodable value aborts the listing. The scan iterator is
    /// owned by this frame, so it is released on every return path.
    pub fn list_all(&self, state: &dyn StateAccess) -> Result<Vec<Mno>, RegistryError> {
        let mut records = Vec::new();
        for item in state.range_scan(KEYSPACE_START, KEYSPACE_END)? {
            let (key, value) = item?;
            if value.is_empty() {
                continue;
            }
            let mno = decode_stored(&key, &value).map_err(|e| {
                tracing::warn!(
                    target: "mno_registry",
                    key = %String::from_utf8_lossy(&key),
                    error = %e,
                    "undecodable record aborted listing"
                );
                e
            })?;
            records.push(mno);
        }
        tracing::debug!(target: "mno_registry", count = records.len(), "listed records");
        Ok(records)
    }

    fn require_existing(
        &self,
        state: &dyn StateAccess,
        mno_id: &str,
        op: &str,
    ) -> Result<(), RegistryError> {
        if self.exists(state, mno_id)? {
            return Ok(());
        }
        let err = RegistryError::NotFound(mno_id.to_string());
        tracing::warn!(target: "mno_registry", error = %err, "{} rejected", op);
        Err(err)
    }

    // --- Method handlers ---

    fn handle_seed(
        &self,
        state: &mut dyn StateAccess,
        params: &[u8],
    ) -> Result<Vec<u8>, TransactionError> {
        if !params.is_empty() {
            let _: NoParams = serde_json::from_slice(params)?;
        }
        self.seed(state)?;
        Ok(Vec::new())
    }

    fn handle_create(
        &self,
        state: &mut dyn StateAccess,
        params: &[u8],
    ) -> Result<Vec<u8>, TransactionError> {
        let p: MnoParams = serde_json::from_slice(params)?;
        let mno = self.create(state, &p.mno_id, &p.mno_name, &p.endpoint)?;
        encode_result(&mno)
    }

    fn handle_read(
        &self,
        state: &mut dyn StateAccess,
        params: &[u8],
    ) -> Result<Vec<u8>, TransactionError> {
        let p: MnoIdParams = serde_json::from_slice(params)?;
        encode_result(&self.read(&*state, &p.mno_id)?)
    }

    fn handle_update(
        &self,
        state: &mut dyn StateAccess,
        params: &[u8],
    ) -> Result<Vec<u8>, TransactionError> {
        let p: MnoParams = serde_json::from_slice(params)?;
        let mno = self.update(state, &p.mno_id, &p.mno_name, &p.endpoint)?;
        encode_result(&mno)
    }

    fn handle_delete(
        &self,
        state: &mut dyn StateAccess,
        params: &[u8],
    ) -> Result<Vec<u8>, TransactionError> {
        let p: MnoIdParams = serde_json::from_slice(params)?;
        self.delete(state, &p.mno_id)?;
        Ok(Vec::new())
    }

    fn handle_exists(
        &self,
        state: &mut dyn StateAccess,
        params: &[u8],
    ) -> Result<Vec<u8>, TransactionError> {
        let p: MnoIdParams = serde_json::from_slice(params)?;
        encode_result(&self.exists(&*state, &p.mno_id)?)
    }

    fn handle_list_all(
        &self,
        state: &mut dyn StateAccess,
        params: &[u8],
    ) -> Result<Vec<u8>, TransactionError> {
        if !params.is_empty() {
            let _: NoParams = serde_json::from_slice(params)?;
        }
        encode_result(&self.list_all(&*state)?)
    }
}

/// Decodes the value stored under `key`. The record's id must be the key.
fn decode_stored(key: &[u8], value: &[u8]) -> Result<Mno, RegistryError> {
    let mno = Mno::from_canonical_bytes(value)?;
    if mno_key(mno.id()) != key {
        return Err(RegistryError::Decode(format!(
            "record {} is stored under key {}",
            mno.id(),
            String::from_utf8_lossy(key)
        )));
    }
    Ok(mno)
}

fn encode_result<T: Serialize>(value: &T) -> Result<Vec<u8>, TransactionError> {
    codec::to_json_canonical(value).map_err(TransactionError::Serialization)
}

impl LedgerService for MnoRegistryService {
    fn id(&self) -> &str {
        &self.config.service_id
    }

    fn abi_version(&self) -> u32 {
        1
    }

    fn state_schema(&self) -> &str {
        "v1"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn method_intent(&self, method: &str) -> Option<MethodIntent> {
        self.methods.intent(method)
    }

    fn handle_service_call(
        &self,
        state: &mut dyn StateAccess,
        method: &str,
        params: &[u8],
    ) -> Result<Vec<u8>, TransactionError> {
        self.methods.dispatch(self, state, method, params)
    }
}
