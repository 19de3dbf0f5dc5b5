// Path: crates/types/src/app/mno.rs
//! The `Mno` record: one mobile network operator as stored on the ledger.

use crate::codec;
use crate::error::RegistryError;
use crate::MAX_STATE_VALUE_BYTES;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An immutable record describing one mobile network operator.
///
/// The id doubles as the ledger key. Equality and hashing cover all three
/// fields, and the canonical encoding is a pure function of them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(deny_unknown_fields)]
pub struct Mno {
    #[serde(rename = "mnoId")]
    mno_id: String,
    #[serde(rename = "mnoName")]
    mno_name: String,
    endpoint: String,
}

impl Mno {
    /// Builds a record, rejecting an empty id.
    pub fn new(
        mno_id: impl Into<String>,
        mno_name: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Result<Self, RegistryError> {
        let mno = Self {
            mno_id: mno_id.into(),
            mno_name: mno_name.into(),
            endpoint: endpoint.into(),
        };
        mno.validate()?;
        Ok(mno)
    }

    /// The unique id, also used as the ledger key.
    pub fn id(&self) -> &str {
        &self.mno_id
    }

    /// The operator's display name.
    pub fn name(&self) -> &str {
        &self.mno_name
    }

    /// The operator's API endpoint URI.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Encodes the record into its canonical ledger representation.
    ///
    /// The bytes are the JCS form of `{"endpoint","mnoId","mnoName"}`, in that
    /// key order, and are identical on every replica for identical fields.
    ///
    /// Records whose encoding exceeds [`MAX_STATE_VALUE_BYTES`] are rejected
    /// with `InvalidRecord`, since they could never be decoded again.
    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>, RegistryError> {
        let bytes = codec::to_json_canonical(self).map_err(RegistryError::Encode)?;
        if bytes.len() > MAX_STATE_VALUE_BYTES {
            return Err(RegistryError::InvalidRecord(format!(
                "encoded record is {} bytes, limit is {}",
                bytes.len(),
                MAX_STATE_VALUE_BYTES
            )));
        }
        Ok(bytes)
    }

    /// Decodes a record from its canonical ledger representation.
    pub fn from_canonical_bytes(bytes: &[u8]) -> Result<Self, RegistryError> {
        let mno: Mno = codec::from_json_canonical(bytes).map_err(RegistryError::Decode)?;
        mno.validate()
            .map_err(|e| RegistryError::Decode(e.to_string()))?;
        Ok(mno)
    }

    fn validate(&self) -> Result<(), RegistryError> {
        if self.mno_id.is_empty() {
            return Err(RegistryError::InvalidRecord("mnoId must not be empty".into()));
        }
        Ok(())
    }
}

impl fmt::Display for Mno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mno [mnoId={}, mnoName={}, endpoint={}]",
            self.mno_id, self.mno_name, self.endpoint
        )
    }
}
