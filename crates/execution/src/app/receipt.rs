// Path: crates/execution/src/app/receipt.rs

use mno_api::state::{StateDeletes, StateInserts};
use mno_types::codec;
use mno_types::error::TransactionError;
use sha2::{Digest, Sha256};

/// The outcome of one executed service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReceipt {
    /// The method's JSON-encoded result.
    pub output: Vec<u8>,
    /// Committed inserts, in ascending key order.
    pub inserts: StateInserts,
    /// Committed deletes, in ascending key order.
    pub deletes: StateDeletes,
    /// SHA-256 of the SCALE-encoded `(inserts, deletes)`.
    pub write_set_digest: [u8; 32],
}

impl ExecutionReceipt {
    pub(crate) fn new(
        output: Vec<u8>,
        inserts: StateInserts,
        deletes: StateDeletes,
    ) -> Result<Self, TransactionError> {
        let write_set_digest = write_set_digest(&inserts, &deletes)?;
        Ok(Self {
            output,
            inserts,
            deletes,
            write_set_digest,
        })
    }

    /// True if the call committed no writes.
    pub fn is_read_only(&self) -> bool {
        self.inserts.is_empty() && self.deletes.is_empty()
    }

    /// The write-set digest as lowercase hex.
    pub fn digest_hex(&self) -> String {
        hex::encode(self.write_set_digest)
    }
}

/// Hashes an ordered write set. Replicas that commit the same writes agree on
/// this value byte for byte.
pub fn write_set_digest(
    inserts: &StateInserts,
    deletes: &StateDeletes,
) -> Result<[u8; 32], TransactionError> {
    let bytes = codec::to_bytes_canonical(&(inserts, deletes))
        .map_err(TransactionError::Serialization)?;
    Ok(Sha256::digest(&bytes).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_write_set_has_a_fixed_digest() {
        let receipt = ExecutionReceipt::new(b"true".to_vec(), vec![], vec![]).unwrap();
        assert!(receipt.is_read_only());
        // SCALE encodes two empty vectors as two zero-length prefixes.
        assert_eq!(
            receipt.write_set_digest,
            <[u8; 32]>::from(Sha256::digest([0u8, 0u8]))
        );
    }

    #[test]
    fn digest_distinguishes_inserts_from_deletes() {
        let as_insert = write_set_digest(&vec![(b"k".to_vec(), vec![])], &vec![]).unwrap();
        let as_delete = write_set_digest(&vec![], &vec![b"k".to_vec()]).unwrap();
        assert_ne!(as_insert, as_delete);
        assert_eq!(hex::encode(as_insert).len(), 64);
    }
}
