// Path: crates/types/src/keys/mod.rs
//! Defines the ledger key layout for MNO records.
//!
//! An MNO record is stored under the raw UTF-8 bytes of its id, with no prefix
//! and no secondary index. The ledger's lexicographic key order is therefore
//! the id byte order, which is what a full scan yields.

/// Lower bound of a range scan that starts at the beginning of the keyspace.
pub const KEYSPACE_START: &[u8] = b"";

/// Upper bound of a range scan that runs to the end of the keyspace.
pub const KEYSPACE_END: &[u8] = b"";

/// Returns the ledger key for the record with the given id.
#[inline]
pub fn mno_key(mno_id: &str) -> &[u8] {
    mno_id.as_bytes()
}
