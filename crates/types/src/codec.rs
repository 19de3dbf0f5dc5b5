// crates/types/src/codec.rs

//! Defines the canonical, deterministic codecs for all consensus-critical data.
//!
//! Two encodings live here and nowhere else:
//!
//! * **Canonical JSON** (RFC 8785 / JCS, via `serde_jcs`) for ledger values and
//!   operation results. Object keys are emitted sorted by code point, with no
//!   insignificant whitespace, so the same field values always produce the same
//!   bytes regardless of struct declaration order or map iteration order.
//! * **SCALE** (via `parity-scale-codec`) for binary structures that are hashed
//!   or persisted, such as a transaction's ordered write set.
//!
//! Centralizing both here means every replica uses the exact same byte
//! representation for the same data.

use crate::MAX_STATE_VALUE_BYTES;
use parity_scale_codec::{Decode, DecodeAll, Encode};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encodes a value into its canonical JSON byte representation.
///
/// The output is a pure function of the value: keys are sorted and no
/// whitespace is emitted. Failure is only possible for values that cannot be
/// represented in JSON at all (e.g. maps with non-string keys).
pub fn to_json_canonical<T: Serialize>(v: &T) -> Result<Vec<u8>, String> {
    serde_jcs::to_vec(v).map_err(|e| format!("canonical encode failed: {}", e))
}

/// Decodes a value from canonical JSON bytes.
///
/// Empty input and input larger than [`MAX_STATE_VALUE_BYTES`] are rejected
/// before parsing. Trailing data after the JSON value is an error.
pub fn from_json_canonical<T: DeserializeOwned>(b: &[u8]) -> Result<T, String> {
    if b.is_empty() {
        return Err("canonical decode failed: empty input".to_string());
    }
    if b.len() > MAX_STATE_VALUE_BYTES {
        return Err(format!(
            "canonical decode failed: value of {} bytes exceeds limit of {}",
            b.len(),
            MAX_STATE_VALUE_BYTES
        ));
    }
    serde_json::from_slice(b).map_err(|e| format!("canonical decode failed: {}", e))
}

/// Encodes a value into a deterministic, canonical byte representation using SCALE codec.
///
/// This function should be used for all binary data that is hashed for
/// cross-replica agreement or persisted as a ledger snapshot.
pub fn to_bytes_canonical<T: Encode>(v: &T) -> Result<Vec<u8>, String> {
    Ok(v.encode())
}

/// Decodes a value from a canonical byte representation using SCALE codec.
///
/// This function fails fast on any decoding error, including trailing bytes.
pub fn from_bytes_canonical<T: Decode>(b: &[u8]) -> Result<T, String> {
    T::decode_all(&mut &*b).map_err(|e| format!("canonical decode failed: {}", e))
}
