//! Deterministic hashing and id derivation for canonical artifacts.
//!
//! - Canonical JSON hashing: sorted object keys, array order preserved.
//! - Hex digests are lowercase.
//! - `RUN:` ids derive from the run timestamp plus the hash of the canonical
//!   run bytes.

use serde::Serialize;
use sha2::{Digest, Sha256};

use dl_core::ids::{validate_utc_timestamp, RunId, Sha256Hex};

use crate::canonical_json::to_canonical_bytes;
use crate::{IoError, IoResult};

/// SHA-256 over raw bytes, as lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// SHA-256 over the canonical JSON bytes of any serializable value.
pub fn sha256_canonical<T: Serialize>(value: &T) -> IoResult<Sha256Hex> {
    let bytes = to_canonical_bytes(value)?;
    sha256_hex(&bytes)
        .parse::<Sha256Hex>()
        .map_err(|e| IoError::Hash(e.to_string()))
}

/// `RUN:<timestamp>-<hex64>` — id for a run record, derived from the strict
/// UTC timestamp and the canonical bytes of the record payload (without id).
pub fn run_id_from_bytes(timestamp_utc: &str, canonical: &[u8]) -> IoResult<RunId> {
    validate_utc_timestamp(timestamp_utc).map_err(|e| IoError::Hash(e.to_string()))?;
    let digest = sha256_hex(canonical);
    format!("RUN:{timestamp_utc}-{digest}")
        .parse::<RunId>()
        .map_err(|e| IoError::Hash(e.to_string()))
}

/// Convenience: build a `RUN:` id from a serializable payload
/// (canonicalized internally).
pub fn run_id_from_canonical<T: Serialize>(timestamp_utc: &str, value: &T) -> IoResult<RunId> {
    let bytes = to_canonical_bytes(value)?;
    run_id_from_bytes(timestamp_utc, &bytes)
}
