//! dl_io — league files, canonical JSON artifacts, and digests.
//!
//! - Shared error type (`IoError`) with `From` conversions used across modules.
//! - League store: JSON file load/save with structural validation.
//! - Canonical JSON: sorted object keys, compact, atomic file writes.
//! - Hashing: lowercase SHA-256 hex over raw or canonical bytes.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for dl_io (used by store/canonical_json/hasher).
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (create_dir_all, rename, fsync, etc.)
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON serialization/deserialization errors with an optional JSON Pointer.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Hashing / id-derivation errors.
    #[error("hash error: {0}")]
    Hash(String),

    /// Structural league-file validation failures.
    #[error("invalid league file: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

/* ---------------- From conversions (used by file modules) ---------------- */

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json doesn't keep a pointer; default to root. Callers may
        // enrich this at higher layers.
        IoError::Json {
            pointer: "/".to_string(),
            msg: e.to_string(),
        }
    }
}

impl From<dl_core::CoreError> for IoError {
    fn from(e: dl_core::CoreError) -> Self {
        IoError::Invalid(e.to_string())
    }
}

pub mod canonical_json;
pub mod hasher;
pub mod store;
