//! crates/ta_io/src/lib.rs
//! Input side of the engine: preference file formats, bounded file loading,
//! canonical JSON output, and SHA-256 digests.
//!
//! - `text`: the line-oriented format (topics, blank line, participant blocks)
//! - `tabular`: delimited rows (name, ranked topics…)
//! - `loader`: read a local file with limits, pick a format, parse
//! - `canonical_json` / `hasher`: stable bytes and digests for run artifacts

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for ta_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (open, read, create_dir_all, rename, …)
    #[error("io/path error: {0}")]
    Path(String),

    /// Input exceeds a configured limit.
    #[error("limit exceeded: {0}")]
    Limit(String),

    /// Input is not UTF-8.
    #[error("input is not valid UTF-8: {0}")]
    Encoding(String),

    /// Line-oriented format errors.
    #[error(transparent)]
    Ingest(#[from] text::IngestError),

    /// Tabular format errors.
    #[error(transparent)]
    Tabular(#[from] tabular::TabularError),

    /// JSON serialization errors.
    #[error("json error: {0}")]
    Json(String),

    /// Hashing-related errors (e.g., feature disabled).
    #[error("hash error: {0}")]
    Hash(String),
}

pub type IoResult<T> = Result<T, IoError>;

/* ---------------- From conversions (used by file modules) ---------------- */

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Json(e.to_string())
    }
}

pub mod text;
pub mod tabular;
pub mod loader;
#[cfg(feature = "serde")]
pub mod canonical_json;
#[cfg(feature = "hash")]
pub mod hasher;

/// Compute SHA-256 hex of `bytes` or return an error when hashing is unavailable.
pub fn try_sha256_hex(bytes: &[u8]) -> Result<String, IoError> {
    #[cfg(feature = "hash")]
    {
        Ok(crate::hasher::sha256_hex(bytes))
    }
    #[cfg(not(feature = "hash"))]
    {
        let _ = bytes;
        Err(IoError::Hash("hash feature disabled".into()))
    }
}

/// Lightweight re-exports so downstream crates can do `use ta_io::prelude::*;`.
pub mod prelude {
    pub use crate::{try_sha256_hex, IoError, IoResult};

    pub use crate::loader::{load_preferences, InputFormat, LoadedInput};
    pub use crate::tabular::{parse_tabular, TabularError};
    pub use crate::text::{parse_text, IngestError, Ingested, Notice, NoticeKind};

    #[cfg(feature = "serde")]
    pub use crate::canonical_json::{to_canonical_json_bytes, write_canonical_file};
    #[cfg(feature = "hash")]
    pub use crate::hasher::sha256_hex;
}
