//! Error types
//!
//! None of these are fatal: callers either contain them (storage) or log them
//! and carry on with an empty collection (fetch).

use thiserror::Error;

/// Failure talking to the durable key/value store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No storage is reachable (no window, storage disabled).
    #[error("storage unavailable")]
    Unavailable,

    /// The backend refused the operation (private browsing, quota exceeded).
    #[error("storage access denied for `{key}`: {reason}")]
    Access { key: String, reason: String },

    /// The stored payload is not valid JSON for the requested type.
    #[error("corrupt entry `{key}`: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The value could not be encoded.
    #[error("failed to encode `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure retrieving a static JSON document.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request for {url} failed: {reason}")]
    Network { url: String, reason: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} is not a valid document: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A name that maps to none of the known variants (mood, section).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} `{name}`")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
