//! Error type shared by the data source and configuration layers.
//!
//! The collection controller itself never fails: out-of-range pages are
//! clamped and unknown filter or sort keys fall back to their defaults. Errors
//! only come from the edges of the crate, where collections are fetched and
//! decoded or where configuration is read from disk.

use crate::session::Role;
use crate::source::CollectionKind;
use thiserror::Error;

/// Errors produced while loading collections or configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// The transport supplied by the application failed to deliver a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered, but the payload is not a collection of the expected records.
    #[error("failed to decode {kind} payload: {source}")]
    Decode {
        /// The collection that was being decoded.
        kind: CollectionKind,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The session's role has no endpoint for the requested collection.
    #[error("{role} has no access to {kind}")]
    Forbidden {
        /// Role of the current session.
        role: Role,
        /// The collection that was requested.
        kind: CollectionKind,
    },

    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file is not valid TOML for [`crate::config::Config`].
    #[error("TOML deserialization error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
