//! Configuration error definitions.
//!
//! Two tiers: `Io` and `Decode` are startup-fatal (the binary prints a
//! hint and exits, since a missing or malformed file will not resolve
//! itself). The remaining variants are returned to callers, which decide
//! how to react.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving the server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be opened or read.
    #[error("cannot read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file did not decode as the expected JSON shape.
    #[error("could not decode configuration: {0}")]
    Decode(#[from] serde_json::Error),

    /// More than one database backend has a host configured.
    #[error("ambiguous database configuration: {} are all configured", .0.join(", "))]
    AmbiguousBackends(Vec<&'static str>),

    /// No database backend has a host configured.
    #[error("database configuration not found")]
    BackendNotFound,

    /// Connection string requested for a driver this build cannot serve.
    #[error("unsupported database driver: {0}")]
    UnsupportedDriver(&'static str),

    /// A cookie secret is not valid base64 (strict secret policy only).
    #[error("cookie secret `{field}` is not valid base64")]
    MalformedSecret { field: &'static str },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
