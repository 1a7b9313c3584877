//! Error types for rso-status.

use thiserror::Error;

/// Default result type for rso-status.
pub type RsoResult<T> = Result<T, RsoError>;

/// Errors that can surface from rso-status.
///
/// The evaluator and the status cache never return these on their read and
/// write paths; they degrade to defaults instead. Errors come from
/// configuration, membership sources and explicit storage maintenance.
#[derive(Error, Debug)]
pub enum RsoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Membership source failed for RSO {0}: {1}")]
    Source(u64, String),

    #[error("Invalid RSO status '{0}' (expected ACTIVE or INACTIVE)")]
    InvalidStatus(String),

    #[error("{0}")]
    Other(String),
}

impl RsoError {
    /// Creates a generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Self::Storage(msg.into())
    }
}
