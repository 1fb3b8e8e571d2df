//! Error types for the version scanner
//!
//! Library code returns [`ScanError`]; the binary wraps it in `anyhow`
//! for context at the I/O edges.

use thiserror::Error;

use crate::version::VersionCode;

/// Main error type for scanning and tree construction
#[derive(Error, Debug)]
pub enum ScanError {
    /// Two records claim the same version code. The tree cannot represent
    /// this, so the whole run is aborted.
    #[error("Version {code} already in tree: '{incoming}' collides with '{existing}'")]
    DuplicateVersion {
        code: VersionCode,
        existing: String,
        incoming: String,
    },

    #[error("Invalid version code '{0}'")]
    InvalidCode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
