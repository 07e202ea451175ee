//! Error types for the Traitlens feedback pipeline
//!
//! This module provides structured error definitions using thiserror, with a
//! conversion from anyhow for callers that propagate ad-hoc context.

use thiserror::Error;

/// Main error type for Traitlens operations
#[derive(Error, Debug)]
pub enum TraitlensError {
    /// Vector index (sqlite-vec) operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Embedding generation failed
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Vector index returned or rejected data
    #[error("Index error: {0}")]
    Index(String),

    /// Invalid cluster ID format
    #[error("Invalid cluster ID: {0}")]
    InvalidClusterId(#[from] uuid::Error),

    /// Vote outside of {-1, 0, 1}
    #[error("Invalid vote: {0} (expected -1, 0 or 1)")]
    InvalidVote(i64),

    /// Input rejected before processing
    #[error("Validation error: {0}")]
    Validation(String),

    /// Synonym table update would rewrite an existing mapping
    #[error("Synonym conflict: '{key}' already maps to '{existing}', refusing '{proposed}'")]
    SynonymConflict {
        key: String,
        existing: String,
        proposed: String,
    },

    /// A collaborator call exceeded its deadline
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// TOML data could not be parsed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for Traitlens operations
pub type Result<T> = std::result::Result<T, TraitlensError>;

/// Convert anyhow::Error to TraitlensError
impl From<anyhow::Error> for TraitlensError {
    fn from(err: anyhow::Error) -> Self {
        TraitlensError::Other(err.to_string())
    }
}
