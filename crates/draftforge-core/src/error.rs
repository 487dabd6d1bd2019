//! Error types for DraftForge

use thiserror::Error;

/// Main error type for DraftForge operations
#[derive(Debug, Error)]
pub enum DraftForgeError {
    /// A single input record could not be decoded
    #[error("Malformed record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    /// Two input records collapsed onto the same player id
    #[error("Duplicate player identity: {0}")]
    DuplicateIdentity(String),

    /// Roster rules that no lineup can satisfy by construction
    #[error("Invalid roster rules: {0}")]
    InvalidRoster(String),

    /// A data provider failed to deliver its records
    #[error("Data provider error: {0}")]
    Provider(String),

    /// The lineup model could not be formulated
    #[error("Model error: {0}")]
    Model(String),

    /// Error in contest configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The draftable feed document is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for DraftForge operations
pub type Result<T> = std::result::Result<T, DraftForgeError>;
