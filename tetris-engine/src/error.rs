/// Error types for the tetris-engine library
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur outside of game transitions (which never fail)
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration rejected by validation
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Snapshot that breaks a game invariant
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
