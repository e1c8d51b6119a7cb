//! Error types for track reward evaluation

use thiserror::Error;

/// Result type for track reward operations
pub type Result<T> = std::result::Result<T, RewardError>;

/// Track reward error types
#[derive(Debug, Error)]
pub enum RewardError {
    /// Snapshot failed validation
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Configuration constant out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Config or snapshot file could not be read
    #[error("IO error: {0}")]
    Io(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RewardError {
    fn from(err: serde_json::Error) -> Self {
        RewardError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for RewardError {
    fn from(err: std::io::Error) -> Self {
        RewardError::Io(err.to_string())
    }
}

/// JSON-RPC error codes for the reward server
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INVALID_SNAPSHOT: i32 = -32000;
}
