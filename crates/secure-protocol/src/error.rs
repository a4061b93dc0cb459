//! Error types for the protocol

use thiserror::Error;

/// Stable error codes reported to the embedding application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// `init` failed to engage a requested protection
    InitError,
    /// An enable command failed
    EnableError,
    /// A disable command failed
    DisableError,
    /// The call carried arguments that could not be decoded
    InvalidArguments,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InitError => "INIT_ERROR",
            ErrorCode::EnableError => "ENABLE_ERROR",
            ErrorCode::DisableError => "DISABLE_ERROR",
            ErrorCode::InvalidArguments => "INVALID_ARGUMENTS",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Protocol error
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid arguments for {method}: {reason}")]
    InvalidArguments { method: &'static str, reason: String },

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),
}

/// Result type alias for protocol operations
pub type ProtocolResult<T> = Result<T, ProtocolError>;
