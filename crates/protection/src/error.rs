//! Protection error types

use secure_protocol::ErrorCode;
use thiserror::Error;

use crate::Protection;

/// Failure reported by a platform effector
#[derive(Debug, Error)]
pub enum EffectorError {
    #[error("No active display surface")]
    NoSurface,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Platform not supported")]
    UnsupportedPlatform,

    #[error("Platform error: {0}")]
    Platform(String),
}

pub type EffectorResult<T> = Result<T, EffectorError>;

/// Failure of a state machine operation. Every variant originates in the
/// effector; the state machine never synthesizes errors of its own.
#[derive(Debug, Error)]
pub enum ProtectionError {
    #[error("Failed to initialize screen security: {source}")]
    InitializationFailure {
        #[source]
        source: EffectorError,
    },

    #[error("Failed to enable {protection} block: {source}")]
    EnableFailure {
        protection: Protection,
        #[source]
        source: EffectorError,
    },

    #[error("Failed to disable {protection} block: {source}")]
    DisableFailure {
        protection: Protection,
        #[source]
        source: EffectorError,
    },
}

impl ProtectionError {
    /// Stable code surfaced to the embedding application
    pub fn code(&self) -> ErrorCode {
        match self {
            ProtectionError::InitializationFailure { .. } => ErrorCode::InitError,
            ProtectionError::EnableFailure { .. } => ErrorCode::EnableError,
            ProtectionError::DisableFailure { .. } => ErrorCode::DisableError,
        }
    }

    /// Human-readable message without the effector detail
    pub fn message(&self) -> String {
        match self {
            ProtectionError::InitializationFailure { .. } => {
                "Failed to initialize screen security".to_string()
            }
            ProtectionError::EnableFailure { protection, .. } => {
                format!("Failed to enable {} block", protection)
            }
            ProtectionError::DisableFailure { protection, .. } => {
                format!("Failed to disable {} block", protection)
            }
        }
    }

    /// The effector failure that caused this error
    pub fn effector_error(&self) -> &EffectorError {
        match self {
            ProtectionError::InitializationFailure { source }
            | ProtectionError::EnableFailure { source, .. }
            | ProtectionError::DisableFailure { source, .. } => source,
        }
    }
}

pub type ProtectionResult<T> = Result<T, ProtectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_and_messages() {
        let err = ProtectionError::EnableFailure {
            protection: Protection::Screenshot,
            source: EffectorError::NoSurface,
        };
        assert_eq!(err.code(), ErrorCode::EnableError);
        assert_eq!(err.message(), "Failed to enable screenshot block");
        assert_eq!(
            err.to_string(),
            "Failed to enable screenshot block: No active display surface"
        );

        let err = ProtectionError::DisableFailure {
            protection: Protection::Recording,
            source: EffectorError::PermissionDenied("secure flag locked".to_string()),
        };
        assert_eq!(err.code().as_str(), "DISABLE_ERROR");
        assert_eq!(err.message(), "Failed to disable screen record block");
        assert!(matches!(err.effector_error(), EffectorError::PermissionDenied(_)));

        let err = ProtectionError::InitializationFailure {
            source: EffectorError::UnsupportedPlatform,
        };
        assert_eq!(err.code(), ErrorCode::InitError);
        assert_eq!(err.message(), "Failed to initialize screen security");
    }
}
