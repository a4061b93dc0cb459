//! Platform identity and security status payload

use serde::{Deserialize, Serialize};

use crate::{ProtocolError, ProtocolResult};

/// Platform family the protection runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Secure window flag, no capture detection
    Android,
    /// Secure overlay plus capture-change notifications
    Ios,
    /// Window display affinity, no capture detection
    Windows,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Windows => "windows",
        }
    }

    /// Platform family of the compilation target, if it has one
    pub fn native() -> Option<Self> {
        if cfg!(target_os = "android") {
            Some(Platform::Android)
        } else if cfg!(target_os = "ios") {
            Some(Platform::Ios)
        } else if cfg!(target_os = "windows") {
            Some(Platform::Windows)
        } else {
            None
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = ProtocolError;

    fn from_str(s: &str) -> ProtocolResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "android" => Ok(Platform::Android),
            "ios" => Ok(Platform::Ios),
            "windows" => Ok(Platform::Windows),
            other => Err(ProtocolError::UnknownPlatform(other.to_string())),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot returned by `getSecurityStatus`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityStatus {
    pub screenshot_blocked: bool,
    pub record_blocked: bool,
    pub platform: Platform,
    /// Only reported by platforms that can detect capture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_currently_recording: Option<bool>,
}
