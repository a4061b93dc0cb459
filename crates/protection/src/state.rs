//! Protection flags and initialization options

use secure_protocol::InitArguments;
use serde::{Deserialize, Serialize};

/// Flags of one hosting surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectionState {
    pub screenshot_blocked: bool,
    pub record_blocked: bool,
}

impl ProtectionState {
    pub fn new(screenshot_blocked: bool, record_blocked: bool) -> Self {
        Self {
            screenshot_blocked,
            record_blocked,
        }
    }

    /// Neither protection is requested
    pub fn is_clear(&self) -> bool {
        !self.screenshot_blocked && !self.record_blocked
    }
}

/// Options for `initialize`. Both protections default to on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InitOptions {
    pub screenshot_block: bool,
    pub record_block: bool,
}

impl InitOptions {
    pub fn new(screenshot_block: bool, record_block: bool) -> Self {
        Self {
            screenshot_block,
            record_block,
        }
    }
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            screenshot_block: true,
            record_block: true,
        }
    }
}

impl From<InitArguments> for InitOptions {
    fn from(args: InitArguments) -> Self {
        Self {
            screenshot_block: args.screenshot_block_or_default(),
            record_block: args.record_block_or_default(),
        }
    }
}
