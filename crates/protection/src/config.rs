//! Coupling policy and protection configuration

use std::collections::HashMap;

use secure_protocol::Platform;
use serde::{Deserialize, Serialize};

use crate::{Capabilities, InitOptions};

/// How screenshot-disable interacts with an active record block.
///
/// On a shared-mechanism platform the screenshot mechanism also carries the
/// recording protection, so turning screenshots off must not pull the
/// mechanism out from under the record block. Record-disable never releases
/// a mechanism the screenshot block still needs; that rule is not
/// configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CouplingPolicy {
    /// Skip the screenshot disengage while record-block is active
    pub hold_screenshot_while_recording: bool,
}

impl CouplingPolicy {
    /// Screenshot disable always reaches the effector
    pub const INDEPENDENT: Self = Self {
        hold_screenshot_while_recording: false,
    };

    /// One mechanism serves both protections
    pub const SHARED: Self = Self {
        hold_screenshot_while_recording: true,
    };

    pub fn for_capabilities(capabilities: Capabilities) -> Self {
        if capabilities.shared_mechanism {
            Self::SHARED
        } else {
            Self::INDEPENDENT
        }
    }
}

/// Protection configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProtectionConfig {
    /// Per-platform coupling overrides. Platforms without an entry use the
    /// policy derived from the effector's capabilities.
    pub coupling: HashMap<Platform, CouplingPolicy>,
    /// Run `initialize` with these options as soon as the host starts
    pub auto_init: Option<InitOptions>,
}

impl ProtectionConfig {
    /// Coupling policy for an effector on the given platform
    pub fn coupling_for(&self, platform: Platform, capabilities: Capabilities) -> CouplingPolicy {
        self.coupling
            .get(&platform)
            .copied()
            .unwrap_or_else(|| CouplingPolicy::for_capabilities(capabilities))
    }
}
