//! Bridge configuration: command line plus optional JSON config file

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use protection::ProtectionConfig;
use secure_protocol::Platform;
use serde::{Deserialize, Serialize};

/// Default tracing directives when neither `--log-filter` nor `RUST_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "secure_bridge=info,protection=info,effectors=info";

/// Screen Secure method channel bridge over stdio
#[derive(Debug, Parser)]
#[command(name = "secure-bridge", version)]
pub struct Cli {
    /// Platform profile to drive (android, ios, windows)
    #[arg(long, env = "SCREEN_SECURE_PLATFORM")]
    pub platform: Option<Platform>,

    /// JSON config file
    #[arg(long, env = "SCREEN_SECURE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Native window handle to protect (Windows)
    #[arg(long)]
    pub hwnd: Option<isize>,

    /// Tracing filter directives, overriding RUST_LOG
    #[arg(long)]
    pub log_filter: Option<String>,
}

/// Contents of the config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BridgeConfig {
    pub platform: Option<Platform>,
    pub hwnd: Option<isize>,
    #[serde(flatten)]
    pub protection: ProtectionConfig,
}

impl BridgeConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Effective settings after merging the command line over the file
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub platform: Platform,
    pub window: Option<isize>,
    pub protection: ProtectionConfig,
}

impl Settings {
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let file = match &cli.config {
            Some(path) => BridgeConfig::load(path)?,
            None => BridgeConfig::default(),
        };
        Ok(Self::merge(cli, file))
    }

    fn merge(cli: &Cli, file: BridgeConfig) -> Self {
        let platform = cli
            .platform
            .or(file.platform)
            .or_else(Platform::native)
            .unwrap_or(Platform::Android);

        Self {
            platform,
            window: cli.hwnd.or(file.hwnd),
            protection: file.protection,
        }
    }
}
