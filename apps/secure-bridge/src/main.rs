//! Screen Secure Bridge
//!
//! Owns the protection controller of one hosting surface and speaks the
//! `screen_secure` method channel as JSON lines over stdin/stdout.

mod commands;
mod config;
mod state;

use anyhow::Context;
use clap::Parser;
use protection::ProtectionController;
use secure_protocol::CHANNEL_NAME;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::{Cli, DEFAULT_LOG_FILTER, Settings};
use state::BridgeState;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_filter.as_deref())?;

    let settings = Settings::resolve(&cli)?;
    info!(
        "Starting Screen Secure bridge on channel {} ({})",
        CHANNEL_NAME, settings.platform
    );

    let effector = effectors::create_effector(settings.platform, settings.window)
        .with_context(|| format!("No effector for {}", settings.platform))?;
    let controller = ProtectionController::from_config(effector, &settings.protection);
    let mut bridge = BridgeState::new(controller, std::io::stdout());

    if let Some(options) = settings.protection.auto_init {
        if let Err(e) = bridge.controller_mut().initialize(options) {
            warn!("Automatic init failed: {}", e);
        }
    }

    bridge.run(std::io::stdin().lock())?;
    info!("Bridge stopped");

    Ok(())
}

/// Log to stderr; stdout carries the channel
fn init_tracing(filter: Option<&str>) -> anyhow::Result<()> {
    let filter = match filter {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
