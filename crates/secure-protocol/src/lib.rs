//! Shared Protocol Definitions for Screen Secure
//!
//! This crate contains the method names, payloads and envelopes shared
//! between the protection core, the platform effectors and the host bridge.

mod error;
mod message;
mod method;
mod status;

pub use error::*;
pub use message::*;
pub use method::*;
pub use status::*;

/// Name of the method channel the host binds to
pub const CHANNEL_NAME: &str = "screen_secure";

/// Push notification sent when the platform reports a capture-state change
pub const EVENT_SCREEN_RECORDING_CHANGED: &str = "onScreenRecordingChanged";
