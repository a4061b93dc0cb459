//! Screen Protection - capture protection state machine for Screen Secure
//!
//! Tracks the screenshot and screen-record blocks of one hosting surface
//! and maps every transition onto a platform effector:
//! - Window-flag platforms share one secure flag between both blocks
//! - Overlay platforms use a secure overlay plus a capture observer

mod config;
mod controller;
mod error;
mod event;
mod state;
mod traits;

pub use config::*;
pub use controller::*;
pub use error::*;
pub use event::*;
pub use state::*;
pub use traits::*;

pub use secure_protocol::{Platform, SecurityStatus};
