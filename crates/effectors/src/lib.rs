//! Platform Effectors - OS-level capture protection for Screen Secure
//!
//! Provides the effectors behind the protection state machine:
//! - Window flag: one secure flag carries both protections
//! - Overlay: secure overlay plus a capture-change observer
//! - Windows: display affinity on a native window

mod headless;
mod overlay;
mod window_flag;

#[cfg(target_os = "windows")]
mod win32;

pub use headless::*;
pub use overlay::*;
pub use window_flag::*;

#[cfg(target_os = "windows")]
pub use win32::DisplayAffinityWindow;

use protection::{EffectorError, EffectorResult, ProtectionEffector};
use secure_protocol::Platform;

/// Create an effector for the given platform family.
///
/// Android and iOS effectors run over in-memory surfaces; a host embedded
/// in those platforms supplies its own `SecureWindow` or `CaptureSurface`.
/// On Windows `window` selects the native window handle, defaulting to the
/// foreground window.
pub fn create_effector(
    platform: Platform,
    window: Option<isize>,
) -> EffectorResult<Box<dyn ProtectionEffector>> {
    match platform {
        Platform::Android => Ok(Box::new(WindowFlagEffector::new(
            Platform::Android,
            HeadlessWindow::default(),
        ))),
        Platform::Ios => Ok(Box::new(OverlayEffector::new(HeadlessDisplay::default()))),
        Platform::Windows => create_windows_effector(window),
    }
}

#[cfg(target_os = "windows")]
fn create_windows_effector(window: Option<isize>) -> EffectorResult<Box<dyn ProtectionEffector>> {
    let window = match window {
        Some(hwnd) => DisplayAffinityWindow::from_raw(hwnd)?,
        None => DisplayAffinityWindow::foreground()?,
    };
    Ok(Box::new(WindowFlagEffector::new(Platform::Windows, window)))
}

#[cfg(not(target_os = "windows"))]
fn create_windows_effector(_window: Option<isize>) -> EffectorResult<Box<dyn ProtectionEffector>> {
    Err(EffectorError::UnsupportedPlatform)
}
