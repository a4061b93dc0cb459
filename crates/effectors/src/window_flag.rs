//! Secure window flag effector
//!
//! A single flag on the window blocks both screenshots and recording, so
//! the two protections share one mechanism.

use protection::{Capabilities, EffectorError, EffectorResult, ProtectionEffector};
use secure_protocol::Platform;
use tracing::{debug, info};

/// A native window that can be excluded from capture
pub trait SecureWindow: Send {
    /// Set or clear the secure flag. Must be idempotent.
    fn set_secure(&mut self, secure: bool) -> EffectorResult<()>;

    fn is_secure(&self) -> bool;
}

/// Effector driving a secure window flag
pub struct WindowFlagEffector<W: SecureWindow> {
    platform: Platform,
    window: Option<W>,
}

impl<W: SecureWindow> WindowFlagEffector<W> {
    pub fn new(platform: Platform, window: W) -> Self {
        Self {
            platform,
            window: Some(window),
        }
    }

    /// Effector with no window attached yet
    pub fn detached(platform: Platform) -> Self {
        Self {
            platform,
            window: None,
        }
    }

    /// Attach a (new) window, returning the previous one. The caller resyncs
    /// the controller afterwards so the flag is applied to the new window.
    pub fn attach(&mut self, window: W) -> Option<W> {
        info!("Window attached to {} effector", self.platform);
        self.window.replace(window)
    }

    /// Drop the window reference, e.g. across a configuration change
    pub fn detach(&mut self) -> Option<W> {
        info!("Window detached from {} effector", self.platform);
        self.window.take()
    }

    pub fn window(&self) -> Option<&W> {
        self.window.as_ref()
    }

    fn set_flag(&mut self, secure: bool) -> EffectorResult<()> {
        let window = self.window.as_mut().ok_or(EffectorError::NoSurface)?;
        debug!("Setting secure window flag: {}", secure);
        window.set_secure(secure)
    }
}

impl<W: SecureWindow> ProtectionEffector for WindowFlagEffector<W> {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            shared_mechanism: true,
            capture_detection: false,
        }
    }

    fn engage_screenshot_protection(&mut self) -> EffectorResult<()> {
        self.set_flag(true)
    }

    fn disengage_screenshot_protection(&mut self) -> EffectorResult<()> {
        self.set_flag(false)
    }

    fn engage_recording_protection(&mut self) -> EffectorResult<()> {
        // The secure flag also blocks recording
        self.set_flag(true)
    }

    fn disengage_recording_protection(&mut self) -> EffectorResult<()> {
        self.set_flag(false)
    }

    fn release(&mut self) -> EffectorResult<()> {
        match self.window.take() {
            Some(mut window) => window.set_secure(false),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HeadlessWindow;
    use protection::{InitOptions, ProtectionController};

    #[test]
    fn test_flag_follows_either_protection() {
        let mut controller = ProtectionController::new(WindowFlagEffector::new(
            Platform::Android,
            HeadlessWindow::default(),
        ));

        controller.enable_record_block().unwrap();
        assert!(controller.effector().window().unwrap().is_secure());
        assert!(!controller.status().screenshot_blocked);

        controller.enable_screenshot_block().unwrap();
        controller.disable_record_block().unwrap();
        assert!(controller.effector().window().unwrap().is_secure());

        controller.disable_screenshot_block().unwrap();
        assert!(!controller.effector().window().unwrap().is_secure());
    }

    #[test]
    fn test_missing_window_fails_without_state_change() {
        let mut controller =
            ProtectionController::new(WindowFlagEffector::<HeadlessWindow>::detached(Platform::Android));

        let err = controller.enable_screenshot_block().unwrap_err();
        assert!(matches!(err.effector_error(), EffectorError::NoSurface));
        assert!(controller.state().is_clear());

        let err = controller.initialize(InitOptions::default()).unwrap_err();
        assert_eq!(err.code().as_str(), "INIT_ERROR");
        assert!(controller.state().is_clear());
    }

    #[test]
    fn test_reattached_window_is_resynced() {
        let mut controller = ProtectionController::new(WindowFlagEffector::new(
            Platform::Android,
            HeadlessWindow::default(),
        ));
        controller.initialize(InitOptions::new(true, false)).unwrap();

        let old = controller.effector_mut().detach().unwrap();
        assert!(old.is_secure());

        controller.effector_mut().attach(HeadlessWindow::default());
        assert!(!controller.effector().window().unwrap().is_secure());

        controller.resync().unwrap();
        assert!(controller.effector().window().unwrap().is_secure());
    }

    #[test]
    fn test_release_clears_flag() {
        let mut effector = WindowFlagEffector::new(Platform::Windows, HeadlessWindow::default());
        effector.engage_recording_protection().unwrap();
        effector.release().unwrap();

        assert!(effector.window().is_none());
        assert!(matches!(
            effector.engage_screenshot_protection(),
            Err(EffectorError::NoSurface)
        ));
    }
}
