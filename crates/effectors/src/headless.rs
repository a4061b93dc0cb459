//! In-memory surfaces for hosts without a native window

use protection::{EffectorError, EffectorResult};

use crate::{CaptureSurface, SecureWindow};

/// Window whose secure flag lives in memory
#[derive(Debug, Clone, Default)]
pub struct HeadlessWindow {
    secure: bool,
}

impl HeadlessWindow {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecureWindow for HeadlessWindow {
    fn set_secure(&mut self, secure: bool) -> EffectorResult<()> {
        self.secure = secure;
        Ok(())
    }

    fn is_secure(&self) -> bool {
        self.secure
    }
}

/// Display with an in-memory overlay, observer and capture state
#[derive(Debug, Clone)]
pub struct HeadlessDisplay {
    window_available: bool,
    /// Overlay visibility, `None` while no overlay is installed
    overlay: Option<bool>,
    observer: bool,
    captured: bool,
    overlays_installed: u32,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self {
            window_available: true,
            overlay: None,
            observer: false,
            captured: false,
            overlays_installed: 0,
        }
    }

    /// Display without a window to put the overlay on
    pub fn without_window() -> Self {
        Self {
            window_available: false,
            ..Self::new()
        }
    }

    pub fn overlay_visible(&self) -> Option<bool> {
        self.overlay
    }

    pub fn has_observer(&self) -> bool {
        self.observer
    }

    /// Number of overlays installed over the display's lifetime
    pub fn overlays_installed(&self) -> u32 {
        self.overlays_installed
    }
}

impl Default for HeadlessDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureSurface for HeadlessDisplay {
    fn install_overlay(&mut self) -> EffectorResult<()> {
        if !self.window_available {
            return Err(EffectorError::NoSurface);
        }
        self.overlay = Some(false);
        self.overlays_installed += 1;
        Ok(())
    }

    fn remove_overlay(&mut self) {
        self.overlay = None;
    }

    fn set_overlay_visible(&mut self, visible: bool) {
        if let Some(overlay) = self.overlay.as_mut() {
            *overlay = visible;
        }
    }

    fn set_capture_observer(&mut self, installed: bool) -> EffectorResult<()> {
        self.observer = installed;
        Ok(())
    }

    fn is_captured(&self) -> bool {
        self.captured
    }

    fn report_captured(&mut self, captured: bool) {
        self.captured = captured;
    }
}
