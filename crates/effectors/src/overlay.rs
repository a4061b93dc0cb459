//! Secure overlay effector
//!
//! Screenshot protection installs a full-window overlay that stays hidden
//! until capture is seen. Recording protection installs an observer for
//! capture-state changes; while it is installed the overlay is shown
//! whenever the screen is being captured.

use protection::{Capabilities, EffectorResult, ProtectionEffector};
use secure_protocol::Platform;
use tracing::{debug, info};

/// Display surface that can host a secure overlay and report capture state
pub trait CaptureSurface: Send {
    /// Cover the window with a hidden overlay. Fails without a window.
    fn install_overlay(&mut self) -> EffectorResult<()>;

    fn remove_overlay(&mut self);

    fn set_overlay_visible(&mut self, visible: bool);

    /// Add or remove the capture-change observer
    fn set_capture_observer(&mut self, installed: bool) -> EffectorResult<()>;

    /// Whether the screen is currently being captured
    fn is_captured(&self) -> bool;

    /// Record a capture state delivered by the host. Surfaces that read the
    /// state from the OS ignore this.
    fn report_captured(&mut self, _captured: bool) {}
}

/// Effector driving a secure overlay and capture observer
pub struct OverlayEffector<S: CaptureSurface> {
    surface: S,
    overlay_installed: bool,
    observing: bool,
}

impl<S: CaptureSurface> OverlayEffector<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            overlay_installed: false,
            observing: false,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }
}

impl<S: CaptureSurface> ProtectionEffector for OverlayEffector<S> {
    fn platform(&self) -> Platform {
        Platform::Ios
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            shared_mechanism: false,
            capture_detection: true,
        }
    }

    fn engage_screenshot_protection(&mut self) -> EffectorResult<()> {
        if self.overlay_installed {
            return Ok(());
        }

        self.surface.install_overlay()?;
        self.overlay_installed = true;
        let visible = self.observing && self.surface.is_captured();
        self.surface.set_overlay_visible(visible);
        debug!("Secure overlay installed, visible={}", visible);
        Ok(())
    }

    fn disengage_screenshot_protection(&mut self) -> EffectorResult<()> {
        if self.overlay_installed {
            self.surface.remove_overlay();
            self.overlay_installed = false;
            debug!("Secure overlay removed");
        }
        Ok(())
    }

    fn engage_recording_protection(&mut self) -> EffectorResult<()> {
        if !self.observing {
            self.surface.set_capture_observer(true)?;
            self.observing = true;
            debug!("Capture observer installed");

            // A capture already in progress gets covered right away
            if self.overlay_installed {
                let captured = self.surface.is_captured();
                self.surface.set_overlay_visible(captured);
            }
        }
        Ok(())
    }

    fn disengage_recording_protection(&mut self) -> EffectorResult<()> {
        if self.observing {
            self.surface.set_capture_observer(false)?;
            self.observing = false;
            debug!("Capture observer removed");

            // Nothing would hide the overlay once unobserved
            if self.overlay_installed {
                self.surface.set_overlay_visible(false);
            }
        }
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.surface.is_captured()
    }

    fn on_capture_changed(&mut self, captured: bool) -> bool {
        self.surface.report_captured(captured);
        if !self.observing {
            return false;
        }

        if self.overlay_installed {
            self.surface.set_overlay_visible(captured);
        }
        true
    }

    fn release(&mut self) -> EffectorResult<()> {
        info!("Releasing secure overlay surface");
        self.disengage_recording_protection()?;
        self.disengage_screenshot_protection()
    }
}
