//! Platform effector trait abstraction

use secure_protocol::Platform;

use crate::EffectorResult;

/// The two independent protections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protection {
    Screenshot,
    Recording,
}

impl std::fmt::Display for Protection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Protection::Screenshot => f.write_str("screenshot"),
            Protection::Recording => f.write_str("screen record"),
        }
    }
}

/// What a platform effector can do
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Screenshot and recording protection are one underlying mechanism
    pub shared_mechanism: bool,
    /// The platform can report whether the screen is being captured
    pub capture_detection: bool,
}

/// Operating-system action behind each protection transition.
///
/// Every engage/disengage call must be idempotent and take effect before it
/// returns.
pub trait ProtectionEffector: Send {
    /// Platform family this effector drives
    fn platform(&self) -> Platform;

    fn capabilities(&self) -> Capabilities;

    fn engage_screenshot_protection(&mut self) -> EffectorResult<()>;

    fn disengage_screenshot_protection(&mut self) -> EffectorResult<()>;

    /// On a shared-mechanism platform this also engages screenshot protection
    fn engage_recording_protection(&mut self) -> EffectorResult<()>;

    fn disengage_recording_protection(&mut self) -> EffectorResult<()>;

    /// Live capture state. Always false without capture detection.
    fn is_capturing(&self) -> bool {
        false
    }

    /// Deliver a capture-state notification from the platform. Returns true
    /// when a capture observer is installed and the change should be pushed
    /// to subscribers.
    fn on_capture_changed(&mut self, _captured: bool) -> bool {
        false
    }

    /// Clean up everything installed on the surface before it goes away
    fn release(&mut self) -> EffectorResult<()> {
        Ok(())
    }
}

impl<E: ProtectionEffector + ?Sized> ProtectionEffector for Box<E> {
    fn platform(&self) -> Platform {
        (**self).platform()
    }

    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    fn engage_screenshot_protection(&mut self) -> EffectorResult<()> {
        (**self).engage_screenshot_protection()
    }

    fn disengage_screenshot_protection(&mut self) -> EffectorResult<()> {
        (**self).disengage_screenshot_protection()
    }

    fn engage_recording_protection(&mut self) -> EffectorResult<()> {
        (**self).engage_recording_protection()
    }

    fn disengage_recording_protection(&mut self) -> EffectorResult<()> {
        (**self).disengage_recording_protection()
    }

    fn is_capturing(&self) -> bool {
        (**self).is_capturing()
    }

    fn on_capture_changed(&mut self, captured: bool) -> bool {
        (**self).on_capture_changed(captured)
    }

    fn release(&mut self) -> EffectorResult<()> {
        (**self).release()
    }
}
