//! Push notifications emitted by the controller

/// Event delivered to subscribers independently of any command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtectionEvent {
    /// `onScreenRecordingChanged`
    ScreenRecordingChanged { recording: bool },
}
