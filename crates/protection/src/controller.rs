//! Protection state machine
//!
//! The controller owns the flags of one hosting surface. Each transition
//! calls the effector first and commits the flag only after the effector
//! succeeds, so the reported flags never run ahead of the platform.

use crossbeam_channel::{Receiver, Sender};
use secure_protocol::{Platform, SecurityStatus};
use tracing::{debug, info, warn};

use crate::{
    Capabilities, CouplingPolicy, EffectorResult, InitOptions, Protection, ProtectionConfig,
    ProtectionEffector, ProtectionError, ProtectionEvent, ProtectionResult, ProtectionState,
};

/// Controller over a type-erased effector, as selected at startup
pub type BoxedController = ProtectionController<Box<dyn ProtectionEffector>>;

/// Screenshot/record protection state machine for one hosting surface
pub struct ProtectionController<E: ProtectionEffector> {
    effector: E,
    state: ProtectionState,
    policy: CouplingPolicy,
    /// Screenshot mechanism left engaged for the record block
    screenshot_held: bool,
    /// Recording mechanism left engaged for the screenshot block
    recording_held: bool,
    initialized: bool,
    subscribers: Vec<Sender<ProtectionEvent>>,
}

impl<E: ProtectionEffector> ProtectionController<E> {
    /// Create a controller with the coupling policy implied by the
    /// effector's capabilities. Nothing is engaged until `initialize`.
    pub fn new(effector: E) -> Self {
        let policy = CouplingPolicy::for_capabilities(effector.capabilities());
        Self::with_policy(effector, policy)
    }

    pub fn with_policy(effector: E, policy: CouplingPolicy) -> Self {
        let capabilities = effector.capabilities();
        if capabilities.shared_mechanism && !policy.hold_screenshot_while_recording {
            warn!(
                "Coupling policy for {} releases the shared mechanism on screenshot disable; \
                 record protection is lost with it",
                effector.platform()
            );
        }

        info!(
            "Protection controller for {}: shared_mechanism={}, capture_detection={}",
            effector.platform(),
            capabilities.shared_mechanism,
            capabilities.capture_detection
        );

        Self {
            effector,
            state: ProtectionState::default(),
            policy,
            screenshot_held: false,
            recording_held: false,
            initialized: false,
            subscribers: Vec::new(),
        }
    }

    pub fn from_config(effector: E, config: &ProtectionConfig) -> Self {
        let policy = config.coupling_for(effector.platform(), effector.capabilities());
        Self::with_policy(effector, policy)
    }

    /// Set both flags per `options`, engaging every requested protection.
    ///
    /// A protection that is currently on but requested off is released with
    /// the same coupling rules as its disable command. Each step is committed
    /// as soon as its effector call succeeds.
    pub fn initialize(&mut self, options: InitOptions) -> ProtectionResult<SecurityStatus> {
        info!(
            "Initializing screen security: screenshot_block={}, record_block={}",
            options.screenshot_block, options.record_block
        );

        self.apply_init(options)
            .map_err(|source| ProtectionError::InitializationFailure { source })?;
        self.initialized = true;

        Ok(self.status())
    }

    fn apply_init(&mut self, options: InitOptions) -> EffectorResult<()> {
        if options.screenshot_block {
            self.engage_screenshot()?;
        } else if self.state.screenshot_blocked {
            self.release_screenshot()?;
        }

        if options.record_block {
            self.engage_recording()?;
        } else if self.state.record_blocked {
            self.release_recording()?;
        }

        Ok(())
    }

    pub fn enable_screenshot_block(&mut self) -> ProtectionResult<SecurityStatus> {
        info!("Enabling screenshot block");
        self.engage_screenshot()
            .map_err(|source| ProtectionError::EnableFailure {
                protection: Protection::Screenshot,
                source,
            })?;
        Ok(self.status())
    }

    pub fn disable_screenshot_block(&mut self) -> ProtectionResult<SecurityStatus> {
        info!("Disabling screenshot block");
        self.release_screenshot()
            .map_err(|source| ProtectionError::DisableFailure {
                protection: Protection::Screenshot,
                source,
            })?;
        Ok(self.status())
    }

    pub fn enable_record_block(&mut self) -> ProtectionResult<SecurityStatus> {
        info!("Enabling screen record block");
        self.engage_recording()
            .map_err(|source| ProtectionError::EnableFailure {
                protection: Protection::Recording,
                source,
            })?;
        Ok(self.status())
    }

    pub fn disable_record_block(&mut self) -> ProtectionResult<SecurityStatus> {
        info!("Disabling screen record block");
        self.release_recording()
            .map_err(|source| ProtectionError::DisableFailure {
                protection: Protection::Recording,
                source,
            })?;
        Ok(self.status())
    }

    fn engage_screenshot(&mut self) -> EffectorResult<()> {
        self.effector.engage_screenshot_protection()?;
        self.state.screenshot_blocked = true;
        self.screenshot_held = false;
        Ok(())
    }

    fn release_screenshot(&mut self) -> EffectorResult<()> {
        if self.policy.hold_screenshot_while_recording && self.state.record_blocked {
            debug!("Screenshot mechanism held for active record block");
            self.screenshot_held = true;
        } else {
            self.effector.disengage_screenshot_protection()?;
        }
        self.state.screenshot_blocked = false;

        // Nothing needs a recording mechanism kept for screenshots any more
        if self.recording_held {
            debug!("Releasing held recording mechanism");
            self.effector.disengage_recording_protection()?;
            self.recording_held = false;
        }
        Ok(())
    }

    fn engage_recording(&mut self) -> EffectorResult<()> {
        self.effector.engage_recording_protection()?;
        self.state.record_blocked = true;
        self.recording_held = false;
        Ok(())
    }

    /// The recording mechanism is never disengaged under an active
    /// screenshot block.
    fn release_recording(&mut self) -> EffectorResult<()> {
        if self.state.screenshot_blocked {
            debug!("Recording mechanism held for active screenshot block");
            self.recording_held = true;
        } else {
            self.effector.disengage_recording_protection()?;
        }
        self.state.record_blocked = false;

        if self.screenshot_held {
            debug!("Releasing held screenshot mechanism");
            self.effector.disengage_screenshot_protection()?;
            self.screenshot_held = false;
        }
        Ok(())
    }

    /// Re-engage every protection that is on. Hosts call this after a new
    /// surface has been attached to the effector.
    pub fn resync(&mut self) -> ProtectionResult<SecurityStatus> {
        debug!("Resyncing protection state: {:?}", self.state);

        if self.state.screenshot_blocked || self.screenshot_held {
            self.effector
                .engage_screenshot_protection()
                .map_err(|source| ProtectionError::EnableFailure {
                    protection: Protection::Screenshot,
                    source,
                })?;
        }
        if self.state.record_blocked || self.recording_held {
            self.effector
                .engage_recording_protection()
                .map_err(|source| ProtectionError::EnableFailure {
                    protection: Protection::Recording,
                    source,
                })?;
        }

        Ok(self.status())
    }

    /// Current status snapshot
    pub fn status(&self) -> SecurityStatus {
        let capabilities = self.effector.capabilities();

        SecurityStatus {
            screenshot_blocked: self.state.screenshot_blocked,
            record_blocked: self.state.record_blocked,
            platform: self.effector.platform(),
            is_currently_recording: capabilities
                .capture_detection
                .then(|| self.effector.is_capturing()),
        }
    }

    /// Live capture state; constant false where the platform cannot tell
    pub fn is_screen_recording(&self) -> bool {
        self.effector.capabilities().capture_detection && self.effector.is_capturing()
    }

    /// Whether the screenshot-level mechanism is engaged, including when it
    /// is only carried by record-block on a shared-mechanism platform
    pub fn screenshot_mechanism_engaged(&self) -> bool {
        self.state.screenshot_blocked
            || (self.effector.capabilities().shared_mechanism && self.state.record_blocked)
    }

    /// Forward a capture-state change from the platform. Subscribers are
    /// notified only while the effector observes capture changes.
    pub fn capture_changed(&mut self, captured: bool) {
        if self.effector.on_capture_changed(captured) {
            info!("Screen capture state changed: captured={}", captured);
            self.emit(ProtectionEvent::ScreenRecordingChanged {
                recording: captured,
            });
        } else {
            debug!("Capture change ignored, no observer installed");
        }
    }

    /// Subscribe to push notifications
    pub fn subscribe(&mut self) -> Receiver<ProtectionEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    fn emit(&mut self, event: ProtectionEvent) {
        self.subscribers.retain(|tx| {
            let delivered = tx.send(event).is_ok();
            if !delivered {
                debug!("Dropping disconnected event subscriber");
            }
            delivered
        });
    }

    /// Tear down the effector when the hosting surface goes away
    pub fn detach(mut self) -> EffectorResult<()> {
        info!("Detaching protection from {}", self.effector.platform());
        self.subscribers.clear();
        self.effector.release()
    }

    pub fn state(&self) -> ProtectionState {
        self.state
    }

    pub fn policy(&self) -> CouplingPolicy {
        self.policy
    }

    pub fn platform(&self) -> Platform {
        self.effector.platform()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.effector.capabilities()
    }

    /// Whether `initialize` has completed at least once
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn effector(&self) -> &E {
        &self.effector
    }

    pub fn effector_mut(&mut self) -> &mut E {
        &mut self.effector
    }
}
