//! Method channel command handlers

use protection::{ProtectionController, ProtectionEffector, ProtectionError};
use secure_protocol::{
    ErrorCode, InitArguments, Method, MethodCall, MethodOutcome, ProtocolError,
};
use serde_json::Value;
use tracing::{debug, error};

/// Error type for commands
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Protection(#[from] ProtectionError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl CommandError {
    /// Error outcome carrying the stable code, message and effector detail
    pub fn into_outcome(self) -> MethodOutcome {
        match self {
            CommandError::Protection(err) => MethodOutcome::error(
                err.code(),
                err.message(),
                Some(err.effector_error().to_string()),
            ),
            CommandError::Protocol(err) => {
                MethodOutcome::error(ErrorCode::InvalidArguments, err.to_string(), None)
            }
        }
    }
}

type CommandResult<T> = Result<T, CommandError>;

/// Run one method call against the controller. Unknown methods are answered
/// with not-implemented rather than an error.
pub fn dispatch<E: ProtectionEffector>(
    controller: &mut ProtectionController<E>,
    call: &MethodCall,
) -> MethodOutcome {
    let Some(method) = Method::from_name(&call.method) else {
        debug!("Method not implemented: {}", call.method);
        return MethodOutcome::NotImplemented;
    };

    debug!("Dispatching {}", method);
    match run(controller, method, call.arguments.as_ref()) {
        Ok(result) => MethodOutcome::success(result),
        Err(err) => {
            error!("{} failed: {}", method, err);
            err.into_outcome()
        }
    }
}

fn run<E: ProtectionEffector>(
    controller: &mut ProtectionController<E>,
    method: Method,
    arguments: Option<&Value>,
) -> CommandResult<Value> {
    match method {
        Method::Init => {
            let args = InitArguments::from_value(arguments)?;
            controller.initialize(args.into())?;
            Ok(Value::Bool(true))
        }
        Method::EnableScreenshotBlock => {
            controller.enable_screenshot_block()?;
            Ok(Value::Bool(true))
        }
        Method::DisableScreenshotBlock => {
            controller.disable_screenshot_block()?;
            Ok(Value::Bool(true))
        }
        Method::EnableScreenRecordBlock => {
            controller.enable_record_block()?;
            Ok(Value::Bool(true))
        }
        Method::DisableScreenRecordBlock => {
            controller.disable_record_block()?;
            Ok(Value::Bool(true))
        }
        Method::IsScreenRecording => Ok(Value::Bool(controller.is_screen_recording())),
        Method::GetSecurityStatus => {
            let status = serde_json::to_value(controller.status()).map_err(ProtocolError::from)?;
            Ok(status)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use effectors::{
        HeadlessDisplay, HeadlessWindow, OverlayEffector, SecureWindow, WindowFlagEffector,
    };
    use pretty_assertions::assert_eq;
    use secure_protocol::Platform;
    use serde_json::json;

    fn android() -> ProtectionController<WindowFlagEffector<HeadlessWindow>> {
        ProtectionController::new(WindowFlagEffector::new(
            Platform::Android,
            HeadlessWindow::new(),
        ))
    }

    fn call(method: &str) -> MethodCall {
        MethodCall::new(method)
    }

    fn status(controller: &mut ProtectionController<impl ProtectionEffector>) -> Value {
        match dispatch(controller, &call("getSecurityStatus")) {
            MethodOutcome::Success { result } => result,
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_init_without_arguments_blocks_both() {
        let mut controller = android();

        let outcome = dispatch(&mut controller, &call("init"));
        assert_eq!(outcome, MethodOutcome::success(true));

        assert_eq!(
            status(&mut controller),
            json!({
                "screenshotBlocked": true,
                "recordBlocked": true,
                "platform": "android",
            })
        );
    }

    #[test]
    fn test_record_only_init_then_disable() {
        let mut controller = android();

        let init = call("init").with_arguments(json!({
            "screenshotBlock": false,
            "recordBlock": true,
        }));
        assert!(dispatch(&mut controller, &init).is_success());
        assert_eq!(status(&mut controller)["screenshotBlocked"], false);
        assert_eq!(status(&mut controller)["recordBlocked"], true);
        assert!(controller.effector().window().unwrap().is_secure());

        assert!(dispatch(&mut controller, &call("disableScreenRecordBlock")).is_success());
        assert_eq!(status(&mut controller)["recordBlocked"], false);
        assert!(!controller.effector().window().unwrap().is_secure());
    }

    #[test]
    fn test_unknown_method_not_implemented() {
        let mut controller = android();
        assert_eq!(
            dispatch(&mut controller, &call("blockEverything")),
            MethodOutcome::NotImplemented
        );
        assert!(controller.state().is_clear());
    }

    #[test]
    fn test_is_screen_recording_per_platform() {
        let mut controller = android();
        assert_eq!(
            dispatch(&mut controller, &call("isScreenRecording")),
            MethodOutcome::success(false)
        );

        let mut ios = ProtectionController::new(OverlayEffector::new(HeadlessDisplay::new()));
        dispatch(&mut ios, &call("init"));
        ios.capture_changed(true);
        assert_eq!(
            dispatch(&mut ios, &call("isScreenRecording")),
            MethodOutcome::success(true)
        );
        assert_eq!(status(&mut ios)["isCurrentlyRecording"], true);
    }

    #[test]
    fn test_effector_failure_surfaces_stable_code() {
        let mut controller =
            ProtectionController::new(WindowFlagEffector::<HeadlessWindow>::detached(Platform::Android));

        assert_eq!(
            dispatch(&mut controller, &call("enableScreenshotBlock")),
            MethodOutcome::error(
                ErrorCode::EnableError,
                "Failed to enable screenshot block",
                Some("No active display surface".to_string()),
            )
        );

        match dispatch(&mut controller, &call("init")) {
            MethodOutcome::Error { code, message, .. } => {
                assert_eq!(code, "INIT_ERROR");
                assert_eq!(message, "Failed to initialize screen security");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        match dispatch(&mut controller, &call("disableScreenRecordBlock")) {
            MethodOutcome::Error { code, .. } => assert_eq!(code, "DISABLE_ERROR"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_init_arguments() {
        let mut controller = android();
        let init = call("init").with_arguments(json!({ "recordBlock": 1 }));

        match dispatch(&mut controller, &init) {
            MethodOutcome::Error { code, .. } => assert_eq!(code, "INVALID_ARGUMENTS"),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(controller.state().is_clear());
    }
}
