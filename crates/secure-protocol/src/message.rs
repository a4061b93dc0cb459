//! Method channel envelopes
//!
//! The host bridge speaks one JSON object per line. Inbound lines are
//! either method calls or host notifications; outbound lines are either
//! responses to a call or push events.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ErrorCode, EVENT_SCREEN_RECORDING_CHANGED, Method, ProtocolError, ProtocolResult};

/// Arguments of the `init` method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitArguments {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_block: Option<bool>,
    #[serde(
        default,
        alias = "screenRecordBlock",
        skip_serializing_if = "Option::is_none"
    )]
    pub record_block: Option<bool>,
}

impl InitArguments {
    /// Decode from the raw call arguments. Missing or null arguments mean
    /// "use the defaults".
    pub fn from_value(arguments: Option<&Value>) -> ProtocolResult<Self> {
        match arguments {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(value) => {
                Self::deserialize(value).map_err(|e| ProtocolError::InvalidArguments {
                    method: Method::Init.as_str(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Screenshot block requested, defaulting to on
    pub fn screenshot_block_or_default(&self) -> bool {
        self.screenshot_block.unwrap_or(true)
    }

    /// Record block requested, defaulting to on
    pub fn record_block_or_default(&self) -> bool {
        self.record_block.unwrap_or(true)
    }
}

/// A method invocation from the embedding application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    /// Correlation id echoed back in the response
    #[serde(default)]
    pub id: Option<u64>,
    pub method: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            id: None,
            method: method.into(),
            arguments: None,
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_arguments(mut self, arguments: Value) -> Self {
        self.arguments = Some(arguments);
        self
    }
}

/// Result of a single method call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MethodOutcome {
    Success {
        result: Value,
    },
    Error {
        code: String,
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    NotImplemented,
}

impl MethodOutcome {
    pub fn success(result: impl Into<Value>) -> Self {
        Self::Success {
            result: result.into(),
        }
    }

    pub fn error(code: ErrorCode, message: impl Into<String>, details: Option<String>) -> Self {
        Self::Error {
            code: code.as_str().to_string(),
            message: message.into(),
            details,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Lines read by the bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InboundMessage {
    /// Invoke a method on the channel
    Call(MethodCall),
    /// The platform reported a capture-state change
    CaptureChanged { captured: bool },
    /// The embedding surface is going away
    Detach,
}

/// Lines written by the bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutboundMessage {
    Response {
        #[serde(default)]
        id: Option<u64>,
        outcome: MethodOutcome,
    },
    Event {
        method: String,
        arguments: Value,
    },
}

impl OutboundMessage {
    pub fn response(id: Option<u64>, outcome: MethodOutcome) -> Self {
        Self::Response { id, outcome }
    }

    /// `onScreenRecordingChanged` push notification
    pub fn recording_changed(recording: bool) -> Self {
        Self::Event {
            method: EVENT_SCREEN_RECORDING_CHANGED.to_string(),
            arguments: Value::Bool(recording),
        }
    }

    pub fn to_line(&self) -> ProtocolResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl InboundMessage {
    pub fn from_line(line: &str) -> ProtocolResult<Self> {
        Ok(serde_json::from_str(line)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_init_arguments_default_to_true() {
        let args = InitArguments::from_value(None).unwrap();
        assert!(args.screenshot_block_or_default());
        assert!(args.record_block_or_default());

        let args = InitArguments::from_value(Some(&Value::Null)).unwrap();
        assert_eq!(args, InitArguments::default());
    }

    #[test]
    fn test_init_arguments_accept_record_alias() {
        let args = InitArguments::from_value(Some(&json!({
            "screenshotBlock": false,
            "screenRecordBlock": true,
        })))
        .unwrap();

        assert_eq!(args.screenshot_block, Some(false));
        assert_eq!(args.record_block, Some(true));

        let args = InitArguments::from_value(Some(&json!({ "recordBlock": false }))).unwrap();
        assert!(args.screenshot_block_or_default());
        assert!(!args.record_block_or_default());
    }

    #[test]
    fn test_init_arguments_reject_wrong_types() {
        let err = InitArguments::from_value(Some(&json!({ "screenshotBlock": "yes" })))
            .unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidArguments { method: "init", .. }));
    }

    #[test]
    fn test_inbound_call_parse() {
        let msg = InboundMessage::from_line(
            r#"{"type":"call","id":7,"method":"init","arguments":{"screenshotBlock":false}}"#,
        )
        .unwrap();

        match msg {
            InboundMessage::Call(call) => {
                assert_eq!(call.id, Some(7));
                assert_eq!(call.method, "init");
                assert_eq!(call.arguments, Some(json!({ "screenshotBlock": false })));
            }
            other => panic!("unexpected message: {:?}", other),
        }

        let msg = InboundMessage::from_line(r#"{"type":"call","method":"getSecurityStatus"}"#)
            .unwrap();
        assert_eq!(msg, InboundMessage::Call(MethodCall::new("getSecurityStatus")));

        let msg = InboundMessage::from_line(r#"{"type":"captureChanged","captured":true}"#)
            .unwrap();
        assert_eq!(msg, InboundMessage::CaptureChanged { captured: true });

        assert!(InboundMessage::from_line(r#"{"type":"reboot"}"#).is_err());
    }

    #[test]
    fn test_outbound_shapes() {
        let line = OutboundMessage::response(Some(3), MethodOutcome::success(true))
            .to_line()
            .unwrap();
        let value: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "response",
                "id": 3,
                "outcome": { "status": "success", "result": true },
            })
        );

        let value = serde_json::to_value(OutboundMessage::response(
            None,
            MethodOutcome::error(ErrorCode::EnableError, "Failed to enable screenshot block", None),
        ))
        .unwrap();
        assert_eq!(value["outcome"]["status"], "error");
        assert_eq!(value["outcome"]["code"], "ENABLE_ERROR");
        assert!(value["outcome"].get("details").is_none());

        let value = serde_json::to_value(OutboundMessage::response(
            Some(1),
            MethodOutcome::NotImplemented,
        ))
        .unwrap();
        assert_eq!(value["outcome"], json!({ "status": "notImplemented" }));

        let value = serde_json::to_value(OutboundMessage::recording_changed(true)).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "event",
                "method": "onScreenRecordingChanged",
                "arguments": true,
            })
        );
    }
}
