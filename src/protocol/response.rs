//! Response payload handling.
//!
//! Every response is a JSON object. Command results live under `value`:
//!
//! ```json
//! { "value": "Example Domain" }
//! ```
//!
//! A session-creation response also carries `sessionId`, either at the top
//! level or, in the W3C shape, inside `value`:
//!
//! ```json
//! { "sessionId": "abc", "value": { "browserName": "firefox" } }
//! { "value": { "sessionId": "abc", "capabilities": { "browserName": "firefox" } } }
//! ```
//!
//! Errors arrive as:
//!
//! ```json
//! { "value": { "error": "no such element", "message": "...", "stacktrace": "..." } }
//! ```

// ============================================================================
// Imports
// ============================================================================

use serde::Deserialize;
use serde_json::Value;

use crate::error::Error;
use crate::identifiers::SessionId;

// ============================================================================
// Envelope
// ============================================================================

/// Returns the `value` member of a payload, or the whole payload if absent.
///
/// The fallback keeps non-conforming servers usable.
#[must_use]
pub fn unwrap_value(payload: Value) -> Value {
    match payload {
        Value::Object(mut map) => match map.remove("value") {
            Some(value) => value,
            None => Value::Object(map),
        },
        other => other,
    }
}

// ============================================================================
// NewSession
// ============================================================================

/// Parsed session-creation payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSession {
    /// Id minted by the remote end.
    pub session_id: SessionId,
    /// Raw negotiated capabilities.
    pub capabilities: Value,
}

impl NewSession {
    /// Extracts the session id and capabilities from a raw payload.
    ///
    /// Returns `None` if no session id is present in either shape.
    #[must_use]
    pub fn from_payload(payload: &Value) -> Option<Self> {
        if let Some(id) = payload.get("sessionId").and_then(Value::as_str) {
            return Some(Self {
                session_id: SessionId::new(id),
                capabilities: payload.get("value").cloned().unwrap_or(Value::Null),
            });
        }

        let value = payload.get("value")?;
        let id = value.get("sessionId").and_then(Value::as_str)?;
        Some(Self {
            session_id: SessionId::new(id),
            capabilities: value.get("capabilities").cloned().unwrap_or(Value::Null),
        })
    }
}

// ============================================================================
// WireError
// ============================================================================

/// Error object returned by the remote end.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WireError {
    /// W3C error code.
    pub error: String,
    /// Human readable message.
    #[serde(default)]
    pub message: String,
    /// Remote stack trace, if any.
    #[serde(default)]
    pub stacktrace: Option<String>,
}

impl WireError {
    /// Extracts an error object from a payload, if it holds one.
    #[must_use]
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let candidate = payload.get("value").unwrap_or(payload);
        candidate.get("error")?.as_str()?;
        serde_json::from_value(candidate.clone()).ok()
    }

    /// Converts into the crate error, tagged with the HTTP status.
    #[must_use]
    pub fn into_error(self, status: u16) -> Error {
        Error::webdriver(self.error, self.message, status)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_unwrap_value_present() {
        assert_eq!(unwrap_value(json!({"value": "Example"})), json!("Example"));
    }

    #[test]
    fn test_unwrap_value_null_is_kept() {
        assert_eq!(unwrap_value(json!({"value": null})), Value::Null);
    }

    #[test]
    fn test_unwrap_value_falls_back_to_payload() {
        let payload = json!({"ready": true, "message": "ok"});
        assert_eq!(unwrap_value(payload.clone()), payload);
    }

    #[test]
    fn test_unwrap_value_non_object() {
        assert_eq!(unwrap_value(json!([1, 2])), json!([1, 2]));
    }

    #[test]
    fn test_new_session_top_level() {
        let payload = json!({"sessionId": "abc", "value": {"browserName": "firefox"}});
        let parsed = NewSession::from_payload(&payload).expect("session");
        assert_eq!(parsed.session_id, SessionId::new("abc"));
        assert_eq!(parsed.capabilities, json!({"browserName": "firefox"}));
    }

    #[test]
    fn test_new_session_w3c_shape() {
        let payload = json!({
            "value": {"sessionId": "xyz", "capabilities": {"browserName": "chrome"}}
        });
        let parsed = NewSession::from_payload(&payload).expect("session");
        assert_eq!(parsed.session_id, SessionId::new("xyz"));
        assert_eq!(parsed.capabilities, json!({"browserName": "chrome"}));
    }

    #[test]
    fn test_new_session_missing_id() {
        assert!(NewSession::from_payload(&json!({"value": {"browserName": "x"}})).is_none());
        assert!(NewSession::from_payload(&json!({"sessionId": null})).is_none());
    }

    #[test]
    fn test_wire_error_nested() {
        let payload = json!({
            "value": {"error": "no such element", "message": "Unable to locate", "stacktrace": ""}
        });
        let err = WireError::from_payload(&payload).expect("error");
        assert_eq!(err.error, "no such element");
        assert_eq!(err.message, "Unable to locate");

        let converted = err.into_error(404);
        assert_eq!(converted.webdriver_code(), Some("no such element"));
    }

    #[test]
    fn test_wire_error_absent() {
        assert!(WireError::from_payload(&json!({"value": "ok"})).is_none());
        assert!(WireError::from_payload(&json!({"value": {"error": 3}})).is_none());
    }
}
