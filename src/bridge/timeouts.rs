//! Session timeouts and input state.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::protocol::{Command, PathParams};

use super::Bridge;

// ============================================================================
// Timeouts
// ============================================================================

/// Session timeouts in milliseconds.
///
/// Unset fields are left out of the request and keep their remote value.
/// A `script` of `null` on the wire means "never time out" and reads back
/// as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeouts {
    /// Script timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<u64>,
    /// Page load timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_load: Option<u64>,
    /// Implicit element wait.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implicit: Option<u64>,
}

// ============================================================================
// Bridge - Timeouts
// ============================================================================

impl Bridge {
    /// Gets the session timeouts.
    pub async fn timeouts(&self) -> Result<Timeouts> {
        let value = self
            .execute(Command::GetTimeouts, PathParams::new(), None)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Sets session timeouts.
    pub async fn set_timeouts(&self, timeouts: Timeouts) -> Result<()> {
        let body = serde_json::to_value(timeouts)?;
        self.execute(Command::SetTimeout, PathParams::new(), Some(body))
            .await?;
        Ok(())
    }
}

// ============================================================================
// Bridge - Actions
// ============================================================================

impl Bridge {
    /// Releases every pressed key and mouse button.
    pub async fn release_actions(&self) -> Result<()> {
        self.execute(Command::ReleaseActions, PathParams::new(), None)
            .await?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::bridge::test_support::connected;
    use crate::protocol::Method;
    use crate::transport::scripted::ScriptedTransport;

    #[tokio::test]
    async fn test_set_timeouts_sends_only_set_fields() {
        let transport = ScriptedTransport::new();
        let bridge = connected(&transport).await;
        transport.respond(json!({"value": null}));

        bridge
            .set_timeouts(Timeouts {
                page_load: Some(30_000),
                implicit: Some(0),
                ..Timeouts::default()
            })
            .await
            .expect("timeouts");

        let call = transport.last_call().expect("call");
        assert_eq!(call.method, Method::Post);
        assert_eq!(call.path, "/session/abc/timeouts");
        assert_eq!(call.body, Some(json!({"pageLoad": 30_000, "implicit": 0})));
    }

    #[tokio::test]
    async fn test_get_timeouts() {
        let transport = ScriptedTransport::new();
        let bridge = connected(&transport).await;
        transport.respond(json!({"value": {"script": null, "pageLoad": 300_000, "implicit": 0}}));

        let timeouts = bridge.timeouts().await.expect("timeouts");
        assert_eq!(
            timeouts,
            Timeouts {
                script: None,
                page_load: Some(300_000),
                implicit: Some(0),
            }
        );
    }

    #[tokio::test]
    async fn test_release_actions() {
        let transport = ScriptedTransport::new();
        let bridge = connected(&transport).await;
        transport.respond(json!({"value": null}));

        bridge.release_actions().await.expect("release");
        let call = transport.last_call().expect("call");
        assert_eq!(call.method, Method::Delete);
        assert_eq!(call.path, "/session/abc/actions");
    }
}
