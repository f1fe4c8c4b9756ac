//! User prompts (alert, confirm, prompt).

use serde_json::{Value, json};
use tracing::debug;

use crate::error::Result;
use crate::protocol::{Command, PathParams};

use super::Bridge;

// ============================================================================
// Bridge - Alerts
// ============================================================================

impl Bridge {
    /// Accepts the open prompt.
    pub async fn accept_alert(&self) -> Result<()> {
        debug!(bridge_id = %self.inner.id, "Accepting alert");
        self.execute(Command::AcceptAlert, PathParams::new(), None)
            .await?;
        Ok(())
    }

    /// Dismisses the open prompt.
    pub async fn dismiss_alert(&self) -> Result<()> {
        debug!(bridge_id = %self.inner.id, "Dismissing alert");
        self.execute(Command::DismissAlert, PathParams::new(), None)
            .await?;
        Ok(())
    }

    /// Gets the prompt message. `None` if the prompt has no text.
    pub async fn alert_text(&self) -> Result<Option<String>> {
        let value = self
            .execute(Command::GetAlertText, PathParams::new(), None)
            .await?;
        Ok(match value {
            Value::String(s) => Some(s),
            _ => None,
        })
    }

    /// Types into a `window.prompt` input.
    pub async fn send_alert_text(&self, text: &str) -> Result<()> {
        self.execute(
            Command::SendAlertText,
            PathParams::new(),
            Some(json!({ "text": text })),
        )
        .await?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
