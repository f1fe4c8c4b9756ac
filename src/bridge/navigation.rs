//! Navigation and page information.

use serde_json::{Value, json};
use tracing::debug;

use crate::error::{Error, Result};
use crate::protocol::{Command, PathParams};

use super::Bridge;

// ============================================================================
// Bridge - Navigation
// ============================================================================

impl Bridge {
    /// Returns the server status object.
    ///
    /// Needs no session.
    pub async fn status(&self) -> Result<Value> {
        self.execute(Command::Status, PathParams::new(), None).await
    }

    /// Navigates to a URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to navigate to
    pub async fn navigate(&self, url: &str) -> Result<()> {
        debug!(url = %url, bridge_id = %self.inner.id, "Navigating");
        self.execute(Command::Get, PathParams::new(), Some(json!({ "url": url })))
            .await?;
        Ok(())
    }

    /// Goes back in history.
    pub async fn back(&self) -> Result<()> {
        self.execute(Command::Back, PathParams::new(), None).await?;
        Ok(())
    }

    /// Goes forward in history.
    pub async fn forward(&self) -> Result<()> {
        self.execute(Command::Forward, PathParams::new(), None)
            .await?;
        Ok(())
    }

    /// Reloads the current page.
    pub async fn refresh(&self) -> Result<()> {
        self.execute(Command::Refresh, PathParams::new(), None)
            .await?;
        Ok(())
    }
}

// ============================================================================
// Bridge - Page Info
// ============================================================================

impl Bridge {
    /// Gets the current URL.
    pub async fn current_url(&self) -> Result<String> {
        self.execute_text(Command::GetCurrentUrl).await
    }

    /// Gets the page title.
    pub async fn title(&self) -> Result<String> {
        self.execute_text(Command::GetTitle).await
    }

    /// Gets the serialized DOM of the current page.
    pub async fn page_source(&self) -> Result<String> {
        self.execute_text(Command::GetPageSource).await
    }

    /// Runs a parameterless command expected to return a string.
    pub(crate) async fn execute_text(&self, command: Command) -> Result<String> {
        match self.execute(command, PathParams::new(), None).await? {
            Value::String(s) => Ok(s),
            other => Err(Error::protocol(format!(
                "{command} returned non-string {other}"
            ))),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
