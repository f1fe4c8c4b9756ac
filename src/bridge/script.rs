//! JavaScript execution.

use serde_json::{Value, json};
use tracing::debug;

use crate::browser::ScriptValue;
use crate::error::Result;
use crate::protocol::{Command, PathParams};

use super::Bridge;

// ============================================================================
// Bridge - Script Execution
// ============================================================================

impl Bridge {
    /// Executes synchronous JavaScript in the current browsing context.
    ///
    /// Element handles in `args` are sent as references; references in the
    /// result come back as handles.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let heading = bridge.find_element_by(By::tag_name("h1"), None).await?;
    /// let text = bridge
    ///     .execute_script("return arguments[0].textContent;", &[heading.into()])
    ///     .await?;
    /// ```
    pub async fn execute_script(&self, script: &str, args: &[ScriptValue]) -> Result<ScriptValue> {
        debug!(bridge_id = %self.inner.id, script_len = script.len(), args = args.len(), "Executing script");
        self.run_script(Command::ExecuteScript, script, args).await
    }

    /// Executes asynchronous JavaScript.
    ///
    /// The script signals completion by calling the last entry of
    /// `arguments`.
    pub async fn execute_async_script(
        &self,
        script: &str,
        args: &[ScriptValue],
    ) -> Result<ScriptValue> {
        debug!(bridge_id = %self.inner.id, script_len = script.len(), args = args.len(), "Executing async script");
        self.run_script(Command::ExecuteAsyncScript, script, args)
            .await
    }

    async fn run_script(
        &self,
        command: Command,
        script: &str,
        args: &[ScriptValue],
    ) -> Result<ScriptValue> {
        let references = self.element_reference();
        let args: Vec<Value> = args.iter().map(|arg| arg.to_wire(references)).collect();
        let body = json!({ "script": script, "args": args });

        let value = self.execute(command, PathParams::new(), Some(body)).await?;
        Ok(self.unwrap_script_result(value))
    }
}

// ============================================================================
// Tests
// ============================================================================
