//! DOM element handles.
//!
//! An [`Element`] is an opaque server-side id plus a weak link back to the
//! bridge that found it. Dropping the bridge invalidates every handle; the
//! next element-scoped call fails with [`Error::BridgeDropped`].
//!
//! # Example
//!
//! ```ignore
//! use webdriver_bridge::By;
//!
//! let field = bridge.find_element_by(By::name("q"), None).await?;
//!
//! // Query
//! let tag = field.tag_name().await?;
//! let placeholder = field.attribute("placeholder").await?;
//!
//! // Interact
//! field.clear().await?;
//! field.send_keys("rust webdriver").await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Weak;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::bridge::{Bridge, BridgeInner};
use crate::error::{Error, Result};
use crate::identifiers::ElementId;
use crate::protocol::{Command, PathParams};

use super::selector::By;

// ============================================================================
// Rect
// ============================================================================

/// Position and size in CSS pixels.
///
/// Used for both element and window rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

// ============================================================================
// Element
// ============================================================================

/// A handle to a DOM element in the remote session.
///
/// Cheap to clone. Two handles are equal when they carry the same id and
/// belong to the same bridge.
#[derive(Clone)]
pub struct Element {
    /// Server-assigned element id.
    id: ElementId,

    /// Bridge that produced this handle.
    bridge: Weak<BridgeInner>,
}

// ============================================================================
// Element - Display
// ============================================================================

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id)
            .field("attached", &(self.bridge.strong_count() > 0))
            .finish()
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Weak::ptr_eq(&self.bridge, &other.bridge)
    }
}

// ============================================================================
// Element - Constructor
// ============================================================================

impl Element {
    /// Creates a new element handle.
    pub(crate) fn new(id: ElementId, bridge: Weak<BridgeInner>) -> Self {
        Self { id, bridge }
    }
}

// ============================================================================
// Element - Accessors
// ============================================================================

impl Element {
    /// Returns this element's ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    /// Returns the owning bridge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BridgeDropped`] if the bridge no longer exists.
    pub fn bridge(&self) -> Result<Bridge> {
        self.bridge
            .upgrade()
            .map(Bridge::from_inner)
            .ok_or_else(|| Error::bridge_dropped(self.id.as_str()))
    }
}

// ============================================================================
// Element - Internal
// ============================================================================

impl Element {
    /// Path parameters addressing this element.
    fn params(&self) -> PathParams {
        PathParams::new().with("id", &self.id)
    }

    /// Runs an element-scoped command.
    async fn execute(&self, command: Command, params: PathParams, body: Option<Value>) -> Result<Value> {
        self.bridge()?.execute(command, params, body).await
    }

    async fn execute_bool(&self, command: Command) -> Result<bool> {
        let value = self.execute(command, self.params(), None).await?;
        value
            .as_bool()
            .ok_or_else(|| Error::protocol(format!("{command} returned non-boolean {value}")))
    }

    async fn execute_string(&self, command: Command, params: PathParams) -> Result<String> {
        match self.execute(command, params, None).await? {
            Value::String(s) => Ok(s),
            Value::Null => Ok(String::new()),
            other => Ok(other.to_string()),
        }
    }
}

// ============================================================================
// Element - Properties
// ============================================================================

impl Element {
    /// Gets the rendered text.
    pub async fn text(&self) -> Result<String> {
        self.execute_string(Command::GetElementText, self.params())
            .await
    }

    /// Gets the lower-case tag name.
    pub async fn tag_name(&self) -> Result<String> {
        self.execute_string(Command::GetElementTagName, self.params())
            .await
    }

    /// Gets an attribute value.
    ///
    /// Returns `None` if the attribute doesn't exist.
    pub async fn attribute(&self, name: &str) -> Result<Option<String>> {
        let params = self.params().with("name", name);
        let value = self
            .execute(Command::GetElementAttribute, params, None)
            .await?;

        Ok(match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        })
    }

    /// Gets a DOM property value.
    pub async fn property(&self, name: &str) -> Result<Value> {
        let params = self.params().with("name", name);
        self.execute(Command::GetElementProperty, params, None)
            .await
    }

    /// Gets the computed value of a CSS property.
    pub async fn css_value(&self, property_name: &str) -> Result<String> {
        let params = self.params().with("property_name", property_name);
        self.execute_string(Command::GetElementCssValue, params)
            .await
    }

    /// Gets the element's bounding rectangle.
    pub async fn rect(&self) -> Result<Rect> {
        let value = self
            .execute(Command::GetElementRect, self.params(), None)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Checks if the element is displayed.
    pub async fn is_displayed(&self) -> Result<bool> {
        self.execute_bool(Command::IsElementDisplayed).await
    }

    /// Checks if the element is enabled.
    pub async fn is_enabled(&self) -> Result<bool> {
        self.execute_bool(Command::IsElementEnabled).await
    }

    /// Checks if a checkbox, radio button or option is selected.
    pub async fn is_selected(&self) -> Result<bool> {
        self.execute_bool(Command::IsElementSelected).await
    }
}

// ============================================================================
// Element - Actions
// ============================================================================

impl Element {
    /// Clicks the element.
    pub async fn click(&self) -> Result<()> {
        debug!(element_id = %self.id, "Clicking element");
        self.execute(Command::ElementClick, self.params(), None)
            .await?;
        Ok(())
    }

    /// Clears an editable element.
    pub async fn clear(&self) -> Result<()> {
        debug!(element_id = %self.id, "Clearing element");
        self.execute(Command::ElementClear, self.params(), None)
            .await?;
        Ok(())
    }

    /// Types text into the element.
    ///
    /// Sends both the `text` form and the per-character `value` form, so
    /// either dialect of remote end accepts it.
    pub async fn send_keys(&self, keys: &str) -> Result<()> {
        debug!(element_id = %self.id, text_len = keys.len(), "Sending keys");

        let chars: Vec<String> = keys.chars().map(String::from).collect();
        let body = json!({ "text": keys, "value": chars });

        self.execute(Command::ElementSendKeys, self.params(), Some(body))
            .await?;
        Ok(())
    }
}

// ============================================================================
// Element - Search
// ============================================================================

impl Element {
    /// Finds a descendant element.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let form = bridge.find_element_by(By::id("login-form"), None).await?;
    /// let btn = form.find_element(By::css("button[type='submit']")).await?;
    /// ```
    pub async fn find_element(&self, by: impl Into<By>) -> Result<Element> {
        self.bridge()?
            .find_element_by(by.into(), Some(self))
            .await
    }

    /// Finds all matching descendant elements.
    pub async fn find_elements(&self, by: impl Into<By>) -> Result<Vec<Element>> {
        self.bridge()?
            .find_elements_by(by.into(), Some(self))
            .await
    }
}

// ============================================================================
// Tests
// ============================================================================
