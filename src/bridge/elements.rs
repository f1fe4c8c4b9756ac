//! Element lookup.
//!
//! Locators are translated to W3C strategies before dispatch. A lookup
//! with a parent element goes to the child route with the parent id in
//! the path; the body is the same either way.

use tracing::debug;

use crate::browser::{By, Element};
use crate::error::Result;
use crate::protocol::{Command, PathParams};

use super::Bridge;

// ============================================================================
// Bridge - Element Search
// ============================================================================

impl Bridge {
    /// Finds the first element matching `by`.
    ///
    /// Searches the document, or the descendants of `parent` when given.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use webdriver_bridge::By;
    ///
    /// let form = bridge.find_element_by(By::id("login"), None).await?;
    /// let submit = bridge.find_element_by(By::css("button"), Some(&form)).await?;
    /// ```
    pub async fn find_element_by(
        &self,
        by: impl Into<By>,
        parent: Option<&Element>,
    ) -> Result<Element> {
        let by = by.into().into_w3c();
        debug!(strategy = by.strategy(), value = by.value(), parent = ?parent.map(Element::id), "Finding element");

        let (command, params) = lookup_route(parent, Command::FindElement, Command::FindChildElement);
        let value = self.execute(command, params, Some(by.to_body())).await?;
        self.element_from(&value)
    }

    /// Finds every element matching `by`, in document order.
    pub async fn find_elements_by(
        &self,
        by: impl Into<By>,
        parent: Option<&Element>,
    ) -> Result<Vec<Element>> {
        let by = by.into().into_w3c();
        debug!(strategy = by.strategy(), value = by.value(), parent = ?parent.map(Element::id), "Finding elements");

        let (command, params) =
            lookup_route(parent, Command::FindElements, Command::FindChildElements);
        let value = self.execute(command, params, Some(by.to_body())).await?;
        let elements = self.elements_from(value)?;

        debug!(count = elements.len(), "Found elements");
        Ok(elements)
    }

    /// Returns the element that currently has focus.
    pub async fn active_element(&self) -> Result<Element> {
        let value = self
            .execute(Command::GetActiveElement, PathParams::new(), None)
            .await?;
        self.element_from(&value)
    }
}

/// Picks the root or child command and its path parameters.
fn lookup_route(parent: Option<&Element>, root: Command, child: Command) -> (Command, PathParams) {
    match parent {
        Some(parent) => (child, PathParams::new().with("id", parent.id())),
        None => (root, PathParams::new()),
    }
}

// ============================================================================
// Tests
// ============================================================================
