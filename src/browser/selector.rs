//! Element locator strategies.
//!
//! Provides Selenium-like `By` locators. Only `css selector`, `xpath`,
//! `link text` and `partial link text` are legal on the W3C wire; the
//! other strategies are rewritten into CSS selectors before dispatch.
//!
//! # Example
//!
//! ```ignore
//! use webdriver_bridge::By;
//!
//! // By ID (sent as CSS `#login-form`)
//! let form = bridge.find_element_by(By::id("login-form"), None).await?;
//!
//! // By XPath (sent unchanged)
//! let btn = bridge.find_element_by(By::xpath("//button[@type='submit']"), None).await?;
//!
//! // By tag name (sent as CSS `input`)
//! let inputs = bridge.find_elements_by(By::tag_name("input"), None).await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Value, json};

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Punctuation that must be backslash-escaped in a CSS identifier.
static CSS_RESERVED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(['"\\#.:;,!?+<>=~*^$|%&@`{}\-\[\]()])"#).expect("CSS escape pattern is valid")
});

/// Base added to a leading digit when escaping it.
///
/// The sum is written in decimal. For ASCII digits this spells the same
/// text as the hexadecimal code point escape (`0x30 + d`).
const LEADING_DIGIT_BASE: u32 = 30;

// ============================================================================
// By Enum
// ============================================================================

/// Element locator strategy (like Selenium's `By`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum By {
    /// CSS selector.
    Css(String),

    /// XPath expression.
    XPath(String),

    /// Exact link text of an `<a>` element.
    LinkText(String),

    /// Partial link text of an `<a>` element.
    PartialLinkText(String),

    /// Single class name. Translated to `.value`.
    ClassName(String),

    /// Element `id`. Translated to `#value`.
    Id(String),

    /// `name` attribute. Translated to `*[name='value']`.
    Name(String),

    /// Tag name. Translated to a CSS type selector.
    TagName(String),
}

impl By {
    /// Creates a CSS selector.
    #[inline]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Creates an XPath selector.
    #[inline]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Creates a link text selector.
    #[inline]
    pub fn link_text(text: impl Into<String>) -> Self {
        Self::LinkText(text.into())
    }

    /// Creates a partial link text selector.
    #[inline]
    pub fn partial_link_text(text: impl Into<String>) -> Self {
        Self::PartialLinkText(text.into())
    }

    /// Creates a class name selector.
    #[inline]
    pub fn class_name(class: impl Into<String>) -> Self {
        Self::ClassName(class.into())
    }

    /// Creates an ID selector.
    #[inline]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Creates a name attribute selector.
    #[inline]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Creates a tag name selector.
    #[inline]
    pub fn tag_name(tag: impl Into<String>) -> Self {
        Self::TagName(tag.into())
    }

    /// Builds a locator from its wire strategy name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an unknown strategy.
    pub fn from_parts(strategy: &str, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        Ok(match strategy {
            "css selector" => Self::Css(value),
            "xpath" => Self::XPath(value),
            "link text" => Self::LinkText(value),
            "partial link text" => Self::PartialLinkText(value),
            "class name" => Self::ClassName(value),
            "id" => Self::Id(value),
            "name" => Self::Name(value),
            "tag name" => Self::TagName(value),
            other => {
                return Err(Error::invalid_argument(format!(
                    "unknown locator strategy: {other}"
                )));
            }
        })
    }

    /// Returns the wire strategy name.
    #[must_use]
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::Css(_) => "css selector",
            Self::XPath(_) => "xpath",
            Self::LinkText(_) => "link text",
            Self::PartialLinkText(_) => "partial link text",
            Self::ClassName(_) => "class name",
            Self::Id(_) => "id",
            Self::Name(_) => "name",
            Self::TagName(_) => "tag name",
        }
    }

    /// Returns the selector value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Css(v)
            | Self::XPath(v)
            | Self::LinkText(v)
            | Self::PartialLinkText(v)
            | Self::ClassName(v)
            | Self::Id(v)
            | Self::Name(v)
            | Self::TagName(v) => v,
        }
    }

    /// Rewrites strategies the W3C wire does not accept into CSS selectors.
    ///
    /// | input | output |
    /// |-------|--------|
    /// | `class name` | `css selector` `.escaped` |
    /// | `id` | `css selector` `#escaped` |
    /// | `name` | `css selector` `*[name='escaped']` |
    /// | `tag name` | `css selector`, value unchanged |
    /// | anything else | unchanged |
    #[must_use]
    pub fn into_w3c(self) -> Self {
        match self {
            Self::ClassName(v) => Self::Css(format!(".{}", escape_css(&v))),
            Self::Id(v) => Self::Css(format!("#{}", escape_css(&v))),
            Self::Name(v) => Self::Css(format!("*[name='{}']", escape_css(&v))),
            Self::TagName(v) => Self::Css(v),
            other => other,
        }
    }

    /// Returns the `{"using", "value"}` body of a find command.
    #[must_use]
    pub fn to_body(&self) -> Value {
        json!({
            "using": self.strategy(),
            "value": self.value(),
        })
    }
}

// ============================================================================
// CSS Escaping
// ============================================================================

/// Escapes a value for use inside a CSS selector.
///
/// Every reserved punctuation character gets a leading backslash. A leading
/// ASCII digit `d` is then replaced by `\{30 + d} ` followed by the rest of
/// the escaped string.
#[must_use]
pub fn escape_css(value: &str) -> String {
    let escaped = CSS_RESERVED.replace_all(value, r"\$1").into_owned();

    let mut chars = escaped.chars();
    match chars.next().and_then(|c| c.to_digit(10)) {
        Some(digit) => format!("\\{} {}", LEADING_DIGIT_BASE + digit, chars.as_str()),
        None => escaped,
    }
}

// ============================================================================
// From implementations for ergonomics
// ============================================================================

impl From<&str> for By {
    /// Converts a string to CSS selector (default).
    fn from(s: &str) -> Self {
        Self::Css(s.to_string())
    }
}

impl From<String> for By {
    /// Converts a string to CSS selector (default).
    fn from(s: String) -> Self {
        Self::Css(s)
    }
}

// ============================================================================
// Tests
// ============================================================================
