//! Session capabilities.
//!
//! A thin wrapper over the JSON object sent as `desiredCapabilities` and
//! returned by the remote end. Presets cover the browsers the remote end
//! is commonly asked for.
//!
//! # Example
//!
//! ```ignore
//! use webdriver_bridge::{Browser, Capabilities};
//!
//! let caps = Capabilities::firefox().with("acceptInsecureCerts", true);
//! let same: Capabilities = "firefox".parse::<Browser>()?.capabilities();
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{Error, Result};

// ============================================================================
// Browser
// ============================================================================

/// Browser presets addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Browser {
    Firefox,
    Chrome,
    Edge,
    Safari,
    InternetExplorer,
}

impl Browser {
    /// Returns the preset name accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Firefox => "firefox",
            Self::Chrome => "chrome",
            Self::Edge => "edge",
            Self::Safari => "safari",
            Self::InternetExplorer => "internet_explorer",
        }
    }

    /// Returns the `browserName` the remote end expects.
    #[must_use]
    pub fn browser_name(self) -> &'static str {
        match self {
            Self::Firefox => "firefox",
            Self::Chrome => "chrome",
            Self::Edge => "MicrosoftEdge",
            Self::Safari => "safari",
            Self::InternetExplorer => "internet explorer",
        }
    }

    /// Returns the preset capabilities.
    #[must_use]
    pub fn capabilities(self) -> Capabilities {
        Capabilities::new().with("browserName", self.browser_name())
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Browser {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "firefox" => Ok(Self::Firefox),
            "chrome" => Ok(Self::Chrome),
            "edge" => Ok(Self::Edge),
            "safari" => Ok(Self::Safari),
            "internet_explorer" | "ie" => Ok(Self::InternetExplorer),
            other => Err(Error::invalid_argument(format!(
                "unknown capabilities preset: {other}"
            ))),
        }
    }
}

// ============================================================================
// Capabilities
// ============================================================================

/// Capability map sent to and returned by the remote end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capabilities(Map<String, Value>);

impl Capabilities {
    /// Creates an empty capability map.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a capabilities payload.
    ///
    /// Anything other than a JSON object yields an empty map.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            Value::Null => Self::default(),
            other => {
                warn!(value = %other, "Capabilities payload is not an object");
                Self::default()
            }
        }
    }

    /// Firefox preset.
    #[must_use]
    pub fn firefox() -> Self {
        Browser::Firefox.capabilities()
    }

    /// Chrome preset.
    #[must_use]
    pub fn chrome() -> Self {
        Browser::Chrome.capabilities()
    }

    /// Edge preset.
    #[must_use]
    pub fn edge() -> Self {
        Browser::Edge.capabilities()
    }

    /// Safari preset.
    #[must_use]
    pub fn safari() -> Self {
        Browser::Safari.capabilities()
    }

    /// Internet Explorer preset.
    #[must_use]
    pub fn internet_explorer() -> Self {
        Browser::InternetExplorer.capabilities()
    }

    /// Sets a capability, returning the updated map.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets a capability in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns a raw capability.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn browser_name(&self) -> Option<&str> {
        self.get_str("browserName")
    }

    #[must_use]
    pub fn browser_version(&self) -> Option<&str> {
        self.get_str("browserVersion")
            .or_else(|| self.get_str("version"))
    }

    #[must_use]
    pub fn platform_name(&self) -> Option<&str> {
        self.get_str("platformName")
            .or_else(|| self.get_str("platform"))
    }

    #[must_use]
    pub fn accept_insecure_certs(&self) -> Option<bool> {
        self.get("acceptInsecureCerts").and_then(Value::as_bool)
    }

    #[must_use]
    pub fn page_load_strategy(&self) -> Option<&str> {
        self.get_str("pageLoadStrategy")
    }

    /// Returns the underlying map.
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the wrapper, returning a JSON object.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
}

impl From<Browser> for Capabilities {
    fn from(browser: Browser) -> Self {
        browser.capabilities()
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
    fn test_presets() {
        assert_eq!(Capabilities::firefox().browser_name(), Some("firefox"));
        assert_eq!(Capabilities::chrome().browser_name(), Some("chrome"));
        assert_eq!(Capabilities::edge().browser_name(), Some("MicrosoftEdge"));
        assert_eq!(Capabilities::safari().browser_name(), Some("safari"));
        assert_eq!(
            Capabilities::internet_explorer().browser_name(),
            Some("internet explorer")
        );
    }

    #[test]
    fn test_browser_from_str() {
        for browser in [
            Browser::Firefox,
            Browser::Chrome,
            Browser::Edge,
            Browser::Safari,
            Browser::InternetExplorer,
        ] {
            assert_eq!(browser.as_str().parse::<Browser>().expect("preset"), browser);
        }
        assert!("netscape".parse::<Browser>().unwrap_err().is_argument_error());
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let caps = Capabilities::firefox().with("marionette", true);
        assert_eq!(
            serde_json::to_value(&caps).expect("serialize"),
            json!({"browserName": "firefox", "marionette": true})
        );
    }

    #[test]
    fn test_from_value_accessors() {
        let caps = Capabilities::from_value(json!({
            "browserName": "firefox",
            "browserVersion": "128.0",
            "platformName": "linux",
            "acceptInsecureCerts": false,
            "pageLoadStrategy": "normal"
        }));
        assert_eq!(caps.browser_version(), Some("128.0"));
        assert_eq!(caps.platform_name(), Some("linux"));
        assert_eq!(caps.accept_insecure_certs(), Some(false));
        assert_eq!(caps.page_load_strategy(), Some("normal"));
    }

    #[test]
    fn test_legacy_version_keys() {
        let caps = Capabilities::from_value(json!({"version": "52", "platform": "WINDOWS"}));
        assert_eq!(caps.browser_version(), Some("52"));
        assert_eq!(caps.platform_name(), Some("WINDOWS"));
    }

    #[test]
    fn test_non_object_payload_is_empty() {
        assert!(Capabilities::from_value(json!("x")).as_map().is_empty());
        assert!(Capabilities::from_value(Value::Null).as_map().is_empty());
    }
}
