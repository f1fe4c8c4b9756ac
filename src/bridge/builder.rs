//! Builder pattern for bridge configuration.
//!
//! Provides a fluent API for configuring and connecting a [`Bridge`].
//!
//! # Example
//!
//! ```no_run
//! use webdriver_bridge::{Bridge, Capabilities};
//!
//! # async fn example() -> webdriver_bridge::Result<()> {
//! let bridge = Bridge::builder()
//!     .port(4444)
//!     .desired_capabilities(Capabilities::firefox())
//!     .marionette(true)
//!     .connect()
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Untyped configuration goes through [`BridgeBuilder::from_options`],
//! which rejects unknown keys before anything touches the network.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info};
use url::Url;

use crate::browser::reference::{ElementReference, W3cElementReference};
use crate::error::{Error, Result};
use crate::transport::{HttpTransport, Transport};

use super::capabilities::{Browser, Capabilities};
use super::core::Bridge;

// ============================================================================
// Constants
// ============================================================================

/// Port used to build the default server URL.
pub const DEFAULT_PORT: u16 = 4444;

/// Keys accepted by [`BridgeBuilder::from_options`].
const KNOWN_OPTIONS: &[&str] = &[
    "url",
    "port",
    "http_client",
    "desired_capabilities",
    "marionette",
];

// ============================================================================
// BridgeBuilder
// ============================================================================

/// Builder for configuring a [`Bridge`].
///
/// Use [`Bridge::builder()`] to create a new builder.
pub struct BridgeBuilder {
    /// Server base URL. Defaults to `http://localhost:{port}/wd/hub/`.
    url: Option<String>,
    /// Port for the default URL.
    port: u16,
    /// Wire transport. Defaults to [`HttpTransport`].
    transport: Option<Box<dyn Transport>>,
    /// Capabilities requested at session creation. Defaults to Firefox.
    capabilities: Option<Capabilities>,
    /// Vendor flag written into the capabilities as `marionette`.
    marionette: Option<bool>,
    /// Element reference encoding. Defaults to [`W3cElementReference`].
    references: Option<Arc<dyn ElementReference>>,
}

impl Default for BridgeBuilder {
    fn default() -> Self {
        Self {
            url: None,
            port: DEFAULT_PORT,
            transport: None,
            capabilities: None,
            marionette: None,
            references: None,
        }
    }
}

impl fmt::Debug for BridgeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeBuilder")
            .field("url", &self.url)
            .field("port", &self.port)
            .field("custom_transport", &self.transport.is_some())
            .field("capabilities", &self.capabilities)
            .field("marionette", &self.marionette)
            .field("references", &self.references)
            .finish()
    }
}

// ============================================================================
// BridgeBuilder Implementation
// ============================================================================

impl BridgeBuilder {
    /// Creates a builder with default configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the server base URL.
    ///
    /// A trailing `/` is added if missing.
    #[inline]
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the port of the default URL. Ignored when [`url`](Self::url)
    /// is set.
    #[inline]
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the wire transport.
    #[must_use]
    pub fn http_client(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Sets the capabilities requested at session creation.
    #[inline]
    #[must_use]
    pub fn desired_capabilities(mut self, capabilities: impl Into<Capabilities>) -> Self {
        self.capabilities = Some(capabilities.into());
        self
    }

    /// Sets the `marionette` capability.
    #[inline]
    #[must_use]
    pub fn marionette(mut self, enabled: bool) -> Self {
        self.marionette = Some(enabled);
        self
    }

    /// Overrides the element reference encoding.
    #[must_use]
    pub fn element_reference(mut self, references: impl ElementReference + 'static) -> Self {
        self.references = Some(Arc::new(references));
        self
    }

    /// Builds a builder from an untyped option map.
    ///
    /// Accepts `url` (string), `port` (integer), `desired_capabilities`
    /// (preset name or object) and `marionette` (boolean). `http_client`
    /// is recognised but has no JSON form; set it with
    /// [`http_client`](Self::http_client).
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownOptions`] naming every unrecognised key
    /// - [`Error::InvalidArgument`] if a known key has the wrong type or
    ///   `http_client` is present
    pub fn from_options(options: &Map<String, Value>) -> Result<Self> {
        let unknown: Vec<String> = options
            .keys()
            .filter(|key| !KNOWN_OPTIONS.contains(&key.as_str()))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(Error::unknown_options(unknown));
        }

        if options.contains_key("http_client") {
            return Err(Error::invalid_argument(
                "http_client cannot be given as an option value; set the transport with BridgeBuilder::http_client",
            ));
        }

        let mut builder = Self::new();

        if let Some(url) = options.get("url") {
            let url = url
                .as_str()
                .ok_or_else(|| Error::invalid_argument(format!("url must be a string, got {url}")))?;
            builder = builder.url(url);
        }

        if let Some(port) = options.get("port") {
            let port = port
                .as_u64()
                .and_then(|p| u16::try_from(p).ok())
                .ok_or_else(|| Error::invalid_argument(format!("invalid port: {port}")))?;
            builder = builder.port(port);
        }

        if let Some(capabilities) = options.get("desired_capabilities") {
            let capabilities = match capabilities {
                Value::String(preset) => preset.parse::<Browser>()?.capabilities(),
                Value::Object(map) => Capabilities::from_value(Value::Object(map.clone())),
                other => {
                    return Err(Error::invalid_argument(format!(
                        "desired_capabilities must be a preset name or an object, got {other}"
                    )));
                }
            };
            builder = builder.desired_capabilities(capabilities);
        }

        if let Some(marionette) = options.get("marionette") {
            let marionette = marionette.as_bool().ok_or_else(|| {
                Error::invalid_argument(format!("marionette must be a boolean, got {marionette}"))
            })?;
            builder = builder.marionette(marionette);
        }

        Ok(builder)
    }

    /// Connects to the server and opens a session.
    ///
    /// # Errors
    ///
    /// - [`Error::Url`] if the URL does not parse
    /// - [`Error::MissingSessionId`] if the server returns no session id
    /// - Any transport or remote error from `new_session`
    pub async fn connect(self) -> Result<Bridge> {
        let url = self.server_url()?;
        let capabilities = self.session_capabilities();

        let mut transport: Box<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Box::new(HttpTransport::new()?),
        };
        transport.set_server_url(&url);

        let references = self
            .references
            .unwrap_or_else(|| Arc::new(W3cElementReference));

        debug!(%url, "Connecting");
        let bridge = Bridge::new(transport, references);
        bridge.create_session(capabilities).await?;

        info!(bridge_id = %bridge.id(), %url, "Bridge connected");
        Ok(bridge)
    }
}

// ============================================================================
// Validation
// ============================================================================

impl BridgeBuilder {
    /// Resolves the server URL, enforcing a trailing slash.
    fn server_url(&self) -> Result<Url> {
        let mut url = match &self.url {
            Some(url) => url.clone(),
            None => format!("http://localhost:{}/wd/hub/", self.port),
        };
        if !url.ends_with('/') {
            url.push('/');
        }
        Ok(Url::parse(&url)?)
    }

    /// Applies the `marionette` override to the requested capabilities.
    fn session_capabilities(&self) -> Capabilities {
        let mut capabilities = self
            .capabilities
            .clone()
            .unwrap_or_else(Capabilities::firefox);
        if let Some(marionette) = self.marionette {
            capabilities.set("marionette", marionette);
        }
        capabilities
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::bridge::test_support::session_payload;
    use crate::browser::reference::tests::KeyedReference;
    use crate::protocol::Method;
    use crate::transport::scripted::ScriptedTransport;

    fn options(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn test_default_url() {
        let url = BridgeBuilder::new().server_url().expect("url");
        assert_eq!(url.as_str(), "http://localhost:4444/wd/hub/");
    }

    #[test]
    fn test_default_url_uses_port() {
        let url = BridgeBuilder::new().port(9515).server_url().expect("url");
        assert_eq!(url.as_str(), "http://localhost:9515/wd/hub/");
    }

    #[test]
    fn test_trailing_slash_enforced() {
        let url = BridgeBuilder::new()
            .url("http://grid.local:4444/wd/hub")
            .server_url()
            .expect("url");
        assert_eq!(url.as_str(), "http://grid.local:4444/wd/hub/");
    }

    #[test]
    fn test_invalid_url() {
        let err = BridgeBuilder::new().url("not a url").server_url().unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }

    #[test]
    fn test_default_capabilities_are_firefox() {
        let caps = BridgeBuilder::new().session_capabilities();
        assert_eq!(caps, Capabilities::firefox());
    }

    #[test]
    fn test_marionette_written_into_capabilities() {
        let caps = BridgeBuilder::new()
            .desired_capabilities(Browser::Firefox)
            .marionette(false)
            .session_capabilities();
        assert_eq!(caps.get("marionette"), Some(&json!(false)));
    }

    #[test]
    fn test_from_options_accepts_known_keys() {
        let builder = BridgeBuilder::from_options(&options(json!({
            "url": "http://remote:4444/wd/hub/",
            "port": 5555,
            "desired_capabilities": "chrome",
            "marionette": true
        })))
        .expect("builder");

        assert_eq!(builder.url.as_deref(), Some("http://remote:4444/wd/hub/"));
        assert_eq!(builder.port, 5555);
        assert_eq!(builder.capabilities, Some(Capabilities::chrome()));
        assert_eq!(builder.marionette, Some(true));
    }

    #[test]
    fn test_from_options_capabilities_object() {
        let builder = BridgeBuilder::from_options(&options(json!({
            "desired_capabilities": {"browserName": "firefox", "acceptInsecureCerts": true}
        })))
        .expect("builder");

        let caps = builder.capabilities.expect("capabilities");
        assert_eq!(caps.accept_insecure_certs(), Some(true));
    }

    #[test]
    fn test_from_options_rejects_unknown_keys() {
        let err = BridgeBuilder::from_options(&options(json!({
            "port": 4444,
            "colour": "red",
            "speed": 11
        })))
        .unwrap_err();

        assert!(err.is_argument_error());
        assert_eq!(err.to_string(), "unknown options: colour, speed");
    }

    #[test]
    fn test_from_options_http_client_points_to_setter() {
        let err = BridgeBuilder::from_options(&options(json!({"http_client": {}}))).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert!(err.to_string().contains("BridgeBuilder::http_client"), "{err}");
    }

    #[test]
    fn test_from_options_unknown_keys_reported_before_http_client() {
        let err = BridgeBuilder::from_options(&options(json!({
            "http_client": {},
            "colour": "red"
        })))
        .unwrap_err();
        assert!(matches!(err, Error::UnknownOptions { ref keys } if keys == &["colour"]));
    }

    #[test]
    fn test_from_options_rejects_bad_types() {
        for bad in [
            json!({"url": 1}),
            json!({"port": "x"}),
            json!({"port": 70000}),
            json!({"marionette": "yes"}),
            json!({"desired_capabilities": 3}),
            json!({"desired_capabilities": "netscape"}),
        ] {
            let err = BridgeBuilder::from_options(&options(bad.clone())).unwrap_err();
            assert!(err.is_argument_error(), "{bad}");
        }
    }

    #[tokio::test]
    async fn test_connect_opens_session() {
        let transport = ScriptedTransport::new();
        transport.respond(session_payload("s-1"));

        let bridge = BridgeBuilder::new()
            .http_client(transport.clone())
            .desired_capabilities(Capabilities::chrome())
            .marionette(true)
            .connect()
            .await
            .expect("connect");

        assert_eq!(bridge.session_id().expect("id").as_str(), "s-1");

        let call = transport.last_call().expect("call");
        assert_eq!(call.method, Method::Post);
        assert_eq!(call.path, "/session");
        assert_eq!(
            call.body,
            Some(json!({
                "desiredCapabilities": {"browserName": "chrome", "marionette": true}
            }))
        );
    }

    #[tokio::test]
    async fn test_connect_fails_without_session_id() {
        let transport = ScriptedTransport::new();
        transport.respond(json!({"value": {"browserName": "firefox"}}));

        let err = BridgeBuilder::new()
            .http_client(transport.clone())
            .connect()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::MissingSessionId));
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_connect_with_custom_element_reference() {
        let transport = ScriptedTransport::new();
        transport.respond(session_payload("s-2"));

        let bridge = BridgeBuilder::new()
            .http_client(transport)
            .element_reference(KeyedReference("element-id"))
            .connect()
            .await
            .expect("connect");

        let element = bridge
            .element_from(&json!({"element-id": "E1"}))
            .expect("element");
        assert_eq!(element.id().as_str(), "E1");
    }

    #[test]
    fn test_connect_blocking() {
        let transport = ScriptedTransport::new();
        transport.respond(session_payload("blocking"));

        let bridge = tokio_test::block_on(BridgeBuilder::new().http_client(transport).connect())
            .expect("connect");
        assert_eq!(bridge.session_id().expect("id").as_str(), "blocking");
    }
}
