//! `reqwest`-backed transport.
//!
//! Sends JSON over HTTP to a WebDriver server. Paths from the bridge are
//! joined relative to the server URL, so `/session` against
//! `http://localhost:4444/wd/hub/` becomes
//! `http://localhost:4444/wd/hub/session`.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::{Value, json};
use tracing::{debug, trace};
use url::Url;

use crate::error::{Error, Result};
use crate::protocol::{Method, WireError};

use super::Transport;

// ============================================================================
// Constants
// ============================================================================

/// Whole-request timeout for a single call, connect through body read.
///
/// Kept above the W3C default page load timeout (300s) so the remote end
/// reports its own timeout first.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(330);

/// Server URL used until the builder supplies one.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:4444/wd/hub/";

/// Content type of every request body.
const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

// ============================================================================
// HttpTransport
// ============================================================================

/// HTTP transport for a WebDriver server.
pub struct HttpTransport {
    /// Shared HTTP client.
    client: Client,
    /// Base URL, always ending in `/`.
    server_url: Url,
    /// Set once by `close`.
    closed: AtomicBool,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("server_url", &self.server_url.as_str())
            .field("closed", &self.closed.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

// ============================================================================
// HttpTransport - Constructors
// ============================================================================

impl HttpTransport {
    /// Creates a transport with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    /// Creates a transport with a custom timeout.
    ///
    /// The timeout bounds the whole request: connecting, sending and
    /// reading the response body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the HTTP client cannot be built.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(client)
    }

    /// Creates a transport around an existing client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Url`] if the default server URL fails to parse.
    pub fn with_client(client: Client) -> Result<Self> {
        Ok(Self {
            client,
            server_url: Url::parse(DEFAULT_SERVER_URL)?,
            closed: AtomicBool::new(false),
        })
    }

    /// Returns the base URL requests are joined against.
    #[inline]
    #[must_use]
    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    /// Joins a bridge path onto the server URL.
    ///
    /// URL joining collapses `.` and `..` segments (percent-encoded or
    /// not), which would retarget the request, so such paths are refused.
    fn endpoint(&self, path: &str) -> Result<Url> {
        let relative = path.trim_start_matches('/');
        if relative.split('/').any(is_dot_segment) {
            return Err(Error::invalid_argument(format!(
                "path {path:?} contains a dot segment"
            )));
        }
        Ok(self.server_url.join(relative)?)
    }
}

// ============================================================================
// Transport
// ============================================================================

#[async_trait]
impl Transport for HttpTransport {
    fn set_server_url(&mut self, url: &Url) {
        self.server_url = url.clone();
    }

    async fn call(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        if self.closed.load(Ordering::Acquire) {
            return Err(Error::TransportClosed);
        }

        let url = self.endpoint(path)?;
        let mut request = self
            .client
            .request(http_method(method), url.clone())
            .header(ACCEPT, "application/json");

        // POST always carries a body, even if empty.
        let empty = json!({});
        let body = match (body, method) {
            (Some(body), _) => Some(body),
            (None, Method::Post) => Some(&empty),
            (None, _) => None,
        };
        if let Some(body) = body {
            trace!(%url, %body, "Request body");
            request = request
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        debug!(%method, %url, status = status.as_u16(), len = text.len(), "Response received");

        let payload = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str::<Value>(&text) {
                Ok(payload) => payload,
                Err(_) if !status.is_success() => {
                    return Err(Error::transport(format!("{status}: {text}")));
                }
                Err(e) => return Err(e.into()),
            }
        };

        if let Some(error) = WireError::from_payload(&payload) {
            return Err(error.into_error(status.as_u16()));
        }

        if !status.is_success() {
            return Err(Error::transport(format!("{status}: {text}")));
        }

        Ok(payload)
    }

    async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(Error::TransportClosed);
        }
        debug!(server_url = %self.server_url, "Transport closed");
        Ok(())
    }
}

/// Returns `true` for segments URL parsing treats as `.` or `..`.
fn is_dot_segment(segment: &str) -> bool {
    matches!(
        segment.to_ascii_lowercase().as_str(),
        "." | ".." | "%2e" | "%2e%2e" | ".%2e" | "%2e."
    )
}

/// Maps a wire verb onto the HTTP client's method type.
fn http_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Delete => reqwest::Method::DELETE,
    }
}

// ============================================================================
// Tests
// ============================================================================
