//! HTTP transport layer.
//!
//! The bridge never talks HTTP itself. It hands a verb, a resolved path
//! and an optional JSON body to a [`Transport`] and gets a JSON payload
//! back. Any implementation can be plugged in: the real HTTP client, an
//! in-memory fake, a recording decorator.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐                              ┌─────────────────┐
//! │  Bridge (Rust)  │                              │  Remote End     │
//! │                 │        HTTP + JSON           │  (WebDriver     │
//! │  Transport      │─────────────────────────────►│   server)       │
//! │  .call()        │◄─────────────────────────────│                 │
//! │                 │   http://host:port/wd/hub/   │                 │
//! └─────────────────┘                              └─────────────────┘
//! ```
//!
//! # Lifecycle
//!
//! 1. `set_server_url` - Builder hands over the base URL
//! 2. `call` - One request per command, awaited to completion
//! 3. `close` - Exactly once, from `Bridge::quit`
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `http` | `reqwest`-backed transport |

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::error::Result;
use crate::protocol::Method;

// ============================================================================
// Submodules
// ============================================================================

/// `reqwest`-backed transport.
pub mod http;

#[cfg(test)]
pub(crate) mod scripted;

// ============================================================================
// Re-exports
// ============================================================================

pub use http::HttpTransport;

// ============================================================================
// Transport
// ============================================================================

/// Performs one wire call per command.
///
/// Retry, backoff and timeout policy belong to implementations of this
/// trait, never to the bridge.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Points the transport at the server base URL.
    ///
    /// Called once by the builder before the first request.
    fn set_server_url(&mut self, _url: &Url) {}

    /// Sends `body` to `path` with `method` and returns the raw JSON payload.
    ///
    /// # Errors
    ///
    /// - [`Error::TransportClosed`](crate::Error::TransportClosed) after `close`
    /// - [`Error::WebDriver`](crate::Error::WebDriver) for error payloads
    async fn call(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value>;

    /// Releases the underlying connection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TransportClosed`](crate::Error::TransportClosed) if
    /// already closed.
    async fn close(&self) -> Result<()>;
}
