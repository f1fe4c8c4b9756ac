//! WebDriver Bridge - W3C WebDriver wire-protocol client core.
//!
//! This library turns semantic browser-automation calls into HTTP requests
//! against a remote WebDriver server and turns the JSON responses back into
//! typed results.
//!
//! # Architecture
//!
//! The bridge follows a client-server model:
//!
//! - **Local End (Rust)**: Resolves commands to routes, sends JSON, decodes replies
//! - **Remote End (WebDriver server)**: geckodriver, chromedriver, Selenium Grid
//!
//! Key design principles:
//!
//! - Commands are data: one immutable table maps each [`Command`] to a verb and path template
//! - One outstanding request per [`Bridge`]; no retries, no client-side timeouts in the core
//! - [`Element`] handles hold a weak link to their bridge and never keep it alive
//! - Collaborators are explicit: [`Transport`] for the wire, [`ElementReference`] for element encoding
//!
//! # Quick Start
//!
//! ```no_run
//! use webdriver_bridge::{Bridge, By, Capabilities, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Connect to a server on the default http://localhost:4444/wd/hub/
//!     let bridge = Bridge::builder()
//!         .desired_capabilities(Capabilities::firefox())
//!         .connect()
//!         .await?;
//!
//!     // Navigate and interact
//!     bridge.navigate("https://example.com").await?;
//!     let heading = bridge.find_element_by(By::tag_name("h1"), None).await?;
//!     println!("Heading: {}", heading.text().await?);
//!
//!     bridge.quit().await
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`bridge`] | [`Bridge`], its builder and command surface |
//! | [`browser`] | [`Element`], [`By`], [`ScriptValue`] and codecs |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`protocol`] | Command table, path resolution, response envelope |
//! | [`transport`] | [`Transport`] trait and HTTP implementation |

// ============================================================================
// Modules
// ============================================================================

/// Remote session bridge.
///
/// Use [`Bridge::builder()`] to connect.
pub mod bridge;

/// Browser-side entities: Element, By, ScriptValue.
pub mod browser;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers for sessions, elements and bridges.
pub mod identifiers;

/// Wire protocol vocabulary.
///
/// Command registry, path templates and response handling.
pub mod protocol;

/// Wire transport layer.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Bridge types
pub use bridge::{Bridge, BridgeBuilder, Browser, Capabilities, Cookie, FrameTarget, Timeouts};

// Browser types
pub use browser::{By, Element, ElementReference, Rect, ScriptValue, W3cElementReference};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{BridgeId, ElementId, SessionId};

// Protocol types
pub use protocol::{Command, Method, PathParams};

// Transport types
pub use transport::{HttpTransport, Transport};
