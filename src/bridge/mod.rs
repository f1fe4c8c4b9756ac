//! Remote session bridge.
//!
//! A [`Bridge`] owns one remote session and turns method calls into wire
//! commands through [`Bridge::execute`].
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `core` | Bridge struct, execution engine, session lifecycle |
//! | `builder` | Configuration and connection |
//! | `capabilities` | Capability map and browser presets |
//! | `navigation` | URL navigation, history, page info |
//! | `elements` | Element lookup |
//! | `script` | JavaScript execution |
//! | `window` | Window handles, geometry, frames |
//! | `storage` | Cookies |
//! | `alert` | User prompts |
//! | `timeouts` | Session timeouts, action release |
//! | `legacy` | Operations with no W3C route |
//!
//! # Example
//!
//! ```ignore
//! let bridge = Bridge::builder().connect().await?;
//!
//! // Navigate
//! bridge.navigate("https://example.com").await?;
//!
//! // Find elements
//! let button = bridge.find_element_by(By::css("#submit"), None).await?;
//! button.click().await?;
//!
//! // Scripts
//! let title = bridge.execute_script("return document.title;", &[]).await?;
//! ```

// ============================================================================
// Submodules
// ============================================================================

mod alert;
mod builder;
mod capabilities;
mod core;
mod elements;
mod legacy;
mod navigation;
mod script;
mod storage;
mod timeouts;
mod window;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::{BridgeBuilder, DEFAULT_PORT};
pub use capabilities::{Browser, Capabilities};
pub use self::core::Bridge;
pub(crate) use self::core::BridgeInner;
pub use storage::Cookie;
pub use timeouts::Timeouts;
pub use window::FrameTarget;

// ============================================================================
// Test Support
// ============================================================================
