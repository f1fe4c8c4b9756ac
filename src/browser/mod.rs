//! Browser-side entities and codecs.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Element`] | DOM element handle |
//! | [`By`] | Locator strategy |
//! | [`ScriptValue`] | Script argument / result tree |
//! | [`ElementReference`] | Element reference encoding |
//!
//! # Example
//!
//! ```ignore
//! use webdriver_bridge::{By, ScriptValue};
//!
//! let link = bridge.find_element_by(By::link_text("More information..."), None).await?;
//! let href = bridge
//!     .execute_script("return arguments[0].href;", &[ScriptValue::from(&link)])
//!     .await?;
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// DOM element handles.
pub mod element;

/// Element reference encoding.
pub mod reference;

/// Script arguments and results.
pub mod script;

/// Locator strategies.
pub mod selector;

// ============================================================================
// Re-exports
// ============================================================================

pub use element::{Element, Rect};
pub use reference::{ElementReference, LEGACY_ELEMENT_KEY, W3C_ELEMENT_KEY, W3cElementReference};
pub use script::ScriptValue;
pub use selector::{By, escape_css};
