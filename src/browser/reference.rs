//! Element reference encoding.
//!
//! Servers return elements as single-key JSON objects:
//!
//! ```json
//! { "element-6066-11e4-a52e-4f735466cecf": "E1" }
//! ```
//!
//! Older servers use `"ELEMENT"` as the key. An [`ElementReference`] knows
//! how to pull the raw id out of such an object and how to build one back
//! for script arguments.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Weak;

use serde_json::{Map, Value};

use crate::bridge::BridgeInner;
use crate::error::{Error, Result};
use crate::identifiers::ElementId;

use super::Element;

// ============================================================================
// Constants
// ============================================================================

/// Reference key defined by the W3C WebDriver specification.
pub const W3C_ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Reference key used by the legacy JSON wire protocol.
pub const LEGACY_ELEMENT_KEY: &str = "ELEMENT";

// ============================================================================
// ElementReference
// ============================================================================

/// Converts between raw element ids and their wire reference objects.
///
/// The bridge holds one of these and hands it to every element codec and
/// script unwrapper call. Swap it out to talk to a server with a
/// non-standard reference key.
pub trait ElementReference: Send + Sync + fmt::Debug {
    /// Extracts the raw id if `value` is a reference object.
    fn element_id(&self, value: &Value) -> Option<ElementId>;

    /// Builds the reference object for `id`.
    fn to_reference(&self, id: &ElementId) -> Value;
}

/// Standard reference handling.
///
/// Reads `ELEMENT` first, then the W3C key. Writes the W3C key.
#[derive(Debug, Clone, Copy, Default)]
pub struct W3cElementReference;

impl ElementReference for W3cElementReference {
    fn element_id(&self, value: &Value) -> Option<ElementId> {
        let object = value.as_object()?;
        [LEGACY_ELEMENT_KEY, W3C_ELEMENT_KEY]
            .iter()
            .find_map(|key| object.get(*key).and_then(Value::as_str))
            .map(ElementId::new)
    }

    fn to_reference(&self, id: &ElementId) -> Value {
        let mut object = Map::new();
        object.insert(W3C_ELEMENT_KEY.to_string(), Value::String(id.to_string()));
        Value::Object(object)
    }
}

// ============================================================================
// Codec
// ============================================================================

/// Wraps one reference object into a handle.
///
/// # Errors
///
/// Returns [`Error::Protocol`] if `value` is not a reference object.
pub(crate) fn element_from(
    value: &Value,
    references: &dyn ElementReference,
    bridge: &Weak<BridgeInner>,
) -> Result<Element> {
    references
        .element_id(value)
        .map(|id| Element::new(id, bridge.clone()))
        .ok_or_else(|| Error::protocol(format!("expected an element reference, got {value}")))
}

/// Wraps an array of reference objects, preserving server order.
///
/// # Errors
///
/// Returns [`Error::Protocol`] if `value` is not an array or any entry is
/// not a reference object.
pub(crate) fn elements_from(
    value: Value,
    references: &dyn ElementReference,
    bridge: &Weak<BridgeInner>,
) -> Result<Vec<Element>> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| element_from(item, references, bridge))
            .collect(),
        other => Err(Error::protocol(format!(
            "expected an array of element references, got {other}"
        ))),
    }
}

// ============================================================================
// Tests
// ============================================================================
