//! Script arguments and results.
//!
//! `execute_script` results are arbitrary JSON in which any node may be an
//! element reference. [`unwrap_script_result`] walks the tree once and
//! turns every reference into an [`Element`] handle; everything else keeps
//! its shape.

// ============================================================================
// Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Weak;

use serde_json::{Map, Number, Value};

use crate::bridge::BridgeInner;

use super::Element;
use super::reference::ElementReference;

// ============================================================================
// ScriptValue
// ============================================================================

/// A script argument or result.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
    /// `null` / `undefined`.
    Null,
    /// Boolean.
    Bool(bool),
    /// Number, kept as parsed.
    Number(Number),
    /// String.
    String(String),
    /// Array.
    Array(Vec<ScriptValue>),
    /// Plain object.
    Object(BTreeMap<String, ScriptValue>),
    /// DOM element.
    Element(Element),
}

impl ScriptValue {
    /// Returns `true` for [`ScriptValue::Null`].
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[ScriptValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&BTreeMap<String, ScriptValue>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Consumes the value, returning the element it holds.
    #[must_use]
    pub fn into_element(self) -> Option<Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Looks up a member of an object value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ScriptValue> {
        self.as_object()?.get(key)
    }

    /// Encodes the value as script-argument JSON.
    ///
    /// Elements become reference objects built by `references`.
    #[must_use]
    pub fn to_wire(&self, references: &dyn ElementReference) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
            Self::Array(items) => {
                Value::Array(items.iter().map(|item| item.to_wire(references)).collect())
            }
            Self::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, item)| (key.clone(), item.to_wire(references)))
                    .collect::<Map<_, _>>(),
            ),
            Self::Element(element) => references.to_reference(element.id()),
        }
    }
}

// ============================================================================
// Unwrapping
// ============================================================================

/// Converts a raw script result, replacing every reference with a handle.
///
/// Total over JSON: an object is tested as a reference first and only
/// descended into when it is not one.
#[must_use]
pub(crate) fn unwrap_script_result(
    value: Value,
    references: &dyn ElementReference,
    bridge: &Weak<BridgeInner>,
) -> ScriptValue {
    if let Some(id) = references.element_id(&value) {
        return ScriptValue::Element(Element::new(id, bridge.clone()));
    }

    match value {
        Value::Null => ScriptValue::Null,
        Value::Bool(b) => ScriptValue::Bool(b),
        Value::Number(n) => ScriptValue::Number(n),
        Value::String(s) => ScriptValue::String(s),
        Value::Array(items) => ScriptValue::Array(
            items
                .into_iter()
                .map(|item| unwrap_script_result(item, references, bridge))
                .collect(),
        ),
        Value::Object(map) => ScriptValue::Object(
            map.into_iter()
                .map(|(key, item)| (key, unwrap_script_result(item, references, bridge)))
                .collect(),
        ),
    }
}

// ============================================================================
// From implementations for ergonomics
// ============================================================================

impl From<bool> for ScriptValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for ScriptValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<&str> for ScriptValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ScriptValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Element> for ScriptValue {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<&Element> for ScriptValue {
    fn from(element: &Element) -> Self {
        Self::Element(element.clone())
    }
}

impl<T: Into<ScriptValue>> From<Vec<T>> for ScriptValue {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

/// Converts without looking for element references; server results go
/// through [`unwrap_script_result`] instead.
impl From<Value> for ScriptValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::browser::reference::W3cElementReference;
    use crate::browser::reference::tests::KeyedReference;
    use crate::identifiers::ElementId;

    fn unwrap_with(value: Value, references: &dyn ElementReference) -> ScriptValue {
        unwrap_script_result(value, references, &Weak::new())
    }

    #[test]
    fn test_nested_reference_becomes_handle() {
        let value = json!({"a": [{"element-id": "E1"}, "text", 3]});
        let result = unwrap_with(value, &KeyedReference("element-id"));

        let items = result.get("a").and_then(ScriptValue::as_array).expect("array");
        assert_eq!(items.len(), 3);
        assert_eq!(
            items[0].as_element().map(|e| e.id().clone()),
            Some(ElementId::new("E1"))
        );
        assert_eq!(items[1], ScriptValue::String("text".into()));
        assert_eq!(items[2].as_i64(), Some(3));
    }

    #[test]
    fn test_scalars_pass_through() {
        let refs = W3cElementReference;
        assert_eq!(unwrap_with(json!(null), &refs), ScriptValue::Null);
        assert_eq!(unwrap_with(json!(true), &refs), ScriptValue::Bool(true));
        assert_eq!(unwrap_with(json!(1.5), &refs).as_f64(), Some(1.5));
        assert_eq!(unwrap_with(json!("x"), &refs).as_str(), Some("x"));
    }

    #[test]
    fn test_top_level_reference() {
        let result = unwrap_with(json!({"ELEMENT": "root"}), &W3cElementReference);
        assert_eq!(result.into_element().map(|e| e.id().to_string()), Some("root".into()));
    }

    #[test]
    fn test_plain_objects_keep_shape() {
        let value = json!({"x": {"y": [1, 2, {"z": null}]}, "w": false});
        let result = unwrap_with(value.clone(), &W3cElementReference);
        assert_eq!(result, ScriptValue::from(value));
    }

    #[test]
    fn test_to_wire_encodes_elements() {
        let element = Element::new(ElementId::new("E5"), Weak::new());
        let args = ScriptValue::from(vec![
            ScriptValue::from(element),
            ScriptValue::from("s"),
            ScriptValue::from(7_i64),
        ]);

        assert_eq!(
            args.to_wire(&W3cElementReference),
            json!([{"element-6066-11e4-a52e-4f735466cecf": "E5"}, "s", 7])
        );
    }

    #[test]
    fn test_wire_round_trip_through_custom_key() {
        let refs = KeyedReference("element-id");
        let raw = json!({"list": [{"element-id": "E1"}, {"element-id": "E2"}]});
        let unwrapped = unwrap_with(raw.clone(), &refs);
        assert_eq!(unwrapped.to_wire(&refs), raw);
    }
}
