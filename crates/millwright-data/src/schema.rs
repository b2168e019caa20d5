//! Raw recipe-record schema and field access.
//!
//! Recipe packs are heterogeneous and frequently hand-edited, so records are
//! deserialized into a struct of optional raw values rather than a strict
//! shape; every field keeps its original JSON form and is interpreted
//! leniently at the point of use. Field presence follows the pack format's
//! scripting heritage: `null`, `false`, `0`, and `""` all count as absent.

use serde::Deserialize;
use serde_json::Value;

/// One entry of the recipe document, with every field still in raw form.
///
/// Unknown fields are ignored; missing fields deserialize to `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordData {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, rename = "type")]
    pub kind: Option<Value>,
    #[serde(default)]
    pub output: Option<Value>,
    #[serde(default)]
    pub input: Option<Value>,
    #[serde(default)]
    pub pattern: Option<Value>,
    #[serde(default)]
    pub keys: Option<Value>,
    #[serde(default)]
    pub heated: Option<Value>,
    #[serde(default)]
    pub superheated: Option<Value>,
    #[serde(default, rename = "processingTime")]
    pub processing_time: Option<Value>,
    #[serde(default, rename = "keepHeldItem")]
    pub keep_held_item: Option<Value>,
}

impl RecordData {
    /// Deserialize a record from one document value. Returns `None` for
    /// anything that is not a JSON object.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    fn field(slot: &Option<Value>) -> Option<&Value> {
        slot.as_ref().filter(|value| truthy(value))
    }

    /// The declared recipe identifier, coerced to a string.
    pub fn id(&self) -> Option<String> {
        Self::field(&self.id).map(coerce_string)
    }

    /// The identifier to show in diagnostics: the declared id, or `N/A`.
    pub fn display_id(&self) -> String {
        self.id().unwrap_or_else(|| "N/A".to_string())
    }

    /// The raw recipe-kind tag, coerced to a string but not lower-cased.
    pub fn kind_tag(&self) -> Option<String> {
        Self::field(&self.kind).map(coerce_string)
    }

    pub fn output(&self) -> Option<&Value> {
        Self::field(&self.output)
    }

    pub fn input(&self) -> Option<&Value> {
        Self::field(&self.input)
    }

    pub fn pattern(&self) -> Option<&Value> {
        Self::field(&self.pattern)
    }

    pub fn keys(&self) -> Option<&Value> {
        Self::field(&self.keys)
    }

    pub fn heated(&self) -> bool {
        Self::field(&self.heated).is_some()
    }

    pub fn superheated(&self) -> bool {
        Self::field(&self.superheated).is_some()
    }

    pub fn keep_held_item(&self) -> bool {
        Self::field(&self.keep_held_item).is_some()
    }

    pub fn processing_time(&self) -> Option<&Value> {
        Self::field(&self.processing_time)
    }

    /// Names every required field this record is missing, in the order the
    /// pack format documents them: `type`, `output`, then either
    /// `pattern`/`keys` (mechanical crafting) or `input` (everything else).
    ///
    /// When `type` itself is missing the kind-specific requirement cannot be
    /// determined and is not reported.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let tag = self.kind_tag();
        if tag.is_none() {
            missing.push("type");
        }
        if self.output().is_none() {
            missing.push("output");
        }
        match tag.as_deref() {
            None => {}
            Some(tag) if tag.eq_ignore_ascii_case("mechanical_crafting") => {
                if self.pattern().is_none() {
                    missing.push("pattern");
                }
                if self.keys().is_none() {
                    missing.push("keys");
                }
            }
            Some(_) => {
                if self.input().is_none() {
                    missing.push("input");
                }
            }
        }
        missing
    }
}

/// Scripting-style truthiness: `null`, `false`, numeric zero, and the empty
/// string are absent; arrays and objects are always present, even empty.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_none_or(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Coerce any JSON value to display text: strings verbatim, everything else
/// rendered as compact JSON.
pub(crate) fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// The JSON type name of a value, for diagnostics.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ===========================================================================
// Tests
// ===========================================================================
