//! Reading and writing JSON text.
//!
//! The byte layout is left to `serde_json`; this module only converts between
//! its `Value` and the implicitly shared containers of this crate.

use serde_json::Value;

use crate::error::{JsonError, Result};
use crate::jsonarray::JsonArray;
use crate::jsonobject::JsonObject;
use crate::jsonvalue::{JsonType, JsonValue};

/// Layout of the JSON text produced by the writers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum JsonFormat {
  /// Everything on one line, no insignificant whitespace.
  Compact,
  /// One element per line, indented by `serde_json`'s pretty printer.
  #[default]
  Indented,
}

fn render(value: &Value, format: JsonFormat) -> String {
  match format {
    JsonFormat::Compact => value.to_string(),
    JsonFormat::Indented => format!("{:#}", value),
  }
}

fn parse(s: &str) -> Result<Value> {
  Ok(serde_json::from_str(s)?)
}

fn wrong_type(expected: &'static str, found: &Value) -> JsonError {
  JsonError::WrongType {
    expected,
    found: match found {
      Value::Null => JsonType::Null,
      Value::Bool(_) => JsonType::Bool,
      Value::Number(_) => JsonType::Double,
      Value::String(_) => JsonType::String,
      Value::Array(_) => JsonType::Array,
      Value::Object(_) => JsonType::Object,
    }
    .name(),
  }
}

// --- Serialization ---

/// Create JSON text from a JsonArray.
pub fn array_to_string(a: &JsonArray, format: JsonFormat) -> String {
  render(&Value::Array(a.to_variant_list()), format)
}

/// Create JSON text from a JsonObject.
pub fn object_to_string(o: &JsonObject, format: JsonFormat) -> String {
  render(&Value::Object(o.to_variant_map()), format)
}

/// Create JSON text from any value. `Undefined` is written as `null`.
pub fn value_to_string(v: &JsonValue, format: JsonFormat) -> String {
  render(&v.to_variant(), format)
}

// --- Deserialization ---

/// Create a new JsonArray from JSON text.
///
/// # Errors
///
/// `Parse` if the text is not JSON, `WrongType` if it is not an array.
pub fn array_from_string(s: &str) -> Result<JsonArray> {
  match parse(s)? {
    Value::Array(items) => Ok(JsonArray::from_variant_list(&items)),
    other => Err(wrong_type("array", &other)),
  }
}

/// Create a new JsonObject from JSON text.
///
/// # Errors
///
/// `Parse` if the text is not JSON, `WrongType` if it is not an object.
pub fn object_from_string(s: &str) -> Result<JsonObject> {
  match parse(s)? {
    Value::Object(map) => Ok(JsonObject::from_variant_map(&map)),
    other => Err(wrong_type("object", &other)),
  }
}

/// Create a new JsonValue from JSON text of any type.
pub fn value_from_string(s: &str) -> Result<JsonValue> {
  Ok(JsonValue::from_variant(&parse(s)?))
}
