//! This module defines `JsonValue`, the closed set of values a `JsonArray`
//! or `JsonObject` can hold.

use core::fmt;
use core::hash::{Hash, Hasher};
use std::sync::Arc;

use serde_json::{Number, Value};
use tracing::debug;

use crate::jsonarray::JsonArray;
use crate::jsonobject::JsonObject;

/// Largest integer a double holds without losing precision (2^53).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// The type tag of a `JsonValue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    Undefined,
    Null,
    Bool,
    Double,
    String,
    Array,
    Object,
}

impl JsonType {
    /// Lower-case name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            JsonType::Undefined => "undefined",
            JsonType::Null => "null",
            JsonType::Bool => "bool",
            JsonType::Double => "double",
            JsonType::String => "string",
            JsonType::Array => "array",
            JsonType::Object => "object",
        }
    }
}

/// Represents a JSON value.
///
/// `Array` and `Object` hold implicitly shared handles, so cloning a value
/// never copies a container's elements. Strings are reference counted for the
/// same reason.
///
/// `Undefined` is not a JSON value: it marks absence, e.g. a read past the
/// end of an array. Containers never store it.
#[derive(Debug, Clone, Default)]
pub enum JsonValue {
    /// No value. Returned for out-of-range reads and missing keys.
    ///
    /// ```
    /// # use jsondata::{JsonArray, JsonValue};
    /// assert!(JsonArray::new().at(3).is_undefined());
    /// ```
    Undefined,
    /// JSON `null`. This is the default value.
    #[default]
    Null,
    /// JSON `true` / `false`.
    Bool(bool),
    /// Any JSON number. Integers beyond 2^53 lose precision.
    Double(f64),
    /// A JSON string.
    ///
    /// ```
    /// # use jsondata::JsonValue;
    /// let v = JsonValue::from("hello world");
    /// assert_eq!(v.as_str(), Some("hello world"));
    /// ```
    String(Arc<str>),
    /// A nested array.
    Array(JsonArray),
    /// A nested object.
    Object(JsonObject),
}

impl JsonValue {
    /// Returns the type tag of the value.
    pub fn value_type(&self) -> JsonType {
        match self {
            JsonValue::Undefined => JsonType::Undefined,
            JsonValue::Null => JsonType::Null,
            JsonValue::Bool(_) => JsonType::Bool,
            JsonValue::Double(_) => JsonType::Double,
            JsonValue::String(_) => JsonType::String,
            JsonValue::Array(_) => JsonType::Array,
            JsonValue::Object(_) => JsonType::Object,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, JsonValue::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, JsonValue::Bool(_))
    }

    pub fn is_double(&self) -> bool {
        matches!(self, JsonValue::Double(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let JsonValue::Bool(b) = self { Some(*b) } else { None }
    }

    pub fn as_f64(&self) -> Option<f64> {
        if let JsonValue::Double(d) = self { Some(*d) } else { None }
    }

    /// Returns the number as an `i64` if it is integral and exactly
    /// representable.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            JsonValue::Double(d) if d.fract() == 0.0 && d.abs() <= MAX_SAFE_INTEGER => Some(*d as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let JsonValue::String(s) = self { Some(&**s) } else { None }
    }

    pub fn as_array(&self) -> Option<&JsonArray> {
        if let JsonValue::Array(a) = self { Some(a) } else { None }
    }

    pub fn as_object(&self) -> Option<&JsonObject> {
        if let JsonValue::Object(o) = self { Some(o) } else { None }
    }

    /// Returns the boolean, or `default` for any other type.
    pub fn to_bool(&self, default: bool) -> bool {
        self.as_bool().unwrap_or(default)
    }

    pub fn to_double(&self, default: f64) -> f64 {
        self.as_f64().unwrap_or(default)
    }

    /// Returns the number truncated toward zero, or `default` if the value
    /// is not a number. Out-of-range doubles saturate.
    pub fn to_int(&self, default: i64) -> i64 {
        self.as_f64().map_or(default, |d| d as i64)
    }

    /// Returns the string, or `""` for any other type.
    pub fn to_str(&self) -> &str {
        self.as_str().unwrap_or("")
    }

    /// Returns the nested array, or an empty one if the value is not an
    /// array. The result shares storage with the nested array.
    pub fn to_array(&self) -> JsonArray {
        self.as_array().cloned().unwrap_or_default()
    }

    /// Returns the nested object, or an empty one if the value is not an
    /// object.
    pub fn to_object(&self) -> JsonObject {
        self.as_object().cloned().unwrap_or_default()
    }

    // --- Conversion to and from serde_json ---

    /// Converts a `serde_json::Value`.
    ///
    /// Numbers are read as doubles, so integers beyond 2^53 lose precision.
    pub fn from_variant(value: &Value) -> JsonValue {
        match value {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Number(n) => n.as_f64().map_or(JsonValue::Null, JsonValue::Double),
            Value::String(s) => JsonValue::String(Arc::from(s.as_str())),
            Value::Array(items) => JsonValue::Array(JsonArray::from_variant_list(items)),
            Value::Object(map) => JsonValue::Object(JsonObject::from_variant_map(map)),
        }
    }

    /// Converts into a `serde_json::Value`.
    ///
    /// `Undefined` and non-finite doubles have no JSON form and become `null`.
    /// Integral doubles within 2^53 are written as integers.
    pub fn to_variant(&self) -> Value {
        match self {
            JsonValue::Undefined => Value::Null,
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Double(d) => double_to_variant(*d),
            JsonValue::String(s) => Value::String(s.to_string()),
            JsonValue::Array(a) => Value::Array(a.to_variant_list()),
            JsonValue::Object(o) => Value::Object(o.to_variant_map()),
        }
    }
}

fn double_to_variant(d: f64) -> Value {
    let integral = d.fract() == 0.0 && d.abs() <= MAX_SAFE_INTEGER;
    if integral && !(d == 0.0 && d.is_sign_negative()) {
        return Value::from(d as i64);
    }
    match Number::from_f64(d) {
        Some(n) => Value::Number(n),
        None => {
            debug!(value = d, "non-finite double converted to null");
            Value::Null
        }
    }
}

// Doubles compare numerically, except that NaN equals NaN so that every
// value equals itself.
fn doubles_equal(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn hash_double<H: Hasher>(d: f64, state: &mut H) {
    let canonical = if d == 0.0 {
        0.0f64
    } else if d.is_nan() {
        f64::NAN
    } else {
        d
    };
    canonical.to_bits().hash(state);
}

impl PartialEq for JsonValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JsonValue::Undefined, JsonValue::Undefined) => true,
            (JsonValue::Null, JsonValue::Null) => true,
            (JsonValue::Bool(a), JsonValue::Bool(b)) => a == b,
            (JsonValue::Double(a), JsonValue::Double(b)) => doubles_equal(*a, *b),
            (JsonValue::String(a), JsonValue::String(b)) => a == b,
            (JsonValue::Array(a), JsonValue::Array(b)) => a == b,
            (JsonValue::Object(a), JsonValue::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for JsonValue {}

impl Hash for JsonValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            JsonValue::Undefined | JsonValue::Null => {}
            JsonValue::Bool(b) => b.hash(state),
            JsonValue::Double(d) => hash_double(*d, state),
            JsonValue::String(s) => s.hash(state),
            JsonValue::Array(a) => a.hash(state),
            JsonValue::Object(o) => o.hash(state),
        }
    }
}

/// Compact JSON text. `Undefined` prints as `null`.
impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_variant())
    }
}

// --- From implementations ---

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Bool(b)
    }
}

impl From<f64> for JsonValue {
    fn from(d: f64) -> Self {
        JsonValue::Double(d)
    }
}

impl From<f32> for JsonValue {
    fn from(d: f32) -> Self {
        JsonValue::Double(f64::from(d))
    }
}

impl From<i32> for JsonValue {
    fn from(i: i32) -> Self {
        JsonValue::Double(f64::from(i))
    }
}

impl From<u32> for JsonValue {
    fn from(i: u32) -> Self {
        JsonValue::Double(f64::from(i))
    }
}

/// Lossy beyond 2^53.
impl From<i64> for JsonValue {
    fn from(i: i64) -> Self {
        JsonValue::Double(i as f64)
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(Arc::from(s))
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        JsonValue::String(Arc::from(s))
    }
}

impl From<Arc<str>> for JsonValue {
    fn from(s: Arc<str>) -> Self {
        JsonValue::String(s)
    }
}

impl From<JsonArray> for JsonValue {
    fn from(a: JsonArray) -> Self {
        JsonValue::Array(a)
    }
}

impl From<JsonObject> for JsonValue {
    fn from(o: JsonObject) -> Self {
        JsonValue::Object(o)
    }
}

impl From<()> for JsonValue {
    fn from(_: ()) -> Self {
        JsonValue::Null
    }
}

impl<T: Into<JsonValue>> From<Option<T>> for JsonValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(JsonValue::Null, Into::into)
    }
}

impl From<&Value> for JsonValue {
    fn from(v: &Value) -> Self {
        JsonValue::from_variant(v)
    }
}

impl From<&JsonValue> for Value {
    fn from(v: &JsonValue) -> Self {
        v.to_variant()
    }
}
