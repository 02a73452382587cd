//! This module defines the `JsonObject` struct, an implicitly shared,
//! copy-on-write map from keys to `JsonValue`s. Keys are kept sorted.

use core::fmt;
use core::hash::{Hash, Hasher};
use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::trace;

use crate::jsonvalue::JsonValue;

type Members = BTreeMap<String, JsonValue>;

// --- JsonObject Definition ---
#[derive(Clone, Default)]
pub struct JsonObject {
  store: Option<Arc<Members>>,
}

// --- Core Functionality ---
impl JsonObject {
  pub fn new() -> Self {
    JsonObject { store: None }
  }

  fn members(&self) -> Option<&Members> {
    self.store.as_deref()
  }

  fn detach(&mut self) -> &mut Members {
    let store = self.store.get_or_insert_with(Default::default);
    if Arc::strong_count(store) > 1 {
      trace!(len = store.len(), "detaching object storage");
    }
    Arc::make_mut(store)
  }

  // --- Conversion ---
  pub fn from_variant_map(map: &Map<String, Value>) -> Self {
    map.iter().map(|(k, v)| (k.clone(), JsonValue::from_variant(v))).collect()
  }

  pub fn to_variant_map(&self) -> Map<String, Value> {
    self.iter().map(|(k, v)| (k.to_string(), v.to_variant())).collect()
  }

  // --- Accessors ---
  pub fn len(&self) -> usize {
    self.members().map_or(0, BTreeMap::len)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.members().is_some_and(|m| m.contains_key(key))
  }

  pub fn get(&self, key: &str) -> Option<&JsonValue> {
    self.members().and_then(|m| m.get(key))
  }

  /// The value stored under `key`, or `Undefined` if there is none.
  pub fn value(&self, key: &str) -> JsonValue {
    self.get(key).cloned().unwrap_or(JsonValue::Undefined)
  }

  /// Keys in sorted order.
  pub fn keys(&self) -> Vec<String> {
    self.iter().map(|(k, _)| k.to_string()).collect()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &JsonValue)> + '_ {
    self.members().into_iter().flat_map(|m| m.iter().map(|(k, v)| (k.as_str(), v)))
  }

  // --- Mutators ---

  /// Inserts `value` under `key`, replacing any previous value.
  /// Inserting `Undefined` removes the key instead.
  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
    let key = key.into();
    match value.into() {
      JsonValue::Undefined => self.remove(&key),
      value => {
        self.detach().insert(key, value);
      }
    }
  }

  pub fn remove(&mut self, key: &str) {
    let _ = self.take(key);
  }

  /// Removes `key` and returns its value, `Undefined` if it was absent.
  /// Storage is only detached when the key exists.
  pub fn take(&mut self, key: &str) -> JsonValue {
    if !self.contains_key(key) {
      return JsonValue::Undefined;
    }
    self.detach().remove(key).unwrap_or(JsonValue::Undefined)
  }
}

// --- Equality and hashing ---
impl PartialEq for JsonObject {
  fn eq(&self, other: &Self) -> bool {
    if let (Some(a), Some(b)) = (&self.store, &other.store) {
      if Arc::ptr_eq(a, b) {
        return true;
      }
    }
    self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
  }
}

impl Eq for JsonObject {}

impl Hash for JsonObject {
  fn hash<H: Hasher>(&self, state: &mut H) {
    state.write_usize(self.len());
    for (k, v) in self.iter() {
      k.hash(state);
      v.hash(state);
    }
  }
}

// --- Formatting ---
impl fmt::Debug for JsonObject {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.store {
      None => f.write_str("JsonObject()"),
      Some(_) => write!(f, "JsonObject({})", self),
    }
  }
}

impl fmt::Display for JsonObject {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", Value::Object(self.to_variant_map()))
  }
}

impl<K: Into<String>, V: Into<JsonValue>> FromIterator<(K, V)> for JsonObject {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut obj = JsonObject::new();
    for (k, v) in iter {
      obj.insert(k, v);
    }
    obj
  }
}
