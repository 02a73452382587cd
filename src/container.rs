//! The storage backend shared between `JsonArray` handles.
//!
//! `Elements` is the only place element data lives. Handles hold it behind an
//! `Arc` and only touch it mutably once they own it exclusively; see
//! `JsonArray::detach`. Indices handed to the `*_at` methods are validated by
//! the handle layer beforehand.

use crate::error::Result;
use crate::jsonvalue::JsonValue;

/// The value returned for reads that find nothing.
pub const UNDEFINED: JsonValue = JsonValue::Undefined;

/// Converts a value into the form the backend stores.
///
/// `Undefined` is never stored: it becomes `Null`, so that a stored element
/// can always be told apart from a read past the end.
#[inline]
pub fn encode(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Undefined => JsonValue::Null,
        other => other,
    }
}

/// An ordered sequence of stored JSON values.
#[derive(Debug, Clone, Default)]
pub struct Elements {
    data: Vec<JsonValue>,
}

impl Elements {
    /// Creates an empty sequence. Does not allocate.
    #[inline]
    pub fn new() -> Elements {
        Elements { data: Vec::new() }
    }

    /// Creates an empty sequence with room for `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns `JsonError::Alloc` if the allocation fails.
    pub fn with_capacity(capacity: usize) -> Result<Elements> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)?;
        Ok(Elements { data })
    }

    /// Number of stored elements.
    #[inline]
    pub fn count(&self) -> usize {
        self.data.len()
    }

    /// Returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= count()`. For a non-panicking version, see
    /// [`get`](#method.get).
    #[inline]
    pub fn value_at(&self, index: usize) -> &JsonValue {
        &self.data[index]
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&JsonValue> {
        self.data.get(index)
    }

    /// Inserts `value` at `index`, shifting later elements right.
    ///
    /// # Panics
    ///
    /// Panics if `index > count()`.
    pub fn insert_at(&mut self, index: usize, value: JsonValue) {
        self.data.insert(index, encode(value));
    }

    /// Removes the element at `index`, shifting later elements left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= count()`.
    pub fn remove_at(&mut self, index: usize) {
        self.data.remove(index);
    }

    /// Overwrites the element at `index` and returns the previous one.
    ///
    /// # Panics
    ///
    /// Panics if `index >= count()`.
    pub fn replace_at(&mut self, index: usize, value: JsonValue) -> JsonValue {
        core::mem::replace(&mut self.data[index], encode(value))
    }

    /// Removes the element at `index` and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `index >= count()`.
    pub fn extract_at(&mut self, index: usize) -> JsonValue {
        self.data.remove(index)
    }

    /// Makes sure the sequence can hold `total` elements without
    /// reallocating.
    ///
    /// # Errors
    ///
    /// Returns `JsonError::Alloc` if growing fails; the sequence is unchanged.
    pub fn reserve(&mut self, total: usize) -> Result<()> {
        let additional = total.saturating_sub(self.data.len());
        self.data.try_reserve(additional)?;
        Ok(())
    }

    /// Returns a private copy with room for at least `reserve` elements.
    ///
    /// The copy is one level deep: nested arrays, objects and strings are
    /// shared with the original.
    ///
    /// # Errors
    ///
    /// Returns `JsonError::Alloc` if the allocation fails.
    pub fn detached(&self, reserve: usize) -> Result<Elements> {
        let mut copy = Elements::with_capacity(reserve.max(self.data.len()))?;
        copy.data.extend(self.data.iter().cloned());
        Ok(copy)
    }

    #[inline]
    pub fn as_slice(&self) -> &[JsonValue] {
        &self.data
    }

    #[inline]
    pub fn into_vec(self) -> Vec<JsonValue> {
        self.data
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }
}

impl From<Vec<JsonValue>> for Elements {
    fn from(values: Vec<JsonValue>) -> Self {
        Elements {
            data: values.into_iter().map(encode).collect(),
        }
    }
}
