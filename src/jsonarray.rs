//! This module defines the `JsonArray` struct, an implicitly shared,
//! copy-on-write sequence of `JsonValue`s.
//!
//! Cloning a `JsonArray` only bumps a reference count. The elements are
//! copied the first time one of the handles sharing them is mutated
//! ("detach"); the other handles keep seeing the old contents.
//!
//! ```
//! # use jsondata::JsonArray;
//! let h1 = JsonArray::from([1, 2]);
//! let mut h2 = h1.clone();
//! h2.append(3);
//! assert_eq!(h1, JsonArray::from([1, 2]));
//! assert_eq!(h2, JsonArray::from([1, 2, 3]));
//! ```

use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Add, AddAssign};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};

use crate::arrayiter::{Cursor, CursorMut, IntoIter, Iter};
use crate::container::{Elements, UNDEFINED};
use crate::error::{JsonError, Result};
use crate::jsonvalue::JsonValue;

/// Unwraps the result of a checked mutator for its panicking counterpart.
fn expect_ok<T>(result: Result<T>, op: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("JsonArray::{} failed: {}", op, e),
    }
}

// --- JsonArray Definition ---

/// An ordered, implicitly shared array of JSON values.
///
/// An array without storage (`store == None`) behaves exactly like an array
/// whose storage holds no elements; it is what `new()` and `default()`
/// return and it does not allocate.
#[derive(Clone, Default)]
pub struct JsonArray {
    store: Option<Arc<Elements>>,
}

// --- Construction ---
impl JsonArray {
    /// Creates an empty array. Does not allocate.
    pub fn new() -> JsonArray {
        JsonArray { store: None }
    }

    /// Builds an array of `String` elements.
    ///
    /// ```
    /// # use jsondata::JsonArray;
    /// let a = JsonArray::from_string_list(["a", "b"]);
    /// assert_eq!(a.at(1).as_str(), Some("b"));
    /// ```
    pub fn from_string_list<I, S>(list: I) -> JsonArray
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        list.into_iter().map(|s| JsonValue::from(s.as_ref())).collect()
    }

    /// Converts a list of `serde_json` values element by element.
    ///
    /// See [`JsonValue::from_variant`] for the precision rules.
    pub fn from_variant_list(list: &[Value]) -> JsonArray {
        list.iter().map(JsonValue::from_variant).collect()
    }

    /// Converts into a list of `serde_json` values element by element.
    ///
    /// See [`JsonValue::to_variant`] for the values that have no JSON form.
    pub fn to_variant_list(&self) -> Vec<Value> {
        self.iter().map(JsonValue::to_variant).collect()
    }

    /// Returns a copy of the elements.
    pub fn to_vec(&self) -> Vec<JsonValue> {
        self.as_slice().to_vec()
    }
}

// --- Sharing ---
impl JsonArray {
    /// Ensures this handle owns its storage exclusively and returns it.
    ///
    /// * no storage: an empty one is created;
    /// * shared storage: the elements are copied into a new private one;
    /// * private storage: used in place.
    ///
    /// In every case the returned storage has room for `reserve` elements.
    /// On error the handle still holds its previous contents.
    pub(crate) fn detach(&mut self, reserve: usize) -> Result<&mut Elements> {
        let store = self.store.get_or_insert_with(|| Arc::new(Elements::new()));
        if Arc::get_mut(store).is_none() {
            trace!(len = store.count(), reserve, shared = true, "detaching array storage");
            *store = Arc::new(store.detached(reserve)?);
        }
        let elements = Arc::make_mut(store);
        elements.reserve(reserve)?;
        Ok(elements)
    }

    /// Returns `true` if another handle currently shares this array's
    /// storage.
    pub fn is_shared(&self) -> bool {
        self.store.as_ref().is_some_and(|s| Arc::strong_count(s) > 1)
    }

    /// Returns `true` if both handles point at the same storage.
    pub fn ptr_eq(&self, other: &JsonArray) -> bool {
        match (&self.store, &other.store) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Swaps the contents of two arrays. Never allocates.
    pub fn swap(&mut self, other: &mut JsonArray) {
        core::mem::swap(self, other);
    }

    /// Drops this handle's reference to its storage, leaving it empty.
    pub fn clear(&mut self) {
        self.store = None;
    }
}

// --- Accessors ---
impl JsonArray {
    /// The elements in storage order. Empty when there is no storage.
    pub fn as_slice(&self) -> &[JsonValue] {
        self.store.as_deref().map_or(&[][..], Elements::as_slice)
    }

    pub fn len(&self) -> usize {
        self.store.as_ref().map_or(0, |s| s.count())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element at `index`, or `Undefined` if `index` is out of
    /// range.
    pub fn at(&self, index: usize) -> JsonValue {
        self.get(index).cloned().unwrap_or(UNDEFINED)
    }

    /// Borrows the element at `index`.
    pub fn get(&self, index: usize) -> Option<&JsonValue> {
        self.store.as_ref().and_then(|s| s.get(index))
    }

    /// Same as `at(0)`.
    pub fn first(&self) -> JsonValue {
        self.at(0)
    }

    /// Same as `at(len() - 1)`; `Undefined` when empty.
    pub fn last(&self) -> JsonValue {
        match self.len() {
            0 => UNDEFINED,
            len => self.at(len - 1),
        }
    }

    /// Returns `true` if some element equals `value`.
    pub fn contains(&self, value: &JsonValue) -> bool {
        self.as_slice().contains(value)
    }

    /// Position of the first element equal to `value`.
    pub fn index_of(&self, value: &JsonValue) -> Option<usize> {
        self.as_slice().iter().position(|v| v == value)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.as_slice())
    }

    /// A random-access cursor positioned at the first element.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(self, 0)
    }

    /// A cursor yielding writable references, positioned at the first
    /// element. Nothing is copied until a write goes through it.
    pub fn cursor_mut(&mut self) -> CursorMut<'_> {
        CursorMut::new(self, 0)
    }
}

// --- Mutators ---
impl JsonArray {
    /// Inserts `value` at `index`, shifting later elements right.
    /// `Undefined` is stored as `Null`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if `index > len()`, `Alloc` if detaching fails.
    /// The array is unchanged on error.
    pub fn try_insert(&mut self, index: usize, value: impl Into<JsonValue>) -> Result<()> {
        let len = self.len();
        if index > len {
            return Err(JsonError::IndexOutOfBounds { index, len });
        }
        self.detach(len + 1)?.insert_at(index, value.into());
        Ok(())
    }

    /// Inserts `value` at `index`, shifting later elements right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert(&mut self, index: usize, value: impl Into<JsonValue>) {
        expect_ok(self.try_insert(index, value), "insert")
    }

    /// Same as `insert(0, value)`.
    pub fn prepend(&mut self, value: impl Into<JsonValue>) {
        self.insert(0, value)
    }

    /// Same as `insert(len(), value)`.
    pub fn append(&mut self, value: impl Into<JsonValue>) {
        let len = self.len();
        self.insert(len, value)
    }

    /// Alias of `append`.
    pub fn push(&mut self, value: impl Into<JsonValue>) {
        self.append(value)
    }

    /// Replaces the element at `index`, returning the previous one.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if `index >= len()`, `Alloc` if detaching fails.
    pub fn try_replace(&mut self, index: usize, value: impl Into<JsonValue>) -> Result<JsonValue> {
        let len = self.len();
        if index >= len {
            return Err(JsonError::IndexOutOfBounds { index, len });
        }
        Ok(self.detach(len)?.replace_at(index, value.into()))
    }

    /// Replaces the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn replace(&mut self, index: usize, value: impl Into<JsonValue>) {
        expect_ok(self.try_replace(index, value), "replace");
    }

    /// Removes the element at `index`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if `index >= len()`, `Alloc` if detaching fails.
    pub fn try_remove_at(&mut self, index: usize) -> Result<()> {
        let len = self.len();
        if index >= len {
            return Err(JsonError::IndexOutOfBounds { index, len });
        }
        self.detach(len)?.remove_at(index);
        Ok(())
    }

    /// Removes the element at `index`. Does nothing if `index` is out of
    /// range; the storage is not detached in that case.
    pub fn remove_at(&mut self, index: usize) {
        let len = self.len();
        if index >= len {
            debug!(index, len, "remove_at ignored out-of-range index");
            return;
        }
        expect_ok(self.try_remove_at(index), "remove_at")
    }

    /// Same as `remove_at(0)`.
    pub fn remove_first(&mut self) {
        self.remove_at(0)
    }

    /// Same as `remove_at(len() - 1)`. Does nothing on an empty array.
    pub fn remove_last(&mut self) {
        if let Some(last) = self.len().checked_sub(1) {
            self.remove_at(last)
        }
    }

    /// Removes the element at `index` and returns it.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if `index >= len()`, `Alloc` if detaching fails.
    pub fn try_take_at(&mut self, index: usize) -> Result<JsonValue> {
        let len = self.len();
        if index >= len {
            return Err(JsonError::IndexOutOfBounds { index, len });
        }
        Ok(self.detach(len)?.extract_at(index))
    }

    /// Removes the element at `index` and returns it. Returns `Undefined`
    /// and leaves the array untouched if `index` is out of range.
    ///
    /// If the value is not needed, `remove_at` is cheaper.
    pub fn take_at(&mut self, index: usize) -> JsonValue {
        let len = self.len();
        if index >= len {
            debug!(index, len, "take_at ignored out-of-range index");
            return UNDEFINED;
        }
        expect_ok(self.try_take_at(index), "take_at")
    }

    /// Removes and returns the first element.
    pub fn pop_first(&mut self) -> Option<JsonValue> {
        if self.is_empty() {
            return None;
        }
        Some(self.take_at(0))
    }

    /// Removes and returns the last element.
    pub fn pop_last(&mut self) -> Option<JsonValue> {
        let last = self.len().checked_sub(1)?;
        Some(self.take_at(last))
    }

    /// A writable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if `index >= len()`.
    pub fn try_at_mut(&mut self, index: usize) -> Result<JsonValueRef<'_>> {
        let len = self.len();
        if index >= len {
            return Err(JsonError::IndexOutOfBounds { index, len });
        }
        Ok(JsonValueRef { array: self, index })
    }

    /// A writable reference to the element at `index`. Storage is detached
    /// only when a value is written through it.
    ///
    /// ```
    /// # use jsondata::{JsonArray, JsonValue};
    /// let mut a = JsonArray::from([1, 2]);
    /// a.at_mut(1).set("two");
    /// assert_eq!(a.at(1), JsonValue::from("two"));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> JsonValueRef<'_> {
        expect_ok(self.try_at_mut(index), "at_mut")
    }
}

// --- JsonValueRef ---

/// A writable reference to one element of a `JsonArray`.
///
/// Reading through it never copies storage; `set` detaches the array first.
pub struct JsonValueRef<'a> {
    array: &'a mut JsonArray,
    index: usize,
}

impl<'a> JsonValueRef<'a> {
    pub(crate) fn new(array: &'a mut JsonArray, index: usize) -> Self {
        JsonValueRef { array, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Current value of the element.
    pub fn get(&self) -> JsonValue {
        self.array.at(self.index)
    }

    /// Writes `value` into the array at this position.
    pub fn set(&mut self, value: impl Into<JsonValue>) {
        self.array.replace(self.index, value);
    }

    /// Writes `value` and returns the previous element.
    pub fn replace(&mut self, value: impl Into<JsonValue>) -> JsonValue {
        expect_ok(self.array.try_replace(self.index, value), "replace")
    }
}

impl PartialEq<JsonValue> for JsonValueRef<'_> {
    fn eq(&self, other: &JsonValue) -> bool {
        self.array.get(self.index) == Some(other)
    }
}

impl fmt::Debug for JsonValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonValueRef")
            .field("index", &self.index)
            .field("value", &self.get())
            .finish()
    }
}

// --- Equality and hashing ---

impl PartialEq for JsonArray {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.as_slice() == other.as_slice()
    }
}

impl Eq for JsonArray {}

impl PartialEq<JsonValue> for JsonArray {
    fn eq(&self, other: &JsonValue) -> bool {
        *self == other.to_array()
    }
}

impl PartialEq<JsonArray> for JsonValue {
    fn eq(&self, other: &JsonArray) -> bool {
        other == self
    }
}

/// Hashes the length followed by each element in order, so equal arrays
/// hash equally whether or not they share storage.
impl Hash for JsonArray {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

// --- Formatting ---

/// `JsonArray([1,2,"x"])`, or `JsonArray()` for an array without storage.
impl fmt::Debug for JsonArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.store {
            None => f.write_str("JsonArray()"),
            Some(_) => write!(f, "JsonArray({})", self),
        }
    }
}

/// Compact JSON text.
impl fmt::Display for JsonArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Array(self.to_variant_list()))
    }
}

// --- Conversions ---

impl<V: Into<JsonValue>> FromIterator<V> for JsonArray {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let values: Vec<JsonValue> = iter.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return JsonArray::new();
        }
        JsonArray {
            store: Some(Arc::new(Elements::from(values))),
        }
    }
}

impl<V: Into<JsonValue>> From<Vec<V>> for JsonArray {
    fn from(values: Vec<V>) -> Self {
        values.into_iter().collect()
    }
}

impl<V: Into<JsonValue>, const N: usize> From<[V; N]> for JsonArray {
    fn from(values: [V; N]) -> Self {
        values.into_iter().collect()
    }
}

impl From<&[Value]> for JsonArray {
    fn from(list: &[Value]) -> Self {
        JsonArray::from_variant_list(list)
    }
}

impl<V: Into<JsonValue>> Extend<V> for JsonArray {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let len = self.len();
        let elements = expect_ok(self.detach(len.saturating_add(lower)), "extend");
        for value in iter {
            let end = elements.count();
            elements.insert_at(end, value.into());
        }
    }
}

impl<'a> IntoIterator for &'a JsonArray {
    type Item = &'a JsonValue;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Takes the elements out of private storage, or copies them if the storage
/// is shared.
impl IntoIterator for JsonArray {
    type Item = JsonValue;
    type IntoIter = IntoIter;

    fn into_iter(self) -> IntoIter {
        let values = match self.store {
            None => Vec::new(),
            Some(store) => match Arc::try_unwrap(store) {
                Ok(elements) => elements.into_vec(),
                Err(shared) => shared.as_slice().to_vec(),
            },
        };
        IntoIter::new(values)
    }
}

// --- Operators ---

/// Returns an array holding this array's elements followed by `value`.
/// An array operand is appended as one nested element.
impl<V: Into<JsonValue>> Add<V> for JsonArray {
    type Output = JsonArray;

    fn add(mut self, value: V) -> JsonArray {
        self.append(value);
        self
    }
}

impl<V: Into<JsonValue>> AddAssign<V> for JsonArray {
    fn add_assign(&mut self, value: V) {
        self.append(value);
    }
}
