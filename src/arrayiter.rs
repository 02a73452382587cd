//! Iterators and cursors over a `JsonArray`.
//!
//! All of them borrow the array, so the array cannot be mutated through any
//! other path while one is alive. Positions are plain indices into storage
//! order.

use core::cmp::Ordering;
use core::iter::FusedIterator;
use core::slice;

use crate::jsonarray::{JsonArray, JsonValueRef};
use crate::jsonvalue::JsonValue;

// --- Iter ---

/// Borrowing iterator over the elements of a `JsonArray`.
///
/// Double-ended and exact-size; `nth`/`nth_back` jump in constant time.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: slice::Iter<'a, JsonValue>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(values: &'a [JsonValue]) -> Self {
        Iter { inner: values.iter() }
    }

    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &'a [JsonValue] {
        self.inner.as_slice()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a JsonValue;

    #[inline]
    fn next(&mut self) -> Option<&'a JsonValue> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<&'a JsonValue> {
        self.inner.nth(n)
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a JsonValue> {
        self.inner.next_back()
    }

    #[inline]
    fn nth_back(&mut self, n: usize) -> Option<&'a JsonValue> {
        self.inner.nth_back(n)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

// --- IntoIter ---

/// Owning iterator returned by `JsonArray::into_iter`.
#[derive(Debug, Clone)]
pub struct IntoIter {
    inner: std::vec::IntoIter<JsonValue>,
}

impl IntoIter {
    pub(crate) fn new(values: Vec<JsonValue>) -> Self {
        IntoIter { inner: values.into_iter() }
    }
}

impl Iterator for IntoIter {
    type Item = JsonValue;

    fn next(&mut self) -> Option<JsonValue> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for IntoIter {
    fn next_back(&mut self) -> Option<JsonValue> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for IntoIter {}

impl FusedIterator for IntoIter {}

// --- Cursor ---

/// A random-access position in a `JsonArray`.
///
/// Cursors compare by position only; two cursors over different arrays at
/// the same index are equal. A cursor may sit at `len()` (the end), where
/// `current()` yields `Undefined`.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    array: &'a JsonArray,
    index: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(array: &'a JsonArray, index: usize) -> Self {
        Cursor { array, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_end(&self) -> bool {
        self.index >= self.array.len()
    }

    /// The element under the cursor, `Undefined` at the end.
    pub fn current(&self) -> JsonValue {
        self.array.at(self.index)
    }

    /// Borrows the element under the cursor.
    pub fn get(&self) -> Option<&'a JsonValue> {
        self.array.get(self.index)
    }

    /// A cursor `n` positions away, clamped to `0..=len()`.
    pub fn offset(&self, n: isize) -> Cursor<'a> {
        let index = self.index.saturating_add_signed(n).min(self.array.len());
        Cursor { array: self.array, index }
    }

    /// Number of positions from `self` to `other`; negative when `other`
    /// lies before `self`.
    pub fn distance_to(&self, other: &Cursor<'_>) -> isize {
        other.index as isize - self.index as isize
    }

    pub fn move_next(&mut self) {
        *self = self.offset(1);
    }

    pub fn move_prev(&mut self) {
        *self = self.offset(-1);
    }
}

impl PartialEq for Cursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for Cursor<'_> {}

impl PartialOrd for Cursor<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cursor<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

// --- CursorMut ---

/// A cursor that hands out writable references.
///
/// Moving and reading never copy the array's storage; the first write
/// through `current()` detaches it.
///
/// ```
/// # use jsondata::{JsonArray, JsonValue};
/// let original = JsonArray::from([1, 2, 3]);
/// let mut doubled = original.clone();
/// let mut cursor = doubled.cursor_mut();
/// while let Some(mut slot) = cursor.current() {
///     let v = slot.get().as_f64().unwrap_or_default();
///     slot.set(v * 2.0);
///     cursor.move_next();
/// }
/// assert_eq!(doubled, JsonArray::from([2, 4, 6]));
/// assert_eq!(original, JsonArray::from([1, 2, 3]));
/// ```
#[derive(Debug)]
pub struct CursorMut<'a> {
    array: &'a mut JsonArray,
    index: usize,
}

impl<'a> CursorMut<'a> {
    pub(crate) fn new(array: &'a mut JsonArray, index: usize) -> Self {
        CursorMut { array, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_end(&self) -> bool {
        self.index >= self.array.len()
    }

    /// The element under the cursor without borrowing it mutably.
    pub fn peek(&self) -> JsonValue {
        self.array.at(self.index)
    }

    /// A writable reference to the element under the cursor, `None` at the
    /// end.
    pub fn current(&mut self) -> Option<JsonValueRef<'_>> {
        if self.is_end() {
            return None;
        }
        Some(JsonValueRef::new(&mut *self.array, self.index))
    }

    pub fn move_next(&mut self) {
        self.index = (self.index + 1).min(self.array.len());
    }

    pub fn move_prev(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Moves to `index`, clamped to `0..=len()`.
    pub fn seek(&mut self, index: usize) {
        self.index = index.min(self.array.len());
    }

    /// Inserts `value` before the element under the cursor and leaves the
    /// cursor on the inserted element.
    pub fn insert_before(&mut self, value: impl Into<JsonValue>) {
        self.array.insert(self.index, value);
    }

    /// Removes the element under the cursor and returns it. The cursor then
    /// points at the element that followed. Returns `Undefined` at the end.
    pub fn remove_current(&mut self) -> JsonValue {
        self.array.take_at(self.index)
    }
}
