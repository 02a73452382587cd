//! Error type shared by the array, object and text layers.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors reported by the checked (`try_*`) operations and the text reader.
///
/// Reads never fail: an out-of-range read yields `JsonValue::Undefined`
/// instead of an error.
#[derive(Debug, Error)]
pub enum JsonError {
    /// A mutator that needs a valid index was handed one past the end.
    #[error("index out of bounds: index is {index}, but length is {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Growing or detaching the element storage could not allocate.
    #[error("failed to allocate array storage: {0}")]
    Alloc(#[from] TryReserveError),

    /// The JSON text could not be parsed.
    #[error("malformed JSON text: {0}")]
    Parse(#[from] serde_json::Error),

    /// The JSON text parsed, but the top-level value has the wrong type.
    #[error("wrong JSON type: expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
}

pub type Result<T> = core::result::Result<T, JsonError>;
