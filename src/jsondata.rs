//! This crate provides implicitly shared, copy-on-write JSON containers.
//!
//! A [`JsonArray`] is a cheap-to-clone handle to an ordered sequence of
//! [`JsonValue`]s. Clones share storage until one of them is mutated, at
//! which point the mutating handle takes a private copy ("detach"). Nested
//! arrays and objects are handles too, so a detach copies one level only.
//!
//! Reads are total: reading past the end yields [`JsonValue::Undefined`].
//! Writes that need a valid index come in a checked `try_*` form returning
//! [`JsonError`] and a plain form that panics on a bad index.
//!
//! ```
//! use jsondata::{JsonArray, JsonValue};
//!
//! let mut a = JsonArray::new();
//! a.append(1);
//! a.append(2.2);
//! a.append("x");
//! assert_eq!(a.len(), 3);
//! assert_eq!(a.at(2), JsonValue::from("x"));
//! assert!(a.at(3).is_undefined());
//! ```

pub mod arrayiter;
pub mod container;
pub mod error;
pub mod json_util;
pub mod jsonarray;
pub mod jsonobject;
pub mod jsonvalue;

pub use crate::arrayiter::{Cursor, CursorMut, IntoIter, Iter};
pub use crate::error::{JsonError, Result};
pub use crate::json_util::JsonFormat;
pub use crate::jsonarray::{JsonArray, JsonValueRef};
pub use crate::jsonobject::JsonObject;
pub use crate::jsonvalue::{JsonType, JsonValue};

#[cfg(test)]
mod json_util_tests;
#[cfg(test)]
mod jsonarray_tests;

#[cfg(test)]
pub(crate) mod test_utils {
    /// Installs a tracing subscriber for the current test. `RUST_LOG`
    /// overrides the default `trace` filter.
    pub fn init_test_logging() {
        use tracing_subscriber::{fmt, EnvFilter};

        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
            )
            .with_test_writer()
            .try_init();
    }
}
