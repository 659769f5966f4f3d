//! Error types for literal serialization.
//!
//! Every failure is fatal for the call that produced it: the engine never returns
//! partially rendered text.
//!
//! ## Error Categories
//!
//! - **Circular structures**: a container reaches itself through its own children
//! - **Unsupported types**: a value kind the engine cannot express as a literal
//! - **Invalid regular expression flags**: rejected while building a [`RegExp`](crate::RegExp)
//! - **I/O errors**: writing the rendered text to a sink failed
//!
//! ## Examples
//!
//! ```rust
//! use serde_jslit::{serialize, Error, Object, Value};
//!
//! let outer = Object::new();
//! let inner = Object::new();
//! outer.insert("a", inner.clone());
//! inner.insert("b", inner.clone());
//!
//! let err = serialize(&Value::from(outer)).unwrap_err();
//! assert!(matches!(err, Error::CircularStructure { .. }));
//! assert!(err.to_string().contains("can not convert circular structures"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while rendering a value graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A container was found among its own ancestors.
    #[error("can not convert circular structures (at `{path}`)")]
    CircularStructure { path: String },

    /// A value kind outside the supported set was reached.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Regular expression flags were unknown or repeated.
    #[error("Invalid regular expression flags '{flags}': {reason}")]
    InvalidRegExpFlags { flags: String, reason: String },

    /// IO error during writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a circular-structure error for the dot-separated `path` at which the
    /// cycle closed. The root is reported as `<root>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_jslit::Error;
    ///
    /// let err = Error::circular("a.b");
    /// assert!(err.to_string().contains("`a.b`"));
    /// ```
    pub fn circular(path: &str) -> Self {
        let path = if path.is_empty() { "<root>" } else { path };
        Error::CircularStructure {
            path: path.to_string(),
        }
    }

    /// Creates an unsupported type error for values that have no literal form.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates an invalid-flags error for a regular expression.
    pub fn invalid_flags(flags: &str, reason: &str) -> Self {
        Error::InvalidRegExpFlags {
            flags: flags.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_jslit::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` if this error reports a circular structure.
    #[must_use]
    pub const fn is_circular(&self) -> bool {
        matches!(self, Error::CircularStructure { .. })
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circular_root_path() {
        let err = Error::circular("");
        assert_eq!(
            err,
            Error::CircularStructure {
                path: "<root>".to_string()
            }
        );
        assert!(err.is_circular());
    }

    #[test]
    fn test_invalid_flags_message() {
        let err = Error::invalid_flags("gg", "duplicate flag 'g'");
        let msg = err.to_string();
        assert!(msg.contains("'gg'"));
        assert!(msg.contains("duplicate flag"));
        assert!(!err.is_circular());
    }
}
