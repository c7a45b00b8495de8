//! Error types for parsing and serializing Structured Field Values.
//!
//! There are two disjoint families:
//!
//! - [`ParseError`]: a grammar violation found while reading a field value.
//!   It carries a message and the 0-based byte offset where recognition failed.
//! - [`SerializeError`]: a value that cannot be rendered in canonical form
//!   (numbers over the digit budget, invalid characters, invalid tokens or keys).
//!   It carries no offset, since the problem lies in the value and not in any text.
//!
//! [`Error`] wraps both, plus the few failures that belong to neither family
//! (writer I/O and typed extraction from the wrong variant).
//!
//! ## Examples
//!
//! ```rust
//! use structured_fields::parse_item;
//!
//! let err = parse_item("?2").unwrap_err();
//! assert_eq!(err.position(), 1);
//! eprintln!("Parse error: {}", err);
//! ```

use std::fmt;
use thiserror::Error;

/// A grammar violation found while parsing a field value.
///
/// Parsing never yields partial results: the first violation aborts the whole
/// call and is returned as this error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{msg} at position {pos}")]
pub struct ParseError {
    msg: String,
    pos: usize,
}

impl ParseError {
    /// Creates a parse error at the given byte offset.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use structured_fields::ParseError;
    ///
    /// let err = ParseError::new(3, "unexpected character");
    /// assert_eq!(err.to_string(), "unexpected character at position 3");
    /// ```
    pub fn new<T: fmt::Display>(pos: usize, msg: T) -> Self {
        ParseError {
            msg: msg.to_string(),
            pos,
        }
    }

    /// Returns the human-readable message without the position suffix.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Returns the 0-based byte offset at which recognition failed.
    ///
    /// The offset may equal the input length when the input ended prematurely.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }
}

/// A value that cannot be represented in canonical textual form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SerializeError {
    /// Integer outside `[-999999999999999, 999999999999999]`.
    #[error("integers may not exceed 15 digits: {0}")]
    IntegerOutOfRange(i64),

    /// Decimal whose integer part is over the digit budget.
    #[error("integer part of a decimal may not exceed 14 digits (15 for negative): {0}")]
    DecimalOutOfRange(f64),

    /// NaN or an infinity.
    #[error("decimal value is not finite: {0}")]
    NonFiniteDecimal(f64),

    /// String holding a byte outside printable ASCII.
    #[error("invalid character in string at index {index}")]
    InvalidStringChar { index: usize },

    #[error("invalid token value: {0:?}")]
    InvalidToken(String),

    #[error("keys must start with a-z and only contain a-z0-9_-* (at most 255 characters): {0:?}")]
    InvalidKey(String),
}

/// Represents every error this crate can return.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("serialize error: {0}")]
    Serialize(#[from] SerializeError),

    /// IO error while writing serialized output
    #[error("IO error: {0}")]
    Io(String),

    /// Typed extraction from a value holding a different variant
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("unknown field type {0:?}, expected item, list or dictionary")]
    InvalidFieldType(String),
}

impl Error {
    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use structured_fields::Error;
    ///
    /// let err = Error::type_mismatch("integer", "token");
    /// assert!(err.to_string().contains("expected integer"));
    /// ```
    pub fn type_mismatch(expected: impl fmt::Display, found: impl fmt::Display) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_accessors() {
        let err = ParseError::new(7, "trailing comma");
        assert_eq!(err.message(), "trailing comma");
        assert_eq!(err.position(), 7);
        assert_eq!(err.to_string(), "trailing comma at position 7");
    }

    #[test]
    fn test_umbrella_conversions() {
        let err: Error = ParseError::new(0, "boom").into();
        assert!(matches!(err, Error::Parse(_)));

        let err: Error = SerializeError::IntegerOutOfRange(1_000_000_000_000_000).into();
        assert!(err.to_string().contains("15 digits"));
    }
}
