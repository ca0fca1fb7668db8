//! Error types for HCL encoding.
//!
//! Every failure aborts the whole encode: there is no partial document and no
//! per-field recovery.
//!
//! ## Error Categories
//!
//! - **Structural errors**: annotation or shape misuse, such as a `key` field
//!   that does not hold a string, a `squash` field that is not a record, an
//!   unsupported value kind or a document root that is not a block
//! - **Syntactic errors**: a raw expression (or an interpolation inside a
//!   string) that does not lex as valid expression syntax
//! - **Tag errors**: a field key whose annotation string cannot be parsed
//! - **Name errors**: a map key or renamed field used as an attribute or block
//!   name that is not a valid identifier
//!
//! ## Examples
//!
//! ```rust
//! use serde::Serialize;
//! use serde_hcl_encoder::{to_string, Error};
//!
//! #[derive(Serialize)]
//! struct Widget {
//!     #[serde(rename = ",key")]
//!     id: u32,
//! }
//!
//! #[derive(Serialize)]
//! struct Config {
//!     widget: Widget,
//! }
//!
//! let err = to_string(&Config { widget: Widget { id: 7 } }).unwrap_err();
//! assert!(matches!(err, Error::InvalidKeyField { .. }));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding a value to HCL.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error while writing the rendered document
    #[error("IO error: {0}")]
    Io(String),

    /// A value whose kind has no HCL representation
    #[error("cannot encode {kind} to HCL (field `{field}`)")]
    UnsupportedKind { field: String, kind: String },

    /// A `key` field that does not hold a string
    #[error("key field `{field}` must be a string literal, found {found}")]
    InvalidKeyField { field: String, found: String },

    /// A `squash` field that did not resolve to a block
    #[error("squash field `{field}` must be a record, found {found}")]
    InvalidSquashTarget { field: String, found: String },

    /// The root value cannot become a document body
    #[error("invalid root: {0}")]
    InvalidRoot(String),

    /// A raw expression or interpolation that failed to lex
    #[error("malformed expression `{expr}` at byte {offset}: {reason}")]
    MalformedExpression {
        expr: String,
        offset: usize,
        reason: String,
    },

    /// A field key whose annotations cannot be parsed or used
    #[error("malformed field tag `{tag}`: {reason}")]
    MalformedTag { tag: String, reason: String },

    /// An attribute or block name that is not a valid HCL identifier
    #[error("`{name}` is not a valid attribute or block name: names start with a letter or `_` and continue with letters, digits, `_` or `-`")]
    InvalidIdentifier { name: String },

    /// A map key that is not a string
    #[error("map keys must be strings, {0} given")]
    InvalidMapKey(String),

    /// Custom error raised by a `Serialize` implementation
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unsupported-kind error for the named field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_hcl_encoder::Error;
    ///
    /// let err = Error::unsupported_kind("payload", "bytes");
    /// assert!(err.to_string().contains("cannot encode bytes"));
    /// ```
    pub fn unsupported_kind(field: &str, kind: &str) -> Self {
        Error::UnsupportedKind {
            field: field.to_string(),
            kind: kind.to_string(),
        }
    }

    /// Creates an invalid key field error.
    pub fn invalid_key_field(field: &str, found: &str) -> Self {
        Error::InvalidKeyField {
            field: field.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an invalid squash target error.
    pub fn invalid_squash_target(field: &str, found: &str) -> Self {
        Error::InvalidSquashTarget {
            field: field.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an invalid root error.
    pub fn invalid_root(msg: &str) -> Self {
        Error::InvalidRoot(msg.to_string())
    }

    /// Creates a malformed expression error pointing at a byte offset of `expr`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_hcl_encoder::Error;
    ///
    /// let err = Error::malformed_expression("foo(", 4, "unclosed `(`");
    /// assert!(err.to_string().contains("byte 4"));
    /// ```
    pub fn malformed_expression(expr: &str, offset: usize, reason: &str) -> Self {
        Error::MalformedExpression {
            expr: expr.to_string(),
            offset,
            reason: reason.to_string(),
        }
    }

    /// Creates a malformed tag error.
    pub fn malformed_tag(tag: &str, reason: &str) -> Self {
        Error::MalformedTag {
            tag: tag.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates an invalid identifier error.
    pub fn invalid_identifier(name: &str) -> Self {
        Error::InvalidIdentifier {
            name: name.to_string(),
        }
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
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
    fn test_messages_name_the_field() {
        let err = Error::invalid_key_field("id", "integer");
        assert_eq!(
            err.to_string(),
            "key field `id` must be a string literal, found integer"
        );

        let err = Error::invalid_squash_target("base", "string");
        assert!(err.to_string().contains("`base`"));
    }

    #[test]
    fn test_invalid_identifier_names_the_key() {
        let err = Error::invalid_identifier("my key");
        assert_eq!(
            err,
            Error::InvalidIdentifier {
                name: "my key".to_string()
            }
        );
        assert!(err.to_string().starts_with("`my key` is not a valid"));
    }

    #[test]
    fn test_serde_custom() {
        let err = <Error as serde::ser::Error>::custom("boom");
        assert_eq!(err, Error::Custom("boom".to_string()));
    }
}
