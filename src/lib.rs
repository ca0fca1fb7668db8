//! # serde_hcl_encoder
//!
//! Encodes annotated Rust values into HCL (HashiCorp Configuration Language)
//! source text.
//!
//! ## How it works
//!
//! Encoding happens in three steps:
//!
//! 1. Any `T: Serialize` is turned into a dynamic [`Value`] tree by
//!    [`ValueSerializer`]. Struct fields keep their keys, and each key is
//!    parsed into a [`FieldDescriptor`].
//! 2. The tree encoder ([`encode_value`]) walks the values and produces
//!    blocks, attributes, labels and literals.
//! 3. The root node becomes a [`Document`], which is laid out as text with
//!    [`HclOptions`].
//!
//! ## Field annotations
//!
//! Annotations live in the field key, so they are written with
//! `#[serde(rename = "...")]`:
//!
//! ```text
//! name[,flag...][;suppression-flag...]
//! ```
//!
//! | Flag         | Effect                                                    |
//! |--------------|-----------------------------------------------------------|
//! | `key`        | the string value becomes a label of the enclosing block   |
//! | `squash`     | the record's attributes and labels are lifted one level   |
//! | `blocks`     | a sequence of records becomes repeated blocks             |
//! | `expr`       | the string is emitted unquoted, as an HCL expression      |
//! | `omit`       | (after `;`) never encode the field                        |
//! | `omitempty`  | (after `;`) skip the field when it holds its zero value   |
//!
//! Fields tagged `unusedKeys` or `decodedFields` are decoder bookkeeping and
//! are never encoded.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::Serialize;
//! use serde_hcl_encoder::to_string;
//!
//! #[derive(Serialize)]
//! struct Animal {
//!     #[serde(rename = "name,key")]
//!     name: String,
//!     #[serde(rename = "says;omitempty")]
//!     says: String,
//! }
//!
//! #[derive(Serialize)]
//! struct Farm {
//!     #[serde(rename = "animal,blocks")]
//!     animals: Vec<Animal>,
//! }
//!
//! let farm = Farm {
//!     animals: vec![
//!         Animal { name: "cow".into(), says: "moo".into() },
//!         Animal { name: "rock".into(), says: String::new() },
//!     ],
//! };
//!
//! assert_eq!(
//!     to_string(&farm).unwrap(),
//!     "animal \"cow\" {\n  says = \"moo\"\n}\n\nanimal \"rock\" {}\n"
//! );
//! ```
//!
//! ### Expressions and interpolation
//!
//! Strings are quoted and escaped, but `${ ... }` sequences are kept as
//! working interpolations. Fields tagged `expr` are emitted as raw
//! expressions after being checked by the [`lexer`].
//!
//! ```rust
//! use serde::Serialize;
//! use serde_hcl_encoder::to_string;
//!
//! #[derive(Serialize)]
//! struct Instance {
//!     #[serde(rename = "ami,expr")]
//!     ami: String,
//!     name: String,
//! }
//!
//! let hcl = to_string(&Instance {
//!     ami: "data.aws_ami.ubuntu.id".into(),
//!     name: "web-${var.env}".into(),
//! })
//! .unwrap();
//! assert_eq!(hcl, "ami  = data.aws_ami.ubuntu.id\nname = \"web-${var.env}\"\n");
//! ```
//!
//! ### Dynamic values with the hcl_value! macro
//!
//! ```rust
//! use serde_hcl_encoder::{hcl_value, to_string};
//!
//! let value = hcl_value!({ "enabled": true });
//! assert_eq!(to_string(&value).unwrap(), "enabled = true\n");
//! ```
//!
//! ## Output guarantees
//!
//! - Map entries are always ordered by key, so output is deterministic.
//! - Any error aborts the whole encode; nothing is written on failure.
//! - The library only logs through the `log` facade and installs no logger.

pub mod document;
pub mod encode;
pub mod error;
pub mod escape;
pub mod format;
pub mod lexer;
pub mod macros;
pub mod map;
pub mod meta;
pub mod node;
pub mod options;
pub mod ser;
pub mod value;

pub use document::Document;
pub use error::{Error, Result};
pub use map::Map;
pub use meta::FieldDescriptor;
pub use node::{Block, Body, Node};
pub use options::HclOptions;
pub use ser::{to_value, ValueSerializer};
pub use value::{Field, Kind, Number, Record, Value};

use serde::Serialize;
use std::io;

/// Encode any `T: Serialize` to HCL bytes.
///
/// # Errors
///
/// Returns an error if the value cannot be represented in HCL.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_string(value).map(String::into_bytes)
}

/// Encode any `T: Serialize` to an HCL string.
///
/// # Examples
///
/// ```rust
/// use serde_hcl_encoder::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "x = 1\ny = 2\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented in HCL.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, HclOptions::default())
}

/// Encode any `T: Serialize` to an HCL string with custom layout options.
///
/// # Errors
///
/// Returns an error if the value cannot be represented in HCL.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: HclOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(to_document(value)?.render(&options))
}

/// Encode any `T: Serialize` into a [`Document`] without rendering it.
///
/// # Examples
///
/// ```rust
/// use serde_hcl_encoder::to_document;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Server { host: String }
///
/// #[derive(Serialize)]
/// struct Config { server: Server }
///
/// let doc = to_document(&Config { server: Server { host: "localhost".into() } }).unwrap();
/// let server = doc.body().blocks().next().unwrap();
/// assert_eq!(server.ident, "server");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented in HCL.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_document<T>(value: &T) -> Result<Document>
where
    T: ?Sized + Serialize,
{
    Document::from_value(&to_value(value)?)
}

/// Encode one dynamic value as the field described by `meta`.
///
/// Returns `None` when the value produces no output.
///
/// # Examples
///
/// ```rust
/// use serde_hcl_encoder::{encode_value, FieldDescriptor, Node, Value};
///
/// let meta = FieldDescriptor::parse("region,expr").unwrap();
/// match encode_value(&Value::from("var.region"), &meta).unwrap() {
///     Some(Node::Tokens(tokens)) => assert_eq!(tokens.render(), "var.region"),
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented in HCL.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode_value(value: &Value, meta: &FieldDescriptor) -> Result<Option<Node>> {
    encode::encode(value, meta)
}

/// Encode any `T: Serialize` to a writer in HCL format.
///
/// # Examples
///
/// ```rust
/// use serde_hcl_encoder::to_writer;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer, b"x = 1\ny = 2\n");
/// ```
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails. Nothing
/// is written when encoding fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, HclOptions::default())
}

/// Encode any `T: Serialize` to a writer in HCL format with custom options.
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: HclOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let hcl = to_string_with_options(value, options)?;
    writer
        .write_all(hcl.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}
