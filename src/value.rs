//! Dynamic value representation fed to the encoder.
//!
//! Every input, whether it comes from a `Serialize` type through
//! [`to_value`](crate::to_value) or is built by hand, is first turned into a
//! [`Value`]. The encoder only ever looks at this tree, never at concrete Rust
//! types.
//!
//! ## Core Types
//!
//! - [`Value`]: null (absent), bool, number, string, sequence, map, record, or
//!   an opaque value the encoder cannot represent
//! - [`Record`]: a named, ordered list of [`Field`]s, each carrying its
//!   [`FieldDescriptor`]
//! - [`Kind`]: the classification the encoder dispatches on
//!
//! ## Examples
//!
//! ```rust
//! use serde_hcl_encoder::{to_value, Kind, Value};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let value = to_value(&Point { x: 1, y: 2 }).unwrap();
//! assert_eq!(value.kind(), Kind::Record);
//!
//! let missing: Option<u8> = None;
//! assert!(to_value(&missing).unwrap().is_absent());
//! ```

use crate::{FieldDescriptor, Map};
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;

/// A dynamically-typed value ready for encoding.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// An absent value: `None`, `()`, or an explicit null.
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// An ordered sequence. An empty sequence is present, unlike `Null`.
    Seq(Vec<Value>),
    Map(Map),
    Record(Record),
    /// A value with no HCL representation (byte buffers, data-carrying enum
    /// variants). Holds a short description of what it was.
    Opaque(String),
}

/// A numeric value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

/// The shape of a [`Value`] as seen by the encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Absent,
    Bool,
    Integer,
    Float,
    String,
    Sequence,
    Map,
    Record,
    Unsupported,
}

/// A record: a type name and its fields in declaration order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Record {
    name: String,
    fields: Vec<Field>,
}

/// One field of a [`Record`].
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    descriptor: FieldDescriptor,
    value: Value,
    /// Set when the value was wrapped in `Some`. Such a field is never zero,
    /// since the zero value of an optional is `None`.
    present: bool,
}

impl Number {
    /// Returns `true` for integers and finite floats.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Number::Int(_) | Number::UInt(_) => true,
            Number::Float(f) => f.is_finite(),
        }
    }

    /// Returns `true` if the number equals zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Number::Int(i) => *i == 0,
            Number::UInt(u) => *u == 0,
            Number::Float(f) => *f == 0.0,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::UInt(u) => write!(f, "{}", u),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Absent => "null",
            Kind::Bool => "bool",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Sequence => "sequence",
            Kind::Map => "map",
            Kind::Record => "record",
            Kind::Unsupported => "unsupported value",
        };
        f.write_str(name)
    }
}

impl Record {
    /// Creates an empty record with the given type name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Record {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    pub fn push(&mut self, descriptor: FieldDescriptor, value: Value) {
        self.fields.push(Field {
            descriptor,
            value,
            present: false,
        });
    }

    /// Appends a field whose value came out of `Some`. It is kept under
    /// `omitempty` even when the inner value is zero.
    pub fn push_some(&mut self, descriptor: FieldDescriptor, value: Value) {
        self.fields.push(Field {
            descriptor,
            value,
            present: true,
        });
    }

    /// Builder form of [`Record::push`].
    #[must_use]
    pub fn with_field(mut self, descriptor: FieldDescriptor, value: impl Into<Value>) -> Self {
        self.push(descriptor, value.into());
        self
    }

    /// The record's type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// A record is zero when every field holds its zero value.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.fields.iter().all(Field::is_zero)
    }
}

impl Field {
    #[must_use]
    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns `true` if the value was wrapped in `Some`.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// The zero test `omitempty` applies to this field.
    ///
    /// `Some(0)` and `Some(false)` are not zero here: only `None` is the zero
    /// value of an optional.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        !self.present && self.value.is_zero()
    }
}

impl Value {
    /// Classifies the value.
    ///
    /// Optional and boxed layers are already unwrapped when the value is
    /// built, so an absent value at any depth of indirection is `Null`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_hcl_encoder::{Kind, Value};
    ///
    /// assert_eq!(Value::Null.kind(), Kind::Absent);
    /// assert_eq!(Value::Seq(vec![]).kind(), Kind::Sequence);
    /// assert_eq!(Value::from(1.5).kind(), Kind::Float);
    /// ```
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Absent,
            Value::Bool(_) => Kind::Bool,
            Value::Number(Number::Float(_)) => Kind::Float,
            Value::Number(_) => Kind::Integer,
            Value::String(_) => Kind::String,
            Value::Seq(_) => Kind::Sequence,
            Value::Map(_) => Kind::Map,
            Value::Record(_) => Kind::Record,
            Value::Opaque(_) => Kind::Unsupported,
        }
    }

    /// Returns `true` if the value is absent.
    #[inline]
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for bool, number and string values.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Value::Bool(_) | Value::Number(_) | Value::String(_))
    }

    /// Returns `true` for records and maps, the values that can become blocks.
    #[inline]
    #[must_use]
    pub const fn is_structured(&self) -> bool {
        matches!(self, Value::Record(_) | Value::Map(_))
    }

    /// Returns `true` if the value equals the zero value of its type.
    ///
    /// Absent values, `false`, numeric zero, the empty string and empty
    /// collections are zero; a record is zero when all of its fields are.
    /// Opaque values are never zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_hcl_encoder::Value;
    ///
    /// assert!(Value::from("").is_zero());
    /// assert!(Value::from(0u8).is_zero());
    /// assert!(!Value::from("moo").is_zero());
    /// ```
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !*b,
            Value::Number(n) => n.is_zero(),
            Value::String(s) => s.is_empty(),
            Value::Seq(v) => v.is_empty(),
            Value::Map(m) => m.is_empty(),
            Value::Record(r) => r.is_zero(),
            Value::Opaque(_) => false,
        }
    }

    /// If the value is a string, returns it.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a record, returns it.
    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// If the value is a map, returns it.
    #[must_use]
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($variant:ident as $target:ty: $($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::$variant(value as $target))
                }
            }
        )*
    };
}

impl_from_int!(Int as i64: i8, i16, i32, i64);
impl_from_int!(UInt as u64: u8, u16, u32, u64);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(Number::Float(f64::from(value)))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Seq(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Map(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl Serialize for Value {
    /// Values serialize as their serde equivalents. Records become maps of
    /// their unsuppressed fields, so field annotations do not survive a trip
    /// through another serializer; use [`Document::from_value`] to encode a
    /// hand-built record with its annotations.
    ///
    /// [`Document::from_value`]: crate::Document::from_value
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Int(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::UInt(u)) => serializer.serialize_u64(*u),
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
            Value::Record(record) => {
                let mut out = serializer.serialize_map(None)?;
                for field in record.fields() {
                    if !field.descriptor.is_suppressed() {
                        out.serialize_entry(&field.descriptor.name, &field.value)?;
                    }
                }
                out.end()
            }
            Value::Opaque(kind) => Err(S::Error::custom(format!("cannot serialize {}", kind))),
        }
    }
}
