//! Field annotations.
//!
//! Each record field carries a [`FieldDescriptor`] that tells the encoder how
//! the field maps onto HCL: its output name and which role flags apply.
//! Descriptors are parsed once per field from the field key, which is usually
//! set with `#[serde(rename = "...")]`.
//!
//! ## Tag grammar
//!
//! ```text
//! key         := structural [ ";" suppression ]
//! structural  := [ name ] { "," flag }
//! suppression := [ flag { "," flag } ]
//! ```
//!
//! Structural flags:
//!
//! | Flag            | Meaning                                                   |
//! |-----------------|-----------------------------------------------------------|
//! | `key`           | the string value becomes a label of the enclosing block   |
//! | `squash`        | the record's contents are lifted into the enclosing block |
//! | `blocks`        | a sequence of records becomes repeated sibling blocks     |
//! | `expr`          | the string is an expression, emitted unquoted             |
//! | `unusedKeys`    | decoder bookkeeping, never encoded                        |
//! | `decodedFields` | decoder bookkeeping, never encoded                        |
//!
//! Suppression flags are `omit` (never encode) and `omitempty` (skip when the
//! value is the zero value of its type). Unknown flags in either namespace are
//! ignored. A key with more than one `;` is malformed.
//!
//! A rename replaces the Rust field name entirely, so an empty name token
//! cannot fall back to it. Fields that become attributes or nested blocks
//! must spell their name out (`region;omitempty`, not `;omitempty`). Only
//! `key` and `squash` fields, suppressed fields and unnamed record fields
//! (which take the record's type name) may leave it empty.
//!
//! ## Examples
//!
//! ```rust
//! use serde_hcl_encoder::FieldDescriptor;
//!
//! let meta = FieldDescriptor::parse("animal,blocks").unwrap();
//! assert_eq!(meta.name, "animal");
//! assert!(meta.repeated_block);
//!
//! let meta = FieldDescriptor::parse("says;omitempty").unwrap();
//! assert_eq!(meta.name, "says");
//! assert!(meta.omit_empty);
//! ```

use crate::{Error, Result};

pub const KEY_FLAG: &str = "key";
pub const SQUASH_FLAG: &str = "squash";
pub const BLOCKS_FLAG: &str = "blocks";
pub const EXPR_FLAG: &str = "expr";
pub const UNUSED_KEYS_FLAG: &str = "unusedKeys";
pub const DECODED_FIELDS_FLAG: &str = "decodedFields";
pub const OMIT_FLAG: &str = "omit";
pub const OMIT_EMPTY_FLAG: &str = "omitempty";

/// Reason given when a field that needs a name has none.
pub(crate) const UNNAMED_FIELD: &str =
    "a rename replaces the field name, so write the name before the first `,` or `;` \
     (for example `region;omitempty`)";

const NAMESPACE_SEPARATOR: char = ';';
const FLAG_SEPARATOR: char = ',';

/// How one record field maps onto HCL.
///
/// Built once per field and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Attribute or block name used in the output.
    pub name: String,
    /// Promote the string value to a label of the enclosing block.
    pub key: bool,
    /// Lift the record's attributes and labels into the enclosing block.
    pub squash: bool,
    /// Render a sequence of records as repeated sibling blocks.
    pub repeated_block: bool,
    /// Emit the string unquoted as an expression.
    pub raw_expression: bool,
    /// Never encode this field.
    pub omit: bool,
    /// Skip this field when its value is the zero value.
    pub omit_empty: bool,
    /// Decoder bookkeeping (`unusedKeys` / `decodedFields`), never encoded.
    pub debug_only: bool,
    /// The field had no name of its own and took the embedded record's name.
    pub anonymous_embed: bool,
}

impl FieldDescriptor {
    /// Descriptor of a document root: no name, no flags.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Descriptor with only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        FieldDescriptor {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parses a field key written in the tag grammar.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedTag`] when the key holds more than one `;`.
    pub fn parse(key: &str) -> Result<Self> {
        let mut parts = key.splitn(3, NAMESPACE_SEPARATOR);
        let structural = parts.next().unwrap_or_default();
        let suppression = parts.next();
        if parts.next().is_some() {
            return Err(Error::malformed_tag(
                key,
                "expected at most one `;` between structural and suppression flags",
            ));
        }

        let mut tokens = structural.split(FLAG_SEPARATOR);
        let mut meta = FieldDescriptor::named(tokens.next().unwrap_or_default().trim());
        for flag in tokens {
            match flag.trim() {
                KEY_FLAG => meta.key = true,
                SQUASH_FLAG => meta.squash = true,
                BLOCKS_FLAG => meta.repeated_block = true,
                EXPR_FLAG => meta.raw_expression = true,
                UNUSED_KEYS_FLAG | DECODED_FIELDS_FLAG => meta.debug_only = true,
                _ => {}
            }
        }

        for flag in suppression.unwrap_or_default().split(FLAG_SEPARATOR) {
            match flag.trim() {
                OMIT_FLAG => meta.omit = true,
                OMIT_EMPTY_FLAG => meta.omit_empty = true,
                _ => {}
            }
        }

        Ok(meta)
    }

    /// Parses a field key, falling back to `embedded` for the name of an
    /// unnamed record-valued field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_hcl_encoder::FieldDescriptor;
    ///
    /// let meta = FieldDescriptor::for_field(",squash", Some("Farm")).unwrap();
    /// assert_eq!(meta.name, "Farm");
    /// assert!(meta.anonymous_embed);
    /// assert!(meta.squash);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedTag`] when the key cannot be parsed.
    pub fn for_field(key: &str, embedded: Option<&str>) -> Result<Self> {
        let mut meta = Self::parse(key)?;
        if meta.name.is_empty() {
            if let Some(type_name) = embedded {
                meta.name = type_name.to_string();
                meta.anonymous_embed = true;
            }
        }
        Ok(meta)
    }

    /// Returns `true` if the field is never encoded, whatever its value.
    #[inline]
    #[must_use]
    pub const fn is_suppressed(&self) -> bool {
        self.debug_only || self.omit
    }

    /// Returns `true` if the field will be written under its own name but
    /// has none.
    #[inline]
    #[must_use]
    pub fn lacks_name(&self) -> bool {
        self.name.is_empty() && !(self.key || self.squash || self.is_suppressed())
    }

    /// Descriptor for an entry of a map rendered as a block body.
    ///
    /// The entry takes the map key as its name and inherits `expr`.
    #[must_use]
    pub fn for_entry(&self, key: &str) -> Self {
        FieldDescriptor {
            name: key.to_string(),
            raw_expression: self.raw_expression,
            ..Self::default()
        }
    }

    /// Builder: marks the descriptor as a `blocks` sequence.
    #[must_use]
    pub fn with_repeated_block(mut self) -> Self {
        self.repeated_block = true;
        self
    }

    /// Builder: marks the descriptor as a raw expression.
    #[must_use]
    pub fn with_raw_expression(mut self) -> Self {
        self.raw_expression = true;
        self
    }

    /// Builder: marks the descriptor as a label field.
    #[must_use]
    pub fn with_key(mut self) -> Self {
        self.key = true;
        self
    }

    /// Name used in error messages.
    pub(crate) fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "<unnamed>"
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name() {
        let meta = FieldDescriptor::parse("port").unwrap();
        assert_eq!(meta, FieldDescriptor::named("port"));
    }

    #[test]
    fn test_structural_flags_are_additive() {
        let meta = FieldDescriptor::parse("widget,blocks,expr").unwrap();
        assert_eq!(meta.name, "widget");
        assert!(meta.repeated_block);
        assert!(meta.raw_expression);
        assert!(!meta.key);
        assert!(!meta.squash);
    }

    #[test]
    fn test_key_without_name() {
        let meta = FieldDescriptor::parse(",key").unwrap();
        assert_eq!(meta.name, "");
        assert!(meta.key);
    }

    #[test]
    fn test_flags_are_case_sensitive_and_unknown_ignored() {
        let meta = FieldDescriptor::parse("x,KEY,Squash,whatever;OMIT,later").unwrap();
        assert_eq!(meta, FieldDescriptor::named("x"));
    }

    #[test]
    fn test_debug_markers() {
        assert!(FieldDescriptor::parse("u,unusedKeys").unwrap().debug_only);
        assert!(FieldDescriptor::parse("d,decodedFields").unwrap().debug_only);
        assert!(FieldDescriptor::parse("d,decodedFields")
            .unwrap()
            .is_suppressed());
    }

    #[test]
    fn test_suppression_namespace() {
        let meta = FieldDescriptor::parse("ssn;omit").unwrap();
        assert!(meta.omit);
        assert!(meta.is_suppressed());

        let meta = FieldDescriptor::parse(";omitempty,omit").unwrap();
        assert_eq!(meta.name, "");
        assert!(meta.omit_empty);
        assert!(meta.omit);
    }

    #[test]
    fn test_namespaces_are_independent() {
        // Suppression flags in the structural part are not honoured, and
        // structural flags after `;` are ignored.
        let meta = FieldDescriptor::parse("a,omit;key").unwrap();
        assert!(!meta.omit);
        assert!(!meta.key);
    }

    #[test]
    fn test_malformed_tag() {
        let err = FieldDescriptor::parse("a;omit;omitempty").unwrap_err();
        assert!(matches!(err, Error::MalformedTag { .. }));
    }

    #[test]
    fn test_embedded_name_only_when_unnamed() {
        let meta = FieldDescriptor::for_field("farm,squash", Some("Farm")).unwrap();
        assert_eq!(meta.name, "farm");
        assert!(!meta.anonymous_embed);

        let meta = FieldDescriptor::for_field(",key", None).unwrap();
        assert_eq!(meta.name, "");
        assert!(!meta.anonymous_embed);
    }

    #[test]
    fn test_lacks_name() {
        assert!(FieldDescriptor::parse(";omitempty").unwrap().lacks_name());
        assert!(FieldDescriptor::parse(",expr").unwrap().lacks_name());
        assert!(!FieldDescriptor::parse(",key").unwrap().lacks_name());
        assert!(!FieldDescriptor::parse(",squash").unwrap().lacks_name());
        assert!(!FieldDescriptor::parse(";omit").unwrap().lacks_name());
        assert!(!FieldDescriptor::for_field(";omitempty", Some("Base"))
            .unwrap()
            .lacks_name());
    }

    #[test]
    fn test_for_entry_inherits_expr_only() {
        let parent = FieldDescriptor::parse("vars,expr,blocks;omitempty").unwrap();
        let entry = parent.for_entry("region");
        assert_eq!(entry.name, "region");
        assert!(entry.raw_expression);
        assert!(!entry.repeated_block);
        assert!(!entry.omit_empty);
    }
}
