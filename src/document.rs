//! Document assembly.
//!
//! A [`Document`] is the top-level body of an HCL file. It is built from the
//! node produced for the root value:
//!
//! | Root node            | Document body                         |
//! |----------------------|---------------------------------------|
//! | unnamed block        | the block's body, spliced in          |
//! | named block          | that block as the only top-level item |
//! | block list           | each block at top level, in order     |
//! | anything else / none | error                                 |
//!
//! ## Examples
//!
//! ```rust
//! use serde_hcl_encoder::node::{Block, Node};
//! use serde_hcl_encoder::{Document, HclOptions};
//!
//! let node = Node::BlockList(vec![
//!     Block::new("animal").with_label("cow"),
//!     Block::new("animal").with_label("rock"),
//! ]);
//! let doc = Document::from_node(Some(node)).unwrap();
//! assert_eq!(
//!     doc.render(&HclOptions::default()),
//!     "animal \"cow\" {}\n\nanimal \"rock\" {}\n"
//! );
//! ```

use crate::encode::encode_root;
use crate::format;
use crate::node::{Body, Node};
use crate::{Error, HclOptions, Result, Value};
use log::debug;

/// The top-level body of an HCL file.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Document {
    body: Body,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a document from the root node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRoot`] when the node is absent, is a scalar or
    /// expression, or is an unnamed block that carries labels.
    pub fn from_node(node: Option<Node>) -> Result<Self> {
        let mut body = Body::new();

        match node {
            None => return Err(Error::invalid_root("nothing to encode: root value is absent")),
            Some(Node::Block(block)) if block.ident.is_empty() => {
                if !block.labels.is_empty() {
                    return Err(Error::invalid_root(&format!(
                        "unnamed root block cannot carry labels ({})",
                        block.labels.join(", ")
                    )));
                }
                debug!("root block spliced into document ({} items)", block.body.len());
                body.append(block.body);
            }
            Some(Node::Block(block)) => {
                debug!("root block `{}` placed at top level", block.ident);
                body.push_block(block);
            }
            Some(Node::BlockList(blocks)) => {
                debug!("{} root blocks placed at top level", blocks.len());
                for block in blocks {
                    body.push_block(block);
                }
            }
            Some(other) => {
                return Err(Error::invalid_root(&format!(
                    "root must encode to a block, got {}",
                    other.describe()
                )))
            }
        }

        Ok(Document { body })
    }

    /// Encodes a root value and builds the document from it.
    ///
    /// This is the entry point for values built by hand, such as records
    /// whose field descriptors were not parsed from serde keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_hcl_encoder::{Document, FieldDescriptor, HclOptions, Record, Value};
    ///
    /// let animal = Record::new("Animal")
    ///     .with_field(FieldDescriptor::named("name").with_key(), "cow")
    ///     .with_field(FieldDescriptor::named("says"), "moo");
    /// let farm = Record::new("Farm").with_field(
    ///     FieldDescriptor::named("animal").with_repeated_block(),
    ///     vec![Value::Record(animal)],
    /// );
    ///
    /// let doc = Document::from_value(&Value::Record(farm)).unwrap();
    /// assert_eq!(
    ///     doc.render(&HclOptions::default()),
    ///     "animal \"cow\" {\n  says = \"moo\"\n}\n"
    /// );
    /// ```
    ///
    /// # Errors
    ///
    /// Fails on any encoding error, or with [`Error::InvalidRoot`] as for
    /// [`Document::from_node`].
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::from_node(encode_root(value)?)
    }

    #[must_use]
    pub fn body(&self) -> &Body {
        &self.body
    }

    #[must_use]
    pub fn into_body(self) -> Body {
        self.body
    }

    /// Lays the document out as text.
    #[must_use]
    pub fn render(&self, options: &HclOptions) -> String {
        format::render(&self.body, options)
    }
}
