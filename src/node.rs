//! Encoder output types.
//!
//! [`Node`] is what encoding a single value produces. Its four variants are
//! mutually exclusive, and "no output" is expressed as `Option::<Node>::None`,
//! never as an empty variant, so an omitted field stays distinguishable from a
//! field that produced an empty block.
//!
//! [`Block`], [`Body`] and [`Attribute`] form the structure that nodes are
//! assembled into; [`Tokens`] carry composite literals and raw expressions
//! that are spliced into the output verbatim.

use crate::escape::escape_literal;
use crate::value::Number;
use std::fmt;

/// The result of encoding one value.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// A named block with labels and a body.
    Block(Block),
    /// Sibling blocks produced by a `blocks` sequence.
    BlockList(Vec<Block>),
    /// A literal ready for direct embedding. Key fields surface their string
    /// here for the enclosing record to turn into a label.
    Scalar(Scalar),
    /// A pre-lexed composite literal or raw expression.
    Tokens(Tokens),
}

/// A literal scalar.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Number(Number),
    /// Unescaped string content.
    String(String),
}

/// A block: type name, labels, body.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Block {
    pub ident: String,
    pub labels: Vec<String>,
    pub body: Body,
}

/// The ordered contents of a block or document.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Body {
    items: Vec<Structure>,
}

/// One entry of a [`Body`].
#[derive(Clone, Debug, PartialEq)]
pub enum Structure {
    Attribute(Attribute),
    Block(Block),
}

/// A `name = value` pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: Expression,
}

/// The right-hand side of an attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Scalar(Scalar),
    Tokens(Tokens),
}

/// Lexical class of a [`Token`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Number,
    /// A whole quoted template, quotes included.
    QuotedTemplate,
    /// `(`, `[` or `{`
    Open,
    /// `)`, `]` or `}`
    Close,
    Comma,
    Operator,
}

/// A lexical token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Whether a space precedes the token when rendered.
    pub spaced: bool,
}

/// A token sequence.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Tokens(Vec<Token>);

impl Node {
    /// Short name of the variant, for error messages.
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Node::Block(_) => "block",
            Node::BlockList(_) => "block list",
            Node::Scalar(Scalar::String(_)) => "string",
            Node::Scalar(_) => "scalar",
            Node::Tokens(_) => "expression",
        }
    }
}

impl Scalar {
    /// Renders the literal as HCL source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_hcl_encoder::node::Scalar;
    ///
    /// assert_eq!(Scalar::Bool(true).render(), "true");
    /// assert_eq!(Scalar::String("a\"b".into()).render(), "\"a\\\"b\"");
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Number(n) => n.to_string(),
            Scalar::String(s) => format!("\"{}\"", escape_literal(s)),
        }
    }
}

impl Block {
    /// Creates an empty block.
    #[must_use]
    pub fn new(ident: impl Into<String>) -> Self {
        Block {
            ident: ident.into(),
            labels: Vec::new(),
            body: Body::new(),
        }
    }

    /// Builder: appends a label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Builder: sets an attribute in the body.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: Expression) -> Self {
        self.body.set_attribute(name, value);
        self
    }

    /// Builder: appends a nested block.
    #[must_use]
    pub fn with_block(mut self, block: Block) -> Self {
        self.body.push_block(block);
        self
    }
}

impl Body {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute. An existing attribute with the same name is
    /// replaced in place; otherwise the attribute is appended.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: Expression) {
        let name = name.into();
        let existing = self
            .items
            .iter()
            .position(|item| matches!(item, Structure::Attribute(attr) if attr.name == name));
        let attribute = Structure::Attribute(Attribute { name, value });
        match existing {
            Some(index) => self.items[index] = attribute,
            None => self.items.push(attribute),
        }
    }

    /// Appends a nested block.
    pub fn push_block(&mut self, block: Block) {
        self.items.push(Structure::Block(block));
    }

    /// Appends every item of `other`, in order.
    pub fn append(&mut self, other: Body) {
        self.items.extend(other.items);
    }

    #[must_use]
    pub fn items(&self) -> &[Structure] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.items.iter().find_map(|item| match item {
            Structure::Attribute(attr) if attr.name == name => Some(attr),
            _ => None,
        })
    }

    /// Iterates over the nested blocks.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.items.iter().filter_map(|item| match item {
            Structure::Block(block) => Some(block),
            Structure::Attribute(_) => None,
        })
    }
}

impl Expression {
    /// Renders the expression as HCL source.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Expression::Scalar(s) => s.render(),
            Expression::Tokens(t) => t.render(),
        }
    }
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: &str, spaced: bool) -> Self {
        Token {
            kind,
            text: text.to_string(),
            spaced,
        }
    }
}

impl Tokens {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: Token) {
        self.0.push(token);
    }

    /// Appends another sequence, forcing the spacing of its first token.
    pub fn extend(&mut self, other: Tokens, spaced: bool) {
        let mut iter = other.0.into_iter();
        if let Some(mut first) = iter.next() {
            first.spaced = spaced;
            self.0.push(first);
        }
        self.0.extend(iter);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.0.iter()
    }

    /// Renders the tokens. Spacing before the first token is dropped.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 && token.spaced {
                out.push(' ');
            }
            out.push_str(&token.text);
        }
        out
    }
}

impl fmt::Display for Tokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
