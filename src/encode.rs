//! The tree encoder.
//!
//! [`encode`] walks a [`Value`] depth-first and returns the [`Node`] for it,
//! or `None` when the value produces no output. Dispatch, in order:
//!
//! 1. **Absent** values produce nothing.
//! 2. **Key** fields must hold a string, which is surfaced as
//!    [`Scalar::String`] for the enclosing record to use as a label.
//! 3. **Scalars** become literals. Strings are escaped and quoted, unless the
//!    field is an `expr`, in which case the string is lexed and spliced as is.
//! 4. **Maps** become inline object literals with keys sorted ascending. A
//!    map at the document root becomes the document body instead (see
//!    [`encode_root`]).
//! 5. **Sequences** of scalars become list literals. Sequences of records or
//!    maps become sibling blocks only when the field is tagged `blocks`;
//!    otherwise they are list literals of object literals.
//! 6. **Records** become blocks named after the field. Key fields add labels,
//!    squashed fields are flattened in place, and every other field becomes a
//!    nested block, a run of sibling blocks, or an attribute.
//!
//! Any error aborts the whole encode.

use crate::escape::{escape, escape_literal};
use crate::lexer::{is_identifier, lex};
use crate::meta::UNNAMED_FIELD;
use crate::node::{Block, Body, Expression, Node, Scalar, Token, TokenKind, Tokens};
use crate::{Error, FieldDescriptor, Map, Number, Record, Result, Value};
use log::trace;

/// Encodes `value` as the field described by `meta`.
///
/// # Errors
///
/// Returns [`Error::InvalidKeyField`], [`Error::InvalidSquashTarget`],
/// [`Error::UnsupportedKind`], [`Error::MalformedExpression`],
/// [`Error::MalformedTag`] or [`Error::InvalidIdentifier`] for the first
/// offending field found.
pub fn encode(value: &Value, meta: &FieldDescriptor) -> Result<Option<Node>> {
    if value.is_absent() {
        return Ok(None);
    }

    if meta.key {
        return match value {
            Value::String(label) => Ok(Some(Node::Scalar(Scalar::String(label.clone())))),
            other => Err(Error::invalid_key_field(
                meta.display_name(),
                &other.kind().to_string(),
            )),
        };
    }

    let node = match value {
        Value::Null => return Ok(None),
        Value::Bool(b) => Node::Scalar(Scalar::Bool(*b)),
        Value::Number(n) => Node::Scalar(Scalar::Number(finite(*n, meta)?)),
        Value::String(s) => Node::Tokens(string_tokens(s, meta)?),
        Value::Seq(items) => encode_sequence(items, meta)?,
        Value::Map(map) => Node::Tokens(map_literal(map, meta)?),
        Value::Record(record) => Node::Block(encode_record(record, meta)?),
        Value::Opaque(kind) => return Err(Error::unsupported_kind(meta.display_name(), kind)),
    };
    Ok(Some(node))
}

/// Encodes a document root.
///
/// Identical to [`encode`] with an unnamed descriptor, except that a map
/// becomes an unnamed block whose body holds one entry per key.
///
/// # Errors
///
/// Same as [`encode`].
pub fn encode_root(value: &Value) -> Result<Option<Node>> {
    let meta = FieldDescriptor::root();
    match value {
        Value::Map(map) => Ok(Some(Node::Block(map_block(map, &meta)?))),
        other => encode(other, &meta),
    }
}

fn encode_record(record: &Record, meta: &FieldDescriptor) -> Result<Block> {
    let mut block = Block::new(meta.name.clone());

    for field in record.fields() {
        let field_meta = field.descriptor();
        let value = field.value();

        if field_meta.is_suppressed() {
            trace!("{}: skipping suppressed field `{}`", record.name(), field_meta.name);
            continue;
        }
        if field_meta.omit_empty && field.is_zero() {
            trace!("{}: omitting empty field `{}`", record.name(), field_meta.name);
            continue;
        }

        let Some(node) = encode(value, field_meta)? else {
            trace!("{}: field `{}` is absent", record.name(), field_meta.name);
            continue;
        };

        if field_meta.key {
            match node {
                Node::Scalar(Scalar::String(label)) => {
                    trace!("{}: label `{}` from key field", record.name(), label);
                    block.labels.push(label);
                }
                other => {
                    return Err(Error::invalid_key_field(
                        field_meta.display_name(),
                        other.describe(),
                    ))
                }
            }
            continue;
        }

        if field_meta.squash {
            match node {
                Node::Block(inner) => {
                    trace!("{}: squashing `{}`", record.name(), field_meta.name);
                    block.body.append(inner.body);
                    block.labels.extend(inner.labels);
                }
                _ => {
                    return Err(Error::invalid_squash_target(
                        field_meta.display_name(),
                        &value.kind().to_string(),
                    ))
                }
            }
            continue;
        }

        append_node(&mut block.body, field_meta, node)?;
    }

    Ok(block)
}

fn append_node(body: &mut Body, meta: &FieldDescriptor, node: Node) -> Result<()> {
    match node {
        Node::Block(block) => {
            require_identifier(meta)?;
            body.push_block(block);
        }
        Node::BlockList(blocks) => {
            if !blocks.is_empty() {
                require_identifier(meta)?;
            }
            for block in blocks {
                body.push_block(block);
            }
        }
        Node::Scalar(scalar) => {
            body.set_attribute(require_identifier(meta)?, Expression::Scalar(scalar))
        }
        Node::Tokens(tokens) => {
            body.set_attribute(require_identifier(meta)?, Expression::Tokens(tokens))
        }
    }
    Ok(())
}

fn require_name(meta: &FieldDescriptor) -> Result<&str> {
    if meta.name.is_empty() {
        return Err(Error::malformed_tag("", UNNAMED_FIELD));
    }
    Ok(&meta.name)
}

/// The name an attribute or block is written under, unquoted.
fn require_identifier(meta: &FieldDescriptor) -> Result<&str> {
    let name = require_name(meta)?;
    if !is_identifier(name) {
        return Err(Error::invalid_identifier(name));
    }
    Ok(name)
}

fn encode_sequence(items: &[Value], meta: &FieldDescriptor) -> Result<Node> {
    let first_present = items.iter().find(|item| !item.is_absent());
    let block_candidate = first_present.map_or(true, Value::is_structured);

    if !(meta.repeated_block && block_candidate) {
        return Ok(Node::Tokens(list_literal(items, meta)?));
    }

    let mut blocks = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Null => trace!("{}: skipping absent block", meta.name),
            Value::Record(record) => blocks.push(encode_record(record, meta)?),
            Value::Map(map) => blocks.push(map_block(map, meta)?),
            other => {
                return Err(Error::unsupported_kind(
                    meta.display_name(),
                    &format!("{} inside a repeated block", other.kind()),
                ))
            }
        }
    }
    Ok(Node::BlockList(blocks))
}

/// A map laid out as a block body: one entry per key, keys ascending.
fn map_block(map: &Map, meta: &FieldDescriptor) -> Result<Block> {
    let mut block = Block::new(meta.name.clone());
    for (key, value) in map.sorted_entries() {
        let entry_meta = meta.for_entry(key);
        if let Some(node) = encode(value, &entry_meta)? {
            if !is_identifier(key) {
                return Err(Error::invalid_identifier(key));
            }
            append_node(&mut block.body, &entry_meta, node)?;
        }
    }
    Ok(block)
}

fn finite(n: Number, meta: &FieldDescriptor) -> Result<Number> {
    if n.is_finite() {
        Ok(n)
    } else {
        Err(Error::unsupported_kind(
            meta.display_name(),
            &format!("non-finite float {}", n),
        ))
    }
}

fn string_tokens(s: &str, meta: &FieldDescriptor) -> Result<Tokens> {
    if meta.raw_expression {
        lex(s)
    } else {
        lex(&format!("\"{}\"", escape(s)))
    }
}

/// Renders any value as an inline literal.
fn literal(value: &Value, meta: &FieldDescriptor) -> Result<Tokens> {
    match value {
        Value::Null => Ok(single(TokenKind::Ident, "null")),
        Value::Bool(b) => Ok(single(TokenKind::Ident, &b.to_string())),
        Value::Number(n) => Ok(single(TokenKind::Number, &finite(*n, meta)?.to_string())),
        Value::String(s) => string_tokens(s, meta),
        Value::Seq(items) => list_literal(items, meta),
        Value::Map(map) => map_literal(map, meta),
        Value::Record(record) => record_literal(record),
        Value::Opaque(kind) => Err(Error::unsupported_kind(meta.display_name(), kind)),
    }
}

fn list_literal(items: &[Value], meta: &FieldDescriptor) -> Result<Tokens> {
    let mut tokens = single(TokenKind::Open, "[");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            tokens.push(Token::new(TokenKind::Comma, ",", false));
        }
        tokens.extend(literal(item, meta)?, i > 0);
    }
    tokens.push(Token::new(TokenKind::Close, "]", false));
    Ok(tokens)
}

fn map_literal(map: &Map, meta: &FieldDescriptor) -> Result<Tokens> {
    let mut entries = Vec::with_capacity(map.len());
    for (key, value) in map.sorted_entries() {
        entries.push((key.clone(), literal(value, meta)?));
    }
    Ok(object_literal(entries))
}

fn record_literal(record: &Record) -> Result<Tokens> {
    let mut entries = Vec::new();
    collect_entries(record, &mut entries)?;
    Ok(object_literal(entries))
}

fn collect_entries(record: &Record, entries: &mut Vec<(String, Tokens)>) -> Result<()> {
    for field in record.fields() {
        let meta = field.descriptor();
        let value = field.value();

        if meta.is_suppressed() || value.is_absent() || (meta.omit_empty && field.is_zero()) {
            continue;
        }

        if meta.squash {
            match value {
                Value::Record(inner) => collect_entries(inner, entries)?,
                other => {
                    return Err(Error::invalid_squash_target(
                        meta.display_name(),
                        &other.kind().to_string(),
                    ))
                }
            }
            continue;
        }

        let name = require_name(meta)?.to_string();
        entries.push((name, literal(value, meta)?));
    }
    Ok(())
}

fn object_literal(entries: Vec<(String, Tokens)>) -> Tokens {
    let mut tokens = single(TokenKind::Open, "{");
    let populated = !entries.is_empty();

    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            tokens.push(Token::new(TokenKind::Comma, ",", false));
        }
        let quoted = format!("\"{}\"", escape_literal(&key));
        tokens.push(Token::new(TokenKind::QuotedTemplate, &quoted, true));
        tokens.push(Token::new(TokenKind::Operator, "=", true));
        tokens.extend(value, true);
    }

    tokens.push(Token::new(TokenKind::Close, "}", populated));
    tokens
}

fn single(kind: TokenKind, text: &str) -> Tokens {
    let mut tokens = Tokens::new();
    tokens.push(Token::new(kind, text, false));
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Structure;

    fn named(name: &str) -> FieldDescriptor {
        FieldDescriptor::named(name)
    }

    fn tag(key: &str) -> FieldDescriptor {
        FieldDescriptor::parse(key).unwrap()
    }

    fn block_of(node: Option<Node>) -> Block {
        match node {
            Some(Node::Block(block)) => block,
            other => panic!("expected block, got {other:?}"),
        }
    }

    fn attr(block: &Block, name: &str) -> String {
        block.body.attribute(name).unwrap().value.render()
    }

    #[test]
    fn test_absent_produces_nothing() {
        assert_eq!(encode(&Value::Null, &named("x")).unwrap(), None);
        assert_eq!(encode(&Value::Null, &tag("x,key")).unwrap(), None);
    }

    #[test]
    fn test_scalars() {
        let node = encode(&Value::from(true), &named("b")).unwrap();
        assert_eq!(node, Some(Node::Scalar(Scalar::Bool(true))));

        let node = encode(&Value::from(-12i32), &named("n")).unwrap().unwrap();
        assert_eq!(node, Node::Scalar(Scalar::Number(Number::Int(-12))));

        match encode(&Value::from("a\"b"), &named("s")).unwrap().unwrap() {
            Node::Tokens(tokens) => assert_eq!(tokens.render(), "\"a\\\"b\""),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_float_rejected() {
        let err = encode(&Value::from(f64::NAN), &named("ratio")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedKind { ref field, .. } if field == "ratio"));
    }

    #[test]
    fn test_raw_expression_is_not_quoted() {
        let meta = tag("region,expr");
        match encode(&Value::from("var.region"), &meta).unwrap().unwrap() {
            Node::Tokens(tokens) => assert_eq!(tokens.render(), "var.region"),
            other => panic!("unexpected {other:?}"),
        }

        let err = encode(&Value::from("var.(region"), &meta).unwrap_err();
        assert!(matches!(err, Error::MalformedExpression { .. }));
    }

    #[test]
    fn test_broken_interpolation_in_string_fails() {
        let err = encode(&Value::from("${oops"), &named("s")).unwrap_err();
        assert!(matches!(err, Error::MalformedExpression { .. }));
    }

    #[test]
    fn test_key_field_must_be_string() {
        let record = Record::new("Widget")
            .with_field(tag("id,key"), 7u32)
            .with_field(named("size"), 1u8);
        let err = encode(&Value::Record(record), &named("widget")).unwrap_err();
        assert_eq!(err, Error::invalid_key_field("id", "integer"));
    }

    #[test]
    fn test_key_bubbling() {
        let record = Record::new("Foo")
            .with_field(tag(",key"), "bar")
            .with_field(tag(",key"), "baz")
            .with_field(named("fizz"), "buzz");
        let block = block_of(encode(&Value::Record(record), &named("foo")).unwrap());

        assert_eq!(block.ident, "foo");
        assert_eq!(block.labels, vec!["bar", "baz"]);
        assert_eq!(block.body.len(), 1);
        assert_eq!(attr(&block, "fizz"), "\"buzz\"");
    }

    #[test]
    fn test_squash_flattens_body_and_labels() {
        let inner = Record::new("Base")
            .with_field(tag("kind,key"), "web")
            .with_field(named("port"), 80u16);
        let outer = Record::new("Service")
            .with_field(tag(",key"), "api")
            .with_field(tag(",squash"), inner)
            .with_field(named("replicas"), 3u8);
        let block = block_of(encode(&Value::Record(outer), &named("service")).unwrap());

        assert_eq!(block.labels, vec!["api", "web"]);
        assert_eq!(block.body.len(), 2);
        assert!(block.body.blocks().next().is_none());
        assert_eq!(attr(&block, "port"), "80");
        assert_eq!(attr(&block, "replicas"), "3");
    }

    #[test]
    fn test_squash_requires_record() {
        let outer = Record::new("S").with_field(tag("x,squash"), "nope");
        let err = encode(&Value::Record(outer), &named("s")).unwrap_err();
        assert_eq!(err, Error::invalid_squash_target("x", "string"));
    }

    #[test]
    fn test_omission() {
        let record = Record::new("Animal")
            .with_field(tag("secret;omit"), "hidden")
            .with_field(tag("seen,unusedKeys"), vec![Value::from("a")])
            .with_field(tag("says;omitempty"), "")
            .with_field(tag("legs;omitempty"), 0u8)
            .with_field(named("owner"), Value::Null);
        let block = block_of(encode(&Value::Record(record), &named("animal")).unwrap());
        assert!(block.body.is_empty());
    }

    #[test]
    fn test_suppressed_opaque_is_fine() {
        let record = Record::new("R")
            .with_field(tag("callback;omit"), Value::Opaque("function".into()))
            .with_field(named("ok"), true);
        let block = block_of(encode(&Value::Record(record), &named("r")).unwrap());
        assert_eq!(block.body.len(), 1);

        let record = Record::new("R").with_field(named("callback"), Value::Opaque("function".into()));
        let err = encode(&Value::Record(record), &named("r")).unwrap_err();
        assert_eq!(err, Error::unsupported_kind("callback", "function"));
    }

    #[test]
    fn test_sequence_of_records_without_blocks_is_list_literal() {
        let items = vec![
            Value::Record(Record::new("W").with_field(named("foo"), "bar")),
            Value::Record(Record::new("W").with_field(named("foo"), "baz")),
        ];
        match encode(&Value::Seq(items), &named("widget")).unwrap().unwrap() {
            Node::Tokens(tokens) => {
                assert_eq!(tokens.render(), "[{ \"foo\" = \"bar\" }, { \"foo\" = \"baz\" }]")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_sequence_of_records_with_blocks() {
        let items = vec![
            Value::Record(Record::new("W").with_field(tag("foo,key"), "bar")),
            Value::Null,
            Value::Record(Record::new("W").with_field(tag("foo,key"), "baz")),
        ];
        match encode(&Value::Seq(items), &tag("widget,blocks")).unwrap().unwrap() {
            Node::BlockList(blocks) => {
                assert_eq!(blocks.len(), 2);
                assert_eq!(blocks[0].ident, "widget");
                assert_eq!(blocks[0].labels, vec!["bar"]);
                assert_eq!(blocks[1].labels, vec!["baz"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_blocks_flag_on_scalars_falls_back_to_list() {
        let items = vec![Value::from(1), Value::from(2)];
        match encode(&Value::Seq(items), &tag("ports,blocks")).unwrap().unwrap() {
            Node::Tokens(tokens) => assert_eq!(tokens.render(), "[1, 2]"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_blocks_flag_on_empty_sequence() {
        let node = encode(&Value::Seq(vec![]), &tag("rule,blocks")).unwrap();
        assert_eq!(node, Some(Node::BlockList(vec![])));

        match encode(&Value::Seq(vec![]), &named("rule")).unwrap().unwrap() {
            Node::Tokens(tokens) => assert_eq!(tokens.render(), "[]"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_mixed_repeated_block_rejected() {
        let items = vec![
            Value::Record(Record::new("W").with_field(named("a"), 1u8)),
            Value::from("stray"),
        ];
        let err = encode(&Value::Seq(items), &tag("w,blocks")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedKind { .. }));
    }

    #[test]
    fn test_map_is_sorted_object_literal() {
        let map: Map = [("House", "123 Numbers Lane"), ("Barn", "456 Digits Drive")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), Value::from(v)))
            .collect();
        match encode(&Value::Map(map), &named("buildings")).unwrap().unwrap() {
            Node::Tokens(tokens) => assert_eq!(
                tokens.render(),
                "{ \"Barn\" = \"456 Digits Drive\", \"House\" = \"123 Numbers Lane\" }"
            ),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_map_root_becomes_body() {
        let mut map = Map::new();
        map.insert("foo".into(), Value::Seq(vec!["bar".into(), "baz".into()]));
        map.insert(
            "bar".into(),
            Value::Seq(vec![Value::Seq(vec!["bar".into()]), Value::Seq(vec!["baz".into()])]),
        );
        let block = block_of(encode_root(&Value::Map(map)).unwrap());

        assert_eq!(block.ident, "");
        let names: Vec<_> = block
            .body
            .items()
            .iter()
            .map(|item| match item {
                Structure::Attribute(a) => a.name.clone(),
                Structure::Block(b) => b.ident.clone(),
            })
            .collect();
        assert_eq!(names, vec!["bar", "foo"]);
        assert_eq!(attr(&block, "bar"), "[[\"bar\"], [\"baz\"]]");
    }

    #[test]
    fn test_record_literal_honours_tags() {
        let base = Record::new("Base").with_field(named("zone"), "a");
        let item = Record::new("Item")
            .with_field(tag("name,key"), "x")
            .with_field(tag(",squash"), base)
            .with_field(tag("note;omitempty"), "")
            .with_field(tag("hidden;omit"), "h")
            .with_field(tag("ref,expr"), "local.ref")
            .with_field(named("gone"), Value::Null);
        match encode(&Value::Seq(vec![Value::Record(item)]), &named("items"))
            .unwrap()
            .unwrap()
        {
            Node::Tokens(tokens) => assert_eq!(
                tokens.render(),
                "[{ \"name\" = \"x\", \"zone\" = \"a\", \"ref\" = local.ref }]"
            ),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_expr_applies_to_each_element() {
        let items = vec![Value::from("var.a"), Value::from("var.b")];
        match encode(&Value::Seq(items), &tag("deps,expr")).unwrap().unwrap() {
            Node::Tokens(tokens) => assert_eq!(tokens.render(), "[var.a, var.b]"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_absent_list_elements_are_null() {
        let items = vec![Value::from(1), Value::Null];
        match encode(&Value::Seq(items), &named("xs")).unwrap().unwrap() {
            Node::Tokens(tokens) => assert_eq!(tokens.render(), "[1, null]"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unnamed_attribute_rejected() {
        let record = Record::new("R").with_field(tag(",expr"), "a.b");
        let err = encode(&Value::Record(record), &named("r")).unwrap_err();
        assert!(matches!(err, Error::MalformedTag { ref reason, .. } if reason == UNNAMED_FIELD));
    }

    #[test]
    fn test_some_zero_survives_omitempty() {
        let mut record = Record::new("Scale");
        record.push_some(tag("replicas;omitempty"), Value::from(0u8));
        record.push_some(tag("enabled;omitempty"), Value::from(false));
        record.push(tag("weight;omitempty"), Value::from(0u8));
        let value = Value::Record(record);

        let block = block_of(encode(&value, &named("scale")).unwrap());
        assert_eq!(block.body.len(), 2);
        assert_eq!(attr(&block, "replicas"), "0");
        assert_eq!(attr(&block, "enabled"), "false");
        assert!(block.body.attribute("weight").is_none());

        match encode(&Value::Seq(vec![value]), &named("scales")).unwrap().unwrap() {
            Node::Tokens(tokens) => {
                assert_eq!(tokens.render(), "[{ \"replicas\" = 0, \"enabled\" = false }]")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_map_keys_must_be_identifiers() {
        for key in ["my key", "1abc", "a.b", ""] {
            let mut map = Map::new();
            map.insert(key.to_string(), Value::from(1));
            let err = encode_root(&Value::Map(map)).unwrap_err();
            assert_eq!(err, Error::invalid_identifier(key));
        }

        let mut inner = Map::new();
        inner.insert("bad name".to_string(), Value::from("x"));
        let err = encode(&Value::Seq(vec![Value::Map(inner)]), &tag("rule,blocks")).unwrap_err();
        assert_eq!(err, Error::invalid_identifier("bad name"));
    }

    #[test]
    fn test_renamed_block_must_be_identifier() {
        let record = Record::new("R").with_field(named("bad block"), Record::new("Inner"));
        let err = encode(&Value::Record(record), &named("r")).unwrap_err();
        assert_eq!(err, Error::invalid_identifier("bad block"));
    }

    #[test]
    fn test_object_literal_keys_need_not_be_identifiers() {
        let mut map = Map::new();
        map.insert("my key".to_string(), Value::from(1));
        match encode(&Value::Map(map), &named("tags")).unwrap().unwrap() {
            Node::Tokens(tokens) => assert_eq!(tokens.render(), "{ \"my key\" = 1 }"),
            other => panic!("unexpected {other:?}"),
        }

        let item = Record::new("Item").with_field(named("display name"), "x");
        match encode(&Value::Seq(vec![Value::Record(item)]), &named("items"))
            .unwrap()
            .unwrap()
        {
            Node::Tokens(tokens) => assert_eq!(tokens.render(), "[{ \"display name\" = \"x\" }]"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
