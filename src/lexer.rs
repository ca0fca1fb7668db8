//! Expression lexer.
//!
//! Splits an HCL expression into [`Token`]s so raw expressions can be
//! validated and spliced into the output verbatim. Quoted template strings
//! are kept whole as a single token, interpolations and all; the lexer only
//! has to find where each string ends, which means walking nested `${ ... }`
//! and `%{ ... }` sequences to any depth.
//!
//! This is a well-formedness check, not a parser: it rejects unterminated
//! strings and interpolations, raw newlines inside quoted strings,
//! unbalanced brackets and characters that cannot start a token.
//!
//! ```rust
//! use serde_hcl_encoder::lexer::{lex, TokenKind};
//!
//! let tokens = lex("upper(var.name)").unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(kinds[0], TokenKind::Ident);
//! assert_eq!(tokens.render(), "upper(var.name)");
//!
//! assert!(lex("\"${unclosed\"").is_err());
//! ```

use crate::{Error, Result};

pub use crate::node::{Token, TokenKind, Tokens};

/// Lexes `src` as a single expression.
///
/// # Errors
///
/// Returns [`Error::MalformedExpression`] if the input is empty or not
/// well-formed.
pub fn lex(src: &str) -> Result<Tokens> {
    let mut lexer = Lexer::new(src);
    let tokens = lexer.run()?;
    if tokens.is_empty() {
        return Err(Error::malformed_expression(src, 0, "empty expression"));
    }
    Ok(tokens)
}

/// Returns `true` if `name` can be written bare as an attribute or block
/// name: a letter or `_`, then letters, digits, `_` or `-`.
///
/// ```rust
/// use serde_hcl_encoder::lexer::is_identifier;
///
/// assert!(is_identifier("aws_instance"));
/// assert!(is_identifier("x-forwarded"));
/// assert!(!is_identifier("my key"));
/// assert!(!is_identifier("1abc"));
/// ```
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().map_or(false, is_ident_start) && chars.all(is_ident_continue)
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    brackets: Vec<(char, usize)>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Lexer {
            src,
            pos: 0,
            brackets: Vec::new(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn error(&self, offset: usize, reason: &str) -> Error {
        Error::malformed_expression(self.src, offset, reason)
    }

    fn run(&mut self) -> Result<Tokens> {
        let mut tokens = Tokens::new();

        loop {
            let spaced = self.skip_whitespace();
            let start = self.pos;
            let Some(c) = self.peek() else { break };

            let kind = match c {
                '"' => {
                    self.bump();
                    self.scan_template()?;
                    TokenKind::QuotedTemplate
                }
                c if is_ident_start(c) => {
                    while self.peek().map_or(false, is_ident_continue) {
                        self.bump();
                    }
                    TokenKind::Ident
                }
                c if c.is_ascii_digit() => {
                    self.scan_number();
                    TokenKind::Number
                }
                '(' | '[' | '{' => {
                    self.bump();
                    self.brackets.push((c, start));
                    TokenKind::Open
                }
                ')' | ']' | '}' => {
                    self.bump();
                    self.close_bracket(c, start)?;
                    TokenKind::Close
                }
                ',' => {
                    self.bump();
                    TokenKind::Comma
                }
                _ => {
                    if !self.scan_operator() {
                        return Err(self.error(start, &format!("invalid character `{}`", c)));
                    }
                    TokenKind::Operator
                }
            };

            tokens.push(Token::new(kind, &self.src[start..self.pos], spaced));
        }

        if let Some(&(open, offset)) = self.brackets.last() {
            return Err(self.error(offset, &format!("unclosed `{}`", open)));
        }

        Ok(tokens)
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
        self.pos > start
    }

    fn close_bracket(&mut self, close: char, offset: usize) -> Result<()> {
        let expected = match self.brackets.pop() {
            Some(('(', _)) => ')',
            Some(('[', _)) => ']',
            Some(_) => '}',
            None => return Err(self.error(offset, &format!("unexpected `{}`", close))),
        };
        if expected != close {
            return Err(self.error(
                offset,
                &format!("expected `{}`, found `{}`", expected, close),
            ));
        }
        Ok(())
    }

    fn scan_number(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }
        let rest = self.rest();
        if rest.starts_with('.') && rest[1..].starts_with(|c: char| c.is_ascii_digit()) {
            self.bump();
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.bump();
            }
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let mark = self.pos;
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            if matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    self.bump();
                }
            } else {
                self.pos = mark;
            }
        }
    }

    fn scan_operator(&mut self) -> bool {
        const OPERATORS: [&str; 23] = [
            "...", "==", "!=", "<=", ">=", "&&", "||", "=>", "::", "+", "-", "*", "/", "%",
            "<", ">", "!", "?", ":", ".", "=", "~", "@",
        ];
        OPERATORS.iter().any(|op| self.eat(op))
    }

    /// Scans a quoted template after its opening quote, up to and including
    /// the closing quote.
    fn scan_template(&mut self) -> Result<()> {
        let open = self.pos - 1;
        loop {
            let at = self.pos;
            match self.bump() {
                None => return Err(self.error(open, "unterminated string")),
                Some('"') => return Ok(()),
                Some('\n') => return Err(self.error(at, "newline in quoted string")),
                Some('\\') => {
                    if self.bump().is_none() {
                        return Err(self.error(at, "unterminated escape sequence"));
                    }
                }
                Some(c @ ('$' | '%')) => {
                    let doubled = if c == '$' { "${" } else { "%{" };
                    if self.eat(doubled) {
                        // `$${` and `%%{` are literal text.
                        continue;
                    }
                    if self.eat("{") {
                        self.scan_interpolation(at)?;
                    }
                }
                Some(_) => {}
            }
        }
    }

    /// Scans an interpolation body after its `${`, up to and including the
    /// matching `}`.
    fn scan_interpolation(&mut self, open: usize) -> Result<()> {
        let mut depth = 0usize;
        loop {
            match self.bump() {
                None => return Err(self.error(open, "unterminated interpolation")),
                Some('"') => self.scan_template()?,
                Some('{') => depth += 1,
                Some('}') if depth == 0 => return Ok(()),
                Some('}') => depth -= 1,
                Some(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        lex(src).unwrap().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_reference_and_call() {
        assert_eq!(
            kinds("var.region"),
            vec![TokenKind::Ident, TokenKind::Operator, TokenKind::Ident]
        );
        assert_eq!(
            kinds("max(1, 2.5e3)"),
            vec![
                TokenKind::Ident,
                TokenKind::Open,
                TokenKind::Number,
                TokenKind::Comma,
                TokenKind::Number,
                TokenKind::Close,
            ]
        );
    }

    #[test]
    fn test_whitespace_collapses() {
        assert_eq!(lex("a   +\n b").unwrap().render(), "a + b");
        assert_eq!(lex("  f( x )").unwrap().render(), "f( x )");
    }

    #[test]
    fn test_template_is_one_token() {
        let tokens = lex(r#""hello ${upper("world")}!""#).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens.iter().next().unwrap().kind, TokenKind::QuotedTemplate);
    }

    #[test]
    fn test_template_escapes() {
        assert_eq!(lex(r#""a \" b""#).unwrap().len(), 1);
        assert_eq!(lex(r#""$${not} %%{this}""#).unwrap().len(), 1);
        assert_eq!(lex(r#""${ {a = "}"}.a }""#).unwrap().len(), 1);
    }

    #[test]
    fn test_hyphenated_identifier() {
        assert_eq!(
            kinds("aws_instance.web-1"),
            vec![TokenKind::Ident, TokenKind::Operator, TokenKind::Ident]
        );
    }

    #[test]
    fn test_identifier_names() {
        for name in ["a", "_", "web-1", "Base", "región", "x_9"] {
            assert!(is_identifier(name), "{name:?}");
        }
        for name in ["", "1abc", "-x", "my key", "a.b", "a\"b", "${x}"] {
            assert!(!is_identifier(name), "{name:?}");
        }
    }

    #[test]
    fn test_errors() {
        for src in [
            "",
            "   ",
            "\"open",
            "\"${x\"",
            "\"a\nb\"",
            "f(",
            "[1, 2)",
            ")",
            "a # b",
            "\"trailing\\",
        ] {
            let err = lex(src).unwrap_err();
            assert!(
                matches!(err, Error::MalformedExpression { .. }),
                "{src:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_error_offset() {
        match lex("f(a, b").unwrap_err() {
            Error::MalformedExpression { offset, reason, .. } => {
                assert_eq!(offset, 1);
                assert!(reason.contains("unclosed"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
