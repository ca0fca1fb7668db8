//! String escaping for HCL quoted templates.
//!
//! [`escape`] escapes control characters, quotes and backslashes while leaving
//! interpolation sequences (`${ ... }`) intact, so a string that already holds
//! template syntax stays a working template once it is wrapped in quotes.
//!
//! The scanner is a small stack machine:
//!
//! - **plain**: outside any interpolation. Every character is escaped. A `$`
//!   directly followed by `{` (and not itself preceded by `$`, since `$${` is
//!   the literal escape) opens an interpolation. Directives are not kept:
//!   `%{` is written `%%{` so it reads back as literal text.
//! - **interpolation**: inside `${ ... }`. Characters pass through verbatim.
//!   `"` opens a nested quoted literal and the matching `}` closes the
//!   interpolation. Braces of object literals inside the interpolation are
//!   counted so they do not close it early.
//! - **quoted**: a string literal nested in an interpolation. Control and
//!   non-printable characters are escaped as in plain text; `\` and `"` are
//!   the literal's own syntax and pass through, with a pending-backslash flag
//!   so that `\"` does not end the literal. A nested `${` opens another
//!   interpolation.
//!
//! [`escape_literal`] is the template-free variant used for block labels and
//! object keys: it escapes every character and neutralises `${` and `%{`.
//!
//! ## Examples
//!
//! ```rust
//! use serde_hcl_encoder::escape::escape;
//!
//! assert_eq!(escape("line\nbreak"), "line\\nbreak");
//! assert_eq!(escape("${var.name}"), "${var.name}");
//! assert_eq!(escape("\"${\"test\"}\""), "\\\"${\"test\"}\\\"");
//! ```

use std::fmt::Write;
use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Plain,
    Interpolation { depth: usize },
    Quoted { backslash: bool },
}

/// Escapes `input` for use between the quotes of an HCL template string.
///
/// Interpolation bodies are copied unchanged; see the module docs for the
/// exact rules. Never fails.
#[must_use]
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 2);
    let mut stack = vec![State::Plain];
    let mut chars = input.chars().peekable();
    let mut prev: Option<char> = None;

    while let Some(c) = chars.next() {
        let top = stack.len() - 1;
        match stack[top] {
            State::Plain => {
                if opens_interpolation(c, prev, &mut chars) {
                    stack.push(State::Interpolation { depth: 0 });
                    out.push_str("${");
                    chars.next();
                    prev = Some('{');
                    continue;
                }
                if c == '%' && chars.peek() == Some(&'{') {
                    out.push('%');
                }
                push_escaped(&mut out, c, true);
            }
            State::Interpolation { depth } => {
                match c {
                    '"' => stack.push(State::Quoted { backslash: false }),
                    '{' => stack[top] = State::Interpolation { depth: depth + 1 },
                    '}' if depth == 0 => {
                        stack.pop();
                    }
                    '}' => stack[top] = State::Interpolation { depth: depth - 1 },
                    _ => {}
                }
                out.push(c);
            }
            State::Quoted { backslash } => {
                if !backslash && opens_interpolation(c, prev, &mut chars) {
                    stack[top] = State::Quoted { backslash: false };
                    stack.push(State::Interpolation { depth: 0 });
                    out.push_str("${");
                    chars.next();
                    prev = Some('{');
                    continue;
                }
                match c {
                    '\\' => {
                        stack[top] = State::Quoted {
                            backslash: !backslash,
                        };
                        out.push(c);
                    }
                    '"' if !backslash => {
                        stack.pop();
                        out.push(c);
                    }
                    _ => {
                        stack[top] = State::Quoted { backslash: false };
                        push_escaped(&mut out, c, false);
                    }
                }
            }
        }
        prev = Some(c);
    }

    out
}

/// Escapes `input` as a plain string literal with no template sequences.
///
/// Used for block labels and object keys, which HCL treats as literal text.
///
/// # Examples
///
/// ```rust
/// use serde_hcl_encoder::escape::escape_literal;
///
/// assert_eq!(escape_literal("say \"hi\""), "say \\\"hi\\\"");
/// assert_eq!(escape_literal("${nope}"), "$${nope}");
/// ```
#[must_use]
pub fn escape_literal(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 2);
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if (c == '$' || c == '%') && chars.peek() == Some(&'{') {
            out.push(c);
        }
        push_escaped(&mut out, c, true);
    }

    out
}

fn opens_interpolation(c: char, prev: Option<char>, rest: &mut Peekable<Chars<'_>>) -> bool {
    c == '$' && prev != Some('$') && rest.peek() == Some(&'{')
}

fn push_escaped(out: &mut String, c: char, escape_syntax: bool) {
    match c {
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '"' if escape_syntax => out.push_str("\\\""),
        '\\' if escape_syntax => out.push_str("\\\\"),
        c if !is_printable(c) => {
            let code = u32::from(c);
            // Writing into a String cannot fail.
            let _ = if code <= 0xFFFF {
                write!(out, "\\u{:04x}", code)
            } else {
                write!(out, "\\U{:08x}", code)
            };
        }
        c => out.push(c),
    }
}

/// Printable means graphic text or an ASCII space.
///
/// Control characters, whitespace other than U+0020, private-use code points
/// and the common invisible format characters are treated as non-printable.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    !matches!(
        c,
        '\u{00AD}'
            | '\u{061C}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
            | '\u{E000}'..='\u{F8FF}'
            | '\u{E0001}'
            | '\u{E0020}'..='\u{E007F}'
            | '\u{F0000}'..='\u{10FFFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_table() {
        assert_eq!(escape("\n"), "\\n");
        assert_eq!(escape("\t"), "\\t");
        assert_eq!(escape("\r"), "\\r");
        assert_eq!(escape("\""), "\\\"");
        assert_eq!(escape("\\"), "\\\\");
        assert_eq!(escape("${\"test\"}"), "${\"test\"}");
        assert_eq!(escape("\"${\"test\"}\""), "\\\"${\"test\"}\\\"");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(escape("hello world"), "hello world");
        assert_eq!(escape("Ol' McDonald's Farm"), "Ol' McDonald's Farm");
        assert_eq!(escape("héllo 👋"), "héllo 👋");
        assert_eq!(escape(""), "");
    }

    #[test]
    fn test_non_printable() {
        assert_eq!(escape("\u{0001}"), "\\u0001");
        assert_eq!(escape("a\u{200B}b"), "a\\u200bb");
        assert_eq!(escape("\u{00A0}"), "\\u00a0");
        assert_eq!(escape("\u{E0001}"), "\\U000e0001");
    }

    #[test]
    fn test_interpolation_body_untouched() {
        assert_eq!(escape("${var.a}\n"), "${var.a}\\n");
        assert_eq!(escape("x ${a \\ b} \"y\""), "x ${a \\ b} \\\"y\\\"");
        assert_eq!(escape("${ {a = 1}.a } \""), "${ {a = 1}.a } \\\"");
    }

    #[test]
    fn test_literal_dollar_escape_not_interpolation() {
        assert_eq!(escape("$${x} \""), "$${x} \\\"");
        assert_eq!(escape("$ {x}\""), "$ {x}\\\"");
        assert_eq!(escape("cost: $5"), "cost: $5");
    }

    #[test]
    fn test_percent_brace_is_literal_text() {
        assert_eq!(escape("50%{"), "50%%{");
        assert_eq!(escape("%{x}"), "%%{x}");
        assert_eq!(escape("%{ if a }b%{ endif }"), "%%{ if a }b%%{ endif }");
        assert_eq!(escape("100% done"), "100% done");
        // Text inside an interpolation is copied as written.
        assert_eq!(escape("${\"%{\"}"), "${\"%{\"}");
    }

    #[test]
    fn test_quoted_inside_interpolation() {
        // An escaped quote does not close the nested literal.
        assert_eq!(
            escape("${f(\"a\\\"b\")}\""),
            "${f(\"a\\\"b\")}\\\""
        );
        // Escape sequences like \n inside the literal keep their backslash.
        assert_eq!(escape("${f(\"a\\nb\")}\""), "${f(\"a\\nb\")}\\\"");
        // Raw control characters inside the literal are escaped.
        assert_eq!(escape("${f(\"a\nb\")}"), "${f(\"a\\nb\")}");
    }

    #[test]
    fn test_nested_interpolation_in_quoted() {
        let input = "${f(\"x${g(\"y\")}z\")} \"";
        assert_eq!(escape(input), "${f(\"x${g(\"y\")}z\")} \\\"");
    }

    #[test]
    fn test_unbalanced_input_is_total() {
        assert_eq!(escape("${oops"), "${oops");
        assert_eq!(escape("${\"open"), "${\"open");
        assert_eq!(escape("}\""), "}\\\"");
    }

    #[test]
    fn test_escape_literal() {
        assert_eq!(escape_literal("cow"), "cow");
        assert_eq!(escape_literal("a\nb"), "a\\nb");
        assert_eq!(escape_literal("%{if}"), "%%{if}");
        assert_eq!(escape_literal("$${x}"), "$$${x}");
    }
}
