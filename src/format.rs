//! Text layout of encoded documents.
//!
//! The [`Formatter`] walks a [`Body`] and writes canonical HCL:
//!
//! - one item per line, nested bodies indented by [`HclOptions::indent`]
//! - `=` aligned across a run of consecutive attributes (optional)
//! - a blank line between a block and whatever sits next to it
//! - empty blocks written as `name {}`
//! - a trailing newline after the last item

use crate::node::{Attribute, Block, Body, Scalar, Structure};
use crate::HclOptions;

/// Writes bodies and blocks to a string buffer.
pub struct Formatter<'a> {
    output: String,
    options: &'a HclOptions,
    indent_level: usize,
}

impl<'a> Formatter<'a> {
    pub fn new(options: &'a HclOptions) -> Self {
        Formatter {
            output: String::with_capacity(256),
            options,
            indent_level: 0,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    fn write_indent(&mut self) {
        let width = self.indent_level * self.options.indent;
        self.output.extend(std::iter::repeat(' ').take(width));
    }

    /// Writes every item of `body` at the current indentation.
    pub fn write_body(&mut self, body: &Body) {
        let items = body.items();
        let mut i = 0;
        while i < items.len() {
            if i > 0 {
                // Anything adjacent to a block is set apart by a blank line.
                let prev_is_block = matches!(items[i - 1], Structure::Block(_));
                let this_is_block = matches!(items[i], Structure::Block(_));
                if prev_is_block || this_is_block {
                    self.output.push('\n');
                }
            }

            match &items[i] {
                Structure::Block(block) => {
                    self.write_block(block);
                    i += 1;
                }
                Structure::Attribute(_) => {
                    let run: Vec<&Attribute> = items[i..]
                        .iter()
                        .map_while(|item| match item {
                            Structure::Attribute(attr) => Some(attr),
                            Structure::Block(_) => None,
                        })
                        .collect();
                    i += run.len();
                    self.write_attributes(&run);
                }
            }
        }
    }

    fn write_attributes(&mut self, run: &[&Attribute]) {
        let width = if self.options.align_attributes {
            run.iter().map(|a| a.name.chars().count()).max().unwrap_or(0)
        } else {
            0
        };

        for attr in run {
            self.write_indent();
            self.output.push_str(&attr.name);
            let padding = width.saturating_sub(attr.name.chars().count());
            self.output.extend(std::iter::repeat(' ').take(padding));
            self.output.push_str(" = ");
            self.output.push_str(&attr.value.render());
            self.output.push('\n');
        }
    }

    fn write_block(&mut self, block: &Block) {
        self.write_indent();
        self.output.push_str(&block.ident);
        for label in &block.labels {
            self.output.push(' ');
            self.output.push_str(&Scalar::String(label.clone()).render());
        }

        if block.body.is_empty() {
            self.output.push_str(" {}\n");
            return;
        }

        self.output.push_str(" {\n");
        self.indent_level += 1;
        self.write_body(&block.body);
        self.indent_level -= 1;
        self.write_indent();
        self.output.push_str("}\n");
    }
}

/// Renders a body as a complete document.
#[must_use]
pub fn render(body: &Body, options: &HclOptions) -> String {
    let mut formatter = Formatter::new(options);
    formatter.write_body(body);
    formatter.into_inner()
}
