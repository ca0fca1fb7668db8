//! Configuration options for HCL output.
//!
//! [`HclOptions`] only affects how an encoded document is laid out as text;
//! it never changes which attributes or blocks are produced.
//!
//! ## Examples
//!
//! ```rust
//! use serde_hcl_encoder::{to_string_with_options, HclOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Server { host: String, port: u16 }
//!
//! #[derive(Serialize)]
//! struct Config { server: Server }
//!
//! let config = Config {
//!     server: Server { host: "localhost".to_string(), port: 8080 },
//! };
//!
//! let options = HclOptions::new().with_indent(4).with_aligned_attributes(false);
//! let hcl = to_string_with_options(&config, options).unwrap();
//! assert_eq!(hcl, "server {\n    host = \"localhost\"\n    port = 8080\n}\n");
//! ```

/// Layout options for rendered HCL.
///
/// # Examples
///
/// ```rust
/// use serde_hcl_encoder::HclOptions;
///
/// let options = HclOptions::new();
/// assert_eq!(options.indent, 2);
/// assert!(options.align_attributes);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HclOptions {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Pad attribute names so that `=` signs line up within a run of
    /// consecutive attributes.
    pub align_attributes: bool,
}

impl Default for HclOptions {
    fn default() -> Self {
        HclOptions {
            indent: 2,
            align_attributes: true,
        }
    }
}

impl HclOptions {
    /// Creates default options (2-space indent, aligned attributes).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation size (number of spaces per level).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_hcl_encoder::HclOptions;
    ///
    /// let options = HclOptions::new().with_indent(4);
    /// assert_eq!(options.indent, 4);
    /// ```
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Enables or disables alignment of `=` across consecutive attributes.
    #[must_use]
    pub fn with_aligned_attributes(mut self, align: bool) -> Self {
        self.align_attributes = align;
        self
    }
}
