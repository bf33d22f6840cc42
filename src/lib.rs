//! # inkdown
//!
//! A Markdown engine built around a recursive, range-based parser: raw
//! text goes in, a block/inline AST comes out, and a tree-walking
//! generator turns the AST into HTML with caller-configured CSS classes.
//!
//! The pipeline has three stages:
//! 1. **Parsing:** [`parse`] scans a half-open window of the source in a
//!    single pass, recursing only at block and inline nesting boundaries
//!    (blockquote bodies, list items, nested emphasis).
//! 2. **AST:** [`Document`] holds the resulting tree of [`Block`] and
//!    [`Inline`] nodes.
//! 3. **Generation:** [`HtmlGenerator`] walks the tree with a
//!    [`CssClasses`] configuration and an optional code highlighter.
//!
//! Parsing is total: malformed constructs degrade to plain text and no
//! input string produces an error. Generated text is not HTML-escaped;
//! sanitize untrusted input before converting it.
//!
//! ## Usage
//!
//! ```
//! use inkdown::{to_html, CssClasses};
//!
//! let html = to_html("# Hello, **world**!", &CssClasses::default());
//! assert_eq!(
//!     html,
//!     "<h1 class=\"\">Hello, <strong class=\"\">world</strong>!</h1>",
//! );
//! ```
//!
//! For direct access to the tree, or to parse a sub-range of a larger
//! buffer, call the parser entry points:
//!
//! ```
//! use inkdown::{parse, Block};
//!
//! let source = "abc\n\n### g\n\nabc";
//! let document = parse(source, 3, 10);
//! assert!(matches!(document.body[0], Block::Heading { level: 3, .. }));
//! ```

pub mod ast;
pub mod codegen;
pub mod config;
pub mod error;
pub mod parser;

pub use ast::{Block, Document, Inline, ListItem, OrderedListItem};
pub use codegen::{generate_html, CssClasses, HtmlGenerator};
pub use config::{EngineConfig, EngineConfigBuilder, MarkdownEngine};
pub use error::{MarkdownError, Result};
pub use parser::{
    parse, parse_inline, parse_inline_with_config, parse_with_config, try_parse,
    try_parse_with_config, ParserConfig,
};

/// Converts a full Markdown string to HTML with the supplied CSS classes.
///
/// Equivalent to parsing the whole string and generating without a code
/// highlighter; use [`MarkdownEngine`] for configured pipelines.
pub fn to_html(source: &str, classes: &CssClasses) -> String {
    let document = parser::parse(source, 0, source.len());
    codegen::generate_html(&document.body, classes)
}
