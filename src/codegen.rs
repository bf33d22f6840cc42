//! HTML generation from the parsed tree.
//!
//! The generator walks the AST and serializes each node to its fixed HTML
//! tag, injecting a `class` attribute per element from a [`CssClasses`]
//! configuration. Missing class entries degrade to an empty attribute
//! rather than failing, and generation has no other error cases: any tree
//! the parser produces renders to a string.
//!
//! Text content passes through unescaped. Callers rendering untrusted
//! input must sanitize it before parsing.

use crate::ast::{Block, Inline, ListItem, OrderedListItem};
use serde::{Deserialize, Serialize};

/// CSS class names injected into generated elements, one optional entry
/// per node kind. Loadable from JSON, where the keys are camel-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CssClasses {
    pub paragraph: Option<String>,
    pub heading: Option<String>,
    /// Class of the `<pre>` wrapping a fenced code block.
    pub fenced_code_block_pre: Option<String>,
    /// Class of the `<code>` inside a fenced code block.
    pub fenced_code_block_code: Option<String>,
    pub block_quote: Option<String>,
    pub unordered_list: Option<String>,
    pub ordered_list: Option<String>,
    pub list_item: Option<String>,
    pub bold: Option<String>,
    pub italic: Option<String>,
    /// Class of `<code>` spans from `` `inline code` ``.
    pub inline_code: Option<String>,
    pub link: Option<String>,
    pub image: Option<String>,
}

/// Walks the AST body and produces an HTML string.
///
/// An optional highlighter receives each fenced code block's raw source
/// and language tag and must return finished HTML for the `<code>`
/// interior; without one the raw source is emitted as-is.
pub struct HtmlGenerator {
    classes: CssClasses,
    highlighter: Option<Box<dyn Fn(&str, &str) -> String>>,
}

impl HtmlGenerator {
    pub fn new(classes: CssClasses) -> Self {
        Self {
            classes,
            highlighter: None,
        }
    }

    /// Installs a code highlighting function for fenced code blocks.
    pub fn with_highlighter(mut self, highlighter: impl Fn(&str, &str) -> String + 'static) -> Self {
        self.highlighter = Some(Box::new(highlighter));
        self
    }

    pub fn generate(&self, body: &[Block]) -> String {
        let mut out = String::new();
        self.write_blocks(body, &mut out);
        out
    }

    fn write_blocks(&self, blocks: &[Block], out: &mut String) {
        for block in blocks {
            match block {
                Block::Paragraph { children } => {
                    open_tag(out, "p", &self.classes.paragraph);
                    self.write_inlines(children, out);
                    out.push_str("</p>");
                }
                Block::Heading { level, children } => {
                    let tag = heading_tag(*level);
                    open_tag(out, tag, &self.classes.heading);
                    self.write_inlines(children, out);
                    out.push_str("</");
                    out.push_str(tag);
                    out.push('>');
                }
                Block::FencedCodeBlock { language, source } => {
                    open_tag(out, "pre", &self.classes.fenced_code_block_pre);
                    open_tag(out, "code", &self.classes.fenced_code_block_code);
                    match &self.highlighter {
                        Some(highlight) => out.push_str(&highlight(source, language)),
                        None => out.push_str(source),
                    }
                    out.push_str("</code></pre>");
                }
                Block::List { items } => {
                    open_tag(out, "ul", &self.classes.unordered_list);
                    for item in items {
                        self.write_list_item(item, out);
                    }
                    out.push_str("</ul>");
                }
                Block::OrderedList {
                    start_number,
                    items,
                } => {
                    out.push_str("<ol class=\"");
                    push_class(out, &self.classes.ordered_list);
                    out.push_str("\" start=\"");
                    out.push_str(start_number);
                    out.push_str("\">");
                    for item in items {
                        self.write_ordered_item(item, out);
                    }
                    out.push_str("</ol>");
                }
                Block::BlockQuote { children } => {
                    open_tag(out, "blockquote", &self.classes.block_quote);
                    self.write_blocks(children, out);
                    out.push_str("</blockquote>");
                }
            }
        }
    }

    fn write_list_item(&self, item: &ListItem, out: &mut String) {
        open_tag(out, "li", &self.classes.list_item);
        self.write_blocks(&item.children, out);
        if !item.items.is_empty() {
            open_tag(out, "ul", &self.classes.unordered_list);
            for nested in &item.items {
                self.write_list_item(nested, out);
            }
            out.push_str("</ul>");
        }
        out.push_str("</li>");
    }

    fn write_ordered_item(&self, item: &OrderedListItem, out: &mut String) {
        open_tag(out, "li", &self.classes.list_item);
        self.write_blocks(&item.children, out);
        out.push_str("</li>");
    }

    fn write_inlines(&self, nodes: &[Inline], out: &mut String) {
        for node in nodes {
            match node {
                Inline::Text(value) => out.push_str(value),
                Inline::Bold { children } => {
                    open_tag(out, "strong", &self.classes.bold);
                    self.write_inlines(children, out);
                    out.push_str("</strong>");
                }
                Inline::Italic { children } => {
                    open_tag(out, "em", &self.classes.italic);
                    self.write_inlines(children, out);
                    out.push_str("</em>");
                }
                // Bold-italic renders as an italic wrapper around a strong
                // element, each carrying its own configured class.
                Inline::BoldItalic { children } => {
                    open_tag(out, "em", &self.classes.italic);
                    open_tag(out, "strong", &self.classes.bold);
                    self.write_inlines(children, out);
                    out.push_str("</strong></em>");
                }
                Inline::InlineCode(value) => {
                    open_tag(out, "code", &self.classes.inline_code);
                    out.push_str(value);
                    out.push_str("</code>");
                }
                Inline::Link { children, url } => {
                    out.push_str("<a class=\"");
                    push_class(out, &self.classes.link);
                    out.push_str("\" href=\"");
                    out.push_str(url);
                    out.push_str("\">");
                    self.write_inlines(children, out);
                    out.push_str("</a>");
                }
                Inline::Image { alt_text, url } => {
                    out.push_str("<img class=\"");
                    push_class(out, &self.classes.image);
                    out.push_str("\" src=\"");
                    out.push_str(url);
                    out.push_str("\" alt=\"");
                    out.push_str(alt_text);
                    out.push_str("\"/>");
                }
            }
        }
    }
}

/// Convenience wrapper for one-shot generation without a highlighter.
pub fn generate_html(body: &[Block], classes: &CssClasses) -> String {
    HtmlGenerator::new(classes.clone()).generate(body)
}

fn open_tag(out: &mut String, tag: &str, class: &Option<String>) {
    out.push('<');
    out.push_str(tag);
    out.push_str(" class=\"");
    push_class(out, class);
    out.push_str("\">");
}

fn push_class(out: &mut String, class: &Option<String>) {
    if let Some(name) = class {
        out.push_str(name);
    }
}

fn heading_tag(level: u8) -> &'static str {
    match level {
        1 => "h1",
        2 => "h2",
        3 => "h3",
        4 => "h4",
        5 => "h5",
        _ => "h6",
    }
}
