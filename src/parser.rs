//! Recursive Markdown parser.
//!
//! The parser operates over a caller-supplied half-open byte window of a
//! shared source string, never a copy, which lets blockquotes and list
//! items re-invoke it over narrower or reconstructed windows. There is no
//! tokenization stage: block recognition, paragraph boundary detection,
//! list indent tracking and inline emphasis disambiguation happen in one
//! pass over the character stream.
//!
//! Parsing is total. Malformed or incomplete constructs (unterminated
//! emphasis, an unclosed fence, a heading run deeper than six) degrade
//! into plain text or the most complete node obtainable; no input string
//! produces an error.

mod block;
mod config;
mod inline;
mod scan;

#[cfg(test)]
mod tests;

pub use config::ParserConfig;
pub use inline::{parse_inline, parse_inline_with_config};

use crate::ast::Document;
use crate::error::{MarkdownError, Result};

/// Parses the `[start, end)` window of `source` into a [`Document`].
///
/// Pass `0` and `source.len()` to parse the whole string. Characters
/// outside the window never affect the result.
///
/// # Panics
///
/// Panics if the range is out of bounds, inverted, or splits a UTF-8
/// character; passing such a range is a programming error, not input
/// malformation. Use [`try_parse`] for a checked variant.
pub fn parse(source: &str, start: usize, end: usize) -> Document {
    parse_with_config(source, start, end, &ParserConfig::default())
}

/// [`parse`] with an explicit parser configuration.
pub fn parse_with_config(
    source: &str,
    start: usize,
    end: usize,
    config: &ParserConfig,
) -> Document {
    assert!(
        range_is_valid(source, start, end),
        "invalid parse range [{start}, {end}) for source of length {}",
        source.len()
    );
    Document {
        body: block::parse_blocks(source, start, end, 0, config),
    }
}

/// Checked variant of [`parse`]: rejects an invalid range as an error
/// instead of panicking.
pub fn try_parse(source: &str, start: usize, end: usize) -> Result<Document> {
    try_parse_with_config(source, start, end, &ParserConfig::default())
}

/// [`try_parse`] with an explicit parser configuration.
pub fn try_parse_with_config(
    source: &str,
    start: usize,
    end: usize,
    config: &ParserConfig,
) -> Result<Document> {
    if !range_is_valid(source, start, end) {
        return Err(MarkdownError::InvalidRange {
            start,
            end,
            len: source.len(),
        });
    }
    Ok(Document {
        body: block::parse_blocks(source, start, end, 0, config),
    })
}

pub(crate) fn range_is_valid(source: &str, start: usize, end: usize) -> bool {
    start <= end
        && end <= source.len()
        && source.is_char_boundary(start)
        && source.is_char_boundary(end)
}
