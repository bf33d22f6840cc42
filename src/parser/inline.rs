//! Inline parser: converts a sub-range of the source into a sequence of
//! span-level nodes.
//!
//! A single forward scan over `[start, end)` with `text_start` tracking
//! the beginning of the unflushed literal text span. When a marker fails
//! to find its closer before the end of the range, the cursor rewinds to
//! just past the opening run and the marker characters stay inside the
//! running text span. That rule makes the parser total: every input
//! produces a result, resolution is strictly left-to-right and greedy,
//! and once a marker commits its interior is never reinterpreted by an
//! outer one.

use super::config::ParserConfig;
use super::scan;
use crate::ast::Inline;

/// Parses the `[start, end)` window of `source` into inline nodes.
///
/// # Panics
///
/// Panics if the range is out of bounds, inverted, or splits a UTF-8
/// character; passing such a range is a programming error, not input
/// malformation.
pub fn parse_inline(source: &str, start: usize, end: usize) -> Vec<Inline> {
    parse_inline_with_config(source, start, end, &ParserConfig::default())
}

/// [`parse_inline`] with an explicit parser configuration.
pub fn parse_inline_with_config(
    source: &str,
    start: usize,
    end: usize,
    config: &ParserConfig,
) -> Vec<Inline> {
    assert!(
        super::range_is_valid(source, start, end),
        "invalid inline parse range [{start}, {end}) for source of length {}",
        source.len()
    );
    inline_nodes(source, start, end, 0, config)
}

/// Recursive worker shared with the block parser. `depth` counts nesting
/// levels already entered; at the configured limit the whole window
/// degrades to a single literal text node instead of recursing further.
pub(crate) fn inline_nodes(
    source: &str,
    start: usize,
    end: usize,
    depth: usize,
    config: &ParserConfig,
) -> Vec<Inline> {
    if depth >= config.max_nesting_depth {
        let mut nodes = Vec::new();
        flush_text(source, start, end, &mut nodes);
        return nodes;
    }

    let bytes = source.as_bytes();
    let mut nodes = Vec::new();
    let mut text_start = start;
    let mut pos = start;

    while pos < end {
        match bytes[pos] {
            b'*' => {
                let run = marker_run(bytes, pos, end);
                // Three or more asterisks open a bold-italic with a
                // three-character marker; surplus asterisks belong to the
                // interior.
                let marker_len = run.min(3);
                let interior_start = pos + marker_len;
                match find_emphasis_close(bytes, interior_start, end, marker_len) {
                    Some(close) => {
                        flush_text(source, text_start, pos, &mut nodes);
                        let children = inline_nodes(source, interior_start, close, depth + 1, config);
                        nodes.push(match marker_len {
                            3 => Inline::BoldItalic { children },
                            2 => Inline::Bold { children },
                            _ => Inline::Italic { children },
                        });
                        pos = close + marker_len;
                        text_start = pos;
                    }
                    // Unterminated: rewind to just after the opening run,
                    // leaving the asterisks inside the open text span.
                    None => pos = interior_start,
                }
            }
            b'`' => match find_byte(bytes, pos + 1, end, b'`') {
                Some(close) => {
                    flush_text(source, text_start, pos, &mut nodes);
                    nodes.push(Inline::InlineCode(source[pos + 1..close].to_string()));
                    pos = close + 1;
                    text_start = pos;
                }
                None => pos += 1,
            },
            b'!' if pos + 1 < end && bytes[pos + 1] == b'[' => {
                match scan_bracket_pair(bytes, pos + 1, end) {
                    Some(spans) => {
                        flush_text(source, text_start, pos, &mut nodes);
                        nodes.push(Inline::Image {
                            alt_text: source[spans.label_start..spans.label_end].to_string(),
                            url: source[spans.url_start..spans.url_end].to_string(),
                        });
                        pos = spans.next;
                        text_start = pos;
                    }
                    None => pos += 1,
                }
            }
            b'[' => match scan_bracket_pair(bytes, pos, end) {
                Some(spans) => {
                    flush_text(source, text_start, pos, &mut nodes);
                    let children =
                        inline_nodes(source, spans.label_start, spans.label_end, depth + 1, config);
                    nodes.push(Inline::Link {
                        children,
                        url: source[spans.url_start..spans.url_end].to_string(),
                    });
                    pos = spans.next;
                    text_start = pos;
                }
                None => pos += 1,
            },
            _ => pos += 1,
        }
    }

    flush_text(source, text_start, end, &mut nodes);
    nodes
}

/// Emits the pending literal span, unless it is empty or consists purely
/// of spaces and tabs (the spacing runs between adjacent inline nodes).
fn flush_text(source: &str, start: usize, end: usize, nodes: &mut Vec<Inline>) {
    if start < end && scan::has_text(source, start, end) {
        nodes.push(Inline::Text(source[start..end].to_string()));
    }
}

/// Length of the run of `*` starting at `pos`, bounded by `end`.
fn marker_run(bytes: &[u8], pos: usize, end: usize) -> usize {
    let mut cursor = pos;
    while cursor < end && bytes[cursor] == b'*' {
        cursor += 1;
    }
    cursor - pos
}

/// Finds the closing run for an emphasis marker: the next maximal run of
/// asterisks whose length is exactly `want` (so a `***` closer is not
/// immediately followed by a fourth asterisk). Runs of other lengths are
/// skipped whole.
fn find_emphasis_close(bytes: &[u8], from: usize, end: usize, want: usize) -> Option<usize> {
    let mut cursor = from;
    while cursor < end {
        if bytes[cursor] == b'*' {
            let run = marker_run(bytes, cursor, end);
            if run == want {
                return Some(cursor);
            }
            cursor += run;
        } else {
            cursor += 1;
        }
    }
    None
}

fn find_byte(bytes: &[u8], from: usize, end: usize, target: u8) -> Option<usize> {
    (from..end).find(|&idx| bytes[idx] == target)
}

/// Byte spans of a recognized `[label](url)` pair. `next` is the position
/// just past the closing parenthesis.
struct BracketSpans {
    label_start: usize,
    label_end: usize,
    url_start: usize,
    url_end: usize,
    next: usize,
}

/// Scans a `[label](url)` construct with `open` at the `[`. The `(` must
/// immediately follow the `]`; any missing piece rejects the construct so
/// the bracket falls back to literal text.
fn scan_bracket_pair(bytes: &[u8], open: usize, end: usize) -> Option<BracketSpans> {
    let label_end = find_byte(bytes, open + 1, end, b']')?;
    if label_end + 1 >= end || bytes[label_end + 1] != b'(' {
        return None;
    }
    let url_end = find_byte(bytes, label_end + 2, end, b')')?;
    Some(BracketSpans {
        label_start: open + 1,
        label_end,
        url_start: label_end + 2,
        url_end,
        next: url_end + 1,
    })
}
