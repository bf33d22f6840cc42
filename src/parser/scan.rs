//! Scan predicates: pure, allocation-free questions about a position in
//! the source. Every block and inline rule consults these to decide
//! whether a candidate marker is syntactically valid.
//!
//! All Markdown markers are ASCII, so the predicates operate on raw bytes;
//! multi-byte UTF-8 sequences never contain ASCII bytes and fall through
//! as ordinary content.

/// Returns true iff the half-open range `[start, end)` contains any
/// character other than space, tab, `\n` or `\r`.
///
/// Used to suppress paragraphs for empty or whitespace-only spans.
pub(crate) fn has_content(source: &str, start: usize, end: usize) -> bool {
    source.as_bytes()[start..end]
        .iter()
        .any(|&byte| !matches!(byte, b' ' | b'\t' | b'\n' | b'\r'))
}

/// Returns true iff the span contains any character other than space or
/// tab. Unlike [`has_content`], line breaks count as text.
///
/// Used by the inline parser to avoid emitting text nodes for the bare
/// spacing runs left between two adjacent inline constructs.
pub(crate) fn has_text(source: &str, start: usize, end: usize) -> bool {
    source.as_bytes()[start..end]
        .iter()
        .any(|&byte| !matches!(byte, b' ' | b'\t'))
}

/// Returns true iff `pos` is effectively the first non-whitespace position
/// on its line: scanning backward toward `min_pos`, every character before
/// the first line feed is a space or tab.
///
/// `min_pos` bounds the scan so a marker at the very start of an inner
/// recursive window (a blockquote body, a list item line) still counts as
/// being at the start of a line, whatever its absolute column in the
/// original source.
pub(crate) fn is_start_of_line(source: &str, min_pos: usize, pos: usize) -> bool {
    let bytes = source.as_bytes();
    let mut cursor = pos;
    while cursor > min_pos {
        cursor -= 1;
        match bytes[cursor] {
            b' ' | b'\t' => {}
            b'\n' => return true,
            _ => return false,
        }
    }
    true
}
