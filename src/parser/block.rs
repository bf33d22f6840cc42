//! Block parser: a single forward scan over a half-open window of the
//! source, dispatching on the current byte.
//!
//! `pos` is the cursor; `paragraph_start` marks the start of the current
//! unflushed paragraph candidate. Block markers are recognized only where
//! [`scan::is_start_of_line`] holds relative to the window start, so a
//! marker appearing mid-paragraph stays ordinary text. Markers that fail
//! their full-match condition (a seven-`#` heading, a digit run without
//! `. `) are absorbed into the surrounding paragraph rather than raising
//! an error.
//!
//! Blockquotes and list items re-invoke this parser recursively: list
//! items over a narrowed window of the same source, blockquotes over a
//! freshly accumulated string with the quote markers stripped.

use super::config::ParserConfig;
use super::inline::inline_nodes;
use super::scan;
use crate::ast::{Block, Inline, ListItem, OrderedListItem};

const MAX_HEADING_LEVEL: usize = 6;

pub(crate) fn parse_blocks(
    source: &str,
    range_start: usize,
    range_end: usize,
    depth: usize,
    config: &ParserConfig,
) -> Vec<Block> {
    let mut body = Vec::new();

    // At the nesting limit the window degrades to raw paragraph text.
    if depth >= config.max_nesting_depth {
        if scan::has_content(source, range_start, range_end) {
            body.push(Block::Paragraph {
                children: vec![Inline::Text(source[range_start..range_end].to_string())],
            });
        }
        return body;
    }

    let bytes = source.as_bytes();
    let mut pos = range_start;
    let mut paragraph_start = range_start;

    while pos < range_end {
        match bytes[pos] {
            b'\n' | b'\r' => {
                let boundary = pos;
                let mut breaks = 0usize;
                while pos < range_end && matches!(bytes[pos], b'\n' | b'\r' | b' ' | b'\t') {
                    // A \r\n pair counts as one break; a lone \r counts
                    // on its own. The lookahead stays inside the window.
                    let crlf = bytes[pos] == b'\r'
                        && pos + 1 < range_end
                        && bytes[pos + 1] == b'\n';
                    if bytes[pos] == b'\n' || (bytes[pos] == b'\r' && !crlf) {
                        breaks += 1;
                    }
                    pos += 1;
                }
                // Two or more line breaks form a true blank line and end
                // the paragraph; a single break is a soft break. A run
                // that reaches the end of the window also flushes, so the
                // final paragraph stops at the break instead of carrying
                // the terminator. A soft break with nothing but whitespace
                // pending still restarts the window, so a paragraph never
                // opens with the terminator of the block that preceded it.
                if breaks >= 2 || pos >= range_end {
                    flush_paragraph(source, paragraph_start, boundary, depth, config, &mut body);
                    paragraph_start = pos;
                } else if !scan::has_content(source, paragraph_start, boundary) {
                    paragraph_start = pos;
                }
            }
            b'#' if scan::is_start_of_line(source, range_start, pos) => {
                let mut cursor = pos;
                while cursor < range_end && bytes[cursor] == b'#' {
                    cursor += 1;
                }
                let level = cursor - pos;
                if level <= MAX_HEADING_LEVEL && cursor < range_end && bytes[cursor] == b' ' {
                    flush_paragraph(source, paragraph_start, pos, depth, config, &mut body);
                    let text_start = cursor + 1;
                    let text_end = line_end(bytes, text_start, range_end);
                    body.push(Block::Heading {
                        level: level as u8,
                        children: inline_nodes(source, text_start, text_end, depth, config),
                    });
                    pos = skip_line_terminator(bytes, text_end, range_end);
                    paragraph_start = pos;
                } else {
                    // Too deep or no following space: the run joins the
                    // surrounding paragraph text.
                    pos = cursor;
                }
            }
            b'`' if pos + 3 <= range_end
                && &bytes[pos..pos + 3] == b"```"
                && scan::is_start_of_line(source, range_start, pos) =>
            {
                flush_paragraph(source, paragraph_start, pos, depth, config, &mut body);
                pos = fenced_code_block(source, pos, range_end, &mut body);
                paragraph_start = pos;
            }
            b'-' | b'*' | b'+'
                if pos + 1 < range_end
                    && bytes[pos + 1] == b' '
                    && scan::is_start_of_line(source, range_start, pos) =>
            {
                flush_paragraph(source, paragraph_start, pos, depth, config, &mut body);
                pos = bullet_list(source, pos, range_end, depth, config, &mut body);
                paragraph_start = pos;
            }
            b'0'..=b'9'
                if scan::is_start_of_line(source, range_start, pos)
                    && ordered_marker(bytes, pos, range_end).is_some() =>
            {
                flush_paragraph(source, paragraph_start, pos, depth, config, &mut body);
                pos = ordered_list(source, pos, range_end, depth, config, &mut body);
                paragraph_start = pos;
            }
            b'>' if scan::is_start_of_line(source, range_start, pos) => {
                flush_paragraph(source, paragraph_start, pos, depth, config, &mut body);
                pos = block_quote(source, pos, range_end, depth, config, &mut body);
                paragraph_start = pos;
            }
            _ => pos += 1,
        }
    }

    flush_paragraph(source, paragraph_start, range_end, depth, config, &mut body);
    body
}

/// Flushes the pending paragraph span, suppressing whitespace-only spans.
fn flush_paragraph(
    source: &str,
    start: usize,
    end: usize,
    depth: usize,
    config: &ParserConfig,
    body: &mut Vec<Block>,
) {
    if start < end && scan::has_content(source, start, end) {
        body.push(Block::Paragraph {
            children: inline_nodes(source, start, end, depth, config),
        });
    }
}

/// Position of the next `\n` or `\r` in `[from, end)`, or `end`.
fn line_end(bytes: &[u8], from: usize, end: usize) -> usize {
    let mut cursor = from;
    while cursor < end && !matches!(bytes[cursor], b'\n' | b'\r') {
        cursor += 1;
    }
    cursor
}

/// Steps over a single `\r\n`, `\r` or `\n` terminator at `pos`, bounded
/// by `end`.
fn skip_line_terminator(bytes: &[u8], pos: usize, end: usize) -> usize {
    let mut cursor = pos;
    if cursor < end && bytes[cursor] == b'\r' {
        cursor += 1;
    }
    if cursor < end && bytes[cursor] == b'\n' {
        cursor += 1;
    }
    cursor
}

/// Parses a fenced code block with the opening fence at `pos`. Returns the
/// position just past the block. A missing closing fence is tolerated: the
/// block consumes the rest of the range.
fn fenced_code_block(source: &str, pos: usize, range_end: usize, body: &mut Vec<Block>) -> usize {
    let bytes = source.as_bytes();

    // Optional language tag: the run of non-whitespace after the fence.
    let lang_start = pos + 3;
    let mut cursor = lang_start;
    while cursor < range_end && !matches!(bytes[cursor], b' ' | b'\t' | b'\n' | b'\r') {
        cursor += 1;
    }
    let language = source[lang_start..cursor].to_string();

    let content_start = skip_line_terminator(bytes, line_end(bytes, cursor, range_end), range_end);

    // Closing fence: the next ``` sitting at the start of a line.
    let mut search = content_start;
    let mut close = None;
    while search + 3 <= range_end {
        if &bytes[search..search + 3] == b"```"
            && scan::is_start_of_line(source, content_start, search)
        {
            close = Some(search);
            break;
        }
        search += 1;
    }

    match close {
        Some(fence) => {
            // Trim the fence line's leading whitespace and the terminator
            // that precedes it; everything else is verbatim.
            let mut content_end = fence;
            while content_end > content_start && matches!(bytes[content_end - 1], b' ' | b'\t') {
                content_end -= 1;
            }
            if content_end > content_start && bytes[content_end - 1] == b'\n' {
                content_end -= 1;
            }
            if content_end > content_start && bytes[content_end - 1] == b'\r' {
                content_end -= 1;
            }
            body.push(Block::FencedCodeBlock {
                language,
                source: source[content_start..content_end].to_string(),
            });
            skip_line_terminator(bytes, line_end(bytes, fence + 3, range_end), range_end)
        }
        None => {
            body.push(Block::FencedCodeBlock {
                language,
                source: source[content_start..range_end].to_string(),
            });
            range_end
        }
    }
}

/// Parses a bullet list with the first marker at `pos`, using an explicit
/// indent stack. Returns the position just past the list.
///
/// Nesting depth is purely a function of relative indent deltas between
/// consecutive item lines (space = 1 unit, tab = 2): a delta greater than
/// one opens a level, otherwise every level more indented than the new
/// line is closed. Frames collect their items locally and attach them to
/// the parent's last item when popped.
fn bullet_list(
    source: &str,
    pos: usize,
    range_end: usize,
    depth: usize,
    config: &ParserConfig,
    body: &mut Vec<Block>,
) -> usize {
    let bytes = source.as_bytes();
    let mut stack: Vec<(usize, Vec<ListItem>)> = vec![(0, Vec::new())];
    let mut pos = pos;

    loop {
        // One item: the line content after the bullet and its space.
        let content_start = pos + 2;
        let content_end = line_end(bytes, content_start, range_end);
        let children = parse_blocks(source, content_start, content_end, depth + 1, config);
        stack
            .last_mut()
            .expect("indent stack is never empty")
            .1
            .push(ListItem {
                children,
                items: Vec::new(),
            });

        pos = skip_line_terminator(bytes, content_end, range_end);
        if pos >= range_end {
            break;
        }

        // Measure the next line's indent.
        let mut indent = 0usize;
        let mut cursor = pos;
        while cursor < range_end {
            match bytes[cursor] {
                b' ' => indent += 1,
                b'\t' => indent += 2,
                _ => break,
            }
            cursor += 1;
        }

        let continues = cursor + 1 < range_end
            && matches!(bytes[cursor], b'-' | b'*' | b'+')
            && bytes[cursor + 1] == b' ';
        if !continues {
            break;
        }
        pos = cursor;

        let top_indent = stack.last().expect("indent stack is never empty").0;
        if indent > top_indent + 1 {
            stack.push((indent, Vec::new()));
        } else {
            while stack.len() > 1 && stack.last().expect("stack has a frame").0 > indent {
                attach_top_frame(&mut stack);
            }
        }
    }

    while stack.len() > 1 {
        attach_top_frame(&mut stack);
    }
    let (_, items) = stack.pop().expect("indent stack is never empty");
    body.push(Block::List { items });
    pos
}

/// Pops the top indent frame and attaches its items as the nested list of
/// the parent frame's last item (the item that was current when the frame
/// was opened).
fn attach_top_frame(stack: &mut Vec<(usize, Vec<ListItem>)>) {
    let (_, items) = stack.pop().expect("caller checked stack depth");
    if let Some(parent_item) = stack
        .last_mut()
        .expect("caller checked stack depth")
        .1
        .last_mut()
    {
        parent_item.items = items;
    }
}

/// Recognizes an ordered-list marker (digit run, `.`, space) at `pos`.
/// Returns `(digits_end, content_start)`.
fn ordered_marker(bytes: &[u8], pos: usize, range_end: usize) -> Option<(usize, usize)> {
    let mut cursor = pos;
    while cursor < range_end && bytes[cursor].is_ascii_digit() {
        cursor += 1;
    }
    if cursor > pos && cursor + 1 < range_end && bytes[cursor] == b'.' && bytes[cursor + 1] == b' '
    {
        Some((cursor, cursor + 2))
    } else {
        None
    }
}

/// Parses an ordered list with the first marker at `pos`. Ordered items
/// form a flat sequence; the first marker's digits become `start_number`.
fn ordered_list(
    source: &str,
    pos: usize,
    range_end: usize,
    depth: usize,
    config: &ParserConfig,
    body: &mut Vec<Block>,
) -> usize {
    let bytes = source.as_bytes();
    let (digits_end, mut content_start) =
        ordered_marker(bytes, pos, range_end).expect("caller matched an ordered marker");
    let start_number = source[pos..digits_end].to_string();
    let mut items = Vec::new();
    let mut pos;

    loop {
        let content_end = line_end(bytes, content_start, range_end);
        items.push(OrderedListItem {
            children: parse_blocks(source, content_start, content_end, depth + 1, config),
        });

        pos = skip_line_terminator(bytes, content_end, range_end);
        if pos >= range_end {
            break;
        }

        let mut cursor = pos;
        while cursor < range_end && matches!(bytes[cursor], b' ' | b'\t') {
            cursor += 1;
        }
        match ordered_marker(bytes, cursor, range_end) {
            Some((_, next_content)) => content_start = next_content,
            None => break,
        }
    }

    body.push(Block::OrderedList {
        start_number,
        items,
    });
    pos
}

/// Parses a blockquote with the first `>` at `pos`. Quoted lines are
/// stripped of one leading `>` and its trailing whitespace run, joined
/// into a fresh string, and re-parsed from offset zero; position
/// information is deliberately not preserved across that boundary.
fn block_quote(
    source: &str,
    pos: usize,
    range_end: usize,
    depth: usize,
    config: &ParserConfig,
    body: &mut Vec<Block>,
) -> usize {
    let bytes = source.as_bytes();
    let mut quoted = String::new();
    let mut marker = pos;
    let mut pos;

    loop {
        // `marker` sits on this line's `>`; strip it and the whitespace
        // run that follows.
        let mut content = marker + 1;
        while content < range_end && matches!(bytes[content], b' ' | b'\t') {
            content += 1;
        }
        let content_end = line_end(bytes, content, range_end);
        quoted.push_str(&source[content..content_end]);

        let after = skip_line_terminator(bytes, content_end, range_end);
        if after > content_end {
            quoted.push('\n');
        }
        pos = after;
        if after >= range_end {
            break;
        }

        // The quote continues only if the next line, after leading
        // whitespace, starts with `>`.
        let mut cursor = after;
        while cursor < range_end && matches!(bytes[cursor], b' ' | b'\t') {
            cursor += 1;
        }
        if cursor < range_end && bytes[cursor] == b'>' {
            marker = cursor;
        } else {
            break;
        }
    }

    let children = parse_blocks(&quoted, 0, quoted.len(), depth + 1, config);
    body.push(Block::BlockQuote { children });
    pos
}
