use super::*;
use crate::ast::{Block, Inline, ListItem};
use proptest::prelude::*;
use rstest::rstest;

fn parse_all(source: &str) -> Vec<Block> {
    parse(source, 0, source.len()).body
}

fn inline_all(source: &str) -> Vec<Inline> {
    parse_inline(source, 0, source.len())
}

#[test]
fn parse_only_considers_the_requested_range() {
    let source = "abc\n\n### g\n\nabc";
    let document = parse(source, 3, 10);

    assert_eq!(document.body.len(), 1);
    match &document.body[0] {
        Block::Heading { level, children } => {
            assert_eq!(*level, 3);
            assert_eq!(children, &[Inline::Text("g".to_string())]);
        }
        other => panic!("expected heading, got {other:?}"),
    }
}

#[test]
fn handles_every_block_type() {
    let cases: &[(&str, fn(&Block) -> bool)] = &[
        ("abcdefghijklmnopqrstu", |block| {
            matches!(block, Block::Paragraph { .. })
        }),
        ("### abcdefghijklmnopqrstu", |block| {
            matches!(block, Block::Heading { .. })
        }),
        ("> > abcdefghijklmnopqrstu\n>\n>", |block| {
            matches!(block, Block::BlockQuote { .. })
        }),
        ("```typescript\n abcdefghijklmnopqrstu", |block| {
            matches!(block, Block::FencedCodeBlock { .. })
        }),
        ("- abcdefghijklmnopqrstu\n - abc\n  - n", |block| {
            matches!(block, Block::List { .. })
        }),
        ("1. abcdefghijklmnopqrstu\n2. abc", |block| {
            matches!(block, Block::OrderedList { .. })
        }),
    ];

    for (source, matches_kind) in cases {
        let body = parse_all(source);
        assert_eq!(body.len(), 1, "expected one block for {source:?}");
        assert!(matches_kind(&body[0]), "wrong block kind for {source:?}");
    }
}

#[test]
fn blank_line_splits_paragraphs() {
    let body = parse_all("abc\n\ndef");
    assert_eq!(body.len(), 2);
    assert_eq!(
        body,
        vec![
            Block::Paragraph {
                children: vec![Inline::Text("abc".to_string())],
            },
            Block::Paragraph {
                children: vec![Inline::Text("def".to_string())],
            },
        ]
    );
}

#[test]
fn single_line_break_is_a_soft_break() {
    let body = parse_all("abc\ndef");
    assert_eq!(
        body,
        vec![Block::Paragraph {
            children: vec![Inline::Text("abc\ndef".to_string())],
        }]
    );
}

#[test]
fn carriage_return_line_endings_split_paragraphs_too() {
    let body = parse_all("abc\r\n\r\ndef");
    assert_eq!(body.len(), 2);
    assert!(matches!(body[0], Block::Paragraph { .. }));
    assert!(matches!(body[1], Block::Paragraph { .. }));
}

#[test]
fn parses_each_heading_level() {
    for level in 1..=6u8 {
        let source = format!("{} title", "#".repeat(level as usize));
        let body = parse_all(&source);
        assert_eq!(body.len(), 1);
        match &body[0] {
            Block::Heading {
                level: parsed,
                children,
            } => {
                assert_eq!(*parsed, level);
                assert_eq!(children, &[Inline::Text("title".to_string())]);
            }
            other => panic!("expected heading, got {other:?}"),
        }
    }
}

#[test]
fn seven_hashes_are_not_a_heading() {
    let body = parse_all("####### g");
    assert_eq!(
        body,
        vec![Block::Paragraph {
            children: vec![Inline::Text("####### g".to_string())],
        }]
    );
}

#[test]
fn hash_run_without_a_space_is_plain_text() {
    let body = parse_all("#heading");
    assert_eq!(
        body,
        vec![Block::Paragraph {
            children: vec![Inline::Text("#heading".to_string())],
        }]
    );
}

#[test]
fn markers_mid_paragraph_stay_ordinary_text() {
    let body = parse_all("text # not a heading > not a quote");
    assert_eq!(body.len(), 1);
    assert!(matches!(body[0], Block::Paragraph { .. }));
}

#[test]
fn heading_interrupts_a_running_paragraph() {
    let body = parse_all("abc\n# h");
    assert_eq!(body.len(), 2);
    assert!(matches!(body[0], Block::Paragraph { .. }));
    assert!(matches!(body[1], Block::Heading { level: 1, .. }));
}

#[test]
fn fenced_code_block_keeps_source_verbatim() {
    let body = parse_all("```rust\nlet **x** = 1;\n```");
    assert_eq!(
        body,
        vec![Block::FencedCodeBlock {
            language: "rust".to_string(),
            source: "let **x** = 1;".to_string(),
        }]
    );
}

#[test]
fn unterminated_fence_consumes_the_rest_of_the_range() {
    let body = parse_all("```typescript\n abcdefghijklmnopqrstu");
    assert_eq!(
        body,
        vec![Block::FencedCodeBlock {
            language: "typescript".to_string(),
            source: " abcdefghijklmnopqrstu".to_string(),
        }]
    );
}

#[test]
fn fence_without_language_has_an_empty_tag() {
    let body = parse_all("```\ncode\n```");
    match &body[0] {
        Block::FencedCodeBlock { language, source } => {
            assert_eq!(language, "");
            assert_eq!(source, "code");
        }
        other => panic!("expected code block, got {other:?}"),
    }
}

#[test]
fn fence_between_paragraphs_flushes_the_pending_text() {
    let body = parse_all("before\n```\ncode\n```");
    assert_eq!(body.len(), 2);
    assert!(matches!(body[0], Block::Paragraph { .. }));
    assert!(matches!(body[1], Block::FencedCodeBlock { .. }));
}

fn item(text: &str, items: Vec<ListItem>) -> ListItem {
    ListItem {
        children: vec![Block::Paragraph {
            children: vec![Inline::Text(text.to_string())],
        }],
        items,
    }
}

#[rstest]
#[case::dash("- hello\n  - hello\n    - hello")]
#[case::star("* hello\n  * hello\n    * hello")]
#[case::plus("+ hello\n  + hello\n    + hello")]
fn bullet_markers_produce_identical_nesting(#[case] source: &str) {
    let body = parse_all(source);
    let expected = vec![Block::List {
        items: vec![item("hello", vec![item("hello", vec![item("hello", vec![])])])],
    }];
    assert_eq!(body, expected);
}

#[test]
fn indent_delta_of_one_stays_on_the_same_level() {
    let body = parse_all("- a\n - b\n  - c");
    let expected = vec![Block::List {
        items: vec![item("a", vec![]), item("b", vec![item("c", vec![])])],
    }];
    assert_eq!(body, expected);
}

#[test]
fn dedent_closes_nested_levels() {
    let body = parse_all("- a\n    - b\n- c");
    let expected = vec![Block::List {
        items: vec![item("a", vec![item("b", vec![])]), item("c", vec![])],
    }];
    assert_eq!(body, expected);
}

#[test]
fn tab_indentation_counts_as_two_units() {
    // One tab is delta two from the root level, so the item descends.
    let body = parse_all("- a\n\t- b");
    let expected = vec![Block::List {
        items: vec![item("a", vec![item("b", vec![])])],
    }];
    assert_eq!(body, expected);
}

#[test]
fn list_ends_at_the_first_non_list_line() {
    let body = parse_all("- a\nplain text");
    assert_eq!(body.len(), 2);
    assert!(matches!(body[0], Block::List { .. }));
    assert!(matches!(body[1], Block::Paragraph { .. }));
}

#[test]
fn bullet_without_a_space_is_plain_text() {
    let body = parse_all("-not a list");
    assert_eq!(body.len(), 1);
    assert!(matches!(body[0], Block::Paragraph { .. }));
}

#[test]
fn ordered_list_collects_consecutive_numbered_lines() {
    let body = parse_all("1. first\n2. second\n3. third");
    match &body[0] {
        Block::OrderedList {
            start_number,
            items,
        } => {
            assert_eq!(start_number, "1");
            assert_eq!(items.len(), 3);
            assert_eq!(
                items[1].children,
                vec![Block::Paragraph {
                    children: vec![Inline::Text("second".to_string())],
                }]
            );
        }
        other => panic!("expected ordered list, got {other:?}"),
    }
}

#[test]
fn ordered_list_start_number_is_kept_verbatim() {
    let body = parse_all("12. twelfth");
    match &body[0] {
        Block::OrderedList { start_number, .. } => assert_eq!(start_number, "12"),
        other => panic!("expected ordered list, got {other:?}"),
    }
}

#[test]
fn digits_without_a_dot_and_space_are_plain_text() {
    let body = parse_all("1.5 is a number");
    assert_eq!(
        body,
        vec![Block::Paragraph {
            children: vec![Inline::Text("1.5 is a number".to_string())],
        }]
    );
}

#[test]
fn blockquote_reparses_the_stripped_content() {
    let body = parse_all("> a\n> b");
    assert_eq!(
        body,
        vec![Block::BlockQuote {
            children: vec![Block::Paragraph {
                children: vec![Inline::Text("a\nb".to_string())],
            }],
        }]
    );
}

#[test]
fn blockquotes_nest_recursively() {
    let body = parse_all("> > abc\n>\n>");
    assert_eq!(
        body,
        vec![Block::BlockQuote {
            children: vec![Block::BlockQuote {
                children: vec![Block::Paragraph {
                    children: vec![Inline::Text("abc".to_string())],
                }],
            }],
        }]
    );
}

#[test]
fn blockquote_ends_at_the_first_unquoted_line() {
    let body = parse_all("> quoted\nplain");
    assert_eq!(body.len(), 2);
    assert!(matches!(body[0], Block::BlockQuote { .. }));
    assert!(matches!(body[1], Block::Paragraph { .. }));
}

#[test]
fn blockquote_can_contain_other_block_kinds() {
    let body = parse_all("> # title\n> text");
    match &body[0] {
        Block::BlockQuote { children } => {
            assert_eq!(children.len(), 2);
            assert!(matches!(children[0], Block::Heading { level: 1, .. }));
            assert!(matches!(children[1], Block::Paragraph { .. }));
        }
        other => panic!("expected blockquote, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Inline parsing
// ---------------------------------------------------------------------------

#[test]
fn parse_inline_only_considers_the_requested_range() {
    let nodes = parse_inline("a *b* c", 2, 5);
    assert_eq!(
        nodes,
        vec![Inline::Italic {
            children: vec![Inline::Text("b".to_string())],
        }]
    );
}

#[test]
fn handles_every_inline_type() {
    let cases: &[(&str, fn(&Inline) -> bool)] = &[
        ("abcdef and just text* ", |node| {
            matches!(node, Inline::Text(_))
        }),
        ("**abc**", |node| matches!(node, Inline::Bold { .. })),
        ("*abc*", |node| matches!(node, Inline::Italic { .. })),
        ("***abc***", |node| matches!(node, Inline::BoldItalic { .. })),
        ("`code`", |node| matches!(node, Inline::InlineCode(_))),
        ("[]()", |node| matches!(node, Inline::Link { .. })),
        ("![]()", |node| matches!(node, Inline::Image { .. })),
    ];

    for (source, matches_kind) in cases {
        let nodes = inline_all(source);
        assert_eq!(nodes.len(), 1, "expected one node for {source:?}");
        assert!(matches_kind(&nodes[0]), "wrong node kind for {source:?}");
    }
}

#[test]
fn emphasis_markers_produce_single_nodes_with_text_children() {
    assert_eq!(
        inline_all("*abc*"),
        vec![Inline::Italic {
            children: vec![Inline::Text("abc".to_string())],
        }]
    );
    assert_eq!(
        inline_all("**abc**"),
        vec![Inline::Bold {
            children: vec![Inline::Text("abc".to_string())],
        }]
    );
    assert_eq!(
        inline_all("***abc***"),
        vec![Inline::BoldItalic {
            children: vec![Inline::Text("abc".to_string())],
        }]
    );
}

#[test]
fn emphasis_nests_recursively() {
    let nodes = inline_all("**a *b* c**");
    match &nodes[0] {
        Inline::Bold { children } => {
            assert_eq!(children.len(), 3);
            assert!(matches!(children[1], Inline::Italic { .. }));
        }
        other => panic!("expected bold, got {other:?}"),
    }
}

#[test]
fn text_around_emphasis_is_preserved() {
    let nodes = inline_all("Hello, **world**!");
    assert_eq!(
        nodes,
        vec![
            Inline::Text("Hello, ".to_string()),
            Inline::Bold {
                children: vec![Inline::Text("world".to_string())],
            },
            Inline::Text("!".to_string()),
        ]
    );
}

#[test]
fn inline_code_content_is_opaque() {
    let interior = "**bold** *italic* ***boldItalic*** ()[] text";
    let source = format!("`{interior}`");
    let nodes = inline_all(&source);

    assert_eq!(nodes, vec![Inline::InlineCode(interior.to_string())]);
}

#[test]
fn unterminated_emphasis_falls_back_to_literal_text() {
    let nodes = parse_inline("text *no close", 0, 14);
    assert_eq!(nodes, vec![Inline::Text("text *no close".to_string())]);
}

#[test]
fn unterminated_backtick_stays_literal() {
    let nodes = inline_all("before ` after");
    assert_eq!(nodes, vec![Inline::Text("before ` after".to_string())]);
}

#[test]
fn links_and_images_are_distinct_node_types() {
    let nodes = inline_all("[link](#id) ![image](url)");
    assert_eq!(nodes.len(), 2);
    assert_eq!(
        nodes[0],
        Inline::Link {
            children: vec![Inline::Text("link".to_string())],
            url: "#id".to_string(),
        }
    );
    assert_eq!(
        nodes[1],
        Inline::Image {
            alt_text: "image".to_string(),
            url: "url".to_string(),
        }
    );
}

#[test]
fn link_text_is_inline_parsed() {
    let nodes = inline_all("[see *this*](url)");
    match &nodes[0] {
        Inline::Link { children, url } => {
            assert_eq!(url, "url");
            assert_eq!(children.len(), 2);
            assert!(matches!(children[1], Inline::Italic { .. }));
        }
        other => panic!("expected link, got {other:?}"),
    }
}

#[test]
fn image_alt_text_is_not_inline_parsed() {
    let nodes = inline_all("![has *stars*](url)");
    assert_eq!(
        nodes,
        vec![Inline::Image {
            alt_text: "has *stars*".to_string(),
            url: "url".to_string(),
        }]
    );
}

#[test]
fn bracket_without_url_part_is_literal_text() {
    let nodes = inline_all("[not a link]");
    assert_eq!(nodes, vec![Inline::Text("[not a link]".to_string())]);
}

#[test]
fn bare_spacing_between_inline_nodes_is_dropped() {
    let nodes = inline_all("*a* *b*");
    assert_eq!(nodes.len(), 2);
    assert!(matches!(nodes[0], Inline::Italic { .. }));
    assert!(matches!(nodes[1], Inline::Italic { .. }));
}

// ---------------------------------------------------------------------------
// Nesting limit and range contracts
// ---------------------------------------------------------------------------

#[test]
fn block_nesting_beyond_the_limit_degrades_to_raw_text() {
    let config = ParserConfig {
        max_nesting_depth: 2,
    };
    let document = parse_with_config("> > > deep", 0, 10, &config);

    assert_eq!(
        document.body,
        vec![Block::BlockQuote {
            children: vec![Block::BlockQuote {
                children: vec![Block::Paragraph {
                    children: vec![Inline::Text("> deep".to_string())],
                }],
            }],
        }]
    );
}

#[test]
fn inline_nesting_beyond_the_limit_degrades_to_raw_text() {
    let config = ParserConfig {
        max_nesting_depth: 1,
    };
    let nodes = parse_inline_with_config("**a *b* c**", 0, 11, &config);

    assert_eq!(
        nodes,
        vec![Inline::Bold {
            children: vec![Inline::Text("a *b* c".to_string())],
        }]
    );
}

#[test]
fn default_limit_handles_pathological_emphasis_without_overflow() {
    let source = "*".repeat(4096);
    let document = parse(&source, 0, source.len());
    assert!(document.body.len() <= 1);
}

#[test]
fn try_parse_rejects_an_invalid_range() {
    let result = try_parse("abc", 2, 9);
    assert_eq!(
        result,
        Err(crate::error::MarkdownError::InvalidRange {
            start: 2,
            end: 9,
            len: 3,
        })
    );
}

#[test]
fn try_parse_rejects_ranges_inside_a_character() {
    // 'é' spans two bytes; offset 1 splits it.
    let result = try_parse("é", 0, 1);
    assert!(result.is_err());
}

#[test]
#[should_panic(expected = "invalid parse range")]
fn parse_panics_on_an_invalid_range() {
    let _ = parse("abc", 1, 7);
}

// ---------------------------------------------------------------------------
// Totality
// ---------------------------------------------------------------------------

fn snap_to_char_boundary(source: &str, mut pos: usize) -> usize {
    pos = pos.min(source.len());
    while !source.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

proptest! {
    #[test]
    fn parse_is_total_over_arbitrary_input(source in ".*") {
        let document = parse(&source, 0, source.len());
        // Whitespace-only input never produces a paragraph.
        if !source.bytes().any(|b| !matches!(b, b' ' | b'\t' | b'\n' | b'\r')) {
            prop_assert!(document.body.is_empty());
        }
    }

    #[test]
    fn parse_is_total_over_arbitrary_windows(
        source in ".*",
        a in 0usize..256,
        b in 0usize..256,
    ) {
        let a = snap_to_char_boundary(&source, a);
        let b = snap_to_char_boundary(&source, b);
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let _ = parse(&source, start, end);
        let _ = parse_inline(&source, start, end);
    }
}
