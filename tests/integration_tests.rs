//! Integration tests for Manforge document rendering

use manforge::{
    alias_directives, render_document, render_inline, roffify, AnchorKind, Block, Cell, Document,
    Inline, ListItem, RenderContext, RenderError, RenderOptions, Row, Section, Table,
    WarningKind, WhitespaceMode,
};

// ============================================================================
// Escape pipeline
// ============================================================================

mod escape_pipeline {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(roffify("plain words", WhitespaceMode::Collapse, false), "plain words");
    }

    #[test]
    fn test_mixed_ampersand_and_em_dash() {
        // A literal ampersand next to a named reference resolves to `&`
        // plus the em-dash escape, not a garbled re-expansion.
        assert_eq!(
            roffify("salt &amp; pepper&#8212;always", WhitespaceMode::Collapse, false),
            "salt & pepper\\(emalways"
        );
    }

    #[test]
    fn test_double_pass_is_visible() {
        let source = "a \\ b - c 'd'";
        let once = roffify(source, WhitespaceMode::Collapse, false);
        let twice = roffify(&once, WhitespaceMode::Collapse, false);
        assert_ne!(once, twice, "double escaping must diverge, not hide");
    }

    #[test]
    fn test_emphasized_span_with_backslash() {
        let mut ctx = RenderContext::new(RenderOptions::new("t"));
        let marked = render_inline(&Inline::Emphasis("dir\\file".into()), &mut ctx);
        let escaped = roffify(&marked, WhitespaceMode::Collapse, false);
        assert_eq!(escaped, "\\fIdir\\(rsfile\\fP");
        assert!(!escaped.contains("BOUNDARY"));
        assert!(!escaped.contains('\u{1b}'));
    }

    #[test]
    fn test_collapse_mode_folds_paragraph_wrapping() {
        assert_eq!(
            roffify("one\n  two\t three", WhitespaceMode::Collapse, false),
            "one two three"
        );
    }

    #[test]
    fn test_preserve_mode_keeps_layout() {
        assert_eq!(
            roffify("col1\tcol2\n  indented", WhitespaceMode::Preserve, false),
            "col1        col2\n  indented"
        );
    }
}

// ============================================================================
// Tables
// ============================================================================

mod tables {
    use super::*;

    fn table_doc(table: Table) -> Document {
        Document {
            blocks: vec![Block::Table(table)],
        }
    }

    #[test]
    fn test_two_by_two_table_end_to_end() {
        let table = Table {
            title: None,
            rows: vec![
                (Section::Head, Row::new(vec![Cell::new("A"), Cell::new("B")])),
                (Section::Body, Row::new(vec![Cell::new("1"), Cell::new("2")])),
            ],
        };
        let output = render_document(&table_doc(table), &RenderOptions::new("t")).unwrap();

        assert!(output.content.contains(".TS\nallbox tab(:);\nlt lt.\n"));
        assert!(output.content.contains("T{\nA\nT}:T{\nB\nT}"));
        assert!(output.content.contains("T{\n1\nT}:T{\n2\nT}"));
        assert!(output.content.contains(".TE"));
        assert!(!output.has_warnings());
    }

    #[test]
    fn test_table_title_emitted_as_caption() {
        let table = Table {
            title: Some("Exit codes".into()),
            rows: vec![(Section::Body, Row::new(vec![Cell::new("0")]))],
        };
        let output = render_document(&table_doc(table), &RenderOptions::new("t")).unwrap();
        assert!(output.content.contains(".B Exit codes\n.TS\n"));
    }

    #[test]
    fn test_rowspan_grid_through_document() {
        let table = Table {
            title: None,
            rows: vec![
                (
                    Section::Body,
                    Row::new(vec![Cell::with_spans("tall", 1, 2), Cell::new("a")]),
                ),
                (Section::Body, Row::new(vec![Cell::new("b")])),
            ],
        };
        let output = render_document(&table_doc(table), &RenderOptions::new("t")).unwrap();
        // Second physical row: empty placeholder entry, then the real cell.
        assert!(output.content.contains(":T{\nb\nT}"));
        assert!(output.content.contains("lt lt.\n"));
    }

    #[test]
    fn test_zero_row_table_renders() {
        let output = render_document(
            &table_doc(Table {
                title: None,
                rows: vec![],
            }),
            &RenderOptions::new("t"),
        )
        .unwrap();
        assert!(output.content.contains(".TS\nallbox tab(:);\n.\n.TE"));
    }

    #[test]
    fn test_malformed_span_degrades_with_warning() {
        let table = Table {
            title: None,
            rows: vec![
                (
                    Section::Body,
                    Row::new(vec![
                        Cell::new("a"),
                        Cell::new("b"),
                        Cell::with_spans("tall", 1, 3),
                    ]),
                ),
                (Section::Body, Row::new(vec![Cell::with_spans("clash", 3, 2)])),
                (Section::Body, Row::new(vec![Cell::new("tail")])),
            ],
        };
        let output = render_document(&table_doc(table), &RenderOptions::new("t")).unwrap();
        assert!(output
            .warnings
            .iter()
            .any(|w| w.kind == WarningKind::MalformedSpan));
        assert!(output.content.contains(".TE"));
    }
}

// ============================================================================
// Documents
// ============================================================================

mod documents {
    use super::*;

    #[test]
    fn test_missing_title_fails_fast() {
        let doc = Document { blocks: vec![] };
        match render_document(&doc, &RenderOptions::default()) {
            Err(RenderError::MissingAttribute { name }) => assert_eq!(name, "title"),
            other => panic!("expected missing-attribute error, got {:?}", other),
        }
    }

    #[test]
    fn test_preamble_and_sections() {
        let doc = Document {
            blocks: vec![Block::Section {
                title: "Synopsis".into(),
                id: None,
                level: 1,
                blocks: vec![Block::Paragraph {
                    content: "usage: tool [options]".into(),
                }],
            }],
        };
        let options = RenderOptions::new("tool")
            .with_date("2024-06-01")
            .with_source("tool 2.0")
            .with_manual("User Commands");
        let output = render_document(&doc, &options).unwrap();

        assert!(output.content.starts_with("'\\\" t\n"));
        assert!(output
            .content
            .contains(".TH \"TOOL\" \"1\" \"2024\\-06\\-01\" \"tool 2.0\" \"User Commands\""));
        assert!(output.content.contains(".SH \"SYNOPSIS\""));
        assert!(output.content.contains("usage: tool [options]"));
    }

    #[test]
    fn test_lists_render_items_in_order() {
        let doc = Document {
            blocks: vec![Block::OrderedList {
                items: vec![
                    ListItem {
                        content: "first".into(),
                        blocks: vec![],
                    },
                    ListItem {
                        content: "second".into(),
                        blocks: vec![],
                    },
                ],
            }],
        };
        let output = render_document(&doc, &RenderOptions::new("t")).unwrap();
        let first = output.content.find("first").unwrap();
        let second = output.content.find("second").unwrap();
        assert!(first < second);
        assert!(output.content.contains(".IP \" 1.\" 4.2"));
        assert!(output.content.contains(".IP \" 2.\" 4.2"));
    }

    #[test]
    fn test_link_inside_paragraph() {
        let mut ctx = RenderContext::new(RenderOptions::new("t"));
        let marked = render_inline(
            &Inline::Anchor {
                kind: AnchorKind::Link,
                target: "https://example.org/guide".into(),
                text: "the guide".into(),
            },
            &mut ctx,
        );
        let doc = Document {
            blocks: vec![Block::Paragraph {
                content: format!("read {marked}first"),
            }],
        };
        let output = render_document(&doc, &RenderOptions::new("t")).unwrap();
        assert!(output
            .content
            .contains("read \\c\n.URL \"https://example.org/guide\" \"the guide\"\nfirst"));
    }

    #[test]
    fn test_unknown_anchor_is_nonfatal() {
        let mut ctx = RenderContext::new(RenderOptions::new("t"));
        let rendered = render_inline(
            &Inline::Anchor {
                kind: AnchorKind::Ref,
                target: "somewhere".into(),
                text: String::new(),
            },
            &mut ctx,
        );
        assert!(rendered.is_empty());
        assert_eq!(ctx.warnings[0].kind, WarningKind::UnsupportedAnchor);
    }

    #[test]
    fn test_alias_directives_for_registered_names() {
        let options = RenderOptions::new("grep")
            .with_section("1")
            .with_alias("egrep");
        let directives = alias_directives(&options, "grep.1");
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].0, "egrep.1");
        assert_eq!(directives[0].1, ".so grep.1\n");
    }
}
