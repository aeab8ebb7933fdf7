//! Block and inline renderers
//!
//! The document tree is a closed sum type over node kinds, matched
//! exhaustively; an unsupported kind is a compile-time case, not a runtime
//! lookup failure. Block renderers are thin templates that concatenate
//! fixed control strings with pipeline-escaped node text; inline renderers
//! produce leader-marked text that the escape pipeline finalizes later.
//! Nothing here mutates the tree.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::context::RenderContext;
use super::escape::{roffify, WhitespaceMode, BOUNDARY_CLOSE, BOUNDARY_OPEN, ESC_BS, ESC_FS};
use super::table::{build_grid, Table};
use super::WarningKind;
use crate::data::constants::{
    REF_DOUBLE_QUOTE_CLOSE, REF_DOUBLE_QUOTE_OPEN, REF_SINGLE_QUOTE_CLOSE, REF_SINGLE_QUOTE_OPEN,
};

/// A parsed document ready for rendering. Block content strings are the
/// already-rendered child content of each node; inline spans inside them
/// were produced by the [`Inline`] renderers and still carry leader
/// markers.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Document {
    pub blocks: Vec<Block>,
}

/// Block-level node kinds
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Block {
    Section {
        title: String,
        #[cfg_attr(feature = "serde", serde(default))]
        id: Option<String>,
        #[cfg_attr(feature = "serde", serde(default = "default_level"))]
        level: usize,
        #[cfg_attr(feature = "serde", serde(default))]
        blocks: Vec<Block>,
    },
    Paragraph {
        content: String,
    },
    Admonition {
        label: String,
        content: String,
    },
    Quote {
        content: String,
        #[cfg_attr(feature = "serde", serde(default))]
        attribution: Option<String>,
    },
    Listing {
        #[cfg_attr(feature = "serde", serde(default))]
        title: Option<String>,
        content: String,
    },
    Literal {
        content: String,
    },
    Verse {
        content: String,
        #[cfg_attr(feature = "serde", serde(default))]
        attribution: Option<String>,
    },
    UnorderedList {
        items: Vec<ListItem>,
    },
    OrderedList {
        items: Vec<ListItem>,
    },
    DescriptionList {
        items: Vec<DescriptionItem>,
    },
    Image {
        alt: String,
    },
    ThematicBreak,
    PageBreak,
    Table(Table),
}

#[cfg(feature = "serde")]
fn default_level() -> usize {
    1
}

/// One list entry: principal text plus optional nested blocks.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ListItem {
    pub content: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub blocks: Vec<Block>,
}

/// One description-list entry: term(s) and the described item.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DescriptionItem {
    pub terms: Vec<String>,
    pub item: ListItem,
}

/// Inline node kinds. Renderers return leader-marked text for inclusion
/// in a block's content; the escape pipeline activates the control
/// sequences.
#[derive(Debug, Clone)]
pub enum Inline {
    Text(String),
    Strong(String),
    Emphasis(String),
    Monospaced(String),
    SingleQuoted(String),
    DoubleQuoted(String),
    LineBreak,
    Anchor {
        kind: AnchorKind,
        target: String,
        text: String,
    },
}

/// Anchor flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    Link,
    Mailto,
    Xref,
    Ref,
    Bibref,
}

/// Render an inline node to leader-marked text.
///
/// Unsupported anchor kinds are a non-fatal condition: a warning is
/// recorded and the node renders as absent.
pub fn render_inline(node: &Inline, ctx: &mut RenderContext) -> String {
    match node {
        Inline::Text(text) => text.clone(),
        Inline::Strong(text) => {
            format!("{ESC_BS}fB{BOUNDARY_OPEN}{text}{BOUNDARY_CLOSE}{ESC_BS}fP")
        }
        Inline::Emphasis(text) => {
            format!("{ESC_BS}fI{BOUNDARY_OPEN}{text}{BOUNDARY_CLOSE}{ESC_BS}fP")
        }
        Inline::Monospaced(text) => {
            format!("{ESC_BS}f(CR{BOUNDARY_OPEN}{text}{BOUNDARY_CLOSE}{ESC_BS}fP")
        }
        Inline::SingleQuoted(text) => {
            format!("{REF_SINGLE_QUOTE_OPEN}{text}{REF_SINGLE_QUOTE_CLOSE}")
        }
        Inline::DoubleQuoted(text) => {
            format!("{REF_DOUBLE_QUOTE_OPEN}{text}{REF_DOUBLE_QUOTE_CLOSE}")
        }
        Inline::LineBreak => format!("\n{ESC_FS}br\n"),
        Inline::Anchor { kind, target, text } => match kind {
            AnchorKind::Link => {
                let label = if text.is_empty() { target } else { text };
                format!("{ESC_BS}c\n{ESC_FS}URL \"{target}\" \"{label}\" ")
            }
            AnchorKind::Mailto => {
                let address = target.strip_prefix("mailto:").unwrap_or(target);
                let label = if text.is_empty() { address } else { text };
                format!("{ESC_BS}c\n{ESC_FS}MTO \"{address}\" \"{label}\" ")
            }
            AnchorKind::Xref => match ctx.lookup_xref(target) {
                Some(title) if text.is_empty() => {
                    format!("the section {REF_DOUBLE_QUOTE_OPEN}{title}{REF_DOUBLE_QUOTE_CLOSE}")
                }
                _ if !text.is_empty() => text.clone(),
                _ => {
                    ctx.add_warning(
                        WarningKind::DanglingReference,
                        format!("no target found for reference {}", target),
                    );
                    format!("[{target}]")
                }
            },
            AnchorKind::Ref | AnchorKind::Bibref => {
                ctx.add_warning(
                    WarningKind::UnsupportedAnchor,
                    format!("unsupported anchor kind {:?} for target {}", kind, target),
                );
                String::new()
            }
        },
    }
}

/// Render a sequence of inline nodes into one content string.
pub fn render_inlines(nodes: &[Inline], ctx: &mut RenderContext) -> String {
    nodes
        .iter()
        .map(|node| render_inline(node, ctx))
        .collect::<Vec<_>>()
        .concat()
}

/// Render a sequence of blocks into the context buffer.
pub fn render_blocks(blocks: &[Block], ctx: &mut RenderContext) {
    for block in blocks {
        render_block(block, ctx);
    }
}

fn render_block(block: &Block, ctx: &mut RenderContext) {
    match block {
        Block::Section {
            title,
            level,
            blocks,
            ..
        } => {
            ctx.newline();
            if *level <= 1 {
                let heading = roffify(&title.to_uppercase(), WhitespaceMode::Collapse, false);
                ctx.push_line(&format!(".SH \"{}\"", heading));
            } else {
                let heading = roffify(title, WhitespaceMode::Collapse, false);
                ctx.push_line(&format!(".SS \"{}\"", heading));
            }
            render_blocks(blocks, ctx);
        }
        Block::Paragraph { content } => {
            ctx.newline();
            ctx.push_line(".sp");
            ctx.push(&roffify(content, WhitespaceMode::Collapse, true));
        }
        Block::Admonition { label, content } => {
            ctx.newline();
            ctx.push_line(".sp");
            ctx.push_line(".RS 4");
            ctx.push_line(&format!(
                ".B {}",
                roffify(&label.to_uppercase(), WhitespaceMode::Collapse, false)
            ));
            ctx.push_line(".br");
            ctx.push(&roffify(content, WhitespaceMode::Collapse, true));
            ctx.push_line(".RE");
        }
        Block::Quote {
            content,
            attribution,
        } => {
            ctx.newline();
            ctx.push_line(".sp");
            ctx.push_line(".RS 3");
            ctx.push(&roffify(content, WhitespaceMode::Collapse, true));
            if let Some(attribution) = attribution {
                ctx.push_line(".br");
                ctx.push(&roffify(
                    &format!("&#8212;&#8203;{attribution}"),
                    WhitespaceMode::Collapse,
                    true,
                ));
            }
            ctx.push_line(".RE");
        }
        Block::Listing { title, content } => {
            ctx.newline();
            ctx.push_line(".sp");
            if let Some(title) = title {
                ctx.push_line(&format!(
                    ".B {}",
                    roffify(title, WhitespaceMode::Collapse, false)
                ));
                ctx.push_line(".br");
            }
            ctx.push_line(".if n .RS 4");
            ctx.push_line(".nf");
            ctx.push_line(".fam C");
            ctx.push(&roffify(content, WhitespaceMode::Preserve, true));
            ctx.push_line(".fam");
            ctx.push_line(".fi");
            ctx.push_line(".if n .RE");
        }
        Block::Literal { content } => {
            ctx.newline();
            ctx.push_line(".sp");
            ctx.push_line(".if n .RS 4");
            ctx.push_line(".nf");
            ctx.push(&roffify(content, WhitespaceMode::Preserve, true));
            ctx.push_line(".fi");
            ctx.push_line(".if n .RE");
        }
        Block::Verse {
            content,
            attribution,
        } => {
            ctx.newline();
            ctx.push_line(".sp");
            ctx.push_line(".nf");
            ctx.push(&roffify(content, WhitespaceMode::Preserve, true));
            if let Some(attribution) = attribution {
                ctx.push_line(".br");
                ctx.push(&roffify(
                    &format!("&#8212;&#8203;{attribution}"),
                    WhitespaceMode::Collapse,
                    true,
                ));
            }
            ctx.push_line(".fi");
        }
        Block::UnorderedList { items } => {
            for item in items {
                ctx.newline();
                ctx.push_line(".sp");
                ctx.push_line(".RS 4");
                ctx.push_line(".ie n \\{\\");
                ctx.push_line("\\h'-04'\\(bu\\h'+03'\\c");
                ctx.push_line(".\\}");
                ctx.push_line(".el \\{\\");
                ctx.push_line(".sp -1");
                ctx.push_line(".IP \\(bu 2.3");
                ctx.push_line(".\\}");
                ctx.push(&roffify(&item.content, WhitespaceMode::Collapse, true));
                render_blocks(&item.blocks, ctx);
                ctx.newline();
                ctx.push_line(".RE");
            }
        }
        Block::OrderedList { items } => {
            for (index, item) in items.iter().enumerate() {
                let number = index + 1;
                ctx.newline();
                ctx.push_line(".sp");
                ctx.push_line(".RS 4");
                ctx.push_line(".ie n \\{\\");
                ctx.push_line(&format!("\\h'-04' {}.\\h'+01'\\c", number));
                ctx.push_line(".\\}");
                ctx.push_line(".el \\{\\");
                ctx.push_line(".sp -1");
                ctx.push_line(&format!(".IP \" {}.\" 4.2", number));
                ctx.push_line(".\\}");
                ctx.push(&roffify(&item.content, WhitespaceMode::Collapse, true));
                render_blocks(&item.blocks, ctx);
                ctx.newline();
                ctx.push_line(".RE");
            }
        }
        Block::DescriptionList { items } => {
            for entry in items {
                ctx.newline();
                ctx.push_line(".sp");
                for term in &entry.terms {
                    ctx.push(&roffify(term, WhitespaceMode::Collapse, true));
                    ctx.push_line(".br");
                }
                ctx.push_line(".RS 4");
                ctx.push(&roffify(&entry.item.content, WhitespaceMode::Collapse, true));
                render_blocks(&entry.item.blocks, ctx);
                ctx.newline();
                ctx.push_line(".RE");
            }
        }
        Block::Image { alt } => {
            ctx.newline();
            ctx.push_line(".sp");
            ctx.push(&roffify(
                &format!("[{alt}]"),
                WhitespaceMode::Collapse,
                true,
            ));
        }
        Block::ThematicBreak => {
            ctx.newline();
            ctx.push_line(".sp");
            ctx.push_line(".ce");
            ctx.push_line("* * *");
        }
        Block::PageBreak => {
            ctx.newline();
            ctx.push_line(".bp");
        }
        Block::Table(table) => render_table(table, ctx),
    }
}

/// Render a table node: optional caption, then the tbl block built by the
/// grid engine. The grid matrices are local to this call and discarded
/// after emission.
fn render_table(table: &Table, ctx: &mut RenderContext) {
    ctx.newline();
    if let Some(title) = &table.title {
        ctx.push_line(".sp");
        ctx.push_line(&format!(
            ".B {}",
            roffify(title, WhitespaceMode::Collapse, false)
        ));
    }
    let grid = build_grid(&table.rows);
    let block = grid.to_roff();
    ctx.warnings.extend(grid.warnings);
    ctx.push_line(&block);
}

/// Collect the cross-reference table for a document: explicit section ids
/// and, as a fallback, the lower-cased title.
pub fn collect_xrefs(blocks: &[Block], into: &mut fxhash::FxHashMap<String, String>) {
    for block in blocks {
        if let Block::Section {
            title, id, blocks, ..
        } = block
        {
            if let Some(id) = id {
                into.insert(id.clone(), title.clone());
            }
            into.insert(title.to_lowercase().replace(' ', "_"), title.clone());
            collect_xrefs(blocks, into);
        }
    }
}
