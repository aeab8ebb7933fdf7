//! Document-tree to man(7) roff renderer
//!
//! This module renders a parsed document tree into the roff macro language
//! consumed by man/troff pipelines. Body text flows through the escape
//! pipeline in `escape`; tables are laid out by the grid engine in
//! `table`; everything else is thin templates in `markup`.

pub mod context;
pub mod escape;
pub mod markup;
pub mod table;

use std::fmt;

pub use context::{RenderContext, RenderOptions};
pub use escape::{roffify, WhitespaceMode};
pub use markup::{render_blocks, render_inline, render_inlines, AnchorKind, Block, Document, Inline};

use crate::data::constants::{FORMATTING_SETUP, SOURCE_REDIRECT_MACRO, TBL_PREPROCESSOR_FLAG, URL_MACRO_DEF};
use crate::utils::error::{RenderError, RenderResult};

// =============================================================================
// Warning System
// =============================================================================

/// Kind of warning generated during rendering.
///
/// Warnings are non-fatal: the render completes with degraded output and
/// the caller decides how loud to be about them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// An inline anchor kind this backend cannot express
    UnsupportedAnchor,
    /// A cross-reference whose target does not exist
    DanglingReference,
    /// A table span declaration that could not be honored as stated
    MalformedSpan,
    /// Other/generic warning
    Other,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::UnsupportedAnchor => write!(f, "unsupported anchor"),
            WarningKind::DanglingReference => write!(f, "dangling reference"),
            WarningKind::MalformedSpan => write!(f, "malformed span"),
            WarningKind::Other => write!(f, "other"),
        }
    }
}

/// A warning generated during rendering.
#[derive(Debug, Clone)]
pub struct RenderWarning {
    /// The kind of warning (for programmatic handling)
    pub kind: WarningKind,
    /// Human-readable warning message
    pub message: String,
}

impl RenderWarning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Rendered page with the warnings collected along the way.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// The rendered roff content
    pub content: String,
    /// Any warnings generated during rendering
    pub warnings: Vec<RenderWarning>,
}

impl RenderOutput {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

// =============================================================================
// Document rendering
// =============================================================================

/// Render a complete document to a man(7) page.
///
/// The document title is the one required attribute; rendering does not
/// proceed without it. All other problems degrade to warnings on the
/// returned [`RenderOutput`].
pub fn render_document(doc: &Document, options: &RenderOptions) -> RenderResult<RenderOutput> {
    if options.title.trim().is_empty() {
        return Err(RenderError::missing_attribute("title"));
    }

    let mut ctx = RenderContext::new(options.clone());
    markup::collect_xrefs(&doc.blocks, &mut ctx.xrefs);

    write_preamble(&mut ctx);
    render_blocks(&doc.blocks, &mut ctx);

    let (content, warnings) = ctx.finalize();
    Ok(RenderOutput { content, warnings })
}

/// Fixed document preamble: preprocessor flag, metadata comment block,
/// `.TH` line, locale/formatting setup, and the portable hyperlink macro.
fn write_preamble(ctx: &mut RenderContext) {
    let title = ctx.options.title.clone();
    let section = ctx.options.section.clone();
    let date = ctx.options.resolved_date();
    let source = ctx.options.source.clone().unwrap_or_default();
    let manual = ctx.options.manual.clone().unwrap_or_default();
    let language = ctx.options.language.clone();
    let author = if ctx.options.authors.is_empty() {
        "[see the \"AUTHOR(S)\" section]".to_string()
    } else {
        ctx.options.authors.join(", ")
    };

    ctx.push_line(TBL_PREPROCESSOR_FLAG);
    ctx.push_line(&format!(".\\\"     Title: {}", title));
    ctx.push_line(&format!(".\\\"    Author: {}", author));
    ctx.push_line(&format!(
        ".\\\" Generator: manforge {}",
        env!("CARGO_PKG_VERSION")
    ));
    ctx.push_line(&format!(".\\\"      Date: {}", date));
    ctx.push_line(&format!(".\\\"    Manual: {}", manual));
    ctx.push_line(&format!(".\\\"    Source: {}", source));
    ctx.push_line(&format!(".\\\"  Language: {}", language));
    ctx.push_line(".\\\"");
    ctx.push_line(&format!(
        ".TH \"{}\" \"{}\" \"{}\" \"{}\" \"{}\"",
        roffify(&title.to_uppercase(), WhitespaceMode::Collapse, false),
        roffify(&section, WhitespaceMode::Collapse, false),
        roffify(&date, WhitespaceMode::Collapse, false),
        th_field(&source),
        th_field(&manual),
    ));
    ctx.push_line(FORMATTING_SETUP);
    ctx.push_line(URL_MACRO_DEF);
}

/// `.TH` fields are positional; an empty one is padded with the
/// zero-width placeholder so the field stays visibly present.
fn th_field(value: &str) -> String {
    if value.is_empty() {
        "\\ \\&".to_string()
    } else {
        roffify(value, WhitespaceMode::Collapse, false)
    }
}

/// Redirect-file contents for each registered alias name.
///
/// Writing the files is the caller's job; the renderer only produces the
/// `(file name, one-line redirect directive)` pairs pointing at the
/// primary output file.
pub fn alias_directives(options: &RenderOptions, primary_file: &str) -> Vec<(String, String)> {
    options
        .aliases
        .iter()
        .map(|alias| {
            (
                format!("{}.{}", alias, options.section),
                format!("{} {}\n", SOURCE_REDIRECT_MACRO, primary_file),
            )
        })
        .collect()
}
