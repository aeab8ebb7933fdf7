//! # manforge
//!
//! Renderer from a parsed document tree to man(7) roff.
//!
//! ## Features
//!
//! - **Byte-exact output**: emits the control sequences a man/troff
//!   pipeline consumes, including the tbl preprocessor dialect for tables
//! - **Single-pass escaping**: a fixed, ordered escape pipeline turns body
//!   text into roff-safe output exactly once
//! - **Span-aware tables**: dense grid reconstruction from sparse rows
//!   with colspan/rowspan annotations
//! - **Cross-references**: section references resolved through a per-render
//!   lookup table
//! - **Alias pages**: one-line redirect directives for documents with
//!   multiple registered names
//! - **WASM Support**: compiles to WebAssembly for browser usage
//!
//! ## Usage Example
//!
//! ```rust
//! use manforge::{render_document, Block, Document, RenderOptions};
//!
//! let doc = Document {
//!     blocks: vec![Block::Paragraph {
//!         content: "prints lines matching a pattern".into(),
//!     }],
//! };
//! let options = RenderOptions::new("grep").with_manual("User Commands");
//! let page = render_document(&doc, &options).unwrap();
//! assert!(page.content.starts_with("'\\\" t\n"));
//! ```

/// Core rendering modules
pub mod core;

/// Data layer - static tables and fixed output fragments
pub mod data;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export the renderer surface
pub use crate::core::man;
pub use crate::core::man::{
    alias_directives, render_blocks, render_document, render_inline, render_inlines, roffify,
    AnchorKind, Block, Document, Inline, RenderContext, RenderOptions, RenderOutput,
    RenderWarning, WarningKind, WhitespaceMode,
};
pub use crate::core::man::markup::{DescriptionItem, ListItem};
pub use crate::core::man::table::{
    build_grid, Cell, CellStyle, Grid, GridBuilder, HAlign, Row, Section, SlotTag, Table,
};

// Re-export data modules
pub use crate::data::constants;

// Re-export utilities
pub use crate::utils::error::{RenderError, RenderResult};

/// Render a document tree and return only the roff text, discarding
/// warnings.
pub fn render_to_string(doc: &Document, options: &RenderOptions) -> RenderResult<String> {
    render_document(doc, options).map(|output| output.content)
}
