//! Cell types and alignment tags for tbl output

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::man::escape::{roffify, WhitespaceMode};
use crate::data::constants::{CELL_BLOCK_CLOSE, CELL_BLOCK_OPEN};

/// Table section a row belongs to; affects the default styling tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Section {
    Head,
    #[default]
    Body,
    Foot,
}

impl Section {
    /// Head and foot cells carry the bold tag modifier.
    pub fn is_emphasized(&self) -> bool {
        matches!(self, Section::Head | Section::Foot)
    }
}

/// Horizontal cell alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HAlign {
    #[default]
    Left,
    Right,
    Center,
    Numeric,
    Alphabetic,
}

impl HAlign {
    /// Convert to the tbl column-format character.
    pub fn to_char(&self) -> char {
        match self {
            HAlign::Left => 'l',
            HAlign::Right => 'r',
            HAlign::Center => 'c',
            HAlign::Numeric => 'n',
            HAlign::Alphabetic => 'a',
        }
    }

    /// Parse from an upstream alignment attribute string.
    pub fn from_attr(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "right" => HAlign::Right,
            "center" => HAlign::Center,
            "numeric" => HAlign::Numeric,
            "alphabetic" => HAlign::Alphabetic,
            _ => HAlign::Left,
        }
    }
}

/// Declared cell content style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CellStyle {
    #[default]
    Default,
    /// No-fill block, whitespace preserved.
    Literal,
    /// No-fill block, whitespace preserved.
    Verse,
    /// Content is already-rendered child output; used verbatim since it was
    /// escaped when rendered.
    Markup,
}

/// One logical table cell. Spanned-over grid positions carry no cell of
/// their own; the grid builder synthesizes placeholders for them.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub content: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub style: CellStyle,
    #[cfg_attr(feature = "serde", serde(default))]
    pub halign: HAlign,
    #[cfg_attr(feature = "serde", serde(default = "default_span"))]
    pub colspan: usize,
    #[cfg_attr(feature = "serde", serde(default = "default_span"))]
    pub rowspan: usize,
}

#[cfg(feature = "serde")]
fn default_span() -> usize {
    1
}

impl Cell {
    /// Create a plain single-slot cell.
    pub fn new(content: impl Into<String>) -> Self {
        Cell {
            content: content.into(),
            style: CellStyle::Default,
            halign: HAlign::Left,
            colspan: 1,
            rowspan: 1,
        }
    }

    /// Create a cell spanning multiple grid positions.
    pub fn with_spans(content: impl Into<String>, colspan: usize, rowspan: usize) -> Self {
        Cell {
            colspan: colspan.max(1),
            rowspan: rowspan.max(1),
            ..Cell::new(content)
        }
    }

    pub fn styled(mut self, style: CellStyle) -> Self {
        self.style = style;
        self
    }

    pub fn aligned(mut self, halign: HAlign) -> Self {
        self.halign = halign;
        self
    }

    /// Alignment/style tag recorded at the cell's anchor slot.
    pub fn format_tag(&self, section: Section) -> String {
        let mut tag = String::with_capacity(3);
        tag.push(self.halign.to_char());
        tag.push('t');
        if section.is_emphasized() {
            tag.push('b');
        }
        tag
    }

    /// Escaped, delimited content block for the anchor slot. Embedded line
    /// breaks are safe inside the multi-line block delimiters.
    pub fn content_block(&self) -> String {
        let resolved = match self.style {
            CellStyle::Literal | CellStyle::Verse => format!(
                ".nf\n{}\n.fi",
                roffify(&self.content, WhitespaceMode::Preserve, false)
            ),
            CellStyle::Markup => self.content.clone(),
            CellStyle::Default => roffify(&self.content, WhitespaceMode::Normalize, false),
        };
        format!("{CELL_BLOCK_OPEN}\n{resolved}\n{CELL_BLOCK_CLOSE}")
    }
}

/// Ordered cell sequence for one logical table row.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Row { cells }
    }
}
