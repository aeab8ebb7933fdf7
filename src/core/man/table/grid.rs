//! Span-aware tbl grid builder
//!
//! Reconstructs the dense physical grid behind a sparse, span-annotated
//! cell sequence. The builder keeps a growable 2-D arena of slots: a slot
//! is either unclaimed, the anchor of a logical cell, or a placeholder
//! claimed by a horizontal or vertical span. Claims never overwrite each
//! other; a claim that lands on an occupied slot falls forward to the next
//! free one.

use crate::core::man::{RenderWarning, WarningKind};
use crate::data::constants::{DEFAULT_COLUMN_TAG, TABLE_END, TABLE_START};

use super::cell::{Row, Section};

/// State of one physical grid position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotTag {
    /// Unclaimed slot.
    Empty,
    /// Anchor of a logical cell, holding its alignment/style tag.
    Anchor(String),
    /// Claimed by a colspan extending from an anchor to the left.
    SpanContinuation,
    /// Claimed by a rowspan extending from an anchor above.
    VerticalSpan,
}

impl SlotTag {
    pub fn is_claimed(&self) -> bool {
        !matches!(self, SlotTag::Empty)
    }
}

/// Dense grid specification built by [`GridBuilder`].
///
/// Header and text matrices always share dimensions; the emitted column
/// count is taken from physical row 0.
#[derive(Debug, Clone)]
pub struct Grid {
    pub column_count: usize,
    pub headers: Vec<Vec<SlotTag>>,
    pub texts: Vec<Vec<String>>,
    pub warnings: Vec<RenderWarning>,
}

impl Grid {
    /// Number of anchor slots across the whole grid; equals the logical
    /// cell count of the input.
    pub fn anchor_count(&self) -> usize {
        self.headers
            .iter()
            .flatten()
            .filter(|tag| matches!(tag, SlotTag::Anchor(_)))
            .count()
    }

    /// Emit the complete tbl block. A grid with no rows still yields a
    /// syntactically valid, empty table.
    pub fn to_roff(&self) -> String {
        let mut output = String::new();
        output.push_str(TABLE_START);
        output.push('\n');

        // Column-specification line: one fixed default tag per column of
        // physical row 0, terminated by a period. Per-cell tags stay in the
        // header matrix for span bookkeeping; no per-column inference.
        let spec = vec![DEFAULT_COLUMN_TAG; self.column_count].join(" ");
        output.push_str(&spec);
        output.push_str(".\n");

        for row in &self.texts {
            let entries: Vec<&str> = row.iter().map(|text| text.as_str()).collect();
            output.push_str(&entries.join(":"));
            output.push('\n');
        }

        output.push_str(TABLE_END);
        output
    }
}

/// Growable 2-D arena translating sparse rows into the dense grid.
#[derive(Debug, Default)]
pub struct GridBuilder {
    headers: Vec<Vec<SlotTag>>,
    texts: Vec<Vec<String>>,
    /// Physical row cursor; advances once per input row, never per span.
    row_index: usize,
    warnings: Vec<RenderWarning>,
}

impl GridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one input row at the current physical row index.
    pub fn process_row(&mut self, section: Section, row: &Row) {
        self.ensure_row(self.row_index);

        for cell in &row.cells {
            let anchor_col = self.claim_free_slot(self.row_index, 0);
            self.headers[self.row_index][anchor_col] = SlotTag::Anchor(cell.format_tag(section));
            self.texts[self.row_index][anchor_col] = cell.content_block();

            // Claim the colspan tail to the right; occupied slots are
            // skipped, spans never overwrite another span's claim.
            let mut claimed = 1;
            let mut col = anchor_col + 1;
            while claimed < cell.colspan {
                self.ensure_slot(self.row_index, col);
                if !self.headers[self.row_index][col].is_claimed() {
                    self.headers[self.row_index][col] = SlotTag::SpanContinuation;
                    claimed += 1;
                }
                col += 1;
            }

            // Inject vertical placeholders into the rows below so later
            // input rows see those slots as taken.
            for offset in 1..cell.rowspan {
                let target_row = self.row_index + offset;
                self.ensure_row(target_row);
                for span_col in anchor_col..anchor_col + cell.colspan {
                    let landed = self.claim_free_slot(target_row, span_col);
                    self.headers[target_row][landed] = SlotTag::VerticalSpan;
                    if landed != span_col {
                        self.warnings.push(RenderWarning::new(
                            WarningKind::MalformedSpan,
                            format!(
                                "vertical span displaced from column {} to {} in row {}",
                                span_col, landed, target_row
                            ),
                        ));
                    }
                }
            }
        }

        self.row_index += 1;
    }

    /// Finish the walk and freeze the matrices.
    pub fn finish(self) -> Grid {
        let column_count = self.headers.first().map(|row| row.len()).unwrap_or(0);
        Grid {
            column_count,
            headers: self.headers,
            texts: self.texts,
            warnings: self.warnings,
        }
    }

    /// First unclaimed slot of `row` at or after `from`, growing the row by
    /// one slot when every existing slot is taken.
    fn claim_free_slot(&mut self, row: usize, from: usize) -> usize {
        self.ensure_row(row);
        let mut col = from;
        loop {
            self.ensure_slot(row, col);
            if !self.headers[row][col].is_claimed() {
                return col;
            }
            col += 1;
        }
    }

    fn ensure_row(&mut self, row: usize) {
        while self.headers.len() <= row {
            self.headers.push(Vec::new());
            self.texts.push(Vec::new());
        }
    }

    fn ensure_slot(&mut self, row: usize, col: usize) {
        let slots = &mut self.headers[row];
        while slots.len() <= col {
            slots.push(SlotTag::Empty);
        }
        let texts = &mut self.texts[row];
        while texts.len() <= col {
            texts.push(String::new());
        }
    }
}

/// Build the dense grid for a sequence of section-tagged rows.
pub fn build_grid(rows: &[(Section, Row)]) -> Grid {
    let mut builder = GridBuilder::new();
    for (section, row) in rows {
        builder.process_row(*section, row);
    }
    builder.finish()
}
