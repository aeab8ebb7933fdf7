//! Tabular layout for tbl(1) output
//!
//! Sparse, span-annotated rows go in; a dense grid specification and the
//! emitted `.TS`/`.TE` block come out.

pub mod cell;
pub mod grid;


#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use cell::{Cell, CellStyle, HAlign, Row, Section};
pub use grid::{build_grid, Grid, GridBuilder, SlotTag};

/// A table node: optional caption plus section-tagged rows in document
/// order.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Table {
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: Option<String>,
    pub rows: Vec<(Section, Row)>,
}
