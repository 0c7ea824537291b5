//! # Text Row Layout
//!
//! Plans where consecutive text rows go and when a label is full.
//!
//! ```text
//! ┌──────────────────────── label ────────────────────────┐
//! │ start_y ─► row 0  ───────────── height               │
//! │                   ─ spacing                           │
//! │ start_y + pitch ─► row 1                              │
//! │ ...                                                   │
//! └───────────────────────────────────────────────────────┘
//!             pitch = row height + spacing
//! ```
//!
//! Rows that do not fit continue on the next label (next column, then the
//! next row of the scroll).

use crate::components::char_height_dot;
use crate::error::LabelError;

/// Space between text rows, in dots.
///
/// Font 3 is set tighter so three rows fit a 20 mm label.
pub fn row_spacing_dot(font_size: u8) -> u32 {
    if font_size == 3 { 2 } else { 5 }
}

/// Where the next object goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Scroll column of the label being filled
    pub column: u32,
    /// Top of the next text row, in label dots
    pub row_y_dot: u32,
}

/// Row placement for one `print_text` job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowPlan {
    /// Top of the first row on every label
    pub start_y_dot: u32,
    pub row_height_dot: u32,
    pub pitch_dot: u32,
    /// Rows per label, at least 1
    pub rows_per_label: usize,
}

impl RowPlan {
    /// Plan `row_count` rows of `font_size` text on a label `label_length_dot`
    /// long.
    ///
    /// With `start_y` the rows begin there; otherwise the block of rows on a
    /// full label is centred vertically. At least one row is placed per
    /// label even when it overhangs.
    pub fn new(
        label_length_dot: u32,
        font_size: u8,
        row_count: usize,
        start_y: Option<u32>,
    ) -> Result<Self, LabelError> {
        let row_height_dot = char_height_dot(font_size)?;
        let spacing = row_spacing_dot(font_size);
        let pitch_dot = row_height_dot + spacing;

        let fit_from = |top: u32| -> usize {
            let free = label_length_dot.saturating_sub(top);
            if free < row_height_dot {
                1
            } else {
                ((free - row_height_dot) / pitch_dot) as usize + 1
            }
        };

        let (start_y_dot, rows_per_label) = match start_y {
            Some(top) => (top, fit_from(top)),
            None => {
                let fit = fit_from(0);
                let rows = row_count.clamp(1, fit) as u32;
                let block = rows * row_height_dot + (rows - 1) * spacing;
                (label_length_dot.saturating_sub(block) / 2, fit)
            }
        };

        Ok(Self {
            start_y_dot,
            row_height_dot,
            pitch_dot,
            rows_per_label,
        })
    }

    /// Top of row `index` within its label.
    pub fn row_y(&self, index_on_label: usize) -> u32 {
        self.start_y_dot + self.pitch_dot * index_on_label as u32
    }

    /// Number of labels needed for `row_count` rows.
    pub fn label_count(&self, row_count: usize) -> usize {
        row_count.div_ceil(self.rows_per_label)
    }
}
