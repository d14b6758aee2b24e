//! Highlight oracle interface
//!
//! The syntax engine lives outside this crate. It receives the document as
//! codepoints (one unit per cell, each line followed by `\n`) and answers
//! with colored spans in the same units, which are baked into the
//! document's cell colors by [`crate::TextViewer::highlight`].

use pixide_core::{Position, TextRange, DEFAULT_TEXT_COLOR};

/// A colored span reported by the oracle. `color < 0` means default text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub col_start: usize,
    pub row_start: usize,
    pub col_end: usize,
    pub row_end: usize,
    pub color: i32,
}

impl HighlightSpan {
    pub fn to_range(&self) -> TextRange {
        let color = if self.color >= 0 {
            self.color
        } else {
            i32::from(DEFAULT_TEXT_COLOR)
        };
        TextRange::with_tag(
            Position::new(self.col_start as isize, self.row_start),
            Position::new(self.col_end as isize, self.row_end),
            color,
        )
    }
}

pub trait HighlightOracle {
    fn highlights(&mut self, codepoints: &[u32]) -> Vec<HighlightSpan>;
}

/// Convert oracle spans into ranges carrying their color as tag
pub fn spans_to_ranges(spans: &[HighlightSpan]) -> Vec<TextRange> {
    spans.iter().map(HighlightSpan::to_range).collect()
}
