//! Normalized text ranges
//!
//! A [`TextRange`] always has `start <= end` in reading order. It is used for
//! the selection, for cut/copy, and to carry highlight spans whose color
//! rides along in `tag`.

use std::fmt;

use crate::document::Position;

/// The part of one line covered by a range.
///
/// `end == None` means "to the end of the line".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineSpan {
    pub line: usize,
    pub start: usize,
    pub end: Option<usize>,
}

impl LineSpan {
    pub const fn new(line: usize, start: usize, end: Option<usize>) -> Self {
        Self { line, start, end }
    }

    /// Resolve the span against a line of `len` cells, clipping both ends
    pub fn clip(&self, len: usize) -> (usize, usize) {
        let end = self.end.unwrap_or(len).min(len);
        (self.start.min(end), end)
    }
}

/// A (start, end) pair of positions with an optional payload tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextRange {
    start: Position,
    end: Position,
    tag: i32,
}

impl TextRange {
    /// Create a range; the endpoints are swapped if given in reverse order
    pub fn new(a: Position, b: Position) -> Self {
        Self::with_tag(a, b, -1)
    }

    pub fn with_tag(a: Position, b: Position, tag: i32) -> Self {
        let (start, end) = if b < a { (b, a) } else { (a, b) };
        Self { start, end, tag }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn tag(&self) -> i32 {
        self.tag
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Replace the endpoints, normalizing again
    pub fn set(&mut self, a: Position, b: Position) {
        *self = Self::with_tag(a, b, self.tag);
    }

    /// True if `pos` lies in `[start, end)`
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Per-line spans from the first line to the last
    pub fn lines(&self) -> impl DoubleEndedIterator<Item = LineSpan> + '_ {
        let first = self.start.line;
        let last = self.end.line;
        (first..=last).map(move |line| {
            let start = if line == first {
                self.start.col.max(0) as usize
            } else {
                0
            };
            let end = if line == last {
                Some(self.end.col.max(0) as usize)
            } else {
                None
            };
            LineSpan::new(line, start, end)
        })
    }

    /// Per-line spans from the last line to the first.
    ///
    /// Multi-line deletion walks this order so that removing or joining a
    /// line never shifts the index of a line still to be visited.
    pub fn lines_reversed(&self) -> impl Iterator<Item = LineSpan> + '_ {
        self.lines().rev()
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}
