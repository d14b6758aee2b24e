//! Document storage: lines of colored cells
//!
//! The document is plain storage. All mutation that should be undoable goes
//! through [`crate::EditCommand`]; the only direct mutator here is
//! [`Document::recolor`], used to bake highlight colors into cells.

use std::cmp::Ordering;
use std::fmt;

use crate::range::LineSpan;

/// Palette index of the default text color
pub const DEFAULT_TEXT_COLOR: u8 = 1;

/// Codepoint emitted after every line by [`Document::codepoints`]
pub const EOL: u32 = 10;

const SPACE: u32 = 0x20;

/// One character slot: a codepoint plus a palette index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub codepoint: u32,
    pub color: u8,
}

impl Cell {
    pub const fn new(codepoint: u32, color: u8) -> Self {
        Self { codepoint, color }
    }

    pub const fn from_char(c: char, color: u8) -> Self {
        Self::new(c as u32, color)
    }

    /// A space in the background color, used for indentation
    pub const fn space() -> Self {
        Self::new(SPACE, 0)
    }

    /// The character to draw for this cell; invalid codepoints draw as U+FFFD
    pub fn glyph(&self) -> char {
        char::from_u32(self.codepoint).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    pub fn is_blank(&self) -> bool {
        self.codepoint == SPACE
    }
}

/// An ordered run of cells. The empty line is valid.
pub type Line = Vec<Cell>;

/// A location in the document.
///
/// `col` is signed because cursor motion may step one column past either edge
/// before the editor wraps it back into range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub col: isize,
    pub line: usize,
}

impl Position {
    pub const fn new(col: isize, line: usize) -> Self {
        Self { col, line }
    }
}

/// Reading order: line first, then column
impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.col.cmp(&other.col))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.line)
    }
}

/// The text buffer. Always holds at least one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            lines: vec![Line::new()],
        }
    }
}

impl Document {
    /// Create a document holding a single empty line
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from text, splitting on `\n`.
    ///
    /// Every cell gets [`DEFAULT_TEXT_COLOR`]. A trailing newline yields a
    /// trailing empty line, so `text()` gives back the same string.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.split('\n').map(Self::line_from_str).collect())
    }

    /// Create a document from lines; an empty list becomes one empty line
    pub fn from_lines(mut lines: Vec<Line>) -> Self {
        if lines.is_empty() {
            lines.push(Line::new());
        }
        Self { lines }
    }

    /// Convert a string into a line of default-colored cells
    pub fn line_from_str(s: &str) -> Line {
        s.chars()
            .map(|c| Cell::from_char(c, DEFAULT_TEXT_COLOR))
            .collect()
    }

    /// Join lines of cells into a newline separated string
    pub fn text_of(lines: &[Line]) -> String {
        let mut out = String::new();
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(line.iter().map(Cell::glyph));
        }
        out
    }

    /// The whole document as a newline separated string
    pub fn text(&self) -> String {
        Self::text_of(&self.lines)
    }

    /// Every codepoint in the document, each line terminated by [`EOL`]
    pub fn codepoints(&self) -> Vec<u32> {
        self.lines
            .iter()
            .flat_map(|line| line.iter().map(|c| c.codepoint).chain(std::iter::once(EOL)))
            .collect()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, line: usize) -> Option<&Line> {
        self.lines.get(line)
    }

    /// Number of cells on `line`, or `None` past the end of the document
    pub fn line_len(&self, line: usize) -> Option<usize> {
        self.lines.get(line).map(Vec::len)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Overwrite the color of every cell covered by `span`, clipped to the line.
    /// Spans past the last line are ignored.
    pub fn recolor(&mut self, span: LineSpan, color: u8) {
        let Some(line) = self.lines.get_mut(span.line) else {
            return;
        };
        let (start, end) = span.clip(line.len());
        for cell in &mut line[start..end] {
            cell.color = color;
        }
    }

    pub(crate) fn lines_mut(&mut self) -> &mut Vec<Line> {
        &mut self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_one_empty_line() {
        let doc = Document::new();
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.line_len(0), Some(0));
        assert_eq!(doc.text(), "");
    }

    #[test]
    fn test_from_text() {
        let doc = Document::from_text("Hello\nWorld");
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.line_len(1), Some(5));
        assert_eq!(doc.text(), "Hello\nWorld");
        assert!(doc.lines()[0].iter().all(|c| c.color == DEFAULT_TEXT_COLOR));
    }

    #[test]
    fn test_from_text_trailing_newline() {
        let doc = Document::from_text("a\n");
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.text(), "a\n");
    }

    #[test]
    fn test_from_empty_lines() {
        let doc = Document::from_lines(Vec::new());
        assert_eq!(doc.line_count(), 1);
    }

    #[test]
    fn test_codepoints() {
        let doc = Document::from_text("ab\nc");
        assert_eq!(doc.codepoints(), vec![97, 98, EOL, 99, EOL]);
        assert_eq!(Document::new().codepoints(), vec![EOL]);
    }

    #[test]
    fn test_unicode() {
        let doc = Document::from_text("héllo");
        assert_eq!(doc.line_len(0), Some(5));
        assert_eq!(doc.text(), "héllo");
    }

    #[test]
    fn test_recolor_clips() {
        let mut doc = Document::from_text("abc");
        doc.recolor(LineSpan::new(0, 1, Some(10)), 5);
        let colors: Vec<u8> = doc.lines()[0].iter().map(|c| c.color).collect();
        assert_eq!(colors, vec![1, 5, 5]);

        doc.recolor(LineSpan::new(3, 0, None), 7);
        assert_eq!(doc.line_count(), 1);
    }

    #[test]
    fn test_position_order() {
        assert!(Position::new(9, 0) < Position::new(0, 1));
        assert!(Position::new(2, 1) < Position::new(3, 1));
    }
}
