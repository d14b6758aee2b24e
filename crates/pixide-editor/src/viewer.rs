//! Read-only projection of a document onto a display grid
//!
//! The viewer owns scroll offsets, the palette and a dirty flag. It borrows
//! the document for each call and redraws the grid only when the text, the
//! highlighting or the scroll position changed since the last render.

use pixide_core::{Document, Position, TextRange, DEFAULT_TEXT_COLOR};

use crate::config::EditorConfig;
use crate::display::{Color, DisplayGrid};

pub const PALETTE_SIZE: usize = 128;

/// Palette slot reserved for selected text
pub const SELECTION_COLOR: usize = 100;

/// Drawn at the row edge when text is cut off by horizontal scrolling
pub const CROP_MARKER: char = '$';
const CROP_MARKER_FG: Color = 0xFF5555;
const CROP_MARKER_BG: Color = 0x000000;

#[derive(Debug, Clone)]
pub struct TextViewer {
    palette: [(Color, Color); PALETTE_SIZE],
    fg_color: Color,
    bg_color: Color,
    vscroll: usize,
    hscroll: usize,
    cols: usize,
    rows: usize,
    dirty: bool,
    /// `(vscroll, hscroll, horizontally scrolled line)` of the last redraw
    last_scroll: Option<(usize, usize, Option<usize>)>,
    show_cursor: bool,
}

impl TextViewer {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self::with_config(cols, rows, &EditorConfig::default())
    }

    pub fn with_config(cols: usize, rows: usize, config: &EditorConfig) -> Self {
        let mut viewer = Self {
            palette: [(0, 0); PALETTE_SIZE],
            fg_color: 0,
            bg_color: 0,
            vscroll: 0,
            hscroll: 0,
            cols,
            rows,
            dirty: true,
            last_scroll: None,
            show_cursor: config.show_cursor,
        };
        viewer.palette[SELECTION_COLOR] = (config.selection_fg, config.selection_bg);
        viewer.set_palette(&config.palette);
        viewer
    }

    /// Set the palette. Slot 0 is the background, slot 1 default text; every
    /// slot is drawn on the background color.
    pub fn set_palette(&mut self, colors: &[Color]) {
        if let Some(&bg) = colors.first() {
            self.bg_color = bg;
        }
        if let Some(&fg) = colors.get(1) {
            self.fg_color = fg;
        }
        for (slot, &color) in self.palette.iter_mut().zip(colors) {
            *slot = (color, self.bg_color);
        }
        self.dirty = true;
    }

    /// Colors used to clear the grid
    pub fn set_color(&mut self, fg: Color, bg: Color) {
        self.fg_color = fg;
        self.bg_color = bg;
        self.dirty = true;
    }

    pub fn palette(&self, slot: usize) -> Option<(Color, Color)> {
        self.palette.get(slot).copied()
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        if (cols, rows) != (self.cols, self.rows) {
            self.cols = cols;
            self.rows = rows;
            self.dirty = true;
        }
    }

    /// Viewport size as `(cols, rows)`
    pub fn size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn vscroll(&self) -> usize {
        self.vscroll
    }

    pub fn hscroll(&self) -> usize {
        self.hscroll
    }

    pub fn set_scroll(&mut self, vscroll: usize, hscroll: usize) {
        self.vscroll = vscroll;
        self.hscroll = hscroll;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn set_show_cursor(&mut self, show: bool) {
        self.show_cursor = show;
    }

    /// Scroll the view by `delta` lines; positive moves towards the top.
    pub fn scroll_screen(&mut self, delta: isize, line_count: usize) {
        let max = line_count.saturating_sub(self.rows.saturating_sub(1));
        let target = self.vscroll as isize - delta;
        self.vscroll = target.clamp(0, max as isize) as usize;
    }

    /// Bake range colors into the document. Each range's tag is its palette
    /// slot; a negative tag means default text.
    pub fn highlight(&mut self, doc: &mut Document, ranges: &[TextRange]) {
        for range in ranges {
            let color = u8::try_from(range.tag()).unwrap_or(DEFAULT_TEXT_COLOR);
            for span in range.lines() {
                if span.line >= doc.line_count() {
                    break;
                }
                doc.recolor(span, color);
            }
        }
        self.dirty = true;
    }

    /// Draw `doc` into `grid` if anything changed, then place the cursor.
    ///
    /// Horizontal scroll only shifts the cursor's line; the other lines start
    /// at column 0. Without a cursor every line is shifted.
    pub fn render(
        &mut self,
        doc: &Document,
        grid: &mut dyn DisplayGrid,
        selection: Option<&TextRange>,
        cursor: Option<Position>,
    ) {
        let scrolled_line = cursor.filter(|_| self.hscroll > 0).map(|c| c.line);
        let scroll = (self.vscroll, self.hscroll, scrolled_line);
        if self.last_scroll != Some(scroll) {
            self.last_scroll = Some(scroll);
            self.dirty = true;
        }

        if self.dirty {
            self.draw_text(doc, grid, selection, cursor.map(|c| c.line));
        }

        if let Some(cursor) = cursor {
            let visible = cursor.line >= self.vscroll && cursor.line <= self.vscroll + self.rows;
            let pos = (
                cursor.col - self.hscroll as isize,
                cursor.line as isize - self.vscroll as isize,
            );
            grid.set_cursor(pos, visible && self.show_cursor);
        }
    }

    fn draw_text(
        &mut self,
        doc: &Document,
        grid: &mut dyn DisplayGrid,
        selection: Option<&TextRange>,
        cursor_line: Option<usize>,
    ) {
        self.dirty = false;
        grid.clear(self.fg_color, self.bg_color);
        if self.cols == 0 || self.rows == 0 {
            return;
        }
        tracing::trace!(vscroll = self.vscroll, hscroll = self.hscroll, "redraw");

        let last_col = self.cols as isize - 1;
        for y in 0..self.rows {
            let line_no = y + self.vscroll;
            let Some(line) = doc.line(line_no) else {
                break;
            };
            let hscroll = match cursor_line {
                Some(l) if l != line_no => 0,
                _ => self.hscroll as isize,
            };
            let mut left_cropped = false;
            let mut right_cropped = false;

            for (col, cell) in line.iter().enumerate() {
                let x = col as isize - hscroll;
                if x < 0 {
                    left_cropped |= !cell.is_blank();
                } else if x >= last_col {
                    if !cell.is_blank() {
                        right_cropped = true;
                        break;
                    }
                } else {
                    let selected = selection
                        .is_some_and(|s| s.contains(Position::new(col as isize, line_no)));
                    let (fg, bg) = if selected {
                        self.palette[SELECTION_COLOR]
                    } else {
                        self.palette
                            .get(usize::from(cell.color))
                            .copied()
                            .unwrap_or((self.fg_color, self.bg_color))
                    };
                    grid.set_cell(x as usize, y, cell.glyph(), fg, bg);
                }
            }

            if left_cropped {
                grid.set_cell(0, y, CROP_MARKER, CROP_MARKER_FG, CROP_MARKER_BG);
            }
            if right_cropped {
                grid.set_cell(self.cols - 1, y, CROP_MARKER, CROP_MARKER_FG, CROP_MARKER_BG);
            }
        }
    }
}
