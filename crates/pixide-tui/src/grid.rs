//! Display grid backed by a ratatui buffer

use pixide_editor::{Color as Rgb, DisplayGrid};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub glyph: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Tile {
    const fn blank(fg: Rgb, bg: Rgb) -> Self {
        Self { glyph: ' ', fg, bg }
    }
}

/// Tiles the editor drew, kept between frames so a clean viewer can skip
/// redrawing.
#[derive(Debug, Clone)]
pub struct TerminalGrid {
    cols: usize,
    rows: usize,
    tiles: Vec<Tile>,
    cursor: Option<(u16, u16)>,
}

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

impl TerminalGrid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            tiles: vec![Tile::blank(0xFFFFFF, 0); cols * rows],
            cursor: None,
        }
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        if (cols, rows) != (self.cols, self.rows) {
            *self = Self::new(cols, rows);
        }
    }

    pub fn tile(&self, x: usize, y: usize) -> Option<Tile> {
        if x < self.cols && y < self.rows {
            Some(self.tiles[y * self.cols + x])
        } else {
            None
        }
    }

    /// Visible cursor position in grid cells
    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }
}

impl DisplayGrid for TerminalGrid {
    fn grid_size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    fn clear(&mut self, fg: Rgb, bg: Rgb) {
        self.tiles.fill(Tile::blank(fg, bg));
    }

    fn set_cell(&mut self, x: usize, y: usize, glyph: char, fg: Rgb, bg: Rgb) {
        if x < self.cols && y < self.rows {
            self.tiles[y * self.cols + x] = Tile { glyph, fg, bg };
        }
    }

    fn set_cursor(&mut self, pos: (isize, isize), visible: bool) {
        let (x, y) = pos;
        let inside = x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.rows;
        self.cursor = (visible && inside).then(|| (x as u16, y as u16));
    }
}

impl Widget for &TerminalGrid {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cols = self.cols.min(area.width as usize);
        let rows = self.rows.min(area.height as usize);
        for y in 0..rows {
            for x in 0..cols {
                let tile = self.tiles[y * self.cols + x];
                let style = Style::new().fg(to_color(tile.fg)).bg(to_color(tile.bg));
                if let Some(cell) = buf.cell_mut((area.x + x as u16, area.y + y as u16)) {
                    cell.set_char(tile.glyph).set_style(style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_to_color() {
        assert_eq!(to_color(0x3A6EA5), Color::Rgb(0x3A, 0x6E, 0xA5));
    }

    #[test]
    fn test_cursor_outside_grid_is_hidden() {
        let mut grid = TerminalGrid::new(4, 2);
        grid.set_cursor((1, 1), true);
        assert_eq!(grid.cursor(), Some((1, 1)));
        grid.set_cursor((4, 0), true);
        assert_eq!(grid.cursor(), None);
        grid.set_cursor((1, 1), false);
        assert_eq!(grid.cursor(), None);
    }

    #[test]
    fn test_render_into_buffer() {
        let mut grid = TerminalGrid::new(3, 1);
        grid.clear(0xFFFFFF, 0x000000);
        grid.set_cell(1, 0, 'x', 0xFF0000, 0x000000);
        let area = Rect::new(0, 0, 3, 1);
        let mut buf = Buffer::empty(area);
        (&grid).render(area, &mut buf);
        assert_eq!(buf[(1u16, 0u16)].symbol(), "x");
        assert_eq!(buf[(1u16, 0u16)].fg, Color::Rgb(0xFF, 0, 0));
    }
}
