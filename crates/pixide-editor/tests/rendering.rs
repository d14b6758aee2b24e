use pixide_core::Position;
use pixide_editor::{
    Color, DisplayGrid, HighlightOracle, HighlightSpan, TextEditor, DEFAULT_PALETTE,
};
use pretty_assertions::assert_eq;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tile {
    glyph: char,
    fg: Color,
    bg: Color,
}

/// Keeps every tile and counts redraws
struct RecordingGrid {
    cols: usize,
    rows: usize,
    tiles: Vec<Tile>,
    clears: usize,
    cursor: Option<((isize, isize), bool)>,
}

impl RecordingGrid {
    fn new(cols: usize, rows: usize) -> Self {
        let blank = Tile {
            glyph: ' ',
            fg: 0,
            bg: 0,
        };
        Self {
            cols,
            rows,
            tiles: vec![blank; cols * rows],
            clears: 0,
            cursor: None,
        }
    }

    fn tile(&self, x: usize, y: usize) -> Tile {
        self.tiles[y * self.cols + x]
    }

    fn row(&self, y: usize) -> String {
        (0..self.cols).map(|x| self.tile(x, y).glyph).collect()
    }
}

impl DisplayGrid for RecordingGrid {
    fn grid_size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    fn clear(&mut self, fg: Color, bg: Color) {
        self.tiles.fill(Tile { glyph: ' ', fg, bg });
        self.clears += 1;
    }

    fn set_cell(&mut self, x: usize, y: usize, glyph: char, fg: Color, bg: Color) {
        if x < self.cols && y < self.rows {
            self.tiles[y * self.cols + x] = Tile { glyph, fg, bg };
        }
    }

    fn set_cursor(&mut self, pos: (isize, isize), visible: bool) {
        self.cursor = Some((pos, visible));
    }
}

struct KeywordOracle;

impl HighlightOracle for KeywordOracle {
    fn highlights(&mut self, codepoints: &[u32]) -> Vec<HighlightSpan> {
        // "let" at the start of the first line
        let text: String = codepoints.iter().filter_map(|&c| char::from_u32(c)).collect();
        if text.starts_with("let") {
            vec![HighlightSpan {
                col_start: 0,
                row_start: 0,
                col_end: 3,
                row_end: 0,
                color: 2,
            }]
        } else {
            Vec::new()
        }
    }
}

fn editor(text: &str, cols: usize, rows: usize) -> TextEditor {
    let mut edit = TextEditor::new(cols, rows);
    edit.set_text(text);
    edit
}

#[test]
fn test_render_text_and_cursor() {
    let mut edit = editor("fn main\n  x", 10, 3);
    let mut grid = RecordingGrid::new(10, 3);
    edit.goto(2, 1);
    edit.render(&mut grid);

    assert_eq!(grid.row(0), "fn main   ");
    assert_eq!(grid.row(1), "  x       ");
    assert_eq!(grid.row(2), "          ");
    assert_eq!(grid.cursor, Some(((2, 1), true)));
    assert_eq!(
        grid.tile(0, 0),
        Tile {
            glyph: 'f',
            fg: DEFAULT_PALETTE[1],
            bg: DEFAULT_PALETTE[0],
        }
    );
}

#[test]
fn test_render_only_when_dirty() {
    let mut edit = editor("abc", 10, 3);
    let mut grid = RecordingGrid::new(10, 3);
    edit.render(&mut grid);
    edit.render(&mut grid);
    assert_eq!(grid.clears, 1);

    // Cursor moves alone do not redraw text
    edit.goto(1, 0);
    edit.render(&mut grid);
    assert_eq!(grid.clears, 1);
    assert_eq!(grid.cursor, Some(((1, 0), true)));

    edit.type_text("x").unwrap();
    edit.render(&mut grid);
    assert_eq!(grid.clears, 2);
    assert_eq!(grid.row(0), "axbc      ");
}

#[test]
fn test_render_selection_colors() {
    let mut edit = editor("abcd", 10, 2);
    let mut grid = RecordingGrid::new(10, 2);
    edit.select(Position::new(1, 0), Position::new(3, 0));
    edit.render(&mut grid);

    let selected = (0xFFFFFF, 0x3A6EA5);
    let colors: Vec<(Color, Color)> = (0..4)
        .map(|x| {
            let tile = grid.tile(x, 0);
            (tile.fg, tile.bg)
        })
        .collect();
    let plain = (DEFAULT_PALETTE[1], DEFAULT_PALETTE[0]);
    assert_eq!(colors, vec![plain, selected, selected, plain]);

    edit.deselect();
    edit.render(&mut grid);
    assert_eq!(grid.tile(1, 0).bg, DEFAULT_PALETTE[0]);
}

#[test]
fn test_horizontal_scroll_crops() {
    let mut edit = editor("0123456789abcdef", 8, 2);
    let mut grid = RecordingGrid::new(8, 2);
    edit.goto(12, 0);
    edit.render(&mut grid);

    assert_eq!(edit.viewer().hscroll(), 6);
    assert_eq!(grid.row(0), "$789abc$");
    assert_eq!(grid.cursor, Some(((6, 0), true)));
}

#[test]
fn test_rehighlight_colors_cells() {
    let mut edit = editor("let x = 1", 12, 2);
    let mut grid = RecordingGrid::new(12, 2);
    edit.rehighlight(&mut KeywordOracle);
    edit.render(&mut grid);

    assert_eq!(grid.tile(0, 0).fg, DEFAULT_PALETTE[2]);
    assert_eq!(grid.tile(2, 0).fg, DEFAULT_PALETTE[2]);
    assert_eq!(grid.tile(4, 0).fg, DEFAULT_PALETTE[1]);
}

#[test]
fn test_cursor_hidden_when_disabled() {
    let mut edit = editor("abc", 10, 2);
    let mut grid = RecordingGrid::new(10, 2);
    edit.viewer_mut().set_show_cursor(false);
    edit.render(&mut grid);
    assert_eq!(grid.cursor, Some(((0, 0), false)));
}

#[test]
fn test_drag_past_line_end_selects_once() {
    let mut edit = editor("abc\nde", 10, 3);
    let mut grid = RecordingGrid::new(10, 3);
    edit.render(&mut grid);
    edit.click(1, 0);
    edit.drag(30, 1, 1);
    assert_eq!(edit.selection().map(|s| s.end()), Some(Position::new(2, 1)));
    edit.render(&mut grid);
    assert_eq!(grid.clears, 2);

    // Further moves past the same line end change nothing
    edit.drag(40, 1, 1);
    edit.render(&mut grid);
    assert_eq!(grid.clears, 2);
    assert_eq!(edit.selection().map(|s| s.start()), Some(Position::new(1, 0)));
}
