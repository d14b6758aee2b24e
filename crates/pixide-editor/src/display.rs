//! Interfaces to the collaborators around the editor: the tile grid it draws
//! into and the system clipboard.

/// A 24-bit `0xRRGGBB` color
pub type Color = u32;

/// A fixed-size character grid. The text viewer is its only writer.
pub trait DisplayGrid {
    /// Size in cells as `(cols, rows)`
    fn grid_size(&self) -> (usize, usize);

    /// Fill the whole grid with blanks in the given colors
    fn clear(&mut self, fg: Color, bg: Color);

    /// Write one cell. Writes outside the grid are ignored.
    fn set_cell(&mut self, x: usize, y: usize, glyph: char, fg: Color, bg: Color);

    /// Place the text cursor at grid coordinates; `visible == false` hides it
    fn set_cursor(&mut self, pos: (isize, isize), visible: bool);
}

pub trait Clipboard {
    fn get_text(&mut self) -> String;
    fn set_text(&mut self, text: String);
}

/// A process-local clipboard
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: String,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
    }
}
