//! Editor settings
//!
//! Loaded by the front end from a JSON file; every field has a default so a
//! partial file is fine.

use serde::{Deserialize, Serialize};

use crate::display::Color;

/// Default palette: background, default text, then highlight colors
pub const DEFAULT_PALETTE: [Color; 10] = [
    0x2A2A2E, // background
    0xB1B1B3, // gray text
    0xB98EFF, // purple
    0xFF7DE9, // pink
    0xFFFFB4, // yellow
    0xE9F4FE, // white
    0x86DE74, // green
    0x75BFFF, // light blue
    0x6B89FF, // dark blue
    0xFF2020, // red
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Columns inserted or removed by Tab / Shift-Tab
    pub indent_size: usize,
    /// Lines scrolled per scroll-wheel notch
    pub scroll_lines: isize,
    pub show_cursor: bool,
    /// Slot 0 is the background, slot 1 the default text color
    pub palette: Vec<Color>,
    pub selection_fg: Color,
    pub selection_bg: Color,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            indent_size: 4,
            scroll_lines: 3,
            show_cursor: true,
            palette: DEFAULT_PALETTE.to_vec(),
            selection_fg: 0xFFFFFF,
            selection_bg: 0x3A6EA5,
        }
    }
}
