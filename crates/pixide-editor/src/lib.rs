//! Viewport rendering and interactive editing on top of `pixide-core`.

pub mod config;
pub mod display;
pub mod editor;
pub mod highlight;
pub mod input;
pub mod viewer;

pub use config::{EditorConfig, DEFAULT_PALETTE};
pub use display::{Clipboard, Color, DisplayGrid, MemoryClipboard};
pub use editor::TextEditor;
pub use highlight::{spans_to_ranges, HighlightOracle, HighlightSpan};
pub use input::{motion_for, InputEvent, Key, Modifiers, Motion};
pub use viewer::{TextViewer, CROP_MARKER, PALETTE_SIZE, SELECTION_COLOR};
