//! Input events and the navigation key table

use std::ops::BitOr;

/// Keys the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    Enter,
    Backspace,
}

/// Modifier bit set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1);
    pub const CTRL: Self = Self(2);
    pub const ALT: Self = Self(4);
    pub const SUPER: Self = Self(8);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Shift extends the selection while moving
    pub const fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }

    /// Ctrl or Super: word/document motions and editing shortcuts
    pub const fn command(self) -> bool {
        self.0 & (Self::CTRL.0 | Self::SUPER.0) != 0
    }
}

impl BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Everything the editor consumes, one event at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    TextInput(String),
    KeyPress { key: Key, modifiers: Modifiers },
    /// Positive scrolls towards the top of the document
    Scroll(isize),
    /// Grid coordinates
    PointerClick { x: isize, y: isize },
    /// Grid coordinates; `buttons` is a bit set of held buttons
    PointerDrag { x: isize, y: isize, buttons: u8 },
}

/// Where a navigation key sends the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    WordLeft,
    WordRight,
    LineStart,
    LineEnd,
    Up,
    Down,
    PageUp,
    PageDown,
    DocumentStart,
    DocumentEnd,
}

/// `(key, command modifier held, motion)`
const MOTIONS: &[(Key, bool, Motion)] = &[
    (Key::Left, false, Motion::Left),
    (Key::Right, false, Motion::Right),
    (Key::Left, true, Motion::WordLeft),
    (Key::Right, true, Motion::WordRight),
    (Key::Home, false, Motion::LineStart),
    (Key::End, false, Motion::LineEnd),
    (Key::Up, false, Motion::Up),
    (Key::Down, false, Motion::Down),
    (Key::PageUp, false, Motion::PageUp),
    (Key::PageDown, false, Motion::PageDown),
    (Key::Up, true, Motion::DocumentStart),
    (Key::Down, true, Motion::DocumentEnd),
];

/// Look up the motion bound to `key`. Shift is ignored here; it only decides
/// whether the motion drags a selection.
pub fn motion_for(key: Key, modifiers: Modifiers) -> Option<Motion> {
    let command = modifiers.command();
    MOTIONS
        .iter()
        .find(|(k, c, _)| *k == key && *c == command)
        .map(|(_, _, motion)| *motion)
}
