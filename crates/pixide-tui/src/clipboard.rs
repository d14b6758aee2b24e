//! System clipboard
//!
//! Falls back to a process-local buffer when no system clipboard is reachable
//! (headless sessions, SSH).

use pixide_editor::{Clipboard, MemoryClipboard};

pub enum SystemClipboard {
    System(arboard::Clipboard),
    Local(MemoryClipboard),
}

impl SystemClipboard {
    pub fn new() -> Self {
        match arboard::Clipboard::new() {
            Ok(clipboard) => Self::System(clipboard),
            Err(err) => {
                tracing::warn!(%err, "system clipboard unavailable, using local buffer");
                Self::Local(MemoryClipboard::new())
            }
        }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for SystemClipboard {
    fn get_text(&mut self) -> String {
        match self {
            Self::System(clipboard) => clipboard.get_text().unwrap_or_else(|err| {
                tracing::warn!(%err, "clipboard read failed");
                String::new()
            }),
            Self::Local(clipboard) => clipboard.get_text(),
        }
    }

    fn set_text(&mut self, text: String) {
        match self {
            Self::System(clipboard) => {
                if let Err(err) = clipboard.set_text(text) {
                    tracing::warn!(%err, "clipboard write failed");
                }
            }
            Self::Local(clipboard) => clipboard.set_text(text),
        }
    }
}
