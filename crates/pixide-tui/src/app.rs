//! Application state: the editor, the file it edits, and the terminal grid

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use pixide_editor::{Clipboard, EditorConfig, InputEvent, Key, Modifiers, TextEditor};

use crate::grid::TerminalGrid;

/// Rows above the editor area
pub const HEADER_HEIGHT: u16 = 1;

pub struct App {
    pub editor: TextEditor,
    pub grid: TerminalGrid,
    pub path: Option<PathBuf>,
    pub clipboard: Box<dyn Clipboard>,
    pub status_message: Option<String>,
    pub status_start: Option<Instant>,
    pub should_quit: bool,
}

/// Read the editor configuration. A missing file means defaults.
pub fn load_config(path: &Path) -> Result<EditorConfig> {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(EditorConfig::default()),
        Err(err) => Err(err).with_context(|| format!("cannot read {}", path.display())),
    }
}

impl App {
    pub fn new(
        path: Option<PathBuf>,
        config: EditorConfig,
        clipboard: Box<dyn Clipboard>,
        cols: u16,
        rows: u16,
    ) -> Self {
        let (cols, rows) = (cols as usize, rows.saturating_sub(HEADER_HEIGHT) as usize);
        let mut app = Self {
            editor: TextEditor::with_config(config, cols, rows),
            grid: TerminalGrid::new(cols, rows),
            path,
            clipboard,
            status_message: None,
            status_start: None,
            should_quit: false,
        };
        if let Some(p) = &app.path {
            if p.exists() {
                if let Err(e) = app.load() {
                    tracing::error!(error = %e, "failed to load file");
                    app.set_status(&format!("Failed to load: {e}"));
                }
            }
        }
        app
    }

    /// Load the document from the file
    pub fn load(&mut self) -> io::Result<()> {
        if let Some(path) = &self.path {
            let content = fs::read_to_string(path)?;
            // One trailing newline is the file terminator, not an empty line
            let text = content.strip_suffix('\n').unwrap_or(&content);
            self.editor.set_text(text);
            tracing::info!(path = %path.display(), "loaded");
        }
        Ok(())
    }

    /// Save the document to the file
    pub fn save(&mut self) -> io::Result<()> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut file = fs::File::create(path)?;
            writeln!(file, "{}", self.editor.text())?;
            self.editor.mark_saved();
            tracing::info!(path = %path.display(), "saved");
        }
        Ok(())
    }

    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some(msg.to_string());
        self.status_start = Some(Instant::now());
    }

    /// "Saved" expires after 1.5s, others after 3s
    pub fn clear_status_if_expired(&mut self) {
        if let (Some(start), Some(msg)) = (self.status_start, &self.status_message) {
            let timeout_ms = if msg == "Saved" { 1500 } else { 3000 };
            if start.elapsed().as_millis() >= timeout_ms {
                self.status_message = None;
                self.status_start = None;
            }
        }
    }

    /// Terminal size changed; the header keeps its row
    pub fn resize(&mut self, cols: u16, rows: u16) {
        let (cols, rows) = (cols as usize, rows.saturating_sub(HEADER_HEIGHT) as usize);
        self.grid.resize(cols, rows);
        self.editor.resize(cols, rows);
        self.editor.viewer_mut().mark_dirty();
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    match key.code {
                        KeyCode::Char('q') => {
                            self.should_quit = true;
                            return;
                        }
                        KeyCode::Char('s') => {
                            match self.save() {
                                Ok(()) => self.set_status("Saved"),
                                Err(e) => {
                                    tracing::error!(error = %e, "save failed");
                                    self.set_status(&format!("Error saving: {e}"));
                                }
                            }
                            return;
                        }
                        _ => {}
                    }
                }
                if let Some(input) = translate_key(key) {
                    self.dispatch(input);
                }
            }
            Event::Mouse(mouse) => {
                if let Some(input) = translate_mouse(mouse) {
                    self.dispatch(input);
                }
            }
            Event::Paste(text) => self.dispatch(InputEvent::TextInput(text)),
            Event::Resize(cols, rows) => self.resize(cols, rows),
            _ => {}
        }
    }

    fn dispatch(&mut self, input: InputEvent) {
        if let Err(e) = self.editor.handle_event(input, self.clipboard.as_mut()) {
            self.set_status(&format!("Edit failed: {e}"));
        }
    }
}

fn modifiers(mods: KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if mods.contains(KeyModifiers::SHIFT) {
        out = out | Modifiers::SHIFT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        out = out | Modifiers::CTRL;
    }
    if mods.contains(KeyModifiers::ALT) {
        out = out | Modifiers::ALT;
    }
    if mods.contains(KeyModifiers::SUPER) {
        out = out | Modifiers::SUPER;
    }
    out
}

/// Map a terminal key to an editor event. Plain characters become text input;
/// characters with Ctrl or Super held are shortcuts.
pub fn translate_key(key: KeyEvent) -> Option<InputEvent> {
    let mods = modifiers(key.modifiers);
    let key = match key.code {
        KeyCode::Char(c) if !mods.command() => return Some(InputEvent::TextInput(c.to_string())),
        KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => {
            return Some(InputEvent::KeyPress {
                key: Key::Tab,
                modifiers: mods | Modifiers::SHIFT,
            })
        }
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        _ => return None,
    };
    Some(InputEvent::KeyPress {
        key,
        modifiers: mods,
    })
}

/// Map a mouse event to editor grid coordinates below the header
pub fn translate_mouse(mouse: MouseEvent) -> Option<InputEvent> {
    let x = mouse.column as isize;
    let y = mouse.row as isize - HEADER_HEIGHT as isize;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::PointerClick { x, y }),
        MouseEventKind::Drag(MouseButton::Left) => {
            Some(InputEvent::PointerDrag { x, y, buttons: 1 })
        }
        MouseEventKind::Up(MouseButton::Left) => {
            Some(InputEvent::PointerDrag { x, y, buttons: 0 })
        }
        MouseEventKind::ScrollUp => Some(InputEvent::Scroll(1)),
        MouseEventKind::ScrollDown => Some(InputEvent::Scroll(-1)),
        _ => None,
    }
}
