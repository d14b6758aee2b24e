//! Interactive text editor
//!
//! Turns input events into edit commands, applies them through the command
//! stack, and keeps the cursor, the selection and the viewport in step.

use pixide_core::{
    Cell, CommandStack, Document, EditCommand, EditError, Line, Position, TextRange,
};

use crate::config::EditorConfig;
use crate::display::{Clipboard, DisplayGrid};
use crate::highlight::{spans_to_ranges, HighlightOracle};
use crate::input::{motion_for, InputEvent, Key, Modifiers, Motion};
use crate::viewer::TextViewer;

/// A text editor over a single document
#[derive(Debug, Clone)]
pub struct TextEditor {
    doc: Document,
    viewer: TextViewer,
    stack: CommandStack,
    config: EditorConfig,
    cursor: Position,
    /// Column to return to when vertical motion passes through shorter lines
    preserved_col: Option<isize>,
    selection: Option<TextRange>,
    /// Where a shift-motion selection started
    anchor: Option<Position>,
    last_clicked: Option<Position>,
    yank_buffer: Line,
    modified: bool,
}

impl TextEditor {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self::with_config(EditorConfig::default(), cols, rows)
    }

    pub fn with_config(config: EditorConfig, cols: usize, rows: usize) -> Self {
        Self {
            doc: Document::new(),
            viewer: TextViewer::with_config(cols, rows, &config),
            stack: CommandStack::new(),
            config,
            cursor: Position::default(),
            preserved_col: None,
            selection: None,
            anchor: None,
            last_clicked: None,
            yank_buffer: Line::new(),
            modified: false,
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn text(&self) -> String {
        self.doc.text()
    }

    /// Replace the whole document. History is dropped since it no longer
    /// refers to this text.
    pub fn set_text(&mut self, text: &str) {
        self.doc = Document::from_text(text);
        self.stack.clear();
        self.cursor = Position::default();
        self.preserved_col = None;
        self.selection = None;
        self.anchor = None;
        self.last_clicked = None;
        self.modified = false;
        self.viewer.set_scroll(0, 0);
        self.viewer.mark_dirty();
        tracing::debug!(lines = self.doc.line_count(), "text loaded");
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn selection(&self) -> Option<&TextRange> {
        self.selection.as_ref()
    }

    pub fn viewer(&self) -> &TextViewer {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut TextViewer {
        &mut self.viewer
    }

    pub fn history(&self) -> &CommandStack {
        &self.stack
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn yank_buffer(&self) -> &Line {
        &self.yank_buffer
    }

    /// True if the document changed since it was loaded or last saved
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.viewer.resize(cols, rows);
        self.wrap_cursor();
    }

    fn line_len(&self, line: usize) -> usize {
        self.doc.line_len(line).unwrap_or(0)
    }

    fn current_line(&self) -> &[Cell] {
        self.doc.line(self.cursor.line).map_or(&[][..], Vec::as_slice)
    }

    /// The cursor column clamped into the current line
    fn cursor_col(&self) -> usize {
        (self.cursor.col.max(0) as usize).min(self.current_line().len())
    }

    fn clamp_to_document(&self, pos: Position) -> Position {
        let line = pos.line.min(self.doc.line_count() - 1);
        let col = pos.col.clamp(0, self.line_len(line) as isize);
        Position::new(col, line)
    }

    /// Select from `a` to `b`, clamped to the document
    pub fn select(&mut self, a: Position, b: Position) {
        let range = TextRange::new(self.clamp_to_document(a), self.clamp_to_document(b));
        if self.selection != Some(range) {
            self.selection = Some(range);
            self.viewer.mark_dirty();
        }
    }

    pub fn deselect(&mut self) {
        if self.selection.take().is_some() {
            self.viewer.mark_dirty();
        }
    }

    pub fn goto(&mut self, col: isize, line: usize) {
        self.cursor = Position::new(col, line);
        self.wrap_cursor();
    }

    /// Move to `line`, keeping the horizontal position where possible.
    /// Returns false if the cursor stayed on the same line.
    pub fn goto_line(&mut self, line: isize) -> bool {
        let last = self.doc.line_count() as isize - 1;
        let line = line.clamp(0, last) as usize;
        if self.cursor.line == line {
            return false;
        }
        self.cursor.line = line;
        if let Some(col) = self.preserved_col {
            self.cursor.col = col;
        }
        let clamped = self.cursor.col.clamp(0, self.line_len(line) as isize);
        if clamped != self.cursor.col {
            self.preserved_col = Some(self.cursor.col);
        }
        self.cursor.col = clamped;
        true
    }

    /// Start of the next word to the right of the cursor
    pub fn next_word(&self) -> usize {
        let line = self.current_line();
        let mut x = self.cursor_col();
        while x < line.len() && !line[x].is_blank() {
            x += 1;
        }
        while x < line.len() && line[x].is_blank() {
            x += 1;
        }
        x
    }

    /// Start of the word left of the cursor
    pub fn pre_word(&self) -> usize {
        let line = self.current_line();
        let mut x = self.cursor_col();
        while x > 0 && line[x - 1].is_blank() {
            x -= 1;
        }
        while x > 0 && !line[x - 1].is_blank() {
            x -= 1;
        }
        x
    }

    /// Number of leading spaces on `line`; a line of only spaces counts as 0
    pub fn leading_spaces(&self, line: usize) -> usize {
        let cells = self.doc.line(line).map_or(&[][..], Vec::as_slice);
        let n = cells.iter().take_while(|c| c.is_blank()).count();
        if n >= cells.len() {
            0
        } else {
            n
        }
    }

    /// Apply through the command stack without touching the selection
    fn execute(
        &mut self,
        cmd: EditCommand,
        join_with_previous: bool,
    ) -> Result<Option<Position>, EditError> {
        let pos = self
            .stack
            .apply(cmd, &mut self.doc, join_with_previous)
            .inspect_err(|err| tracing::warn!(%err, "edit rejected"))?;
        self.modified = true;
        self.viewer.mark_dirty();
        Ok(pos)
    }

    /// Apply an edit and drop the selection
    pub fn apply(
        &mut self,
        cmd: EditCommand,
        join_with_previous: bool,
    ) -> Result<Option<Position>, EditError> {
        let pos = self.execute(cmd, join_with_previous)?;
        self.deselect();
        Ok(pos)
    }

    pub fn undo(&mut self) -> Result<(), EditError> {
        if let Some(pos) = self.stack.undo(&mut self.doc)? {
            tracing::debug!(%pos, "undo");
            self.cursor = pos;
            self.modified = true;
            self.viewer.mark_dirty();
        }
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), EditError> {
        if let Some(pos) = self.stack.redo(&mut self.doc)? {
            tracing::debug!(%pos, "redo");
            self.cursor = pos;
            self.modified = true;
            self.viewer.mark_dirty();
        }
        Ok(())
    }

    /// Insert cells at the cursor and move the cursor past them
    pub fn insert(&mut self, cells: Line, join_with_previous: bool) -> Result<(), EditError> {
        let cmd = EditCommand::insert(self.cursor.line, self.cursor_col(), cells);
        if let Some(pos) = self.apply(cmd, join_with_previous)? {
            self.cursor = pos;
        }
        Ok(())
    }

    /// Delete `count` cells at the cursor
    pub fn remove(&mut self, count: usize) -> Result<(), EditError> {
        let cmd = EditCommand::delete(self.cursor.line, self.cursor_col(), count);
        self.apply(cmd, false)?;
        Ok(())
    }

    /// The selected text, one entry per line
    pub fn copy(&self) -> Vec<Line> {
        let Some(selection) = self.selection else {
            return Vec::new();
        };
        selection
            .lines()
            .filter_map(|span| {
                let line = self.doc.line(span.line)?;
                let (start, end) = span.clip(line.len());
                Some(line[start..end].to_vec())
            })
            .collect()
    }

    /// Delete the selection as one undo step and return the removed lines
    pub fn cut(&mut self) -> Result<Vec<Line>, EditError> {
        let Some(selection) = self.selection else {
            return Ok(Vec::new());
        };

        let mut removed = Vec::new();
        let mut commands = Vec::new();
        for span in selection.lines_reversed() {
            let Some(line) = self.doc.line(span.line) else {
                continue;
            };
            let (start, end) = span.clip(line.len());
            removed.push(line[start..end].to_vec());
            commands.push(EditCommand::delete(span.line, start, end - start));
        }
        let first = selection.start().line;
        for _ in 1..removed.len() {
            commands.push(EditCommand::join(first));
        }
        removed.reverse();

        self.apply(EditCommand::combined(commands), false)?;
        self.cursor = self.clamp_to_document(selection.start());
        self.anchor = None;
        tracing::debug!(lines = removed.len(), "cut");
        Ok(removed)
    }

    /// Insert `lines` at the cursor as one undo step; the cursor ends after
    /// the last pasted cell.
    pub fn paste(&mut self, lines: &[Line]) -> Result<(), EditError> {
        let Some(last) = lines.last() else {
            return Ok(());
        };
        let first_line = self.cursor.line;
        let mut col = self.cursor_col();
        let mut commands = Vec::with_capacity(lines.len() * 2);
        for (i, line) in lines.iter().enumerate() {
            commands.push(EditCommand::insert(first_line + i, col, line.clone()));
            if i + 1 < lines.len() {
                commands.push(EditCommand::split(first_line + i, col + line.len()));
                col = 0;
            }
        }

        self.apply(EditCommand::combined(commands), false)?;
        self.cursor = Position::new((col + last.len()) as isize, first_line + lines.len() - 1);
        tracing::debug!(lines = lines.len(), "paste");
        Ok(())
    }

    /// Indent (`shift > 0`) or outdent (`shift < 0`) the cursor line or every
    /// selected line, as one undo step. Outdent stops at the left edge.
    pub fn indent(&mut self, shift: isize) -> Result<(), EditError> {
        if shift == 0 {
            return Ok(());
        }
        let mut lines = vec![self.cursor.line];
        if let Some(selection) = self.selection {
            lines = selection.lines().map(|span| span.line).collect();
            // A selection ending at column 0 does not include that line
            if selection.end().col == 0 && lines.len() > 1 {
                lines.pop();
                let end_line = selection.end().line - 1;
                self.selection = Some(TextRange::new(
                    selection.start(),
                    Position::new(self.line_len(end_line) as isize, end_line),
                ));
            }
        }

        let mut applied = shift;
        let commands = if shift > 0 {
            let spaces = vec![Cell::space(); shift as usize];
            lines
                .iter()
                .map(|&line| EditCommand::insert(line, 0, spaces.clone()))
                .collect()
        } else {
            let mut commands = Vec::with_capacity(lines.len());
            for &line in &lines {
                let n = self.leading_spaces(line).min(shift.unsigned_abs());
                commands.push(EditCommand::delete(line, 0, n));
                applied = -(n as isize);
            }
            commands
        };

        self.execute(EditCommand::combined(commands), false)?;
        match self.selection {
            Some(selection) => {
                let start = selection.start().line;
                let end = selection.end().line;
                self.selection = Some(TextRange::new(
                    Position::new(0, start),
                    Position::new(self.line_len(end) as isize, end),
                ));
            }
            None => self.cursor.col = (self.cursor.col + applied).max(0),
        }
        Ok(())
    }

    /// Split the line at the cursor and carry its indentation to the new line
    pub fn newline(&mut self) -> Result<(), EditError> {
        let indent = self.leading_spaces(self.cursor.line);
        self.apply(
            EditCommand::split(self.cursor.line, self.cursor_col()),
            false,
        )?;
        self.goto_line(self.cursor.line as isize + 1);
        self.cursor.col = 0;
        if indent > 0 {
            self.insert(vec![Cell::space(); indent], true)?;
        }
        self.wrap_cursor();
        Ok(())
    }

    /// Delete left of the cursor, joining with the previous line at column 0
    pub fn backspace(&mut self) -> Result<(), EditError> {
        if self.selection.is_some() {
            self.cut()?;
        } else if self.cursor_col() > 0 {
            self.cursor.col = self.cursor_col() as isize - 1;
            self.remove(1)?;
        } else if self.cursor.line > 0 {
            if let Some(pos) = self.apply(EditCommand::join(self.cursor.line - 1), false)? {
                self.cursor = pos;
            }
        }
        Ok(())
    }

    /// Delete from the cursor to the end of the line
    pub fn kill_to_end_of_line(&mut self) -> Result<(), EditError> {
        let col = self.cursor_col();
        let count = self.current_line().len() - col;
        // Wrapped so the stack never folds it into a preceding backspace
        let delete = EditCommand::delete(self.cursor.line, col, count);
        self.apply(EditCommand::combined(vec![delete]), false)?;
        Ok(())
    }

    /// Remove the cursor line, keeping its contents in the yank buffer
    pub fn delete_line(&mut self) -> Result<(), EditError> {
        let line = self.cursor.line;
        self.yank_buffer = self.current_line().to_vec();
        let mut commands = vec![EditCommand::delete(line, 0, self.yank_buffer.len())];
        if line + 1 < self.doc.line_count() {
            commands.push(EditCommand::join(line));
        }
        self.apply(EditCommand::combined(commands), false)?;
        self.cursor.col = 0;
        self.wrap_cursor();
        Ok(())
    }

    /// Type text at the cursor, replacing any selection. Text with line
    /// breaks is pasted as separate lines.
    pub fn type_text(&mut self, text: &str) -> Result<(), EditError> {
        if self.selection.is_some() {
            self.cut()?;
        }
        self.anchor = None;
        if text.contains('\n') {
            self.paste(&split_lines(text))?;
        } else {
            self.insert(Document::line_from_str(text), false)?;
        }
        self.preserved_col = None;
        self.wrap_cursor();
        Ok(())
    }

    fn motion_target(&self, motion: Motion) -> (isize, isize) {
        let col = self.cursor.col;
        let line = self.cursor.line as isize;
        let rows = self.viewer.size().1 as isize;
        match motion {
            Motion::Left => (col - 1, line),
            Motion::Right => (col + 1, line),
            Motion::WordLeft => (self.pre_word() as isize, line),
            Motion::WordRight => (self.next_word() as isize, line),
            Motion::LineStart => (0, line),
            Motion::LineEnd => (self.current_line().len() as isize, line),
            Motion::Up => (col, line - 1),
            Motion::Down => (col, line + 1),
            Motion::PageUp => (col, line - rows),
            Motion::PageDown => (col, line + rows),
            Motion::DocumentStart => (col, 0),
            Motion::DocumentEnd => (col, self.doc.line_count() as isize),
        }
    }

    fn move_cursor(&mut self, motion: Motion, extend_selection: bool) {
        let (col, line) = self.motion_target(motion);
        let previous = self.cursor;
        if self.cursor.col != col {
            self.preserved_col = None;
            self.cursor.col = col;
        }
        if self.cursor.line as isize != line {
            self.goto_line(line);
        }
        self.wrap_cursor();
        if extend_selection {
            let anchor = *self.anchor.get_or_insert(previous);
            self.select(anchor, self.cursor);
        } else {
            self.deselect();
            self.anchor = None;
        }
    }

    pub fn handle_key(
        &mut self,
        key: Key,
        modifiers: Modifiers,
        clipboard: &mut dyn Clipboard,
    ) -> Result<(), EditError> {
        if let Some(motion) = motion_for(key, modifiers) {
            self.move_cursor(motion, modifiers.shift());
            return Ok(());
        }

        if modifiers.command() {
            match key {
                Key::Char('z') => self.undo()?,
                Key::Char('r') => self.redo()?,
                Key::Char('x') => {
                    let removed = self.cut()?;
                    clipboard.set_text(Document::text_of(&removed));
                }
                Key::Char('c') => clipboard.set_text(Document::text_of(&self.copy())),
                Key::Char('v') => {
                    let lines = split_lines(&clipboard.get_text());
                    if self.selection.is_some() {
                        self.cut()?;
                    }
                    self.paste(&lines)?;
                }
                Key::Char('k') => self.kill_to_end_of_line()?,
                Key::Char('d') => self.delete_line()?,
                _ => {}
            }
        } else {
            match key {
                Key::Tab => {
                    let size = self.config.indent_size as isize;
                    self.indent(if modifiers.shift() { -size } else { size })?;
                }
                Key::Enter => self.newline()?,
                Key::Backspace => self.backspace()?,
                _ => {}
            }
        }
        self.preserved_col = None;
        Ok(())
    }

    /// Move the cursor to a clicked grid cell
    pub fn click(&mut self, x: isize, y: isize) {
        if x < 0 || y < 0 {
            return;
        }
        self.preserved_col = None;
        self.anchor = None;
        self.deselect();
        let pos = Position::new(
            x + self.viewer.hscroll() as isize,
            y as usize + self.viewer.vscroll(),
        );
        self.last_clicked = Some(pos);
        self.cursor.col = pos.col;
        if self.cursor.line != pos.line {
            self.goto_line(pos.line as isize);
        }
        self.cursor.col = self.cursor.col.min(self.current_line().len() as isize);
    }

    /// Extend a selection from the last click while buttons are held
    pub fn drag(&mut self, x: isize, y: isize, buttons: u8) {
        let Some(anchor) = self.last_clicked.filter(|_| buttons != 0) else {
            self.last_clicked = None;
            return;
        };
        let pos = self.clamp_to_document(Position::new(
            x.max(0) + self.viewer.hscroll() as isize,
            y.max(0) as usize + self.viewer.vscroll(),
        ));
        if self.selection != Some(TextRange::new(self.clamp_to_document(anchor), pos)) {
            self.select(anchor, pos);
        }
    }

    pub fn handle_event(
        &mut self,
        event: InputEvent,
        clipboard: &mut dyn Clipboard,
    ) -> Result<(), EditError> {
        match event {
            InputEvent::TextInput(text) => self.type_text(&text)?,
            InputEvent::KeyPress { key, modifiers } => {
                self.handle_key(key, modifiers, clipboard)?;
                self.wrap_cursor();
            }
            InputEvent::Scroll(delta) => {
                let lines = self.doc.line_count();
                self.viewer
                    .scroll_screen(delta * self.config.scroll_lines, lines);
            }
            InputEvent::PointerClick { x, y } => self.click(x, y),
            InputEvent::PointerDrag { x, y, buttons } => self.drag(x, y, buttons),
        }
        Ok(())
    }

    /// Bring the cursor back inside the document and scroll it into view.
    ///
    /// A column left of 0 wraps to the end of the previous line, a column past
    /// the end wraps to the start of the next line.
    pub fn wrap_cursor(&mut self) {
        if self.cursor.col < 0 {
            if self.goto_line(self.cursor.line as isize - 1) {
                self.cursor.col = self.current_line().len() as isize;
                self.preserved_col = None;
            } else {
                self.cursor.col = 0;
            }
        }
        if self.cursor.col > self.current_line().len() as isize {
            if self.goto_line(self.cursor.line as isize + 1) {
                self.cursor.col = 0;
                self.preserved_col = None;
            } else {
                self.cursor.col = self.current_line().len() as isize;
            }
        }

        let (cols, rows) = self.viewer.size();
        let line = self.cursor.line;
        let mut vscroll = self.viewer.vscroll();
        if line < vscroll {
            vscroll = line;
        }
        let bottom = rows.saturating_sub(1);
        if line >= vscroll + bottom {
            vscroll = line.saturating_sub(bottom);
        }

        let edge = cols as isize - 2;
        let hscroll = if self.cursor.col > edge {
            (self.cursor.col - edge) as usize
        } else {
            0
        };
        self.viewer.set_scroll(vscroll, hscroll);
    }

    /// Ask the oracle for highlight spans and bake them into the document
    pub fn rehighlight<O: HighlightOracle + ?Sized>(&mut self, oracle: &mut O) {
        let spans = oracle.highlights(&self.doc.codepoints());
        let ranges = spans_to_ranges(&spans);
        self.viewer.highlight(&mut self.doc, &ranges);
    }

    pub fn render(&mut self, grid: &mut dyn DisplayGrid) {
        self.cursor.col = self.cursor_col() as isize;
        self.viewer
            .render(&self.doc, grid, self.selection.as_ref(), Some(self.cursor));
    }
}

/// Split text on `\n` into lines, dropping a `\r` before each break
fn split_lines(text: &str) -> Vec<Line> {
    text.split('\n')
        .map(|l| Document::line_from_str(l.strip_suffix('\r').unwrap_or(l)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::MemoryClipboard;

    fn editor(text: &str) -> TextEditor {
        let mut edit = TextEditor::new(40, 10);
        edit.set_text(text);
        edit
    }

    fn key(edit: &mut TextEditor, key: Key, modifiers: Modifiers) {
        let mut clipboard = MemoryClipboard::new();
        edit.handle_event(InputEvent::KeyPress { key, modifiers }, &mut clipboard)
            .unwrap();
    }

    #[test]
    fn test_wrap_cursor_left_goes_to_previous_line_end() {
        let mut edit = editor("abc\nde");
        edit.goto(0, 1);
        key(&mut edit, Key::Left, Modifiers::NONE);
        assert_eq!(edit.cursor(), Position::new(3, 0));
    }

    #[test]
    fn test_wrap_cursor_right_goes_to_next_line_start() {
        let mut edit = editor("abc\nde");
        edit.goto(3, 0);
        key(&mut edit, Key::Right, Modifiers::NONE);
        assert_eq!(edit.cursor(), Position::new(0, 1));
    }

    #[test]
    fn test_wrap_cursor_clamps_at_document_edges() {
        let mut edit = editor("abc");
        edit.goto(-1, 0);
        assert_eq!(edit.cursor(), Position::new(0, 0));
        edit.goto(9, 0);
        assert_eq!(edit.cursor(), Position::new(3, 0));
    }

    #[test]
    fn test_preserved_column() {
        let mut edit = editor("long line\nab\nanother line");
        edit.goto(7, 0);
        key(&mut edit, Key::Down, Modifiers::NONE);
        assert_eq!(edit.cursor(), Position::new(2, 1));
        key(&mut edit, Key::Down, Modifiers::NONE);
        assert_eq!(edit.cursor(), Position::new(7, 2));
    }

    #[test]
    fn test_word_motion() {
        let mut edit = editor("one two  three");
        key(&mut edit, Key::Right, Modifiers::CTRL);
        assert_eq!(edit.cursor().col, 4);
        key(&mut edit, Key::Right, Modifiers::CTRL);
        assert_eq!(edit.cursor().col, 9);
        key(&mut edit, Key::Left, Modifiers::SUPER);
        assert_eq!(edit.cursor().col, 4);
    }

    #[test]
    fn test_home_end_and_document_motions() {
        let mut edit = editor("abc\ndef\nghi");
        edit.goto(1, 1);
        key(&mut edit, Key::End, Modifiers::NONE);
        assert_eq!(edit.cursor(), Position::new(3, 1));
        key(&mut edit, Key::Home, Modifiers::NONE);
        assert_eq!(edit.cursor(), Position::new(0, 1));
        key(&mut edit, Key::Down, Modifiers::CTRL);
        assert_eq!(edit.cursor().line, 2);
        key(&mut edit, Key::Up, Modifiers::CTRL);
        assert_eq!(edit.cursor().line, 0);
    }

    #[test]
    fn test_shift_motion_selects_from_anchor() {
        let mut edit = editor("hello world");
        edit.goto(2, 0);
        key(&mut edit, Key::Right, Modifiers::SHIFT);
        key(&mut edit, Key::Right, Modifiers::SHIFT);
        let selection = *edit.selection().unwrap();
        assert_eq!(selection.start(), Position::new(2, 0));
        assert_eq!(selection.end(), Position::new(4, 0));

        key(&mut edit, Key::Right, Modifiers::NONE);
        assert!(edit.selection().is_none());
    }

    #[test]
    fn test_typing_is_one_undo_step() {
        let mut edit = editor("");
        let mut clipboard = MemoryClipboard::new();
        for c in ["a", "b", "c"] {
            edit.handle_event(InputEvent::TextInput(c.into()), &mut clipboard)
                .unwrap();
        }
        assert_eq!(edit.text(), "abc");
        assert_eq!(edit.cursor(), Position::new(3, 0));
        assert_eq!(edit.history().undo_len(), 1);
        key(&mut edit, Key::Char('z'), Modifiers::CTRL);
        assert_eq!(edit.text(), "");
        assert_eq!(edit.cursor(), Position::new(0, 0));
        key(&mut edit, Key::Char('r'), Modifiers::CTRL);
        assert_eq!(edit.text(), "abc");
    }

    #[test]
    fn test_backspace_merges() {
        let mut edit = editor("abcdef");
        edit.goto(6, 0);
        for _ in 0..3 {
            key(&mut edit, Key::Backspace, Modifiers::NONE);
        }
        assert_eq!(edit.text(), "abc");
        assert_eq!(edit.history().undo_len(), 1);
        edit.undo().unwrap();
        assert_eq!(edit.text(), "abcdef");
    }

    #[test]
    fn test_backspace_at_line_start_joins() {
        let mut edit = editor("ab\ncd");
        edit.goto(0, 1);
        key(&mut edit, Key::Backspace, Modifiers::NONE);
        assert_eq!(edit.text(), "abcd");
        assert_eq!(edit.cursor(), Position::new(2, 0));
    }

    #[test]
    fn test_enter_keeps_indent() {
        let mut edit = editor("    foo()");
        edit.goto(9, 0);
        key(&mut edit, Key::Enter, Modifiers::NONE);
        assert_eq!(edit.text(), "    foo()\n    ");
        assert_eq!(edit.cursor(), Position::new(4, 1));
        assert_eq!(edit.history().undo_len(), 1);
        edit.undo().unwrap();
        assert_eq!(edit.text(), "    foo()");
    }

    #[test]
    fn test_kill_to_end_of_line() {
        let mut edit = editor("hello world");
        edit.goto(5, 0);
        key(&mut edit, Key::Char('k'), Modifiers::CTRL);
        assert_eq!(edit.text(), "hello");
    }

    #[test]
    fn test_delete_line_is_one_undo_step() {
        let mut edit = editor("one\ntwo\nthree");
        edit.goto(1, 1);
        key(&mut edit, Key::Char('d'), Modifiers::CTRL);
        assert_eq!(edit.text(), "one\nthree");
        assert_eq!(Document::text_of(&[edit.yank_buffer().clone()]), "two");
        assert_eq!(edit.history().undo_len(), 1);
        edit.undo().unwrap();
        assert_eq!(edit.text(), "one\ntwo\nthree");
    }

    #[test]
    fn test_indent_and_outdent_cursor_line() {
        let mut edit = editor("x");
        edit.goto(1, 0);
        key(&mut edit, Key::Tab, Modifiers::NONE);
        assert_eq!(edit.text(), "    x");
        assert_eq!(edit.cursor(), Position::new(5, 0));
        key(&mut edit, Key::Tab, Modifiers::SHIFT);
        assert_eq!(edit.text(), "x");
        assert_eq!(edit.cursor(), Position::new(1, 0));
    }

    #[test]
    fn test_outdent_stops_at_left_edge() {
        let mut edit = editor("  a\n      b");
        edit.select(Position::new(0, 0), Position::new(2, 1));
        edit.indent(-4).unwrap();
        assert_eq!(edit.text(), "a\n  b");
        let selection = edit.selection().unwrap();
        assert_eq!(selection.start(), Position::new(0, 0));
        assert_eq!(selection.end(), Position::new(3, 1));
        assert_eq!(edit.history().undo_len(), 1);
    }

    #[test]
    fn test_indent_selection_ending_at_column_zero() {
        let mut edit = editor("a\nb\nc");
        edit.select(Position::new(0, 0), Position::new(0, 2));
        edit.indent(2).unwrap();
        assert_eq!(edit.text(), "  a\n  b\nc");
        assert_eq!(edit.selection().unwrap().end(), Position::new(3, 1));
    }

    #[test]
    fn test_text_input_replaces_selection() {
        let mut edit = editor("hello world");
        edit.select(Position::new(0, 0), Position::new(5, 0));
        let mut clipboard = MemoryClipboard::new();
        edit.handle_event(InputEvent::TextInput("bye".into()), &mut clipboard)
            .unwrap();
        assert_eq!(edit.text(), "bye world");
        assert!(edit.selection().is_none());
    }

    #[test]
    fn test_click_and_drag_select() {
        let mut edit = editor("abc\ndef\nghi");
        let mut clipboard = MemoryClipboard::new();
        edit.handle_event(InputEvent::PointerClick { x: 1, y: 0 }, &mut clipboard)
            .unwrap();
        assert_eq!(edit.cursor(), Position::new(1, 0));
        edit.handle_event(
            InputEvent::PointerDrag {
                x: 2,
                y: 1,
                buttons: 1,
            },
            &mut clipboard,
        )
        .unwrap();
        let selection = *edit.selection().unwrap();
        assert_eq!(selection.start(), Position::new(1, 0));
        assert_eq!(selection.end(), Position::new(2, 1));

        edit.handle_event(
            InputEvent::PointerDrag {
                x: 0,
                y: 0,
                buttons: 0,
            },
            &mut clipboard,
        )
        .unwrap();
        edit.handle_event(
            InputEvent::PointerDrag {
                x: 0,
                y: 2,
                buttons: 1,
            },
            &mut clipboard,
        )
        .unwrap();
        assert_eq!(edit.selection().unwrap().end(), Position::new(2, 1));
    }

    #[test]
    fn test_click_past_line_end_clamps() {
        let mut edit = editor("abc\nde");
        edit.click(30, 1);
        assert_eq!(edit.cursor(), Position::new(2, 1));
    }

    #[test]
    fn test_scroll_event() {
        let text = vec!["x"; 50].join("\n");
        let mut edit = editor(&text);
        let mut clipboard = MemoryClipboard::new();
        edit.handle_event(InputEvent::Scroll(-2), &mut clipboard)
            .unwrap();
        assert_eq!(edit.viewer().vscroll(), 6);
    }

    #[test]
    fn test_vertical_scroll_follows_cursor() {
        let text = vec!["x"; 50].join("\n");
        let mut edit = editor(&text);
        edit.goto(0, 30);
        assert_eq!(edit.viewer().vscroll(), 21);
        edit.goto(0, 5);
        assert_eq!(edit.viewer().vscroll(), 5);
    }

    #[test]
    fn test_horizontal_scroll_follows_cursor() {
        let text = "y".repeat(60);
        let mut edit = editor(&text);
        edit.goto(50, 0);
        assert_eq!(edit.viewer().hscroll(), 12);
        edit.goto(38, 0);
        assert_eq!(edit.viewer().hscroll(), 0);
    }

    #[test]
    fn test_set_text_resets_history() {
        let mut edit = editor("abc");
        edit.type_text("x").unwrap();
        assert!(edit.is_modified());
        edit.set_text("new");
        assert!(!edit.is_modified());
        assert!(!edit.history().can_undo());
        assert_eq!(edit.cursor(), Position::new(0, 0));
    }
}
