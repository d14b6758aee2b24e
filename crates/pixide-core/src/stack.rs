//! Undo/redo history
//!
//! The stack applies commands and remembers them. Consecutive typing and
//! consecutive backspaces are coalesced into the command already on top of
//! the history, so one undo removes a whole run of keystrokes.

use crate::command::EditCommand;
use crate::document::{Document, Position};
use crate::error::EditError;

/// Owns the undo and redo histories
#[derive(Debug, Clone, Default)]
pub struct CommandStack {
    undo_history: Vec<EditCommand>,
    redo_history: Vec<EditCommand>,
}

impl CommandStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `cmd` to `doc` and record it.
    ///
    /// With `join_with_previous`, the previous top of history and `cmd` are
    /// wrapped in one [`EditCommand::Combined`] so they undo together.
    /// Otherwise an insert that continues the previous insert, or a delete one
    /// column left of the previous delete, is folded into the top entry.
    ///
    /// Returns the cursor position reported by the applied command. If the
    /// command fails, neither `doc` nor the undo history change.
    pub fn apply(
        &mut self,
        mut cmd: EditCommand,
        doc: &mut Document,
        join_with_previous: bool,
    ) -> Result<Option<Position>, EditError> {
        self.redo_history.clear();

        if join_with_previous {
            if let Some(previous) = self.undo_history.pop() {
                return match cmd.apply(doc) {
                    Ok(pos) => {
                        self.undo_history
                            .push(EditCommand::combined(vec![previous, cmd]));
                        Ok(pos)
                    }
                    Err(err) => {
                        self.undo_history.push(previous);
                        Err(err)
                    }
                };
            }
        }

        if let Some(top) = self.undo_history.last_mut() {
            if can_coalesce(top, &cmd) {
                return coalesce(top, cmd, doc);
            }
        }

        let pos = cmd.apply(doc)?;
        self.undo_history.push(cmd);
        Ok(pos)
    }

    /// Undo the most recent command. Returns `Ok(None)` with an empty history.
    pub fn undo(&mut self, doc: &mut Document) -> Result<Option<Position>, EditError> {
        let Some(mut cmd) = self.undo_history.pop() else {
            return Ok(None);
        };
        match cmd.undo(doc) {
            Ok(pos) => {
                self.redo_history.push(cmd);
                Ok(pos)
            }
            Err(err) => {
                self.undo_history.push(cmd);
                Err(err)
            }
        }
    }

    /// Re-apply the most recently undone command
    pub fn redo(&mut self, doc: &mut Document) -> Result<Option<Position>, EditError> {
        let Some(mut cmd) = self.redo_history.pop() else {
            return Ok(None);
        };
        match cmd.apply(doc) {
            Ok(pos) => {
                self.undo_history.push(cmd);
                Ok(pos)
            }
            Err(err) => {
                self.redo_history.push(cmd);
                Err(err)
            }
        }
    }

    pub fn undo_len(&self) -> usize {
        self.undo_history.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_history.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_history.is_empty()
    }

    /// The undo history, oldest first
    pub fn history(&self) -> &[EditCommand] {
        &self.undo_history
    }

    /// Forget all history, e.g. after the document is replaced
    pub fn clear(&mut self) {
        self.undo_history.clear();
        self.redo_history.clear();
    }
}

fn can_coalesce(top: &EditCommand, cmd: &EditCommand) -> bool {
    match (top, cmd) {
        (
            EditCommand::Insert { line, col, added },
            EditCommand::Insert {
                line: next_line,
                col: next_col,
                ..
            },
        ) => line == next_line && *next_col == col + added.len(),
        (
            EditCommand::Delete { line, col, .. },
            EditCommand::Delete {
                line: next_line,
                col: next_col,
                ..
            },
        ) => line == next_line && *col == next_col + 1,
        _ => false,
    }
}

/// Extend `top` with `cmd` by undoing it, growing it and applying it again
fn coalesce(
    top: &mut EditCommand,
    cmd: EditCommand,
    doc: &mut Document,
) -> Result<Option<Position>, EditError> {
    let saved = top.clone();
    top.undo(doc)?;
    match (&mut *top, cmd) {
        (EditCommand::Insert { added, .. }, EditCommand::Insert { added: more, .. }) => {
            added.extend(more);
        }
        (EditCommand::Delete { col, count, .. }, EditCommand::Delete { .. }) => {
            *count += 1;
            *col -= 1;
        }
        _ => {}
    }
    match top.apply(doc) {
        Ok(pos) => Ok(pos),
        Err(err) => {
            *top = saved;
            top.apply(doc)?;
            Err(err)
        }
    }
}
