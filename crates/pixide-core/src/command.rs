//! Reversible edit commands
//!
//! Each command can be applied to a [`Document`] and undone again. Both
//! directions return the recommended cursor position, or `None` when there is
//! nothing to report (an empty [`EditCommand::Combined`], or undoing a
//! `Delete`/`Join` that was never applied).

use crate::document::{Document, Line, Position};
use crate::error::EditError;

/// A reversible mutation of a [`Document`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Insert `added` at `(line, col)`
    Insert { line: usize, col: usize, added: Line },
    /// Remove up to `count` cells at `(line, col)`; `removed` is filled in by `apply`
    Delete {
        line: usize,
        col: usize,
        count: usize,
        removed: Option<Line>,
    },
    /// Cut `line` at `col`, moving the tail to a new line below
    Split { line: usize, col: usize },
    /// Append line `line + 1` to `line`; `split_col` is filled in by `apply`
    Join {
        line: usize,
        split_col: Option<usize>,
    },
    /// Several commands applied and undone as one unit
    Combined(Vec<EditCommand>),
}

impl EditCommand {
    pub fn insert(line: usize, col: usize, added: Line) -> Self {
        Self::Insert { line, col, added }
    }

    pub fn delete(line: usize, col: usize, count: usize) -> Self {
        Self::Delete {
            line,
            col,
            count,
            removed: None,
        }
    }

    pub fn split(line: usize, col: usize) -> Self {
        Self::Split { line, col }
    }

    pub fn join(line: usize) -> Self {
        Self::Join {
            line,
            split_col: None,
        }
    }

    pub fn combined(commands: Vec<EditCommand>) -> Self {
        Self::Combined(commands)
    }

    /// Apply the command, returning the cursor position after the edit.
    ///
    /// On error the document is left as it was.
    pub fn apply(&mut self, doc: &mut Document) -> Result<Option<Position>, EditError> {
        match self {
            Self::Insert { line, col, added } => {
                let target = line_at(doc, *line)?;
                check_col(*line, *col, target.len())?;
                target.splice(*col..*col, added.iter().copied());
                Ok(Some(pos(*col + added.len(), *line)))
            }
            Self::Delete {
                line,
                col,
                count,
                removed,
            } => {
                let target = line_at(doc, *line)?;
                check_col(*line, *col, target.len())?;
                let end = col.saturating_add(*count).min(target.len());
                *removed = Some(target.drain(*col..end).collect());
                Ok(Some(pos(*col, *line)))
            }
            Self::Split { line, col } => {
                let target = line_at(doc, *line)?;
                check_col(*line, *col, target.len())?;
                let tail = target.split_off(*col);
                doc.lines_mut().insert(*line + 1, tail);
                Ok(Some(pos(*col, *line)))
            }
            Self::Join { line, split_col } => {
                let old_len = join_lines(doc, *line)?;
                *split_col = Some(old_len);
                Ok(Some(pos(old_len, *line)))
            }
            Self::Combined(commands) => {
                let mut last = None;
                for i in 0..commands.len() {
                    match commands[i].apply(doc) {
                        Ok(p) => last = p.or(last),
                        Err(err) => {
                            // Each of these just applied, so its undo is in range
                            for done in commands[..i].iter_mut().rev() {
                                let rolled_back = done.undo(doc);
                                debug_assert!(
                                    rolled_back.is_ok(),
                                    "rollback failed: {rolled_back:?}"
                                );
                            }
                            return Err(err);
                        }
                    }
                }
                Ok(last)
            }
        }
    }

    /// Reverse the command, returning the cursor position before the edit.
    ///
    /// `Insert` needs no state from `apply`: undoing it removes `added.len()`
    /// cells at `col` whether or not it was applied. The command stack relies
    /// on this to extend a merged insert in place.
    pub fn undo(&mut self, doc: &mut Document) -> Result<Option<Position>, EditError> {
        match self {
            Self::Insert { line, col, added } => {
                let target = line_at(doc, *line)?;
                let len = target.len();
                target.drain((*col).min(len)..col.saturating_add(added.len()).min(len));
                Ok(Some(pos(*col, *line)))
            }
            Self::Delete {
                line, col, removed, ..
            } => {
                let Some(removed) = removed else {
                    return Ok(None);
                };
                let target = line_at(doc, *line)?;
                check_col(*line, *col, target.len())?;
                target.splice(*col..*col, removed.iter().copied());
                Ok(Some(pos(*col + removed.len(), *line)))
            }
            Self::Split { line, .. } => {
                let len = join_lines(doc, *line)?;
                Ok(Some(pos(len, *line)))
            }
            Self::Join { line, split_col } => {
                let Some(split_col) = *split_col else {
                    return Ok(None);
                };
                let target = line_at(doc, *line)?;
                check_col(*line, split_col, target.len())?;
                let tail = target.split_off(split_col);
                doc.lines_mut().insert(*line + 1, tail);
                Ok(Some(pos(0, *line + 1)))
            }
            Self::Combined(commands) => {
                let mut last = None;
                for i in (0..commands.len()).rev() {
                    match commands[i].undo(doc) {
                        Ok(p) => last = p.or(last),
                        Err(err) => {
                            // Each of these was just undone, so it applies again
                            for done in commands[i + 1..].iter_mut() {
                                let redone = done.apply(doc);
                                debug_assert!(redone.is_ok(), "rollback failed: {redone:?}");
                            }
                            return Err(err);
                        }
                    }
                }
                Ok(last)
            }
        }
    }
}

fn pos(col: usize, line: usize) -> Position {
    Position::new(col as isize, line)
}

fn line_at(doc: &mut Document, line: usize) -> Result<&mut Line, EditError> {
    let len = doc.line_count();
    doc.lines_mut()
        .get_mut(line)
        .ok_or(EditError::LineOutOfRange { line, len })
}

fn check_col(line: usize, col: usize, len: usize) -> Result<(), EditError> {
    if col > len {
        return Err(EditError::ColumnOutOfRange { line, col, len });
    }
    Ok(())
}

/// Append `line + 1` onto `line`, returning the length `line` had before
fn join_lines(doc: &mut Document, line: usize) -> Result<usize, EditError> {
    let len = doc.line_count();
    if line + 1 >= len {
        return Err(EditError::LineOutOfRange { line: line + 1, len });
    }
    let lines = doc.lines_mut();
    let next = lines.remove(line + 1);
    let target = &mut lines[line];
    let old_len = target.len();
    target.extend(next);
    Ok(old_len)
}
