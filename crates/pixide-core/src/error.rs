use thiserror::Error;

/// A command addressed a location outside the document.
///
/// These are contract violations by whoever built the command, not user
/// errors. A command that fails leaves the document untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("line {line} out of range (document has {len} lines)")]
    LineOutOfRange { line: usize, len: usize },

    #[error("column {col} out of range on line {line} (line has {len} cells)")]
    ColumnOutOfRange { line: usize, col: usize, len: usize },
}
