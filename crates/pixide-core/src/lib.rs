//! pixide-core: the text buffer behind the pixide editor
//!
//! This crate holds the document model and everything that mutates it:
//! reversible edit commands, the undo/redo command stack with merge-on-type
//! coalescing, and normalized text ranges. It has no UI dependencies.
//!
//! # Example
//!
//! ```
//! use pixide_core::{CommandStack, Document, EditCommand, Position};
//!
//! let mut doc = Document::from_text("Hello");
//! let mut stack = CommandStack::new();
//!
//! // Typing two characters in a row lands in one undo step
//! stack.apply(EditCommand::insert(0, 5, Document::line_from_str(",")), &mut doc, false).unwrap();
//! stack.apply(EditCommand::insert(0, 6, Document::line_from_str(" ")), &mut doc, false).unwrap();
//! assert_eq!(doc.text(), "Hello, ");
//! assert_eq!(stack.undo_len(), 1);
//!
//! let pos = stack.undo(&mut doc).unwrap();
//! assert_eq!(pos, Some(Position::new(5, 0)));
//! assert_eq!(doc.text(), "Hello");
//! ```

pub mod command;
pub mod document;
pub mod error;
pub mod range;
pub mod stack;

pub use command::EditCommand;
pub use document::{Cell, Document, Line, Position, DEFAULT_TEXT_COLOR, EOL};
pub use error::EditError;
pub use range::{LineSpan, TextRange};
pub use stack::CommandStack;
