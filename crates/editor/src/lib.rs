//! linedit Editor
//!
//! Line-oriented editing engine with:
//! - Byte-offset and (line, column) addressing over a contiguous buffer
//! - Snapshot-based linear undo/redo
//! - Keyword highlighting driven by a configurable profile

pub mod buffer;
pub mod commands;
pub mod file;
pub mod history;
pub mod position;
pub mod status;
pub mod syntax;

pub use buffer::{DeleteKind, EditBuffer, FileState};
pub use commands::{Command, Outcome, Session};
pub use history::{HistoryManager, Snapshot};
pub use position::{Position, PositionIndex};
pub use status::StatusLine;
pub use syntax::{HighlightedLine, SyntaxHighlighter, Token, TokenKind};
