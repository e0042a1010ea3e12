//! Status Line
//!
//! Data shown in the status bar after each command.

use std::fmt;

use crate::buffer::EditBuffer;

/// Cursor location and file state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub line: usize,
    pub column: usize,
    pub file: Option<String>,
    pub modified: bool,
}

impl StatusLine {
    pub fn from_buffer(buffer: &EditBuffer) -> Self {
        let position = buffer.cursor_position();
        Self {
            line: position.line,
            column: position.column,
            file: buffer.file().name(),
            modified: buffer.is_modified(),
        }
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line: {}, Column: {}", self.line, self.column)?;
        match &self.file {
            None => write!(f, " - No file open"),
            Some(name) => {
                let flag = if self.modified { "Modified" } else { "Unmodified" };
                write!(f, " - Editing: {} [{}]", name, flag)
            }
        }
    }
}
