//! Error types for linedit
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for linedit
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Invalid position {offset} (buffer length {len})")]
    InvalidPosition { offset: usize, len: usize },

    #[error("Range {offset}+{length} exceeds buffer length {len}")]
    RangeExceeded { offset: usize, length: usize, len: usize },

    #[error("Line {line} out of range (buffer has {lines} lines)")]
    OutOfRange { line: usize, lines: usize },

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    #[error("No file open")]
    NoFileOpen,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Result type alias for linedit operations
pub type Result<T> = std::result::Result<T, EditorError>;

impl EditorError {
    /// Check if the session can keep running after this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            EditorError::Config(_)
                | EditorError::TomlParse(_)
                | EditorError::TomlSerialize(_)
        )
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            EditorError::InvalidPosition { offset, len } => {
                format!("Invalid position {} (valid positions are 0..={})", offset, len)
            }
            EditorError::RangeExceeded { .. } => {
                "Copy position and length exceed text buffer size".to_string()
            }
            EditorError::OutOfRange { line, .. } => format!("Line number {} out of range", line),
            EditorError::NothingToUndo => "No more actions to undo".to_string(),
            EditorError::NothingToRedo => "No more actions to redo".to_string(),
            EditorError::NoFileOpen => "No file open; give a file name to save to".to_string(),
            EditorError::Io(e) => format!("File operation failed: {}", e),
            _ => self.to_string(),
        }
    }
}
