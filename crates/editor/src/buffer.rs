//! Text Buffer
//!
//! Contiguous UTF-8 text buffer addressed by byte offset, with a cursor,
//! a single-slot clipboard and the file state shown in the status line.
//!
//! Offsets must fall on character boundaries; anything else is rejected as
//! an invalid position so a failed call never leaves partial edits behind.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use linedit_core::{EditorError, Result};

use crate::position::{lines, Position, PositionIndex};

/// File association and dirty flag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileState {
    /// File the buffer was opened from or last saved to
    pub path: Option<PathBuf>,
    /// Whether the buffer has been modified since open/save
    pub modified: bool,
}

impl FileState {
    /// Display name of the file, if any
    pub fn name(&self) -> Option<String> {
        self.path.as_ref().map(|p| p.display().to_string())
    }
}

/// What a delete request removes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteKind {
    /// One byte; a multi-byte character is rejected
    Char,
    /// The whole line containing the offset
    Line,
    /// An explicit number of bytes
    Block(usize),
}

impl DeleteKind {
    /// Length argument understood by [`EditBuffer::delete`]
    pub fn length(&self) -> usize {
        match self {
            DeleteKind::Char => 1,
            DeleteKind::Line => 0,
            DeleteKind::Block(n) => *n,
        }
    }
}

/// Mutable text buffer
#[derive(Debug, Clone)]
pub struct EditBuffer {
    /// The document text
    text: String,
    /// Cursor byte offset, always `<= text.len()`
    cursor: usize,
    /// Most recently copied text
    clipboard: String,
    /// First line of the scroll view (1-based)
    first_visible_line: usize,
    /// File association
    file: FileState,
    /// Bumped on every successful mutation
    revision: u64,
}

impl EditBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self::from_text("")
    }

    /// Create an unmodified buffer holding `text`
    pub fn from_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: 0,
            clipboard: String::new(),
            first_visible_line: 1,
            file: FileState::default(),
            revision: 0,
        }
    }

    /// Get the full text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the byte length
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clipboard(&self) -> &str {
        &self.clipboard
    }

    pub fn first_visible_line(&self) -> usize {
        self.first_visible_line
    }

    pub fn file(&self) -> &FileState {
        &self.file
    }

    pub fn path(&self) -> Option<&Path> {
        self.file.path.as_deref()
    }

    /// Check if the buffer has been modified
    pub fn is_modified(&self) -> bool {
        self.file.modified
    }

    /// Counter that changes whenever the text is mutated
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Position index over the current text
    pub fn index(&self) -> PositionIndex<'_> {
        PositionIndex::new(&self.text)
    }

    /// Get the number of lines
    pub fn line_count(&self) -> usize {
        self.index().line_count()
    }

    /// Offset of a 1-based (line, column) pair, clamped to the buffer
    pub fn index_from_line_col(&self, line: usize, column: usize) -> usize {
        self.index().offset_of(line, column)
    }

    /// 1-based position of the cursor
    pub fn cursor_position(&self) -> Position {
        self.index().position_of(self.cursor)
    }

    /// Numbered lines starting at `first` (1-based), at most `count` of them
    pub fn numbered_lines(&self, first: usize, count: usize) -> Vec<(usize, &str)> {
        lines(&self.text)
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .skip(first.saturating_sub(1))
            .take(count)
            .collect()
    }

    /// Move the cursor
    pub fn set_cursor(&mut self, offset: usize) -> Result<()> {
        self.check_position(offset)?;
        self.cursor = offset;
        Ok(())
    }

    /// Insert text at an offset; the cursor ends up after the inserted text
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<()> {
        self.check_position(offset)?;

        debug!(offset, len = text.len(), "insert");
        self.text.insert_str(offset, text);
        self.cursor = offset + text.len();
        self.mark_modified();
        Ok(())
    }

    /// Delete text starting at `offset` and return what was removed.
    ///
    /// A `length` of 0 deletes the content of the whole line containing
    /// `offset`, leaving its terminator in place. Other lengths running past
    /// the end of the buffer are truncated.
    pub fn delete(&mut self, offset: usize, length: usize) -> Result<String> {
        if offset >= self.text.len() || !self.text.is_char_boundary(offset) {
            warn!(offset, len = self.text.len(), "rejected delete");
            return Err(self.invalid(offset));
        }

        let range = if length == 0 {
            self.index().line_bounds_at(offset)
        } else {
            offset..offset.saturating_add(length).min(self.text.len())
        };
        if !self.text.is_char_boundary(range.end) {
            return Err(self.invalid(range.end));
        }

        debug!(start = range.start, end = range.end, "delete");
        let removed: String = self.text.drain(range.clone()).collect();
        self.cursor = range.start;
        self.mark_modified();
        Ok(removed)
    }

    /// Copy `length` bytes starting at `offset` into the clipboard
    pub fn copy(&mut self, offset: usize, length: usize) -> Result<()> {
        let end = offset
            .checked_add(length)
            .filter(|&end| end <= self.text.len())
            .ok_or(EditorError::RangeExceeded {
                offset,
                length,
                len: self.text.len(),
            })?;
        if !self.text.is_char_boundary(offset) {
            return Err(self.invalid(offset));
        }
        if !self.text.is_char_boundary(end) {
            return Err(self.invalid(end));
        }

        self.clipboard = self.text[offset..end].to_string();
        debug!(offset, length, "copied to clipboard");
        Ok(())
    }

    /// Insert the clipboard at an offset, returning the number of bytes pasted
    pub fn paste(&mut self, offset: usize) -> Result<usize> {
        self.check_position(offset)?;

        let pasted = self.clipboard.len();
        debug!(offset, len = pasted, "paste");
        self.text.insert_str(offset, &self.clipboard);
        self.cursor = offset + pasted;
        self.mark_modified();
        Ok(pasted)
    }

    /// Byte offset of the first occurrence of `needle`
    pub fn find(&self, needle: &str) -> Option<usize> {
        if needle.is_empty() {
            return None;
        }
        self.text.find(needle)
    }

    /// Replace every occurrence of `old` with `new`, left to right.
    ///
    /// Scanning resumes after each inserted replacement, so text produced by
    /// a replacement is never matched again. Returns the number of
    /// replacements.
    pub fn replace_all(&mut self, old: &str, new: &str) -> usize {
        if old.is_empty() {
            return 0;
        }

        let mut count = 0;
        let mut from = 0;
        while let Some(found) = self.text[from..].find(old) {
            let at = from + found;
            self.text.replace_range(at..at + old.len(), new);
            from = at + new.len();
            count += 1;
        }

        if count > 0 {
            debug!(count, "replace all");
            self.clamp_cursor();
            self.mark_modified();
        }
        count
    }

    /// Move the cursor to the start of a 1-based line and return its text
    pub fn goto_line(&mut self, line: usize) -> Result<String> {
        let range = self.index().line_range(line)?;
        self.cursor = range.start;
        Ok(self.text[range].to_string())
    }

    /// Move the scroll view by `delta` lines, returning the new first line
    pub fn scroll(&mut self, delta: isize) -> usize {
        let total = self.line_count().max(1);
        self.first_visible_line = self
            .first_visible_line
            .saturating_add_signed(delta)
            .clamp(1, total);
        self.first_visible_line
    }

    /// Replace the whole text, as undo/redo does
    pub fn restore(&mut self, text: String) {
        self.text = text;
        self.clamp_cursor();
        self.first_visible_line = self.first_visible_line.clamp(1, self.line_count().max(1));
        self.mark_modified();
    }

    /// Load freshly read file content
    pub fn load(&mut self, path: PathBuf, text: String) {
        self.text = text;
        self.cursor = 0;
        self.first_visible_line = 1;
        self.file = FileState {
            path: Some(path),
            modified: false,
        };
        self.revision += 1;
    }

    /// Record that the text was written to `path`
    pub fn mark_saved(&mut self, path: PathBuf) {
        self.file = FileState {
            path: Some(path),
            modified: false,
        };
    }

    /// Drop the text and file association; the clipboard survives
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.first_visible_line = 1;
        self.file = FileState::default();
        self.revision += 1;
    }

    fn mark_modified(&mut self) {
        self.file.modified = true;
        self.revision += 1;
    }

    fn clamp_cursor(&mut self) {
        let mut cursor = self.cursor.min(self.text.len());
        while !self.text.is_char_boundary(cursor) {
            cursor -= 1;
        }
        self.cursor = cursor;
    }

    fn check_position(&self, offset: usize) -> Result<()> {
        if offset <= self.text.len() && self.text.is_char_boundary(offset) {
            Ok(())
        } else {
            warn!(offset, len = self.text.len(), "rejected position");
            Err(self.invalid(offset))
        }
    }

    fn invalid(&self, offset: usize) -> EditorError {
        EditorError::InvalidPosition {
            offset,
            len: self.text.len(),
        }
    }
}

impl Default for EditBuffer {
    fn default() -> Self {
        Self::new()
    }
}
