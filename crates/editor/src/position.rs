//! Position Index
//!
//! Translates between 1-based (line, column) positions and 0-based byte
//! offsets. Nothing is cached: every query scans the current text.

use std::ops::Range;

use linedit_core::{EditorError, Result};

/// Text position (line, column), both 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

/// Iterate the lines of `text` without their terminators.
///
/// A trailing `\n` does not start another line, so `"a\nb\n"` has two lines
/// and the empty text has none.
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split_terminator('\n')
}

/// Read-only view translating positions over a text
#[derive(Debug, Clone, Copy)]
pub struct PositionIndex<'a> {
    text: &'a str,
}

impl<'a> PositionIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Number of lines in the text
    pub fn line_count(&self) -> usize {
        lines(self.text).count()
    }

    /// Offset of a 1-based (line, column) pair.
    ///
    /// Lines past the end of the text resolve to the end of the text and the
    /// column is still added, so the result is clamped rather than rejected.
    /// Line 0 is treated as line 1 and column 0 as column 1.
    pub fn offset_of(&self, line: usize, column: usize) -> usize {
        let start = self.line_start(line).unwrap_or(self.text.len());
        (start + column.saturating_sub(1)).min(self.text.len())
    }

    /// Byte bounds of a 1-based line, excluding its terminator
    pub fn line_range(&self, line: usize) -> Result<Range<usize>> {
        let lines = self.line_count();
        if line == 0 || line > lines {
            return Err(EditorError::OutOfRange { line, lines });
        }

        let start = self.line_start(line).unwrap_or(self.text.len());
        Ok(start..self.line_end_from(start))
    }

    /// Bounds of the line containing `offset`, excluding its terminator.
    ///
    /// An offset sitting on a `\n` belongs to the line that `\n` terminates.
    pub fn line_bounds_at(&self, offset: usize) -> Range<usize> {
        let offset = offset.min(self.text.len());
        let start = self.text.as_bytes()[..offset]
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |nl| nl + 1);
        start..self.line_end_from(offset)
    }

    /// 1-based (line, column) of a byte offset
    pub fn position_of(&self, offset: usize) -> Position {
        let prefix = &self.text.as_bytes()[..offset.min(self.text.len())];
        let line = prefix.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = prefix
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |nl| nl + 1);
        Position::new(line, prefix.len() - line_start + 1)
    }

    /// Start offset of a 1-based line, or `None` if the text has fewer
    /// newlines than needed to reach it
    fn line_start(&self, line: usize) -> Option<usize> {
        if line <= 1 {
            return Some(0);
        }
        self.text
            .match_indices('\n')
            .nth(line - 2)
            .map(|(nl, _)| nl + 1)
    }

    fn line_end_from(&self, start: usize) -> usize {
        self.text.as_bytes()[start..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(self.text.len(), |i| start + i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_of() {
        let index = PositionIndex::new("ab\ncd\nef\n");
        assert_eq!(index.offset_of(1, 1), 0);
        assert_eq!(index.offset_of(2, 1), 3);
        assert_eq!(index.offset_of(3, 2), 7);
    }

    #[test]
    fn test_offset_of_clamps_past_end() {
        let index = PositionIndex::new("ab\ncd");
        // Only one newline: line 3 resolves to the end of the text.
        assert_eq!(index.offset_of(3, 1), 5);
        assert_eq!(index.offset_of(9, 4), 5);
        // The column is added even when it runs past the line.
        assert_eq!(index.offset_of(1, 5), 4);
        assert_eq!(index.offset_of(1, 50), 5);
        assert_eq!(index.offset_of(0, 0), 0);
    }

    #[test]
    fn test_line_count() {
        assert_eq!(PositionIndex::new("").line_count(), 0);
        assert_eq!(PositionIndex::new("a").line_count(), 1);
        assert_eq!(PositionIndex::new("a\nb\nc\n").line_count(), 3);
        assert_eq!(PositionIndex::new("a\n\n").line_count(), 2);
    }

    #[test]
    fn test_line_range() {
        let index = PositionIndex::new("a\nbc\nd");
        assert_eq!(index.line_range(1).unwrap(), 0..1);
        assert_eq!(index.line_range(2).unwrap(), 2..4);
        assert_eq!(index.line_range(3).unwrap(), 5..6);
        assert!(matches!(
            index.line_range(4),
            Err(EditorError::OutOfRange { line: 4, lines: 3 })
        ));
        assert!(index.line_range(0).is_err());
    }

    #[test]
    fn test_line_bounds_at() {
        let text = "one\nhello\nthree";
        let index = PositionIndex::new(text);
        assert_eq!(&text[index.line_bounds_at(6)], "hello");
        assert_eq!(&text[index.line_bounds_at(4)], "hello");
        // The newline after "hello" belongs to that line.
        assert_eq!(&text[index.line_bounds_at(9)], "hello");
        assert_eq!(&text[index.line_bounds_at(12)], "three");
        assert_eq!(&text[index.line_bounds_at(0)], "one");
    }

    #[test]
    fn test_position_of() {
        let index = PositionIndex::new("ab\ncd\n");
        assert_eq!(index.position_of(0), Position::new(1, 1));
        assert_eq!(index.position_of(2), Position::new(1, 3));
        assert_eq!(index.position_of(3), Position::new(2, 1));
        assert_eq!(index.position_of(6), Position::new(3, 1));
        assert_eq!(index.position_of(100), Position::new(3, 1));
    }

    #[test]
    fn test_position_round_trip() {
        let text = "fn main() {\n    let x = 1;\n}\n";
        let index = PositionIndex::new(text);
        for offset in 0..=text.len() {
            let pos = index.position_of(offset);
            assert_eq!(index.offset_of(pos.line, pos.column), offset);
        }
    }
}
