//! Editor Commands
//!
//! High-level commands executed against one editing session. Every mutating
//! command snapshots the buffer first; the snapshot is committed to the undo
//! history only if the command succeeds and actually changed the text.

use std::path::PathBuf;
use tracing::{debug, info, warn};

use linedit_core::{AppConfig, EditorError, Result};

use crate::buffer::{DeleteKind, EditBuffer};
use crate::file;
use crate::history::{HistoryManager, Snapshot};
use crate::status::StatusLine;
use crate::syntax::{HighlightedLine, SyntaxHighlighter};

/// Editor command type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // File commands
    Open(PathBuf),
    Create(PathBuf),
    Save(Option<PathBuf>),
    Close { save_changes: bool },

    // Edit commands
    Insert { line: usize, column: usize, text: String },
    Delete { kind: DeleteKind, line: usize, column: usize },

    // Clipboard commands
    Copy { offset: usize, length: usize },
    Paste { offset: usize },

    // Find/Replace
    Find(String),
    Replace { old: String, new: String },

    // Navigation
    Goto(usize),
    Scroll(isize),

    // Display
    Highlight,
    Status,

    // Undo/Redo
    Undo,
    Redo,
}

impl Command {
    /// Whether the command may change the buffer text
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Insert { .. }
                | Command::Delete { .. }
                | Command::Paste { .. }
                | Command::Replace { .. }
        )
    }

    /// Whether the status line should be shown after the command
    pub fn reports_status(&self) -> bool {
        self.is_mutating()
            || matches!(
                self,
                Command::Undo | Command::Redo | Command::Goto(_) | Command::Scroll(_)
            )
    }
}

/// Numbered line handed to the display
pub type NumberedLine = (usize, String);

/// Command execution result, as data for the display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Opened { path: PathBuf, lines: Vec<NumberedLine> },
    Created(PathBuf),
    Saved(PathBuf),
    Closed,
    Inserted { offset: usize },
    Deleted { text: String },
    Copied { length: usize },
    Pasted { offset: usize, length: usize },
    Found(Option<usize>),
    Replaced(usize),
    Line { number: usize, text: String },
    Scrolled { first_line: usize, lines: Vec<NumberedLine> },
    Highlighted(Vec<HighlightedLine>),
    Status(StatusLine),
    Undone,
    Redone,
}

/// One editing session: buffer, history and highlighter
#[derive(Debug, Clone)]
pub struct Session {
    buffer: EditBuffer,
    history: HistoryManager,
    highlighter: SyntaxHighlighter,
    viewport_lines: usize,
}

impl Session {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            buffer: EditBuffer::new(),
            history: HistoryManager::with_limit(config.editor.history_limit),
            highlighter: SyntaxHighlighter::new(config.keyword_table()),
            viewport_lines: config.editor.viewport_lines,
        }
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn status(&self) -> StatusLine {
        StatusLine::from_buffer(&self.buffer)
    }

    /// Execute a command
    pub async fn execute(&mut self, command: Command) -> Result<Outcome> {
        debug!(?command, "execute");
        let outcome = match command {
            Command::Open(path) => {
                let lines = self.open(path.clone()).await?;
                Outcome::Opened { path, lines }
            }
            Command::Create(path) => {
                self.create(path.clone()).await?;
                Outcome::Created(path)
            }
            Command::Save(path) => Outcome::Saved(self.save(path).await?),
            Command::Close { save_changes } => {
                self.close(save_changes).await?;
                Outcome::Closed
            }
            Command::Insert { line, column, text } => Outcome::Inserted {
                offset: self.insert(line, column, &text)?,
            },
            Command::Delete { kind, line, column } => Outcome::Deleted {
                text: self.delete(kind, line, column)?,
            },
            Command::Copy { offset, length } => {
                self.buffer.copy(offset, length)?;
                Outcome::Copied { length }
            }
            Command::Paste { offset } => Outcome::Pasted {
                offset,
                length: self.paste(offset)?,
            },
            Command::Find(text) => Outcome::Found(self.buffer.find(&text)),
            Command::Replace { old, new } => Outcome::Replaced(self.replace_all(&old, &new)),
            Command::Goto(number) => Outcome::Line {
                number,
                text: self.buffer.goto_line(number)?,
            },
            Command::Scroll(delta) => {
                let first_line = self.buffer.scroll(delta);
                Outcome::Scrolled {
                    first_line,
                    lines: self.visible_lines(first_line, self.viewport_lines),
                }
            }
            Command::Highlight => Outcome::Highlighted(self.highlight()),
            Command::Status => Outcome::Status(self.status()),
            Command::Undo => {
                self.undo()?;
                Outcome::Undone
            }
            Command::Redo => {
                self.redo()?;
                Outcome::Redone
            }
        };
        Ok(outcome)
    }

    /// Open a file, returning its numbered lines
    pub async fn open(&mut self, path: PathBuf) -> Result<Vec<NumberedLine>> {
        let content = file::read_document(&path).await?;
        self.buffer.load(path, content);
        self.history.reset();
        info!("Opened {:?}", self.buffer.path());
        Ok(self.visible_lines(1, usize::MAX))
    }

    /// Create (or truncate) a file and start editing it empty
    pub async fn create(&mut self, path: PathBuf) -> Result<()> {
        file::create_document(&path).await?;
        self.buffer.load(path, String::new());
        self.history.reset();
        Ok(())
    }

    /// Save to `path`, or to the current file if `None`
    pub async fn save(&mut self, path: Option<PathBuf>) -> Result<PathBuf> {
        let target = path
            .or_else(|| self.buffer.path().map(PathBuf::from))
            .ok_or(EditorError::NoFileOpen)?;
        file::write_document(&target, self.buffer.text()).await?;
        self.buffer.mark_saved(target.clone());
        self.history.reset();
        Ok(target)
    }

    /// Close the current file, saving first if asked and modified
    pub async fn close(&mut self, save_changes: bool) -> Result<()> {
        if save_changes && self.buffer.is_modified() {
            self.save(None).await?;
        } else if self.buffer.is_modified() {
            warn!("Discarding unsaved changes in {:?}", self.buffer.path());
        }
        self.buffer.clear();
        self.history.reset();
        Ok(())
    }

    /// Insert text at a 1-based (line, column), returning the offset used
    pub fn insert(&mut self, line: usize, column: usize, text: &str) -> Result<usize> {
        let offset = self.buffer.index_from_line_col(line, column);
        self.edit(|buffer| buffer.insert(offset, text))?;
        Ok(offset)
    }

    /// Delete starting at a 1-based (line, column), returning the removed text
    pub fn delete(&mut self, kind: DeleteKind, line: usize, column: usize) -> Result<String> {
        let offset = self.buffer.index_from_line_col(line, column);
        self.edit(|buffer| buffer.delete(offset, kind.length()))
    }

    /// Paste the clipboard at an offset
    pub fn paste(&mut self, offset: usize) -> Result<usize> {
        self.edit(|buffer| buffer.paste(offset))
    }

    /// Replace every occurrence, returning the count
    pub fn replace_all(&mut self, old: &str, new: &str) -> usize {
        self.edit(|buffer| Ok(buffer.replace_all(old, new)))
            .unwrap_or_default()
    }

    pub fn highlight(&self) -> Vec<HighlightedLine> {
        self.highlighter.highlights(self.buffer.text())
    }

    /// Restore the snapshot taken before the last edit
    pub fn undo(&mut self) -> Result<()> {
        let snapshot = self.history.undo(self.buffer.text())?;
        self.buffer.restore(snapshot.into_string());
        Ok(())
    }

    /// Re-apply the last undone edit
    pub fn redo(&mut self) -> Result<()> {
        let snapshot = self.history.redo(self.buffer.text())?;
        self.buffer.restore(snapshot.into_string());
        Ok(())
    }

    fn visible_lines(&self, first: usize, count: usize) -> Vec<NumberedLine> {
        self.buffer
            .numbered_lines(first, count)
            .into_iter()
            .map(|(number, line)| (number, line.to_string()))
            .collect()
    }

    /// Run a mutating operation, committing the pre-edit snapshot on success
    fn edit<T>(&mut self, op: impl FnOnce(&mut EditBuffer) -> Result<T>) -> Result<T> {
        let snapshot = Snapshot::capture(self.buffer.text());
        let revision = self.buffer.revision();

        let result = op(&mut self.buffer)?;
        if self.buffer.revision() != revision {
            self.history.record(snapshot);
        }
        Ok(result)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(text: &str) -> Session {
        let mut session = Session::default();
        session.buffer = EditBuffer::from_text(text);
        session
    }

    #[test]
    fn test_reports_status() {
        assert!(Command::Undo.reports_status());
        assert!(Command::Redo.reports_status());
        assert!(Command::Goto(3).reports_status());
        assert!(Command::Scroll(-1).reports_status());
        assert!(Command::Paste { offset: 0 }.reports_status());
        assert!(!Command::Find("x".into()).reports_status());
        assert!(!Command::Highlight.reports_status());
        assert!(!Command::Status.reports_status());
    }

    #[test]
    fn test_insert_by_line_col() {
        let mut session = session_with("ab\ncd\nef\n");
        assert_eq!(session.insert(2, 1, "X").unwrap(), 3);
        assert_eq!(session.buffer().text(), "ab\nXcd\nef\n");
        assert_eq!(session.status().column, 2);
    }

    #[test]
    fn test_undo_restores_pre_edit_content() {
        let mut session = session_with("Hello");
        session.insert(1, 6, " World").unwrap();
        assert_eq!(session.buffer().text(), "Hello World");

        session.undo().unwrap();
        assert_eq!(session.buffer().text(), "Hello");
        assert!(session.buffer().is_modified());

        session.redo().unwrap();
        assert_eq!(session.buffer().text(), "Hello World");
    }

    #[test]
    fn test_k_undos_then_k_redos() {
        let mut session = session_with("base\n");
        session.insert(1, 1, "1").unwrap();
        session.delete(DeleteKind::Char, 1, 2).unwrap();
        assert_eq!(session.replace_all("1", "one "), 1);
        session.buffer.copy(0, 3).unwrap();
        session.paste(0).unwrap();
        let final_text = session.buffer().text().to_string();

        for _ in 0..4 {
            session.undo().unwrap();
        }
        assert_eq!(session.buffer().text(), "base\n");
        assert!(matches!(session.undo(), Err(EditorError::NothingToUndo)));

        for _ in 0..4 {
            session.redo().unwrap();
        }
        assert_eq!(session.buffer().text(), final_text);
        assert!(matches!(session.redo(), Err(EditorError::NothingToRedo)));
    }

    #[test]
    fn test_new_edit_after_undo_clears_redo() {
        let mut session = session_with("abc");
        session.insert(1, 4, "d").unwrap();
        session.undo().unwrap();
        session.insert(1, 1, "z").unwrap();

        assert!(matches!(session.redo(), Err(EditorError::NothingToRedo)));
        assert_eq!(session.buffer().text(), "zabc");
    }

    #[test]
    fn test_failed_edit_leaves_history_alone() {
        let mut session = session_with("abc");
        assert!(session.paste(10).is_err());
        assert!(session.delete(DeleteKind::Char, 5, 1).is_err());
        assert_eq!(session.history().undo_depth(), 0);
        assert!(!session.buffer().is_modified());
    }

    #[test]
    fn test_noop_replace_is_not_recorded() {
        let mut session = session_with("abc");
        assert_eq!(session.replace_all("zz", "y"), 0);
        assert_eq!(session.replace_all("", "y"), 0);
        assert_eq!(session.history().undo_depth(), 0);
        assert!(!session.buffer().is_modified());
    }

    #[test]
    fn test_undo_on_empty_history() {
        let mut session = session_with("keep");
        assert!(matches!(session.undo(), Err(EditorError::NothingToUndo)));
        assert_eq!(session.buffer().text(), "keep");
    }

    #[test]
    fn test_delete_line_via_session() {
        let mut session = session_with("one\nhello\nthree\n");
        assert_eq!(session.delete(DeleteKind::Line, 2, 3).unwrap(), "hello");
        assert_eq!(session.buffer().text(), "one\n\nthree\n");
        session.undo().unwrap();
        assert_eq!(session.buffer().text(), "one\nhello\nthree\n");
    }

    #[tokio::test]
    async fn test_execute_navigation() {
        let mut session = session_with("a\nb\nc\n");
        assert_eq!(
            session.execute(Command::Goto(2)).await.unwrap(),
            Outcome::Line { number: 2, text: "b".to_string() }
        );
        assert!(matches!(
            session.execute(Command::Goto(4)).await,
            Err(EditorError::OutOfRange { line: 4, .. })
        ));
        assert_eq!(
            session.execute(Command::Find("c".into())).await.unwrap(),
            Outcome::Found(Some(4))
        );

        match session.execute(Command::Scroll(1)).await.unwrap() {
            Outcome::Scrolled { first_line, lines } => {
                assert_eq!(first_line, 2);
                assert_eq!(lines, vec![(2, "b".to_string()), (3, "c".to_string())]);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_file_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "x = 1\r\ny = 2").unwrap();

        let mut session = Session::default();
        match session.execute(Command::Open(path.clone())).await.unwrap() {
            Outcome::Opened { lines, .. } => {
                assert_eq!(lines, vec![(1, "x = 1".to_string()), (2, "y = 2".to_string())]);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(session.buffer().text(), "x = 1\ny = 2\n");

        session.insert(3, 1, "z = 3\n").unwrap();
        assert!(session.history().can_undo());
        assert!(session.status().modified);

        let saved = session.execute(Command::Save(None)).await.unwrap();
        assert_eq!(saved, Outcome::Saved(path.clone()));
        assert!(!session.history().can_undo());
        assert!(!session.status().modified);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "x = 1\ny = 2\nz = 3\n");

        session.insert(1, 1, "# ").unwrap();
        session
            .execute(Command::Close { save_changes: true })
            .await
            .unwrap();
        assert_eq!(session.buffer().text(), "");
        assert_eq!(session.status().file, None);
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("# x"));
    }

    #[tokio::test]
    async fn test_save_without_file() {
        let mut session = session_with("text");
        assert!(matches!(
            session.execute(Command::Save(None)).await,
            Err(EditorError::NoFileOpen)
        ));
    }

    #[tokio::test]
    async fn test_create_resets_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.py");

        let mut session = session_with("scratch");
        session.insert(1, 1, "more ").unwrap();
        session.execute(Command::Create(path.clone())).await.unwrap();

        assert!(path.exists());
        assert_eq!(session.buffer().text(), "");
        assert!(!session.history().can_undo());
        assert_eq!(session.buffer().path(), Some(path.as_path()));
    }
}
