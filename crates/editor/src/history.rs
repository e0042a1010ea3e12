//! Undo/Redo History
//!
//! Two linear stacks of whole-buffer snapshots. A snapshot is taken before
//! each mutating edit; committing it invalidates everything on the redo
//! stack.

use tracing::{debug, trace};

use linedit_core::{EditorError, Result};

/// Immutable copy of the buffer text at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    content: Box<str>,
}

impl Snapshot {
    pub fn capture(text: &str) -> Self {
        Self {
            content: text.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn into_string(self) -> String {
        self.content.into_string()
    }
}

/// Undo and redo stacks for one editing session
#[derive(Debug, Clone, Default)]
pub struct HistoryManager {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    /// Maximum depth of each stack, unbounded if `None`
    limit: Option<usize>,
}

impl HistoryManager {
    /// Create an unbounded history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history keeping at most `limit` snapshots per stack
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Commit the pre-edit snapshot of a mutating operation
    pub fn record(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();
        Self::trim(&mut self.undo_stack, self.limit);
        trace!(depth = self.undo_stack.len(), "snapshot recorded");
    }

    /// Step back: `current` moves onto the redo stack and the snapshot to
    /// restore is returned
    pub fn undo(&mut self, current: &str) -> Result<Snapshot> {
        let previous = self.undo_stack.pop().ok_or(EditorError::NothingToUndo)?;
        self.redo_stack.push(Snapshot::capture(current));
        Self::trim(&mut self.redo_stack, self.limit);
        debug!(undo = self.undo_stack.len(), redo = self.redo_stack.len(), "undo");
        Ok(previous)
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current: &str) -> Result<Snapshot> {
        let next = self.redo_stack.pop().ok_or(EditorError::NothingToRedo)?;
        self.undo_stack.push(Snapshot::capture(current));
        Self::trim(&mut self.undo_stack, self.limit);
        debug!(undo = self.undo_stack.len(), redo = self.redo_stack.len(), "redo");
        Ok(next)
    }

    /// Forget all history, as on open/create/save/close
    pub fn reset(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    fn trim(stack: &mut Vec<Snapshot>, limit: Option<usize>) {
        if let Some(limit) = limit {
            let excess = stack.len().saturating_sub(limit);
            stack.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo() {
        let mut history = HistoryManager::new();
        history.record(Snapshot::capture("Hello"));

        let restored = history.undo("Hello World").unwrap();
        assert_eq!(restored.as_str(), "Hello");
        assert!(history.can_redo());

        let redone = history.redo("Hello").unwrap();
        assert_eq!(redone.as_str(), "Hello World");
        assert_eq!(history.undo_depth(), 1);
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn test_empty_history() {
        let mut history = HistoryManager::new();
        assert!(matches!(history.undo("x"), Err(EditorError::NothingToUndo)));
        assert!(matches!(history.redo("x"), Err(EditorError::NothingToRedo)));
        assert_eq!(history.undo_depth(), 0);
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = HistoryManager::new();
        history.record(Snapshot::capture("a"));
        history.undo("ab").unwrap();
        assert!(history.can_redo());

        history.record(Snapshot::capture("a"));
        assert!(!history.can_redo());
        assert!(matches!(history.redo("ac"), Err(EditorError::NothingToRedo)));
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = HistoryManager::with_limit(Some(2));
        history.record(Snapshot::capture("1"));
        history.record(Snapshot::capture("2"));
        history.record(Snapshot::capture("3"));
        assert_eq!(history.undo_depth(), 2);
        assert_eq!(history.undo("4").unwrap().as_str(), "3");
        assert_eq!(history.undo("3").unwrap().as_str(), "2");
        assert!(history.undo("2").is_err());
    }

    #[test]
    fn test_reset() {
        let mut history = HistoryManager::new();
        history.record(Snapshot::capture("a"));
        history.record(Snapshot::capture("b"));
        history.undo("c").unwrap();
        history.reset();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
