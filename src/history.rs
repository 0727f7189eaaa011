//! Edit history (undo/redo) for in-memory buffers.
//!
//! Operations store whole-text snapshots. Attribute-only edits do not have a
//! cheap textual inverse, and rich text buffers edited through this crate
//! are document sized, so snapshots keep undo exact for both text and
//! styling changes.

use crate::attributes::{StyledText, TextRange};

/// A single edit that can be undone/redone.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOperation {
    /// Text before the edit
    pub before: StyledText,
    /// Text after the edit
    pub after: StyledText,
    /// Selection before the edit
    pub selection_before: TextRange,
    /// Selection after the edit
    pub selection_after: TextRange,
}

impl EditOperation {
    pub fn new(
        before: StyledText,
        after: StyledText,
        selection_before: TextRange,
        selection_after: TextRange,
    ) -> Self {
        Self {
            before,
            after,
            selection_before,
            selection_after,
        }
    }

    /// Get the inverse operation
    pub fn inverse(&self) -> Self {
        Self {
            before: self.after.clone(),
            after: self.before.clone(),
            selection_before: self.selection_after,
            selection_after: self.selection_before,
        }
    }
}

/// Edit history with undo/redo stacks.
///
/// Both stacks hold operations whose `before` side is the state to restore:
/// undoing pops an operation and moves its inverse to the redo stack, and
/// redoing does the reverse.
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: Vec<EditOperation>,
    redo_stack: Vec<EditOperation>,
    max_size: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EditHistory {
    pub const DEFAULT_MAX_SIZE: usize = 1000;

    /// Create a new edit history with default max size
    pub fn new() -> Self {
        Self::with_max_size(Self::DEFAULT_MAX_SIZE)
    }

    /// Create a new edit history with specified max size
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    /// Push an operation onto the undo stack (clears redo stack)
    pub fn push(&mut self, op: EditOperation) {
        self.redo_stack.clear();
        self.undo_stack.push(op);

        if self.undo_stack.len() > self.max_size {
            let excess = self.undo_stack.len() - self.max_size;
            self.undo_stack.drain(..excess);
        }
    }

    /// Pop the latest operation to undo; its inverse moves to the redo stack
    pub fn pop_undo(&mut self) -> Option<EditOperation> {
        let op = self.undo_stack.pop()?;
        self.redo_stack.push(op.inverse());
        Some(op)
    }

    /// Pop the latest undone operation; its inverse moves back to undo
    pub fn pop_redo(&mut self) -> Option<EditOperation> {
        let op = self.redo_stack.pop()?;
        self.undo_stack.push(op.inverse());
        Some(op)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(before: &str, after: &str) -> EditOperation {
        EditOperation::new(
            StyledText::plain(before),
            StyledText::plain(after),
            TextRange::caret(before.chars().count()),
            TextRange::caret(after.chars().count()),
        )
    }

    #[test]
    fn test_edit_operation_inverse() {
        let op = op("old", "new text");
        let inv = op.inverse();
        assert_eq!(inv.before, op.after);
        assert_eq!(inv.after, op.before);
        assert_eq!(inv.selection_before, op.selection_after);
        assert_eq!(inv.selection_after, op.selection_before);
    }

    #[test]
    fn test_history_undo_redo() {
        let mut history = EditHistory::new();
        history.push(op("", "a"));
        history.push(op("a", "ab"));

        assert_eq!(history.undo_count(), 2);
        assert!(!history.can_redo());

        // Undo restores the `before` side of the latest edit
        let undone = history.pop_undo().unwrap();
        assert_eq!(undone.before.string(), "a");
        assert!(history.can_redo());

        // Redo hands back the inverse, whose `before` is the redone state
        let redone = history.pop_redo().unwrap();
        assert_eq!(redone.before.string(), "ab");
        assert!(!history.can_redo());
        assert_eq!(history.undo_count(), 2);
    }

    #[test]
    fn test_history_push_clears_redo() {
        let mut history = EditHistory::new();
        history.push(op("", "a"));
        history.pop_undo();
        assert!(history.can_redo());

        history.push(op("", "b"));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_history_max_size() {
        let mut history = EditHistory::with_max_size(3);
        for i in 0..5 {
            history.push(op(&i.to_string(), &(i + 1).to_string()));
        }
        assert_eq!(history.undo_count(), 3);
        // Oldest entries were dropped
        let mut last = None;
        while let Some(op) = history.pop_undo() {
            last = Some(op);
        }
        assert_eq!(last.unwrap().before.string(), "2");
    }
}
