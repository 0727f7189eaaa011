//! In-memory [`TextBuffer`] implementation.

use crate::attributes::{AttributeMap, AttributeReader, StyledText, TextRange};
use crate::config::HighlightingStyle;
use crate::history::{EditHistory, EditOperation};

use super::{Highlighter, TextBuffer};

/// A [`TextBuffer`] backed by a [`StyledText`] and an [`EditHistory`].
///
/// Besides the trait it offers the keystroke-level entry points a host text
/// view would drive ([`type_text`](Self::type_text),
/// [`delete_backward`](Self::delete_backward)). Like a platform text view it
/// refreshes the typing attributes from the text whenever the selection moves.
///
/// A highlight is lifted before every recorded edit and painted back only
/// when the characters are unchanged, so history snapshots never carry it.
#[derive(Debug, Clone)]
pub struct MemoryBuffer {
    text: StyledText,
    selection: TextRange,
    typing_attributes: AttributeMap,
    editable: bool,
    editing: bool,
    history: EditHistory,
    highlighter: Highlighter,
}

impl Default for MemoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBuffer {
    pub fn new() -> Self {
        Self::from_styled_text(StyledText::new())
    }

    /// Create a buffer holding plain `text`
    pub fn from_text(text: &str) -> Self {
        Self::from_styled_text(StyledText::plain(text))
    }

    pub fn from_styled_text(text: StyledText) -> Self {
        let mut buffer = Self {
            text,
            selection: TextRange::caret(0),
            typing_attributes: AttributeMap::new(),
            editable: true,
            editing: false,
            history: EditHistory::new(),
            highlighter: Highlighter::default(),
        };
        buffer.refresh_typing_attributes();
        buffer
    }

    /// Replace the history with one that keeps at most `max_size` edits
    pub fn with_history_limit(mut self, max_size: usize) -> Self {
        self.history = EditHistory::with_max_size(max_size);
        self
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// Type `text` as the user would: replace the selection and give the new
    /// characters the typing attributes. Ignored when not editable.
    pub fn type_text(&mut self, text: &str) -> bool {
        if !self.editable {
            tracing::debug!("type_text ignored, buffer is not editable");
            return false;
        }
        let selection = self.selection;
        let attributes = self.typing_attributes.clone();
        self.edit(|styled| {
            let deleted = styled.delete(selection);
            let inserted = styled.insert(deleted.location, text, &attributes);
            Some(TextRange::caret(inserted.end()))
        });
        true
    }

    /// Backspace: delete the selection, or the character before the caret
    pub fn delete_backward(&mut self) -> bool {
        if !self.editable {
            return false;
        }
        let selection = self.selection;
        let target = if selection.is_empty() {
            if selection.location == 0 {
                return false;
            }
            TextRange::new(selection.location - 1, 1)
        } else {
            selection
        };
        self.edit(|styled| {
            let deleted = styled.delete(target);
            Some(TextRange::caret(deleted.location))
        });
        true
    }

    fn apply_selection(&mut self, range: TextRange) {
        self.selection = range.clamped(self.text.len());
        self.refresh_typing_attributes();
    }

    /// A caret types with the attributes of the character before it; a
    /// selection with those of its first character.
    fn refresh_typing_attributes(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let index = if self.selection.is_empty() {
            self.selection.location.saturating_sub(1)
        } else {
            self.selection.location
        };
        let index = index.min(self.text.len() - 1);
        self.typing_attributes = self.highlighter.attributes_at(&self.text, index);
    }

    fn restore(&mut self, text: StyledText, selection: TextRange) {
        self.highlighter.forget();
        self.text = text;
        self.apply_selection(selection);
    }
}

impl AttributeReader for MemoryBuffer {
    fn styled_text(&self) -> &StyledText {
        &self.text
    }
}

impl TextBuffer for MemoryBuffer {
    fn selected_range(&self) -> TextRange {
        self.selection
    }

    fn set_selected_range(&mut self, range: TextRange) {
        self.apply_selection(range);
    }

    fn typing_attributes(&self) -> &AttributeMap {
        &self.typing_attributes
    }

    fn set_typing_attributes(&mut self, attributes: AttributeMap) {
        self.typing_attributes = attributes;
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    fn is_editing(&self) -> bool {
        self.editing
    }

    fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
    }

    fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn undo(&mut self) -> bool {
        match self.history.pop_undo() {
            Some(op) => {
                self.restore(op.before, op.selection_before);
                true
            }
            None => false,
        }
    }

    fn redo(&mut self) -> bool {
        match self.history.pop_redo() {
            Some(op) => {
                self.restore(op.before, op.selection_before);
                true
            }
            None => false,
        }
    }

    fn edit<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut StyledText) -> Option<TextRange>,
    {
        let highlighted = self.highlighter.lift(&mut self.text);
        let before = self.text.clone();
        let selection_before = self.selection;
        let selection = edit(&mut self.text).unwrap_or(selection_before);
        let selection_after = selection.clamped(self.text.len());

        let same_characters = self.text.rope() == before.rope();
        if self.text != before {
            self.history.push(EditOperation::new(
                before,
                self.text.clone(),
                selection_before,
                selection_after,
            ));
        }

        if let Some(range) = highlighted {
            if same_characters {
                self.highlighter.repaint(&mut self.text, range);
            } else {
                tracing::debug!(target: "highlight", %range, "characters changed, highlight cleared");
            }
        }
        self.apply_selection(selection_after);
    }

    fn set_highlight(&mut self, range: Option<TextRange>, style: &HighlightingStyle) {
        self.highlighter.set(&mut self.text, range, style);
        self.refresh_typing_attributes();
    }

    fn highlighted_range(&self) -> Option<TextRange> {
        self.highlighter.range()
    }

    fn content(&self) -> StyledText {
        self.highlighter.unpainted(&self.text)
    }

    fn content_attributes_at(&self, index: usize) -> AttributeMap {
        self.highlighter.attributes_at(&self.text, index)
    }

    fn set_styled_text(&mut self, text: StyledText) {
        self.highlighter.forget();
        self.text = text;
        self.history.clear();
        let selection = self.selection;
        self.apply_selection(selection);
    }
}
