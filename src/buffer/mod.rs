//! The host text buffer capability.
//!
//! The coordinator never talks to a concrete text view. It only needs the
//! operations in [`TextBuffer`]: attribute reads (via [`AttributeReader`]),
//! undoable edits of the styled text, selection, typing attributes, the
//! editable/focus flags, undo/redo history and the range highlight.
//!
//! [`MemoryBuffer`] is a complete in-memory implementation used for headless
//! editing and in tests.

mod highlight;
mod memory;

pub use highlight::{HighlightSnapshot, Highlighter};
pub use memory::MemoryBuffer;

use crate::attributes::{AttributeMap, AttributeReader, StyledText, TextRange};
use crate::config::HighlightingStyle;

/// A mutable styled text buffer owned by the host editor view.
pub trait TextBuffer: AttributeReader {
    /// Current selection; a caret has length 0
    fn selected_range(&self) -> TextRange;

    /// Move the selection. Out of bounds ranges are clamped.
    fn set_selected_range(&mut self, range: TextRange);

    /// Attributes given to text typed at a caret
    fn typing_attributes(&self) -> &AttributeMap;

    fn set_typing_attributes(&mut self, attributes: AttributeMap);

    fn is_editable(&self) -> bool;

    fn set_editable(&mut self, editable: bool);

    /// Whether the buffer has input focus
    fn is_editing(&self) -> bool;

    fn set_editing(&mut self, editing: bool);

    fn can_undo(&self) -> bool;

    fn can_redo(&self) -> bool;

    /// Undo the latest change. Returns `false` if there was nothing to undo.
    fn undo(&mut self) -> bool;

    /// Redo the latest undone change. Returns `false` if there was nothing to redo.
    fn redo(&mut self) -> bool;

    /// Perform an undoable edit of the styled text.
    ///
    /// The closure returns the selection to apply afterwards, or `None` to
    /// keep the current one (clamped to the new text).
    fn edit<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut StyledText) -> Option<TextRange>;

    /// Highlight `range` with `style`, or clear the highlight with `None`.
    ///
    /// The highlight is not undoable and never reaches the undo history or
    /// [`content`](Self::content). An edit that changes the characters
    /// clears it.
    fn set_highlight(&mut self, range: Option<TextRange>, style: &HighlightingStyle);

    fn highlighted_range(&self) -> Option<TextRange>;

    /// The text without highlight colors, as it should be copied or saved
    fn content(&self) -> StyledText {
        self.styled_text().clone()
    }

    /// Attributes at `index` without highlight colors
    fn content_attributes_at(&self, index: usize) -> AttributeMap {
        self.styled_text().attributes_at_index(index)
    }

    /// Replace the whole text, discarding undo history
    fn set_styled_text(&mut self, text: StyledText);

    /// Check if there is a non-empty selection
    fn has_selected_range(&self) -> bool {
        !self.selected_range().is_empty()
    }
}
