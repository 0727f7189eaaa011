//! Message types for the Elm-style architecture
//!
//! Everything that can change an editor session arrives as a [`Msg`]:
//! commands issued by UI controls, direct writes to context fields, and
//! notifications from the host text buffer.

use crate::attributes::{
    Color, ColorKind, ImageAttachment, ParagraphStyle, ParagraphStyleUpdate, StyledText,
    TextAlignment, TextRange, TextStyle,
};

/// Content handed over by the clipboard or a drop.
#[derive(Debug, Clone, PartialEq)]
pub enum PasteContent {
    /// Text, plain or styled. Keys it leaves unset inherit the surrounding style.
    Text(StyledText),
    /// An image, inserted as an attachment character
    Image(ImageAttachment),
}

/// An editing action requested by a UI control.
///
/// Commands carry no buffer reference. Unless a command names a range, it
/// targets the current selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // === Styling ===
    /// Turn a style on or off
    SetStyle(TextStyle, bool),
    /// Flip a style based on what the selection currently has
    ToggleStyle(TextStyle),
    /// Set the font name
    SetFontName(String),
    /// Set the font size in points
    SetFontSize(f32),
    /// Grow or shrink the font size by a number of points
    StepFontSize(f32),
    /// Merge the present fields into the paragraph style
    SetParagraphStyle(ParagraphStyleUpdate),
    /// Set the paragraph alignment
    SetAlignment(TextAlignment),
    /// Set or clear (`None`) a color
    SetColor(ColorKind, Option<Color>),

    // === Selection ===
    /// Select a range (clamped to the text)
    SelectRange(TextRange),
    /// Highlight a range, or clear the highlight with `None`
    HighlightRange(Option<TextRange>),

    // === Clipboard ===
    /// Copy the selection to the clipboard
    Copy,
    /// Paste content at `at`, or over the selection when `at` is `None`
    Paste {
        content: PasteContent,
        at: Option<usize>,
    },

    // === Editing ===
    /// Insert plain text with the surrounding style
    InsertText { text: String, at: Option<usize> },
    /// Delete a range (clamped); the selection collapses to the deletion point
    DeleteRange(TextRange),
    /// Replace the whole text
    SetAttributedText(StyledText),

    // === Undo/Redo ===
    Undo,
    Redo,
}

impl Command {
    /// Check if this command changes the text or its attributes
    pub fn is_editing(&self) -> bool {
        !matches!(
            self,
            Command::SelectRange(_) | Command::Copy | Command::HighlightRange(_)
        )
    }

    /// Check if this command only changes styling
    pub fn is_styling(&self) -> bool {
        matches!(
            self,
            Command::SetStyle(..)
                | Command::ToggleStyle(_)
                | Command::SetFontName(_)
                | Command::SetFontSize(_)
                | Command::StepFontSize(_)
                | Command::SetParagraphStyle(_)
                | Command::SetAlignment(_)
                | Command::SetColor(..)
        )
    }

    /// The range this command names explicitly, if any
    pub fn explicit_range(&self) -> Option<TextRange> {
        match self {
            Command::SelectRange(range) | Command::DeleteRange(range) => Some(*range),
            Command::HighlightRange(range) => *range,
            Command::Paste { at: Some(at), .. } | Command::InsertText { at: Some(at), .. } => {
                Some(TextRange::caret(*at))
            }
            _ => None,
        }
    }
}

/// A direct write to one of the context fields that UI bindings may set.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextChange {
    FontName(String),
    FontSize(f32),
    ParagraphStyle(ParagraphStyle),
    IsEditable(bool),
    IsEditingText(bool),
    HighlightedRange(Option<TextRange>),
}

/// Notifications from the host text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferEvent {
    /// The user changed the text
    TextChanged,
    /// The user moved the selection
    SelectionChanged,
    /// The buffer gained focus
    DidBeginEditing,
    /// The buffer lost focus
    DidEndEditing,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Command(Command),
    ContextChanged(ContextChange),
    Buffer(BufferEvent),
    /// A debounced sync timer fired
    SyncDue { generation: u64 },
}

impl From<Command> for Msg {
    fn from(command: Command) -> Self {
        Msg::Command(command)
    }
}

impl From<ContextChange> for Msg {
    fn from(change: ContextChange) -> Self {
        Msg::ContextChanged(change)
    }
}

impl From<BufferEvent> for Msg {
    fn from(event: BufferEvent) -> Self {
        Msg::Buffer(event)
    }
}
