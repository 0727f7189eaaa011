//! The observable editing context.
//!
//! [`EditingContext`] is the state UI controls bind to: the selection, the
//! active styles, the font, paragraph style and colors at the selection,
//! and the editable/focus/undo flags. It is written from two directions:
//!
//! - UI code calls [`send`](EditingContext::send) for commands and the
//!   direct setters (`set_font_size`, ...) for bound fields. Both queue a
//!   [`Msg`] in the inbox for the coordinator.
//! - The coordinator writes whole [`ContextSnapshot`]s read from the buffer
//!   via [`apply_snapshot`](EditingContext::apply_snapshot). Those writes
//!   never reach the inbox, so a sync cannot trigger another sync.

use std::collections::{BTreeMap, VecDeque};

use crate::attributes::{
    Color, ColorKind, Font, ParagraphStyle, StyleSet, StyledText, TextAlignment, TextRange,
    TextStyle,
};
use crate::messages::{Command, ContextChange, Msg};

/// Who performed a write to the context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// UI code; the write is forwarded to the buffer
    User,
    /// The coordinator, mirroring the buffer; never forwarded
    Sync,
}

/// Everything the context mirrors from the buffer at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextSnapshot {
    pub selected_range: TextRange,
    pub styles: StyleSet,
    pub font_name: String,
    pub font_size: f32,
    pub paragraph_style: ParagraphStyle,
    pub colors: BTreeMap<ColorKind, Color>,
    pub highlighted_range: Option<TextRange>,
    pub is_editable: bool,
    pub is_editing_text: bool,
    pub can_undo: bool,
    pub can_redo: bool,
    pub text: StyledText,
}

impl Default for ContextSnapshot {
    fn default() -> Self {
        let font = Font::default();
        Self {
            selected_range: TextRange::caret(0),
            styles: StyleSet::new(),
            font_name: font.name,
            font_size: font.size,
            paragraph_style: ParagraphStyle::default(),
            colors: BTreeMap::new(),
            highlighted_range: None,
            is_editable: true,
            is_editing_text: false,
            can_undo: false,
            can_redo: false,
            text: StyledText::new(),
        }
    }
}

impl ContextSnapshot {
    pub fn has_selected_range(&self) -> bool {
        !self.selected_range.is_empty()
    }

    pub fn color(&self, kind: ColorKind) -> Option<Color> {
        self.colors.get(&kind).copied()
    }
}

/// Session-scoped observable editing state.
#[derive(Debug, Clone, Default)]
pub struct EditingContext {
    state: ContextSnapshot,
    revision: u64,
    inbox: VecDeque<Msg>,
    updates: Vec<ContextSnapshot>,
}

impl EditingContext {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The current state as one value
    pub fn snapshot(&self) -> &ContextSnapshot {
        &self.state
    }

    /// Number of syncs applied so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn selected_range(&self) -> TextRange {
        self.state.selected_range
    }

    pub fn has_selected_range(&self) -> bool {
        self.state.has_selected_range()
    }

    pub fn styles(&self) -> &StyleSet {
        &self.state.styles
    }

    pub fn has_style(&self, style: TextStyle) -> bool {
        self.state.styles.has(style)
    }

    pub fn font_name(&self) -> &str {
        &self.state.font_name
    }

    pub fn font_size(&self) -> f32 {
        self.state.font_size
    }

    pub fn paragraph_style(&self) -> &ParagraphStyle {
        &self.state.paragraph_style
    }

    pub fn alignment(&self) -> TextAlignment {
        self.state.paragraph_style.alignment
    }

    /// A paragraph style field, read through `field`
    pub fn paragraph_style_value<T>(&self, field: impl FnOnce(&ParagraphStyle) -> T) -> T {
        field(&self.state.paragraph_style)
    }

    pub fn color(&self, kind: ColorKind) -> Option<Color> {
        self.state.color(kind)
    }

    pub fn highlighted_range(&self) -> Option<TextRange> {
        self.state.highlighted_range
    }

    pub fn is_editable(&self) -> bool {
        self.state.is_editable
    }

    pub fn is_editing_text(&self) -> bool {
        self.state.is_editing_text
    }

    /// Copy needs something selected
    pub fn can_copy(&self) -> bool {
        self.has_selected_range()
    }

    pub fn can_undo(&self) -> bool {
        self.state.can_undo
    }

    pub fn can_redo(&self) -> bool {
        self.state.can_redo
    }

    pub fn text(&self) -> &StyledText {
        &self.state.text
    }

    // =========================================================================
    // User writes
    // =========================================================================

    /// Queue a command for the coordinator
    pub fn send(&mut self, command: Command) {
        tracing::trace!(target: "command", ?command, "queued");
        self.inbox.push_back(Msg::Command(command));
    }

    pub fn set_font_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.state.font_name == name {
            return;
        }
        self.state.font_name = name.clone();
        self.push_change(ContextChange::FontName(name));
    }

    pub fn set_font_size(&mut self, size: f32) {
        if self.state.font_size == size {
            return;
        }
        self.state.font_size = size;
        self.push_change(ContextChange::FontSize(size));
    }

    pub fn set_paragraph_style(&mut self, style: ParagraphStyle) {
        if self.state.paragraph_style == style {
            return;
        }
        self.state.paragraph_style = style.clone();
        self.push_change(ContextChange::ParagraphStyle(style));
    }

    pub fn set_is_editable(&mut self, editable: bool) {
        if self.state.is_editable == editable {
            return;
        }
        self.state.is_editable = editable;
        self.push_change(ContextChange::IsEditable(editable));
    }

    pub fn set_is_editing_text(&mut self, editing: bool) {
        if self.state.is_editing_text == editing {
            return;
        }
        self.state.is_editing_text = editing;
        self.push_change(ContextChange::IsEditingText(editing));
    }

    pub fn set_highlighted_range(&mut self, range: Option<TextRange>) {
        if self.state.highlighted_range == range {
            return;
        }
        self.state.highlighted_range = range;
        self.push_change(ContextChange::HighlightedRange(range));
    }

    fn push_change(&mut self, change: ContextChange) {
        tracing::trace!(target: "sync", origin = ?Origin::User, ?change, "context field written");
        self.inbox.push_back(Msg::ContextChanged(change));
    }

    // =========================================================================
    // Inbox / outbox
    // =========================================================================

    /// Take the oldest queued message
    pub fn pop_message(&mut self) -> Option<Msg> {
        self.inbox.pop_front()
    }

    pub fn has_pending_messages(&self) -> bool {
        !self.inbox.is_empty()
    }

    pub fn pending_messages(&self) -> usize {
        self.inbox.len()
    }

    /// Mirror the buffer. Used by the coordinator only; queues nothing.
    pub fn apply_snapshot(&mut self, snapshot: ContextSnapshot) {
        tracing::trace!(
            target: "sync",
            origin = ?Origin::Sync,
            revision = self.revision + 1,
            selection = %snapshot.selected_range,
            "context updated"
        );
        self.state = snapshot.clone();
        self.revision += 1;
        self.updates.push(snapshot);
    }

    /// Drain the snapshots published since the last call
    pub fn take_updates(&mut self) -> Vec<ContextSnapshot> {
        std::mem::take(&mut self.updates)
    }
}
