//! Reading the buffer state that the context mirrors.

use crate::attributes::{AttributeMap, AttributeReader, ColorKind, Font, StyleSet};
use crate::buffer::TextBuffer;
use crate::context::ContextSnapshot;

/// The attributes that describe the selection.
///
/// A caret has no characters of its own, so it reports the attributes the
/// next typed character would get.
pub fn selection_attributes<B: TextBuffer>(buffer: &B) -> AttributeMap {
    let selection = buffer.selected_range();
    if selection.is_empty() {
        buffer.typing_attributes().clone()
    } else {
        buffer.attributes(selection)
    }
}

/// Read everything the context mirrors from `buffer`
pub fn read_snapshot<B: TextBuffer>(buffer: &B, default_font: &Font) -> ContextSnapshot {
    let attributes = selection_attributes(buffer);
    let font = attributes.font().unwrap_or_else(|| default_font.clone());
    let colors = ColorKind::ALL
        .iter()
        .filter_map(|kind| attributes.color(*kind).map(|color| (*kind, color)))
        .collect();

    ContextSnapshot {
        selected_range: buffer.selected_range(),
        styles: StyleSet::from_attributes(&attributes),
        font_name: font.name,
        font_size: font.size,
        paragraph_style: attributes.paragraph_style().unwrap_or_default(),
        colors,
        highlighted_range: buffer.highlighted_range(),
        is_editable: buffer.is_editable(),
        is_editing_text: buffer.is_editing(),
        can_undo: buffer.can_undo(),
        can_redo: buffer.can_redo(),
        text: buffer.styled_text().clone(),
    }
}
