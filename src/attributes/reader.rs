//! Read access to rich text attributes.
//!
//! [`AttributeReader`] is implemented by anything that can expose a
//! [`StyledText`], which gives it the full set of typed attribute lookups.

use super::color::{Color, ColorKind};
use super::font::Font;
use super::key::{AttributeKey, AttributeMap, AttributeType};
use super::paragraph::ParagraphStyle;
use super::range::{safe_range, TextRange};
use super::style::{StyleSet, TextStyle};
use super::styled_text::StyledText;

/// Typed attribute lookups over a styled text.
///
/// Lookups at a range read the attributes of the first character in the
/// range; per-character differences inside the range are not merged.
pub trait AttributeReader {
    /// The text to read attributes from
    fn styled_text(&self) -> &StyledText;

    /// All attributes at `range`; empty for an empty text
    fn attributes(&self, range: TextRange) -> AttributeMap {
        let text = self.styled_text();
        if text.is_empty() {
            return AttributeMap::new();
        }
        let range = safe_range(range, text.len(), true);
        text.attributes_at_index(range.location)
    }

    /// A single typed attribute at `range`; `None` if absent or of another type
    fn attribute<T: AttributeType>(&self, key: &AttributeKey, range: TextRange) -> Option<T> {
        self.attributes(range).get_as(key)
    }

    /// Font over a non-empty `range`
    fn font_at(&self, range: TextRange) -> Option<Font> {
        if range.is_empty() {
            return None;
        }
        self.attribute(&AttributeKey::Font, range)
    }

    /// Color of `kind` over a non-empty `range`
    fn color_at(&self, kind: ColorKind, range: TextRange) -> Option<Color> {
        if range.is_empty() {
            return None;
        }
        self.attribute(&kind.attribute_key(), range)
    }

    /// Paragraph style over a non-empty `range`
    fn paragraph_style_at(&self, range: TextRange) -> Option<ParagraphStyle> {
        if range.is_empty() {
            return None;
        }
        self.attribute(&AttributeKey::ParagraphStyle, range)
    }

    /// Styles over a non-empty `range`; a caret has no styles of its own
    fn styles_at(&self, range: TextRange) -> StyleSet {
        if range.is_empty() {
            return StyleSet::new();
        }
        StyleSet::from_attributes(&self.attributes(range))
    }

    fn has_style(&self, style: TextStyle, range: TextRange) -> bool {
        self.styles_at(range).has(style)
    }
}

impl AttributeReader for StyledText {
    fn styled_text(&self) -> &StyledText {
        self
    }
}
