//! Binary text styles (bold, italic, underlined, strikethrough).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::font::Font;
use super::key::{AttributeKey, AttributeMap, AttributeValue, LineStyle};

/// A binary style that is either on or off for a range of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    Bold,
    Italic,
    Underlined,
    Strikethrough,
}

impl TextStyle {
    pub const ALL: [TextStyle; 4] = [
        TextStyle::Bold,
        TextStyle::Italic,
        TextStyle::Underlined,
        TextStyle::Strikethrough,
    ];

    /// The attribute key this style is stored under
    pub fn attribute_key(&self) -> AttributeKey {
        match self {
            TextStyle::Bold | TextStyle::Italic => AttributeKey::Font,
            TextStyle::Underlined => AttributeKey::UnderlineStyle,
            TextStyle::Strikethrough => AttributeKey::StrikethroughStyle,
        }
    }

    /// Check whether this style is active in `attributes`
    pub fn is_active_in(&self, attributes: &AttributeMap) -> bool {
        match self {
            TextStyle::Bold => attributes.font().is_some_and(|f| f.bold),
            TextStyle::Italic => attributes.font().is_some_and(|f| f.italic),
            TextStyle::Underlined => attributes
                .get_as::<LineStyle>(&AttributeKey::UnderlineStyle)
                .is_some_and(|s| s.is_visible()),
            TextStyle::Strikethrough => attributes
                .get_as::<LineStyle>(&AttributeKey::StrikethroughStyle)
                .is_some_and(|s| s.is_visible()),
        }
    }

    /// Turn this style on or off in `attributes`.
    ///
    /// Bold and italic need a font to modify; `fallback` is used when the
    /// attributes carry none.
    pub fn apply_to(&self, attributes: &mut AttributeMap, on: bool, fallback: &Font) {
        match self {
            TextStyle::Bold => attributes.update_font(fallback, |font| font.bold = on),
            TextStyle::Italic => attributes.update_font(fallback, |font| font.italic = on),
            TextStyle::Underlined | TextStyle::Strikethrough => {
                let key = self.attribute_key();
                if on {
                    attributes.insert(key, AttributeValue::Line(LineStyle::Single));
                } else {
                    attributes.remove(&key);
                }
            }
        }
    }
}

/// The set of styles active at a position or selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StyleSet {
    styles: BTreeSet<TextStyle>,
}

impl StyleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every style that is active in `attributes`
    pub fn from_attributes(attributes: &AttributeMap) -> Self {
        TextStyle::ALL
            .into_iter()
            .filter(|style| style.is_active_in(attributes))
            .collect()
    }

    pub fn has(&self, style: TextStyle) -> bool {
        self.styles.contains(&style)
    }

    pub fn insert(&mut self, style: TextStyle) -> bool {
        self.styles.insert(style)
    }

    pub fn remove(&mut self, style: TextStyle) -> bool {
        self.styles.remove(&style)
    }

    pub fn set(&mut self, style: TextStyle, on: bool) {
        if on {
            self.styles.insert(style);
        } else {
            self.styles.remove(&style);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TextStyle> + '_ {
        self.styles.iter().copied()
    }
}

impl FromIterator<TextStyle> for StyleSet {
    fn from_iter<I: IntoIterator<Item = TextStyle>>(iter: I) -> Self {
        Self {
            styles: iter.into_iter().collect(),
        }
    }
}
