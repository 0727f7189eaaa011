//! Higher-level attribute writes on [`StyledText`].
//!
//! Fonts carry several independent fields, so changing one of them over a
//! range walks the existing font runs and rewrites each with only that
//! field changed.

use super::color::{Color, ColorKind};
use super::font::Font;
use super::key::{AttributeKey, AttributeType, AttributeValue, LineStyle};
use super::paragraph::{ParagraphStyle, ParagraphStyleUpdate};
use super::range::TextRange;
use super::style::TextStyle;
use super::styled_text::StyledText;

impl StyledText {
    /// Turn `style` on or off over `range`.
    ///
    /// Stretches without a font start from `fallback` when bold or italic
    /// is applied.
    pub fn set_style(&mut self, style: TextStyle, on: bool, range: TextRange, fallback: &Font) {
        match style {
            TextStyle::Bold => self.update_fonts(range, fallback, |font| font.bold = on),
            TextStyle::Italic => self.update_fonts(range, fallback, |font| font.italic = on),
            TextStyle::Underlined | TextStyle::Strikethrough => {
                let key = style.attribute_key();
                if on {
                    self.set_attribute(key, AttributeValue::Line(LineStyle::Single), range);
                } else {
                    self.remove_attribute(&key, range);
                }
            }
        }
    }

    pub fn set_font_name(&mut self, name: &str, range: TextRange, fallback: &Font) {
        self.update_fonts(range, fallback, |font| font.name = name.to_string());
    }

    pub fn set_font_size(&mut self, size: f32, range: TextRange, fallback: &Font) {
        let size = size.max(Font::MIN_SIZE);
        self.update_fonts(range, fallback, |font| font.size = size);
    }

    /// Set or clear (`None`) a color over `range`
    pub fn set_color(&mut self, kind: ColorKind, color: Option<Color>, range: TextRange) {
        match color {
            Some(color) => self.set_attribute(kind.attribute_key(), AttributeValue::Color(color), range),
            None => self.remove_attribute(&kind.attribute_key(), range),
        }
    }

    /// Merge `update` into the paragraph style of every paragraph that
    /// `range` touches. Fields missing from `update` are preserved.
    pub fn merge_paragraph_style(&mut self, update: &ParagraphStyleUpdate, range: TextRange) {
        for paragraph in self.paragraph_ranges(range) {
            if paragraph.is_empty() {
                continue;
            }
            let current = self
                .value_at(&AttributeKey::ParagraphStyle, paragraph.location)
                .and_then(ParagraphStyle::from_value)
                .unwrap_or_default();
            self.set_attribute(
                AttributeKey::ParagraphStyle,
                AttributeValue::ParagraphStyle(current.merged(update)),
                paragraph,
            );
        }
    }

    /// Rewrite each font run inside `range` through `update`
    fn update_fonts(&mut self, range: TextRange, fallback: &Font, update: impl Fn(&mut Font)) {
        for (segment, value) in self.segments(&AttributeKey::Font, range) {
            let mut font = value
                .as_ref()
                .and_then(Font::from_value)
                .unwrap_or_else(|| fallback.clone());
            update(&mut font);
            self.set_attribute(AttributeKey::Font, AttributeValue::Font(font), segment);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{AttributeReader, TextAlignment};

    #[test]
    fn test_bold_keeps_other_font_fields() {
        let mut text = StyledText::plain("foo bar");
        let fallback = Font::default();
        text.set_font_name("Georgia", TextRange::new(0, 3), &fallback);
        text.set_font_size(20.0, TextRange::new(4, 3), &fallback);
        text.set_style(TextStyle::Bold, true, TextRange::new(0, 7), &fallback);

        let first = text.font_at(TextRange::new(0, 1)).unwrap();
        assert_eq!(first.name, "Georgia");
        assert!(first.bold);
        let space = text.font_at(TextRange::new(3, 1)).unwrap();
        assert_eq!(space, fallback.clone().bold(true));
        let last = text.font_at(TextRange::new(4, 1)).unwrap();
        assert_eq!(last.size, 20.0);
        assert!(last.bold);
    }

    #[test]
    fn test_underline_on_off() {
        let mut text = StyledText::plain("abc");
        let fallback = Font::default();
        text.set_style(TextStyle::Underlined, true, TextRange::new(0, 2), &fallback);
        assert!(text.has_style(TextStyle::Underlined, TextRange::new(1, 1)));
        text.set_style(TextStyle::Underlined, false, TextRange::new(0, 3), &fallback);
        assert!(!text.has_style(TextStyle::Underlined, TextRange::new(1, 1)));
        assert_eq!(text.keys().count(), 0);
    }

    #[test]
    fn test_set_color_none_clears() {
        let mut text = StyledText::plain("abc");
        text.set_color(ColorKind::Background, Some(Color::YELLOW), TextRange::new(0, 3));
        text.set_color(ColorKind::Background, None, TextRange::new(1, 1));
        assert_eq!(text.color_at(ColorKind::Background, TextRange::new(0, 1)), Some(Color::YELLOW));
        assert_eq!(text.color_at(ColorKind::Background, TextRange::new(1, 1)), None);
    }

    #[test]
    fn test_paragraph_merge_applies_per_paragraph() {
        let mut text = StyledText::plain("one\ntwo\nthree");
        text.merge_paragraph_style(
            &ParagraphStyleUpdate::line_spacing(3.0),
            TextRange::new(0, 13),
        );
        text.merge_paragraph_style(
            &ParagraphStyleUpdate::alignment(TextAlignment::Center),
            TextRange::caret(5),
        );

        let second = text.paragraph_style_at(TextRange::new(4, 1)).unwrap();
        assert_eq!(second.alignment, TextAlignment::Center);
        assert_eq!(second.line_spacing, 3.0);

        let first = text.paragraph_style_at(TextRange::new(0, 1)).unwrap();
        assert_eq!(first.alignment, TextAlignment::Natural);
        assert_eq!(first.line_spacing, 3.0);
    }
}
