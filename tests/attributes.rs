//! Attribute model tests
//!
//! Reads and writes of styled text through the public attribute API.

use richtext::attributes::{
    safe_range, AttributeKey, AttributeReader, AttributeValue, Color, ColorKind, Font,
    LineStyle, ParagraphStyleUpdate, StyleSet, StyledText, TextAlignment, TextRange, TextStyle,
};

// ========================================================================
// Reads
// ========================================================================

#[test]
fn test_empty_text_has_no_attributes() {
    let text = StyledText::new();
    assert!(text.attributes(TextRange::caret(0)).is_empty());
    assert!(text.attributes(TextRange::new(3, 9)).is_empty());
    assert_eq!(text.font_at(TextRange::new(0, 1)), None);
    assert_eq!(text.styles_at(TextRange::new(0, 1)), StyleSet::new());
}

#[test]
fn test_set_then_get_attribute() {
    let mut text = StyledText::plain("hello world");
    let range = TextRange::new(2, 5);
    text.set_attribute(
        AttributeKey::Link,
        AttributeValue::Link("https://example.com".into()),
        range,
    );
    assert_eq!(
        text.attribute::<String>(&AttributeKey::Link, range),
        Some("https://example.com".to_string())
    );
    assert_eq!(text.attribute::<String>(&AttributeKey::Link, TextRange::new(0, 2)), None);
}

#[test]
fn test_wrong_type_reads_as_none() {
    let mut text = StyledText::plain("abc");
    text.set_attribute(
        AttributeKey::Font,
        AttributeValue::Color(Color::RED),
        TextRange::new(0, 3),
    );
    assert_eq!(text.font_at(TextRange::new(0, 3)), None);
    assert_eq!(
        text.attribute::<Color>(&AttributeKey::Font, TextRange::new(0, 3)),
        Some(Color::RED)
    );
}

#[test]
fn test_out_of_bounds_ranges_are_clamped() {
    let mut text = StyledText::plain("abc");
    text.set_color(ColorKind::Foreground, Some(Color::BLUE), TextRange::new(1, 100));
    assert_eq!(
        text.color_at(ColorKind::Foreground, TextRange::new(2, 1)),
        Some(Color::BLUE)
    );
    // A location at the end reads the last character
    assert_eq!(
        text.color_at(ColorKind::Foreground, TextRange::new(3, 1)),
        Some(Color::BLUE)
    );
    assert_eq!(
        text.color_at(ColorKind::Foreground, TextRange::new(50, 1)),
        Some(Color::BLUE)
    );
    assert!(text.runs_are_valid());

    text.remove_attribute(&AttributeKey::ForegroundColor, TextRange::new(10, 10));
    assert_eq!(text.runs(&AttributeKey::ForegroundColor).len(), 1);
}

#[test]
fn test_safe_range() {
    assert_eq!(safe_range(TextRange::new(5, 5), 3, false), TextRange::new(3, 0));
    assert_eq!(safe_range(TextRange::new(5, 5), 3, true), TextRange::new(2, 1));
    assert_eq!(safe_range(TextRange::new(1, 1), 0, true), TextRange::new(0, 0));
}

// ========================================================================
// Styles
// ========================================================================

#[test]
fn test_bold_over_selection_only() {
    let mut text = StyledText::plain("foo bar baz");
    text.set_style(TextStyle::Bold, true, TextRange::new(4, 3), &Font::default());
    assert!(text.has_style(TextStyle::Bold, TextRange::new(4, 3)));
    assert!(!text.has_style(TextStyle::Bold, TextRange::new(0, 3)));
    assert!(!text.has_style(TextStyle::Bold, TextRange::new(8, 3)));
}

#[test]
fn test_setting_style_twice_is_stable() {
    let mut text = StyledText::plain("foo bar");
    let range = TextRange::new(0, 3);
    text.set_style(TextStyle::Underlined, true, range, &Font::default());
    let once = text.clone();
    text.set_style(TextStyle::Underlined, true, range, &Font::default());
    assert_eq!(text, once);
    assert_eq!(
        text.attribute::<LineStyle>(&AttributeKey::UnderlineStyle, range),
        Some(LineStyle::Single)
    );
}

#[test]
fn test_styles_at_collects_all_styles() {
    let mut text = StyledText::plain("abc");
    let range = TextRange::new(0, 3);
    for style in TextStyle::ALL {
        text.set_style(style, true, range, &Font::default());
    }
    let styles = text.styles_at(range);
    assert!(TextStyle::ALL.iter().all(|style| styles.has(*style)));
    assert!(text.styles_at(TextRange::caret(1)).is_empty());
}

// ========================================================================
// Paragraphs
// ========================================================================

#[test]
fn test_paragraph_style_merge_keeps_other_fields() {
    let mut text = StyledText::plain("first\nsecond\nthird");
    text.merge_paragraph_style(&ParagraphStyleUpdate::line_spacing(2.0), TextRange::new(0, 20));
    text.merge_paragraph_style(
        &ParagraphStyleUpdate::alignment(TextAlignment::Center),
        TextRange::new(7, 1),
    );

    let second = text.paragraph_style_at(TextRange::new(6, 1)).unwrap();
    assert_eq!(second.alignment, TextAlignment::Center);
    assert_eq!(second.line_spacing, 2.0);

    let first = text.paragraph_style_at(TextRange::new(0, 1)).unwrap();
    assert_eq!(first.alignment, TextAlignment::Natural);
    assert_eq!(first.line_spacing, 2.0);
}

// ========================================================================
// Text edits
// ========================================================================

#[test]
fn test_insert_inside_run_extends_it() {
    let mut text = StyledText::plain("abcd");
    text.set_color(ColorKind::Foreground, Some(Color::RED), TextRange::new(0, 4));
    let attributes = text.attributes(TextRange::new(1, 1));
    text.insert(2, "XY", &attributes);

    assert_eq!(text.string(), "abXYcd");
    assert_eq!(text.runs(&AttributeKey::ForegroundColor).len(), 1);
    assert_eq!(text.runs(&AttributeKey::ForegroundColor)[0].len, 6);
}

#[test]
fn test_insert_at_run_end_with_other_attributes() {
    let mut text = StyledText::plain("ab");
    text.set_color(ColorKind::Foreground, Some(Color::RED), TextRange::new(0, 2));
    text.insert(2, "c", &Default::default());

    assert_eq!(text.color_at(ColorKind::Foreground, TextRange::new(2, 1)), None);
    assert_eq!(text.runs(&AttributeKey::ForegroundColor)[0].len, 2);
}

#[test]
fn test_delete_shrinks_and_removes_runs() {
    let mut text = StyledText::plain("one two three");
    text.set_color(ColorKind::Foreground, Some(Color::RED), TextRange::new(4, 3));
    text.set_color(ColorKind::Background, Some(Color::BLUE), TextRange::new(0, 6));
    text.delete(TextRange::new(3, 4));

    assert_eq!(text.string(), "one three");
    assert!(text.runs(&AttributeKey::ForegroundColor).is_empty());
    assert_eq!(text.runs(&AttributeKey::BackgroundColor)[0].range(), TextRange::new(0, 3));
    assert!(text.runs_are_valid());
}

#[test]
fn test_slice_keeps_attributes() {
    let mut text = StyledText::plain("hello world");
    text.set_style(TextStyle::Italic, true, TextRange::new(4, 3), &Font::default());
    let slice = text.slice(TextRange::new(3, 3));

    assert_eq!(slice.string(), "lo ");
    assert!(!slice.has_style(TextStyle::Italic, TextRange::new(0, 1)));
    assert!(slice.has_style(TextStyle::Italic, TextRange::new(1, 2)));
}

#[test]
fn test_unicode_positions_are_chars() {
    let mut text = StyledText::plain("héllo 👋 wörld");
    text.set_color(ColorKind::Foreground, Some(Color::RED), TextRange::new(6, 1));
    assert_eq!(text.text_in(TextRange::new(6, 1)), "👋");
    assert_eq!(
        text.color_at(ColorKind::Foreground, TextRange::new(6, 1)),
        Some(Color::RED)
    );
    assert_eq!(text.color_at(ColorKind::Foreground, TextRange::new(7, 1)), None);
}
