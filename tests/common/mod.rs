//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use richtext::attributes::{Color, ColorKind, Font, StyledText, TextRange, TextStyle};
use richtext::{Command, EditorConfig, RichTextEditor};

/// An editor over plain `text` that syncs immediately
pub fn test_editor(text: &str) -> RichTextEditor {
    RichTextEditor::from_styled_text(StyledText::plain(text), &EditorConfig::immediate())
}

/// An editor over `text` with `range` selected
pub fn test_editor_with_selection(text: &str, range: TextRange) -> RichTextEditor {
    let mut editor = test_editor(text);
    editor.send(Command::SelectRange(range));
    editor.context_mut().take_updates();
    editor
}

/// An editor with the given config, over plain `text`
pub fn test_editor_with_config(text: &str, config: &EditorConfig) -> RichTextEditor {
    RichTextEditor::from_styled_text(StyledText::plain(text), config)
}

/// "one two three" with red "one", blue background on "two" and bold "three"
pub fn styled_sample() -> StyledText {
    let mut text = StyledText::plain("one two three");
    text.set_color(ColorKind::Foreground, Some(Color::RED), TextRange::new(0, 3));
    text.set_color(ColorKind::Background, Some(Color::BLUE), TextRange::new(4, 3));
    text.set_style(TextStyle::Bold, true, TextRange::new(8, 5), &Font::default());
    text
}
