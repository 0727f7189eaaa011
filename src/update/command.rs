//! Applying commands and direct context writes to the buffer.

use tracing::{debug, warn};

use crate::attributes::{
    AttributeKey, AttributeMap, AttributeReader, AttributeValue, Font, ImageAttachment,
    ParagraphStyle, ParagraphStyleUpdate, StyledText, TextRange,
};
use crate::buffer::TextBuffer;
use crate::commands::Cmd;
use crate::messages::{Command, ContextChange, PasteContent};

use crate::config::ImagePasteBehavior;

use super::sync::selection_attributes;
use super::EditOptions;

/// Apply one command to `buffer`
pub fn apply_command<B: TextBuffer>(
    buffer: &mut B,
    options: &EditOptions,
    command: Command,
) -> Option<Cmd> {
    if command.is_editing()
        && !matches!(command, Command::SetAttributedText(_))
        && !buffer.is_editable()
    {
        debug!(target: "command", ?command, "ignored, buffer is not editable");
        return None;
    }

    let fallback = &options.default_font;
    match command {
        Command::SetStyle(style, on) => {
            restyle(
                buffer,
                |text, range| text.set_style(style, on, range, fallback),
                |typing| style.apply_to(typing, on, fallback),
            );
            None
        }

        Command::ToggleStyle(style) => {
            let active = style.is_active_in(&selection_attributes(buffer));
            apply_command(buffer, options, Command::SetStyle(style, !active))
        }

        Command::SetFontName(name) => {
            restyle(
                buffer,
                |text, range| text.set_font_name(&name, range, fallback),
                |typing| typing.update_font(fallback, |font| font.name = name.clone()),
            );
            None
        }

        Command::SetFontSize(size) => {
            let size = size.max(Font::MIN_SIZE);
            restyle(
                buffer,
                |text, range| text.set_font_size(size, range, fallback),
                |typing| typing.update_font(fallback, |font| font.size = size),
            );
            None
        }

        Command::StepFontSize(delta) => {
            let current = selection_attributes(buffer)
                .font()
                .map_or(fallback.size, |font| font.size);
            let size = (current + delta).max(Font::MIN_SIZE);
            debug!(target: "command", current, size, "stepping font size");
            apply_command(buffer, options, Command::SetFontSize(size))
        }

        Command::SetParagraphStyle(update) => {
            set_paragraph_style(buffer, &update);
            None
        }

        Command::SetAlignment(alignment) => {
            set_paragraph_style(buffer, &ParagraphStyleUpdate::alignment(alignment));
            None
        }

        Command::SetColor(kind, color) => {
            restyle(
                buffer,
                |text, range| text.set_color(kind, color, range),
                |typing| typing.set_color(kind, color),
            );
            None
        }

        Command::SelectRange(range) => {
            let range = range.clamped(buffer.styled_text().len());
            buffer.set_selected_range(range);
            None
        }

        Command::HighlightRange(range) => {
            buffer.set_highlight(range, &options.highlighting);
            None
        }

        Command::Copy => {
            let selection = buffer.selected_range();
            if selection.is_empty() {
                debug!(target: "command", "nothing selected to copy");
                return None;
            }
            Some(Cmd::WriteClipboard(buffer.content().slice(selection)))
        }

        Command::Paste { content, at } => {
            let content = match content {
                PasteContent::Text(text) => text,
                PasteContent::Image(image) => match options.image_paste {
                    ImagePasteBehavior::Enabled => attachment_text(image),
                    ImagePasteBehavior::Disabled => {
                        debug!(target: "command", name = %image.name, "image paste is disabled");
                        return None;
                    }
                    ImagePasteBehavior::DisabledWithWarning => {
                        warn!(
                            target: "command",
                            name = %image.name,
                            "image paste is disabled, ignoring pasted image"
                        );
                        return Some(Cmd::ImagePasteRejected { name: image.name });
                    }
                },
            };
            insert_content(buffer, &content, at);
            None
        }

        Command::InsertText { text, at } => {
            insert_content(buffer, &StyledText::plain(&text), at);
            None
        }

        Command::DeleteRange(range) => {
            buffer.edit(|text| {
                let deleted = text.delete(range);
                Some(TextRange::caret(deleted.location))
            });
            None
        }

        Command::SetAttributedText(text) => {
            buffer.set_styled_text(text);
            None
        }

        Command::Undo => {
            if !buffer.undo() {
                debug!(target: "command", "nothing to undo");
            }
            None
        }

        Command::Redo => {
            if !buffer.redo() {
                debug!(target: "command", "nothing to redo");
            }
            None
        }
    }
}

/// Apply a direct write of a context field to `buffer`
pub fn apply_change<B: TextBuffer>(
    buffer: &mut B,
    options: &EditOptions,
    change: ContextChange,
) -> Option<Cmd> {
    match change {
        ContextChange::FontName(name) => {
            apply_command(buffer, options, Command::SetFontName(name))
        }
        ContextChange::FontSize(size) => {
            apply_command(buffer, options, Command::SetFontSize(size))
        }
        ContextChange::ParagraphStyle(style) => apply_command(
            buffer,
            options,
            Command::SetParagraphStyle(ParagraphStyleUpdate::replacing_with(&style)),
        ),
        ContextChange::IsEditable(editable) => {
            buffer.set_editable(editable);
            None
        }
        ContextChange::IsEditingText(editing) => {
            buffer.set_editing(editing);
            None
        }
        ContextChange::HighlightedRange(range) => {
            buffer.set_highlight(range, &options.highlighting);
            None
        }
    }
}

/// Style the selection, or the typing attributes when only a caret is set
fn restyle<B, T, A>(buffer: &mut B, on_text: T, on_typing: A)
where
    B: TextBuffer,
    T: FnOnce(&mut StyledText, TextRange),
    A: FnOnce(&mut AttributeMap),
{
    let selection = buffer.selected_range();
    if selection.is_empty() {
        let mut typing = buffer.typing_attributes().clone();
        on_typing(&mut typing);
        buffer.set_typing_attributes(typing);
    } else {
        buffer.edit(|text| {
            on_text(text, selection);
            None
        });
    }
}

/// Merge `update` into every paragraph the selection touches.
///
/// A caret also carries the merged style into its typing attributes so that
/// an empty paragraph picks it up once typed into.
fn set_paragraph_style<B: TextBuffer>(buffer: &mut B, update: &ParagraphStyleUpdate) {
    if update.is_empty() {
        return;
    }
    let selection = buffer.selected_range();
    buffer.edit(|text| {
        text.merge_paragraph_style(update, selection);
        None
    });

    if selection.is_empty() {
        let text = buffer.styled_text();
        let paragraph = text.paragraph_range(selection.location);
        let mut typing = buffer.typing_attributes().clone();
        let current = if paragraph.is_empty() {
            typing.paragraph_style()
        } else {
            text.attribute::<ParagraphStyle>(&AttributeKey::ParagraphStyle, paragraph)
        };
        let style = current.unwrap_or_default().merged(update);
        typing.insert(AttributeKey::ParagraphStyle, AttributeValue::ParagraphStyle(style));
        buffer.set_typing_attributes(typing);
    }
}

/// The attributes text inserted at `index` takes on where it sets none.
///
/// At the selection these are the typing attributes; elsewhere they are
/// the attributes of the character before `index`, like a caret placed
/// there.
fn surrounding_attributes<B: TextBuffer>(buffer: &B, index: Option<usize>) -> AttributeMap {
    let len = buffer.styled_text().len();
    match index {
        Some(index) if len > 0 && index != buffer.selected_range().location => {
            buffer.content_attributes_at(index.min(len).saturating_sub(1))
        }
        _ => buffer.typing_attributes().clone(),
    }
}

/// Insert `content` at `at`, or over the selection, and move the caret
/// after it
fn insert_content<B: TextBuffer>(buffer: &mut B, content: &StyledText, at: Option<usize>) {
    let base = surrounding_attributes(buffer, at);
    let target = match at {
        Some(index) => TextRange::caret(index),
        None => buffer.selected_range(),
    };
    buffer.edit(|text| {
        let inserted = text.replace(target, content, &base);
        Some(TextRange::caret(inserted.end()))
    });
}

fn attachment_text(image: ImageAttachment) -> StyledText {
    let attributes =
        AttributeMap::new().with(AttributeKey::Attachment, AttributeValue::Attachment(image));
    StyledText::with_attributes(&ImageAttachment::REPLACEMENT_CHAR.to_string(), &attributes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{Color, ColorKind, TextAlignment, TextStyle};
    use crate::buffer::MemoryBuffer;

    fn run(buffer: &mut MemoryBuffer, command: Command) -> Option<Cmd> {
        let options = EditOptions::default();
        apply_command(buffer, &options, command)
    }

    #[test]
    fn test_style_on_caret_changes_typing_attributes_only() {
        let mut buffer = MemoryBuffer::from_text("abc");
        buffer.set_selected_range(TextRange::caret(1));
        run(&mut buffer, Command::SetStyle(TextStyle::Bold, true));

        assert!(TextStyle::Bold.is_active_in(buffer.typing_attributes()));
        assert!(buffer.styled_text().runs(&AttributeKey::Font).is_empty());
        assert!(!buffer.can_undo());
    }

    #[test]
    fn test_toggle_style_flips_selection() {
        let mut buffer = MemoryBuffer::from_text("abc");
        buffer.set_selected_range(TextRange::new(0, 2));
        run(&mut buffer, Command::ToggleStyle(TextStyle::Underlined));
        assert!(buffer.has_style(TextStyle::Underlined, TextRange::new(0, 2)));
        run(&mut buffer, Command::ToggleStyle(TextStyle::Underlined));
        assert!(!buffer.has_style(TextStyle::Underlined, TextRange::new(0, 2)));
    }

    #[test]
    fn test_step_font_size_has_a_floor() {
        let mut buffer = MemoryBuffer::from_text("abc");
        buffer.set_selected_range(TextRange::new(0, 3));
        run(&mut buffer, Command::StepFontSize(-100.0));
        assert_eq!(buffer.font_at(TextRange::new(0, 3)).unwrap().size, Font::MIN_SIZE);
        run(&mut buffer, Command::StepFontSize(3.0));
        assert_eq!(buffer.font_at(TextRange::new(0, 3)).unwrap().size, 4.0);
    }

    #[test]
    fn test_alignment_on_caret_sets_paragraph_and_typing() {
        let mut buffer = MemoryBuffer::from_text("one\ntwo");
        buffer.set_selected_range(TextRange::caret(5));
        run(&mut buffer, Command::SetAlignment(TextAlignment::Right));

        let second = buffer.paragraph_style_at(TextRange::new(4, 3)).unwrap();
        assert_eq!(second.alignment, TextAlignment::Right);
        assert!(buffer.paragraph_style_at(TextRange::new(0, 3)).is_none());
        assert_eq!(
            buffer.typing_attributes().paragraph_style().unwrap().alignment,
            TextAlignment::Right
        );
    }

    #[test]
    fn test_copy_needs_selection() {
        let mut buffer = MemoryBuffer::from_text("hello");
        assert_eq!(run(&mut buffer, Command::Copy), None);
        buffer.set_selected_range(TextRange::new(1, 3));
        assert_eq!(
            run(&mut buffer, Command::Copy),
            Some(Cmd::WriteClipboard(StyledText::plain("ell")))
        );
    }

    #[test]
    fn test_paste_plain_text_inherits_typing_color() {
        let mut text = StyledText::plain("ab");
        text.set_color(ColorKind::Foreground, Some(Color::RED), TextRange::new(0, 2));
        let mut buffer = MemoryBuffer::from_styled_text(text);
        buffer.set_selected_range(TextRange::caret(2));

        run(
            &mut buffer,
            Command::Paste {
                content: PasteContent::Text(StyledText::plain("cd")),
                at: None,
            },
        );
        assert_eq!(buffer.styled_text().string(), "abcd");
        assert_eq!(
            buffer.color_at(ColorKind::Foreground, TextRange::new(3, 1)),
            Some(Color::RED)
        );
        assert_eq!(buffer.selected_range(), TextRange::caret(4));
    }

    #[test]
    fn test_image_paste_disabled_is_noop() {
        let mut buffer = MemoryBuffer::from_text("ab");
        let image = ImageAttachment::new("cat", "png", vec![1, 2, 3]);
        let cmd = run(
            &mut buffer,
            Command::Paste {
                content: PasteContent::Image(image),
                at: Some(1),
            },
        );
        assert_eq!(cmd, None);
        assert_eq!(buffer.styled_text().string(), "ab");
    }

    #[test]
    fn test_image_paste_disabled_with_warning_tells_host() {
        let mut buffer = MemoryBuffer::from_text("ab");
        let options = EditOptions {
            image_paste: ImagePasteBehavior::DisabledWithWarning,
            ..EditOptions::default()
        };
        let image = ImageAttachment::new("cat", "png", vec![1, 2, 3]);
        let cmd = apply_command(
            &mut buffer,
            &options,
            Command::Paste {
                content: PasteContent::Image(image),
                at: None,
            },
        );
        assert_eq!(cmd, Some(Cmd::ImagePasteRejected { name: "cat".into() }));
        assert_eq!(buffer.styled_text().string(), "ab");
        assert!(!buffer.can_undo());
    }

    #[test]
    fn test_copy_leaves_out_highlight_colors() {
        let mut buffer = MemoryBuffer::from_text("hello");
        run(&mut buffer, Command::HighlightRange(Some(TextRange::new(0, 5))));
        buffer.set_selected_range(TextRange::new(1, 3));
        assert_eq!(
            run(&mut buffer, Command::Copy),
            Some(Cmd::WriteClipboard(StyledText::plain("ell")))
        );
    }

    #[test]
    fn test_paste_at_index_ignores_highlight_colors() {
        let mut buffer = MemoryBuffer::from_text("abcd");
        run(&mut buffer, Command::HighlightRange(Some(TextRange::new(0, 2))));
        run(
            &mut buffer,
            Command::Paste {
                content: PasteContent::Text(StyledText::plain("xy")),
                at: Some(2),
            },
        );
        assert_eq!(buffer.styled_text().string(), "abxycd");
        assert_eq!(buffer.highlighted_range(), None);
        assert_eq!(buffer.color_at(ColorKind::Background, TextRange::new(2, 2)), None);
        assert_eq!(buffer.color_at(ColorKind::Background, TextRange::new(0, 2)), None);
    }

    #[test]
    fn test_image_paste_enabled_inserts_attachment() {
        let mut buffer = MemoryBuffer::from_text("ab");
        let options = EditOptions {
            image_paste: ImagePasteBehavior::Enabled,
            ..EditOptions::default()
        };
        let image = ImageAttachment::new("cat", "png", vec![1, 2, 3]);
        apply_command(
            &mut buffer,
            &options,
            Command::Paste {
                content: PasteContent::Image(image.clone()),
                at: Some(1),
            },
        );
        assert_eq!(buffer.styled_text().string(), "a\u{FFFC}b");
        assert_eq!(
            buffer.attribute::<ImageAttachment>(&AttributeKey::Attachment, TextRange::new(1, 1)),
            Some(image)
        );
    }

    #[test]
    fn test_delete_range_collapses_selection() {
        let mut buffer = MemoryBuffer::from_text("hello");
        buffer.set_selected_range(TextRange::new(1, 2));
        run(&mut buffer, Command::DeleteRange(TextRange::new(1, 2)));
        assert_eq!(buffer.styled_text().string(), "hlo");
        assert_eq!(buffer.selected_range(), TextRange::caret(1));
    }

    #[test]
    fn test_not_editable_ignores_edits() {
        let mut buffer = MemoryBuffer::from_text("hello");
        buffer.set_editable(false);
        run(&mut buffer, Command::DeleteRange(TextRange::new(0, 5)));
        run(&mut buffer, Command::SelectRange(TextRange::new(0, 2)));
        assert_eq!(buffer.styled_text().string(), "hello");
        assert_eq!(buffer.selected_range(), TextRange::new(0, 2));

        run(&mut buffer, Command::SetAttributedText(StyledText::plain("bye")));
        assert_eq!(buffer.styled_text().string(), "bye");
    }

    #[test]
    fn test_paragraph_style_change_replaces_all_fields() {
        let mut buffer = MemoryBuffer::from_text("abc");
        buffer.set_selected_range(TextRange::new(0, 1));
        let style = ParagraphStyle {
            line_spacing: 4.0,
            ..ParagraphStyle::default()
        };
        let options = EditOptions::default();
        apply_change(
            &mut buffer,
            &options,
            ContextChange::ParagraphStyle(style.clone()),
        );
        assert_eq!(buffer.paragraph_style_at(TextRange::new(0, 3)), Some(style));
    }
}
