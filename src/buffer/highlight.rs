//! Range highlighting.
//!
//! A highlight recolors a range with a [`HighlightingStyle`]. The colors it
//! covers are saved first, segment by segment, and written back when the
//! highlight is cleared or moved. Only one highlight exists at a time.
//!
//! The paint is never part of the content: a buffer lifts it before every
//! recorded edit, so undo history and saved documents only see the colors
//! underneath.

use crate::attributes::{AttributeKey, AttributeMap, AttributeValue, ColorKind, StyledText, TextRange};
use crate::config::HighlightingStyle;

type Segments = Vec<(TextRange, Option<AttributeValue>)>;

/// The colors a highlight painted over
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightSnapshot {
    pub range: TextRange,
    foreground: Segments,
    background: Segments,
}

impl HighlightSnapshot {
    fn capture(text: &StyledText, range: TextRange) -> Self {
        Self {
            range,
            foreground: text.segments(&AttributeKey::ForegroundColor, range),
            background: text.segments(&AttributeKey::BackgroundColor, range),
        }
    }

    fn restore(&self, text: &mut StyledText) {
        let keyed = [
            (AttributeKey::ForegroundColor, &self.foreground),
            (AttributeKey::BackgroundColor, &self.background),
        ];
        for (key, segments) in keyed {
            for (segment, value) in segments {
                match value {
                    Some(value) => text.set_attribute(key.clone(), value.clone(), *segment),
                    None => text.remove_attribute(&key, *segment),
                }
            }
        }
    }

    /// Write the saved colors at `index` into `attributes`
    fn unpaint(&self, index: usize, attributes: &mut AttributeMap) {
        let keyed = [
            (AttributeKey::ForegroundColor, &self.foreground),
            (AttributeKey::BackgroundColor, &self.background),
        ];
        for (key, segments) in keyed {
            let saved = segments
                .iter()
                .find(|(segment, _)| segment.contains(index))
                .and_then(|(_, value)| value.clone());
            match saved {
                Some(value) => {
                    attributes.insert(key, value);
                }
                None => {
                    attributes.remove(&key);
                }
            }
        }
    }
}

/// Tracks the active highlight of one text
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    style: HighlightingStyle,
    saved: Option<HighlightSnapshot>,
}

impl Highlighter {
    pub fn new(style: HighlightingStyle) -> Self {
        Self { style, saved: None }
    }

    /// The highlighted range, clamped to the text it was applied to
    pub fn range(&self) -> Option<TextRange> {
        self.saved.as_ref().map(|saved| saved.range)
    }

    pub fn style(&self) -> &HighlightingStyle {
        &self.style
    }

    /// Highlight `range` of `text` with `style`, or clear the highlight
    /// with `None`.
    ///
    /// Any previous highlight is restored before the new one is painted.
    pub fn set(&mut self, text: &mut StyledText, range: Option<TextRange>, style: &HighlightingStyle) {
        self.clear(text);
        self.style = style.clone();
        if let Some(range) = range {
            self.paint(text, range);
        }
    }

    /// Restore the saved colors and drop the highlight
    pub fn clear(&mut self, text: &mut StyledText) {
        if let Some(previous) = self.saved.take() {
            tracing::debug!(target: "highlight", range = %previous.range, "restoring colors");
            previous.restore(text);
        }
    }

    /// Restore the saved colors but keep the range, so it can be painted
    /// again with [`repaint`](Self::repaint)
    pub fn lift(&mut self, text: &mut StyledText) -> Option<TextRange> {
        let saved = self.saved.take()?;
        saved.restore(text);
        Some(saved.range)
    }

    /// Paint `range` again after a [`lift`](Self::lift), capturing the
    /// colors that are there now
    pub fn repaint(&mut self, text: &mut StyledText, range: TextRange) {
        self.paint(text, range);
    }

    /// Drop the saved colors without writing them back, for when the text
    /// they belong to has been replaced
    pub fn forget(&mut self) {
        if let Some(saved) = self.saved.take() {
            tracing::debug!(target: "highlight", range = %saved.range, "highlight discarded");
        }
    }

    /// `text` with the highlight colors replaced by the saved ones
    pub fn unpainted(&self, text: &StyledText) -> StyledText {
        let mut clean = text.clone();
        if let Some(saved) = &self.saved {
            saved.restore(&mut clean);
        }
        clean
    }

    /// The attributes of `text` at `index` as they are under the highlight
    pub fn attributes_at(&self, text: &StyledText, index: usize) -> AttributeMap {
        let mut attributes = text.attributes_at_index(index);
        if let Some(saved) = self.saved.as_ref().filter(|saved| saved.range.contains(index)) {
            saved.unpaint(index, &mut attributes);
        }
        attributes
    }

    fn paint(&mut self, text: &mut StyledText, range: TextRange) {
        let range = range.clamped(text.len());
        tracing::debug!(target: "highlight", %range, "highlighting");
        self.saved = Some(HighlightSnapshot::capture(text, range));
        text.set_color(ColorKind::Foreground, Some(self.style.foreground), range);
        text.set_color(ColorKind::Background, Some(self.style.background), range);
    }
}
