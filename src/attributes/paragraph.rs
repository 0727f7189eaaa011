//! Paragraph style attribute values and partial updates.

use serde::{Deserialize, Serialize};

/// Horizontal alignment of a paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlignment {
    #[default]
    Natural,
    Left,
    Center,
    Right,
    Justified,
}

/// Paragraph-level formatting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphStyle {
    pub alignment: TextAlignment,
    pub line_spacing: f32,
    pub paragraph_spacing: f32,
    pub first_line_head_indent: f32,
    pub head_indent: f32,
    pub tail_indent: f32,
}

impl ParagraphStyle {
    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Return a copy with every field present in `update` replaced
    pub fn merged(&self, update: &ParagraphStyleUpdate) -> Self {
        let mut style = self.clone();
        update.apply_to(&mut style);
        style
    }
}

/// A partial paragraph style. `None` fields leave the existing value alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphStyleUpdate {
    pub alignment: Option<TextAlignment>,
    pub line_spacing: Option<f32>,
    pub paragraph_spacing: Option<f32>,
    pub first_line_head_indent: Option<f32>,
    pub head_indent: Option<f32>,
    pub tail_indent: Option<f32>,
}

impl ParagraphStyleUpdate {
    pub fn alignment(alignment: TextAlignment) -> Self {
        Self {
            alignment: Some(alignment),
            ..Self::default()
        }
    }

    pub fn line_spacing(spacing: f32) -> Self {
        Self {
            line_spacing: Some(spacing),
            ..Self::default()
        }
    }

    /// An update that sets every field to match `style`
    pub fn replacing_with(style: &ParagraphStyle) -> Self {
        Self {
            alignment: Some(style.alignment),
            line_spacing: Some(style.line_spacing),
            paragraph_spacing: Some(style.paragraph_spacing),
            first_line_head_indent: Some(style.first_line_head_indent),
            head_indent: Some(style.head_indent),
            tail_indent: Some(style.tail_indent),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, style: &mut ParagraphStyle) {
        if let Some(alignment) = self.alignment {
            style.alignment = alignment;
        }
        if let Some(v) = self.line_spacing {
            style.line_spacing = v;
        }
        if let Some(v) = self.paragraph_spacing {
            style.paragraph_spacing = v;
        }
        if let Some(v) = self.first_line_head_indent {
            style.first_line_head_indent = v;
        }
        if let Some(v) = self.head_indent {
            style.head_indent = v;
        }
        if let Some(v) = self.tail_indent {
            style.tail_indent = v;
        }
    }
}
