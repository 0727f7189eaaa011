//! The rich text attribute model.
//!
//! A [`StyledText`] stores characters in a rope and, for each
//! [`AttributeKey`], a sorted list of non-overlapping runs. Everything that
//! reads attributes goes through [`AttributeReader`]; the typed write helpers
//! (`set_style`, `set_color`, `merge_paragraph_style`, ...) live on
//! [`StyledText`] itself.
//!
//! Ranges are never rejected. Out of bounds ranges are clamped to the text,
//! and attributes that are missing or of the wrong type read as `None`.
//!
//! # Example
//!
//! ```
//! use richtext::attributes::{AttributeReader, Font, StyledText, TextRange, TextStyle};
//!
//! let mut text = StyledText::plain("foo bar baz");
//! text.set_style(TextStyle::Bold, true, TextRange::new(4, 3), &Font::default());
//!
//! assert!(text.has_style(TextStyle::Bold, TextRange::new(4, 3)));
//! assert!(!text.has_style(TextStyle::Bold, TextRange::new(0, 3)));
//! ```

mod color;
mod font;
mod key;
mod paragraph;
mod range;
mod reader;
mod style;
mod styled_text;
mod writer;

pub use color::{Color, ColorKind};
pub use font::Font;
pub use key::{
    AttributeKey, AttributeMap, AttributeType, AttributeValue, ImageAttachment, LineStyle,
};
pub use paragraph::{ParagraphStyle, ParagraphStyleUpdate, TextAlignment};
pub use range::{safe_range, TextRange};
pub use reader::AttributeReader;
pub use style::{StyleSet, TextStyle};
pub use styled_text::{Run, StyledText};
