//! Update functions for the Elm-style architecture
//!
//! The coordinator routes every message through these functions. They
//! change the buffer only; mirroring the result into the context is the
//! job of [`read_snapshot`].

mod command;
mod sync;

pub use command::{apply_change, apply_command};
pub use sync::{read_snapshot, selection_attributes};

use crate::attributes::Font;
use crate::config::{EditorConfig, HighlightingStyle, ImagePasteBehavior};

/// Settings that shape how commands edit the buffer
#[derive(Debug, Clone, Default)]
pub struct EditOptions {
    /// Font to start from where the text has none
    pub default_font: Font,
    /// Colors for `HighlightRange`
    pub highlighting: HighlightingStyle,
    /// What happens to pasted images
    pub image_paste: ImagePasteBehavior,
}

impl EditOptions {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            default_font: config.default_font.clone(),
            highlighting: config.highlighting.clone(),
            image_paste: config.image_paste,
        }
    }
}
