//! richtext - rich text editing core
//!
//! This crate keeps a styled text buffer and an observable editing context
//! in sync, following the Elm Architecture: UI controls send [`Command`]s
//! and write context fields, the [`Coordinator`] applies them to the
//! buffer and mirrors the result back into the context as one snapshot.
//!
//! ```
//! use richtext::{Command, EditorConfig, RichTextEditor};
//! use richtext::attributes::{StyledText, TextRange, TextStyle};
//!
//! let config = EditorConfig::immediate();
//! let mut editor = RichTextEditor::from_styled_text(StyledText::plain("foo bar baz"), &config);
//!
//! editor.send(Command::SelectRange(TextRange::new(4, 3)));
//! editor.send(Command::ToggleStyle(TextStyle::Bold));
//!
//! assert!(editor.context().has_style(TextStyle::Bold));
//! assert!(editor.context().can_undo());
//! ```

pub mod attributes;
pub mod buffer;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod context;
pub mod coordinator;
pub mod document;
pub mod editor;
pub mod history;
pub mod messages;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use buffer::{MemoryBuffer, TextBuffer};
pub use commands::Cmd;
pub use config::{EditorConfig, ImagePasteBehavior, SyncPolicy};
pub use context::{ContextSnapshot, EditingContext};
pub use coordinator::{Coordinator, SyncState};
pub use document::{DataFormat, DocumentError};
pub use editor::RichTextEditor;
pub use messages::{BufferEvent, Command, ContextChange, Msg, PasteContent};
