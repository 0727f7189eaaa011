//! An editing session: one buffer, its context and their coordinator.

use crate::attributes::{ImageAttachment, StyledText};
use crate::buffer::{MemoryBuffer, TextBuffer};
use crate::commands::Cmd;
use crate::config::EditorConfig;
use crate::context::EditingContext;
use crate::coordinator::Coordinator;
use crate::document::{self, DataFormat, DocumentError};
use crate::messages::{BufferEvent, Command, Msg, PasteContent};

/// Owns a text buffer together with the [`EditingContext`] that mirrors it.
///
/// UI code writes to [`context_mut`](Self::context_mut) and calls
/// [`pump`](Self::pump), or uses the [`send`](Self::send) shortcut. Host
/// text views report their own changes through [`notify`](Self::notify).
/// Returned [`Cmd`]s are for the host to carry out.
#[derive(Debug)]
pub struct RichTextEditor<B: TextBuffer = MemoryBuffer> {
    buffer: B,
    context: EditingContext,
    coordinator: Coordinator,
}

impl RichTextEditor<MemoryBuffer> {
    /// An empty in-memory editor
    pub fn new(config: &EditorConfig) -> Self {
        Self::from_styled_text(StyledText::new(), config)
    }

    pub fn from_styled_text(text: StyledText, config: &EditorConfig) -> Self {
        let buffer = MemoryBuffer::from_styled_text(text).with_history_limit(config.history_limit);
        Self::with_buffer(buffer, config)
    }

    /// Type at the selection as a user would, then report the change
    pub fn type_text(&mut self, text: &str) -> Option<Cmd> {
        if !self.buffer.type_text(text) {
            return None;
        }
        self.notify(BufferEvent::TextChanged)
    }

    /// Backspace at the selection, then report the change
    pub fn delete_backward(&mut self) -> Option<Cmd> {
        if !self.buffer.delete_backward() {
            return None;
        }
        self.notify(BufferEvent::TextChanged)
    }
}

impl<B: TextBuffer> RichTextEditor<B> {
    /// Wrap a host buffer. The context is synced once before returning.
    pub fn with_buffer(buffer: B, config: &EditorConfig) -> Self {
        let mut coordinator = Coordinator::new(config);
        let mut context = EditingContext::new();
        coordinator.sync_now(&buffer, &mut context);
        Self {
            buffer,
            context,
            coordinator,
        }
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    /// Direct access for host-side edits. Report them with [`notify`](Self::notify).
    pub fn buffer_mut(&mut self) -> &mut B {
        &mut self.buffer
    }

    pub fn context(&self) -> &EditingContext {
        &self.context
    }

    /// For direct field writes; follow them with [`pump`](Self::pump)
    pub fn context_mut(&mut self) -> &mut EditingContext {
        &mut self.context
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    /// Queue `command` and process everything queued
    pub fn send(&mut self, command: Command) -> Option<Cmd> {
        self.context.send(command);
        self.pump()
    }

    /// Report a change the host made to the buffer
    pub fn notify(&mut self, event: BufferEvent) -> Option<Cmd> {
        self.handle(Msg::Buffer(event))
    }

    /// Process one message, then anything it left queued
    pub fn handle(&mut self, msg: Msg) -> Option<Cmd> {
        let cmd = self
            .coordinator
            .update(&mut self.buffer, &mut self.context, msg);
        Cmd::merge(cmd, self.pump())
    }

    /// Process every message queued in the context
    pub fn pump(&mut self) -> Option<Cmd> {
        let mut cmds = Vec::new();
        while let Some(msg) = self.context.pop_message() {
            if let Some(cmd) = self
                .coordinator
                .update(&mut self.buffer, &mut self.context, msg)
            {
                cmds.push(cmd);
            }
        }
        match cmds.len() {
            0 => None,
            1 => cmds.pop(),
            _ => Some(Cmd::batch(cmds)),
        }
    }

    /// Paste text at `at`, or over the selection with `None`
    pub fn paste_text(&mut self, text: StyledText, at: Option<usize>) -> Option<Cmd> {
        self.send(Command::Paste {
            content: PasteContent::Text(text),
            at,
        })
    }

    /// Paste an image at `at`, or over the selection with `None`.
    ///
    /// Depends on the configured [`ImagePasteBehavior`](crate::config::ImagePasteBehavior).
    pub fn paste_image(&mut self, image: ImageAttachment, at: Option<usize>) -> Option<Cmd> {
        self.send(Command::Paste {
            content: PasteContent::Image(image),
            at,
        })
    }

    /// Replace the text with a decoded document
    pub fn load(&mut self, bytes: &[u8], format: DataFormat) -> Result<(), DocumentError> {
        let text = document::decode(bytes, format)?;
        tracing::info!(chars = text.len(), ?format, "loaded document");
        self.send(Command::SetAttributedText(text));
        Ok(())
    }

    /// Encode the current text
    pub fn save(&self, format: DataFormat) -> Result<Vec<u8>, DocumentError> {
        document::encode(&self.buffer.content(), format)
    }

    pub fn into_buffer(self) -> B {
        self.buffer
    }
}
