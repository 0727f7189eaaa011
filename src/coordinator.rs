//! Keeps an [`EditingContext`] and a [`TextBuffer`] consistent.
//!
//! The coordinator is a small state machine driven by [`Msg`]s:
//!
//! ```text
//!            Command / ContextChanged
//!   Idle ───────────────────────────────▶ ApplyingToBuffer
//!    ▲                                          │
//!    │          snapshot written                ▼
//!    └──────────────────────────────── SyncingFromBuffer ◀── Buffer event
//!                                                              (or SyncDue)
//! ```
//!
//! It holds no reference to either side. Each call to
//! [`update`](Coordinator::update) borrows both mutably for the duration of
//! one transition, so nothing else can write to them mid-sync, and the
//! snapshot it writes back goes through
//! [`EditingContext::apply_snapshot`], which never queues a message.
//!
//! Buffer notifications can be debounced. Under
//! [`SyncPolicy::Debounced`] they return [`Cmd::ScheduleSync`] and only the
//! newest scheduled generation syncs when its [`Msg::SyncDue`] arrives.
//! Commands and direct writes always sync before returning.

use tracing::{debug, debug_span, trace};

use crate::buffer::TextBuffer;
use crate::commands::Cmd;
use crate::config::{EditorConfig, SyncPolicy};
use crate::context::EditingContext;
use crate::messages::Msg;
use crate::tracing::SnapshotDiff;
use crate::update::{self, EditOptions};

/// Where the coordinator is in a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    #[default]
    Idle,
    ApplyingToBuffer,
    SyncingFromBuffer,
}

#[derive(Debug, Clone)]
pub struct Coordinator {
    state: SyncState,
    policy: SyncPolicy,
    generation: u64,
    sync_pending: bool,
    options: EditOptions,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Coordinator {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            state: SyncState::Idle,
            policy: config.sync_policy(),
            generation: 0,
            sync_pending: false,
            options: EditOptions::from_config(config),
        }
    }

    pub fn with_policy(mut self, policy: SyncPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn policy(&self) -> SyncPolicy {
        self.policy
    }

    /// Whether a debounced sync is waiting for its timer
    pub fn has_pending_sync(&self) -> bool {
        self.sync_pending
    }

    /// Process one message
    pub fn update<B: TextBuffer>(
        &mut self,
        buffer: &mut B,
        context: &mut EditingContext,
        msg: Msg,
    ) -> Option<Cmd> {
        let _span = debug_span!("update", msg = msg_type_name(&msg)).entered();

        debug_assert_eq!(self.state, SyncState::Idle);

        match msg {
            Msg::Command(command) => {
                debug!(target: "command", ?command, "applying");
                self.transition(SyncState::ApplyingToBuffer);
                let cmd = update::apply_command(buffer, &self.options, command);
                self.sync_now(buffer, context);
                cmd
            }

            Msg::ContextChanged(change) => {
                debug!(target: "sync", ?change, "applying context write");
                self.transition(SyncState::ApplyingToBuffer);
                let cmd = update::apply_change(buffer, &self.options, change);
                self.sync_now(buffer, context);
                cmd
            }

            Msg::Buffer(event) => {
                debug!(target: "sync", ?event, "buffer notification");
                match self.policy {
                    SyncPolicy::Immediate => {
                        self.sync_now(buffer, context);
                        None
                    }
                    SyncPolicy::Debounced(delay) => {
                        self.generation += 1;
                        self.sync_pending = true;
                        trace!(target: "sync", generation = self.generation, ?delay, "sync scheduled");
                        Some(Cmd::ScheduleSync {
                            generation: self.generation,
                            delay,
                        })
                    }
                }
            }

            Msg::SyncDue { generation } => {
                if !self.sync_pending || generation != self.generation {
                    debug!(
                        target: "sync",
                        "Skipping stale sync: generation {} != current {} (pending: {})",
                        generation,
                        self.generation,
                        self.sync_pending
                    );
                    return None;
                }
                self.sync_now(buffer, context);
                None
            }
        }
    }

    /// Mirror the buffer into the context right away
    pub fn sync_now<B: TextBuffer>(&mut self, buffer: &B, context: &mut EditingContext) {
        self.transition(SyncState::SyncingFromBuffer);

        let snapshot = update::read_snapshot(buffer, &self.options.default_font);
        if let Some(diff) = SnapshotDiff::between(context.snapshot(), &snapshot).describe() {
            debug!(target: "sync", %diff, "context changed");
        }
        context.apply_snapshot(snapshot);
        self.sync_pending = false;

        self.transition(SyncState::Idle);
    }

    fn transition(&mut self, next: SyncState) {
        trace!(target: "sync", from = ?self.state, to = ?next, "transition");
        self.state = next;
    }
}

/// Get a display name for a message type
fn msg_type_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::Command(_) => "Command",
        Msg::ContextChanged(_) => "ContextChanged",
        Msg::Buffer(_) => "Buffer",
        Msg::SyncDue { .. } => "SyncDue",
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::attributes::{AttributeReader, TextRange, TextStyle};
    use crate::buffer::MemoryBuffer;
    use crate::messages::{BufferEvent, Command, ContextChange};

    fn setup(policy: SyncPolicy) -> (Coordinator, MemoryBuffer, EditingContext) {
        let coordinator = Coordinator::new(&EditorConfig::immediate()).with_policy(policy);
        (coordinator, MemoryBuffer::from_text("foo bar baz"), EditingContext::new())
    }

    #[test]
    fn test_command_syncs_once_and_returns_to_idle() {
        let (mut coordinator, mut buffer, mut context) = setup(SyncPolicy::Immediate);
        let cmd = coordinator.update(
            &mut buffer,
            &mut context,
            Command::SelectRange(TextRange::new(4, 3)).into(),
        );
        assert_eq!(cmd, None);
        assert_eq!(coordinator.state(), SyncState::Idle);
        assert_eq!(context.take_updates().len(), 1);
        assert_eq!(context.selected_range(), TextRange::new(4, 3));
        assert!(!context.has_pending_messages());
    }

    #[test]
    fn test_every_message_kind_returns_to_idle() {
        let (mut coordinator, mut buffer, mut context) =
            setup(SyncPolicy::Debounced(Duration::from_millis(10)));
        let messages: Vec<Msg> = vec![
            Command::HighlightRange(Some(TextRange::new(0, 3))).into(),
            ContextChange::IsEditingText(true).into(),
            BufferEvent::TextChanged.into(),
            Msg::SyncDue { generation: 1 },
            Msg::SyncDue { generation: 1 },
        ];
        for msg in messages {
            coordinator.update(&mut buffer, &mut context, msg);
            assert_eq!(coordinator.state(), SyncState::Idle);
            assert!(!context.has_pending_messages());
        }
        assert_eq!(context.highlighted_range(), Some(TextRange::new(0, 3)));
        assert!(!coordinator.has_pending_sync());
    }

    #[test]
    fn test_context_write_reaches_buffer() {
        let (mut coordinator, mut buffer, mut context) = setup(SyncPolicy::Immediate);
        buffer.set_selected_range(TextRange::new(0, 3));
        context.set_font_size(40.0);
        let msg = context.pop_message().unwrap();
        coordinator.update(&mut buffer, &mut context, msg);

        assert_eq!(buffer.font_at(TextRange::new(0, 3)).unwrap().size, 40.0);
        assert_eq!(context.font_size(), 40.0);
        assert!(!context.has_pending_messages());
    }

    #[test]
    fn test_editable_flag_round_trip() {
        let (mut coordinator, mut buffer, mut context) = setup(SyncPolicy::Immediate);
        coordinator.update(&mut buffer, &mut context, ContextChange::IsEditable(false).into());
        assert!(!buffer.is_editable());
        assert!(!context.is_editable());
    }

    #[test]
    fn test_debounced_events_coalesce() {
        let delay = Duration::from_millis(10);
        let (mut coordinator, mut buffer, mut context) = setup(SyncPolicy::Debounced(delay));

        buffer.set_selected_range(TextRange::new(0, 3));
        let first = coordinator.update(&mut buffer, &mut context, BufferEvent::SelectionChanged.into());
        buffer.set_selected_range(TextRange::new(4, 3));
        let second = coordinator.update(&mut buffer, &mut context, BufferEvent::SelectionChanged.into());

        assert_eq!(first, Some(Cmd::ScheduleSync { generation: 1, delay }));
        assert_eq!(second, Some(Cmd::ScheduleSync { generation: 2, delay }));
        assert!(coordinator.has_pending_sync());
        assert!(context.take_updates().is_empty());

        coordinator.update(&mut buffer, &mut context, Msg::SyncDue { generation: 1 });
        assert!(context.take_updates().is_empty());

        coordinator.update(&mut buffer, &mut context, Msg::SyncDue { generation: 2 });
        let updates = context.take_updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].selected_range, TextRange::new(4, 3));
        assert!(!coordinator.has_pending_sync());
    }

    #[test]
    fn test_command_flushes_pending_sync() {
        let delay = Duration::from_millis(10);
        let (mut coordinator, mut buffer, mut context) = setup(SyncPolicy::Debounced(delay));
        coordinator.update(&mut buffer, &mut context, BufferEvent::TextChanged.into());
        coordinator.update(&mut buffer, &mut context, Command::Undo.into());
        assert!(!coordinator.has_pending_sync());

        coordinator.update(&mut buffer, &mut context, Msg::SyncDue { generation: 1 });
        assert_eq!(context.take_updates().len(), 1);
    }

    #[test]
    fn test_bold_on_selection() {
        let (mut coordinator, mut buffer, mut context) = setup(SyncPolicy::Immediate);
        coordinator.update(&mut buffer, &mut context, Command::SelectRange(TextRange::new(4, 3)).into());
        coordinator.update(&mut buffer, &mut context, Command::SetStyle(TextStyle::Bold, true).into());

        assert!(buffer.has_style(TextStyle::Bold, TextRange::new(4, 3)));
        assert!(!buffer.has_style(TextStyle::Bold, TextRange::new(0, 3)));
        assert!(context.has_style(TextStyle::Bold));
        assert!(context.can_undo());
    }
}
