//! Tracing setup and diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! command application and context synchronization.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=sync=trace,command=debug` - scoped filtering
//! - `RUST_LOG=highlight=debug` - highlight save/restore only
//!
//! # Log Files
//!
//! Logs are written to `~/.config/richtext/logs/richtext.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::attributes::{Color, ColorKind};
use crate::context::ContextSnapshot;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and defaults to `warn`. Calling this
/// more than once, or after another subscriber was installed, leaves the
/// existing subscriber in place.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_NAME);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {:#}", e);
            None
        }
    };

    if let Err(e) = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
    {
        eprintln!("Warning: tracing already initialized: {}", e);
    }
}

/// Field-by-field changes between two context snapshots
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotDiff {
    pub changes: Vec<String>,
}

impl SnapshotDiff {
    pub fn between(before: &ContextSnapshot, after: &ContextSnapshot) -> Self {
        let mut changes = Vec::new();

        if before.selected_range != after.selected_range {
            changes.push(format!(
                "selection: {} → {}",
                before.selected_range, after.selected_range
            ));
        }
        if before.styles != after.styles {
            let names = |snapshot: &ContextSnapshot| {
                snapshot
                    .styles
                    .iter()
                    .map(|style| format!("{:?}", style).to_lowercase())
                    .collect::<Vec<_>>()
                    .join("+")
            };
            changes.push(format!("styles: [{}] → [{}]", names(before), names(after)));
        }
        if before.font_name != after.font_name {
            changes.push(format!("font: {} → {}", before.font_name, after.font_name));
        }
        if before.font_size != after.font_size {
            changes.push(format!("size: {} → {}", before.font_size, after.font_size));
        }
        if before.paragraph_style != after.paragraph_style {
            changes.push("paragraph style".to_string());
        }
        for kind in ColorKind::ALL {
            let (old, new) = (before.color(kind), after.color(kind));
            if old != new {
                let show = |c: Option<Color>| c.map_or_else(|| "none".to_string(), |c| c.to_string());
                changes.push(format!("{:?} color: {} → {}", kind, show(old), show(new)));
            }
        }
        if before.highlighted_range != after.highlighted_range {
            changes.push(format!(
                "highlight: {:?} → {:?}",
                before.highlighted_range, after.highlighted_range
            ));
        }
        if before.is_editable != after.is_editable {
            changes.push(format!("editable: {}", after.is_editable));
        }
        if before.is_editing_text != after.is_editing_text {
            changes.push(format!("editing: {}", after.is_editing_text));
        }
        if before.can_undo != after.can_undo || before.can_redo != after.can_redo {
            changes.push(format!("undo/redo: {}/{}", after.can_undo, after.can_redo));
        }
        if before.text != after.text {
            changes.push(format!("text: {} → {} chars", before.text.len(), after.text.len()));
        }

        Self { changes }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Generate a one-line description, or `None` if nothing changed
    pub fn describe(&self) -> Option<String> {
        if self.changes.is_empty() {
            None
        } else {
            Some(self.changes.join("; "))
        }
    }
}
