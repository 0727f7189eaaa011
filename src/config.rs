//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/richtext/config.yaml`

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::attributes::{Color, Font};
use crate::history::EditHistory;

/// Colors used to highlight a range (search results, spell check, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightingStyle {
    #[serde(default = "HighlightingStyle::default_foreground")]
    pub foreground: Color,
    #[serde(default = "HighlightingStyle::default_background")]
    pub background: Color,
}

impl HighlightingStyle {
    fn default_foreground() -> Color {
        Color::BLACK
    }

    fn default_background() -> Color {
        Color::YELLOW
    }
}

impl Default for HighlightingStyle {
    fn default() -> Self {
        Self {
            foreground: Self::default_foreground(),
            background: Self::default_background(),
        }
    }
}

/// What happens to images that are pasted or dropped into the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImagePasteBehavior {
    /// Images are dropped silently
    #[default]
    Disabled,
    /// Images are dropped and the host is told, so it can show a warning
    DisabledWithWarning,
    /// Images become attachments
    Enabled,
}

impl ImagePasteBehavior {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }
}

/// How quickly buffer notifications are mirrored into the context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPolicy {
    /// Sync inside the call that delivered the notification
    Immediate,
    /// Coalesce notifications that arrive within the delay
    Debounced(Duration),
}

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Debounce delay for buffer notifications; 0 syncs immediately
    #[serde(default = "default_sync_delay_ms")]
    pub sync_delay_ms: u64,

    /// Maximum number of undo steps kept by in-memory buffers
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Font used where the text has none
    #[serde(default)]
    pub default_font: Font,

    #[serde(default)]
    pub highlighting: HighlightingStyle,

    /// What happens to pasted or dropped images
    #[serde(default)]
    pub image_paste: ImagePasteBehavior,
}

fn default_sync_delay_ms() -> u64 {
    10
}

fn default_history_limit() -> usize {
    EditHistory::DEFAULT_MAX_SIZE
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            sync_delay_ms: default_sync_delay_ms(),
            history_limit: default_history_limit(),
            default_font: Font::default(),
            highlighting: HighlightingStyle::default(),
            image_paste: ImagePasteBehavior::Disabled,
        }
    }
}

impl EditorConfig {
    /// Defaults with immediate syncing, for headless use and tests
    pub fn immediate() -> Self {
        Self {
            sync_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn sync_policy(&self) -> SyncPolicy {
        if self.sync_delay_ms == 0 {
            SyncPolicy::Immediate
        } else {
            SyncPolicy::Debounced(Duration::from_millis(self.sync_delay_ms))
        }
    }

    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let path = crate::config_paths::config_file().context("No config directory available")?;
        self.save_to(&path)
    }

    /// Save config to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
