//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that the host should perform after an
//! update. The core never touches timers or the clipboard itself.

use std::time::Duration;

use crate::attributes::StyledText;

/// A side effect requested by the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// No side effect
    None,
    /// Start a timer; when it fires, send `Msg::SyncDue { generation }`
    ScheduleSync { generation: u64, delay: Duration },
    /// Put copied content on the clipboard
    WriteClipboard(StyledText),
    /// A pasted image was dropped because image paste is disabled; the host
    /// should tell the user
    ImagePasteRejected { name: String },
    /// Several commands at once
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Combine two optional commands into one
    pub fn merge(first: Option<Cmd>, second: Option<Cmd>) -> Option<Cmd> {
        match (first, second) {
            (None, None) => None,
            (Some(cmd), None) | (None, Some(cmd)) => Some(cmd),
            (Some(Cmd::Batch(mut cmds)), Some(cmd)) => {
                cmds.push(cmd);
                Some(Cmd::Batch(cmds))
            }
            (Some(a), Some(b)) => Some(Cmd::Batch(vec![a, b])),
        }
    }

    /// Check if this is (or contains only) `Cmd::None`
    pub fn is_none(&self) -> bool {
        match self {
            Cmd::None => true,
            Cmd::Batch(cmds) => cmds.iter().all(Cmd::is_none),
            _ => false,
        }
    }

    /// Iterate over the leaf commands, flattening batches
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            cmd => vec![cmd],
        }
    }

    /// Convert Option<Cmd> with None to Cmd::None
    pub fn from_option(opt: Option<Cmd>) -> Self {
        opt.unwrap_or(Cmd::None)
    }
}

// Allow converting Option<Cmd> to Cmd
impl From<Option<Cmd>> for Cmd {
    fn from(opt: Option<Cmd>) -> Self {
        opt.unwrap_or(Cmd::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(generation: u64) -> Cmd {
        Cmd::ScheduleSync {
            generation,
            delay: Duration::from_millis(10),
        }
    }

    #[test]
    fn test_merge() {
        assert_eq!(Cmd::merge(None, None), None);
        assert_eq!(Cmd::merge(Some(schedule(1)), None), Some(schedule(1)));
        assert_eq!(
            Cmd::merge(Some(schedule(1)), Some(schedule(2))),
            Some(Cmd::Batch(vec![schedule(1), schedule(2)]))
        );
        assert_eq!(
            Cmd::merge(Some(Cmd::Batch(vec![schedule(1)])), Some(schedule(2))),
            Some(Cmd::Batch(vec![schedule(1), schedule(2)]))
        );
    }

    #[test]
    fn test_flatten() {
        let cmd = Cmd::batch(vec![
            Cmd::None,
            schedule(1),
            Cmd::batch(vec![Cmd::WriteClipboard(StyledText::plain("x"))]),
        ]);
        let leaves = cmd.flatten();
        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[0], schedule(1));
    }

    #[test]
    fn test_is_none() {
        assert!(Cmd::None.is_none());
        assert!(Cmd::batch(vec![Cmd::None]).is_none());
        assert!(!schedule(3).is_none());
        assert_eq!(Cmd::from_option(None), Cmd::None);
    }
}
