//! Character ranges over styled text.
//!
//! All offsets are in Unicode scalar values (chars), never bytes.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A `(location, length)` range over the characters of a [`StyledText`].
///
/// [`StyledText`]: super::StyledText
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub location: usize,
    pub length: usize,
}

impl TextRange {
    pub const fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    /// A collapsed range (caret) at `location`
    pub const fn caret(location: usize) -> Self {
        Self {
            location,
            length: 0,
        }
    }

    /// Exclusive end offset
    pub const fn end(&self) -> usize {
        self.location + self.length
    }

    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Check if `index` falls inside the range (end is exclusive)
    pub const fn contains(&self, index: usize) -> bool {
        index >= self.location && index < self.end()
    }

    /// Check if two ranges share at least one character
    pub fn intersects(&self, other: &TextRange) -> bool {
        self.location < other.end() && other.location < self.end()
    }

    pub fn as_range(&self) -> Range<usize> {
        self.location..self.end()
    }

    /// Build a range from `start..end`, treating reversed input as empty
    pub fn from_bounds(start: usize, end: usize) -> Self {
        Self::new(start, end.saturating_sub(start))
    }

    /// Clamp the range so that it never reaches past `len`.
    ///
    /// Clamping only ever shrinks the range.
    pub fn clamped(&self, len: usize) -> Self {
        let location = self.location.min(len);
        let length = self.length.min(len - location);
        Self::new(location, length)
    }
}

impl From<Range<usize>> for TextRange {
    fn from(range: Range<usize>) -> Self {
        Self::from_bounds(range.start, range.end)
    }
}

impl std::fmt::Display for TextRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.location, self.length)
    }
}

/// Clamp `range` to a text of `len` characters.
///
/// Attribute lookups read the character *at* the location, so for those the
/// location is additionally kept below `len` (one before the end of text).
pub fn safe_range(range: TextRange, len: usize, is_attribute_operation: bool) -> TextRange {
    let max_location = if is_attribute_operation {
        len.saturating_sub(1)
    } else {
        len
    };
    let location = range.location.min(max_location);
    let length = range.length.min(len - location);
    TextRange::new(location, length)
}
