//! Styled text: a rope of characters plus per-key attribute runs.

use std::collections::BTreeMap;

use ropey::Rope;

use super::key::{AttributeKey, AttributeMap, AttributeValue};
use super::range::TextRange;

/// A maximal range over which one attribute key has a constant value.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub start: usize,
    pub len: usize,
    pub value: AttributeValue,
}

impl Run {
    pub fn new(start: usize, len: usize, value: AttributeValue) -> Self {
        Self { start, len, value }
    }

    /// Exclusive end offset
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn range(&self) -> TextRange {
        TextRange::new(self.start, self.len)
    }
}

/// Text with attributes applied to character ranges.
///
/// For every key the runs are kept sorted, non-overlapping, non-empty, and
/// adjacent runs never carry equal values. All ranges passed in are clamped
/// to the text, so no operation here can fail.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledText {
    text: Rope,
    runs: BTreeMap<AttributeKey, Vec<Run>>,
}

impl Default for StyledText {
    fn default() -> Self {
        Self::new()
    }
}

impl StyledText {
    pub fn new() -> Self {
        Self {
            text: Rope::new(),
            runs: BTreeMap::new(),
        }
    }

    /// Text without any attributes
    pub fn plain(text: &str) -> Self {
        Self {
            text: Rope::from_str(text),
            runs: BTreeMap::new(),
        }
    }

    /// Text with `attributes` applied to all of it
    pub fn with_attributes(text: &str, attributes: &AttributeMap) -> Self {
        let mut styled = Self::plain(text);
        let all = TextRange::new(0, styled.len());
        styled.set_attributes(attributes, all);
        styled
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.text.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rope(&self) -> &Rope {
        &self.text
    }

    /// The full text as a `String`
    pub fn string(&self) -> String {
        self.text.to_string()
    }

    /// Text in `range` (clamped)
    pub fn text_in(&self, range: TextRange) -> String {
        let range = range.clamped(self.len());
        self.text.slice(range.as_range()).to_string()
    }

    /// Attribute keys that have at least one run
    pub fn keys(&self) -> impl Iterator<Item = &AttributeKey> {
        self.runs.keys()
    }

    /// Runs of `key`, sorted by start
    pub fn runs(&self, key: &AttributeKey) -> &[Run] {
        self.runs.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Value of `key` at character `index`
    pub fn value_at(&self, key: &AttributeKey, index: usize) -> Option<&AttributeValue> {
        run_at(self.runs(key), index).map(|run| &run.value)
    }

    /// All attributes of the character at `index`
    pub fn attributes_at_index(&self, index: usize) -> AttributeMap {
        self.runs
            .iter()
            .filter_map(|(key, runs)| run_at(runs, index).map(|run| (key.clone(), run.value.clone())))
            .collect()
    }

    /// Split `range` at the run boundaries of `key`.
    ///
    /// Every returned segment carries the value of `key` over it, or `None`
    /// for stretches without the attribute. Together the segments cover the
    /// clamped range exactly.
    pub fn segments(
        &self,
        key: &AttributeKey,
        range: TextRange,
    ) -> Vec<(TextRange, Option<AttributeValue>)> {
        let range = range.clamped(self.len());
        let mut segments = Vec::new();
        if range.is_empty() {
            return segments;
        }

        let mut cursor = range.location;
        for run in self.runs(key) {
            if run.end() <= range.location || run.start >= range.end() {
                continue;
            }
            if run.start > cursor {
                segments.push((TextRange::from_bounds(cursor, run.start), None));
            }
            let start = run.start.max(cursor);
            let end = run.end().min(range.end());
            segments.push((TextRange::from_bounds(start, end), Some(run.value.clone())));
            cursor = end;
        }
        if cursor < range.end() {
            segments.push((TextRange::from_bounds(cursor, range.end()), None));
        }
        segments
    }

    // =========================================================================
    // Attribute mutation
    // =========================================================================

    /// Set `key` to `value` over `range`, replacing whatever was there
    pub fn set_attribute(&mut self, key: AttributeKey, value: AttributeValue, range: TextRange) {
        let range = range.clamped(self.len());
        if range.is_empty() {
            return;
        }
        let runs = self.runs.entry(key).or_default();
        carve(runs, range);
        runs.push(Run::new(range.location, range.length, value));
        normalize(runs);
    }

    /// Set every entry of `attributes` over `range`
    pub fn set_attributes(&mut self, attributes: &AttributeMap, range: TextRange) {
        for (key, value) in attributes {
            self.set_attribute(key.clone(), value.clone(), range);
        }
    }

    /// Remove `key` from `range`
    pub fn remove_attribute(&mut self, key: &AttributeKey, range: TextRange) {
        let range = range.clamped(self.len());
        if range.is_empty() {
            return;
        }
        if let Some(runs) = self.runs.get_mut(key) {
            carve(runs, range);
            normalize(runs);
            if runs.is_empty() {
                self.runs.remove(key);
            }
        }
    }

    /// Remove every attribute from `range`
    pub fn clear_attributes(&mut self, range: TextRange) {
        let keys: Vec<AttributeKey> = self.runs.keys().cloned().collect();
        for key in keys {
            self.remove_attribute(&key, range);
        }
    }

    // =========================================================================
    // Text mutation
    // =========================================================================

    /// Insert `text` at `at`, giving it exactly `attributes`.
    ///
    /// Returns the range of the inserted characters.
    pub fn insert(&mut self, at: usize, text: &str, attributes: &AttributeMap) -> TextRange {
        let at = at.min(self.len());
        let count = text.chars().count();
        if count == 0 {
            return TextRange::caret(at);
        }
        self.text.insert(at, text);

        for runs in self.runs.values_mut() {
            for run in runs.iter_mut() {
                if run.start >= at {
                    run.start += count;
                } else if run.end() > at {
                    run.len += count;
                }
            }
        }

        let inserted = TextRange::new(at, count);
        let stale: Vec<AttributeKey> = self
            .runs
            .keys()
            .filter(|key| !attributes.contains_key(key))
            .cloned()
            .collect();
        for key in stale {
            self.remove_attribute(&key, inserted);
        }
        self.set_attributes(attributes, inserted);
        inserted
    }

    /// Insert styled `content` at `at`.
    ///
    /// Keys that `content` does not set over some stretch take their value
    /// from `base`, so pasted plain text picks up the surrounding style.
    pub fn insert_styled(&mut self, at: usize, content: &StyledText, base: &AttributeMap) -> TextRange {
        let inserted = self.insert(at, &content.string(), base);
        for (key, runs) in &content.runs {
            for run in runs {
                let range = TextRange::new(inserted.location + run.start, run.len);
                self.set_attribute(key.clone(), run.value.clone(), range);
            }
        }
        inserted
    }

    /// Delete the characters in `range` (clamped). Returns the deleted range.
    pub fn delete(&mut self, range: TextRange) -> TextRange {
        let range = range.clamped(self.len());
        if range.is_empty() {
            return range;
        }
        self.text.remove(range.as_range());

        for runs in self.runs.values_mut() {
            for run in runs.iter_mut() {
                if run.end() <= range.location {
                    continue;
                }
                if run.start >= range.end() {
                    run.start -= range.length;
                    continue;
                }
                let overlap =
                    run.end().min(range.end()) - run.start.max(range.location);
                run.start = run.start.min(range.location);
                run.len -= overlap;
            }
            normalize(runs);
        }
        self.runs.retain(|_, runs| !runs.is_empty());
        range
    }

    /// Replace `range` with `content`. Returns the range of the new content.
    pub fn replace(&mut self, range: TextRange, content: &StyledText, base: &AttributeMap) -> TextRange {
        let deleted = self.delete(range);
        self.insert_styled(deleted.location, content, base)
    }

    /// Copy out `range` (clamped) with its attributes
    pub fn slice(&self, range: TextRange) -> StyledText {
        let range = range.clamped(self.len());
        let mut slice = StyledText::plain(&self.text_in(range));
        for key in self.runs.keys() {
            for (segment, value) in self.segments(key, range) {
                if let Some(value) = value {
                    let local = TextRange::new(segment.location - range.location, segment.length);
                    slice.set_attribute(key.clone(), value, local);
                }
            }
        }
        slice
    }

    // =========================================================================
    // Paragraphs
    // =========================================================================

    /// The paragraph containing `index`, including its trailing newline
    pub fn paragraph_range(&self, index: usize) -> TextRange {
        let index = index.min(self.len());
        let line = self.text.char_to_line(index);
        let start = self.text.line_to_char(line);
        let end = self.text.line_to_char(line + 1);
        TextRange::from_bounds(start, end)
    }

    /// Every paragraph that `range` touches. A caret touches its own paragraph.
    pub fn paragraph_ranges(&self, range: TextRange) -> Vec<TextRange> {
        let range = range.clamped(self.len());
        let first = self.text.char_to_line(range.location);
        let last_index = if range.is_empty() {
            range.location
        } else {
            range.end() - 1
        };
        let last = self.text.char_to_line(last_index);
        (first..=last)
            .map(|line| {
                let start = self.text.line_to_char(line);
                let end = self.text.line_to_char(line + 1);
                TextRange::from_bounds(start, end)
            })
            .collect()
    }

    /// Check the run invariants. Used by tests and decoding.
    pub fn runs_are_valid(&self) -> bool {
        let len = self.len();
        self.runs.values().all(|runs| {
            runs.iter().all(|run| run.len > 0 && run.end() <= len)
                && runs.windows(2).all(|pair| {
                    pair[0].end() <= pair[1].start
                        && !(pair[0].end() == pair[1].start && pair[0].value == pair[1].value)
                })
        })
    }
}

/// Find the run that covers `index`
fn run_at(runs: &[Run], index: usize) -> Option<&Run> {
    let count = runs.partition_point(|run| run.start <= index);
    let run = runs.get(count.checked_sub(1)?)?;
    (run.end() > index).then_some(run)
}

/// Cut `range` out of `runs`, splitting runs that straddle its edges
fn carve(runs: &mut Vec<Run>, range: TextRange) {
    let mut kept = Vec::with_capacity(runs.len() + 1);
    for run in runs.drain(..) {
        if run.end() <= range.location || run.start >= range.end() {
            kept.push(run);
            continue;
        }
        if run.start < range.location {
            kept.push(Run::new(run.start, range.location - run.start, run.value.clone()));
        }
        if run.end() > range.end() {
            kept.push(Run::new(range.end(), run.end() - range.end(), run.value));
        }
    }
    *runs = kept;
}

/// Sort, drop empty runs and merge equal neighbours
fn normalize(runs: &mut Vec<Run>) {
    runs.retain(|run| run.len > 0);
    runs.sort_by_key(|run| run.start);
    let mut merged: Vec<Run> = Vec::with_capacity(runs.len());
    for run in runs.drain(..) {
        match merged.last_mut() {
            Some(last) if last.end() == run.start && last.value == run.value => {
                last.len += run.len;
            }
            _ => merged.push(run),
        }
    }
    *runs = merged;
}
