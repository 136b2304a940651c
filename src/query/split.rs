//! Query splitting and active-segment bookkeeping.
//!
//! A raw input line can hold several queries at once, separated by a
//! configurable string (`"4011;milk;2+2"`). Each non-empty piece becomes
//! one segment evaluated independently; a cursor tracks which segment is
//! active in the result view.

/// Split a raw input string into ordered, non-empty segments.
///
/// An empty separator means no splitting at all: the whole raw string is
/// the single segment. Otherwise the string is split on every literal
/// occurrence of the separator and zero-length pieces are dropped.
pub fn split_query(raw: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        return vec![raw.to_string()];
    }
    raw.split(separator)
        .filter(|part| !part.is_empty())
        .map(|part| part.to_string())
        .collect()
}

/// Tracks which segment is active. All transitions clamp into
/// `0..len`; out-of-range requests never error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SegmentCursor {
    index: usize,
    len: usize,
}

impl SegmentCursor {
    /// Cursor over `len` segments, starting at segment 0.
    pub fn new(len: usize) -> SegmentCursor {
        SegmentCursor { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Fired whenever the segment list identity changes or the raw input
    /// reverts to the configured default query: back to segment 0.
    pub fn reset(&mut self, len: usize) {
        self.index = 0;
        self.len = len;
    }

    pub fn navigate_left(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn navigate_right(&mut self) {
        self.jump_to(self.index + 1);
    }

    /// Jump straight to a segment, clamped into range. Digit shortcuts
    /// feed this (1-9 select segments 0-8, 0 selects segment 9).
    pub fn jump_to(&mut self, index: usize) {
        let max = self.len.saturating_sub(1);
        self.index = index.min(max);
    }
}
