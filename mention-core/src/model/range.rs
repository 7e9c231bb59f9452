use serde::{Deserialize, Serialize};

/// Opaque identity of a mentioned entity (e.g. a user id)
pub type MentionId = u64;

/// A mention tracked as the half-open char range `[from, to)` of the buffer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub id: MentionId,
    pub name: String,
    pub from: usize,
    pub to: usize,
}

impl Range {
    pub fn new(id: MentionId, name: impl Into<String>, from: usize, to: usize) -> Self {
        debug_assert!(from < to, "mention range must not be empty");
        Self {
            id,
            name: name.into(),
            from,
            to,
        }
    }

    pub fn len(&self) -> usize {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from >= self.to
    }

    /// The edited span `[start, end]` fully covers this range
    pub fn is_wrapped(&self, start: usize, end: usize) -> bool {
        self.from >= start && self.to <= end
    }

    /// Either selection endpoint lies strictly inside the range
    pub fn is_wrapped_by(&self, start: usize, end: usize) -> bool {
        self.is_interior(start) || self.is_interior(end)
    }

    /// The selection `[start, end]` lies within the range, boundaries included
    pub fn contains(&self, start: usize, end: usize) -> bool {
        self.from <= start && self.to >= end
    }

    /// Matches the range bounds in either direction
    pub fn is_equal(&self, start: usize, end: usize) -> bool {
        (self.from == start && self.to == end) || (self.from == end && self.to == start)
    }

    /// Boundary a caret at `value` snaps to; ties go to `to`
    pub fn anchor_position(&self, value: usize) -> usize {
        // (value - from) >= (to - value), without underflow
        if 2 * value >= self.from + self.to {
            self.to
        } else {
            self.from
        }
    }

    pub fn shift(&mut self, offset: isize) {
        self.from = self.from.saturating_add_signed(offset);
        self.to = self.to.saturating_add_signed(offset);
    }

    fn is_interior(&self, offset: usize) -> bool {
        offset > self.from && offset < self.to
    }
}
