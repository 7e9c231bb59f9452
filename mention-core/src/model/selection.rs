use serde::{Deserialize, Serialize};

/// A text selection with anchor (fixed end) and head (caret), in char offsets.
/// The head may sit before the anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection (caret with no selection)
    pub fn collapsed(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// Move the head only, keeping the anchor
    pub fn extend_to(&mut self, offset: usize) {
        self.head = offset;
    }

    pub fn clamp(self, len: usize) -> Self {
        Self {
            anchor: self.anchor.min(len),
            head: self.head.min(len),
        }
    }

    /// Check if an offset is within this selection
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start() && offset < self.end()
    }
}
