//! Mention range tracking.
//!
//! [`MentionTracker`] keeps the disjoint set of mention ranges consistent with
//! a text buffer owned by the host. The host reports every mutation *before*
//! it reaches the buffer ([`MentionTracker::text_will_change`]) and every
//! selection change *after* it has been applied
//! ([`MentionTracker::selection_changed`]). The tracker never looks at the
//! text itself, only at offsets and lengths, except when rendering.

use tracing::{debug, trace};

use crate::model::{MentionId, Range, Selection, TextEdit};
use crate::template::MentionFormat;
use crate::text;

/// What the host must do after reporting a mutation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditEffect {
    /// Highlight spans overlapping this span must be removed
    pub clear_highlight: Option<(usize, usize)>,
    /// Mentions destroyed by the edit
    pub removed: Vec<Range>,
}

/// Outcome of a backspace key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteAction {
    /// Let the host delete as usual
    Default,
    /// Key consumed: the host must apply this selection over the whole mention
    SelectRange(Selection),
}

#[derive(Debug, Clone, Default)]
pub struct MentionTracker {
    ranges: Vec<Range>,
    /// Last range offered as an atomic selection; guards against reacting to
    /// our own corrective selection
    last_selected: Option<Range>,
    is_selected: bool,
}

impl MentionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a freshly inserted mention. No dedup: the same id may appear twice.
    pub fn add(&mut self, range: Range) {
        debug!(id = range.id, from = range.from, to = range.to, "mention added");
        self.ranges.push(range);
    }

    pub fn push(&mut self, id: MentionId, name: impl Into<String>, from: usize, to: usize) {
        self.add(Range::new(id, name, from, to));
    }

    /// Ranges in scan (insertion) order
    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn ranges_sorted(&self) -> Vec<&Range> {
        let mut sorted: Vec<_> = self.ranges.iter().collect();
        sorted.sort_by_key(|r| r.from);
        sorted
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// A mention is currently offered as an atomic deletable selection
    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    pub fn last_selected(&self) -> Option<&Range> {
        self.last_selected.as_ref()
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
        self.last_selected = None;
        self.is_selected = false;
    }

    /// React to a mutation about to be applied to a buffer of `buffer_len` chars.
    pub fn text_will_change(&mut self, buffer_len: usize, edit: &TextEdit) -> EditEffect {
        trace!(
            start = edit.start,
            removed = edit.removed,
            inserted = edit.inserted,
            buffer_len,
            "text will change"
        );

        let mut effect = EditEffect::default();

        // Appending at the end cannot touch any range
        if edit.start >= buffer_len {
            return effect;
        }

        let (start, end) = (edit.start, edit.end());
        let offset = edit.offset();

        if start != end && !self.ranges.is_empty() {
            effect.clear_highlight = Some((start, end));
        }

        let mut kept = Vec::with_capacity(self.ranges.len());
        for mut range in self.ranges.drain(..) {
            if range.is_wrapped(start, end) {
                debug!(id = range.id, from = range.from, to = range.to, "mention removed by edit");
                if self.last_selected.as_ref() == Some(&range) {
                    self.last_selected = None;
                }
                effect.removed.push(range);
                continue;
            }
            if range.from >= end {
                if let Some(last) = self.last_selected.as_mut().filter(|last| **last == range) {
                    last.shift(offset);
                }
                range.shift(offset);
            }
            kept.push(range);
        }
        self.ranges = kept;

        effect
    }

    /// React to a selection the host has just applied. Returns the corrected
    /// selection when an endpoint landed inside a mention.
    pub fn selection_changed(&mut self, sel_start: usize, sel_end: usize) -> Option<Selection> {
        if self
            .last_selected
            .as_ref()
            .is_some_and(|last| last.is_equal(sel_start, sel_end))
        {
            return None;
        }

        // Caret moved to the end of the offered mention: the atomic selection was abandoned.
        // Between touching mentions `closest` picks the one ending at the caret.
        if self
            .closest(sel_start, sel_end)
            .is_some_and(|range| range.to == sel_end)
        {
            self.is_selected = false;
        }

        let nearby = self.nearby(sel_start, sel_end)?;

        let corrected = if sel_start == sel_end {
            Selection::collapsed(nearby.anchor_position(sel_start))
        } else {
            let mut start = sel_start;
            let mut end = sel_end;
            if end < nearby.to {
                end = nearby.to;
            }
            if start > nearby.from {
                start = nearby.from;
            }
            Selection::new(start, end)
        };

        debug!(
            id = nearby.id,
            from = sel_start,
            to = sel_end,
            corrected_start = corrected.start(),
            corrected_end = corrected.end(),
            "selection moved out of mention"
        );
        Some(corrected)
    }

    /// Backspace pressed with the given selection.
    pub fn delete_key(&mut self, sel_start: usize, sel_end: usize) -> DeleteAction {
        let Some(range) = self.closest(sel_start, sel_end).cloned() else {
            self.is_selected = false;
            return DeleteAction::Default;
        };

        if self.is_selected || sel_start == range.from {
            self.is_selected = false;
            return DeleteAction::Default;
        }

        debug!(id = range.id, from = range.from, to = range.to, "mention selected for deletion");
        let selection = Selection::new(range.to, range.from);
        self.last_selected = Some(range);
        self.is_selected = true;
        DeleteAction::SelectRange(selection)
    }

    /// Substitute every mention of `text` with `format` applied to its id and name.
    ///
    /// Sorts the ranges by position in place.
    pub fn render(&mut self, text: &str, format: &MentionFormat) -> String {
        if self.ranges.is_empty() {
            return text.to_string();
        }

        self.ranges.sort_by_key(|r| r.from);

        let mut out = String::with_capacity(text.len());
        let mut last_to = 0;
        for range in &self.ranges {
            out.push_str(text::slice(text, last_to, range.from));
            format.write_to(&mut out, range.id, &range.name);
            last_to = range.to;
        }
        out.push_str(text::slice(text, last_to, text::char_len(text)));
        out
    }

    /// First range (scan order) holding the whole selection. When two
    /// adjacent mentions share the boundary the selection ends on, the one
    /// ending there wins.
    fn closest(&self, sel_start: usize, sel_end: usize) -> Option<&Range> {
        let mut candidates = self
            .ranges
            .iter()
            .filter(|r| r.contains(sel_start, sel_end));
        let first = candidates.next()?;
        if first.to == sel_end {
            return Some(first);
        }
        candidates.find(|r| r.to == sel_end).or(Some(first))
    }

    /// First range (scan order) with a selection endpoint in its interior
    fn nearby(&self, sel_start: usize, sel_end: usize) -> Option<&Range> {
        self.ranges.iter().find(|r| r.is_wrapped_by(sel_start, sel_end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker_with(ranges: &[(MentionId, &str, usize, usize)]) -> MentionTracker {
        let mut tracker = MentionTracker::new();
        for &(id, name, from, to) in ranges {
            tracker.push(id, name, from, to);
        }
        tracker
    }

    fn bounds(tracker: &MentionTracker) -> Vec<(usize, usize)> {
        tracker.ranges().iter().map(|r| (r.from, r.to)).collect()
    }

    #[test]
    fn test_append_is_noop() {
        // "hi @bob "
        let mut tracker = tracker_with(&[(1, "bob", 3, 7)]);
        let effect = tracker.text_will_change(8, &TextEdit::new(8, 0, 5));
        assert_eq!(effect, EditEffect::default());
        assert_eq!(bounds(&tracker), vec![(3, 7)]);
    }

    #[test]
    fn test_insert_before_shifts() {
        let mut tracker = tracker_with(&[(1, "bob", 3, 7), (2, "amy", 8, 12)]);
        let effect = tracker.text_will_change(13, &TextEdit::insertion(0, 2));
        assert!(effect.clear_highlight.is_none());
        assert_eq!(bounds(&tracker), vec![(5, 9), (10, 14)]);
    }

    #[test]
    fn test_insert_at_boundary_keeps_range() {
        let mut tracker = tracker_with(&[(1, "bob", 3, 7)]);
        tracker.text_will_change(8, &TextEdit::insertion(3, 1));
        assert_eq!(bounds(&tracker), vec![(4, 8)]);

        tracker.text_will_change(9, &TextEdit::insertion(8, 1));
        assert_eq!(bounds(&tracker), vec![(4, 8)]);
    }

    #[test]
    fn test_edit_covering_range_removes_only_it() {
        let mut tracker = tracker_with(&[(1, "bob", 3, 7), (2, "amy", 8, 12)]);
        let effect = tracker.text_will_change(13, &TextEdit::deletion(3, 4));
        assert_eq!(effect.clear_highlight, Some((3, 7)));
        assert_eq!(effect.removed.len(), 1);
        assert_eq!(effect.removed[0].id, 1);
        assert_eq!(bounds(&tracker), vec![(4, 8)]);
    }

    #[test]
    fn test_edit_inside_range_leaves_it_untouched() {
        // Partial overlaps neither wrap nor precede the range
        let mut tracker = tracker_with(&[(1, "bob", 3, 7)]);
        let effect = tracker.text_will_change(8, &TextEdit::deletion(5, 1));
        assert!(effect.removed.is_empty());
        assert_eq!(bounds(&tracker), vec![(3, 7)]);
    }

    #[test]
    fn test_selection_snaps_caret() {
        let mut tracker = tracker_with(&[(1, "anna", 4, 8)]);
        assert_eq!(tracker.selection_changed(5, 5), Some(Selection::collapsed(4)));
        assert_eq!(tracker.selection_changed(6, 6), Some(Selection::collapsed(8)));
        assert_eq!(tracker.selection_changed(4, 4), None);
        assert_eq!(tracker.selection_changed(8, 8), None);
    }

    #[test]
    fn test_selection_widens_over_mention() {
        let mut tracker = tracker_with(&[(1, "anna", 4, 8)]);
        assert_eq!(tracker.selection_changed(0, 6), Some(Selection::new(0, 8)));
        assert_eq!(tracker.selection_changed(5, 10), Some(Selection::new(4, 10)));
        assert_eq!(tracker.selection_changed(5, 6), Some(Selection::new(4, 8)));
    }

    #[test]
    fn test_nearby_uses_scan_order() {
        // Second range inserted first in scan order but later in the text
        let mut tracker = tracker_with(&[(2, "zed", 10, 14), (1, "amy", 2, 6)]);
        assert_eq!(tracker.selection_changed(3, 12), Some(Selection::new(3, 14)));
    }

    #[test]
    fn test_delete_key_selects_then_deletes() {
        let mut tracker = tracker_with(&[(1, "bob", 3, 7)]);

        let action = tracker.delete_key(7, 7);
        assert_eq!(action, DeleteAction::SelectRange(Selection::new(7, 3)));
        assert!(tracker.is_selected());

        // Host applies the reversed selection; the guard ignores it
        assert_eq!(tracker.selection_changed(3, 7), None);
        assert!(tracker.is_selected());

        assert_eq!(tracker.delete_key(3, 7), DeleteAction::Default);
        assert!(!tracker.is_selected());
    }

    #[test]
    fn test_delete_key_at_range_start_is_default() {
        let mut tracker = tracker_with(&[(1, "bob", 3, 7)]);
        assert_eq!(tracker.delete_key(3, 3), DeleteAction::Default);
        assert_eq!(tracker.delete_key(9, 9), DeleteAction::Default);
        assert!(!tracker.is_selected());
    }

    #[test]
    fn test_moving_to_range_end_cancels_pending_selection() {
        let mut tracker = tracker_with(&[(1, "bob", 3, 7), (2, "amy", 8, 12)]);
        tracker.delete_key(7, 7);
        assert!(tracker.is_selected());

        tracker.selection_changed(12, 12);
        assert!(!tracker.is_selected());
    }

    #[test]
    fn test_last_selected_follows_shift() {
        let mut tracker = tracker_with(&[(1, "bob", 3, 7)]);
        tracker.delete_key(7, 7);
        tracker.text_will_change(8, &TextEdit::insertion(0, 2));
        assert_eq!(
            tracker.last_selected().map(|r| (r.from, r.to)),
            Some((5, 9))
        );
        assert_eq!(tracker.selection_changed(9, 5), None);
    }

    #[test]
    fn test_adjacent_mentions_backspace_selects_the_one_before() {
        // "@amy@bob": scan order puts the later mention first
        let mut tracker = tracker_with(&[(2, "bob", 4, 8), (1, "amy", 0, 4)]);
        assert_eq!(
            tracker.delete_key(4, 4),
            DeleteAction::SelectRange(Selection::new(4, 0))
        );
    }

    #[test]
    fn test_removed_range_no_longer_guards() {
        let mut tracker = tracker_with(&[(1, "bob", 3, 7)]);
        tracker.delete_key(7, 7);
        tracker.text_will_change(8, &TextEdit::deletion(3, 4));
        assert!(tracker.last_selected().is_none());

        tracker.push(2, "carolyn", 1, 8);
        assert_eq!(tracker.selection_changed(3, 7), Some(Selection::new(1, 8)));
    }

    #[test]
    fn test_render_substitutes_sorted() {
        let text = "hi @bob and @amy!";
        let mut tracker = tracker_with(&[(2, "amy", 12, 16), (1, "bob", 3, 7)]);
        let format = MentionFormat::parse("<%s:%s>").unwrap();
        assert_eq!(tracker.render(text, &format), "hi <1:bob> and <2:amy>!");
        assert_eq!(tracker.ranges()[0].id, 1);
    }

    #[test]
    fn test_render_without_ranges_is_raw_text() {
        let mut tracker = MentionTracker::new();
        let format = MentionFormat::parse("%s%s").unwrap();
        assert_eq!(tracker.render("plain", &format), "plain");
    }
}
