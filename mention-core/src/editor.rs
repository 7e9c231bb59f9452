//! Editable text buffer with tracked mentions.
//!
//! [`MentionEditor`] plays the part of the host text field: it owns the text,
//! the selection and the highlight spans, and drives a [`MentionTracker`] with
//! the before/after notification order the tracker relies on. Edits are
//! reported before they reach the buffer; selections are reported after they
//! have been applied.

use tracing::{trace, warn};

use crate::error::MentionResult;
use crate::listener::TextChangeListener;
use crate::model::{HighlightSet, MentionId, Range, Rgb, Selection, TextEdit};
use crate::template::MentionFormat;
use crate::text;
use crate::tracker::{DeleteAction, MentionTracker};

pub struct MentionEditor {
    text: String,
    selection: Selection,
    highlights: HighlightSet,
    tracker: MentionTracker,
    highlight_color: Rgb,
    listener: Option<Box<dyn TextChangeListener>>,
}

impl MentionEditor {
    pub fn new() -> Self {
        Self::with_highlight_color(Rgb::default())
    }

    pub fn with_highlight_color(color: Rgb) -> Self {
        Self {
            text: String::new(),
            selection: Selection::default(),
            highlights: HighlightSet::new(),
            tracker: MentionTracker::new(),
            highlight_color: color,
            listener: None,
        }
    }

    pub fn set_listener(&mut self, listener: Box<dyn TextChangeListener>) {
        self.listener = Some(listener);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Buffer length in chars
    pub fn len(&self) -> usize {
        text::char_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn caret(&self) -> usize {
        self.selection.head
    }

    pub fn highlights(&self) -> &HighlightSet {
        &self.highlights
    }

    pub fn highlight_color(&self) -> Rgb {
        self.highlight_color
    }

    pub fn set_highlight_color(&mut self, color: Rgb) {
        self.highlight_color = color;
    }

    pub fn tracker(&self) -> &MentionTracker {
        &self.tracker
    }

    /// Mentions in scan order
    pub fn mentions(&self) -> &[Range] {
        self.tracker.ranges()
    }

    /// A mention is selected and the next backspace deletes it whole
    pub fn is_mention_selected(&self) -> bool {
        self.tracker.is_selected()
    }

    /// Apply a selection and let the cursor guard correct it until it is stable
    pub fn set_selection(&mut self, anchor: usize, head: usize) {
        self.selection = Selection::new(anchor, head).clamp(self.len());
        self.selection_changed();
    }

    pub fn set_caret(&mut self, offset: usize) {
        self.set_selection(offset, offset);
    }

    /// Replace the selection with `insert`, leaving the caret after it
    pub fn insert_text(&mut self, insert: &str) {
        let (start, end) = (self.selection.start(), self.selection.end());
        self.replace(start, end, insert);
    }

    /// Replace chars `[start, end)` with `insert`, leaving the caret after it
    pub fn replace(&mut self, start: usize, end: usize, insert: &str) {
        let start = start.min(self.len());
        self.splice(start, end, insert);
        self.set_caret(start + text::char_len(insert));
    }

    /// Backspace. Returns `true` when the key was consumed to select a whole
    /// mention instead of deleting; otherwise the default deletion ran.
    pub fn delete_key(&mut self) -> bool {
        let (start, end) = (self.selection.start(), self.selection.end());
        match self.tracker.delete_key(start, end) {
            DeleteAction::SelectRange(selection) => {
                self.selection = selection;
                self.selection_changed();
                true
            }
            DeleteAction::Default => {
                self.delete_backward();
                false
            }
        }
    }

    /// Default backspace: the selection, or the char before the caret
    fn delete_backward(&mut self) {
        let (start, end) = (self.selection.start(), self.selection.end());
        if start != end {
            self.replace(start, end, "");
        } else if start > 0 {
            self.replace(start - 1, start, "");
        }
    }

    /// Forward delete of the selection or the char after the caret. A mention
    /// starting at the caret is deleted whole.
    pub fn delete_forward(&mut self) {
        let (start, end) = (self.selection.start(), self.selection.end());
        let mention_end = self
            .tracker
            .ranges()
            .iter()
            .find(|r| r.from == start)
            .map(|r| r.to);

        if start != end {
            self.replace(start, end, "");
        } else if let Some(to) = mention_end {
            self.replace(start, to, "");
        } else if start < self.len() {
            self.replace(start, start + 1, "");
        }
    }

    /// Input-method request to delete `before` chars before the selection and
    /// `after` chars after it. A single char before is handled as a backspace
    /// key so mentions are still deleted as a unit.
    pub fn delete_surrounding_text(&mut self, before: usize, after: usize) -> bool {
        if before == 1 && after == 0 {
            self.delete_key();
            return true;
        }

        let (start, end) = (self.selection.start(), self.selection.end());
        let after_end = end.saturating_add(after).min(self.len());
        self.splice(end, after_end, "");
        let before_start = start.saturating_sub(before);
        self.splice(before_start, start, "");
        self.set_selection(before_start, before_start + (end - start));
        true
    }

    /// Insert `name` followed by a space at the caret and track it as a mention.
    ///
    /// With `combine`, the char before the caret (usually the `@` trigger)
    /// becomes part of the mention range. It is left out when there is no
    /// such char or when it already belongs to another mention.
    pub fn insert_mention(&mut self, id: MentionId, name: &str, combine: bool) {
        if name.is_empty() {
            warn!(id, "ignoring mention with empty name");
            return;
        }

        let caret = self.selection.start();
        let combine = combine
            && text::char_before(&self.text, caret).is_some()
            && !self
                .tracker
                .ranges()
                .iter()
                .any(|r| r.from < caret && caret <= r.to);
        let start = if combine { caret - 1 } else { caret };
        let end = caret + text::char_len(name);

        self.splice(caret, caret, &format!("{} ", name));
        self.highlights.add(start, end, self.highlight_color);
        self.tracker.push(id, name, start, end);
        self.set_caret(end + 1);
    }

    /// Serialize the buffer with each mention replaced by `template`.
    ///
    /// Fails when the template does not hold exactly two placeholders.
    pub fn render(&mut self, template: &str, clear_after: bool) -> MentionResult<String> {
        let format = MentionFormat::parse(template)?;
        Ok(self.render_with(&format, clear_after))
    }

    pub fn render_with(&mut self, format: &MentionFormat, clear_after: bool) -> String {
        let rendered = self.tracker.render(&self.text, format);
        if clear_after {
            self.clear();
        }
        rendered
    }

    /// Drop all mentions and empty the buffer
    pub fn clear(&mut self) {
        self.tracker.clear();
        self.set_text("");
    }

    /// Replace the whole buffer; the caret moves to the end
    pub fn set_text(&mut self, new_text: &str) {
        let len = self.len();
        self.splice(0, len, new_text);
        self.highlights.clear();
        let end = self.len();
        self.set_caret(end);
    }

    /// Paste over the selection, unless the listener takes the paste itself
    pub fn paste(&mut self, pasted: &str) {
        let (start, end) = (self.selection.start(), self.selection.end());
        let consumed = self
            .listener
            .as_mut()
            .is_some_and(|l| l.on_text_paste(&self.text, pasted, start, end));
        if !consumed {
            self.insert_text(pasted);
        }
    }

    fn splice(&mut self, start: usize, end: usize, insert: &str) {
        let len = self.len();
        let start = start.min(len);
        let end = end.clamp(start, len);
        let edit = TextEdit::new(start, end - start, text::char_len(insert));
        if edit.is_noop() {
            return;
        }

        let effect = self.tracker.text_will_change(len, &edit);
        if let Some((from, to)) = effect.clear_highlight {
            self.highlights.remove_overlapping(from, to);
        }
        if let Some(listener) = self.listener.as_mut() {
            listener.before_text_changed(&self.text, &edit);
        }

        text::splice(&mut self.text, start, end, insert);
        self.highlights.apply_edit(&edit);

        if let Some(listener) = self.listener.as_mut() {
            listener.on_text_changed(&self.text, &edit);
            listener.after_text_changed(&self.text);
        }
    }

    fn selection_changed(&mut self) {
        // Each correction moves an endpoint onto a mention boundary, so this
        // settles within one pass per mention
        for _ in 0..=self.tracker.len() {
            let (start, end) = (self.selection.start(), self.selection.end());
            match self.tracker.selection_changed(start, end) {
                Some(corrected) => {
                    trace!(start, end, "applying corrected selection");
                    self.selection = corrected.clamp(self.len());
                }
                None => return,
            }
        }
    }
}

impl Default for MentionEditor {
    fn default() -> Self {
        Self::new()
    }
}
