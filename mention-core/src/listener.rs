use crate::model::TextEdit;

/// Observer of buffer mutations made through a [`crate::MentionEditor`].
///
/// All methods default to no-ops. `text` is the buffer before the change for
/// `before_text_changed` and after it for the other two.
pub trait TextChangeListener {
    fn before_text_changed(&mut self, _text: &str, _edit: &TextEdit) {}

    fn on_text_changed(&mut self, _text: &str, _edit: &TextEdit) {}

    fn after_text_changed(&mut self, _text: &str) {}

    /// Offered a paste over the selection `[start, end)`. Return `true` to
    /// consume it; otherwise the editor inserts `pasted` itself.
    fn on_text_paste(&mut self, _text: &str, _pasted: &str, _start: usize, _end: usize) -> bool {
        false
    }
}
