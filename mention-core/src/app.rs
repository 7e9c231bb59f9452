use crate::config::{Contact, MentionConfig};
use crate::cursor::{self, LineIndex};
use crate::editor::MentionEditor;
use crate::error::MentionResult;
use crate::export::ExportMessage;
use crate::model::MentionId;
use crate::template::MentionFormat;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compose,
    Picker,
    Help,
}

/// Platform-agnostic application state shared by the terminal and web hosts
pub struct App {
    pub editor: MentionEditor,
    pub format: MentionFormat,
    pub config: MentionConfig,
    pub mode: Mode,
    pub running: bool,

    // Picker state
    pub picker_selected: usize,
    pub picker_combine: bool,

    // Messages sent so far, oldest first
    pub sent: Vec<ExportMessage>,
    /// Last rendered preview
    pub preview: Option<String>,

    // Status message
    pub status_message: Option<String>,

    next_demo_id: MentionId,
}

impl App {
    pub fn new(config: MentionConfig) -> MentionResult<Self> {
        let format = config.format()?;
        Ok(Self {
            editor: MentionEditor::with_highlight_color(config.highlight_color),
            format,
            config,
            mode: Mode::Compose,
            running: true,

            picker_selected: 0,
            picker_combine: false,

            sent: Vec::new(),
            preview: None,

            status_message: None,

            next_demo_id: 0,
        })
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.config.contacts
    }

    /// Get caret position as (row, col)
    pub fn caret_pos(&self) -> (usize, usize) {
        LineIndex::new(self.editor.text()).offset_to_cursor(self.editor.caret())
    }

    /// Type a char at the caret; the trigger char opens the contact picker
    pub fn type_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.editor.insert_text(c.encode_utf8(&mut buf));
        if c == self.config.trigger && !self.config.contacts.is_empty() {
            self.open_picker(true);
        }
    }

    pub fn newline(&mut self) {
        self.editor.insert_text("\n");
    }

    pub fn paste(&mut self, text: &str) {
        self.editor.paste(text);
    }

    pub fn backspace(&mut self) {
        if self.editor.delete_key() {
            self.set_status("Mention selected, backspace again to delete it");
        }
    }

    pub fn delete(&mut self) {
        self.editor.delete_forward();
    }

    // Caret movement. `extend` keeps the anchor and moves the head only.

    pub fn move_left(&mut self, extend: bool) {
        let sel = self.editor.selection();
        let target = if !extend && !sel.is_empty() {
            sel.start()
        } else {
            // Step over a whole mention ending at the caret
            self.editor
                .mentions()
                .iter()
                .find(|r| r.to == sel.head)
                .map_or(sel.head.saturating_sub(1), |r| r.from)
        };
        self.move_head(target, extend);
    }

    pub fn move_right(&mut self, extend: bool) {
        let sel = self.editor.selection();
        let target = if !extend && !sel.is_empty() {
            sel.end()
        } else {
            self.editor
                .mentions()
                .iter()
                .find(|r| r.from == sel.head)
                .map_or(sel.head + 1, |r| r.to)
        };
        self.move_head(target, extend);
    }

    pub fn move_up(&mut self, extend: bool) {
        let head = self.editor.selection().head;
        let target = LineIndex::new(self.editor.text()).move_up(head);
        self.move_head(target, extend);
    }

    pub fn move_down(&mut self, extend: bool) {
        let head = self.editor.selection().head;
        let target = LineIndex::new(self.editor.text()).move_down(head);
        self.move_head(target, extend);
    }

    pub fn move_to_line_start(&mut self, extend: bool) {
        let head = self.editor.selection().head;
        let target = LineIndex::new(self.editor.text()).line_start(head);
        self.move_head(target, extend);
    }

    pub fn move_to_line_end(&mut self, extend: bool) {
        let head = self.editor.selection().head;
        let target = LineIndex::new(self.editor.text()).line_end(head);
        self.move_head(target, extend);
    }

    pub fn move_word_forward(&mut self, extend: bool) {
        let target = cursor::word_forward(self.editor.text(), self.editor.selection().head);
        self.move_head(target, extend);
    }

    pub fn move_word_back(&mut self, extend: bool) {
        let target = cursor::word_back(self.editor.text(), self.editor.selection().head);
        self.move_head(target, extend);
    }

    fn move_head(&mut self, target: usize, extend: bool) {
        if extend {
            let mut sel = self.editor.selection();
            sel.extend_to(target);
            self.editor.set_selection(sel.anchor, sel.head);
        } else {
            self.editor.set_caret(target);
        }
    }

    /// Open the contact picker. With `combine`, the char before the caret
    /// (the trigger just typed) becomes part of the mention.
    pub fn open_picker(&mut self, combine: bool) {
        self.picker_selected = 0;
        self.picker_combine = combine;
        self.mode = Mode::Picker;
    }

    pub fn picker_next(&mut self) {
        let count = self.config.contacts.len();
        if count > 0 {
            self.picker_selected = (self.picker_selected + 1) % count;
        }
    }

    pub fn picker_prev(&mut self) {
        let count = self.config.contacts.len();
        if count > 0 {
            self.picker_selected = if self.picker_selected == 0 {
                count - 1
            } else {
                self.picker_selected - 1
            };
        }
    }

    /// Insert the highlighted contact as a mention
    pub fn confirm_picker(&mut self) -> bool {
        self.mode = Mode::Compose;
        let Some(contact) = self.config.contacts.get(self.picker_selected).cloned() else {
            return false;
        };
        self.editor
            .insert_mention(contact.id, &contact.name, self.picker_combine);
        self.set_status(&format!("Mentioned {}", contact.name));
        true
    }

    pub fn cancel_picker(&mut self) {
        self.mode = Mode::Compose;
    }

    /// Insert a numbered demo mention at the caret
    pub fn add_demo_mention(&mut self) {
        let id = self.next_demo_id;
        self.next_demo_id += 1;
        self.editor.insert_mention(id, &format!("user{}", id), false);
    }

    /// Render without clearing
    pub fn preview(&mut self) -> &str {
        let rendered = self.editor.render_with(&self.format, false);
        self.preview.insert(rendered)
    }

    /// Render, record and clear the message. Empty buffers are not sent.
    pub fn send(&mut self) -> Option<&ExportMessage> {
        if self.editor.is_empty() {
            self.set_status("Nothing to send");
            return None;
        }
        let message = ExportMessage::compose(&mut self.editor, &self.format, true);
        self.preview = Some(message.text.clone());
        self.set_status(&format!(
            "Sent message with {} mention(s)",
            message.mention_count()
        ));
        self.sent.push(message);
        self.sent.last()
    }

    /// Set status message
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some(msg.to_string());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            Mode::Help => Mode::Compose,
            _ => Mode::Help,
        };
    }

    /// Get title for display
    pub fn title(&self) -> String {
        format!(
            "{} mention(s), {} sent",
            self.editor.mentions().len(),
            self.sent.len()
        )
    }

    /// Get content lines for rendering, with the char offset each starts at
    pub fn content_lines(&self) -> Vec<(usize, &str)> {
        let mut offset = 0;
        self.editor
            .text()
            .split('\n')
            .map(|line| {
                let start = offset;
                offset += line.chars().count() + 1;
                (start, line)
            })
            .collect()
    }
}
