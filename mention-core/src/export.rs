use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::editor::MentionEditor;
use crate::model::{MentionId, Range};
use crate::template::MentionFormat;

/// A sent message: the rendered text plus the mentions it carried
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMessage {
    pub id: Uuid,
    /// Text with every mention substituted through the template
    pub text: String,
    /// Buffer text as typed
    pub raw_text: String,
    pub template: String,
    pub mentions: Vec<ExportMention>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportMention {
    pub id: MentionId,
    pub name: String,
    pub start_offset: usize,
    pub end_offset: usize,
}

impl From<&Range> for ExportMention {
    fn from(range: &Range) -> Self {
        Self {
            id: range.id,
            name: range.name.clone(),
            start_offset: range.from,
            end_offset: range.to,
        }
    }
}

impl ExportMessage {
    /// Render the editor through `format` and capture the result.
    /// With `clear_after`, the editor is emptied once captured.
    pub fn compose(editor: &mut MentionEditor, format: &MentionFormat, clear_after: bool) -> Self {
        let raw_text = editor.text().to_string();
        let mentions = editor
            .tracker()
            .ranges_sorted()
            .into_iter()
            .map(ExportMention::from)
            .collect();
        let text = editor.render_with(format, clear_after);

        Self {
            id: Uuid::new_v4(),
            text,
            raw_text,
            template: format.as_str().to_string(),
            mentions,
            created_at: Utc::now(),
        }
    }

    pub fn mention_count(&self) -> usize {
        self.mentions.len()
    }
}

/// Serialize sent messages as pretty JSON
pub fn to_json(messages: &[ExportMessage]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_captures_before_clearing() {
        let mut editor = MentionEditor::new();
        editor.insert_text("ping @");
        editor.insert_mention(3, "carol", true);
        editor.insert_text("now");

        let format = MentionFormat::parse("<@%s|%s>").unwrap();
        let message = ExportMessage::compose(&mut editor, &format, true);

        assert_eq!(message.raw_text, "ping @carol now");
        assert_eq!(message.text, "ping <@3|carol> now");
        assert_eq!(
            message.mentions,
            vec![ExportMention {
                id: 3,
                name: "carol".to_string(),
                start_offset: 5,
                end_offset: 11,
            }]
        );
        assert!(editor.is_empty());
    }

    #[test]
    fn test_json_uses_camel_case() {
        let mut editor = MentionEditor::new();
        editor.insert_mention(1, "bob", false);
        let format = MentionFormat::parse("%s:%s").unwrap();
        let message = ExportMessage::compose(&mut editor, &format, false);

        let json = to_json(&[message]).unwrap();
        assert!(json.contains("\"rawText\": \"bob \""));
        assert!(json.contains("\"startOffset\": 0"));
        assert!(json.contains("\"createdAt\""));
    }
}
