use serde::{Deserialize, Serialize};

use crate::error::MentionResult;
use crate::model::{MentionId, Rgb};
use crate::template::MentionFormat;

/// Someone who can be mentioned
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    pub id: MentionId,
    pub name: String,
}

impl Contact {
    pub fn new(id: MentionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// User-facing settings; every field falls back to its default
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct MentionConfig {
    /// Color of highlighted mentions
    pub highlight_color: Rgb,
    /// Template used when sending a message
    pub template: String,
    /// Typing this character opens the contact picker
    pub trigger: char,
    pub contacts: Vec<Contact>,
}

impl MentionConfig {
    pub const DEFAULT_TEMPLATE: &'static str = "[mention: %s, %s]";

    pub fn from_json(json: &str) -> MentionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> MentionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn format(&self) -> MentionResult<MentionFormat> {
        MentionFormat::parse(&self.template)
    }
}

impl Default for MentionConfig {
    fn default() -> Self {
        Self {
            highlight_color: Rgb::default(),
            template: Self::DEFAULT_TEMPLATE.to_string(),
            trigger: '@',
            contacts: vec![
                Contact::new(1, "alice"),
                Contact::new(2, "bob"),
                Contact::new(3, "carol"),
                Contact::new(4, "dave"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MentionError;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = MentionConfig::from_json(r##"{ "highlightColor": "#00aa00" }"##).unwrap();
        assert_eq!(config.highlight_color, Rgb::new(0x00, 0xAA, 0x00));
        assert_eq!(config.template, MentionConfig::DEFAULT_TEMPLATE);
        assert_eq!(config.trigger, '@');
        assert_eq!(config.contacts.len(), 4);
    }

    #[test]
    fn test_bad_color_is_config_error() {
        let err = MentionConfig::from_json(r#"{ "highlightColor": "red" }"#).unwrap_err();
        assert!(matches!(err, MentionError::Config(_)));
    }

    #[test]
    fn test_roundtrip_json() {
        let config = MentionConfig::default();
        let json = config.to_json().unwrap();
        assert!(json.contains("\"#FF0000\""));
        assert_eq!(MentionConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_template_validated_on_use() {
        let config = MentionConfig {
            template: "%s".to_string(),
            ..MentionConfig::default()
        };
        assert!(config.format().is_err());
    }
}
