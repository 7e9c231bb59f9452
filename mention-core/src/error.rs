//! Error types for mention-core

use thiserror::Error;

/// Errors raised by the mention library.
///
/// Offsets handed in by the host are trusted, so the only failures are
/// malformed caller input: templates, colors and configuration.
#[derive(Debug, Error)]
pub enum MentionError {
    /// Template does not consume exactly an id and a name
    #[error("Template must contain exactly 2 placeholders, found {found}: {template:?}")]
    Template { template: String, found: usize },

    /// Format specifier other than %s, %d or %%
    #[error("Unsupported format specifier '%{specifier}' in template {template:?}")]
    UnsupportedSpecifier { template: String, specifier: char },

    /// Template ends with a lone '%'
    #[error("Dangling '%' at end of template {template:?}")]
    DanglingPercent { template: String },

    #[error("Invalid color: {value:?} (expected #RRGGBB)")]
    InvalidColor { value: String },

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for mention operations
pub type MentionResult<T> = Result<T, MentionError>;

impl MentionError {
    pub fn template(template: impl Into<String>, found: usize) -> Self {
        MentionError::Template {
            template: template.into(),
            found,
        }
    }

    pub fn unsupported_specifier(template: impl Into<String>, specifier: char) -> Self {
        MentionError::UnsupportedSpecifier {
            template: template.into(),
            specifier,
        }
    }

    pub fn dangling_percent(template: impl Into<String>) -> Self {
        MentionError::DanglingPercent {
            template: template.into(),
        }
    }

    pub fn invalid_color(value: impl Into<String>) -> Self {
        MentionError::InvalidColor {
            value: value.into(),
        }
    }
}
