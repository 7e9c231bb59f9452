//! Placeholder templates used to serialize mentions.
//!
//! A template holds exactly two placeholders, consumed in order: the
//! mention id, then its name. `%s` and `%d` are both accepted, `%%` is a
//! literal percent sign.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::error::{MentionError, MentionResult};
use crate::model::MentionId;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder,
}

/// A validated mention template such as `"[mention: %s, %s]"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionFormat {
    source: String,
    segments: Vec<Segment>,
}

impl MentionFormat {
    pub const PLACEHOLDERS: usize = 2;

    pub fn parse(template: &str) -> MentionResult<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut found = 0;
        let mut chars = template.chars();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            match chars.next() {
                Some('%') => literal.push('%'),
                Some('s') | Some('d') => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder);
                    found += 1;
                }
                Some(other) => return Err(MentionError::unsupported_specifier(template, other)),
                None => return Err(MentionError::dangling_percent(template)),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        if found != Self::PLACEHOLDERS {
            return Err(MentionError::template(template, found));
        }

        Ok(Self {
            source: template.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Apply the template to one mention
    pub fn format(&self, id: MentionId, name: &str) -> String {
        let mut out = String::new();
        self.write_to(&mut out, id, name);
        out
    }

    pub(crate) fn write_to(&self, out: &mut String, id: MentionId, name: &str) {
        let mut placeholder = 0;
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder => {
                    if placeholder == 0 {
                        let _ = write!(out, "{}", id);
                    } else {
                        out.push_str(name);
                    }
                    placeholder += 1;
                }
            }
        }
    }
}

impl FromStr for MentionFormat {
    type Err = MentionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_positional() {
        let format = MentionFormat::parse("[mention: %s, %s]").unwrap();
        assert_eq!(format.format(7, "Alice"), "[mention: 7, Alice]");

        let format: MentionFormat = "<@%d|%s>".parse().unwrap();
        assert_eq!(format.format(42, "bob"), "<@42|bob>");
    }

    #[test]
    fn test_percent_escape() {
        let format = MentionFormat::parse("100%% %s=%s").unwrap();
        assert_eq!(format.format(1, "x"), "100% 1=x");
    }

    #[test]
    fn test_wrong_placeholder_count_fails_fast() {
        assert!(matches!(
            MentionFormat::parse("[%s]"),
            Err(MentionError::Template { found: 1, .. })
        ));
        assert!(matches!(
            MentionFormat::parse("%s %s %s"),
            Err(MentionError::Template { found: 3, .. })
        ));
        assert!(matches!(
            MentionFormat::parse("no placeholders"),
            Err(MentionError::Template { found: 0, .. })
        ));
    }

    #[test]
    fn test_bad_specifiers() {
        assert!(matches!(
            MentionFormat::parse("%s %x"),
            Err(MentionError::UnsupportedSpecifier { specifier: 'x', .. })
        ));
        assert!(matches!(
            MentionFormat::parse("%s %s %"),
            Err(MentionError::DanglingPercent { .. })
        ));
    }
}
