use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::TextEdit;
use crate::error::MentionError;

/// 24-bit display color, serialized as `"#RRGGBB"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Conventional alert red
    pub const RED: Rgb = Rgb::new(0xFF, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::RED
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = MentionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(MentionError::invalid_color(s));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| MentionError::invalid_color(s))
        };
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = MentionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

/// A colored span `[from, to)` over the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub from: usize,
    pub to: usize,
    pub color: Rgb,
}

/// Highlight spans owned by the host buffer.
///
/// Spans are exclusive at both ends: text inserted exactly at a span boundary
/// does not join the span.
#[derive(Debug, Clone, Default)]
pub struct HighlightSet {
    spans: Vec<Highlight>,
}

impl HighlightSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, from: usize, to: usize, color: Rgb) {
        if from < to {
            self.spans.push(Highlight { from, to, color });
        }
    }

    /// Drop every span overlapping `[start, end)`. Returns how many were removed.
    pub fn remove_overlapping(&mut self, start: usize, end: usize) -> usize {
        let before = self.spans.len();
        self.spans.retain(|span| !(span.from < end && span.to > start));
        before - self.spans.len()
    }

    /// Move spans to post-edit coordinates
    pub fn apply_edit(&mut self, edit: &TextEdit) {
        let (start, end) = (edit.start, edit.end());
        let offset = edit.offset();

        let map_from = |p: usize| {
            if p < start {
                p
            } else if p >= end {
                p.saturating_add_signed(offset)
            } else {
                start + edit.inserted
            }
        };
        let map_to = |p: usize| {
            if p <= start {
                p
            } else if p >= end {
                p.saturating_add_signed(offset)
            } else {
                start
            }
        };

        for span in &mut self.spans {
            span.from = map_from(span.from);
            span.to = map_to(span.to);
        }
        self.spans.retain(|span| span.from < span.to);
    }

    pub fn color_at(&self, offset: usize) -> Option<Rgb> {
        self.spans
            .iter()
            .find(|span| offset >= span.from && offset < span.to)
            .map(|span| span.color)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Highlight> {
        self.spans.iter()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn clear(&mut self) {
        self.spans.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_parse_and_display() {
        let color: Rgb = "#1e90ff".parse().unwrap();
        assert_eq!(color, Rgb::new(0x1E, 0x90, 0xFF));
        assert_eq!(color.to_string(), "#1E90FF");
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("zz0000".parse::<Rgb>().is_err());
        assert_eq!(Rgb::default(), Rgb::RED);
    }

    #[test]
    fn test_insert_at_boundaries_is_exclusive() {
        let mut set = HighlightSet::new();
        set.add(4, 7, Rgb::RED);

        set.apply_edit(&TextEdit::insertion(7, 2));
        assert_eq!(set.iter().next().map(|h| (h.from, h.to)), Some((4, 7)));

        set.apply_edit(&TextEdit::insertion(4, 1));
        assert_eq!(set.iter().next().map(|h| (h.from, h.to)), Some((5, 8)));
    }

    #[test]
    fn test_deletion_over_span_drops_it() {
        let mut set = HighlightSet::new();
        set.add(4, 7, Rgb::RED);
        set.add(10, 12, Rgb::RED);

        set.apply_edit(&TextEdit::deletion(3, 5));
        let spans: Vec<_> = set.iter().map(|h| (h.from, h.to)).collect();
        assert_eq!(spans, vec![(5, 7)]);
    }

    #[test]
    fn test_remove_overlapping_is_strict() {
        let mut set = HighlightSet::new();
        set.add(0, 3, Rgb::RED);
        set.add(5, 8, Rgb::RED);

        assert_eq!(set.remove_overlapping(3, 5), 0);
        assert_eq!(set.remove_overlapping(2, 6), 2);
        assert!(set.is_empty());
    }

    #[test]
    fn test_color_at() {
        let mut set = HighlightSet::new();
        set.add(2, 4, Rgb::new(0, 0, 255));
        assert_eq!(set.color_at(2), Some(Rgb::new(0, 0, 255)));
        assert_eq!(set.color_at(4), None);
    }
}
