//! Char-offset helpers over UTF-8 buffers

/// Number of chars in `text`
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of the char at `offset`, clamped to the end of `text`
pub fn byte_index(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Chars `[start, end)` of `text`; empty when the span is inverted
pub fn slice(text: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    let from = byte_index(text, start);
    let to = byte_index(text, end);
    &text[from..to]
}

/// Replace chars `[start, end)` with `insert`
pub fn splice(text: &mut String, start: usize, end: usize, insert: &str) {
    let from = byte_index(text, start);
    let to = byte_index(text, end.max(start));
    text.replace_range(from..to, insert);
}

/// Char before `offset`, if any
pub fn char_before(text: &str, offset: usize) -> Option<char> {
    offset.checked_sub(1).and_then(|i| text.chars().nth(i))
}
