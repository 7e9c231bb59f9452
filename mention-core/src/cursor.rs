/// Platform-agnostic caret geometry over a buffer's char offsets.
/// Hosts use it to place the terminal cursor and to move the caret by lines.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Char offset where each line starts
    line_starts: Vec<usize>,
    /// Length of each line in chars, excluding the newline
    line_lens: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let mut line_starts = vec![0];
        let mut line_lens = Vec::new();
        let mut len = 0;

        for (i, c) in content.chars().enumerate() {
            if c == '\n' {
                line_lens.push(len);
                line_starts.push(i + 1);
                len = 0;
            } else {
                len += 1;
            }
        }
        line_lens.push(len);

        Self {
            line_starts,
            line_lens,
        }
    }

    /// Get the number of lines (an empty buffer has one empty line)
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_len(&self, row: usize) -> usize {
        self.line_lens.get(row).copied().unwrap_or(0)
    }

    /// Convert (row, col) to char offset, clamping to the line and buffer
    pub fn cursor_to_offset(&self, row: usize, col: usize) -> usize {
        if row >= self.line_starts.len() {
            // Return end of content
            let last = self.line_starts.len() - 1;
            return self.line_starts[last] + self.line_lens[last];
        }
        self.line_starts[row] + col.min(self.line_lens[row])
    }

    /// Convert char offset to (row, col)
    pub fn offset_to_cursor(&self, offset: usize) -> (usize, usize) {
        for (i, &start) in self.line_starts.iter().enumerate().rev() {
            if offset >= start {
                return (i, (offset - start).min(self.line_lens[i]));
            }
        }
        (0, 0)
    }

    pub fn move_up(&self, offset: usize) -> usize {
        let (row, col) = self.offset_to_cursor(offset);
        if row == 0 {
            return self.cursor_to_offset(0, 0);
        }
        self.cursor_to_offset(row - 1, col)
    }

    pub fn move_down(&self, offset: usize) -> usize {
        let (row, col) = self.offset_to_cursor(offset);
        if row + 1 >= self.line_count() {
            return self.cursor_to_offset(row, self.line_len(row));
        }
        self.cursor_to_offset(row + 1, col)
    }

    pub fn line_start(&self, offset: usize) -> usize {
        let (row, _) = self.offset_to_cursor(offset);
        self.cursor_to_offset(row, 0)
    }

    pub fn line_end(&self, offset: usize) -> usize {
        let (row, _) = self.offset_to_cursor(offset);
        self.cursor_to_offset(row, self.line_len(row))
    }
}

/// Offset of the start of the next word after `offset`
pub fn word_forward(content: &str, offset: usize) -> usize {
    let chars: Vec<char> = content.chars().collect();
    let mut pos = offset.min(chars.len());

    // Skip current word (non-whitespace)
    while pos < chars.len() && !chars[pos].is_whitespace() {
        pos += 1;
    }
    // Skip whitespace
    while pos < chars.len() && chars[pos].is_whitespace() {
        pos += 1;
    }
    pos
}

/// Offset of the start of the word before `offset`
pub fn word_back(content: &str, offset: usize) -> usize {
    let chars: Vec<char> = content.chars().collect();
    let mut pos = offset.min(chars.len());

    // Skip whitespace backwards
    while pos > 0 && chars[pos - 1].is_whitespace() {
        pos -= 1;
    }
    // Skip word backwards
    while pos > 0 && !chars[pos - 1].is_whitespace() {
        pos -= 1;
    }
    pos
}
