/// A pending buffer mutation, reported before the buffer changes.
///
/// `removed` chars starting at `start` are replaced by `inserted` chars.
/// All offsets are in pre-edit coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEdit {
    pub start: usize,
    pub removed: usize,
    pub inserted: usize,
}

impl TextEdit {
    pub fn new(start: usize, removed: usize, inserted: usize) -> Self {
        Self {
            start,
            removed,
            inserted,
        }
    }

    pub fn insertion(start: usize, inserted: usize) -> Self {
        Self::new(start, 0, inserted)
    }

    pub fn deletion(start: usize, removed: usize) -> Self {
        Self::new(start, removed, 0)
    }

    /// End of the replaced span in pre-edit coordinates
    pub fn end(&self) -> usize {
        self.start + self.removed
    }

    /// Net change in buffer length
    pub fn offset(&self) -> isize {
        self.inserted as isize - self.removed as isize
    }

    pub fn is_noop(&self) -> bool {
        self.removed == 0 && self.inserted == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_and_offset() {
        let edit = TextEdit::new(3, 4, 1);
        assert_eq!(edit.end(), 7);
        assert_eq!(edit.offset(), -3);
        assert_eq!(TextEdit::insertion(5, 2).offset(), 2);
        assert!(TextEdit::new(9, 0, 0).is_noop());
    }
}
