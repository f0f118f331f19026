use std::ops::Range;

/// A live view's selection, in chars. `head` is where the caret is drawn
/// and is the offset annotations are tested against.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// A bare caret at `offset`.
    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn cursor(&self) -> usize {
        self.head
    }

    pub fn is_caret(&self) -> bool {
        self.anchor == self.head
    }

    /// Selected chars, ordered.
    pub fn range(&self) -> Range<usize> {
        self.anchor.min(self.head)..self.anchor.max(self.head)
    }
}
