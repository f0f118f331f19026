//! Buffers the live decorator can read.
//!
//! A live rebuild needs the whole text of the buffer (it is rescanned every
//! time) and, for hosts that draw widgets, char-range slices. Hosts either
//! hand over their own document through [`TextBuffer`] or keep an
//! [`EditorRope`].

use std::borrow::Cow;
use std::ops::Range;

use smol_str::{SmolStr, ToSmolStr};

/// Read access to a live buffer. Offsets are chars.
pub trait TextBuffer {
    fn len_chars(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// The full text.
    fn contents(&self) -> Cow<'_, str>;

    /// Text in `chars`, or `None` if the range is out of bounds.
    fn slice(&self, chars: Range<usize>) -> Option<SmolStr>;
}

impl TextBuffer for str {
    fn len_chars(&self) -> usize {
        self.chars().count()
    }

    fn contents(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }

    fn slice(&self, chars: Range<usize>) -> Option<SmolStr> {
        if chars.start > chars.end {
            return None;
        }
        let mut indices = self.char_indices().map(|(i, _)| i).chain([self.len()]);
        let start = indices.nth(chars.start)?;
        let end = if chars.end == chars.start {
            start
        } else {
            indices.nth(chars.end - chars.start - 1)?
        };
        Some(SmolStr::new(&self[start..end]))
    }
}

impl TextBuffer for String {
    fn len_chars(&self) -> usize {
        self.as_str().len_chars()
    }

    fn contents(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }

    fn slice(&self, chars: Range<usize>) -> Option<SmolStr> {
        self.as_str().slice(chars)
    }
}

/// A ropey-backed buffer for hosts without their own document model.
#[derive(Clone, Default)]
pub struct EditorRope {
    rope: ropey::Rope,
}

impl EditorRope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rope(&self) -> &ropey::Rope {
        &self.rope
    }

    /// Replace `chars` with `text`. Out-of-bounds ranges are clamped.
    pub fn edit(&mut self, chars: Range<usize>, text: &str) {
        let len = self.rope.len_chars();
        let end = chars.end.min(len);
        let start = chars.start.min(end);
        if start < end {
            self.rope.remove(start..end);
        }
        if !text.is_empty() {
            self.rope.insert(start, text);
        }
    }
}

impl std::fmt::Debug for EditorRope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorRope")
            .field("len_chars", &self.rope.len_chars())
            .finish()
    }
}

impl TextBuffer for EditorRope {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn contents(&self) -> Cow<'_, str> {
        match self.rope.slice(..).as_str() {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(self.rope.to_string()),
        }
    }

    fn slice(&self, chars: Range<usize>) -> Option<SmolStr> {
        if chars.start > chars.end || chars.end > self.rope.len_chars() {
            return None;
        }
        Some(self.rope.slice(chars).to_smolstr())
    }
}

impl From<&str> for EditorRope {
    fn from(text: &str) -> Self {
        Self {
            rope: ropey::Rope::from_str(text),
        }
    }
}

impl From<String> for EditorRope {
    fn from(text: String) -> Self {
        Self::from(text.as_str())
    }
}
