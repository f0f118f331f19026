//! Annotation matching.
//!
//! Scans text for `[visible]{tooltip}` annotations. Both rendering surfaces
//! (static output and live editing) go through [`find_annotations`], so the
//! grammar is defined exactly once.
//!
//! Grammar:
//! - `visible` is any run of characters except `[`, `]`, `{`, `}`
//! - `tooltip` is any run of characters except `{`, `}` (brackets allowed)
//! - either part may be empty
//!
//! Scanning is leftmost-first and resumes right after each match, so
//! earlier annotations win and matches never overlap. Text that does not
//! fit the grammar is not an error, it simply stays plain text.

use std::ops::Range;
use std::sync::LazyLock;

#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
use regex::Regex;
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
use regex_lite::Regex;
use smol_str::SmolStr;

pub static ANNOTATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\[\]{}]*)\]\{([^{}]*)\}").expect("annotation pattern compiles")
});

/// One annotation found in a text.
///
/// Offsets in `char_range` are Unicode scalar values, the coordinate space
/// of the editor buffers. `byte_range` indexes the scanned `&str`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationMatch {
    /// Text shown by default.
    pub visible: SmolStr,
    /// Text revealed on hover.
    pub tooltip: SmolStr,
    /// Half-open char range of the whole annotation, delimiters included.
    pub char_range: Range<usize>,
    /// Half-open byte range of the whole annotation in the scanned text.
    pub byte_range: Range<usize>,
}

impl AnnotationMatch {
    pub fn start(&self) -> usize {
        self.char_range.start
    }

    pub fn end(&self) -> usize {
        self.char_range.end
    }

    /// Rebuild the exact source form `[visible]{tooltip}`.
    pub fn source(&self) -> String {
        format!("[{}]{{{}}}", self.visible, self.tooltip)
    }

    /// Whether a cursor at `offset` sits on this annotation.
    ///
    /// Inclusive on both ends: a cursor right before `[` or right after `}`
    /// counts as inside.
    pub fn contains_cursor(&self, offset: usize) -> bool {
        offset >= self.char_range.start && offset <= self.char_range.end
    }
}

/// Find all annotations in `text`, ordered by start offset.
pub fn find_annotations(text: &str) -> Vec<AnnotationMatch> {
    let mut matches = Vec::new();

    // Char offsets are accumulated incrementally so the scan stays linear.
    let mut last_byte = 0;
    let mut last_char = 0;

    for caps in ANNOTATION_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };

        let start_char = last_char + text[last_byte..whole.start()].chars().count();
        let end_char = start_char + whole.as_str().chars().count();
        last_byte = whole.end();
        last_char = end_char;

        let visible = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let tooltip = caps.get(2).map(|m| m.as_str()).unwrap_or_default();

        matches.push(AnnotationMatch {
            visible: SmolStr::new(visible),
            tooltip: SmolStr::new(tooltip),
            char_range: start_char..end_char,
            byte_range: whole.range(),
        });
    }

    tracing::trace!(
        target: "tipmark::matcher",
        text_len = text.len(),
        count = matches.len(),
        "find_annotations"
    );

    matches
}
