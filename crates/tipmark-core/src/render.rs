//! Rendering collaborators.
//!
//! Tooltip text (and optionally visible text) may carry its own inline
//! markup. The core does not parse it; it hands the string to a
//! `RichTextRenderer` supplied by the host environment.
//!
//! Implementations are provided by the consuming surface (e.g., tipmark-renderer).

use pulldown_cmark_escape::escape_html_body_text;

/// Renders a string's nested markup as HTML.
pub trait RichTextRenderer {
    /// Append the rendered HTML for `text` to `out`.
    fn render_inline(&self, text: &str, out: &mut String);
}

/// Unit type implementation - plain escaped text, no nested markup.
impl RichTextRenderer for () {
    fn render_inline(&self, text: &str, out: &mut String) {
        push_escaped(out, text);
    }
}

impl<T: RichTextRenderer> RichTextRenderer for &T {
    fn render_inline(&self, text: &str, out: &mut String) {
        (*self).render_inline(text, out)
    }
}

impl<T: RichTextRenderer> RichTextRenderer for Option<T> {
    fn render_inline(&self, text: &str, out: &mut String) {
        match self {
            Some(r) => r.render_inline(text, out),
            None => push_escaped(out, text),
        }
    }
}

/// Append `text` with HTML body-text escaping.
pub fn push_escaped(out: &mut String, text: &str) {
    // Writing into a String cannot fail.
    let _ = escape_html_body_text(&mut *out, text);
}
