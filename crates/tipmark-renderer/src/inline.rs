//! Inline markdown for tooltip content.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};
use tipmark_core::RichTextRenderer;

/// Renders tooltip (and optionally visible) text as inline markdown.
///
/// Block structure (paragraphs, lists, headings, quotes, code blocks) is
/// flattened to its inline content so the result fits inside a `<span>`;
/// consecutive blocks are separated by a newline. Raw HTML in the text is
/// escaped rather than passed through.
#[derive(Debug, Clone, Copy)]
pub struct InlineMarkdown {
    options: Options,
}

impl Default for InlineMarkdown {
    fn default() -> Self {
        Self::with_options(Options::ENABLE_STRIKETHROUGH)
    }
}

impl InlineMarkdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: Options) -> Self {
        Self { options }
    }
}

fn is_inline(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. } | Tag::Image { .. }
    )
}

fn is_inline_end(tag: &TagEnd) -> bool {
    matches!(
        tag,
        TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link | TagEnd::Image
    )
}

impl RichTextRenderer for InlineMarkdown {
    fn render_inline(&self, text: &str, out: &mut String) {
        let start = out.len();
        let events = Parser::new_ext(text, self.options).filter_map(|event| match event {
            Event::Start(tag) if !is_inline(&tag) => None,
            Event::End(tag) if !is_inline_end(&tag) => Some(Event::SoftBreak),
            Event::Html(raw) | Event::InlineHtml(raw) => Some(Event::Text(raw)),
            Event::Rule => None,
            other => Some(other),
        });
        html::push_html(out, events);

        let trimmed = start + out[start..].trim_end().len();
        out.truncate(trimmed);
    }
}
