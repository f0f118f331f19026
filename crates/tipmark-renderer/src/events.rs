//! Streaming annotation pass over pulldown-cmark events.

use std::collections::VecDeque;

use pulldown_cmark::{CowStr, Event, Tag, TagEnd, TextMergeStream};
use tipmark_core::{Fragment, RichTextRenderer, WidgetOptions, build_fragments};

/// Tracks whether the stream is inside content whose text must stay
/// literal: code blocks, and image alt text (written as an attribute).
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Opacity {
    depth: usize,
}

impl Opacity {
    pub(crate) fn is_clear(&self) -> bool {
        self.depth == 0
    }

    pub(crate) fn observe(&mut self, event: &Event<'_>) {
        match event {
            Event::Start(Tag::CodeBlock(_) | Tag::Image { .. }) => self.depth += 1,
            Event::End(TagEnd::CodeBlock | TagEnd::Image) => {
                self.depth = self.depth.saturating_sub(1)
            }
            _ => {}
        }
    }
}

/// Replace a soft break with the newline it renders as, so it merges with
/// the text on either side.
pub fn soft_break_as_text(event: Event<'_>) -> Event<'_> {
    match event {
        Event::SoftBreak => Event::Text(CowStr::Borrowed("\n")),
        other => other,
    }
}

/// Turn fragments into events: text stays text, widgets become inline HTML.
pub(crate) fn fragment_events<'a, R: RichTextRenderer>(
    fragments: Vec<Fragment>,
    renderer: &R,
    options: WidgetOptions,
) -> impl Iterator<Item = Event<'a>> {
    fragments.into_iter().map(move |fragment| match fragment {
        Fragment::Text(text) => Event::Text(CowStr::from(text.to_string())),
        Fragment::Annotation(widget) => {
            let mut html = String::new();
            widget.render_html(renderer, options, &mut html);
            Event::InlineHtml(CowStr::from(html))
        }
    })
}

type SoftBreaks<'a, I> = std::iter::Map<I, fn(Event<'a>) -> Event<'a>>;

/// Iterator adapter that rewrites annotated text events.
///
/// Adjacent text events are merged first, since the parser splits text at
/// bracket boundaries and soft breaks. Text inside code blocks is passed
/// through.
pub struct AnnotationEvents<'a, I, R = ()>
where
    I: Iterator<Item = Event<'a>>,
{
    inner: TextMergeStream<'a, SoftBreaks<'a, I>>,
    renderer: R,
    options: WidgetOptions,
    opacity: Opacity,
    pending: VecDeque<Event<'a>>,
}

impl<'a, I> AnnotationEvents<'a, I>
where
    I: Iterator<Item = Event<'a>>,
{
    pub fn new(iter: I) -> Self {
        Self::with_renderer(iter, (), WidgetOptions::default())
    }
}

impl<'a, I, R> AnnotationEvents<'a, I, R>
where
    I: Iterator<Item = Event<'a>>,
    R: RichTextRenderer,
{
    pub fn with_renderer(iter: I, renderer: R, options: WidgetOptions) -> Self {
        Self {
            inner: TextMergeStream::new(
                iter.map(soft_break_as_text as fn(Event<'a>) -> Event<'a>),
            ),
            renderer,
            options,
            opacity: Opacity::default(),
            pending: VecDeque::new(),
        }
    }
}

impl<'a, I, R> Iterator for AnnotationEvents<'a, I, R>
where
    I: Iterator<Item = Event<'a>>,
    R: RichTextRenderer,
{
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }

        match self.inner.next()? {
            Event::Text(text) if self.opacity.is_clear() => match build_fragments(&text) {
                Some(fragments) => {
                    self.pending
                        .extend(fragment_events(fragments, &self.renderer, self.options));
                    self.pending.pop_front()
                }
                None => Some(Event::Text(text)),
            },
            event => {
                self.opacity.observe(&event);
                Some(event)
            }
        }
    }
}
