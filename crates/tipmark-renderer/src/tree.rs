//! A finished pulldown-cmark event list as an [`OutputTree`].

use pulldown_cmark::Event;
use tipmark_core::{Fragment, OutputTree, RichTextRenderer, TipmarkError, WidgetOptions};

use crate::events::{Opacity, fragment_events};

/// Owns the complete event list of a document.
///
/// Text nodes are the indices of `Event::Text` outside code blocks and
/// image alt text. A text event with no enclosing `Start` tag has no
/// parent element and cannot be spliced.
#[derive(Debug, Clone)]
pub struct EventTree<'a, R = ()> {
    events: Vec<Event<'a>>,
    renderer: R,
    options: WidgetOptions,
}

impl<'a> EventTree<'a> {
    pub fn new(events: Vec<Event<'a>>) -> Self {
        Self::with_renderer(events, (), WidgetOptions::default())
    }
}

impl<'a, R: RichTextRenderer> EventTree<'a, R> {
    pub fn with_renderer(events: Vec<Event<'a>>, renderer: R, options: WidgetOptions) -> Self {
        Self {
            events,
            renderer,
            options,
        }
    }

    pub fn events(&self) -> &[Event<'a>] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event<'a>> {
        self.events
    }
}

/// A text event in an [`EventTree`], with the number of tags open around
/// it when the tree was scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEvent {
    pub index: usize,
    pub depth: usize,
}

impl<'a, R: RichTextRenderer> OutputTree for EventTree<'a, R> {
    type Node = TextEvent;

    fn text_nodes(&self) -> Vec<TextEvent> {
        let mut opacity = Opacity::default();
        let mut depth = 0usize;
        let mut nodes = Vec::new();
        for (index, event) in self.events.iter().enumerate() {
            match event {
                Event::Text(_) if opacity.is_clear() => nodes.push(TextEvent { index, depth }),
                Event::Start(_) => depth += 1,
                Event::End(_) => depth = depth.saturating_sub(1),
                _ => {}
            }
            opacity.observe(event);
        }
        nodes
    }

    fn node_text(&self, node: &TextEvent) -> Option<String> {
        match self.events.get(node.index) {
            Some(Event::Text(text)) => Some(text.to_string()),
            _ => None,
        }
    }

    fn splice(&mut self, node: &TextEvent, fragments: Vec<Fragment>) -> tipmark_core::Result<()> {
        let index = node.index;
        if !matches!(self.events.get(index), Some(Event::Text(_))) {
            return Err(TipmarkError::attachment(format!(
                "event {index} is not a text event"
            )));
        }
        if node.depth == 0 {
            return Err(TipmarkError::attachment(format!(
                "text event {index} has no enclosing element"
            )));
        }

        let replacement: Vec<Event<'a>> =
            fragment_events(fragments, &self.renderer, self.options).collect();
        self.events.splice(index..=index, replacement);
        Ok(())
    }
}
