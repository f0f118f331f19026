//! tipmark renderer
//!
//! Renders markdown to HTML with `[visible]{tooltip}` annotations turned
//! into hover-reveal widgets. Parsing and HTML output are pulldown-cmark's;
//! this crate runs the annotation pass over the finished event stream.

use pulldown_cmark::{Event, Options, Parser, TextMergeStream, html};
use tipmark_core::{StaticPassReport, WidgetOptions, annotate_tree};

pub mod events;
pub mod inline;
pub mod tree;

pub use events::{AnnotationEvents, soft_break_as_text};
pub use inline::InlineMarkdown;
pub use tree::{EventTree, TextEvent};

/// Options for [`render_markdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub tables: bool,
    pub strikethrough: bool,
    /// Render tooltip text as inline markdown instead of plain text.
    pub rich_tooltips: bool,
    pub widget: WidgetOptions,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            rich_tooltips: true,
            widget: WidgetOptions::default(),
        }
    }
}

impl RenderOptions {
    pub fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        options
    }

    fn tooltip_renderer(&self) -> Option<InlineMarkdown> {
        self.rich_tooltips
            .then(|| InlineMarkdown::with_options(self.parser_options()))
    }
}

/// Parse `source` into merged events, ready for the annotation pass.
///
/// Soft breaks are folded into the surrounding text so annotations
/// written across a wrapped line still match.
pub fn parse<'a>(source: &'a str, options: &RenderOptions) -> Vec<Event<'a>> {
    let events = Parser::new_ext(source, options.parser_options()).map(soft_break_as_text);
    TextMergeStream::new(events).collect()
}

/// Render markdown to HTML, annotations included.
pub fn render_markdown(source: &str, options: &RenderOptions) -> String {
    render_markdown_with_report(source, options).0
}

/// Like [`render_markdown`], also returning the annotation pass counts.
pub fn render_markdown_with_report(
    source: &str,
    options: &RenderOptions,
) -> (String, StaticPassReport) {
    let mut tree =
        EventTree::with_renderer(parse(source, options), options.tooltip_renderer(), options.widget);
    let report = annotate_tree(&mut tree);

    let mut out = String::with_capacity(source.len() + source.len() / 2);
    html::push_html(&mut out, tree.into_events().into_iter());

    tracing::debug!(
        target: "tipmark::render",
        input = source.len(),
        output = out.len(),
        widgets = report.widgets,
        "rendered markdown"
    );
    (out, report)
}
