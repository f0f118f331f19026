//! Static fragment building.
//!
//! After a document has been fully rendered, every text-bearing leaf is
//! scanned for annotations. A leaf with matches is split into plain-text
//! fragments interleaved with annotation widgets, and the host tree splices
//! that sequence in place of the original node. Leaves without matches are
//! left untouched.
//!
//! Hosts (a DOM, a markdown event stream, ...) implement [`OutputTree`].

use smol_str::SmolStr;

use crate::error::Result;
use crate::matcher::find_annotations;
use crate::render::{RichTextRenderer, push_escaped};
use crate::widget::{AnnotationWidget, WidgetOptions};

/// One piece of a rewritten text node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Untouched text between annotations.
    Text(SmolStr),
    /// A collapsed annotation widget.
    Annotation(AnnotationWidget),
}

impl Fragment {
    pub fn is_annotation(&self) -> bool {
        matches!(self, Fragment::Annotation(_))
    }
}

/// Split `text` into text and annotation fragments.
///
/// Returns `None` when `text` has no annotations, so callers can skip the
/// substitution entirely.
pub fn build_fragments(text: &str) -> Option<Vec<Fragment>> {
    let matches = find_annotations(text);
    if matches.is_empty() {
        return None;
    }

    let mut fragments = Vec::with_capacity(matches.len() * 2 + 1);
    let mut last_byte = 0;

    for m in &matches {
        if m.byte_range.start > last_byte {
            fragments.push(Fragment::Text(SmolStr::new(
                &text[last_byte..m.byte_range.start],
            )));
        }
        fragments.push(Fragment::Annotation(AnnotationWidget::collapsed(m)));
        last_byte = m.byte_range.end;
    }

    if last_byte < text.len() {
        fragments.push(Fragment::Text(SmolStr::new(&text[last_byte..])));
    }

    Some(fragments)
}

/// Write fragments as HTML: text escaped, widgets in their collapsed form.
pub fn fragments_to_html<R: RichTextRenderer>(
    fragments: &[Fragment],
    renderer: &R,
    options: WidgetOptions,
    out: &mut String,
) {
    for fragment in fragments {
        match fragment {
            Fragment::Text(text) => push_escaped(out, text),
            Fragment::Annotation(widget) => widget.render_html(renderer, options, out),
        }
    }
}

/// A finished output tree whose text leaves can be rewritten in place.
pub trait OutputTree {
    /// Handle to a text-bearing node.
    type Node;

    /// Every text-bearing leaf of the tree in document order, including
    /// leaves nested in inline contexts (emphasis, list items, cells, ...).
    fn text_nodes(&self) -> Vec<Self::Node>;

    /// Current text of a node, or `None` if the handle no longer resolves.
    fn node_text(&self, node: &Self::Node) -> Option<String>;

    /// Replace `node` with `fragments`, preserving their order.
    ///
    /// Must either fully succeed or leave the tree unchanged; return
    /// `TipmarkError::Attachment` when the node has no parent to splice into.
    fn splice(&mut self, node: &Self::Node, fragments: Vec<Fragment>) -> Result<()>;
}

/// Counts from one static pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticPassReport {
    pub nodes_visited: usize,
    pub nodes_rewritten: usize,
    pub widgets: usize,
    /// Nodes with annotations that could not be attached.
    pub skipped: usize,
}

/// Rewrite every annotated text leaf of `tree`.
///
/// Attachment failures are logged and skipped per node; sibling nodes are
/// still processed.
pub fn annotate_tree<T: OutputTree>(tree: &mut T) -> StaticPassReport {
    let mut report = StaticPassReport::default();
    let nodes = tree.text_nodes();

    // Back to front, so splicing a node never shifts a handle still to visit.
    for node in nodes.iter().rev() {
        report.nodes_visited += 1;

        let Some(text) = tree.node_text(node) else {
            continue;
        };
        let Some(fragments) = build_fragments(&text) else {
            continue;
        };

        let widgets = fragments.iter().filter(|f| f.is_annotation()).count();
        match tree.splice(node, fragments) {
            Ok(()) => {
                report.nodes_rewritten += 1;
                report.widgets += widgets;
            }
            Err(err) => {
                report.skipped += 1;
                tracing::debug!(target: "tipmark::static", %err, "skipping text node");
            }
        }
    }

    tracing::debug!(
        target: "tipmark::static",
        visited = report.nodes_visited,
        rewritten = report.nodes_rewritten,
        widgets = report.widgets,
        skipped = report.skipped,
        "static pass complete"
    );

    report
}
