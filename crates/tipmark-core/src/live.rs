//! Cursor-aware decorations for the live editing surface.
//!
//! On every qualifying view update (document, viewport or selection change)
//! the whole buffer is rescanned and the decoration set is rebuilt from
//! scratch. Each annotation either:
//!
//! - stays as raw source text when the cursor is on it (`start <= c <= end`),
//!   so the user can edit it, or
//! - is replaced over its full `[start, end)` span by a collapsed widget.
//!
//! The previous state is dropped, never diffed or patched. Matching is
//! linear and buffers are small, so the rebuild is cheap and a moved range
//! can never leave a stale widget behind.

use std::ops::Range;

use web_time::Instant;

use crate::matcher::find_annotations;
use crate::text::TextBuffer;
use crate::types::Selection;
use crate::widget::AnnotationWidget;

/// A replacement range with the widget drawn in its place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    /// Char range of buffer text hidden behind the widget.
    pub range: Range<usize>,
    pub widget: AnnotationWidget,
}

/// The full decoration set for one buffer snapshot.
///
/// `decorations` is sorted by start offset and non-overlapping, the order
/// the matcher produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecorationState {
    pub decorations: Vec<Decoration>,
    /// Annotation ranges left as raw source because the cursor is on them.
    pub active: Vec<Range<usize>>,
    /// Cursor offset the state was computed for.
    pub cursor: usize,
}

impl DecorationState {
    pub fn is_empty(&self) -> bool {
        self.decorations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.decorations.len()
    }

    /// The decoration covering `offset`, if any.
    pub fn decoration_at(&self, offset: usize) -> Option<&Decoration> {
        self.decorations.iter().find(|d| d.range.contains(&offset))
    }

    /// Whether `range` is an annotation currently shown as source.
    pub fn is_active(&self, range: &Range<usize>) -> bool {
        self.active.iter().any(|r| r == range)
    }
}

/// Switches for the live surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiveOptions {
    /// Show every annotation as source text, regardless of cursor position.
    pub force_source: bool,
}

/// Compute the decoration set for `text` with the cursor at `cursor`.
pub fn build_decorations(text: &str, cursor: usize, options: LiveOptions) -> DecorationState {
    let mut state = DecorationState {
        cursor,
        ..Default::default()
    };

    for m in find_annotations(text) {
        if options.force_source {
            // Explicit toggle: the widget itself renders as source.
            state.decorations.push(Decoration {
                range: m.char_range.clone(),
                widget: AnnotationWidget::active(&m),
            });
        } else if m.contains_cursor(cursor) {
            state.active.push(m.char_range.clone());
        } else {
            state.decorations.push(Decoration {
                range: m.char_range.clone(),
                widget: AnnotationWidget::collapsed(&m),
            });
        }
    }

    state
}

/// What changed in the host view since the last notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewUpdate {
    pub doc_changed: bool,
    pub viewport_changed: bool,
    pub selection_changed: bool,
}

impl ViewUpdate {
    pub fn doc() -> Self {
        Self {
            doc_changed: true,
            ..Default::default()
        }
    }

    pub fn viewport() -> Self {
        Self {
            viewport_changed: true,
            ..Default::default()
        }
    }

    pub fn selection() -> Self {
        Self {
            selection_changed: true,
            ..Default::default()
        }
    }

    pub fn needs_rebuild(&self) -> bool {
        self.doc_changed || self.viewport_changed || self.selection_changed
    }
}

/// A live editable view hosting the decorations.
pub trait HostView {
    type Buffer: TextBuffer + ?Sized;

    /// Current buffer contents.
    fn buffer(&self) -> &Self::Buffer;

    /// Current selection; its head is the primary cursor.
    fn selection(&self) -> Selection;

    /// Replace all registered replacement ranges with `decorations`.
    ///
    /// Ranges arrive sorted and non-overlapping.
    fn set_decorations(&mut self, decorations: &[Decoration]);
}

/// Owns the decoration state for one live view.
#[derive(Debug, Default)]
pub struct LiveDecorator {
    options: LiveOptions,
    state: DecorationState,
}

impl LiveDecorator {
    pub fn new(options: LiveOptions) -> Self {
        Self {
            options,
            state: DecorationState::default(),
        }
    }

    pub fn options(&self) -> LiveOptions {
        self.options
    }

    pub fn state(&self) -> &DecorationState {
        &self.state
    }

    /// Build the initial decorations for a freshly opened view.
    pub fn attach<V: HostView>(&mut self, view: &mut V) {
        self.rebuild_view(view);
    }

    /// React to a view update. Returns whether a rebuild happened.
    pub fn update<V: HostView>(&mut self, view: &mut V, update: ViewUpdate) -> bool {
        if !update.needs_rebuild() {
            return false;
        }
        self.rebuild_view(view);
        true
    }

    /// Flip the show-source toggle and redraw.
    pub fn toggle_source<V: HostView>(&mut self, view: &mut V) {
        self.options.force_source = !self.options.force_source;
        tracing::debug!(
            target: "tipmark::live",
            force_source = self.options.force_source,
            "source toggle"
        );
        self.rebuild_view(view);
    }

    /// Recompute the state from a buffer and selection, replacing the old one.
    pub fn rebuild<B: TextBuffer + ?Sized>(
        &mut self,
        buffer: &B,
        selection: Selection,
    ) -> &DecorationState {
        let start = Instant::now();
        let text = buffer.contents();
        let cursor = selection.cursor();

        self.state = build_decorations(&text, cursor, self.options);

        tracing::trace!(
            target: "tipmark::live",
            cursor,
            decorations = self.state.decorations.len(),
            active = self.state.active.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "decorations rebuilt"
        );

        &self.state
    }

    fn rebuild_view<V: HostView>(&mut self, view: &mut V) {
        let selection = view.selection();
        self.rebuild(view.buffer(), selection);
        view.set_decorations(&self.state.decorations);
    }
}
