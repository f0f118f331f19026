//! tipmark-core: annotation logic without framework dependencies.
//!
//! Finds `[visible]{tooltip}` annotations in text and turns them into
//! hover-reveal widgets. This crate provides:
//! - `find_annotations` - the one matcher both rendering surfaces share
//! - `AnnotationWidget` - source/reveal rendering of a single annotation
//! - `annotate_tree` - static rewriting of finished output trees
//! - `LiveDecorator` - cursor-aware replacement ranges for live editing
//! - `HoverController` - overflow-free tooltip placement on hover
//! - `StyleSettings` / `StyleRegistry` - colours and the injected stylesheet
//!
//! Host environments (DOM, markdown event streams, editors) plug in
//! through the `OutputTree`, `HostView`, `StyleHost`, `SettingsStore`
//! and `RichTextRenderer` traits.

pub mod error;
pub mod fragments;
pub mod live;
pub mod matcher;
pub mod render;
pub mod settings;
pub mod style;
pub mod text;
pub mod tooltip;
pub mod types;
pub mod widget;

pub use error::{Result, TipmarkError};
pub use fragments::{Fragment, OutputTree, StaticPassReport, annotate_tree, build_fragments};
pub use live::{
    Decoration, DecorationState, HostView, LiveDecorator, LiveOptions, ViewUpdate,
    build_decorations,
};
pub use matcher::{AnnotationMatch, find_annotations};
pub use render::RichTextRenderer;
pub use settings::{FileStore, SettingsStore, StyleSettings};
pub use smol_str::SmolStr;
pub use style::{STYLE_ELEMENT_ID, StyleHost, StyleRegistry, generate_stylesheet};
pub use text::{EditorRope, TextBuffer};
pub use tooltip::{
    Geometry, HIDE_RESET_DELAY, HoverController, LeaveTarget, Placement, Rect, TooltipSurface,
    compute_placement,
};
pub use types::Selection;
pub use widget::{AnnotationWidget, WidgetOptions};
