//! Browser DOM layer for tipmark.
//!
//! Connects the core logic to a live page. It assumes a
//! `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `dom_tree`: the static pass over rendered DOM (`OutputTree` impl)
//! - `tooltip`: pointer events and timers driving `HoverController`
//! - `style`: the `<style>` element in `document.head`
//! - `storage`: style settings in `localStorage`
//! - `logging`: console tracing subscriber
//!
//! This crate re-exports `tipmark-core`, so consumers only need to depend
//! on `tipmark-browser`.

// Re-export core crate
pub use tipmark_core;
pub use tipmark_core::*;

pub mod dom_tree;
pub mod logging;
pub mod storage;
pub mod style;
pub mod tooltip;

pub use dom_tree::DomTree;
pub use logging::init_logging;
pub use storage::LocalStorageStore;
pub use style::DomStyleHost;
pub use tooltip::{TooltipBinding, attach_tooltip};

use wasm_bindgen::JsValue;
use web_sys::Element;

/// Result of annotating a rendered element.
///
/// Tooltip listeners live as long as the bindings; drop them (or this) to
/// detach.
pub struct Annotated {
    pub report: StaticPassReport,
    pub bindings: Vec<TooltipBinding>,
}

/// Run the static pass over `root` and wire every new widget's tooltip to
/// stay inside `container`.
///
/// Widgets that fail to wire up are logged and left without placement
/// handling; the CSS hover reveal still works for them.
pub fn annotate_element<R: RichTextRenderer>(
    root: &Element,
    container: &Element,
    renderer: R,
    options: WidgetOptions,
) -> Result<Annotated> {
    let mut tree = DomTree::with_renderer(root.clone(), renderer, options)?;
    let report = annotate_tree(&mut tree);

    let bindings = tree
        .take_triggers()
        .into_iter()
        .filter_map(|trigger| match attach_tooltip(&trigger, container) {
            Ok(binding) => Some(binding),
            Err(err) => {
                tracing::debug!(target: "tipmark::tooltip", %err, "tooltip not wired");
                None
            }
        })
        .collect();

    Ok(Annotated { report, bindings })
}

pub(crate) fn js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
