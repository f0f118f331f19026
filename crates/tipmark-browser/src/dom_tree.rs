//! Rendered DOM as an [`OutputTree`].

use tipmark_core::fragments::fragments_to_html;
use tipmark_core::widget::CLASS_TRIGGER;
use tipmark_core::{Fragment, OutputTree, Result, RichTextRenderer, TipmarkError, WidgetOptions};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlTemplateElement, Node};

use crate::js_error;

/// `NodeFilter.SHOW_TEXT`
const SHOW_TEXT: u32 = 0x4;

/// Ancestors whose text is never annotated.
const OPAQUE_SELECTOR: &str = "pre, code, script, style, textarea, .tipmark, .tipmark-source";

/// A rendered subtree whose text nodes can be replaced by widgets.
///
/// Widget elements are built by parsing the widget HTML in a `<template>`,
/// so the DOM structure is exactly what the HTML renderer produces.
pub struct DomTree<R = ()> {
    document: Document,
    root: Element,
    renderer: R,
    options: WidgetOptions,
    triggers: Vec<HtmlElement>,
}

impl DomTree {
    pub fn new(root: Element) -> Result<Self> {
        Self::with_renderer(root, (), WidgetOptions::default())
    }
}

impl<R: RichTextRenderer> DomTree<R> {
    pub fn with_renderer(root: Element, renderer: R, options: WidgetOptions) -> Result<Self> {
        let document = root
            .owner_document()
            .ok_or_else(|| TipmarkError::attachment("root element has no owner document"))?;
        Ok(Self {
            document,
            root,
            renderer,
            options,
            triggers: Vec::new(),
        })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Trigger elements created so far, in document order.
    pub fn take_triggers(&mut self) -> Vec<HtmlElement> {
        // Nodes are spliced back to front.
        let mut triggers = std::mem::take(&mut self.triggers);
        triggers.reverse();
        triggers
    }

    fn is_opaque(node: &Node) -> bool {
        node.parent_element()
            .and_then(|parent| parent.closest(OPAQUE_SELECTOR).ok().flatten())
            .is_some()
    }

    fn build(&self, fragments: &[Fragment]) -> Result<HtmlTemplateElement> {
        let mut html = String::new();
        fragments_to_html(fragments, &self.renderer, self.options, &mut html);

        let template = self
            .document
            .create_element("template")
            .map_err(|e| TipmarkError::attachment(js_error(e)))?
            .dyn_into::<HtmlTemplateElement>()
            .map_err(|_| TipmarkError::attachment("template element unavailable"))?;
        template.set_inner_html(&html);
        Ok(template)
    }
}

impl<R: RichTextRenderer> OutputTree for DomTree<R> {
    type Node = Node;

    fn text_nodes(&self) -> Vec<Node> {
        let walker = match self
            .document
            .create_tree_walker_with_what_to_show(&self.root, SHOW_TEXT)
        {
            Ok(walker) => walker,
            Err(e) => {
                tracing::warn!(target: "tipmark::static", error = %js_error(e), "create_tree_walker failed");
                return Vec::new();
            }
        };

        let mut nodes = Vec::new();
        while let Ok(Some(node)) = walker.next_node() {
            if !Self::is_opaque(&node) {
                nodes.push(node);
            }
        }
        nodes
    }

    fn node_text(&self, node: &Node) -> Option<String> {
        node.text_content()
    }

    fn splice(&mut self, node: &Node, fragments: Vec<Fragment>) -> Result<()> {
        let parent = node
            .parent_node()
            .ok_or_else(|| TipmarkError::attachment("text node has no parent"))?;

        let template = self.build(&fragments)?;
        let content = template.content();

        let mut created = Vec::new();
        if let Ok(list) = content.query_selector_all(&format!(".{CLASS_TRIGGER}")) {
            for i in 0..list.length() {
                if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
                    created.push(el);
                }
            }
        }

        // Single replacement: the tree is untouched unless this succeeds.
        parent
            .replace_child(&content, node)
            .map_err(|e| TipmarkError::attachment(js_error(e)))?;

        // Reversed so take_triggers can restore document order.
        created.reverse();
        self.triggers.extend(created);
        Ok(())
    }
}
