//! The stylesheet element in `document.head`.

use tipmark_core::{Result, StyleHost, TipmarkError};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlStyleElement};

use crate::js_error;

/// [`StyleHost`] backed by a document's `<head>`.
pub struct DomStyleHost {
    document: Document,
}

impl DomStyleHost {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// The current window's document, if there is one.
    pub fn current() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self::new(document))
    }

    fn existing(&self, id: &str) -> Option<HtmlStyleElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlStyleElement>().ok())
    }
}

impl StyleHost for DomStyleHost {
    fn upsert_style(&mut self, id: &str, css: &str) -> Result<()> {
        if let Some(style) = self.existing(id) {
            style.set_text_content(Some(css));
            return Ok(());
        }

        let head = self
            .document
            .head()
            .ok_or_else(|| TipmarkError::attachment("document has no head"))?;
        let style = self
            .document
            .create_element("style")
            .map_err(|e| TipmarkError::attachment(js_error(e)))?;
        style.set_id(id);
        style.set_text_content(Some(css));
        head.append_child(&style)
            .map_err(|e| TipmarkError::attachment(js_error(e)))?;
        Ok(())
    }

    fn remove_style(&mut self, id: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.remove();
        }
    }
}
