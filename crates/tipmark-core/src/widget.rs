//! The annotation widget.
//!
//! A widget stands in for one `[visible]{tooltip}` annotation. It renders in
//! one of two forms:
//!
//! - **active**: the literal source text, for when the user is editing the
//!   annotation (or has asked to see source)
//! - **collapsed**: the visible text with a hidden tooltip element attached,
//!   revealed on hover
//!
//! Whether a widget is active is derived fresh on every rebuild from the
//! cursor position; the widget itself never flips state.

use std::fmt::Write;
use std::ops::Range;

use smol_str::SmolStr;

use crate::matcher::AnnotationMatch;
use crate::render::{RichTextRenderer, push_escaped};

/// Class on the interactive region wrapping visible text and tooltip.
pub const CLASS_TRIGGER: &str = "tipmark";
/// Class on the visible-text element.
pub const CLASS_VISIBLE: &str = "tipmark-visible";
/// Class on the tooltip element.
pub const CLASS_TOOLTIP: &str = "tipmark-tooltip";
/// Class on the raw-source passthrough of an active widget.
pub const CLASS_SOURCE: &str = "tipmark-source";
/// Class forcing a tooltip hidden while its hide transition runs.
pub const CLASS_FORCE_HIDDEN: &str = "tipmark-force-hidden";

/// Rendering switches that do not affect widget identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WidgetOptions {
    /// Pass visible text through the rich-text renderer as well as the tooltip.
    pub render_visible_markup: bool,
}

/// One annotation as a renderable unit.
///
/// Two widgets are interchangeable (no re-render needed) iff all five
/// fields are equal, which is exactly what the derived `PartialEq` checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationWidget {
    pub visible: SmolStr,
    pub tooltip: SmolStr,
    /// Char range of the annotation in its source text.
    pub char_range: Range<usize>,
    pub active: bool,
}

impl AnnotationWidget {
    pub fn from_match(m: &AnnotationMatch, active: bool) -> Self {
        Self {
            visible: m.visible.clone(),
            tooltip: m.tooltip.clone(),
            char_range: m.char_range.clone(),
            active,
        }
    }

    pub fn collapsed(m: &AnnotationMatch) -> Self {
        Self::from_match(m, false)
    }

    pub fn active(m: &AnnotationMatch) -> Self {
        Self::from_match(m, true)
    }

    /// The exact source form `[visible]{tooltip}`.
    pub fn source(&self) -> String {
        format!("[{}]{{{}}}", self.visible, self.tooltip)
    }

    /// Render with plain-text tooltip content.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.render_html(&(), WidgetOptions::default(), &mut out);
        out
    }

    /// Append this widget's HTML to `out`.
    ///
    /// Content that may carry nested markup goes through `renderer`; the
    /// structural markup around it is fixed.
    pub fn render_html<R: RichTextRenderer>(
        &self,
        renderer: &R,
        options: WidgetOptions,
        out: &mut String,
    ) {
        if self.active {
            out.push_str("<span class=\"");
            out.push_str(CLASS_SOURCE);
            out.push_str("\">");
            push_escaped(out, &self.source());
            out.push_str("</span>");
            return;
        }

        let _ = write!(
            out,
            "<span class=\"{CLASS_TRIGGER}\" data-tipmark-start=\"{}\" data-tipmark-end=\"{}\"><span class=\"",
            self.char_range.start, self.char_range.end
        );
        out.push_str(CLASS_VISIBLE);
        out.push_str("\">");
        if options.render_visible_markup {
            renderer.render_inline(&self.visible, out);
        } else {
            push_escaped(out, &self.visible);
        }
        out.push_str("</span><span class=\"");
        out.push_str(CLASS_TOOLTIP);
        out.push_str("\" role=\"tooltip\">");
        renderer.render_inline(&self.tooltip, out);
        out.push_str("</span></span>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::find_annotations;

    fn widget(text: &str, active: bool) -> AnnotationWidget {
        AnnotationWidget::from_match(&find_annotations(text)[0], active)
    }

    #[test]
    fn test_collapsed_html() {
        let html = widget("[here]{click for details}", false).to_html();
        insta::assert_snapshot!(html, @r#"<span class="tipmark" data-tipmark-start="0" data-tipmark-end="25"><span class="tipmark-visible">here</span><span class="tipmark-tooltip" role="tooltip">click for details</span></span>"#);
    }

    #[test]
    fn test_active_html_is_source() {
        let html = widget("[a<b]{c & d}", true).to_html();
        assert_eq!(
            html,
            r#"<span class="tipmark-source">[a&lt;b]{c &amp; d}</span>"#
        );
    }

    #[test]
    fn test_empty_widget() {
        let w = widget("[]{}", false);
        assert_eq!(w.source(), "[]{}");
        assert!(w.to_html().contains(r#"<span class="tipmark-visible"></span>"#));
        assert_eq!(widget("[]{}", true).to_html(), r#"<span class="tipmark-source">[]{}</span>"#);
    }

    #[test]
    fn test_equality_covers_all_fields() {
        let base = widget("[a]{b}", false);
        assert_eq!(base, widget("[a]{b}", false));
        assert_ne!(base, widget("[a]{b}", true));
        assert_ne!(base, widget("[a]{c}", false));
        assert_ne!(base, widget(" [a]{b}", false));
    }

    struct Bold;

    impl RichTextRenderer for Bold {
        fn render_inline(&self, text: &str, out: &mut String) {
            out.push_str("<strong>");
            push_escaped(out, text);
            out.push_str("</strong>");
        }
    }

    #[test]
    fn test_rich_tooltip_and_visible_option() {
        let w = widget("[v]{t}", false);

        let mut out = String::new();
        w.render_html(&Bold, WidgetOptions::default(), &mut out);
        assert!(out.contains(r#"<span class="tipmark-visible">v</span>"#));
        assert!(out.contains("<strong>t</strong>"));

        let mut out = String::new();
        w.render_html(
            &Bold,
            WidgetOptions {
                render_visible_markup: true,
            },
            &mut out,
        );
        assert!(out.contains(r#"<span class="tipmark-visible"><strong>v</strong></span>"#));
    }
}
