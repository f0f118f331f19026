//! The injected stylesheet.
//!
//! One `<style>` element per document, identified by [`STYLE_ELEMENT_ID`],
//! carries the colour custom properties and the widget rules. It is
//! regenerated whenever settings change and removed on shutdown.

use crate::error::Result;
use crate::settings::StyleSettings;
use crate::tooltip::HIDE_RESET_DELAY;
use crate::widget::{CLASS_FORCE_HIDDEN, CLASS_SOURCE, CLASS_TOOLTIP, CLASS_TRIGGER, CLASS_VISIBLE};

pub const STYLE_ELEMENT_ID: &str = "tipmark-styles";

/// Generate the full stylesheet for `settings`.
pub fn generate_stylesheet(settings: &StyleSettings) -> String {
    let fade = HIDE_RESET_DELAY.as_millis();

    format!(
        r#"/* tipmark */
:root {{
    --tipmark-tooltip-color: {text};
    --tipmark-tooltip-background: {background};
    --tipmark-tooltip-border: {border};
    --tipmark-visible-color: {visible};
}}

.{trigger} {{
    position: relative;
    display: inline;
}}

.{visible_class} {{
    color: var(--tipmark-visible-color);
    text-decoration: underline dotted;
    cursor: help;
}}

.{tooltip} {{
    position: absolute;
    top: 100%;
    margin-top: 4px;
    left: 50%;
    transform: translateX(-50%);
    z-index: 100;
    width: max-content;
    max-width: 300px;
    padding: 4px 8px;
    border: 1px solid var(--tipmark-tooltip-border);
    border-radius: 4px;
    background-color: var(--tipmark-tooltip-background);
    color: var(--tipmark-tooltip-color);
    white-space: normal;
    pointer-events: auto;
    opacity: 0;
    visibility: hidden;
    transition: opacity {fade}ms ease, visibility {fade}ms ease;
}}

.{trigger}:hover .{tooltip} {{
    opacity: 1;
    visibility: visible;
}}

.{trigger}.{force_hidden} .{tooltip} {{
    opacity: 0;
    visibility: hidden;
}}

.{source} {{
    color: var(--tipmark-visible-color);
}}
"#,
        text = settings.tooltip_text_color,
        background = settings.tooltip_background_color,
        border = settings.tooltip_border_color,
        visible = settings.visible_text_color,
        trigger = CLASS_TRIGGER,
        visible_class = CLASS_VISIBLE,
        tooltip = CLASS_TOOLTIP,
        force_hidden = CLASS_FORCE_HIDDEN,
        source = CLASS_SOURCE,
    )
}

/// The document head, as far as stylesheets are concerned.
pub trait StyleHost {
    /// Create the style element `id` with `css`, or replace its contents.
    fn upsert_style(&mut self, id: &str, css: &str) -> Result<()>;

    /// Remove the style element `id` if present.
    fn remove_style(&mut self, id: &str);
}

/// Tracks what was last injected so unchanged settings don't touch the host.
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    current: Option<String>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stylesheet currently injected, if any.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Inject or refresh the stylesheet. Returns `true` if the host was touched.
    pub fn apply<H: StyleHost + ?Sized>(
        &mut self,
        settings: &StyleSettings,
        host: &mut H,
    ) -> Result<bool> {
        let css = generate_stylesheet(settings);
        if self.current.as_deref() == Some(css.as_str()) {
            return Ok(false);
        }

        host.upsert_style(STYLE_ELEMENT_ID, &css)?;
        tracing::debug!(target: "tipmark::style", bytes = css.len(), "stylesheet applied");
        self.current = Some(css);
        Ok(true)
    }

    /// Remove the stylesheet.
    pub fn shutdown<H: StyleHost + ?Sized>(&mut self, host: &mut H) {
        host.remove_style(STYLE_ELEMENT_ID);
        if self.current.take().is_some() {
            tracing::debug!(target: "tipmark::style", "stylesheet removed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smol_str::SmolStr;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct Head {
        styles: BTreeMap<String, String>,
        writes: usize,
    }

    impl StyleHost for Head {
        fn upsert_style(&mut self, id: &str, css: &str) -> Result<()> {
            self.writes += 1;
            self.styles.insert(id.to_string(), css.to_string());
            Ok(())
        }

        fn remove_style(&mut self, id: &str) {
            self.styles.remove(id);
        }
    }

    #[test]
    fn test_stylesheet_carries_settings() {
        let settings = StyleSettings {
            tooltip_text_color: SmolStr::new("#111"),
            tooltip_background_color: SmolStr::new("#222"),
            tooltip_border_color: SmolStr::new("#333"),
            visible_text_color: SmolStr::new("#444"),
        };
        let css = generate_stylesheet(&settings);
        assert!(css.contains("--tipmark-tooltip-color: #111;"));
        assert!(css.contains("--tipmark-tooltip-background: #222;"));
        assert!(css.contains("--tipmark-tooltip-border: #333;"));
        assert!(css.contains("--tipmark-visible-color: #444;"));
    }

    #[test]
    fn test_stylesheet_widget_rules() {
        let css = generate_stylesheet(&StyleSettings::default());
        assert!(css.contains("--tipmark-tooltip-color: var(--text-normal);"));
        assert!(css.contains("left: 50%;"));
        assert!(css.contains("transform: translateX(-50%);"));
        assert!(css.contains("transition: opacity 200ms ease, visibility 200ms ease;"));
        assert!(css.contains(".tipmark:hover .tipmark-tooltip {"));
        assert!(css.contains(".tipmark.tipmark-force-hidden .tipmark-tooltip {"));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut head = Head::default();
        let mut registry = StyleRegistry::new();
        let settings = StyleSettings::default();

        assert!(registry.apply(&settings, &mut head).unwrap());
        assert!(!registry.apply(&settings, &mut head).unwrap());
        assert_eq!(head.writes, 1);
        assert_eq!(head.styles.len(), 1);
        assert!(head.styles.contains_key(STYLE_ELEMENT_ID));
    }

    #[test]
    fn test_apply_replaces_on_change() {
        let mut head = Head::default();
        let mut registry = StyleRegistry::new();
        registry.apply(&StyleSettings::default(), &mut head).unwrap();

        let changed = StyleSettings {
            visible_text_color: SmolStr::new("tomato"),
            ..Default::default()
        };
        assert!(registry.apply(&changed, &mut head).unwrap());
        assert_eq!(head.styles.len(), 1);
        assert!(head.styles[STYLE_ELEMENT_ID].contains("tomato"));
        assert_eq!(registry.current(), Some(head.styles[STYLE_ELEMENT_ID].as_str()));
    }

    #[test]
    fn test_shutdown_removes_stylesheet() {
        let mut head = Head::default();
        let mut registry = StyleRegistry::new();
        registry.apply(&StyleSettings::default(), &mut head).unwrap();

        registry.shutdown(&mut head);
        assert!(head.styles.is_empty());
        assert_eq!(registry.current(), None);

        // Re-applying after shutdown injects again.
        assert!(registry.apply(&StyleSettings::default(), &mut head).unwrap());
    }
}
