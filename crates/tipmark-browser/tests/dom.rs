#![cfg(all(target_family = "wasm", target_os = "unknown"))]

use tipmark_browser::{
    DomStyleHost, LocalStorageStore, Placement, STYLE_ELEMENT_ID, SettingsStore, SmolStr,
    StyleRegistry, StyleSettings, WidgetOptions, annotate_element,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, Event, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn mount(html: &str) -> Element {
    let doc = document();
    let root = doc.create_element("div").unwrap();
    root.set_inner_html(html);
    doc.body().unwrap().append_child(&root).unwrap();
    root
}

fn html_element(root: &Element, selector: &str) -> HtmlElement {
    root.query_selector(selector)
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
}

fn dispatch(target: &HtmlElement, kind: &str) {
    let event = Event::new(kind).unwrap();
    target.dispatch_event(&event).unwrap();
}

#[wasm_bindgen_test]
fn static_pass_rewrites_text_nodes() {
    let root = mount("<p>See [here]{click for details} now.</p><ul><li><em>[a]{b}</em></li></ul>");

    let annotated = annotate_element(&root, &root, (), WidgetOptions::default()).unwrap();
    assert_eq!(annotated.report.widgets, 2);
    assert_eq!(annotated.bindings.len(), 2);

    let p = root.query_selector("p").unwrap().unwrap();
    assert_eq!(p.child_nodes().length(), 3);
    assert_eq!(p.text_content().unwrap(), "See hereclick for details now.");

    let tooltip = root.query_selector("em .tipmark-tooltip").unwrap().unwrap();
    assert_eq!(tooltip.text_content().unwrap(), "b");
    root.remove();
}

#[wasm_bindgen_test]
fn code_is_left_alone() {
    let root = mount("<pre><code>[a]{b}</code></pre><p><code>[c]{d}</code></p>");

    let annotated = annotate_element(&root, &root, (), WidgetOptions::default()).unwrap();
    assert_eq!(annotated.report.widgets, 0);
    assert!(root.query_selector(".tipmark").unwrap().is_none());
    root.remove();
}

#[wasm_bindgen_test]
fn second_pass_is_a_no_op() {
    let root = mount("<p>[a]{b}</p>");
    annotate_element(&root, &root, (), WidgetOptions::default()).unwrap();
    let again = annotate_element(&root, &root, (), WidgetOptions::default()).unwrap();
    assert_eq!(again.report.widgets, 0);
    assert_eq!(root.query_selector_all(".tipmark").unwrap().length(), 1);
    root.remove();
}

#[wasm_bindgen_test]
fn stylesheet_lifecycle() {
    let mut host = DomStyleHost::current().unwrap();
    let mut registry = StyleRegistry::new();

    registry.apply(&StyleSettings::default(), &mut host).unwrap();
    let style = document().get_element_by_id(STYLE_ELEMENT_ID).unwrap();
    assert!(style.text_content().unwrap().contains("--tipmark-tooltip-color"));

    let changed = StyleSettings {
        tooltip_text_color: SmolStr::new("teal"),
        ..Default::default()
    };
    registry.apply(&changed, &mut host).unwrap();
    let head = document().head().unwrap();
    assert_eq!(head.query_selector_all("#tipmark-styles").unwrap().length(), 1);

    registry.shutdown(&mut host);
    assert!(document().get_element_by_id(STYLE_ELEMENT_ID).is_none());
}

#[wasm_bindgen_test]
fn local_storage_settings() {
    let store = LocalStorageStore::new("tipmark_test_settings");
    store.clear();
    assert_eq!(store.load(), StyleSettings::default());

    let settings = StyleSettings {
        visible_text_color: SmolStr::new("orange"),
        ..Default::default()
    };
    store.save(&settings).unwrap();
    assert_eq!(store.load(), settings);
    store.clear();
}

#[wasm_bindgen_test]
fn hover_keeps_tooltip_inside_container() {
    let mut host = DomStyleHost::current().unwrap();
    let mut registry = StyleRegistry::new();
    registry.apply(&StyleSettings::default(), &mut host).unwrap();

    let root = mount("<p>[a]{a tooltip much wider than its one-letter trigger}</p>");
    root.set_attribute("style", "width: 240px; margin: 0; padding: 0;")
        .unwrap();
    let annotated = annotate_element(&root, &root, (), WidgetOptions::default()).unwrap();
    let binding = &annotated.bindings[0];
    let trigger = html_element(&root, ".tipmark");
    let tooltip = html_element(&root, ".tipmark-tooltip");

    dispatch(&trigger, "pointerenter");
    assert!(binding.is_hovering());
    assert_eq!(binding.placement(), Placement::LeftFlush { left: 0.0 });
    let style = tooltip.style();
    assert_eq!(style.get_property_value("left").unwrap(), "0px");
    assert_eq!(style.get_property_value("right").unwrap(), "auto");
    assert_eq!(style.get_property_value("transform").unwrap(), "none");

    // No related target: the pointer left for somewhere else.
    dispatch(&trigger, "pointerleave");
    assert!(!binding.is_hovering());
    assert!(trigger.class_list().contains("tipmark-force-hidden"));

    dispatch(&trigger, "pointerenter");
    assert!(binding.is_hovering());
    assert!(!trigger.class_list().contains("tipmark-force-hidden"));
    assert_eq!(binding.placement(), Placement::LeftFlush { left: 0.0 });

    drop(annotated);
    root.remove();
    registry.shutdown(&mut host);
}

#[wasm_bindgen_test]
fn detached_container_keeps_default_placement() {
    let root = mount("<p>[a]{a tooltip much wider than its one-letter trigger}</p>");
    let detached = document().create_element("div").unwrap();
    let annotated = annotate_element(&root, &detached, (), WidgetOptions::default()).unwrap();
    let trigger = html_element(&root, ".tipmark");
    let tooltip = html_element(&root, ".tipmark-tooltip");

    dispatch(&trigger, "pointerenter");
    let binding = &annotated.bindings[0];
    assert!(binding.is_hovering());
    assert_eq!(binding.placement(), Placement::Centered);
    assert_eq!(tooltip.style().get_property_value("left").unwrap(), "");
    assert_eq!(tooltip.style().get_property_value("transform").unwrap(), "");
    root.remove();
}
