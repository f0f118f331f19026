use tipmark_core::WidgetOptions;
use tipmark_renderer::{RenderOptions, render_markdown, render_markdown_with_report};

const WIDGET: &str = r#"class="tipmark""#;

fn widgets(html: &str) -> usize {
    html.matches(WIDGET).count()
}

#[test]
fn paragraph_end_to_end() {
    let html = render_markdown("See [here]{click for details} now.", &RenderOptions::default());
    assert_eq!(
        html,
        concat!(
            r#"<p>See <span class="tipmark" data-tipmark-start="4" data-tipmark-end="29">"#,
            r#"<span class="tipmark-visible">here</span>"#,
            r#"<span class="tipmark-tooltip" role="tooltip">click for details</span>"#,
            "</span> now.</p>\n"
        )
    );
}

#[test]
fn nested_inline_contexts() {
    let source = "\
# Heading with [a]{one}

*emphasis [b]{two}* and **strong [c]{three}**

- item [d]{four}
- plain item

> quoted [e]{five}
";
    let (html, report) = render_markdown_with_report(source, &RenderOptions::default());
    assert_eq!(widgets(&html), 5);
    assert_eq!(report.widgets, 5);
    assert_eq!(report.skipped, 0);
    assert!(html.contains("<em>emphasis <span"));
    assert!(html.contains("<li>item <span"));
}

#[test]
fn table_cells() {
    let source = "| term | note |\n|------|------|\n| [x]{ex} | [y]{why} |\n";
    let html = render_markdown(source, &RenderOptions::default());
    assert!(html.contains("<table>"));
    assert_eq!(widgets(&html), 2);

    let no_tables = RenderOptions {
        tables: false,
        ..Default::default()
    };
    let html = render_markdown(source, &no_tables);
    assert!(!html.contains("<table>"));
}

#[test]
fn code_stays_literal() {
    let source = "```\n[a]{b}\n```\n\n    [indented]{code}\n\nUse `[c]{d}` for that.\n";
    let (html, report) = render_markdown_with_report(source, &RenderOptions::default());
    assert_eq!(widgets(&html), 0);
    assert_eq!(report.widgets, 0);
    // "Use " and " for that." are the only text nodes outside code.
    assert_eq!(report.nodes_visited, 2);
    assert!(html.contains("[a]{b}"));
    assert!(html.contains("[indented]{code}"));
}

#[test]
fn image_alt_text_stays_literal() {
    let html = render_markdown("![alt [a]{b}](pic.png)", &RenderOptions::default());
    assert!(html.contains("<img"));
    assert_eq!(widgets(&html), 0);
}

#[test]
fn rich_tooltips() {
    // Markup reaches the tooltip renderer only if it survives the document
    // parse as literal text.
    let source = r"[term]{\*emphasised\* \~\~gone\~\~}";

    let html = render_markdown(source, &RenderOptions::default());
    assert!(html.contains(
        r#"<span class="tipmark-tooltip" role="tooltip"><em>emphasised</em> <del>gone</del></span>"#
    ));

    let plain = RenderOptions {
        rich_tooltips: false,
        ..Default::default()
    };
    let html = render_markdown(source, &plain);
    assert!(html.contains(
        r#"<span class="tipmark-tooltip" role="tooltip">*emphasised* ~~gone~~</span>"#
    ));
}

#[test]
fn visible_markup_option() {
    let source = r"[\*v\*]{t}";
    let html = render_markdown(source, &RenderOptions::default());
    assert!(html.contains(r#"<span class="tipmark-visible">*v*</span>"#));

    let options = RenderOptions {
        widget: WidgetOptions {
            render_visible_markup: true,
        },
        ..Default::default()
    };
    let html = render_markdown(source, &options);
    assert!(html.contains(r#"<span class="tipmark-visible"><em>v</em></span>"#));
}

#[test]
fn text_is_escaped_once() {
    let html = render_markdown("1 &lt; 2 [a & b]{c < d}", &RenderOptions::default());
    assert!(html.starts_with("<p>1 &lt; 2 <span"));
    assert!(html.contains(r#"<span class="tipmark-visible">a &amp; b</span>"#));
    assert!(html.contains("c &lt; d</span>"));
}

#[test]
fn no_annotations_matches_plain_render() {
    let source = "Just [a link](https://example.com) and [brackets] {braces}.";
    let html = render_markdown(source, &RenderOptions::default());
    let mut plain = String::new();
    pulldown_cmark::html::push_html(
        &mut plain,
        pulldown_cmark::Parser::new_ext(source, RenderOptions::default().parser_options()),
    );
    assert_eq!(html, plain);
}

#[test]
fn offsets_are_per_text_node() {
    let html = render_markdown("*x* [é]{y}", &RenderOptions::default());
    // The annotation's text node starts after the emphasis.
    assert!(html.contains(r#"data-tipmark-start="1" data-tipmark-end="7""#));
}

#[test]
fn annotation_across_wrapped_line() {
    let source = "Hard-wrapped prose with [a term]{explained over\ntwo lines} in it.\n";
    let (html, report) = render_markdown_with_report(source, &RenderOptions::default());
    assert_eq!(report.widgets, 1);
    assert!(html.contains(r#"<span class="tipmark-visible">a term</span>"#));
    assert!(html.contains("explained over\ntwo lines</span>"));
}

#[test]
fn block_markup_in_tooltip_stays_inline() {
    let html = render_markdown("See [term]{- first meaning} now.", &RenderOptions::default());
    assert!(html.contains(r#"role="tooltip">first meaning</span></span> now.</p>"#));
    assert!(!html.contains("<ul>"));
    assert!(!html.contains("<li>"));
}
