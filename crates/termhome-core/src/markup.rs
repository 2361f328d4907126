//! HTML helpers for log lines.
//! Server replies are pre-approved HTML fragments; anything the user typed is
//! escaped before it lands next to them.

use scraper::{ElementRef, Html, Node};

/// Escapes text so it can sit inside an HTML fragment verbatim.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Elements that end a line once closed.
const BLOCK_ELEMENTS: &[&str] = &[
    "div", "p", "li", "ul", "ol", "tr", "table", "pre", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Flattens an HTML fragment to plain text for terminal front-ends.
/// `br` and closed block elements become `\n`; entities are decoded by the parser.
pub fn to_plain(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::with_capacity(html.len());
    push_text(fragment.root_element(), &mut out);
    out.trim_end_matches('\n').replace('\u{a0}', " ")
}

fn push_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                let name = element.name();
                if name == "br" {
                    out.push('\n');
                    continue;
                }
                if name == "script" || name == "style" {
                    continue;
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    push_text(child_el, out);
                }
                if BLOCK_ELEMENTS.contains(&name) && !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}
