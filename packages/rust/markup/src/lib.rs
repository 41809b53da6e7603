//! Lenient HTML normalization.
//!
//! Parses raw HTML into a DOM via `scraper` (html5ever underneath, so
//! malformed markup never fails) and re-serializes it as indented,
//! human-readable text. The result is lossy with respect to the original
//! bytes: whitespace, tag case, and implied elements are normalized by the
//! parser. Nothing here inspects individual tags — the markup is formatted
//! purely for model readability.

use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::Html;
use tracing::{debug, instrument};

/// Indentation unit for serialized markup.
const INDENT: &str = "  ";

/// Elements with no closing tag in HTML.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text content is emitted raw (no entity escaping).
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Parse `html` leniently and serialize it back as indented markup.
///
/// This never fails: the parser recovers from unclosed tags, stray
/// closing tags, and invalid nesting, and the serializer walks whatever
/// tree came out.
#[instrument(skip(html), fields(input_len = html.len()))]
pub fn normalize(html: &str) -> String {
    let doc = Html::parse_document(html);

    if !doc.errors.is_empty() {
        debug!(error_count = doc.errors.len(), "parser recovered from markup errors");
    }

    let mut out = String::new();
    for child in doc.tree.root().children() {
        write_node(child, 0, false, &mut out);
    }

    debug!(output_len = out.len(), "markup normalized");
    out
}

/// Serialize one node and its subtree at the given depth.
fn write_node(node: NodeRef<'_, Node>, depth: usize, raw_text: bool, out: &mut String) {
    match node.value() {
        Node::Doctype(doctype) => {
            push_line(out, depth, &format!("<!DOCTYPE {}>", doctype.name()));
        }
        Node::Comment(comment) => {
            push_line(out, depth, &format!("<!--{}-->", &**comment));
        }
        Node::Text(text) => {
            for line in text.lines() {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if raw_text {
                    push_line(out, depth, trimmed);
                } else {
                    push_line(out, depth, &escape_text(trimmed));
                }
            }
        }
        Node::Element(element) => {
            let name = element.name();
            let mut open = format!("<{name}");
            for (attr, value) in element.attrs() {
                open.push_str(&format!(" {attr}=\"{}\"", escape_attr(value)));
            }
            open.push('>');
            push_line(out, depth, &open);

            if VOID_ELEMENTS.contains(&name) {
                return;
            }

            let raw = RAW_TEXT_ELEMENTS.contains(&name);
            for child in node.children() {
                write_node(child, depth + 1, raw, out);
            }

            push_line(out, depth, &format!("</{name}>"));
        }
        // Document/fragment wrappers and processing instructions carry no
        // markup of their own; descend without indenting.
        _ => {
            for child in node.children() {
                write_node(child, depth, raw_text, out);
            }
        }
    }
}

fn push_line(out: &mut String, depth: usize, line: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(line);
    out.push('\n');
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
