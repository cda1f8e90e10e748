// ABOUTME: Serializes the owned Document tree back into HTML markup.
// ABOUTME: Handles attribute/text escaping, raw-text elements and void elements.

use super::node::{Doctype, Document, Element, Node};

impl Document {
    /// Serializes the whole document.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            write_node(node, false, &mut out);
        }
        out
    }
}

impl Element {
    /// Serializes this element and its subtree.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }
}

impl Node {
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_node(self, false, &mut out);
        out
    }
}

fn write_node(node: &Node, raw_text: bool, out: &mut String) {
    match node {
        Node::Text(t) if raw_text => out.push_str(t),
        Node::Text(t) => out.push_str(&escape_text(t)),
        Node::Comment(c) => {
            out.push_str("<!--");
            out.push_str(c);
            out.push_str("-->");
        }
        Node::Doctype(doctype) => write_doctype(doctype, out),
        Node::Element(el) => write_element(el, out),
    }
}

fn write_doctype(doctype: &Doctype, out: &mut String) {
    out.push_str("<!DOCTYPE ");
    out.push_str(&doctype.name);
    if !doctype.public_id.is_empty() {
        out.push_str(" PUBLIC \"");
        out.push_str(&doctype.public_id);
        out.push('"');
        if !doctype.system_id.is_empty() {
            out.push_str(" \"");
            out.push_str(&doctype.system_id);
            out.push('"');
        }
    } else if !doctype.system_id.is_empty() {
        out.push_str(" SYSTEM \"");
        out.push_str(&doctype.system_id);
        out.push('"');
    }
    out.push('>');
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.name);
    for (k, v) in &el.attrs {
        out.push(' ');
        out.push_str(k);
        out.push_str("=\"");
        out.push_str(&escape_attr(v));
        out.push('"');
    }
    out.push('>');

    if is_void_element(&el.name) {
        return;
    }

    let raw_text = is_raw_text_element(&el.name);
    for child in &el.children {
        write_node(child, raw_text, out);
    }
    out.push_str("</");
    out.push_str(&el.name);
    out.push('>');
}

/// Escape attribute value
pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape text content
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Check if tag is void element
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag.to_lowercase().as_str(),
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Elements whose text the parser keeps verbatim (scripting enabled, so
/// `noscript` is one of them).
fn is_raw_text_element(tag: &str) -> bool {
    matches!(
        tag.to_ascii_lowercase().as_str(),
        "script" | "style" | "xmp" | "iframe" | "noembed" | "noframes" | "plaintext" | "noscript"
    )
}
