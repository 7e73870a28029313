//! Pretty-printing XML writer.
//!
//! Renders an [`Element`] tree back to text: an XML declaration, one node per
//! line, nested children indented, and empty elements self-closed. Elements
//! with text children are rendered inline so character data survives a
//! read/write cycle unchanged.

use crate::node::{Content, Element};

/// Serializes an element tree to an XML string.
pub struct XmlWriter {
    indent: usize,
}

impl XmlWriter {
    /// Creates a writer with the default two-space indent.
    #[must_use]
    pub fn new() -> Self {
        Self { indent: 2 }
    }

    /// Sets the number of spaces per nesting level.
    #[must_use]
    pub fn with_indent(mut self, width: usize) -> Self {
        self.indent = width;
        self
    }

    /// Renders a full document: declaration, root element, trailing newline.
    #[must_use]
    pub fn write_document(&self, root: &Element) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        self.write_element(root, 0, &mut out);
        out.push('\n');
        out
    }

    fn write_element(&self, element: &Element, depth: usize, out: &mut String) {
        out.push_str(&" ".repeat(self.indent * depth));
        out.push('<');
        out.push_str(&element.name);
        push_attributes(element, out);
        if element.children.is_empty() {
            out.push_str("/>");
        } else if has_text_children(element) {
            out.push('>');
            for child in &element.children {
                write_inline(child, out);
            }
            out.push_str("</");
            out.push_str(&element.name);
            out.push('>');
        } else {
            out.push('>');
            for child in element.child_elements() {
                out.push('\n');
                self.write_element(child, depth + 1, out);
            }
            out.push('\n');
            out.push_str(&" ".repeat(self.indent * depth));
            out.push_str("</");
            out.push_str(&element.name);
            out.push('>');
        }
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_inline(content: &Content, out: &mut String) {
    match content {
        Content::Text(text) => out.push_str(&escape_text(text)),
        Content::Element(element) => {
            out.push('<');
            out.push_str(&element.name);
            push_attributes(element, out);
            if element.children.is_empty() {
                out.push_str("/>");
            } else {
                out.push('>');
                for child in &element.children {
                    write_inline(child, out);
                }
                out.push_str("</");
                out.push_str(&element.name);
                out.push('>');
            }
        }
    }
}

fn push_attributes(element: &Element, out: &mut String) {
    for attr in &element.attributes {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(&attr.value));
        out.push('"');
    }
}

fn has_text_children(element: &Element) -> bool {
    element
        .children
        .iter()
        .any(|child| matches!(child, Content::Text(_)))
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
