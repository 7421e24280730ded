//! XML serialization

use crate::xml::model::{is_xml_char, Content, Document, Element};

/// Output layout for [`write_document`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriterConfig {
    /// Emit `<?xml version="1.0" encoding="utf-8"?>` before the root
    pub declaration: bool,
    /// Spaces per nesting level; `None` writes everything on one line
    pub indent: Option<usize>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            declaration: true,
            indent: Some(1),
        }
    }
}

impl WriterConfig {
    /// Single line, no declaration
    pub const fn compact() -> Self {
        Self {
            declaration: false,
            indent: None,
        }
    }

    pub const fn new(declaration: bool, indent: Option<usize>) -> Self {
        Self {
            declaration,
            indent,
        }
    }
}

pub const DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>";

/// Serialize a document to a string
///
/// Characters outside the XML 1.0 `Char` production have no representation
/// and are dropped.
///
/// Elements that hold any text are written inline so indentation never
/// leaks into scalar content; elements holding only elements are broken
/// across lines when an indent is configured.
pub fn write_document(doc: &Document, config: WriterConfig) -> String {
    let mut output = String::new();
    if config.declaration {
        output.push_str(DECLARATION);
        if config.indent.is_some() {
            output.push('\n');
        }
    }
    write_element(&doc.root, &mut output, 0, config.indent);
    if config.indent.is_some() {
        output.push('\n');
    }
    output
}

fn write_element(element: &Element, output: &mut String, level: usize, indent: Option<usize>) {
    output.push('<');
    output.push_str(&element.name);

    for (key, value) in element.attributes.iter() {
        output.push(' ');
        output.push_str(key);
        output.push_str("=\"");
        escape_attribute(value, output);
        output.push('"');
    }

    if element.children.is_empty() {
        output.push_str("/>");
        return;
    }

    output.push('>');
    let block = indent.filter(|_| !element.has_text());
    for child in &element.children {
        match child {
            Content::Element(child) => {
                if let Some(width) = block {
                    output.push('\n');
                    push_indent(output, width * (level + 1));
                }
                write_element(child, output, level + 1, block);
            }
            Content::Text(text) => escape_text(text, output),
        }
    }
    if let Some(width) = block {
        output.push('\n');
        push_indent(output, width * level);
    }
    output.push_str("</");
    output.push_str(&element.name);
    output.push('>');
}

fn push_indent(output: &mut String, width: usize) {
    output.extend(std::iter::repeat(' ').take(width));
}

fn escape_text(input: &str, output: &mut String) {
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '\n' | '\t' => output.push(ch),
            c if !is_xml_char(c) => {}
            c if c.is_control() => push_char_ref(c, output),
            c => output.push(c),
        }
    }
}

fn escape_attribute(input: &str, output: &mut String) {
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            c if !is_xml_char(c) => {}
            c if c.is_control() => push_char_ref(c, output),
            c => output.push(c),
        }
    }
}

fn push_char_ref(ch: char, output: &mut String) {
    output.push_str(&format!("&#{};", u32::from(ch)));
}
