//! XML data model

use indexmap::IndexMap;

/// XML document
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }
}

/// XML element
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Content>,
}

/// XML content node
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Element(Element),
    Text(String),
}

impl Element {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Look up an attribute value
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute, keeping its original position if it already exists
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn push_element(&mut self, element: Self) {
        self.children.push(Content::Element(element));
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(Content::Text(text.into()));
    }

    /// Iterate over child elements, skipping text
    pub fn child_elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|child| match child {
            Content::Element(element) => Some(element),
            Content::Text(_) => None,
        })
    }

    /// Concatenated text of the direct text children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                Content::Text(text) => Some(text.as_str()),
                Content::Element(_) => None,
            })
            .collect()
    }

    /// True if any direct child is text
    pub fn has_text(&self) -> bool {
        self.children
            .iter()
            .any(|child| matches!(child, Content::Text(_)))
    }

    /// Nesting depth counting this element as 1
    pub fn depth(&self) -> usize {
        1 + self.child_elements().map(Self::depth).max().unwrap_or(0)
    }
}

/// Whether `ch` matches the XML 1.0 `Char` production
pub fn is_xml_char(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_order_is_insertion_order() {
        let mut element = Element::new("element");
        element.set_attribute("key", "a");
        element.set_attribute("type", "int");
        element.set_attribute("key", "b");
        let names: Vec<&String> = element.attributes.keys().collect();
        assert_eq!(names, vec!["key", "type"]);
        assert_eq!(element.attribute("key"), Some("b"));
        assert_eq!(element.attribute("missing"), None);
    }

    #[test]
    fn test_text_and_children() {
        let mut element = Element::new("object");
        element.push_text("  ");
        element.push_element(Element::new("element"));
        element.push_text("x");
        assert_eq!(element.text(), "  x");
        assert_eq!(element.child_elements().count(), 1);
        assert!(element.has_text());
        assert!(!Element::new("empty").has_text());
    }

    #[test]
    fn test_depth() {
        let mut inner = Element::new("element");
        inner.push_element(Element::new("element"));
        let mut root = Element::new("object");
        root.push_text("x");
        root.push_element(Element::new("element"));
        root.push_element(inner);
        assert_eq!(root.depth(), 3);
        assert_eq!(Element::new("object").depth(), 1);
    }

    #[test]
    fn test_xml_chars() {
        assert!(is_xml_char('a'));
        assert!(is_xml_char('\t'));
        assert!(is_xml_char('\r'));
        assert!(is_xml_char('\u{7f}'));
        assert!(is_xml_char('\u{1F600}'));
        assert!(!is_xml_char('\0'));
        assert!(!is_xml_char('\u{1}'));
        assert!(!is_xml_char('\u{1b}'));
        assert!(!is_xml_char('\u{FFFE}'));
        assert!(!is_xml_char('\u{FFFF}'));
    }
}
