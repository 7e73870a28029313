//! Document tree types.
//!
//! An [`Element`] owns its attributes and children, so cloning a node clones
//! the whole subtree. Attribute order and child order are preserved exactly
//! as built (or as read), and the writer emits them in that order.

/// A single `name="value"` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name, including any prefix (`xmlns:xsi`).
    pub name: String,
    /// Attribute value with entities already decoded.
    pub value: String,
}

/// One item in an element's child list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// A child element.
    Element(Element),
    /// A run of character data.
    Text(String),
}

/// An element node: tag name, attributes, and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name.
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<Attribute>,
    /// Child nodes in document order.
    pub children: Vec<Content>,
}

impl Element {
    /// Creates an element with no attributes or children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds an attribute (builder style).
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Adds a child element (builder style).
    #[must_use]
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Content::Element(child));
        self
    }

    /// Adds a text child (builder style).
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Content::Text(text.into()));
        self
    }

    /// Returns the value of the first attribute with the given name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Sets an attribute, replacing the value if the name is already present.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    /// Appends a child element.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(Content::Element(child));
    }

    /// Iterates over the direct child elements, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Content::Element(element) => Some(element),
            Content::Text(_) => None,
        })
    }

    /// Collects every descendant element with the given tag name, in document
    /// order. The element itself is never included, and matches nested inside
    /// other matches are.
    #[must_use]
    pub fn descendants(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_descendants(tag, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        for child in self.child_elements() {
            if child.name == tag {
                found.push(child);
            }
            child.collect_descendants(tag, found);
        }
    }

    /// Concatenates the direct text children.
    #[must_use]
    pub fn text_content(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                Content::Text(text) => Some(text.as_str()),
                Content::Element(_) => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Element {
        Element::new("databaseChangeLog").child(
            Element::new("changeSet")
                .attr("id", "1")
                .child(
                    Element::new("createTable").attr("tableName", "users").child(
                        Element::new("column").attr("name", "id").attr("type", "int"),
                    ),
                )
                .child(Element::new("insert").attr("tableName", "users")),
        )
    }

    #[test]
    fn test_attribute_lookup() {
        let element = Element::new("column").attr("name", "id").attr("type", "int");
        assert_eq!(element.attribute("name"), Some("id"));
        assert_eq!(element.attribute("type"), Some("int"));
        assert_eq!(element.attribute("missing"), None);
    }

    #[test]
    fn test_attribute_lookup_first_match_wins() {
        let element = Element::new("column").attr("name", "a").attr("name", "b");
        assert_eq!(element.attribute("name"), Some("a"));
    }

    #[test]
    fn test_set_attribute_replaces_existing() {
        let mut element = Element::new("column").attr("name", "id");
        element.set_attribute("name", "uid");
        element.set_attribute("type", "int");
        assert_eq!(element.attribute("name"), Some("uid"));
        assert_eq!(element.attribute("type"), Some("int"));
        assert_eq!(element.attributes.len(), 2);
    }

    #[test]
    fn test_descendants_are_deep_and_in_document_order() {
        let tree = sample_tree();
        let tables = tree.descendants("createTable");
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].attribute("tableName"), Some("users"));

        let columns = tree.descendants("column");
        assert_eq!(columns.len(), 1);

        // Direct children of the root are only changeSet nodes.
        assert_eq!(tree.child_elements().count(), 1);
    }

    #[test]
    fn test_descendants_exclude_self() {
        let tree = sample_tree();
        assert!(tree.descendants("databaseChangeLog").is_empty());
    }

    #[test]
    fn test_clone_is_deep() {
        let original = sample_tree();
        let mut copy = original.clone();
        copy.children.clear();
        assert_eq!(original.child_elements().count(), 1);
    }

    #[test]
    fn test_text_content() {
        let element = Element::new("comment")
            .text("part one")
            .child(Element::new("b"))
            .text(" part two");
        assert_eq!(element.text_content(), "part one part two");
    }
}
