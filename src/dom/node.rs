//! Node types: NodeId, NodeData.

use slotmap::new_key_type;

new_key_type! {
    /// Unique identifier for a DOM node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Tag name used for text nodes.
pub const TEXT_TAG: &str = "#text";

/// Tag name used for the synthetic document node at the top of every tree.
pub const DOCUMENT_TAG: &str = "#document";

/// Data associated with a single DOM node.
///
/// Elements carry a tag, ordered attributes and a class list. Text nodes use
/// [`TEXT_TAG`] and keep their content in `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// Lowercase tag name (e.g. "div", "a"), or `#text` / `#document`.
    pub tag: String,
    /// Attributes in first-insertion order, excluding `class`.
    pub attributes: Vec<(String, String)>,
    /// CSS classes (the `class` attribute, split on whitespace).
    pub classes: Vec<String>,
    /// Text content for text nodes.
    pub text: Option<String>,
}

impl NodeData {
    /// Create a new element with the given tag and no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: Vec::new(),
            classes: Vec::new(),
            text: None,
        }
    }

    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            tag: TEXT_TAG.to_owned(),
            attributes: Vec::new(),
            classes: Vec::new(),
            text: Some(content.into()),
        }
    }

    /// Create the synthetic document node.
    pub fn document() -> Self {
        Self::new(DOCUMENT_TAG)
    }

    /// Set an attribute (builder).
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(&name.into(), value);
        self
    }

    /// Add a single CSS class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        self.add_class(&class);
        self
    }

    /// Whether this is a text node.
    pub fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }

    /// Whether this is an element (neither text nor document).
    pub fn is_element(&self) -> bool {
        !self.is_text() && self.tag != DOCUMENT_TAG
    }

    /// The `id` attribute, if set.
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Look up an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        if name == "class" {
            return None;
        }
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether the attribute is present (any value, including empty).
    pub fn has_attr(&self, name: &str) -> bool {
        if name == "class" {
            return !self.classes.is_empty();
        }
        self.attributes.iter().any(|(key, _)| key == name)
    }

    /// Set an attribute, replacing an existing value in place.
    ///
    /// `class` replaces the class list instead of being stored verbatim.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if name == "class" {
            self.classes.clear();
            for class in value.split_whitespace() {
                self.add_class(class);
            }
            return;
        }
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_owned(), value)),
        }
    }

    /// Remove an attribute. No-op if absent.
    pub fn remove_attr(&mut self, name: &str) {
        if name == "class" {
            self.classes.clear();
        } else {
            self.attributes.retain(|(key, _)| key != name);
        }
    }

    /// Check whether this node has a given CSS class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a CSS class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    /// Remove a CSS class. No-op if not present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Whether the node can take focus at all (programmatically or via Tab).
    ///
    /// Anchors with an `href` and any element with a `tabindex` qualify.
    pub fn is_focusable(&self) -> bool {
        (self.tag == "a" && self.has_attr("href")) || self.has_attr("tabindex")
    }

    /// Whether the node participates in sequential (Tab) navigation.
    pub fn is_tabbable(&self) -> bool {
        if !self.is_focusable() {
            return false;
        }
        match self.attr("tabindex").map(str::trim) {
            Some(index) => index.parse::<i32>().map_or(true, |i| i >= 0),
            None => true,
        }
    }
}
