//! Batch attribute updates.

use super::node::NodeId;
use super::tree::Dom;

impl Dom {
    /// Set every `(name, value)` pair on `node`, in order.
    ///
    /// Existing attributes are overwritten in place; `class` replaces the class
    /// list. A stale `node` is a no-op.
    pub fn set_attributes<K, V>(&mut self, node: NodeId, attrs: impl IntoIterator<Item = (K, V)>)
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        debug_assert!(self.contains(node), "set_attributes on a missing node");
        let Some(data) = self.get_mut(node) else {
            return;
        };
        for (name, value) in attrs {
            data.set_attr(name.as_ref(), value);
        }
    }

    /// Set one attribute on `node`.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        self.set_attributes(node, [(name, value.into())]);
    }

    /// Read one attribute of `node`.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node).and_then(|data| data.attr(name))
    }

    /// Add a class to `node`. No-op for stale ids.
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.get_mut(node) {
            data.add_class(class);
        }
    }

    /// Remove a class from `node`. No-op for stale ids.
    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.get_mut(node) {
            data.remove_class(class);
        }
    }

    /// Whether `node` has the class.
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node).is_some_and(|data| data.has_class(class))
    }
}
