//! DOM queries scoped to a subtree, returned in document order.

use super::node::{NodeData, NodeId};
use super::tree::Dom;

impl Dom {
    /// Find the first node in the whole arena whose `id` attribute matches.
    pub fn query_by_id(&self, id: &str) -> Option<NodeId> {
        let root = self.root()?;
        self.query_first(root, |data| data.id() == Some(id))
    }

    /// All elements under `scope` (inclusive) that carry the attribute `name`.
    pub fn query_by_attr(&self, scope: NodeId, name: &str) -> Vec<NodeId> {
        self.query_all(scope, |data| data.is_element() && data.has_attr(name))
    }

    /// All elements under `scope` (inclusive) that have the given CSS class.
    pub fn query_by_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.query_all(scope, |data| data.has_class(class))
    }

    /// All elements under `scope` (inclusive) with the given tag.
    pub fn query_by_tag(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        self.query_all(scope, |data| data.tag == tag)
    }

    /// All nodes under `scope` (inclusive) matching a predicate, in document order.
    pub fn query_all(&self, scope: NodeId, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.walk_depth_first(scope)
            .into_iter()
            .filter(|&id| self.get(id).is_some_and(&predicate))
            .collect()
    }

    /// First node under `scope` (inclusive) matching a predicate.
    pub fn query_first(
        &self,
        scope: NodeId,
        predicate: impl Fn(&NodeData) -> bool,
    ) -> Option<NodeId> {
        self.walk_depth_first(scope)
            .into_iter()
            .find(|&id| self.get(id).is_some_and(&predicate))
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::node::{NodeData, NodeId};
    use crate::dom::tree::Dom;

    /// ```text
    ///   nav (#menu [data-megamenu])
    ///    ├── div [data-megamenu-item] .item
    ///    │    └── a [href] .trigger
    ///    └── div [data-megamenu-item] .item
    ///         └── a [href]
    /// ```
    fn build_query_tree() -> (Dom, NodeId) {
        let mut dom = Dom::new();
        let nav = dom.insert(
            NodeData::new("nav")
                .with_attr("id", "menu")
                .with_attr("data-megamenu", ""),
        );
        let first = dom.insert_child(
            nav,
            NodeData::new("div")
                .with_attr("data-megamenu-item", "")
                .with_class("item"),
        );
        dom.insert_child(
            first,
            NodeData::new("a").with_attr("href", "").with_class("trigger"),
        );
        let second = dom.insert_child(
            nav,
            NodeData::new("div")
                .with_attr("data-megamenu-item", "")
                .with_class("item"),
        );
        dom.insert_child(second, NodeData::new("a").with_attr("href", ""));
        (dom, nav)
    }

    #[test]
    fn query_by_id_found() {
        let (dom, nav) = build_query_tree();
        assert_eq!(dom.query_by_id("menu"), Some(nav));
        assert!(dom.query_by_id("missing").is_none());
    }

    #[test]
    fn query_by_attr_in_document_order() {
        let (dom, nav) = build_query_tree();
        let items = dom.query_by_attr(nav, "data-megamenu-item");
        assert_eq!(items.len(), 2);
        assert_eq!(items, dom.element_children(nav));
    }

    #[test]
    fn query_by_attr_includes_scope() {
        let (dom, nav) = build_query_tree();
        assert_eq!(dom.query_by_attr(nav, "data-megamenu"), vec![nav]);
    }

    #[test]
    fn query_by_class() {
        let (dom, nav) = build_query_tree();
        assert_eq!(dom.query_by_class(nav, "item").len(), 2);
        assert_eq!(dom.query_by_class(nav, "trigger").len(), 1);
        assert!(dom.query_by_class(nav, "nope").is_empty());
    }

    #[test]
    fn query_by_tag_scoped() {
        let (dom, nav) = build_query_tree();
        let items = dom.element_children(nav);
        assert_eq!(dom.query_by_tag(nav, "a").len(), 2);
        assert_eq!(dom.query_by_tag(items[1], "a").len(), 1);
    }

    #[test]
    fn query_first() {
        let (dom, nav) = build_query_tree();
        let first_anchor = dom.query_first(nav, |data| data.tag == "a");
        assert_eq!(first_anchor, dom.query_by_tag(nav, "a").first().copied());
    }

    #[test]
    fn query_on_empty_dom() {
        let dom = Dom::new();
        assert!(dom.query_by_id("x").is_none());
    }
}
