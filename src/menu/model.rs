//! Typed view of a menu's markup, built once when the menu is mounted.
//!
//! After [`MenuModel::build`] succeeds the controller never probes markers
//! again: items, triggers, panels and links are addressed by index.

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::error::MenuError;

/// Marks a menu root.
pub const ROOT_ATTR: &str = "data-megamenu";
/// Marks a direct child of the root as a menu item.
pub const ITEM_ATTR: &str = "data-megamenu-item";
/// Marks the anchor that opens an item's panel.
pub const TRIGGER_ATTR: &str = "data-megamenu-trigger";
/// Marks an item's panel.
pub const PANEL_ATTR: &str = "data-megamenu-panel";

/// Collapsible content owned by an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub node: NodeId,
    /// Anchors inside the panel, in document order.
    pub links: Vec<NodeId>,
}

/// One top-level slot of the menu bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub node: NodeId,
    pub trigger: NodeId,
    pub panel: Option<Panel>,
}

impl MenuItem {
    pub fn has_panel(&self) -> bool {
        self.panel.is_some()
    }

    /// Panel links, empty when the item has no panel.
    pub fn links(&self) -> &[NodeId] {
        self.panel
            .as_ref()
            .map(|panel| panel.links.as_slice())
            .unwrap_or_default()
    }
}

/// Where a node sits in the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// The trigger of the item at this index.
    Trigger(usize),
    /// Link `link` in the panel of item `item`.
    Link { item: usize, link: usize },
}

impl Position {
    /// Index of the item the position belongs to.
    pub fn item(self) -> usize {
        match self {
            Position::Trigger(item) | Position::Link { item, .. } => item,
        }
    }
}

/// Items of one menu root, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuModel {
    root: NodeId,
    items: Vec<MenuItem>,
}

impl MenuModel {
    /// Walk the markup under `root`.
    ///
    /// Items are the direct children of `root` carrying [`ITEM_ATTR`]. An
    /// item's trigger is its [`TRIGGER_ATTR`] element, falling back to its
    /// first anchor outside the panel; an item with neither is rejected.
    pub fn build(dom: &Dom, root: NodeId) -> Result<Self, MenuError> {
        if !dom.get(root).is_some_and(|data| data.is_element()) {
            return Err(MenuError::UnknownRoot);
        }

        let mut items = Vec::new();
        let item_nodes = dom
            .element_children(root)
            .into_iter()
            .filter(|&child| dom.get(child).is_some_and(|data| data.has_attr(ITEM_ATTR)));

        for (index, node) in item_nodes.enumerate() {
            let panel = dom
                .query_by_attr(node, PANEL_ATTR)
                .first()
                .map(|&panel| Panel {
                    node: panel,
                    links: dom.query_by_tag(panel, "a"),
                });

            let marked = dom.query_by_attr(node, TRIGGER_ATTR).first().copied();
            let trigger = marked
                .or_else(|| {
                    dom.query_by_tag(node, "a").into_iter().find(|&anchor| {
                        panel
                            .as_ref()
                            .map_or(true, |panel| !dom.contains_node(panel.node, anchor))
                    })
                })
                .ok_or(MenuError::MissingTrigger { item: index })?;

            items.push(MenuItem {
                node,
                trigger,
                panel,
            });
        }

        Ok(Self { root, items })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&MenuItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolve a node (or the trigger / link it is nested in) to its position.
    pub fn locate(&self, dom: &Dom, node: NodeId) -> Option<Position> {
        let chain = std::iter::once(node).chain(dom.ancestors(node));
        for current in chain {
            if current == self.root {
                return None;
            }
            for (index, item) in self.items.iter().enumerate() {
                if item.trigger == current {
                    return Some(Position::Trigger(index));
                }
                if let Some(link) = item.links().iter().position(|&l| l == current) {
                    return Some(Position::Link { item: index, link });
                }
            }
        }
        None
    }
}
