//! Sequential focus order for Tab / Shift+Tab.
//!
//! [`FocusChain`] holds the tabbable nodes of a document in document order,
//! leaving out anything inside an `aria-hidden="true"` subtree.

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;

/// Maintains an ordered list of tabbable nodes.
///
/// The chain is rebuilt from the DOM before each use, since panels change
/// which links are tabbable. Focus cycles through the chain in forward (Tab)
/// or backward (Shift+Tab / BackTab) order.
#[derive(Debug, Default)]
pub struct FocusChain {
    /// Tabbable nodes in document order.
    nodes: Vec<NodeId>,
    /// Index of the currently focused node, if it is in the chain.
    current: Option<usize>,
    /// Where the focused node would sit in the chain when it is focused but
    /// not itself tabbable.
    insertion: Option<usize>,
}

impl FocusChain {
    /// Create a new, empty focus chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the chain from the subtree at `scope`, positioned at `focused`.
    pub fn rebuild(&mut self, dom: &Dom, scope: NodeId, focused: Option<NodeId>) {
        self.nodes.clear();
        self.current = None;
        self.insertion = None;

        let mut stack = vec![scope];
        while let Some(node) = stack.pop() {
            let Some(data) = dom.get(node) else {
                continue;
            };
            if data.attr("aria-hidden") == Some("true") {
                continue;
            }
            if Some(node) == focused {
                if data.is_tabbable() {
                    self.current = Some(self.nodes.len());
                } else {
                    self.insertion = Some(self.nodes.len());
                }
            }
            if data.is_tabbable() {
                self.nodes.push(node);
            }
            for &child in dom.children(node).iter().rev() {
                stack.push(child);
            }
        }
    }

    /// The currently focused node, if it is in the chain.
    pub fn current_node(&self) -> Option<NodeId> {
        self.current.and_then(|idx| self.nodes.get(idx).copied())
    }

    /// Move focus to the next node in the chain. Wraps around.
    ///
    /// Returns the newly focused node, or `None` if the chain is empty.
    pub fn focus_next(&mut self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            return None;
        }
        let next = match (self.current, self.insertion) {
            (Some(idx), _) => (idx + 1) % self.nodes.len(),
            (None, Some(slot)) => slot % self.nodes.len(),
            (None, None) => 0,
        };
        self.current = Some(next);
        self.insertion = None;
        self.nodes.get(next).copied()
    }

    /// Move focus to the previous node in the chain. Wraps around.
    ///
    /// Returns the newly focused node, or `None` if the chain is empty.
    pub fn focus_previous(&mut self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            return None;
        }
        let len = self.nodes.len();
        let prev = match (self.current, self.insertion) {
            (Some(idx), _) => (idx + len - 1) % len,
            (None, Some(slot)) => (slot + len - 1) % len,
            (None, None) => len - 1,
        };
        self.current = Some(prev);
        self.insertion = None;
        self.nodes.get(prev).copied()
    }

    /// Tabbable nodes in order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Number of tabbable nodes in the chain.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
