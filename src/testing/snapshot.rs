//! Snapshot helpers.
//!
//! Functions for turning a document's markup or a menu's visible state into
//! plain-text strings suitable for snapshot testing and assertions.

use crate::document::Document;
use crate::dom::markup;
use crate::dom::node::NodeId;
use crate::menu::controller::MenuHandle;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Serialize the subtree at `node` as indented markup.
pub fn subtree_to_string(document: &Document, node: NodeId) -> String {
    markup::serialize(document.dom(), node)
}

/// Summarize a menu's state as one line per item plus a header.
///
/// ```text
/// state: open 1
/// focus: Panel link
/// 0 Logo -
/// 1 Item one expanded=true hidden=false
/// ```
///
/// Items without a panel end in `-`. Returns an empty string for an unknown
/// handle.
pub fn menu_summary(document: &Document, handle: MenuHandle) -> String {
    let Some(menu) = document.menu(handle) else {
        return String::new();
    };
    let dom = document.dom();

    let mut lines = Vec::with_capacity(menu.model().len() + 2);
    lines.push(match menu.active_panel() {
        Some(active) => format!("state: open {active}"),
        None => "state: closed".to_owned(),
    });
    let focus = document
        .focused()
        .map(|node| label(document, node))
        .unwrap_or_else(|| "-".to_owned());
    lines.push(format!("focus: {focus}"));

    for (index, item) in menu.model().items().iter().enumerate() {
        let name = label(document, item.trigger);
        match &item.panel {
            Some(panel) => {
                let expanded = dom.attribute(item.trigger, "aria-expanded").unwrap_or("?");
                let hidden = dom.attribute(panel.node, "aria-hidden").unwrap_or("?");
                lines.push(format!("{index} {name} expanded={expanded} hidden={hidden}"));
            }
            None => lines.push(format!("{index} {name} -")),
        }
    }
    lines.join("\n")
}

/// Visible text of a node, or the `alt` of an image inside it.
fn label(document: &Document, node: NodeId) -> String {
    let dom = document.dom();
    let text = dom.text_content(node);
    if !text.is_empty() {
        return text;
    }
    dom.query_all(node, |data| data.tag == "img")
        .first()
        .and_then(|&img| dom.attribute(img, "alt"))
        .unwrap_or("?")
        .to_owned()
}

// ===========================================================================
// Tests
// ===========================================================================
