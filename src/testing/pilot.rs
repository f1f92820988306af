//! Pilot: programmatic interaction with a headless [`Document`].
//!
//! The `Pilot` parses a page, mounts its menus, and offers a high-level API
//! for simulating pointer and keyboard input and inspecting the result by
//! visible text rather than by node id.

use crate::config::MenuOptions;
use crate::document::Document;
use crate::dom::node::NodeId;
use crate::error::MenuError;
use crate::event::dom_event::DomEvent;
use crate::event::input::{Key, KeyEvent, Modifiers};
use crate::ids::SequentialIds;
use crate::menu::controller::{MegaMenu, MenuHandle};

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless page driver for testing.
///
/// # Examples
///
/// ```ignore
/// use megamenu::testing::Pilot;
/// use megamenu::event::Key;
///
/// let mut pilot = Pilot::new(megamenu::page::DEMO_PAGE).unwrap();
/// pilot.focus_text("Item one");
/// pilot.press_key(Key::Down);
/// assert!(pilot.menu().opened());
/// ```
pub struct Pilot {
    document: Document,
    handles: Vec<MenuHandle>,
}

impl Pilot {
    /// Parse `markup` and mount every menu with default options.
    ///
    /// Linkage ids are sequential (`0001`, `0002`, ...) so output is stable.
    pub fn new(markup: &str) -> Result<Self, MenuError> {
        Self::with_options(markup, MenuOptions::default())
    }

    /// Parse `markup` and mount every menu with `options`.
    pub fn with_options(markup: &str, options: MenuOptions) -> Result<Self, MenuError> {
        let mut document = Document::parse(markup)?.with_id_generator(SequentialIds::new());
        let handles = crate::bootstrap::init_all(&mut document, options)?;
        Ok(Self { document, handles })
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Simulate a key press with no modifiers on the focused node.
    pub fn press_key(&mut self, key: Key) -> DomEvent {
        self.document.key_down(KeyEvent::new(key, Modifiers::NONE))
    }

    /// Simulate a key press with the given modifiers.
    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) -> DomEvent {
        self.document.key_down(KeyEvent::new(key, modifiers))
    }

    /// Press each key in turn.
    pub fn press_keys(&mut self, keys: &[Key]) {
        for &key in keys {
            self.press_key(key);
        }
    }

    /// Click the first element whose text is `text`.
    ///
    /// # Panics
    ///
    /// Panics if no element has that text.
    pub fn click_text(&mut self, text: &str) -> DomEvent {
        let node = self.find_text(text);
        self.document.click(node)
    }

    /// Click a node.
    pub fn click(&mut self, node: NodeId) -> DomEvent {
        self.document.click(node)
    }

    /// Focus the first element whose text is `text`.
    ///
    /// # Panics
    ///
    /// Panics if no element has that text.
    pub fn focus_text(&mut self, text: &str) {
        let node = self.find_text(text);
        self.document.focus(node);
    }

    // ── Query ────────────────────────────────────────────────────────

    /// The first element (in document order) whose collapsed text is `text`.
    ///
    /// # Panics
    ///
    /// Panics if no element has that text.
    pub fn find_text(&self, text: &str) -> NodeId {
        self.find_all_text(text)
            .first()
            .copied()
            .unwrap_or_else(|| panic!("no element with text {text:?}"))
    }

    /// Every anchor whose collapsed text is `text`, in document order.
    pub fn find_all_text(&self, text: &str) -> Vec<NodeId> {
        let dom = self.document.dom();
        dom.query_all(self.document.document_node(), |data| data.tag == "a")
            .into_iter()
            .filter(|&node| dom.text_content(node) == text)
            .collect()
    }

    /// Text of the focused node.
    pub fn focused_text(&self) -> Option<String> {
        self.document
            .focused()
            .map(|node| self.document.dom().text_content(node))
    }

    /// Read an attribute of `node`.
    pub fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.document.dom().attribute(node, name).map(str::to_owned)
    }

    /// Whether `node` has a CSS class.
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.document.dom().has_class(node, class)
    }

    /// The first mounted menu.
    ///
    /// # Panics
    ///
    /// Panics if the page has no menu.
    pub fn menu(&self) -> &MegaMenu {
        self.handles
            .first()
            .and_then(|&handle| self.document.menu(handle))
            .expect("page has no mega menu")
    }

    /// Handles of every mounted menu, in document order.
    pub fn handles(&self) -> &[MenuHandle] {
        &self.handles
    }

    /// Serialized markup of the first menu's root.
    pub fn menu_markup(&self) -> String {
        super::snapshot::subtree_to_string(&self.document, self.menu().root())
    }

    /// Borrow the underlying document immutably.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Borrow the underlying document mutably.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }
}

// ===========================================================================
// Tests
// ===========================================================================
