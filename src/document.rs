//! Document: owns the DOM, focus, listeners and the mounted menus.
//!
//! [`Document`] plays the browser's part. It dispatches click, focus and
//! keydown events along the bubble path (target, its ancestors, then the
//! document scope), runs the listeners registered there, and applies the
//! native default actions that menus may prevent.

use crate::config::MenuOptions;
use crate::dom::markup;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::error::MenuError;
use crate::event::dom_event::{DomEvent, EventType};
use crate::event::input::{self, Key, KeyEvent, Modifiers};
use crate::event::listener::{ListenerRegistry, Scope, SharedRegistry};
use crate::focus::FocusChain;
use crate::ids::{IdGenerator, RandomIds};
use crate::menu::controller::{MegaMenu, MenuContext, MenuHandle, Route};
use crate::menu::model::MenuModel;

/// A host page with zero or more mounted mega menus.
pub struct Document {
    dom: Dom,
    document_node: NodeId,
    focused: Option<NodeId>,
    listeners: SharedRegistry<Route>,
    menus: Vec<MegaMenu>,
    ids: Box<dyn IdGenerator>,
}

impl Document {
    /// Parse host markup into a document.
    pub fn parse(markup_text: &str) -> Result<Self, MenuError> {
        let (dom, document_node) = markup::parse(markup_text)?;
        Ok(Self::from_dom(dom, document_node))
    }

    /// Wrap an existing DOM. `document_node` is the top of the bubble path.
    pub fn from_dom(dom: Dom, document_node: NodeId) -> Self {
        Self {
            dom,
            document_node,
            focused: None,
            listeners: ListenerRegistry::shared(),
            menus: Vec::new(),
            ids: Box::new(RandomIds),
        }
    }

    /// Replace the identifier source used for trigger / panel linkage (builder).
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn document_node(&self) -> NodeId {
        self.document_node
    }

    /// The focused node, if any.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Number of listeners currently registered for `event_type` at `scope`.
    pub fn listener_count(&self, scope: Scope, event_type: EventType) -> usize {
        self.listeners.borrow().count(scope, event_type)
    }

    // ── Menus ────────────────────────────────────────────────────────

    /// Mount a controller on `root`.
    pub fn mount(&mut self, root: NodeId, options: MenuOptions) -> Result<MenuHandle, MenuError> {
        let model = MenuModel::build(&self.dom, root)?;
        Ok(self.install(model, options))
    }

    /// Mount a controller on an already validated model.
    pub(crate) fn install(&mut self, model: MenuModel, options: MenuOptions) -> MenuHandle {
        let handle = MenuHandle(self.menus.len());
        let mut requests = Vec::new();
        let mut ctx = MenuContext::new(&mut self.dom, self.focused, &self.listeners, &mut requests);
        let menu = MegaMenu::new(handle, model, options, &mut ctx, self.ids.as_mut());
        self.menus.push(menu);
        handle
    }

    pub fn menu(&self, handle: MenuHandle) -> Option<&MegaMenu> {
        self.menus.get(handle.0)
    }

    pub fn menus(&self) -> &[MegaMenu] {
        &self.menus
    }

    /// Open the panel of `item` in menu `handle`. See [`MegaMenu::show_panel`].
    pub fn show_panel(&mut self, handle: MenuHandle, item: usize) -> bool {
        self.with_menu(handle, |menu, ctx| menu.show_panel(item, ctx))
            .unwrap_or(false)
    }

    /// Close the open panel of menu `handle`.
    pub fn hide_panel(&mut self, handle: MenuHandle) {
        self.with_menu(handle, |menu, ctx| menu.hide_panel(ctx));
    }

    /// Toggle the panel of `item` in menu `handle`. Returns whether it is open afterwards.
    pub fn toggle_panel(&mut self, handle: MenuHandle, item: usize) -> bool {
        self.with_menu(handle, |menu, ctx| menu.toggle_panel(item, ctx))
            .unwrap_or(false)
    }

    fn with_menu<R>(
        &mut self,
        handle: MenuHandle,
        f: impl FnOnce(&mut MegaMenu, &mut MenuContext<'_>) -> R,
    ) -> Option<R> {
        let mut requests = Vec::new();
        let menu = self.menus.get_mut(handle.0)?;
        let mut ctx = MenuContext::new(&mut self.dom, self.focused, &self.listeners, &mut requests);
        let result = f(menu, &mut ctx);
        self.apply_focus_requests(requests);
        Some(result)
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Pointer click on `target`.
    ///
    /// Like a mouse press, the click first focuses the nearest focusable
    /// ancestor-or-self of `target`. Returns the dispatched event.
    pub fn click(&mut self, target: NodeId) -> DomEvent {
        let focusable = std::iter::once(target)
            .chain(self.dom.ancestors(target))
            .find(|&node| self.dom.get(node).is_some_and(|data| data.is_focusable()));
        if let Some(node) = focusable {
            self.focus(node);
        }
        self.dispatch(DomEvent::click(target))
    }

    /// Keydown on the focused node (or the document node when nothing has focus).
    ///
    /// Unless a listener prevents it, Tab and Shift+Tab / BackTab move focus
    /// along the sequential focus order.
    pub fn key_down(&mut self, key: impl Into<KeyEvent>) -> DomEvent {
        let key = key.into();
        let target = self.focused.unwrap_or(self.document_node);
        let event = self.dispatch(DomEvent::key_down(target, key));
        if !event.default_prevented() {
            match key.code {
                Key::BackTab => self.move_focus(false),
                Key::Tab => self.move_focus(!key.modifiers.contains(Modifiers::SHIFT)),
                _ => {}
            }
        }
        event
    }

    /// Feed a terminal key press. Keys the menu cannot use are dropped.
    pub fn terminal_key(&mut self, key: crossterm::event::KeyEvent) -> Option<DomEvent> {
        input::from_crossterm(key).map(|key| self.key_down(key))
    }

    /// Move focus to `target`, dispatching focusout on the old node and
    /// focusin on the new one. Non-focusable targets are ignored.
    pub fn focus(&mut self, target: NodeId) {
        if self.focused == Some(target) {
            return;
        }
        if !self.dom.get(target).is_some_and(|data| data.is_focusable()) {
            tracing::trace!(?target, "focus ignored, node is not focusable");
            return;
        }
        self.blur();
        self.focused = Some(target);
        self.dispatch(DomEvent::focus_in(target));
    }

    /// Drop focus from the focused node, if any.
    pub fn blur(&mut self) {
        if let Some(old) = self.focused.take() {
            self.dispatch(DomEvent::focus_out(old));
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let mut chain = FocusChain::new();
        chain.rebuild(&self.dom, self.document_node, self.focused);
        let next = if forward {
            chain.focus_next()
        } else {
            chain.focus_previous()
        };
        if let Some(node) = next {
            self.focus(node);
        }
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    /// Run every listener on the bubble path of `event`.
    ///
    /// Listeners are snapshotted up front; one removed by an earlier listener
    /// during the same dispatch is skipped.
    fn dispatch(&mut self, mut event: DomEvent) -> DomEvent {
        let routes = {
            let registry = self.listeners.borrow();
            let mut routes = Vec::new();
            for node in std::iter::once(event.target).chain(self.dom.ancestors(event.target)) {
                routes.extend(registry.matching(Scope::Node(node), event.event_type));
            }
            routes.extend(registry.matching(Scope::Document, event.event_type));
            routes
        };
        tracing::trace!(
            event = ?event.event_type,
            target = ?event.target,
            listeners = routes.len(),
            "dispatch"
        );

        for (id, route) in routes {
            if !self.listeners.borrow().is_registered(id) {
                continue;
            }
            let mut requests = Vec::new();
            if let Some(menu) = self.menus.get_mut(route.menu.0) {
                let mut ctx =
                    MenuContext::new(&mut self.dom, self.focused, &self.listeners, &mut requests);
                menu.on_event(route.action, &mut event, &mut ctx);
            }
            self.apply_focus_requests(requests);
        }
        event
    }

    fn apply_focus_requests(&mut self, requests: Vec<NodeId>) {
        for node in requests {
            self.focus(node);
        }
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.dom.len())
            .field("focused", &self.focused)
            .field("menus", &self.menus.len())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}
