//! The mega menu state machine.
//!
//! A [`MegaMenu`] is either closed or has exactly one panel open. The state
//! lives in [`MenuState`]; the ARIA attributes and CSS classes on the markup
//! are written from it and never read back.

use crate::config::MenuOptions;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::event::dom_event::{DomEvent, EventType};
use crate::event::input::{Key, Modifiers};
use crate::event::listener::{subscribe, Scope, SharedRegistry, Subscription};
use crate::ids::IdGenerator;

use super::model::{MenuModel, Position};

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// Index of a mounted menu within its [`Document`](crate::document::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MenuHandle(pub(crate) usize);

impl MenuHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a listener does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    TriggerClick(usize),
    TriggerFocusIn(usize),
    TriggerFocusOut(usize),
    RootKeyDown,
    OutsideClick,
}

/// A registered listener: which menu to call and with what action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub menu: MenuHandle,
    pub action: MenuAction,
}

/// Everything a menu may touch while handling an event.
///
/// Focus changes are queued and applied by the document once the handler
/// returns, so focus events never re-enter a running handler.
pub struct MenuContext<'a> {
    pub dom: &'a mut Dom,
    pub focused: Option<NodeId>,
    pub listeners: &'a SharedRegistry<Route>,
    focus_requests: &'a mut Vec<NodeId>,
}

impl<'a> MenuContext<'a> {
    pub fn new(
        dom: &'a mut Dom,
        focused: Option<NodeId>,
        listeners: &'a SharedRegistry<Route>,
        focus_requests: &'a mut Vec<NodeId>,
    ) -> Self {
        Self {
            dom,
            focused,
            listeners,
            focus_requests,
        }
    }

    /// Ask the document to move focus to `node`.
    pub fn request_focus(&mut self, node: NodeId) {
        self.focus_requests.push(node);
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Open/closed state. The outside-click listener exists exactly while open.
#[derive(Debug)]
enum MenuState {
    Closed,
    Open {
        active: usize,
        _outside_click: Subscription<Route>,
    },
}

/// Which end of a panel to land on when entering an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    First,
    Last,
}

// ---------------------------------------------------------------------------
// MegaMenu
// ---------------------------------------------------------------------------

/// Controller for one menu root.
#[derive(Debug)]
pub struct MegaMenu {
    handle: MenuHandle,
    options: MenuOptions,
    model: MenuModel,
    state: MenuState,
    _listeners: Vec<Subscription<Route>>,
}

impl MegaMenu {
    /// Label the markup for assistive technology and attach listeners.
    pub fn new(
        handle: MenuHandle,
        model: MenuModel,
        options: MenuOptions,
        ctx: &mut MenuContext<'_>,
        ids: &mut dyn IdGenerator,
    ) -> Self {
        for item in model.items() {
            let Some(panel) = &item.panel else {
                continue;
            };
            let uid = ids.next_id();
            let label_id = options.label_id(&uid);
            let control_id = options.control_id(&uid);
            let label = ctx.dom.text_content(item.trigger);

            ctx.dom.set_attributes(
                item.trigger,
                [
                    ("aria-haspopup", "true".to_owned()),
                    ("aria-controls", control_id.clone()),
                    ("id", label_id.clone()),
                    ("aria-expanded", "false".to_owned()),
                ],
            );
            ctx.dom.set_attributes(
                panel.node,
                [
                    ("aria-labelledby", label_id),
                    ("aria-hidden", "true".to_owned()),
                    ("id", control_id),
                    ("aria-label", label),
                    ("role", "menu".to_owned()),
                ],
            );
            for &link in &panel.links {
                ctx.dom.set_attribute(link, "tabindex", "-1");
            }
        }

        ctx.dom.set_attribute(model.root(), "role", "menubar");
        let mut listeners = Vec::with_capacity(model.len() * 3 + 1);
        for (index, item) in model.items().iter().enumerate() {
            ctx.dom.set_attribute(item.trigger, "role", "menuitem");
            let scope = Scope::Node(item.trigger);
            for (event_type, action) in [
                (EventType::Click, MenuAction::TriggerClick(index)),
                (EventType::FocusIn, MenuAction::TriggerFocusIn(index)),
                (EventType::FocusOut, MenuAction::TriggerFocusOut(index)),
            ] {
                listeners.push(subscribe(
                    ctx.listeners,
                    scope,
                    event_type,
                    Route { menu: handle, action },
                ));
            }
        }
        listeners.push(subscribe(
            ctx.listeners,
            Scope::Node(model.root()),
            EventType::KeyDown,
            Route {
                menu: handle,
                action: MenuAction::RootKeyDown,
            },
        ));

        tracing::debug!(menu = handle.0, items = model.len(), "mega menu mounted");
        Self {
            handle,
            options,
            model,
            state: MenuState::Closed,
            _listeners: listeners,
        }
    }

    pub fn handle(&self) -> MenuHandle {
        self.handle
    }

    pub fn options(&self) -> &MenuOptions {
        &self.options
    }

    pub fn model(&self) -> &MenuModel {
        &self.model
    }

    pub fn root(&self) -> NodeId {
        self.model.root()
    }

    /// Whether a panel is open.
    pub fn opened(&self) -> bool {
        matches!(self.state, MenuState::Open { .. })
    }

    /// Index of the item whose panel is open.
    pub fn active_panel(&self) -> Option<usize> {
        match self.state {
            MenuState::Open { active, .. } => Some(active),
            MenuState::Closed => None,
        }
    }

    // ── Event handling ───────────────────────────────────────────────

    /// Run the listener identified by `action` for `event`.
    pub(crate) fn on_event(
        &mut self,
        action: MenuAction,
        event: &mut DomEvent,
        ctx: &mut MenuContext<'_>,
    ) {
        tracing::trace!(menu = self.handle.0, ?action, "menu listener");
        match action {
            MenuAction::TriggerClick(index) => {
                if self.model.item(index).is_some_and(|item| item.has_panel()) {
                    event.prevent_default();
                    self.toggle_panel(index, ctx);
                }
            }
            MenuAction::TriggerFocusIn(index) => {
                if let Some(item) = self.model.item(index) {
                    ctx.dom
                        .add_class(item.trigger, &self.options.trigger_focused_class());
                }
            }
            MenuAction::TriggerFocusOut(index) => {
                if let Some(item) = self.model.item(index) {
                    ctx.dom
                        .remove_class(item.trigger, &self.options.trigger_focused_class());
                }
            }
            MenuAction::OutsideClick => {
                if self.opened() && !ctx.dom.contains_node(self.root(), event.target) {
                    self.hide_panel(ctx);
                }
            }
            MenuAction::RootKeyDown => {
                if self.on_key_down(event, ctx) {
                    event.prevent_default();
                }
            }
        }
    }

    /// Returns whether the key was consumed.
    fn on_key_down(&mut self, event: &DomEvent, ctx: &mut MenuContext<'_>) -> bool {
        let Some(key) = event.key else {
            return false;
        };
        if !ctx.dom.contains_node(self.root(), event.target) {
            tracing::warn!(menu = self.handle.0, "keydown from outside the menu root");
            return false;
        }
        if key.modifiers.contains(Modifiers::CTRL) || key.modifiers.contains(Modifiers::ALT) {
            return false;
        }

        let position = self.model.locate(ctx.dom, event.target);
        match (key.code, position) {
            (Key::Escape, _) => self.on_escape(ctx),
            (Key::Down, Some(position)) => self.on_down(position, ctx),
            (Key::Up, Some(position)) => self.on_up(position, ctx),
            (Key::Right, Some(position)) => self.on_sideways(position.item(), 1, ctx),
            (Key::Left, Some(position)) => self.on_sideways(position.item(), -1, ctx),
            // Tab, Space, Enter and the rest are left to the host.
            _ => false,
        }
    }

    fn on_escape(&mut self, ctx: &mut MenuContext<'_>) -> bool {
        let Some(active) = self.active_panel() else {
            return false;
        };
        let trigger = self.model.items()[active].trigger;
        let focus_in_panel = ctx
            .focused
            .is_some_and(|focused| self.model.items()[active].links().contains(&focused));
        self.hide_panel(ctx);
        if focus_in_panel {
            ctx.request_focus(trigger);
        }
        true
    }

    fn on_down(&mut self, position: Position, ctx: &mut MenuContext<'_>) -> bool {
        match position {
            Position::Trigger(index) if self.model.items()[index].has_panel() => {
                self.enter_item(index, Entry::First, ctx);
                true
            }
            Position::Trigger(index) => self.move_to_item(index + 1, Entry::First, ctx),
            Position::Link { item, link } => {
                let next = self.model.items()[item].links().get(link + 1).copied();
                match next {
                    Some(next) => {
                        ctx.request_focus(next);
                        true
                    }
                    None => self.move_to_item(item + 1, Entry::First, ctx),
                }
            }
        }
    }

    fn on_up(&mut self, position: Position, ctx: &mut MenuContext<'_>) -> bool {
        match position {
            Position::Link { item, link: 0 } => {
                ctx.request_focus(self.model.items()[item].trigger);
                true
            }
            Position::Link { item, link } => {
                ctx.request_focus(self.model.items()[item].links()[link - 1]);
                true
            }
            Position::Trigger(0) => {
                if self.opened() {
                    self.hide_panel(ctx);
                    true
                } else {
                    false
                }
            }
            Position::Trigger(index) => self.move_to_item(index - 1, Entry::Last, ctx),
        }
    }

    fn on_sideways(&mut self, from: usize, step: isize, ctx: &mut MenuContext<'_>) -> bool {
        let Some(target) = from.checked_add_signed(step) else {
            return false;
        };
        let Some(item) = self.model.item(target) else {
            return false;
        };
        let (trigger, has_panel) = (item.trigger, item.has_panel());
        if self.opened() {
            if has_panel {
                self.show_panel(target, ctx);
            } else {
                self.hide_panel(ctx);
            }
        }
        ctx.request_focus(trigger);
        true
    }

    /// Move to another top-level item, if it exists.
    fn move_to_item(&mut self, index: usize, entry: Entry, ctx: &mut MenuContext<'_>) -> bool {
        if index >= self.model.len() {
            return false;
        }
        self.enter_item(index, entry, ctx);
        true
    }

    /// Open the item's panel and focus its first or last link, or, for an item
    /// without a panel, close any open panel and focus the trigger.
    fn enter_item(&mut self, index: usize, entry: Entry, ctx: &mut MenuContext<'_>) {
        let item = &self.model.items()[index];
        let trigger = item.trigger;
        let landing = match entry {
            Entry::First => item.links().first().copied(),
            Entry::Last => item.links().last().copied(),
        };
        if item.has_panel() {
            self.show_panel(index, ctx);
            ctx.request_focus(landing.unwrap_or(trigger));
        } else {
            if self.opened() {
                self.hide_panel(ctx);
            }
            ctx.request_focus(trigger);
        }
    }

    // ── Panels ───────────────────────────────────────────────────────

    /// Collapse every panel in the markup.
    fn reset_panels(&self, dom: &mut Dom) {
        let trigger_active = self.options.trigger_active_class();
        let panel_active = self.options.panel_active_class();
        for item in self.model.items() {
            let Some(panel) = &item.panel else {
                continue;
            };
            dom.set_attribute(item.trigger, "aria-expanded", "false");
            dom.remove_class(item.trigger, &trigger_active);
            dom.set_attribute(panel.node, "aria-hidden", "true");
            dom.remove_class(panel.node, &panel_active);
            for &link in &panel.links {
                dom.set_attribute(link, "tabindex", "-1");
            }
        }
    }

    /// Open the panel of item `index`, closing any other.
    ///
    /// Returns `false` (and changes nothing) if the item has no panel.
    pub fn show_panel(&mut self, index: usize, ctx: &mut MenuContext<'_>) -> bool {
        let Some(item) = self.model.item(index) else {
            return false;
        };
        let Some(panel) = &item.panel else {
            return false;
        };

        self.reset_panels(ctx.dom);
        ctx.dom.add_class(self.root(), &self.options.root_active_class());
        ctx.dom.set_attribute(item.trigger, "aria-expanded", "true");
        ctx.dom
            .add_class(item.trigger, &self.options.trigger_active_class());
        ctx.dom.set_attribute(panel.node, "aria-hidden", "false");
        ctx.dom.add_class(panel.node, &self.options.panel_active_class());
        for &link in &panel.links {
            ctx.dom.set_attribute(link, "tabindex", "0");
        }

        let outside_click = match std::mem::replace(&mut self.state, MenuState::Closed) {
            MenuState::Open { _outside_click, .. } => _outside_click,
            MenuState::Closed => subscribe(
                ctx.listeners,
                Scope::Document,
                EventType::Click,
                Route {
                    menu: self.handle,
                    action: MenuAction::OutsideClick,
                },
            ),
        };
        self.state = MenuState::Open {
            active: index,
            _outside_click: outside_click,
        };
        tracing::debug!(menu = self.handle.0, item = index, "panel opened");
        true
    }

    /// Close whichever panel is open.
    pub fn hide_panel(&mut self, ctx: &mut MenuContext<'_>) {
        self.reset_panels(ctx.dom);
        ctx.dom
            .remove_class(self.root(), &self.options.root_active_class());
        if let MenuState::Open { active, .. } = self.state {
            tracing::debug!(menu = self.handle.0, item = active, "panel closed");
        }
        self.state = MenuState::Closed;
    }

    /// Open the panel of item `index` if it is hidden, close it if it is shown.
    ///
    /// Returns whether the panel is open afterwards.
    pub fn toggle_panel(&mut self, index: usize, ctx: &mut MenuContext<'_>) -> bool {
        if self.active_panel() == Some(index) {
            self.hide_panel(ctx);
            false
        } else {
            self.show_panel(index, ctx)
        }
    }
}
