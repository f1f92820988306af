//! DOM events dispatched by the [`Document`](crate::document::Document).

use super::input::KeyEvent;
use crate::dom::node::NodeId;

/// The event types a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    FocusIn,
    FocusOut,
    KeyDown,
}

/// A single dispatched event.
///
/// Events bubble from `target` to the document node. A listener may call
/// [`prevent_default`](Self::prevent_default) to suppress the host's native
/// behavior (link navigation for clicks, focus movement for Tab).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    pub event_type: EventType,
    pub target: NodeId,
    /// Set for `KeyDown` events only.
    pub key: Option<KeyEvent>,
    default_prevented: bool,
}

impl DomEvent {
    pub fn click(target: NodeId) -> Self {
        Self::new(EventType::Click, target, None)
    }

    pub fn focus_in(target: NodeId) -> Self {
        Self::new(EventType::FocusIn, target, None)
    }

    pub fn focus_out(target: NodeId) -> Self {
        Self::new(EventType::FocusOut, target, None)
    }

    pub fn key_down(target: NodeId, key: KeyEvent) -> Self {
        Self::new(EventType::KeyDown, target, Some(key))
    }

    fn new(event_type: EventType, target: NodeId, key: Option<KeyEvent>) -> Self {
        Self {
            event_type,
            target,
            key,
            default_prevented: false,
        }
    }

    /// Suppress the host's default action for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
