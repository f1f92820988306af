//! Listener registry and scoped subscriptions.
//!
//! A [`Subscription`] is the only way to register a listener: dropping it
//! removes the listener, so a listener lives exactly as long as the value
//! that owns it.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::dom_event::EventType;
use crate::dom::node::NodeId;

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// On one node; fires for events targeting it or bubbling through it.
    Node(NodeId),
    /// On the document; fires last for every event.
    Document,
}

/// Registration handle, unique within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Debug)]
struct Entry<H> {
    id: ListenerId,
    scope: Scope,
    event_type: EventType,
    handler: H,
}

/// Listeners grouped by scope and event type, kept in registration order.
#[derive(Debug)]
pub struct ListenerRegistry<H> {
    next_id: u64,
    entries: Vec<Entry<H>>,
}

/// A registry shared between a document and the subscriptions it hands out.
pub type SharedRegistry<H> = Rc<RefCell<ListenerRegistry<H>>>;

impl<H: Clone> ListenerRegistry<H> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Create an empty registry behind a shared handle.
    pub fn shared() -> SharedRegistry<H> {
        Rc::new(RefCell::new(Self::new()))
    }

    fn add(&mut self, scope: Scope, event_type: EventType, handler: H) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push(Entry {
            id,
            scope,
            event_type,
            handler,
        });
        id
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Whether a listener is still registered.
    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Snapshot of the handlers for `(scope, event_type)`, in registration order.
    pub fn matching(&self, scope: Scope, event_type: EventType) -> Vec<(ListenerId, H)> {
        self.entries
            .iter()
            .filter(|entry| entry.scope == scope && entry.event_type == event_type)
            .map(|entry| (entry.id, entry.handler.clone()))
            .collect()
    }

    /// Number of listeners registered for `(scope, event_type)`.
    pub fn count(&self, scope: Scope, event_type: EventType) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.scope == scope && entry.event_type == event_type)
            .count()
    }

    /// Total number of listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<H: Clone> Default for ListenerRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Register `handler` and return the guard that keeps it registered.
pub fn subscribe<H: Clone>(
    registry: &SharedRegistry<H>,
    scope: Scope,
    event_type: EventType,
    handler: H,
) -> Subscription<H> {
    let id = registry.borrow_mut().add(scope, event_type, handler);
    Subscription {
        registry: Rc::downgrade(registry),
        id,
    }
}

/// Keeps one listener registered; dropping it unregisters the listener.
#[must_use = "dropping a Subscription removes the listener immediately"]
pub struct Subscription<H: Clone> {
    registry: Weak<RefCell<ListenerRegistry<H>>>,
    id: ListenerId,
}

impl<H: Clone> Subscription<H> {
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl<H: Clone> Drop for Subscription<H> {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let borrowed = registry.try_borrow_mut();
        match borrowed {
            Ok(mut registry) => {
                registry.remove(self.id);
            }
            Err(_) => {
                tracing::warn!(listener = ?self.id, "registry busy, listener not removed");
            }
        };
    }
}

impl<H: Clone> fmt::Debug for Subscription<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
