//! Event system: keyboard input, DOM events, listener subscriptions.

pub mod dom_event;
pub mod input;
pub mod listener;

pub use dom_event::{DomEvent, EventType};
pub use input::{Key, KeyEvent, Modifiers};
pub use listener::{subscribe, ListenerId, ListenerRegistry, Scope, SharedRegistry, Subscription};
