//! # megamenu
//!
//! A headless, accessible mega menu widget.
//!
//! A mega menu is a menu bar whose items may open large panels of links. This
//! crate keeps one controller per menu root in a retained DOM, wires pointer,
//! focus and keyboard listeners, and keeps the ARIA attributes and state
//! classes on the markup consistent with a single open/closed state.
//!
//! ## Core Systems
//!
//! - **[`dom`]**: Slotmap-backed DOM arena, attribute helpers, HTML-subset markup parser
//! - **[`event`]**: Keyboard input, DOM events, scoped listener subscriptions
//! - **[`menu`]**: Typed menu model and the open/close/focus controller
//! - **[`document`]**: Event dispatch, focus, native Tab handling
//! - **[`bootstrap`]**: Mount a controller on every menu root of a page
//! - **[`config`]**: Menu options merged over defaults
//! - **[`ids`]**: Short identifiers linking triggers and panels
//! - **[`testing`]**: Headless Pilot and snapshot helpers

// Foundation
pub mod config;
pub mod error;
pub mod ids;

// Core systems
pub mod dom;
pub mod event;
pub mod focus;

// Widget
pub mod menu;

// Host
pub mod bootstrap;
pub mod document;
pub mod page;

// Test tooling
pub mod testing;

pub use bootstrap::init_all;
pub use config::MenuOptions;
pub use document::Document;
pub use error::{MarkupError, MenuError};
pub use menu::{MegaMenu, MenuHandle};
