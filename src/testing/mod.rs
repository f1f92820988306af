//! Headless testing helpers: Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to drive a [`Document`](crate::document::Document) by
//! visible text. Use [`menu_summary`] and [`subtree_to_string`] to capture a
//! menu's state or markup as plain text for snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{menu_summary, subtree_to_string};
