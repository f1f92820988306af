//! Mega menu: typed markup model and the open/close controller.

pub mod controller;
pub mod model;

pub use controller::{MegaMenu, MenuAction, MenuContext, MenuHandle, Route};
pub use model::{MenuItem, MenuModel, Panel, Position};
