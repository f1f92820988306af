//! Menu options, merged over documented defaults.
//!
//! Options deserialize from camelCase JSON. Any subset of keys may be given;
//! missing keys keep their defaults and unknown keys are ignored.

use serde::Deserialize;

use crate::error::MenuError;

/// Class names and modifiers used by a [`MegaMenu`](crate::menu::MegaMenu).
///
/// `menu_class` also namespaces the generated linkage ids
/// (`{menu_class}-label-{uid}` / `{menu_class}-control-{uid}`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuOptions {
    pub menu_class: String,
    pub menu_item: String,
    pub menu_item_trigger: String,
    pub panel_class: String,
    pub panel_nav_group_class: String,
    pub active_modifier: String,
    pub focused_modifier: String,
    /// Not used by the controller.
    pub hover_modifier: String,
    /// Not used by the controller.
    pub hover: bool,
    /// Milliseconds. Not used by the controller.
    pub open_delay: u32,
    /// Milliseconds. Not used by the controller.
    pub close_delay: u32,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            menu_class: "megamenu".to_owned(),
            menu_item: "megamenu__item".to_owned(),
            menu_item_trigger: "megamenu__item-trigger".to_owned(),
            panel_class: "megamenu__panel".to_owned(),
            panel_nav_group_class: "megamenu__panel-group".to_owned(),
            active_modifier: "--active".to_owned(),
            focused_modifier: "--focused".to_owned(),
            hover_modifier: "--hover".to_owned(),
            hover: false,
            open_delay: 0,
            close_delay: 250,
        }
    }
}

impl MenuOptions {
    /// Create the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a JSON object over the defaults.
    pub fn from_json(json: &str) -> Result<Self, MenuError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the menu class / id namespace (builder).
    pub fn with_menu_class(mut self, class: impl Into<String>) -> Self {
        self.menu_class = class.into();
        self
    }

    /// Set the trigger class (builder).
    pub fn with_menu_item_trigger(mut self, class: impl Into<String>) -> Self {
        self.menu_item_trigger = class.into();
        self
    }

    /// Set the panel class (builder).
    pub fn with_panel_class(mut self, class: impl Into<String>) -> Self {
        self.panel_class = class.into();
        self
    }

    /// Set the active-state suffix (builder).
    pub fn with_active_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.active_modifier = modifier.into();
        self
    }

    /// Set the focused-state suffix (builder).
    pub fn with_focused_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.focused_modifier = modifier.into();
        self
    }

    /// Class marking the root while a panel is open.
    pub fn root_active_class(&self) -> String {
        format!("{}{}", self.menu_class, self.active_modifier)
    }

    /// Class marking the trigger whose panel is open.
    pub fn trigger_active_class(&self) -> String {
        format!("{}{}", self.menu_item_trigger, self.active_modifier)
    }

    /// Class marking the open panel.
    pub fn panel_active_class(&self) -> String {
        format!("{}{}", self.panel_class, self.active_modifier)
    }

    /// Class marking a trigger that holds focus.
    pub fn trigger_focused_class(&self) -> String {
        format!("{}{}", self.menu_item_trigger, self.focused_modifier)
    }

    /// `id` given to the trigger with generated `uid`.
    pub fn label_id(&self, uid: &str) -> String {
        format!("{}-label-{uid}", self.menu_class)
    }

    /// `id` given to the panel with generated `uid`.
    pub fn control_id(&self, uid: &str) -> String {
        format!("{}-control-{uid}", self.menu_class)
    }
}
