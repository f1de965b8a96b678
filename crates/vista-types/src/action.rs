//! Action panel models as declared by the extension.
//!
//! Shortcuts are kept in their declared form here. Named shortcuts such as
//! `copy` are only turned into key chords when a panel is built, because the
//! mapping belongs to the host's keybind settings.

use serde::Serialize;
use serde_json::Value;

use crate::Handler;
use crate::media::ImageLike;

/// A keyboard shortcut as declared on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShortcutSpec {
    /// Common shortcut name (`copy`, `remove`...) or a `mod+key` string
    Named { name: String },

    Keys { key: String, modifiers: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    #[default]
    Callback,

    /// Host-side structural action: open the quicklink editor prefilled
    CreateQuicklink,

    /// Unrecognized type string, treated like a callback
    Other(String),
}

impl ActionKind {
    #[must_use]
    pub fn from_wire(kind: &str) -> Self {
        match kind {
            "callback" => Self::Callback,
            "create-quicklink" => Self::CreateQuicklink,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ActionModel {
    pub title: String,
    pub on_action: Handler,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_submit: Option<Handler>,
    pub kind: ActionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<ShortcutSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<ImageLike>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quicklink: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stable_id: Option<String>,
}

/// Submenu filtering: a flag, optionally keeping section order while filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SubmenuFiltering {
    pub enabled: bool,
    pub keep_section_order: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SubmenuModel {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<ImageLike>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<ShortcutSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_open: Option<Handler>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_search_text_change: Option<Handler>,
    pub auto_focus: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filtering: Option<SubmenuFiltering>,
    pub is_loading: bool,
    pub throttle: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stable_id: Option<String>,
    pub children: Vec<ActionPanelChild>,
}

/// Entry allowed inside an action panel section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionSectionItem {
    Action(ActionModel),
    Submenu(SubmenuModel),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ActionSectionModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub items: Vec<ActionSectionItem>,
}

/// Top-level entry of a panel or submenu.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionPanelChild {
    Action(ActionModel),
    Section(ActionSectionModel),
    Submenu(SubmenuModel),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ActionPanelModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stable_id: Option<String>,
    pub dirty: bool,
    pub children: Vec<ActionPanelChild>,
}

impl ActionPanelModel {
    /// Number of actions and submenus, across sections, in declaration order.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                ActionPanelChild::Action(_) | ActionPanelChild::Submenu(_) => 1,
                ActionPanelChild::Section(section) => section.items.len(),
            })
            .sum()
    }
}
