//! Shared view-model types for Vista components.
//!
//! This crate holds the typed tree an extension render is parsed into, used
//! across vista-core, vista-rpc and vista-cli. Everything here is plain data:
//! parsing lives in vista-core, transport in vista-rpc.

pub mod action;
pub mod detail;
pub mod form;
pub mod list;
pub mod media;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use action::{
    ActionKind, ActionModel, ActionPanelChild, ActionPanelModel, ActionSectionItem,
    ActionSectionModel, ShortcutSpec, SubmenuFiltering, SubmenuModel,
};
pub use detail::{DetailModel, MetadataItem, TagItem};
pub use form::{
    DatePickerKind, Field, FieldBase, FieldKind, FormItem, FormModel, LinkAccessory,
};
pub use list::{
    Accessory, AccessoryContent, Child, DropdownItem, DropdownModel, EmptyView, GridContent,
    GridFit, GridInset, GridItem, GridLayout, GridModel, ListIcon, ListItem, ListModel, Section,
};
pub use media::{Appearance, ColorLike, ImageLike, ImageMask, ImageSource};

/// Extension-side handler name an outbound notification is routed to.
pub type Handler = String;

/// One parsed render payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewDocument {
    List(ListModel),
    Grid(GridModel),
    Form(FormModel),
    Detail(DetailModel),

    /// Root type not understood; renders nothing
    Invalid { node_type: String },
}

impl ViewDocument {
    #[must_use]
    pub fn kind(&self) -> ViewKind {
        match self {
            Self::List(_) => ViewKind::List,
            Self::Grid(_) => ViewKind::Grid,
            Self::Form(_) => ViewKind::Form,
            Self::Detail(_) => ViewKind::Detail,
            Self::Invalid { .. } => ViewKind::Invalid,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        match self {
            Self::List(list) => list.is_loading,
            Self::Grid(grid) => grid.is_loading,
            Self::Form(form) => form.is_loading,
            Self::Detail(detail) => detail.is_loading,
            Self::Invalid { .. } => false,
        }
    }

    #[must_use]
    pub fn navigation_title(&self) -> Option<&str> {
        match self {
            Self::List(list) => list.navigation_title.as_deref(),
            Self::Grid(grid) => grid.navigation_title.as_deref(),
            Self::Form(form) => form.navigation_title.as_deref(),
            Self::Detail(detail) => detail.navigation_title.as_deref(),
            Self::Invalid { .. } => None,
        }
    }
}

impl Default for ViewDocument {
    fn default() -> Self {
        Self::Invalid {
            node_type: String::new(),
        }
    }
}

/// Document discriminant, compared across renders to detect view swaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    List,
    Grid,
    Form,
    Detail,
    Invalid,
}

impl std::fmt::Display for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::List => "list",
            Self::Grid => "grid",
            Self::Form => "form",
            Self::Detail => "detail",
            Self::Invalid => "invalid",
        };
        f.write_str(name)
    }
}

/// Outbound call to an extension handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub handler: Handler,
    #[serde(default)]
    pub args: Vec<Value>,
}

impl Notification {
    #[must_use]
    pub fn new(handler: impl Into<Handler>, args: Vec<Value>) -> Self {
        Self {
            handler: handler.into(),
            args,
        }
    }
}

/// Sink for outbound notifications.
///
/// Delivery is fire-and-forget: implementations must not block and never
/// report failure back to the caller.
pub trait Notifier {
    fn notify(&mut self, handler: &str, args: Vec<Value>);
}

/// Records notifications in order. Used by tests and the one-shot CLI paths.
impl Notifier for Vec<Notification> {
    fn notify(&mut self, handler: &str, args: Vec<Value>) {
        self.push(Notification::new(handler, args));
    }
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn notify(&mut self, handler: &str, args: Vec<Value>) {
        (**self).notify(handler, args);
    }
}
