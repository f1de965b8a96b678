//! List, grid and dropdown models.
//!
//! The three share one shape: a document holds an ordered mix of loose items
//! and explicit sections. Loose items later end up in the implicit "free"
//! section of the filter pass.

use serde::Serialize;

use crate::Handler;
use crate::action::ActionPanelModel;
use crate::detail::DetailModel;
use crate::media::{ColorLike, ImageLike};

/// A section of items, with optional grid display overrides.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section<I> {
    pub title: String,
    pub subtitle: String,
    pub layout: GridLayout,
    pub children: Vec<I>,
}

impl<I> Default for Section<I> {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            layout: GridLayout::default(),
            children: Vec::new(),
        }
    }
}

/// Top-level child of a list-like document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Child<I> {
    Item(I),
    Section(Section<I>),
}

/// Iterate every item of a child sequence in document order.
pub fn items<I>(children: &[Child<I>]) -> impl Iterator<Item = &I> {
    children.iter().flat_map(|child| match child {
        Child::Item(item) => std::slice::from_ref(item).iter(),
        Child::Section(section) => section.children.iter(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccessoryContent {
    Tag {
        value: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<ColorLike>,
    },
    Text {
        value: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<ColorLike>,
    },
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Accessory {
    pub content: AccessoryContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<ImageLike>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

/// List item icon, optionally with its own tooltip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListIcon {
    pub image: ImageLike,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ListItem {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<ListIcon>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub accessories: Vec<Accessory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_panel: Option<ActionPanelModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<DetailModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GridContent {
    Image { image: ImageLike },
    Color { color: ColorLike },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GridItem {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<GridContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_panel: Option<ActionPanelModel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GridFit {
    #[default]
    Contain,
    Fill,
}

impl GridFit {
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "contain" => Some(Self::Contain),
            "fill" => Some(Self::Fill),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GridInset {
    #[default]
    None,
    Zero,
    Small,
    Medium,
    Large,
}

impl GridInset {
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "none" => Some(Self::None),
            "zero" => Some(Self::Zero),
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            _ => None,
        }
    }
}

/// Grid display attributes. `None` means "inherit from the enclosing level".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GridLayout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<GridFit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inset: Option<GridInset>,
}

impl GridLayout {
    /// Fill unset attributes from `parent`.
    #[must_use]
    pub fn inherit(self, parent: GridLayout) -> Self {
        Self {
            columns: self.columns.or(parent.columns),
            aspect_ratio: self.aspect_ratio.or(parent.aspect_ratio),
            fit: self.fit.or(parent.fit),
            inset: self.inset.or(parent.inset),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EmptyView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<ImageLike>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_panel: Option<ActionPanelModel>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DropdownItem {
    pub title: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<ImageLike>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

/// Dropdown shared by the search bar accessory and the form dropdown field.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DropdownModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    pub filtering: bool,
    pub throttle: bool,
    pub is_loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_change: Option<Handler>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_search_text_change: Option<Handler>,
    pub children: Vec<Child<DropdownItem>>,
}

impl DropdownModel {
    /// First item in document order.
    #[must_use]
    pub fn first_item(&self) -> Option<&DropdownItem> {
        items(&self.children).next()
    }

    #[must_use]
    pub fn find(&self, value: &str) -> Option<&DropdownItem> {
        items(&self.children).find(|item| item.value == value)
    }
}

#[allow(clippy::struct_excessive_bools)] // Independent document flags from the wire
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ListModel {
    pub is_loading: bool,
    pub filtering: bool,
    pub throttle: bool,
    pub is_showing_detail: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_item_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_selection_changed: Option<Handler>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_search_text_change: Option<Handler>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_view: Option<EmptyView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_bar_accessory: Option<DropdownModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<ActionPanelModel>,
    pub dirty: bool,
    pub children: Vec<Child<ListItem>>,
}

#[allow(clippy::struct_excessive_bools)] // Independent document flags from the wire
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GridModel {
    pub is_loading: bool,
    pub filtering: bool,
    pub throttle: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_item_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_selection_changed: Option<Handler>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_search_text_change: Option<Handler>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_view: Option<EmptyView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_bar_accessory: Option<DropdownModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<ActionPanelModel>,
    pub layout: GridLayout,
    pub dirty: bool,
    pub children: Vec<Child<GridItem>>,
}
