//! Detail view: markdown body with an optional metadata side panel.

use serde::Serialize;

use crate::action::ActionPanelModel;
use crate::media::{ColorLike, ImageLike};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagItem {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorLike>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<ImageLike>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MetadataItem {
    Label {
        title: String,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        icon: Option<ImageLike>,
    },
    Link {
        title: String,
        text: String,
        target: String,
    },
    TagList {
        title: String,
        tags: Vec<TagItem>,
    },
    Separator,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DetailModel {
    pub markdown: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation_title: Option<String>,
    pub is_loading: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<MetadataItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<ActionPanelModel>,
}

impl DetailModel {
    #[must_use]
    pub fn has_metadata(&self) -> bool {
        self.metadata
            .iter()
            .any(|item| !matches!(item, MetadataItem::Separator))
    }
}
