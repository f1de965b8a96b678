use serde_json::Value;
use vista_types::{DetailModel, MetadataItem, TagItem};

use super::action::parse_action_panel;
use super::{Node, ParseContext, Props, for_each_child};

/// Node types that wrap a metadata list.
const METADATA_CONTAINERS: [&str; 3] = ["metadata", "detail-metadata", "list-item-detail-metadata"];

/// Parse a `detail` document or a `list-item-detail` side panel.
pub(crate) fn parse_detail(node: Node<'_>, ctx: &mut ParseContext) -> DetailModel {
    let props = node.props();
    let mut detail = DetailModel {
        markdown: ctx.string_or_default(props, "markdown"),
        navigation_title: ctx.string(props, "navigationTitle"),
        is_loading: ctx.flag(props, "isLoading").unwrap_or(false),
        metadata: Vec::new(),
        actions: None,
    };

    let parent = node.node_type().to_string();
    for_each_child(node, ctx, |child, ctx| match child.node_type() {
        "action-panel" => detail.actions = Some(parse_action_panel(child, ctx)),
        container if METADATA_CONTAINERS.contains(&container) => {
            detail.metadata.extend(parse_metadata(child, ctx));
        }
        other => ctx.unknown_child(&parent, other),
    });

    detail
}

fn parse_metadata(node: Node<'_>, ctx: &mut ParseContext) -> Vec<MetadataItem> {
    let mut items = Vec::new();
    for_each_child(node, ctx, |child, ctx| {
        let props = child.props();
        match child.node_type() {
            "metadata-label" => items.push(MetadataItem::Label {
                title: ctx.string_or_default(props, "title"),
                text: metadata_text(props, ctx),
                icon: ctx.image(props, "icon"),
            }),
            "metadata-link" => items.push(MetadataItem::Link {
                title: ctx.string_or_default(props, "title"),
                text: ctx.string_or_default(props, "text"),
                target: ctx.string_or_default(props, "target"),
            }),
            "metadata-separator" => items.push(MetadataItem::Separator),
            "tag-list" => items.push(MetadataItem::TagList {
                title: ctx.string_or_default(props, "title"),
                tags: parse_tags(child, ctx),
            }),
            other => ctx.unknown_child("metadata", other),
        }
    });
    items
}

/// Label text is a string or `{value, color}`; only the text is kept.
fn metadata_text(props: Props<'_>, ctx: &mut ParseContext) -> String {
    match props.get("text") {
        Some(Value::Object(object)) => object
            .get("value")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => ctx.string_or_default(props, "text"),
    }
}

fn parse_tags(node: Node<'_>, ctx: &mut ParseContext) -> Vec<TagItem> {
    let mut tags = Vec::new();
    for_each_child(node, ctx, |child, ctx| {
        if child.node_type() != "tag-item" {
            ctx.unknown_child("tag-list", child.node_type());
            return;
        }
        let props = child.props();
        tags.push(TagItem {
            text: ctx.string_or_default(props, "text"),
            color: ctx.color(props, "color"),
            icon: ctx.image(props, "icon"),
        });
    });
    tags
}
