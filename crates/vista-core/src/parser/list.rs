use serde_json::Value;
use vista_types::{Accessory, AccessoryContent, ColorLike, EmptyView, ListIcon, ListItem, ListModel};

use super::action::parse_action_panel;
use super::detail::parse_detail;
use super::dropdown::parse_dropdown;
use super::media::{parse_color, parse_image};
use super::{
    DiagnosticKind, Node, ParseContext, Props, for_each_child, json_type, push_item_or_section,
};

/// Search-related props shared by list and grid documents.
pub(crate) struct SearchProps {
    pub filtering: bool,
    pub throttle: bool,
    pub search_text: Option<String>,
    pub search_placeholder: Option<String>,
    pub selected_item_id: Option<String>,
    pub on_selection_changed: Option<String>,
    pub on_search_text_change: Option<String>,
}

impl SearchProps {
    /// `filtering` defaults to on unless the extension handles search text
    /// itself. `enableFiltering` is the older spelling.
    pub(crate) fn parse(props: Props<'_>, ctx: &mut ParseContext) -> Self {
        let on_search_text_change = ctx.string(props, "onSearchTextChange");
        let filtering = ctx
            .flag(props, "filtering")
            .or_else(|| ctx.flag(props, "enableFiltering"))
            .unwrap_or(on_search_text_change.is_none());

        Self {
            filtering,
            throttle: ctx.flag(props, "throttle").unwrap_or(false),
            search_text: ctx.string(props, "searchText"),
            search_placeholder: ctx.string(props, "searchBarPlaceholder"),
            selected_item_id: ctx.string(props, "selectedItemId"),
            on_selection_changed: ctx.string(props, "onSelectionChange"),
            on_search_text_change,
        }
    }
}

pub(crate) fn parse_list(node: Node<'_>, ctx: &mut ParseContext) -> ListModel {
    let props = node.props();
    let search = SearchProps::parse(props, ctx);

    let mut list = ListModel {
        is_loading: ctx.flag(props, "isLoading").unwrap_or(false),
        filtering: search.filtering,
        throttle: search.throttle,
        is_showing_detail: ctx.flag(props, "isShowingDetail").unwrap_or(false),
        search_text: search.search_text,
        search_placeholder: search.search_placeholder,
        navigation_title: ctx.string(props, "navigationTitle"),
        selected_item_id: search.selected_item_id,
        on_selection_changed: search.on_selection_changed,
        on_search_text_change: search.on_search_text_change,
        dirty: node.dirty(true),
        ..ListModel::default()
    };

    for_each_child(node, ctx, |child, ctx| {
        let routed = push_item_or_section(
            &mut list.children,
            child,
            ctx,
            "list-item",
            "list-section",
            parse_list_item,
        );
        if routed {
            return;
        }
        match child.node_type() {
            "action-panel" => list.actions = Some(parse_action_panel(child, ctx)),
            "empty-view" => list.empty_view = Some(parse_empty_view(child, ctx)),
            "dropdown" => list.search_bar_accessory = Some(parse_dropdown(child, ctx)),
            other => ctx.unknown_child("list", other),
        }
    });

    list
}

fn parse_list_item(node: Node<'_>, ctx: &mut ParseContext) -> Option<ListItem> {
    let props = node.props();
    let id = ctx.identity(props, "id")?;

    let mut item = ListItem {
        id,
        title: ctx.string_or_default(props, "title"),
        subtitle: ctx.string_or_default(props, "subtitle"),
        icon: parse_list_icon(props, ctx),
        keywords: ctx.strings(props, "keywords"),
        accessories: parse_accessories(props, ctx),
        action_panel: None,
        detail: None,
    };

    for_each_child(node, ctx, |child, ctx| match child.node_type() {
        "action-panel" => item.action_panel = Some(parse_action_panel(child, ctx)),
        "list-item-detail" => item.detail = Some(parse_detail(child, ctx)),
        other => ctx.unknown_child("list-item", other),
    });

    Some(item)
}

/// `icon` is an image, or `{value: image, tooltip}`.
fn parse_list_icon(props: Props<'_>, ctx: &mut ParseContext) -> Option<ListIcon> {
    let value = props.get("icon")?;
    if let Value::Object(object) = value
        && object.contains_key("value")
    {
        let image = object.get("value").and_then(parse_image)?;
        let tooltip = object
            .get("tooltip")
            .and_then(Value::as_str)
            .map(str::to_string);
        return Some(ListIcon { image, tooltip });
    }
    ctx.image(props, "icon")
        .map(|image| ListIcon { image, tooltip: None })
}

fn parse_accessories(props: Props<'_>, ctx: &mut ParseContext) -> Vec<Accessory> {
    match props.get("accessories") {
        None => Vec::new(),
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(|value| {
                let accessory = parse_accessory(value);
                if accessory.is_none() {
                    ctx.diagnose(
                        DiagnosticKind::Malformed,
                        format!("accessory should be an object, got {}", json_type(value)),
                    );
                }
                accessory
            })
            .collect(),
        Some(other) => {
            ctx.diagnose(
                DiagnosticKind::Malformed,
                format!("'accessories' should be an array, got {}", json_type(other)),
            );
            Vec::new()
        }
    }
}

/// `tag` is checked before `text`; each is a string or `{value, color}`.
fn parse_accessory(value: &Value) -> Option<Accessory> {
    let object = value.as_object()?;

    let content = if let Some(tag) = object.get("tag").filter(|v| !v.is_null()) {
        let (value, color) = text_with_color(tag);
        AccessoryContent::Tag { value, color }
    } else if let Some(text) = object.get("text").filter(|v| !v.is_null()) {
        let (value, color) = text_with_color(text);
        AccessoryContent::Text { value, color }
    } else {
        AccessoryContent::None
    };

    Some(Accessory {
        content,
        icon: object.get("icon").and_then(parse_image),
        tooltip: object
            .get("tooltip")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

fn text_with_color(value: &Value) -> (String, Option<ColorLike>) {
    match value {
        Value::Object(object) => (
            object.get("value").map(scalar_text).unwrap_or_default(),
            object.get("color").and_then(parse_color),
        ),
        other => (scalar_text(other), None),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub(crate) fn parse_empty_view(node: Node<'_>, ctx: &mut ParseContext) -> EmptyView {
    let props = node.props();
    let mut view = EmptyView {
        title: ctx.string(props, "title"),
        description: ctx.string(props, "description"),
        icon: ctx.image(props, "icon"),
        action_panel: None,
    };

    for_each_child(node, ctx, |child, ctx| match child.node_type() {
        "action-panel" => view.action_panel = Some(parse_action_panel(child, ctx)),
        other => ctx.unknown_child("empty-view", other),
    });

    view
}
