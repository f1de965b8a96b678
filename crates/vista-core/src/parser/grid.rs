use serde_json::Value;
use vista_types::{
    Child, GridContent, GridFit, GridInset, GridItem, GridLayout, GridModel, Section,
};

use super::action::parse_action_panel;
use super::dropdown::parse_dropdown;
use super::list::{SearchProps, parse_empty_view};
use super::media::{parse_color, parse_image};
use super::{
    DiagnosticKind, Node, ParseContext, Props, for_each_child, json_type, parse_section,
};

pub(crate) fn parse_grid(node: Node<'_>, ctx: &mut ParseContext) -> GridModel {
    let props = node.props();
    let search = SearchProps::parse(props, ctx);

    let mut grid = GridModel {
        is_loading: ctx.flag(props, "isLoading").unwrap_or(false),
        filtering: search.filtering,
        throttle: search.throttle,
        search_text: search.search_text,
        search_placeholder: search.search_placeholder,
        navigation_title: ctx.string(props, "navigationTitle"),
        selected_item_id: search.selected_item_id,
        on_selection_changed: search.on_selection_changed,
        on_search_text_change: search.on_search_text_change,
        layout: parse_layout(props, ctx),
        dirty: node.dirty(true),
        ..GridModel::default()
    };

    for_each_child(node, ctx, |child, ctx| match child.node_type() {
        "grid-item" => {
            if let Some(item) = parse_grid_item(child, ctx) {
                grid.children.push(Child::Item(item));
            }
        }
        "grid-section" => grid.children.push(Child::Section(parse_grid_section(child, ctx))),
        "action-panel" => grid.actions = Some(parse_action_panel(child, ctx)),
        "empty-view" => grid.empty_view = Some(parse_empty_view(child, ctx)),
        "dropdown" => grid.search_bar_accessory = Some(parse_dropdown(child, ctx)),
        other => ctx.unknown_child("grid", other),
    });

    grid
}

fn parse_grid_section(node: Node<'_>, ctx: &mut ParseContext) -> Section<GridItem> {
    let layout = parse_layout(node.props(), ctx);
    let mut section = parse_section(node, ctx, "grid-item", parse_grid_item);
    section.layout = layout;
    section
}

/// Display attributes of a grid or grid section. Unset values inherit.
fn parse_layout(props: Props<'_>, ctx: &mut ParseContext) -> GridLayout {
    let columns = ctx
        .count(props, "columns")
        .or_else(|| item_size_columns(props, ctx));

    let fit = ctx.string(props, "fit").and_then(|fit| {
        let parsed = GridFit::from_wire(&fit);
        if parsed.is_none() {
            ctx.diagnose(DiagnosticKind::Malformed, format!("unknown fit '{fit}'"));
        }
        parsed
    });

    let inset = ctx.string(props, "inset").and_then(|inset| {
        let parsed = GridInset::from_wire(&inset);
        if parsed.is_none() {
            ctx.diagnose(DiagnosticKind::Malformed, format!("unknown inset '{inset}'"));
        }
        parsed
    });

    GridLayout {
        columns,
        aspect_ratio: parse_aspect_ratio(props, ctx),
        fit,
        inset,
    }
}

/// Deprecated `itemSize`, only consulted when `columns` is absent.
fn item_size_columns(props: Props<'_>, ctx: &mut ParseContext) -> Option<u32> {
    match ctx.string(props, "itemSize")?.as_str() {
        "small" => Some(8),
        "medium" => Some(5),
        "large" => Some(3),
        other => {
            ctx.diagnose(
                DiagnosticKind::Malformed,
                format!("unknown itemSize '{other}'"),
            );
            None
        }
    }
}

/// `aspectRatio` is a number or a ratio string such as `"16/9"`.
fn parse_aspect_ratio(props: Props<'_>, ctx: &mut ParseContext) -> Option<f64> {
    let value = props.get("aspectRatio")?;
    let ratio = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_ratio(s),
        _ => None,
    };

    match ratio {
        Some(r) if r.is_finite() && r > 0.0 => Some(r),
        _ => {
            ctx.diagnose(
                DiagnosticKind::Malformed,
                format!("invalid aspectRatio ({})", json_type(value)),
            );
            None
        }
    }
}

fn parse_ratio(ratio: &str) -> Option<f64> {
    match ratio.split_once('/') {
        Some((w, h)) => {
            let w: f64 = w.trim().parse().ok()?;
            let h: f64 = h.trim().parse().ok()?;
            (h != 0.0).then(|| w / h)
        }
        None => ratio.trim().parse().ok(),
    }
}

fn parse_grid_item(node: Node<'_>, ctx: &mut ParseContext) -> Option<GridItem> {
    let props = node.props();
    let id = ctx.identity(props, "id")?;
    let (content, tooltip) = parse_content(props, ctx);

    let mut item = GridItem {
        id,
        title: ctx.string_or_default(props, "title"),
        subtitle: ctx.string_or_default(props, "subtitle"),
        content,
        tooltip,
        keywords: ctx.strings(props, "keywords"),
        action_panel: None,
    };

    for_each_child(node, ctx, |child, ctx| match child.node_type() {
        "action-panel" => item.action_panel = Some(parse_action_panel(child, ctx)),
        other => ctx.unknown_child("grid-item", other),
    });

    Some(item)
}

/// `content` is `{color}`, `{value, tooltip}` or a bare image, checked in that order.
fn parse_content(
    props: Props<'_>,
    ctx: &mut ParseContext,
) -> (Option<GridContent>, Option<String>) {
    let Some(value) = props.get("content") else {
        return (None, None);
    };

    if let Value::Object(object) = value {
        if let Some(color) = object.get("color") {
            let content = parse_color(color).map(|color| GridContent::Color { color });
            if content.is_none() {
                ctx.diagnose(
                    DiagnosticKind::Malformed,
                    "grid content color is not a recognised color".to_string(),
                );
            }
            return (content, None);
        }
        if let Some(image) = object.get("value") {
            let tooltip = object
                .get("tooltip")
                .and_then(Value::as_str)
                .map(str::to_string);
            let content = parse_image(image).map(|image| GridContent::Image { image });
            return (content, tooltip);
        }
    }

    let content = ctx
        .image(props, "content")
        .map(|image| GridContent::Image { image });
    (content, None)
}
