use vista_types::{DropdownItem, DropdownModel};

use super::{
    DiagnosticKind, Node, ParseContext, for_each_child, push_item_or_section,
};

/// Parse a `dropdown` (search bar accessory) or `dropdown-field` node.
///
/// Local filtering defaults to on unless the extension listens to the
/// dropdown's own search text.
pub(crate) fn parse_dropdown(node: Node<'_>, ctx: &mut ParseContext) -> DropdownModel {
    let props = node.props();
    let on_search_text_change = ctx.string(props, "onSearchTextChange");
    let filtering = ctx
        .flag(props, "filtering")
        .unwrap_or(on_search_text_change.is_none());

    let mut dropdown = DropdownModel {
        id: ctx.string(props, "id"),
        tooltip: ctx.string(props, "tooltip"),
        placeholder: ctx.string(props, "placeholder"),
        value: ctx.string(props, "value"),
        default_value: ctx.string(props, "defaultValue"),
        filtering,
        throttle: ctx.flag(props, "throttle").unwrap_or(false),
        is_loading: ctx.flag(props, "isLoading").unwrap_or(false),
        on_change: ctx.string(props, "onChange"),
        on_search_text_change,
        children: Vec::new(),
    };

    let parent = node.node_type().to_string();
    for_each_child(node, ctx, |child, ctx| {
        let routed = push_item_or_section(
            &mut dropdown.children,
            child,
            ctx,
            "dropdown-item",
            "dropdown-section",
            parse_dropdown_item,
        );
        if !routed {
            ctx.unknown_child(&parent, child.node_type());
        }
    });

    dropdown
}

fn parse_dropdown_item(node: Node<'_>, ctx: &mut ParseContext) -> Option<DropdownItem> {
    let props = node.props();
    let Some(value) = ctx.string(props, "value") else {
        ctx.diagnose(
            DiagnosticKind::MissingId,
            "dropdown item without 'value': skipping".to_string(),
        );
        return None;
    };

    Some(DropdownItem {
        title: ctx.string_or_default(props, "title"),
        value,
        icon: ctx.image(props, "icon"),
        keywords: ctx.strings(props, "keywords"),
    })
}
