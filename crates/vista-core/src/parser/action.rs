use serde_json::Value;
use vista_types::{
    ActionKind, ActionModel, ActionPanelChild, ActionPanelModel, ActionSectionItem,
    ActionSectionModel, ShortcutSpec, SubmenuFiltering, SubmenuModel,
};

use super::{DiagnosticKind, Node, ParseContext, Props, for_each_child, json_type};

/// Parse an `action-panel` node.
pub(crate) fn parse_action_panel(node: Node<'_>, ctx: &mut ParseContext) -> ActionPanelModel {
    let props = node.props();
    let mut panel = ActionPanelModel {
        title: ctx.string(props, "title"),
        stable_id: ctx.string(props, "stableId"),
        dirty: node.dirty(false),
        children: Vec::new(),
    };

    for_each_child(node, ctx, |child, ctx| match child.node_type() {
        "action" => panel
            .children
            .push(ActionPanelChild::Action(parse_action(child, ctx))),
        "action-panel-section" => panel
            .children
            .push(ActionPanelChild::Section(parse_section(child, ctx))),
        "action-panel-submenu" => panel
            .children
            .push(ActionPanelChild::Submenu(parse_submenu(child, ctx))),
        other => ctx.unknown_child("action-panel", other),
    });

    panel
}

fn parse_section(node: Node<'_>, ctx: &mut ParseContext) -> ActionSectionModel {
    let mut section = ActionSectionModel {
        title: ctx.string(node.props(), "title"),
        items: Vec::new(),
    };

    for_each_child(node, ctx, |child, ctx| match child.node_type() {
        "action" => section
            .items
            .push(ActionSectionItem::Action(parse_action(child, ctx))),
        "action-panel-submenu" => section
            .items
            .push(ActionSectionItem::Submenu(parse_submenu(child, ctx))),
        other => ctx.unknown_child("action-panel-section", other),
    });

    section
}

fn parse_submenu(node: Node<'_>, ctx: &mut ParseContext) -> SubmenuModel {
    let props = node.props();
    let mut submenu = SubmenuModel {
        title: ctx.string_or_default(props, "title"),
        icon: ctx.image(props, "icon"),
        shortcut: parse_shortcut(props, ctx),
        on_open: ctx.string(props, "onOpen"),
        on_search_text_change: ctx.string(props, "onSearchTextChange"),
        auto_focus: ctx.flag(props, "autoFocus").unwrap_or(false),
        filtering: parse_submenu_filtering(props, ctx),
        is_loading: ctx.flag(props, "isLoading").unwrap_or(false),
        throttle: ctx.flag(props, "throttle").unwrap_or(false),
        stable_id: ctx.string(props, "stableId"),
        children: Vec::new(),
    };

    for_each_child(node, ctx, |child, ctx| match child.node_type() {
        "action" => submenu
            .children
            .push(ActionPanelChild::Action(parse_action(child, ctx))),
        "action-panel-section" => submenu
            .children
            .push(ActionPanelChild::Section(parse_section(child, ctx))),
        "action-panel-submenu" => submenu
            .children
            .push(ActionPanelChild::Submenu(parse_submenu(child, ctx))),
        other => ctx.unknown_child("action-panel-submenu", other),
    });

    submenu
}

fn parse_submenu_filtering(props: Props<'_>, ctx: &mut ParseContext) -> Option<SubmenuFiltering> {
    match props.get("filtering")? {
        Value::Bool(enabled) => Some(SubmenuFiltering {
            enabled: *enabled,
            keep_section_order: false,
        }),
        Value::Object(object) => Some(SubmenuFiltering {
            enabled: true,
            keep_section_order: object
                .get("keepSectionOrder")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }),
        other => {
            ctx.diagnose(
                DiagnosticKind::Malformed,
                format!(
                    "'filtering' should be a boolean or object, got {}",
                    json_type(other)
                ),
            );
            None
        }
    }
}

fn parse_action(node: Node<'_>, ctx: &mut ParseContext) -> ActionModel {
    let props = node.props();
    ActionModel {
        title: ctx.string_or_default(props, "title"),
        on_action: ctx.string_or_default(props, "onAction"),
        on_submit: ctx.string(props, "onSubmit"),
        kind: ctx
            .string(props, "type")
            .map_or(ActionKind::Callback, |kind| ActionKind::from_wire(&kind)),
        shortcut: parse_shortcut(props, ctx),
        icon: ctx.image(props, "icon"),
        quicklink: props.get("quicklink").filter(|q| q.is_object()).cloned(),
        stable_id: ctx.string(props, "stableId"),
    }
}

/// `shortcut` is either a name / `mod+key` string or `{key, modifiers}`.
fn parse_shortcut(props: Props<'_>, ctx: &mut ParseContext) -> Option<ShortcutSpec> {
    match props.get("shortcut")? {
        Value::String(name) => Some(ShortcutSpec::Named { name: name.clone() }),
        Value::Object(object) => {
            let Some(key) = object.get("key").and_then(Value::as_str) else {
                ctx.diagnose(
                    DiagnosticKind::Malformed,
                    "shortcut object without 'key'".to_string(),
                );
                return None;
            };
            let modifiers = object
                .get("modifiers")
                .and_then(Value::as_array)
                .map(|mods| {
                    mods.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            Some(ShortcutSpec::Keys {
                key: key.to_string(),
                modifiers,
            })
        }
        other => {
            ctx.diagnose(
                DiagnosticKind::Malformed,
                format!("'shortcut' should be a string or object, got {}", json_type(other)),
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: &Value) -> (ActionPanelModel, ParseContext) {
        let mut ctx = ParseContext::default();
        let panel = parse_action_panel(Node::new(value).unwrap(), &mut ctx);
        (panel, ctx)
    }

    #[test]
    fn test_panel_structure() {
        let (panel, ctx) = parse(&json!({
            "type": "action-panel",
            "props": {"title": "Actions", "stableId": "panel-1"},
            "children": [
                {"type": "action", "props": {"title": "Open", "onAction": "h1"}},
                {"type": "action-panel-section", "props": {"title": "More"}, "children": [
                    {"type": "action", "props": {"title": "Copy", "onAction": "h2", "shortcut": "copy"}},
                    {"type": "action-panel-submenu", "props": {"title": "Sub"}, "children": []}
                ]}
            ]
        }));

        assert!(ctx.report.is_clean());
        assert_eq!(panel.title.as_deref(), Some("Actions"));
        assert_eq!(panel.stable_id.as_deref(), Some("panel-1"));
        assert!(!panel.dirty);
        assert_eq!(panel.children.len(), 2);
        assert_eq!(panel.entry_count(), 3);

        let ActionPanelChild::Section(section) = &panel.children[1] else {
            panic!("expected section");
        };
        let ActionSectionItem::Action(copy) = &section.items[0] else {
            panic!("expected action");
        };
        assert_eq!(
            copy.shortcut,
            Some(ShortcutSpec::Named {
                name: "copy".to_string()
            })
        );
    }

    #[test]
    fn test_action_props() {
        let (panel, _) = parse(&json!({
            "type": "action-panel",
            "children": [{"type": "action", "props": {
                "title": "Save link",
                "onAction": "h1",
                "onSubmit": "h2",
                "type": "create-quicklink",
                "quicklink": {"link": "https://example.com"},
                "shortcut": {"key": "s", "modifiers": ["ctrl", "shift"]},
                "icon": "link"
            }}]
        }));

        let ActionPanelChild::Action(action) = &panel.children[0] else {
            panic!("expected action");
        };
        assert_eq!(action.kind, ActionKind::CreateQuicklink);
        assert_eq!(action.on_submit.as_deref(), Some("h2"));
        assert_eq!(action.quicklink, Some(json!({"link": "https://example.com"})));
        assert_eq!(
            action.shortcut,
            Some(ShortcutSpec::Keys {
                key: "s".to_string(),
                modifiers: vec!["ctrl".to_string(), "shift".to_string()]
            })
        );
        assert!(action.icon.is_some());
    }

    #[test]
    fn test_action_type_defaults_to_callback() {
        let (panel, _) = parse(&json!({
            "type": "action-panel",
            "children": [{"type": "action", "props": {"title": "Run"}}]
        }));
        let ActionPanelChild::Action(action) = &panel.children[0] else {
            panic!("expected action");
        };
        assert_eq!(action.kind, ActionKind::Callback);
        assert_eq!(action.on_action, "");
    }

    #[test]
    fn test_submenu_filtering_variants() {
        let (panel, _) = parse(&json!({
            "type": "action-panel",
            "children": [
                {"type": "action-panel-submenu", "props": {"title": "A", "filtering": false}},
                {"type": "action-panel-submenu", "props": {"title": "B", "filtering": {"keepSectionOrder": true}}},
                {"type": "action-panel-submenu", "props": {"title": "C"}}
            ]
        }));

        let filterings: Vec<_> = panel
            .children
            .iter()
            .map(|child| match child {
                ActionPanelChild::Submenu(sub) => sub.filtering,
                _ => panic!("expected submenu"),
            })
            .collect();
        assert_eq!(
            filterings,
            vec![
                Some(SubmenuFiltering {
                    enabled: false,
                    keep_section_order: false
                }),
                Some(SubmenuFiltering {
                    enabled: true,
                    keep_section_order: true
                }),
                None
            ]
        );
    }

    #[test]
    fn test_unknown_children_are_reported() {
        let (panel, ctx) = parse(&json!({
            "type": "action-panel",
            "dirty": true,
            "children": [{"type": "action-button"}, {"type": "action", "props": {"title": "Ok"}}]
        }));
        assert!(panel.dirty);
        assert_eq!(panel.children.len(), 1);
        assert_eq!(ctx.report.count(DiagnosticKind::UnknownType), 1);
    }

    #[test]
    fn test_shortcut_without_key_is_dropped() {
        let (panel, ctx) = parse(&json!({
            "type": "action-panel",
            "children": [{"type": "action", "props": {"title": "x", "shortcut": {"modifiers": ["ctrl"]}}}]
        }));
        let ActionPanelChild::Action(action) = &panel.children[0] else {
            panic!("expected action");
        };
        assert!(action.shortcut.is_none());
        assert_eq!(ctx.report.count(DiagnosticKind::Malformed), 1);
    }
}
