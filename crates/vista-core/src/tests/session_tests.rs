//! Tests for a whole view session: render cycles, search, navigation and forms

use super::fixtures::*;
use crate::config::Config;
use crate::parse;
use crate::reconcile::{SectionChange, SelectionEvent};
use crate::session::ViewSession;
use serde_json::json;
use std::time::{Duration, Instant};
use vista_types::Notification;

fn grid_node(props: serde_json::Value, ids: &[&str]) -> serde_json::Value {
    let children: Vec<_> = ids
        .iter()
        .map(|id| json!({"type": "grid-item", "props": {"id": id, "title": id}}))
        .collect();
    json!({"type": "grid", "props": props, "children": children})
}

#[test]
fn test_extension_rerender_keeps_user_place() {
    let mut sent = Vec::new();
    let mut session = ViewSession::new(Config::default(), &mut sent);

    session.render(parse(&list_node(
        json!({"onSelectionChange": "sel"}),
        vec![
            item_node("a", "Alpha"),
            section_node("Tools", vec![item_node("c", "Gamma"), item_node("b", "Beta")]),
        ],
    )));
    session.select_last();

    let result = session.render(parse(&list_node(
        json!({"onSelectionChange": "sel"}),
        vec![
            item_node("a", "Alpha"),
            item_node("b", "Beta"),
            section_node("Tools", vec![item_node("c", "Gamma")]),
        ],
    )));
    let selection = result.selection.unwrap();
    assert_eq!((selection.id.as_str(), selection.section, selection.index), ("b", 0, 1));
    assert!(matches!(
        &result.changes[..],
        [SectionChange::Update { index: 0, .. }, SectionChange::Update { index: 1, .. }]
    ));

    drop(session);
    assert_eq!(handler_names(&sent), vec!["sel", "sel"]);
    assert_eq!(sent[1].args, vec![json!("b")]);
}

#[test]
fn test_grid_session_uses_configured_columns() {
    let mut config = Config::default();
    config.grid.columns = 4;
    let mut session = ViewSession::new(config, Vec::<Notification>::new());

    let result = session.render(parse(&grid_node(json!({}), &["a", "b"])));
    let [SectionChange::Reset { sections }] = &result.changes[..] else {
        panic!("expected reset");
    };
    assert_eq!(sections[0].columns, Some(4));

    let result = session.render(parse(&grid_node(json!({"columns": 2}), &["a", "b"])));
    assert!(matches!(
        &result.changes[..],
        [SectionChange::Update { index: 0, section }] if section.columns == Some(2)
    ));
}

#[test]
fn test_throttled_selection_reported_once_per_settle() {
    let mut session = ViewSession::new(Config::default(), Vec::<Notification>::new());
    session.render(parse(&list_node(
        json!({"throttle": true, "onSelectionChange": "sel"}),
        vec![
            item_node("apple", "Apple"),
            item_node("apricot", "Apricot"),
            item_node("banana", "Banana"),
        ],
    )));
    let start = Instant::now();
    for (i, text) in ["b", "ba", "ban"].into_iter().enumerate() {
        let at = start + Duration::from_millis(100 * i as u64);
        assert!(session.set_search_text(text, at).is_none());
    }
    assert_eq!(
        session.next_deadline(),
        Some(start + Duration::from_millis(500))
    );
    session.poll(start + Duration::from_millis(600)).unwrap();

    let selections: Vec<_> = session
        .notifier()
        .iter()
        .map(|n| n.args[0].clone())
        .collect();
    assert_eq!(selections, vec![json!("apple"), json!("banana")]);
}

#[test]
fn test_reconciliation_wire_shape() {
    let mut session = ViewSession::new(Config::default(), Vec::<Notification>::new());
    let result = session.render(parse(&list_node(json!({}), vec![item_node("a", "Alpha")])));

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["changes"][0]["op"], json!("reset"));
    assert_eq!(value["changes"][0]["sections"][0]["item_count"], json!(1));
    assert_eq!(value["selection"]["id"], json!("a"));
    assert_eq!(value["event"]["event"], json!("changed"));
}

#[test]
fn test_detail_view_has_no_collection() {
    let mut session = ViewSession::new(Config::default(), Vec::<Notification>::new());
    let result = session.render(parse(&json!({"type": "detail", "props": {"markdown": "# Hi"}})));

    assert!(matches!(&result.changes[..], [SectionChange::Reset { sections }] if sections.is_empty()));
    assert!(result.selection.is_none());
    assert!(session.select_next().is_none());
    assert!(session.actions().is_none());
}

#[test]
fn test_swap_back_to_list_starts_fresh() {
    let mut session = ViewSession::new(Config::default(), Vec::<Notification>::new());
    let list = || parse(&list_node(json!({}), vec![item_node("a", "A"), item_node("b", "B")]));
    session.render(list());
    session.select_next();
    session.render(parse(&json!({"type": "detail"})));

    let result = session.render(list());
    assert!(matches!(&result.changes[..], [SectionChange::Reset { .. }]));
    assert!(matches!(
        result.event,
        Some(SelectionEvent::Changed { ref selection }) if selection.id == "a"
    ));
}

#[test]
fn test_form_session_through_view() {
    let mut session = ViewSession::new(Config::default(), Vec::<Notification>::new());
    session.render(parse(&json!({"type": "form", "children": [
        {"type": "text-field", "props": {"id": "title", "defaultValue": "Untitled", "onChange": "changed"}},
        {"type": "dropdown-field", "props": {"id": "color", "onBlur": "left"}, "children": [
            {"type": "dropdown-item", "props": {"title": "Red", "value": "red"}},
            {"type": "dropdown-item", "props": {"title": "Blue", "value": "blue"}}
        ]}
    ]})));

    assert_eq!(session.form().value("title"), Some(&json!("Untitled")));
    assert_eq!(session.form().value("color"), Some(&json!("red")));
    assert_eq!(session.form().focused(), Some("title"));

    session.set_field_value("title", json!("Groceries")).unwrap();
    session.focus_field("color").unwrap();
    session.blur_field("color").unwrap();
    assert!(session.set_field_value("nope", json!(1)).is_err());

    assert_eq!(handler_names(session.notifier()), vec!["changed", "left"]);
}

#[test]
fn test_dropdown_search_keeps_list_selection() {
    let document = || {
        let mut children = vec![item_node("a", "Alpha"), item_node("b", "Beta")];
        children.push(json!({"type": "dropdown", "props": {"onSearchTextChange": "query"}, "children": [
            {"type": "dropdown-item", "props": {"title": "All", "value": "all"}}
        ]}));
        parse(&list_node(json!({}), children))
    };
    let mut session = ViewSession::new(Config::default(), Vec::<Notification>::new());
    session.render(document());
    session.select_id("b");

    session.dropdown_search_changed("x");
    let result = session.render(document());

    assert_eq!(result.selection.unwrap().id, "b");
    assert!(result.event.is_none());
    assert_eq!(
        session.notifier().last(),
        Some(&Notification::new("query", vec![json!("x")]))
    );
}

#[test]
fn test_submenu_search_keeps_list_selection() {
    let document = || {
        parse(&list_node(
            json!({}),
            vec![
                item_node("a", "Alpha"),
                json!({"type": "list-item", "props": {"id": "b", "title": "Beta"}, "children": [
                    {"type": "action-panel", "children": [
                        {"type": "action-panel-submenu", "props": {"title": "Move", "onSearchTextChange": "folders"}, "children": [
                            {"type": "action", "props": {"title": "Docs", "onAction": "docs"}}
                        ]}
                    ]}
                ]}),
            ],
        ))
    };
    let mut session = ViewSession::new(Config::default(), Vec::<Notification>::new());
    session.render(document());
    session.select_id("b");

    let actions = session.actions().unwrap();
    let submenu = &actions.primary().unwrap().invocation;
    session.search_submenu(submenu, "do").unwrap();
    let result = session.render(document());

    assert_eq!(result.selection.unwrap().id, "b");
    assert_eq!(handler_names(session.notifier()), vec!["folders"]);
}
