//! Tests for whole-document parsing and recovery from malformed input

use super::fixtures::*;
use crate::parser::DiagnosticKind;
use crate::{parse, parse_with_report};
use proptest::prelude::*;
use proptest::sample::select;
use serde_json::{Value, json};
use vista_types::{Child, FieldKind, ViewDocument, ViewKind};

#[test]
fn test_full_list_document() {
    let (doc, report) = parse_with_report(&list_node(
        json!({"navigationTitle": "Files", "onSelectionChange": "sel"}),
        vec![
            item_node("readme", "README"),
            section_node(
                "Source",
                vec![item_node("main", "main.rs"), item_node("lib", "lib.rs")],
            ),
            json!({"type": "action-panel", "children": [
                {"type": "action", "props": {"title": "Refresh", "onAction": "refresh", "shortcut": "refresh"}}
            ]}),
        ],
    ));

    assert!(report.is_clean(), "unexpected diagnostics: {:?}", report.diagnostics);
    assert_eq!(doc.kind(), ViewKind::List);
    assert_eq!(doc.navigation_title(), Some("Files"));
    let ViewDocument::List(list) = doc else {
        panic!("expected list");
    };
    assert_eq!(list.children.len(), 2);
    assert!(matches!(&list.children[1], Child::Section(s) if s.children.len() == 2));
    assert_eq!(list.actions.unwrap().entry_count(), 1);
}

#[test]
fn test_form_field_without_id_is_dropped() {
    let (doc, report) = parse_with_report(&json!({
        "type": "form",
        "children": [{"type": "text-field", "props": {}}]
    }));

    let ViewDocument::Form(form) = doc else {
        panic!("expected form");
    };
    assert_eq!(form.fields().count(), 0);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.count(DiagnosticKind::MissingId), 1);
}

#[test]
fn test_form_field_kinds() {
    let doc = parse(&json!({"type": "form", "children": [
        {"type": "text-field", "props": {"id": "name"}},
        {"type": "password-field", "props": {"id": "secret"}},
        {"type": "checkbox-field", "props": {"id": "agree", "label": "I agree"}},
        {"type": "date-picker-field", "props": {"id": "when", "type": "date"}},
        {"type": "dropdown-field", "props": {"id": "color"}, "children": [
            {"type": "dropdown-item", "props": {"title": "Red", "value": "red"}}
        ]}
    ]}));

    let ViewDocument::Form(form) = doc else {
        panic!("expected form");
    };
    let kinds: Vec<&str> = form.fields().map(|f| f.kind.type_name()).collect();
    assert_eq!(kinds.len(), 5);
    assert!(matches!(form.field("secret").unwrap().kind, FieldKind::Password));
    assert!(matches!(
        &form.field("agree").unwrap().kind,
        FieldKind::Checkbox { label: Some(label) } if label == "I agree"
    ));
    assert!(matches!(form.field("color").unwrap().kind, FieldKind::Dropdown(_)));
}

#[test]
fn test_unknown_root_is_invalid() {
    let (doc, report) = parse_with_report(&json!({"type": "carousel"}));
    assert_eq!(doc.kind(), ViewKind::Invalid);
    assert_eq!(report.count(DiagnosticKind::UnknownType), 1);

    assert_eq!(parse(&json!([1, 2, 3])).kind(), ViewKind::Invalid);
    assert_eq!(parse(&Value::Null).kind(), ViewKind::Invalid);
}

#[test]
fn test_wrong_prop_types_fall_back() {
    let (doc, report) = parse_with_report(&list_node(
        json!({"isLoading": "yes", "navigationTitle": true}),
        vec![json!({"type": "list-item", "props": {"id": 7, "title": ["not", "text"]}})],
    ));

    let ViewDocument::List(list) = doc else {
        panic!("expected list");
    };
    assert!(!list.is_loading);
    assert!(list.navigation_title.is_none());
    let Child::Item(item) = &list.children[0] else {
        panic!("expected item");
    };
    assert_eq!(item.id, "7");
    assert!(item.title.is_empty());
    assert_eq!(report.count(DiagnosticKind::Malformed), 3);
}

#[test]
fn test_duplicate_ids_are_reported_not_removed() {
    let (doc, report) = parse_with_report(&list_node(
        json!({}),
        vec![item_node("a", "First"), item_node("a", "Second")],
    ));
    let ViewDocument::List(list) = doc else {
        panic!("expected list");
    };
    assert_eq!(list.children.len(), 2);
    assert_eq!(report.count(DiagnosticKind::DuplicateId), 1);
}

const NODE_TYPES: &[&str] = &[
    "list",
    "grid",
    "form",
    "detail",
    "list-item",
    "list-section",
    "grid-item",
    "grid-section",
    "empty-view",
    "dropdown",
    "dropdown-item",
    "action-panel",
    "action-panel-section",
    "action-panel-submenu",
    "action",
    "text-field",
    "checkbox-field",
    "dropdown-field",
    "date-picker-field",
    "metadata",
    "tag-list",
    "nonsense",
];

const PROP_NAMES: &[&str] = &[
    "id",
    "title",
    "subtitle",
    "value",
    "defaultValue",
    "keywords",
    "icon",
    "shortcut",
    "filtering",
    "throttle",
    "columns",
    "aspectRatio",
    "onAction",
    "stableId",
    "accessories",
];

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        (-10.0f64..10.0).prop_map(|n| json!(n)),
        "[a-z+ ]{0,10}".prop_map(Value::String),
        prop::collection::vec("[a-z]{0,5}", 0..3).prop_map(|v| json!(v)),
    ]
}

fn arb_props() -> impl Strategy<Value = Value> {
    prop::collection::hash_map(select(PROP_NAMES), arb_scalar(), 0..6)
        .prop_map(|props| Value::Object(props.into_iter().map(|(k, v)| (k.to_string(), v)).collect()))
}

fn arb_node() -> impl Strategy<Value = Value> {
    let leaf = (select(NODE_TYPES), arb_props())
        .prop_map(|(node_type, props)| json!({"type": node_type, "props": props}));
    leaf.prop_recursive(4, 64, 6, |inner| {
        (
            select(NODE_TYPES),
            arb_props(),
            prop::collection::vec(prop_oneof![inner, arb_scalar()], 0..6),
            prop::option::of(any::<bool>()),
        )
            .prop_map(|(node_type, props, children, dirty)| {
                let mut node = json!({"type": node_type, "props": props, "children": children});
                if let Some(dirty) = dirty {
                    node["dirty"] = json!(dirty);
                }
                node
            })
    })
}

fn expected_kind(json: &Value) -> ViewKind {
    match json.get("type").and_then(Value::as_str) {
        Some("list") => ViewKind::List,
        Some("grid") => ViewKind::Grid,
        Some("form") => ViewKind::Form,
        Some("detail") => ViewKind::Detail,
        _ => ViewKind::Invalid,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn parse_is_total_and_deterministic(node in arb_node()) {
        let (doc, report) = parse_with_report(&node);
        prop_assert_eq!(doc.kind(), expected_kind(&node));
        let (again, report_again) = parse_with_report(&node);
        prop_assert_eq!(doc, again);
        prop_assert_eq!(report, report_again);
    }

    #[test]
    fn parse_never_panics_on_arbitrary_json(value in arb_scalar()) {
        prop_assert_eq!(parse(&value).kind(), ViewKind::Invalid);
    }
}
