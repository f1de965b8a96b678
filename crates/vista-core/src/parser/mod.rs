//! Wire JSON to typed view documents.
//!
//! Every node on the wire has the shape `{type, props, children, dirty?}`.
//! Parsing is total: anything malformed degrades to a default or is dropped,
//! and each such decision is recorded as a [`ParseDiagnostic`] and logged.
//! Nothing in here returns an error.

mod action;
mod detail;
mod dropdown;
mod form;
mod grid;
mod list;
pub mod media;

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};
use vista_types::{Child, ColorLike, ImageLike, Section, ViewDocument};

/// Category of a recovered parse problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Field present with the wrong JSON type, or a node that is not an object
    Malformed,
    /// `type` string this parser does not know
    UnknownType,
    /// Item or field without its required identity; the node is dropped
    MissingId,
    /// Identity seen twice in one document; lookups resolve to the last one
    DuplicateId,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Malformed => "malformed",
            Self::UnknownType => "unknown type",
            Self::MissingId => "missing id",
            Self::DuplicateId => "duplicate id",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseDiagnostic {
    pub kind: DiagnosticKind,
    /// Slash separated node path, e.g. `list/list-section[1]/list-item[0]`
    pub path: String,
    pub message: String,
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.kind, self.path, self.message)
    }
}

/// Everything the parser had to recover from while building one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    pub diagnostics: Vec<ParseDiagnostic>,
}

impl ParseReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    #[must_use]
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }
}

/// Parse a render payload. Never fails.
#[must_use]
pub fn parse(json: &Value) -> ViewDocument {
    parse_with_report(json).0
}

/// Parse a render payload and return the recovered problems alongside it.
#[must_use]
pub fn parse_with_report(json: &Value) -> (ViewDocument, ParseReport) {
    let mut ctx = ParseContext::default();
    let document = parse_root(json, &mut ctx);
    debug!(
        kind = %document.kind(),
        diagnostics = ctx.report.diagnostics.len(),
        "Parsed view document"
    );
    (document, ctx.report)
}

fn parse_root(json: &Value, ctx: &mut ParseContext) -> ViewDocument {
    let Some(node) = Node::new(json) else {
        ctx.diagnose(
            DiagnosticKind::Malformed,
            "root node is not an object".to_string(),
        );
        return ViewDocument::default();
    };

    let node_type = node.node_type();
    ctx.scoped(node_type, |ctx| match node_type {
        "list" => ViewDocument::List(list::parse_list(node, ctx)),
        "grid" => ViewDocument::Grid(grid::parse_grid(node, ctx)),
        "form" => ViewDocument::Form(form::parse_form(node, ctx)),
        "detail" => ViewDocument::Detail(detail::parse_detail(node, ctx)),
        other => {
            ctx.diagnose(
                DiagnosticKind::UnknownType,
                format!("unknown root type '{other}'"),
            );
            ViewDocument::Invalid {
                node_type: other.to_string(),
            }
        }
    })
}

/// Parse state for one document: the current node path, identities seen so
/// far and the collected diagnostics.
#[derive(Debug, Default)]
pub(crate) struct ParseContext {
    path: Vec<String>,
    seen_ids: HashSet<String>,
    report: ParseReport,
}

impl ParseContext {
    pub(crate) fn diagnose(&mut self, kind: DiagnosticKind, message: String) {
        let path = self.path.join("/");
        warn!(%kind, %path, "{message}");
        self.report.diagnostics.push(ParseDiagnostic {
            kind,
            path,
            message,
        });
    }

    /// Run `f` with `segment` pushed onto the node path.
    pub(crate) fn scoped<T>(
        &mut self,
        segment: impl Into<String>,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        self.path.push(segment.into());
        let result = f(self);
        self.path.pop();
        result
    }

    /// Required identity of an item or field. `None` means the node must be dropped.
    pub(crate) fn identity(&mut self, props: Props<'_>, key: &str) -> Option<String> {
        let id = match props.get(key) {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => {
                self.diagnose(
                    DiagnosticKind::MissingId,
                    format!("'{key}' must be a string, got {}", json_type(other)),
                );
                return None;
            }
            None => {
                self.diagnose(
                    DiagnosticKind::MissingId,
                    format!("node without '{key}': skipping"),
                );
                return None;
            }
        };

        if !self.seen_ids.insert(id.clone()) {
            self.diagnose(
                DiagnosticKind::DuplicateId,
                format!("duplicate {key} '{id}', last one wins"),
            );
        }
        Some(id)
    }

    pub(crate) fn string(&mut self, props: Props<'_>, key: &str) -> Option<String> {
        match props.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            other => {
                self.wrong_type(key, "a string", other);
                None
            }
        }
    }

    pub(crate) fn string_or_default(&mut self, props: Props<'_>, key: &str) -> String {
        self.string(props, key).unwrap_or_default()
    }

    pub(crate) fn flag(&mut self, props: Props<'_>, key: &str) -> Option<bool> {
        match props.get(key)? {
            Value::Bool(b) => Some(*b),
            other => {
                self.wrong_type(key, "a boolean", other);
                None
            }
        }
    }

    pub(crate) fn number(&mut self, props: Props<'_>, key: &str) -> Option<f64> {
        match props.get(key)? {
            Value::Number(n) => n.as_f64(),
            other => {
                self.wrong_type(key, "a number", other);
                None
            }
        }
    }

    pub(crate) fn count(&mut self, props: Props<'_>, key: &str) -> Option<u32> {
        let value = self.number(props, key)?;
        if value >= 1.0 && value <= f64::from(u32::MAX) {
            // Fractional counts truncate; range checked above
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let count = value as u32;
            Some(count)
        } else {
            self.diagnose(
                DiagnosticKind::Malformed,
                format!("'{key}' must be a positive count, got {value}"),
            );
            None
        }
    }

    /// String list such as `keywords`. Non-string entries are skipped.
    pub(crate) fn strings(&mut self, props: Props<'_>, key: &str) -> Vec<String> {
        match props.get(key) {
            None => Vec::new(),
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(|value| match value {
                    Value::String(s) => Some(s.clone()),
                    other => {
                        self.wrong_type(key, "a string entry", other);
                        None
                    }
                })
                .collect(),
            Some(other) => {
                self.wrong_type(key, "an array", other);
                Vec::new()
            }
        }
    }

    pub(crate) fn image(&mut self, props: Props<'_>, key: &str) -> Option<ImageLike> {
        let value = props.get(key)?;
        let image = media::parse_image(value);
        if image.is_none() {
            self.diagnose(
                DiagnosticKind::Malformed,
                format!("'{key}' is not a recognised image"),
            );
        }
        image
    }

    pub(crate) fn color(&mut self, props: Props<'_>, key: &str) -> Option<ColorLike> {
        let value = props.get(key)?;
        let color = media::parse_color(value);
        if color.is_none() {
            self.diagnose(
                DiagnosticKind::Malformed,
                format!("'{key}' is not a recognised color"),
            );
        }
        color
    }

    pub(crate) fn unknown_child(&mut self, parent: &str, child_type: &str) {
        self.diagnose(
            DiagnosticKind::UnknownType,
            format!("unknown child '{child_type}' in {parent}: skipping"),
        );
    }

    fn wrong_type(&mut self, key: &str, expected: &str, found: &Value) {
        self.diagnose(
            DiagnosticKind::Malformed,
            format!("'{key}' should be {expected}, got {}", json_type(found)),
        );
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Borrowed view of one `{type, props, children}` node.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Node<'a> {
    object: &'a Map<String, Value>,
}

impl<'a> Node<'a> {
    pub(crate) fn new(value: &'a Value) -> Option<Self> {
        value.as_object().map(|object| Self { object })
    }

    pub(crate) fn node_type(self) -> &'a str {
        self.object
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub(crate) fn props(self) -> Props<'a> {
        Props {
            map: self.object.get("props").and_then(Value::as_object),
        }
    }

    pub(crate) fn dirty(self, default: bool) -> bool {
        self.object
            .get("dirty")
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }

    /// Raw child values; non-array `children` counts as none.
    pub(crate) fn raw_children(self) -> &'a [Value] {
        self.object
            .get("children")
            .and_then(Value::as_array)
            .map_or(&[], Vec::as_slice)
    }
}

/// Iterate the object children of `node`, each scoped under `type[index]`.
///
/// Non-object children are reported and skipped.
pub(crate) fn for_each_child<'a>(
    node: Node<'a>,
    ctx: &mut ParseContext,
    mut f: impl FnMut(Node<'a>, &mut ParseContext),
) {
    for (index, value) in node.raw_children().iter().enumerate() {
        let Some(child) = Node::new(value) else {
            ctx.diagnose(
                DiagnosticKind::Malformed,
                format!("child {index} is a {}, expected an object", json_type(value)),
            );
            continue;
        };
        ctx.scoped(format!("{}[{index}]", child.node_type()), |ctx| f(child, ctx));
    }
}

/// Props of one node. Absent `props` and `null` values read as missing.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Props<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Props<'a> {
    pub(crate) fn get(self, key: &str) -> Option<&'a Value> {
        self.map?.get(key).filter(|value| !value.is_null())
    }

    pub(crate) fn has(self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Parse an explicit section: title, subtitle and items of `item_type`.
pub(crate) fn parse_section<I>(
    node: Node<'_>,
    ctx: &mut ParseContext,
    item_type: &str,
    mut parse_item: impl FnMut(Node<'_>, &mut ParseContext) -> Option<I>,
) -> Section<I> {
    let props = node.props();
    let mut section = Section {
        title: ctx.string_or_default(props, "title"),
        subtitle: ctx.string_or_default(props, "subtitle"),
        ..Section::default()
    };

    let section_type = node.node_type().to_string();
    for_each_child(node, ctx, |child, ctx| {
        if child.node_type() == item_type {
            if let Some(item) = parse_item(child, ctx) {
                section.children.push(item);
            }
        } else {
            ctx.unknown_child(&section_type, child.node_type());
        }
    });

    section
}

/// Route a top-level list-like child that is an item or a section.
///
/// Returns `false` when `node` is neither, leaving it to the caller.
pub(crate) fn push_item_or_section<I>(
    children: &mut Vec<Child<I>>,
    node: Node<'_>,
    ctx: &mut ParseContext,
    item_type: &str,
    section_type: &str,
    mut parse_item: impl FnMut(Node<'_>, &mut ParseContext) -> Option<I>,
) -> bool {
    let node_type = node.node_type();
    if node_type == item_type {
        if let Some(item) = parse_item(node, ctx) {
            children.push(Child::Item(item));
        }
        true
    } else if node_type == section_type {
        children.push(Child::Section(parse_section(
            node, ctx, item_type, parse_item,
        )));
        true
    } else {
        false
    }
}
