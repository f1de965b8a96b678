//! Form documents.
//!
//! Fields are addressed by `id` everywhere (values, focus, submission), so a
//! parsed field always has one.

use serde::Serialize;
use serde_json::Value;

use crate::Handler;
use crate::action::ActionPanelModel;
use crate::list::DropdownModel;

/// Attributes every field kind carries.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FieldBase {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Controlled value, wins over local state on every render
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    pub store_value: bool,
    pub auto_focus: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_change: Option<Handler>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_blur: Option<Handler>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_focus: Option<Handler>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePickerKind {
    #[default]
    Date,
    DateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "field_type", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Password,
    TextArea,
    Checkbox {
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Dropdown(DropdownModel),
    FilePicker {
        allow_multiple_selection: bool,
        can_choose_directories: bool,
        can_choose_files: bool,
        show_hidden_files: bool,
    },
    DatePicker {
        kind: DatePickerKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<String>,
    },
}

impl FieldKind {
    /// Wire type name, used to detect a field changing kind between renders.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text => "text-field",
            Self::Password => "password-field",
            Self::TextArea => "text-area-field",
            Self::Checkbox { .. } => "checkbox-field",
            Self::Dropdown(_) => "dropdown-field",
            Self::FilePicker { .. } => "file-picker-field",
            Self::DatePicker { .. } => "date-picker-field",
        }
    }

    /// Value a field of this kind holds before anything sets it.
    #[must_use]
    pub fn empty_value(&self) -> Value {
        match self {
            Self::Text | Self::Password | Self::TextArea => Value::String(String::new()),
            Self::Checkbox { .. } => Value::Bool(false),
            Self::FilePicker { .. } => Value::Array(Vec::new()),
            Self::Dropdown(dropdown) => dropdown
                .first_item()
                .map_or(Value::Null, |item| Value::String(item.value.clone())),
            Self::DatePicker { .. } => Value::Null,
        }
    }

    /// Text-like fields commit their value on every change.
    #[must_use]
    pub fn is_text_like(&self) -> bool {
        matches!(self, Self::Text | Self::Password | Self::TextArea)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    #[serde(flatten)]
    pub base: FieldBase,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl Field {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.base.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormItem {
    Field(Field),
    Description {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        text: String,
    },
    Separator,
}

/// Search bar link shown in place of the search input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkAccessory {
    pub text: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FormModel {
    pub is_loading: bool,
    pub enable_drafts: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_accessory: Option<LinkAccessory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<ActionPanelModel>,
    pub items: Vec<FormItem>,
}

impl FormModel {
    /// Fields in document order, skipping descriptions and separators.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.items.iter().filter_map(|item| match item {
            FormItem::Field(field) => Some(field),
            _ => None,
        })
    }

    #[must_use]
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.items.iter().rev().find_map(|item| match item {
            FormItem::Field(field) if field.id() == id => Some(field),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(id: &str, kind: FieldKind) -> FormItem {
        FormItem::Field(Field {
            base: FieldBase {
                id: id.to_string(),
                ..Default::default()
            },
            kind,
        })
    }

    #[test]
    fn test_fields_skip_decorations() {
        let form = FormModel {
            items: vec![
                FormItem::Description {
                    title: None,
                    text: "hello".to_string(),
                },
                field("name", FieldKind::Text),
                FormItem::Separator,
                field("agree", FieldKind::Checkbox { label: None }),
            ],
            ..Default::default()
        };
        let ids: Vec<_> = form.fields().map(Field::id).collect();
        assert_eq!(ids, vec!["name", "agree"]);
        assert!(form.field("agree").is_some());
        assert!(form.field("missing").is_none());
    }

    #[test]
    fn test_empty_values_per_kind() {
        assert_eq!(FieldKind::Text.empty_value(), json!(""));
        assert_eq!(FieldKind::Checkbox { label: None }.empty_value(), json!(false));
        assert_eq!(
            FieldKind::DatePicker {
                kind: DatePickerKind::Date,
                min: None,
                max: None
            }
            .empty_value(),
            Value::Null
        );
        assert_eq!(
            FieldKind::Dropdown(DropdownModel::default()).empty_value(),
            Value::Null
        );
    }

    #[test]
    fn test_type_names_distinguish_kinds() {
        assert_ne!(
            FieldKind::Text.type_name(),
            FieldKind::Password.type_name()
        );
        assert_eq!(FieldKind::TextArea.type_name(), "text-area-field");
    }
}
