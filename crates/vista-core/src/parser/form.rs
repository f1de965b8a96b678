use vista_types::{
    DatePickerKind, Field, FieldBase, FieldKind, FormItem, FormModel, LinkAccessory,
};

use super::action::parse_action_panel;
use super::dropdown::parse_dropdown;
use super::{Node, ParseContext, Props, for_each_child};

const FIELD_TYPES: [&str; 7] = [
    "text-field",
    "password-field",
    "text-area-field",
    "checkbox-field",
    "dropdown-field",
    "file-picker-field",
    "date-picker-field",
];

pub(crate) fn parse_form(node: Node<'_>, ctx: &mut ParseContext) -> FormModel {
    let props = node.props();
    let mut form = FormModel {
        is_loading: ctx.flag(props, "isLoading").unwrap_or(false),
        enable_drafts: ctx.flag(props, "enableDrafts").unwrap_or(false),
        navigation_title: ctx.string(props, "navigationTitle"),
        ..FormModel::default()
    };

    for_each_child(node, ctx, |child, ctx| {
        let props = child.props();
        match child.node_type() {
            "action-panel" => form.actions = Some(parse_action_panel(child, ctx)),
            "separator" => form.items.push(FormItem::Separator),
            "form-description" => form.items.push(FormItem::Description {
                title: ctx.string(props, "title"),
                text: ctx.string_or_default(props, "text"),
            }),
            "link-accessory" => {
                form.link_accessory = Some(LinkAccessory {
                    text: ctx.string_or_default(props, "text"),
                    target: ctx.string_or_default(props, "target"),
                });
            }
            field_type if FIELD_TYPES.contains(&field_type) => {
                if let Some(field) = parse_field(child, ctx) {
                    form.items.push(FormItem::Field(field));
                }
            }
            other => ctx.unknown_child("form", other),
        }
    });

    form
}

/// Fields are addressed by id, so one without is dropped.
fn parse_field(node: Node<'_>, ctx: &mut ParseContext) -> Option<Field> {
    let props = node.props();
    let id = ctx.identity(props, "id")?;

    let base = FieldBase {
        id,
        title: ctx.string(props, "title"),
        error: ctx.string(props, "error"),
        info: ctx.string(props, "info"),
        placeholder: ctx.string(props, "placeholder"),
        value: props.get("value").cloned(),
        default_value: props.get("defaultValue").cloned(),
        store_value: ctx.flag(props, "storeValue").unwrap_or(false),
        auto_focus: ctx.flag(props, "autoFocus").unwrap_or(false),
        on_change: ctx.string(props, "onChange"),
        on_blur: ctx.string(props, "onBlur"),
        on_focus: ctx.string(props, "onFocus"),
    };

    let kind = match node.node_type() {
        "password-field" => FieldKind::Password,
        "text-area-field" => FieldKind::TextArea,
        "checkbox-field" => FieldKind::Checkbox {
            label: ctx.string(props, "label"),
        },
        "dropdown-field" => FieldKind::Dropdown(parse_dropdown(node, ctx)),
        "file-picker-field" => parse_file_picker(props, ctx),
        "date-picker-field" => FieldKind::DatePicker {
            kind: match ctx.string(props, "type").as_deref() {
                Some("datetime" | "dateTime" | "date-time") => DatePickerKind::DateTime,
                _ => DatePickerKind::Date,
            },
            min: ctx.string(props, "min"),
            max: ctx.string(props, "max"),
        },
        _ => FieldKind::Text,
    };

    Some(Field { base, kind })
}

fn parse_file_picker(props: Props<'_>, ctx: &mut ParseContext) -> FieldKind {
    FieldKind::FilePicker {
        allow_multiple_selection: ctx.flag(props, "allowMultipleSelection").unwrap_or(false),
        can_choose_directories: ctx.flag(props, "canChooseDirectories").unwrap_or(false),
        can_choose_files: ctx.flag(props, "canChooseFiles").unwrap_or(true),
        show_hidden_files: ctx.flag(props, "showHiddenFiles").unwrap_or(false),
    }
}
