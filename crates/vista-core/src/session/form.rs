use crate::notify::NotificationBridge;
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;
use vista_types::{Field, FieldKind, FormModel, Notifier};

#[derive(Debug, Clone, PartialEq)]
struct FieldState {
    type_name: &'static str,
    value: Value,
}

/// Value and focus state of a form across renders.
///
/// Values are keyed by field id. A field's `defaultValue` only applies when
/// the id first appears or its kind changes; a controlled `value` always wins.
#[derive(Debug, Default)]
pub struct FormSession {
    model: FormModel,
    values: HashMap<String, FieldState>,
    focused: Option<String>,
}

impl FormSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, form: &FormModel) {
        let mut values = HashMap::new();
        for field in form.fields() {
            let type_name = field.kind.type_name();
            let value = match (&field.base.value, self.values.remove(field.id())) {
                (Some(controlled), _) => controlled.clone(),
                (None, Some(state)) if state.type_name == type_name => state.value,
                (None, _) => initial_value(field),
            };
            values.insert(field.id().to_string(), FieldState { type_name, value });
        }

        if let Some(focused) = &self.focused
            && !values.contains_key(focused)
        {
            self.focused = None;
        }

        debug!(fields = values.len(), "Rendered form");
        self.values = values;
        self.model = form.clone();
    }

    /// Drop all state; used when the view is swapped.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn value(&self, id: &str) -> Option<&Value> {
        self.values.get(id).map(|state| &state.value)
    }

    #[must_use]
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// First field with `autoFocus`, else the first field.
    #[must_use]
    pub fn autofocus_target(&self) -> Option<&str> {
        self.model
            .fields()
            .find(|field| field.base.auto_focus)
            .or_else(|| self.model.fields().next())
            .map(Field::id)
    }

    /// Commit a new value and notify the field's `onChange`.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownField` if no field has this id.
    pub fn set_value<N: Notifier>(
        &mut self,
        id: &str,
        value: Value,
        bridge: &mut NotificationBridge<N>,
    ) -> Result<()> {
        let field = self.field(id)?;
        let handler = field.base.on_change.clone();
        let type_name = field.kind.type_name();

        self.values.insert(
            id.to_string(),
            FieldState {
                type_name,
                value: value.clone(),
            },
        );
        bridge.field_changed(handler.as_deref(), value);
        Ok(())
    }

    /// Search text typed into a dropdown field. Goes to the dropdown's own
    /// search handler; the selected value is untouched.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownField` if no field has this id.
    pub fn set_search_text<N: Notifier>(
        &self,
        id: &str,
        text: &str,
        bridge: &mut NotificationBridge<N>,
    ) -> Result<()> {
        if let FieldKind::Dropdown(dropdown) = &self.field(id)?.kind {
            bridge.input_search_changed(dropdown.on_search_text_change.as_deref(), text);
        }
        Ok(())
    }

    /// Focus a field, blurring the one focused before.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownField` if no field has this id.
    pub fn focus<N: Notifier>(
        &mut self,
        id: &str,
        bridge: &mut NotificationBridge<N>,
    ) -> Result<()> {
        let on_focus = self.field(id)?.base.on_focus.clone();
        if self.focused.as_deref() == Some(id) {
            return Ok(());
        }
        if let Some(previous) = self.focused.take() {
            self.blur(&previous, bridge)?;
        }
        self.focused = Some(id.to_string());
        bridge.field_focused(on_focus.as_deref());
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `Error::UnknownField` if no field has this id.
    pub fn blur<N: Notifier>(
        &mut self,
        id: &str,
        bridge: &mut NotificationBridge<N>,
    ) -> Result<()> {
        let on_blur = self.field(id)?.base.on_blur.clone();
        if self.focused.as_deref() == Some(id) {
            self.focused = None;
        }
        bridge.field_blurred(on_blur.as_deref());
        Ok(())
    }

    /// Collect `{id: value}` for every field.
    ///
    /// # Errors
    ///
    /// Returns `Error::Submit` for the first field that carries an error.
    pub fn submit(&self) -> Result<Value> {
        let mut payload = Map::new();
        for field in self.model.fields() {
            if let Some(message) = &field.base.error {
                return Err(Error::Submit {
                    field: field.id().to_string(),
                    message: message.clone(),
                });
            }
            let value = self
                .value(field.id())
                .cloned()
                .unwrap_or_else(|| field.kind.empty_value());
            payload.insert(field.id().to_string(), value);
        }
        Ok(Value::Object(payload))
    }

    fn field(&self, id: &str) -> Result<&Field> {
        self.model
            .field(id)
            .ok_or_else(|| Error::UnknownField(id.to_string()))
    }
}

fn initial_value(field: &Field) -> Value {
    if let FieldKind::Dropdown(dropdown) = &field.kind
        && let Some(value) = dropdown.value.as_ref().or(dropdown.default_value.as_ref())
    {
        return Value::String(value.clone());
    }
    field
        .base
        .default_value
        .clone()
        .unwrap_or_else(|| field.kind.empty_value())
}
