//! Form state behind the dynamic form component.
//!
//! Kept free of any DOM types so validation and value collection can be
//! exercised with plain unit tests. The component owns a `FormState` in a
//! signal and forwards input events to it.

use serde_json::{Map, Number, Value};
use std::fmt;

use crate::types::{FieldKind, FormField};

/// Why a control is invalid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldError {
    /// Required control left empty
    Required,
    /// Number control holding something that is not a finite number
    NotANumber,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Required => f.write_str("This field is required"),
            FieldError::NotANumber => f.write_str("Enter a valid number"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Control {
    key: String,
    kind: FieldKind,
    required: bool,
    raw: String,
    touched: bool,
}

impl Control {
    fn new(field: &FormField) -> Self {
        Self {
            key: field.key.clone(),
            kind: field.kind,
            required: field.required,
            raw: String::new(),
            touched: false,
        }
    }

    fn error(&self) -> Option<FieldError> {
        let trimmed = self.raw.trim();
        if trimmed.is_empty() {
            return self.required.then_some(FieldError::Required);
        }
        if self.kind == FieldKind::Number && parse_number(trimmed).is_none() {
            return Some(FieldError::NotANumber);
        }
        None
    }

    /// Value as emitted in the payload. Empty controls yield `""`.
    fn value(&self) -> Value {
        let trimmed = self.raw.trim();
        if trimmed.is_empty() {
            return Value::String(String::new());
        }
        match self.kind {
            FieldKind::Number => parse_number(trimmed)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(self.raw.clone())),
            FieldKind::Text | FieldKind::Select | FieldKind::Media => {
                Value::String(self.raw.clone())
            }
        }
    }
}

fn parse_number(raw: &str) -> Option<Number> {
    let parsed: f64 = raw.parse().ok()?;
    if let Ok(int) = raw.parse::<i64>() {
        return Some(Number::from(int));
    }
    Number::from_f64(parsed)
}

/// One control per schema field, in schema order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState {
    controls: Vec<Control>,
}

impl FormState {
    pub fn new(schema: &[FormField]) -> Self {
        Self {
            controls: schema.iter().map(Control::new).collect(),
        }
    }

    /// Drops every entered value and rebuilds controls from `schema`.
    pub fn rebuild(&mut self, schema: &[FormField]) {
        *self = Self::new(schema);
    }

    pub fn keys(&self) -> Vec<&str> {
        self.controls.iter().map(|c| c.key.as_str()).collect()
    }

    /// Sets the raw input of `key`. Unknown keys are ignored.
    pub fn set_value(&mut self, key: &str, raw: impl Into<String>) {
        if let Some(control) = self.control_mut(key) {
            control.raw = raw.into();
        }
    }

    pub fn raw(&self, key: &str) -> String {
        self.control(key).map(|c| c.raw.clone()).unwrap_or_default()
    }

    pub fn value(&self, key: &str) -> Option<Value> {
        self.control(key).map(Control::value)
    }

    pub fn touch(&mut self, key: &str) {
        if let Some(control) = self.control_mut(key) {
            control.touched = true;
        }
    }

    pub fn is_touched(&self, key: &str) -> bool {
        self.control(key).is_some_and(|c| c.touched)
    }

    pub fn mark_all_touched(&mut self) {
        for control in &mut self.controls {
            control.touched = true;
        }
    }

    pub fn error(&self, key: &str) -> Option<FieldError> {
        self.control(key).and_then(Control::error)
    }

    /// Error to display: only once the control has been touched.
    pub fn visible_error(&self, key: &str) -> Option<FieldError> {
        self.control(key)
            .filter(|c| c.touched)
            .and_then(Control::error)
    }

    pub fn is_valid(&self) -> bool {
        self.controls.iter().all(|c| c.error().is_none())
    }

    /// Collects key → value when every control is valid.
    ///
    /// Otherwise marks all controls touched so errors surface, and returns
    /// `None`.
    pub fn submit(&mut self) -> Option<Map<String, Value>> {
        if !self.is_valid() {
            self.mark_all_touched();
            return None;
        }

        Some(
            self.controls
                .iter()
                .map(|c| (c.key.clone(), c.value()))
                .collect(),
        )
    }

    fn control(&self, key: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.key == key)
    }

    fn control_mut(&mut self, key: &str) -> Option<&mut Control> {
        self.controls.iter_mut().find(|c| c.key == key)
    }
}
