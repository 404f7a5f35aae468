//! Common types used across the frontend application.
//!
//! This module centralizes type definitions shared by the services,
//! the pure state machines and the components.
//!
//! # Categories
//!
//! - **Schema Types** - Field descriptors for dynamic forms
//! - **Product Types** - Product categories and the save payload
//! - **Log Types** - Diagnostic log entries
//! - **Error Types** - Frontend error handling

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

// =============================================================================
// Schema Types
// =============================================================================

/// Kind of input control rendered for a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free text input
    Text,
    /// Numeric input, emitted as a JSON number
    Number,
    /// Drop-down restricted to the field's options
    Select,
    /// File picker (photo)
    Media,
}

/// One selectable value of a `select` field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Descriptor of a single form field.
///
/// Matches the JSON served by `GET /inventory/schemas/{type}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    /// Attribute key in the payload
    pub key: String,
    /// Display label
    pub label: String,
    /// Control kind
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Whether an empty value blocks submission
    #[serde(default)]
    pub required: bool,
    /// Choices, only for `select` fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
}

impl FormField {
    pub fn text(key: &str, label: &str, required: bool) -> Self {
        Self::plain(key, label, FieldKind::Text, required)
    }

    pub fn number(key: &str, label: &str, required: bool) -> Self {
        Self::plain(key, label, FieldKind::Number, required)
    }

    pub fn media(key: &str, label: &str, required: bool) -> Self {
        Self::plain(key, label, FieldKind::Media, required)
    }

    pub fn select(key: &str, label: &str, required: bool, options: Vec<FieldOption>) -> Self {
        Self {
            options,
            ..Self::plain(key, label, FieldKind::Select, required)
        }
    }

    fn plain(key: &str, label: &str, kind: FieldKind, required: bool) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind,
            required,
            options: Vec::new(),
        }
    }
}

/// Schema integrity violations.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SchemaError {
    #[error("Field at position {0} has an empty key")]
    EmptyKey(usize),

    #[error("Duplicate field key: {0}")]
    DuplicateKey(String),

    #[error("Select field '{0}' has no options")]
    MissingOptions(String),

    #[error("Field '{0}' has options but is not a select")]
    UnexpectedOptions(String),
}

/// Checks that keys are unique and non-empty, and that options are
/// present exactly on `select` fields.
pub fn validate_schema(schema: &[FormField]) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();

    for (idx, field) in schema.iter().enumerate() {
        if field.key.trim().is_empty() {
            return Err(SchemaError::EmptyKey(idx));
        }
        if !seen.insert(field.key.as_str()) {
            return Err(SchemaError::DuplicateKey(field.key.clone()));
        }
        match (field.kind, field.options.is_empty()) {
            (FieldKind::Select, true) => {
                return Err(SchemaError::MissingOptions(field.key.clone()));
            }
            (FieldKind::Text | FieldKind::Number | FieldKind::Media, false) => {
                return Err(SchemaError::UnexpectedOptions(field.key.clone()));
            }
            _ => {}
        }
    }

    Ok(())
}

// =============================================================================
// Product Types
// =============================================================================

/// Product category, selects which schema is fetched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    LooseGemstone,
    FinishedJewelry,
    IdolCarving,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [
        ProductType::LooseGemstone,
        ProductType::FinishedJewelry,
        ProductType::IdolCarving,
    ];

    /// Wire identifier, also used as URL path segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::LooseGemstone => "LOOSE_GEMSTONE",
            ProductType::FinishedJewelry => "FINISHED_JEWELRY",
            ProductType::IdolCarving => "IDOL_CARVING",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductType::LooseGemstone => "Loose Gemstone",
            ProductType::FinishedJewelry => "Finished Jewelry",
            ProductType::IdolCarving => "Idol Carving",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ProductType::LooseGemstone => "💎",
            ProductType::FinishedJewelry => "💍",
            ProductType::IdolCarving => "🗿",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Body of `POST /products`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    /// Identifier decoded from the QR code
    pub scanned_id: String,
    pub product_type: ProductType,
    /// Values collected by the dynamic form
    pub attributes: Map<String, Value>,
}

// =============================================================================
// Log Types
// =============================================================================

/// Log severity level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            LogLevel::Info => "log-info",
            LogLevel::Success => "log-success",
            LogLevel::Warning => "log-warning",
            LogLevel::Error => "log-error",
        }
    }
}

/// A single diagnostic entry shown in the logs panel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Timestamp string (HH:MM:SS)
    pub timestamp: String,
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
///
/// Unified error type for services talking to the outside world.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum AppError {
    /// Request could not be built or sent.
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-2xx status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Response body did not match the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Remote schema violates field invariants.
    #[error("Invalid schema: {0}")]
    Schema(#[from] SchemaError),

    /// Camera widget failed.
    #[error("Scanner error: {0}")]
    Scanner(String),
}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn colors() -> Vec<FieldOption> {
        vec![FieldOption::new("D", "D"), FieldOption::new("E", "E")]
    }

    #[test]
    fn test_field_deserialization() {
        let json = r#"[
            {"key": "carat", "label": "Carat Weight", "type": "number", "required": true},
            {"key": "color", "label": "Color", "type": "select", "required": true,
             "options": [{"value": "D", "label": "D"}]},
            {"key": "origin", "label": "Origin", "type": "text"}
        ]"#;

        let schema: Vec<FormField> = serde_json::from_str(json).unwrap();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema[0].kind, FieldKind::Number);
        assert_eq!(schema[1].options[0].value, "D");
        assert!(!schema[2].required);
        assert!(validate_schema(&schema).is_ok());
    }

    #[test]
    fn test_field_serialization_omits_empty_options() {
        let value = serde_json::to_value(FormField::media("photo", "Photo", false)).unwrap();
        assert_eq!(
            value,
            json!({"key": "photo", "label": "Photo", "type": "media", "required": false})
        );
    }

    #[test]
    fn test_schema_rejects_duplicate_keys() {
        let schema = vec![
            FormField::text("origin", "Origin", false),
            FormField::number("origin", "Origin again", true),
        ];
        assert_eq!(
            validate_schema(&schema),
            Err(SchemaError::DuplicateKey("origin".into()))
        );
    }

    #[test]
    fn test_schema_options_only_on_select() {
        let bare_select = vec![FormField::select("color", "Color", true, vec![])];
        assert_eq!(
            validate_schema(&bare_select),
            Err(SchemaError::MissingOptions("color".into()))
        );

        let mut text = FormField::text("origin", "Origin", false);
        text.options = colors();
        assert_eq!(
            validate_schema(&[text]),
            Err(SchemaError::UnexpectedOptions("origin".into()))
        );

        let empty_key = vec![FormField::text("  ", "Blank", false)];
        assert_eq!(validate_schema(&empty_key), Err(SchemaError::EmptyKey(0)));
    }

    #[test]
    fn test_product_type_wire_format() {
        assert_eq!(
            serde_json::to_value(ProductType::LooseGemstone).unwrap(),
            json!("LOOSE_GEMSTONE")
        );
        for ty in ProductType::ALL {
            assert_eq!(ProductType::from_wire(ty.as_str()), Some(ty));
        }
        assert_eq!(ProductType::from_wire("RING"), None);
    }

    #[test]
    fn test_payload_serialization() {
        let mut attributes = Map::new();
        attributes.insert("carat".into(), json!(1.2));

        let payload = CreateProductPayload {
            scanned_id: "QR123".into(),
            product_type: ProductType::IdolCarving,
            attributes,
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "scannedId": "QR123",
                "productType": "IDOL_CARVING",
                "attributes": {"carat": 1.2}
            })
        );
    }

    #[test]
    fn test_error_display() {
        let err = AppError::Server {
            status: 503,
            message: "maintenance".into(),
        };
        assert_eq!(err.to_string(), "Server error (503): maintenance");

        let err: AppError = SchemaError::DuplicateKey("carat".into()).into();
        assert!(err.to_string().contains("carat"));
    }
}
