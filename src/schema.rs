// Schema Validation
// Field-level validation for task config and runtime input payloads

use serde_json::{Map, Value};
use std::fmt;

/// The JSON shape a declared field must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Boolean,
    Array,
    Object,
}

impl FieldKind {
    fn describe(self) -> &'static str {
        match self {
            FieldKind::String => "a string",
            FieldKind::Integer => "an integer",
            FieldKind::Float => "a number",
            FieldKind::Boolean => "a boolean",
            FieldKind::Array => "an array",
            FieldKind::Object => "an object",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::Float => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Array => value.is_array(),
            FieldKind::Object => value.is_object(),
        }
    }
}

/// A single declared field within a schema.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

/// A structured, per-field validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The offending field, empty for payload-level errors.
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// Render a list of field errors as a single report message.
pub fn render_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Declared shape of a task's static config or runtime input.
///
/// Built with the chained constructors and checked with [`Schema::validate`],
/// which yields the cleaned payload or every field-level failure at once.
/// Undeclared fields pass through untouched.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a required field.
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind,
            required: true,
        });
        self
    }

    /// Declare an optional field.
    pub fn optional_field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind,
            required: false,
        });
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Validate a payload against the declared fields.
    ///
    /// A required field that is absent or null fails; a present field of the
    /// wrong JSON type fails. All failures are collected before returning.
    pub fn validate(&self, value: &Value) -> Result<Map<String, Value>, Vec<FieldError>> {
        let map = match value.as_object() {
            Some(map) => map,
            None => {
                return Err(vec![FieldError::new(
                    "",
                    format!("expected an object, found {}", json_type(value)),
                )])
            }
        };

        let mut errors = Vec::new();
        for spec in &self.fields {
            match map.get(&spec.name) {
                None | Some(Value::Null) => {
                    if spec.required {
                        errors.push(FieldError::new(&spec.name, "field is required"));
                    }
                }
                Some(found) => {
                    if !spec.kind.matches(found) {
                        errors.push(FieldError::new(
                            &spec.name,
                            format!(
                                "expected {}, found {}",
                                spec.kind.describe(),
                                json_type(found)
                            ),
                        ));
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(map.clone())
        } else {
            Err(errors)
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
