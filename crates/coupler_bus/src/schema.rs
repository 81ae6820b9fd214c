//! Parameter schemas and validation.
//!
//! Every handler declares an ordered [`ParamSchema`]. The bus validates the
//! raw parameter map against it before the handler ever runs. Parameters the
//! schema does not declare are passed through untouched, so a schema can grow
//! without breaking callers that already send extra keys.

use std::fmt;

use serde_json::{Map, Value, json};
use thiserror::Error;

/// The primitive kinds a declared parameter may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Number,
    Boolean,
    Object,
}

impl ParamKind {
    pub fn name(self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Number => "number",
            ParamKind::Boolean => "boolean",
            ParamKind::Object => "object",
        }
    }

    fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (ParamKind::String, Value::String(_))
                | (ParamKind::Number, Value::Number(_))
                | (ParamKind::Boolean, Value::Bool(_))
                | (ParamKind::Object, Value::Object(_))
        )
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the JSON type name of a value, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One declared parameter.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub description: &'static str,
}

/// An ordered set of declared parameters. Declaration order is the
/// tie-breaking order for validation failures.
#[derive(Debug, Clone, Default)]
pub struct ParamSchema {
    params: Vec<ParamSpec>,
}

impl ParamSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(
        mut self,
        name: &'static str,
        kind: ParamKind,
        description: &'static str,
    ) -> Self {
        self.params.push(ParamSpec {
            name,
            kind,
            required: true,
            description,
        });
        self
    }

    pub fn optional(
        mut self,
        name: &'static str,
        kind: ParamKind,
        description: &'static str,
    ) -> Self {
        self.params.push(ParamSpec {
            name,
            kind,
            required: false,
            description,
        });
        self
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Checks a raw parameter map against this schema.
    ///
    /// All missing-required checks run before any type check, each in
    /// declaration order, and the first failure wins. Never invokes anything
    /// and never mutates its input.
    pub fn validate(
        &self,
        params: &Map<String, Value>,
    ) -> Result<Map<String, Value>, ValidationError> {
        for spec in self.params.iter().filter(|s| s.required) {
            if !params.contains_key(spec.name) {
                return Err(ValidationError::MissingParameter(spec.name.to_string()));
            }
        }

        for spec in &self.params {
            if let Some(value) = params.get(spec.name) {
                if !spec.kind.matches(value) {
                    return Err(ValidationError::InvalidParameterType {
                        name: spec.name.to_string(),
                        expected: spec.kind,
                        actual: json_type_name(value),
                    });
                }
            }
        }

        Ok(params.clone())
    }

    /// Renders the schema in the JSON-Schema object shape used by tool
    /// listings.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for spec in &self.params {
            properties.insert(
                spec.name.to_string(),
                json!({
                    "type": spec.kind.name(),
                    "description": spec.description,
                }),
            );
            if spec.required {
                required.push(Value::String(spec.name.to_string()));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// A single validation failure. Validation stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing parameter: {0}")]
    MissingParameter(String),

    #[error("invalid type for parameter {name}: expected {expected}, got {actual}")]
    InvalidParameterType {
        name: String,
        expected: ParamKind,
        actual: &'static str,
    },
}
