//! Structural validation of the extraction payload.
//!
//! The model's JSON is checked as a `serde_json::Value` rather than deserialized
//! straight into `ProjectInput`, so every problem can be reported at once with
//! its path instead of stopping at serde's first error.

use std::fmt;

use serde_json::Value;

use crate::models::input::{FieldMap, FieldValue, ProjectInput};

const REQUIRED_STRING_KEYS: [&str; 3] = ["project_name", "candidate_name", "address"];

/// One schema problem, located by a dotted path into the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub path: String,
    pub message: String,
}

impl SchemaViolation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Validates the payload shape and converts it into a `ProjectInput`.
///
/// Rules:
/// - the top level is an object
/// - `project_name`, `candidate_name`, `address` are present and strings
/// - `fields` is present and an object
/// - every field value is a string or an array of strings
///
/// Unknown top-level keys are ignored. Field order is preserved.
pub fn validate_payload(value: &Value) -> Result<ProjectInput, Vec<SchemaViolation>> {
    let Some(root) = value.as_object() else {
        return Err(vec![SchemaViolation::new(
            "$",
            format!("expected an object, found {}", type_name(value)),
        )]);
    };

    let mut violations = Vec::new();
    let mut strings: [String; 3] = Default::default();

    for (slot, key) in strings.iter_mut().zip(REQUIRED_STRING_KEYS) {
        match root.get(key) {
            None => violations.push(SchemaViolation::new(key, "required key is missing")),
            Some(Value::String(s)) => *slot = s.clone(),
            Some(other) => violations.push(SchemaViolation::new(
                key,
                format!("expected a string, found {}", type_name(other)),
            )),
        }
    }

    let mut fields = FieldMap::new();
    match root.get("fields") {
        None => violations.push(SchemaViolation::new("fields", "required key is missing")),
        Some(Value::Object(map)) => {
            for (key, raw) in map {
                match field_value(key, raw) {
                    Ok(v) => {
                        fields.insert(key.clone(), v);
                    }
                    Err(mut errs) => violations.append(&mut errs),
                }
            }
        }
        Some(other) => violations.push(SchemaViolation::new(
            "fields",
            format!("expected an object, found {}", type_name(other)),
        )),
    }

    if !violations.is_empty() {
        return Err(violations);
    }

    let [project_name, candidate_name, address] = strings;
    Ok(ProjectInput {
        project_name,
        candidate_name,
        address,
        fields,
    })
}

fn field_value(key: &str, raw: &Value) -> Result<FieldValue, Vec<SchemaViolation>> {
    match raw {
        Value::String(s) => Ok(FieldValue::Scalar(s.clone())),
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            let mut errs = Vec::new();
            for (i, item) in items.iter().enumerate() {
                match item {
                    Value::String(s) => out.push(s.clone()),
                    other => errs.push(SchemaViolation::new(
                        format!("fields.{key}[{i}]"),
                        format!("expected a string, found {}", type_name(other)),
                    )),
                }
            }
            if errs.is_empty() {
                Ok(FieldValue::Sequence(out))
            } else {
                Err(errs)
            }
        }
        other => Err(vec![SchemaViolation::new(
            format!("fields.{key}"),
            format!("expected a string or array of strings, found {}", type_name(other)),
        )]),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
