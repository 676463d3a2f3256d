use serde_json::{Map, Value};

use crate::domain::RecordSchema;
use crate::record::{RecordInstance, ValidationError, validate};

/// Parse JSON text into the object mapping the validator consumes.
///
/// Syntax errors and non-object roots both come back as `MalformedInput`;
/// field-level checks never run on input that was not a mapping.
pub fn parse_document_str(contents: &str) -> Result<Map<String, Value>, ValidationError> {
    let value: Value =
        serde_json::from_str(contents).map_err(|err| ValidationError::MalformedInput {
            message: err.to_string(),
        })?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ValidationError::MalformedInput {
            message: format!("expected a JSON object, found {}", value_kind(&other)),
        }),
    }
}

/// Deserialize: parse `contents` as JSON, then validate against `schema`.
pub fn from_json(schema: &RecordSchema, contents: &str) -> Result<RecordInstance, ValidationError> {
    let mapping = parse_document_str(contents)?;
    validate(schema, &mapping)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
