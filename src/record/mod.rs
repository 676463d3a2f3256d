mod coerce;
mod error;
mod instance;

pub use error::{FieldViolation, ValidationError, ViolationKind};
pub use instance::RecordInstance;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::domain::RecordSchema;

use coerce::coerce_value;

/// Validate an input mapping against `schema`.
///
/// Fields are checked in schema declaration order. A required field with no
/// value reports `Missing`; an optional field falls back to its default (the
/// default goes through coercion too) or is omitted. Keys the schema does
/// not declare are ignored. Violations are collected across all fields
/// before returning; a single bad field never masks the rest.
pub fn validate(
    schema: &RecordSchema,
    input: &Map<String, Value>,
) -> Result<RecordInstance, ValidationError> {
    let mut values = IndexMap::with_capacity(schema.len());
    let mut violations = Vec::new();

    for field in schema.fields() {
        let raw = match input.get(&field.name) {
            Some(value) => value,
            None if field.required => {
                violations.push(FieldViolation::missing(&field.name));
                continue;
            }
            None => match &field.default {
                Some(default) => default,
                None => continue,
            },
        };
        match coerce_value(raw, field) {
            Ok(value) => {
                values.insert(field.name.clone(), value);
            }
            Err(violation) => violations.push(violation),
        }
    }

    if violations.is_empty() {
        Ok(RecordInstance::new(values))
    } else {
        Err(ValidationError::Rejected { violations })
    }
}
