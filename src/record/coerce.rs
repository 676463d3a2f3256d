use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Number, Value};

use crate::domain::{FieldKind, FieldSchema};

use super::error::FieldViolation;

// One @, non-empty local part, dot-separated domain. A shape check, not an
// RFC 5321 parser.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
});

/// Coerce a raw input value to the field's declared kind.
///
/// The rules are fixed: `Text` takes JSON strings only; `Integer` takes
/// exact integers, integral floats, and base-10 numeric strings; `Number`
/// takes any JSON number or numeric string; `Boolean` takes JSON booleans
/// and the strings `true`/`false` (any ASCII case); `Email` is `Text` plus
/// the shape predicate.
pub(super) fn coerce_value(raw: &Value, field: &FieldSchema) -> Result<Value, FieldViolation> {
    match field.kind {
        FieldKind::Text => text_value(raw, field),
        FieldKind::Integer => integer_value(raw, field),
        FieldKind::Number => number_value(raw, field),
        FieldKind::Boolean => boolean_value(raw, field),
        FieldKind::Email => email_value(raw, field),
    }
}

fn text_value(raw: &Value, field: &FieldSchema) -> Result<Value, FieldViolation> {
    match raw {
        Value::String(text) => Ok(Value::String(text.clone())),
        other => Err(FieldViolation::mismatch(&field.name, other, "expected text")),
    }
}

fn integer_value(raw: &Value, field: &FieldSchema) -> Result<Value, FieldViolation> {
    match raw {
        Value::Number(num) => {
            if num.is_i64() || num.is_u64() {
                return Ok(Value::Number(num.clone()));
            }
            match num.as_f64() {
                Some(float) if float.fract() == 0.0 && float.abs() <= i64::MAX as f64 => {
                    Ok(Value::from(float as i64))
                }
                _ => Err(FieldViolation::mismatch(
                    &field.name,
                    raw,
                    "expected integer",
                )),
            }
        }
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| {
                FieldViolation::mismatch(
                    &field.name,
                    raw,
                    format!("'{text}' is not a valid integer"),
                )
            }),
        other => Err(FieldViolation::mismatch(
            &field.name,
            other,
            "expected integer",
        )),
    }
}

fn number_value(raw: &Value, field: &FieldSchema) -> Result<Value, FieldViolation> {
    match raw {
        Value::Number(num) => Ok(Value::Number(num.clone())),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| {
                FieldViolation::mismatch(
                    &field.name,
                    raw,
                    format!("'{text}' is not a valid number"),
                )
            }),
        other => Err(FieldViolation::mismatch(
            &field.name,
            other,
            "expected number",
        )),
    }
}

fn boolean_value(raw: &Value, field: &FieldSchema) -> Result<Value, FieldViolation> {
    match raw {
        Value::Bool(flag) => Ok(Value::Bool(*flag)),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(FieldViolation::mismatch(
                &field.name,
                raw,
                format!("'{text}' is not a valid boolean"),
            )),
        },
        other => Err(FieldViolation::mismatch(
            &field.name,
            other,
            "expected boolean",
        )),
    }
}

fn email_value(raw: &Value, field: &FieldSchema) -> Result<Value, FieldViolation> {
    let Value::String(text) = raw else {
        return Err(FieldViolation::mismatch(&field.name, raw, "expected text"));
    };
    if EMAIL_SHAPE.is_match(text) {
        Ok(Value::String(text.clone()))
    } else {
        Err(FieldViolation::constraint(
            &field.name,
            raw,
            format!("'{text}' is not a valid email address"),
        ))
    }
}
