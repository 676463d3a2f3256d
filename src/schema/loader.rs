use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::domain::{FieldKind, FieldSchema, RecordSchema};

/// Parse a JSON schema document into a `RecordSchema`.
///
/// The document must describe a flat object: `properties` in declaration
/// order, an optional `required` array, per-property `type` out of
/// `string`/`integer`/`number`/`boolean`, and `format: "email"` to tighten
/// a string to the email shape. `title`, `description`, and `default` are
/// carried onto the matching descriptor.
pub fn load_record_schema(document: &Value) -> Result<RecordSchema> {
    ensure_object(document)?;
    let schema_type = read_type(document).unwrap_or_else(|| "object".to_string());
    if schema_type != "object" {
        bail!("root schema must be an object, found {schema_type}");
    }

    let properties = document
        .get("properties")
        .and_then(Value::as_object)
        .context("object schema must define properties")?;
    let required = required_names(document);

    let mut schema = RecordSchema::new();
    if let Some(title) = document.get("title").and_then(Value::as_str) {
        schema = schema.with_title(title);
    }
    if let Some(description) = document.get("description").and_then(Value::as_str) {
        schema = schema.with_description(description);
    }

    for (name, value) in properties {
        let field = build_field_schema(value, name, required.iter().any(|r| r == name))?;
        schema = schema.with_field(field);
    }

    Ok(schema)
}

/// Parse schema text, then build the record schema from it.
pub fn load_record_schema_str(contents: &str) -> Result<RecordSchema> {
    let document: Value =
        serde_json::from_str(contents).context("failed to parse schema document")?;
    load_record_schema(&document)
}

fn build_field_schema(value: &Value, name: &str, required: bool) -> Result<FieldSchema> {
    let kind =
        detect_kind(value).with_context(|| format!("unsupported schema for field '{name}'"))?;
    let mut field = if required {
        FieldSchema::required(name, kind)
    } else {
        FieldSchema::optional(name, kind)
    };
    if let Some(title) = value.get("title").and_then(Value::as_str) {
        field = field.with_title(title);
    }
    if let Some(description) = value.get("description").and_then(Value::as_str) {
        field = field.with_description(description);
    }
    if let Some(default) = value.get("default") {
        field = field.with_default(default.clone());
    }
    Ok(field)
}

fn detect_kind(value: &Value) -> Result<FieldKind> {
    let email_format = value
        .get("format")
        .and_then(Value::as_str)
        .is_some_and(|format| format.eq_ignore_ascii_case("email"));

    match read_type(value).as_deref() {
        Some("string") | None if email_format => Ok(FieldKind::Email),
        Some("string") | None => Ok(FieldKind::Text),
        Some("integer") => Ok(FieldKind::Integer),
        Some("number") => Ok(FieldKind::Number),
        Some("boolean") => Ok(FieldKind::Boolean),
        Some(other) => bail!("unsupported field type {other}"),
    }
}

fn read_type(value: &Value) -> Option<String> {
    match value.get("type")? {
        Value::String(s) => Some(s.to_lowercase()),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(|s| s.to_lowercase())
            .find(|s| s != "null"),
        _ => None,
    }
}

fn required_names(schema: &Value) -> Vec<String> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn ensure_object(value: &Value) -> Result<()> {
    if value.is_object() {
        Ok(())
    } else {
        bail!("schema must be a JSON object")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_fields_in_declaration_order() {
        let document = json!({
            "title": "User",
            "type": "object",
            "required": ["id", "name", "age"],
            "properties": {
                "id": {"type": "integer"},
                "name": {"type": "string"},
                "age": {"type": "integer"}
            }
        });
        let schema = load_record_schema(&document).expect("valid document");
        let names: Vec<_> = schema.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["id", "name", "age"]);
        assert_eq!(schema.title.as_deref(), Some("User"));
        assert!(schema.fields().iter().all(|f| f.required));
    }

    #[test]
    fn email_format_tightens_strings() {
        let document = json!({
            "type": "object",
            "properties": {
                "contact": {"type": "string", "format": "email"},
                "note": {"type": "string", "format": "uri"}
            }
        });
        let schema = load_record_schema(&document).unwrap();
        assert_eq!(schema.field("contact").unwrap().kind, FieldKind::Email);
        assert_eq!(schema.field("note").unwrap().kind, FieldKind::Text);
    }

    #[test]
    fn optional_fields_carry_defaults_and_metadata() {
        let document = json!({
            "type": "object",
            "required": ["host"],
            "properties": {
                "host": {"type": "string"},
                "port": {"type": "integer", "title": "Port", "default": 8080}
            }
        });
        let schema = load_record_schema(&document).unwrap();
        let port = schema.field("port").unwrap();
        assert!(!port.required);
        assert_eq!(port.default, Some(json!(8080)));
        assert_eq!(port.title.as_deref(), Some("Port"));
    }

    #[test]
    fn nullable_type_arrays_pick_the_concrete_type() {
        let document = json!({
            "type": "object",
            "properties": {
                "nickname": {"type": ["string", "null"]}
            }
        });
        let schema = load_record_schema(&document).unwrap();
        assert_eq!(schema.field("nickname").unwrap().kind, FieldKind::Text);
    }

    #[test]
    fn unsupported_types_and_roots_are_rejected() {
        let document = json!({
            "type": "object",
            "properties": {"tags": {"type": "array", "items": {"type": "string"}}}
        });
        let err = load_record_schema(&document).unwrap_err();
        assert!(err.to_string().contains("tags"));

        assert!(load_record_schema(&json!({"type": "string"})).is_err());
        assert!(load_record_schema(&json!([1, 2])).is_err());
        assert!(load_record_schema_str("not json").is_err());
    }
}
