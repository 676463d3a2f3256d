use schemaval::{
    FieldKind, ValidationError, ViolationKind, from_json, load_record_schema, validate,
};
use serde_json::json;

fn user_schema() -> schemaval::RecordSchema {
    load_record_schema(&json!({
        "title": "User",
        "type": "object",
        "required": ["id", "name", "age"],
        "properties": {
            "id": {"type": "integer"},
            "name": {"type": "string"},
            "age": {"type": "integer"}
        }
    }))
    .expect("valid schema document")
}

#[test]
fn rejection_is_complete_across_fields() {
    let schema = user_schema();
    let err = from_json(
        &schema,
        r#"{"id": "invalid", "name": "Jane Doe", "age": "invalid"}"#,
    )
    .expect_err("two bad fields");

    let fields: Vec<_> = err.violations().iter().map(|v| v.field.as_str()).collect();
    assert_eq!(fields, ["id", "age"]);
    assert!(err
        .violations()
        .iter()
        .all(|v| v.kind == ViolationKind::TypeMismatch));
    assert_eq!(err.violations()[0].value, Some(json!("invalid")));
}

#[test]
fn unknown_keys_are_tolerated() {
    let schema = user_schema();
    let record = from_json(
        &schema,
        r#"{"id": 1, "name": "John", "age": 30, "extra": "ignored"}"#,
    )
    .expect("extra key ignored");
    assert!(!record.contains("extra"));
    assert_eq!(record.len(), 3);
}

#[test]
fn missing_required_field_yields_exactly_one_violation() {
    let schema = user_schema();
    let err = from_json(&schema, r#"{"id": 1, "name": "John"}"#).expect_err("age missing");
    let violations = err.violations();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].field, "age");
    assert_eq!(violations[0].kind, ViolationKind::Missing);
}

#[test]
fn malformed_input_short_circuits_field_checks() {
    let schema = user_schema();
    let err = from_json(&schema, "{\"id\": 1,").expect_err("syntax error");
    assert!(matches!(err, ValidationError::MalformedInput { .. }));
    assert!(err.violations().is_empty());

    let err = from_json(&schema, "42").expect_err("non-object root");
    assert!(err.is_malformed());
}

#[test]
fn email_constraint_is_distinct_from_type_mismatch() {
    let schema = load_record_schema(&json!({
        "type": "object",
        "required": ["contact"],
        "properties": {"contact": {"type": "string", "format": "email"}}
    }))
    .expect("valid schema document");
    assert_eq!(schema.field("contact").unwrap().kind, FieldKind::Email);

    let err = from_json(&schema, r#"{"contact": "nobody"}"#).expect_err("shape fails");
    assert_eq!(err.violations()[0].kind, ViolationKind::Constraint);

    let err = from_json(&schema, r#"{"contact": 5}"#).expect_err("type fails");
    assert_eq!(err.violations()[0].kind, ViolationKind::TypeMismatch);
}

#[test]
fn validation_is_pure_and_repeatable() {
    let schema = user_schema();
    let input = match json!({"id": 1, "name": "John Doe", "age": 30}) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    };
    let first = validate(&schema, &input).expect("valid");
    let second = validate(&schema, &input).expect("still valid");
    assert_eq!(first, second);
}
