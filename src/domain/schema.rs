use serde_json::Value;

/// Primitive kinds a record field can declare.
///
/// `Email` is `Text` plus a shape predicate; the coercion rules per kind
/// live in `record::coerce`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Number,
    Boolean,
    Email,
}

#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<Value>,
}

impl FieldSchema {
    pub fn required(name: impl Into<String>, kind: FieldKind) -> Self {
        Self::new(name, kind, true)
    }

    pub fn optional(name: impl Into<String>, kind: FieldKind) -> Self {
        Self::new(name, kind, false)
    }

    fn new(name: impl Into<String>, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
            kind,
            required,
            default: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Fallback used when the field is absent from the input. Only consulted
    /// for optional fields; the value still goes through coercion.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// An ordered set of field descriptors. Field names are unique; adding a
/// field under an existing name replaces the earlier descriptor in place.
#[derive(Debug, Clone, Default)]
pub struct RecordSchema {
    pub title: Option<String>,
    pub description: Option<String>,
    fields: Vec<FieldSchema>,
}

impl RecordSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_field(mut self, field: FieldSchema) -> Self {
        match self.fields.iter().position(|f| f.name == field.name) {
            Some(index) => self.fields[index] = field,
            None => self.fields.push(field),
        }
        self
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn with_field_replaces_same_name_in_place() {
        let schema = RecordSchema::new()
            .with_field(FieldSchema::required("id", FieldKind::Integer))
            .with_field(FieldSchema::required("name", FieldKind::Text))
            .with_field(FieldSchema::optional("id", FieldKind::Text));

        assert_eq!(schema.len(), 2);
        let id = schema.field("id").expect("id field");
        assert_eq!(id.kind, FieldKind::Text);
        assert!(!id.required);
        assert_eq!(schema.fields()[0].name, "id");
    }

    #[test]
    fn builder_metadata_round_trips() {
        let field = FieldSchema::optional("age", FieldKind::Integer)
            .with_title("Age")
            .with_default(json!(0));
        assert_eq!(field.title.as_deref(), Some("Age"));
        assert_eq!(field.default, Some(json!(0)));
    }
}
