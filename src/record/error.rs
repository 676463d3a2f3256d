use serde_json::Value;

/// The ways a single field can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// A required field had no value in the input.
    Missing,
    /// The raw value could not be coerced to the declared kind.
    TypeMismatch,
    /// The value coerced but failed the field's shape predicate.
    Constraint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    pub field: String,
    pub kind: ViolationKind,
    /// The offending raw value; absent for `Missing`.
    pub value: Option<Value>,
    pub message: String,
}

impl FieldViolation {
    pub(crate) fn missing(field: &str) -> Self {
        Self {
            field: field.to_string(),
            kind: ViolationKind::Missing,
            value: None,
            message: "required field is missing".to_string(),
        }
    }

    pub(crate) fn mismatch(field: &str, raw: &Value, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            kind: ViolationKind::TypeMismatch,
            value: Some(raw.clone()),
            message: message.into(),
        }
    }

    pub(crate) fn constraint(field: &str, raw: &Value, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            kind: ViolationKind::Constraint,
            value: Some(raw.clone()),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for FieldViolation {}

/// Outcome of a failed validation call.
///
/// `MalformedInput` means the raw text never became a mapping, so no field
/// checks ran. `Rejected` carries every field-level violation found during
/// one pass, in schema declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MalformedInput { message: String },
    Rejected { violations: Vec<FieldViolation> },
}

impl ValidationError {
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            ValidationError::MalformedInput { .. } => &[],
            ValidationError::Rejected { violations } => violations,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ValidationError::MalformedInput { .. })
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MalformedInput { message } => {
                write!(f, "malformed input: {message}")
            }
            ValidationError::Rejected { violations } => {
                write!(f, "validation failed")?;
                for violation in violations {
                    write!(f, "; {violation}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}
