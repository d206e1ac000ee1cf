use indexmap::IndexMap;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Key under which object-level issues are reported
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

pub const MISSING_FIELD_MESSAGE: &str = "This field is required.";

/// A single reported problem with the input
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationIssue {
    /// A required field was absent from the input
    MissingField,
    /// The raw value could not be converted to the declared type
    TypeCoercion(String),
    /// A named field validator rejected the coerced value
    FieldValidatorRejected { validator: String, message: String },
    /// A named object validator rejected the record
    ObjectValidatorRejected { validator: String, message: String },
}

impl ValidationIssue {
    pub fn message(&self) -> &str {
        match self {
            ValidationIssue::MissingField => MISSING_FIELD_MESSAGE,
            ValidationIssue::TypeCoercion(message) => message,
            ValidationIssue::FieldValidatorRejected { message, .. } => message,
            ValidationIssue::ObjectValidatorRejected { message, .. } => message,
        }
    }

    /// Short machine-readable code: `required`, `invalid`, or the validator's name
    pub fn code(&self) -> &str {
        match self {
            ValidationIssue::MissingField => "required",
            ValidationIssue::TypeCoercion(_) => "invalid",
            ValidationIssue::FieldValidatorRejected { validator, .. } => validator,
            ValidationIssue::ObjectValidatorRejected { validator, .. } => validator,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Every issue found in one validation call, keyed by field in schema order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: IndexMap<String, Vec<ValidationIssue>>,
    non_field: Vec<ValidationIssue>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an error report with a single field issue
    pub fn single(field: &str, issue: ValidationIssue) -> Self {
        let mut errors = Self::new();
        errors.add_field_issue(field, issue);
        errors
    }

    pub fn add_field_issue(&mut self, field: &str, issue: ValidationIssue) {
        self.fields.entry(field.to_string()).or_default().push(issue);
    }

    pub fn add_non_field_issue(&mut self, issue: ValidationIssue) {
        self.non_field.push(issue);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field.is_empty()
    }

    pub fn field(&self, field: &str) -> &[ValidationIssue] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &[ValidationIssue])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn field_error_count(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }

    pub fn non_field(&self) -> &[ValidationIssue] {
        &self.non_field
    }

    /// Field name to human-readable messages, with object-level issues under `non_field_errors`
    pub fn messages(&self) -> IndexMap<String, Vec<String>> {
        let mut out: IndexMap<String, Vec<String>> = self
            .fields
            .iter()
            .map(|(field, issues)| {
                (field.clone(), issues.iter().map(|i| i.message().to_string()).collect())
            })
            .collect();
        if !self.non_field.is_empty() {
            out.insert(
                NON_FIELD_ERRORS.to_string(),
                self.non_field.iter().map(|i| i.message().to_string()).collect(),
            );
        }
        out
    }

    /// Get a comma-separated list of all error messages
    pub fn to_string_list(&self) -> String {
        self.fields
            .values()
            .flatten()
            .chain(self.non_field.iter())
            .map(|issue| issue.message().to_string())
            .collect::<Vec<String>>()
            .join(", ")
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_list())
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let messages = self.messages();
        let mut map = serializer.serialize_map(Some(messages.len()))?;
        for (field, list) in &messages {
            map.serialize_entry(field, list)?;
        }
        map.end()
    }
}

/// Returned by a field validator that does not accept a value
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The value is invalid; reported to the caller
    #[error("{0}")]
    Invalid(String),
    /// The validator itself is broken, e.g. attached to a field of the wrong kind
    #[error("validator defect: {0}")]
    Defect(String),
}

impl Rejection {
    pub fn invalid(message: impl Into<String>) -> Self {
        Rejection::Invalid(message.into())
    }

    pub fn defect(message: impl Into<String>) -> Self {
        Rejection::Defect(message.into())
    }
}

/// Returned by an object validator that does not accept a record
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ObjectRejection {
    #[error("{0}")]
    NonField(String),
    #[error("{field}: {message}")]
    Field { field: String, message: String },
    #[error("validator defect: {0}")]
    Defect(String),
}

impl ObjectRejection {
    pub fn non_field(message: impl Into<String>) -> Self {
        ObjectRejection::NonField(message.into())
    }

    pub fn on_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ObjectRejection::Field {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn defect(message: impl Into<String>) -> Self {
        ObjectRejection::Defect(message.into())
    }
}

/// A defect in a schema definition surfaced while validating; never caused by input data alone
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("validator `{validator}` on {target} is defective: {message}")]
pub struct SchemaFault {
    pub schema: String,
    pub validator: String,
    pub target: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rejected(message: &str) -> ValidationIssue {
        ValidationIssue::FieldValidatorRejected {
            validator: "v".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_messages_and_serialization() {
        let mut errors = ValidationErrors::single("title", ValidationIssue::MissingField);
        errors.add_field_issue("content", rejected("invalid char"));
        errors.add_non_field_issue(ValidationIssue::ObjectValidatorRejected {
            validator: "o".to_string(),
            message: "Title and content cannot be the same".to_string(),
        });

        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({
                "title": ["This field is required."],
                "content": ["invalid char"],
                "non_field_errors": ["Title and content cannot be the same"],
            })
        );
        assert_eq!(
            errors.to_string(),
            "This field is required., invalid char, Title and content cannot be the same"
        );
    }

    #[test]
    fn test_issue_codes() {
        assert_eq!(ValidationIssue::MissingField.code(), "required");
        assert_eq!(ValidationIssue::TypeCoercion("x".into()).code(), "invalid");
        assert_eq!(rejected("x").code(), "v");
    }
}
