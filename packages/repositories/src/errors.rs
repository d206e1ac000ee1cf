use services::serializers::IncompleteRecord;
use services::validation::field_validators::UNIQUE_MESSAGE;
use services::{ValidationErrors, ValidationIssue};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Uuid },
    #[error("{kind} {id} already exists")]
    Duplicate { kind: &'static str, id: Uuid },
    #[error("{kind} with this {field} already exists")]
    Conflict { kind: &'static str, field: &'static str },
    #[error(transparent)]
    Incomplete(#[from] IncompleteRecord),
    #[error("invalid fixtures: {0}")]
    Fixtures(#[from] serde_json::Error),
}

impl RepositoryError {
    /// A unique-field conflict caught at write time, reported the way the `unique` validator reports it
    pub fn as_validation_errors(&self) -> Option<ValidationErrors> {
        match self {
            RepositoryError::Conflict { field, .. } => Some(ValidationErrors::single(
                field,
                ValidationIssue::FieldValidatorRejected {
                    validator: "unique".to_string(),
                    message: UNIQUE_MESSAGE.to_string(),
                },
            )),
            _ => None,
        }
    }
}
