use async_graphql::SimpleObject;
use repositories::RepositoryError;
use services::{PermissionDenied, ValidationErrors};
use std::fmt;

#[derive(SimpleObject, Debug)]
pub struct AuthError {
    pub message: String,
}

impl From<PermissionDenied> for AuthError {
    fn from(e: PermissionDenied) -> Self {
        AuthError { message: e.to_string() }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message.as_str())
    }
}

#[derive(SimpleObject, Debug)]
pub struct NotFoundError {
    pub message: String,
}

impl From<RepositoryError> for NotFoundError {
    fn from(e: RepositoryError) -> Self {
        NotFoundError { message: e.to_string() }
    }
}

#[derive(SimpleObject, Debug, PartialEq)]
pub struct FieldErrorType {
    pub field: String,
    pub messages: Vec<String>,
}

#[derive(SimpleObject, Debug)]
pub struct ValidationErrorType {
    pub message: String,
    pub field_errors: Vec<FieldErrorType>,
    pub non_field_errors: Vec<String>,
}

impl From<ValidationErrors> for ValidationErrorType {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors.to_string_list();
        let field_errors = errors
            .fields()
            .map(|(field, issues)| FieldErrorType {
                field: field.to_string(),
                messages: issues.iter().map(|issue| issue.message().to_string()).collect(),
            })
            .collect();
        let non_field_errors = errors
            .non_field()
            .iter()
            .map(|issue| issue.message().to_string())
            .collect();
        ValidationErrorType {
            message,
            field_errors,
            non_field_errors,
        }
    }
}
