use async_graphql::MergedObject;
use repositories::RepositoryError;

use crate::errors::ValidationErrorType;

mod blogs;
mod cover_images;
mod user_profiles;

#[derive(MergedObject, Default)]
pub struct Mutations(
    blogs::BlogMutation,
    cover_images::CoverImageMutation,
    user_profiles::UserProfileMutation,
);

/// Log a validator defect before it surfaces as a top-level GraphQL error
pub(crate) fn report_fault(fault: services::SchemaFault) -> services::SchemaFault {
    tracing::error!(%fault, "validation aborted");
    fault
}

/// Result of a repository write. A unique value claimed by a concurrent
/// write since validation comes back as a validation error.
pub(crate) fn stored<T>(result: Result<T, RepositoryError>) -> async_graphql::Result<Result<T, ValidationErrorType>> {
    match result {
        Ok(record) => Ok(Ok(record)),
        Err(e) => match e.as_validation_errors() {
            Some(errors) => {
                tracing::info!(error = %e, "write rejected");
                Ok(Err(errors.into()))
            }
            None => Err(e.into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FieldErrorType;
    use uuid::Uuid;

    #[test]
    fn test_conflict_reads_as_validation_error() {
        let conflict: Result<(), RepositoryError> = Err(RepositoryError::Conflict {
            kind: "Blog",
            field: "cover_image",
        });
        let errors = stored(conflict).unwrap().unwrap_err();
        assert_eq!(
            errors.field_errors,
            vec![FieldErrorType {
                field: "cover_image".to_string(),
                messages: vec!["This field must be unique.".to_string()],
            }]
        );

        let missing: Result<(), RepositoryError> = Err(RepositoryError::NotFound {
            kind: "Blog",
            id: Uuid::new_v4(),
        });
        assert!(stored(missing).is_err());
    }
}
