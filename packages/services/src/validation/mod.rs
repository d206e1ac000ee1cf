pub mod context;
pub mod errors;
pub mod field;
pub mod field_validators;
pub mod lookup;
pub mod object_validators;
pub mod password;
pub mod schema;
pub mod value;

// Re-export common types and functions
pub use context::ValidationContext;
pub use errors::{ObjectRejection, Rejection, SchemaFault, ValidationErrors, ValidationIssue, NON_FIELD_ERRORS};
pub use field::{FieldDeclaration, FieldKind, FieldValidator};
pub use lookup::{RelatedLookup, UniqueIndex};
pub use object_validators::{fields_differ, ObjectValidator};
pub use password::{validate_password, PasswordPolicy, PasswordValidationError};
pub use schema::{JsonMap, RecordSchema, RecordSchemaBuilder, RepresentationError, ValidationOutcome};
pub use value::{FieldValue, RawInput, ValidatedData};
