use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use super::context::ValidationContext;
use super::errors::{ObjectRejection, SchemaFault, ValidationErrors, ValidationIssue};
use super::field::{FieldDeclaration, FieldOutcome, Mode};
use super::object_validators::ObjectValidator;
use super::value::{RawInput, ValidatedData};

pub type JsonMap = serde_json::Map<String, Value>;

type InputHook = dyn Fn(RawInput, &ValidationContext) -> RawInput + Send + Sync;
type ComputedField = dyn Fn(&JsonMap) -> Value + Send + Sync;
type RepresentationHook = dyn Fn(JsonMap, &ValidationContext) -> JsonMap + Send + Sync;

/// What a validation call produced for well-formed or malformed input alike
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationOutcome {
    Valid(ValidatedData),
    Invalid(ValidationErrors),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid(_))
    }

    pub fn data(&self) -> Option<&ValidatedData> {
        match self {
            ValidationOutcome::Valid(data) => Some(data),
            ValidationOutcome::Invalid(_) => None,
        }
    }

    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            ValidationOutcome::Valid(_) => None,
            ValidationOutcome::Invalid(errors) => Some(errors),
        }
    }

    pub fn into_result(self) -> Result<ValidatedData, ValidationErrors> {
        match self {
            ValidationOutcome::Valid(data) => Ok(data),
            ValidationOutcome::Invalid(errors) => Err(errors),
        }
    }
}

#[derive(Debug, Error)]
pub enum RepresentationError {
    #[error("could not serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("`{0}` records do not serialize to a JSON object")]
    NotAnObject(String),
}

/// Ordered field declarations and object validators for one record type.
///
/// Built once through [`RecordSchema::builder`] and shared read-only; a
/// schema is `Send + Sync`, so concurrent validations need no coordination.
#[derive(Clone)]
pub struct RecordSchema {
    name: String,
    fields: IndexMap<String, FieldDeclaration>,
    object_validators: Vec<ObjectValidator>,
    input_hook: Option<Arc<InputHook>>,
    computed_fields: Vec<(String, Arc<ComputedField>)>,
    representation_hook: Option<Arc<RepresentationHook>>,
}

impl RecordSchema {
    pub fn builder(name: impl Into<String>) -> RecordSchemaBuilder {
        RecordSchemaBuilder {
            schema: RecordSchema {
                name: name.into(),
                fields: IndexMap::new(),
                object_validators: Vec::new(),
                input_hook: None,
                computed_fields: Vec::new(),
                representation_hook: None,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field(&self, name: &str) -> Option<&FieldDeclaration> {
        self.fields.get(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn object_validators(&self) -> &[ObjectValidator] {
        &self.object_validators
    }

    /// Validate a complete record: every required field must be present
    pub fn validate(&self, input: &RawInput, ctx: &ValidationContext) -> Result<ValidationOutcome, SchemaFault> {
        self.run(input, ctx, Mode::Full)
    }

    /// Validate a partial update: absent fields are skipped rather than reported or defaulted
    pub fn validate_partial(
        &self,
        input: &RawInput,
        ctx: &ValidationContext,
    ) -> Result<ValidationOutcome, SchemaFault> {
        self.run(input, ctx, Mode::Partial)
    }

    fn prepare_input<'a>(&self, input: &'a RawInput, ctx: &ValidationContext) -> Cow<'a, RawInput> {
        match &self.input_hook {
            Some(hook) => Cow::Owned(hook(input.clone(), ctx)),
            None => Cow::Borrowed(input),
        }
    }

    fn fault(&self, validator: String, target: String, message: String) -> SchemaFault {
        tracing::error!(schema = %self.name, %validator, %target, %message, "defective validator");
        SchemaFault {
            schema: self.name.clone(),
            validator,
            target,
            message,
        }
    }

    fn run(&self, input: &RawInput, ctx: &ValidationContext, mode: Mode) -> Result<ValidationOutcome, SchemaFault> {
        let input = self.prepare_input(input, ctx);
        let mut data = ValidatedData::new();
        let mut errors = ValidationErrors::new();

        for (name, field) in &self.fields {
            match field.run(input.get(name.as_str()), ctx, mode) {
                FieldOutcome::Value(value) => data.insert(name.clone(), value),
                FieldOutcome::Skipped => {}
                FieldOutcome::Rejected(issue) => errors.add_field_issue(name, issue),
                FieldOutcome::Defect { validator, message } => {
                    return Err(self.fault(validator, format!("field `{}`", name), message));
                }
            }
        }

        if !errors.is_empty() {
            tracing::debug!(
                schema = %self.name,
                issues = errors.field_error_count(),
                "field validation failed"
            );
            return Ok(ValidationOutcome::Invalid(errors));
        }

        for validator in &self.object_validators {
            tracing::debug!(schema = %self.name, validator = %validator.name(), "running object validator");
            let issue = |message: String| ValidationIssue::ObjectValidatorRejected {
                validator: validator.name().to_string(),
                message,
            };
            match validator.check(&data, ctx) {
                Ok(()) => {}
                Err(ObjectRejection::NonField(message)) => {
                    errors.add_non_field_issue(issue(message));
                    return Ok(ValidationOutcome::Invalid(errors));
                }
                Err(ObjectRejection::Field { field, message }) => {
                    errors.add_field_issue(&field, issue(message));
                    return Ok(ValidationOutcome::Invalid(errors));
                }
                Err(ObjectRejection::Defect(message)) => {
                    return Err(self.fault(validator.name().to_string(), "record".to_string(), message));
                }
            }
        }

        Ok(ValidationOutcome::Valid(data))
    }

    /// Outgoing form of a stored record: its serialized fields, then computed fields, then the representation hook
    pub fn represent<T: Serialize>(&self, record: &T, ctx: &ValidationContext) -> Result<JsonMap, RepresentationError> {
        let mut repr = match serde_json::to_value(record)? {
            Value::Object(map) => map,
            _ => return Err(RepresentationError::NotAnObject(self.name.clone())),
        };
        for (name, compute) in &self.computed_fields {
            let value = compute(&repr);
            repr.insert(name.clone(), value);
        }
        Ok(match &self.representation_hook {
            Some(hook) => hook(repr, ctx),
            None => repr,
        })
    }
}

impl fmt::Debug for RecordSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordSchema")
            .field("name", &self.name)
            .field("fields", &self.fields.values().collect::<Vec<_>>())
            .field("object_validators", &self.object_validators)
            .field(
                "computed_fields",
                &self.computed_fields.iter().map(|(n, _)| n).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

pub struct RecordSchemaBuilder {
    schema: RecordSchema,
}

impl RecordSchemaBuilder {
    /// Declare a field. Redeclaring a name replaces the earlier declaration in place.
    pub fn field(mut self, field: FieldDeclaration) -> Self {
        self.schema.fields.insert(field.name().to_string(), field);
        self
    }

    pub fn object_validator(mut self, validator: ObjectValidator) -> Self {
        self.schema.object_validators.push(validator);
        self
    }

    /// Rewrite the raw input before any field is coerced
    pub fn to_internal_value<F>(mut self, hook: F) -> Self
    where
        F: Fn(RawInput, &ValidationContext) -> RawInput + Send + Sync + 'static,
    {
        self.schema.input_hook = Some(Arc::new(hook));
        self
    }

    /// Read-only output field derived from the serialized record
    pub fn computed_field<F>(mut self, name: impl Into<String>, compute: F) -> Self
    where
        F: Fn(&JsonMap) -> Value + Send + Sync + 'static,
    {
        self.schema.computed_fields.push((name.into(), Arc::new(compute)));
        self
    }

    pub fn to_representation<F>(mut self, hook: F) -> Self
    where
        F: Fn(JsonMap, &ValidationContext) -> JsonMap + Send + Sync + 'static,
    {
        self.schema.representation_hook = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> RecordSchema {
        self.schema
    }
}
