use std::fmt;
use std::sync::Arc;

use super::context::ValidationContext;
use super::errors::ObjectRejection;
use super::value::ValidatedData;

type ObjectCheck = dyn Fn(&ValidatedData, &ValidationContext) -> Result<(), ObjectRejection> + Send + Sync;

/// A named check that sees every coerced field of the record at once
#[derive(Clone)]
pub struct ObjectValidator {
    name: String,
    check: Arc<ObjectCheck>,
}

impl ObjectValidator {
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&ValidatedData, &ValidationContext) -> Result<(), ObjectRejection> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn check(&self, data: &ValidatedData, ctx: &ValidationContext) -> Result<(), ObjectRejection> {
        (self.check)(data, ctx)
    }
}

impl fmt::Debug for ObjectValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectValidator").field("name", &self.name).finish()
    }
}

/// Reject records where `first` and `second` hold the same value.
///
/// The rejection is attached to `attach_to` when given, otherwise to the
/// record as a whole. Records missing either field (partial updates) pass.
pub fn fields_differ(
    name: &str,
    first: &str,
    second: &str,
    attach_to: Option<&str>,
    message: &str,
) -> ObjectValidator {
    let first = first.to_string();
    let second = second.to_string();
    let attach_to = attach_to.map(str::to_string);
    let message = message.to_string();
    ObjectValidator::new(name, move |data, _| match (data.get(&first), data.get(&second)) {
        (Some(a), Some(b)) if a == b => Err(match &attach_to {
            Some(field) => ObjectRejection::on_field(field.clone(), message.clone()),
            None => ObjectRejection::non_field(message.clone()),
        }),
        _ => Ok(()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::value::FieldValue;

    fn record(title: &str, content: &str) -> ValidatedData {
        vec![
            ("title".to_string(), FieldValue::text(title)),
            ("content".to_string(), FieldValue::text(content)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_fields_differ_non_field() {
        let validator = fields_differ("distinct", "title", "content", None, "same");
        let ctx = ValidationContext::new();

        assert!(validator.check(&record("a", "b"), &ctx).is_ok());
        assert_eq!(
            validator.check(&record("a", "a"), &ctx),
            Err(ObjectRejection::non_field("same"))
        );
    }

    #[test]
    fn test_fields_differ_attached_to_field() {
        let validator = fields_differ("distinct", "title", "content", Some("content"), "same");
        assert_eq!(
            validator.check(&record("a", "a"), &ValidationContext::new()),
            Err(ObjectRejection::on_field("content", "same"))
        );
    }

    #[test]
    fn test_fields_differ_skips_missing_fields() {
        let validator = fields_differ("distinct", "title", "content", None, "same");
        let partial: ValidatedData = vec![("title".to_string(), FieldValue::text("a"))]
            .into_iter()
            .collect();
        assert!(validator.check(&partial, &ValidationContext::new()).is_ok());
    }
}
