use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use url::Url;
use uuid::Uuid;

use super::context::ValidationContext;
use super::errors::{Rejection, ValidationIssue};
use super::field_validators;
use super::lookup::RelatedLookup;
use super::value::{json_type_name, FieldValue};

type FieldCheck = dyn Fn(&FieldValue, &ValidationContext) -> Result<(), Rejection> + Send + Sync;
type CoerceHook = dyn Fn(FieldValue, &ValidationContext) -> Result<FieldValue, String> + Send + Sync;

const TRUE_VALUES: &[&str] = &["t", "y", "yes", "true", "on", "1"];
const FALSE_VALUES: &[&str] = &["f", "n", "no", "false", "off", "0"];

/// A named check run against one field's coerced value
#[derive(Clone)]
pub struct FieldValidator {
    name: String,
    check: Arc<FieldCheck>,
}

impl FieldValidator {
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&FieldValue, &ValidationContext) -> Result<(), Rejection> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn check(&self, value: &FieldValue, ctx: &ValidationContext) -> Result<(), Rejection> {
        (self.check)(value, ctx)
    }
}

impl fmt::Debug for FieldValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldValidator").field("name", &self.name).finish()
    }
}

/// The primitive type a field coerces to
#[derive(Clone)]
pub enum FieldKind {
    Text { allow_blank: bool, trim_whitespace: bool },
    Integer { min: Option<i64>, max: Option<i64> },
    Float,
    Boolean,
    DateTime,
    Url,
    /// Primary key(s) of related objects, checked against `lookup`
    Reference {
        lookup: Arc<dyn RelatedLookup>,
        many: bool,
        allow_empty: bool,
    },
}

impl FieldKind {
    pub fn text() -> Self {
        FieldKind::Text {
            allow_blank: false,
            trim_whitespace: true,
        }
    }

    pub fn integer() -> Self {
        FieldKind::Integer { min: None, max: None }
    }

    fn coerce(&self, raw: &Value, ctx: &ValidationContext) -> Result<FieldValue, String> {
        match self {
            FieldKind::Text {
                allow_blank,
                trim_whitespace,
            } => coerce_text(raw, *allow_blank, *trim_whitespace),
            FieldKind::Integer { min, max } => coerce_integer(raw, *min, *max),
            FieldKind::Float => coerce_float(raw),
            FieldKind::Boolean => coerce_bool(raw),
            FieldKind::DateTime => coerce_datetime(raw),
            FieldKind::Url => coerce_url(raw),
            FieldKind::Reference {
                lookup,
                many: false,
                ..
            } => resolve_pk(raw, lookup.as_ref(), ctx).map(FieldValue::Reference),
            FieldKind::Reference {
                lookup,
                many: true,
                allow_empty,
            } => {
                let items = match raw {
                    Value::Array(items) => items,
                    other => {
                        return Err(format!(
                            "Expected a list of items but got type \"{}\".",
                            json_type_name(other)
                        ))
                    }
                };
                if items.is_empty() && !allow_empty {
                    return Err("This list may not be empty.".to_string());
                }
                items
                    .iter()
                    .map(|item| resolve_pk(item, lookup.as_ref(), ctx))
                    .collect::<Result<Vec<Uuid>, String>>()
                    .map(FieldValue::References)
            }
        }
    }
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text {
                allow_blank,
                trim_whitespace,
            } => f
                .debug_struct("Text")
                .field("allow_blank", allow_blank)
                .field("trim_whitespace", trim_whitespace)
                .finish(),
            FieldKind::Integer { min, max } => f
                .debug_struct("Integer")
                .field("min", min)
                .field("max", max)
                .finish(),
            FieldKind::Float => f.write_str("Float"),
            FieldKind::Boolean => f.write_str("Boolean"),
            FieldKind::DateTime => f.write_str("DateTime"),
            FieldKind::Url => f.write_str("Url"),
            FieldKind::Reference {
                many, allow_empty, ..
            } => f
                .debug_struct("Reference")
                .field("many", many)
                .field("allow_empty", allow_empty)
                .finish_non_exhaustive(),
        }
    }
}

fn coerce_text(raw: &Value, allow_blank: bool, trim: bool) -> Result<FieldValue, String> {
    let text = match raw {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return Err("Not a valid string.".to_string()),
    };
    // whitespace-only input is blank only once trimmed
    let text = if trim { text.trim().to_string() } else { text };
    if text.is_empty() && !allow_blank {
        return Err("This field may not be blank.".to_string());
    }
    Ok(FieldValue::Text(text))
}

fn coerce_integer(raw: &Value, min: Option<i64>, max: Option<i64>) -> Result<FieldValue, String> {
    const INVALID: &str = "A valid integer is required.";

    let value = match raw {
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i,
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => f as i64,
            _ => return Err(INVALID.to_string()),
        },
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| INVALID.to_string())?,
        _ => return Err(INVALID.to_string()),
    };

    if let Some(min) = min {
        if value < min {
            return Err(format!("Ensure this value is greater than or equal to {}.", min));
        }
    }
    if let Some(max) = max {
        if value > max {
            return Err(format!("Ensure this value is less than or equal to {}.", max));
        }
    }
    Ok(FieldValue::Integer(value))
}

fn coerce_float(raw: &Value) -> Result<FieldValue, String> {
    const INVALID: &str = "A valid number is required.";

    let value = match raw {
        Value::Number(n) => n.as_f64().ok_or_else(|| INVALID.to_string())?,
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| INVALID.to_string())?,
        _ => return Err(INVALID.to_string()),
    };
    if !value.is_finite() {
        return Err(INVALID.to_string());
    }
    Ok(FieldValue::Float(value))
}

fn coerce_bool(raw: &Value) -> Result<FieldValue, String> {
    const INVALID: &str = "Must be a valid boolean.";

    match raw {
        Value::Bool(b) => Ok(FieldValue::Bool(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Ok(FieldValue::Bool(true)),
            Some(0) => Ok(FieldValue::Bool(false)),
            _ => Err(INVALID.to_string()),
        },
        Value::String(s) => {
            let lowered = s.trim().to_lowercase();
            if TRUE_VALUES.contains(&lowered.as_str()) {
                Ok(FieldValue::Bool(true))
            } else if FALSE_VALUES.contains(&lowered.as_str()) {
                Ok(FieldValue::Bool(false))
            } else {
                Err(INVALID.to_string())
            }
        }
        _ => Err(INVALID.to_string()),
    }
}

fn coerce_datetime(raw: &Value) -> Result<FieldValue, String> {
    const INVALID: &str = "Datetime has wrong format. Use RFC 3339 instead.";

    let Value::String(s) = raw else {
        return Err(INVALID.to_string());
    };
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| FieldValue::DateTime(dt.with_timezone(&Utc)))
        .map_err(|_| INVALID.to_string())
}

fn coerce_url(raw: &Value) -> Result<FieldValue, String> {
    const INVALID: &str = "Enter a valid URL.";

    let Value::String(s) = raw else {
        return Err("Not a valid string.".to_string());
    };
    let trimmed = s.trim();
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {
            Ok(FieldValue::Text(trimmed.to_string()))
        }
        _ => Err(INVALID.to_string()),
    }
}

fn resolve_pk(raw: &Value, lookup: &dyn RelatedLookup, ctx: &ValidationContext) -> Result<Uuid, String> {
    let Value::String(s) = raw else {
        return Err(format!(
            "Incorrect type. Expected pk value, received {}.",
            json_type_name(raw)
        ));
    };
    let id = Uuid::parse_str(s.trim()).map_err(|_| format!("\"{}\" is not a valid UUID.", s))?;
    if !lookup.contains(id, ctx) {
        return Err(format!("Invalid pk \"{}\" - object does not exist.", id));
    }
    Ok(id)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    Full,
    Partial,
}

pub(crate) enum FieldOutcome {
    Value(FieldValue),
    Skipped,
    Rejected(ValidationIssue),
    Defect { validator: String, message: String },
}

/// One declared field of a record schema
#[derive(Clone)]
pub struct FieldDeclaration {
    name: String,
    kind: FieldKind,
    required: bool,
    allow_null: bool,
    default: Option<FieldValue>,
    validators: Vec<FieldValidator>,
    to_internal: Option<Arc<CoerceHook>>,
}

impl FieldDeclaration {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            allow_null: false,
            default: None,
            validators: Vec::new(),
            to_internal: None,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::text())
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::integer())
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Float)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub fn datetime(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::DateTime)
    }

    pub fn url(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Url)
    }

    pub fn reference(name: impl Into<String>, lookup: Arc<dyn RelatedLookup>) -> Self {
        Self::new(
            name,
            FieldKind::Reference {
                lookup,
                many: false,
                allow_empty: false,
            },
        )
    }

    pub fn references(name: impl Into<String>, lookup: Arc<dyn RelatedLookup>, allow_empty: bool) -> Self {
        Self::new(
            name,
            FieldKind::Reference {
                lookup,
                many: true,
                allow_empty,
            },
        )
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn allow_null(mut self) -> Self {
        self.allow_null = true;
        self
    }

    /// Value used when the field is absent; implies the field is optional
    pub fn default(mut self, value: FieldValue) -> Self {
        self.required = false;
        self.default = Some(value);
        self
    }

    /// Accept empty strings. Has no effect on non-text fields.
    pub fn allow_blank(mut self) -> Self {
        if let FieldKind::Text { allow_blank, .. } = &mut self.kind {
            *allow_blank = true;
        }
        self
    }

    pub fn max_length(self, max: usize) -> Self {
        self.validator(field_validators::max_length(max))
    }

    pub fn min_length(self, min: usize) -> Self {
        self.validator(field_validators::min_length(min))
    }

    /// Append a validator; validators run in the order they were added
    pub fn validator(mut self, validator: FieldValidator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn validate_with<F>(self, name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&FieldValue, &ValidationContext) -> Result<(), Rejection> + Send + Sync + 'static,
    {
        self.validator(FieldValidator::new(name, check))
    }

    /// Post-process the coerced value before validators see it
    pub fn to_internal_value<F>(mut self, hook: F) -> Self
    where
        F: Fn(FieldValue, &ValidationContext) -> Result<FieldValue, String> + Send + Sync + 'static,
    {
        self.to_internal = Some(Arc::new(hook));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn validators(&self) -> &[FieldValidator] {
        &self.validators
    }

    fn coerce(&self, raw: &Value, ctx: &ValidationContext) -> Result<FieldValue, String> {
        let value = self.kind.coerce(raw, ctx)?;
        match &self.to_internal {
            Some(hook) => hook(value, ctx),
            None => Ok(value),
        }
    }

    pub(crate) fn run(&self, raw: Option<&Value>, ctx: &ValidationContext, mode: Mode) -> FieldOutcome {
        let Some(raw) = raw else {
            return match (mode, &self.default) {
                (Mode::Partial, _) => FieldOutcome::Skipped,
                (Mode::Full, Some(default)) => FieldOutcome::Value(default.clone()),
                (Mode::Full, None) if self.required => FieldOutcome::Rejected(ValidationIssue::MissingField),
                (Mode::Full, None) => FieldOutcome::Skipped,
            };
        };

        if raw.is_null() {
            return if self.allow_null {
                FieldOutcome::Value(FieldValue::Null)
            } else {
                FieldOutcome::Rejected(ValidationIssue::TypeCoercion(
                    "This field may not be null.".to_string(),
                ))
            };
        }

        let value = match self.coerce(raw, ctx) {
            Ok(value) => value,
            Err(message) => return FieldOutcome::Rejected(ValidationIssue::TypeCoercion(message)),
        };

        for validator in &self.validators {
            tracing::debug!(field = %self.name, validator = %validator.name(), "running field validator");
            match validator.check(&value, ctx) {
                Ok(()) => {}
                Err(Rejection::Invalid(message)) => {
                    return FieldOutcome::Rejected(ValidationIssue::FieldValidatorRejected {
                        validator: validator.name().to_string(),
                        message,
                    });
                }
                Err(Rejection::Defect(message)) => {
                    return FieldOutcome::Defect {
                        validator: validator.name().to_string(),
                        message,
                    };
                }
            }
        }

        FieldOutcome::Value(value)
    }
}

impl fmt::Debug for FieldDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDeclaration")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("allow_null", &self.allow_null)
            .field("default", &self.default)
            .field("validators", &self.validators)
            .field("to_internal_value", &self.to_internal.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::lookup::MockRelatedLookup;
    use serde_json::json;

    fn coerce(field: &FieldDeclaration, raw: Value) -> Result<FieldValue, ValidationIssue> {
        match field.run(Some(&raw), &ValidationContext::new(), Mode::Full) {
            FieldOutcome::Value(v) => Ok(v),
            FieldOutcome::Rejected(issue) => Err(issue),
            FieldOutcome::Skipped => panic!("field skipped"),
            FieldOutcome::Defect { message, .. } => panic!("defect: {}", message),
        }
    }

    fn coercion_error(message: &str) -> ValidationIssue {
        ValidationIssue::TypeCoercion(message.to_string())
    }

    #[test]
    fn test_text_coercion() {
        let field = FieldDeclaration::text("title");
        assert_eq!(coerce(&field, json!("  Hello ")), Ok(FieldValue::text("Hello")));
        assert_eq!(coerce(&field, json!(42)), Ok(FieldValue::text("42")));
        assert_eq!(coerce(&field, json!(true)), Err(coercion_error("Not a valid string.")));
        assert_eq!(coerce(&field, json!("   ")), Err(coercion_error("This field may not be blank.")));

        let blank_ok = FieldDeclaration::text("bio").allow_blank();
        assert_eq!(coerce(&blank_ok, json!("")), Ok(FieldValue::text("")));
    }

    #[test]
    fn test_untrimmed_text_keeps_whitespace() {
        let field = FieldDeclaration::new(
            "secret",
            FieldKind::Text {
                allow_blank: false,
                trim_whitespace: false,
            },
        );
        assert_eq!(coerce(&field, json!("   ")), Ok(FieldValue::text("   ")));
        assert_eq!(coerce(&field, json!(" a ")), Ok(FieldValue::text(" a ")));
        assert_eq!(coerce(&field, json!("")), Err(coercion_error("This field may not be blank.")));
    }

    #[test]
    fn test_integer_coercion() {
        let field = FieldDeclaration::new("age", FieldKind::Integer { min: Some(0), max: Some(150) });
        assert_eq!(coerce(&field, json!(42)), Ok(FieldValue::Integer(42)));
        assert_eq!(coerce(&field, json!("42")), Ok(FieldValue::Integer(42)));
        assert_eq!(coerce(&field, json!(7.0)), Ok(FieldValue::Integer(7)));
        assert_eq!(coerce(&field, json!(7.5)), Err(coercion_error("A valid integer is required.")));
        assert_eq!(coerce(&field, json!("abc")), Err(coercion_error("A valid integer is required.")));
        assert_eq!(
            coerce(&field, json!(-1)),
            Err(coercion_error("Ensure this value is greater than or equal to 0."))
        );
        assert_eq!(
            coerce(&field, json!(200)),
            Err(coercion_error("Ensure this value is less than or equal to 150."))
        );
    }

    #[test]
    fn test_float_and_bool_coercion() {
        let float = FieldDeclaration::float("ratio");
        assert_eq!(coerce(&float, json!("0.5")), Ok(FieldValue::Float(0.5)));
        assert_eq!(coerce(&float, json!("NaN")), Err(coercion_error("A valid number is required.")));

        let flag = FieldDeclaration::boolean("published");
        assert_eq!(coerce(&flag, json!("Yes")), Ok(FieldValue::Bool(true)));
        assert_eq!(coerce(&flag, json!(0)), Ok(FieldValue::Bool(false)));
        assert_eq!(coerce(&flag, json!("maybe")), Err(coercion_error("Must be a valid boolean.")));
    }

    #[test]
    fn test_datetime_and_url_coercion() {
        let when = FieldDeclaration::datetime("published_at");
        let parsed = coerce(&when, json!("2024-05-29T09:04:00+02:00")).unwrap();
        assert_eq!(
            parsed.as_datetime().unwrap().to_rfc3339(),
            "2024-05-29T07:04:00+00:00"
        );
        assert!(coerce(&when, json!("29/05/2024")).is_err());

        let link = FieldDeclaration::url("image_link");
        assert_eq!(
            coerce(&link, json!("https://example.com/a.png")),
            Ok(FieldValue::text("https://example.com/a.png"))
        );
        assert_eq!(coerce(&link, json!("ftp://example.com")), Err(coercion_error("Enter a valid URL.")));
        assert_eq!(coerce(&link, json!("not a url")), Err(coercion_error("Enter a valid URL.")));
    }

    #[test]
    fn test_reference_coercion() {
        let known = Uuid::new_v4();
        let mut lookup = MockRelatedLookup::new();
        lookup.expect_contains().returning(move |id, _| id == known);
        let lookup: Arc<dyn RelatedLookup> = Arc::new(lookup);

        let single = FieldDeclaration::reference("author", lookup.clone());
        assert_eq!(coerce(&single, json!(known.to_string())), Ok(FieldValue::Reference(known)));
        assert_eq!(
            coerce(&single, json!(5)),
            Err(coercion_error("Incorrect type. Expected pk value, received number."))
        );
        let unknown = Uuid::new_v4();
        assert_eq!(
            coerce(&single, json!(unknown.to_string())),
            Err(coercion_error(&format!("Invalid pk \"{}\" - object does not exist.", unknown)))
        );

        let many = FieldDeclaration::references("tags", lookup.clone(), false);
        assert_eq!(
            coerce(&many, json!([known.to_string()])),
            Ok(FieldValue::References(vec![known]))
        );
        assert_eq!(coerce(&many, json!([])), Err(coercion_error("This list may not be empty.")));
        assert_eq!(
            coerce(&many, json!("x")),
            Err(coercion_error("Expected a list of items but got type \"str\"."))
        );

        let many_empty_ok = FieldDeclaration::references("tags", lookup, true);
        assert_eq!(coerce(&many_empty_ok, json!([])), Ok(FieldValue::References(vec![])));
    }

    #[test]
    fn test_missing_null_and_default() {
        let ctx = ValidationContext::new();
        let required = FieldDeclaration::text("title");
        assert!(matches!(
            required.run(None, &ctx, Mode::Full),
            FieldOutcome::Rejected(ValidationIssue::MissingField)
        ));
        assert!(matches!(required.run(None, &ctx, Mode::Partial), FieldOutcome::Skipped));
        assert!(matches!(
            required.run(Some(&Value::Null), &ctx, Mode::Full),
            FieldOutcome::Rejected(ValidationIssue::TypeCoercion(_))
        ));

        let defaulted = FieldDeclaration::boolean("published").default(FieldValue::Bool(false));
        assert!(matches!(
            defaulted.run(None, &ctx, Mode::Full),
            FieldOutcome::Value(FieldValue::Bool(false))
        ));

        let nullable = FieldDeclaration::text("subtitle").optional().allow_null();
        assert!(matches!(nullable.run(None, &ctx, Mode::Full), FieldOutcome::Skipped));
        assert!(matches!(
            nullable.run(Some(&Value::Null), &ctx, Mode::Full),
            FieldOutcome::Value(FieldValue::Null)
        ));
    }

    #[test]
    fn test_to_internal_value_runs_before_validators() {
        let field = FieldDeclaration::text("slug")
            .to_internal_value(|value, _| match value {
                FieldValue::Text(s) => Ok(FieldValue::Text(s.to_lowercase())),
                other => Ok(other),
            })
            .validate_with("lowercase_only", |value, _| match value.as_text() {
                Some(s) if s.chars().any(char::is_uppercase) => Err(Rejection::invalid("uppercase")),
                _ => Ok(()),
            });

        assert_eq!(coerce(&field, json!("Hello-World")), Ok(FieldValue::text("hello-world")));
    }
}
