use std::sync::Arc;

use super::context::ValidationContext;
use super::errors::Rejection;
use super::field::FieldValidator;
use super::lookup::UniqueIndex;
use super::password::PasswordPolicy;
use super::value::FieldValue;
use crate::permissions::has_permission;

fn expect_text<'a>(value: &'a FieldValue, validator: &str) -> Result<&'a str, Rejection> {
    value.as_text().ok_or_else(|| {
        Rejection::defect(format!(
            "`{}` expects a text value, got {}",
            validator,
            value.type_name()
        ))
    })
}

pub fn max_length(max: usize) -> FieldValidator {
    FieldValidator::new("max_length", move |value, _| {
        let text = expect_text(value, "max_length")?;
        if text.chars().count() > max {
            return Err(Rejection::invalid(format!(
                "Ensure this field has no more than {} characters.",
                max
            )));
        }
        Ok(())
    })
}

pub fn min_length(min: usize) -> FieldValidator {
    FieldValidator::new("min_length", move |value, _| {
        let text = expect_text(value, "min_length")?;
        if text.chars().count() < min {
            return Err(Rejection::invalid(format!(
                "Ensure this field has at least {} characters.",
                min
            )));
        }
        Ok(())
    })
}

/// Reject text containing any of `chars`
pub fn forbid_chars(name: &str, chars: &'static str, message: &str) -> FieldValidator {
    let validator = name.to_string();
    let message = message.to_string();
    FieldValidator::new(name, move |value, _| {
        let text = expect_text(value, &validator)?;
        if text.contains(|c: char| chars.contains(c)) {
            return Err(Rejection::invalid(message.clone()));
        }
        Ok(())
    })
}

pub fn email_format() -> FieldValidator {
    FieldValidator::new("email_format", |value, _| {
        let email = expect_text(value, "email_format")?;
        if email.trim().is_empty() {
            return Err(Rejection::invalid("Email cannot be empty"));
        }
        let Some((local, domain)) = email.split_once('@') else {
            return Err(Rejection::invalid("Email format is invalid"));
        };
        if local.is_empty() || !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(Rejection::invalid("Email format is invalid"));
        }
        Ok(())
    })
}

pub fn strong_password(policy: PasswordPolicy) -> FieldValidator {
    FieldValidator::new("strong_password", move |value, _| {
        let password = expect_text(value, "strong_password")?;
        policy
            .check(password)
            .map_err(|e| Rejection::invalid(e.to_string()))
    })
}

pub const UNIQUE_MESSAGE: &str = "This field must be unique.";

/// Reject values already used by another record. The record named by the context's instance id is ignored.
pub fn unique(index: Arc<dyn UniqueIndex>, field: &str) -> FieldValidator {
    let field = field.to_string();
    FieldValidator::new("unique", move |value, ctx: &ValidationContext| {
        if index.is_taken(&field, value, ctx.instance_id()) {
            return Err(Rejection::invalid(UNIQUE_MESSAGE));
        }
        Ok(())
    })
}

/// Only requesters holding `permission` may set this field
pub fn requires_permission(permission: &str) -> FieldValidator {
    let permission = permission.to_string();
    FieldValidator::new("requires_permission", move |_, ctx: &ValidationContext| {
        match ctx.requester() {
            Some(requester) if has_permission(requester, &permission) => Ok(()),
            _ => Err(Rejection::invalid(
                "You do not have permission to change this field.",
            )),
        }
    })
}
