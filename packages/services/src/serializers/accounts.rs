use crate::validation::field_validators::{email_format, strong_password};
use crate::validation::{
    fields_differ, FieldDeclaration, FieldKind, PasswordPolicy, RawInput, RecordSchema, SchemaFault, ValidationContext,
    ValidationOutcome,
};

pub struct SignUpSerializer {
    schema: RecordSchema,
}

impl SignUpSerializer {
    pub fn new(policy: PasswordPolicy) -> Self {
        let schema = RecordSchema::builder("sign_up")
            .field(FieldDeclaration::text("email").validator(email_format()))
            .field(FieldDeclaration::new("password", password_kind()).validator(strong_password(policy)))
            .build();
        Self { schema }
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    pub fn validate(&self, input: &RawInput, ctx: &ValidationContext) -> Result<ValidationOutcome, SchemaFault> {
        self.schema.validate(input, ctx)
    }
}

pub struct ChangePasswordSerializer {
    schema: RecordSchema,
}

impl ChangePasswordSerializer {
    pub fn new(policy: PasswordPolicy) -> Self {
        let schema = RecordSchema::builder("change_password")
            .field(FieldDeclaration::new("current_password", password_kind()))
            .field(FieldDeclaration::new("new_password", password_kind()).validator(strong_password(policy)))
            .object_validator(fields_differ(
                "passwords_differ",
                "current_password",
                "new_password",
                Some("new_password"),
                "New password must be different from current password",
            ))
            .build();
        Self { schema }
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    pub fn validate(&self, input: &RawInput, ctx: &ValidationContext) -> Result<ValidationOutcome, SchemaFault> {
        self.schema.validate(input, ctx)
    }
}

// Passwords are taken verbatim; surrounding whitespace is part of the secret
fn password_kind() -> FieldKind {
    FieldKind::Text {
        allow_blank: false,
        trim_whitespace: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::input;
    use crate::validation::ValidationIssue;
    use serde_json::json;

    #[test]
    fn test_sign_up_validation() {
        let serializer = SignUpSerializer::new(PasswordPolicy::default());
        let ctx = ValidationContext::new();

        let valid = serializer
            .validate(&input(json!({ "email": "test@example.com", "password": "SecureP@ssw0rd123!" })), &ctx)
            .unwrap();
        assert!(valid.is_valid());

        let invalid = serializer
            .validate(&input(json!({ "email": "not-an-email", "password": "short" })), &ctx)
            .unwrap();
        let messages = invalid.errors().unwrap().messages();
        assert_eq!(messages["email"], vec!["Email format is invalid".to_string()]);
        assert_eq!(
            messages["password"],
            vec!["Password must be at least 12 characters long".to_string()]
        );
    }

    #[test]
    fn test_sign_up_keeps_password_whitespace() {
        let serializer = SignUpSerializer::new(PasswordPolicy::default());
        let outcome = serializer
            .validate(
                &input(json!({ "email": "test@example.com", "password": " SecureP@ssw0rd123! " })),
                &ValidationContext::new(),
            )
            .unwrap();
        assert_eq!(
            outcome.data().unwrap().text("password"),
            Some(" SecureP@ssw0rd123! ")
        );
    }

    #[test]
    fn test_change_password_must_differ() {
        let serializer = ChangePasswordSerializer::new(PasswordPolicy::default());
        let outcome = serializer
            .validate(
                &input(json!({ "current_password": "SameP@ssw0rd123!", "new_password": "SameP@ssw0rd123!" })),
                &ValidationContext::new(),
            )
            .unwrap();

        let errors = outcome.errors().unwrap();
        assert!(errors.non_field().is_empty());
        assert_eq!(
            errors.field("new_password"),
            &[ValidationIssue::ObjectValidatorRejected {
                validator: "passwords_differ".to_string(),
                message: "New password must be different from current password".to_string(),
            }]
        );
    }

    #[test]
    fn test_change_password_weak_new_password_skips_object_check() {
        let serializer = ChangePasswordSerializer::new(PasswordPolicy::default());
        let outcome = serializer
            .validate(
                &input(json!({ "current_password": "weak", "new_password": "weak" })),
                &ValidationContext::new(),
            )
            .unwrap();

        let errors = outcome.errors().unwrap();
        assert_eq!(errors.field("new_password")[0].code(), "strong_password");
        assert_eq!(errors.field_error_count(), 1);
    }
}
