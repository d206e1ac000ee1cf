use thiserror::Error;

/// Various types of password validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordValidationError {
    #[error("Password must be at least {0} characters long")]
    TooShort(usize),
    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,
    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,
    #[error("Password must contain at least one digit")]
    MissingDigit,
    #[error("Password must contain at least one special character")]
    MissingSpecialChar,
    #[error("Password is too common and easily guessable")]
    CommonPassword,
}

const COMMON_PASSWORDS: &[&str] = &["Password123!", "Qwerty123!", "Admin123!"];

/// Strength rules applied to new passwords. Checks run in a fixed order and stop at the first failure.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_special: bool,
    pub common_passwords: Vec<String>,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 12,
            require_special: true,
            common_passwords: COMMON_PASSWORDS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl PasswordPolicy {
    pub fn check(&self, password: &str) -> Result<(), PasswordValidationError> {
        if password.chars().count() < self.min_length {
            return Err(PasswordValidationError::TooShort(self.min_length));
        }
        if !password.chars().any(char::is_uppercase) {
            return Err(PasswordValidationError::MissingUppercase);
        }
        if !password.chars().any(char::is_lowercase) {
            return Err(PasswordValidationError::MissingLowercase);
        }
        if !password.chars().any(char::is_numeric) {
            return Err(PasswordValidationError::MissingDigit);
        }
        if self.require_special && password.chars().all(char::is_alphanumeric) {
            return Err(PasswordValidationError::MissingSpecialChar);
        }
        if self.common_passwords.iter().any(|common| common == password) {
            return Err(PasswordValidationError::CommonPassword);
        }
        Ok(())
    }
}

/// Validates a password against the default policy
pub fn validate_password(password: &str) -> Result<(), PasswordValidationError> {
    PasswordPolicy::default().check(password)
}
