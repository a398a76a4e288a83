//! Form field validation
//!
//! Each form has an explicit ordered list of named field checks producing
//! a structured error set, so validation order and message text are
//! reproducible. Uniqueness checks need the database and live in the user
//! query module; handlers append those to the same error list.

use serde::Serialize;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Field must contain at least one non-whitespace character
pub fn require_non_blank(field: &str, value: &str) -> Option<FieldError> {
    if value.trim().is_empty() {
        Some(FieldError::new(field, "This field is required."))
    } else {
        None
    }
}

/// Field may not contain decimal digits (first/last name rule)
pub fn require_digit_free(field: &str, value: &str) -> Option<FieldError> {
    if value.chars().any(|c| c.is_ascii_digit()) {
        Some(FieldError::new(field, "This field may not contain numbers."))
    } else {
        None
    }
}

/// Two entries (e.g. password and its confirmation) must match exactly
pub fn require_match(field: &str, a: &str, b: &str) -> Option<FieldError> {
    if a != b {
        Some(FieldError::new(field, "The two values did not match."))
    } else {
        None
    }
}

/// Note form fields
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NoteForm {
    pub title: String,
    pub text: String,
}

/// Validate a new or edited note: title and text both required
pub fn validate_note_form(form: &NoteForm) -> Vec<FieldError> {
    [
        require_non_blank("title", &form.title),
        require_non_blank("text", &form.text),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Registration form fields
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub password1: String,
    pub password2: String,
}

/// Field checks for registration that need no database access
pub fn validate_registration_form(form: &RegistrationForm) -> Vec<FieldError> {
    [
        require_non_blank("username", &form.username),
        require_non_blank("email", &form.email),
        require_digit_free("first_name", &form.first_name),
        require_digit_free("last_name", &form.last_name),
        require_non_blank("password1", &form.password1),
        require_match("password2", &form.password1, &form.password2),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Account-info update form fields
#[derive(Debug, Clone, serde::Deserialize)]
pub struct AccountForm {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Field checks for account update that need no database access
pub fn validate_account_form(form: &AccountForm) -> Vec<FieldError> {
    [
        require_non_blank("username", &form.username),
        require_non_blank("email", &form.email),
        require_digit_free("first_name", &form.first_name),
        require_digit_free("last_name", &form.last_name),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Password change form fields
#[derive(Debug, Clone, serde::Deserialize)]
pub struct PasswordForm {
    pub old_password: String,
    pub new_password1: String,
    pub new_password2: String,
}

/// Field checks for password change; the old-password verification needs
/// the stored credential and is appended by the handler
pub fn validate_password_form(form: &PasswordForm) -> Vec<FieldError> {
    [
        require_non_blank("new_password1", &form.new_password1),
        require_match("new_password2", &form.new_password1, &form.new_password2),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_whitespace_values_are_rejected() {
        assert!(require_non_blank("title", "").is_some());
        assert!(require_non_blank("title", "   \t").is_some());
        assert!(require_non_blank("title", "Great show").is_none());
    }

    #[test]
    fn names_with_digits_are_rejected() {
        assert!(require_digit_free("first_name", "J0hn").is_some());
        assert!(require_digit_free("first_name", "John").is_none());
        // Empty names are allowed; only digits are the constraint
        assert!(require_digit_free("last_name", "").is_none());
    }

    #[test]
    fn note_form_reports_each_blank_field_in_order() {
        let errors = validate_note_form(&NoteForm {
            title: "".to_string(),
            text: " ".to_string(),
        });
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "text"]);
    }

    #[test]
    fn valid_note_form_produces_no_errors() {
        let errors = validate_note_form(&NoteForm {
            title: "Opener".to_string(),
            text: "Tight set.".to_string(),
        });
        assert!(errors.is_empty());
    }

    #[test]
    fn registration_requires_matching_passwords() {
        let form = RegistrationForm {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Moss".to_string(),
            password1: "qwertyuiop".to_string(),
            password2: "qwertyuio".to_string(),
        };
        let errors = validate_registration_form(&form);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "password2");
    }

    #[test]
    fn password_form_requires_non_blank_and_match() {
        let form = PasswordForm {
            old_password: "old".to_string(),
            new_password1: "".to_string(),
            new_password2: "x".to_string(),
        };
        let errors = validate_password_form(&form);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["new_password1", "new_password2"]);
    }
}
