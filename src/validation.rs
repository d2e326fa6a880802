//! Client-side Validation
//!
//! Field rules checked before any form is submitted. A form that fails
//! validation never reaches the network.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::forms::{EmailForm, LoginForm, PasswordForm, RegisterForm, VerifyEmailForm};
use crate::models::TaskDraft;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const OTP_LEN: usize = 4;
pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Field name -> first error message for that field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    /// Record an error; the first error per field wins
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// A form value object with a fixed validation schema
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

fn check_email(errors: &mut FieldErrors, value: &str) {
    if value.trim().is_empty() {
        errors.insert("email", "Email is required");
    } else if !is_valid_email(value) {
        errors.insert("email", "Invalid email format");
    }
}

fn check_password(errors: &mut FieldErrors, value: &str) {
    if value.is_empty() {
        errors.insert("password", "Password is required");
    } else if value.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        );
    }
}

fn check_confirmation(errors: &mut FieldErrors, password: &str, confirmation: &str) {
    if confirmation.is_empty() {
        errors.insert("password_confirmation", "Confirm password is required");
    } else if password != confirmation {
        errors.insert("password_confirmation", "Password and confirm password don't match");
    }
}

impl Validate for LoginForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);
        errors.into_result()
    }
}

impl Validate for RegisterForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.name.trim().is_empty() {
            errors.insert("name", "Name is required");
        }
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);
        check_confirmation(&mut errors, &self.password, &self.password_confirmation);
        errors.into_result()
    }
}

impl Validate for VerifyEmailForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&mut errors, &self.email);
        let otp = self.otp.trim();
        if otp.is_empty() {
            errors.insert("otp", "OTP is required");
        } else if otp.len() != OTP_LEN || !otp.bytes().all(|b| b.is_ascii_digit()) {
            errors.insert("otp", format!("OTP must be a {}-digit number", OTP_LEN));
        }
        errors.into_result()
    }
}

impl Validate for EmailForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&mut errors, &self.email);
        errors.into_result()
    }
}

impl Validate for PasswordForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_password(&mut errors, &self.password);
        check_confirmation(&mut errors, &self.password, &self.password_confirmation);
        errors.into_result()
    }
}

impl Validate for TaskDraft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.title.trim().is_empty() {
            errors.insert("title", "Title is required");
        } else if self.title.chars().count() > MAX_TITLE_LEN {
            errors.insert(
                "title",
                format!("Title cannot exceed {} characters", MAX_TITLE_LEN),
            );
        }
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            errors.insert(
                "description",
                format!("Description cannot exceed {} characters", MAX_DESCRIPTION_LEN),
            );
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_login_password_is_rejected() {
        let form = LoginForm {
            email: "a@b.com".to_string(),
            password: "short".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("password"), Some("Password must be at least 8 characters"));
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("  ada@example.co.uk "));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada example@x.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_register_reports_every_bad_field() {
        let form = RegisterForm {
            name: "  ".to_string(),
            email: "nope".to_string(),
            password: "longenough".to_string(),
            password_confirmation: "different1".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("email"), Some("Invalid email format"));
        assert!(!errors.contains("password"));
        assert_eq!(
            errors.get("password_confirmation"),
            Some("Password and confirm password don't match")
        );
    }

    #[test]
    fn test_valid_register_form() {
        let form = RegisterForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "s3cretpass".to_string(),
            password_confirmation: "s3cretpass".to_string(),
        };
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_otp_must_be_numeric_and_exact_length() {
        let mut form = VerifyEmailForm {
            email: "ada@example.com".to_string(),
            otp: "12a4".to_string(),
        };
        assert!(form.validate().unwrap_err().contains("otp"));

        form.otp = "12345".to_string();
        assert!(form.validate().is_err());

        form.otp = "1234".to_string();
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_task_draft_bounds() {
        let draft = TaskDraft {
            title: "x".repeat(MAX_TITLE_LEN + 1),
            description: "y".repeat(MAX_DESCRIPTION_LEN + 1),
        };
        let errors = draft.validate().unwrap_err();
        assert!(errors.contains("title"));
        assert!(errors.contains("description"));

        let draft = TaskDraft {
            title: "x".repeat(MAX_TITLE_LEN),
            description: String::new(),
        };
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn test_blank_title_is_required() {
        let draft = TaskDraft { title: "   ".to_string(), description: String::new() };
        assert_eq!(draft.validate().unwrap_err().get("title"), Some("Title is required"));
    }
}
