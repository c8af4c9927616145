//! Field validation for account forms
//!
//! Pure validation functions applied before any request is issued. Each
//! returns `Ok(())` on pass and the human-readable message on failure; the
//! caller decides where to surface it.

use std::sync::OnceLock;

use regex::Regex;

use crate::account::AccountDraft;

/// Form field a validation failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Firstname,
    Email,
    Password,
    ConfirmPassword,
    Mobile,
}

/// A validation failure tied to the offending field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

fn mobile_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{10}$").expect("valid mobile pattern"))
}

/// Validate that mandatory fields are present (only firstname is mandatory)
pub fn validate_required_fields(draft: &AccountDraft) -> Result<(), String> {
    if draft.firstname.is_empty() {
        return Err("firstname is mandatory".to_string());
    }
    Ok(())
}

/// Validate the mobile number: mandatory, exactly 10 digits
pub fn validate_mobile(mobileno: &str) -> Result<(), String> {
    if mobileno.is_empty() {
        return Err("Mobile no is mandatory".to_string());
    }
    if !mobile_pattern().is_match(mobileno) {
        return Err("Mobile No must be 10 digits".to_string());
    }
    Ok(())
}

/// Validate the email address.
///
/// The suffix check runs before the `@` check; both must pass, so "a.com"
/// without an `@` still fails on the second check.
pub fn validate_email(email: &str) -> Result<(), String> {
    if !email.ends_with(".com") && !email.ends_with(".in") {
        return Err("Email must end with .com or .in".to_string());
    }
    if !email.contains('@') {
        return Err("Email must contain \"@\"".to_string());
    }
    Ok(())
}

/// Validate password strength: 8-12 chars with at least one uppercase,
/// one lowercase, one digit, and one special character
pub fn validate_password(password: &str) -> Result<(), String> {
    let len = password.chars().count();
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| !c.is_ascii_alphanumeric());

    if !(8..=12).contains(&len) || !has_upper || !has_lower || !has_digit || !has_special {
        return Err("Password must be between 8 and 12 characters and contain at least one uppercase letter, one lowercase letter, one numeric digit, and one special character.".to_string());
    }
    Ok(())
}

/// Validate that the confirmation matches the password
pub fn validate_confirm_password(password: &str, confirm: &str) -> Result<(), String> {
    if password != confirm {
        return Err("Password and confirm password do not match".to_string());
    }
    Ok(())
}

/// Run all validators over a draft in the fixed submission order:
/// required fields, email, password, confirm-password, mobile.
/// Stops at the first failure and reports the offending field.
pub fn validate_draft(draft: &AccountDraft) -> Result<(), FieldError> {
    validate_required_fields(draft).map_err(|message| FieldError {
        field: Field::Firstname,
        message,
    })?;
    validate_email(&draft.email).map_err(|message| FieldError {
        field: Field::Email,
        message,
    })?;
    validate_password(&draft.password).map_err(|message| FieldError {
        field: Field::Password,
        message,
    })?;
    validate_confirm_password(&draft.password, &draft.confirm_password).map_err(|message| {
        FieldError {
            field: Field::ConfirmPassword,
            message,
        }
    })?;
    validate_mobile(&draft.mobileno).map_err(|message| FieldError {
        field: Field::Mobile,
        message,
    })?;
    Ok(())
}
