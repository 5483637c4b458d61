//! Form DTOs (Data Transfer Objects)
//!
//! Every field defaults to an empty string so a missing input surfaces as a
//! field message instead of a deserialization failure.

use std::borrow::Cow;

use serde::Deserialize;
use validator::{Validate, ValidateEmail, ValidationError};
use web::required;

use crate::domain::value_object::user_name::is_valid_username;

/// Values of `agreement` accepted by the register form
const AGREEMENT_VALUES: &[&str] = &["0", "1", "yes", "no"];

fn username_pattern(value: &str) -> Result<(), ValidationError> {
    if is_valid_username(value) {
        Ok(())
    } else {
        Err(ValidationError::new("username")
            .with_message(Cow::Borrowed("Username may only contain letters, digits, '.', '_' and '-'")))
    }
}

/// Email address or username, 3 to 50 characters
fn login_identifier(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let len = value.chars().count();
    if (3..=50).contains(&len) && (value.validate_email() || is_valid_username(value)) {
        Ok(())
    } else {
        Err(ValidationError::new("identifier"))
    }
}

fn agreement(value: &str) -> Result<(), ValidationError> {
    if AGREEMENT_VALUES.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new("agreement"))
    }
}

// ============================================================================
// Login
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginForm {
    /// Username or email
    #[serde(default)]
    #[validate(custom(function = "login_identifier", message = "This username should required and valid"))]
    pub username: String,

    #[serde(default)]
    #[validate(custom(function = "required", message = "Password is required"))]
    pub password: String,

    /// Checkbox value, absent when unchecked
    #[serde(default)]
    pub remember: String,
}

impl LoginForm {
    pub fn remember(&self) -> bool {
        matches!(self.remember.trim(), "1" | "on" | "true")
    }
}

// ============================================================================
// Register
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(
        custom(function = "required", message = "Name is required"),
        length(min = 3, max = 50, message = "Name must be between 3 and 50 characters")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(
        custom(function = "required", message = "Username is required"),
        custom(function = "username_pattern"),
        length(min = 3, max = 20, message = "Username must be between 3 and 20 characters")
    )]
    pub username: String,

    #[serde(default)]
    #[validate(
        custom(function = "required", message = "Email is required"),
        email(message = "Email must be a valid email address"),
        length(min = 3, max = 30, message = "Email must be between 3 and 30 characters")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(
        custom(function = "required", message = "Password is required"),
        length(min = 3, max = 20, message = "Password must be between 3 and 20 characters")
    )]
    pub password: String,

    #[serde(default)]
    #[validate(must_match(other = "password", message = "Password confirmation does not match"))]
    pub password_confirmation: String,

    #[serde(default)]
    #[validate(custom(function = "agreement", message = "You must answer the agreement"))]
    pub agreement: String,
}

// ============================================================================
// Account
// ============================================================================

/// Text fields of the multipart account form
#[derive(Debug, Clone, Default, Validate)]
pub struct AccountForm {
    #[validate(
        custom(function = "required", message = "Name is required"),
        length(min = 3, max = 50, message = "Name must be between 3 and 50 characters")
    )]
    pub name: String,

    #[validate(
        custom(function = "required", message = "Username is required"),
        custom(function = "username_pattern"),
        length(min = 3, max = 20, message = "Username must be between 3 and 20 characters")
    )]
    pub username: String,

    #[validate(
        custom(function = "required", message = "Email is required"),
        email(message = "Email must be a valid email address"),
        length(min = 3, max = 30, message = "Email must be between 3 and 30 characters")
    )]
    pub email: String,

    #[validate(
        custom(function = "required", message = "Current password is required"),
        length(min = 3, max = 20, message = "Current password must be between 3 and 20 characters")
    )]
    pub current_password: String,

    /// Empty keeps the current password
    #[validate(length(max = 20, message = "Password must be at most 20 characters"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Password confirmation does not match"))]
    pub password_confirmation: String,
}

impl AccountForm {
    /// Assign a multipart text field by name; unknown names are ignored
    pub fn set(&mut self, field: &str, value: String) {
        match field {
            "name" => self.name = value,
            "username" => self.username = value,
            "email" => self.email = value,
            "current_password" => self.current_password = value,
            "password" => self.password = value,
            "password_confirmation" => self.password_confirmation = value,
            _ => {}
        }
    }
}
