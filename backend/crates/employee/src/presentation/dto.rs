//! Form DTOs
//!
//! Create and update share one form. Missing fields deserialize as empty
//! values and are reported by the `required` rules.

use std::borrow::Cow;

use chrono::NaiveDate;
use kernel::validation::ValidationError as FormErrors;
use serde::Deserialize;
use validator::{Validate, ValidationError};
use web::required;

use crate::domain::entities::EmployeeDraft;
use crate::domain::value_objects::{EmployeeStatus, Gender};

/// `<input type="date">` value format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column width of `employee_allowances.allowance`
pub const MAX_ALLOWANCE_CHARS: usize = 255;

fn gender(value: &str) -> Result<(), ValidationError> {
    match Gender::from_code(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("gender").with_message(Cow::Borrowed("Gender must be Male or Female"))),
    }
}

fn status(value: &str) -> Result<(), ValidationError> {
    match EmployeeStatus::from_code(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("status").with_message(Cow::Borrowed("Status is invalid"))),
    }
}

fn hired_date(value: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| ValidationError::new("date").with_message(Cow::Borrowed("Hired date must be a date (YYYY-MM-DD)")))
}

fn allowances(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().any(|v| !v.trim().is_empty()) {
        Ok(())
    } else {
        Err(ValidationError::new("required"))
    }
}

fn allowance_lengths(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().all(|v| v.trim().chars().count() <= MAX_ALLOWANCE_CHARS) {
        Ok(())
    } else {
        Err(ValidationError::new("length")
            .with_message(Cow::Borrowed("Each allowance must be at most 255 characters")))
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct EmployeeForm {
    #[serde(default)]
    #[validate(
        custom(function = "required", message = "Name is required"),
        length(max = 100, message = "Name must be at most 100 characters")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(
        custom(function = "required", message = "Email is required"),
        email(message = "Email must be a valid email address"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(
        custom(function = "required", message = "Tax number is required"),
        length(max = 64, message = "Tax number must be at most 64 characters")
    )]
    pub tax_number: String,

    #[serde(default)]
    #[validate(
        custom(function = "required", message = "Gender is required"),
        custom(function = "gender")
    )]
    pub gender: String,

    #[serde(default)]
    #[validate(
        custom(function = "required", message = "Hired date is required"),
        custom(function = "hired_date")
    )]
    pub hired_date: String,

    #[serde(default)]
    #[validate(custom(function = "required", message = "Address is required"))]
    pub address: String,

    #[serde(default)]
    #[validate(
        custom(function = "required", message = "Status is required"),
        custom(function = "status")
    )]
    pub status: String,

    /// Repeated `allowances` inputs
    #[serde(default)]
    #[validate(
        custom(function = "allowances", message = "At least one allowance is required"),
        custom(function = "allowance_lengths")
    )]
    pub allowances: Vec<String>,
}

impl EmployeeForm {
    /// Typed draft of a validated form; blank allowance rows are dropped
    pub fn into_draft(self) -> Result<EmployeeDraft, FormErrors> {
        let gender = Gender::from_code(&self.gender)
            .ok_or_else(|| FormErrors::single("gender", "Gender must be Male or Female"))?;
        let status = EmployeeStatus::from_code(&self.status)
            .ok_or_else(|| FormErrors::single("status", "Status is invalid"))?;
        let hired_date = NaiveDate::parse_from_str(self.hired_date.trim(), DATE_FORMAT)
            .map_err(|_| FormErrors::single("hired_date", "Hired date must be a date (YYYY-MM-DD)"))?;

        Ok(EmployeeDraft {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            tax_number: self.tax_number.trim().to_string(),
            gender,
            hired_date,
            address: self.address.trim().to_string(),
            status,
            allowances: self
                .allowances
                .into_iter()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect(),
        })
    }
}
