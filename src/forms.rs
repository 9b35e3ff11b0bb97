//! Draft records submitted from the create/edit forms.
//!
//! Validation is required-field presence plus date parsing; the backend owns
//! anything stricter.

use serde::{Deserialize, Serialize};

use crate::filters::parse_date;
use crate::models::{ApplicationStatus, ReminderType};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{field} must be a YYYY-MM-DD date, got {value:?}")]
    InvalidDate { field: &'static str, value: String },
    #[error("email address is invalid: {0}")]
    InvalidEmail(String),
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(())
}

fn require_date(field: &'static str, value: &str) -> Result<(), ValidationError> {
    require(field, value)?;
    if parse_date(value).is_none() {
        return Err(ValidationError::InvalidDate { field, value: value.to_owned() });
    }
    Ok(())
}

/// Check the registration form before touching the user table.
///
/// # Errors
///
/// Returns the first missing field, or [`ValidationError::InvalidEmail`] when
/// the email has no `@`.
pub fn validate_registration(name: &str, email: &str, password: &str) -> Result<(), ValidationError> {
    require("name", name)?;
    require("email", email)?;
    require("password", password)?;
    if !email.contains('@') {
        return Err(ValidationError::InvalidEmail(email.to_owned()));
    }
    Ok(())
}

// =============================================================================
// DRAFTS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub company: String,
    pub position: String,
    pub status: ApplicationStatus,
    pub applied_date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_url: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl NewApplication {
    /// # Errors
    ///
    /// Returns the first missing required field or an unparsable date.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("company", &self.company)?;
        require("position", &self.position)?;
        require_date("appliedDate", &self.applied_date)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResume {
    pub title: String,
    pub file_name: String,
    #[serde(default)]
    pub is_default: bool,
}

impl NewResume {
    /// # Errors
    ///
    /// Returns the first missing required field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("fileName", &self.file_name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReminder {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: ReminderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
}

impl NewReminder {
    /// # Errors
    ///
    /// Returns the first missing required field or an unparsable date.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require_date("date", &self.date)
    }
}

#[cfg(test)]
#[path = "forms_test.rs"]
mod tests;
