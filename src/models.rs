//! Domain records and wire DTOs.
//!
//! DESIGN
//! ======
//! Field names mirror the JSON the dashboard API speaks (camelCase), so the
//! same types deserialize backend responses and fixture payloads. Dates stay
//! ISO `YYYY-MM-DD` strings on the wire; helpers in `filters` parse them when
//! ordering or formatting is needed.

use serde::{Deserialize, Serialize};

// =============================================================================
// USERS
// =============================================================================

/// The public projection of a user. This is what gets persisted with the
/// session and returned to callers; it never carries a password.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub is_verified: bool,
}

/// A row in the in-memory user table, credentials included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password: String,
    pub is_verified: bool,
}

impl UserRecord {
    #[must_use]
    pub fn public(&self) -> User {
        User { id: self.id.clone(), email: self.email.clone(), name: self.name.clone(), is_verified: self.is_verified }
    }
}

// =============================================================================
// APPLICATIONS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    Interview,
    Offer,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub const ALL: [Self; 5] = [Self::Applied, Self::Interview, Self::Offer, Self::Rejected, Self::Withdrawn];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Interview => "interview",
            Self::Offer => "offer",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown application status: {s}"))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub company: String,
    pub position: String,
    pub status: ApplicationStatus,
    pub applied_date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: Option<u32>,
    #[serde(default)]
    pub job_url: Option<String>,
    #[serde(default)]
    pub notes: String,
}

// =============================================================================
// RESUMES
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: String,
    pub title: String,
    pub file_name: String,
    pub version: u32,
    #[serde(default)]
    pub is_default: bool,
    pub created_at: String,
    pub updated_at: String,
}

// =============================================================================
// REMINDERS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderType {
    FollowUp,
    Interview,
    Deadline,
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: ReminderType,
    #[serde(default)]
    pub application_id: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

// =============================================================================
// DASHBOARD + ANALYTICS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_applications: usize,
    pub applied_count: usize,
    pub interview_count: usize,
    pub offer_count: usize,
    pub rejected_count: usize,
    pub recent_applications: Vec<Application>,
    pub upcoming_reminders: Vec<Reminder>,
}

/// One chart series: parallel label and value arrays.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub applications_by_month: Series,
    pub status_distribution: Series,
    pub applications_by_source: Series,
    pub response_rate: f64,
    pub interview_rate: f64,
    pub offer_rate: f64,
    pub average_response_days: f64,
}

#[cfg(test)]
#[path = "models_test.rs"]
mod tests;
