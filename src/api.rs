//! Typed endpoints over the gateway.
//!
//! Only the list/stats/analytics reads have fixtures; writes need a live
//! backend and fail with the transport error otherwise.

use serde_json::json;

use crate::forms::{NewApplication, NewReminder, NewResume};
use crate::gateway::{Gateway, GatewayError};
use crate::models::{Analytics, Application, DashboardStats, Reminder, Resume};

fn application_path(id: &str) -> String {
    format!("/applications/{id}")
}

fn resume_path(id: &str) -> String {
    format!("/resumes/{id}")
}

fn reminder_path(id: &str) -> String {
    format!("/reminders/{id}")
}

impl Gateway {
    /// `GET /applications`.
    ///
    /// # Errors
    ///
    /// See [`Gateway::send`].
    pub async fn list_applications(&self) -> Result<Vec<Application>, GatewayError> {
        self.get("/applications").await
    }

    /// `POST /applications` after checking required fields.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] before any request is made when the
    /// draft is incomplete; otherwise see [`Gateway::send`].
    pub async fn create_application(&self, draft: &NewApplication) -> Result<Application, GatewayError> {
        draft.validate()?;
        self.post("/applications", draft).await
    }

    /// `PUT /applications/{id}`.
    ///
    /// # Errors
    ///
    /// Same as [`Gateway::create_application`].
    pub async fn update_application(&self, id: &str, draft: &NewApplication) -> Result<Application, GatewayError> {
        draft.validate()?;
        self.put(&application_path(id), draft).await
    }

    /// `DELETE /applications/{id}`.
    ///
    /// # Errors
    ///
    /// See [`Gateway::send`].
    pub async fn delete_application(&self, id: &str) -> Result<(), GatewayError> {
        self.delete(&application_path(id)).await
    }

    /// `GET /resumes`.
    ///
    /// # Errors
    ///
    /// See [`Gateway::send`].
    pub async fn list_resumes(&self) -> Result<Vec<Resume>, GatewayError> {
        self.get("/resumes").await
    }

    /// `POST /resumes`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] for an incomplete draft; otherwise
    /// see [`Gateway::send`].
    pub async fn create_resume(&self, draft: &NewResume) -> Result<Resume, GatewayError> {
        draft.validate()?;
        self.post("/resumes", draft).await
    }

    /// `DELETE /resumes/{id}`.
    ///
    /// # Errors
    ///
    /// See [`Gateway::send`].
    pub async fn delete_resume(&self, id: &str) -> Result<(), GatewayError> {
        self.delete(&resume_path(id)).await
    }

    /// `GET /reminders`.
    ///
    /// # Errors
    ///
    /// See [`Gateway::send`].
    pub async fn list_reminders(&self) -> Result<Vec<Reminder>, GatewayError> {
        self.get("/reminders").await
    }

    /// `POST /reminders`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] for an incomplete draft; otherwise
    /// see [`Gateway::send`].
    pub async fn create_reminder(&self, draft: &NewReminder) -> Result<Reminder, GatewayError> {
        draft.validate()?;
        self.post("/reminders", draft).await
    }

    /// `PUT /reminders/{id}`.
    ///
    /// # Errors
    ///
    /// Same as [`Gateway::create_reminder`].
    pub async fn update_reminder(&self, id: &str, draft: &NewReminder) -> Result<Reminder, GatewayError> {
        draft.validate()?;
        self.put(&reminder_path(id), draft).await
    }

    /// Mark a reminder done with `PUT /reminders/{id}`.
    ///
    /// # Errors
    ///
    /// See [`Gateway::send`].
    pub async fn complete_reminder(&self, id: &str) -> Result<Reminder, GatewayError> {
        self.put(&reminder_path(id), &json!({ "completed": true })).await
    }

    /// `DELETE /reminders/{id}`.
    ///
    /// # Errors
    ///
    /// See [`Gateway::send`].
    pub async fn delete_reminder(&self, id: &str) -> Result<(), GatewayError> {
        self.delete(&reminder_path(id)).await
    }

    /// `GET /dashboard/stats`.
    ///
    /// # Errors
    ///
    /// See [`Gateway::send`].
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, GatewayError> {
        self.get("/dashboard/stats").await
    }

    /// `GET /analytics`.
    ///
    /// # Errors
    ///
    /// See [`Gateway::send`].
    pub async fn analytics(&self) -> Result<Analytics, GatewayError> {
        self.get("/analytics").await
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
