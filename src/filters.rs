//! List helpers the dashboard views run over small in-memory arrays.

use std::collections::HashMap;

use time::Date;
use time::macros::format_description;

use crate::models::{Application, ApplicationStatus, Reminder};

/// Parse an ISO `YYYY-MM-DD` calendar date.
#[must_use]
pub fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).ok()
}

/// Render an ISO date as `Jan 15, 2024`. Unparsable input is returned as-is.
#[must_use]
pub fn format_date(raw: &str) -> String {
    let Some(date) = parse_date(raw) else {
        return raw.to_owned();
    };
    date.format(format_description!("[month repr:short] [day padding:none], [year]"))
        .unwrap_or_else(|_| raw.to_owned())
}

/// Count applications per status. Statuses with no applications are absent.
#[must_use]
pub fn count_by_status(applications: &[Application]) -> HashMap<ApplicationStatus, usize> {
    let mut counts = HashMap::new();
    for app in applications {
        *counts.entry(app.status).or_insert(0) += 1;
    }
    counts
}

/// Search + status filter for the applications list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    pub status: Option<ApplicationStatus>,
    pub query: Option<String>,
}

impl ApplicationFilter {
    #[must_use]
    pub fn matches(&self, app: &Application) -> bool {
        if let Some(status) = self.status {
            if app.status != status {
                return false;
            }
        }
        let Some(query) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
            return true;
        };
        let needle = query.to_lowercase();
        [&app.company, &app.position, &app.location]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    #[must_use]
    pub fn apply<'a>(&self, applications: &'a [Application]) -> Vec<&'a Application> {
        applications.iter().filter(|app| self.matches(app)).collect()
    }
}

/// Incomplete reminders dated on or after `today`, soonest first.
///
/// Reminders whose date does not parse are skipped.
#[must_use]
pub fn upcoming_reminders(reminders: &[Reminder], today: Date, limit: usize) -> Vec<Reminder> {
    let mut dated: Vec<(Date, &Reminder)> = reminders
        .iter()
        .filter(|r| !r.completed)
        .filter_map(|r| parse_date(&r.date).map(|d| (d, r)))
        .filter(|(d, _)| *d >= today)
        .collect();
    dated.sort_by_key(|(d, _)| *d);
    dated.into_iter().take(limit).map(|(_, r)| r.clone()).collect()
}

#[cfg(test)]
#[path = "filters_test.rs"]
mod tests;
