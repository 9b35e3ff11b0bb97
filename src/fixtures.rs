//! Canned payloads served when the backend cannot be reached.
//!
//! DESIGN
//! ======
//! The gateway consults `match_fixture` only after a connection-level
//! failure. Routes are matched by method and by substring of the request path
//! (never the base URL), first match wins, so `/dashboard/stats` must sit
//! ahead of anything it could be confused with.
//! The stats payload is derived from the static arrays rather than hard-coded
//! so the counts can never drift from the records they summarize.

use reqwest::Method;
use serde_json::Value;

use crate::filters::count_by_status;
use crate::models::{
    Analytics, Application, ApplicationStatus, DashboardStats, Reminder, ReminderType, Resume, Series,
};

const RECENT_APPLICATIONS: usize = 5;
const UPCOMING_REMINDERS: usize = 3;

// =============================================================================
// ROUTE TABLE
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixtureRoute {
    DashboardStats,
    Analytics,
    Applications,
    Resumes,
    Reminders,
}

const ROUTES: [(&str, FixtureRoute); 5] = [
    ("/dashboard/stats", FixtureRoute::DashboardStats),
    ("/analytics", FixtureRoute::Analytics),
    ("/applications", FixtureRoute::Applications),
    ("/resumes", FixtureRoute::Resumes),
    ("/reminders", FixtureRoute::Reminders),
];

/// Find the fixture route for a failed request to `path`, if any.
#[must_use]
pub fn route_for(method: &Method, path: &str) -> Option<FixtureRoute> {
    if *method != Method::GET {
        return None;
    }
    ROUTES
        .iter()
        .find(|(fragment, _)| path.contains(fragment))
        .map(|(_, route)| *route)
}

/// Build the JSON body for a failed request, if a fixture covers it.
#[must_use]
pub fn match_fixture(method: &Method, path: &str) -> Option<Value> {
    route_for(method, path).map(payload)
}

/// JSON body for a fixture route.
#[must_use]
pub fn payload(route: FixtureRoute) -> Value {
    let value = match route {
        FixtureRoute::DashboardStats => serde_json::to_value(dashboard_stats()),
        FixtureRoute::Analytics => serde_json::to_value(analytics()),
        FixtureRoute::Applications => serde_json::to_value(applications()),
        FixtureRoute::Resumes => serde_json::to_value(resumes()),
        FixtureRoute::Reminders => serde_json::to_value(reminders()),
    };
    // These types only hold strings, numbers and enums; serialization cannot fail.
    value.unwrap_or(Value::Null)
}

// =============================================================================
// STATIC RECORDS
// =============================================================================

#[must_use]
pub fn applications() -> Vec<Application> {
    vec![
        Application {
            id: "1".into(),
            company: "Google".into(),
            position: "Software Engineer".into(),
            status: ApplicationStatus::Interview,
            applied_date: "2024-01-15".into(),
            location: "Mountain View, CA".into(),
            salary: Some(150_000),
            job_url: Some("https://careers.google.com".into()),
            notes: "Technical interview scheduled".into(),
        },
        Application {
            id: "2".into(),
            company: "Microsoft".into(),
            position: "Frontend Developer".into(),
            status: ApplicationStatus::Applied,
            applied_date: "2024-01-20".into(),
            location: "Seattle, WA".into(),
            salary: Some(130_000),
            job_url: Some("https://careers.microsoft.com".into()),
            notes: "Waiting for response".into(),
        },
        Application {
            id: "3".into(),
            company: "Amazon".into(),
            position: "Full Stack Developer".into(),
            status: ApplicationStatus::Offer,
            applied_date: "2024-01-10".into(),
            location: "Remote".into(),
            salary: Some(140_000),
            job_url: Some("https://amazon.jobs".into()),
            notes: "Offer received, negotiating".into(),
        },
    ]
}

#[must_use]
pub fn resumes() -> Vec<Resume> {
    vec![
        Resume {
            id: "1".into(),
            title: "Software Engineer Resume".into(),
            file_name: "resume_swe_2024.pdf".into(),
            version: 3,
            is_default: true,
            created_at: "2024-01-01".into(),
            updated_at: "2024-01-12".into(),
        },
        Resume {
            id: "2".into(),
            title: "Frontend Developer Resume".into(),
            file_name: "resume_frontend_2024.pdf".into(),
            version: 1,
            is_default: false,
            created_at: "2024-01-05".into(),
            updated_at: "2024-01-05".into(),
        },
    ]
}

#[must_use]
pub fn reminders() -> Vec<Reminder> {
    vec![
        Reminder {
            id: "1".into(),
            title: "Follow up with Google".into(),
            description: "Send thank-you email after technical interview".into(),
            date: "2024-01-25".into(),
            kind: ReminderType::FollowUp,
            application_id: Some("1".into()),
            completed: false,
        },
        Reminder {
            id: "2".into(),
            title: "Microsoft interview prep".into(),
            description: "Review system design and React fundamentals".into(),
            date: "2024-01-28".into(),
            kind: ReminderType::Interview,
            application_id: Some("2".into()),
            completed: false,
        },
        Reminder {
            id: "3".into(),
            title: "Amazon offer deadline".into(),
            description: "Decide on the offer".into(),
            date: "2024-02-01".into(),
            kind: ReminderType::Deadline,
            application_id: Some("3".into()),
            completed: false,
        },
        Reminder {
            id: "4".into(),
            title: "Update portfolio".into(),
            description: "Add latest side project".into(),
            date: "2024-02-05".into(),
            kind: ReminderType::Other,
            application_id: None,
            completed: false,
        },
    ]
}

// =============================================================================
// DERIVED PAYLOADS
// =============================================================================

#[must_use]
pub fn dashboard_stats() -> DashboardStats {
    let applications = applications();
    let counts = count_by_status(&applications);
    let count = |status: ApplicationStatus| counts.get(&status).copied().unwrap_or(0);
    DashboardStats {
        total_applications: applications.len(),
        applied_count: count(ApplicationStatus::Applied),
        interview_count: count(ApplicationStatus::Interview),
        offer_count: count(ApplicationStatus::Offer),
        rejected_count: count(ApplicationStatus::Rejected),
        recent_applications: applications.into_iter().take(RECENT_APPLICATIONS).collect(),
        upcoming_reminders: reminders().into_iter().take(UPCOMING_REMINDERS).collect(),
    }
}

fn series(labels: &[&str], values: &[u32]) -> Series {
    Series { labels: labels.iter().map(|l| (*l).to_owned()).collect(), values: values.to_vec() }
}

#[must_use]
pub fn analytics() -> Analytics {
    Analytics {
        applications_by_month: series(&["Oct", "Nov", "Dec", "Jan", "Feb", "Mar"], &[4, 7, 5, 12, 9, 6]),
        status_distribution: series(&["Applied", "Interview", "Offer", "Rejected"], &[15, 8, 3, 10]),
        applications_by_source: series(&["LinkedIn", "Company Site", "Referral", "Job Board"], &[14, 9, 6, 7]),
        response_rate: 58.3,
        interview_rate: 22.2,
        offer_rate: 8.3,
        average_response_days: 6.5,
    }
}

#[cfg(test)]
#[path = "fixtures_test.rs"]
mod tests;
