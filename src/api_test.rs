use super::*;
use crate::forms::ValidationError;
use crate::gateway::TransportError;
use crate::models::{ApplicationStatus, ReminderType};
use crate::test_helpers::{MockTransport, harness, respond};

fn draft_application() -> NewApplication {
    NewApplication {
        company: "Initech".into(),
        position: "Backend Engineer".into(),
        status: ApplicationStatus::Applied,
        applied_date: "2024-03-01".into(),
        location: "Austin, TX".into(),
        salary: Some(120_000),
        job_url: None,
        notes: String::new(),
    }
}

#[test]
fn item_paths() {
    assert_eq!(application_path("7"), "/applications/7");
    assert_eq!(resume_path("a"), "/resumes/a");
    assert_eq!(reminder_path("b"), "/reminders/b");
}

// =============================================================================
// fixture-backed reads
// =============================================================================

#[tokio::test]
async fn reads_fall_back_to_fixtures() {
    let h = harness(MockTransport::unreachable());
    assert_eq!(h.gateway.list_applications().await.unwrap().len(), 3);
    assert_eq!(h.gateway.list_resumes().await.unwrap().len(), 2);
    assert_eq!(h.gateway.list_reminders().await.unwrap().len(), 4);
    assert_eq!(h.gateway.dashboard_stats().await.unwrap().upcoming_reminders.len(), 3);
    assert!(h.gateway.analytics().await.unwrap().response_rate > 0.0);
}

// =============================================================================
// writes
// =============================================================================

#[tokio::test]
async fn create_application_posts_draft() {
    let created = r#"{"id":"99","company":"Initech","position":"Backend Engineer","status":"applied","appliedDate":"2024-03-01"}"#;
    let h = harness(MockTransport::new(vec![respond(201, created)]));
    let app = h.gateway.create_application(&draft_application()).await.unwrap();
    assert_eq!(app.id, "99");

    let seen = h.transport.seen();
    assert_eq!(seen[0].method, reqwest::Method::POST);
    assert!(seen[0].url.ends_with("/applications"));
    assert_eq!(seen[0].body.as_ref().unwrap()["company"], "Initech");
}

#[tokio::test]
async fn invalid_draft_never_reaches_transport() {
    let h = harness(MockTransport::new(vec![respond(201, "{}")]));
    let mut draft = draft_application();
    draft.company.clear();
    let err = h.gateway.create_application(&draft).await.unwrap_err();
    assert!(matches!(err, GatewayError::Validation(ValidationError::Missing("company"))));
    assert!(h.transport.seen().is_empty());
}

#[tokio::test]
async fn writes_without_backend_fail() {
    let h = harness(MockTransport::unreachable());
    let err = h.gateway.create_application(&draft_application()).await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport(TransportError::Unreachable(_))));
}

#[tokio::test]
async fn update_and_delete_hit_item_paths() {
    let updated = r#"{"id":"3","company":"Initech","position":"Backend Engineer","status":"applied","appliedDate":"2024-03-01"}"#;
    let h = harness(MockTransport::new(vec![respond(200, updated), respond(204, "")]));
    h.gateway.update_application("3", &draft_application()).await.unwrap();
    h.gateway.delete_application("3").await.unwrap();

    let seen = h.transport.seen();
    assert_eq!(seen[0].method, reqwest::Method::PUT);
    assert!(seen[0].url.ends_with("/applications/3"));
    assert_eq!(seen[1].method, reqwest::Method::DELETE);
    assert!(seen[1].url.ends_with("/applications/3"));
}

#[tokio::test]
async fn complete_reminder_sends_completed_flag() {
    let done = r#"{"id":"2","title":"Prep","date":"2024-01-28","type":"interview","completed":true}"#;
    let h = harness(MockTransport::new(vec![respond(200, done)]));
    let reminder = h.gateway.complete_reminder("2").await.unwrap();
    assert!(reminder.completed);
    assert_eq!(reminder.kind, ReminderType::Interview);
    assert_eq!(h.transport.seen()[0].body.as_ref().unwrap()["completed"], true);
}

#[tokio::test]
async fn create_reminder_and_resume_validate_first() {
    let h = harness(MockTransport::unreachable());
    let reminder = NewReminder {
        title: String::new(),
        description: String::new(),
        date: "2024-01-01".into(),
        kind: ReminderType::Other,
        application_id: None,
    };
    assert!(matches!(h.gateway.create_reminder(&reminder).await, Err(GatewayError::Validation(_))));
    let resume = NewResume { title: "CV".into(), file_name: "  ".into(), is_default: true };
    assert!(matches!(h.gateway.create_resume(&resume).await, Err(GatewayError::Validation(_))));
    assert!(h.transport.seen().is_empty());
}
