use super::*;

// =============================================================================
// ApplicationStatus
// =============================================================================

#[test]
fn status_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&ApplicationStatus::Interview).unwrap(), "\"interview\"");
    assert_eq!(serde_json::to_string(&ApplicationStatus::Withdrawn).unwrap(), "\"withdrawn\"");
}

#[test]
fn status_from_str_is_case_insensitive() {
    assert_eq!("Offer".parse::<ApplicationStatus>().unwrap(), ApplicationStatus::Offer);
    assert_eq!(" rejected ".parse::<ApplicationStatus>().unwrap(), ApplicationStatus::Rejected);
}

#[test]
fn status_from_str_rejects_unknown() {
    let err = "ghosted".parse::<ApplicationStatus>().unwrap_err();
    assert!(err.contains("ghosted"));
}

#[test]
fn status_display_matches_wire_name() {
    for status in ApplicationStatus::ALL {
        let wire = serde_json::to_value(status).unwrap();
        assert_eq!(wire, status.to_string());
    }
}

// =============================================================================
// Wire shapes
// =============================================================================

#[test]
fn application_uses_camel_case_fields() {
    let json = serde_json::json!({
        "id": "9",
        "company": "Acme",
        "position": "Engineer",
        "status": "applied",
        "appliedDate": "2024-02-01",
        "jobUrl": "https://acme.test/jobs/1"
    });
    let app: Application = serde_json::from_value(json).unwrap();
    assert_eq!(app.applied_date, "2024-02-01");
    assert_eq!(app.job_url.as_deref(), Some("https://acme.test/jobs/1"));
    assert_eq!(app.salary, None);
    assert!(app.notes.is_empty());
}

#[test]
fn reminder_kind_is_named_type_on_the_wire() {
    let reminder = Reminder {
        id: "r1".into(),
        title: "Follow up".into(),
        description: String::new(),
        date: "2024-02-01".into(),
        kind: ReminderType::FollowUp,
        application_id: Some("1".into()),
        completed: false,
    };
    let value = serde_json::to_value(&reminder).unwrap();
    assert_eq!(value["type"], "follow_up");
    assert_eq!(value["applicationId"], "1");
    assert!(value.get("kind").is_none());
}

#[test]
fn user_record_public_drops_password() {
    let record = UserRecord {
        id: "u1".into(),
        email: "a@b.test".into(),
        name: "A".into(),
        password: "hunter2".into(),
        is_verified: true,
    };
    let public = serde_json::to_string(&record.public()).unwrap();
    assert!(!public.contains("hunter2"));
    assert!(public.contains("\"isVerified\":true"));
}

#[test]
fn user_missing_verified_flag_defaults_false() {
    let user: User = serde_json::from_str(r#"{"id":"1","email":"e@x.test","name":"E"}"#).unwrap();
    assert!(!user.is_verified);
}
