use super::*;

fn auth_header(request: &ApiRequest) -> Option<&str> {
    request.headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok())
}

fn raw(status: u16, body: &str) -> Result<RawResponse, TransportError> {
    Ok(RawResponse { status, body: body.to_owned() })
}

fn unreachable() -> Result<RawResponse, TransportError> {
    Err(TransportError::Unreachable("connection refused".into()))
}

const APPS_PATH: &str = "/applications";

// =============================================================================
// outbound
// =============================================================================

#[test]
fn attach_bearer_sets_header() {
    let request = attach_bearer(ApiRequest::get("/applications"), Some("tok"));
    assert_eq!(auth_header(&request), Some("Bearer tok"));
}

#[test]
fn attach_bearer_without_token_leaves_request_alone() {
    let request = attach_bearer(ApiRequest::get("/applications"), None);
    assert!(auth_header(&request).is_none());
    let request = attach_bearer(ApiRequest::get("/applications"), Some(""));
    assert!(auth_header(&request).is_none());
}

#[test]
fn attach_bearer_overrides_default() {
    let request = apply_default_authorization(ApiRequest::get("/x"), Some("Bearer old"));
    let request = attach_bearer(request, Some("new"));
    assert_eq!(auth_header(&request), Some("Bearer new"));
}

#[test]
fn default_authorization_does_not_clobber_explicit_header() {
    let mut request = ApiRequest::get("/x");
    request.headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
    let request = apply_default_authorization(request, Some("Bearer tok"));
    assert_eq!(auth_header(&request), Some("Basic abc"));
}

#[test]
fn invalid_header_value_is_dropped() {
    let request = attach_bearer(ApiRequest::get("/x"), Some("bad\ntoken"));
    assert!(auth_header(&request).is_none());
}

// =============================================================================
// inbound: responses
// =============================================================================

#[test]
fn success_passes_through() {
    let verdict = classify(raw(200, r#"[{"id":"1"}]"#), &Method::GET, APPS_PATH, FixtureMode::Fallback);
    let Inbound::Pass(response) = verdict else {
        panic!("expected pass, got {verdict:?}");
    };
    assert_eq!(response.source, ResponseSource::Backend);
    assert_eq!(response.body[0]["id"], "1");
}

#[test]
fn empty_success_body_is_null() {
    let verdict = classify(raw(204, ""), &Method::DELETE, APPS_PATH, FixtureMode::Fallback);
    assert!(matches!(verdict, Inbound::Pass(ApiResponse { body: Value::Null, status: 204, .. })));
}

#[test]
fn malformed_success_body_fails_decode() {
    let verdict = classify(raw(200, "<html>"), &Method::GET, APPS_PATH, FixtureMode::Fallback);
    assert!(matches!(verdict, Inbound::Fail(GatewayError::Decode(_))));
}

#[test]
fn unauthorized_status_is_flagged() {
    let verdict = classify(raw(401, "{}"), &Method::GET, APPS_PATH, FixtureMode::Fallback);
    assert!(matches!(verdict, Inbound::Unauthorized));
}

#[test]
fn other_statuses_pass_through_as_errors() {
    for status in [400, 403, 404, 500, 503] {
        let verdict = classify(raw(status, "oops"), &Method::GET, APPS_PATH, FixtureMode::Fallback);
        match verdict {
            Inbound::Fail(GatewayError::Status { status: got, body }) => {
                assert_eq!(got, status);
                assert_eq!(body, "oops");
            }
            other => panic!("status {status}: unexpected {other:?}"),
        }
    }
}

// =============================================================================
// inbound: transport errors
// =============================================================================

#[test]
fn unreachable_get_with_fixture_substitutes() {
    let verdict = classify(unreachable(), &Method::GET, APPS_PATH, FixtureMode::Fallback);
    let Inbound::Fixture(body) = verdict else {
        panic!("expected fixture, got {verdict:?}");
    };
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[test]
fn unreachable_without_fixture_fails() {
    let verdict = classify(unreachable(), &Method::GET, "/auth/me", FixtureMode::Fallback);
    assert!(matches!(verdict, Inbound::Fail(GatewayError::Transport(TransportError::Unreachable(_)))));
}

#[test]
fn unreachable_post_never_uses_fixture() {
    let verdict = classify(unreachable(), &Method::POST, APPS_PATH, FixtureMode::Fallback);
    assert!(matches!(verdict, Inbound::Fail(GatewayError::Transport(_))));
}

#[test]
fn disabled_mode_surfaces_unreachable() {
    let verdict = classify(unreachable(), &Method::GET, APPS_PATH, FixtureMode::Disabled);
    assert!(matches!(verdict, Inbound::Fail(GatewayError::Transport(TransportError::Unreachable(_)))));
}

#[test]
fn request_errors_never_use_fixture() {
    let verdict = classify(
        Err(TransportError::Request("body read failed".into())),
        &Method::GET,
        APPS_PATH,
        FixtureMode::Fallback,
    );
    assert!(matches!(verdict, Inbound::Fail(GatewayError::Transport(TransportError::Request(_)))));
}
