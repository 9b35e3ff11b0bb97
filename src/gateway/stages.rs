//! Outbound and inbound request stages.
//!
//! DESIGN
//! ======
//! Each stage is a pure function. Outbound stages rewrite the request;
//! `classify` turns the transport outcome into an `Inbound` verdict. The
//! gateway applies the verdict's side effects (session teardown, redirect)
//! so none of these functions touch shared state.

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde_json::Value;

use super::GatewayError;
use super::request::{ApiRequest, ApiResponse, RawResponse, ResponseSource};
use super::transport::TransportError;
use crate::config::FixtureMode;
use crate::fixtures;
use crate::session::bearer;

const UNAUTHORIZED: u16 = 401;

// =============================================================================
// OUTBOUND
// =============================================================================

fn set_authorization(mut request: ApiRequest, value: &str) -> ApiRequest {
    match HeaderValue::from_str(value) {
        Ok(header) => {
            request.headers.insert(AUTHORIZATION, header);
        }
        Err(e) => tracing::warn!(error = %e, "authorization value is not a valid header; sending without it"),
    }
    request
}

/// Apply the session's default `Authorization` header unless the request
/// already carries one.
#[must_use]
pub fn apply_default_authorization(request: ApiRequest, default: Option<&str>) -> ApiRequest {
    match default {
        Some(value) if !request.headers.contains_key(AUTHORIZATION) => set_authorization(request, value),
        _ => request,
    }
}

/// Attach the persisted token as a bearer credential. Without a token the
/// request is left as is.
#[must_use]
pub fn attach_bearer(request: ApiRequest, token: Option<&str>) -> ApiRequest {
    match token {
        Some(token) if !token.is_empty() => set_authorization(request, &bearer(token)),
        _ => request,
    }
}

// =============================================================================
// INBOUND
// =============================================================================

/// What the gateway should do with a transport outcome.
#[derive(Debug)]
pub enum Inbound {
    /// Backend answered 2xx.
    Pass(ApiResponse),
    /// Backend unreachable; serve this fixture body instead.
    Fixture(Value),
    /// Backend rejected the credential.
    Unauthorized,
    /// Hand the error to the caller unchanged.
    Fail(GatewayError),
}

fn parse_body(body: &str) -> Result<Value, GatewayError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| GatewayError::Decode(e.to_string()))
}

fn classify_response(raw: RawResponse) -> Inbound {
    match raw.status {
        200..=299 => match parse_body(&raw.body) {
            Ok(body) => Inbound::Pass(ApiResponse { status: raw.status, body, source: ResponseSource::Backend }),
            Err(e) => Inbound::Fail(e),
        },
        UNAUTHORIZED => Inbound::Unauthorized,
        status => Inbound::Fail(GatewayError::Status { status, body: raw.body }),
    }
}

fn classify_error(error: TransportError, method: &Method, path: &str, mode: FixtureMode) -> Inbound {
    if mode == FixtureMode::Disabled || !error.is_unreachable() {
        return Inbound::Fail(error.into());
    }
    match fixtures::match_fixture(method, path) {
        Some(body) => Inbound::Fixture(body),
        None => Inbound::Fail(error.into()),
    }
}

/// Decide the fate of a transport outcome for the request `method path`.
///
/// `path` is the request's route relative to the base URL; fixtures never
/// see the base address.
#[must_use]
pub fn classify(
    result: Result<RawResponse, TransportError>,
    method: &Method,
    path: &str,
    mode: FixtureMode,
) -> Inbound {
    match result {
        Ok(raw) => classify_response(raw),
        Err(error) => classify_error(error, method, path, mode),
    }
}

#[cfg(test)]
#[path = "stages_test.rs"]
mod tests;
