//! Request gateway: the one configured HTTP client the dashboard talks through.
//!
//! ARCHITECTURE
//! ============
//! `Gateway::send` composes the stages explicitly:
//!
//! ```text
//! request -> apply_default_authorization -> attach_bearer -> transport
//!         -> classify -> Pass | Fixture | Unauthorized | Fail
//! ```
//!
//! `Fixture` resolves as a 200 built from canned data. `Unauthorized` tears
//! the session down and redirects to the login view before the caller sees
//! [`GatewayError::Unauthorized`].
//!
//! TRADE-OFFS
//! ==========
//! Fixture substitution masks real outages as success. It is on by default
//! (`FixtureMode::Fallback`) and can be turned off through configuration.

pub mod request;
pub mod stages;
pub mod transport;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use request::{ApiRequest, ApiResponse, RawResponse, ResponseSource};
use stages::Inbound;
pub use transport::{ReqwestTransport, Transport, TransportError};

use crate::config::{FixtureMode, GatewayConfig};
use crate::effects::{LOGIN_ROUTE, Navigator};
use crate::forms::ValidationError;
use crate::session::Session;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("backend returned status {status}")]
    Status { status: u16, body: String },
    #[error("session rejected by backend; log in again")]
    Unauthorized,
    #[error("response decode failed: {0}")]
    Decode(String),
    #[error("request encode failed: {0}")]
    Encode(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl GatewayError {
    /// Best-effort human message, preferring a `message` field in the
    /// backend's error body.
    #[must_use]
    pub fn user_message(&self) -> String {
        if let Self::Status { body, .. } = self {
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
                if let Some(message) = value.get("message").and_then(serde_json::Value::as_str) {
                    return message.to_owned();
                }
            }
            return "Something went wrong. Please try again.".to_owned();
        }
        self.to_string()
    }
}

// =============================================================================
// GATEWAY
// =============================================================================

pub struct Gateway {
    base_url: String,
    fixtures: FixtureMode,
    transport: Arc<dyn Transport>,
    session: Session,
    navigator: Arc<dyn Navigator>,
}

impl Gateway {
    #[must_use]
    pub fn new(
        config: &GatewayConfig,
        transport: Arc<dyn Transport>,
        session: Session,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            fixtures: config.fixtures,
            transport,
            session,
            navigator,
        }
    }

    /// Build a gateway backed by a real `reqwest` client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_reqwest(
        config: &GatewayConfig,
        session: Session,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, GatewayError> {
        let transport = ReqwestTransport::new(config.timeouts)?;
        Ok(Self::new(config, Arc::new(transport), session, navigator))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run one request through the stage chain.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Unauthorized`] after a 401 (the session is
    /// already cleared), [`GatewayError::Status`] for other non-2xx answers,
    /// and the transport error when the backend is unreachable and no fixture
    /// applies.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, GatewayError> {
        let request = stages::apply_default_authorization(request, self.session.default_authorization().as_deref());
        let request = stages::attach_bearer(request, self.session.stored_token().as_deref());
        let url = request.url(&self.base_url);
        tracing::debug!(method = %request.method, %url, "api request");

        let result = self.transport.send(&request, &url).await;
        match stages::classify(result, &request.method, &request.path, self.fixtures) {
            Inbound::Pass(response) => Ok(response),
            Inbound::Fixture(body) => {
                tracing::warn!(method = %request.method, %url, "backend unreachable; serving fixture");
                Ok(ApiResponse::fixture(body))
            }
            Inbound::Unauthorized => {
                tracing::warn!(%url, "backend rejected session; logging out");
                self.session.teardown();
                self.navigator.redirect(LOGIN_ROUTE);
                Err(GatewayError::Unauthorized)
            }
            Inbound::Fail(e) => {
                tracing::debug!(error = %e, %url, "api request failed");
                Err(e)
            }
        }
    }

    /// `GET path`, decoded into `T`.
    ///
    /// # Errors
    ///
    /// See [`Gateway::send`]; also fails when the body does not decode.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        self.send(ApiRequest::get(path)).await?.json()
    }

    /// `POST path` with a JSON body, decoded into `T`.
    ///
    /// # Errors
    ///
    /// See [`Gateway::send`].
    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, GatewayError> {
        let body = encode(body)?;
        self.send(ApiRequest::post(path, body)).await?.json()
    }

    /// `PUT path` with a JSON body, decoded into `T`.
    ///
    /// # Errors
    ///
    /// See [`Gateway::send`].
    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, GatewayError> {
        let body = encode(body)?;
        self.send(ApiRequest::put(path, body)).await?.json()
    }

    /// `DELETE path`, ignoring any response body.
    ///
    /// # Errors
    ///
    /// See [`Gateway::send`].
    pub async fn delete(&self, path: &str) -> Result<(), GatewayError> {
        self.send(ApiRequest::delete(path)).await?;
        Ok(())
    }
}

fn encode<B: Serialize>(body: &B) -> Result<serde_json::Value, GatewayError> {
    serde_json::to_value(body).map_err(|e| GatewayError::Encode(e.to_string()))
}

#[cfg(test)]
#[path = "gateway_test.rs"]
mod tests;
