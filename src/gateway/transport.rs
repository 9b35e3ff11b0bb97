//! The HTTP seam. Production uses `reqwest`; tests script responses.

use super::request::{ApiRequest, RawResponse};
use crate::config::Timeouts;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// No HTTP response at all: refused, DNS, timeout.
    #[error("backend unreachable: {0}")]
    Unreachable(String),
    /// The request could not be built or the response body could not be read.
    #[error("request failed: {0}")]
    Request(String),
}

impl TransportError {
    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }
}

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Perform one HTTP exchange. Non-2xx statuses are `Ok`; only failures to
    /// get a response at all are `Err`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no response was obtained.
    async fn send(&self, request: &ApiRequest, url: &str) -> Result<RawResponse, TransportError>;
}

// =============================================================================
// REQWEST
// =============================================================================

pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns [`TransportError::Request`] if the HTTP client cannot be built.
    pub fn new(timeouts: Timeouts) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(timeouts.request())
            .connect_timeout(timeouts.connect())
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self { http })
    }
}

fn classify_send_error(e: &reqwest::Error) -> TransportError {
    if e.is_builder() {
        TransportError::Request(e.to_string())
    } else {
        TransportError::Unreachable(e.to_string())
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest, url: &str) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| classify_send_error(&e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(RawResponse { status, body })
    }
}
