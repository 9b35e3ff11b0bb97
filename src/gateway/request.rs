//! Request/response values that flow through the gateway stages.

use reqwest::Method;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::GatewayError;

/// An outgoing API call, relative to the configured base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the base URL, e.g. `/applications`.
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), headers: HeaderMap::new(), body: None }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    #[must_use]
    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PUT, path).with_body(body)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Join the path onto `base_url`, tolerating a missing leading slash.
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        if self.path.starts_with('/') {
            format!("{base}{}", self.path)
        } else {
            format!("{base}/{}", self.path)
        }
    }
}

/// Raw status + body as the transport saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    Backend,
    Fixture,
}

/// A successful gateway result.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
    pub source: ResponseSource,
}

impl ApiResponse {
    /// A fixture standing in for a successful backend response.
    #[must_use]
    pub fn fixture(body: Value) -> Self {
        Self { status: 200, body, source: ResponseSource::Fixture }
    }

    #[must_use]
    pub fn is_fixture(&self) -> bool {
        self.source == ResponseSource::Fixture
    }

    /// Decode the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Decode`] when the body does not match `T`.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, GatewayError> {
        serde_json::from_value(self.body).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}
