//! Shared fixtures for unit tests: a scripted transport and a wired-up
//! gateway + session manager over memory storage.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::{FixtureMode, GatewayConfig};
use crate::effects::RecordingEffects;
use crate::gateway::{ApiRequest, Gateway, RawResponse, Transport, TransportError};
use crate::session::{Session, SessionManager};
use crate::storage::MemoryStorage;
use crate::users::InMemoryUserRepository;

/// One request as the transport saw it.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: reqwest::Method,
    pub url: String,
    pub authorization: Option<String>,
    pub body: Option<serde_json::Value>,
}

/// Replays scripted outcomes in order. Once the script runs out every call
/// is unreachable.
#[derive(Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    seen: Mutex<Vec<SeenRequest>>,
}

impl MockTransport {
    pub fn new(script: Vec<Result<RawResponse, TransportError>>) -> Self {
        Self { script: Mutex::new(script.into()), seen: Mutex::new(Vec::new()) }
    }

    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

pub fn respond(status: u16, body: &str) -> Result<RawResponse, TransportError> {
    Ok(RawResponse { status, body: body.to_owned() })
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &ApiRequest, url: &str) -> Result<RawResponse, TransportError> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SeenRequest {
                method: request.method.clone(),
                url: url.to_owned(),
                authorization: request
                    .headers
                    .get(reqwest::header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned),
                body: request.body.clone(),
            });
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Unreachable("connection refused".into())))
    }
}

pub struct Harness {
    pub gateway: Gateway,
    pub manager: SessionManager<InMemoryUserRepository>,
    pub storage: Arc<MemoryStorage>,
    pub effects: Arc<RecordingEffects>,
    pub transport: Arc<MockTransport>,
}

pub fn harness(transport: MockTransport) -> Harness {
    harness_with_mode(transport, FixtureMode::Fallback)
}

pub fn harness_with_mode(transport: MockTransport, fixtures: FixtureMode) -> Harness {
    harness_with_config(transport, &GatewayConfig { fixtures, ..GatewayConfig::default() })
}

pub fn harness_with_config(transport: MockTransport, config: &GatewayConfig) -> Harness {
    let storage = Arc::new(MemoryStorage::new());
    let effects = Arc::new(RecordingEffects::new());
    let transport = Arc::new(transport);
    let session = Session::new(storage.clone());
    let gateway = Gateway::new(config, transport.clone(), session.clone(), effects.clone());
    let manager = SessionManager::new(session, InMemoryUserRepository::seeded(), effects.clone());
    Harness { gateway, manager, storage, effects, transport }
}
