//! User-facing side effects: notices and forced navigation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session manager reports login/registration outcomes through a
//! `Notifier`; the gateway forces a return to the login view through a
//! `Navigator` when the backend rejects the session. Front ends plug in their
//! own implementations; the defaults only log.

use std::sync::{Mutex, PoisonError};

/// Route the gateway redirects to after a 401.
pub const LOGIN_ROUTE: &str = "/login";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

pub trait Navigator: Send + Sync {
    fn redirect(&self, route: &str);
}

/// Logs notices through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => tracing::info!(message = %notice.message, "notice"),
            NoticeLevel::Error => tracing::warn!(message = %notice.message, "notice"),
        }
    }
}

/// Logs redirects through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn redirect(&self, route: &str) {
        tracing::info!(%route, "redirect");
    }
}

/// Keeps every notice and redirect it receives. Handy for tests and for
/// front ends that drain effects after each call.
#[derive(Debug, Default)]
pub struct RecordingEffects {
    notices: Mutex<Vec<Notice>>,
    redirects: Mutex<Vec<String>>,
}

impl RecordingEffects {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Notifier for RecordingEffects {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner).push(notice);
    }
}

impl Navigator for RecordingEffects {
    fn redirect(&self, route: &str) {
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route.to_owned());
    }
}
