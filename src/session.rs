//! Session state and the login/registration flows that drive it.
//!
//! ARCHITECTURE
//! ============
//! `Session` is a cheap-to-clone handle over the authenticated identity: the
//! persisted token + user pair, the current user, and the default
//! `Authorization` header the gateway sends. The gateway holds a clone so a
//! 401 can tear the session down; `SessionManager` owns the user table and is
//! the only thing that establishes a session.
//!
//! State machine:
//!
//! ```text
//! Unauthenticated --login ok--> Authenticated --logout | 401--> Unauthenticated
//! ```
//!
//! `register` never transitions; callers log in separately afterwards.

use std::sync::{Arc, PoisonError, RwLock};

use crate::effects::{Notice, Notifier};
use crate::forms::{self, ValidationError};
use crate::models::{User, UserRecord};
use crate::storage::{KeyValueStorage, StorageError, TOKEN_KEY, USER_KEY};
use crate::users::UserRepository;

/// Prefix of the placeholder tokens minted on login.
pub const TOKEN_PREFIX: &str = "mock-jwt-token-";

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("email already registered: {0}")]
    EmailTaken(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),
    #[error("user encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated(User),
}

/// Format a token as an `Authorization` header value.
#[must_use]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Mint an opaque placeholder token. Not a credential.
#[must_use]
pub fn generate_token() -> String {
    let millis = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    format!("{TOKEN_PREFIX}{millis}")
}

// =============================================================================
// SESSION HANDLE
// =============================================================================

#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    storage: Arc<dyn KeyValueStorage>,
    current: RwLock<Option<User>>,
    default_authorization: RwLock<Option<String>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("current", &self.current_user())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// A fresh, unauthenticated session over `storage`. Call [`Session::restore`]
    /// to pick up a persisted login.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                storage,
                current: RwLock::new(None),
                default_authorization: RwLock::new(None),
            }),
        }
    }

    #[must_use]
    pub fn storage(&self) -> &Arc<dyn KeyValueStorage> {
        &self.inner.storage
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.inner
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        match self.current_user() {
            Some(user) => AuthState::Authenticated(user),
            None => AuthState::Unauthenticated,
        }
    }

    /// The `Authorization` value applied to every request by default.
    #[must_use]
    pub fn default_authorization(&self) -> Option<String> {
        self.inner
            .default_authorization
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The persisted token, if any. Storage failures read as "no token".
    #[must_use]
    pub fn stored_token(&self) -> Option<String> {
        match self.inner.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "token read failed");
                None
            }
        }
    }

    /// Pick up a persisted session. Never fails: anything unusable in storage
    /// leaves the session unauthenticated.
    pub fn restore(&self) -> AuthState {
        let storage = &self.inner.storage;
        let (token, raw_user) = match (storage.get(TOKEN_KEY), storage.get(USER_KEY)) {
            (Ok(Some(token)), Ok(Some(raw_user))) if !token.is_empty() => (token, raw_user),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, "session storage unreadable; clearing session");
                self.clear_storage();
                return AuthState::Unauthenticated;
            }
            _ => return AuthState::Unauthenticated,
        };

        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => {
                self.set_default_authorization(Some(bearer(&token)));
                self.set_current(Some(user.clone()));
                tracing::info!(email = %user.email, "session restored");
                AuthState::Authenticated(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "persisted user is malformed; clearing session");
                self.clear_storage();
                AuthState::Unauthenticated
            }
        }
    }

    /// Persist `token` + `user` and mark the session authenticated.
    ///
    /// # Errors
    ///
    /// Returns an error if the user cannot be encoded or storage rejects the
    /// write. A failed write tears the whole session down, so storage and
    /// memory never disagree about who is logged in.
    pub(crate) fn establish(&self, token: &str, user: &User) -> Result<(), SessionError> {
        let raw_user = serde_json::to_string(user)?;
        let storage = &self.inner.storage;
        if let Err(e) = storage.set(TOKEN_KEY, token).and_then(|()| storage.set(USER_KEY, &raw_user)) {
            self.teardown();
            return Err(e.into());
        }
        self.set_default_authorization(Some(bearer(token)));
        self.set_current(Some(user.clone()));
        Ok(())
    }

    /// Drop the session everywhere: storage, default header, current user.
    pub fn teardown(&self) {
        self.clear_storage();
        self.set_default_authorization(None);
        self.set_current(None);
    }

    fn clear_storage(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.inner.storage.remove(key) {
                tracing::warn!(error = %e, %key, "session storage remove failed");
            }
        }
    }

    fn set_current(&self, user: Option<User>) {
        *self
            .inner
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = user;
    }

    fn set_default_authorization(&self, value: Option<String>) {
        *self
            .inner
            .default_authorization
            .write()
            .unwrap_or_else(PoisonError::into_inner) = value;
    }
}

// =============================================================================
// SESSION MANAGER
// =============================================================================

pub struct SessionManager<R> {
    session: Session,
    users: R,
    notifier: Arc<dyn Notifier>,
}

impl<R: UserRepository> SessionManager<R> {
    #[must_use]
    pub fn new(session: Session, users: R, notifier: Arc<dyn Notifier>) -> Self {
        Self { session, users, notifier }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn users(&self) -> &R {
        &self.users
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }

    pub fn restore(&self) -> AuthState {
        self.session.restore()
    }

    /// Log in against the user table.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidCredentials`] when no user matches (the
    /// session is left as it was), or a storage error if the session cannot be
    /// persisted (the session is then torn down).
    pub fn login(&self, email: &str, password: &str) -> Result<User, SessionError> {
        let Some(record) = self.users.find_by_credentials(email, password) else {
            tracing::warn!(%email, "login rejected");
            self.notifier.notify(Notice::error("Invalid email or password"));
            return Err(SessionError::InvalidCredentials);
        };

        let user = record.public();
        let token = generate_token();
        if let Err(e) = self.session.establish(&token, &user) {
            tracing::error!(error = %e, %email, "session persist failed");
            self.notifier.notify(Notice::error("Login failed"));
            return Err(e);
        }

        tracing::info!(%email, "login succeeded");
        self.notifier.notify(Notice::success("Login successful!"));
        Ok(user)
    }

    /// Add a user to the table. Does not log the new user in.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Validation`] for missing fields and
    /// [`SessionError::EmailTaken`] when the email is already registered.
    pub fn register(&self, name: &str, email: &str, password: &str) -> Result<User, SessionError> {
        if let Err(e) = forms::validate_registration(name, email, password) {
            self.notifier.notify(Notice::error(e.to_string()));
            return Err(e.into());
        }
        let record = UserRecord {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_owned(),
            name: name.to_owned(),
            password: password.to_owned(),
            is_verified: true,
        };
        let user = record.public();
        if !self.users.insert_if_absent(record) {
            tracing::warn!(%email, "registration rejected: email taken");
            self.notifier.notify(Notice::error("User already exists"));
            return Err(SessionError::EmailTaken(email.to_owned()));
        }

        tracing::info!(%email, "user registered");
        self.notifier.notify(Notice::success("Registration successful! Please login."));
        Ok(user)
    }

    pub fn logout(&self) {
        if let Some(user) = self.session.current_user() {
            tracing::info!(email = %user.email, "logout");
        }
        self.session.teardown();
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
