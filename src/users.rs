//! In-memory user table.
//!
//! Credentials are compared in plain text. This table only ever holds demo
//! accounts; it is not a credential store.

use std::sync::{PoisonError, RwLock};

use crate::models::UserRecord;

/// Lookup and insert capability the session manager needs from a user table.
pub trait UserRepository: Send + Sync {
    /// Find the user whose email and password both match exactly.
    fn find_by_credentials(&self, email: &str, password: &str) -> Option<UserRecord>;

    fn email_exists(&self, email: &str) -> bool;

    /// Append `record` unless its email is already taken. The check and the
    /// append happen under one lock. Returns whether the record was added.
    fn insert_if_absent(&self, record: UserRecord) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<UserRecord>>,
}

impl InMemoryUserRepository {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A table pre-seeded with the demo accounts.
    #[must_use]
    pub fn seeded() -> Self {
        Self { users: RwLock::new(seed_users()) }
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find_by_credentials(&self, email: &str, password: &str) -> Option<UserRecord> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .cloned()
    }

    fn email_exists(&self, email: &str) -> bool {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        users.iter().any(|u| u.email == email)
    }

    fn insert_if_absent(&self, record: UserRecord) -> bool {
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        if users.iter().any(|u| u.email == record.email) {
            return false;
        }
        users.push(record);
        true
    }

    fn len(&self) -> usize {
        self.users.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Demo accounts available out of the box.
#[must_use]
pub fn seed_users() -> Vec<UserRecord> {
    vec![
        UserRecord {
            id: "1".into(),
            email: "demo@example.com".into(),
            name: "Demo User".into(),
            password: "password123".into(),
            is_verified: true,
        },
        UserRecord {
            id: "2".into(),
            email: "jane@example.com".into(),
            name: "Jane Smith".into(),
            password: "jane2024".into(),
            is_verified: true,
        },
    ]
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
