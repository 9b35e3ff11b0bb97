//! jobtrack: client core for a job-application tracking dashboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` owns who is logged in, `gateway` owns how requests reach the
//! API (and what happens when they cannot), and `api` layers typed endpoints
//! on top. `fixtures`, `filters` and `forms` hold the small amount of data
//! logic the dashboard views need.

pub mod api;
pub mod config;
pub mod effects;
pub mod filters;
pub mod fixtures;
pub mod forms;
pub mod gateway;
pub mod models;
pub mod session;
pub mod storage;
pub mod users;

#[cfg(test)]
mod test_helpers;

pub use config::{FixtureMode, GatewayConfig};
pub use gateway::{Gateway, GatewayError};
pub use session::{AuthState, Session, SessionError, SessionManager};
