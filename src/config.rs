//! Gateway configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const STATE_FILE_NAME: &str = "session.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unsupported JOBTRACK_FIXTURES value '{0}' (expected 'fallback' or 'disabled')")]
    FixtureMode(String),
    #[error("base URL must start with http:// or https://, got '{0}'")]
    BaseUrl(String),
}

/// What the gateway does when the backend cannot be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixtureMode {
    /// Substitute canned payloads for matching GET routes.
    #[default]
    Fallback,
    /// Surface the connection error to the caller.
    Disabled,
}

impl std::str::FromStr for FixtureMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fallback" | "on" | "true" | "1" => Ok(Self::Fallback),
            "disabled" | "off" | "false" | "0" => Ok(Self::Disabled),
            _ => Err(ConfigError::FixtureMode(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

impl Timeouts {
    #[must_use]
    pub fn request(self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    #[must_use]
    pub fn connect(self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub fixtures: FixtureMode,
    pub timeouts: Timeouts,
    pub state_path: PathBuf,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            fixtures: FixtureMode::default(),
            timeouts: Timeouts::default(),
            state_path: default_state_path(),
        }
    }
}

impl GatewayConfig {
    /// Build typed gateway config from environment variables.
    ///
    /// Optional:
    /// - `JOBTRACK_BASE_URL`: default `http://localhost:5000/api`
    /// - `JOBTRACK_FIXTURES`: `fallback` (default) or `disabled`
    /// - `JOBTRACK_REQUEST_TIMEOUT_SECS`: default 30
    /// - `JOBTRACK_CONNECT_TIMEOUT_SECS`: default 5
    /// - `JOBTRACK_STATE_PATH`: session file, default under the user data dir
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown fixture mode or a non-HTTP base URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(
            &std::env::var("JOBTRACK_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned()),
        )?;
        let fixtures = match std::env::var("JOBTRACK_FIXTURES") {
            Ok(raw) => raw.parse()?,
            Err(_) => FixtureMode::default(),
        };
        let timeouts = Timeouts {
            request_secs: env_parse("JOBTRACK_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse("JOBTRACK_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        let state_path = std::env::var_os("JOBTRACK_STATE_PATH").map_or_else(default_state_path, PathBuf::from);

        Ok(Self { base_url, fixtures, timeouts, state_path })
    }
}

/// Trim trailing slashes and require an HTTP scheme.
///
/// # Errors
///
/// Returns [`ConfigError::BaseUrl`] when the scheme is not `http`/`https`.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::BaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn default_state_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("jobtrack")
        .join(STATE_FILE_NAME)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
