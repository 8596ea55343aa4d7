//! Client configuration loaded via OrthoConfig.
//!
//! Values come from `TASKDESK_*` environment variables and configuration
//! files; command-line flags are applied on top by the CLI.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

/// Backend used when no API URL is configured.
pub const DEFAULT_API_URL: &str = "https://localhost:7013/api";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const SESSION_DIR_NAME: &str = ".taskdesk";

/// Errors raised while resolving configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The API URL did not parse or is not HTTP(S).
    #[error("invalid API URL '{value}': {reason}")]
    InvalidApiUrl {
        /// Configured value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Configuration values for the API client and session store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TASKDESK")]
pub struct ClientSettings {
    /// Base URL of the REST API, including the `/api` prefix.
    pub api_url: Option<String>,
    /// Directory holding the persisted session.
    pub session_dir: Option<PathBuf>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Accept self-signed certificates, as used by local development
    /// backends.
    #[ortho_config(default = false)]
    pub accept_invalid_certs: bool,
    /// Emit logs as JSON lines.
    #[ortho_config(default = false)]
    pub json_logs: bool,
}

impl ClientSettings {
    /// Configured API URL, falling back to [`DEFAULT_API_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] when the value does not parse
    /// as an `http` or `https` URL.
    pub fn api_url(&self) -> Result<Url, ConfigError> {
        let raw = self.api_url.as_deref().unwrap_or(DEFAULT_API_URL).trim();
        let invalid = |reason: String| ConfigError::InvalidApiUrl {
            value: raw.to_owned(),
            reason,
        };
        let url = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(invalid(format!("unsupported scheme '{other}'"))),
        }
    }

    /// Configured session directory, falling back to `$HOME/.taskdesk`
    /// (or `./.taskdesk` when `HOME` is unset).
    #[must_use]
    pub fn session_dir(&self) -> PathBuf {
        self.session_dir.clone().unwrap_or_else(default_session_dir)
    }

    /// Configured request timeout; zero is raised to one second.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        let secs = self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
            .max(1);
        Duration::from_secs(secs)
    }

    /// Apply command-line overrides.
    pub fn override_with(&mut self, api_url: Option<String>, session_dir: Option<PathBuf>) {
        if api_url.is_some() {
            self.api_url = api_url;
        }
        if session_dir.is_some() {
            self.session_dir = session_dir;
        }
    }
}

fn default_session_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
        .join(SESSION_DIR_NAME)
}
