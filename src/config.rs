//! Configuration management for tinylink.
//!
//! Values come from environment variables and an optional `.env` file in the
//! local data directory. Command-line flags override both.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Command-line flags (highest priority)
//! 2. Environment variables
//! 3. `.env` file in the local data directory
//! 4. Application defaults

use std::{env, path::PathBuf, time::Duration};

use url::Url;

use crate::error::ClientError;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// How long the "copied" acknowledgment stays visible after a copy.
pub const COPY_ACK_DURATION: Duration = Duration::from_secs(2);

const BACKEND_URL_VAR: &str = "TINYLINK_BACKEND_URL";
const TIMEOUT_VAR: &str = "TINYLINK_TIMEOUT_SECS";
const MISSING_TOTAL_VAR: &str = "TINYLINK_MISSING_TOTAL_CLICKS";

/// Loads environment variables from `tinylink/.env` in the local data directory.
///
/// Creates the directory if needed. A missing `.env` file is fine; a file that
/// exists but cannot be parsed is reported.
///
/// The file is looked up in:
/// - Linux: `~/.local/share/tinylink/.env`
/// - macOS: `~/Library/Application Support/tinylink/.env`
/// - Windows: `%LOCALAPPDATA%/tinylink/.env`
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tinylink/.env");
    path
}

/// What to do when a stats response carries no `total_clicks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingTotalPolicy {
    /// Treat the response as malformed.
    #[default]
    Reject,
    /// Show zero clicks.
    Zero,
}

impl std::str::FromStr for MissingTotalPolicy {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" | "reject" => Ok(MissingTotalPolicy::Reject),
            "zero" | "0" => Ok(MissingTotalPolicy::Zero),
            other => Err(ClientError::Config(format!(
                "{MISSING_TOTAL_VAR} must be 'error' or 'zero', got '{other}'"
            ))),
        }
    }
}

/// Settings for talking to the shortening backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub missing_total: MissingTotalPolicy,
}

impl ClientConfig {
    /// Builds a config for `base_url` with a 10 second timeout and the
    /// `Reject` policy for missing totals.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Backend root, optionally with a path prefix such as `/api`
    ///
    /// # Returns
    ///
    /// `ClientError::Config` when the URL does not parse or is not http(s).
    ///
    /// # Example
    ///
    /// ```
    /// let config = ClientConfig::new("https://sho.rt/api")?;
    /// ```
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            missing_total: MissingTotalPolicy::default(),
        })
    }

    /// Reads `TINYLINK_BACKEND_URL`, `TINYLINK_TIMEOUT_SECS` and
    /// `TINYLINK_MISSING_TOTAL_CLICKS`, falling back to defaults.
    pub fn from_env() -> Result<Self, ClientError> {
        let base = env::var(BACKEND_URL_VAR).unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        let mut config = Self::new(&base)?;

        if let Ok(raw) = env::var(TIMEOUT_VAR) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                ClientError::Config(format!("{TIMEOUT_VAR} must be a number of seconds"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Ok(raw) = env::var(MISSING_TOTAL_VAR) {
            config.missing_total = raw.parse()?;
        }

        Ok(config)
    }

    /// Replaces the base URL, e.g. from `--backend`.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ClientError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_missing_total(mut self, policy: MissingTotalPolicy) -> Self {
        self.missing_total = policy;
        self
    }

    /// Per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ClientError::Config(format!("backend URL '{raw}': {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::Config(format!(
            "backend URL '{raw}' cannot be used as a base"
        )));
    }
    Ok(url)
}
