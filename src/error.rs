//! Error taxonomy for the link client.
//!
//! Errors fall into three families:
//!
//! - **Validation** - the long URL was rejected locally, before any request
//!   left the machine. Shown inline next to the input.
//! - **Transport** - the request failed on the wire, the backend answered
//!   with a non-2xx status, or the body could not be understood. Shown as a
//!   notification and never retried.
//! - **Empty short code** - no code could be derived from the stored short
//!   URL. The session skips the operation silently.
//!
//! The remaining variants cover local plumbing: clipboard, browser,
//! configuration and the in-flight submission guard.

use reqwest::StatusCode;
use thiserror::Error;

/// Reasons a long URL is rejected before submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a URL")]
    Empty,

    #[error("URL must start with a scheme such as https://")]
    MissingScheme,

    #[error("URL must contain a domain with a dot")]
    MissingDot,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx answer. `message` is the server-supplied text, if any.
    #[error("server responded with {status}{}", message_suffix(.message))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("statistics for '{0}' did not include total_clicks")]
    MissingTotalClicks(String),

    #[error("short URL has no short code")]
    EmptyShortCode,

    #[error("a URL is already being shortened")]
    SubmitInFlight,

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("could not open browser: {0}")]
    Browser(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl ClientError {
    /// True for failures that happened talking to the backend.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Transport(_)
                | ClientError::Status { .. }
                | ClientError::Decode(_)
                | ClientError::MissingTotalClicks(_)
        )
    }

    /// Text suitable for a notification. Server-supplied messages win,
    /// otherwise `fallback` is used for transport failures.
    pub fn notice(&self, fallback: &str) -> String {
        match self {
            ClientError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            e if e.is_transport() => fallback.to_string(),
            e => e.to_string(),
        }
    }
}
