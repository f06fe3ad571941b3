//! HTTP client for the shortening backend.
//!
//! Two endpoints are used:
//!
//! - `POST {base}/shorten` with `{ "url": ... }`, answering `{ "short_url": ... }`
//! - `GET {base}/stats/{code}`, answering
//!   `{ "short_code": ..., "total_clicks": ..., "daily_clicks": ... }`
//!
//! Non-2xx answers are turned into [`ClientError::Status`] carrying the
//! server's `message` when one is present. Nothing is retried.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::{
    config::{ClientConfig, MissingTotalPolicy},
    error::ClientError,
    types::{ApiErrorBody, ShortenRequest, ShortenResponse, Stats, StatsResponse},
    utils,
};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Creates a client with the timeout from `config`.
    ///
    /// # Arguments
    ///
    /// * `config` - Backend URL, timeout and missing-total policy
    ///
    /// # Returns
    ///
    /// A transport error if the underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Submits a long URL and returns the short URL exactly as the backend
    /// sent it.
    ///
    /// The URL is validated first; an invalid URL never reaches the network.
    pub async fn shorten(&self, long_url: &str) -> Result<String, ClientError> {
        let url = utils::validate_long_url(long_url)?;
        let endpoint = self.endpoint(&["shorten"])?;

        debug!(%endpoint, long_url = url, "submitting url");
        let response = self
            .http
            .post(endpoint)
            .json(&ShortenRequest {
                url: url.to_string(),
            })
            .send()
            .await?;

        let body: ShortenResponse = decode(check_status(response).await?).await?;
        debug!(short_url = %body.short_url, "url shortened");
        Ok(body.short_url)
    }

    /// Fetches click statistics for a short code.
    pub async fn stats(&self, short_code: &str) -> Result<Stats, ClientError> {
        if short_code.is_empty() {
            return Err(ClientError::EmptyShortCode);
        }

        let endpoint = self.endpoint(&["stats", short_code])?;

        debug!(%endpoint, "fetching stats");
        let response = self.http.get(endpoint).send().await?;
        let body: StatsResponse = decode(check_status(response).await?).await?;

        resolve_stats(body, short_code, self.config.missing_total)
    }

    /// Like [`ApiClient::stats`], keyed by the last path segment of a short URL.
    pub async fn stats_for_url(&self, short_url: &str) -> Result<Stats, ClientError> {
        let code = utils::extract_short_code(short_url).ok_or(ClientError::EmptyShortCode)?;
        self.stats(code).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::Config(format!(
                    "backend URL '{}' cannot be used as a base",
                    self.config.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Turns a wire response into [`Stats`].
///
/// A missing `daily_clicks` counts as zero and a missing `short_code` falls
/// back to the code that was asked for. A missing `total_clicks` follows
/// `policy`.
pub fn resolve_stats(
    body: StatsResponse,
    requested_code: &str,
    policy: MissingTotalPolicy,
) -> Result<Stats, ClientError> {
    let short_code = body
        .short_code
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| requested_code.to_string());

    let total_clicks = match (body.total_clicks, policy) {
        (Some(total), _) => total,
        (None, MissingTotalPolicy::Zero) => 0,
        (None, MissingTotalPolicy::Reject) => {
            return Err(ClientError::MissingTotalClicks(short_code));
        }
    };

    Ok(Stats {
        short_code,
        total_clicks,
        daily_clicks: body.daily_clicks.unwrap_or(0),
    })
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // The body is best effort; a failed read still reports the status.
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&text)
        .ok()
        .and_then(|body| body.display_message());

    debug!(%status, ?message, "backend returned an error");
    Err(ClientError::Status { status, message })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
}
