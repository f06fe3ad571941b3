use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub short_url: String,
}

/// Stats as they arrive on the wire. Every field is optional so the client
/// can decide how to treat gaps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsResponse {
    #[serde(default)]
    pub short_code: Option<String>,
    #[serde(default)]
    pub total_clicks: Option<u64>,
    #[serde(default)]
    pub daily_clicks: Option<u64>,
}

/// Body of a non-2xx answer. `message` is preferred; the reference backend
/// sends `error` and `details` instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

impl ApiErrorBody {
    pub fn display_message(&self) -> Option<String> {
        if let Some(message) = self.message.as_ref().filter(|m| !m.trim().is_empty()) {
            return Some(message.clone());
        }

        match (&self.error, &self.details) {
            (Some(error), Some(details)) if !details.is_empty() => {
                Some(format!("{error}: {details}"))
            }
            (Some(error), _) => Some(error.clone()),
            (None, _) => None,
        }
    }
}

/// Click statistics for one short code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub short_code: String,
    pub total_clicks: u64,
    pub daily_clicks: u64,
}

#[derive(Tabled)]
pub struct StatsTableRow {
    #[tabled(rename = "Short Code")]
    pub short_code: String,
    #[tabled(rename = "Total Clicks")]
    pub total_clicks: u64,
    #[tabled(rename = "Daily Clicks")]
    pub daily_clicks: u64,
}

impl From<&Stats> for StatsTableRow {
    fn from(stats: &Stats) -> Self {
        StatsTableRow {
            short_code: stats.short_code.clone(),
            total_clicks: stats.total_clicks,
            daily_clicks: stats.daily_clicks,
        }
    }
}
