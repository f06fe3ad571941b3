use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Instant,
};

use tokio::sync::Mutex;
use tracing::debug;

use crate::{
    client::ApiClient,
    config::COPY_ACK_DURATION,
    error::ClientError,
    management::clipboard::{ClipboardSink, CopyAck},
    types::Stats,
    utils,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Submitting,
    Ready,
    SubmitError,
    FetchingStats,
    StatsReady,
    StatsError,
}

/// Result of a stats refresh that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsOutcome {
    /// New counts are now displayed.
    Updated(Stats),
    /// Another refresh was still running; nothing was sent.
    Busy,
    /// A submission is in flight; nothing was sent.
    Submitting,
    /// No short URL, or its last segment is empty; nothing was sent.
    NoShortCode,
    /// The short URL changed while the request was running; the result was
    /// dropped.
    Stale,
}

struct SessionData {
    state: SessionState,
    /// Bumped every time a submission starts.
    submissions: u64,
    short_url: Option<String>,
    stats: Option<Stats>,
    copy_ack: CopyAck,
}

/// Clears a busy flag when dropped, including when the owning future is
/// cancelled mid-request.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// In-memory state of one interactive session: the latest short URL, the
/// latest statistics for it, loading flags and the copy acknowledgment.
///
/// All operations take `&self` so a front end can drive them from concurrent
/// futures. Overlapping submissions are refused and overlapping stats
/// refreshes are ignored. Nothing is persisted.
pub struct SessionManager {
    client: ApiClient,
    data: Mutex<SessionData>,
    submitting: AtomicBool,
    fetching_stats: AtomicBool,
}

impl SessionManager {
    /// Creates an idle session with no short URL.
    ///
    /// # Arguments
    ///
    /// * `client` - The API client every request goes through.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            data: Mutex::new(SessionData {
                state: SessionState::Idle,
                submissions: 0,
                short_url: None,
                stats: None,
                copy_ack: CopyAck::new(COPY_ACK_DURATION),
            }),
            submitting: AtomicBool::new(false),
            fetching_stats: AtomicBool::new(false),
        }
    }

    /// Shortens `long_url` and makes the result the session's short URL.
    ///
    /// Invalid input is rejected before any state change or request. On
    /// success previous statistics are discarded. On failure the previous
    /// short URL and statistics stay as they were.
    pub async fn shorten(&self, long_url: &str) -> Result<String, ClientError> {
        let url = utils::validate_long_url(long_url)?;

        let Some(_guard) = BusyGuard::acquire(&self.submitting) else {
            return Err(ClientError::SubmitInFlight);
        };

        {
            let mut data = self.data.lock().await;
            data.submissions += 1;
            data.state = SessionState::Submitting;
        }

        let result = self.client.shorten(url).await;

        let mut data = self.data.lock().await;
        match result {
            Ok(short_url) => {
                data.short_url = Some(short_url.clone());
                data.stats = None;
                data.copy_ack.reset();
                data.state = SessionState::Ready;
                Ok(short_url)
            }
            Err(e) => {
                data.state = SessionState::SubmitError;
                Err(e)
            }
        }
    }

    /// Fetches statistics for the current short URL.
    ///
    /// Ignored while another refresh or a submission is running. On failure
    /// the last successfully fetched statistics remain displayed.
    ///
    /// A submission that starts while the request is out owns the session
    /// state from then on: a result for an unchanged short URL is still
    /// stored, but the state is left to the submission.
    pub async fn fetch_stats(&self) -> Result<StatsOutcome, ClientError> {
        if self.is_submitting() {
            debug!("submission in flight, ignoring stats refresh");
            return Ok(StatsOutcome::Submitting);
        }

        let Some(_guard) = BusyGuard::acquire(&self.fetching_stats) else {
            debug!("stats refresh already running, ignoring");
            return Ok(StatsOutcome::Busy);
        };

        let (short_url, code, submissions) = {
            let mut data = self.data.lock().await;
            if self.is_submitting() {
                return Ok(StatsOutcome::Submitting);
            }
            let Some(short_url) = data.short_url.clone() else {
                return Ok(StatsOutcome::NoShortCode);
            };
            let Some(code) = utils::extract_short_code(&short_url).map(str::to_string) else {
                return Ok(StatsOutcome::NoShortCode);
            };
            data.state = SessionState::FetchingStats;
            (short_url, code, data.submissions)
        };

        let result = self.client.stats(&code).await;

        let mut data = self.data.lock().await;
        if data.short_url.as_deref() != Some(short_url.as_str()) {
            debug!(%code, "short url changed during stats refresh, dropping result");
            return Ok(StatsOutcome::Stale);
        }

        let owns_state = data.submissions == submissions;
        match result {
            Ok(stats) => {
                data.stats = Some(stats.clone());
                if owns_state {
                    data.state = SessionState::StatsReady;
                }
                Ok(StatsOutcome::Updated(stats))
            }
            Err(e) => {
                if owns_state {
                    data.state = SessionState::StatsError;
                }
                Err(e)
            }
        }
    }

    /// Copies the current short URL and arms the "copied" acknowledgment.
    /// Returns the copied text, or `None` when there is nothing to copy.
    pub async fn copy_short_url(
        &self,
        clipboard: &mut impl ClipboardSink,
    ) -> Result<Option<String>, ClientError> {
        let mut data = self.data.lock().await;
        let Some(short_url) = data.short_url.clone() else {
            return Ok(None);
        };

        clipboard.set_text(&short_url)?;
        data.copy_ack.arm(Instant::now());
        Ok(Some(short_url))
    }

    /// Opens the current short URL in the default browser.
    pub async fn open_short_url(&self) -> Result<Option<String>, ClientError> {
        let Some(short_url) = self.short_url().await else {
            return Ok(None);
        };

        webbrowser::open(&short_url).map_err(|e| ClientError::Browser(e.to_string()))?;
        Ok(Some(short_url))
    }

    /// Current position in the session state machine.
    pub async fn state(&self) -> SessionState {
        self.data.lock().await.state
    }

    /// The short URL from the last successful submission, verbatim.
    pub async fn short_url(&self) -> Option<String> {
        self.data.lock().await.short_url.clone()
    }

    pub async fn stats(&self) -> Option<Stats> {
        self.data.lock().await.stats.clone()
    }

    /// True for two seconds after a successful copy.
    pub async fn is_copied(&self) -> bool {
        self.data.lock().await.copy_ack.is_active(Instant::now())
    }

    /// Loading flag for the submit control.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub fn is_fetching_stats(&self) -> bool {
        self.fetching_stats.load(Ordering::Acquire)
    }
}
