use std::{io::Write, sync::Arc};

use tokio::{
    io::{AsyncBufReadExt, BufReader},
    task::JoinSet,
};
use tracing::debug;

use crate::{
    cli::{SHORTEN_FAILED, STATS_FAILED, print_stats},
    client::ApiClient,
    config::ClientConfig,
    error,
    error::ClientError,
    info,
    management::{SessionManager, SessionState, StatsOutcome, SystemClipboard},
    success, warning,
};

const HELP: &str = "\
Commands:
  shorten <url>    shorten a URL (a bare URL works too)
  stats, refresh   fetch click statistics for the current short URL
  copy             copy the current short URL to the clipboard
  open             open the current short URL in the browser
  show             show the current short URL and statistics
  help             show this help
  quit, exit       leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Shorten(String),
    Stats,
    Copy,
    Open,
    Show,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// Parses one line typed into the interactive session.
pub fn parse_command(line: &str) -> SessionCommand {
    let line = line.trim();
    if line.is_empty() {
        return SessionCommand::Empty;
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head.to_ascii_lowercase().as_str() {
        "shorten" | "s" => SessionCommand::Shorten(rest.to_string()),
        "stats" | "refresh" | "r" => SessionCommand::Stats,
        "copy" | "c" => SessionCommand::Copy,
        "open" | "o" => SessionCommand::Open,
        "show" => SessionCommand::Show,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        _ if head.contains("://") => SessionCommand::Shorten(line.to_string()),
        _ => SessionCommand::Unknown(head.to_string()),
    }
}

/// Starts the network request behind `command` on `tasks` and returns
/// immediately.
///
/// Only `Shorten` and `Stats` talk to the backend. Any other command is left
/// to the caller and `false` is returned.
///
/// # Arguments
///
/// * `tasks` - Set the request task is spawned on
/// * `session` - Session the request reads and updates
/// * `command` - Parsed input line
pub fn spawn_request(
    tasks: &mut JoinSet<()>,
    session: &Arc<SessionManager>,
    command: SessionCommand,
) -> bool {
    let session = Arc::clone(session);
    match command {
        SessionCommand::Shorten(url) => {
            tasks.spawn(async move { handle_shorten(&session, &url).await });
            true
        }
        SessionCommand::Stats => {
            tasks.spawn(async move { handle_stats(&session).await });
            true
        }
        _ => false,
    }
}

/// Runs the interactive session until `quit` or end of input.
///
/// The session keeps the latest short URL and its statistics in memory.
/// Requests run in the background so input keeps being read while they are
/// out. Failures are reported and the loop carries on.
pub async fn session(config: ClientConfig) {
    let base_url = config.base_url.clone();
    let client = match ApiClient::new(config) {
        Ok(c) => c,
        Err(e) => error!("Cannot create HTTP client. Err: {}", e),
    };
    let session = Arc::new(SessionManager::new(client));
    let mut tasks = JoinSet::new();
    let mut clipboard: Option<SystemClipboard> = None;

    info!("Backend: {}", base_url);
    info!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        reap(&mut tasks);
        print!("tinylink> ");
        let _ = std::io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warning!("Cannot read input. Err: {}", e);
                break;
            }
        };

        let command = parse_command(&line);
        if spawn_request(&mut tasks, &session, command.clone()) {
            continue;
        }

        match command {
            SessionCommand::Shorten(_) | SessionCommand::Stats => {}
            SessionCommand::Copy => handle_copy(&session, &mut clipboard).await,
            SessionCommand::Open => match session.open_short_url().await {
                Ok(Some(url)) => info!("Opened {}", url),
                Ok(None) => warning!("Nothing to open yet. Shorten a URL first."),
                Err(e) => warning!("{}", e),
            },
            SessionCommand::Show => show(&session).await,
            SessionCommand::Help => println!("{}", HELP),
            SessionCommand::Quit => break,
            SessionCommand::Empty => {}
            SessionCommand::Unknown(cmd) => warning!("Unknown command '{}'. Type 'help'.", cmd),
        }
    }

    if !tasks.is_empty() {
        info!("Waiting for {} pending request(s)...", tasks.len());
    }
    while let Some(result) = tasks.join_next().await {
        if let Err(e) = result {
            warning!("Request task failed. Err: {}", e);
        }
    }
}

fn reap(tasks: &mut JoinSet<()>) {
    while let Some(result) = tasks.try_join_next() {
        if let Err(e) = result {
            warning!("Request task failed. Err: {}", e);
        }
    }
}

async fn handle_shorten(session: &SessionManager, url: &str) {
    match session.shorten(url).await {
        Ok(short_url) => {
            success!("URL shortened successfully!");
            println!("{}", short_url);
        }
        Err(ClientError::Validation(e)) => warning!("{}", e),
        Err(ClientError::SubmitInFlight) => info!("A URL is still being shortened."),
        Err(e) => warning!("{}", e.notice(SHORTEN_FAILED)),
    }
}

async fn handle_stats(session: &SessionManager) {
    match session.fetch_stats().await {
        Ok(StatsOutcome::Updated(stats)) => print_stats(&stats),
        Ok(StatsOutcome::Busy) => info!("Stats refresh already running."),
        Ok(StatsOutcome::Submitting) => info!("A URL is still being shortened."),
        Ok(StatsOutcome::NoShortCode) => warning!("No short code yet. Shorten a URL first."),
        Ok(StatsOutcome::Stale) => debug!("dropped stats for a replaced short url"),
        Err(e) => warning!("{}", e.notice(STATS_FAILED)),
    }
}

async fn handle_copy(session: &SessionManager, clipboard: &mut Option<SystemClipboard>) {
    if clipboard.is_none() {
        match SystemClipboard::new() {
            Ok(c) => *clipboard = Some(c),
            Err(e) => {
                warning!("{}", e);
                return;
            }
        }
    }

    let Some(clipboard) = clipboard.as_mut() else {
        return;
    };

    match session.copy_short_url(clipboard).await {
        Ok(Some(_)) => success!("Copied to clipboard!"),
        Ok(None) => warning!("Nothing to copy yet. Shorten a URL first."),
        Err(e) => warning!("{}", e),
    }
}

async fn show(session: &SessionManager) {
    let Some(short_url) = session.short_url().await else {
        info!("No short URL yet.");
        return;
    };

    if session.is_copied().await {
        println!("{} (copied)", short_url);
    } else {
        println!("{}", short_url);
    }

    if let Some(stats) = session.stats().await {
        print_stats(&stats);
    }

    if session.is_submitting() {
        info!("Shortening in progress...");
    }
    if session.is_fetching_stats() {
        info!("Refreshing stats...");
    }

    match session.state().await {
        SessionState::SubmitError => warning!("Last submission failed."),
        SessionState::StatsError => warning!("Last stats refresh failed."),
        _ => {}
    }
}
