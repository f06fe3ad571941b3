//! # CLI Module
//!
//! User-facing commands for tinylink. Each command builds on the
//! [`crate::management::SessionManager`] or [`crate::client::ApiClient`] and
//! handles the terminal side: spinners while a request is outstanding,
//! coloured notifications for success and failure, and tables for statistics.
//!
//! ## Commands
//!
//! - [`shorten`] - Shortens one URL, optionally copying it and showing its stats
//! - [`stats`] - Shows click statistics for a short URL or bare short code
//! - [`session`] - Interactive session that keeps the latest short URL and
//!   its statistics in memory until the user quits
//!
//! ## Error presentation
//!
//! One-shot commands print the failure and exit with status 1. The
//! interactive session prints a warning and keeps reading commands.
//! Validation problems are shown before anything is sent to the backend.
//!
//! ## Usage
//!
//! ```bash
//! tinylink shorten https://example.com/some/long/path --copy
//! tinylink stats https://tiny.example/ab12
//! tinylink --backend https://sho.rt/api session
//! ```

mod session;
mod shorten;
mod stats;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::types::{Stats, StatsTableRow};

pub use session::{SessionCommand, parse_command, session, spawn_request};
pub use shorten::shorten;
pub use stats::stats;

pub(crate) const SHORTEN_FAILED: &str = "Failed to shorten URL";
pub(crate) const STATS_FAILED: &str = "Failed to get stats";

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

fn print_stats(stats: &Stats) {
    let table = Table::new(vec![StatsTableRow::from(stats)]);
    println!("{}", table);
}
