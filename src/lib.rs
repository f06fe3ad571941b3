//! Tinylink URL Shortener Client Library
//!
//! This library talks to a remote URL shortening service: it submits long
//! URLs, reports the short link the service hands back and fetches click
//! statistics for it. The shortening backend itself is an external service;
//! this crate is only its client and a terminal front end.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `client` - HTTP client for the shortening backend
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy
//! - `management` - Session state, busy flags and clipboard handling
//! - `types` - Wire and display data structures
//! - `utils` - URL validation and short-code extraction
//!
//! # Example
//!
//! ```
//! use tinylink::{client::ApiClient, config::ClientConfig, management::SessionManager};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tinylink::error::ClientError> {
//!     let session = SessionManager::new(ApiClient::new(ClientConfig::from_env()?)?);
//!     let short_url = session.shorten("https://example.com/a/long/path").await?;
//!     println!("{short_url}");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod management;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// ```
/// info!("Backend: {}", base_url);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// ```
/// success!("URL shortened successfully!");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program
/// with status 1.
///
/// Only for one-shot commands. The interactive session reports failures with
/// [`warning!`] and keeps running.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// ```
/// warning!("Failed to get stats");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
