use crate::{
    cli::{SHORTEN_FAILED, STATS_FAILED, print_stats, spinner},
    client::ApiClient,
    config::ClientConfig,
    error,
    error::ClientError,
    management::{SessionManager, StatsOutcome, SystemClipboard},
    success, warning,
};

/// Shortens `url` and prints the short link.
///
/// With `copy` the short link is also put on the clipboard; with
/// `with_stats` its statistics are fetched right away.
pub async fn shorten(config: ClientConfig, url: String, copy: bool, with_stats: bool) {
    let client = match ApiClient::new(config) {
        Ok(c) => c,
        Err(e) => error!("Cannot create HTTP client. Err: {}", e),
    };
    let session = SessionManager::new(client);

    let pb = spinner("Shortening URL...");
    let result = session.shorten(&url).await;
    pb.finish_and_clear();

    let short_url = match result {
        Ok(short_url) => short_url,
        Err(ClientError::Validation(e)) => error!("{}", e),
        Err(e) => error!("{}", e.notice(SHORTEN_FAILED)),
    };

    success!("URL shortened successfully!");
    println!("{}", short_url);

    if copy {
        // The clipboard has to outlive the copy for the text to stay available.
        match SystemClipboard::new() {
            Ok(mut clipboard) => match session.copy_short_url(&mut clipboard).await {
                Ok(Some(_)) => success!("Copied to clipboard!"),
                Ok(None) => {}
                Err(e) => warning!("{}", e),
            },
            Err(e) => warning!("{}", e),
        }
    }

    if with_stats {
        let pb = spinner("Fetching stats...");
        let outcome = session.fetch_stats().await;
        pb.finish_and_clear();

        match outcome {
            Ok(StatsOutcome::Updated(stats)) => print_stats(&stats),
            Ok(_) => warning!("No short code in {}", short_url),
            Err(e) => error!("{}", e.notice(STATS_FAILED)),
        }
    }
}
