use crate::{
    cli::{STATS_FAILED, print_stats, spinner},
    client::ApiClient,
    config::ClientConfig,
    error,
    error::ClientError,
};

/// Prints click statistics for `target`, which is either a short URL or a
/// bare short code.
pub async fn stats(config: ClientConfig, target: String) {
    let client = match ApiClient::new(config) {
        Ok(c) => c,
        Err(e) => error!("Cannot create HTTP client. Err: {}", e),
    };

    let pb = spinner("Fetching stats...");
    let result = client.stats_for_url(&target).await;
    pb.finish_and_clear();

    match result {
        Ok(stats) => print_stats(&stats),
        Err(ClientError::EmptyShortCode) => error!("No short code in '{}'", target),
        Err(e) => error!("{}", e.notice(STATS_FAILED)),
    }
}
