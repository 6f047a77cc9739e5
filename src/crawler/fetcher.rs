use std::time::Duration;

use reqwest::Client;

use crate::config::Config;
use crate::error::ScrapeError;

pub fn build_client(cfg: &Config) -> Client {
    Client::builder()
        .user_agent("immowelt-scraper/0.1")
        .timeout(Duration::from_secs(cfg.request_timeout_secs))
        .build()
        .expect("failed to build http client")
}

/// Fetches one page as text. HTTP error statuses count as fetch failures,
/// same as transport errors.
pub async fn fetch_html(client: &Client, url: &str) -> Result<String, ScrapeError> {
    let res = client
        .get(url)
        .send()
        .await
        .and_then(|res| res.error_for_status())
        .map_err(|source| ScrapeError::Fetch {
            url: url.to_string(),
            source,
        })?;

    res.text().await.map_err(|source| ScrapeError::Fetch {
        url: url.to_string(),
        source,
    })
}
