use std::env;

/// Runtime knobs, all overridable from the environment. The delay defaults
/// preserve the pacing the site has tolerated so far.
pub struct Config {
    pub base_url: String,
    /// Pause after finishing one results page.
    pub page_delay_ms: u64,
    /// Pause between consecutive detail-page fetches.
    pub listing_delay_ms: u64,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            base_url: env_or("IMMOWELT_BASE_URL", "https://www.immowelt.de".to_string())?,
            page_delay_ms: env_or("PAGE_DELAY_MS", 5000)?,
            listing_delay_ms: env_or("LISTING_DELAY_MS", 1000)?,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30)?,
        })
    }
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => Ok(raw.parse()?),
        Err(_) => Ok(default),
    }
}
