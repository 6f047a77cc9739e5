use thiserror::Error;

/// Everything that can go wrong during a scrape run.
///
/// Only `Validation` is fatal; the rest are logged where they occur and the
/// run keeps going with whatever data it has.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("request to {url} failed")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{stage} extraction failed: {reason}")]
    Extract { stage: &'static str, reason: String },

    #[error("could not read result count from banner: {0}")]
    ResultCount(String),
}

impl ScrapeError {
    pub fn extract(stage: &'static str, reason: impl Into<String>) -> Self {
        Self::Extract {
            stage,
            reason: reason.into(),
        }
    }

    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}
