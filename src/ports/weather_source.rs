use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{FetchKind, SiteRepDocument};

/// Failure talking to the weather source. Recovered per cycle: the caller
/// logs it and waits for the next scheduled fetch, nothing propagates to
/// readers.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to weather source failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather source returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("could not decode weather payload: {0}")]
    Decode(String),
}

/// Port for fetching raw data from the weather API
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetch and parse the raw document for one feed
    async fn fetch(&self, kind: FetchKind) -> Result<SiteRepDocument, SourceError>;
}
