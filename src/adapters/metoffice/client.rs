use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::{FetchKind, SiteRepDocument};
use crate::ports::{SourceError, WeatherSource};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// DataPoint adapter using reqwest.
///
/// No retry and no backoff — fetches run on a fixed schedule and the next
/// tick is the retry mechanism.
pub struct MetOfficeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MetOfficeClient {
    pub fn new(base_url: String, api_key: String) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn url(&self, kind: FetchKind) -> String {
        format!(
            "{}/{}?res={}&key={}",
            self.base_url,
            kind.path(),
            kind.resolution(),
            self.api_key
        )
    }
}

#[async_trait]
impl WeatherSource for MetOfficeClient {
    async fn fetch(&self, kind: FetchKind) -> Result<SiteRepDocument, SourceError> {
        let response = self.client.get(self.url(kind)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }

        response
            .json::<SiteRepDocument>()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_includes_resolution_and_key() {
        let client =
            MetOfficeClient::new("http://datapoint.example/public/data/".to_string(), "k3y".to_string())
                .unwrap();

        assert_eq!(
            client.url(FetchKind::Observation),
            "http://datapoint.example/public/data/val/wxobs/all/json/all?res=hourly&key=k3y"
        );
        assert_eq!(
            client.url(FetchKind::Forecast),
            "http://datapoint.example/public/data/val/wxfcs/all/json/all?res=3hourly&key=k3y"
        );
    }
}
