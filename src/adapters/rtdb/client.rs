use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::Snapshot;
use crate::ports::{HistoryStore, PersistenceError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Collection node for archived snapshots.
const HISTORY_NODE: &str = "history";
/// Fixed node for the live forecast document.
const FORECAST_NODE: &str = "forecast";

/// Firebase Realtime-Database-style REST adapter.
///
/// Documents live at `{base}/{node}.json`; `POST` appends under a
/// store-generated key whose lexicographic order matches insertion order.
pub struct RtdbClient {
    client: Client,
    base_url: String,
    auth: Option<String>,
}

/// Response body of a `POST` append.
#[derive(Debug, Deserialize)]
struct PushedKey {
    name: String,
}

impl RtdbClient {
    pub fn new(base_url: String, auth: Option<String>) -> Result<Self, PersistenceError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    fn node_url(&self, node: &str) -> String {
        match &self.auth {
            Some(auth) => format!("{}/{}.json?auth={}", self.base_url, node, auth),
            None => format!("{}/{}.json", self.base_url, node),
        }
    }

    fn check(status: reqwest::StatusCode) -> Result<(), PersistenceError> {
        if status.is_success() {
            Ok(())
        } else {
            Err(PersistenceError::Status(status))
        }
    }
}

#[async_trait]
impl HistoryStore for RtdbClient {
    async fn entries(&self) -> Result<Vec<(String, Snapshot)>, PersistenceError> {
        let response = self.client.get(self.node_url(HISTORY_NODE)).send().await?;
        Self::check(response.status())?;

        // An empty collection deserializes as JSON null. BTreeMap iteration
        // is key-sorted, which for store-generated keys is insertion order.
        let entries: Option<BTreeMap<String, Snapshot>> = response
            .json()
            .await
            .map_err(|e| PersistenceError::Payload(e.to_string()))?;

        Ok(entries.unwrap_or_default().into_iter().collect())
    }

    async fn push_entry(&self, snapshot: &Snapshot) -> Result<String, PersistenceError> {
        let response = self
            .client
            .post(self.node_url(HISTORY_NODE))
            .json(snapshot)
            .send()
            .await?;
        Self::check(response.status())?;

        let pushed: PushedKey = response
            .json()
            .await
            .map_err(|e| PersistenceError::Payload(e.to_string()))?;

        Ok(pushed.name)
    }

    async fn remove_entry(&self, key: &str) -> Result<(), PersistenceError> {
        let node = format!("{HISTORY_NODE}/{key}");
        let response = self.client.delete(self.node_url(&node)).send().await?;
        Self::check(response.status())
    }

    async fn set_forecast(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        let response = self
            .client
            .put(self.node_url(FORECAST_NODE))
            .json(snapshot)
            .send()
            .await?;
        Self::check(response.status())
    }

    async fn forecast(&self) -> Result<Option<Snapshot>, PersistenceError> {
        let response = self.client.get(self.node_url(FORECAST_NODE)).send().await?;
        Self::check(response.status())?;

        response
            .json()
            .await
            .map_err(|e| PersistenceError::Payload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_url_with_and_without_auth() {
        let plain = RtdbClient::new("https://db.example/wx/".to_string(), None).unwrap();
        assert_eq!(plain.node_url("history"), "https://db.example/wx/history.json");

        let authed =
            RtdbClient::new("https://db.example/wx".to_string(), Some("s3cret".to_string())).unwrap();
        assert_eq!(
            authed.node_url("history/-Nabc"),
            "https://db.example/wx/history/-Nabc.json?auth=s3cret"
        );
    }
}
