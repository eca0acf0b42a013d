use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::debug;

use crate::adapters::RingStore;
use crate::application::merge::{merge, trim_for_archive, HISTORY_MAX_ENTRIES, HISTORY_MAX_OBSERVATIONS};
use crate::application::shape::{shape, LocationFilter};
use crate::domain::{FetchKind, LocationSeries, Snapshot};
use crate::ports::{HistoryStore, PersistenceError, SourceError, WeatherSource};

/// Failure on the history read/write paths.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history store is not configured")]
    NotConfigured,

    #[error("no forecast snapshot cached yet")]
    NoForecast,

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Main application service: drives fetch→shape→store cycles and serves
/// reads from the rings and the history store.
pub struct WeatherService {
    source: Arc<dyn WeatherSource>,
    forecasts: RingStore,
    observations: RingStore,
    history: Option<Arc<dyn HistoryStore>>,
    filter: LocationFilter,
}

impl WeatherService {
    pub fn new(
        source: Arc<dyn WeatherSource>,
        forecasts: RingStore,
        observations: RingStore,
        history: Option<Arc<dyn HistoryStore>>,
        filter: LocationFilter,
    ) -> Self {
        Self {
            source,
            forecasts,
            observations,
            history,
            filter,
        }
    }

    fn ring(&self, kind: FetchKind) -> &RingStore {
        match kind {
            FetchKind::Forecast => &self.forecasts,
            FetchKind::Observation => &self.observations,
        }
    }

    /// One full fetch cycle: fetch the raw document, shape it, push it into
    /// the ring for its kind. Failures are returned for the caller to log;
    /// the next scheduled cycle is the retry.
    pub async fn poll_once(&self, kind: FetchKind) -> Result<(), SourceError> {
        let raw = self.source.fetch(kind).await?;
        let snapshot = shape(&raw, &self.filter, Utc::now());

        debug!(
            kind = kind.as_str(),
            locations = snapshot.data.len(),
            "shaped snapshot"
        );

        self.ring(kind).push(snapshot);
        Ok(())
    }

    /// Most recent forecast snapshot, `None` until the first successful
    /// forecast cycle.
    pub fn latest_forecast(&self) -> Option<Snapshot> {
        self.forecasts.latest()
    }

    /// Cached observation snapshots, oldest first. Empty until the first
    /// successful observation cycle.
    pub fn observation_history(&self) -> Vec<Snapshot> {
        self.observations.all()
    }

    /// One location's series from the latest forecast.
    pub fn location(&self, id: &str) -> Option<LocationSeries> {
        self.forecasts
            .latest()
            .and_then(|snapshot| snapshot.location(id).cloned())
    }

    /// Archived snapshots merged with the live forecast into one
    /// chronological series per location.
    pub async fn historic_series(&self) -> Result<Snapshot, HistoryError> {
        let store = self.history.as_ref().ok_or(HistoryError::NotConfigured)?;
        let forecast = self.latest_forecast().ok_or(HistoryError::NoForecast)?;

        let historic: Vec<Snapshot> = store
            .entries()
            .await?
            .into_iter()
            .map(|(_, snapshot)| snapshot)
            .collect();

        Ok(merge(&historic, &forecast))
    }

    /// Persist the latest forecast: trim each location's series, evict the
    /// oldest archived entries down to the cap, append the trimmed snapshot,
    /// and refresh the fixed live-forecast document. Returns the new
    /// entry's key.
    pub async fn archive_forecast(&self) -> Result<String, HistoryError> {
        let store = self.history.as_ref().ok_or(HistoryError::NotConfigured)?;
        let forecast = self.latest_forecast().ok_or(HistoryError::NoForecast)?;

        let trimmed = trim_for_archive(&forecast, HISTORY_MAX_OBSERVATIONS);

        let entries = store.entries().await?;
        if entries.len() >= HISTORY_MAX_ENTRIES {
            let surplus = entries.len() + 1 - HISTORY_MAX_ENTRIES;
            for (key, _) in entries.iter().take(surplus) {
                store.remove_entry(key).await?;
            }
        }

        let key = store.push_entry(&trimmed).await?;
        store.set_forecast(&trimmed).await?;

        Ok(key)
    }
}
