use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One reading slot within a location's series.
///
/// Readings the upstream feed omitted or that failed numeric coercion are
/// `None`, never `0` — the slot must keep its chronological position so that
/// downstream merging stays index-aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
}

impl Observation {
    pub fn new(temperature: Option<f64>, humidity: Option<f64>) -> Self {
        Self {
            temperature,
            humidity,
        }
    }
}

/// One location's chronological readings, earliest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSeries {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub observations: Vec<Observation>,
}

/// Everything retained from one fetch cycle, stamped with the wall-clock
/// time of shaping. The stamp covers the whole snapshot, not individual
/// observations. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub time: DateTime<Utc>,
    pub data: Vec<LocationSeries>,
}

impl Snapshot {
    pub fn new(time: DateTime<Utc>, data: Vec<LocationSeries>) -> Self {
        Self { time, data }
    }

    pub fn location(&self, id: &str) -> Option<&LocationSeries> {
        self.data.iter().find(|l| l.id == id)
    }
}

/// Which DataPoint feed a fetch cycle targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Forecast,
    Observation,
}

impl FetchKind {
    /// Resource path below the DataPoint base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Forecast => "val/wxfcs/all/json/all",
            Self::Observation => "val/wxobs/all/json/all",
        }
    }

    /// Temporal resolution requested from the feed.
    pub fn resolution(&self) -> &'static str {
        match self {
            Self::Forecast => "3hourly",
            Self::Observation => "hourly",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forecast => "forecast",
            Self::Observation => "observation",
        }
    }
}
