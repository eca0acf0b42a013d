use std::env;

const DEFAULT_BASE_URL: &str = "http://datapoint.metoffice.gov.uk/public/data";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_key: String,
    pub base_url: String,
    pub forecast_interval: u64,
    pub observation_interval: u64,
    pub forecast_capacity: usize,
    pub observation_capacity: usize,
    /// Allow-list of location ids; `None` keeps every location.
    pub locations: Option<Vec<String>>,
    pub history_url: Option<String>,
    pub history_auth: Option<String>,
    pub admin_token: Option<String>,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("WXPROXY_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
            api_key: env::var("MET_OFFICE_KEY").unwrap_or_default(),
            base_url: env::var("WXPROXY_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            forecast_interval: env::var("WXPROXY_FORECAST_INTERVAL")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(600),
            observation_interval: env::var("WXPROXY_OBSERVATION_INTERVAL")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(600),
            forecast_capacity: env::var("WXPROXY_FORECAST_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1),
            observation_capacity: env::var("WXPROXY_OBSERVATION_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8),
            locations: env::var("WXPROXY_LOCATIONS").ok().map(|s| {
                s.split(',')
                    .map(|id| id.trim().to_string())
                    .filter(|id| !id.is_empty())
                    .collect()
            }),
            history_url: env::var("WXPROXY_HISTORY_URL").ok(),
            history_auth: env::var("WXPROXY_HISTORY_AUTH").ok(),
            admin_token: env::var("WXPROXY_ADMIN_TOKEN").ok(),
            log_level: env::var("WXPROXY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
