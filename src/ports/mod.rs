pub mod history_store;
pub mod weather_source;

pub use history_store::{HistoryStore, PersistenceError};
pub use weather_source::{SourceError, WeatherSource};
