pub mod merge;
pub mod poller;
pub mod service;
pub mod shape;

pub use merge::{merge, trim_for_archive, HISTORY_MAX_ENTRIES, HISTORY_MAX_OBSERVATIONS};
pub use poller::PollerHandle;
pub use service::{HistoryError, WeatherService};
pub use shape::{shape, LocationFilter};
