pub mod siterep;
pub mod snapshot;

pub use siterep::{RawLocation, RawPeriod, RawRep, SiteRepDocument};
pub use snapshot::{FetchKind, LocationSeries, Observation, Snapshot};
