use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::domain::{LocationSeries, Observation, SiteRepDocument, Snapshot};

/// Which locations survive shaping.
#[derive(Debug, Clone)]
pub enum LocationFilter {
    /// Keep every location in the raw payload
    All,
    /// Keep only locations whose id is in the allow-list
    Only(HashSet<String>),
}

impl LocationFilter {
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(ids.into_iter().map(Into::into).collect())
    }

    pub fn retains(&self, id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(ids) => ids.contains(id),
        }
    }
}

/// Text-to-numeric coercion: absent or unparseable fields become `None`.
fn coerce(field: Option<&str>) -> Option<f64> {
    field.and_then(|s| s.trim().parse().ok())
}

/// Condense a raw DataPoint document into a shaped snapshot.
///
/// Per retained location, all periods' reading lists are flattened into one
/// chronological sequence, earliest first, keeping only temperature and
/// humidity. Pure: the same document, filter, and `time` always produce the
/// same snapshot. Callers pass `Utc::now()` in production and a fixed
/// instant in tests.
pub fn shape(raw: &SiteRepDocument, filter: &LocationFilter, time: DateTime<Utc>) -> Snapshot {
    let data = raw
        .site_rep
        .dv
        .locations
        .iter()
        .filter(|loc| filter.retains(&loc.i))
        .map(|loc| LocationSeries {
            id: loc.i.clone(),
            name: loc.name.clone(),
            lat: coerce(loc.lat.as_deref()),
            lon: coerce(loc.lon.as_deref()),
            observations: loc
                .periods
                .iter()
                .flat_map(|period| period.reps.iter())
                .map(|rep| Observation {
                    temperature: coerce(rep.temperature.as_deref()),
                    humidity: coerce(rep.humidity.as_deref()),
                })
                .collect(),
        })
        .collect();

    Snapshot::new(time, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn document(value: serde_json::Value) -> SiteRepDocument {
        serde_json::from_value(value).unwrap()
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 11, 7, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_shape_single_rep() {
        let raw = document(json!({
            "SiteRep": { "DV": { "dataDate": "2021-11-07T12:00:00Z", "type": "Obs", "Location": [
                { "i": "1", "lat": "51.5", "lon": "-0.1", "Period": [
                    { "type": "Day", "value": "2021-11-07Z", "Rep": [ { "T": "12.3", "H": "80" } ] }
                ]}
            ]}}
        }));

        let snapshot = shape(&raw, &LocationFilter::All, fixed_time());

        assert_eq!(snapshot.time, fixed_time());
        assert_eq!(snapshot.data.len(), 1);
        let loc = &snapshot.data[0];
        assert_eq!(loc.id, "1");
        assert_eq!(loc.lat, Some(51.5));
        assert_eq!(loc.lon, Some(-0.1));
        assert_eq!(loc.observations, vec![Observation::new(Some(12.3), Some(80.0))]);
    }

    #[test]
    fn test_missing_fields_become_null_and_keep_position() {
        let raw = document(json!({
            "SiteRep": { "DV": { "Location": [
                { "i": "1", "lat": "n/a", "Period": [
                    { "Rep": [ { "T": "10.0", "H": "75" }, { "H": "not-a-number" }, { "T": "9.5" } ] }
                ]}
            ]}}
        }));

        let snapshot = shape(&raw, &LocationFilter::All, fixed_time());
        let loc = &snapshot.data[0];

        assert_eq!(loc.lat, None);
        assert_eq!(loc.lon, None);
        assert_eq!(loc.observations.len(), 3);
        assert_eq!(loc.observations[1], Observation::new(None, None));
        assert_eq!(loc.observations[2], Observation::new(Some(9.5), None));
    }

    #[test]
    fn test_periods_flatten_chronologically() {
        let raw = document(json!({
            "SiteRep": { "DV": { "Location": [
                { "i": "7", "Period": [
                    { "value": "2021-11-06Z", "Rep": [ { "T": "1" }, { "T": "2" } ] },
                    { "value": "2021-11-07Z", "Rep": [ { "T": "3" } ] }
                ]}
            ]}}
        }));

        let snapshot = shape(&raw, &LocationFilter::All, fixed_time());
        let temps: Vec<Option<f64>> = snapshot.data[0]
            .observations
            .iter()
            .map(|o| o.temperature)
            .collect();

        assert_eq!(temps, vec![Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_allow_list_filters_locations() {
        let raw = document(json!({
            "SiteRep": { "DV": { "Location": [
                { "i": "1", "Period": [] },
                { "i": "2", "Period": [] },
                { "i": "3", "Period": [] }
            ]}}
        }));

        let filter = LocationFilter::from_ids(["1", "3"]);
        let snapshot = shape(&raw, &filter, fixed_time());
        let ids: Vec<&str> = snapshot.data.iter().map(|l| l.id.as_str()).collect();

        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_location_without_periods_yields_empty_observations() {
        let raw = document(json!({
            "SiteRep": { "DV": { "Location": [ { "i": "1", "lat": "51.5", "lon": "-0.1" } ] } }
        }));

        let snapshot = shape(&raw, &LocationFilter::All, fixed_time());

        assert_eq!(snapshot.data.len(), 1);
        assert!(snapshot.data[0].observations.is_empty());
    }

    #[test]
    fn test_shape_is_idempotent_under_fixed_clock() {
        let value = json!({
            "SiteRep": { "DV": { "Location": [
                { "i": "1", "lat": "51.5", "lon": "-0.1", "Period": [
                    { "Rep": [ { "T": "12.3", "H": "80" }, { "T": "11.9", "H": "82" } ] }
                ]}
            ]}}
        });
        let raw = document(value);

        let first = shape(&raw, &LocationFilter::All, fixed_time());
        let second = shape(&raw, &LocationFilter::All, fixed_time());

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
