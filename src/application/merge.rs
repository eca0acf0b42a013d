use crate::domain::{LocationSeries, Observation, Snapshot};

/// Observations retained per location when archiving a snapshot —
/// roughly 24 hours at 3-hour resolution.
pub const HISTORY_MAX_OBSERVATIONS: usize = 8;

/// Archived entries retained in the history store.
pub const HISTORY_MAX_ENTRIES: usize = 3;

/// Stitch archived snapshots and the live forecast into one chronological
/// series per location.
///
/// Alignment is by array index: every snapshot is assumed to cover the same
/// ordered location list. If the allow-list changed between fetches the
/// series silently misalign — callers must guarantee a stable location list.
///
/// Per location: concatenate the historic snapshots' observations in the
/// given order, reverse that concatenation so the running series is
/// oldest-to-newest, then append the forecast's own observations. The
/// merged `time` is the forecast's `time` — the most recent update instant,
/// not a span.
pub fn merge(historic: &[Snapshot], forecast: &Snapshot) -> Snapshot {
    let data = forecast
        .data
        .iter()
        .enumerate()
        .map(|(idx, live)| {
            let mut observations: Vec<Observation> = historic
                .iter()
                .filter_map(|snapshot| snapshot.data.get(idx))
                .flat_map(|series| series.observations.iter().cloned())
                .collect();
            observations.reverse();
            observations.extend(live.observations.iter().cloned());

            LocationSeries {
                id: live.id.clone(),
                name: live.name.clone(),
                lat: live.lat,
                lon: live.lon,
                observations,
            }
        })
        .collect();

    Snapshot::new(forecast.time, data)
}

/// Trim a snapshot for archiving: keep only the first `max_observations`
/// readings per location. Applied before the write so stored entries never
/// grow unbounded.
pub fn trim_for_archive(snapshot: &Snapshot, max_observations: usize) -> Snapshot {
    let data = snapshot
        .data
        .iter()
        .map(|series| LocationSeries {
            id: series.id.clone(),
            name: series.name.clone(),
            lat: series.lat,
            lon: series.lon,
            observations: series
                .observations
                .iter()
                .take(max_observations)
                .cloned()
                .collect(),
        })
        .collect();

    Snapshot::new(snapshot.time, data)
}
