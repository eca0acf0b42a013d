use std::collections::VecDeque;
use std::sync::RwLock;

use crate::domain::Snapshot;

/// In-memory ring buffer for shaped snapshots.
///
/// Fixed capacity, strict FIFO eviction. Process-lifetime only — nothing is
/// persisted across restarts. A push or a read is atomic under the lock, so
/// readers never observe a partially-evicted buffer.
pub struct RingStore {
    snapshots: RwLock<VecDeque<Snapshot>>,
    capacity: usize,
}

impl RingStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            snapshots: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Append a snapshot, evicting the oldest first when at capacity.
    pub fn push(&self, snapshot: Snapshot) {
        let mut snapshots = self.snapshots.write().unwrap();

        if snapshots.len() >= self.capacity {
            snapshots.pop_front();
        }

        snapshots.push_back(snapshot);
    }

    /// The most recently pushed snapshot, or `None` if nothing has been
    /// cached yet. Callers must treat `None` as "no data", not as an empty
    /// valid result.
    pub fn latest(&self) -> Option<Snapshot> {
        self.snapshots.read().unwrap().back().cloned()
    }

    /// Current contents in insertion order, oldest first.
    pub fn all(&self) -> Vec<Snapshot> {
        self.snapshots.read().unwrap().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.snapshots.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn snapshot(tag: i64) -> Snapshot {
        Snapshot::new(Utc.timestamp_opt(tag, 0).unwrap(), Vec::new())
    }

    #[test]
    fn test_empty_store_signals_no_data() {
        let store = RingStore::new(8);
        assert!(store.is_empty());
        assert!(store.latest().is_none());
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_push_beyond_capacity_evicts_oldest() {
        let store = RingStore::new(8);
        for tag in 0..9 {
            store.push(snapshot(tag));
        }

        let all = store.all();
        assert_eq!(all.len(), 8);
        // the first push has been evicted, the rest are oldest first
        assert_eq!(all[0].time.timestamp(), 1);
        assert_eq!(all[7].time.timestamp(), 8);
    }

    #[test]
    fn test_capacity_one_keeps_most_recent_only() {
        let store = RingStore::new(1);
        store.push(snapshot(1)); // A
        store.push(snapshot(2)); // B

        let all = store.all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].time.timestamp(), 2);
        assert_eq!(store.latest().unwrap().time.timestamp(), 2);
    }

    #[test]
    fn test_insertion_order_is_oldest_first() {
        let store = RingStore::new(4);
        store.push(snapshot(10));
        store.push(snapshot(20));
        store.push(snapshot(30));

        let times: Vec<i64> = store.all().iter().map(|s| s.time.timestamp()).collect();
        assert_eq!(times, vec![10, 20, 30]);
        assert_eq!(store.latest().unwrap().time.timestamp(), 30);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let store = RingStore::new(0);
        store.push(snapshot(1));
        assert_eq!(store.len(), 1);
        assert_eq!(store.capacity(), 1);
    }
}
