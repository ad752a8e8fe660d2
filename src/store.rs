use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::model::{BucketKey, RequestRecord, StoreKey};

/// Minute buckets of a single series. Every bucket holds at least one record,
/// in the order the records were appended.
pub type Buckets = HashMap<BucketKey, Vec<RequestRecord>>;

/// Shared handle to the buckets of one (method, resource) series.
///
/// Each series has its own lock, so writers and readers of different series
/// never contend.
#[derive(Debug, Clone)]
pub struct Series {
    buckets: Arc<RwLock<Buckets>>,
}

impl Series {
    fn new() -> Self {
        Self {
            buckets: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn append(&self, record: RequestRecord) {
        self.buckets
            .write()
            .entry(record.bucket_key())
            .or_insert_with(Vec::new)
            .push(record);
    }

    /// Locks the series for reading. Records appended while the guard is
    /// held become visible only to later readers.
    pub fn read(&self) -> RwLockReadGuard<'_, Buckets> {
        self.buckets.read()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.read().len()
    }

    pub fn record_count(&self) -> usize {
        self.buckets.read().values().map(Vec::len).sum()
    }
}

/// Append-only, in-memory store of request records grouped by
/// (method, resource) and then by minute.
#[derive(Debug, Default)]
pub struct MetricStore {
    series: RwLock<HashMap<StoreKey, Series>>,
}

impl MetricStore {
    pub fn new() -> Self {
        Self {
            series: RwLock::new(HashMap::new()),
        }
    }

    pub fn append(&self, record: RequestRecord) {
        self.series_for(record.store_key()).append(record);
    }

    pub fn lookup(&self, method: &str, resource: &str) -> Option<Series> {
        self.series
            .read()
            .get(&StoreKey::new(method, resource))
            .cloned()
    }

    /// Number of distinct (method, resource) series.
    pub fn len(&self) -> usize {
        self.series.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.read().is_empty()
    }

    /// All observed series keys, sorted.
    pub fn keys(&self) -> Vec<StoreKey> {
        let mut keys: Vec<StoreKey> = self.series.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn series_for(&self, key: StoreKey) -> Series {
        let existing = self.series.read().get(&key).cloned();
        if let Some(series) = existing {
            return series;
        }

        // Another writer may have created the series between the two locks;
        // the entry API keeps whichever got there first.
        self.series
            .write()
            .entry(key)
            .or_insert_with(Series::new)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::model::{parse_iso_time, Timestamp};

    fn ts(s: &str) -> Timestamp {
        parse_iso_time(s).unwrap()
    }

    fn record(method: &str, resource: &str, timestamp: &str, duration_ms: i64) -> RequestRecord {
        RequestRecord::new(ts(timestamp), method, resource, 200, duration_ms)
    }

    #[test]
    fn test_append_and_lookup() {
        let store = MetricStore::new();
        assert!(store.is_empty());

        store.append(record("GET", "/x", "2023-02-02T16:30:35", 80));
        store.append(record("GET", "/x", "2023-02-02T16:30:10", 40));
        store.append(record("GET", "/x", "2023-02-02T16:31:00", 10));
        store.append(record("POST", "/x", "2023-02-02T16:30:00", 5));

        assert_eq!(store.len(), 2);

        let series = store.lookup("GET", "/x").expect("series must exist");
        assert_eq!(series.bucket_count(), 2);
        assert_eq!(series.record_count(), 3);

        let buckets = series.read();
        let minute = &buckets[&ts("2023-02-02T16:30:00")];
        let durations: Vec<i64> = minute.iter().map(|r| r.duration_ms()).collect();
        assert_eq!(durations, vec![80, 40]);
    }

    #[test]
    fn test_lookup_unknown() {
        let store = MetricStore::new();
        store.append(record("GET", "/x", "2023-02-02T16:30:35", 80));

        assert!(store.lookup("GET", "/y").is_none());
        assert!(store.lookup("POST", "/x").is_none());
        assert!(store.lookup("GE", "T/x").is_none());
    }

    #[test]
    fn test_keys_sorted() {
        let store = MetricStore::new();
        store.append(record("POST", "/b", "2023-02-02T16:30:35", 1));
        store.append(record("GET", "/b", "2023-02-02T16:30:35", 1));
        store.append(record("GET", "/a", "2023-02-02T16:30:35", 1));

        let keys: Vec<String> = store.keys().iter().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["GET /a", "GET /b", "POST /b"]);
    }

    #[test]
    fn test_concurrent_append() {
        let store = Arc::new(MetricStore::new());
        let start = ts("2023-02-02T16:00:00");

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..500i64 {
                        let resource = if i % 2 == 0 { "/even" } else { "/odd" };
                        store.append(RequestRecord::new(
                            start + i * 1000,
                            "GET",
                            resource,
                            200,
                            worker,
                        ));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 2);
        for resource in &["/even", "/odd"] {
            let series = store.lookup("GET", resource).unwrap();
            assert_eq!(series.record_count(), 8 * 250);
            // 500 seconds span minutes 16:00 through 16:08.
            assert_eq!(series.bucket_count(), 9);
        }
    }
}
