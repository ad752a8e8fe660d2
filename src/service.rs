use std::convert::TryFrom;

use crate::aggregate::{reduce, AggregatedMetrics};
use crate::error::Result;
use crate::input::AccessLogDecoder;
use crate::model::RequestRecord;
use crate::store::MetricStore;
use crate::window::{Strategy, WindowSelector};

/// Ingests access log lines and answers "last N minutes" queries.
///
/// The service is `Sync`; share it behind an `Arc` to ingest and query
/// from several threads at once.
pub struct MetricsService {
    store: MetricStore,
    decoder: AccessLogDecoder,
    selector: WindowSelector,
}

impl MetricsService {
    pub fn new() -> Self {
        Self::with_strategy(Strategy::default())
    }

    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            store: MetricStore::new(),
            decoder: AccessLogDecoder::new(),
            selector: WindowSelector::new(strategy),
        }
    }

    #[inline]
    pub fn store(&self) -> &MetricStore {
        &self.store
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.selector.strategy()
    }

    /// Decodes one raw line and stores it. A line that fails to decode
    /// leaves the store untouched.
    pub fn ingest(&self, line: &str) -> Result<()> {
        let record = self.decoder.decode_line(line)?;
        self.store.append(record);
        Ok(())
    }

    pub fn append(&self, record: RequestRecord) {
        self.store.append(record);
    }

    /// Statistics of the `limit` most recent minutes seen for the given
    /// method and resource, newest first.
    ///
    /// A non-positive `limit` or a series that was never seen yields an
    /// empty result.
    pub fn query(&self, method: &str, resource: &str, limit: i64) -> Vec<AggregatedMetrics> {
        if limit < 1 {
            return Vec::new();
        }

        let series = match self.store.lookup(method, resource) {
            Some(series) => series,
            None => return Vec::new(),
        };

        // Anything above the bucket count selects every bucket anyway.
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        let buckets = series.read();
        let window = self.selector.select(&buckets, limit);
        window
            .into_iter()
            .map(|(bucket, records)| reduce(bucket, records))
            .collect()
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}
