use crate::model::{BucketKey, DurationMs, RequestRecord, Timestamp};

/// Summary statistics of one minute bucket.
///
/// The optional fields are `None` only when the bucket has no records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedMetrics {
    pub bucket: BucketKey,
    pub first_request: Option<Timestamp>,
    pub last_request: Option<Timestamp>,
    pub count: usize,
    pub avg_duration_ms: Option<DurationMs>,
    pub min_duration_ms: Option<DurationMs>,
    pub max_duration_ms: Option<DurationMs>,
}

impl AggregatedMetrics {
    fn empty(bucket: BucketKey) -> Self {
        Self {
            bucket,
            first_request: None,
            last_request: None,
            count: 0,
            avg_duration_ms: None,
            min_duration_ms: None,
            max_duration_ms: None,
        }
    }
}

pub fn reduce(bucket: BucketKey, records: &[RequestRecord]) -> AggregatedMetrics {
    let head = match records.first() {
        Some(head) => head,
        None => return AggregatedMetrics::empty(bucket),
    };

    let mut first_request = head.timestamp();
    let mut last_request = head.timestamp();
    let mut min_duration = head.duration_ms();
    let mut max_duration = head.duration_ms();
    let mut total_duration: i128 = 0;

    for record in records {
        first_request = first_request.min(record.timestamp());
        last_request = last_request.max(record.timestamp());
        min_duration = min_duration.min(record.duration_ms());
        max_duration = max_duration.max(record.duration_ms());
        total_duration += record.duration_ms() as i128;
    }

    // Integer division truncates toward zero; the mean of i64 values fits i64.
    let avg_duration = (total_duration / records.len() as i128) as DurationMs;

    AggregatedMetrics {
        bucket,
        first_request: Some(first_request),
        last_request: Some(last_request),
        count: records.len(),
        avg_duration_ms: Some(avg_duration),
        min_duration_ms: Some(min_duration),
        max_duration_ms: Some(max_duration),
    }
}
