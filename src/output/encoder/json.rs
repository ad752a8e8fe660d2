use serde::Serialize;

use super::encoder::Encoder;
use crate::aggregate::AggregatedMetrics;
use crate::error::Result;
use crate::model::{DurationMs, TimestampTrait};

// {
//   "bucket": "2023-02-02T16:30:00.000",
//   "firstRequest": "2023-02-02T16:30:10.000",
//   "lastRequest": "2023-02-02T16:30:35.000",
//   "count": 3,
//   "avgDurationMs": 73,
//   "minDurationMs": 40,
//   "maxDurationMs": 100
// }
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MetricsRepr {
    bucket: String,
    first_request: Option<String>,
    last_request: Option<String>,
    count: usize,
    avg_duration_ms: Option<DurationMs>,
    min_duration_ms: Option<DurationMs>,
    max_duration_ms: Option<DurationMs>,
}

impl MetricsRepr {
    fn new(value: &AggregatedMetrics) -> Self {
        Self {
            bucket: value.bucket.to_string_millis(),
            first_request: value.first_request.map(|t| t.to_string_millis()),
            last_request: value.last_request.map(|t| t.to_string_millis()),
            count: value.count,
            avg_duration_ms: value.avg_duration_ms,
            min_duration_ms: value.min_duration_ms,
            max_duration_ms: value.max_duration_ms,
        }
    }
}

/// One JSON object per bucket.
pub struct JsonEncoder {}

impl JsonEncoder {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, value: &AggregatedMetrics) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&MetricsRepr::new(value))
            .map_err(|e| ("JSON serialization failed", e))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_iso_time;

    #[test]
    fn test_encode() -> std::result::Result<(), String> {
        let bucket = parse_iso_time("2023-02-02T16:30:00")?;
        let value = AggregatedMetrics {
            bucket,
            first_request: Some(bucket + 10_000),
            last_request: None,
            count: 3,
            avg_duration_ms: Some(73),
            min_duration_ms: Some(40),
            max_duration_ms: None,
        };

        let json = String::from_utf8(JsonEncoder::new().encode(&value)?).unwrap();
        assert_eq!(
            json,
            r#"{"bucket":"2023-02-02T16:30:00.000","firstRequest":"2023-02-02T16:30:10.000","lastRequest":null,"count":3,"avgDurationMs":73,"minDurationMs":40,"maxDurationMs":null}"#
        );
        Ok(())
    }
}
