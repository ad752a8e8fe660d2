use super::encoder::Encoder;
use crate::aggregate::AggregatedMetrics;
use crate::error::Result;
use crate::model::TimestampTrait;

const MISSING: &str = "-";

/// One tab-separated line per bucket:
///
/// ```text
/// 2023-02-02T16:30:00.000  count=3  avg=73  min=40  max=100  first=...  last=...
/// ```
pub struct HumanReadableEncoder {}

impl HumanReadableEncoder {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for HumanReadableEncoder {
    fn default() -> Self {
        Self::new()
    }
}

fn or_missing<T, F: Fn(&T) -> String>(value: &Option<T>, f: F) -> String {
    value.as_ref().map(f).unwrap_or_else(|| MISSING.to_string())
}

impl Encoder for HumanReadableEncoder {
    fn encode(&self, value: &AggregatedMetrics) -> Result<Vec<u8>> {
        let parts = vec![
            value.bucket.to_string_millis(),
            format!("count={}", value.count),
            format!("avg={}", or_missing(&value.avg_duration_ms, |v| v.to_string())),
            format!("min={}", or_missing(&value.min_duration_ms, |v| v.to_string())),
            format!("max={}", or_missing(&value.max_duration_ms, |v| v.to_string())),
            format!("first={}", or_missing(&value.first_request, |t| t.to_string_millis())),
            format!("last={}", or_missing(&value.last_request, |t| t.to_string_millis())),
        ];
        Ok(parts.join("\t").into_bytes())
    }
}
