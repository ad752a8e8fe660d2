use crate::aggregate::AggregatedMetrics;
use crate::error::Result;

pub trait Encoder {
    fn encode(&self, value: &AggregatedMetrics) -> Result<Vec<u8>>;
}
