use super::key::StoreKey;
use super::timestamp::{Timestamp, TimestampTrait};
use super::{BucketKey, DurationMs, StatusCode};

/// One served HTTP request as read from the access log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    timestamp: Timestamp,
    method: String,
    resource: String,
    status_code: StatusCode,
    duration_ms: DurationMs,
}

impl RequestRecord {
    pub fn new<M, R>(
        timestamp: Timestamp,
        method: M,
        resource: R,
        status_code: StatusCode,
        duration_ms: DurationMs,
    ) -> Self
    where
        M: Into<String>,
        R: Into<String>,
    {
        Self {
            timestamp,
            method: method.into(),
            resource: resource.into(),
            status_code,
            duration_ms,
        }
    }

    #[inline]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    #[inline]
    pub fn method(&self) -> &str {
        &self.method
    }

    #[inline]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    #[inline]
    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    #[inline]
    pub fn duration_ms(&self) -> DurationMs {
        self.duration_ms
    }

    #[inline]
    pub fn bucket_key(&self) -> BucketKey {
        self.timestamp.truncate_to_minute()
    }

    pub fn store_key(&self) -> StoreKey {
        StoreKey::new(self.method.as_str(), self.resource.as_str())
    }
}
