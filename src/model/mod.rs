mod key;
mod record;
mod timestamp;

pub use key::*;
pub use record::*;
pub use timestamp::*;

/// A minute-aligned timestamp identifying one bucket of a series.
pub type BucketKey = Timestamp;

pub type StatusCode = i32;

/// Milliseconds spent serving a single request.
pub type DurationMs = i64;
