use crate::error::{Error, Result};
use crate::model::{parse_iso_time, DurationMs, RequestRecord, StatusCode};

pub trait Decoder {
    fn decode(&self, buf: &[u8]) -> Result<RequestRecord>;
}

/// Decodes whitespace-separated access log lines:
///
/// ```text
/// [2023-02-02T16:30:35] "GET /quotes/latest HTTP/1.1" 200 80
/// ```
///
/// Tokens are the bracketed ISO-8601 timestamp, the HTTP method behind a
/// one-character marker, the resource, an ignored token (protocol), the
/// status code and the duration in milliseconds. Anything after the sixth
/// token is ignored.
pub struct AccessLogDecoder {}

impl AccessLogDecoder {
    pub fn new() -> Self {
        Self {}
    }

    pub fn decode_line(&self, line: &str) -> Result<RequestRecord> {
        let mut tokens = line.split_whitespace();
        let mut next = |what: &str| {
            tokens
                .next()
                .ok_or_else(|| Error::from(format!("too few tokens, {} is missing", what)))
        };

        let timestamp = next("timestamp")?;
        let method = next("method")?;
        let resource = next("resource")?;
        next("protocol")?;
        let status_code = next("status code")?;
        let duration_ms = next("duration")?;

        let timestamp = parse_iso_time(timestamp.trim_matches(&['[', ']'][..]))?;

        // Skip the marker that precedes the method, e.g. the opening quote.
        let mut chars = method.chars();
        chars.next();
        let method = chars.as_str();
        if method.is_empty() {
            return Err("HTTP method is empty".into());
        }

        let status_code = status_code
            .parse::<StatusCode>()
            .map_err(|e| ("couldn't parse status code", e))?;
        let duration_ms = duration_ms
            .parse::<DurationMs>()
            .map_err(|e| ("couldn't parse duration", e))?;

        Ok(RequestRecord::new(
            timestamp,
            method,
            resource,
            status_code,
            duration_ms,
        ))
    }
}

impl Default for AccessLogDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for AccessLogDecoder {
    fn decode(&self, buf: &[u8]) -> Result<RequestRecord> {
        let line = std::str::from_utf8(buf).map_err(|e| ("couldn't decode UTF-8 line", e))?;
        self.decode_line(line)
    }
}
