use log::warn;

use super::access_log::Decoder;
use super::line::LineReader;
use crate::error::Result;
use crate::model::RequestRecord;

/// Turns a stream of raw lines into request records.
///
/// Lines that fail to decode are logged and skipped; only a failing
/// underlying reader ends the iteration with an error.
pub struct RecordReader {
    inner: Box<dyn LineReader>,
    decoder: Box<dyn Decoder>,
    line_no: usize,
    rejected: usize,
}

impl RecordReader {
    pub fn new(inner: Box<dyn LineReader>, decoder: Box<dyn Decoder>) -> Self {
        Self {
            inner,
            decoder,
            line_no: 0,
            rejected: 0,
        }
    }

    /// Number of lines read so far.
    #[inline]
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Number of lines dropped because they couldn't be decoded.
    #[inline]
    pub fn rejected(&self) -> usize {
        self.rejected
    }
}

impl std::iter::Iterator for RecordReader {
    type Item = Result<RequestRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut buf = Vec::new();
            match self.inner.read(&mut buf) {
                Ok(0) => return None, // EOF
                Ok(_) => (),
                Err(e) => {
                    return Some(Err(("input reader failed", e).into()));
                }
            };

            self.line_no += 1;

            match self.decoder.decode(&buf) {
                Ok(record) => return Some(Ok(record)),
                Err(err) => {
                    self.rejected += 1;
                    warn!(
                        "line {} rejected: {}; line: {}",
                        self.line_no,
                        err,
                        String::from_utf8_lossy(&buf).trim_end(),
                    );
                    continue;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{AccessLogDecoder, DelimReader};

    #[test]
    fn test_record_reader_skips_malformed_lines() -> std::result::Result<(), String> {
        let input = "[2023-02-02T16:30:35] \"GET /x HTTP/1.1\" 200 80\n\
                     garbage\n\
                     [2023-02-02T16:31:02] \"GET /x HTTP/1.1\" 500 12\n\
                     [2023-02-02T16:31:02] \"GET /x HTTP/1.1\" 500 twelve\n";

        let mut reader = RecordReader::new(
            Box::new(DelimReader::new(input.as_bytes())),
            Box::new(AccessLogDecoder::new()),
        );

        let records = reader
            .by_ref()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].duration_ms(), 80);
        assert_eq!(records[1].status_code(), 500);
        assert_eq!(reader.line_no(), 4);
        assert_eq!(reader.rejected(), 2);
        Ok(())
    }
}
