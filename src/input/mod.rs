mod access_log;
mod line;
mod reader;

pub use access_log::{AccessLogDecoder, Decoder};
pub use line::{DelimReader, LineReader};
pub use reader::RecordReader;
