use std::path::PathBuf;

use structopt::StructOpt;

use crate::window::Strategy;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "rollup",
    about = "Aggregates access log requests per minute and prints the latest buckets"
)]
pub struct CliOpt {
    /// HTTP method to query, e.g. GET
    pub method: String,

    /// Requested resource to query, e.g. /quotes/latest
    pub resource: String,

    /// Number of most recent minutes to report
    #[structopt(long = "limit", short = "l", default_value = "1", allow_hyphen_values = true)]
    pub limit: i64,

    /// Read the access log from a file instead of stdin
    #[structopt(long = "input", short = "f", parse(from_os_str))]
    pub input: Option<PathBuf>,

    /// Output encoding: `h` (human-readable) or `json`
    #[structopt(long = "encode", short = "e", default_value = "h", parse(try_from_str = parse_encoding))]
    pub encode: Encoding,

    /// Bucket selection algorithm: adaptive, sort or scan
    #[structopt(long = "strategy", short = "s", default_value = "adaptive")]
    pub strategy: Strategy,

    /// Log rejected lines and selection details
    #[structopt(long = "verbose", short = "v")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    HumanReadable,
    Json,
}

fn parse_encoding(s: &str) -> Result<Encoding, String> {
    match s {
        "h" => Ok(Encoding::HumanReadable),
        "json" => Ok(Encoding::Json),
        _ => Err(format!("unsupported encoding '{}', expected h or json", s)),
    }
}
