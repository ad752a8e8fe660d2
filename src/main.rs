use std::fs::File;
use std::io::{self, BufReader};

use log::info;
use structopt::StructOpt;

use rollup::cliopt::{CliOpt, Encoding};
use rollup::input::{AccessLogDecoder, DelimReader, LineReader, RecordReader};
use rollup::output::{HumanReadableEncoder, JsonEncoder, LineWriter, Output};
use rollup::service::MetricsService;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = CliOpt::from_args();

    let default_filter = if opt.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let reader: Box<dyn LineReader> = match &opt.input {
        Some(path) => Box::new(DelimReader::new(BufReader::new(
            File::open(path).map_err(|e| format!("couldn't open {}: {}", path.display(), e))?,
        ))),
        None => Box::new(DelimReader::new(BufReader::new(io::stdin()))),
    };

    let service = MetricsService::with_strategy(opt.strategy);

    let mut records = RecordReader::new(reader, Box::new(AccessLogDecoder::new()));
    for record in records.by_ref() {
        service.append(record?);
    }
    info!(
        "ingested {} lines into {} series, {} rejected; selecting buckets by {}",
        records.line_no(),
        service.store().len(),
        records.rejected(),
        service.strategy(),
    );

    let mut output = Output::new(
        Box::new(LineWriter::new(io::stdout())),
        match opt.encode {
            Encoding::HumanReadable => Box::new(HumanReadableEncoder::new()),
            Encoding::Json => Box::new(JsonEncoder::new()),
        },
    );

    for metrics in service.query(&opt.method, &opt.resource, opt.limit) {
        output.write(&metrics)?;
    }
    output.flush()?;

    Ok(())
}
