use anyhow::Context;
use clap::Parser as _;
use hot_body_summariser::cli::{OutputFormat, ResultCli};
use hot_body_summariser::logging::init_logging;
use hot_body_summariser::{render, summarise_file, SummariseError};
use log::{debug, info};
use std::process::ExitCode;

const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
const CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> anyhow::Result<ExitCode> {
    let args = ResultCli::parse();
    init_logging(args.log_level, args.log_format, args.log.as_deref())?;

    info!("{CRATE_NAME} {CRATE_VERSION}");
    debug!("parsed flags: {args:?}");

    let summary = match summarise_file(&args.result_log) {
        Ok(summary) => summary,
        Err(SummariseError::NoPaymentRecords(e)) => {
            println!("{e}");
            return Ok(ExitCode::from(1));
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Failed to summarise {}", args.result_log.display())
            })
        }
    };

    let rows = summary.report(args.brief);
    match args.output {
        OutputFormat::Table => println!("{}", render::render_table(&rows)),
        OutputFormat::Json => println!("{}", render::render_json(&rows)?),
    }

    Ok(ExitCode::SUCCESS)
}
