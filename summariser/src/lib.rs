//! Summarise the result log of a hot body load test run.
//!
//! The log is read once, top to bottom. Each line is classified by [decode::decode], folded into
//! an [aggregator::Aggregator] and, once the log is exhausted, laid out as report rows by
//! [report::build_report] and rendered by [render].

pub mod aggregator;
pub mod boundaries;
pub mod cli;
pub mod decode;
pub mod jsonl;
pub mod logging;
pub mod nested_code;
pub mod pipeline;
pub mod render;
pub mod report;

#[cfg(test)]
pub(crate) mod test_data;

pub use pipeline::{summarise, summarise_file, LogPipeline, SummariseError, Summary};
