//! The single pass over a result log, from raw lines to a [Summary].

use crate::aggregator::{AggregateSummary, Aggregator, NoPaymentRecords};
use crate::boundaries::RunBoundaries;
use crate::decode::{decode, Classified, DecodeError};
use crate::jsonl::JsonlReader;
use crate::report::{build_report, ReportRow};
use hot_body_record_model::{Record, RecordKind, RunConfig};
use log::debug;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SummariseError {
    #[error("failed to open <result log> {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read <result log>")]
    Read(#[source] std::io::Error),
    #[error("something wrong to read <result log> at line {line_number}: {line}")]
    Line {
        line_number: usize,
        line: String,
        #[source]
        source: DecodeError,
    },
    #[error("the run config must be the first record, found `{kind}` at line {line_number}")]
    ConfigNotFirst { line_number: usize, kind: RecordKind },
    #[error("no run config found in <result log>")]
    MissingConfig,
    #[error("found a second run config at line {line_number}")]
    DuplicateConfig { line_number: usize },
    #[error(transparent)]
    NoPaymentRecords(#[from] NoPaymentRecords),
}

/// Everything learnt from a result log.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub config: RunConfig,
    pub boundaries: RunBoundaries,
    pub aggregate: AggregateSummary,
}

impl Summary {
    /// Lay out the summary as report rows. A brief report only has the results and errors.
    pub fn report(&self, brief: bool) -> Vec<ReportRow> {
        build_report(&self.config, &self.boundaries, &self.aggregate, brief)
    }
}

/// State carried from one line of the log to the next.
#[derive(Debug, Default)]
pub struct LogPipeline {
    config: Option<RunConfig>,
    boundaries: RunBoundaries,
    aggregator: Aggregator,
}

impl LogPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific aggregator, for example one with a custom histogram step.
    pub fn with_aggregator(aggregator: Aggregator) -> Self {
        Self {
            aggregator,
            ..Self::default()
        }
    }

    pub fn feed_line(&mut self, line_number: usize, line: &str) -> Result<(), SummariseError> {
        let classified = decode(line).map_err(|source| SummariseError::Line {
            line_number,
            line: line.to_string(),
            source,
        })?;
        self.feed(line_number, classified)
    }

    pub fn feed(
        &mut self,
        line_number: usize,
        classified: Classified,
    ) -> Result<(), SummariseError> {
        match classified {
            Classified::Ignored => {}
            Classified::Control { kind, time } => self.boundaries.record(kind, time),
            Classified::Data(Record::Config(config)) => {
                if self.config.is_some() {
                    return Err(SummariseError::DuplicateConfig { line_number });
                }
                debug!("config loaded: {config:?}");
                self.config = Some(config);
            }
            Classified::Data(record) => {
                if self.config.is_none() {
                    return Err(SummariseError::ConfigNotFirst {
                        line_number,
                        kind: record.kind(),
                    });
                }
                self.aggregator.ingest(&record);
            }
        }

        Ok(())
    }

    pub fn finish(self) -> Result<Summary, SummariseError> {
        let config = self.config.ok_or(SummariseError::MissingConfig)?;
        debug!("records loaded, count: {}", self.aggregator.total_records());
        let aggregate = self.aggregator.finalize()?;

        Ok(Summary {
            config,
            boundaries: self.boundaries,
            aggregate,
        })
    }
}

/// Summarise a result log read from `reader`.
pub fn summarise<R>(reader: R) -> Result<Summary, SummariseError>
where
    R: std::io::Read,
{
    summarise_lines(JsonlReader::new(reader))
}

/// Summarise the result log at `path`.
pub fn summarise_file<P>(path: P) -> Result<Summary, SummariseError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    debug!("Loading result log from {}", path.display());
    let lines = JsonlReader::open(path).map_err(|source| SummariseError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    summarise_lines(lines)
}

fn summarise_lines<R>(lines: JsonlReader<R>) -> Result<Summary, SummariseError>
where
    R: std::io::Read,
{
    let mut pipeline = LogPipeline::new();
    for line in lines {
        let line = line.map_err(SummariseError::Read)?;
        pipeline.feed_line(line.number, &line.text)?;
    }
    pipeline.finish()
}
