//! Folding of decoded records into the statistics of a run.

use crate::nested_code::extract_nested_code;
use chrono::{DateTime, Utc};
use hot_body_record_model::{Record, TimedRecord};
use log::trace;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Width of one latency bucket of the elapsed time histogram.
pub const HISTOGRAM_STEP: Duration = Duration::from_secs(50);

/// Returned by [Aggregator::finalize] when the log held no payment.
#[derive(Debug, thiserror::Error)]
#[error("no records found")]
pub struct NoPaymentRecords;

/// Running counters of a result log.
///
/// Only payments are measured. Every other record is skipped, except that a `sebak-error` may
/// carry a nested application error code which is counted.
#[derive(Debug, Clone)]
pub struct Aggregator {
    step: Duration,
    total_records: u64,
    error_count: u64,
    error_type_counts: HashMap<String, u64>,
    nested_error_code_counts: HashMap<i64, u64>,
    histogram: BTreeMap<u128, u64>,
    max_elapsed: Duration,
    min_elapsed: Option<Duration>,
    last_time: Option<DateTime<Utc>>,
}

/// One latency range of the histogram, `[start, start + width)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramBucket {
    pub start: Duration,
    pub width: Duration,
    pub count: u64,
}

impl HistogramBucket {
    pub fn end(&self) -> Duration {
        self.start + self.width
    }
}

/// The final state of an [Aggregator], with a dense histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateSummary {
    pub total_records: u64,
    pub error_count: u64,
    pub error_type_counts: HashMap<String, u64>,
    pub nested_error_code_counts: HashMap<i64, u64>,
    /// Every bucket from zero up to the one holding the slowest payment, in ascending order
    pub histogram: Vec<HistogramBucket>,
    pub max_elapsed: Duration,
    pub min_elapsed: Duration,
    /// Time of the last payment in the log, taken as the end of the run
    pub last_time: DateTime<Utc>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    pub fn new() -> Self {
        Self::with_step(HISTOGRAM_STEP)
    }

    /// Create an aggregator with a custom bucket width. A zero width is replaced by
    /// [HISTOGRAM_STEP].
    pub fn with_step(step: Duration) -> Self {
        Self {
            step: if step.is_zero() { HISTOGRAM_STEP } else { step },
            total_records: 0,
            error_count: 0,
            error_type_counts: HashMap::new(),
            nested_error_code_counts: HashMap::new(),
            histogram: BTreeMap::new(),
            max_elapsed: Duration::ZERO,
            min_elapsed: None,
            last_time: None,
        }
    }

    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    pub fn error_count(&self) -> u64 {
        self.error_count
    }

    pub fn error_type_counts(&self) -> &HashMap<String, u64> {
        &self.error_type_counts
    }

    pub fn nested_error_code_counts(&self) -> &HashMap<i64, u64> {
        &self.nested_error_code_counts
    }

    /// The sparse histogram, keyed by bucket start in nanoseconds.
    pub fn histogram(&self) -> &BTreeMap<u128, u64> {
        &self.histogram
    }

    pub fn ingest(&mut self, record: &Record) {
        let payment = match record {
            Record::Payment(payment) => payment,
            Record::SebakError(sebak_error) => {
                match extract_nested_code(sebak_error.raw_error()) {
                    Some(code) => *self.nested_error_code_counts.entry(code).or_default() += 1,
                    None => trace!("No nested error code in {:?}", sebak_error.raw_error()),
                }
                return;
            }
            Record::Config(_) | Record::CreateAccounts(_) => return,
        };

        self.total_records += 1;

        let elapsed = payment.elapsed();
        *self.histogram.entry(self.bucket_of(elapsed)).or_default() += 1;
        self.max_elapsed = self.max_elapsed.max(elapsed);
        self.min_elapsed = Some(self.min_elapsed.map_or(elapsed, |min| min.min(elapsed)));
        self.last_time = Some(payment.time());

        if payment.has_error() {
            self.error_count += 1;
            // Keyed by the raw error type, a missing one counts as empty.
            let error_type = payment.error_type().unwrap_or_default();
            *self
                .error_type_counts
                .entry(error_type.to_string())
                .or_default() += 1;
        }
    }

    /// Close the aggregation, filling the gaps of the histogram with empty buckets.
    ///
    /// The dense histogram holds `max_elapsed / step + 1` buckets, so its size grows
    /// with the slowest payment. The elapsed values of the log are trusted.
    pub fn finalize(self) -> Result<AggregateSummary, NoPaymentRecords> {
        let (Some(min_elapsed), Some(last_time)) = (self.min_elapsed, self.last_time) else {
            return Err(NoPaymentRecords);
        };

        let step = self.step.as_nanos();
        let last_bucket = self.bucket_of(self.max_elapsed);
        let histogram = (0..=last_bucket / step)
            .map(|i| {
                let start = i * step;
                HistogramBucket {
                    start: duration_from_nanos(start),
                    width: self.step,
                    count: self.histogram.get(&start).copied().unwrap_or_default(),
                }
            })
            .collect();

        Ok(AggregateSummary {
            total_records: self.total_records,
            error_count: self.error_count,
            error_type_counts: self.error_type_counts,
            nested_error_code_counts: self.nested_error_code_counts,
            histogram,
            max_elapsed: self.max_elapsed,
            min_elapsed,
            last_time,
        })
    }

    fn bucket_of(&self, elapsed: Duration) -> u128 {
        let step = self.step.as_nanos();
        elapsed.as_nanos() / step * step
    }
}

fn duration_from_nanos(nanos: u128) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    Duration::new(
        (nanos / NANOS_PER_SEC) as u64,
        (nanos % NANOS_PER_SEC) as u32,
    )
}
