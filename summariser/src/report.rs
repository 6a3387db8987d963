//! Layout of a run summary as labelled report rows.
//!
//! The rows carry typed values; turning them into text is left to [crate::render].

use crate::aggregator::AggregateSummary;
use crate::boundaries::RunBoundaries;
use chrono::{DateTime, Utc};
use hot_body_record_model::{Amount, RunConfig};
use itertools::Itertools;
use log::debug;
use std::time::Duration;

/// Label of the failed payments that carried no error type.
pub const UNTYPED_ERROR_LABEL: &str = "(no error type)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Section {
    #[display("config")]
    Config,
    #[display("network")]
    Network,
    #[display("node")]
    Node,
    #[display("time")]
    Time,
    #[display("result")]
    Result,
    #[display("error")]
    Error,
    #[display("sebak-error")]
    SebakError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportValue {
    Empty,
    /// A value that cannot be computed from this log
    Unknown,
    Text(String),
    /// An account address or hash, which may be shortened for display
    Address(String),
    Count(u64),
    Amount(Amount),
    Duration(Duration),
    Timestamp(DateTime<Utc>),
    Seconds(f64),
    ErrorRate {
        percent: f64,
        errors: u64,
        total: u64,
    },
    Bucket {
        start: Duration,
        end: Duration,
        percent: f64,
        count: u64,
    },
    Share {
        count: u64,
        percent: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub section: Section,
    pub metric: String,
    pub value: ReportValue,
}

/// `part` as a percentage of `whole`, zero when `whole` is zero.
pub fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Operations per second of `requests` requests carrying `operations` operations each.
///
/// `None` when there is no time base to divide by.
pub fn ops(requests: u64, operations: u64, elapsed: Option<Duration>) -> Option<u64> {
    let seconds = elapsed?.as_secs_f64();
    if seconds <= 0.0 {
        return None;
    }
    Some((requests.saturating_mul(operations) as f64 / seconds) as u64)
}

/// Operations per second the run would have reached without errors.
pub fn expected_ops(
    aggregate: &AggregateSummary,
    config: &RunConfig,
    elapsed: Option<Duration>,
) -> Option<u64> {
    ops(aggregate.total_records, config.operations, elapsed)
}

/// Operations per second that actually succeeded.
pub fn real_ops(
    aggregate: &AggregateSummary,
    config: &RunConfig,
    elapsed: Option<Duration>,
) -> Option<u64> {
    ops(
        aggregate.total_records.saturating_sub(aggregate.error_count),
        config.operations,
        elapsed,
    )
}

#[derive(Default)]
struct Rows(Vec<ReportRow>);

impl Rows {
    fn push(&mut self, section: Section, metric: impl Into<String>, value: ReportValue) {
        self.0.push(ReportRow {
            section,
            metric: metric.into(),
            value,
        });
    }
}

/// Build the report of a run, section by section.
///
/// The run ends with its last payment. `ended` lines are only shown for reference.
pub fn build_report(
    config: &RunConfig,
    boundaries: &RunBoundaries,
    aggregate: &AggregateSummary,
    brief: bool,
) -> Vec<ReportRow> {
    let mut rows = Rows::default();
    let elapsed = boundaries.elapsed_until(aggregate.last_time);

    if !brief {
        push_config(&mut rows, config);
        push_time(&mut rows, boundaries, aggregate, elapsed);
    }
    push_result(&mut rows, config, aggregate, elapsed);
    push_errors(&mut rows, aggregate);
    push_sebak_errors(&mut rows, aggregate);

    debug!("Built report with {} rows", rows.0.len());
    rows.0
}

fn push_config(rows: &mut Rows, config: &RunConfig) {
    use ReportValue as V;
    use Section::{Config, Network, Node};

    rows.push(Config, "testing time", V::Duration(config.timeout));
    rows.push(Config, "concurrent requests", V::Count(config.concurrency));
    rows.push(Config, "initial account", V::Address(config.init_account.clone()));
    rows.push(Config, "request timeout", V::Duration(config.request_timeout));
    rows.push(Config, "confirm duration", V::Duration(config.confirm_duration));
    rows.push(Config, "operations", V::Count(config.operations));

    let policy = &config.node.policy;
    rows.push(Network, "network id", V::Text(policy.network_id.clone()));
    rows.push(Network, "initial balance", V::Amount(policy.initial_balance));
    rows.push(Network, "block time", V::Duration(policy.block_time));
    rows.push(Network, "base reserve", V::Amount(policy.base_reserve));
    rows.push(Network, "base fee", V::Amount(policy.base_fee));

    let node = &config.node;
    rows.push(Node, "endpoint", V::Text(node.node.endpoint.clone()));
    rows.push(Node, "address", V::Address(node.node.address.clone()));
    rows.push(Node, "state", V::Text(node.node.state.clone()));
    rows.push(Node, "block height", V::Count(node.block.height));
    rows.push(Node, "block hash", V::Address(node.block.hash.clone()));
    rows.push(Node, "block totaltxs", V::Count(node.block.total_txs));
    rows.push(Node, "block totalops", V::Count(node.block.total_ops));
}

fn push_time(
    rows: &mut Rows,
    boundaries: &RunBoundaries,
    aggregate: &AggregateSummary,
    elapsed: Option<Duration>,
) {
    rows.push(
        Section::Time,
        "started",
        boundaries
            .started
            .map_or(ReportValue::Unknown, ReportValue::Timestamp),
    );
    rows.push(
        Section::Time,
        "ended",
        ReportValue::Timestamp(aggregate.last_time),
    );
    rows.push(
        Section::Time,
        "total elapsed",
        elapsed.map_or(ReportValue::Unknown, ReportValue::Duration),
    );
    if let Some(ended) = boundaries.ended {
        rows.push(Section::Time, "log ended", ReportValue::Timestamp(ended));
    }
}

fn push_result(
    rows: &mut Rows,
    config: &RunConfig,
    aggregate: &AggregateSummary,
    elapsed: Option<Duration>,
) {
    let total = aggregate.total_records;
    rows.push(Section::Result, "# requests", ReportValue::Count(total));
    rows.push(
        Section::Result,
        "# operations",
        ReportValue::Count(total.saturating_mul(config.operations)),
    );
    rows.push(
        Section::Result,
        "error rates",
        ReportValue::ErrorRate {
            percent: percent(aggregate.error_count, total),
            errors: aggregate.error_count,
            total,
        },
    );
    rows.push(
        Section::Result,
        "max elapsed time",
        ReportValue::Seconds(aggregate.max_elapsed.as_secs_f64()),
    );
    rows.push(
        Section::Result,
        "min elapsed time",
        ReportValue::Seconds(aggregate.min_elapsed.as_secs_f64()),
    );

    rows.push(Section::Result, "distribution", ReportValue::Empty);
    for bucket in &aggregate.histogram {
        rows.push(
            Section::Result,
            "",
            ReportValue::Bucket {
                start: bucket.start,
                end: bucket.end(),
                percent: percent(bucket.count, total),
                count: bucket.count,
            },
        );
    }

    let rate = |ops: Option<u64>| ops.map_or(ReportValue::Unknown, ReportValue::Count);
    rows.push(
        Section::Result,
        "expected OPS",
        rate(expected_ops(aggregate, config, elapsed)),
    );
    rows.push(
        Section::Result,
        "real OPS",
        rate(real_ops(aggregate, config, elapsed)),
    );
}

fn push_errors(rows: &mut Rows, aggregate: &AggregateSummary) {
    if aggregate.error_count == 0 {
        rows.push(Section::Error, "no error", ReportValue::Empty);
        return;
    }

    for (error_type, count) in most_frequent_first(aggregate.error_type_counts.iter()) {
        let label = if error_type.is_empty() {
            UNTYPED_ERROR_LABEL
        } else {
            error_type.as_str()
        };
        rows.push(
            Section::Error,
            label,
            ReportValue::Share {
                count: *count,
                percent: percent(*count, aggregate.error_count),
            },
        );
    }
}

fn push_sebak_errors(rows: &mut Rows, aggregate: &AggregateSummary) {
    let codes = &aggregate.nested_error_code_counts;
    if codes.is_empty() {
        rows.push(Section::SebakError, "no error", ReportValue::Empty);
        return;
    }

    let total: u64 = codes.values().sum();
    for (code, count) in most_frequent_first(codes.iter()) {
        rows.push(
            Section::SebakError,
            format!("sebak-error-{code}"),
            ReportValue::Share {
                count: *count,
                percent: percent(*count, total),
            },
        );
    }
}

fn most_frequent_first<'a, K>(
    counts: impl Iterator<Item = (&'a K, &'a u64)>,
) -> impl Iterator<Item = (&'a K, &'a u64)>
where
    K: Ord + 'a,
{
    counts.sorted_by(|(a_key, a_count), (b_key, b_count)| {
        b_count.cmp(a_count).then_with(|| a_key.cmp(b_key))
    })
}
