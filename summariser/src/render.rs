//! Text output of report rows, as a table or as JSON.

use crate::report::{ReportRow, ReportValue};
use chrono::SecondsFormat;
use serde::Serialize;
use std::time::Duration;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Number of characters kept at each end of a shortened address.
pub const ADDRESS_EDGE: usize = 13;

/// A report row with its value formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct DisplayRow {
    #[tabled(rename = "Section")]
    pub section: String,
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub fn display_rows(rows: &[ReportRow]) -> Vec<DisplayRow> {
    rows.iter()
        .map(|row| DisplayRow {
            section: row.section.to_string(),
            metric: row.metric.clone(),
            value: format_value(&row.value),
        })
        .collect()
}

/// Render the rows as a table, naming each section once, on its first row.
pub fn render_table(rows: &[ReportRow]) -> String {
    let mut current_section = None;
    let rows = display_rows(rows)
        .into_iter()
        .map(|mut row| {
            if current_section.as_ref() == Some(&row.section) {
                row.section.clear();
            } else {
                current_section = Some(row.section.clone());
                row.section = format!("* {}", row.section);
            }
            row
        })
        .collect::<Vec<_>>();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    table.to_string()
}

pub fn render_json(rows: &[ReportRow]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&display_rows(rows))
}

pub fn format_value(value: &ReportValue) -> String {
    match value {
        ReportValue::Empty => String::new(),
        ReportValue::Unknown => "n/a".to_string(),
        ReportValue::Text(text) => text.clone(),
        ReportValue::Address(address) => format_address(address),
        ReportValue::Count(count) => count.to_string(),
        ReportValue::Amount(amount) => amount.to_string(),
        ReportValue::Duration(duration) => format_duration(*duration),
        ReportValue::Timestamp(time) => time.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        ReportValue::Seconds(seconds) => format!("{seconds:.10}"),
        ReportValue::ErrorRate {
            percent,
            errors,
            total,
        } => format!("{percent:2.5}% ({errors}/{total})"),
        ReportValue::Bucket {
            start,
            end,
            percent,
            count,
        } => format!(
            "{:>3}-{:<3}: {percent:8.5}% / {count:5}",
            start.as_secs(),
            end.as_secs()
        ),
        ReportValue::Share { count, percent } => {
            format!("{count} | {:>10}", format!("{percent:.5}%"))
        }
    }
}

/// Shorten a long address to its first and last [ADDRESS_EDGE] characters.
pub fn format_address(address: &str) -> String {
    let len = address.chars().count();
    if len <= ADDRESS_EDGE * 2 {
        return address.to_string();
    }

    let head: String = address.chars().take(ADDRESS_EDGE).collect();
    let tail: String = address.chars().skip(len - ADDRESS_EDGE).collect();
    format!("{head}...{tail}")
}

pub fn format_duration(duration: Duration) -> String {
    format!("{:.3}s", duration.as_secs_f64())
}
