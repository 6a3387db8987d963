use anyhow::Context;
use clap::ValueEnum;
use log::LevelFilter;
use std::io::Write as _;
use std::path::Path;

/// Verbosity of the logs. `crit` only exists for compatibility and logs errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Crit,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Crit | LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human readable lines
    Terminal,
    /// One JSON object per line
    Json,
}

/// Initialise the logger.
///
/// `RUST_LOG` is applied on top of `level`, so individual modules can still be tuned.
pub fn init_logging(level: LogLevel, format: LogFormat, file: Option<&Path>) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level.into());
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    if format == LogFormat::Json {
        builder.format(|buf, record| writeln!(buf, "{}", json_entry(record)));
    }

    if let Some(path) = file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;
    Ok(())
}

fn json_entry(record: &log::Record) -> serde_json::Value {
    serde_json::json!({
        "time": chrono::Utc::now().to_rfc3339(),
        "level": record.level().as_str(),
        "target": record.target(),
        "message": record.args().to_string(),
    })
}
