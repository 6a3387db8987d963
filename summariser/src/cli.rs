use crate::logging::{LogFormat, LogLevel};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Parser)]
#[command(about, long_about = None)]
pub struct ResultCli {
    /// Path to the result log written by the load test
    pub result_log: PathBuf,

    /// Show only the results and errors
    #[arg(long, default_value = "false")]
    pub brief: bool,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Terminal)]
    pub log_format: LogFormat,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// How to print the report
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = ResultCli::try_parse_from(["hot-body-summariser", "result.log"]).unwrap();

        assert_eq!(PathBuf::from("result.log"), cli.result_log);
        assert!(!cli.brief);
        assert_eq!(LogLevel::Info, cli.log_level);
        assert_eq!(LogFormat::Terminal, cli.log_format);
        assert_eq!(None, cli.log);
        assert_eq!(OutputFormat::Table, cli.output);
    }

    #[test]
    fn all_flags() {
        let cli = ResultCli::try_parse_from([
            "hot-body-summariser",
            "--brief",
            "--log-level",
            "crit",
            "--log-format",
            "json",
            "--log",
            "summariser.log",
            "--output",
            "json",
            "result.log",
        ])
        .unwrap();

        assert!(cli.brief);
        assert_eq!(LogLevel::Crit, cli.log_level);
        assert_eq!(LogFormat::Json, cli.log_format);
        assert_eq!(Some(PathBuf::from("summariser.log")), cli.log);
        assert_eq!(OutputFormat::Json, cli.output);
    }

    #[test]
    fn result_log_is_required() {
        assert!(ResultCli::try_parse_from(["hot-body-summariser"]).is_err());
    }
}
