use crate::{Amount, RunConfig};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;
use std::time::Duration;

/// The `type` tag of a data line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RecordKind {
    #[display("config")]
    Config,
    #[display("create-accounts")]
    CreateAccounts,
    #[display("payment")]
    Payment,
    #[display("sebak-error")]
    SebakError,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown record type: {0}")]
pub struct UnknownRecordKind(pub String);

impl FromStr for RecordKind {
    type Err = UnknownRecordKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "config" => Ok(RecordKind::Config),
            "create-accounts" => Ok(RecordKind::CreateAccounts),
            "payment" => Ok(RecordKind::Payment),
            "sebak-error" => Ok(RecordKind::SebakError),
            other => Err(UnknownRecordKind(other.to_string())),
        }
    }
}

/// What every timed record can tell about the operation it describes.
pub trait TimedRecord {
    /// When the record was written
    fn time(&self) -> DateTime<Utc>;

    /// How long the operation took
    fn elapsed(&self) -> Duration;

    /// Whether the operation failed
    fn has_error(&self) -> bool;

    /// The tester's classification of the failure, if it gave one
    fn error_type(&self) -> Option<&str>;
}

/// Creation of the accounts used by the run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccounts {
    pub time: DateTime<Utc>,
    #[serde(with = "crate::nanos")]
    pub elapsed: Duration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default)]
    pub accounts: Vec<String>,
}

/// A single payment request. These are what the load test measures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub time: DateTime<Utc>,
    #[serde(with = "crate::nanos")]
    pub elapsed: Duration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

/// An error response returned by the node, kept as the raw document the node sent.
///
/// The document usually wraps the HTTP response of the node, with the response body as a JSON
/// encoded string under `data.body`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SebakError {
    pub time: DateTime<Utc>,
    #[serde(default, with = "crate::nanos")]
    pub elapsed: Duration,
    pub error: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

impl SebakError {
    pub fn raw_error(&self) -> &Map<String, Value> {
        &self.error
    }
}

macro_rules! impl_timed_record {
    ($ty:ty) => {
        impl TimedRecord for $ty {
            fn time(&self) -> DateTime<Utc> {
                self.time
            }

            fn elapsed(&self) -> Duration {
                self.elapsed
            }

            fn has_error(&self) -> bool {
                self.error.as_ref().is_some_and(|e| !e.is_null())
            }

            fn error_type(&self) -> Option<&str> {
                self.error_type.as_deref()
            }
        }
    };
}

impl_timed_record!(CreateAccounts);
impl_timed_record!(Payment);

impl TimedRecord for SebakError {
    fn time(&self) -> DateTime<Utc> {
        self.time
    }

    fn elapsed(&self) -> Duration {
        self.elapsed
    }

    fn has_error(&self) -> bool {
        true
    }

    fn error_type(&self) -> Option<&str> {
        self.error_type.as_deref()
    }
}

/// A decoded data line of the result log.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Config(RunConfig),
    CreateAccounts(CreateAccounts),
    Payment(Payment),
    SebakError(SebakError),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Config(_) => RecordKind::Config,
            Record::CreateAccounts(_) => RecordKind::CreateAccounts,
            Record::Payment(_) => RecordKind::Payment,
            Record::SebakError(_) => RecordKind::SebakError,
        }
    }

    /// The timed view of this record. `None` for the run configuration.
    pub fn as_timed(&self) -> Option<&dyn TimedRecord> {
        match self {
            Record::Config(_) => None,
            Record::CreateAccounts(r) => Some(r),
            Record::Payment(r) => Some(r),
            Record::SebakError(r) => Some(r),
        }
    }

    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.as_timed().map(|r| r.time())
    }

    /// Zero for records that are not timed.
    pub fn elapsed(&self) -> Duration {
        self.as_timed().map(|r| r.elapsed()).unwrap_or_default()
    }

    pub fn has_error(&self) -> bool {
        self.as_timed().is_some_and(|r| r.has_error())
    }

    pub fn error_type(&self) -> Option<&str> {
        self.as_timed().and_then(|r| r.error_type())
    }
}
