//! Classification of a single result log line.
//!
//! Decoding happens in two passes. The line is first read as a generic JSON object, only to find
//! its `type` tag. The object is then decoded strictly into the record type named by the tag, so
//! a line of the wrong shape is rejected rather than coerced.

use chrono::{DateTime, Utc};
use hot_body_record_model::{Record, RecordKind};
use log::warn;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Lines that mark the boundaries of the run rather than describe an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ControlKind {
    #[display("started")]
    Started,
    #[display("ended")]
    Ended,
}

/// The result of decoding one line.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    /// A run boundary. The time is `None` when the line's timestamp could not be read.
    Control {
        kind: ControlKind,
        time: Option<DateTime<Utc>>,
    },
    Data(Record),
    /// A blank line
    Ignored,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed line, {reason}")]
    MalformedLine {
        reason: &'static str,
        #[source]
        source: Option<serde_json::Error>,
    },
    #[error("found invalid format, no string `type` field")]
    MissingType,
    #[error("unknown type found: {0}")]
    UnknownType(String),
    #[error("invalid `config` object")]
    ConfigDecode(#[source] serde_json::Error),
    #[error("invalid `{kind}` record")]
    RecordDecode {
        kind: RecordKind,
        #[source]
        source: serde_json::Error,
    },
}

/// Decode one line of the result log.
pub fn decode(line: &str) -> Result<Classified, DecodeError> {
    if line.trim().is_empty() {
        return Ok(Classified::Ignored);
    }

    let value: Value =
        serde_json::from_str(line).map_err(|source| DecodeError::MalformedLine {
            reason: "not valid JSON",
            source: Some(source),
        })?;
    let Value::Object(mut object) = value else {
        return Err(DecodeError::MalformedLine {
            reason: "not a JSON object",
            source: None,
        });
    };

    let tag = match object.get("type") {
        Some(Value::String(tag)) => tag.clone(),
        _ => return Err(DecodeError::MissingType),
    };

    match tag.as_str() {
        "started" => Ok(control(ControlKind::Started, &object)),
        "ended" => Ok(control(ControlKind::Ended, &object)),
        other => {
            let kind = other
                .parse::<RecordKind>()
                .map_err(|e| DecodeError::UnknownType(e.0))?;
            let record = match kind {
                RecordKind::Config => {
                    let config = object.remove("config").unwrap_or(Value::Null);
                    Record::Config(
                        serde_json::from_value(config).map_err(DecodeError::ConfigDecode)?,
                    )
                }
                RecordKind::CreateAccounts => Record::CreateAccounts(strict(kind, object)?),
                RecordKind::Payment => Record::Payment(strict(kind, object)?),
                RecordKind::SebakError => Record::SebakError(strict(kind, object)?),
            };
            Ok(Classified::Data(record))
        }
    }
}

/// Parse an ISO-8601 timestamp as written by the load tester.
pub fn parse_iso8601(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|time| time.with_timezone(&Utc))
}

fn strict<T>(kind: RecordKind, object: Map<String, Value>) -> Result<T, DecodeError>
where
    T: DeserializeOwned,
{
    serde_json::from_value(Value::Object(object))
        .map_err(|source| DecodeError::RecordDecode { kind, source })
}

// Boundary timestamps are best effort, an unreadable one is logged and left unset.
fn control(kind: ControlKind, object: &Map<String, Value>) -> Classified {
    let time = match object.get("time").and_then(Value::as_str) {
        Some(raw) => match parse_iso8601(raw) {
            Ok(time) => Some(time),
            Err(e) => {
                warn!("Ignoring unreadable `{kind}` time {raw:?}: {e}");
                None
            }
        },
        None => {
            warn!("Ignoring `{kind}` line without a time");
            None
        }
    };

    Classified::Control { kind, time }
}
