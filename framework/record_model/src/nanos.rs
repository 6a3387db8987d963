//! (De)serialize a [Duration] as an integer number of nanoseconds.
//!
//! This is how the load tester writes every duration, both the `elapsed` of a record and the
//! timeouts of the run configuration. Use with `#[serde(with = "hot_body_record_model::nanos")]`.

use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;

pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let nanos = u64::try_from(duration.as_nanos()).map_err(serde::ser::Error::custom)?;
    serializer.serialize_u64(nanos)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_nanos)
}
