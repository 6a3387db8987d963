//! Typed records of a hot body load test result log.
//!
//! Every line of a result log is a JSON object tagged by its `type`. This crate holds the typed
//! form of the data lines (`config`, `create-accounts`, `payment` and `sebak-error`) and the
//! shared behaviour of the timed records. Reading the log and classifying its lines lives in the
//! summariser.

mod amount;
mod config;
pub mod nanos;
mod record;

pub use amount::{Amount, AmountError};
pub use config::{BlockState, NetworkPolicy, NodeInfo, NodeState, RunConfig};
pub use record::{
    CreateAccounts, Payment, Record, RecordKind, SebakError, TimedRecord, UnknownRecordKind,
};
