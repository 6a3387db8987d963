//! Result log lines for unit tests.

use hot_body_record_model::RunConfig;
use serde_json::{json, Value};

pub(crate) const STARTED_AT: &str = "2019-01-01T00:00:00Z";

pub(crate) fn config_value(operations: u64) -> Value {
    json!({
        "timeout": 300_000_000_000u64,
        "t": 100,
        "initAccount": "GDIRF4UWPACXPPI4GW7CMTACTCNDIKJEHZK44RITZB4TD3YUM6CCVNGJ",
        "requestTimeout": 30_000_000_000u64,
        "confirmDuration": 60_000_000_000u64,
        "operations": operations,
        "node": {
            "node": {
                "endpoint": "https://127.0.0.1:12345",
                "address": "GBVXLTHEUQTBHDXCAGBTSXZD2BX6VQEXGVZB5VWHT4YYMKVNFAWPNYAL",
                "state": "CONSENSUS"
            },
            "policy": {
                "network-id": "sebak-test-network",
                "initial-balance": "10000000000000000000",
                "block-time": 5_000_000_000u64,
                "base-reserve": "1000000",
                "base-fee": "10000"
            },
            "block": {
                "height": 42,
                "hash": "2kFnjZcgAnNbuNvTybQyMpEmmkRZ3U4gLy3Ncv3YRLw7",
                "total-txs": 43,
                "total-ops": 44
            }
        }
    })
}

pub(crate) fn run_config(operations: u64) -> RunConfig {
    serde_json::from_value(config_value(operations)).expect("valid test config")
}

pub(crate) fn config_line(operations: u64) -> String {
    json!({"type": "config", "config": config_value(operations)}).to_string()
}

pub(crate) fn control_line(kind: &str, time: &str) -> String {
    json!({"type": kind, "time": time}).to_string()
}

pub(crate) fn create_accounts_line() -> String {
    json!({
        "type": "create-accounts",
        "time": "2019-01-01T00:00:01Z",
        "elapsed": 1_000_000_000u64,
        "accounts": ["GA", "GB"]
    })
    .to_string()
}

/// A payment at a time derived from its elapsed seconds.
pub(crate) fn payment_line(elapsed_secs: u64, error_type: Option<&str>) -> String {
    let time = (chrono::DateTime::parse_from_rfc3339(STARTED_AT).expect("valid time")
        + chrono::Duration::seconds(elapsed_secs as i64))
    .to_rfc3339();
    payment_line_at(&time, elapsed_secs, error_type)
}

pub(crate) fn payment_line_at(time: &str, elapsed_secs: u64, error_type: Option<&str>) -> String {
    let mut line = json!({
        "type": "payment",
        "time": time,
        "elapsed": elapsed_secs * 1_000_000_000,
        "from": "GA",
        "to": "GB",
        "amount": "100"
    });
    if let Some(error_type) = error_type {
        line["error"] = json!({"message": "payment failed"});
        line["errorType"] = json!(error_type);
    }
    line.to_string()
}

pub(crate) fn sebak_error_line(error: Value) -> String {
    json!({
        "type": "sebak-error",
        "time": "2019-01-01T00:00:02Z",
        "error": error
    })
    .to_string()
}
