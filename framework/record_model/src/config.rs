use crate::Amount;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters of a load test run.
///
/// Written once, as the `config` object of the first data line of the result log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    /// How long the load test was configured to run for
    #[serde(with = "crate::nanos")]
    pub timeout: Duration,
    /// The number of concurrent requests
    #[serde(rename = "t")]
    pub concurrency: u64,
    /// The account that funded the test accounts
    pub init_account: String,
    /// Timeout of a single request
    #[serde(with = "crate::nanos")]
    pub request_timeout: Duration,
    /// How long the tester waited for a transaction to be confirmed
    #[serde(with = "crate::nanos")]
    pub confirm_duration: Duration,
    /// The number of operations sent in each request
    pub operations: u64,
    /// Snapshot of the target node, taken before the run
    pub node: NodeInfo,
}

/// What the target node reported about itself before the run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeInfo {
    pub node: NodeState,
    pub policy: NetworkPolicy,
    pub block: BlockState,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeState {
    pub endpoint: String,
    pub address: String,
    pub state: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkPolicy {
    pub network_id: String,
    pub initial_balance: Amount,
    #[serde(with = "crate::nanos")]
    pub block_time: Duration,
    pub base_reserve: Amount,
    pub base_fee: Amount,
}

/// The latest block when the snapshot was taken.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct BlockState {
    pub height: u64,
    pub hash: String,
    pub total_txs: u64,
    pub total_ops: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CONFIG: &str = r#"{
        "timeout": 60000000000,
        "t": 100,
        "initAccount": "GDIRF4UWPACXPPI4GW7CMTACTCNDIKJEHZK44RITZB4TD3YUM6CCVNGJ",
        "requestTimeout": 30000000000,
        "confirmDuration": 60000000000,
        "operations": 2,
        "node": {
            "node": {
                "endpoint": "https://localhost:12345",
                "address": "GBVXLTHEUQTBHDXCAGBTSXZD2BX6VQEXGVZB5VWHT4YYMKVNFAWPNYAL",
                "state": "CONSENSUS"
            },
            "policy": {
                "network-id": "sebak-test-network",
                "initial-balance": "10000000000000000000",
                "block-time": 5000000000,
                "base-reserve": "1000000",
                "base-fee": 10000
            },
            "block": {
                "height": 42,
                "hash": "2kFnjZcgAnNbuNvTybQyMpEmmkRZ3U4gLy3Ncv3YRLw7",
                "total-txs": 43,
                "total-ops": 44
            }
        }
    }"#;

    #[test]
    fn decode_run_config() {
        let config: RunConfig = serde_json::from_str(CONFIG).unwrap();

        assert_eq!(Duration::from_secs(60), config.timeout);
        assert_eq!(100, config.concurrency);
        assert_eq!(2, config.operations);
        assert_eq!(Duration::from_secs(5), config.node.policy.block_time);
        assert_eq!(Amount(10_000), config.node.policy.base_fee);
        assert_eq!(Amount(1_000_000), config.node.policy.base_reserve);
        assert_eq!(44, config.node.block.total_ops);
        assert_eq!("CONSENSUS", config.node.node.state);
    }

    #[test]
    fn missing_node_snapshot_is_rejected() {
        let mut value: serde_json::Value = serde_json::from_str(CONFIG).unwrap();
        value.as_object_mut().unwrap().remove("node");

        assert!(serde_json::from_value::<RunConfig>(value).is_err());
    }
}
