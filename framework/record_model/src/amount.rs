use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An amount of the network's currency, in its smallest unit.
///
/// The node writes large amounts as decimal strings, so both `"10000"` and `10000` are accepted.
/// Amounts are always written back as strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "AmountRepr", into = "String")]
pub struct Amount(pub u64);

#[derive(Debug, thiserror::Error)]
pub enum AmountError {
    #[error("invalid amount {value:?}: {source}")]
    Invalid {
        value: String,
        source: std::num::ParseIntError,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Number(u64),
    Text(String),
}

impl TryFrom<AmountRepr> for Amount {
    type Error = AmountError;

    fn try_from(value: AmountRepr) -> Result<Self, Self::Error> {
        match value {
            AmountRepr::Number(n) => Ok(Amount(n)),
            AmountRepr::Text(s) => s.parse(),
        }
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Amount)
            .map_err(|source| AmountError::Invalid {
                value: s.to_string(),
                source,
            })
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.0.to_string()
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
