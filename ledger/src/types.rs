use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// Closed set of coins the platform knows about. Coin ids arriving as
/// strings (route payloads, form input) are validated into this type at the
/// boundary via `FromStr`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinId {
    Btc,
    Eth,
    Sol,
    Usdt,
    Usdc,
}

impl CoinId {
    /// Every known coin, in catalog order.
    pub const ALL: [CoinId; 5] = [
        CoinId::Btc,
        CoinId::Eth,
        CoinId::Sol,
        CoinId::Usdt,
        CoinId::Usdc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CoinId::Btc => "btc",
            CoinId::Eth => "eth",
            CoinId::Sol => "sol",
            CoinId::Usdt => "usdt",
            CoinId::Usdc => "usdc",
        }
    }
}

impl fmt::Display for CoinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoinId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "btc" => Ok(CoinId::Btc),
            "eth" => Ok(CoinId::Eth),
            "sol" => Ok(CoinId::Sol),
            "usdt" => Ok(CoinId::Usdt),
            "usdc" => Ok(CoinId::Usdc),
            other => Err(LedgerError::UnknownCoin(other.to_string())),
        }
    }
}

/// Append-only audit entry for a confirmed deposit. Never mutated or
/// deleted once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositRecord {
    pub account_id: u64,
    pub coin: CoinId,
    pub amount: Decimal,
    pub address: String,
    pub timestamp: u64,
}

#[inline(always)]
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
