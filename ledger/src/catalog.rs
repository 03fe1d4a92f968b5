use rust_decimal::Decimal;
use serde::Serialize;

use super::types::CoinId;

/// Static reference data for one coin. Loaded once at startup and never
/// mutated; there is no live price feed in this simulation.
#[derive(Debug, Clone, Serialize)]
pub struct Coin {
    pub id: CoinId,
    pub name: &'static str,
    pub symbol: &'static str,
    pub unit_price: Decimal,
}

pub struct CoinCatalog {
    /// Indexed by `CoinId` discriminant, in `CoinId::ALL` order.
    coins: [Coin; 5],
}

impl CoinCatalog {
    pub fn new() -> Self {
        CoinCatalog {
            coins: [
                Coin {
                    id: CoinId::Btc,
                    name: "Bitcoin",
                    symbol: "BTC",
                    unit_price: Decimal::new(50_000_00, 2),
                },
                Coin {
                    id: CoinId::Eth,
                    name: "Ethereum",
                    symbol: "ETH",
                    unit_price: Decimal::new(3_000_00, 2),
                },
                Coin {
                    id: CoinId::Sol,
                    name: "Solana",
                    symbol: "SOL",
                    unit_price: Decimal::new(100_00, 2),
                },
                Coin {
                    id: CoinId::Usdt,
                    name: "Tether",
                    symbol: "USDT",
                    unit_price: Decimal::new(1_00, 2),
                },
                Coin {
                    id: CoinId::Usdc,
                    name: "USD Coin",
                    symbol: "USDC",
                    unit_price: Decimal::new(1_00, 2),
                },
            ],
        }
    }

    pub fn get(&self, id: CoinId) -> &Coin {
        &self.coins[id as usize]
    }

    pub fn unit_price(&self, id: CoinId) -> Decimal {
        self.get(id).unit_price
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }
}

impl Default for CoinCatalog {
    fn default() -> Self {
        Self::new()
    }
}
