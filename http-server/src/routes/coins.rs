use axum::{Json, extract::State};
use ledger::types::CoinId;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct CoinListing {
    pub id: CoinId,
    pub symbol: String,
    pub name: String,
    pub unit_price: Decimal,
}

// Coin catalog endpoint - static reference data for rendering the asset list
pub async fn get_coins(State(state): State<AppState>) -> Json<Vec<CoinListing>> {
    let platform = state.platform.lock().unwrap();

    let coins = platform
        .catalog()
        .coins()
        .iter()
        .map(|coin| CoinListing {
            id: coin.id,
            symbol: coin.symbol.to_string(),
            name: coin.name.to_string(),
            unit_price: coin.unit_price,
        })
        .collect();

    Json(coins)
}
