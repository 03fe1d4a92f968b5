use axum::{Json, extract::State, http::StatusCode};
use ledger::portfolio::BalanceRecord;
use ledger::types::CoinId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AppState, middleware::AuthUser, routes::error_status};

// Stake/unstake request
#[derive(Deserialize)]
pub struct StakeRequest {
    pub coin: String, // e.g. "btc", "eth"
    pub amount: Decimal,
}

// Stake/unstake response carrying the updated balance for the coin
#[derive(Serialize)]
pub struct StakeResponse {
    pub success: bool,
    pub message: String,
    pub balance: Option<BalanceResponse>,
}

#[derive(Serialize)]
pub struct BalanceResponse {
    pub coin: CoinId,
    pub total: Decimal,
    pub staked: Decimal,
    pub available: Decimal,
}

impl BalanceResponse {
    pub fn from_record_with_coin(record: &BalanceRecord, coin: CoinId) -> Self {
        BalanceResponse {
            coin,
            total: record.total,
            staked: record.staked,
            available: record.available,
        }
    }
}

fn parse_coin(coin: &str) -> Result<CoinId, (StatusCode, Json<StakeResponse>)> {
    coin.parse::<CoinId>().map_err(|error| {
        (
            error_status(&error),
            Json(StakeResponse {
                success: false,
                message: error.to_string(),
                balance: None,
            }),
        )
    })
}

// Stake endpoint (protected route)
pub async fn stake(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<StakeRequest>,
) -> (StatusCode, Json<StakeResponse>) {
    let coin = match parse_coin(&payload.coin) {
        Ok(coin) => coin,
        Err(rejection) => return rejection,
    };

    let mut platform = state.platform.lock().unwrap();
    match platform.stake(coin, payload.amount) {
        Ok(record) => {
            let symbol = platform.catalog().get(coin).symbol;
            tracing::info!("Account {} staked {} {}", user.user_id, payload.amount, symbol);
            let response = StakeResponse {
                success: true,
                message: format!("Successfully staked {} {}", payload.amount, symbol),
                balance: Some(BalanceResponse::from_record_with_coin(&record, coin)),
            };
            (StatusCode::OK, Json(response))
        }
        Err(error) => {
            let response = StakeResponse {
                success: false,
                message: error.to_string(),
                balance: None,
            };
            (error_status(&error), Json(response))
        }
    }
}

// Unstake endpoint (protected route)
pub async fn unstake(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<StakeRequest>,
) -> (StatusCode, Json<StakeResponse>) {
    let coin = match parse_coin(&payload.coin) {
        Ok(coin) => coin,
        Err(rejection) => return rejection,
    };

    let mut platform = state.platform.lock().unwrap();
    match platform.unstake(coin, payload.amount) {
        Ok(record) => {
            let symbol = platform.catalog().get(coin).symbol;
            tracing::info!(
                "Account {} unstaked {} {}",
                user.user_id,
                payload.amount,
                symbol
            );
            let response = StakeResponse {
                success: true,
                message: format!("Successfully unstaked {} {}", payload.amount, symbol),
                balance: Some(BalanceResponse::from_record_with_coin(&record, coin)),
            };
            (StatusCode::OK, Json(response))
        }
        Err(error) => {
            let response = StakeResponse {
                success: false,
                message: error.to_string(),
                balance: None,
            };
            (error_status(&error), Json(response))
        }
    }
}
