use axum::{Json, extract::State, http::StatusCode};
use ledger::types::{CoinId, DepositRecord};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AppState, middleware::AuthUser, routes::error_status};

// Deposit address request
#[derive(Deserialize)]
pub struct DepositAddressRequest {
    pub coin: String, // e.g. "btc", "eth"
    pub amount: Decimal,
}

// Deposit address response
#[derive(Serialize)]
pub struct DepositAddressResponse {
    pub success: bool,
    pub message: String,
    pub address: Option<String>,
}

// Deposit confirmation request
#[derive(Deserialize)]
pub struct DepositRequest {
    pub coin: String,
    pub amount: Decimal,
    pub address: String,
}

// Deposit confirmation response
#[derive(Serialize)]
pub struct DepositResponse {
    pub success: bool,
    pub message: String,
    pub deposit: Option<DepositRecordResponse>,
}

// Deposit history response
#[derive(Serialize)]
pub struct DepositHistoryResponse {
    pub success: bool,
    pub deposits: Vec<DepositRecordResponse>,
}

// Audit record as exposed over the wire
#[derive(Serialize)]
pub struct DepositRecordResponse {
    pub coin: CoinId,
    pub amount: Decimal,
    pub address: String,
    pub timestamp: u64,
}

impl DepositRecordResponse {
    pub fn from_record(record: &DepositRecord) -> Self {
        DepositRecordResponse {
            coin: record.coin,
            amount: record.amount,
            address: record.address.clone(),
            timestamp: record.timestamp,
        }
    }
}

// Fabricate a deposit address (in a real deployment this would come from a
// custody backend)
fn fabricated_address() -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("3FZbgi29cpjq2GjdwV8eyHJJ{:06}", suffix)
}

// Generate deposit address endpoint
pub async fn generate_deposit_address(
    Json(payload): Json<DepositAddressRequest>,
) -> (StatusCode, Json<DepositAddressResponse>) {
    // Validate the coin id at the boundary
    if let Err(error) = payload.coin.parse::<CoinId>() {
        return (
            error_status(&error),
            Json(DepositAddressResponse {
                success: false,
                message: error.to_string(),
                address: None,
            }),
        );
    }

    if payload.amount <= Decimal::ZERO {
        return (
            StatusCode::BAD_REQUEST,
            Json(DepositAddressResponse {
                success: false,
                message: "Please select a coin and enter a valid amount".to_string(),
                address: None,
            }),
        );
    }

    let response = DepositAddressResponse {
        success: true,
        message: "Deposit address generated".to_string(),
        address: Some(fabricated_address()),
    };
    (StatusCode::OK, Json(response))
}

// Confirm deposit endpoint (protected route)
pub async fn confirm_deposit(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<DepositRequest>,
) -> (StatusCode, Json<DepositResponse>) {
    let coin = match payload.coin.parse::<CoinId>() {
        Ok(coin) => coin,
        Err(error) => {
            return (
                error_status(&error),
                Json(DepositResponse {
                    success: false,
                    message: error.to_string(),
                    deposit: None,
                }),
            );
        }
    };

    let mut platform = state.platform.lock().unwrap();
    match platform.deposit(coin, payload.amount, &payload.address) {
        Ok(record) => {
            let symbol = platform.catalog().get(coin).symbol;
            tracing::info!(
                "Account {} deposited {} {}",
                user.user_id,
                record.amount,
                symbol
            );
            let response = DepositResponse {
                success: true,
                message: format!("Success! You've deposited {} {}", record.amount, symbol),
                deposit: Some(DepositRecordResponse::from_record(&record)),
            };
            (StatusCode::CREATED, Json(response))
        }
        Err(error) => {
            let response = DepositResponse {
                success: false,
                message: error.to_string(),
                deposit: None,
            };
            (error_status(&error), Json(response))
        }
    }
}

// Deposit history endpoint (protected route)
pub async fn get_deposit_history(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> (StatusCode, Json<DepositHistoryResponse>) {
    let platform = state.platform.lock().unwrap();

    let deposits = platform
        .deposit_history(user.user_id)
        .into_iter()
        .map(DepositRecordResponse::from_record)
        .collect();

    let response = DepositHistoryResponse {
        success: true,
        deposits,
    };
    (StatusCode::OK, Json(response))
}
