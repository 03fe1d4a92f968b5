use axum::{Json, extract::State, http::StatusCode};
use ledger::portfolio::PortfolioView;
use serde::Serialize;

use crate::{AppState, middleware::AuthUser, routes::error_status};

// Portfolio response - the full rendering snapshot plus summary totals
#[derive(Serialize)]
pub struct PortfolioResponse {
    pub success: bool,
    pub message: String,
    pub portfolio: Option<PortfolioView>,
}

// Get portfolio endpoint (protected route)
pub async fn get_portfolio(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
) -> (StatusCode, Json<PortfolioResponse>) {
    let platform = state.platform.lock().unwrap();

    match platform.current_portfolio_view() {
        Ok(view) => {
            let response = PortfolioResponse {
                success: true,
                message: "Portfolio retrieved successfully".to_string(),
                portfolio: Some(view),
            };
            (StatusCode::OK, Json(response))
        }
        Err(error) => {
            let response = PortfolioResponse {
                success: false,
                message: error.to_string(),
                portfolio: None,
            };
            (error_status(&error), Json(response))
        }
    }
}
