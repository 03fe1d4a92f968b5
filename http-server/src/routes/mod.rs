use axum::http::StatusCode;
use ledger::error::LedgerError;

pub mod coins;
pub mod deposits;
pub mod portfolio;
pub mod staking;
pub mod users;

// Map a ledger error to the HTTP status it should surface with
pub(crate) fn error_status(error: &LedgerError) -> StatusCode {
    match error {
        LedgerError::InvalidCredentials | LedgerError::NotAuthenticated => StatusCode::UNAUTHORIZED,
        _ => StatusCode::BAD_REQUEST,
    }
}
