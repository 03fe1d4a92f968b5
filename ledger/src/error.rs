use thiserror::Error;

/// Every way a ledger operation can fail. All variants are local validation
/// failures detected before any mutation, so a failed operation leaves the
/// prior state untouched and the session valid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("please fill in all fields")]
    InvalidInput,

    #[error("an account with this email already exists")]
    DuplicateEmail,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("no account is signed in")]
    NotAuthenticated,

    #[error("unknown coin '{0}'")]
    UnknownCoin(String),

    #[error("please enter a valid amount")]
    InvalidAmount,

    #[error("you don't have enough available balance")]
    InsufficientAvailable,

    #[error("you don't have that much staked")]
    InsufficientStaked,
}
