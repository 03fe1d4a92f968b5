//! Core ledger for the simulated staking platform: coin catalog, per-account
//! portfolios, and the deposit/stake/unstake state transitions. Purely
//! synchronous and in-memory; the HTTP boundary lives in the `http-server`
//! crate.

pub mod accounts;
pub mod catalog;
pub mod error;
pub mod platform;
pub mod portfolio;
pub mod session;
pub mod types;

pub use accounts::{Account, AccountStore};
pub use catalog::{Coin, CoinCatalog};
pub use error::LedgerError;
pub use platform::Platform;
pub use portfolio::{BalanceRecord, Portfolio, PortfolioView};
pub use session::Session;
pub use types::{CoinId, DepositRecord};
