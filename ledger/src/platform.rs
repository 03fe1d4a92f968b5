use rust_decimal::Decimal;

use super::accounts::{Account, AccountStore};
use super::catalog::CoinCatalog;
use super::error::LedgerError;
use super::portfolio::{BalanceRecord, PortfolioView};
use super::session::Session;
use super::types::{CoinId, DepositRecord, current_timestamp};

/// Application context owning the coin catalog, the account store, the
/// session and the deposit audit log. Every operation the boundary can
/// invoke lives here; there is no other way to mutate a portfolio.
///
/// All mutation is serialized by `&mut self`; the http-server crate wraps
/// the single instance in a mutex.
pub struct Platform {
    catalog: CoinCatalog,
    accounts: AccountStore,
    session: Session,
    deposits: Vec<DepositRecord>,
}

impl Platform {
    pub fn new() -> Self {
        Self::with_catalog(CoinCatalog::new())
    }

    pub fn with_catalog(catalog: CoinCatalog) -> Self {
        Platform {
            catalog,
            accounts: AccountStore::new(),
            session: Session::new(),
            deposits: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &CoinCatalog {
        &self.catalog
    }

    /// Creates an account and signs it in. A failed registration leaves
    /// both the store and the session untouched.
    pub fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<&Account, LedgerError> {
        let account = self.accounts.register(username, email, password)?;
        self.session.establish(account.id);
        Ok(account)
    }

    /// Signs in the account matching the credentials, replacing any
    /// previously active session.
    pub fn authenticate(&mut self, email: &str, password: &str) -> Result<&Account, LedgerError> {
        let account = self.accounts.authenticate(email, password)?;
        self.session.establish(account.id);
        Ok(account)
    }

    pub fn logout(&mut self) {
        self.session.clear();
    }

    pub fn current_account(&self) -> Option<&Account> {
        self.session.current().and_then(|id| self.accounts.get(id))
    }

    fn active_account_id(&self) -> Result<u64, LedgerError> {
        self.session.current().ok_or(LedgerError::NotAuthenticated)
    }

    /// Credits a confirmed deposit to the active account and appends the
    /// audit record carrying the deposit address it was announced under.
    pub fn deposit(
        &mut self,
        coin: CoinId,
        amount: Decimal,
        address: &str,
    ) -> Result<DepositRecord, LedgerError> {
        let account_id = self.active_account_id()?;
        let account = self
            .accounts
            .get_mut(account_id)
            .ok_or(LedgerError::NotAuthenticated)?;

        account.portfolio.deposit(coin, amount)?;

        let record = DepositRecord {
            account_id,
            coin,
            amount,
            address: address.to_string(),
            timestamp: current_timestamp(),
        };
        self.deposits.push(record.clone());
        Ok(record)
    }

    /// Moves funds of the active account from available to staked.
    pub fn stake(&mut self, coin: CoinId, amount: Decimal) -> Result<BalanceRecord, LedgerError> {
        let account_id = self.active_account_id()?;
        let account = self
            .accounts
            .get_mut(account_id)
            .ok_or(LedgerError::NotAuthenticated)?;
        account.portfolio.stake(coin, amount)
    }

    /// Moves funds of the active account from staked back to available.
    pub fn unstake(&mut self, coin: CoinId, amount: Decimal) -> Result<BalanceRecord, LedgerError> {
        let account_id = self.active_account_id()?;
        let account = self
            .accounts
            .get_mut(account_id)
            .ok_or(LedgerError::NotAuthenticated)?;
        account.portfolio.unstake(coin, amount)
    }

    /// Rendering snapshot for the active account.
    pub fn current_portfolio_view(&self) -> Result<PortfolioView, LedgerError> {
        let account = self
            .current_account()
            .ok_or(LedgerError::NotAuthenticated)?;
        Ok(account.portfolio.snapshot(&self.catalog))
    }

    /// Rendering snapshot for any account, active or not.
    pub fn portfolio_view(&self, account_id: u64) -> Option<PortfolioView> {
        self.accounts
            .get(account_id)
            .map(|account| account.portfolio.snapshot(&self.catalog))
    }

    /// Audit trail entries for one account, oldest first.
    pub fn deposit_history(&self, account_id: u64) -> Vec<&DepositRecord> {
        self.deposits
            .iter()
            .filter(|record| record.account_id == account_id)
            .collect()
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::new()
    }
}
