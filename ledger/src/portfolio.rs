use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catalog::CoinCatalog;
use super::error::LedgerError;
use super::types::CoinId;

/// Per-coin balance. Invariant: `total == staked + available`, all three
/// fields >= 0. Every mutation goes through [`Portfolio`] which validates
/// before writing, so a rejected operation never leaves a partial update.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRecord {
    pub total: Decimal,
    pub staked: Decimal,
    pub available: Decimal,
}

impl BalanceRecord {
    pub fn zero() -> Self {
        BalanceRecord {
            total: Decimal::ZERO,
            staked: Decimal::ZERO,
            available: Decimal::ZERO,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.total == self.staked + self.available
            && self.total >= Decimal::ZERO
            && self.staked >= Decimal::ZERO
            && self.available >= Decimal::ZERO
    }
}

/// One row of the rendered portfolio: a coin's balances plus their USD
/// values at the catalog price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoinBalanceView {
    pub coin: CoinId,
    pub name: &'static str,
    pub symbol: &'static str,
    pub unit_price: Decimal,
    pub total: Decimal,
    pub staked: Decimal,
    pub available: Decimal,
    pub value_usd: Decimal,
    pub staked_value_usd: Decimal,
}

/// Snapshot of a portfolio for rendering: per-coin rows (all-zero rows
/// omitted) and the three summary totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioView {
    pub assets: Vec<CoinBalanceView>,
    pub total_value: Decimal,
    pub staked_value: Decimal,
    pub available_value: Decimal,
}

/// A user's complete set of per-coin balances, one entry per catalog coin.
/// Owned exclusively by one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    balances: BTreeMap<CoinId, BalanceRecord>,
}

fn validate_amount(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount);
    }
    Ok(())
}

impl Portfolio {
    /// Creates a portfolio with a zeroed balance for every known coin.
    pub fn new() -> Self {
        let mut balances = BTreeMap::new();
        for coin in CoinId::ALL {
            balances.insert(coin, BalanceRecord::zero());
        }
        Portfolio { balances }
    }

    pub fn balance(&self, coin: CoinId) -> BalanceRecord {
        self.balances
            .get(&coin)
            .copied()
            .unwrap_or_else(BalanceRecord::zero)
    }

    fn balance_mut(&mut self, coin: CoinId) -> &mut BalanceRecord {
        self.balances.entry(coin).or_insert_with(BalanceRecord::zero)
    }

    /// Credits a deposit: `total += amount; available += amount`. Not
    /// idempotent; depositing the same amount twice doubles the balance.
    pub fn deposit(&mut self, coin: CoinId, amount: Decimal) -> Result<BalanceRecord, LedgerError> {
        validate_amount(amount)?;

        let record = self.balance_mut(coin);
        record.total += amount;
        record.available += amount;
        Ok(*record)
    }

    /// Moves funds from available to staked. `total` is unchanged. The
    /// boundary is inclusive: staking exactly the available balance
    /// succeeds.
    pub fn stake(&mut self, coin: CoinId, amount: Decimal) -> Result<BalanceRecord, LedgerError> {
        validate_amount(amount)?;

        let record = self.balance_mut(coin);
        if amount > record.available {
            return Err(LedgerError::InsufficientAvailable);
        }
        record.available -= amount;
        record.staked += amount;
        Ok(*record)
    }

    /// Moves funds from staked back to available; the inverse of `stake`.
    pub fn unstake(&mut self, coin: CoinId, amount: Decimal) -> Result<BalanceRecord, LedgerError> {
        validate_amount(amount)?;

        let record = self.balance_mut(coin);
        if amount > record.staked {
            return Err(LedgerError::InsufficientStaked);
        }
        record.staked -= amount;
        record.available += amount;
        Ok(*record)
    }

    /// USD value of all staked funds, recomputed on every call.
    pub fn staked_value(&self, catalog: &CoinCatalog) -> Decimal {
        self.balances
            .iter()
            .map(|(coin, record)| record.staked * catalog.unit_price(*coin))
            .sum()
    }

    /// USD value of all available funds, recomputed on every call.
    pub fn available_value(&self, catalog: &CoinCatalog) -> Decimal {
        self.balances
            .iter()
            .map(|(coin, record)| record.available * catalog.unit_price(*coin))
            .sum()
    }

    pub fn total_value(&self, catalog: &CoinCatalog) -> Decimal {
        self.staked_value(catalog) + self.available_value(catalog)
    }

    /// Builds the rendering snapshot. Rows where nothing was ever
    /// deposited or staked are skipped.
    pub fn snapshot(&self, catalog: &CoinCatalog) -> PortfolioView {
        let assets = self
            .balances
            .iter()
            .filter(|(_, record)| record.total > Decimal::ZERO || record.staked > Decimal::ZERO)
            .map(|(coin, record)| {
                let info = catalog.get(*coin);
                CoinBalanceView {
                    coin: *coin,
                    name: info.name,
                    symbol: info.symbol,
                    unit_price: info.unit_price,
                    total: record.total,
                    staked: record.staked,
                    available: record.available,
                    value_usd: record.total * info.unit_price,
                    staked_value_usd: record.staked * info.unit_price,
                }
            })
            .collect();

        PortfolioView {
            assets,
            total_value: self.total_value(catalog),
            staked_value: self.staked_value(catalog),
            available_value: self.available_value(catalog),
        }
    }

    /// True when every balance satisfies `total == staked + available`
    /// with all fields non-negative.
    pub fn is_consistent(&self) -> bool {
        self.balances.values().all(BalanceRecord::is_consistent)
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn setup_portfolio() -> Portfolio {
        Portfolio::new()
    }

    #[test]
    fn test_new_portfolio_is_zeroed() {
        let portfolio = setup_portfolio();
        for coin in CoinId::ALL {
            assert_eq!(portfolio.balance(coin), BalanceRecord::zero());
        }
        assert!(portfolio.is_consistent());
        assert_eq!(portfolio.total_value(&CoinCatalog::new()), Decimal::ZERO);
    }

    #[test]
    fn test_deposit_increases_total_and_available() {
        let mut portfolio = setup_portfolio();

        let record = portfolio.deposit(CoinId::Btc, dec!(0.5)).unwrap();

        assert_eq!(record.total, dec!(0.5));
        assert_eq!(record.available, dec!(0.5));
        assert_eq!(record.staked, Decimal::ZERO);
        assert!(portfolio.is_consistent());
    }

    #[test]
    fn test_deposit_is_not_idempotent() {
        let mut portfolio = setup_portfolio();

        portfolio.deposit(CoinId::Btc, dec!(0.5)).unwrap();
        let record = portfolio.deposit(CoinId::Btc, dec!(0.5)).unwrap();

        assert_eq!(record.total, dec!(1.0));
        assert_eq!(record.available, dec!(1.0));
    }

    #[test]
    fn test_deposit_rejects_zero_and_negative_amounts() {
        let mut portfolio = setup_portfolio();

        assert_eq!(
            portfolio.deposit(CoinId::Btc, Decimal::ZERO),
            Err(LedgerError::InvalidAmount)
        );
        assert_eq!(
            portfolio.deposit(CoinId::Btc, dec!(-1)),
            Err(LedgerError::InvalidAmount)
        );
        assert_eq!(portfolio.balance(CoinId::Btc), BalanceRecord::zero());
    }

    #[test]
    fn test_stake_moves_available_to_staked() {
        let mut portfolio = setup_portfolio();
        portfolio.deposit(CoinId::Btc, dec!(0.5)).unwrap();

        let record = portfolio.stake(CoinId::Btc, dec!(0.3)).unwrap();

        assert_eq!(record.available, dec!(0.2));
        assert_eq!(record.staked, dec!(0.3));
        assert_eq!(record.total, dec!(0.5));
        assert!(portfolio.is_consistent());
    }

    #[test]
    fn test_stake_entire_available_balance_is_legal() {
        let mut portfolio = setup_portfolio();
        portfolio.deposit(CoinId::Sol, dec!(12)).unwrap();

        let record = portfolio.stake(CoinId::Sol, dec!(12)).unwrap();

        assert_eq!(record.available, Decimal::ZERO);
        assert_eq!(record.staked, dec!(12));
    }

    #[test]
    fn test_stake_more_than_available_rejected_and_unchanged() {
        let mut portfolio = setup_portfolio();
        portfolio.deposit(CoinId::Btc, dec!(0.5)).unwrap();
        let before = portfolio.clone();

        let result = portfolio.stake(CoinId::Btc, dec!(0.6));

        assert_eq!(result, Err(LedgerError::InsufficientAvailable));
        assert_eq!(portfolio, before);
    }

    #[test]
    fn test_stake_with_nothing_available_fails() {
        let mut portfolio = setup_portfolio();
        let before = portfolio.clone();

        let result = portfolio.stake(CoinId::Eth, dec!(1.0));

        assert_eq!(result, Err(LedgerError::InsufficientAvailable));
        assert_eq!(portfolio, before);
    }

    #[test]
    fn test_stake_rejects_zero_and_negative_amounts() {
        let mut portfolio = setup_portfolio();
        portfolio.deposit(CoinId::Btc, dec!(1)).unwrap();

        assert_eq!(
            portfolio.stake(CoinId::Btc, Decimal::ZERO),
            Err(LedgerError::InvalidAmount)
        );
        assert_eq!(
            portfolio.stake(CoinId::Btc, dec!(-0.1)),
            Err(LedgerError::InvalidAmount)
        );
    }

    #[test]
    fn test_unstake_moves_staked_to_available() {
        let mut portfolio = setup_portfolio();
        portfolio.deposit(CoinId::Btc, dec!(0.5)).unwrap();
        portfolio.stake(CoinId::Btc, dec!(0.3)).unwrap();

        let record = portfolio.unstake(CoinId::Btc, dec!(0.1)).unwrap();

        assert_eq!(record.available, dec!(0.3));
        assert_eq!(record.staked, dec!(0.2));
        assert_eq!(record.total, dec!(0.5));
        assert!(portfolio.is_consistent());
    }

    #[test]
    fn test_unstake_entire_staked_balance_is_legal() {
        let mut portfolio = setup_portfolio();
        portfolio.deposit(CoinId::Usdt, dec!(100)).unwrap();
        portfolio.stake(CoinId::Usdt, dec!(100)).unwrap();

        let record = portfolio.unstake(CoinId::Usdt, dec!(100)).unwrap();

        assert_eq!(record.staked, Decimal::ZERO);
        assert_eq!(record.available, dec!(100));
    }

    #[test]
    fn test_unstake_more_than_staked_rejected_and_unchanged() {
        let mut portfolio = setup_portfolio();
        portfolio.deposit(CoinId::Btc, dec!(0.5)).unwrap();
        portfolio.stake(CoinId::Btc, dec!(0.2)).unwrap();
        let before = portfolio.clone();

        let result = portfolio.unstake(CoinId::Btc, dec!(0.3));

        assert_eq!(result, Err(LedgerError::InsufficientStaked));
        assert_eq!(portfolio, before);
    }

    #[test]
    fn test_stake_then_unstake_restores_balances() {
        let mut portfolio = setup_portfolio();
        portfolio.deposit(CoinId::Eth, dec!(2.5)).unwrap();
        portfolio.stake(CoinId::Eth, dec!(1.0)).unwrap();
        let before = portfolio.balance(CoinId::Eth);

        portfolio.stake(CoinId::Eth, dec!(0.7)).unwrap();
        portfolio.unstake(CoinId::Eth, dec!(0.7)).unwrap();

        assert_eq!(portfolio.balance(CoinId::Eth), before);
    }

    #[test]
    fn test_operations_only_touch_their_own_coin() {
        let mut portfolio = setup_portfolio();
        portfolio.deposit(CoinId::Btc, dec!(1)).unwrap();
        portfolio.deposit(CoinId::Sol, dec!(50)).unwrap();

        portfolio.stake(CoinId::Btc, dec!(0.5)).unwrap();

        let sol = portfolio.balance(CoinId::Sol);
        assert_eq!(sol.available, dec!(50));
        assert_eq!(sol.staked, Decimal::ZERO);
    }

    #[test]
    fn test_derived_values_sum_over_coins() {
        let catalog = CoinCatalog::new();
        let mut portfolio = setup_portfolio();
        portfolio.deposit(CoinId::Btc, dec!(0.5)).unwrap();
        portfolio.deposit(CoinId::Eth, dec!(2)).unwrap();
        portfolio.stake(CoinId::Eth, dec!(1)).unwrap();

        // 0.5 BTC * 50000 + 2 ETH * 3000
        assert_eq!(portfolio.total_value(&catalog), dec!(31000.00));
        assert_eq!(portfolio.staked_value(&catalog), dec!(3000.00));
        assert_eq!(portfolio.available_value(&catalog), dec!(28000.00));
    }

    #[test]
    fn test_btc_scenario() {
        // new account -> deposit 0.5 BTC -> stake 0.3 -> unstake 0.1
        let catalog = CoinCatalog::new();
        let mut portfolio = setup_portfolio();

        let record = portfolio.deposit(CoinId::Btc, dec!(0.5)).unwrap();
        assert_eq!(record.total, dec!(0.5));
        assert_eq!(record.available, dec!(0.5));
        assert_eq!(record.staked, Decimal::ZERO);

        let record = portfolio.stake(CoinId::Btc, dec!(0.3)).unwrap();
        assert_eq!(record.available, dec!(0.2));
        assert_eq!(record.staked, dec!(0.3));

        let record = portfolio.unstake(CoinId::Btc, dec!(0.1)).unwrap();
        assert_eq!(record.available, dec!(0.3));
        assert_eq!(record.staked, dec!(0.2));

        assert_eq!(portfolio.total_value(&catalog), dec!(25000.00));
    }

    #[test]
    fn test_snapshot_skips_untouched_coins() {
        let catalog = CoinCatalog::new();
        let mut portfolio = setup_portfolio();
        portfolio.deposit(CoinId::Btc, dec!(0.5)).unwrap();

        let view = portfolio.snapshot(&catalog);

        assert_eq!(view.assets.len(), 1);
        assert_eq!(view.assets[0].coin, CoinId::Btc);
        assert_eq!(view.assets[0].symbol, "BTC");
        assert_eq!(view.assets[0].value_usd, dec!(25000.00));
        assert_eq!(view.total_value, dec!(25000.00));
    }

    #[test]
    fn test_snapshot_summary_matches_derived_values() {
        let catalog = CoinCatalog::new();
        let mut portfolio = setup_portfolio();
        portfolio.deposit(CoinId::Usdc, dec!(1500)).unwrap();
        portfolio.stake(CoinId::Usdc, dec!(400)).unwrap();

        let view = portfolio.snapshot(&catalog);

        assert_eq!(view.staked_value, dec!(400.00));
        assert_eq!(view.available_value, dec!(1100.00));
        assert_eq!(view.total_value, view.staked_value + view.available_value);
    }
}
