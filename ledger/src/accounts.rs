use std::collections::HashMap;

use super::error::LedgerError;
use super::portfolio::Portfolio;
use super::types::current_timestamp;

/// A registered user. The portfolio is created atomically with the account
/// and owned by it for the account's whole life; there is no deletion.
///
/// Credentials are stored and compared in clear text. In a real deployment
/// they would be hashed.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub created_at: u64,
    pub portfolio: Portfolio,
}

/// In-memory collection of registered accounts. State lives only for the
/// process lifetime.
pub struct AccountStore {
    accounts: HashMap<u64, Account>,
    account_id_counter: u64,
}

impl AccountStore {
    pub fn new() -> Self {
        AccountStore {
            accounts: HashMap::new(),
            account_id_counter: 0,
        }
    }

    /// Creates a new account with a fresh id and a zeroed portfolio.
    pub fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<&Account, LedgerError> {
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(LedgerError::InvalidInput);
        }
        if self.accounts.values().any(|account| account.email == email) {
            return Err(LedgerError::DuplicateEmail);
        }

        let id = self.account_id_counter;
        self.account_id_counter += 1;

        let account = Account {
            id,
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            created_at: current_timestamp(),
            portfolio: Portfolio::new(),
        };

        Ok(self.accounts.entry(id).or_insert(account))
    }

    /// Looks up the account matching both email and password exactly
    /// (case-sensitive).
    pub fn authenticate(&self, email: &str, password: &str) -> Result<&Account, LedgerError> {
        self.accounts
            .values()
            .find(|account| account.email == email && account.password == password)
            .ok_or(LedgerError::InvalidCredentials)
    }

    pub fn get(&self, id: u64) -> Option<&Account> {
        self.accounts.get(&id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Account> {
        self.accounts.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new()
    }
}
