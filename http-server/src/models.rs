use ledger::accounts::Account;
use serde::Serialize;

// Account as exposed over the wire - everything except the password
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    pub user_id: u64,
    pub username: String,
    pub email: String,
    pub created_at: u64,
}

impl From<&Account> for AuthenticatedUser {
    fn from(account: &Account) -> Self {
        AuthenticatedUser {
            user_id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
            created_at: account.created_at,
        }
    }
}
