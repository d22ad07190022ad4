//! User aggregate.
//!
//! Users are created lazily from the first subscription request that names
//! their email.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

use super::{Email, WalletAddress};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub name: Option<String>,
    pub wallet_address: Option<WalletAddress>,
    pub created_at: Timestamp,
}

impl User {
    /// Registers a new user.
    ///
    /// A blank or missing name falls back to the email's local part.
    pub fn register(id: UserId, email: Email, name: Option<String>) -> Self {
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| email.local_part().to_string());
        Self {
            id,
            email,
            name: Some(name),
            wallet_address: None,
            created_at: Timestamp::now(),
        }
    }

    /// Records the payer wallet if none is stored yet.
    ///
    /// Returns true when the wallet was written. An existing wallet is never
    /// overwritten.
    pub fn record_wallet(&mut self, wallet: WalletAddress) -> bool {
        if self.wallet_address.is_some() {
            return false;
        }
        self.wallet_address = Some(wallet);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> Email {
        Email::new("ana@example.com").unwrap()
    }

    #[test]
    fn register_defaults_name_to_local_part() {
        let user = User::register(UserId::new(), email(), None);
        assert_eq!(user.name.as_deref(), Some("ana"));

        let blank = User::register(UserId::new(), email(), Some("  ".to_string()));
        assert_eq!(blank.name.as_deref(), Some("ana"));
    }

    #[test]
    fn register_keeps_given_name() {
        let user = User::register(UserId::new(), email(), Some("Ana Silva".to_string()));
        assert_eq!(user.name.as_deref(), Some("Ana Silva"));
        assert!(user.wallet_address.is_none());
    }

    #[test]
    fn wallet_first_write_wins() {
        let mut user = User::register(UserId::new(), email(), None);
        assert!(user.record_wallet(WalletAddress::new("W1").unwrap()));
        assert!(!user.record_wallet(WalletAddress::new("W2").unwrap()));
        assert_eq!(user.wallet_address.unwrap().as_str(), "W1");
    }
}
