//! Named accounts with a running balance.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::format::format_amount;

/// Identifier of a chat that owns accounts.
pub type ChatId = i64;

/// Identifier of a stored account.
pub type AccountId = u64;

/// An account belonging to one chat.
///
/// Names are unique within a chat and compared case-sensitively.
///
/// # Examples
///
/// ```
/// use ledgerbot_core::Account;
/// use rust_decimal_macros::dec;
///
/// let mut cash = Account::new(1, "  cash ", 42);
/// assert_eq!(cash.name, "cash");
///
/// cash.apply(dec!(150.5));
/// assert_eq!(cash.apply(dec!(-50)), Some(dec!(100.5)));
/// assert_eq!(cash.balance, dec!(100.5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Store-assigned identifier
    pub id: AccountId,
    /// Account name, trimmed
    pub name: String,
    /// Owning chat
    pub chat_id: ChatId,
    /// Current balance
    pub balance: Decimal,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create an empty account created now.
    #[must_use]
    pub fn new(id: AccountId, name: impl AsRef<str>, chat_id: ChatId) -> Self {
        Self {
            id,
            name: normalize_name(name.as_ref()),
            chat_id,
            balance: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }

    /// Set the creation time.
    #[must_use]
    pub const fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Set the balance.
    #[must_use]
    pub const fn with_balance(mut self, balance: Decimal) -> Self {
        self.balance = balance;
        self
    }

    /// Add `delta` to the balance and return the new balance.
    ///
    /// Returns `None` and leaves the balance unchanged if the sum does not
    /// fit a decimal.
    pub fn apply(&mut self, delta: Decimal) -> Option<Decimal> {
        self.balance = self.balance.checked_add(delta)?;
        Some(self.balance)
    }

    /// Whether this account is called `name` (after trimming).
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name == name.trim()
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, format_amount(self.balance))
    }
}

/// Trim surrounding whitespace from an account name.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_string()
}
