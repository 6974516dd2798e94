//! Balance changes recorded against an account.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::account::AccountId;
use crate::format::format_amount;

/// Identifier of a stored transaction.
pub type TransactionId = u64;

/// Identifier of the user who sent a command.
pub type UserId = i64;

/// One balance change.
///
/// `expression` keeps the text the user typed (before percent rewriting) so
/// the change can be shown and reverted later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Store-assigned identifier
    pub id: TransactionId,
    /// Account the change applies to
    pub account_id: AccountId,
    /// Signed change to the balance
    pub amount: Decimal,
    /// Balance right after this change was applied
    pub balance_after: Decimal,
    /// Expression as typed
    pub expression: String,
    /// Free-text comment, possibly empty
    pub note: String,
    /// When the change was recorded
    pub created_at: DateTime<Utc>,
    /// Who sent it
    pub created_by: UserId,
    /// Whether the change has been undone
    #[serde(default)]
    pub reverted: bool,
}

impl Transaction {
    /// Create a transaction recorded now.
    #[must_use]
    pub fn new(id: TransactionId, account_id: AccountId, amount: Decimal) -> Self {
        Self {
            id,
            account_id,
            amount,
            balance_after: Decimal::ZERO,
            expression: String::new(),
            note: String::new(),
            created_at: Utc::now(),
            created_by: 0,
            reverted: false,
        }
    }

    /// Set the resulting balance.
    #[must_use]
    pub const fn with_balance_after(mut self, balance: Decimal) -> Self {
        self.balance_after = balance;
        self
    }

    /// Set the expression text.
    #[must_use]
    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = expression.into();
        self
    }

    /// Set the note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Set the author.
    #[must_use]
    pub const fn with_created_by(mut self, user: UserId) -> Self {
        self.created_by = user;
        self
    }

    /// Set the creation time.
    #[must_use]
    pub const fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, format_amount(self.amount))?;
        if !self.expression.is_empty() {
            write!(f, " = {}", self.expression)?;
        }
        if !self.note.is_empty() {
            write!(f, " ({})", self.note)?;
        }
        if self.reverted {
            f.write_str(" [reverted]")?;
        }
        Ok(())
    }
}
