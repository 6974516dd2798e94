//! Account and transaction storage for ledgerbot.
//!
//! The [`Storage`] trait is what command handlers talk to. Two
//! implementations are provided:
//!
//! - [`MemoryStore`] - everything in memory; also the serialized snapshot
//! - [`JsonStore`] - a [`MemoryStore`] written to a JSON file after every change
//!
//! [`write_statement`] exports a chat's transactions as CSV.
//!
//! # Example
//!
//! ```
//! use ledgerbot_store::{MemoryStore, NewTransaction, Storage};
//! use rust_decimal_macros::dec;
//!
//! let mut store = MemoryStore::new();
//! store.add_account(42, "cash")?;
//!
//! let (account, tx) = store.apply_delta(
//!     42,
//!     "cash",
//!     NewTransaction::new(dec!(300)).with_expression("200*1.5").with_note("rent"),
//! )?;
//! assert_eq!(account.balance, dec!(300));
//!
//! let reverted = store.revert_transaction(42, tx.id)?;
//! assert_eq!(reverted.account.balance, dec!(0));
//! # Ok::<(), ledgerbot_store::StoreError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod json;
mod memory;
mod statement;

pub use error::StoreError;
pub use json::JsonStore;
pub use memory::MemoryStore;
pub use statement::{write_statement, write_statement_file, StatementRow};

use ledgerbot_core::{Account, ChatId, Decimal, Transaction, TransactionId, UserId};

/// A balance change to record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// Signed amount to add to the balance.
    pub amount: Decimal,
    /// Expression as typed.
    pub expression: String,
    /// Free-text comment.
    pub note: String,
    /// Author of the change.
    pub created_by: UserId,
}

impl NewTransaction {
    /// Create a change of `amount` with no expression, note or author.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self {
            amount,
            expression: String::new(),
            note: String::new(),
            created_by: 0,
        }
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
}

/// Result of undoing a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reverted {
    /// The account after the undo.
    pub account: Account,
    /// The amount that was taken back out of the balance.
    pub delta: Decimal,
}

/// Persistent accounts and their transactions, partitioned by chat.
pub trait Storage {
    /// Create an empty account.
    fn add_account(&mut self, chat_id: ChatId, name: &str) -> Result<Account, StoreError>;

    /// Delete an account together with its transactions.
    fn remove_account(&mut self, chat_id: ChatId, name: &str) -> Result<Account, StoreError>;

    /// Look up an account by name.
    fn account(&self, chat_id: ChatId, name: &str) -> Result<Account, StoreError>;

    /// Whether an account exists.
    fn exists(&self, chat_id: ChatId, name: &str) -> bool {
        self.account(chat_id, name).is_ok()
    }

    /// All accounts of a chat, oldest first.
    fn list_accounts(&self, chat_id: ChatId) -> Vec<Account>;

    /// Add to an account balance and log the change, as one step.
    fn apply_delta(
        &mut self,
        chat_id: ChatId,
        name: &str,
        change: NewTransaction,
    ) -> Result<(Account, Transaction), StoreError>;

    /// Undo a transaction by subtracting its amount from the account.
    fn revert_transaction(
        &mut self,
        chat_id: ChatId,
        tx_id: TransactionId,
    ) -> Result<Reverted, StoreError>;

    /// All transactions of a chat with their accounts, oldest first.
    fn transactions(&self, chat_id: ChatId) -> Vec<(Account, Transaction)>;
}
