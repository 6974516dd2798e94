//! Storage error types.

use ledgerbot_core::TransactionId;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by a [`Storage`](crate::Storage).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The account name is empty after trimming.
    #[error("account name is empty")]
    EmptyAccountName,

    /// An account with this name already exists in the chat.
    #[error("account '{name}' already exists")]
    AccountExists {
        /// The requested name.
        name: String,
    },

    /// No account with this name exists in the chat.
    #[error("account '{name}' does not exist")]
    AccountNotFound {
        /// The requested name.
        name: String,
    },

    /// The change would take the balance past the decimal range.
    #[error("balance of '{name}' would overflow")]
    BalanceOverflow {
        /// The account name.
        name: String,
    },

    /// No transaction with this id exists in the chat.
    #[error("transaction #{0} not found")]
    TransactionNotFound(TransactionId),

    /// The transaction was already undone.
    #[error("transaction #{0} is already reverted")]
    AlreadyReverted(TransactionId),

    /// IO error reading or writing the store file.
    #[error("failed to access {path}: {source}")]
    Io {
        /// The path involved.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The store file is not valid JSON for a ledger.
    #[error("invalid ledger data: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing a CSV statement failed.
    #[error("failed to write statement: {0}")]
    Csv(#[from] csv::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
