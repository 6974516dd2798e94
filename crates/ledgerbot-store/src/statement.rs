//! CSV statements.

use std::io::Write;
use std::path::Path;

use ledgerbot_core::{Account, ChatId, DateTime, Decimal, Transaction, UserId, Utc};
use serde::Serialize;

use crate::{Storage, StoreError};

/// One line of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementRow {
    /// Account name.
    pub account: String,
    /// Signed change.
    pub amount: Decimal,
    /// Balance right after the change.
    pub balance_after: Decimal,
    /// Expression as typed.
    pub expression: String,
    /// Comment.
    pub note: String,
    /// When the change was recorded.
    pub created_at: DateTime<Utc>,
    /// Who recorded it.
    pub created_by: UserId,
    /// Whether it was undone.
    pub reverted: bool,
}

impl StatementRow {
    fn new(account: &Account, tx: Transaction) -> Self {
        Self {
            account: account.name.clone(),
            amount: tx.amount,
            balance_after: tx.balance_after,
            expression: tx.expression,
            note: tx.note,
            created_at: tx.created_at,
            created_by: tx.created_by,
            reverted: tx.reverted,
        }
    }
}

/// Write every transaction of `chat_id` as CSV, oldest first.
///
/// Returns the number of rows written. The header is written even when the
/// chat has no transactions.
pub fn write_statement<S, W>(store: &S, chat_id: ChatId, writer: W) -> Result<usize, StoreError>
where
    S: Storage + ?Sized,
    W: Write,
{
    let mut csv = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    csv.write_record([
        "account",
        "amount",
        "balance_after",
        "expression",
        "note",
        "created_at",
        "created_by",
        "reverted",
    ])?;

    let mut rows = 0;
    for (account, tx) in store.transactions(chat_id) {
        csv.serialize(StatementRow::new(&account, tx))?;
        rows += 1;
    }
    csv.flush().map_err(|e| StoreError::Csv(e.into()))?;
    Ok(rows)
}

/// Write a statement to a file, replacing it.
pub fn write_statement_file<S>(
    store: &S,
    chat_id: ChatId,
    path: impl AsRef<Path>,
) -> Result<usize, StoreError>
where
    S: Storage + ?Sized,
{
    let path = path.as_ref();
    let file = std::fs::File::create(path).map_err(|e| StoreError::io(path, e))?;
    write_statement(store, chat_id, file)
}
