//! In-memory store.

use ledgerbot_core::{normalize_name, Account, AccountId, ChatId, Transaction, TransactionId};
use serde::{Deserialize, Serialize};

use crate::{NewTransaction, Reverted, Storage, StoreError};

/// Accounts and transactions held in memory.
///
/// This is also the on-disk format of [`JsonStore`](crate::JsonStore).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    next_account_id: AccountId,
    #[serde(default)]
    next_transaction_id: TransactionId,
    #[serde(default)]
    accounts: Vec<Account>,
    #[serde(default)]
    transactions: Vec<Transaction>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, chat_id: ChatId, name: &str) -> Option<usize> {
        self.accounts
            .iter()
            .position(|a| a.chat_id == chat_id && a.is_named(name))
    }

    fn allocate_account_id(&mut self) -> AccountId {
        self.next_account_id += 1;
        self.next_account_id
    }

    fn allocate_transaction_id(&mut self) -> TransactionId {
        self.next_transaction_id += 1;
        self.next_transaction_id
    }
}

fn not_found(name: &str) -> StoreError {
    StoreError::AccountNotFound {
        name: normalize_name(name),
    }
}

fn overflow(account: &Account) -> StoreError {
    StoreError::BalanceOverflow {
        name: account.name.clone(),
    }
}

impl Storage for MemoryStore {
    fn add_account(&mut self, chat_id: ChatId, name: &str) -> Result<Account, StoreError> {
        let name = normalize_name(name);
        if name.is_empty() {
            return Err(StoreError::EmptyAccountName);
        }
        if self.position(chat_id, &name).is_some() {
            return Err(StoreError::AccountExists { name });
        }

        let account = Account::new(self.allocate_account_id(), name, chat_id);
        self.accounts.push(account.clone());
        Ok(account)
    }

    fn remove_account(&mut self, chat_id: ChatId, name: &str) -> Result<Account, StoreError> {
        let index = self.position(chat_id, name).ok_or_else(|| not_found(name))?;
        let account = self.accounts.remove(index);
        self.transactions.retain(|tx| tx.account_id != account.id);
        Ok(account)
    }

    fn account(&self, chat_id: ChatId, name: &str) -> Result<Account, StoreError> {
        self.position(chat_id, name)
            .map(|i| self.accounts[i].clone())
            .ok_or_else(|| not_found(name))
    }

    fn list_accounts(&self, chat_id: ChatId) -> Vec<Account> {
        self.accounts
            .iter()
            .filter(|a| a.chat_id == chat_id)
            .cloned()
            .collect()
    }

    fn apply_delta(
        &mut self,
        chat_id: ChatId,
        name: &str,
        change: NewTransaction,
    ) -> Result<(Account, Transaction), StoreError> {
        // Resolve and check before allocating so a rejected change does not
        // burn an id.
        let index = self.position(chat_id, name).ok_or_else(|| not_found(name))?;
        let account = &mut self.accounts[index];
        let balance = account
            .apply(change.amount)
            .ok_or_else(|| overflow(account))?;
        let account = account.clone();
        let tx_id = self.allocate_transaction_id();

        let tx = Transaction::new(tx_id, account.id, change.amount)
            .with_balance_after(balance)
            .with_expression(change.expression)
            .with_note(change.note)
            .with_created_by(change.created_by);
        self.transactions.push(tx.clone());
        Ok((account, tx))
    }

    fn revert_transaction(
        &mut self,
        chat_id: ChatId,
        tx_id: TransactionId,
    ) -> Result<Reverted, StoreError> {
        let tx_index = self
            .transactions
            .iter()
            .position(|tx| tx.id == tx_id)
            .ok_or(StoreError::TransactionNotFound(tx_id))?;
        let account_id = self.transactions[tx_index].account_id;
        let account_index = self
            .accounts
            .iter()
            .position(|a| a.id == account_id && a.chat_id == chat_id)
            .ok_or(StoreError::TransactionNotFound(tx_id))?;

        let tx = &mut self.transactions[tx_index];
        if tx.reverted {
            return Err(StoreError::AlreadyReverted(tx_id));
        }
        let delta = tx.amount;

        let account = &mut self.accounts[account_index];
        account.apply(-delta).ok_or_else(|| overflow(account))?;
        tx.reverted = true;
        Ok(Reverted {
            account: account.clone(),
            delta,
        })
    }

    fn transactions(&self, chat_id: ChatId) -> Vec<(Account, Transaction)> {
        self.transactions
            .iter()
            .filter_map(|tx| {
                self.accounts
                    .iter()
                    .find(|a| a.id == tx.account_id && a.chat_id == chat_id)
                    .map(|a| (a.clone(), tx.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn store_with(chat: ChatId, names: &[&str]) -> MemoryStore {
        let mut store = MemoryStore::new();
        for name in names {
            store.add_account(chat, name).unwrap();
        }
        store
    }

    #[test]
    fn test_add_and_list() {
        let store = store_with(1, &["cash", "card"]);
        let names: Vec<_> = store.list_accounts(1).into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["cash", "card"]);
        assert!(store.list_accounts(2).is_empty());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut store = store_with(1, &["cash"]);
        assert!(matches!(
            store.add_account(1, " cash "),
            Err(StoreError::AccountExists { name }) if name == "cash"
        ));
        // Same name in another chat is fine.
        assert!(store.add_account(2, "cash").is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.add_account(1, "   "),
            Err(StoreError::EmptyAccountName)
        ));
    }

    #[test]
    fn test_apply_delta_updates_balance_and_logs() {
        let mut store = store_with(1, &["cash"]);
        store
            .apply_delta(1, "cash", NewTransaction::new(dec!(100)))
            .unwrap();
        let (account, tx) = store
            .apply_delta(
                1,
                "cash",
                NewTransaction::new(dec!(-30.5)).with_note("taxi"),
            )
            .unwrap();
        assert_eq!(account.balance, dec!(69.5));
        assert_eq!(tx.balance_after, dec!(69.5));
        assert_eq!(tx.id, 2);
        assert_eq!(store.transactions(1).len(), 2);
    }

    #[test]
    fn test_apply_delta_unknown_account() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.apply_delta(1, "ghost", NewTransaction::new(dec!(1))),
            Err(StoreError::AccountNotFound { .. })
        ));
        assert!(store.transactions(1).is_empty());
    }

    #[test]
    fn test_apply_delta_overflow_rejected() {
        let mut store = store_with(1, &["cash"]);
        store
            .apply_delta(1, "cash", NewTransaction::new(Decimal::MAX))
            .unwrap();
        assert!(matches!(
            store.apply_delta(1, "cash", NewTransaction::new(Decimal::MAX)),
            Err(StoreError::BalanceOverflow { name }) if name == "cash"
        ));
        assert_eq!(store.account(1, "cash").unwrap().balance, Decimal::MAX);
        assert_eq!(store.transactions(1).len(), 1);

        // The rejected change did not take an id.
        let (_, tx) = store
            .apply_delta(1, "cash", NewTransaction::new(dec!(-1)))
            .unwrap();
        assert_eq!(tx.id, 2);
    }

    #[test]
    fn test_revert_overflow_leaves_transaction_active() {
        let mut store = store_with(1, &["cash"]);
        let (_, tx) = store
            .apply_delta(1, "cash", NewTransaction::new(-Decimal::MAX))
            .unwrap();
        store
            .apply_delta(1, "cash", NewTransaction::new(Decimal::MAX))
            .unwrap();
        store
            .apply_delta(1, "cash", NewTransaction::new(Decimal::MAX))
            .unwrap();
        assert!(matches!(
            store.revert_transaction(1, tx.id),
            Err(StoreError::BalanceOverflow { .. })
        ));
        assert!(!store.transactions(1)[0].1.reverted);
        assert_eq!(store.account(1, "cash").unwrap().balance, Decimal::MAX);
    }

    #[test]
    fn test_revert_once() {
        let mut store = store_with(1, &["cash"]);
        let (_, tx) = store
            .apply_delta(1, "cash", NewTransaction::new(dec!(40)))
            .unwrap();
        let reverted = store.revert_transaction(1, tx.id).unwrap();
        assert_eq!(reverted.delta, dec!(40));
        assert_eq!(reverted.account.balance, dec!(0));
        assert!(matches!(
            store.revert_transaction(1, tx.id),
            Err(StoreError::AlreadyReverted(id)) if id == tx.id
        ));
    }

    #[test]
    fn test_revert_other_chat_not_found() {
        let mut store = store_with(1, &["cash"]);
        let (_, tx) = store
            .apply_delta(1, "cash", NewTransaction::new(dec!(40)))
            .unwrap();
        assert!(matches!(
            store.revert_transaction(2, tx.id),
            Err(StoreError::TransactionNotFound(_))
        ));
    }

    #[test]
    fn test_remove_cascades() {
        let mut store = store_with(1, &["cash", "card"]);
        store
            .apply_delta(1, "cash", NewTransaction::new(dec!(5)))
            .unwrap();
        store
            .apply_delta(1, "card", NewTransaction::new(dec!(7)))
            .unwrap();
        store.remove_account(1, "cash").unwrap();
        assert!(!store.exists(1, "cash"));
        let remaining = store.transactions(1);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].0.name, "card");
    }
}
