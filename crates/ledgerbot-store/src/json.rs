//! JSON file persistence.
//!
//! The whole ledger is one JSON document. Every mutation rewrites it to a
//! sibling `.tmp` file and renames that over the original, so a crash never
//! leaves a half-written ledger behind.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ledgerbot_core::{Account, ChatId, Transaction, TransactionId};

use crate::{MemoryStore, NewTransaction, Reverted, Storage, StoreError};

/// A [`MemoryStore`] saved to a JSON file after every change.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonStore {
    /// Open the ledger at `path`, starting empty if the file does not exist.
    ///
    /// Missing parent directories are created on first save.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let inner = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => MemoryStore::new(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => MemoryStore::new(),
            Err(e) => return Err(StoreError::io(path, e)),
        };
        Ok(Self { path, inner })
    }

    /// Path of the ledger file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current state to disk.
    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
        }

        let tmp = temp_path(&self.path);
        let file = fs::File::create(&tmp).map_err(|e| StoreError::io(&tmp, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.inner)?;
        writer.flush().map_err(|e| StoreError::io(&tmp, e))?;
        drop(writer);

        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))
    }

    /// Run a mutation and persist it if it succeeded.
    fn commit<T>(
        &mut self,
        f: impl FnOnce(&mut MemoryStore) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let snapshot = self.inner.clone();
        let value = f(&mut self.inner)?;
        if let Err(e) = self.save() {
            self.inner = snapshot;
            return Err(e);
        }
        Ok(value)
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

impl Storage for JsonStore {
    fn add_account(&mut self, chat_id: ChatId, name: &str) -> Result<Account, StoreError> {
        self.commit(|s| s.add_account(chat_id, name))
    }

    fn remove_account(&mut self, chat_id: ChatId, name: &str) -> Result<Account, StoreError> {
        self.commit(|s| s.remove_account(chat_id, name))
    }

    fn account(&self, chat_id: ChatId, name: &str) -> Result<Account, StoreError> {
        self.inner.account(chat_id, name)
    }

    fn list_accounts(&self, chat_id: ChatId) -> Vec<Account> {
        self.inner.list_accounts(chat_id)
    }

    fn apply_delta(
        &mut self,
        chat_id: ChatId,
        name: &str,
        change: NewTransaction,
    ) -> Result<(Account, Transaction), StoreError> {
        self.commit(|s| s.apply_delta(chat_id, name, change))
    }

    fn revert_transaction(
        &mut self,
        chat_id: ChatId,
        tx_id: TransactionId,
    ) -> Result<Reverted, StoreError> {
        self.commit(|s| s.revert_transaction(chat_id, tx_id))
    }

    fn transactions(&self, chat_id: ChatId) -> Vec<(Account, Transaction)> {
        self.inner.transactions(chat_id)
    }
}
