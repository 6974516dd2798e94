//! Account management: `/new`, `/del`, `/list`, `/get`.

use ledgerbot_core::format_amount;
use ledgerbot_store::StoreError;

use crate::cmd::registry::{Command, CommandError, Deps, Registry, Request};
use crate::messages::MessageId;

/// Create an account.
pub fn new() -> Command {
    Command {
        name: "new",
        description: MessageId::DescNew,
        hidden: false,
        handler: handle_new,
    }
}

/// Delete an account and its history.
pub fn del() -> Command {
    Command {
        name: "del",
        description: MessageId::DescDel,
        hidden: false,
        handler: handle_del,
    }
}

/// Numbered list of account names.
pub fn list() -> Command {
    Command {
        name: "list",
        description: MessageId::DescList,
        hidden: false,
        handler: handle_list,
    }
}

/// Balances of every account.
pub fn get() -> Command {
    Command {
        name: "get",
        description: MessageId::DescGet,
        hidden: false,
        handler: handle_get,
    }
}

fn handle_new(_: &Registry, req: &Request<'_>, deps: &mut Deps<'_>) -> Result<(), CommandError> {
    let chat_id = req.chat_id();
    match deps.store.add_account(chat_id, req.args) {
        Ok(account) => {
            tracing::info!(chat_id, account = %account.name, "account created");
            deps.reply_with(chat_id, MessageId::AccountCreated, &[&account.name])
        }
        Err(StoreError::EmptyAccountName) => {
            deps.reply_with(chat_id, MessageId::NoAccountName, &[])
        }
        Err(StoreError::AccountExists { name }) => {
            tracing::warn!(chat_id, account = %name, "account already exists");
            deps.reply_with(chat_id, MessageId::AccAlreadyExist, &[&name])
        }
        Err(e) => Err(e.into()),
    }
}

fn handle_del(_: &Registry, req: &Request<'_>, deps: &mut Deps<'_>) -> Result<(), CommandError> {
    let chat_id = req.chat_id();
    if req.args.is_empty() {
        return deps.reply_with(chat_id, MessageId::NoAccountName, &[]);
    }
    match deps.store.remove_account(chat_id, req.args) {
        Ok(account) => {
            tracing::info!(chat_id, account = %account.name, "account removed");
            deps.reply_with(chat_id, MessageId::AccRemoved, &[&account.name])
        }
        Err(StoreError::AccountNotFound { name }) => {
            deps.reply_with(chat_id, MessageId::AccDoesNotExist, &[&name])
        }
        Err(e) => Err(e.into()),
    }
}

fn handle_list(_: &Registry, req: &Request<'_>, deps: &mut Deps<'_>) -> Result<(), CommandError> {
    let chat_id = req.chat_id();
    let accounts = deps.store.list_accounts(chat_id);
    if accounts.is_empty() {
        return deps.reply_with(chat_id, MessageId::NoAccountsYet, &[]);
    }

    let mut text = deps.text(MessageId::AccountList, &[]);
    for (i, account) in accounts.iter().enumerate() {
        text.push_str(&format!("\n{}) {}", i + 1, account.name));
    }
    deps.reply(chat_id, &text)
}

fn handle_get(_: &Registry, req: &Request<'_>, deps: &mut Deps<'_>) -> Result<(), CommandError> {
    let chat_id = req.chat_id();
    let accounts = deps.store.list_accounts(chat_id);
    if accounts.is_empty() {
        return deps.reply_with(chat_id, MessageId::NoAccountsYet, &[]);
    }

    let mut text = deps.text(MessageId::Balances, &[]);
    text.push_str(&balance_table(
        accounts.iter().map(|a| (a.name.as_str(), format_amount(a.balance))),
    ));
    deps.reply(chat_id, &text)
}

/// Amounts right-aligned in one column, names after them.
fn balance_table<'a>(rows: impl Iterator<Item = (&'a str, String)>) -> String {
    let rows: Vec<_> = rows.collect();
    let width = rows
        .iter()
        .map(|(_, amount)| amount.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (name, amount) in &rows {
        out.push_str(&format!("\n{amount:>width$}  {name}"));
    }
    out
}
