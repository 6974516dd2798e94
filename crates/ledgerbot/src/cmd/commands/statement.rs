//! `/statement [file]` - CSV export of the chat's transactions.
//!
//! Statements are written into the configured statements directory. The
//! optional argument is a bare file name inside it.

use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use ledgerbot_core::ChatId;
use ledgerbot_store::write_statement_file;

use crate::cmd::registry::{Command, CommandError, Deps, Registry, Request};
use crate::messages::MessageId;

/// Write a statement file and reply with where it went.
pub fn statement() -> Command {
    Command {
        name: "statement",
        description: MessageId::DescStatement,
        hidden: false,
        handler: handle_statement,
    }
}

/// Default statement file name, e.g. `statement_42_20250301_101500Z.csv`.
pub fn statement_file_name(chat_id: ChatId, at: DateTime<Utc>) -> String {
    format!("statement_{chat_id}_{}.csv", at.format("%Y%m%d_%H%M%SZ"))
}

/// Resolve a requested statement name inside `dir`.
///
/// Only a plain file name is accepted: anything with a path separator, or
/// `.`/`..`, gives `None`.
pub fn statement_path(dir: &Path, name: &str) -> Option<PathBuf> {
    if name.contains(['/', '\\']) {
        return None;
    }
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(file)), None) => Some(dir.join(file)),
        _ => None,
    }
}

fn handle_statement(
    _: &Registry,
    req: &Request<'_>,
    deps: &mut Deps<'_>,
) -> Result<(), CommandError> {
    let chat_id = req.chat_id();
    let name = if req.args.is_empty() {
        statement_file_name(chat_id, Utc::now())
    } else {
        req.args.to_string()
    };
    let Some(path) = statement_path(deps.statements_dir, &name) else {
        tracing::warn!(chat_id, name = %name, "refusing statement name");
        return deps.reply_with(chat_id, MessageId::InvalidFileName, &[]);
    };

    let rows = write_statement_file(&*deps.store, chat_id, &path)?;
    tracing::info!(chat_id, rows, path = %path.display(), "statement written");
    deps.reply_with(
        chat_id,
        MessageId::StatementWritten,
        &[&rows.to_string(), &path.display().to_string()],
    )
}
