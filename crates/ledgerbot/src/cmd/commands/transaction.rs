//! Balance changes: `/<account> <expression> [comment]` and `/undo`.

use ledgerbot_core::{format_amount, TransactionId};
use ledgerbot_expr::split_expression;
use ledgerbot_store::{NewTransaction, Reverted, StoreError};

use crate::cmd::registry::{Command, CommandError, Deps, Registry, Request, TRANSACTION};
use crate::messages::MessageId;

/// Record a change to the account named by the command.
pub fn transaction() -> Command {
    Command {
        name: TRANSACTION,
        description: MessageId::DescTransaction,
        hidden: true,
        handler: handle_transaction,
    }
}

/// Revert a transaction by id.
pub fn undo() -> Command {
    Command {
        name: "undo",
        description: MessageId::DescUndo,
        hidden: false,
        handler: handle_undo,
    }
}

fn handle_transaction(
    _: &Registry,
    req: &Request<'_>,
    deps: &mut Deps<'_>,
) -> Result<(), CommandError> {
    let chat_id = req.chat_id();
    let account = req.command;

    let split = match split_expression(req.args) {
        Ok(split) => split,
        Err(e) if account.is_empty() => {
            tracing::debug!(chat_id, "bare slash without expression: {}", e);
            return Ok(());
        }
        Err(e) => {
            tracing::warn!(chat_id, account, "rejected /{} {:?}: {}", account, req.args, e);
            return deps.reply_with(chat_id, MessageId::NoExpression, &[]);
        }
    };
    tracing::debug!(
        chat_id,
        expression = %split.expression,
        comment = %split.comment,
        "split message"
    );

    if !deps.store.exists(chat_id, account) {
        tracing::warn!(chat_id, account, "unknown account");
        return deps.reply_with(chat_id, MessageId::AccDoesNotExist, &[account]);
    }

    let amount = match deps.evaluator.evaluate(&split.expression) {
        Ok(amount) => amount,
        Err(e) => {
            tracing::warn!(chat_id, expression = %split.expression, "evaluation failed: {}", e);
            return deps.reply_with(chat_id, MessageId::InvalidExpression, &[]);
        }
    };

    let change = NewTransaction::new(amount)
        .with_expression(split.raw_expression)
        .with_note(split.comment)
        .with_created_by(req.message.user_id);
    let (account, tx) = match deps.store.apply_delta(chat_id, account, change) {
        Ok(applied) => applied,
        Err(StoreError::BalanceOverflow { name }) => {
            tracing::warn!(chat_id, account = %name, amount = %amount, "balance would overflow");
            return deps.reply_with(chat_id, MessageId::BalanceOverflow, &[&name]);
        }
        Err(e) => return Err(e.into()),
    };
    tracing::info!(
        chat_id,
        account = %account.name,
        amount = %amount,
        balance = %account.balance,
        tx_id = tx.id,
        "balance updated"
    );

    let note = if tx.note.is_empty() {
        deps.text(MessageId::NoteNone, &[])
    } else {
        tx.note.clone()
    };
    deps.reply_with(
        chat_id,
        MessageId::BalanceUpdated,
        &[
            &format_amount(amount),
            &account.name,
            &note,
            &format_amount(account.balance),
            &tx.id.to_string(),
        ],
    )
}

fn handle_undo(_: &Registry, req: &Request<'_>, deps: &mut Deps<'_>) -> Result<(), CommandError> {
    let chat_id = req.chat_id();
    let Some(tx_id) = parse_transaction_id(req.args) else {
        return deps.reply_with(chat_id, MessageId::NoTransactionId, &[]);
    };

    match deps.store.revert_transaction(chat_id, tx_id) {
        Ok(Reverted { account, delta }) => {
            tracing::info!(
                chat_id,
                tx_id,
                account = %account.name,
                balance = %account.balance,
                "transaction reverted"
            );
            deps.reply_with(
                chat_id,
                MessageId::BalanceReverted,
                &[
                    &format_amount(-delta),
                    &account.name,
                    &format_amount(account.balance),
                ],
            )
        }
        Err(StoreError::TransactionNotFound(id)) => {
            deps.reply_with(chat_id, MessageId::TransactionNotFound, &[&id.to_string()])
        }
        Err(StoreError::AlreadyReverted(id)) => {
            deps.reply_with(chat_id, MessageId::AlreadyReverted, &[&id.to_string()])
        }
        Err(StoreError::BalanceOverflow { name }) => {
            tracing::warn!(chat_id, tx_id, account = %name, "revert would overflow");
            deps.reply_with(chat_id, MessageId::BalanceOverflow, &[&name])
        }
        Err(e) => Err(e.into()),
    }
}

/// Accepts `12` and `#12`.
fn parse_transaction_id(args: &str) -> Option<TransactionId> {
    let args = args.trim();
    args.strip_prefix('#').unwrap_or(args).parse().ok()
}
