//! Built-in commands.
//!
//! Each constructor returns a [`Command`] ready to register.

mod account;
mod start;
mod statement;
mod transaction;

pub use account::{del, get, list, new};
pub use start::{help, start};
pub use statement::{statement, statement_file_name};
pub use transaction::{transaction, undo};

use super::registry::Command;

/// Every built-in command, in `/help` order.
pub fn all() -> Vec<Command> {
    vec![
        start(),
        help(),
        new(),
        del(),
        list(),
        get(),
        undo(),
        statement(),
        transaction(),
    ]
}
