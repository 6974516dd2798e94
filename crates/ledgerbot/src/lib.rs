//! Chat ledger bot.
//!
//! Members of a chat keep shared account balances by sending messages like
//! `/cash 200*1.5 rent`: the expression is evaluated, added to the account
//! and the rest of the message is kept as a comment.
//!
//! - [`cmd`] - command registry, handlers and the `ledgerbot` entry point
//! - [`messages`] - reply texts in English and Russian
//! - [`transport`] - incoming messages and the [`Chat`](transport::Chat) trait
//!
//! # Example Usage
//!
//! ```bash
//! ledgerbot --data ledger.json
//! > /new cash
//! > /cash 1000 - 15% lunch with Bob
//! > /get
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
pub mod messages;
pub mod transport;

/// Crate version, shown in the interactive banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
