//! Core types for ledgerbot
//!
//! - [`Account`] - A named balance owned by a chat
//! - [`Transaction`] - One recorded change to an account balance
//! - [`format_amount`] - Display formatting for balances and deltas
//!
//! # Example
//!
//! ```
//! use ledgerbot_core::{format_amount, Account, Transaction};
//! use rust_decimal_macros::dec;
//!
//! let mut acc = Account::new(1, "cash", 42);
//! let after = acc.apply(dec!(1500)).unwrap();
//! let tx = Transaction::new(1, acc.id, dec!(1500))
//!     .with_balance_after(after)
//!     .with_expression("1000*1.5")
//!     .with_note("salary");
//!
//! assert_eq!(format_amount(tx.balance_after), "1’500");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod account;
pub mod format;
pub mod transaction;

pub use account::{normalize_name, Account, AccountId, ChatId};
pub use format::{format_amount, THOUSANDS_SEPARATOR};
pub use transaction::{Transaction, TransactionId, UserId};

// Re-export commonly used external types
pub use chrono::{DateTime, Utc};
pub use rust_decimal::Decimal;
