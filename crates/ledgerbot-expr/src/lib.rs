//! Expression handling for ledgerbot messages.
//!
//! A ledger message such as `200*1.5 rent for june` mixes arithmetic with
//! free text. This crate provides:
//!
//! - [`split_expression`] - find the longest complete expression prefix and
//!   cut the rest off as a comment
//! - [`rewrite_percent`] - turn postfix percent chains (`50%%`) into nested
//!   divisions by 100
//! - [`parse`] and [`Expr`] - the expression tree both of the above agree on
//! - [`Evaluator`] / [`DecimalEvaluator`] - compute a rewritten expression
//!
//! # Example
//!
//! ```
//! use ledgerbot_expr::{split_expression, DecimalEvaluator, Evaluator};
//! use rust_decimal_macros::dec;
//!
//! let split = split_expression("1000 - 15% lunch with Bob").unwrap();
//! assert_eq!(split.expression, "1000-(15/100)");
//! assert_eq!(split.comment, "lunch with Bob");
//!
//! let value = DecimalEvaluator.evaluate(&split.expression).unwrap();
//! assert_eq!(value, dec!(999.85));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod ast;
pub mod error;
pub mod eval;
pub mod parser;
pub mod scanner;
pub mod split;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use error::{EvalError, SplitError, SyntaxError, SyntaxErrorKind};
pub use eval::{DecimalEvaluator, Evaluator};
pub use parser::{parse, rewrite_percent, MAX_DEPTH, MAX_HEIGHT};
pub use scanner::Scanner;
pub use split::{split_expression, Split};

// Re-export commonly used external types
pub use rust_decimal::Decimal;
