//! Error types for splitting, parsing and evaluating expressions.

use thiserror::Error;

/// Error returned when a message does not start with an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// No complete, balanced expression prefix exists in the input.
    #[error("no valid math expression found")]
    NoExpressionFound,
}

/// Error returned when expression text cannot be parsed into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at position {position}: {kind}")]
pub struct SyntaxError {
    /// The kind of error.
    pub kind: SyntaxErrorKind,
    /// Rune index in the input where the error occurred.
    pub position: usize,
}

impl SyntaxError {
    /// Create a new syntax error.
    pub const fn new(kind: SyntaxErrorKind, position: usize) -> Self {
        Self { kind, position }
    }
}

/// The kind of syntax error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    /// Input ended where an operand was expected.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// A character that cannot start or continue an expression.
    #[error("unexpected '{0}'")]
    UnexpectedChar(char),
    /// A group was opened but never closed.
    #[error("unclosed parenthesis")]
    UnclosedParen,
    /// Groups, signs or operators nest deeper than the parser allows.
    #[error("expression is nested too deeply")]
    TooDeep,
}

/// Error returned by an [`Evaluator`](crate::Evaluator).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The expression is malformed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// A number literal does not fit a decimal.
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    /// Division or remainder by zero.
    #[error("division by zero")]
    DivisionByZero,
    /// The result does not fit a decimal.
    #[error("arithmetic overflow")]
    Overflow,
    /// A power that has no real decimal result.
    #[error("cannot raise {base} to the power {exponent}")]
    InvalidPower {
        /// The base, as rendered.
        base: String,
        /// The exponent, as rendered.
        exponent: String,
    },
}
