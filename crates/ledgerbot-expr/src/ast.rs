//! Expression tree.
//!
//! Rendering an [`Expr`] with [`Display`](fmt::Display) produces compact text
//! (no whitespace) in which every postfix percent chain has been replaced by
//! nested divisions: `Percent { operand: 50, count: 2 }` renders as
//! `((50/100)/100)`.

use std::fmt;

/// A unary sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `+x`
    Plus,
    /// `-x`
    Neg,
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%` between two operands (remainder).
    Rem,
    /// `^`, right associative.
    Pow,
}

impl BinaryOp {
    /// The operator as written.
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Rem => '%',
            Self::Pow => '^',
        }
    }
}

/// An arithmetic expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A number literal, kept as typed (`.5`, `3.`, `042`).
    Number(String),
    /// A signed operand.
    Unary {
        /// The sign.
        op: UnaryOp,
        /// The operand.
        operand: Box<Expr>,
    },
    /// A binary operation.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// An operand followed by `count` postfix percent signs.
    Percent {
        /// The operand the chain applies to.
        operand: Box<Expr>,
        /// Length of the chain (at least 1).
        count: u32,
    },
    /// A parenthesized sub-expression.
    Group(Box<Expr>),
}

impl Expr {
    /// Create a number literal.
    pub fn number(text: impl Into<String>) -> Self {
        Self::Number(text.into())
    }

    /// Create a unary expression.
    pub fn unary(op: UnaryOp, operand: Self) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Create a binary expression.
    pub fn binary(op: BinaryOp, lhs: Self, rhs: Self) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Apply a postfix percent chain of length `count`.
    ///
    /// A count of zero returns the operand unchanged.
    pub fn percent(operand: Self, count: u32) -> Self {
        if count == 0 {
            return operand;
        }
        Self::Percent {
            operand: Box::new(operand),
            count,
        }
    }

    /// Wrap in parentheses.
    pub fn group(inner: Self) -> Self {
        Self::Group(Box::new(inner))
    }

    /// Whether the tree contains a postfix percent anywhere.
    pub fn has_percent(&self) -> bool {
        match self {
            Self::Number(_) => false,
            Self::Percent { .. } => true,
            Self::Unary { operand, .. } | Self::Group(operand) => operand.has_percent(),
            Self::Binary { lhs, rhs, .. } => lhs.has_percent() || rhs.has_percent(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(text) => f.write_str(text),
            Self::Unary { op, operand } => match op {
                UnaryOp::Plus => write!(f, "+{operand}"),
                UnaryOp::Neg => write!(f, "-{operand}"),
            },
            Self::Binary { op, lhs, rhs } => write!(f, "{lhs}{}{rhs}", op.symbol()),
            Self::Percent { operand, count } => {
                for _ in 0..*count {
                    f.write_str("(")?;
                }
                write!(f, "{operand}")?;
                for _ in 0..*count {
                    f.write_str("/100)")?;
                }
                Ok(())
            }
            Self::Group(inner) => write!(f, "({inner})"),
        }
    }
}
