//! Decimal evaluation of expressions.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use std::str::FromStr;

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::EvalError;
use crate::parser::parse;

/// Something that turns rewritten expression text into a number.
pub trait Evaluator {
    /// Evaluate `expression`.
    fn evaluate(&self, expression: &str) -> Result<Decimal, EvalError>;
}

/// Evaluates with exact decimal arithmetic.
///
/// # Example
///
/// ```
/// use ledgerbot_expr::{DecimalEvaluator, Evaluator};
/// use rust_decimal_macros::dec;
///
/// let value = DecimalEvaluator.evaluate("200*(15/100)").unwrap();
/// assert_eq!(value, dec!(30));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalEvaluator;

impl Evaluator for DecimalEvaluator {
    fn evaluate(&self, expression: &str) -> Result<Decimal, EvalError> {
        let tree = parse(expression)?;
        tree.evaluate().map(|v| v.normalize())
    }
}

impl Expr {
    /// Compute the value of this tree.
    ///
    /// Postfix percent divides by 100 once per `%`; binary `%` is the
    /// remainder.
    pub fn evaluate(&self) -> Result<Decimal, EvalError> {
        match self {
            Self::Number(text) => parse_number(text),
            Self::Unary { op, operand } => {
                let value = operand.evaluate()?;
                Ok(match op {
                    UnaryOp::Plus => value,
                    UnaryOp::Neg => -value,
                })
            }
            Self::Group(inner) => inner.evaluate(),
            Self::Percent { operand, count } => {
                let mut value = operand.evaluate()?;
                for _ in 0..*count {
                    value = value
                        .checked_div(Decimal::ONE_HUNDRED)
                        .ok_or(EvalError::Overflow)?;
                }
                Ok(value)
            }
            Self::Binary { op, lhs, rhs } => {
                let lhs = lhs.evaluate()?;
                let rhs = rhs.evaluate()?;
                apply(*op, lhs, rhs)
            }
        }
    }
}

fn apply(op: BinaryOp, lhs: Decimal, rhs: Decimal) -> Result<Decimal, EvalError> {
    match op {
        BinaryOp::Add => lhs.checked_add(rhs).ok_or(EvalError::Overflow),
        BinaryOp::Sub => lhs.checked_sub(rhs).ok_or(EvalError::Overflow),
        BinaryOp::Mul => lhs.checked_mul(rhs).ok_or(EvalError::Overflow),
        BinaryOp::Div => {
            if rhs.is_zero() {
                return Err(EvalError::DivisionByZero);
            }
            lhs.checked_div(rhs).ok_or(EvalError::Overflow)
        }
        BinaryOp::Rem => {
            if rhs.is_zero() {
                return Err(EvalError::DivisionByZero);
            }
            lhs.checked_rem(rhs).ok_or(EvalError::Overflow)
        }
        BinaryOp::Pow => pow(lhs, rhs),
    }
}

/// Decimal places kept from a fractional power.
const POWER_SCALE: u32 = 20;

fn pow(base: Decimal, exponent: Decimal) -> Result<Decimal, EvalError> {
    if exponent.fract().is_zero() {
        let negative = exponent < Decimal::ZERO;
        if base.is_zero() && negative {
            return Err(EvalError::DivisionByZero);
        }
        return match exponent.to_i64().and_then(|n| base.checked_powi(n)) {
            Some(value) => Ok(value),
            // |base|^n past the decimal range means base^-n is below its precision.
            None if negative && base.abs() > Decimal::ONE => Ok(Decimal::ZERO),
            None => Err(EvalError::Overflow),
        };
    }

    // Fractional powers of negative numbers are not real.
    if base.is_sign_negative() && !base.is_zero() {
        return Err(EvalError::InvalidPower {
            base: base.to_string(),
            exponent: exponent.to_string(),
        });
    }
    base.checked_powd(exponent)
        .map(|value| value.round_dp(POWER_SCALE))
        .ok_or(EvalError::Overflow)
}

/// Parse a literal that may start or end with a bare point (`.5`, `3.`).
fn parse_number(text: &str) -> Result<Decimal, EvalError> {
    let body = text.strip_suffix('.').unwrap_or(text);
    let body = if body.starts_with('.') {
        format!("0{body}")
    } else {
        body.to_string()
    };
    Decimal::from_str(&body).map_err(|_| EvalError::InvalidNumber(text.to_string()))
}
