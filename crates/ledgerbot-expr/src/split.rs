//! Splitting a message into an expression prefix and a comment.
//!
//! The splitter is a two-state automaton over a [`Scanner`]. It remembers the
//! end of the longest prefix that forms a complete expression with balanced
//! parentheses, and everything after that point becomes the comment.
//!
//! Parentheses nest at most [`MAX_DEPTH`] deep; an opening parenthesis past
//! that ends the expression like any other unexpected rune.
//!
//! Before scanning, commas are read as decimal points (`1,5` is `1.5`). The
//! substitution only affects what the automaton sees: the comment is cut from
//! the original text, so a comma typed as punctuation survives there.

use crate::error::SplitError;
use crate::parser::{rewrite_percent, MAX_DEPTH};
use crate::scanner::{is_digit, Scanner};

/// A message split into an expression and a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    /// The expression with postfix percent rewritten, ready for evaluation.
    pub expression: String,
    /// The expression as typed (after comma normalization), before rewriting.
    pub raw_expression: String,
    /// Trailing free text, possibly empty.
    pub comment: String,
}

/// Split `input` into the longest expression prefix and a trailing comment.
///
/// # Example
///
/// ```
/// use ledgerbot_expr::split_expression;
///
/// let split = split_expression("200*1,5 rent, june").unwrap();
/// assert_eq!(split.expression, "200*1.5");
/// assert_eq!(split.comment, "rent, june");
///
/// let split = split_expression("-(4+5)% tip").unwrap();
/// assert_eq!(split.expression, "-((4+5)/100)");
/// assert_eq!(split.raw_expression, "-(4+5)%");
/// ```
pub fn split_expression(input: &str) -> Result<Split, SplitError> {
    let original: Vec<char> = input.chars().collect();
    let normalized: Vec<char> = original
        .iter()
        .map(|&c| if c == ',' { '.' } else { c })
        .collect();

    let end = Splitter::new(&normalized)
        .run()
        .ok_or(SplitError::NoExpressionFound)?;

    let raw_expression = collect_trimmed(&normalized[..end]);
    let comment = collect_trimmed(&original[end..]);
    // Accepted prefixes always parse; fall back to the raw text regardless.
    let expression = rewrite_percent(&raw_expression).unwrap_or_else(|_| raw_expression.clone());

    Ok(Split {
        expression,
        raw_expression,
        comment,
    })
}

fn collect_trimmed(chars: &[char]) -> String {
    chars.iter().collect::<String>().trim().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectOperand,
    ExpectOperator,
}

struct Splitter<'a> {
    sc: Scanner<'a>,
    state: State,
    depth: usize,
    /// End (exclusive) of the last consumed operand, `%` or `)`.
    last_end: usize,
    /// End (exclusive) of the longest complete expression so far.
    accepted: Option<usize>,
}

impl<'a> Splitter<'a> {
    const fn new(chars: &'a [char]) -> Self {
        Self {
            sc: Scanner::new(chars),
            state: State::ExpectOperand,
            depth: 0,
            last_end: 0,
            accepted: None,
        }
    }

    fn run(mut self) -> Option<usize> {
        self.sc.skip_spaces();

        while let Some(c) = self.sc.current() {
            let moved = match self.state {
                State::ExpectOperand => self.operand(c),
                State::ExpectOperator => self.operator(c),
            };
            if !moved {
                break;
            }
            self.sc.skip_spaces();
        }

        self.mark();
        self.accepted
    }

    fn mark(&mut self) {
        if self.state == State::ExpectOperator && self.depth == 0 {
            self.accepted = Some(self.last_end);
        }
    }

    fn operand(&mut self, c: char) -> bool {
        match c {
            '+' | '-' => {
                if !self.sc.starts_operand(self.sc.pos() + 1) {
                    return false;
                }
                self.sc.advance();
                true
            }
            // An unmatched '(' never returns to depth 0, so nothing after it
            // is accepted.
            '(' => {
                if self.depth >= MAX_DEPTH {
                    return false;
                }
                self.sc.advance();
                self.depth += 1;
                true
            }
            c if is_digit(c) || c == '.' => {
                let Some(number) = self.sc.scan_number() else {
                    return false;
                };
                self.last_end = number.end;
                self.state = State::ExpectOperator;
                self.mark();
                true
            }
            _ => false,
        }
    }

    fn operator(&mut self, c: char) -> bool {
        match c {
            ')' => {
                if self.depth == 0 {
                    return false;
                }
                self.depth -= 1;
                self.sc.advance();
                self.last_end = self.sc.pos();
                self.mark();
                true
            }
            '%' => {
                let binary = self.sc.starts_unsigned_operand(self.sc.pos() + 1);
                self.sc.advance();
                if binary {
                    self.state = State::ExpectOperand;
                } else {
                    self.last_end = self.sc.pos();
                    self.mark();
                }
                true
            }
            '+' | '-' | '*' | '/' | '^' => {
                self.sc.advance();
                self.state = State::ExpectOperand;
                true
            }
            _ => false,
        }
    }
}
