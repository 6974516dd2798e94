//! Recursive-descent parser for accepted expressions, and percent rewriting.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '%') unary)*      -- '%' only when binary
//! unary   := ('+' | '-') unary | power
//! power   := postfix ('^' unary)?
//! postfix := primary '%'*                          -- postfix chain
//! primary := number | '(' expr ')'
//! ```
//!
//! `%` is binary exactly when the splitter would treat it as binary: the next
//! non-space rune is a digit, `.` or `(`.
//!
//! A postfix chain directly before `)` belongs to the whole group. The parser
//! keeps one pending counter per open group; such a chain is added to the
//! counter instead of wrapping its operand, and the counter is applied to the
//! group when its `)` is read. `((123+2)%%)` therefore parses as two percents
//! on the outer group.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::scanner::{is_digit, Scanner};

/// Deepest parenthesis nesting accepted by the splitter and the parser.
pub const MAX_DEPTH: usize = 64;

/// Tallest tree the parser builds.
///
/// Long operator chains and runs of signs count towards the height as well
/// as groups, so walking any parsed tree recursively stays shallow.
pub const MAX_HEIGHT: usize = 256;

/// Parse an expression into a tree.
///
/// Whitespace between tokens is ignored. Trailing input is an error, and so
/// is nesting past [`MAX_DEPTH`] groups or a tree taller than [`MAX_HEIGHT`].
pub fn parse(input: &str) -> Result<Expr, SyntaxError> {
    let chars: Vec<char> = input.chars().collect();
    let mut parser = Parser::new(&chars);
    let node = parser.expr()?;

    parser.sc.skip_spaces();
    match parser.sc.current() {
        None => Ok(node.expr),
        Some(c) => Err(parser.error(SyntaxErrorKind::UnexpectedChar(c))),
    }
}

/// Rewrite postfix percent chains into nested divisions by 100.
///
/// Text without any `%` is returned unchanged. Otherwise the expression is
/// parsed and rendered compactly.
///
/// ```
/// use ledgerbot_expr::rewrite_percent;
///
/// assert_eq!(rewrite_percent("200%%").unwrap(), "((200/100)/100)");
/// assert_eq!(rewrite_percent("( 1 + 2 ) * 3").unwrap(), "( 1 + 2 ) * 3");
/// assert_eq!(rewrite_percent("10%3").unwrap(), "10%3");
/// ```
pub fn rewrite_percent(expr: &str) -> Result<String, SyntaxError> {
    if !expr.contains('%') {
        return Ok(expr.to_string());
    }
    parse(expr).map(|tree| tree.to_string())
}

/// A subtree and its height.
struct Node {
    expr: Expr,
    height: usize,
}

impl Node {
    const fn leaf(expr: Expr) -> Self {
        Self { expr, height: 1 }
    }
}

struct Parser<'a> {
    chars: &'a [char],
    sc: Scanner<'a>,
    /// Pending percent count per open group; index 0 is the top level.
    pending: Vec<u32>,
    /// Open recursive descents (groups, sign operands, exponents).
    nesting: usize,
}

impl<'a> Parser<'a> {
    fn new(chars: &'a [char]) -> Self {
        Self {
            chars,
            sc: Scanner::new(chars),
            pending: vec![0],
            nesting: 0,
        }
    }

    fn depth(&self) -> usize {
        self.pending.len() - 1
    }

    fn error(&self, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError::new(kind, self.sc.pos())
    }

    fn peek(&mut self) -> Option<char> {
        self.sc.skip_spaces();
        self.sc.current()
    }

    /// Run `parse` one level deeper, refusing to go past [`MAX_HEIGHT`].
    fn descend(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<Node, SyntaxError>,
    ) -> Result<Node, SyntaxError> {
        if self.nesting >= MAX_HEIGHT {
            return Err(self.error(SyntaxErrorKind::TooDeep));
        }
        self.nesting += 1;
        let node = parse(self);
        self.nesting -= 1;
        node
    }

    /// Wrap `expr` whose tallest child is `child_height` high.
    fn node(&self, expr: Expr, child_height: usize) -> Result<Node, SyntaxError> {
        let height = child_height + 1;
        if height > MAX_HEIGHT {
            return Err(self.error(SyntaxErrorKind::TooDeep));
        }
        Ok(Node { expr, height })
    }

    fn binary(&self, op: BinaryOp, lhs: Node, rhs: Node) -> Result<Node, SyntaxError> {
        let height = lhs.height.max(rhs.height);
        self.node(Expr::binary(op, lhs.expr, rhs.expr), height)
    }

    fn percent(&self, operand: Node, count: u32) -> Result<Node, SyntaxError> {
        if count == 0 {
            return Ok(operand);
        }
        self.node(Expr::percent(operand.expr, count), operand.height)
    }

    fn expr(&mut self) -> Result<Node, SyntaxError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some('+') => BinaryOp::Add,
                Some('-') => BinaryOp::Sub,
                _ => break,
            };
            self.sc.advance();
            let rhs = self.term()?;
            lhs = self.binary(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Node, SyntaxError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some('*') => BinaryOp::Mul,
                Some('/') => BinaryOp::Div,
                Some('%') if self.sc.starts_unsigned_operand(self.sc.pos() + 1) => BinaryOp::Rem,
                _ => break,
            };
            self.sc.advance();
            let rhs = self.unary()?;
            lhs = self.binary(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Node, SyntaxError> {
        let op = match self.peek() {
            Some('+') => UnaryOp::Plus,
            Some('-') => UnaryOp::Neg,
            _ => return self.power(),
        };
        self.sc.advance();
        let operand = self.descend(Self::unary)?;
        self.node(Expr::unary(op, operand.expr), operand.height)
    }

    fn power(&mut self) -> Result<Node, SyntaxError> {
        let base = self.postfix()?;
        if self.peek() != Some('^') {
            return Ok(base);
        }
        self.sc.advance();
        let exponent = self.descend(Self::unary)?;
        self.binary(BinaryOp::Pow, base, exponent)
    }

    fn postfix(&mut self) -> Result<Node, SyntaxError> {
        let operand = self.primary()?;

        let mut count = 0;
        while self.peek() == Some('%') && !self.sc.starts_unsigned_operand(self.sc.pos() + 1) {
            self.sc.advance();
            count += 1;
        }
        if count == 0 {
            return Ok(operand);
        }

        if self.depth() > 0 && self.peek() == Some(')') {
            if let Some(pending) = self.pending.last_mut() {
                *pending += count;
            }
            return Ok(operand);
        }
        self.percent(operand, count)
    }

    fn primary(&mut self) -> Result<Node, SyntaxError> {
        match self.peek() {
            Some('(') => {
                if self.depth() >= MAX_DEPTH {
                    return Err(self.error(SyntaxErrorKind::TooDeep));
                }
                let open = self.sc.pos();
                self.sc.advance();
                self.pending.push(0);
                let inner = self.descend(Self::expr)?;

                match self.peek() {
                    Some(')') => self.sc.advance(),
                    Some(c) => return Err(self.error(SyntaxErrorKind::UnexpectedChar(c))),
                    None => return Err(SyntaxError::new(SyntaxErrorKind::UnclosedParen, open)),
                }
                let count = self.pending.pop().unwrap_or(0);
                let group = self.node(Expr::group(inner.expr), inner.height)?;
                self.percent(group, count)
            }
            Some(c) if is_digit(c) || c == '.' => match self.sc.scan_number() {
                Some(range) => Ok(Node::leaf(Expr::number(
                    self.chars[range].iter().collect::<String>(),
                ))),
                None => Err(self.error(SyntaxErrorKind::UnexpectedChar(c))),
            },
            Some(c) => Err(self.error(SyntaxErrorKind::UnexpectedChar(c))),
            None => Err(self.error(SyntaxErrorKind::UnexpectedEof)),
        }
    }
}
