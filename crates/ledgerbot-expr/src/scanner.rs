//! Rune-indexed cursor with lookahead and rewindable sub-scans.
//!
//! The [`Scanner`] works on a slice of `char`s so that every position is a
//! rune index. Comment slicing in the splitter relies on that: the normalized
//! text and the original text have the same length in runes.

use std::ops::Range;

/// Whether `c` is an ASCII decimal digit.
///
/// Non-ASCII digits are left to the comment.
#[inline]
pub const fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Whether `c` can be the first rune of an unsigned operand.
#[inline]
pub const fn is_operand_start(c: char) -> bool {
    is_digit(c) || c == '.' || c == '('
}

/// A cursor over a rune slice.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    chars: &'a [char],
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a scanner positioned at the first rune.
    pub const fn new(chars: &'a [char]) -> Self {
        Self { chars, pos: 0 }
    }

    /// Current rune index.
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// Whether the cursor is past the last rune.
    pub const fn is_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// The rune under the cursor, or `None` at end of input.
    pub fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Move one rune forward.
    pub fn advance(&mut self) {
        if !self.is_eof() {
            self.pos += 1;
        }
    }

    /// Skip whitespace under the cursor.
    pub fn skip_spaces(&mut self) {
        while self.current().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    /// Return the first non-space rune at or after `from`, with its index.
    pub fn peek_non_space_from(&self, from: usize) -> Option<(char, usize)> {
        self.chars
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, c)| !c.is_whitespace())
            .map(|(i, &c)| (c, i))
    }

    /// Whether an unsigned operand (digit, `.` or `(`) starts at or after
    /// `from`, ignoring whitespace.
    ///
    /// This is the lookahead that decides whether `%` is binary modulo.
    pub fn starts_unsigned_operand(&self, from: usize) -> bool {
        self.peek_non_space_from(from)
            .is_some_and(|(c, _)| is_operand_start(c))
    }

    /// Whether an operand starts at or after `from`, allowing one leading sign.
    pub fn starts_operand(&self, from: usize) -> bool {
        match self.peek_non_space_from(from) {
            Some((c, _)) if is_operand_start(c) => true,
            Some(('+' | '-', i)) => self.starts_unsigned_operand(i + 1),
            _ => false,
        }
    }

    /// Scan a number literal.
    ///
    /// Consumes digits and at most one decimal point. A point is taken only
    /// when the rune right before or right after it is a digit. Returns the
    /// scanned range, or `None` without moving if no digit was seen.
    pub fn scan_number(&mut self) -> Option<Range<usize>> {
        let start = self.pos;
        let mut seen_digit = false;
        let mut seen_dot = false;

        while let Some(c) = self.current() {
            if is_digit(c) {
                seen_digit = true;
                self.pos += 1;
            } else if c == '.' && !seen_dot && self.dot_touches_digit(start) {
                seen_dot = true;
                self.pos += 1;
            } else {
                break;
            }
        }

        if seen_digit {
            Some(start..self.pos)
        } else {
            self.pos = start;
            None
        }
    }

    fn dot_touches_digit(&self, start: usize) -> bool {
        let before = self.pos > start && is_digit(self.chars[self.pos - 1]);
        let after = self.chars.get(self.pos + 1).copied().is_some_and(is_digit);
        before || after
    }

    /// Scan from an opening `(` through its matching `)`.
    ///
    /// Returns the range including both parentheses. On failure (not at `(`,
    /// or input ends before the depth returns to zero) the cursor is left
    /// where it was.
    pub fn scan_balanced_parens(&mut self) -> Option<Range<usize>> {
        if self.current() != Some('(') {
            return None;
        }
        let start = self.pos;
        let mut depth = 0usize;

        while let Some(c) = self.current() {
            self.pos += 1;
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(start..self.pos);
                    }
                }
                _ => {}
            }
        }

        self.pos = start;
        None
    }

    /// Run `scan` and always restore the cursor afterwards.
    pub fn probe<T>(&mut self, scan: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.pos;
        let result = scan(self);
        self.pos = saved;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_current_and_advance() {
        let input = chars("ab");
        let mut sc = Scanner::new(&input);
        assert_eq!(sc.current(), Some('a'));
        sc.advance();
        assert_eq!(sc.current(), Some('b'));
        sc.advance();
        assert!(sc.is_eof());
        assert_eq!(sc.current(), None);
        sc.advance();
        assert_eq!(sc.pos(), 2);
    }

    #[test]
    fn test_skip_spaces() {
        let input = chars(" \t\n x");
        let mut sc = Scanner::new(&input);
        sc.skip_spaces();
        assert_eq!(sc.current(), Some('x'));
    }

    #[test]
    fn test_peek_non_space_from() {
        let input = chars("1   +");
        let sc = Scanner::new(&input);
        assert_eq!(sc.peek_non_space_from(1), Some(('+', 4)));
        assert_eq!(sc.peek_non_space_from(5), None);
    }

    #[test]
    fn test_scan_integer() {
        let input = chars("123+");
        let mut sc = Scanner::new(&input);
        assert_eq!(sc.scan_number(), Some(0..3));
        assert_eq!(sc.current(), Some('+'));
    }

    #[test]
    fn test_scan_leading_and_trailing_dot() {
        let input = chars(".5");
        let mut sc = Scanner::new(&input);
        assert_eq!(sc.scan_number(), Some(0..2));

        let input = chars("3. .x");
        let mut sc = Scanner::new(&input);
        assert_eq!(sc.scan_number(), Some(0..2));
        assert_eq!(sc.current(), Some(' '));
    }

    #[test]
    fn test_scan_number_stops_at_second_dot() {
        let input = chars("3..14");
        let mut sc = Scanner::new(&input);
        assert_eq!(sc.scan_number(), Some(0..2));
        assert_eq!(sc.current(), Some('.'));
    }

    #[test]
    fn test_scan_number_rejects_bare_dot() {
        let input = chars(". 5");
        let mut sc = Scanner::new(&input);
        assert_eq!(sc.scan_number(), None);
        assert_eq!(sc.pos(), 0);
    }

    #[test]
    fn test_scan_balanced_parens() {
        let input = chars("((1)+2) tail");
        let mut sc = Scanner::new(&input);
        assert_eq!(sc.scan_balanced_parens(), Some(0..7));
        assert_eq!(sc.current(), Some(' '));
    }

    #[test]
    fn test_scan_unbalanced_parens_rewinds() {
        let input = chars("((1+2)");
        let mut sc = Scanner::new(&input);
        assert_eq!(sc.scan_balanced_parens(), None);
        assert_eq!(sc.pos(), 0);
    }

    #[test]
    fn test_probe_restores_cursor() {
        let input = chars("(1)");
        let mut sc = Scanner::new(&input);
        assert!(sc.probe(|s| s.scan_balanced_parens().is_some()));
        assert_eq!(sc.pos(), 0);
    }

    #[test]
    fn test_starts_operand() {
        let input = chars("% - 5");
        let sc = Scanner::new(&input);
        assert!(sc.starts_operand(1));
        assert!(!sc.starts_unsigned_operand(1));

        let input = chars("- x");
        let sc = Scanner::new(&input);
        assert!(!sc.starts_operand(0));
    }
}
