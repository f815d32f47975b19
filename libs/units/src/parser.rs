//! Parser for the dotted unit definition syntax.
//!
//! ```text
//! expr     := term (('.' | '/') term)*
//! term     := (symbol | integer | '(' expr ')') exponent?
//! exponent := ('+' | '-')? digit+
//! ```
//!
//! A leading `/` is allowed and puts the first term into the denominator
//! (`/s` is the same as `s-1`).

use crate::ast::{Atom, Term, UnitExpr};
use crate::error::{Error, Result};

/// Parse a unit definition into its syntax tree.
pub fn parse(input: &str) -> Result<UnitExpr> {
    let mut parser = DefinitionParser::new(input);
    let expr = parser.parse_expr()?;
    if parser.current().is_some() {
        return Err(parser.syntax("unexpected trailing input"));
    }
    Ok(expr)
}

/// Check that `input` is syntactically valid.
pub fn validate(input: &str) -> Result<()> {
    parse(input).map(|_| ())
}

struct DefinitionParser {
    chars: Vec<char>,
    position: usize,
}

impl DefinitionParser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            position: 0,
        }
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn syntax(&self, message: &'static str) -> Error {
        Error::Syntax {
            pos: self.position,
            message,
        }
    }

    fn parse_expr(&mut self) -> Result<UnitExpr> {
        let mut expr = UnitExpr::one();

        let mut in_denominator = false;
        if self.current() == Some('/') {
            self.advance();
            in_denominator = true;
        }

        loop {
            let (term, exponent) = self.parse_term()?;
            if in_denominator {
                expr.denominator.push((term, exponent));
            } else {
                expr.numerator.push((term, exponent));
            }

            match self.current() {
                Some('.') => {
                    self.advance();
                    in_denominator = false;
                }
                Some('/') => {
                    self.advance();
                    in_denominator = true;
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    fn parse_term(&mut self) -> Result<(Term, i32)> {
        let term = match self.current() {
            Some('(') => {
                self.advance();
                let inner = self.parse_expr()?;
                if self.current() != Some(')') {
                    return Err(self.syntax("missing closing parenthesis"));
                }
                self.advance();
                Term::Group(Box::new(inner))
            }
            Some(c) if c.is_ascii_digit() => {
                let digits = self.read_digits();
                let value = digits
                    .parse::<u64>()
                    .map_err(|_| self.syntax("integer factor out of range"))?;
                // A bare integer never carries an exponent.
                return Ok((Term::Atom(Atom::Integer(value)), 1));
            }
            Some(c) if is_symbol_char(c) => {
                let start = self.position;
                while let Some(c) = self.current() {
                    if is_symbol_char(c) {
                        self.advance();
                    } else {
                        break;
                    }
                }
                Term::Atom(Atom::Symbol(self.chars[start..self.position].iter().collect()))
            }
            Some(_) => return Err(self.syntax("expected a unit symbol")),
            None => return Err(self.syntax("unexpected end of input")),
        };

        let exponent = self.parse_exponent()?;
        Ok((term, exponent))
    }

    fn parse_exponent(&mut self) -> Result<i32> {
        let negative = match self.current() {
            Some('-') => {
                self.advance();
                true
            }
            Some('+') => {
                self.advance();
                false
            }
            Some(c) if c.is_ascii_digit() => false,
            _ => return Ok(1),
        };

        if !self.current().is_some_and(|c| c.is_ascii_digit()) {
            return Err(self.syntax("expected exponent digits"));
        }
        let digits = self.read_digits();
        let value = digits
            .parse::<i32>()
            .map_err(|_| self.syntax("exponent out of range"))?;
        Ok(if negative { -value } else { value })
    }

    fn read_digits(&mut self) -> String {
        let start = self.position;
        while self.current().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        self.chars[start..self.position].iter().collect()
    }
}

fn is_symbol_char(c: char) -> bool {
    !c.is_ascii_digit() && !c.is_whitespace() && !matches!(c, '.' | '/' | '(' | ')' | '+' | '-')
}
