//! Calculator parser - converts a line of input to an expression tree
//!
//! Recursive descent parser with one function per precedence level.
//! Precedence (lowest to highest):
//! 1. top level: `expr to unit`, `expr = expr`, or `expr`
//! 2. additive (+, -)
//! 3. multiplicative (*, /, //)
//! 4. signless multiplication (`2km`, `3 m^2`)
//! 5. sign (+, -), right-associative
//! 6. exponent (^, **), right-associative; the exponent may carry signs
//! 7. factorial (!), stackable
//! 8. function call
//! 9. primary (number, name, parenthesized expression, matrix)
//!
//! Signless multiplication binds tighter than `*` and `/`, so `2km/3h` is
//! `(2*km)/(3*h)` and `2km*3h/4s` is `((2*km)*(3*h))/(4*s)`. Each implicit
//! factor is a bare name, optionally raised to a power.
//!
//! Names are resolved against the [`Registry`] while parsing. The target of a
//! conversion is parsed with a smaller grammar that only admits units, the
//! literal `1`, parentheses, `*`, `/` and powers.

use crate::ast::{BinaryOperator, Node, UnaryOperator};
use crate::error::{Error, Result};
use crate::format::radix::{self, parse_roman};
use crate::lexer::{vulgar_fraction, Lexer};
use crate::numeric::float::LITERAL_PRECISION;
use crate::numeric::Value;
use crate::registry::{Binding, Registry};
use crate::token::{Token, TokenType};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Num, One};
use scical_units::rational_from_decimal;
use tracing::debug;

/// Parser for calculator input
pub struct Parser<'r> {
    lexer: Lexer,
    registry: &'r Registry,
    current_token: Token,
    /// One token of lookahead past `current_token`, lexed on demand
    peeked: Option<Token>,
    recursion_depth: usize,
    operator_count: usize,
}

const MAX_RECURSION_DEPTH: usize = 200;

/// Binary operators per input. Chains of `+`, `*` and implicit products
/// build left-deep trees, so this bounds the tree depth.
const MAX_OPERATORS: usize = 1000;

impl<'r> Parser<'r> {
    /// Create a new parser for the given input string
    pub fn new(input: &str, registry: &'r Registry) -> Self {
        let mut lexer = Lexer::new(input);
        let current_token = lexer.next_token();
        Self {
            lexer,
            registry,
            current_token,
            peeked: None,
            recursion_depth: 0,
            operator_count: 0,
        }
    }

    /// Advance to the next token
    fn advance(&mut self) -> Token {
        let next = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token(),
        };
        std::mem::replace(&mut self.current_token, next)
    }

    /// The type of the token after the current one, without consuming anything
    fn peek_token_type(&mut self) -> TokenType {
        let lexer = &mut self.lexer;
        self.peeked
            .get_or_insert_with(|| lexer.next_token())
            .token_type
    }

    /// Check if current token matches the given type
    fn current_token_is(&self, token_type: TokenType) -> bool {
        self.current_token.token_type == token_type
    }

    /// Check if current token is one of the given types
    fn current_token_is_one_of(&self, types: &[TokenType]) -> bool {
        types.contains(&self.current_token.token_type)
    }

    /// An error at the current token; lexical errors keep their own message.
    fn unexpected(&self, expected: &str) -> Error {
        let token = &self.current_token;
        match token.token_type {
            TokenType::Error => Error::parse(token.position, token.value.clone()),
            TokenType::Eof => Error::parse(
                token.position,
                format!("Expected {}, but reached end of input", expected),
            ),
            _ => Error::parse(
                token.position,
                format!("Expected {}, got '{}'", expected, token.value),
            ),
        }
    }

    /// Expect a specific token type and advance
    fn expect(&mut self, token_type: TokenType, description: &str) -> Result<Token> {
        if self.current_token_is(token_type) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(description))
        }
    }

    /// Check recursion depth and increment
    fn check_recursion_depth(&mut self) -> Result<()> {
        self.recursion_depth += 1;
        if self.recursion_depth > MAX_RECURSION_DEPTH {
            return Err(Error::parse(
                self.current_token.position,
                format!(
                    "Expression too deeply nested (max depth: {})",
                    MAX_RECURSION_DEPTH
                ),
            ));
        }
        Ok(())
    }

    /// Decrement recursion depth
    fn decrement_recursion_depth(&mut self) {
        self.recursion_depth -= 1;
    }

    /// Build a binary node, counting it against the operator limit
    fn binary(&mut self, operator: BinaryOperator, left: Node, right: Node) -> Result<Node> {
        self.operator_count += 1;
        if self.operator_count > MAX_OPERATORS {
            return Err(Error::parse(
                self.current_token.position,
                format!("Expression too long (max operators: {})", MAX_OPERATORS),
            ));
        }
        Ok(Node::binary(operator, left, right))
    }

    /// Parse the entire input (top-level entry point)
    pub fn parse(&mut self) -> Result<Node> {
        debug!("parsing expression");
        let expr = self.parse_expression()?;

        let node = match self.current_token.token_type {
            TokenType::To => {
                self.advance(); // Skip 'to'
                let target = self.parse_unit_expression()?;
                Node::Conversion {
                    expr: Box::new(expr),
                    target: Box::new(target),
                }
            }
            TokenType::Equal => {
                self.advance(); // Skip '='
                let rhs = self.parse_expression()?;
                Node::Equality {
                    lhs: Box::new(expr),
                    rhs: Box::new(rhs),
                }
            }
            _ => expr,
        };

        // Ensure we've consumed all input
        if !self.current_token_is(TokenType::Eof) {
            return Err(self.unexpected("end of input"));
        }

        debug!(tree = %node, "parsed expression");
        Ok(node)
    }

    /// Parse an expression (lowest precedence below the top level)
    fn parse_expression(&mut self) -> Result<Node> {
        self.check_recursion_depth()?;
        let expr = self.parse_additive_expression()?;
        self.decrement_recursion_depth();
        Ok(expr)
    }

    /// Parse additive expression: expression ('+' | '-') expression
    fn parse_additive_expression(&mut self) -> Result<Node> {
        let mut left = self.parse_multiplicative_expression()?;

        while self.current_token_is_one_of(&[TokenType::Plus, TokenType::Minus]) {
            let operator = match self.advance().token_type {
                TokenType::Plus => BinaryOperator::Add,
                _ => BinaryOperator::Sub,
            };
            let right = self.parse_multiplicative_expression()?;
            left = self.binary(operator, left, right)?;
        }

        Ok(left)
    }

    fn multiplicative_operator(&self) -> Option<BinaryOperator> {
        match self.current_token.token_type {
            TokenType::Multiply => Some(BinaryOperator::Mul),
            TokenType::Divide => Some(BinaryOperator::Div),
            TokenType::IntegerDivide => Some(BinaryOperator::IntDiv),
            _ => None,
        }
    }

    /// Parse multiplicative expression: expression ('*' | '/' | '//') expression
    fn parse_multiplicative_expression(&mut self) -> Result<Node> {
        let mut left = self.parse_signless_multiplication()?;

        while let Some(operator) = self.multiplicative_operator() {
            self.advance();
            let right = self.parse_signless_multiplication()?;
            left = self.binary(operator, left, right)?;
        }

        Ok(left)
    }

    /// Whether the current token starts an implicit factor: a name that is
    /// not the start of a function call.
    fn at_implicit_factor(&mut self) -> bool {
        match self.current_token.token_type {
            TokenType::CurrencySymbol => true,
            TokenType::Identifier => self.peek_token_type() != TokenType::OpenParen,
            _ => false,
        }
    }

    /// Parse signless multiplication: signed (name ('^' exponent)?)*
    fn parse_signless_multiplication(&mut self) -> Result<Node> {
        let mut left = self.parse_signed_expression()?;

        while self.at_implicit_factor() {
            let mut factor = self.parse_name()?;
            if self.current_token_is(TokenType::Power) {
                self.advance(); // Skip '^'
                let exponent = self.parse_exponent_operand()?;
                factor = self.binary(BinaryOperator::Pow, factor, exponent)?;
            }
            left = self.binary(BinaryOperator::Mul, left, factor)?;
        }

        Ok(left)
    }

    fn sign(&self) -> Option<UnaryOperator> {
        match self.current_token.token_type {
            TokenType::Plus => Some(UnaryOperator::Plus),
            TokenType::Minus => Some(UnaryOperator::Minus),
            _ => None,
        }
    }

    /// Parse signed expression: ('+' | '-') signed | exponent
    fn parse_signed_expression(&mut self) -> Result<Node> {
        let Some(operator) = self.sign() else {
            return self.parse_exponent_expression();
        };
        self.advance();
        self.check_recursion_depth()?;
        let operand = self.parse_signed_expression()?;
        self.decrement_recursion_depth();
        Ok(Node::unary(operator, operand))
    }

    /// Parse exponent expression: postfix ('^' exponent)?
    fn parse_exponent_expression(&mut self) -> Result<Node> {
        let base = self.parse_postfix_expression()?;

        if self.current_token_is(TokenType::Power) {
            self.advance(); // Skip '^'
            let exponent = self.parse_exponent_operand()?;
            return self.binary(BinaryOperator::Pow, base, exponent);
        }

        Ok(base)
    }

    /// The right side of '^': leading signs fold into one before the
    /// (right-associative) exponent expression.
    fn parse_exponent_operand(&mut self) -> Result<Node> {
        let mut negative = false;
        while let Some(operator) = self.sign() {
            negative ^= operator == UnaryOperator::Minus;
            self.advance();
        }

        self.check_recursion_depth()?;
        let exponent = self.parse_exponent_expression()?;
        self.decrement_recursion_depth();

        Ok(if negative {
            Node::unary(UnaryOperator::Minus, exponent)
        } else {
            exponent
        })
    }

    /// Parse postfix expression: call ('!')*
    fn parse_postfix_expression(&mut self) -> Result<Node> {
        let mut operand = self.parse_call_expression()?;

        while self.current_token_is(TokenType::Bang) {
            self.advance(); // Skip '!'
            operand = Node::factorial(operand);
        }

        Ok(operand)
    }

    /// Parse function call: identifier '(' expression (',' expression)* ')'
    fn parse_call_expression(&mut self) -> Result<Node> {
        if !(self.current_token_is(TokenType::Identifier)
            && self.peek_token_type() == TokenType::OpenParen)
        {
            return self.parse_primary();
        }

        let name_token = self.advance();
        let name = name_token.value;
        if self.registry.function(&name).is_none() {
            return Err(Error::UnknownFunction(name));
        }
        self.advance(); // Skip '('

        let mut args = Vec::new();
        if !self.current_token_is(TokenType::CloseParen) {
            args.push(self.parse_expression()?);
            while self.current_token_is(TokenType::Comma) {
                self.advance(); // Skip ','
                args.push(self.parse_expression()?);
            }
        }
        self.expect(TokenType::CloseParen, "')' after function arguments")?;

        let function = self.registry.functions().validate_args(&name, args.len())?;
        Ok(Node::Call {
            name,
            function,
            args,
        })
    }

    /// Parse a bare name: constant, variable or unit
    fn parse_name(&mut self) -> Result<Node> {
        let token = self.advance();
        let binding = match token.token_type {
            TokenType::CurrencySymbol => {
                let glyph = token.value.chars().next().unwrap_or_default();
                Binding::Unit(self.registry.resolve_currency(glyph)?)
            }
            _ => self.registry.resolve_name(&token.value)?,
        };
        Ok(Node::Name {
            name: token.value,
            binding,
        })
    }

    /// Parse primary: number | name | '(' expression ')' | matrix
    fn parse_primary(&mut self) -> Result<Node> {
        match self.current_token.token_type {
            t if t.is_literal() => {
                let token = self.advance();
                parse_number(&token)
            }
            TokenType::Identifier | TokenType::CurrencySymbol => self.parse_name(),
            TokenType::OpenParen => {
                self.advance(); // Skip '('
                let expr = self.parse_expression()?;
                self.expect(TokenType::CloseParen, "')'")?;
                Ok(expr)
            }
            TokenType::OpenBracket => self.parse_matrix(),
            _ => Err(self.unexpected("a number, name or '('")),
        }
    }

    /// Parse matrix: '[' (row (';' row)*)? ']' with row: expression (',' expression)*
    fn parse_matrix(&mut self) -> Result<Node> {
        self.advance(); // Skip '['
        let mut rows = Vec::new();

        if !self.current_token_is(TokenType::CloseBracket) {
            loop {
                let mut row = vec![self.parse_expression()?];
                while self.current_token_is(TokenType::Comma) {
                    self.advance(); // Skip ','
                    row.push(self.parse_expression()?);
                }
                rows.push(row);
                if !self.current_token_is(TokenType::Semicolon) {
                    break;
                }
                self.advance(); // Skip ';'
            }
        }

        self.expect(TokenType::CloseBracket, "']' to close the matrix")?;
        Node::matrix(rows)
    }

    // ============================================
    // Unit expressions (conversion targets)
    // ============================================

    /// Parse unit expression: unit_signed (('*' | '/') unit_signed)*
    fn parse_unit_expression(&mut self) -> Result<Node> {
        self.check_recursion_depth()?;
        let mut left = self.parse_unit_signed()?;

        while self.current_token_is_one_of(&[TokenType::Multiply, TokenType::Divide]) {
            let operator = match self.advance().token_type {
                TokenType::Multiply => BinaryOperator::Mul,
                _ => BinaryOperator::Div,
            };
            let right = self.parse_unit_signed()?;
            left = self.binary(operator, left, right)?;
        }

        self.decrement_recursion_depth();
        Ok(left)
    }

    fn parse_unit_signed(&mut self) -> Result<Node> {
        let Some(operator) = self.sign() else {
            return self.parse_unit_power();
        };
        self.advance();
        self.check_recursion_depth()?;
        let operand = self.parse_unit_signed()?;
        self.decrement_recursion_depth();
        Ok(Node::unary(operator, operand))
    }

    /// Parse unit power: unit_term ('^' exponent)?
    fn parse_unit_power(&mut self) -> Result<Node> {
        let base = self.parse_unit_term()?;

        if self.current_token_is(TokenType::Power) {
            self.advance(); // Skip '^'
            let exponent = self.parse_exponent_operand()?;
            return self.binary(BinaryOperator::Pow, base, exponent);
        }

        Ok(base)
    }

    /// Parse unit term: unit | '1' | '(' unit_expression ')'
    fn parse_unit_term(&mut self) -> Result<Node> {
        match self.current_token.token_type {
            TokenType::Identifier => {
                let token = self.advance();
                let unit = self.registry.resolve_unit(&token.value)?;
                Ok(Node::Name {
                    name: token.value,
                    binding: Binding::Unit(unit),
                })
            }
            TokenType::CurrencySymbol => self.parse_name(),
            TokenType::Integer if self.current_token.value == "1" => {
                self.advance();
                Ok(Node::literal(Value::one()))
            }
            TokenType::OpenParen => {
                self.advance(); // Skip '('
                let expr = self.parse_unit_expression()?;
                self.expect(TokenType::CloseParen, "')'")?;
                Ok(expr)
            }
            _ => Err(self.unexpected("a unit")),
        }
    }
}

fn invalid_number(token: &Token) -> Error {
    Error::parse(token.position, format!("Invalid number '{}'", token.value))
}

/// Convert a literal token to a literal node.
fn parse_number(token: &Token) -> Result<Node> {
    let text = &token.value;
    let (value, source) = match token.token_type {
        TokenType::Integer => {
            let n = BigInt::from_str_radix(text, 10).map_err(|_| invalid_number(token))?;
            (Value::Integer(n), text.clone())
        }
        TokenType::Float => {
            let value = rational_from_decimal(text).ok_or_else(|| invalid_number(token))?;
            (Value::float(value, LITERAL_PRECISION), text.clone())
        }
        TokenType::IntegerInBase(base) => {
            let n = BigInt::from_str_radix(text, base).map_err(|_| invalid_number(token))?;
            (Value::Integer(n), format!("{}{}", radix::prefix(base), text))
        }
        TokenType::FloatInBase(base) => {
            let value = based_fraction(text, base).ok_or_else(|| invalid_number(token))?;
            (
                Value::float(value, LITERAL_PRECISION),
                format!("{}{}", radix::prefix(base), text),
            )
        }
        TokenType::RomanNumeral => {
            let n = parse_roman(text).ok_or_else(|| {
                Error::parse(token.position, format!("Invalid roman numeral '{}'", text))
            })?;
            (Value::integer(n), format!("0r{}", text))
        }
        TokenType::UnicodeFraction => {
            let (numer, denom) = text
                .chars()
                .next()
                .and_then(vulgar_fraction)
                .ok_or_else(|| invalid_number(token))?;
            (Value::fraction(numer, denom), text.clone())
        }
        _ => return Err(invalid_number(token)),
    };
    Ok(Node::Literal {
        value,
        text: source,
    })
}

/// `int.frac` in `base`, with the fraction digits read as base-`base` places.
fn based_fraction(text: &str, base: u32) -> Option<BigRational> {
    let (int_part, frac_part) = text.split_once('.')?;
    let mut value = BigRational::from_integer(BigInt::from_str_radix(int_part, base).ok()?);
    let step = BigRational::from_integer(BigInt::from(base));
    let mut place = BigRational::one();
    for c in frac_part.chars() {
        let digit = c.to_digit(base)?;
        place /= step.clone();
        value += place.clone() * BigRational::from_integer(BigInt::from(digit));
    }
    Some(value)
}
