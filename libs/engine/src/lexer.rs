//! Expression lexer - tokenizes calculator input
//!
//! Converts a line of text into a lazy stream of tokens. Lexical errors are
//! reported as `TokenType::Error` tokens and turned into parse errors by the
//! parser.

use crate::token::{Token, TokenType};
use phf::phf_map;

/// Unicode vulgar fractions and the rationals they stand for.
static VULGAR_FRACTIONS: phf::Map<char, (i64, i64)> = phf_map! {
    '½' => (1, 2),
    '⅓' => (1, 3),
    '⅔' => (2, 3),
    '¼' => (1, 4),
    '¾' => (3, 4),
    '⅕' => (1, 5),
    '⅖' => (2, 5),
    '⅗' => (3, 5),
    '⅘' => (4, 5),
    '⅙' => (1, 6),
    '⅚' => (5, 6),
    '⅐' => (1, 7),
    '⅛' => (1, 8),
    '⅜' => (3, 8),
    '⅝' => (5, 8),
    '⅞' => (7, 8),
    '⅑' => (1, 9),
    '⅒' => (1, 10),
};

/// Numerator and denominator of a vulgar fraction glyph.
pub fn vulgar_fraction(glyph: char) -> Option<(i64, i64)> {
    VULGAR_FRACTIONS.get(&glyph).copied()
}

/// The glyph for `numer/denom`, if Unicode has one.
pub fn fraction_glyph(numer: i64, denom: i64) -> Option<char> {
    VULGAR_FRACTIONS
        .entries()
        .find(|(_, value)| **value == (numer, denom))
        .map(|(glyph, _)| *glyph)
}

/// Characters that form an identifier on their own.
fn is_standalone_glyph(c: char) -> bool {
    matches!(c, '√' | '°' | '∞')
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    (c.is_alphanumeric() && !is_superscript(c)) || c == '_' || c == '∞'
}

fn is_superscript(c: char) -> bool {
    matches!(c, '¹' | '²' | '³' | '⁰'..='⁹')
}

fn is_roman_digit(c: char) -> bool {
    matches!(c.to_ascii_uppercase(), 'I' | 'V' | 'X' | 'L' | 'C' | 'D' | 'M')
}

/// The expression lexer
#[derive(Clone)]
pub struct Lexer {
    chars: Vec<char>,
    position: usize,
    current_char: Option<char>,
}

impl Lexer {
    /// Create a new lexer for the given input
    pub fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let current_char = chars.first().copied();

        Self {
            chars,
            position: 0,
            current_char,
        }
    }

    /// Advance to the next character
    fn advance(&mut self) {
        self.position += 1;
        self.current_char = self.chars.get(self.position).copied();
    }

    /// Peek at the next character without advancing
    fn peek(&self) -> Option<char> {
        self.chars.get(self.position + 1).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.position + offset).copied()
    }

    /// Skip whitespace characters
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current_char {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Read an identifier
    fn read_identifier(&mut self) -> String {
        let start_pos = self.position;

        while let Some(c) = self.current_char {
            if is_identifier_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        self.chars[start_pos..self.position].iter().collect()
    }

    fn read_digits_while(&mut self, accept: impl Fn(char) -> bool) -> String {
        let start_pos = self.position;
        while let Some(c) = self.current_char {
            if accept(c) {
                self.advance();
            } else {
                break;
            }
        }
        self.chars[start_pos..self.position].iter().collect()
    }

    /// Read a decimal number: `12`, `1.5`, `1.`, `.5`, `6.02e23`, `1e-3`
    fn read_number(&mut self) -> (String, bool) {
        let start_pos = self.position;
        let mut is_float = false;

        self.read_digits_while(|c| c.is_ascii_digit());

        if self.current_char == Some('.') {
            is_float = true;
            self.advance();
            self.read_digits_while(|c| c.is_ascii_digit());
        }

        // Exponent only when digits follow, so `2e` stays `2 * e`.
        if matches!(self.current_char, Some('e' | 'E')) {
            let digit_at = match self.peek() {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if self.peek_at(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                for _ in 0..digit_at {
                    self.advance();
                }
                self.read_digits_while(|c| c.is_ascii_digit());
            }
        }

        let value: String = self.chars[start_pos..self.position].iter().collect();
        (value, is_float)
    }

    /// Read a prefixed literal after the leading `0`: `0x1F`, `0b1.01`, `0rXIV`
    fn read_prefixed_number(&mut self, position: usize) -> Token {
        let prefix = self.peek().map(|c| c.to_ascii_lowercase());
        let base = match prefix {
            Some('x') => 16,
            Some('o') => 8,
            Some('b') => 2,
            Some('r') => {
                self.advance(); // Skip '0'
                self.advance(); // Skip 'r'
                let digits = self.read_digits_while(is_roman_digit);
                if digits.is_empty() {
                    return Token::error("Expected roman numeral digits after '0r'".into(), position);
                }
                return Token::new(TokenType::RomanNumeral, digits.to_ascii_uppercase(), position);
            }
            _ => {
                self.advance();
                return Token::error("Expected a base prefix after '0'".into(), position);
            }
        };

        self.advance(); // Skip '0'
        self.advance(); // Skip prefix letter

        let accept = move |c: char| c.is_digit(base);
        let integer = self.read_digits_while(accept);
        if integer.is_empty() {
            return Token::error(
                format!("Expected base-{} digits after prefix", base),
                position,
            );
        }

        if self.current_char == Some('.') && self.peek().is_some_and(accept) {
            self.advance(); // Skip '.'
            let fraction = self.read_digits_while(accept);
            return Token::new(
                TokenType::FloatInBase(base),
                format!("{}.{}", integer, fraction).to_ascii_uppercase(),
                position,
            );
        }

        Token::new(
            TokenType::IntegerInBase(base),
            integer.to_ascii_uppercase(),
            position,
        )
    }

    fn single(&mut self, token_type: TokenType, value: &str, position: usize) -> Token {
        self.advance();
        Token::new(token_type, value.into(), position)
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let position = self.position;

        let Some(c) = self.current_char else {
            return Token::eof(position);
        };

        match c {
            '(' => self.single(TokenType::OpenParen, "(", position),
            ')' => self.single(TokenType::CloseParen, ")", position),
            '[' => self.single(TokenType::OpenBracket, "[", position),
            ']' => self.single(TokenType::CloseBracket, "]", position),
            ',' => self.single(TokenType::Comma, ",", position),
            ';' => self.single(TokenType::Semicolon, ";", position),
            '+' => self.single(TokenType::Plus, "+", position),
            '-' | '−' => self.single(TokenType::Minus, "-", position),
            '^' => self.single(TokenType::Power, "^", position),
            '!' => self.single(TokenType::Bang, "!", position),
            '=' => self.single(TokenType::Equal, "=", position),
            '·' | '×' | '⋅' => self.single(TokenType::Multiply, "*", position),
            '÷' => self.single(TokenType::Divide, "/", position),
            '*' => {
                if self.peek() == Some('*') {
                    self.advance();
                    self.single(TokenType::Power, "**", position)
                } else {
                    self.single(TokenType::Multiply, "*", position)
                }
            }
            '/' => {
                if self.peek() == Some('/') {
                    self.advance();
                    self.single(TokenType::IntegerDivide, "//", position)
                } else {
                    self.single(TokenType::Divide, "/", position)
                }
            }
            '0' if matches!(
                self.peek().map(|p| p.to_ascii_lowercase()),
                Some('x' | 'o' | 'b' | 'r')
            ) =>
            {
                self.read_prefixed_number(position)
            }
            c if c.is_ascii_digit() || (c == '.' && self.peek().is_some_and(|p| p.is_ascii_digit())) => {
                let (value, is_float) = self.read_number();
                let token_type = if is_float {
                    TokenType::Float
                } else {
                    TokenType::Integer
                };
                Token::new(token_type, value, position)
            }
            c if VULGAR_FRACTIONS.contains_key(&c) => {
                self.single(TokenType::UnicodeFraction, &c.to_string(), position)
            }
            c if scical_units::is_currency_glyph(c) => {
                self.single(TokenType::CurrencySymbol, &c.to_string(), position)
            }
            c if is_standalone_glyph(c) => {
                self.advance();
                // `∞` may be followed by letters only when it starts a name,
                // which never happens, so it always stands alone.
                Token::new(TokenType::Identifier, c.to_string(), position)
            }
            c if is_identifier_start(c) => {
                let ident = self.read_identifier();
                if ident == "to" {
                    Token::new(TokenType::To, ident, position)
                } else {
                    Token::new(TokenType::Identifier, ident, position)
                }
            }
            other => {
                self.advance();
                Token::error(format!("Unexpected character '{}'", other), position)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let done = matches!(token.token_type, TokenType::Eof | TokenType::Error);
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }

    fn types(input: &str) -> Vec<TokenType> {
        tokenize(input).into_iter().map(|t| t.token_type).collect()
    }

    #[test]
    fn test_numbers() {
        assert_eq!(types("42"), vec![TokenType::Integer, TokenType::Eof]);
        assert_eq!(types("1."), vec![TokenType::Float, TokenType::Eof]);
        assert_eq!(types("1e4"), vec![TokenType::Float, TokenType::Eof]);
        assert_eq!(types(".5"), vec![TokenType::Float, TokenType::Eof]);
        let tokens = tokenize("6.02e+23");
        assert_eq!(tokens[0].value, "6.02e+23");
    }

    #[test]
    fn test_exponent_needs_digits() {
        let tokens = tokenize("2e");
        assert_eq!(tokens[0].token_type, TokenType::Integer);
        assert_eq!(tokens[1].token_type, TokenType::Identifier);
        assert_eq!(tokens[1].value, "e");
    }

    #[test]
    fn test_prefixed_literals() {
        let tokens = tokenize("0xa.8");
        assert_eq!(tokens[0].token_type, TokenType::FloatInBase(16));
        assert_eq!(tokens[0].value, "A.8");

        let tokens = tokenize("0b101");
        assert_eq!(tokens[0].token_type, TokenType::IntegerInBase(2));
        assert_eq!(tokens[0].value, "101");

        let tokens = tokenize("0rxiv");
        assert_eq!(tokens[0].token_type, TokenType::RomanNumeral);
        assert_eq!(tokens[0].value, "XIV");

        assert_eq!(types("0x")[0], TokenType::Error);
        assert_eq!(types("0b2")[0], TokenType::Error);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            types("2**3^4 // 5 · 6 × 7 ÷ 8 − 9"),
            vec![
                TokenType::Integer,
                TokenType::Power,
                TokenType::Integer,
                TokenType::Power,
                TokenType::Integer,
                TokenType::IntegerDivide,
                TokenType::Integer,
                TokenType::Multiply,
                TokenType::Integer,
                TokenType::Multiply,
                TokenType::Integer,
                TokenType::Divide,
                TokenType::Integer,
                TokenType::Minus,
                TokenType::Integer,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_identifiers_and_glyphs() {
        let tokens = tokenize("√x ε₀ z∞ 30° €");
        assert_eq!(tokens[0].value, "√");
        assert_eq!(tokens[1].value, "x");
        assert_eq!(tokens[2].value, "ε₀");
        assert_eq!(tokens[3].value, "z∞");
        assert_eq!(tokens[4].token_type, TokenType::Integer);
        assert_eq!(tokens[5].value, "°");
        assert_eq!(tokens[6].token_type, TokenType::CurrencySymbol);
    }

    #[test]
    fn test_keyword_to() {
        assert_eq!(
            types("1 in to cm"),
            vec![
                TokenType::Integer,
                TokenType::Identifier,
                TokenType::To,
                TokenType::Identifier,
                TokenType::Eof
            ]
        );
        assert_eq!(types("tons")[0], TokenType::Identifier);
    }

    #[test]
    fn test_fractions() {
        let tokens = tokenize("¾");
        assert_eq!(tokens[0].token_type, TokenType::UnicodeFraction);
        assert_eq!(vulgar_fraction('¾'), Some((3, 4)));
        assert_eq!(fraction_glyph(1, 2), Some('½'));
        assert_eq!(fraction_glyph(2, 11), None);
    }

    #[test]
    fn test_unexpected_character() {
        let tokens = tokenize("1 # 2");
        assert_eq!(tokens[1].token_type, TokenType::Error);
        assert_eq!(tokens[1].position, 2);
    }
}
