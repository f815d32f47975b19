//! Token types for the expression lexer
//!
//! Tokens represent the lexical elements of calculator input.

/// Token types for the expression lexer
#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum TokenType {
    // Literals
    Integer,
    Float,
    IntegerInBase(u32),
    FloatInBase(u32),
    RomanNumeral,
    UnicodeFraction,

    // Names
    Identifier,
    CurrencySymbol,

    // Keywords
    To, // to

    // Operators
    Plus,           // +
    Minus,          // - or U+2212
    Multiply,       // * · ×
    Divide,         // / ÷
    IntegerDivide,  // //
    Power,          // ^ **
    Bang,           // !
    Equal,          // =

    // Delimiters
    OpenParen,    // (
    CloseParen,   // )
    OpenBracket,  // [
    CloseBracket, // ]
    Comma,        // ,
    Semicolon,    // ;

    // End of input
    Eof,

    // Error
    Error, // For lexical errors
}

impl TokenType {
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenType::Integer
                | TokenType::Float
                | TokenType::IntegerInBase(_)
                | TokenType::FloatInBase(_)
                | TokenType::RomanNumeral
                | TokenType::UnicodeFraction
        )
    }

    pub fn is_operator(self) -> bool {
        matches!(
            self,
            TokenType::Plus
                | TokenType::Minus
                | TokenType::Multiply
                | TokenType::Divide
                | TokenType::IntegerDivide
                | TokenType::Power
                | TokenType::Bang
                | TokenType::Equal
        )
    }

    pub fn is_punctuation(self) -> bool {
        matches!(
            self,
            TokenType::OpenParen
                | TokenType::CloseParen
                | TokenType::OpenBracket
                | TokenType::CloseBracket
                | TokenType::Comma
                | TokenType::Semicolon
        )
    }
}

/// A token in the input line
///
/// `value` holds the lexeme; for based literals the prefix is stripped and
/// for roman numerals it is upper-cased. `position` is a character offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub value: String,
    pub position: usize,
}

impl Token {
    pub fn new(token_type: TokenType, value: String, position: usize) -> Self {
        Self {
            token_type,
            value,
            position,
        }
    }

    pub fn eof(position: usize) -> Self {
        Self {
            token_type: TokenType::Eof,
            value: String::new(),
            position,
        }
    }

    pub fn error(message: String, position: usize) -> Self {
        Self {
            token_type: TokenType::Error,
            value: message,
            position,
        }
    }
}
