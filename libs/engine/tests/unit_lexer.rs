//! Unit tests for the expression lexer

use scical_engine::lexer::Lexer;
use scical_engine::token::{Token, TokenType};

/// Helper function to tokenize input and collect all tokens
fn tokenize(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        match &token.token_type {
            TokenType::Eof => {
                tokens.push(token);
                break;
            }
            TokenType::Error => {
                tokens.push(token);
                break;
            }
            _ => tokens.push(token),
        }
    }
    tokens
}

fn types(input: &str) -> Vec<TokenType> {
    tokenize(input).into_iter().map(|t| t.token_type).collect()
}

#[test]
fn test_decimal_literals() {
    let tokens = tokenize("42");
    assert_eq!(tokens.len(), 2); // Integer + EOF
    assert_eq!(tokens[0].token_type, TokenType::Integer);
    assert_eq!(tokens[0].value, "42");

    let tokens = tokenize("3.25");
    assert_eq!(tokens[0].token_type, TokenType::Float);
    assert_eq!(tokens[0].value, "3.25");

    let tokens = tokenize("1.5e-3");
    assert_eq!(tokens[0].token_type, TokenType::Float);
    assert_eq!(tokens[0].value, "1.5e-3");
}

#[test]
fn test_exponent_needs_digits() {
    // `2e` is two times Euler's number
    assert_eq!(
        types("2e"),
        vec![TokenType::Integer, TokenType::Identifier, TokenType::Eof]
    );
}

#[test]
fn test_based_literals() {
    let tokens = tokenize("0x1f");
    assert_eq!(tokens[0].token_type, TokenType::IntegerInBase(16));
    assert_eq!(tokens[0].value, "1F");

    let tokens = tokenize("0o17");
    assert_eq!(tokens[0].token_type, TokenType::IntegerInBase(8));

    let tokens = tokenize("0b101.01");
    assert_eq!(tokens[0].token_type, TokenType::FloatInBase(2));
    assert_eq!(tokens[0].value, "101.01");

    let tokens = tokenize("0rxiv");
    assert_eq!(tokens[0].token_type, TokenType::RomanNumeral);
    assert_eq!(tokens[0].value, "XIV");
}

#[test]
fn test_based_literal_without_digits() {
    let tokens = tokenize("0x");
    assert_eq!(tokens[0].token_type, TokenType::Error);
    assert_eq!(tokens[0].position, 0);
}

#[test]
fn test_operator_spellings() {
    assert_eq!(
        types("2 ** 3 · 4 × 5 ÷ 6 // 7 − 1"),
        vec![
            TokenType::Integer,
            TokenType::Power,
            TokenType::Integer,
            TokenType::Multiply,
            TokenType::Integer,
            TokenType::Multiply,
            TokenType::Integer,
            TokenType::Divide,
            TokenType::Integer,
            TokenType::IntegerDivide,
            TokenType::Integer,
            TokenType::Minus,
            TokenType::Integer,
            TokenType::Eof,
        ]
    );
}

#[test]
fn test_conversion_and_equality() {
    assert_eq!(
        types("1in to cm"),
        vec![
            TokenType::Integer,
            TokenType::Identifier,
            TokenType::To,
            TokenType::Identifier,
            TokenType::Eof,
        ]
    );
    assert_eq!(
        types("x^2 = 4"),
        vec![
            TokenType::Identifier,
            TokenType::Power,
            TokenType::Integer,
            TokenType::Equal,
            TokenType::Integer,
            TokenType::Eof,
        ]
    );
}

#[test]
fn test_matrix_punctuation() {
    assert_eq!(
        types("[1, 2; 3, 4]"),
        vec![
            TokenType::OpenBracket,
            TokenType::Integer,
            TokenType::Comma,
            TokenType::Integer,
            TokenType::Semicolon,
            TokenType::Integer,
            TokenType::Comma,
            TokenType::Integer,
            TokenType::CloseBracket,
            TokenType::Eof,
        ]
    );
}

#[test]
fn test_glyphs() {
    let tokens = tokenize("½ + €");
    assert_eq!(tokens[0].token_type, TokenType::UnicodeFraction);
    assert_eq!(tokens[2].token_type, TokenType::CurrencySymbol);
    assert_eq!(tokens[2].value, "€");

    let tokens = tokenize("π");
    assert_eq!(tokens[0].token_type, TokenType::Identifier);
    assert_eq!(tokens[0].value, "π");
}

#[test]
fn test_positions_are_character_offsets() {
    let tokens = tokenize("√4 + 1");
    assert_eq!(tokens[1].position, 1);
    assert_eq!(tokens[2].position, 3);
    assert_eq!(tokens[3].position, 5);
}

#[test]
fn test_unexpected_character() {
    let tokens = tokenize("1 & 2");
    assert_eq!(tokens[1].token_type, TokenType::Error);
    assert_eq!(tokens[1].position, 2);
}
