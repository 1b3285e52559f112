//! Ordered classification rules for a complete candidate token.
//!
//! Rules are tried top to bottom and the first match wins, so a reserved word
//! is a Keyword even though the Identifier rule would also accept it.

use super::chars::{is_operator_char, is_punctuation_char, is_whitespace_char, is_word_char};
use crate::tokens::TokenType;

/// Reserved words
pub const KEYWORDS: [&str; 7] = ["int", "float", "if", "else", "while", "for", "return"];

/// The only directive that is recognised
pub const INCLUDE_DIRECTIVE: &str = "#include";

/// Classify a non-empty candidate.
///
/// Every non-empty string receives exactly one category; the final rule is a
/// catch-all. Callers must not pass an empty string.
pub fn classify(candidate: &str) -> TokenType {
    debug_assert!(!candidate.is_empty(), "classify called with an empty candidate");

    let mut chars = candidate.chars();
    let first = chars.next();
    let second = chars.next();

    if is_keyword(candidate) {
        return TokenType::Keyword;
    }

    if let Some(number_type) = classify_number(candidate) {
        return number_type;
    }

    if is_string_literal(candidate) {
        return TokenType::String;
    }

    match first {
        Some(c) if is_operator_char(c) => return TokenType::Operator,
        Some(c) if is_punctuation_char(c) => return TokenType::Punctuation,
        _ => {}
    }

    if candidate.starts_with("//") {
        return TokenType::Comment;
    }

    if candidate.chars().all(is_whitespace_char) && first.is_some() {
        return TokenType::Whitespace;
    }

    if candidate == INCLUDE_DIRECTIVE {
        return TokenType::IncludeDirective;
    }

    if first == Some('#') && second.is_some_and(|c| c.is_ascii_alphabetic()) {
        return TokenType::InvalidIdentifier;
    }

    match first {
        Some(c) if is_word_char(c) => TokenType::Identifier,
        _ => TokenType::InvalidIdentifier,
    }
}

pub fn is_keyword(candidate: &str) -> bool {
    KEYWORDS.contains(&candidate)
}

/// Integer or Float when `candidate` is a decimal literal.
///
/// After one optional leading `-` the rest must be ASCII digits with at most
/// one `.`. An empty rest counts as all digits, so `-` alone is an Integer.
/// A `.` needs at least one digit beside it.
pub fn classify_number(candidate: &str) -> Option<TokenType> {
    if candidate.is_empty() {
        return None;
    }

    let digits = candidate.strip_prefix('-').unwrap_or(candidate);

    let mut saw_digit = false;
    let mut dots = 0usize;
    for ch in digits.chars() {
        match ch {
            '0'..='9' => saw_digit = true,
            '.' => dots += 1,
            _ => return None,
        }
    }

    match (dots, saw_digit) {
        (0, _) => Some(TokenType::Integer),
        (1, true) => Some(TokenType::Float),
        _ => None,
    }
}

/// At least two characters, opening and closing with `"`
pub fn is_string_literal(candidate: &str) -> bool {
    candidate.len() >= 2 && candidate.starts_with('"') && candidate.ends_with('"')
}
