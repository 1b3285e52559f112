//! Token categories and the (text, type) token value
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of lexical categories. Every token carries exactly one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum TokenType {
    Keyword,
    Identifier,
    Integer,
    Float,
    String,
    Operator,
    Punctuation,
    Comment,
    Whitespace,
    InvalidIdentifier,
    IncludeDirective,
}

impl TokenType {
    /// Every variant, in declaration order
    pub const ALL: [TokenType; 11] = [
        TokenType::Keyword,
        TokenType::Identifier,
        TokenType::Integer,
        TokenType::Float,
        TokenType::String,
        TokenType::Operator,
        TokenType::Punctuation,
        TokenType::Comment,
        TokenType::Whitespace,
        TokenType::InvalidIdentifier,
        TokenType::IncludeDirective,
    ];

    /// Human-readable name used in token listings
    pub fn name(self) -> &'static str {
        match self {
            TokenType::Keyword => "Keyword",
            TokenType::Identifier => "Identifier",
            TokenType::Integer => "Integer",
            TokenType::Float => "Float",
            TokenType::String => "String",
            TokenType::Operator => "Operator",
            TokenType::Punctuation => "Punctuation",
            TokenType::Comment => "Comment",
            TokenType::Whitespace => "Whitespace",
            TokenType::InvalidIdentifier => "Invalid Identifier",
            TokenType::IncludeDirective => "Include Directive",
        }
    }

    /// Categories that report malformed or unsupported input as data
    pub fn is_error_signal(self) -> bool {
        matches!(
            self,
            TokenType::InvalidIdentifier | TokenType::IncludeDirective
        )
    }

    pub fn is_whitespace(self) -> bool {
        self == TokenType::Whitespace
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenType::Integer | TokenType::Float | TokenType::String
        )
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One classified lexical unit: the exact consumed text and its category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub token_type: TokenType,
}

impl Token {
    pub fn new(text: impl Into<String>, token_type: TokenType) -> Self {
        Self {
            text: text.into(),
            token_type,
        }
    }

    /// Build a token by running the classifier over `text`
    pub fn classify(text: impl Into<String>) -> Self {
        let text = text.into();
        let token_type = crate::lexical::classify(&text);
        Self { text, token_type }
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_error_signal(&self) -> bool {
        self.token_type.is_error_signal()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_variant_has_a_distinct_name() {
        let names: HashSet<&str> = TokenType::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(names.len(), TokenType::ALL.len());
        assert!(names.iter().all(|n| !n.is_empty()));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(TokenType::InvalidIdentifier.to_string(), "Invalid Identifier");
        assert_eq!(TokenType::IncludeDirective.to_string(), "Include Directive");
        assert_eq!(TokenType::Keyword.to_string(), "Keyword");
    }

    #[test]
    fn test_error_signal_categories() {
        let signals: Vec<TokenType> = TokenType::ALL
            .into_iter()
            .filter(|t| t.is_error_signal())
            .collect();
        assert_eq!(
            signals,
            vec![TokenType::InvalidIdentifier, TokenType::IncludeDirective]
        );
    }

    #[test]
    fn test_classify_constructor() {
        let token = Token::classify("while");
        assert_eq!(token.token_type, TokenType::Keyword);
        assert_eq!(token.to_string(), "while");
        assert_eq!(token.char_len(), 5);
    }
}
