//! Ordered token sequence produced by one scan

use crate::tokens::token::{Token, TokenType};
use crate::utils::Spanned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A token with span information
pub type SpannedToken = Spanned<Token>;

/// Complete, ordered output of scanning one input.
///
/// Concatenating every token's text reproduces the scanned input.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<SpannedToken>,
}

impl TokenStream {
    pub fn new(tokens: Vec<SpannedToken>) -> Self {
        Self { tokens }
    }

    pub(crate) fn push(&mut self, token: SpannedToken) {
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpannedToken> {
        self.tokens.iter()
    }

    pub fn tokens(&self) -> &[SpannedToken] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<SpannedToken> {
        self.tokens
    }

    /// Tokens other than whitespace
    pub fn significant(&self) -> impl Iterator<Item = &SpannedToken> {
        self.tokens
            .iter()
            .filter(|t| !t.value.token_type.is_whitespace())
    }

    /// (text, type) pairs in emission order
    pub fn pairs(&self) -> Vec<(&str, TokenType)> {
        self.tokens
            .iter()
            .map(|t| (t.value.text.as_str(), t.value.token_type))
            .collect()
    }

    /// Concatenated token text
    pub fn reconstruct(&self) -> String {
        let mut out = String::with_capacity(self.tokens.iter().map(|t| t.value.text.len()).sum());
        for token in &self.tokens {
            out.push_str(&token.value.text);
        }
        out
    }

    /// True when the tokens account for every character of `source`, in order
    pub fn covers(&self, source: &str) -> bool {
        let mut rest = source;
        for token in &self.tokens {
            match rest.strip_prefix(token.value.text.as_str()) {
                Some(tail) => rest = tail,
                None => return false,
            }
        }
        rest.is_empty()
    }

    pub fn counts(&self) -> TokenCounts {
        let mut counts = TokenCounts::default();
        for token in &self.tokens {
            counts.record(token.value.token_type);
        }
        counts
    }
}

impl IntoIterator for TokenStream {
    type Item = SpannedToken;
    type IntoIter = std::vec::IntoIter<SpannedToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a SpannedToken;
    type IntoIter = std::slice::Iter<'a, SpannedToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Per-category token tally
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenCounts {
    by_type: BTreeMap<TokenType, usize>,
    total: usize,
}

impl TokenCounts {
    pub fn record(&mut self, token_type: TokenType) {
        *self.by_type.entry(token_type).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn get(&self, token_type: TokenType) -> usize {
        self.by_type.get(&token_type).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn error_signals(&self) -> usize {
        self.by_type
            .iter()
            .filter(|(t, _)| t.is_error_signal())
            .map(|(_, n)| n)
            .sum()
    }

    /// Non-zero entries in `TokenType` order
    pub fn iter(&self) -> impl Iterator<Item = (TokenType, usize)> + '_ {
        self.by_type.iter().map(|(t, n)| (*t, *n))
    }
}

impl fmt::Display for TokenCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(t, n)| format!("{}: {}", t.name(), n))
            .collect();
        write!(f, "{} tokens ({})", self.total, parts.join(", "))
    }
}

/// Structural checks over a token sequence
pub mod validation {
    use super::SpannedToken;

    /// Spans must be contiguous: each token starts where the previous one ended.
    pub fn validate_span_order(tokens: &[SpannedToken]) -> Result<(), String> {
        for (index, pair) in tokens.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.span.end != next.span.start {
                return Err(format!(
                    "Token {} ends at {} but token {} starts at {}",
                    index,
                    prev.span.end,
                    index + 1,
                    next.span.start
                ));
            }
        }

        if let Some(first) = tokens.first() {
            if first.span.start.offset != 0 {
                return Err(format!(
                    "First token starts at offset {} instead of 0",
                    first.span.start.offset
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{Position, Span};

    fn spanned(text: &str, token_type: TokenType, start: Position) -> (SpannedToken, Position) {
        let end = start.advance_str(text);
        (
            Spanned::new(Token::new(text, token_type), Span::new(start, end)),
            end,
        )
    }

    fn stream_of(parts: &[(&str, TokenType)]) -> TokenStream {
        let mut pos = Position::start();
        let mut tokens = Vec::new();
        for (text, token_type) in parts {
            let (token, next) = spanned(text, *token_type, pos);
            tokens.push(token);
            pos = next;
        }
        TokenStream::new(tokens)
    }

    #[test]
    fn test_reconstruct_and_covers() {
        let stream = stream_of(&[
            ("x", TokenType::Identifier),
            (" ", TokenType::Whitespace),
            ("=", TokenType::Operator),
        ]);

        assert_eq!(stream.reconstruct(), "x =");
        assert!(stream.covers("x ="));
        assert!(!stream.covers("x = 1"));
        assert!(!stream.covers("y ="));
    }

    #[test]
    fn test_significant_skips_whitespace() {
        let stream = stream_of(&[
            ("a", TokenType::Identifier),
            ("\n", TokenType::Whitespace),
            ("b", TokenType::Identifier),
        ]);

        let texts: Vec<&str> = stream.significant().map(|t| t.value.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn test_counts() {
        let stream = stream_of(&[
            ("#define", TokenType::InvalidIdentifier),
            ("#include", TokenType::IncludeDirective),
            ("x", TokenType::Identifier),
            ("y", TokenType::Identifier),
        ]);

        let counts = stream.counts();
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.get(TokenType::Identifier), 2);
        assert_eq!(counts.get(TokenType::Keyword), 0);
        assert_eq!(counts.error_signals(), 2);
        assert_eq!(
            counts.to_string(),
            "4 tokens (Identifier: 2, Invalid Identifier: 1, Include Directive: 1)"
        );
    }

    #[test]
    fn test_validate_span_order() {
        let stream = stream_of(&[("a", TokenType::Identifier), ("+", TokenType::Operator)]);
        assert!(validation::validate_span_order(stream.tokens()).is_ok());

        let mut tokens = stream.into_tokens();
        tokens.swap(0, 1);
        assert!(validation::validate_span_order(&tokens).is_err());
    }
}
