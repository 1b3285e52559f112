//! Lexical analyzer with metrics and logging integration
//!
//! Wraps the [`Scanner`] so that every emitted token is counted and, when
//! configured, error-signal tokens are reported as warnings before reaching
//! the caller's sink.

use super::scanner::{Scanner, TokenSink};
use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::file_processor::FileProcessingResult;
use crate::logging::codes;
use crate::tokens::{SpannedToken, TokenCounts, TokenStream, TokenType};
use crate::utils::SourceMap;
use crate::{log_debug, log_error, log_success, log_warning};
use serde::Serialize;
use std::time::Instant;

/// Lexical analysis errors. Classification itself never fails; these are
/// resource limits and sink failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LexerError {
    #[error("Token too long: {length} characters at line {line}, column {column} (max {MAX_TOKEN_LENGTH})")]
    TokenTooLong {
        length: usize,
        line: u32,
        column: u32,
        /// Byte offset where the token starts
        offset: usize,
    },

    #[error("Too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { count: usize },

    #[error("Token sink failed: {message}")]
    SinkFailed { message: String },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::TokenTooLong { .. } => codes::lexical::TOKEN_TOO_LONG,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
            LexerError::SinkFailed { .. } => codes::lexical::SINK_FAILED,
        }
    }

    pub fn sink_failed(message: impl std::fmt::Display) -> Self {
        LexerError::SinkFailed {
            message: message.to_string(),
        }
    }

    /// Byte offset in the source the error points at, if any
    pub fn source_offset(&self) -> Option<usize> {
        match self {
            LexerError::TokenTooLong { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

/// Characters of source quoted alongside a positioned error
const EXCERPT_CHARS: usize = 40;

/// Source quoted for a positioned error, empty when the error has no position
pub fn error_excerpt<'a>(source: &'a str, error: &LexerError) -> &'a str {
    match error.source_offset() {
        Some(offset) => SourceMap::new(source).excerpt(offset, EXCERPT_CHARS),
        None => "",
    }
}

/// Per-run token statistics
#[derive(Debug, Default, Clone, Serialize)]
pub struct LexicalMetrics {
    /// Every emitted token, whitespace included
    pub total_tokens: usize,
    pub whitespace_tokens: usize,
    /// Invalid Identifier and Include Directive tokens
    pub error_signal_tokens: usize,
    /// Integer, Float and String tokens
    pub literal_tokens: usize,
    /// Longest token text, in characters
    pub longest_token: usize,
    pub char_count: usize,
    /// Per-type counts; empty unless detailed metrics are enabled
    pub counts: TokenCounts,
}

impl LexicalMetrics {
    pub(crate) fn record_token(
        &mut self,
        token_type: TokenType,
        char_len: usize,
        preferences: &LexicalPreferences,
    ) {
        self.total_tokens += 1;
        self.longest_token = self.longest_token.max(char_len);

        if token_type.is_whitespace() {
            self.whitespace_tokens += 1;
        }
        if token_type.is_error_signal() {
            self.error_signal_tokens += 1;
        }
        if token_type.is_literal() {
            self.literal_tokens += 1;
        }

        if preferences.collect_detailed_metrics
            && (!token_type.is_whitespace() || preferences.include_whitespace_in_counts)
        {
            self.counts.record(token_type);
        }
    }

    /// Tokens other than whitespace
    pub fn significant_tokens(&self) -> usize {
        self.total_tokens - self.whitespace_tokens
    }

    pub fn count_of(&self, token_type: TokenType) -> usize {
        self.counts.get(token_type)
    }
}

/// Sink adapter that records metrics for every token the inner sink accepts
struct RecordingSink<'a, S: TokenSink> {
    inner: &'a mut S,
    metrics: &'a mut LexicalMetrics,
    preferences: &'a LexicalPreferences,
}

impl<S: TokenSink> TokenSink for RecordingSink<'_, S> {
    fn accept(&mut self, token: SpannedToken) -> Result<(), LexerError> {
        let token_type = token.value.token_type;
        let char_len = token.value.char_len();
        let signal = (self.preferences.report_error_signal_tokens && token_type.is_error_signal())
            .then(|| (token.span, token.value.text.clone()));

        self.inner.accept(token)?;
        self.metrics.record_token(token_type, char_len, self.preferences);

        if let Some((span, text)) = signal {
            log_warning!(code = codes::lexical::ERROR_SIGNAL_TOKEN,
                &format!("{} token", token_type),
                span = span,
                "text" => text.as_str()
            );
        }

        Ok(())
    }
}

/// Streaming lexical analyzer with runtime preferences
pub struct LexicalAnalyzer {
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self::with_preferences(LexicalPreferences::default())
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    /// Scan `source` into `sink`, recording metrics. Returns the token count.
    pub fn analyze<S: TokenSink>(&mut self, source: &str, sink: &mut S) -> Result<usize, LexerError> {
        self.metrics = LexicalMetrics {
            char_count: source.chars().count(),
            ..Default::default()
        };

        log_debug!("Starting lexical analysis",
            "char_count" => self.metrics.char_count,
            "max_tokens_allowed" => MAX_TOKEN_COUNT,
            "max_token_length" => MAX_TOKEN_LENGTH
        );

        let start = Instant::now();
        let mut recorder = RecordingSink {
            inner: sink,
            metrics: &mut self.metrics,
            preferences: &self.preferences,
        };

        let emitted = match Scanner::scan_str(source, &mut recorder) {
            Ok(count) => count,
            Err(error) => {
                log_error!(error.error_code(), "Lexical analysis failed",
                    "error" => &error,
                    "tokens_processed" => self.metrics.total_tokens,
                    "source" => error_excerpt(source, &error)
                );
                return Err(error);
            }
        };

        let elapsed = start.elapsed();
        let chars_per_ms = if elapsed.as_secs_f64() > 0.0 {
            self.metrics.char_count as f64 / (elapsed.as_secs_f64() * 1000.0)
        } else {
            0.0
        };

        log_success!(codes::success::TOKENIZATION_COMPLETE,
            "Lexical analysis completed successfully",
            "token_count" => emitted,
            "significant_tokens" => self.metrics.significant_tokens(),
            "error_signal_tokens" => self.metrics.error_signal_tokens,
            "literal_tokens" => self.metrics.literal_tokens,
            "longest_token" => self.metrics.longest_token,
            "chars_per_ms" => format!("{:.2}", chars_per_ms)
        );

        Ok(emitted)
    }

    /// Collect every token of `source`
    pub fn tokenize(&mut self, source: &str) -> Result<TokenStream, LexerError> {
        let mut stream = TokenStream::default();
        self.analyze(source, &mut stream)?;
        Ok(stream)
    }

    /// Tokenize the contents of a processed file
    pub fn tokenize_file_result(
        &mut self,
        file_result: FileProcessingResult,
    ) -> Result<TokenStream, LexerError> {
        log_debug!("Tokenizing file",
            "file" => file_result.metadata.path.display(),
            "file_size_bytes" => file_result.metadata.size,
            "line_count" => file_result.metadata.line_count
        );

        self.tokenize(&file_result.source)
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn preferences(count_whitespace: bool) -> LexicalPreferences {
        LexicalPreferences {
            collect_detailed_metrics: true,
            include_whitespace_in_counts: count_whitespace,
            report_error_signal_tokens: true,
        }
    }

    #[test]
    fn test_metrics_exclude_whitespace_by_default() {
        let mut analyzer = LexicalAnalyzer::with_preferences(preferences(false));
        let stream = analyzer.tokenize("int value = 42;\n#define X").unwrap();
        let metrics = analyzer.metrics();

        assert_eq!(metrics.total_tokens, stream.len());
        assert_eq!(metrics.whitespace_tokens, 5);
        assert_eq!(metrics.significant_tokens(), 7);
        assert_eq!(metrics.count_of(TokenType::Whitespace), 0);
        assert_eq!(metrics.count_of(TokenType::Keyword), 1);
        assert_eq!(metrics.count_of(TokenType::InvalidIdentifier), 1);
        assert_eq!(metrics.error_signal_tokens, 1);
        assert_eq!(metrics.literal_tokens, 1);
        assert_eq!(metrics.longest_token, 7);
        assert_eq!(metrics.counts.total(), 7);
    }

    #[test]
    fn test_metrics_can_count_whitespace() {
        let mut analyzer = LexicalAnalyzer::with_preferences(preferences(true));
        analyzer.tokenize("a b").unwrap();

        assert_eq!(analyzer.metrics().count_of(TokenType::Whitespace), 1);
        assert_eq!(analyzer.metrics().counts.total(), 3);
    }

    #[test]
    fn test_metrics_reset_between_runs() {
        let mut analyzer = LexicalAnalyzer::with_preferences(preferences(false));
        analyzer.tokenize("a b c d").unwrap();
        analyzer.tokenize("x").unwrap();

        assert_eq!(analyzer.metrics().total_tokens, 1);
        assert_eq!(analyzer.metrics().char_count, 1);
    }

    #[test]
    fn test_analyze_streams_into_any_sink() {
        let mut analyzer = LexicalAnalyzer::new();
        let mut sink: Vec<SpannedToken> = Vec::new();
        let count = analyzer.analyze("if(x)", &mut sink).unwrap();

        assert_eq!(count, 4);
        assert_eq!(sink[0].value.token_type, TokenType::Keyword);
    }

    #[test]
    fn test_sink_errors_propagate() {
        struct Rejecting;
        impl TokenSink for Rejecting {
            fn accept(&mut self, _token: SpannedToken) -> Result<(), LexerError> {
                Err(LexerError::sink_failed("broken pipe"))
            }
        }

        let mut analyzer = LexicalAnalyzer::new();
        let result = analyzer.analyze("abc", &mut Rejecting);
        assert_matches!(result, Err(LexerError::SinkFailed { ref message }) if message == "broken pipe");
        assert_eq!(
            result.unwrap_err().error_code(),
            codes::lexical::SINK_FAILED
        );
    }

    #[test]
    fn test_rejected_tokens_are_not_counted() {
        struct AcceptTwo(usize);
        impl TokenSink for AcceptTwo {
            fn accept(&mut self, _token: SpannedToken) -> Result<(), LexerError> {
                if self.0 == 2 {
                    return Err(LexerError::sink_failed("closed"));
                }
                self.0 += 1;
                Ok(())
            }
        }

        let mut analyzer = LexicalAnalyzer::with_preferences(preferences(false));
        let result = analyzer.analyze("#define x y", &mut AcceptTwo(0));

        assert_matches!(result, Err(LexerError::SinkFailed { .. }));
        let metrics = analyzer.metrics();
        assert_eq!(metrics.total_tokens, 2);
        assert_eq!(metrics.whitespace_tokens, 1);
        assert_eq!(metrics.error_signal_tokens, 1);
        assert_eq!(metrics.longest_token, 7);
        assert_eq!(metrics.counts.total(), 1);
    }

    #[test]
    fn test_long_token_error_quotes_source() {
        let source = format!("int x;\n  {}", "a".repeat(MAX_TOKEN_LENGTH + 5));
        let mut analyzer = LexicalAnalyzer::new();
        let error = analyzer.tokenize(&source).unwrap_err();

        assert_matches!(
            error,
            LexerError::TokenTooLong { line: 2, column: 3, offset: 9, .. }
        );
        assert_eq!(error.source_offset(), Some(9));
        assert_eq!(error_excerpt(&source, &error), "a".repeat(EXCERPT_CHARS));
        assert_eq!(error_excerpt(&source, &LexerError::sink_failed("x")), "");
    }
}
