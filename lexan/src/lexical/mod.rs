//! Lexical analysis: character classes, classification rules, and the
//! single-pass scanner that turns source text into classified tokens.
//!
//! The [`classifier`] is a pure function over a complete candidate string.
//! The [`scanner`] decides where candidates begin and end and is the only
//! caller of the classifier during a scan. [`LexicalAnalyzer`] adds metrics
//! and logging around the scanner.

pub mod analyzer;
pub mod chars;
pub mod classifier;
pub mod scanner;

use crate::config::compile_time::lexical::*;
use crate::file_processor::FileProcessingResult;
use crate::tokens::TokenStream;

pub use analyzer::{LexerError, LexicalAnalyzer, LexicalMetrics};
pub use classifier::{classify, KEYWORDS};
pub use scanner::{Scanner, TokenSink};

/// Tokenize a string with default preferences
pub fn tokenize(source: &str) -> Result<TokenStream, LexerError> {
    LexicalAnalyzer::new().tokenize(source)
}

/// Tokenize a processed file with default preferences
pub fn tokenize_file_result(file_result: FileProcessingResult) -> Result<TokenStream, LexerError> {
    LexicalAnalyzer::new().tokenize_file_result(file_result)
}

/// Startup check that lexical codes are registered and limits are usable
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    let lexical_codes = [
        crate::logging::codes::lexical::TOKEN_TOO_LONG,
        crate::logging::codes::lexical::TOO_MANY_TOKENS,
        crate::logging::codes::lexical::SINK_FAILED,
        crate::logging::codes::lexical::ERROR_SIGNAL_TOKEN,
        crate::logging::codes::success::TOKENIZATION_COMPLETE,
    ];

    for code in &lexical_codes {
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    if MAX_TOKEN_LENGTH == 0 {
        return Err("MAX_TOKEN_LENGTH cannot be zero".to_string());
    }
    if MAX_TOKEN_COUNT == 0 {
        return Err("MAX_TOKEN_COUNT cannot be zero".to_string());
    }

    crate::log_debug!("Lexical limits initialized",
        "max_token_length" => MAX_TOKEN_LENGTH,
        "max_token_count" => MAX_TOKEN_COUNT,
        "keywords" => KEYWORDS.join(",")
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenType;

    #[test]
    fn test_init_validation() {
        assert!(init_lexical_analysis_logging().is_ok());
    }

    #[test]
    fn test_module_tokenize() {
        let stream = tokenize("return x;").unwrap();
        let types: Vec<TokenType> = stream.significant().map(|t| t.value.token_type).collect();
        assert_eq!(
            types,
            vec![TokenType::Keyword, TokenType::Identifier, TokenType::Punctuation]
        );
    }
}
