//! Single-pass boundary detection
//!
//! The scanner reads one character at a time with no lookahead. Operator and
//! punctuation characters close the current candidate and are emitted on
//! their own. Whitespace closes the current candidate and starts a whitespace
//! run, which is itself emitted as one token when the run ends, so every
//! input character lands in exactly one token. Any other character extends
//! the candidate, including `"`, so a quoted literal ends at the first
//! boundary character that follows it, even one inside the quotes.

use super::analyzer::LexerError;
use super::chars::{is_single_char_token, is_whitespace_char};
use super::classifier::classify;
use crate::config::compile_time::lexical::{MAX_TOKEN_COUNT, MAX_TOKEN_LENGTH};
use crate::tokens::{SpannedToken, Token, TokenStream, TokenType};
use crate::utils::{Position, Span, Spanned};

/// Receives tokens in emission order
pub trait TokenSink {
    fn accept(&mut self, token: SpannedToken) -> Result<(), LexerError>;
}

impl TokenSink for Vec<SpannedToken> {
    fn accept(&mut self, token: SpannedToken) -> Result<(), LexerError> {
        self.push(token);
        Ok(())
    }
}

impl TokenSink for TokenStream {
    fn accept(&mut self, token: SpannedToken) -> Result<(), LexerError> {
        self.push(token);
        Ok(())
    }
}

impl<S: TokenSink + ?Sized> TokenSink for &mut S {
    fn accept(&mut self, token: SpannedToken) -> Result<(), LexerError> {
        (**self).accept(token)
    }
}

/// Character-at-a-time tokenizer state for one input
#[derive(Debug, Clone)]
pub struct Scanner {
    buffer: String,
    buffer_chars: usize,
    buffer_is_whitespace: bool,
    buffer_start: Position,
    position: Position,
    emitted: usize,
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            buffer_chars: 0,
            buffer_is_whitespace: false,
            buffer_start: Position::start(),
            position: Position::start(),
            emitted: 0,
        }
    }

    /// Scan all of `source` and perform the trailing flush
    pub fn scan_str<S: TokenSink>(source: &str, sink: &mut S) -> Result<usize, LexerError> {
        let mut scanner = Self::new();
        for ch in source.chars() {
            scanner.feed(ch, sink)?;
        }
        scanner.finish(sink)
    }

    /// Process one character
    pub fn feed<S: TokenSink>(&mut self, ch: char, sink: &mut S) -> Result<(), LexerError> {
        if is_whitespace_char(ch) {
            if !self.buffer_is_whitespace {
                self.flush(sink)?;
            }
            self.append(ch)?;
            self.buffer_is_whitespace = true;
        } else if is_single_char_token(ch) {
            self.flush(sink)?;
            let start = self.position;
            self.position = start.advance(ch);
            let text = ch.to_string();
            let token_type = classify(&text);
            self.emit(Token::new(text, token_type), Span::new(start, self.position), sink)?;
        } else {
            if self.buffer_is_whitespace {
                self.flush(sink)?;
            }
            self.append(ch)?;
        }
        Ok(())
    }

    /// Flush any buffered candidate. Returns the number of tokens emitted.
    pub fn finish<S: TokenSink>(mut self, sink: &mut S) -> Result<usize, LexerError> {
        self.flush(sink)?;
        Ok(self.emitted)
    }

    /// Position just past the last character fed
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }

    fn append(&mut self, ch: char) -> Result<(), LexerError> {
        if self.buffer.is_empty() {
            self.buffer_start = self.position;
        }

        if self.buffer_chars >= MAX_TOKEN_LENGTH {
            return Err(LexerError::TokenTooLong {
                length: self.buffer_chars + 1,
                line: self.buffer_start.line,
                column: self.buffer_start.column,
                offset: self.buffer_start.offset,
            });
        }

        self.buffer.push(ch);
        self.buffer_chars += 1;
        self.position = self.position.advance(ch);
        Ok(())
    }

    fn flush<S: TokenSink>(&mut self, sink: &mut S) -> Result<(), LexerError> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let text = std::mem::take(&mut self.buffer);
        let token_type = if self.buffer_is_whitespace {
            TokenType::Whitespace
        } else {
            classify(&text)
        };
        let span = Span::new(self.buffer_start, self.position);

        self.buffer_chars = 0;
        self.buffer_is_whitespace = false;

        self.emit(Token::new(text, token_type), span, sink)
    }

    fn emit<S: TokenSink>(&mut self, token: Token, span: Span, sink: &mut S) -> Result<(), LexerError> {
        if self.emitted >= MAX_TOKEN_COUNT {
            return Err(LexerError::TooManyTokens {
                count: self.emitted + 1,
            });
        }

        sink.accept(Spanned::new(token, span))?;
        self.emitted += 1;
        Ok(())
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}
