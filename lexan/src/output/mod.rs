//! Token output: one line per token, plain or JSON Lines
//!
//! [`TokenWriter`] is a [`TokenSink`], so the scanner writes straight
//! through it without collecting the token sequence first.

use crate::lexical::{LexerError, LexicalMetrics, TokenSink};
use crate::logging::codes;
use crate::tokens::{SpannedToken, TokenType};
use crate::{log_error, log_success};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Line format for emitted tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `Token: <text> - Type: <name>`
    #[default]
    Plain,
    /// One JSON object per line
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" | "text" => Ok(OutputFormat::Plain),
            "json" | "jsonl" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Serialized shape of one token in JSON output
#[derive(Debug, Serialize)]
struct TokenRecord<'a> {
    text: &'a str,
    #[serde(rename = "type")]
    token_type: &'static str,
    line: u32,
    column: u32,
    offset: usize,
}

/// Render whitespace control characters as escapes so a token stays on one line
pub fn escape_whitespace(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            '\x0B' => escaped.push_str("\\v"),
            '\x0C' => escaped.push_str("\\f"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Writes tokens to any `io::Write` as they arrive
pub struct TokenWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    include_whitespace: bool,
    include_positions: bool,
    written: usize,
}

impl<W: Write> TokenWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            format: OutputFormat::Plain,
            include_whitespace: false,
            include_positions: false,
            written: 0,
        }
    }

    pub fn from_preferences(writer: W, prefs: &crate::config::runtime::OutputPreferences) -> Self {
        Self::new(writer)
            .with_format(prefs.format)
            .with_whitespace(prefs.include_whitespace)
            .with_positions(prefs.include_positions)
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_whitespace(mut self, include: bool) -> Self {
        self.include_whitespace = include;
        self
    }

    pub fn with_positions(mut self, include: bool) -> Self {
        self.include_positions = include;
        self
    }

    /// Number of token lines written so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Flush the underlying writer and log completion
    pub fn finish(mut self) -> Result<W, LexerError> {
        self.writer.flush().map_err(|e| {
            log_error!(codes::output::WRITE_FAILED, "Failed to flush token output",
                "error" => &e
            );
            LexerError::sink_failed(e)
        })?;

        log_success!(codes::success::OUTPUT_COMPLETE, "Token output written",
            "format" => self.format,
            "tokens_written" => self.written
        );

        Ok(self.writer)
    }

    fn write_token(&mut self, token: &SpannedToken) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Plain => {
                let text = if token.value.token_type == TokenType::Whitespace {
                    escape_whitespace(&token.value.text)
                } else {
                    token.value.text.clone()
                };
                write!(
                    self.writer,
                    "Token: {} - Type: {}",
                    text,
                    token.value.token_type.name()
                )?;
                if self.include_positions {
                    write!(
                        self.writer,
                        " ({}:{})",
                        token.span.start.line, token.span.start.column
                    )?;
                }
                writeln!(self.writer)
            }
            OutputFormat::Json => {
                let record = TokenRecord {
                    text: &token.value.text,
                    token_type: token.value.token_type.name(),
                    line: token.span.start.line,
                    column: token.span.start.column,
                    offset: token.span.start.offset,
                };
                serde_json::to_writer(&mut self.writer, &record)?;
                writeln!(self.writer)
            }
        }
    }
}

impl<W: Write> TokenSink for TokenWriter<W> {
    fn accept(&mut self, token: SpannedToken) -> Result<(), LexerError> {
        if token.value.token_type.is_whitespace() && !self.include_whitespace {
            return Ok(());
        }

        if let Err(e) = self.write_token(&token) {
            log_error!(codes::output::WRITE_FAILED, "Failed to write token",
                span = token.span,
                "error" => &e
            );
            return Err(LexerError::sink_failed(e));
        }

        self.written += 1;
        Ok(())
    }
}

/// Per-type count table for the end-of-run summary
pub fn format_summary(metrics: &LexicalMetrics) -> String {
    let mut summary = String::new();
    summary.push_str("Token summary:\n");

    for token_type in TokenType::ALL {
        let count = metrics.count_of(token_type);
        if count > 0 {
            summary.push_str(&format!("  {:<20} {}\n", token_type.name(), count));
        }
    }

    summary.push_str(&format!(
        "  {:<20} {}\n",
        "Total",
        metrics.significant_tokens()
    ));
    if metrics.error_signal_tokens > 0 {
        summary.push_str(&format!(
            "  {:<20} {}\n",
            "Error signals", metrics.error_signal_tokens
        ));
    }

    summary
}
