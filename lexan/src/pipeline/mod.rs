mod error;
mod info;
mod result;
mod validation;

pub use error::PipelineError;
pub use info::{get_pipeline_info, PipelineInfo};
pub use result::PipelineResult;
pub use validation::validate_pipeline;

use crate::config::RuntimeConfig;
use crate::file_processor::{FileProcessingResult, FileProcessor};
use crate::lexical::LexicalAnalyzer;
use crate::logging;
use crate::output::{format_summary, TokenWriter};
use crate::tokens::TokenStream;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Display name used for standard input
pub const STDIN_NAME: &str = "<stdin>";

static NEXT_FILE_ID: AtomicUsize = AtomicUsize::new(0);

fn next_file_id() -> usize {
    NEXT_FILE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Read, tokenize, and write one file (file -> lexical -> output)
pub fn process_file<W: Write>(
    file_path: &str,
    config: &RuntimeConfig,
    writer: &mut W,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(PathBuf::from(file_path), next_file_id(), || {
        crate::log_info!("Starting lexical analysis pipeline", "file" => file_path);

        let file_result =
            FileProcessor::from_preferences(&config.file_processor).process_file(file_path)?;

        run_stages(file_result, config, writer, file_path, start_time)
    })
}

/// Same as [`process_file`] for an already-open reader
pub fn process_reader<R: Read, W: Write>(
    name: &str,
    reader: R,
    config: &RuntimeConfig,
    writer: &mut W,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(PathBuf::from(name), next_file_id(), || {
        crate::log_info!("Starting lexical analysis pipeline", "input" => name);

        let file_result =
            FileProcessor::from_preferences(&config.file_processor).process_reader(name, reader)?;

        run_stages(file_result, config, writer, name, start_time)
    })
}

fn run_stages<W: Write>(
    file_result: FileProcessingResult,
    config: &RuntimeConfig,
    writer: &mut W,
    file_path: &str,
    start_time: Instant,
) -> Result<PipelineResult, PipelineError> {
    let mut analyzer = LexicalAnalyzer::with_preferences(config.lexical.clone());
    let mut token_writer = TokenWriter::from_preferences(&mut *writer, &config.output);

    let token_count = analyzer.analyze(&file_result.source, &mut token_writer)?;
    token_writer.finish()?;

    let lexical_metrics = analyzer.metrics().clone();

    if config.output.print_summary {
        write!(writer, "{}", format_summary(&lexical_metrics))
            .and_then(|_| writer.flush())
            .map_err(|e| {
                crate::log_error!(crate::logging::codes::output::WRITE_FAILED,
                    "Failed to write token summary",
                    "error" => &e
                );
                PipelineError::Pipeline {
                    message: format!("Failed to write token summary: {}", e),
                }
            })?;
    }

    let result = PipelineResult::new(
        file_result.metadata,
        lexical_metrics,
        token_count,
        start_time.elapsed(),
    );

    result.log_success(file_path);

    Ok(result)
}

/// Read and tokenize a file without writing output
pub fn tokenize_file(file_path: &str) -> Result<TokenStream, PipelineError> {
    let file_result = crate::file_processor::process_file(file_path)?;
    Ok(crate::lexical::tokenize_file_result(file_result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_processor::FileProcessorError;
    use crate::output::OutputFormat;
    use crate::tokens::TokenType;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn plain_config() -> RuntimeConfig {
        let mut config = RuntimeConfig::default();
        config.output.format = OutputFormat::Plain;
        config.output.include_whitespace = false;
        config.output.include_positions = false;
        config.output.print_summary = false;
        config
    }

    #[test]
    fn test_validate_pipeline() {
        assert!(validate_pipeline().is_ok());
    }

    #[test]
    fn test_process_file_writes_tokens() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("input.txt");
        fs::write(&file_path, "if (x) return 1;\n").unwrap();

        let mut out = Vec::new();
        let result = process_file(file_path.to_str().unwrap(), &plain_config(), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Token: if - Type: Keyword\n\
             Token: ( - Type: Punctuation\n\
             Token: x - Type: Identifier\n\
             Token: ) - Type: Punctuation\n\
             Token: return - Type: Keyword\n\
             Token: 1 - Type: Integer\n\
             Token: ; - Type: Punctuation\n"
        );
        assert_eq!(result.token_count, 11);
        assert_eq!(result.lexical_metrics.significant_tokens(), 7);
        assert_eq!(result.file_metadata.line_count, 1);
    }

    #[test]
    fn test_missing_file_is_input_failure() {
        let mut out = Vec::new();
        let error = process_file("/no/such/dir/input.txt", &plain_config(), &mut out).unwrap_err();

        assert!(error.is_input_failure());
        assert_matches!(
            error,
            PipelineError::FileProcessing(FileProcessorError::FileNotFound { .. })
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_input_produces_no_tokens() {
        let mut out = Vec::new();
        let result = process_reader(STDIN_NAME, "".as_bytes(), &plain_config(), &mut out).unwrap();

        assert_eq!(result.token_count, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_summary_follows_tokens() {
        let mut config = plain_config();
        config.output.print_summary = true;
        config.lexical.collect_detailed_metrics = true;

        let mut out = Vec::new();
        process_reader(STDIN_NAME, "a = b".as_bytes(), &config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Token: a - Type: Identifier\n"));
        assert!(text.contains("Token summary:\n"));
        assert!(text.contains("Identifier"));
    }

    #[test]
    fn test_json_pipeline() {
        let mut config = plain_config();
        config.output.format = OutputFormat::Json;

        let mut out = Vec::new();
        process_reader(STDIN_NAME, "#include".as_bytes(), &config, &mut out).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(String::from_utf8(out).unwrap().trim_end()).unwrap();

        assert_eq!(value["type"], "Include Directive");
    }

    #[test]
    fn test_tokenize_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("input.txt");
        fs::write(&file_path, "float y = -2.5;").unwrap();

        let stream = tokenize_file(file_path.to_str().unwrap()).unwrap();
        let types: Vec<TokenType> = stream.significant().map(|t| t.value.token_type).collect();
        assert_eq!(
            types,
            vec![
                TokenType::Keyword,
                TokenType::Identifier,
                TokenType::Operator,
                TokenType::Integer,
                TokenType::Float,
                TokenType::Punctuation,
            ]
        );
        assert_eq!(stream.reconstruct(), "float y = -2.5;");
    }

    #[test]
    fn test_pipeline_error_creation() {
        let error = PipelineError::pipeline_error("Test error");
        assert_matches!(error, PipelineError::Pipeline { ref message } if message == "Test error");
        assert!(!error.is_input_failure());
        assert_eq!(error.error_code(), crate::logging::codes::pipeline::PIPELINE_FAILURE);
    }

    #[test]
    fn test_pipeline_info() {
        let info = get_pipeline_info();
        assert_eq!(info.pipeline_stages, 3);
        assert!(info.report().contains("Output Formats: plain, json"));
    }
}
