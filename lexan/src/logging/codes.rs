//! Consolidated error codes and classification system
//!
//! Single source of truth for every code the lexer logs, together with the
//! behavioral metadata used by the collector and the structured logger.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Behavioral metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    /// Unrecoverable; processing of the current input stops
    const fn halting(
        code: Code,
        category: &'static str,
        severity: Severity,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code: code.as_str(),
            category,
            severity,
            recoverable: false,
            requires_halt: true,
            description,
            recommended_action,
        }
    }

    /// Low severity; recorded and processing continues
    const fn advisory(
        code: Code,
        category: &'static str,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code: code.as_str(),
            category,
            severity: Severity::Low,
            recoverable: true,
            requires_halt: false,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Input file error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const TOO_MANY_LINES: Code = Code::new("E013");
}

/// Lexical analysis codes
pub mod lexical {
    use super::Code;

    pub const TOKEN_TOO_LONG: Code = Code::new("E020");
    pub const TOO_MANY_TOKENS: Code = Code::new("E021");
    pub const SINK_FAILED: Code = Code::new("E022");

    // Reported as data, logged as a warning
    pub const ERROR_SIGNAL_TOKEN: Code = Code::new("W020");
}

/// Token output codes
pub mod output {
    use super::Code;

    pub const WRITE_FAILED: Code = Code::new("E030");
}

/// Runtime configuration codes
pub mod configuration {
    use super::Code;

    pub const CONFIG_READ_FAILED: Code = Code::new("E040");
    pub const CONFIG_PARSE_FAILED: Code = Code::new("E041");
}

/// Pipeline orchestration codes
pub mod pipeline {
    use super::Code;

    pub const PIPELINE_FAILURE: Code = Code::new("E050");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const OUTPUT_COMPLETE: Code = Code::new("I030");
    pub const PIPELINE_COMPLETE: Code = Code::new("I050");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

use self::Severity::{Critical, High};

static REGISTRY: [ErrorMetadata; 23] = [
    ErrorMetadata::halting(system::INTERNAL_ERROR, "System", Critical,
        "Critical internal system error", "File a bug report with the input that triggered it"),
    ErrorMetadata::halting(system::INITIALIZATION_FAILURE, "System", Critical,
        "System initialization failed", "Check build configuration and logging settings"),
    ErrorMetadata::halting(file_processing::FILE_NOT_FOUND, "FileProcessing", High,
        "Input file not found", "Verify the file path exists and is spelled correctly"),
    ErrorMetadata::halting(file_processing::FILE_TOO_LARGE, "FileProcessing", High,
        "Input file exceeds the maximum allowed size", "Split the input or rebuild with a larger max_file_size"),
    ErrorMetadata::advisory(file_processing::EMPTY_FILE, "FileProcessing",
        "Input file is empty", "No tokens will be produced for an empty input"),
    ErrorMetadata::halting(file_processing::PERMISSION_DENIED, "FileProcessing", High,
        "Permission denied reading input file", "Check file permissions"),
    ErrorMetadata::halting(file_processing::INVALID_ENCODING, "FileProcessing", High,
        "Input is not valid UTF-8", "Convert the input to UTF-8"),
    ErrorMetadata::halting(file_processing::IO_ERROR, "FileProcessing", High,
        "I/O error while reading input", "Check the storage device and retry"),
    ErrorMetadata::halting(file_processing::INVALID_PATH, "FileProcessing", High,
        "Input path is invalid", "Provide a path to a regular file"),
    ErrorMetadata::halting(file_processing::TOO_MANY_LINES, "FileProcessing", High,
        "Input file has too many lines", "Split the input or rebuild with a larger max_line_count_for_analysis"),
    ErrorMetadata::halting(lexical::TOKEN_TOO_LONG, "Lexical", High,
        "Candidate token exceeds the maximum token length", "Insert whitespace or delimiters to break up the long token"),
    ErrorMetadata::halting(lexical::TOO_MANY_TOKENS, "Lexical", High,
        "Token count exceeds the maximum allowed", "Split the input into smaller files"),
    ErrorMetadata::halting(lexical::SINK_FAILED, "Lexical", High,
        "Token sink rejected a token", "Check the output destination"),
    ErrorMetadata::advisory(lexical::ERROR_SIGNAL_TOKEN, "Lexical",
        "Token classified as Invalid Identifier or Include Directive", "Review the reported token in the source"),
    ErrorMetadata::halting(output::WRITE_FAILED, "Output", High,
        "Failed to write token output", "Check that stdout is writable"),
    ErrorMetadata::halting(configuration::CONFIG_READ_FAILED, "Configuration", High,
        "Runtime configuration file could not be read", "Check the --config path"),
    ErrorMetadata::halting(configuration::CONFIG_PARSE_FAILED, "Configuration", High,
        "Runtime configuration file is not valid TOML", "Fix the syntax reported in the message"),
    ErrorMetadata::halting(pipeline::PIPELINE_FAILURE, "Pipeline", High,
        "Pipeline stage failed", "See the preceding error for the failing stage"),
    ErrorMetadata::advisory(success::SYSTEM_INITIALIZATION_COMPLETED, "System",
        "System initialization completed successfully", "System ready for processing"),
    ErrorMetadata::advisory(success::FILE_PROCESSING_SUCCESS, "FileProcessing",
        "File processing completed successfully", "Continue to next processing stage"),
    ErrorMetadata::advisory(success::TOKENIZATION_COMPLETE, "Lexical",
        "Tokenization completed successfully", "Continue to output stage"),
    ErrorMetadata::advisory(success::OUTPUT_COMPLETE, "Output",
        "Token output completed successfully", "No action required"),
    ErrorMetadata::advisory(success::PIPELINE_COMPLETE, "Pipeline",
        "Pipeline completed successfully", "No action required"),
];

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, &'static ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, &'static ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| REGISTRY.iter().map(|meta| (meta.code, meta)).collect())
}

fn lookup<T>(code: &str, field: impl FnOnce(&ErrorMetadata) -> T, fallback: T) -> T {
    get_error_registry().get(code).map(|&meta| field(meta)).unwrap_or(fallback)
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code).copied()
}

/// Unknown codes are Medium
pub fn get_severity(code: &str) -> Severity {
    lookup(code, |meta| meta.severity, Severity::Medium)
}

pub fn is_recoverable(code: &str) -> bool {
    lookup(code, |meta| meta.recoverable, true)
}

pub fn requires_halt(code: &str) -> bool {
    lookup(code, |meta| meta.requires_halt, false)
}

/// Human-readable description, or "Unknown error"
pub fn get_description(code: &str) -> &'static str {
    lookup(code, |meta| meta.description, "Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    lookup(code, |meta| meta.recommended_action, "No specific action available")
}

pub fn get_category(code: &str) -> &'static str {
    lookup(code, |meta| meta.category, "Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_codes_are_unique() {
        assert_eq!(get_error_registry().len(), REGISTRY.len());
        for meta in &REGISTRY {
            assert!(get_error_metadata(meta.code).is_some(), "{} has no metadata", meta.code);
        }
    }

    #[test]
    fn test_metadata_lookup() {
        let meta = get_error_metadata(lexical::TOKEN_TOO_LONG.as_str()).unwrap();
        assert_eq!(meta.category, "Lexical");
        assert_eq!(meta.severity, Severity::High);
        assert_eq!(get_severity(system::INITIALIZATION_FAILURE.as_str()), Severity::Critical);
        assert_eq!(get_action(configuration::CONFIG_READ_FAILED.as_str()), "Check the --config path");
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("X999"), "Unknown error");
        assert_eq!(get_category("X999"), "Unknown");
        assert_eq!(get_severity("X999"), Severity::Medium);
        assert!(is_recoverable("X999"));
        assert!(!requires_halt("X999"));
    }

    #[test]
    fn test_input_failures_halt() {
        assert!(requires_halt(file_processing::FILE_NOT_FOUND.as_str()));
        assert!(requires_halt(file_processing::PERMISSION_DENIED.as_str()));
        assert!(!requires_halt(file_processing::EMPTY_FILE.as_str()));
        assert!(!requires_halt(lexical::ERROR_SIGNAL_TOKEN.as_str()));
        assert!(is_recoverable(success::PIPELINE_COMPLETE.as_str()));
    }
}
