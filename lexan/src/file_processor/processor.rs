//! File processor implementation with compile-time limits and global logging integration

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT_FOR_ANALYSIS,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success, log_warning};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// File processor specific errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in input: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading input: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("Input exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
            FileProcessorError::TooManyLines { .. } => codes::file_processing::TOO_MANY_LINES,
        }
    }

    /// Check if this error should halt processing
    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    /// Map a read failure onto the error variants
    fn from_io(error: &io::Error, path: &str) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FileProcessorError::FileNotFound {
                path: path.to_string(),
            },
            io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                path: path.to_string(),
            },
            io::ErrorKind::InvalidData => FileProcessorError::InvalidEncoding {
                path: path.to_string(),
            },
            _ => FileProcessorError::IoError {
                message: format!("Failed to read '{}': {}", path, error),
            },
        }
    }
}

/// Metadata collected while reading one input
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path, or the display name of a reader input
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    pub extension: Option<String>,
    pub line_count: usize,
    pub modified: Option<std::time::SystemTime>,
}

impl FileMetadata {
    /// Metadata for a non-file input such as stdin
    fn for_reader(name: &str, size: u64) -> Self {
        Self {
            path: PathBuf::from(name),
            size,
            extension: None,
            line_count: 0,
            modified: None,
        }
    }

    pub fn human_readable_size(&self) -> String {
        human_readable_bytes(self.size)
    }

    /// Check if the input is above the large file threshold
    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

fn human_readable_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

/// Source text and metadata for one input
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }

    /// Check if the input holds only whitespace
    pub fn is_effectively_empty(&self) -> bool {
        self.source.trim().is_empty()
    }

    /// Characters per millisecond
    pub fn processing_rate(&self) -> f64 {
        let duration_ms = self.processing_duration.as_secs_f64() * 1000.0;
        if duration_ms > 0.0 {
            self.char_count() as f64 / duration_ms
        } else {
            0.0
        }
    }
}

/// Reads source inputs under the compile-time size and line limits
#[derive(Debug, Clone)]
pub struct FileProcessor {
    pub enable_performance_logging: bool,
    pub warn_on_empty_input: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            enable_performance_logging: true,
            warn_on_empty_input: true,
        }
    }

    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            enable_performance_logging: prefs.enable_performance_logging,
            warn_on_empty_input: prefs.warn_on_empty_input,
        }
    }

    pub fn with_performance_logging(mut self, enabled: bool) -> Self {
        self.enable_performance_logging = enabled;
        self
    }

    pub fn with_empty_input_warning(mut self, enabled: bool) -> Self {
        self.warn_on_empty_input = enabled;
        self
    }

    /// Get the compile-time maximum file size
    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    pub fn large_file_threshold() -> u64 {
        LARGE_FILE_THRESHOLD
    }

    /// Read a file from disk and return its contents with metadata
    pub fn process_file(
        &self,
        file_path: &str,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = Instant::now();

        log_debug!("Starting file processing", "file" => file_path);

        let path = self.validate_path(file_path)?;
        let metadata = self.get_metadata(&path)?;
        self.validate_size(metadata.size, file_path)?;
        let source = self.read_file(&path, file_path)?;

        self.finish(source, metadata, file_path, start_time)
    }

    /// Read an arbitrary reader (stdin for `-`) under the same limits
    pub fn process_reader<R: Read>(
        &self,
        name: &str,
        reader: R,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = Instant::now();

        log_debug!("Starting reader processing", "input" => name);

        // One byte past the limit is enough to detect an oversized input
        let mut bytes = Vec::new();
        if let Err(e) = reader.take(MAX_FILE_SIZE + 1).read_to_end(&mut bytes) {
            let error = FileProcessorError::from_io(&e, name);
            log_error!(error.error_code(), "Failed to read input",
                "input" => name,
                "io_error" => e
            );
            return Err(error);
        }

        let size = bytes.len() as u64;
        self.validate_size(size, name)?;

        let source = match String::from_utf8(bytes) {
            Ok(source) => source,
            Err(e) => {
                let error = FileProcessorError::InvalidEncoding {
                    path: name.to_string(),
                };
                log_error!(error.error_code(), "Input is not valid UTF-8",
                    "input" => name,
                    "valid_up_to" => e.utf8_error().valid_up_to()
                );
                return Err(error);
            }
        };

        self.finish(source, FileMetadata::for_reader(name, size), name, start_time)
    }

    /// Shared tail of both entry points: line limit, empty warning, success log
    fn finish(
        &self,
        source: String,
        mut metadata: FileMetadata,
        file_path: &str,
        start_time: Instant,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let line_count = source.lines().count();
        if line_count > MAX_LINE_COUNT_FOR_ANALYSIS {
            let error = FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT_FOR_ANALYSIS,
            };
            log_error!(error.error_code(), "Input exceeds maximum line count for analysis",
                "file" => file_path,
                "lines" => line_count,
                "max_lines" => MAX_LINE_COUNT_FOR_ANALYSIS
            );
            return Err(error);
        }

        metadata.line_count = line_count;

        if metadata.is_empty() && self.warn_on_empty_input {
            log_warning!(code = codes::file_processing::EMPTY_FILE, "Input is empty; no tokens will be produced");
        }

        let result = FileProcessingResult {
            source,
            metadata,
            processing_duration: start_time.elapsed(),
        };

        self.log_processing_success(&result, file_path);

        Ok(result)
    }

    fn log_processing_success(&self, result: &FileProcessingResult, file_path: &str) {
        let duration_ms = format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0);

        if self.enable_performance_logging {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "Input read successfully with performance metrics",
                "file" => file_path,
                "size_bytes" => result.metadata.size,
                "size_human" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "chars" => result.char_count(),
                "duration_ms" => duration_ms,
                "chars_per_ms" => format!("{:.2}", result.processing_rate()),
                "is_large_file" => result.metadata.is_large_file()
            );
        } else {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "Input read successfully",
                "file" => file_path,
                "size_bytes" => result.metadata.size,
                "lines" => result.metadata.line_count,
                "duration_ms" => duration_ms
            );
        }
    }

    /// Validate file path and check existence
    fn validate_path(&self, file_path: &str) -> Result<PathBuf, FileProcessorError> {
        if file_path.is_empty() {
            let error = FileProcessorError::InvalidPath {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        let path = Path::new(file_path);

        if !path.exists() {
            let error = FileProcessorError::FileNotFound {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "File not found", "path" => file_path);
            return Err(error);
        }

        if !path.is_file() {
            let error = FileProcessorError::InvalidPath {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => file_path);
            return Err(error);
        }

        match path.canonicalize() {
            Ok(canonical_path) => {
                log_debug!("Path validation successful",
                    "canonical_path" => canonical_path.display()
                );
                Ok(canonical_path)
            }
            Err(e) => {
                let error = FileProcessorError::IoError {
                    message: format!("Failed to resolve path '{}': {}", file_path, e),
                };
                log_error!(error.error_code(), "Failed to canonicalize path",
                    "path" => file_path,
                    "io_error" => e
                );
                Err(error)
            }
        }
    }

    fn get_metadata(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| {
            let error = FileProcessorError::from_io(&e, &path.display().to_string());
            log_error!(error.error_code(), "Failed to read file metadata",
                "path" => path.display(),
                "io_error" => e
            );
            error
        })?;

        let file_metadata = FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            extension: path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|s| s.to_lowercase()),
            line_count: 0,
            modified: metadata.modified().ok(),
        };

        log_debug!("File metadata collected",
            "size_bytes" => file_metadata.size,
            "size_human" => file_metadata.human_readable_size(),
            "extension" => file_metadata.extension.as_deref().unwrap_or("none"),
            "max_size_bytes" => MAX_FILE_SIZE,
            "is_large_file" => file_metadata.is_large_file()
        );

        Ok(file_metadata)
    }

    /// Enforce the compile-time size ceiling
    fn validate_size(&self, size: u64, file_path: &str) -> Result<(), FileProcessorError> {
        if size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "Input exceeds compile-time maximum size limit",
                "file" => file_path,
                "size_bytes" => size,
                "size_human" => human_readable_bytes(size),
                "limit_bytes" => MAX_FILE_SIZE,
                "limit_human" => human_readable_bytes(MAX_FILE_SIZE)
            );
            return Err(error);
        }
        Ok(())
    }

    fn read_file(&self, path: &Path, file_path: &str) -> Result<String, FileProcessorError> {
        match fs::read_to_string(path) {
            Ok(content) => {
                log_debug!("File content read successfully",
                    "file" => file_path,
                    "bytes" => content.len()
                );
                Ok(content)
            }
            Err(e) => {
                let error = FileProcessorError::from_io(&e, file_path);
                log_error!(error.error_code(), "Failed to read file contents",
                    "file" => file_path,
                    "io_error" => e
                );
                Err(error)
            }
        }
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

// Convenience functions used by the module-level API

pub fn process_file(file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

pub fn process_reader<R: Read>(
    name: &str,
    reader: R,
) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_reader(name, reader)
}

pub fn create_processor() -> FileProcessor {
    FileProcessor::new()
}

pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

pub fn should_halt_on_error(error: &FileProcessorError) -> bool {
    error.requires_halt()
}

pub fn get_error_code(error: &FileProcessorError) -> crate::logging::Code {
    error.error_code()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn test_process_valid_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("input.txt");
        fs::write(&file_path, "int x = 1;\nreturn x;\n").unwrap();

        let result = FileProcessor::new()
            .process_file(file_path.to_str().unwrap())
            .unwrap();

        assert_eq!(result.source, "int x = 1;\nreturn x;\n");
        assert_eq!(result.metadata.line_count, 2);
        assert_eq!(result.metadata.size, 21);
        assert_eq!(result.metadata.extension.as_deref(), Some("txt"));
        assert!(result.metadata.modified.is_some());
        assert!(!result.metadata.is_large_file());
    }

    #[test]
    fn test_missing_file() {
        let result = FileProcessor::new().process_file("/definitely/not/here/input.txt");
        assert_matches!(result, Err(FileProcessorError::FileNotFound { .. }));
    }

    #[test]
    fn test_empty_path() {
        let result = FileProcessor::new().process_file("");
        assert_matches!(result, Err(FileProcessorError::InvalidPath { .. }));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        let result = FileProcessor::new().process_file(dir.path().to_str().unwrap());
        assert_matches!(result, Err(FileProcessorError::InvalidPath { .. }));
    }

    #[test]
    fn test_empty_file_is_not_an_error() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("empty.txt");
        fs::write(&file_path, "").unwrap();

        let result = FileProcessor::new()
            .process_file(file_path.to_str().unwrap())
            .unwrap();

        assert!(result.source.is_empty());
        assert!(result.metadata.is_empty());
        assert!(result.is_effectively_empty());
        assert_eq!(result.metadata.line_count, 0);
    }

    #[test]
    fn test_invalid_utf8_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("binary.bin");
        fs::write(&file_path, [0x66, 0x6f, 0xff, 0xfe]).unwrap();

        let result = FileProcessor::new().process_file(file_path.to_str().unwrap());
        assert_matches!(result, Err(FileProcessorError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_process_reader() {
        let result = FileProcessor::new()
            .process_reader("<stdin>", Cursor::new("a + b\n"))
            .unwrap();

        assert_eq!(result.source, "a + b\n");
        assert_eq!(result.metadata.path, PathBuf::from("<stdin>"));
        assert_eq!(result.metadata.size, 6);
        assert_eq!(result.metadata.line_count, 1);
        assert!(result.metadata.modified.is_none());
    }

    #[test]
    fn test_reader_size_limit() {
        let oversized = io::repeat(b'a').take(MAX_FILE_SIZE + 10);
        let result = FileProcessor::new().process_reader("<stdin>", oversized);

        assert_matches!(
            result,
            Err(FileProcessorError::FileTooLarge { size, max_size })
                if size == MAX_FILE_SIZE + 1 && max_size == MAX_FILE_SIZE
        );
    }

    #[test]
    fn test_reader_invalid_utf8() {
        let result = FileProcessor::new().process_reader("<stdin>", Cursor::new(vec![0xc3, 0x28]));
        assert_matches!(result, Err(FileProcessorError::InvalidEncoding { ref path }) if path == "<stdin>");
    }

    #[test]
    fn test_error_codes() {
        let not_found = FileProcessorError::FileNotFound {
            path: "input.txt".to_string(),
        };
        assert_eq!(not_found.error_code().as_str(), "E005");
        assert!(not_found.requires_halt());
        assert_eq!(not_found.category(), "FileProcessing");

        let lines = FileProcessorError::TooManyLines {
            lines: 10,
            max_lines: 5,
        };
        assert_eq!(lines.error_code(), codes::file_processing::TOO_MANY_LINES);
    }

    #[test]
    fn test_io_error_mapping() {
        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        assert_matches!(
            FileProcessorError::from_io(&denied, "x"),
            FileProcessorError::PermissionDenied { .. }
        );

        let other = io::Error::new(io::ErrorKind::Interrupted, "again");
        assert_matches!(
            FileProcessorError::from_io(&other, "x"),
            FileProcessorError::IoError { ref message } if message.contains("again")
        );
    }

    #[test]
    fn test_human_readable_size() {
        assert_eq!(human_readable_bytes(512), "512 B");
        assert_eq!(human_readable_bytes(2048), "2.00 KB");
        assert_eq!(human_readable_bytes(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_builder_preferences() {
        let processor = FileProcessor::new()
            .with_performance_logging(false)
            .with_empty_input_warning(false);
        assert!(!processor.enable_performance_logging);
        assert!(!processor.warn_on_empty_input);
    }
}
