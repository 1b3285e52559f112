//! File processor module with compile-time limits and global logging integration

mod processor;

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT_FOR_ANALYSIS,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::log_debug;
use std::io::Read;

pub use processor::{FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError};

/// Process a file with default settings
pub fn process_file(file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
    processor::process_file(file_path)
}

/// Process any reader with default settings
pub fn process_reader<R: Read>(
    name: &str,
    reader: R,
) -> Result<FileProcessingResult, FileProcessorError> {
    processor::process_reader(name, reader)
}

pub fn create_processor() -> FileProcessor {
    processor::create_processor()
}

pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    processor::create_processor_from_preferences(prefs)
}

pub fn should_halt_on_error(error: &FileProcessorError) -> bool {
    processor::should_halt_on_error(error)
}

pub fn get_error_code(error: &FileProcessorError) -> crate::logging::Code {
    processor::get_error_code(error)
}

/// Get the compile-time maximum file size limit
///
/// This bound is fixed in the binary and cannot be raised at runtime.
pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

pub fn get_large_file_threshold() -> u64 {
    LARGE_FILE_THRESHOLD
}

/// Startup check that file processing codes are registered
pub fn init_file_processor_logging() -> Result<(), String> {
    let required_codes = [
        crate::logging::codes::file_processing::FILE_NOT_FOUND,
        crate::logging::codes::file_processing::FILE_TOO_LARGE,
        crate::logging::codes::file_processing::EMPTY_FILE,
        crate::logging::codes::file_processing::PERMISSION_DENIED,
        crate::logging::codes::file_processing::INVALID_ENCODING,
        crate::logging::codes::file_processing::IO_ERROR,
        crate::logging::codes::file_processing::INVALID_PATH,
        crate::logging::codes::file_processing::TOO_MANY_LINES,
        crate::logging::codes::success::FILE_PROCESSING_SUCCESS,
    ];

    for code in &required_codes {
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "File processor code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    log_debug!("File processor compile-time configuration loaded",
        "max_file_size" => MAX_FILE_SIZE,
        "large_file_threshold" => LARGE_FILE_THRESHOLD,
        "max_line_count" => MAX_LINE_COUNT_FOR_ANALYSIS
    );

    Ok(())
}
