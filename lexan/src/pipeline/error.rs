use crate::file_processor::FileProcessorError;
use crate::lexical::LexerError;

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] LexerError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    /// The input could not be opened or read
    pub fn is_input_failure(&self) -> bool {
        matches!(self, PipelineError::FileProcessing(_))
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            PipelineError::FileProcessing(e) => e.error_code(),
            PipelineError::LexicalAnalysis(e) => e.error_code(),
            PipelineError::Pipeline { .. } => crate::logging::codes::pipeline::PIPELINE_FAILURE,
        }
    }
}
