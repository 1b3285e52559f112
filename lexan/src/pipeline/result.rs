use crate::file_processor::FileMetadata;
use crate::lexical::LexicalMetrics;
use std::time::Duration;

/// Outcome of one input run through the pipeline
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub file_metadata: FileMetadata,
    pub lexical_metrics: LexicalMetrics,
    /// Every token emitted, whitespace included
    pub token_count: usize,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn new(
        file_metadata: FileMetadata,
        lexical_metrics: LexicalMetrics,
        token_count: usize,
        processing_duration: Duration,
    ) -> Self {
        Self {
            file_metadata,
            lexical_metrics,
            token_count,
            processing_duration,
        }
    }

    pub fn log_success(&self, file_path: &str) {
        let seconds = self.processing_duration.as_secs_f64();
        let per_second = |n: f64| if seconds > 0.0 { n / seconds } else { 0.0 };

        if crate::logging::config::log_performance_events() {
            crate::log_success!(
                crate::logging::codes::success::PIPELINE_COMPLETE,
                "Lexical analysis pipeline succeeded",
                "file" => file_path,
                "tokens" => self.token_count,
                "error_signal_tokens" => self.lexical_metrics.error_signal_tokens,
                "duration_ms" => format!("{:.2}", seconds * 1000.0),
                "processing_rate_bytes_per_sec" => format!("{:.0}", per_second(self.file_metadata.size as f64)),
                "processing_rate_tokens_per_sec" => format!("{:.0}", per_second(self.token_count as f64))
            );
        } else {
            crate::log_success!(
                crate::logging::codes::success::PIPELINE_COMPLETE,
                "Lexical analysis pipeline succeeded",
                "file" => file_path,
                "tokens" => self.token_count,
                "error_signal_tokens" => self.lexical_metrics.error_signal_tokens
            );
        }
    }
}
