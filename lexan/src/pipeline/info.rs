use crate::config::compile_time::{file_processing, lexical as lexical_limits};
use crate::lexical::KEYWORDS;

/// Information about pipeline capabilities
#[derive(Debug, Clone)]
pub struct PipelineInfo {
    pub pipeline_stages: usize,
    pub max_file_size: u64,
    pub max_token_length: usize,
    pub max_token_count: usize,
    pub keyword_count: usize,
    pub output_formats: Vec<String>,
    pub build_profile: &'static str,
    pub cargo_style_output: bool,
}

impl PipelineInfo {
    pub fn report(&self) -> String {
        format!(
            "Lexical Analysis Pipeline:\n\
             - Pipeline Stages: {}\n\
             - Max File Size: {} MB\n\
             - Max Token Length: {} chars\n\
             - Max Token Count: {}\n\
             - Keywords: {}\n\
             - Output Formats: {}\n\
             - Build Profile: {}\n\
             - Cargo-style Output: {}",
            self.pipeline_stages,
            self.max_file_size / (1024 * 1024),
            self.max_token_length,
            self.max_token_count,
            self.keyword_count,
            self.output_formats.join(", "),
            self.build_profile,
            self.cargo_style_output
        )
    }
}

pub fn get_pipeline_info() -> PipelineInfo {
    PipelineInfo {
        pipeline_stages: 3,
        max_file_size: file_processing::MAX_FILE_SIZE,
        max_token_length: lexical_limits::MAX_TOKEN_LENGTH,
        max_token_count: lexical_limits::MAX_TOKEN_COUNT,
        keyword_count: KEYWORDS.len(),
        output_formats: vec!["plain".to_string(), "json".to_string()],
        build_profile: crate::config::build_info::profile(),
        cargo_style_output: crate::logging::config::use_cargo_style_output(),
    }
}
