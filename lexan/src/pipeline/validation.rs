/// Validate that the pipeline stages are properly configured
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating pipeline configuration");

    crate::file_processor::init_file_processor_logging()?;
    crate::lexical::init_lexical_analysis_logging()?;

    let output_codes = [
        crate::logging::codes::output::WRITE_FAILED,
        crate::logging::codes::success::OUTPUT_COMPLETE,
        crate::logging::codes::pipeline::PIPELINE_FAILURE,
        crate::logging::codes::success::PIPELINE_COMPLETE,
    ];
    for code in output_codes {
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Pipeline code {} not found in metadata registry", code));
        }
    }

    crate::log_success!(
        crate::logging::codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Pipeline validation succeeded",
        "stages_validated" => 3,
        "file_processing" => true,
        "lexical_analysis" => true,
        "output" => true
    );

    Ok(())
}
