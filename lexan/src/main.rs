use lexan::config::RuntimeConfig;
use lexan::logging::{self, codes};
use lexan::output::OutputFormat;
use lexan::pipeline::{self, PipelineError};
use std::env;
use std::io::{self, BufWriter, Write};

/// Input read when no FILE argument is given
const DEFAULT_INPUT: &str = "input.txt";

/// Command line options
#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    inputs: Vec<String>,
    show_help: bool,
    show_version: bool,
    json: bool,
    whitespace: bool,
    positions: bool,
    summary: bool,
    config_path: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program_name = args.first().map(String::as_str).unwrap_or("lexan");
    let options = parse_options(args.get(1..).unwrap_or_default());

    if options.show_help {
        print_help(program_name);
        return Ok(());
    }
    if options.show_version {
        println!("lexan {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = match load_config(&options) {
        Ok(config) => config,
        Err(error) => {
            logging::safe_log_error(error.error_code(), &error.to_string());
            eprintln!("Error loading configuration: {}", error);
            std::process::exit(1);
        }
    };

    if let Err(message) = initialize(&config) {
        logging::safe_log_error(codes::system::INITIALIZATION_FAILURE, &message);
        eprintln!("Initialization failed: {}", message);
        std::process::exit(1);
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for input in &options.inputs {
        let outcome = if input == "-" {
            pipeline::process_reader(pipeline::STDIN_NAME, io::stdin().lock(), &config, &mut out)
        } else {
            pipeline::process_file(input, &config, &mut out)
        };

        if let Err(error) = outcome {
            let _ = out.flush();
            report_failure(&error);
            logging::print_cargo_style_summary();
            std::process::exit(1);
        }
    }

    out.flush()?;
    logging::print_cargo_style_summary();

    let summary = logging::get_processing_summary();
    lexan::log_info!("Run complete",
        "files" => summary.total_files,
        "warnings" => summary.total_warnings,
        "duration_ms" => summary.total_processing_time.as_millis()
    );

    Ok(())
}

/// Install logging and check that every stage is ready
fn initialize(config: &RuntimeConfig) -> Result<(), String> {
    logging::config::init_runtime_preferences(config.logging.clone())?;
    logging::init_global_logging()?;
    pipeline::validate_pipeline()
}

fn load_config(options: &CliOptions) -> Result<RuntimeConfig, lexan::config::ConfigError> {
    let mut config = match &options.config_path {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };
    apply_overrides(&mut config, options);
    Ok(config)
}

/// Command line flags win over the config file and environment
fn apply_overrides(config: &mut RuntimeConfig, options: &CliOptions) {
    if options.json {
        config.output.format = OutputFormat::Json;
    }
    if options.whitespace {
        config.output.include_whitespace = true;
    }
    if options.positions {
        config.output.include_positions = true;
    }
    if options.summary {
        config.output.print_summary = true;
        config.lexical.collect_detailed_metrics = true;
    }
}

fn report_failure(error: &PipelineError) {
    match error {
        PipelineError::FileProcessing(file_err) => {
            eprintln!("Error opening file: {}", file_err);
        }
        PipelineError::LexicalAnalysis(lex_err) => {
            eprintln!("Lexical analysis failed: {}", lex_err);
        }
        PipelineError::Pipeline { message } => {
            eprintln!("Pipeline error: {}", message);
        }
    }
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => options.show_help = true,
            "--version" | "-V" => options.show_version = true,
            "--json" => options.json = true,
            "--whitespace" => options.whitespace = true,
            "--positions" => options.positions = true,
            "--summary" => options.summary = true,
            "--config" => {
                if i + 1 < args.len() {
                    options.config_path = Some(args[i + 1].clone());
                    i += 1;
                } else {
                    eprintln!("Warning: --config requires a path");
                }
            }
            "-" => options.inputs.push("-".to_string()),
            other if other.starts_with('-') => {
                eprintln!("Warning: Unknown option '{}'", other);
            }
            path => options.inputs.push(path.to_string()),
        }
        i += 1;
    }

    if options.inputs.is_empty() {
        options.inputs.push(DEFAULT_INPUT.to_string());
    }

    options
}

fn print_help(program_name: &str) {
    println!("lexan v{}", env!("CARGO_PKG_VERSION"));
    println!("Single-pass lexical analyzer");
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] [FILE]...", program_name);
    println!();
    println!("ARGUMENTS:");
    println!("    [FILE]...    Files to tokenize (default: {}); '-' reads stdin", DEFAULT_INPUT);
    println!();
    println!("OPTIONS:");
    println!("    -h, --help          Show this help message");
    println!("    -V, --version       Show version");
    println!("    --json              Write one JSON object per token");
    println!("    --whitespace        Include whitespace tokens in the output");
    println!("    --positions         Append line:column to each token");
    println!("    --summary           Print a per-type token count after the listing");
    println!("    --config <PATH>     Load runtime preferences from a TOML file");
    println!();
    println!("OUTPUT:");
    println!("    Tokens go to stdout as 'Token: <text> - Type: <type>'");
    println!("    Diagnostics go to stderr");
    println!();
    println!("EXAMPLES:");
    println!("    {}                         # Tokenize {}", program_name, DEFAULT_INPUT);
    println!("    {} main.c --positions      # With line:column", program_name);
    println!("    cat main.c | {} - --json   # JSON Lines from stdin", program_name);
    println!();

    let pipeline_info = pipeline::get_pipeline_info();
    println!("PIPELINE CAPABILITIES:");
    for line in pipeline_info.report().lines() {
        println!("    {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_input() {
        let options = parse_options(&[]);
        assert_eq!(options.inputs, vec![DEFAULT_INPUT.to_string()]);
        assert!(!options.json);
    }

    #[test]
    fn test_parse_flags_and_files() {
        let options = parse_options(&args(&[
            "--json",
            "a.c",
            "--positions",
            "-",
            "--config",
            "lexan.toml",
            "--summary",
        ]));

        assert_eq!(
            options,
            CliOptions {
                inputs: args(&["a.c", "-"]),
                json: true,
                positions: true,
                summary: true,
                config_path: Some("lexan.toml".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_unknown_option_is_ignored() {
        let options = parse_options(&args(&["--bogus", "x.c"]));
        assert_eq!(options.inputs, args(&["x.c"]));
    }

    #[test]
    fn test_config_without_path() {
        let options = parse_options(&args(&["--config"]));
        assert_eq!(options.config_path, None);
        assert_eq!(options.inputs, vec![DEFAULT_INPUT.to_string()]);
    }

    #[test]
    fn test_overrides() {
        let mut config = RuntimeConfig::default();
        let options = parse_options(&args(&["--json", "--whitespace", "--summary"]));
        apply_overrides(&mut config, &options);

        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.include_whitespace);
        assert!(config.output.print_summary);
        assert!(config.lexical.collect_detailed_metrics);
    }

    #[test]
    fn test_initialize_runs_once() {
        let config = RuntimeConfig::default();
        assert_eq!(initialize(&config), Ok(()));

        let second = initialize(&config).unwrap_err();
        assert!(second.contains("already initialized"), "{}", second);
        assert_eq!(
            codes::get_severity(codes::system::INITIALIZATION_FAILURE.as_str()),
            codes::Severity::Critical
        );
    }

    #[test]
    fn test_help_and_version_flags() {
        let options = parse_options(&args(&["-h", "--version"]));
        assert!(options.show_help);
        assert!(options.show_version);
    }
}
