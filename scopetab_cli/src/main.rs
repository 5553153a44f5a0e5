//! # scopetab CLI
//!
//! Reads `<KIND,VALUE,LINE>` token streams from files or stdin and prints
//! the reference table followed by the symbol table.

mod args;

use args::ScopetabArgs;
use clap::Parser;
use scopetab_compiler::config::{LogLevel, OutputFormat, RuntimeConfig};
use scopetab_compiler::logging::{self, LogCrateLogger, LoggingService};
use scopetab_compiler::pipeline::{self, PipelineError, PipelineResult};
use scopetab_compiler::{analysis, log_info, output};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = ScopetabArgs::parse();

    if args.dot {
        print!("{}", analysis::render_dot());
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => RuntimeConfig::from_file(path)?,
        None => RuntimeConfig::default(),
    };
    args.apply_to(&mut config);
    config.validate()?;

    if args.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    init_logging(&config)?;
    log_info!("scopetab starting", "inputs" => args.inputs().len());

    let inputs = args.inputs();
    let mut failed = 0;
    for (input_id, input) in inputs.iter().enumerate() {
        match analyze(input, input_id, &config) {
            Ok(result) => print_result(&result, &config, inputs.len() > 1)?,
            Err(error) => {
                failed += 1;
                eprintln!("error[{}]: {}", error.error_code(), error);
            }
        }
    }

    if failed > 0 {
        if logging::config::use_cargo_style_output() {
            logging::print_cargo_style_summary();
        }
        std::process::exit(1);
    }

    Ok(())
}

/// `input_id` keeps diagnostics for repeated names (`scopetab - -`) apart
fn analyze(
    input: &str,
    input_id: usize,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    if input == "-" {
        let stdin = std::io::stdin();
        pipeline::process_reader("<stdin>", input_id, stdin.lock(), config)
    } else {
        pipeline::process_file(input, input_id, config)
    }
}

fn print_result(
    result: &PipelineResult,
    config: &RuntimeConfig,
    with_header: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match config.output.format {
        OutputFormat::Json => {
            println!("{}", result.to_report().to_json(config.output.pretty_json)?);
        }
        OutputFormat::Text => {
            if with_header {
                println!("==> {} <==", result.source);
            }
            print!("{}", output::render_tables(&result.output, &config.output));
        }
    }
    Ok(())
}

/// Route library events either straight to stderr or through `env_logger`
fn init_logging(config: &RuntimeConfig) -> Result<(), String> {
    let preferences = &config.logging;
    logging::config::init_runtime_preferences(preferences.clone())?;

    if preferences.enable_console_logging {
        return logging::init_global_logging();
    }

    let default_filter = format!("scopetab={}", level_filter(preferences.min_log_level));
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_target(false)
        .init();

    let service = LoggingService::new(
        Arc::new(LogCrateLogger::new(preferences.use_structured_logging)),
        preferences.min_log_level.to_events_log_level(),
    );
    logging::init_global_logging_with_service(Arc::new(service))
}

fn level_filter(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warning => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
    }
}
