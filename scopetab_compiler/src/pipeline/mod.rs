//! Input to tables: token reader -> state machine -> finalize
//!
//! Each input gets its own machine. Errors are logged with their code and
//! recorded against the input before they are returned. `input_id` is the
//! input's position in the run, so repeated names (`-` twice) stay apart.

mod error;
mod result;
mod stats;
mod validation;

pub use error::PipelineError;
pub use result::PipelineResult;
pub use stats::PipelineStats;
pub use validation::validate_pipeline;

use crate::analysis::SymbolTableMachine;
use crate::config::RuntimeConfig;
use crate::logging::{self, codes};
use crate::tokens::TokenReader;
use crate::{log_error, log_info, log_success};
use std::io::BufRead;
use std::path::PathBuf;
use std::time::Instant;

/// Load and analyze one token file
pub fn process_file(
    file_path: &str,
    input_id: usize,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    logging::with_file_context(PathBuf::from(file_path), input_id, || {
        let loaded = crate::file_processor::process_file(file_path)?;
        analyze_reader(file_path, loaded.content.as_bytes(), config)
    })
}

/// Analyze a token stream from any line-oriented source (stdin, a buffer)
pub fn process_reader<R: BufRead>(
    name: &str,
    input_id: usize,
    reader: R,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    logging::with_file_context(PathBuf::from(name), input_id, || {
        analyze_reader(name, reader, config)
    })
}

fn analyze_reader<R: BufRead>(
    name: &str,
    reader: R,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    let start = Instant::now();
    log_info!("Starting symbol table analysis", "source" => name);

    let outcome = run_machine(name, reader, config);

    match outcome {
        Ok((output, tokens_consumed, groups_skipped)) => {
            let stats = PipelineStats {
                tokens_consumed,
                groups_skipped,
                duration: start.elapsed(),
            };
            let result = PipelineResult::new(name, output, stats);
            result.log_success();
            Ok(result)
        }
        Err(error) => {
            match error.line() {
                Some(line) => log_error!(error.error_code(), &error.to_string(), line = line),
                None => log_error!(error.error_code(), &error.to_string()),
            }
            Err(error)
        }
    }
}

fn run_machine<R: BufRead>(
    name: &str,
    reader: R,
    config: &RuntimeConfig,
) -> Result<(crate::output::AnalysisOutput, usize, usize), PipelineError> {
    config.validate()?;

    let mut tokens = TokenReader::with_preferences(reader, name, config.input.clone());
    let mut machine = SymbolTableMachine::new(config.analysis.clone());

    for token in tokens.by_ref() {
        machine.step(&token?)?;
    }

    log_success!(codes::success::TOKEN_STREAM_CONSUMED, "Token stream consumed",
        "tokens" => tokens.tokens_read(),
        "skipped" => tokens.skipped(),
        "input_lines" => tokens.input_line()
    );

    let output = machine.finalize()?;
    Ok((output, tokens.tokens_read(), tokens.skipped()))
}
