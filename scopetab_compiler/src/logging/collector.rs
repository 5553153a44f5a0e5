//! Per-input diagnostics, printed cargo-style once the run is over
//!
//! Inputs are keyed by their position on the command line as well as their
//! name, so two reads of `-` stay apart.

use super::codes;
use super::events::LogEvent;
use crate::config::compile_time::logging::MAX_LOG_EVENTS_PER_FILE;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The input a thread is currently analyzing
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct InputContext {
    pub input_id: usize,
    pub source: PathBuf,
}

impl InputContext {
    pub fn new(source: impl Into<PathBuf>, input_id: usize) -> Self {
        Self {
            input_id,
            source: source.into(),
        }
    }
}

/// Warnings and errors grouped by input
#[derive(Default)]
pub struct ErrorCollector {
    inputs: Mutex<BTreeMap<InputContext, Vec<LogEvent>>>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<InputContext, Vec<LogEvent>>> {
        self.inputs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store an event; past the per-input limit a single truncation notice is kept
    pub fn record_event(&self, input: &InputContext, event: LogEvent) {
        let mut inputs = self.lock();
        let events = inputs.entry(input.clone()).or_default();

        if events.len() < MAX_LOG_EVENTS_PER_FILE {
            events.push(event);
        } else if events.len() == MAX_LOG_EVENTS_PER_FILE {
            events.push(LogEvent::warning(&format!(
                "Too many events for input (limit: {})",
                MAX_LOG_EVENTS_PER_FILE
            )));
        }
    }

    pub fn events_for(&self, input: &InputContext) -> Vec<LogEvent> {
        self.lock().get(input).cloned().unwrap_or_default()
    }

    /// `(errors, warnings)` across every input
    pub fn totals(&self) -> (usize, usize) {
        self.lock().values().flatten().fold((0, 0), |(errors, warnings), event| {
            (
                errors + usize::from(event.is_error()),
                warnings + usize::from(event.is_warning()),
            )
        })
    }

    /// Render everything collected, errors before warnings within each input
    pub fn format_cargo_style(&self) -> String {
        let mut output = String::new();

        for (input, events) in self.lock().iter() {
            let errors = events.iter().filter(|e| e.is_error());
            let warnings = events.iter().filter(|e| e.is_warning());
            if events.iter().all(|e| !e.is_error() && !e.is_warning()) {
                continue;
            }

            let _ = writeln!(output, "Checking {}...", input.source.display());
            for event in errors.chain(warnings) {
                write_event(&mut output, input, event);
            }
            output.push('\n');
        }

        let (errors, warnings) = self.totals();
        if errors > 0 {
            let _ = writeln!(output, "Total errors: {}", errors);
        }
        if warnings > 0 {
            let _ = writeln!(output, "Total warnings: {}", warnings);
        }
        output
    }
}

fn write_event(output: &mut String, input: &InputContext, event: &LogEvent) {
    let code = event.code.as_str();
    let label = if event.is_error() { "error" } else { "warning" };
    let _ = write!(output, "{}[{}]: {}", label, code, event.message);
    if let Some(line) = event.line {
        let _ = write!(output, " --> {}:{}", input.source.display(), line);
    }
    output.push('\n');

    if event.is_error() {
        let _ = writeln!(
            output,
            "  = severity: {}, category: {}",
            codes::get_severity(code).as_str(),
            codes::get_category(code)
        );
    }
    for (key, value) in &event.context {
        if key != "input" && key != "input_id" {
            let _ = writeln!(output, "  = {}: {}", key, value);
        }
    }
    if event.is_error() {
        let _ = writeln!(output, "  = help: {}", codes::get_action(code));
    }
}
