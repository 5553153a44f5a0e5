//! Process-wide logging for scopetab
//!
//! One [`LoggingService`] and one [`ErrorCollector`] are installed at startup.
//! Until then every macro is a no-op. Events logged while an input is being
//! analyzed are also filed under that input for the cargo-style summary.

pub mod codes;
pub mod collector;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use collector::{ErrorCollector, InputContext};
pub use events::{LogEvent, LogLevel};
#[cfg(feature = "log-bridge")]
pub use service::LogCrateLogger;
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();
static GLOBAL_ERROR_COLLECTOR: OnceLock<ErrorCollector> = OnceLock::new();

thread_local! {
    static INPUT_CONTEXT: RefCell<Option<InputContext>> = const { RefCell::new(None) };
}

/// Install a stderr service chosen from the logging preferences
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;
    init_global_logging_with_service(Arc::new(LoggingService::with_config()))
}

/// Install a caller-built service (the CLI's `log` bridge, tests)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service.clone())
        .map_err(|_| "Global logger already initialized")?;
    // only ever set together with the logger
    let _ = GLOBAL_ERROR_COLLECTOR.set(ErrorCollector::new());

    service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));
    Ok(())
}

pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(Arc::as_ref)
}

pub fn try_get_global_error_collector() -> Option<&'static ErrorCollector> {
    GLOBAL_ERROR_COLLECTOR.get()
}

/// Run `f` with `source`/`input_id` as this thread's current input
pub fn with_file_context<F, R>(source: PathBuf, input_id: usize, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = INPUT_CONTEXT.with(|ctx| ctx.replace(Some(InputContext::new(source, input_id))));
    let result = f();
    INPUT_CONTEXT.with(|ctx| *ctx.borrow_mut() = previous);
    result
}

pub fn get_current_file_context() -> Option<InputContext> {
    INPUT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

fn decorate(mut event: LogEvent, line: Option<u32>, context: Vec<(&str, String)>) -> LogEvent {
    if let Some(line) = line {
        event = event.with_line(line);
    }
    for (key, value) in context {
        event = event.with_context(key, &value);
    }
    if config::include_file_context() {
        if let Some(input) = get_current_file_context() {
            event = event
                .with_context("input", &input.source.display().to_string())
                .with_context("input_id", &input.input_id.to_string());
        }
    }
    event
}

/// Send to the service and, for warnings and errors, file under the current input
fn dispatch(logger: &LoggingService, event: LogEvent) {
    if event.is_error() || event.is_warning() {
        if let (Some(input), Some(collector)) =
            (get_current_file_context(), try_get_global_error_collector())
        {
            collector.record_event(&input, event.clone());
        }
    }
    logger.log_event(event);
}

/// Backs `log_error!`
pub fn log_error_with_context(
    code: Code,
    message: &str,
    line: Option<u32>,
    context: Vec<(&str, String)>,
) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };
    let event = LogEvent::error(code, config::clamp_message(message));
    dispatch(logger, decorate(event, line, context));
}

/// Backs `log_warning!`
pub fn log_warning_with_context(
    code: Option<Code>,
    message: &str,
    line: Option<u32>,
    context: Vec<(&str, String)>,
) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };
    let message = config::clamp_message(message);
    let event = match code {
        Some(code) => LogEvent::warning_with_code(code, message),
        None => LogEvent::warning(message),
    };
    dispatch(logger, decorate(event, line, context));
}

/// Backs `log_success!`
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, String)>) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(decorate(LogEvent::success(code, message), None, context));
    }
}

/// Backs `log_info!`
pub fn log_info_with_context(message: &str, context: Vec<(&str, String)>) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(decorate(LogEvent::info(message), None, context));
    }
}

/// Backs `log_debug!`
pub fn log_debug_with_context(message: &str, context: Vec<(&str, String)>) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };
    if logger.should_log(LogLevel::Debug) {
        logger.log_event(decorate(LogEvent::debug(message), None, context));
    }
}

/// Print the collected warnings and errors to stderr, grouped by input
pub fn print_cargo_style_summary() {
    if let Some(collector) = try_get_global_error_collector() {
        let summary = collector.format_cargo_style();
        if !summary.trim().is_empty() {
            eprintln!("{}", summary);
        }
    }
}

/// Install a debug-level [`MemoryLogger`] as the global service, once per test binary.
/// Tests run in parallel, so filter what it returns by `input` or `source`.
#[cfg(test)]
pub(crate) fn test_memory_logger() -> Arc<MemoryLogger> {
    static MEMORY: OnceLock<Arc<MemoryLogger>> = OnceLock::new();
    MEMORY
        .get_or_init(|| {
            let memory = Arc::new(MemoryLogger::new());
            let service = LoggingService::new(memory.clone(), LogLevel::Debug);
            if let Err(error) = init_global_logging_with_service(Arc::new(service)) {
                panic!("test logger: {}", error);
            }
            memory
        })
        .clone()
}
