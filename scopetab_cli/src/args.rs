use clap::{Parser, ValueEnum};
use scopetab_compiler::config::{LogLevel, OutputFormat, RuntimeConfig};
use std::path::PathBuf;

/// Build scope-structured symbol and reference tables from a token stream
#[derive(Debug, Parser)]
#[command(name = "scopetab", author, version)]
pub struct ScopetabArgs {
    /// Token files to analyze. `-` or no files reads stdin
    pub files: Vec<String>,

    /// Output format for the tables
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<FormatArg>,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Minimum log level (error, warning, info, debug)
    #[arg(short = 'l', long, value_parser = parse_level)]
    pub log_level: Option<LogLevel>,

    /// Emit log events as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Archive scopes still open at end of stream instead of failing
    #[arg(long)]
    pub allow_unbalanced: bool,

    /// Ignore tokens of an unrecognised kind
    #[arg(long)]
    pub skip_unknown_kinds: bool,

    /// Print the transition graph as Graphviz DOT and exit
    #[arg(long)]
    pub dot: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn parse_level(value: &str) -> Result<LogLevel, String> {
    value.parse()
}

impl ScopetabArgs {
    /// Inputs to analyze, stdin when none were named
    pub fn inputs(&self) -> Vec<&str> {
        if self.files.is_empty() {
            vec!["-"]
        } else {
            self.files.iter().map(String::as_str).collect()
        }
    }

    /// Layer command-line flags over a loaded configuration
    pub fn apply_to(&self, config: &mut RuntimeConfig) {
        if let Some(format) = self.format {
            config.output.format = format.into();
        }
        if let Some(level) = self.log_level {
            config.logging.min_log_level = level;
        }
        if self.json_logs {
            config.logging.use_structured_logging = true;
        }
        if self.allow_unbalanced {
            config.analysis.require_balanced_scopes = false;
        }
        if self.skip_unknown_kinds {
            config.analysis.skip_unknown_kinds = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ScopetabArgs {
        ScopetabArgs::try_parse_from(std::iter::once("scopetab").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_no_files_reads_stdin() {
        let args = parse(&[]);
        assert_eq!(args.inputs(), vec!["-"]);
        assert!(!args.dot);
    }

    #[test]
    fn test_files_and_flags() {
        let args = parse(&[
            "a.tokens",
            "-",
            "--format",
            "json",
            "--log-level",
            "debug",
            "--allow-unbalanced",
            "--json-logs",
        ]);
        assert_eq!(args.inputs(), vec!["a.tokens", "-"]);
        assert_eq!(args.format, Some(FormatArg::Json));
        assert_eq!(args.log_level, Some(LogLevel::Debug));

        let mut config = RuntimeConfig::default();
        args.apply_to(&mut config);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
        assert!(config.logging.use_structured_logging);
        assert!(!config.analysis.require_balanced_scopes);
    }

    #[test]
    fn test_unset_flags_keep_config() {
        let mut config = RuntimeConfig::default();
        config.analysis.skip_unknown_kinds = true;
        config.output.format = OutputFormat::Json;

        parse(&["x.tokens"]).apply_to(&mut config);
        assert!(config.analysis.skip_unknown_kinds);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_rejects_unknown_values() {
        assert!(ScopetabArgs::try_parse_from(["scopetab", "--format", "xml"]).is_err());
        assert!(ScopetabArgs::try_parse_from(["scopetab", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn test_dot_flag() {
        assert!(parse(&["--dot"]).dot);
    }
}
