use super::stats::PipelineStats;
use crate::output::{AnalysisOutput, AnalysisReport, ReportStats};

/// Tables and counters for one input
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub source: String,
    pub output: AnalysisOutput,
    pub stats: PipelineStats,
}

impl PipelineResult {
    pub fn new(source: &str, output: AnalysisOutput, stats: PipelineStats) -> Self {
        Self {
            source: source.to_string(),
            output,
            stats,
        }
    }

    pub fn to_report(&self) -> AnalysisReport {
        let stats = ReportStats {
            tokens_consumed: self.stats.tokens_consumed,
            groups_skipped: self.stats.groups_skipped,
            symbols: self.output.total_symbol_count(),
            scopes: self.output.scope_count(),
            references: self.output.reference_count(),
            duration_ms: self.stats.duration_ms(),
        };
        AnalysisReport::new(&self.source, stats, self.output.clone())
    }

    pub fn log_success(&self) {
        crate::log_success!(
            crate::logging::codes::success::ANALYSIS_COMPLETE,
            "Symbol table analysis complete",
            "source" => &self.source,
            "tokens" => self.stats.tokens_consumed,
            "skipped" => self.stats.groups_skipped,
            "symbols" => self.output.total_symbol_count(),
            "scopes" => self.output.scope_count(),
            "references" => self.output.reference_count(),
            "duration_ms" => format!("{:.2}", self.stats.duration_ms()),
            "tokens_per_sec" => format!("{:.0}", self.stats.tokens_per_second())
        );
    }
}
