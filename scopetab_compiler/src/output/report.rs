//! Serializable analysis report

use super::AnalysisOutput;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportStats {
    pub tokens_consumed: usize,
    pub groups_skipped: usize,
    pub symbols: usize,
    pub scopes: usize,
    pub references: usize,
    pub duration_ms: f64,
}

/// One analyzed input, ready for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub tool_version: &'static str,
    pub stats: ReportStats,
    pub output: AnalysisOutput,
}

impl AnalysisReport {
    pub fn new(source: &str, stats: ReportStats, output: AnalysisOutput) -> Self {
        Self {
            source: source.to_string(),
            generated_at: Utc::now(),
            tool_version: crate::config::build_info::version(),
            stats,
            output,
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scopes::{DeclarationKind, Scope};

    #[test]
    fn test_report_json_shape() {
        let mut global = Scope::global();
        global.declare("x", 1, DeclarationKind::Variable);
        let output = AnalysisOutput {
            global,
            archive: Vec::new(),
            references: Vec::new(),
        };
        let stats = ReportStats {
            tokens_consumed: 3,
            symbols: 1,
            scopes: 1,
            ..Default::default()
        };

        let json = AnalysisReport::new("prog.tokens", stats, output)
            .to_json(false)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["source"], "prog.tokens");
        assert_eq!(value["stats"]["tokens_consumed"], 3);
        assert_eq!(value["output"]["global"]["declarations"][0]["name"], "x");
        assert_eq!(value["output"]["global"]["declarations"][0]["kind"], "variable");
        assert!(value["generated_at"].is_string());
        assert!(value["output"]["global"].get("index").is_none());
    }
}
