use std::time::Duration;

/// Counters for one analyzed input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineStats {
    pub tokens_consumed: usize,
    pub groups_skipped: usize,
    pub duration: Duration,
}

impl PipelineStats {
    pub fn duration_ms(&self) -> f64 {
        self.duration.as_secs_f64() * 1000.0
    }

    /// Tokens per second, zero when nothing was timed
    pub fn tokens_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.tokens_consumed as f64 / secs
        } else {
            0.0
        }
    }
}
