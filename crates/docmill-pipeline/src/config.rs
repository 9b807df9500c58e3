//! Orchestrator configuration.

use docmill_analyze::AnalyzerConfig;
use docmill_segment::SegmenterConfig;
use std::time::Duration;

/// Configuration for the document processor.
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Whether the delegated (AI) segmentation path is attempted at all.
    pub use_ai: bool,

    /// Timeout for one delegated segmentation call, in seconds.
    pub ai_timeout_secs: u64,

    /// Classification thresholds.
    pub analyzer: AnalyzerConfig,

    /// Segmentation limits and sampling parameters.
    pub segmenter: SegmenterConfig,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            use_ai: false,
            ai_timeout_secs: 30,
            analyzer: AnalyzerConfig::default(),
            segmenter: SegmenterConfig::default(),
        }
    }
}

impl ProcessorConfig {
    /// The delegated-call timeout as a `Duration`.
    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_heuristic_only() {
        let config = ProcessorConfig::default();
        assert!(!config.use_ai);
        assert_eq!(config.ai_timeout(), Duration::from_secs(30));
    }
}
