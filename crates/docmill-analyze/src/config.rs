//! Analyzer configuration

/// Thresholds for the complexity classification.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Word count above which text is complex
    pub complex_word_count: usize,

    /// Average words per sentence above which text is complex
    pub complex_avg_words_per_sentence: f64,

    /// Jargon occurrences above which text is complex
    pub complex_jargon_count: usize,

    /// Word count above which text is at least medium
    pub medium_word_count: usize,

    /// Average words per sentence above which text is at least medium
    pub medium_avg_words_per_sentence: f64,

    /// Jargon occurrences above which text is at least medium
    pub medium_jargon_count: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            complex_word_count: 5000,
            complex_avg_words_per_sentence: 25.0,
            complex_jargon_count: 5,
            medium_word_count: 2000,
            medium_avg_words_per_sentence: 15.0,
            medium_jargon_count: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds_ordered() {
        let config = AnalyzerConfig::default();
        assert!(config.medium_word_count < config.complex_word_count);
        assert!(config.medium_avg_words_per_sentence < config.complex_avg_words_per_sentence);
        assert!(config.medium_jargon_count < config.complex_jargon_count);
    }
}
