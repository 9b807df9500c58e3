//! Configuration for the segmenter

/// Tunables for both segmentation modes.
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Ceiling on entries produced by any path
    pub max_entries: usize,

    /// How much document text goes into the delegation prompt (characters)
    pub prompt_char_budget: usize,

    /// Sampling temperature for the delegated call
    pub temperature: f32,

    /// Completion token budget for the delegated call
    pub max_tokens: u32,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_entries: 20,
            prompt_char_budget: 15_000,
            temperature: 0.3,
            max_tokens: 2_000,
        }
    }
}

impl SegmenterConfig {
    /// Check the configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_entries == 0 {
            return Err("max_entries must be greater than 0".to_string());
        }
        if self.prompt_char_budget == 0 {
            return Err("prompt_char_budget must be greater than 0".to_string());
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SegmenterConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_max_entries_rejected() {
        let config = SegmenterConfig {
            max_entries: 0,
            ..SegmenterConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
