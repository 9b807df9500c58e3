//! The segmenter facade used by the orchestrator.

use crate::heuristics;
use crate::parser;
use crate::prompt::{PromptBuilder, SYSTEM_PROMPT};
use crate::templates;
use crate::{SegmentError, SegmenterConfig};
use docmill_domain::traits::ChatRequest;
use docmill_domain::{DocumentAnalysis, DocumentType, KnowledgeEntry};

/// Segments extracted text into knowledge entries.
///
/// Pure and synchronous: the delegated path is split into
/// [`EntrySegmenter::build_request`] and [`EntrySegmenter::parse_ai_response`]
/// so the orchestrator owns the actual network call (and its timeout), and
/// the fallback decision stays in one place.
#[derive(Debug, Clone, Default)]
pub struct EntrySegmenter {
    config: SegmenterConfig,
}

impl EntrySegmenter {
    /// Create a segmenter with the given configuration.
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// Create a segmenter with default configuration.
    pub fn default_config() -> Self {
        Self::new(SegmenterConfig::default())
    }

    /// The configured entry ceiling.
    pub fn max_entries(&self) -> usize {
        self.config.max_entries
    }

    /// Run the heuristic cascade.
    ///
    /// Always returns at least one entry: empty input, and text where every
    /// cascade pass declines, degrade to the per-type template entries
    /// rather than an empty list.
    pub fn segment_heuristic(
        &self,
        text: &str,
        analysis: &DocumentAnalysis,
    ) -> Vec<KnowledgeEntry> {
        if text.trim().is_empty() {
            return self.template_fallback(analysis.document_type);
        }
        let entries = heuristics::cascade(text, analysis, self.config.max_entries);
        if entries.is_empty() {
            return self.template_fallback(analysis.document_type);
        }
        entries
    }

    /// Per-type starter entries for documents with no usable text at all.
    pub fn template_fallback(&self, document_type: DocumentType) -> Vec<KnowledgeEntry> {
        templates::fallback_entries_for(document_type, self.config.max_entries)
    }

    /// Build the chat request for the delegated path.
    pub fn build_request(&self, text: &str, analysis: &DocumentAnalysis) -> ChatRequest {
        let user = PromptBuilder::new(text, analysis, self.config.max_entries)
            .with_char_budget(self.config.prompt_char_budget)
            .build();
        ChatRequest {
            system: SYSTEM_PROMPT.to_string(),
            user,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    /// Parse and validate a delegated-path response.
    ///
    /// Any error means the orchestrator must fall back to
    /// [`EntrySegmenter::segment_heuristic`].
    pub fn parse_ai_response(
        &self,
        response: &str,
        analysis: &DocumentAnalysis,
    ) -> Result<Vec<KnowledgeEntry>, SegmentError> {
        parser::parse_response(response, analysis, self.config.max_entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docmill_domain::EntrySource;

    #[test]
    fn test_empty_text_degrades_to_type_templates() {
        let segmenter = EntrySegmenter::default_config();
        let analysis = DocumentAnalysis::fallback();

        let entries = segmenter.segment_heuristic("", &analysis);
        assert_eq!(entries.len(), 3);
        for entry in &entries {
            assert_eq!(entry.source, EntrySource::Template);
            assert!((entry.confidence_score - 0.7).abs() < f64::EPSILON);
            assert_eq!(entry.category, "Terms & Conditions");
        }
    }

    #[test]
    fn test_evasive_text_degrades_to_type_templates() {
        // Long enough to dodge the corruption check, but every line is under
        // the pattern threshold, the lone "sentence" is over 200 chars, and
        // every paragraph is under 30: all four passes decline.
        let segmenter = EntrySegmenter::default_config();
        let analysis = DocumentAnalysis::fallback();
        let text = vec!["zxq wer tyu"; 25].join("\n\n");

        let entries = segmenter.segment_heuristic(&text, &analysis);
        assert_eq!(entries.len(), 3);
        for entry in &entries {
            assert_eq!(entry.source, EntrySource::Template);
            assert!((entry.confidence_score - 0.7).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_heuristic_respects_ceiling() {
        let segmenter = EntrySegmenter::new(SegmenterConfig {
            max_entries: 3,
            ..SegmenterConfig::default()
        });
        let analysis = DocumentAnalysis::fallback();
        let text = (1..=20)
            .map(|i| format!("{}. Clause {} about refunds and shipping terms.", i, i))
            .collect::<Vec<_>>()
            .join("\n");

        assert!(segmenter.segment_heuristic(&text, &analysis).len() <= 3);
    }

    #[test]
    fn test_request_carries_config() {
        let segmenter = EntrySegmenter::new(SegmenterConfig {
            max_entries: 7,
            temperature: 0.1,
            max_tokens: 512,
            ..SegmenterConfig::default()
        });
        let analysis = DocumentAnalysis::fallback();
        let request = segmenter.build_request("Returns within 30 days.", &analysis);

        assert!(request.user.contains("Maximum entries: 7"));
        assert!(request.system.contains("knowledge-base editor"));
        assert_eq!(request.max_tokens, 512);
    }

    #[test]
    fn test_parse_failure_surfaces_for_fallback() {
        let segmenter = EntrySegmenter::default_config();
        let analysis = DocumentAnalysis::fallback();
        assert!(segmenter.parse_ai_response("no json here", &analysis).is_err());
    }
}
