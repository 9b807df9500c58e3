//! Prompt engineering for delegated segmentation.

use crate::templates::CATEGORY_WHITELIST;
use docmill_domain::DocumentAnalysis;

/// System prompt for the chat completion.
pub const SYSTEM_PROMPT: &str = "You are a knowledge-base editor for an e-commerce \
storefront. You turn policy and support documents into discrete, self-contained \
knowledge entries that answer customer questions. You reply with JSON only.";

/// Builds the user prompt for one document.
pub struct PromptBuilder<'a> {
    text: &'a str,
    analysis: &'a DocumentAnalysis,
    max_entries: usize,
    char_budget: usize,
}

impl<'a> PromptBuilder<'a> {
    /// Create a builder for the given text and analysis.
    pub fn new(text: &'a str, analysis: &'a DocumentAnalysis, max_entries: usize) -> Self {
        Self {
            text,
            analysis,
            max_entries,
            char_budget: 15_000,
        }
    }

    /// Override how much document text is included (characters).
    pub fn with_char_budget(mut self, char_budget: usize) -> Self {
        self.char_budget = char_budget;
        self
    }

    /// Build the complete user prompt.
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        prompt.push_str(&format!(
            "Document type: {} ({} structure, {} complexity)\n",
            self.analysis.document_type.as_str(),
            self.analysis.structure.as_str(),
            self.analysis.complexity.as_str()
        ));
        prompt.push_str(&format!("Maximum entries: {}\n", self.max_entries));
        prompt.push_str("Allowed categories: ");
        prompt.push_str(&CATEGORY_WHITELIST.join(", "));
        prompt.push_str("\n\n");

        prompt.push_str("Document text:\n---\n");
        prompt.push_str(&bounded(self.text, self.char_budget));
        prompt.push_str("\n---\n\n");

        prompt.push_str(OUTPUT_FORMAT_REMINDER);
        prompt
    }
}

fn bounded(text: &str, char_budget: usize) -> String {
    text.chars().take(char_budget).collect()
}

const EXTRACTION_INSTRUCTIONS: &str = r#"Extract discrete knowledge entries from the following document.
Each entry should be one self-contained fact, rule, or answer a support agent
could hand to a customer.

Rules:
- One idea per entry
- title: short and specific (at most 100 characters)
- content: the complete rule or answer, in plain language
- category: choose from the allowed list only
- tags and keywords: lowercase, for search
- confidence_score: 0.0-1.0, how certain you are the entry faithfully
  reflects the document (use lower values for garbled passages)
- Skip boilerplate, page headers, and navigation text"#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output format (a single JSON object, no additional text):
{
  "entries": [
    {
      "title": "short title",
      "content": "complete rule or answer",
      "category": "one allowed category",
      "subcategory": "optional",
      "tags": ["tag"],
      "keywords": ["keyword"],
      "priority": 5,
      "confidence_score": 0.9,
      "source_section": "optional section name"
    }
  ]
}

Remember: return ONLY the JSON object, no markdown code fences, no explanations."#;

#[cfg(test)]
mod tests {
    use super::*;
    use docmill_domain::DocumentAnalysis;

    #[test]
    fn test_prompt_includes_document_text() {
        let analysis = DocumentAnalysis::fallback();
        let prompt = PromptBuilder::new("Returns within 30 days.", &analysis, 20).build();
        assert!(prompt.contains("Returns within 30 days."));
        assert!(prompt.contains("Maximum entries: 20"));
        assert!(prompt.contains("Return Policy"));
    }

    #[test]
    fn test_prompt_truncates_long_text() {
        let analysis = DocumentAnalysis::fallback();
        let text = "x".repeat(40_000);
        let prompt = PromptBuilder::new(&text, &analysis, 20).build();
        // 15k of document text plus the fixed template.
        assert!(prompt.len() < 17_000);
    }

    #[test]
    fn test_prompt_names_analysis() {
        let analysis = DocumentAnalysis::fallback();
        let prompt = PromptBuilder::new("text", &analysis, 5).build();
        assert!(prompt.contains("Document type: terms"));
        assert!(prompt.contains("unstructured"));
    }
}
