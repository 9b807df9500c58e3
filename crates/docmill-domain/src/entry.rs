//! Knowledge entries - the discrete facts extracted from a document.

use crate::id::EntryId;

/// Which extraction path produced an entry.
///
/// The source determines the baseline confidence score: AI-derived entries
/// carry the model's own (clamped) score, pattern-matched lines 0.8,
/// paragraph splits 0.7, sentence splits 0.6, and static templates 0.4,
/// meaning "needs manual editing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntrySource {
    /// Produced by the delegated language-model call
    AiExtraction,
    /// Pattern-line pass of the heuristic cascade
    Pattern,
    /// Sentence-split pass
    Sentence,
    /// Paragraph-split pass
    Paragraph,
    /// Static template fallback
    Template,
}

impl EntrySource {
    /// Canonical string form, used for storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntrySource::AiExtraction => "ai_extraction",
            EntrySource::Pattern => "pattern",
            EntrySource::Sentence => "sentence",
            EntrySource::Paragraph => "paragraph",
            EntrySource::Template => "template",
        }
    }

    /// Parse the canonical string form.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "ai_extraction" => Some(EntrySource::AiExtraction),
            "pattern" => Some(EntrySource::Pattern),
            "sentence" => Some(EntrySource::Sentence),
            "paragraph" => Some(EntrySource::Paragraph),
            "template" => Some(EntrySource::Template),
            _ => None,
        }
    }
}

/// Default priority, mid-scale on 1..=10.
pub const DEFAULT_PRIORITY: i32 = 5;

/// One self-contained extracted fact or rule.
///
/// Entries are produced in a batch per document and are never mutated after
/// creation, except for the `approved` flag a reviewer toggles.
///
/// Invariants: `title` and `content` are non-empty; `confidence_score` lies
/// in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeEntry {
    /// Unique identifier
    pub id: EntryId,

    /// Short human-readable title
    pub title: String,

    /// Full entry text
    pub content: String,

    /// Knowledge-base category (e.g. "Return Policy")
    pub category: String,

    /// Optional finer-grained category
    pub subcategory: Option<String>,

    /// Free-form tags for filtering
    pub tags: Vec<String>,

    /// Search keywords derived from the content
    pub keywords: Vec<String>,

    /// Review priority, 1..=10
    pub priority: i32,

    /// How trustworthy the automatic derivation is, in [0, 1]
    pub confidence_score: f64,

    /// Extraction path that produced this entry
    pub source: EntrySource,

    /// Section of the source document, when known
    pub source_section: Option<String>,

    /// Page of the source document, when known
    pub page_reference: Option<u32>,

    /// Set by a human reviewer; always false at creation
    pub approved: bool,
}

impl KnowledgeEntry {
    /// Create an entry with default priority and no review metadata.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
        confidence_score: f64,
        source: EntrySource,
    ) -> Self {
        Self {
            id: EntryId::new(),
            title: title.into(),
            content: content.into(),
            category: category.into(),
            subcategory: None,
            tags: Vec::new(),
            keywords: Vec::new(),
            priority: DEFAULT_PRIORITY,
            confidence_score,
            source,
            source_section: None,
            page_reference: None,
            approved: false,
        }
    }

    /// Check the entry invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title is empty".to_string());
        }
        if self.content.trim().is_empty() {
            return Err("content is empty".to_string());
        }
        if !(0.0..=1.0).contains(&self.confidence_score) {
            return Err(format!(
                "confidence_score {} out of range [0.0, 1.0]",
                self.confidence_score
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_defaults() {
        let e = KnowledgeEntry::new(
            "Returns",
            "Returns accepted within 7 days.",
            "Return Policy",
            0.8,
            EntrySource::Pattern,
        );
        assert_eq!(e.priority, DEFAULT_PRIORITY);
        assert!(!e.approved);
        assert!(e.validate().is_ok());
    }

    #[test]
    fn test_empty_title_rejected() {
        let e = KnowledgeEntry::new("  ", "content", "Other", 0.8, EntrySource::Pattern);
        assert!(e.validate().is_err());
    }

    #[test]
    fn test_confidence_out_of_range_rejected() {
        let e = KnowledgeEntry::new("t", "c", "Other", 1.2, EntrySource::AiExtraction);
        assert!(e.validate().is_err());
    }

    #[test]
    fn test_source_round_trip() {
        for s in [
            EntrySource::AiExtraction,
            EntrySource::Pattern,
            EntrySource::Sentence,
            EntrySource::Paragraph,
            EntrySource::Template,
        ] {
            assert_eq!(EntrySource::from_str_opt(s.as_str()), Some(s));
        }
    }
}
