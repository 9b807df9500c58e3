//! The four-pass heuristic cascade.
//!
//! Each pass is a pure function of `(text, analysis, budget)`; a small
//! driver composes them in order, engaging a pass only when the previous
//! passes under-produced, and stops once the entry budget is exhausted.

use crate::templates::generic_templates;
use docmill_domain::{DocumentAnalysis, EntrySource, KnowledgeEntry};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static LINE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+[.)]|\(\d+\)|[A-Za-z][.)]|[ivxIVX]{1,4}[.)]|[-*•])\s*").unwrap());
static SENTENCE_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

/// Confidence for pattern-line entries.
pub const PATTERN_CONFIDENCE: f64 = 0.8;
/// Confidence for sentence-split entries.
pub const SENTENCE_CONFIDENCE: f64 = 0.6;
/// Confidence for paragraph-split entries.
pub const PARAGRAPH_CONFIDENCE: f64 = 0.7;

/// Sentence pass engages when the pattern pass produced fewer than this.
const MIN_PATTERN_ENTRIES: usize = 3;
/// Paragraph pass engages when the running total is below this.
const MIN_TOTAL_AFTER_SENTENCES: usize = 2;
/// Template pass engages when the running total is below this and the text
/// signals corruption.
const MIN_TOTAL_BEFORE_TEMPLATES: usize = 5;

/// Texts shorter than this, or carrying the generator artifact, are treated
/// as corrupt for pass 4. Stricter than the extraction quality gate so the
/// templates do not fire on short-but-clean text alone.
const CORRUPT_TEXT_MAX_LEN: usize = 100;

/// Domain vocabulary that qualifies a line for the pattern pass.
const DOMAIN_VOCABULARY: [&str; 25] = [
    "must",
    "shall",
    "terms",
    "refund",
    "return",
    "shipping",
    "delivery",
    "warranty",
    "payment",
    "cancel",
    "cancellation",
    "privacy",
    "policy",
    "liability",
    "guarantee",
    "exchange",
    "support",
    "contact",
    "order",
    "product",
    "service",
    "customer",
    "account",
    "fee",
    "charge",
];

/// Run the full cascade.
pub fn cascade(
    text: &str,
    analysis: &DocumentAnalysis,
    max_entries: usize,
) -> Vec<KnowledgeEntry> {
    let mut entries = pattern_pass(text, analysis, max_entries);
    let from_patterns = entries.len();

    if from_patterns < MIN_PATTERN_ENTRIES && entries.len() < max_entries {
        let budget = max_entries - entries.len();
        entries.extend(sentence_pass(text, analysis, budget));
    }

    if entries.len() < MIN_TOTAL_AFTER_SENTENCES && entries.len() < max_entries {
        let budget = max_entries - entries.len();
        entries.extend(paragraph_pass(text, analysis, budget));
    }

    if entries.len() < MIN_TOTAL_BEFORE_TEMPLATES && looks_corrupt(text) && entries.len() < max_entries
    {
        let budget = max_entries - entries.len();
        entries.extend(generic_templates(budget));
    }

    debug!(
        pattern = from_patterns,
        total = entries.len(),
        "heuristic cascade finished"
    );
    entries
}

/// Whether pass 4 should treat the text as extraction garbage.
pub fn looks_corrupt(text: &str) -> bool {
    text.contains("reportlab") || text.len() < CORRUPT_TEXT_MAX_LEN
}

/// Pass 1: lines that look like discrete clauses.
///
/// A line qualifies if it starts with a list marker, is longer than 20
/// characters, or mentions commerce vocabulary.
pub fn pattern_pass(
    text: &str,
    analysis: &DocumentAnalysis,
    budget: usize,
) -> Vec<KnowledgeEntry> {
    let mut entries = Vec::new();

    for line in text.lines() {
        if entries.len() >= budget {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() || !trimmed.chars().any(|c| c.is_alphabetic()) {
            continue;
        }

        let lower = trimmed.to_lowercase();
        let qualifies = LINE_MARKER.is_match(trimmed)
            || trimmed.len() > 20
            || DOMAIN_VOCABULARY.iter().any(|w| lower.contains(w));
        if !qualifies {
            continue;
        }

        let stripped = LINE_MARKER.replace(trimmed, "").trim().to_string();
        if stripped.is_empty() {
            continue;
        }

        entries.push(build_entry(
            truncate_chars(&stripped, 100),
            stripped.clone(),
            analysis,
            PATTERN_CONFIDENCE,
            EntrySource::Pattern,
        ));
    }

    entries
}

/// Pass 2: mid-length sentences.
pub fn sentence_pass(
    text: &str,
    analysis: &DocumentAnalysis,
    budget: usize,
) -> Vec<KnowledgeEntry> {
    let mut entries = Vec::new();

    for sentence in SENTENCE_SPLIT.split(text) {
        if entries.len() >= budget {
            break;
        }
        let trimmed = sentence.trim();
        if trimmed.len() < 20 || trimmed.len() > 200 {
            continue;
        }

        entries.push(build_entry(
            ellipsis_title(trimmed, 60),
            trimmed.to_string(),
            analysis,
            SENTENCE_CONFIDENCE,
            EntrySource::Sentence,
        ));
    }

    entries
}

/// Pass 3: blank-line-delimited paragraphs.
pub fn paragraph_pass(
    text: &str,
    analysis: &DocumentAnalysis,
    budget: usize,
) -> Vec<KnowledgeEntry> {
    let mut entries = Vec::new();

    for paragraph in text.split("\n\n") {
        if entries.len() >= budget {
            break;
        }
        let trimmed = paragraph.trim();
        if trimmed.len() <= 30 {
            continue;
        }

        entries.push(build_entry(
            ellipsis_title(trimmed, 80),
            trimmed.to_string(),
            analysis,
            PARAGRAPH_CONFIDENCE,
            EntrySource::Paragraph,
        ));
    }

    entries
}

fn build_entry(
    title: String,
    content: String,
    analysis: &DocumentAnalysis,
    confidence: f64,
    source: EntrySource,
) -> KnowledgeEntry {
    let mut entry = KnowledgeEntry::new(
        title,
        content,
        analysis.document_type.category(),
        confidence,
        source,
    );
    entry.keywords = derive_keywords(&entry.content);
    entry.tags = vec![
        analysis.document_type.as_str().to_string(),
        source.as_str().to_string(),
    ];
    entry
}

/// Common words excluded from derived keywords.
const STOPWORDS: [&str; 18] = [
    "this", "that", "with", "from", "your", "have", "will", "must", "shall", "been", "were",
    "they", "them", "their", "when", "what", "where", "which",
];

/// Up to five distinct lowercase content words, stopword-filtered.
pub fn derive_keywords(content: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for word in content.split_whitespace() {
        let cleaned: String = word
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        if cleaned.len() > 3
            && !STOPWORDS.contains(&cleaned.as_str())
            && !keywords.contains(&cleaned)
        {
            keywords.push(cleaned);
        }
        if keywords.len() >= 5 {
            break;
        }
    }
    keywords
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn ellipsis_title(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut title = truncate_chars(s, max);
        title.push_str("...");
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docmill_domain::DocumentAnalysis;

    fn analysis() -> DocumentAnalysis {
        DocumentAnalysis::fallback()
    }

    #[test]
    fn test_pattern_pass_numbered_lines() {
        let text = "1. Returns must be made within 7 days.\n2. Contact support@site.com for help.";
        let entries = pattern_pass(text, &analysis(), 20);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Returns must be made within 7 days.");
        assert_eq!(entries[1].title, "Contact support@site.com for help.");
        for entry in &entries {
            assert!((entry.confidence_score - 0.8).abs() < f64::EPSILON);
            assert_eq!(entry.source, EntrySource::Pattern);
            // Category comes from the analysis, not the pass itself.
            assert_eq!(entry.category, "Terms & Conditions");
        }
    }

    #[test]
    fn test_pattern_pass_respects_budget() {
        let text = (1..=30)
            .map(|i| format!("{}. Clause number {} of the agreement text.", i, i))
            .collect::<Vec<_>>()
            .join("\n");
        let entries = pattern_pass(&text, &analysis(), 10);
        assert_eq!(entries.len(), 10);
    }

    #[test]
    fn test_vocabulary_qualifies_short_line() {
        let entries = pattern_pass("refund in cash", &analysis(), 20);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_short_noise_line_skipped() {
        let entries = pattern_pass("hi there\n123456\n", &analysis(), 20);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_sentence_pass_length_bounds() {
        let text = "Too short. This sentence is comfortably inside the twenty to two \
                    hundred character window. No!";
        let entries = sentence_pass(text, &analysis(), 20);
        assert_eq!(entries.len(), 1);
        assert!((entries[0].confidence_score - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sentence_title_ellipsized_at_sixty() {
        let text = "This particular sentence runs well past the sixty character title limit \
                    used by the sentence pass of the cascade.";
        let entries = sentence_pass(text, &analysis(), 20);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].title.ends_with("..."));
        assert_eq!(entries[0].title.chars().count(), 63);
    }

    #[test]
    fn test_paragraph_pass_splits_on_blank_lines() {
        let text = "First paragraph with enough text to qualify here.\n\n\
                    Second paragraph, also long enough to keep around.";
        let entries = paragraph_pass(text, &analysis(), 20);
        assert_eq!(entries.len(), 2);
        for entry in &entries {
            assert!((entry.confidence_score - 0.7).abs() < f64::EPSILON);
            assert_eq!(entry.source, EntrySource::Paragraph);
        }
    }

    #[test]
    fn test_cascade_always_produces_entries_for_nontrivial_text() {
        // No markers, no vocabulary hits, lines under 20 chars, but overall
        // corrupt-length text: templates kick in.
        let entries = cascade("zq pf\nxv bn", &analysis(), 20);
        assert!(!entries.is_empty());
    }

    #[test]
    fn test_cascade_sentence_fallback_for_plain_prose() {
        // Single long unbroken line without pattern markers still yields
        // pattern entries (length rule), and the sentence pass tops up.
        let text = "The store accepts returns of unused items. Refunds are issued to the \
                    original payment method within five business days.";
        let entries = cascade(text, &analysis(), 20);
        assert!(!entries.is_empty());
        assert!(entries.len() <= 20);
    }

    #[test]
    fn test_cascade_templates_on_corrupt_text() {
        let entries = cascade("reportlab xj qq", &analysis(), 20);
        assert!(entries.iter().any(|e| e.source == EntrySource::Template));
        for entry in entries.iter().filter(|e| e.source == EntrySource::Template) {
            assert!((entry.confidence_score - 0.4).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_cascade_no_templates_for_clean_long_text() {
        let text = "Orders ship within two business days of payment confirmation and \
                    tracking numbers are emailed automatically once the parcel leaves the \
                    warehouse so customers can follow delivery progress.";
        let entries = cascade(text, &analysis(), 20);
        assert!(entries.iter().all(|e| e.source != EntrySource::Template));
    }

    #[test]
    fn test_cascade_respects_max_entries() {
        let text = (1..=50)
            .map(|i| format!("{}. Clause number {} about shipping and refunds.", i, i))
            .collect::<Vec<_>>()
            .join("\n");
        for max in [1, 5, 20] {
            assert!(cascade(&text, &analysis(), max).len() <= max);
        }
    }

    #[test]
    fn test_derive_keywords() {
        let keywords = derive_keywords("Returns must be made within 7 days of delivery");
        assert!(keywords.contains(&"returns".to_string()));
        assert!(!keywords.contains(&"must".to_string()));
        assert!(keywords.len() <= 5);
    }
}
