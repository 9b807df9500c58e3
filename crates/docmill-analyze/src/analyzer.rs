//! Document classification logic.

use crate::AnalyzerConfig;
use docmill_domain::{Complexity, DocumentAnalysis, DocumentStructure, DocumentType};
use once_cell::sync::Lazy;
use regex::Regex;

static NUMBERED_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(\d+\.|\(\d+\))").unwrap());
static CAPS_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[A-Z][A-Z \d]{3,}$").unwrap());
static TITLE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[A-Za-z][A-Za-z ]*:\s*$").unwrap());
static ALPHA_LIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[a-z]\)").unwrap());
static ROMAN_LIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(x|ix|iv|v?i{1,3}|v)[.)]").unwrap());

/// Legal-jargon markers used for the complexity heuristic.
const JARGON_TERMS: [&str; 5] = ["hereby", "whereas", "notwithstanding", "pursuant", "hereunder"];

/// Content keyword groups, checked in fixed priority order.
const TYPE_KEYWORDS: [(DocumentType, &[&str]); 5] = [
    (
        DocumentType::Terms,
        &[
            "terms of service",
            "terms and conditions",
            "agreement",
            "liability",
            "governing law",
        ],
    ),
    (
        DocumentType::Policy,
        &[
            "privacy policy",
            "personal data",
            "data protection",
            "cookie",
            "policy",
        ],
    ),
    (
        DocumentType::Manual,
        &[
            "user manual",
            "instructions",
            "how to",
            "installation",
            "troubleshooting",
        ],
    ),
    (
        DocumentType::Faq,
        &["frequently asked", "faq", "question", "answer"],
    ),
    (
        DocumentType::Procedures,
        &["procedure", "workflow", "protocol", "step 1"],
    ),
];

/// Expected entries per word, by document type.
fn entry_density(document_type: DocumentType) -> f64 {
    match document_type {
        DocumentType::Terms => 1.0 / 150.0,
        DocumentType::Policy => 1.0 / 200.0,
        DocumentType::Manual => 1.0 / 100.0,
        DocumentType::Faq => 1.0 / 50.0,
        DocumentType::Procedures => 1.0 / 120.0,
    }
}

/// Classifies extracted text. Pure and deterministic: identical inputs
/// always yield an identical analysis.
#[derive(Debug, Clone, Default)]
pub struct DocumentAnalyzer {
    config: AnalyzerConfig,
}

impl DocumentAnalyzer {
    /// Create an analyzer with the given thresholds.
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Create an analyzer with default thresholds.
    pub fn default_config() -> Self {
        Self::new(AnalyzerConfig::default())
    }

    /// Classify extracted text. Always returns a populated analysis.
    pub fn analyze(&self, text: &str, filename: &str) -> DocumentAnalysis {
        let document_type = detect_type(text, filename);
        let structure = detect_structure(text);

        let word_count = text.split_whitespace().count();
        let sentences = split_sentences(text);
        let complexity = self.classify_complexity(text, word_count, &sentences);

        let estimated = (word_count as f64 * entry_density(document_type)).round() as usize;

        DocumentAnalysis {
            document_type,
            language: "en".to_string(),
            structure,
            estimated_entries: estimated.max(1),
            complexity,
            confidence: score_confidence(text, &sentences),
        }
    }

    fn classify_complexity(&self, text: &str, word_count: usize, sentences: &[&str]) -> Complexity {
        let avg_words = if sentences.is_empty() {
            0.0
        } else {
            word_count as f64 / sentences.len() as f64
        };

        let lower = text.to_lowercase();
        let jargon: usize = JARGON_TERMS
            .iter()
            .map(|term| lower.matches(term).count())
            .sum();

        let c = &self.config;
        if word_count > c.complex_word_count
            || avg_words > c.complex_avg_words_per_sentence
            || jargon > c.complex_jargon_count
        {
            Complexity::Complex
        } else if word_count > c.medium_word_count
            || avg_words > c.medium_avg_words_per_sentence
            || jargon > c.medium_jargon_count
        {
            Complexity::Medium
        } else {
            Complexity::Simple
        }
    }
}

fn detect_type(text: &str, filename: &str) -> DocumentType {
    // Filename hints are checked first: uploaders tend to name policy
    // documents accurately even when extraction mangles the content.
    let name = filename.to_lowercase();
    if name.contains("terms") || name.contains("conditions") {
        return DocumentType::Terms;
    }
    if name.contains("policy") || name.contains("privacy") {
        return DocumentType::Policy;
    }
    if name.contains("manual") || name.contains("guide") {
        return DocumentType::Manual;
    }
    if name.contains("faq") || name.contains("questions") {
        return DocumentType::Faq;
    }

    let content = text.to_lowercase();
    for (document_type, keywords) in TYPE_KEYWORDS {
        if keywords.iter().any(|k| content.contains(k)) {
            return document_type;
        }
    }

    DocumentType::Terms
}

fn detect_structure(text: &str) -> DocumentStructure {
    if NUMBERED_LINE.is_match(text) {
        DocumentStructure::Numbered
    } else if CAPS_HEADING.is_match(text) || TITLE_LINE.is_match(text) {
        DocumentStructure::Sectioned
    } else if ALPHA_LIST.is_match(text) || ROMAN_LIST.is_match(text) {
        DocumentStructure::Hierarchical
    } else {
        DocumentStructure::Unstructured
    }
}

fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn score_confidence(text: &str, sentences: &[&str]) -> f64 {
    let mut confidence: f64 = 0.5;

    if text.len() > 1000 {
        confidence += 0.2;
        if text.len() > 5000 {
            confidence += 0.1;
        }
    }

    let substantial = sentences.iter().filter(|s| s.len() > 10).count();
    if substantial > 5 {
        confidence += 0.1;
    }

    if !sentences.is_empty() {
        let capitalized = sentences
            .iter()
            .filter(|s| s.chars().next().is_some_and(|c| c.is_uppercase()))
            .count();
        if capitalized as f64 / sentences.len() as f64 >= 0.7 {
            confidence += 0.1;
        }
    }

    confidence.min(1.0)
}
