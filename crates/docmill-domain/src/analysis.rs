//! Document classification produced by the analyzer.

use std::fmt;

/// Kind of commercial document, as classified from filename and content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    /// Terms and conditions
    Terms,
    /// Privacy or company policy
    Policy,
    /// User manual or guide
    Manual,
    /// Frequently asked questions
    Faq,
    /// Operational procedures
    Procedures,
}

impl DocumentType {
    /// Canonical string form, used for storage and prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Terms => "terms",
            DocumentType::Policy => "policy",
            DocumentType::Manual => "manual",
            DocumentType::Faq => "faq",
            DocumentType::Procedures => "procedures",
        }
    }

    /// Parse the canonical string form.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "terms" => Some(DocumentType::Terms),
            "policy" => Some(DocumentType::Policy),
            "manual" => Some(DocumentType::Manual),
            "faq" => Some(DocumentType::Faq),
            "procedures" => Some(DocumentType::Procedures),
            _ => None,
        }
    }

    /// Knowledge-base category that entries from this document type land in.
    pub fn category(&self) -> &'static str {
        match self {
            DocumentType::Terms => "Terms & Conditions",
            DocumentType::Policy => "Company Policies",
            DocumentType::Manual => "Technical Support",
            DocumentType::Faq => "General FAQ",
            DocumentType::Procedures => "Company Policies",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural shape of the extracted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentStructure {
    /// Numbered clauses ("1." / "(1)" line starts)
    Numbered,
    /// Headed sections (all-caps headings or "Title:" lines)
    Sectioned,
    /// Nested lists ("a)" / roman-numeral markers)
    Hierarchical,
    /// No recognizable structure
    Unstructured,
}

impl DocumentStructure {
    /// Canonical string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStructure::Numbered => "numbered",
            DocumentStructure::Sectioned => "sectioned",
            DocumentStructure::Hierarchical => "hierarchical",
            DocumentStructure::Unstructured => "unstructured",
        }
    }
}

impl fmt::Display for DocumentStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reading complexity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Complexity {
    /// Short text, plain sentences
    Simple,
    /// Mid-length or moderately dense text
    Medium,
    /// Long text, long sentences, or legal jargon
    Complex,
}

impl Complexity {
    /// Canonical string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Medium => "medium",
            Complexity::Complex => "complex",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The analyzer's classification of one extracted text.
///
/// Created once per processing run and immutable thereafter. The analyzer
/// is total: there is no failure path, only progressively weaker defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentAnalysis {
    /// Classified document type
    pub document_type: DocumentType,

    /// Detected language (currently always "en")
    pub language: String,

    /// Detected structure
    pub structure: DocumentStructure,

    /// Estimated number of knowledge entries, always >= 1
    pub estimated_entries: usize,

    /// Reading complexity bucket
    pub complexity: Complexity,

    /// Classification confidence in [0, 1]
    pub confidence: f64,
}

impl DocumentAnalysis {
    /// Fixed fallback used when the pipeline fails before analysis completes.
    pub fn fallback() -> Self {
        Self {
            document_type: DocumentType::Terms,
            language: "en".to_string(),
            structure: DocumentStructure::Unstructured,
            estimated_entries: 1,
            complexity: Complexity::Medium,
            confidence: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_round_trip() {
        for dt in [
            DocumentType::Terms,
            DocumentType::Policy,
            DocumentType::Manual,
            DocumentType::Faq,
            DocumentType::Procedures,
        ] {
            assert_eq!(DocumentType::from_str_opt(dt.as_str()), Some(dt));
        }
        assert_eq!(DocumentType::from_str_opt("invoice"), None);
    }

    #[test]
    fn test_category_mapping() {
        assert_eq!(DocumentType::Terms.category(), "Terms & Conditions");
        assert_eq!(DocumentType::Policy.category(), "Company Policies");
        assert_eq!(DocumentType::Manual.category(), "Technical Support");
        assert_eq!(DocumentType::Faq.category(), "General FAQ");
        assert_eq!(DocumentType::Procedures.category(), "Company Policies");
    }

    #[test]
    fn test_fallback_analysis() {
        let a = DocumentAnalysis::fallback();
        assert_eq!(a.document_type, DocumentType::Terms);
        assert_eq!(a.structure, DocumentStructure::Unstructured);
        assert_eq!(a.complexity, Complexity::Medium);
        assert_eq!(a.estimated_entries, 1);
        assert_eq!(a.language, "en");
    }
}
