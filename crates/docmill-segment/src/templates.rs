//! Static template tables.
//!
//! Two distinct tables exist, keyed by trigger condition:
//!
//! - [`generic_templates`]: appended by pass 4 of the heuristic cascade when
//!   the text is present but judged corrupt. Ten broad categories, each
//!   content-stubbed for manual editing, confidence 0.4.
//! - [`fallback_entries_for`]: used when there is no usable text at all
//!   (e.g. extraction degraded to the manual-entry placeholder). Three
//!   starter entries per document type, confidence 0.7.

use docmill_domain::{DocumentType, EntrySource, KnowledgeEntry};

/// Confidence attached to pass-4 corrupt-text templates: "needs manual
/// editing".
pub const GENERIC_TEMPLATE_CONFIDENCE: f64 = 0.4;

/// Confidence attached to the per-type no-text fallback entries.
pub const FALLBACK_TEMPLATE_CONFIDENCE: f64 = 0.7;

/// Categories the delegated path may assign; anything else maps to "Other".
pub const CATEGORY_WHITELIST: [&str; 15] = [
    "Return Policy",
    "Shipping",
    "Payment Terms",
    "Refund Policy",
    "Customer Support",
    "Warranty",
    "Terms of Service",
    "Privacy Policy",
    "Cancellation Policy",
    "Quality Standards",
    "Terms & Conditions",
    "Company Policies",
    "Technical Support",
    "General FAQ",
    "Other",
];

/// Validate a category against the whitelist, defaulting to "Other".
pub fn validate_category(category: &str) -> String {
    let trimmed = category.trim();
    CATEGORY_WHITELIST
        .iter()
        .find(|c| c.eq_ignore_ascii_case(trimmed))
        .map(|c| c.to_string())
        .unwrap_or_else(|| "Other".to_string())
}

const EDIT_STUB: &str = "Automatic extraction could not recover this section. \
                         Replace this stub with the actual policy text.";

const GENERIC_CATEGORIES: [(&str, &str); 10] = [
    ("Return Policy", "How customers return purchased items"),
    ("Shipping", "Delivery methods, carriers, and timelines"),
    ("Payment Terms", "Accepted payment methods and billing rules"),
    ("Refund Policy", "When and how refunds are issued"),
    ("Customer Support", "How to reach support and expected response times"),
    ("Warranty", "Product warranty coverage and claims"),
    ("Terms of Service", "General conditions of using the store"),
    ("Privacy Policy", "How customer data is collected and used"),
    ("Cancellation Policy", "Cancelling orders before fulfillment"),
    ("Quality Standards", "Product quality commitments"),
];

/// The ten generic templates appended when present text looks corrupt.
///
/// Each entry is explicitly stubbed as needing manual editing. At most
/// `max` entries are returned.
pub fn generic_templates(max: usize) -> Vec<KnowledgeEntry> {
    GENERIC_CATEGORIES
        .iter()
        .take(max)
        .map(|(category, summary)| {
            let mut entry = KnowledgeEntry::new(
                format!("{} (needs editing)", category),
                format!("{}. {}", summary, EDIT_STUB),
                *category,
                GENERIC_TEMPLATE_CONFIDENCE,
                EntrySource::Template,
            );
            entry.tags = vec!["needs-editing".to_string(), "template".to_string()];
            entry
        })
        .collect()
}

/// Per-type starter entries for documents with no usable text.
///
/// At most `max` entries are returned; the table holds three per type.
pub fn fallback_entries_for(document_type: DocumentType, max: usize) -> Vec<KnowledgeEntry> {
    let titles: [(&str, &str); 3] = match document_type {
        DocumentType::Terms => [
            ("General Terms", "The conditions customers accept when ordering."),
            ("Limitation of Liability", "What the store is and is not responsible for."),
            ("Governing Law", "Which jurisdiction's law applies to disputes."),
        ],
        DocumentType::Policy => [
            ("Data Collection", "What customer data the store collects."),
            ("Data Usage", "How collected data is used and shared."),
            ("Customer Rights", "How customers access or delete their data."),
        ],
        DocumentType::Manual => [
            ("Getting Started", "First steps after receiving the product."),
            ("Common Issues", "Frequent problems and their fixes."),
            ("Maintenance", "Routine care instructions."),
        ],
        DocumentType::Faq => [
            ("Ordering", "Common questions about placing orders."),
            ("Delivery", "Common questions about shipping and delivery."),
            ("Returns", "Common questions about returns and refunds."),
        ],
        DocumentType::Procedures => [
            ("Order Handling", "Steps for processing incoming orders."),
            ("Escalation", "When and how to escalate customer issues."),
            ("Quality Checks", "Verification steps before dispatch."),
        ],
    };

    let category = document_type.category();
    titles
        .iter()
        .take(max)
        .map(|(title, summary)| {
            let mut entry = KnowledgeEntry::new(
                *title,
                format!("{} {}", summary, EDIT_STUB),
                category,
                FALLBACK_TEMPLATE_CONFIDENCE,
                EntrySource::Template,
            );
            entry.tags = vec![document_type.as_str().to_string(), "template".to_string()];
            entry
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_table_has_ten_entries() {
        let entries = generic_templates(usize::MAX);
        assert_eq!(entries.len(), 10);
        for entry in &entries {
            assert!((entry.confidence_score - 0.4).abs() < f64::EPSILON);
            assert_eq!(entry.source, EntrySource::Template);
            assert!(entry.title.contains("needs editing"));
            assert!(entry.validate().is_ok());
        }
    }

    #[test]
    fn test_generic_table_respects_ceiling() {
        assert_eq!(generic_templates(4).len(), 4);
    }

    #[test]
    fn test_fallback_table_has_three_per_type() {
        for dt in [
            DocumentType::Terms,
            DocumentType::Policy,
            DocumentType::Manual,
            DocumentType::Faq,
            DocumentType::Procedures,
        ] {
            let entries = fallback_entries_for(dt, usize::MAX);
            assert_eq!(entries.len(), 3);
            for entry in &entries {
                assert!((entry.confidence_score - 0.7).abs() < f64::EPSILON);
                assert_eq!(entry.category, dt.category());
            }
        }
    }

    #[test]
    fn test_category_whitelist_validation() {
        assert_eq!(validate_category("Return Policy"), "Return Policy");
        assert_eq!(validate_category("  shipping "), "Shipping");
        assert_eq!(validate_category("Llama Care"), "Other");
        assert_eq!(validate_category(""), "Other");
    }
}
