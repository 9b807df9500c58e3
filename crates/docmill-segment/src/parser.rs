//! Parse knowledge entries out of free-form model output.
//!
//! Models wrap JSON in prose and code fences despite instructions, so the
//! parser carves the first balanced JSON object out of the response text and
//! validates every field defensively rather than trusting the shape.

use crate::error::SegmentError;
use crate::templates::validate_category;
use docmill_domain::{DocumentAnalysis, EntrySource, KnowledgeEntry};
use serde::Deserialize;
use tracing::warn;

/// Raw entry shape accepted from the model. Every field except title and
/// content is optional and sanitized during mapping.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EntryCandidate {
    title: Option<String>,
    content: Option<String>,
    category: Option<String>,
    subcategory: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    keywords: Vec<String>,
    priority: Option<i64>,
    confidence_score: Option<f64>,
    source_section: Option<String>,
    page_reference: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct EntriesEnvelope {
    #[serde(default)]
    entries: Vec<serde_json::Value>,
}

/// Parse a model response into validated knowledge entries.
///
/// Returns an error when no balanced JSON object is present, the JSON does
/// not parse, or the entry list is empty after validation; callers treat
/// every error as "fall back to heuristics".
pub fn parse_response(
    response: &str,
    analysis: &DocumentAnalysis,
    max_entries: usize,
) -> Result<Vec<KnowledgeEntry>, SegmentError> {
    let json_str = first_json_object(response).ok_or(SegmentError::NoJsonObject)?;
    let value: serde_json::Value = serde_json::from_str(json_str)?;
    let envelope: EntriesEnvelope = serde_json::from_value(value)
        .map_err(|e| SegmentError::InvalidShape(e.to_string()))?;

    let mut entries = Vec::new();
    for (idx, value) in envelope.entries.into_iter().enumerate() {
        if entries.len() >= max_entries {
            break;
        }
        match serde_json::from_value::<EntryCandidate>(value) {
            Ok(candidate) => match map_candidate(candidate, analysis) {
                Ok(entry) => entries.push(entry),
                Err(reason) => warn!(index = idx, reason, "skipping model entry"),
            },
            Err(e) => warn!(index = idx, error = %e, "skipping malformed model entry"),
        }
    }

    if entries.is_empty() {
        return Err(SegmentError::EmptyEntries);
    }
    Ok(entries)
}

/// Map a raw candidate into a domain entry, clamping and whitelisting.
fn map_candidate(
    candidate: EntryCandidate,
    analysis: &DocumentAnalysis,
) -> Result<KnowledgeEntry, &'static str> {
    let title = candidate
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or("missing title")?;
    let content = candidate
        .content
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or("missing content")?;

    let category = candidate
        .category
        .as_deref()
        .map(validate_category)
        .unwrap_or_else(|| analysis.document_type.category().to_string());

    // Model scores are advisory; clamp rather than reject.
    let confidence = candidate.confidence_score.unwrap_or(0.7).clamp(0.1, 1.0);

    let mut entry = KnowledgeEntry::new(
        truncate_chars(title, 100),
        content,
        category,
        confidence,
        EntrySource::AiExtraction,
    );
    entry.subcategory = candidate
        .subcategory
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    entry.tags = sanitize_terms(candidate.tags);
    entry.keywords = sanitize_terms(candidate.keywords);
    entry.priority = candidate.priority.unwrap_or(5).clamp(1, 10) as i32;
    entry.source_section = candidate
        .source_section
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    entry.page_reference = candidate.page_reference;

    Ok(entry)
}

fn sanitize_terms(terms: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for term in terms {
        let cleaned = term.trim().to_lowercase();
        if !cleaned.is_empty() && !out.contains(&cleaned) {
            out.push(cleaned);
        }
        if out.len() >= 10 {
            break;
        }
    }
    out
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Carve the first balanced JSON object out of free-form text.
///
/// Tracks string and escape state so braces inside string literals do not
/// confuse the depth count. Returns `None` when no object closes.
pub fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use docmill_domain::DocumentAnalysis;

    fn analysis() -> DocumentAnalysis {
        DocumentAnalysis::fallback()
    }

    #[test]
    fn test_parse_clean_response() {
        let response = r#"{"entries": [
            {"title": "Returns", "content": "Returns accepted within 30 days.",
             "category": "Return Policy", "confidence_score": 0.9}
        ]}"#;
        let entries = parse_response(response, &analysis(), 20).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, "Return Policy");
        assert_eq!(entries[0].source, EntrySource::AiExtraction);
    }

    #[test]
    fn test_parse_json_buried_in_prose() {
        let response = "Sure! Here are the entries:\n```json\n\
            {\"entries\": [{\"title\": \"Shipping\", \"content\": \"Ships in 2 days.\"}]}\n\
            ```\nLet me know if you need more.";
        let entries = parse_response(response, &analysis(), 20).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Shipping");
    }

    #[test]
    fn test_confidence_clamped_into_range() {
        let response = r#"{"entries": [
            {"title": "A", "content": "a content", "confidence_score": 7.5},
            {"title": "B", "content": "b content", "confidence_score": -2.0},
            {"title": "C", "content": "c content"}
        ]}"#;
        let entries = parse_response(response, &analysis(), 20).unwrap();
        assert!((entries[0].confidence_score - 1.0).abs() < f64::EPSILON);
        assert!((entries[1].confidence_score - 0.1).abs() < f64::EPSILON);
        assert!((entries[2].confidence_score - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_category_maps_to_other() {
        let response = r#"{"entries": [
            {"title": "A", "content": "a content", "category": "Llama Care"}
        ]}"#;
        let entries = parse_response(response, &analysis(), 20).unwrap();
        assert_eq!(entries[0].category, "Other");
    }

    #[test]
    fn test_missing_category_falls_back_to_analysis() {
        let response = r#"{"entries": [{"title": "A", "content": "a content"}]}"#;
        let entries = parse_response(response, &analysis(), 20).unwrap();
        assert_eq!(entries[0].category, "Terms & Conditions");
    }

    #[test]
    fn test_entries_without_title_or_content_skipped() {
        let response = r#"{"entries": [
            {"title": "", "content": "orphan"},
            {"title": "orphan"},
            {"title": "Valid", "content": "kept"}
        ]}"#;
        let entries = parse_response(response, &analysis(), 20).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Valid");
    }

    #[test]
    fn test_max_entries_ceiling_enforced() {
        let items: Vec<String> = (0..30)
            .map(|i| format!(r#"{{"title": "T{}", "content": "c{}"}}"#, i, i))
            .collect();
        let response = format!(r#"{{"entries": [{}]}}"#, items.join(","));
        let entries = parse_response(&response, &analysis(), 5).unwrap();
        assert_eq!(entries.len(), 5);
    }

    #[test]
    fn test_non_array_entries_field_is_an_error() {
        let result = parse_response(r#"{"entries": "none today"}"#, &analysis(), 20);
        assert!(matches!(result, Err(SegmentError::InvalidShape(_))));
    }

    #[test]
    fn test_empty_entry_list_is_an_error() {
        let result = parse_response(r#"{"entries": []}"#, &analysis(), 20);
        assert!(matches!(result, Err(SegmentError::EmptyEntries)));
    }

    #[test]
    fn test_no_json_is_an_error() {
        let result = parse_response("I could not process this document.", &analysis(), 20);
        assert!(matches!(result, Err(SegmentError::NoJsonObject)));
    }

    #[test]
    fn test_unbalanced_json_is_an_error() {
        let result = parse_response(r#"{"entries": [{"title": "A""#, &analysis(), 20);
        assert!(matches!(result, Err(SegmentError::NoJsonObject)));
    }

    #[test]
    fn test_braces_inside_strings_ignored() {
        let text = r#"noise {"entries": [{"title": "a }", "content": "b {"}]} trailing"#;
        let carved = first_json_object(text).unwrap();
        assert!(carved.starts_with(r#"{"entries""#));
        assert!(carved.ends_with("}]}"));
    }

    #[test]
    fn test_priority_clamped() {
        let response = r#"{"entries": [
            {"title": "A", "content": "a content", "priority": 99}
        ]}"#;
        let entries = parse_response(response, &analysis(), 20).unwrap();
        assert_eq!(entries[0].priority, 10);
    }
}
