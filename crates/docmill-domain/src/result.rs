//! The orchestrator's terminal output.

use crate::analysis::DocumentAnalysis;
use crate::entry::KnowledgeEntry;
use crate::log::ProcessingLog;

/// Everything one `process` call produced.
///
/// On failure, `analysis` falls back to a fixed default, `entries` is empty
/// and `extracted_text` is empty; the log records what went wrong. Callers
/// treat `success == false` as terminal for that document.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingResult {
    /// Whether the pipeline ran to completion
    pub success: bool,

    /// Normalized extracted text (empty on failure)
    pub extracted_text: String,

    /// Document classification
    pub analysis: DocumentAnalysis,

    /// Extracted knowledge entries (empty on failure)
    pub entries: Vec<KnowledgeEntry>,

    /// Per-run processing log
    pub log: ProcessingLog,
}

impl ProcessingResult {
    /// Build the fixed failure result around an accumulated log.
    pub fn failed(log: ProcessingLog) -> Self {
        Self {
            success: false,
            extracted_text: String::new(),
            analysis: DocumentAnalysis::fallback(),
            entries: Vec::new(),
            log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::DocumentType;
    use crate::log::LogLevel;

    #[test]
    fn test_failed_result_shape() {
        let mut log = ProcessingLog::new();
        log.push(LogLevel::Error, "extraction blew up");

        let result = ProcessingResult::failed(log);
        assert!(!result.success);
        assert!(result.extracted_text.is_empty());
        assert!(result.entries.is_empty());
        assert_eq!(result.analysis.document_type, DocumentType::Terms);
        assert!(result.log.has_level(LogLevel::Error));
    }
}
