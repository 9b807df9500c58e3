//! Core pipeline orchestration.

use crate::config::ProcessorConfig;
use docmill_analyze::DocumentAnalyzer;
use docmill_domain::traits::ChatProvider;
use docmill_domain::{
    DocumentAnalysis, KnowledgeEntry, LogLevel, ProcessingLog, ProcessingResult, RawDocument,
};
use docmill_extract::TextExtractor;
use docmill_segment::EntrySegmenter;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Runs the extract → analyze → segment pipeline for one document.
///
/// The processor never panics on bad input and returns a failed
/// [`ProcessingResult`] rather than an error: every upload produces a result
/// with a per-run log describing what happened. The delegated segmentation
/// path is attempted only when configured, and any failure there (timeout,
/// transport error, unparseable response) falls back to the heuristic
/// cascade, so AI can only ever add quality, not availability risk.
pub struct DocumentProcessor<C>
where
    C: ChatProvider,
{
    provider: Arc<C>,
    extractor: TextExtractor,
    analyzer: DocumentAnalyzer,
    segmenter: EntrySegmenter,
    config: ProcessorConfig,
}

impl<C> DocumentProcessor<C>
where
    C: ChatProvider + Send + Sync + 'static,
    C::Error: std::fmt::Display,
{
    /// Create a processor around a chat provider.
    ///
    /// The provider is only called when `config.use_ai` is set.
    pub fn new(provider: Arc<C>, config: ProcessorConfig) -> Self {
        Self {
            provider,
            extractor: TextExtractor::new(),
            analyzer: DocumentAnalyzer::new(config.analyzer.clone()),
            segmenter: EntrySegmenter::new(config.segmenter.clone()),
            config,
        }
    }

    /// Process one document end to end.
    pub async fn process(&self, document: &RawDocument) -> ProcessingResult {
        let mut log = ProcessingLog::new();
        log.push_with_details(
            LogLevel::Info,
            "processing started",
            Some(format!("{} ({} bytes)", document.name, document.size_bytes())),
        );

        info!(document = %document.name, size = document.size_bytes(), "processing document");

        // Stage 1: text extraction. Never fails; rejected candidates are
        // surfaced in the log so reviewers can see why a strategy lost.
        let extraction = self.extractor.extract(document);
        for rejected in &extraction.rejected {
            debug!(
                strategy = rejected.strategy.as_str(),
                reason = rejected.reason.as_str(),
                "extraction candidate rejected"
            );
            log.push_with_details(
                LogLevel::Warning,
                "extraction candidate rejected",
                Some(format!(
                    "{}: {}",
                    rejected.strategy.as_str(),
                    rejected.reason.as_str()
                )),
            );
        }
        if extraction.is_placeholder() {
            warn!(document = %document.name, "no readable text, using manual-entry placeholder");
            log.push(
                LogLevel::Warning,
                "no readable text extracted, manual entry required",
            );
        } else {
            log.push_with_details(
                LogLevel::Info,
                "text extracted",
                Some(format!(
                    "{} chars via {}",
                    extraction.text.len(),
                    extraction.strategy.as_str()
                )),
            );
        }

        // Stage 2: classification. Pure, no failure path.
        let analysis = self.analyzer.analyze(&extraction.text, &document.name);
        info!(
            document_type = analysis.document_type.as_str(),
            confidence = analysis.confidence,
            "document analyzed"
        );
        log.push_with_details(
            LogLevel::Info,
            "document analyzed",
            Some(format!(
                "{} / {} / {} (confidence {:.2})",
                analysis.document_type.as_str(),
                analysis.structure.as_str(),
                analysis.complexity.as_str(),
                analysis.confidence
            )),
        );

        // Stage 3: segmentation. The placeholder carries no document content,
        // only instructions, so it goes straight to the per-type starter
        // templates instead of through the cascade (or the chat provider).
        let entries = if extraction.is_placeholder() {
            let entries = self.segmenter.template_fallback(analysis.document_type);
            log.push_with_details(
                LogLevel::Info,
                "template entries generated for manual review",
                Some(format!("{} entries", entries.len())),
            );
            entries
        } else {
            self.segment(&extraction.text, &analysis, &mut log).await
        };

        if entries.is_empty() {
            log.push(LogLevel::Error, "segmentation produced no entries");
            return ProcessingResult::failed(log);
        }

        log.push_with_details(
            LogLevel::Info,
            "processing complete",
            Some(format!("{} entries", entries.len())),
        );
        info!(entries = entries.len(), "processing complete");

        ProcessingResult {
            success: true,
            extracted_text: extraction.text,
            analysis,
            entries,
            log,
        }
    }

    /// Pick the segmentation path and always return entries.
    async fn segment(
        &self,
        text: &str,
        analysis: &DocumentAnalysis,
        log: &mut ProcessingLog,
    ) -> Vec<KnowledgeEntry> {
        if self.config.use_ai {
            match self.segment_delegated(text, analysis).await {
                Ok(entries) => {
                    log.push_with_details(
                        LogLevel::Info,
                        "AI segmentation succeeded",
                        Some(format!("{} entries", entries.len())),
                    );
                    return entries;
                }
                Err(reason) => {
                    warn!(%reason, "AI segmentation failed, falling back to heuristics");
                    log.push_with_details(
                        LogLevel::Warning,
                        "AI segmentation failed, falling back to heuristics",
                        Some(reason),
                    );
                }
            }
        }

        let entries = self.segmenter.segment_heuristic(text, analysis);
        log.push_with_details(
            LogLevel::Info,
            "heuristic segmentation complete",
            Some(format!("{} entries", entries.len())),
        );
        entries
    }

    /// The delegated path: one timed chat call plus response validation.
    async fn segment_delegated(
        &self,
        text: &str,
        analysis: &DocumentAnalysis,
    ) -> Result<Vec<KnowledgeEntry>, String> {
        let request = self.segmenter.build_request(text, analysis);
        debug!(prompt_len = request.user.len(), "calling chat provider");

        let provider = Arc::clone(&self.provider);
        let call = tokio::task::spawn_blocking(move || {
            provider
                .complete(&request)
                .map_err(|e| format!("provider error: {}", e))
        });

        let response = timeout(self.config.ai_timeout(), call)
            .await
            .map_err(|_| "timed out".to_string())?
            .map_err(|e| format!("task join error: {}", e))??;

        debug!(response_len = response.len(), "chat provider responded");

        self.segmenter
            .parse_ai_response(&response, analysis)
            .map_err(|e| format!("response rejected: {}", e))
    }
}
