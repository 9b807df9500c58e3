//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Implementations live in other crates (docmill-llm,
//! docmill-store).

use crate::entry::KnowledgeEntry;
use crate::id::{DocumentId, EntryId, JobId};
use crate::RawDocument;

/// A chat-completion request for the delegated segmentation path.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// System prompt (role and output contract)
    pub system: String,

    /// User prompt (instructions plus document text)
    pub user: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Completion token budget
    pub max_tokens: u32,
}

/// Trait for language-model chat completion.
///
/// The sole external call the segmenter's AI path makes. Implementations
/// must tolerate timeouts and malformed responses by returning an error;
/// the pipeline degrades to heuristic segmentation on any failure.
///
/// Implemented by the infrastructure layer (docmill-llm).
pub trait ChatProvider {
    /// Error type for completion operations
    type Error;

    /// Request a text completion.
    fn complete(&self, request: &ChatRequest) -> Result<String, Self::Error>;
}

/// Lifecycle state of a persisted processing job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    /// Queued, not started
    Pending,
    /// Pipeline running
    Processing,
    /// Finished successfully
    Completed,
    /// Finished with `success == false`
    Failed,
}

impl JobStatus {
    /// Canonical string form, used for storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    /// Parse the canonical string form.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(JobStatus::Pending),
            "processing" => Some(JobStatus::Processing),
            "completed" => Some(JobStatus::Completed),
            "failed" => Some(JobStatus::Failed),
            _ => None,
        }
    }
}

/// Trait for durable storage of documents, jobs, and entries.
///
/// Write ordering matters: document row, then job row, then entries, so no
/// entry ever references a missing document. The pipeline itself returns
/// in-memory structures; callers wire results into an `EntryStore`.
///
/// Implemented by the infrastructure layer (docmill-store).
pub trait EntryStore {
    /// Error type for store operations
    type Error;

    /// Persist a document's metadata (not its bytes) plus page estimate.
    fn insert_document(
        &mut self,
        document: &RawDocument,
        page_count: u32,
    ) -> Result<DocumentId, Self::Error>;

    /// Create a processing-job row for a document.
    fn insert_job(&mut self, document_id: DocumentId) -> Result<JobId, Self::Error>;

    /// Advance a job's lifecycle state.
    fn update_job_status(&mut self, job_id: JobId, status: JobStatus) -> Result<(), Self::Error>;

    /// Batch-insert a document's entries.
    fn insert_entries(
        &mut self,
        document_id: DocumentId,
        entries: &[KnowledgeEntry],
    ) -> Result<usize, Self::Error>;

    /// All entries for a document, in insertion order.
    fn entries_for_document(
        &self,
        document_id: DocumentId,
    ) -> Result<Vec<KnowledgeEntry>, Self::Error>;

    /// Toggle the reviewer-approval flag on an entry.
    fn approve_entry(&mut self, entry_id: EntryId, approved: bool) -> Result<(), Self::Error>;

    /// Delete an entry.
    fn delete_entry(&mut self, entry_id: EntryId) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_round_trip() {
        for s in [
            JobStatus::Pending,
            JobStatus::Processing,
            JobStatus::Completed,
            JobStatus::Failed,
        ] {
            assert_eq!(JobStatus::from_str_opt(s.as_str()), Some(s));
        }
        assert_eq!(JobStatus::from_str_opt("cancelled"), None);
    }
}
