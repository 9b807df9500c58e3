//! Docmill Domain Layer
//!
//! Core types for the document-to-knowledge-base pipeline. This crate has no
//! infrastructure dependencies and defines the value objects and trait
//! interfaces that every other layer depends upon.
//!
//! ## Key Concepts
//!
//! - **RawDocument**: the immutable uploaded input (bytes + metadata)
//! - **DocumentAnalysis**: type/structure/complexity classification of
//!   extracted text, with a [0, 1] confidence score
//! - **KnowledgeEntry**: one self-contained extracted fact or rule, intended
//!   to answer a customer-support query
//! - **ProcessingLog**: the append-only, per-run log returned to callers
//! - **ProcessingResult**: the orchestrator's terminal output
//!
//! ## Architecture
//!
//! Infrastructure implementations live in other crates:
//! - LLM clients implement [`traits::ChatProvider`]
//! - Persistence implements [`traits::EntryStore`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod document;
pub mod entry;
pub mod id;
pub mod log;
pub mod result;
pub mod traits;

// Re-exports for convenience
pub use analysis::{Complexity, DocumentAnalysis, DocumentStructure, DocumentType};
pub use document::RawDocument;
pub use entry::{EntrySource, KnowledgeEntry};
pub use id::{DocumentId, EntryId, JobId};
pub use log::{LogLevel, ProcessingLog, ProcessingLogEntry};
pub use result::ProcessingResult;
