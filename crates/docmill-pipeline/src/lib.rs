//! Docmill Processing Pipeline
//!
//! The orchestrator that turns one uploaded document into knowledge entries:
//! text extraction, then classification, then segmentation, with a per-run
//! structured log accumulated throughout.
//!
//! The pipeline itself is side-effect free apart from tracing output; it
//! returns in-memory results and leaves persistence to the caller via the
//! `EntryStore` trait.
//!
//! # Examples
//!
//! ```
//! use docmill_llm::MockChatProvider;
//! use docmill_domain::RawDocument;
//! use docmill_pipeline::{DocumentProcessor, ProcessorConfig};
//! use std::sync::Arc;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let processor = DocumentProcessor::new(
//!     Arc::new(MockChatProvider::default()),
//!     ProcessorConfig::default(),
//! );
//! let document = RawDocument::new(
//!     "terms.txt",
//!     "text/plain",
//!     b"1. Returns are accepted within thirty days of the delivery date.".to_vec(),
//! );
//! let result = processor.process(&document).await;
//! assert!(result.success);
//! # });
//! ```

#![warn(missing_docs)]

mod config;
mod processor;

pub use config::ProcessorConfig;
pub use processor::DocumentProcessor;
