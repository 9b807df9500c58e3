//! Docmill Text Extraction
//!
//! Best-effort plain-text recovery from binary documents, primarily PDFs,
//! without a PDF parsing library. Five independent strategies are tried in
//! priority order; the first candidate passing the quality gate wins. If
//! every strategy fails, a manual-entry placeholder is returned, so the
//! pipeline always has *some* text to work with.
//!
//! # Strategies
//!
//! 1. Stream-scoped pattern extraction (`stream..endstream` blocks)
//! 2. Global parenthesized-token extraction
//! 3. Broad pattern extraction, global and per-stream
//! 4. Multi-encoding raw text runs
//! 5. Manual-entry placeholder (never fails)
//!
//! Extraction never returns an error: callers always receive a non-empty
//! string, and the [`Extraction`] outcome records which strategies were
//! rejected and why.

#![warn(missing_docs)]

mod extractor;
mod normalize;
mod pages;
mod quality;

pub use extractor::{ExtractStrategy, Extraction, RejectedCandidate, TextExtractor};
pub use normalize::normalize_text;
pub use pages::estimate_page_count;
pub use quality::{passes_quality_gate, RejectReason};
