//! Docmill Entry Segmentation
//!
//! Turns extracted text plus its analysis into a bounded list of discrete
//! knowledge entries.
//!
//! Two modes exist, selected by the orchestrator:
//!
//! - **Heuristic**: a strict four-pass cascade (pattern lines → sentences →
//!   paragraphs → corrupt-text templates), each pass engaged only when the
//!   previous passes under-produced. See [`heuristics`].
//! - **Delegated (AI)**: this crate builds the prompt and parses/validates
//!   the model's free-form response; the orchestrator owns the actual call
//!   and falls back to the heuristic cascade on any failure or empty
//!   result. See [`prompt`] and [`parser`].
//!
//! A separate per-document-type template table covers the no-usable-text
//! case. Two distinct template tables exist on purpose: they are keyed by
//! trigger condition (no text at all vs. corrupted-but-present text) and
//! carry different confidence scores.

#![warn(missing_docs)]

mod config;
mod error;
pub mod heuristics;
pub mod parser;
pub mod prompt;
mod segmenter;
pub mod templates;

pub use config::SegmenterConfig;
pub use error::SegmentError;
pub use segmenter::EntrySegmenter;
