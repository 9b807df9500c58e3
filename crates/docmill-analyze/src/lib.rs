//! Docmill Document Analysis
//!
//! Classifies extracted text: document type, structure, complexity, an
//! estimated entry count, and a confidence score.
//!
//! The analyzer is a pure function of its inputs with no I/O and no failure
//! path: absent signals degrade to the most permissive buckets (terms /
//! unstructured / medium) rather than erroring.
//!
//! # Examples
//!
//! ```
//! use docmill_analyze::DocumentAnalyzer;
//!
//! let analyzer = DocumentAnalyzer::default_config();
//! let analysis = analyzer.analyze("1. Returns accepted within 30 days.", "terms.pdf");
//! assert_eq!(analysis.document_type.as_str(), "terms");
//! ```

#![warn(missing_docs)]

mod analyzer;
mod config;

pub use analyzer::DocumentAnalyzer;
pub use config::AnalyzerConfig;
