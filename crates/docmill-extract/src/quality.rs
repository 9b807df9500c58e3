//! The quality gate applied to every extraction candidate.

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum candidate length to be considered usable text.
pub const MIN_CANDIDATE_LEN: usize = 50;

/// Signature left behind by a common PDF generator; its presence in
/// recovered text reliably indicates extraction garbage rather than
/// document content.
pub const GENERATOR_ARTIFACT: &str = "reportlab";

static ALPHA_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z ]{10,}").unwrap());

/// Why a candidate was rejected by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Candidate shorter than the minimum length
    TooShort,
    /// Candidate contains the known generator artifact
    GeneratorArtifact,
    /// No run of at least ten consecutive letters/spaces
    LowAlphaDensity,
}

impl RejectReason {
    /// Human-readable description for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::TooShort => "candidate too short",
            RejectReason::GeneratorArtifact => "generator artifact detected",
            RejectReason::LowAlphaDensity => "no alphabetic run of sufficient length",
        }
    }
}

/// Evaluate a candidate against the gate, reporting the first failure.
pub fn check_quality(candidate: &str) -> Result<(), RejectReason> {
    if candidate.len() <= MIN_CANDIDATE_LEN {
        return Err(RejectReason::TooShort);
    }
    if candidate.contains(GENERATOR_ARTIFACT) {
        return Err(RejectReason::GeneratorArtifact);
    }
    if !ALPHA_RUN.is_match(candidate) {
        return Err(RejectReason::LowAlphaDensity);
    }
    Ok(())
}

/// Whether a candidate passes the gate.
pub fn passes_quality_gate(candidate: &str) -> bool {
    check_quality(candidate).is_ok()
}
