//! The five-strategy extraction cascade.

use crate::normalize::normalize_text;
use crate::quality::{check_quality, RejectReason};
use docmill_domain::RawDocument;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static STREAM_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)stream(.*?)endstream").unwrap());
static PAREN_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^)]*)\)").unwrap());
static TJ_SHOW: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^)]*)\)\s*Tj").unwrap());
static TJ_ARRAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\[(.*?)\]\s*TJ").unwrap());
static BT_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)BT(.*?)ET").unwrap());
static FONT_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"Tf\s*\(([^)]*)\)").unwrap());
static TD_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"Td\s*\(([^)]*)\)").unwrap());
static CAP_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z][a-z]+(?:\s+[A-Z]?[a-z]+)+").unwrap());
static LETTER_RUN_3: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]{3,}").unwrap());
static RAW_TEXT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-zA-Z\s.,;:!?]{20,}").unwrap());

/// The independent extraction strategies, in trial order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractStrategy {
    /// Stream-scoped pattern extraction
    AdvancedStream,
    /// Global parenthesized-token extraction
    Basic,
    /// Broad pattern extraction, global and per-stream
    Regex,
    /// Multi-encoding raw text runs
    Raw,
    /// Fixed instructional placeholder, always succeeds
    ManualPlaceholder,
}

impl ExtractStrategy {
    /// Short name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractStrategy::AdvancedStream => "advanced_stream",
            ExtractStrategy::Basic => "basic",
            ExtractStrategy::Regex => "regex",
            ExtractStrategy::Raw => "raw",
            ExtractStrategy::ManualPlaceholder => "manual_placeholder",
        }
    }
}

/// A strategy whose candidate failed the quality gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectedCandidate {
    /// Strategy that produced the candidate
    pub strategy: ExtractStrategy,
    /// Why the gate rejected it
    pub reason: RejectReason,
}

/// Outcome of one extraction run.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Normalized extracted text, never empty
    pub text: String,
    /// Strategy that produced the accepted text
    pub strategy: ExtractStrategy,
    /// Strategies tried and rejected before the accepted one
    pub rejected: Vec<RejectedCandidate>,
}

impl Extraction {
    /// Whether extraction degraded to the manual-entry placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.strategy == ExtractStrategy::ManualPlaceholder
    }
}

/// Best-effort text extraction over raw document bytes.
///
/// Stateless and cheap to construct; one instance may serve concurrent
/// callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExtractor;

impl TextExtractor {
    /// Create an extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract text from a document.
    ///
    /// Never fails: if every strategy's candidate is rejected by the quality
    /// gate, the manual-entry placeholder (which embeds the document name)
    /// is returned.
    pub fn extract(&self, document: &RawDocument) -> Extraction {
        let decoded = String::from_utf8_lossy(&document.bytes).into_owned();
        let mut rejected = Vec::new();

        let strategies: [(ExtractStrategy, fn(&str, &[u8]) -> String); 4] = [
            (ExtractStrategy::AdvancedStream, advanced_stream_extract),
            (ExtractStrategy::Basic, basic_extract),
            (ExtractStrategy::Regex, regex_extract),
            (ExtractStrategy::Raw, raw_text_extract),
        ];

        for (strategy, run) in strategies {
            let candidate = normalize_text(&run(&decoded, &document.bytes));
            match check_quality(&candidate) {
                Ok(()) => {
                    debug!(
                        strategy = strategy.as_str(),
                        chars = candidate.len(),
                        "extraction candidate accepted"
                    );
                    return Extraction {
                        text: candidate,
                        strategy,
                        rejected,
                    };
                }
                Err(reason) => {
                    debug!(
                        strategy = strategy.as_str(),
                        reason = reason.as_str(),
                        "extraction candidate rejected"
                    );
                    rejected.push(RejectedCandidate { strategy, reason });
                }
            }
        }

        Extraction {
            text: manual_entry_placeholder(&document.name),
            strategy: ExtractStrategy::ManualPlaceholder,
            rejected,
        }
    }
}

/// The instructional text returned when no strategy recovers usable text.
pub fn manual_entry_placeholder(document_name: &str) -> String {
    format!(
        "Automatic text extraction could not recover readable content from \
         '{}'. Open the source document and add knowledge entries manually: \
         create one entry per policy, rule, or answer it contains.",
        document_name
    )
}

/// Strategy 1: decode the whole buffer, locate PDF content streams, and
/// recover human-readable runs from each with a set of show-operator and
/// text-block patterns.
fn advanced_stream_extract(decoded: &str, _bytes: &[u8]) -> String {
    let mut parts: Vec<String> = Vec::new();

    for stream in STREAM_BLOCK.captures_iter(decoded) {
        let body = &stream[1];

        for caps in TJ_SHOW.captures_iter(body) {
            push_if_readable(&mut parts, &caps[1]);
        }
        for caps in PAREN_TEXT.captures_iter(body) {
            push_if_readable(&mut parts, &caps[1]);
        }
        for caps in TJ_ARRAY.captures_iter(body) {
            // TJ arrays interleave strings and kerning numbers; pull the
            // parenthesized pieces back out.
            for inner in PAREN_TEXT.captures_iter(&caps[1]) {
                push_if_readable(&mut parts, &inner[1]);
            }
        }
        for caps in BT_BLOCK.captures_iter(body) {
            for inner in PAREN_TEXT.captures_iter(&caps[1]) {
                push_if_readable(&mut parts, &inner[1]);
            }
        }
        for m in CAP_WORDS.find_iter(body) {
            push_if_readable(&mut parts, m.as_str());
        }
    }

    parts.join(" ")
}

fn push_if_readable(parts: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if trimmed.len() >= 5 && LETTER_RUN_3.is_match(trimmed) {
        parts.push(trimmed.to_string());
    }
}

/// Strategy 2: every parenthesis-delimited token in the whole file, with
/// minimal filtering.
fn basic_extract(decoded: &str, _bytes: &[u8]) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for caps in PAREN_TEXT.captures_iter(decoded) {
        let token = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
        if token.len() > 2
            && token.chars().any(|c| c.is_ascii_alphabetic())
            && token.chars().any(|c| c.is_ascii_alphanumeric())
        {
            parts.push(token);
        }
    }

    parts.join(" ")
}

/// Strategy 3: a broader pattern set applied both globally and per-stream,
/// with looser filtering than strategy 1.
fn regex_extract(decoded: &str, _bytes: &[u8]) -> String {
    let patterns: [&Lazy<Regex>; 5] = [&PAREN_TEXT, &TJ_SHOW, &FONT_TEXT, &TD_TEXT, &TJ_ARRAY];
    let mut parts: Vec<String> = Vec::new();

    let mut scan = |haystack: &str| {
        for pattern in patterns {
            for caps in pattern.captures_iter(haystack) {
                let token = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
                if token.len() > 1 && token.chars().any(|c| c.is_ascii_alphabetic()) {
                    parts.push(token.to_string());
                }
            }
        }
    };

    scan(decoded);
    for stream in STREAM_BLOCK.captures_iter(decoded) {
        scan(&stream[1]);
    }

    parts.join(" ")
}

/// Strategy 4: decode under several encodings and keep the longest combined
/// set of plain-text runs.
fn raw_text_extract(decoded: &str, bytes: &[u8]) -> String {
    let latin1: String = bytes.iter().map(|&b| b as char).collect();
    let ascii: String = bytes
        .iter()
        .filter(|&&b| b.is_ascii())
        .map(|&b| b as char)
        .collect();

    let mut best = String::new();
    for text in [decoded, latin1.as_str(), ascii.as_str()] {
        let combined: String = RAW_TEXT_RUN
            .find_iter(text)
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        if combined.len() > best.len() {
            best = combined;
        }
    }
    best
}
