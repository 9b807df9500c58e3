//! Page-count estimation. Auxiliary metadata, never gates extraction.

use once_cell::sync::Lazy;
use regex::Regex;

static PAGE_COUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/Count\s+(\d+)").unwrap());
static PAGE_OBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/Type\s*/Page\b").unwrap());

/// Approximate bytes per page for size-based estimation.
const BYTES_PER_PAGE: usize = 150_000;

/// Upper bound on any estimate.
const MAX_PAGES: u32 = 500;

/// Estimate the page count of a PDF from its raw bytes.
///
/// Tries the `/Count N` token of the page tree first, then counts
/// `/Type /Page` objects, and finally falls back to a size-based guess.
/// Always returns at least 1.
pub fn estimate_page_count(bytes: &[u8]) -> u32 {
    let decoded = String::from_utf8_lossy(bytes);

    if let Some(caps) = PAGE_COUNT.captures(&decoded) {
        if let Ok(n) = caps[1].parse::<u32>() {
            if n > 0 {
                return n.min(MAX_PAGES);
            }
        }
    }

    let objects = PAGE_OBJECT.find_iter(&decoded).count() as u32;
    if objects > 0 {
        return objects.min(MAX_PAGES);
    }

    let by_size = (bytes.len() as f64 / BYTES_PER_PAGE as f64).round() as u32;
    by_size.clamp(1, MAX_PAGES)
}
