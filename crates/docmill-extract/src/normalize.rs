//! Whitespace and character normalization applied to all recovered text.

use once_cell::sync::Lazy;
use regex::Regex;

static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Normalize recovered text:
///
/// - strip non-printable and non-ASCII characters (newlines excepted)
/// - collapse horizontal whitespace runs to single spaces
/// - trim each line, collapse runs of blank lines
/// - trim the result
///
/// Paragraph boundaries (double newlines) are preserved so the paragraph
/// segmentation pass still has something to split on.
pub fn normalize_text(text: &str) -> String {
    let printable: String = text
        .chars()
        .map(|c| {
            if c == '\n' {
                '\n'
            } else if (' '..='~').contains(&c) {
                c
            } else {
                ' '
            }
        })
        .collect();

    let lines: Vec<String> = printable
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();

    let joined = lines.join("\n");
    BLANK_LINES.replace_all(&joined, "\n\n").trim().to_string()
}
