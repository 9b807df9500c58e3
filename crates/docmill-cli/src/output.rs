//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use docmill_domain::{KnowledgeEntry, ProcessingLogEntry, ProcessingResult};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format knowledge entries.
    pub fn format_entries(&self, entries: &[KnowledgeEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_entries_json(entries),
            OutputFormat::Table => self.format_entries_table(entries),
            OutputFormat::Quiet => self.format_entries_quiet(entries),
        }
    }

    fn format_entries_json(&self, entries: &[KnowledgeEntry]) -> Result<String> {
        let json_entries: Vec<serde_json::Value> = entries
            .iter()
            .map(|e| {
                serde_json::json!({
                    "id": e.id.to_string(),
                    "title": e.title,
                    "content": e.content,
                    "category": e.category,
                    "subcategory": e.subcategory,
                    "tags": e.tags,
                    "keywords": e.keywords,
                    "priority": e.priority,
                    "confidence_score": e.confidence_score,
                    "source": e.source.as_str(),
                    "source_section": e.source_section,
                    "page_reference": e.page_reference,
                    "approved": e.approved,
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&json_entries)?)
    }

    fn format_entries_table(&self, entries: &[KnowledgeEntry]) -> Result<String> {
        if entries.is_empty() {
            return Ok(self.colorize("No entries found.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Title", "Category", "Source", "Confidence", "Approved"]);

        for entry in entries {
            let id = entry.id.to_string();
            let confidence = format!("{:.2}", entry.confidence_score);
            builder.push_record([
                &id[..8], // Truncate ID for readability
                &truncate(&entry.title, 40),
                &entry.category,
                entry.source.as_str(),
                &confidence,
                if entry.approved { "yes" } else { "no" },
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        Ok(table.to_string())
    }

    fn format_entries_quiet(&self, entries: &[KnowledgeEntry]) -> Result<String> {
        let ids: Vec<String> = entries.iter().map(|e| e.id.to_string()).collect();
        Ok(ids.join("\n"))
    }

    /// Format a processing result summary line.
    pub fn format_result_summary(&self, result: &ProcessingResult) -> String {
        if result.success {
            self.success(&format!(
                "Extracted {} entries ({} document, confidence {:.2})",
                result.entries.len(),
                result.analysis.document_type.as_str(),
                result.analysis.confidence
            ))
        } else {
            self.error("Processing failed; see log for details")
        }
    }

    /// Format the per-run processing log.
    pub fn format_log(&self, entries: &[ProcessingLogEntry]) -> String {
        entries
            .iter()
            .map(|e| {
                let line = match &e.details {
                    Some(details) => format!("[{}] {} ({})", e.level, e.message, details),
                    None => format!("[{}] {}", e.level, e.message),
                };
                match e.level.as_str() {
                    "warning" => self.colorize(&line, "yellow"),
                    "error" => self.colorize(&line, "red"),
                    _ => line,
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docmill_domain::EntrySource;

    fn create_test_entry() -> KnowledgeEntry {
        KnowledgeEntry::new(
            "Return window",
            "Returns are accepted within thirty days.",
            "Return Policy",
            0.8,
            EntrySource::Pattern,
        )
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_entries(&[create_test_entry()]).unwrap();
        assert!(output.contains("Return window"));
        assert!(output.contains("confidence_score"));
    }

    #[test]
    fn test_quiet_format_is_ids_only() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let entry = create_test_entry();
        let output = formatter.format_entries(&[entry.clone()]).unwrap();
        assert_eq!(output, entry.id.to_string());
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_entries(&[create_test_entry()]).unwrap();
        assert!(output.contains("Return window"));
        assert!(output.contains("Category"));
    }

    #[test]
    fn test_empty_entries() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_entries(&[]).unwrap();
        assert!(output.contains("No entries found"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }

    #[test]
    fn test_truncate_long_title() {
        assert_eq!(truncate("short", 40), "short");
        let long = "x".repeat(60);
        let out = truncate(&long, 40);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 40);
    }
}
