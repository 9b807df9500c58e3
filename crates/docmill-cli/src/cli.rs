//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Docmill CLI - Turn policy and support documents into knowledge entries.
#[derive(Debug, Parser)]
#[command(name = "docmill")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Database file path (overrides the config file)
    #[arg(short, long, global = true, env = "DOCMILL_DB")]
    pub database: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Process a document into knowledge entries
    Process(ProcessArgs),

    /// List the knowledge entries extracted from a document
    Entries(EntriesArgs),

    /// Approve or un-approve a knowledge entry
    Approve(ApproveArgs),

    /// Delete a knowledge entry
    Delete(DeleteArgs),
}

/// Arguments for the process command.
#[derive(Debug, Parser)]
pub struct ProcessArgs {
    /// Path to the document file
    pub file: String,

    /// Media type override (inferred from the extension by default)
    #[arg(short, long)]
    pub media_type: Option<String>,

    /// Attempt AI segmentation (requires [ai] configuration)
    #[arg(long)]
    pub ai: bool,

    /// Analyze and segment without writing to the database
    #[arg(long)]
    pub dry_run: bool,

    /// Print the full processing log
    #[arg(short, long)]
    pub verbose: bool,
}

/// Arguments for the entries command.
#[derive(Debug, Parser)]
pub struct EntriesArgs {
    /// Document ID (UUID)
    pub document_id: String,
}

/// Arguments for the approve command.
#[derive(Debug, Parser)]
pub struct ApproveArgs {
    /// Entry ID (UUID)
    pub entry_id: String,

    /// Remove approval instead of granting it
    #[arg(long)]
    pub revoke: bool,
}

/// Arguments for the delete command.
#[derive(Debug, Parser)]
pub struct DeleteArgs {
    /// Entry ID (UUID)
    pub entry_id: String,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_command_parses() {
        let cli = Cli::parse_from(["docmill", "process", "terms.pdf", "--ai"]);
        match cli.command {
            Command::Process(args) => {
                assert_eq!(args.file, "terms.pdf");
                assert!(args.ai);
                assert!(!args.dry_run);
            }
            _ => panic!("Expected Process command"),
        }
    }

    #[test]
    fn test_approve_command_parses() {
        let cli = Cli::parse_from(["docmill", "approve", "some-id", "--revoke"]);
        match cli.command {
            Command::Approve(args) => {
                assert_eq!(args.entry_id, "some-id");
                assert!(args.revoke);
            }
            _ => panic!("Expected Approve command"),
        }
    }

    #[test]
    fn test_global_format_flag() {
        let cli = Cli::parse_from(["docmill", "--format", "json", "entries", "some-id"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
    }
}
