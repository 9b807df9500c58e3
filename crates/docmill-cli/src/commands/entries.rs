//! Entries command implementation.

use crate::cli::EntriesArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use docmill_domain::traits::EntryStore;
use docmill_domain::DocumentId;
use docmill_store::SqliteStore;

/// Execute the entries command.
pub fn execute_entries(
    args: EntriesArgs,
    store: &SqliteStore,
    formatter: &Formatter,
) -> Result<()> {
    let document_id = DocumentId::from_string(&args.document_id)
        .map_err(CliError::InvalidInput)?;

    let entries = store.entries_for_document(document_id)?;
    println!("{}", formatter.format_entries(&entries)?);
    Ok(())
}
