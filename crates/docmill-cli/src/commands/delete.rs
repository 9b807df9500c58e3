//! Delete command implementation.

use crate::cli::DeleteArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use docmill_domain::traits::EntryStore;
use docmill_domain::EntryId;
use docmill_store::SqliteStore;

/// Execute the delete command.
pub fn execute_delete(
    args: DeleteArgs,
    store: &mut SqliteStore,
    formatter: &Formatter,
) -> Result<()> {
    let entry_id = EntryId::from_string(&args.entry_id).map_err(CliError::InvalidInput)?;

    store.delete_entry(entry_id)?;
    println!("{}", formatter.success(&format!("Entry {} deleted", entry_id)));
    Ok(())
}
