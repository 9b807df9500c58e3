//! Approve command implementation.

use crate::cli::ApproveArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use docmill_domain::traits::EntryStore;
use docmill_domain::EntryId;
use docmill_store::SqliteStore;

/// Execute the approve command.
pub fn execute_approve(
    args: ApproveArgs,
    store: &mut SqliteStore,
    formatter: &Formatter,
) -> Result<()> {
    let entry_id = EntryId::from_string(&args.entry_id).map_err(CliError::InvalidInput)?;

    let approved = !args.revoke;
    store.approve_entry(entry_id, approved)?;

    let verb = if approved { "approved" } else { "un-approved" };
    println!("{}", formatter.success(&format!("Entry {} {}", entry_id, verb)));
    Ok(())
}
