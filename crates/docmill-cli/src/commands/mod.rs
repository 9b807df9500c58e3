//! Command implementations.

mod approve;
mod delete;
mod entries;
mod process;

pub use approve::execute_approve;
pub use delete::execute_delete;
pub use entries::execute_entries;
pub use process::execute_process;
