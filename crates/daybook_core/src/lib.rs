//! Core command pipeline for the daybook assistant.
//!
//! Raw input lines flow through [`parser::parse_command`] into typed
//! [`command::Command`] values, which execute against the in-memory
//! [`store::RecordStore`] and yield user-facing [`command::CommandResult`]s.
//! This crate is the single source of truth for command grammar and store
//! invariants.

pub mod command;
pub mod logging;
pub mod model;
pub mod parser;
pub mod storage;
pub mod store;

pub use command::{Command, CommandResult, RecordPatch};
pub use logging::{default_log_level, init_logging};
pub use model::record::{Day, Record, RecordError, RecordKind};
pub use parser::parse_command;
pub use storage::{open_db, open_db_in_memory, SqliteStorage, StorageError, StorageResult};
pub use store::{RecordStore, SortDirection, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
