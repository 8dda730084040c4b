//! Typed commands and their execution contracts.
//!
//! # Responsibility
//! - Define the closed command set produced by the parser.
//! - Apply each command to the record store and shape user feedback.
//!
//! # Invariants
//! - `execute` never panics on user-reachable input and never raises an
//!   error to the caller; every failure becomes a `CommandResult` message.
//! - Execute-time failures (duplicate, stale index) leave the store
//!   unchanged.

use crate::model::record::{Day, Record, RecordKind};
use crate::store::{RecordStore, SortDirection, StoreError};
use once_cell::sync::Lazy;

pub const FEEDBACK_INVALID_FORMAT: &str = "Invalid command format!";
pub const FEEDBACK_DUPLICATE_RECORD: &str = "This record already exists in the daybook!";
pub const FEEDBACK_INDEX_OUT_OF_RANGE: &str = "The record index provided is invalid!";
pub const FEEDBACK_CLEARED: &str = "Daybook has been cleared!";
pub const FEEDBACK_SORTED_ASCENDING: &str = "Records sorted in ascending order!";
pub const FEEDBACK_SORTED_DESCENDING: &str = "Records sorted in descending order!";
pub const FEEDBACK_EXIT: &str = "Exiting daybook. Goodbye!";

pub const ADD_USAGE: &str =
    "add: Adds a record.\n  Usage: add NAME [p/PHONE] [e/EMAIL] [a/ADDRESS] [d/DAY] [s/SLOT] [t/TAG]...";
pub const DELETE_USAGE: &str =
    "delete: Removes the record at the given index.\n  Usage: delete INDEX";
pub const EDIT_USAGE: &str =
    "edit: Replaces fields of the record at the given index.\n  Usage: edit INDEX [n/NAME] [p/PHONE] [e/EMAIL] [a/ADDRESS] [d/DAY] [s/SLOT] [t/TAG]...";
pub const FIND_USAGE: &str =
    "find: Lists records whose fields contain every keyword.\n  Usage: find KEYWORD [MORE_KEYWORDS]...";
pub const LIST_USAGE: &str = "list: Lists all records, optionally filtered by day.\n  Usage: list [DAY]";
pub const SORT_USAGE: &str =
    "sort: Orders records by name.\n  Usage: sort [ascending|asc|descending|desc]";
pub const CLEAR_USAGE: &str = "clear: Removes all records.\n  Usage: clear";
pub const HELP_USAGE: &str = "help: Shows this usage text.\n  Usage: help";
pub const EXIT_USAGE: &str = "exit: Leaves the session.\n  Usage: exit";

static HELP_TEXT: Lazy<String> = Lazy::new(|| {
    [
        ADD_USAGE,
        DELETE_USAGE,
        EDIT_USAGE,
        FIND_USAGE,
        LIST_USAGE,
        SORT_USAGE,
        CLEAR_USAGE,
        HELP_USAGE,
        EXIT_USAGE,
    ]
    .join("\n")
});

/// Full usage text for every command, shown by `help` and on parse failures.
pub fn help_text() -> &'static str {
    &HELP_TEXT
}

/// Per-field overrides applied by the edit command.
///
/// `None` means "keep the old value"; there is no way to unset a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub day: Option<Day>,
    pub slot: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.address.is_none()
            && self.day.is_none()
            && self.slot.is_none()
            && self.tags.is_none()
    }

    /// Builds the replacement record from the old record's fields overridden
    /// by the patch. The kind is re-inferred from the resulting fields.
    pub fn apply(&self, base: &Record) -> Record {
        let mut updated = base.clone();
        if let Some(name) = &self.name {
            updated.name = name.clone();
        }
        if let Some(phone) = &self.phone {
            updated.phone = Some(phone.clone());
        }
        if let Some(email) = &self.email {
            updated.email = Some(email.clone());
        }
        if let Some(address) = &self.address {
            updated.address = Some(address.clone());
        }
        if let Some(day) = self.day {
            updated.day = Some(day);
        }
        if let Some(slot) = &self.slot {
            updated.slot = Some(slot.clone());
        }
        if let Some(tags) = &self.tags {
            updated.tags = tags.clone();
        }
        updated.kind = RecordKind::infer(updated.day, updated.slot.as_deref());
        updated
    }
}

/// Result of executing one command: feedback plus optional record echo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
    pub records: Option<Vec<Record>>,
}

impl CommandResult {
    pub fn message(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            records: None,
        }
    }

    pub fn with_records(feedback: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            feedback: feedback.into(),
            records: Some(records),
        }
    }
}

/// Closed set of user commands.
///
/// Indices are 1-based as displayed to the user; the bounds check against
/// the live store happens at execute time, not parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(Record),
    Delete { index: usize },
    Edit { index: usize, patch: RecordPatch },
    Find { keywords: Vec<String> },
    List { day: Option<Day> },
    Sort(SortDirection),
    Clear,
    Help,
    Exit,
    /// Degenerate variant carrying parse-failure feedback.
    Incorrect { feedback: String },
}

impl Command {
    /// Whether this command asks the session loop to terminate.
    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Exit)
    }

    /// Whether executing this command can change store contents or order.
    ///
    /// The session loop persists after mutating commands only.
    pub fn mutates_store(&self) -> bool {
        matches!(
            self,
            Self::Add(_) | Self::Delete { .. } | Self::Edit { .. } | Self::Sort(_) | Self::Clear
        )
    }

    /// Applies this command to the store and returns user-facing feedback.
    pub fn execute(self, store: &mut RecordStore) -> CommandResult {
        match self {
            Self::Add(record) => execute_add(store, record),
            Self::Delete { index } => execute_delete(store, index),
            Self::Edit { index, patch } => execute_edit(store, index, &patch),
            Self::Find { keywords } => execute_find(store, &keywords),
            Self::List { day } => execute_list(store, day),
            Self::Sort(direction) => execute_sort(store, direction),
            Self::Clear => {
                store.clear();
                CommandResult::message(FEEDBACK_CLEARED)
            }
            Self::Help => CommandResult::message(help_text()),
            Self::Exit => CommandResult::message(FEEDBACK_EXIT),
            Self::Incorrect { feedback } => CommandResult::message(feedback),
        }
    }
}

fn execute_add(store: &mut RecordStore, record: Record) -> CommandResult {
    match store.add(record.clone()) {
        Ok(()) => CommandResult::with_records(
            format!("New record added: {}", record.summary()),
            vec![record],
        ),
        Err(StoreError::Duplicate) => CommandResult::message(FEEDBACK_DUPLICATE_RECORD),
        Err(err) => CommandResult::message(err.to_string()),
    }
}

fn execute_delete(store: &mut RecordStore, index: usize) -> CommandResult {
    let Some(index0) = index.checked_sub(1) else {
        return CommandResult::message(FEEDBACK_INDEX_OUT_OF_RANGE);
    };
    match store.remove(index0) {
        Ok(removed) => CommandResult::with_records(
            format!("Deleted record: {}", removed.summary()),
            vec![removed],
        ),
        Err(StoreError::IndexOutOfRange { .. }) => {
            CommandResult::message(FEEDBACK_INDEX_OUT_OF_RANGE)
        }
        Err(err) => CommandResult::message(err.to_string()),
    }
}

fn execute_edit(store: &mut RecordStore, index: usize, patch: &RecordPatch) -> CommandResult {
    let Some(index0) = index.checked_sub(1) else {
        return CommandResult::message(FEEDBACK_INDEX_OUT_OF_RANGE);
    };
    let Some(base) = store.records().get(index0) else {
        return CommandResult::message(FEEDBACK_INDEX_OUT_OF_RANGE);
    };
    let updated = patch.apply(base);
    match store.replace(index0, updated.clone()) {
        Ok(_) => CommandResult::with_records(
            format!("Edited record: {}", updated.summary()),
            vec![updated],
        ),
        Err(StoreError::Duplicate) => CommandResult::message(FEEDBACK_DUPLICATE_RECORD),
        Err(StoreError::IndexOutOfRange { .. }) => {
            CommandResult::message(FEEDBACK_INDEX_OUT_OF_RANGE)
        }
    }
}

fn execute_find(store: &RecordStore, keywords: &[String]) -> CommandResult {
    let matches = store.find(keywords);
    CommandResult::with_records(format!("{} record(s) found!", matches.len()), matches)
}

fn execute_list(store: &RecordStore, day: Option<Day>) -> CommandResult {
    let records = match day {
        Some(day) => store.records_on(day),
        None => store.records().to_vec(),
    };
    CommandResult::with_records(format!("{} record(s) listed!", records.len()), records)
}

fn execute_sort(store: &mut RecordStore, direction: SortDirection) -> CommandResult {
    store.sort(direction);
    let feedback = match direction {
        SortDirection::Ascending => FEEDBACK_SORTED_ASCENDING,
        SortDirection::Descending => FEEDBACK_SORTED_DESCENDING,
    };
    CommandResult::message(feedback)
}
