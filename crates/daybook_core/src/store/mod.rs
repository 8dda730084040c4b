//! In-memory record store.
//!
//! # Responsibility
//! - Hold the ordered record collection for one session.
//! - Enforce duplicate rejection and index bounds at mutation time.
//!
//! # Invariants
//! - Insertion order is preserved unless `sort` is called.
//! - No two records compare equal (full-field equality) at the same time.
//! - Descending order is the exact reverse of the ascending sequence.

use crate::model::record::{Day, Record};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Mutation error for the in-memory store.
#[derive(Debug)]
pub enum StoreError {
    /// An equal record is already present.
    Duplicate,
    /// The index no longer refers to an existing record.
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Duplicate => write!(f, "an identical record already exists"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} is out of range for {len} record(s)")
            }
        }
    }
}

impl Error for StoreError {}

/// Ordering applied by the sort command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Ordered collection of records for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps records loaded from storage, keeping their persisted order.
    ///
    /// Callers are expected to pass already-validated records (storage
    /// re-validates rows on load).
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, record: &Record) -> bool {
        self.records.contains(record)
    }

    /// Appends a record, rejecting full-field duplicates.
    pub fn add(&mut self, record: Record) -> StoreResult<()> {
        if self.contains(&record) {
            return Err(StoreError::Duplicate);
        }
        self.records.push(record);
        Ok(())
    }

    /// Removes and returns the record at a zero-based index.
    pub fn remove(&mut self, index: usize) -> StoreResult<Record> {
        if index >= self.records.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        Ok(self.records.remove(index))
    }

    /// Replaces the record at a zero-based index, returning the old record.
    ///
    /// Rejects the replacement when it would duplicate a *different*
    /// existing record; replacing a record with an equal value is allowed.
    pub fn replace(&mut self, index: usize, record: Record) -> StoreResult<Record> {
        if index >= self.records.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        let duplicates_other = self
            .records
            .iter()
            .enumerate()
            .any(|(i, existing)| i != index && *existing == record);
        if duplicates_other {
            return Err(StoreError::Duplicate);
        }
        Ok(std::mem::replace(&mut self.records[index], record))
    }

    /// Removes every record, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        removed
    }

    /// Returns records whose field text contains every keyword
    /// (case-insensitive substring match), in store order.
    pub fn find(&self, keywords: &[String]) -> Vec<Record> {
        let needles: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
        self.records
            .iter()
            .filter(|record| {
                let haystack = record.search_text();
                needles.iter().all(|needle| haystack.contains(needle.as_str()))
            })
            .cloned()
            .collect()
    }

    /// Returns records scheduled on the given day, in store order.
    pub fn records_on(&self, day: Day) -> Vec<Record> {
        self.records
            .iter()
            .filter(|record| record.day == Some(day))
            .cloned()
            .collect()
    }

    /// Reorders records by name.
    ///
    /// Ascending is a stable case-insensitive lexicographic sort on `name`.
    /// Descending is defined as the exact reverse of the ascending sequence,
    /// so sorting ascending then descending always reverses the store.
    pub fn sort(&mut self, direction: SortDirection) {
        self.records.sort_by_key(|record| record.name.to_lowercase());
        if direction == SortDirection::Descending {
            self.records.reverse();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordStore, SortDirection, StoreError};
    use crate::model::record::Record;

    fn named(name: &str) -> Record {
        Record::contact(name)
    }

    #[test]
    fn replace_allows_equal_value_at_same_index() {
        let mut store = RecordStore::from_records(vec![named("alice"), named("bob")]);
        let old = store.replace(0, named("alice")).unwrap();
        assert_eq!(old, named("alice"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn replace_rejects_duplicate_of_other_record() {
        let mut store = RecordStore::from_records(vec![named("alice"), named("bob")]);
        let err = store.replace(0, named("bob")).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate));
        assert_eq!(store.records()[0], named("alice"));
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let mut a = named("same");
        a.phone = Some("111".to_string());
        let mut b = named("same");
        b.phone = Some("222".to_string());

        let mut store = RecordStore::from_records(vec![a.clone(), b.clone()]);
        store.sort(SortDirection::Ascending);
        assert_eq!(store.records(), [a, b]);
    }
}
