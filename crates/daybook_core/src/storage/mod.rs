//! Snapshot persistence for the record store.
//!
//! # Responsibility
//! - Load the persisted record snapshot at session start.
//! - Replace the snapshot after mutating commands.
//!
//! # Invariants
//! - `save` then `load` reproduces the same records in the same order.
//! - Rows failing re-validation surface as `InvalidData`, never masked.
//! - Persistence failures never touch in-memory state; the caller decides
//!   how to report them.

use crate::model::record::{Day, Record, RecordError, RecordKind};
use crate::store::RecordStore;
use log::info;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

const RECORD_SELECT_SQL: &str = "SELECT
    kind,
    name,
    phone,
    email,
    address,
    day,
    slot,
    tags
FROM records
ORDER BY position ASC";

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence error for snapshot load/save operations.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    InvalidData(String),
    Validation(RecordError),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<RecordError> for StorageError {
    fn from(value: RecordError) -> Self {
        Self::Validation(value)
    }
}

/// SQLite-backed snapshot storage for the record store.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Wraps an already-bootstrapped connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens (or creates) the records database at `path`.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    /// Opens an in-memory database, used by tests.
    pub fn open_in_memory() -> StorageResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    /// Loads the full snapshot in persisted order, re-validating each row.
    pub fn load(&self) -> StorageResult<Vec<Record>> {
        let mut stmt = self.conn.prepare(RECORD_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_record_row(row)?);
        }

        info!(
            "event=store_load module=storage status=ok records={}",
            records.len()
        );
        Ok(records)
    }

    /// Replaces the persisted snapshot with the current store contents.
    ///
    /// Runs in a single transaction so a failed save leaves the previous
    /// snapshot intact.
    pub fn save(&mut self, store: &RecordStore) -> StorageResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM records;", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO records (position, kind, name, phone, email, address, day, slot, tags)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            )?;
            for (position, record) in store.records().iter().enumerate() {
                stmt.execute(params![
                    position as i64,
                    kind_to_db(record.kind),
                    record.name.as_str(),
                    record.phone.as_deref(),
                    record.email.as_deref(),
                    record.address.as_deref(),
                    record.day.map(Day::as_str),
                    record.slot.as_deref(),
                    record.tags.join(","),
                ])?;
            }
        }
        tx.commit()?;

        info!(
            "event=store_save module=storage status=ok records={}",
            store.len()
        );
        Ok(())
    }
}

fn parse_record_row(row: &Row<'_>) -> StorageResult<Record> {
    let kind_text: String = row.get("kind")?;
    let kind = parse_kind(&kind_text).ok_or_else(|| {
        StorageError::InvalidData(format!("invalid kind `{kind_text}` in records.kind"))
    })?;

    let day = match row.get::<_, Option<String>>("day")? {
        Some(value) => Some(Day::parse(&value).ok_or_else(|| {
            StorageError::InvalidData(format!("invalid day `{value}` in records.day"))
        })?),
        None => None,
    };

    let tags_text: String = row.get("tags")?;
    let tags = if tags_text.is_empty() {
        Vec::new()
    } else {
        tags_text.split(',').map(str::to_string).collect()
    };

    let record = Record {
        kind,
        name: row.get("name")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        address: row.get("address")?,
        day,
        slot: row.get("slot")?,
        tags,
    };
    record.validate()?;
    Ok(record)
}

fn kind_to_db(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Contact => "contact",
        RecordKind::Appointment => "appointment",
    }
}

fn parse_kind(value: &str) -> Option<RecordKind> {
    match value {
        "contact" => Some(RecordKind::Contact),
        "appointment" => Some(RecordKind::Appointment),
        _ => None,
    }
}
