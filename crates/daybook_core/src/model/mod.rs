//! Domain model for daybook records.
//!
//! # Responsibility
//! - Define the canonical record shared by contact/appointment views.
//! - Keep field token grammars in one place.
//!
//! # Invariants
//! - Records are immutable once stored; edits replace the whole record.
//! - Record identity is full-field equality, not a stable ID.

pub mod record;
