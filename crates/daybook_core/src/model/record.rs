//! Record domain model and field grammars.
//!
//! # Responsibility
//! - Define the canonical record for contact and appointment entries.
//! - Validate field values against fixed token grammars.
//!
//! # Invariants
//! - `name` is non-empty after validation.
//! - Field values are never mutated in place; an edit builds a new record.
//! - Tags are normalized to lowercase and deduplicated, insertion order kept.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?\d[\d \-]{2,19}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static SLOT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([01]?\d|2[0-3]):[0-5]\d(-([01]?\d|2[0-3]):[0-5]\d)?$")
        .expect("valid slot regex")
});

pub type RecordResult<T> = Result<T, RecordError>;

/// Field-level validation error for record values.
#[derive(Debug)]
pub enum RecordError {
    EmptyName,
    EmptyField(&'static str),
    InvalidPhone(String),
    InvalidEmail(String),
    InvalidSlot(String),
    InvalidTag(String),
}

impl Display for RecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "record name cannot be empty"),
            Self::EmptyField(field) => write!(f, "{field} cannot be empty"),
            Self::InvalidPhone(value) => write!(f, "invalid phone `{value}`"),
            Self::InvalidEmail(value) => write!(f, "invalid email `{value}`"),
            Self::InvalidSlot(value) => {
                write!(f, "invalid time slot `{value}`; expected HH:MM or HH:MM-HH:MM")
            }
            Self::InvalidTag(value) => write!(f, "invalid tag `{value}`"),
        }
    }
}

impl Error for RecordError {}

/// Category of a record.
///
/// One record shape backs both views; the kind is inferred from whether
/// scheduling fields (day/slot) are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Address-book entry for a person.
    Contact,
    /// Calendar entry with day and/or time slot.
    Appointment,
}

impl RecordKind {
    /// Infers the kind from the scheduling fields of a record.
    pub fn infer(day: Option<Day>, slot: Option<&str>) -> Self {
        if day.is_some() || slot.is_some() {
            Self::Appointment
        } else {
            Self::Contact
        }
    }
}

/// Day-of-week token for appointment records and list filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// Parses a day token case-insensitively.
    ///
    /// Accepts full names and three-letter abbreviations.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "monday" | "mon" => Some(Self::Monday),
            "tuesday" | "tue" => Some(Self::Tuesday),
            "wednesday" | "wed" => Some(Self::Wednesday),
            "thursday" | "thu" => Some(Self::Thursday),
            "friday" | "fri" => Some(Self::Friday),
            "saturday" | "sat" => Some(Self::Saturday),
            "sunday" | "sun" => Some(Self::Sunday),
            _ => None,
        }
    }

    /// Canonical lowercase name used for display and persistence.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }
}

impl Display for Day {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical record for contact and appointment entries.
///
/// `name` doubles as the person name (contacts) and the subject
/// (appointments); it is the primary key field for sorting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub kind: RecordKind,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub day: Option<Day>,
    /// 24h time slot, `HH:MM` or `HH:MM-HH:MM`.
    pub slot: Option<String>,
    /// Normalized lowercase tags, deduplicated, insertion order kept.
    pub tags: Vec<String>,
}

impl Record {
    /// Creates a contact record with only a name set.
    pub fn contact(name: impl Into<String>) -> Self {
        Self {
            kind: RecordKind::Contact,
            name: name.into(),
            phone: None,
            email: None,
            address: None,
            day: None,
            slot: None,
            tags: Vec::new(),
        }
    }

    /// Validates every present field against its token grammar.
    pub fn validate(&self) -> RecordResult<()> {
        validate_name(&self.name)?;
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(address) = &self.address {
            validate_address(address)?;
        }
        if let Some(slot) = &self.slot {
            validate_slot(slot)?;
        }
        for tag in &self.tags {
            validate_tag(tag)?;
        }
        Ok(())
    }

    /// Single-line rendering in the same flag grammar the parser accepts.
    pub fn summary(&self) -> String {
        let mut parts = vec![self.name.clone()];
        if let Some(phone) = &self.phone {
            parts.push(format!("p/{phone}"));
        }
        if let Some(email) = &self.email {
            parts.push(format!("e/{email}"));
        }
        if let Some(address) = &self.address {
            parts.push(format!("a/{address}"));
        }
        if let Some(day) = self.day {
            parts.push(format!("d/{day}"));
        }
        if let Some(slot) = &self.slot {
            parts.push(format!("s/{slot}"));
        }
        for tag in &self.tags {
            parts.push(format!("t/{tag}"));
        }
        parts.join(" ")
    }

    /// Concatenated lowercase field text used for keyword matching.
    pub fn search_text(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        if let Some(phone) = &self.phone {
            parts.push(phone);
        }
        if let Some(email) = &self.email {
            parts.push(email);
        }
        if let Some(address) = &self.address {
            parts.push(address);
        }
        if let Some(day) = self.day {
            parts.push(day.as_str());
        }
        if let Some(slot) = &self.slot {
            parts.push(slot);
        }
        for tag in &self.tags {
            parts.push(tag);
        }
        parts.join(" ").to_lowercase()
    }
}

/// Rejects empty or whitespace-only names.
pub fn validate_name(value: &str) -> RecordResult<()> {
    if value.trim().is_empty() {
        return Err(RecordError::EmptyName);
    }
    Ok(())
}

pub fn validate_phone(value: &str) -> RecordResult<()> {
    if !PHONE_RE.is_match(value) {
        return Err(RecordError::InvalidPhone(value.to_string()));
    }
    Ok(())
}

pub fn validate_email(value: &str) -> RecordResult<()> {
    if !EMAIL_RE.is_match(value) {
        return Err(RecordError::InvalidEmail(value.to_string()));
    }
    Ok(())
}

pub fn validate_address(value: &str) -> RecordResult<()> {
    if value.trim().is_empty() {
        return Err(RecordError::EmptyField("address"));
    }
    Ok(())
}

pub fn validate_slot(value: &str) -> RecordResult<()> {
    if !SLOT_RE.is_match(value) {
        return Err(RecordError::InvalidSlot(value.to_string()));
    }
    Ok(())
}

/// Tags must be single lowercase tokens; commas are reserved by storage.
pub fn validate_tag(value: &str) -> RecordResult<()> {
    if value.is_empty() || value.chars().any(|c| c.is_whitespace() || c == ',') {
        return Err(RecordError::InvalidTag(value.to_string()));
    }
    Ok(())
}

/// Normalizes tags to lowercase and removes duplicates, keeping first-seen
/// order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::{normalize_tags, Day};

    #[test]
    fn day_parse_accepts_abbreviations_case_insensitively() {
        assert_eq!(Day::parse("MON"), Some(Day::Monday));
        assert_eq!(Day::parse(" friday "), Some(Day::Friday));
        assert_eq!(Day::parse("funday"), None);
    }

    #[test]
    fn normalize_tags_lowercases_and_deduplicates() {
        let tags = vec!["Friend".to_string(), "friend".to_string(), "work".to_string()];
        assert_eq!(normalize_tags(&tags), vec!["friend", "work"]);
    }
}
