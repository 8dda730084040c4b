//! Command-line parser for the daybook vocabulary.
//!
//! # Responsibility
//! - Turn one raw input line into exactly one typed `Command`.
//! - Apply each command's fixed token/flag grammar to its argument text.
//!
//! # Invariants
//! - `parse_command` is total: every input, including empty and garbage
//!   lines, yields a `Command` (failures become `Command::Incorrect`).
//! - The parser validates syntax only; whether an index still refers to a
//!   live record is checked at execute time.
//! - No state is retained between invocations.

use crate::command::{self, Command, RecordPatch};
use crate::model::record::{
    normalize_tags, validate_address, validate_email, validate_name, validate_phone,
    validate_slot, validate_tag, Day, Record, RecordKind,
};
use crate::store::SortDirection;
use log::debug;

/// Parses one raw input line into a typed command.
///
/// The first whitespace-delimited token is matched case-insensitively
/// against the command vocabulary; the remainder is handed to that
/// command's argument extraction.
pub fn parse_command(raw: &str) -> Command {
    let input = raw.trim();
    if input.is_empty() {
        return incorrect_generic();
    }

    let (word, args) = match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "add" => parse_add(args),
        "delete" => parse_delete(args),
        "edit" => parse_edit(args),
        "find" => parse_find(args),
        "list" => parse_list(args),
        "sort" => Command::Sort(parse_sort_direction(args)),
        // Trailing argument text after bare command words is ignored.
        "clear" => Command::Clear,
        "help" => Command::Help,
        "exit" => Command::Exit,
        _ => {
            debug!("event=parse_reject module=parser reason=unknown_command word={word}");
            incorrect_generic()
        }
    }
}

fn incorrect_generic() -> Command {
    Command::Incorrect {
        feedback: format!(
            "{}\n{}",
            command::FEEDBACK_INVALID_FORMAT,
            command::help_text()
        ),
    }
}

fn incorrect_usage(usage: &str) -> Command {
    Command::Incorrect {
        feedback: format!("{}\n{usage}", command::FEEDBACK_INVALID_FORMAT),
    }
}

fn parse_add(args: &str) -> Command {
    match build_record(args) {
        Ok(record) => Command::Add(record),
        Err(reason) => {
            debug!("event=parse_reject module=parser command=add reason={reason}");
            incorrect_usage(command::ADD_USAGE)
        }
    }
}

fn parse_delete(args: &str) -> Command {
    let mut tokens = args.split_whitespace();
    let index = match (tokens.next(), tokens.next()) {
        (Some(token), None) => parse_display_index(token),
        _ => None,
    };
    match index {
        Some(index) => Command::Delete { index },
        None => {
            debug!("event=parse_reject module=parser command=delete args={args}");
            incorrect_usage(command::DELETE_USAGE)
        }
    }
}

fn parse_edit(args: &str) -> Command {
    let (index_token, rest) = match args.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, rest.trim()),
        None => (args, ""),
    };
    let Some(index) = parse_display_index(index_token) else {
        debug!("event=parse_reject module=parser command=edit reason=bad_index args={args}");
        return incorrect_usage(command::EDIT_USAGE);
    };
    match build_patch(rest) {
        Ok(patch) => Command::Edit { index, patch },
        Err(reason) => {
            debug!("event=parse_reject module=parser command=edit reason={reason}");
            incorrect_usage(command::EDIT_USAGE)
        }
    }
}

fn parse_find(args: &str) -> Command {
    let keywords: Vec<String> = args.split_whitespace().map(str::to_string).collect();
    if keywords.is_empty() {
        return incorrect_usage(command::FIND_USAGE);
    }
    Command::Find { keywords }
}

fn parse_list(args: &str) -> Command {
    let mut tokens = args.split_whitespace();
    match tokens.next() {
        None => Command::List { day: None },
        Some(token) if tokens.next().is_none() => match Day::parse(token) {
            Some(day) => Command::List { day: Some(day) },
            None => {
                debug!("event=parse_reject module=parser command=list filter={token}");
                incorrect_usage(command::LIST_USAGE)
            }
        },
        Some(_) => incorrect_usage(command::LIST_USAGE),
    }
}

/// Missing and unrecognized direction tokens both degrade to ascending;
/// the direction is non-critical, so bad input is not a parse error.
fn parse_sort_direction(args: &str) -> SortDirection {
    match args.split_whitespace().next() {
        Some(token) if token.eq_ignore_ascii_case("descending") || token.eq_ignore_ascii_case("desc") => {
            SortDirection::Descending
        }
        Some(token) if token.eq_ignore_ascii_case("ascending") || token.eq_ignore_ascii_case("asc") => {
            SortDirection::Ascending
        }
        Some(token) => {
            debug!("event=parse_lenient module=parser command=sort token={token} applied=ascending");
            SortDirection::Ascending
        }
        None => SortDirection::Ascending,
    }
}

/// Parses a 1-based display index; zero and non-numeric tokens are
/// syntax errors.
fn parse_display_index(token: &str) -> Option<usize> {
    let index: usize = token.parse().ok()?;
    (index >= 1).then_some(index)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    Name,
    Phone,
    Email,
    Address,
    Day,
    Slot,
    Tag,
}

impl Flag {
    fn prefix(self) -> &'static str {
        match self {
            Self::Name => "n/",
            Self::Phone => "p/",
            Self::Email => "e/",
            Self::Address => "a/",
            Self::Day => "d/",
            Self::Slot => "s/",
            Self::Tag => "t/",
        }
    }
}

fn match_flag(token: &str) -> Option<(Flag, &str)> {
    let value = token.get(2..)?;
    let flag = match &token[..2] {
        "n/" => Flag::Name,
        "p/" => Flag::Phone,
        "e/" => Flag::Email,
        "a/" => Flag::Address,
        "d/" => Flag::Day,
        "s/" => Flag::Slot,
        "t/" => Flag::Tag,
        _ => return None,
    };
    Some((flag, value))
}

/// Splits argument text into leading free text and flagged field values.
///
/// A token opening with a known flag prefix starts a new field; later
/// unflagged tokens extend the most recent field value, so multi-word
/// values (addresses, subjects) need no quoting.
fn tokenize_fields(args: &str) -> (String, Vec<(Flag, String)>) {
    let mut leading: Vec<&str> = Vec::new();
    let mut fields: Vec<(Flag, String)> = Vec::new();

    for token in args.split_whitespace() {
        if let Some((flag, value)) = match_flag(token) {
            fields.push((flag, value.to_string()));
        } else if let Some((_, value)) = fields.last_mut() {
            value.push(' ');
            value.push_str(token);
        } else {
            leading.push(token);
        }
    }

    (leading.join(" "), fields)
}

fn set_once(target: &mut Option<String>, value: String, flag: Flag) -> Result<(), String> {
    if target.is_some() {
        return Err(format!("duplicate {} field", flag.prefix()));
    }
    *target = Some(value);
    Ok(())
}

fn parse_day_value(value: &str) -> Result<Day, String> {
    Day::parse(value).ok_or_else(|| format!("unknown day `{value}`"))
}

fn build_record(args: &str) -> Result<Record, String> {
    let (name, fields) = tokenize_fields(args);
    if name.is_empty() {
        return Err("missing record name".to_string());
    }

    let mut phone = None;
    let mut email = None;
    let mut address = None;
    let mut day: Option<Day> = None;
    let mut slot = None;
    let mut tags: Vec<String> = Vec::new();

    for (flag, value) in fields {
        match flag {
            Flag::Name => return Err("n/ is only accepted by edit".to_string()),
            Flag::Phone => set_once(&mut phone, value, flag)?,
            Flag::Email => set_once(&mut email, value, flag)?,
            Flag::Address => set_once(&mut address, value, flag)?,
            Flag::Slot => set_once(&mut slot, value, flag)?,
            Flag::Day => {
                if day.is_some() {
                    return Err("duplicate d/ field".to_string());
                }
                day = Some(parse_day_value(&value)?);
            }
            Flag::Tag => tags.push(value),
        }
    }

    let record = Record {
        kind: RecordKind::infer(day, slot.as_deref()),
        name,
        phone,
        email,
        address,
        day,
        slot,
        tags: normalize_tags(&tags),
    };
    record.validate().map_err(|err| err.to_string())?;
    Ok(record)
}

fn build_patch(args: &str) -> Result<RecordPatch, String> {
    let (leading, fields) = tokenize_fields(args);
    if !leading.is_empty() {
        return Err(format!("unexpected text before field flags: `{leading}`"));
    }

    let mut patch = RecordPatch::default();
    let mut tags: Vec<String> = Vec::new();

    for (flag, value) in fields {
        match flag {
            Flag::Name => {
                validate_name(&value).map_err(|err| err.to_string())?;
                set_once(&mut patch.name, value, flag)?;
            }
            Flag::Phone => {
                validate_phone(&value).map_err(|err| err.to_string())?;
                set_once(&mut patch.phone, value, flag)?;
            }
            Flag::Email => {
                validate_email(&value).map_err(|err| err.to_string())?;
                set_once(&mut patch.email, value, flag)?;
            }
            Flag::Address => {
                validate_address(&value).map_err(|err| err.to_string())?;
                set_once(&mut patch.address, value, flag)?;
            }
            Flag::Slot => {
                validate_slot(&value).map_err(|err| err.to_string())?;
                set_once(&mut patch.slot, value, flag)?;
            }
            Flag::Day => {
                if patch.day.is_some() {
                    return Err("duplicate d/ field".to_string());
                }
                patch.day = Some(parse_day_value(&value)?);
            }
            Flag::Tag => tags.push(value),
        }
    }

    if !tags.is_empty() {
        let normalized = normalize_tags(&tags);
        for tag in &normalized {
            validate_tag(tag).map_err(|err| err.to_string())?;
        }
        patch.tags = Some(normalized);
    }

    if patch.is_empty() {
        return Err("edit requires at least one field flag".to_string());
    }
    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::tokenize_fields;

    #[test]
    fn tokenize_extends_multiword_values_without_quoting() {
        let (leading, fields) = tokenize_fields("Team sync d/mon a/12 Kent Ridge Drive");
        assert_eq!(leading, "Team sync");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].1, "12 Kent Ridge Drive");
    }

    #[test]
    fn tokenize_treats_multibyte_tokens_as_plain_text() {
        let (leading, fields) = tokenize_fields("café meetup");
        assert_eq!(leading, "café meetup");
        assert!(fields.is_empty());
    }
}
