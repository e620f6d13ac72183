//! Person records and the century buckets they are grouped into.
//!
//! A [`PersonRecord`] is an open bag of JSON fields. Only `born` and `name`
//! are ever looked at; every other field, and the order fields appear in,
//! travels through the pipeline untouched.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::name::normalize_name;
use crate::year::{parse_year, DateParseError};

pub const BORN: &str = "born";
pub const NAME: &str = "name";

// ------------- Person -------------
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonRecord(Map<String, Value>);

/// Ordered sequence of records. Order is meaningful as a sort tie-break.
pub type RecordCollection = Vec<PersonRecord>;

impl PersonRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
    pub fn born(&self) -> Option<&str> {
        self.0.get(BORN).and_then(Value::as_str)
    }
    pub fn name(&self) -> Option<&str> {
        self.0.get(NAME).and_then(Value::as_str)
    }
    /// Year of birth, with the reason when there is none.
    ///
    /// A missing or `null` birth date is [`DateParseError::Empty`]; a birth
    /// date stored as anything but a string is [`DateParseError::NotText`].
    pub fn birth_year(&self) -> Result<u32, DateParseError> {
        match self.0.get(BORN) {
            None | Some(Value::Null) => Err(DateParseError::Empty),
            Some(Value::String(born)) => parse_year(born),
            Some(other) => Err(DateParseError::NotText(json_kind(other))),
        }
    }
    /// Rewrites a non-empty string `name` in canonical capitalization.
    /// Returns whether the stored value changed.
    pub fn normalize_name(&mut self) -> bool {
        match self.0.get_mut(NAME) {
            Some(Value::String(name)) if !name.is_empty() => {
                let normalized = normalize_name(name.as_str());
                if *name == normalized {
                    false
                } else {
                    *name = normalized;
                    true
                }
            }
            _ => false,
        }
    }
}

/// Resolves birth years while counting dates that were recorded but
/// could not be read. Those records simply have no year.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct YearTally {
    pub unresolved: usize,
}

impl YearTally {
    pub fn year_of(&mut self, record: &PersonRecord) -> Option<u32> {
        match record.birth_year() {
            Ok(year) => Some(year),
            Err(e) => {
                if e.is_unresolved() {
                    self.unresolved += 1;
                    debug!(id=?record.get("id"), reason=%e, "birth year unresolved");
                }
                None
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ------------- Bucket -------------
/// Century a record is filed under. Centuries order numerically and
/// `Unknown` sorts after all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    Century(u32),
    Unknown,
}

impl Bucket {
    pub const UNKNOWN_LABEL: &'static str = "unknown";

    /// Century origin of a year (1899 -> 1800, 1900 -> 1900), or `Unknown`.
    pub fn for_year(year: Option<u32>) -> Self {
        match year {
            Some(y) => Self::Century(y / 100 * 100),
            None => Self::Unknown,
        }
    }
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Century(c) => write!(f, "{}", c),
            Self::Unknown => write!(f, "{}", Self::UNKNOWN_LABEL),
        }
    }
}
