//! Year extraction from free-form birth dates.
//!
//! Dates in person records are typed in by hand and come in several shapes:
//! a complete date (`"01/01/1915"`), a partially masked one (`"08/??/2015"`,
//! `"??/??/2015"`) or a bare year (`"1815"`). The year is always the last
//! `/`-delimited segment. Placeholder characters are dropped rather than
//! substituted, so a masked year such as `"19??"` yields `19` instead of a
//! fabricated `1900`.

use thiserror::Error;

/// Why a date-like string did not resolve to a year.
///
/// Never fatal: callers fold every variant into "no year".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    #[error("date is empty")]
    Empty,
    #[error("no digits in year segment of '{0}'")]
    NoDigits(String),
    #[error("year segment of '{0}' is out of range")]
    OutOfRange(String),
    #[error("date is a JSON {0}, not a string")]
    NotText(&'static str),
}

impl DateParseError {
    /// `Empty` is the normal "no date recorded" case, everything else is a
    /// date that was recorded but could not be read.
    pub fn is_unresolved(&self) -> bool {
        !matches!(self, Self::Empty)
    }
}

/// Parses the year out of a date-like string.
pub fn parse_year(date_like: &str) -> Result<u32, DateParseError> {
    if date_like.is_empty() {
        return Err(DateParseError::Empty);
    }
    let segment = match date_like.rsplit_once('/') {
        Some((_, last)) => last,
        None => date_like,
    };
    let digits: String = segment.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(DateParseError::NoDigits(date_like.to_string()));
    }
    digits
        .parse::<u32>()
        .map_err(|_| DateParseError::OutOfRange(date_like.to_string()))
}

/// Returns the year of a date-like value, or `None` when there is none to be had.
pub fn extract_year(date_like: Option<&str>) -> Option<u32> {
    date_like.and_then(|d| parse_year(d).ok())
}
