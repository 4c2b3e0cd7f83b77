//! Birthday sort key parsed from the textual date of birth.
//!
//! # Responsibility
//! - Parse `MM/DD/YYYY` (one or two digit month/day) into month and day.
//! - Provide a total order by month first, then day. Year never matters.
//!
//! # Invariants
//! - `month` is within 1..=12.
//! - `day` is valid for `month`; February accepts 29.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static DOB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})$").expect("valid dob regex"));

/// Month/day pair used to order people by upcoming birthday.
///
/// Field order matters: the derived `Ord` compares `month` before `day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Birthday {
    month: u8,
    day: u8,
}

/// Error returned when a `dob` string cannot serve as a sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BirthdayParseError {
    /// Text does not look like `MM/DD/YYYY`.
    Format(String),
    /// Text is shaped correctly but the month/day pair does not exist.
    OutOfRange { month: u32, day: u32 },
}

impl Display for BirthdayParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format(value) => {
                write!(f, "date of birth `{value}` must use the MM/DD/YYYY format")
            }
            Self::OutOfRange { month, day } => {
                write!(f, "date of birth has no such month/day: {month:02}/{day:02}")
            }
        }
    }
}

impl Error for BirthdayParseError {}

impl Birthday {
    /// Builds a birthday from numeric components.
    ///
    /// Returns `None` when the pair is not a calendar date.
    pub fn new(month: u8, day: u8) -> Option<Self> {
        if !(1..=12).contains(&month) || day == 0 || day > max_day(month) {
            return None;
        }
        Some(Self { month, day })
    }

    /// Parses the stored `dob` text.
    ///
    /// Surrounding whitespace is ignored; the year must be four digits but
    /// is otherwise unchecked.
    pub fn parse(dob: &str) -> Result<Self, BirthdayParseError> {
        let trimmed = dob.trim();
        let captures = DOB_RE
            .captures(trimmed)
            .ok_or_else(|| BirthdayParseError::Format(trimmed.to_string()))?;

        let month: u32 = captures[1]
            .parse()
            .map_err(|_| BirthdayParseError::Format(trimmed.to_string()))?;
        let day: u32 = captures[2]
            .parse()
            .map_err(|_| BirthdayParseError::Format(trimmed.to_string()))?;

        u8::try_from(month)
            .ok()
            .zip(u8::try_from(day).ok())
            .and_then(|(m, d)| Self::new(m, d))
            .ok_or(BirthdayParseError::OutOfRange { month, day })
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }
}

impl Display for Birthday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.day)
    }
}

fn max_day(month: u8) -> u8 {
    match month {
        2 => 29,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::{max_day, Birthday, BirthdayParseError};

    #[test]
    fn parse_accepts_padded_and_unpadded_components() {
        let padded = Birthday::parse("03/09/1990").expect("padded dob should parse");
        let short = Birthday::parse(" 3/9/1990 ").expect("short dob should parse");
        assert_eq!(padded, short);
        assert_eq!(padded.month(), 3);
        assert_eq!(padded.day(), 9);
    }

    #[test]
    fn parse_rejects_wrong_shape() {
        for bad in ["", "1990-03-09", "03/09/90", "03/09", "a/b/cdef"] {
            let err = Birthday::parse(bad).expect_err("malformed dob must be rejected");
            assert!(matches!(err, BirthdayParseError::Format(_)), "{bad}: {err}");
        }
    }

    #[test]
    fn parse_rejects_impossible_dates() {
        assert_eq!(
            Birthday::parse("13/01/2000").unwrap_err(),
            BirthdayParseError::OutOfRange { month: 13, day: 1 }
        );
        assert!(Birthday::parse("04/31/2000").is_err());
        assert!(Birthday::parse("00/10/2000").is_err());
        assert!(Birthday::parse("02/29/2001").is_ok());
    }

    #[test]
    fn ordering_is_month_then_day() {
        let jan_31 = Birthday::new(1, 31).unwrap();
        let feb_01 = Birthday::new(2, 1).unwrap();
        let feb_02 = Birthday::new(2, 2).unwrap();
        assert!(jan_31 < feb_01);
        assert!(feb_01 < feb_02);
    }

    #[test]
    fn max_day_covers_every_month() {
        let total: u32 = (1..=12).map(|m| u32::from(max_day(m))).sum();
        assert_eq!(total, 366);
    }
}
