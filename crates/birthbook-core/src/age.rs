//! Age in whole years between a birth date and a reference date.
//!
//! Dates travel as `YYYY-MM-DD` text through the HTTP surface and the store,
//! so parsing lives next to the arithmetic.

use chrono::{Datelike, NaiveDate, Utc};
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgeError {
    #[error("invalid date {value:?}: expected YYYY-MM-DD")]
    InvalidDate { value: String },
    #[error("reference date {reference} is before birthday {birthday}")]
    BeforeBirth {
        birthday: NaiveDate,
        reference: NaiveDate,
    },
}

pub fn parse_date(value: &str) -> Result<NaiveDate, AgeError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| AgeError::InvalidDate {
        value: value.to_string(),
    })
}

#[must_use]
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Signed whole-year difference from `birthday` to `reference`.
///
/// The year difference is decremented when `(month, day)` of the reference
/// sorts before that of the birthday. The comparison is a plain tuple
/// ordering, so a Feb 29 birthday is still "upcoming" on Feb 28 and already
/// passed on Mar 1 of a non-leap year. Negative when `reference` precedes
/// `birthday`.
#[must_use]
pub fn years_between(birthday: NaiveDate, reference: NaiveDate) -> i64 {
    let mut years = i64::from(reference.year()) - i64::from(birthday.year());
    if (reference.month(), reference.day()) < (birthday.month(), birthday.day()) {
        years -= 1;
    }
    years
}

/// Whole years from `birthday` to `reference`; a reference before the
/// birthday is an error.
pub fn age_on(birthday: NaiveDate, reference: NaiveDate) -> Result<u32, AgeError> {
    if reference < birthday {
        return Err(AgeError::BeforeBirth {
            birthday,
            reference,
        });
    }
    u32::try_from(years_between(birthday, reference)).map_err(|_| AgeError::BeforeBirth {
        birthday,
        reference,
    })
}

/// Parses both dates and computes the age. `reference` defaults to today (UTC).
pub fn calculate_age(birthday: &str, reference: Option<&str>) -> Result<u32, AgeError> {
    let birthday = parse_date(birthday)?;
    let reference = match reference {
        Some(value) => parse_date(value)?,
        None => today(),
    };
    age_on(birthday, reference)
}
