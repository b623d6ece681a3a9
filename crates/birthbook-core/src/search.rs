//! Age-range filtering over a scan of active users.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::age::{parse_date, years_between, AgeError};
use crate::models::User;

/// Inclusive age bounds; an absent bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgeRange {
    pub min_age: Option<i64>,
    pub max_age: Option<i64>,
}

impl AgeRange {
    #[must_use]
    pub fn new(min_age: Option<i64>, max_age: Option<i64>) -> Self {
        Self { min_age, max_age }
    }

    #[must_use]
    pub fn contains(&self, age: i64) -> bool {
        self.min_age.map_or(true, |min| age >= min) && self.max_age.map_or(true, |max| age <= max)
    }
}

/// What to do with a stored birthday that does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedBirthdayPolicy {
    /// Drop the record from the results and keep going.
    #[default]
    Skip,
    /// Fail the whole search.
    Reject,
}

#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub users: Vec<User>,
    /// Ids of records dropped because their birthday did not parse.
    pub skipped: Vec<uuid::Uuid>,
}

/// Keeps the users whose age at `reference` falls inside `range`, in input
/// order. Users born after `reference` get a negative age, so they fail any
/// `min_age` bound but pass an open range or a `max_age` bound.
pub fn filter_by_age(
    users: Vec<User>,
    range: AgeRange,
    reference: NaiveDate,
    policy: MalformedBirthdayPolicy,
) -> Result<SearchOutcome, AgeError> {
    let mut outcome = SearchOutcome::default();
    for user in users {
        let birthday = match parse_date(&user.birthday) {
            Ok(birthday) => birthday,
            Err(err) => match policy {
                MalformedBirthdayPolicy::Reject => return Err(err),
                MalformedBirthdayPolicy::Skip => {
                    tracing::warn!(
                        event = "search_birthday_malformed",
                        user_id = %user.id,
                        birthday = %user.birthday,
                        "Skipping user with malformed birthday"
                    );
                    outcome.skipped.push(user.id);
                    continue;
                }
            },
        };
        if range.contains(years_between(birthday, reference)) {
            outcome.users.push(user);
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDate {
        parse_date("2024-06-15").expect("reference date")
    }

    fn users_aged(ages: &[i32]) -> Vec<User> {
        ages.iter()
            .map(|age| User::new_active(format!("aged-{age}"), format!("{}-01-01", 2024 - age)))
            .collect()
    }

    fn names(users: &[User]) -> Vec<&str> {
        users.iter().map(|user| user.name.as_str()).collect()
    }

    #[test]
    fn bounds_are_inclusive() {
        let outcome = filter_by_age(
            users_aged(&[25, 33, 40, 41]),
            AgeRange::new(Some(30), Some(40)),
            reference(),
            MalformedBirthdayPolicy::Skip,
        )
        .expect("search");
        assert_eq!(names(&outcome.users), vec!["aged-33", "aged-40"]);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn absent_bounds_are_open() {
        let all = filter_by_age(
            users_aged(&[25, 33, 40, 41]),
            AgeRange::default(),
            reference(),
            MalformedBirthdayPolicy::Skip,
        )
        .expect("search");
        assert_eq!(all.users.len(), 4);

        let min_only = filter_by_age(
            users_aged(&[25, 33, 40, 41]),
            AgeRange::new(Some(40), None),
            reference(),
            MalformedBirthdayPolicy::Skip,
        )
        .expect("search");
        assert_eq!(names(&min_only.users), vec!["aged-40", "aged-41"]);

        let max_only = filter_by_age(
            users_aged(&[25, 33, 40, 41]),
            AgeRange::new(None, Some(25)),
            reference(),
            MalformedBirthdayPolicy::Skip,
        )
        .expect("search");
        assert_eq!(names(&max_only.users), vec!["aged-25"]);
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let outcome = filter_by_age(
            users_aged(&[25, 33]),
            AgeRange::new(Some(40), Some(30)),
            reference(),
            MalformedBirthdayPolicy::Skip,
        )
        .expect("search");
        assert!(outcome.users.is_empty());
    }

    #[test]
    fn malformed_birthday_is_skipped_or_rejected() {
        let mut users = users_aged(&[33]);
        let broken = User::new_active("broken", "15/06/1990");
        let broken_id = broken.id;
        users.push(broken);

        let outcome = filter_by_age(
            users.clone(),
            AgeRange::default(),
            reference(),
            MalformedBirthdayPolicy::Skip,
        )
        .expect("skip policy keeps going");
        assert_eq!(names(&outcome.users), vec!["aged-33"]);
        assert_eq!(outcome.skipped, vec![broken_id]);

        let err = filter_by_age(
            users,
            AgeRange::default(),
            reference(),
            MalformedBirthdayPolicy::Reject,
        )
        .expect_err("reject policy fails the search");
        assert!(matches!(err, AgeError::InvalidDate { .. }));
    }

    #[test]
    fn unborn_users_only_fail_a_min_bound() {
        let users = || {
            vec![
                User::new_active("adult", "1990-06-15"),
                User::new_active("future", "2030-01-01"),
            ]
        };
        let open = filter_by_age(
            users(),
            AgeRange::default(),
            reference(),
            MalformedBirthdayPolicy::Reject,
        )
        .expect("search");
        assert_eq!(names(&open.users), vec!["adult", "future"]);
        assert!(open.skipped.is_empty());

        let capped = filter_by_age(
            users(),
            AgeRange::new(None, Some(40)),
            reference(),
            MalformedBirthdayPolicy::Reject,
        )
        .expect("search");
        assert_eq!(names(&capped.users), vec!["adult", "future"]);

        let floored = filter_by_age(
            users(),
            AgeRange::new(Some(0), None),
            reference(),
            MalformedBirthdayPolicy::Reject,
        )
        .expect("search");
        assert_eq!(names(&floored.users), vec!["adult"]);
    }
}
