use birthbook_core::{age_on, calculate_age, parse_date, AgeRange};
use chrono::{Datelike, Months, NaiveDate};
use proptest::prelude::*;

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid generated date")
}

// Day 29..31 is excluded so that adding whole years never clamps.
fn plain_date() -> impl Strategy<Value = NaiveDate> {
    (1900i32..2100, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| ymd(y, m, d))
}

#[test]
fn documented_examples() {
    assert_eq!(calculate_age("1990-06-15", Some("2024-06-14")), Ok(33));
    assert_eq!(calculate_age("1990-06-15", Some("2024-06-15")), Ok(34));
    assert_eq!(calculate_age("1990-06-15", Some("2024-06-16")), Ok(34));
}

proptest! {
    #[test]
    fn age_counts_complete_years(birthday in plain_date(), offset_days in 0i64..(120 * 366)) {
        let reference = birthday + chrono::Duration::days(offset_days);
        let age = age_on(birthday, reference).expect("reference is not before birth");

        let last_anniversary = birthday
            .checked_add_months(Months::new(12 * age))
            .expect("anniversary in range");
        let next_anniversary = birthday
            .checked_add_months(Months::new(12 * (age + 1)))
            .expect("anniversary in range");
        prop_assert!(last_anniversary <= reference);
        prop_assert!(reference < next_anniversary);
    }

    #[test]
    fn anniversary_is_exact_year_difference(birthday in plain_date(), years in 0i32..120) {
        let reference = ymd(birthday.year() + years, birthday.month(), birthday.day());
        prop_assert_eq!(age_on(birthday, reference), Ok(years as u32));
    }

    #[test]
    fn text_and_date_paths_agree(birthday in plain_date(), offset_days in 0i64..40_000) {
        let reference = birthday + chrono::Duration::days(offset_days);
        let text = calculate_age(
            &birthday.format("%Y-%m-%d").to_string(),
            Some(&reference.format("%Y-%m-%d").to_string()),
        );
        prop_assert_eq!(text, age_on(birthday, reference));
    }

    #[test]
    fn range_contains_matches_bounds(age in -5i64..150, min in proptest::option::of(-5i64..150), max in proptest::option::of(-5i64..150)) {
        let range = AgeRange::new(min, max);
        let expected = min.map_or(true, |m| age >= m) && max.map_or(true, |m| age <= m);
        prop_assert_eq!(range.contains(age), expected);
    }
}

#[test]
fn formatted_dates_parse_back() {
    let date = parse_date("0999-01-31").expect("padded year");
    assert_eq!(date.year(), 999);
}
