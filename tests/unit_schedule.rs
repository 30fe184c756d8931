mod common;

use chrono::Datelike;
use common::date;
use tutordesk::core::compute_next_due_date;

#[test]
fn test_documented_examples() {
    assert_eq!(compute_next_due_date(date(2024, 1, 31)), date(2024, 2, 29));
    assert_eq!(compute_next_due_date(date(2023, 1, 31)), date(2023, 2, 28));
    assert_eq!(compute_next_due_date(date(2024, 3, 15)), date(2024, 4, 15));
}

#[test]
fn test_every_day_of_a_leap_year_lands_in_the_next_month() {
    let mut day = date(2024, 1, 1);
    while day.year() == 2024 {
        let due = compute_next_due_date(day);

        assert_eq!(due.month(), day.month() % 12 + 1, "{day}");
        assert!(due.day() <= day.day(), "{day}");
        assert!(due > day);
        day = day.succ_opt().unwrap();
    }
}

#[test]
fn test_result_keeps_the_day_when_it_exists() {
    for d in 1..=28 {
        let due = compute_next_due_date(date(2023, 2, d));
        assert_eq!(due, date(2023, 3, d));
    }
}

#[test]
fn test_is_pure() {
    let input = date(2024, 5, 31);
    let first = compute_next_due_date(input);
    let second = compute_next_due_date(input);
    assert_eq!(first, second);
    assert_eq!(first, date(2024, 6, 30));
}
