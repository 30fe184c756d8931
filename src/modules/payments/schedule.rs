use chrono::{Months, NaiveDate};

/// Due date of the payment following one made on `payment_date`.
///
/// Adds one calendar month. A day missing from the target month clamps to
/// that month's last day, so 2024-01-31 is followed by 2024-02-29 and
/// 2023-01-31 by 2023-02-28.
pub fn compute_next_due_date(payment_date: NaiveDate) -> NaiveDate {
    payment_date
        .checked_add_months(Months::new(1))
        .unwrap_or(payment_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_same_day_next_month() {
        assert_eq!(compute_next_due_date(date(2024, 3, 15)), date(2024, 4, 15));
    }

    #[test]
    fn test_month_end_clamps_to_last_valid_day() {
        assert_eq!(compute_next_due_date(date(2024, 1, 31)), date(2024, 2, 29));
        assert_eq!(compute_next_due_date(date(2023, 1, 31)), date(2023, 2, 28));
        assert_eq!(compute_next_due_date(date(2024, 3, 31)), date(2024, 4, 30));
    }

    #[test]
    fn test_december_rolls_into_next_year() {
        assert_eq!(compute_next_due_date(date(2024, 12, 31)), date(2025, 1, 31));
    }

    #[test]
    fn test_last_representable_month_does_not_panic() {
        assert_eq!(compute_next_due_date(NaiveDate::MAX), NaiveDate::MAX);
    }
}
