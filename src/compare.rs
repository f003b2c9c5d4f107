use chrono::{Duration, NaiveDate};

use crate::models::PeriodComparison;
use crate::totals::Totals;

/// Date bounds for a query window: inclusive start, exclusive end.
pub type Window = (NaiveDate, NaiveDate);

/// The trailing window ending today and the equal-length window right
/// before it.
pub fn compare_windows(today: NaiveDate, since_days: i64) -> (Window, Window) {
    let days = since_days.max(1);
    let current = (today - Duration::days(days), today + Duration::days(1));
    let previous = (
        today - Duration::days(2 * days + 1),
        today - Duration::days(days),
    );
    (current, previous)
}

/// Percent change between two periods. Growth from a zero baseline is
/// reported as a flat +100, not infinity; two zeroes report 0 and the
/// caller suppresses the indicator via [`compare_totals`].
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        if current > 0.0 {
            100.0
        } else {
            0.0
        }
    } else {
        (current - previous) / previous * 100.0
    }
}

/// Compare two windows metric by metric. Each comparison is independent;
/// `percent_change` is `None` when both sides are zero so nothing renders.
pub fn compare_totals(current: &Totals, previous: &Totals) -> Vec<PeriodComparison> {
    current
        .iter()
        .map(|(metric, value)| {
            let prior = previous.get(metric);
            PeriodComparison {
                metric,
                current: value,
                previous: prior,
                percent_change: if value == 0.0 && prior == 0.0 {
                    None
                } else {
                    Some(percent_change(value, prior))
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_changes() {
        assert_eq!(percent_change(150.0, 100.0), 50.0);
        assert_eq!(percent_change(50.0, 100.0), -50.0);
    }

    #[test]
    fn growth_from_zero_is_a_flat_hundred() {
        assert_eq!(percent_change(50.0, 0.0), 100.0);
    }

    #[test]
    fn zero_to_zero_is_zero() {
        assert_eq!(percent_change(0.0, 0.0), 0.0);
    }

    #[test]
    fn windows_are_equal_length_and_adjacent() {
        let today = NaiveDate::from_ymd_opt(2026, 7, 31).unwrap();
        let ((cur_from, cur_to), (prev_from, prev_to)) = compare_windows(today, 30);

        assert_eq!(cur_to - cur_from, prev_to - prev_from);
        assert_eq!(prev_to, cur_from);
    }

    #[test]
    fn both_zero_suppresses_the_indicator() {
        let current = Totals::from_pairs(&[("bookings", 0.0), ("shows", 10.0)]);
        let previous = Totals::from_pairs(&[("bookings", 0.0), ("shows", 8.0)]);

        let comparisons = compare_totals(&current, &previous);
        let bookings = comparisons.iter().find(|c| c.metric == "bookings").unwrap();
        let shows = comparisons.iter().find(|c| c.metric == "shows").unwrap();

        assert_eq!(bookings.percent_change, None);
        assert_eq!(shows.percent_change, Some(25.0));
    }
}
