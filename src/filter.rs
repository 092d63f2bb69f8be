//! Inclusive date-range filtering over a sorted prediction series.
//!
//! Bounds outside the series are clamped silently, so callers that bypass
//! the UI controls (CLI flags, tests) get the same result the controls
//! would have produced.

use chrono::NaiveDate;

use crate::domain::{DateRange, PredictionSeries};

/// Clamp a requested range to the series bounds.
///
/// - `start` is raised to the first date
/// - `end` is lowered to the last date, then raised to `start`
///
/// Returns `None` for an empty series.
pub fn clamp_range(series: &PredictionSeries, start: NaiveDate, end: NaiveDate) -> Option<DateRange> {
    let bounds = series.bounds()?;
    Some(clamp_to_bounds(bounds, start, end))
}

/// Same clamping rules against explicit bounds.
///
/// The start is not capped at `bounds.end`; a start past the last date
/// selects nothing.
pub fn clamp_to_bounds(bounds: DateRange, start: NaiveDate, end: NaiveDate) -> DateRange {
    let start = start.max(bounds.start);
    let end = end.min(bounds.end).max(start);
    DateRange { start, end }
}

/// Clamp the way the sidebar date inputs do: start within `[min, max]`,
/// end within `[start, max]`. Unlike [`clamp_to_bounds`], the start is also
/// capped, since a control can never sit outside its bounds.
pub fn control_range(bounds: DateRange, start: NaiveDate, end: NaiveDate) -> DateRange {
    let start = start.clamp(bounds.start, bounds.end);
    let end = end.clamp(start, bounds.end);
    DateRange { start, end }
}

/// Return the contiguous rows with `start <= date <= end`.
///
/// Never fails; an out-of-range request yields an empty series.
pub fn filter_series(series: &PredictionSeries, start: NaiveDate, end: NaiveDate) -> PredictionSeries {
    let Some(bounds) = series.bounds() else {
        return PredictionSeries::default();
    };

    // An inverted request collapses to its start day; a request that misses
    // the series entirely selects nothing.
    let end = end.max(start);
    if start > bounds.end || end < bounds.start {
        return PredictionSeries::default();
    }
    let range = clamp_to_bounds(bounds, start, end);

    let rows = series.rows();
    let lo = rows.partition_point(|r| r.date < range.start);
    let hi = rows.partition_point(|r| r.date <= range.end);
    if lo >= hi {
        return PredictionSeries::default();
    }
    PredictionSeries::from_rows(rows[lo..hi].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PredictionRow;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn series(days: &[u32]) -> PredictionSeries {
        PredictionSeries::from_rows(
            days.iter()
                .map(|&day| PredictionRow {
                    date: d(2024, 1, day),
                    actual: day as f64 * 100.0,
                    predicted: day as f64 * 101.0,
                })
                .collect(),
        )
    }

    fn dates(s: &PredictionSeries) -> Vec<u32> {
        use chrono::Datelike;
        s.rows().iter().map(|r| r.date.day()).collect()
    }

    #[test]
    fn full_range_returns_full_series() {
        let s = series(&[1, 2, 3, 5, 8]);
        let out = filter_series(&s, d(2024, 1, 1), d(2024, 1, 8));
        assert_eq!(out, s);
    }

    #[test]
    fn inner_range_is_contiguous_and_inclusive() {
        let s = series(&[1, 2, 3, 5, 8, 13]);
        let out = filter_series(&s, d(2024, 1, 2), d(2024, 1, 8));
        assert_eq!(dates(&out), vec![2, 3, 5, 8]);

        // Bounds that fall between rows.
        let out = filter_series(&s, d(2024, 1, 4), d(2024, 1, 12));
        assert_eq!(dates(&out), vec![5, 8]);
    }

    #[test]
    fn out_of_bounds_requests_clamp_to_series() {
        let s = series(&[3, 4, 5]);
        let wide = filter_series(&s, d(2023, 12, 1), d(2024, 3, 1));
        assert_eq!(wide, s);

        let clamped = clamp_range(&s, d(2023, 12, 1), d(2024, 3, 1)).unwrap();
        assert_eq!(clamped, DateRange::new(d(2024, 1, 3), d(2024, 1, 5)).unwrap());
    }

    #[test]
    fn single_day_range_yields_one_row() {
        let s = series(&[3, 4, 5]);
        let out = filter_series(&s, d(2024, 1, 3), d(2024, 1, 3));
        assert_eq!(dates(&out), vec![3]);
    }

    #[test]
    fn single_missing_day_yields_nothing() {
        let s = series(&[3, 5]);
        let out = filter_series(&s, d(2024, 1, 4), d(2024, 1, 4));
        assert!(out.is_empty());
    }

    #[test]
    fn start_after_series_end_is_empty() {
        let s = series(&[3, 4, 5]);
        assert!(filter_series(&s, d(2024, 2, 1), d(2024, 2, 10)).is_empty());
        assert!(filter_series(&s, d(2023, 1, 1), d(2023, 6, 1)).is_empty());
    }

    #[test]
    fn inverted_request_collapses_to_start_day() {
        let s = series(&[3, 4, 5]);
        let out = filter_series(&s, d(2024, 1, 5), d(2024, 1, 3));
        assert_eq!(dates(&out), vec![5]);
    }

    #[test]
    fn empty_series_stays_empty() {
        let s = PredictionSeries::default();
        assert!(clamp_range(&s, d(2024, 1, 1), d(2024, 1, 2)).is_none());
        assert!(filter_series(&s, d(2024, 1, 1), d(2024, 1, 2)).is_empty());
    }

    #[test]
    fn control_range_stays_inside_bounds() {
        let bounds = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        let r = control_range(bounds, d(2024, 3, 1), d(2023, 1, 1));
        assert_eq!(r, DateRange::new(d(2024, 1, 31), d(2024, 1, 31)).unwrap());

        let r = control_range(bounds, d(2023, 12, 1), d(2024, 2, 1));
        assert_eq!(r, bounds);
    }

    #[test]
    fn end_is_raised_to_start() {
        let bounds = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        let r = clamp_to_bounds(bounds, d(2024, 1, 10), d(2024, 1, 5));
        assert_eq!(r, DateRange::new(d(2024, 1, 10), d(2024, 1, 10)).unwrap());
    }
}
