use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Spacing between consecutive installments.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
}

impl Period {
    /// Date of the `steps`-th occurrence after `from` (`steps == 0` returns
    /// `from`). Month stepping clamps to the target month's last day.
    pub fn offset(&self, from: NaiveDate, steps: u32) -> NaiveDate {
        match self {
            Period::Week => from + Duration::weeks(steps as i64),
            Period::Month => shift_month(from, steps as i32),
        }
    }
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap_or_default());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_offset_advances_seven_days_per_step() {
        assert_eq!(Period::Week.offset(date(2025, 8, 1), 2), date(2025, 8, 15));
    }

    #[test]
    fn month_offset_clamps_to_short_months() {
        assert_eq!(Period::Month.offset(date(2025, 1, 31), 1), date(2025, 2, 28));
        assert_eq!(Period::Month.offset(date(2024, 1, 31), 1), date(2024, 2, 29));
    }

    #[test]
    fn month_offset_crosses_year_boundary() {
        assert_eq!(Period::Month.offset(date(2025, 11, 15), 3), date(2026, 2, 15));
    }

    #[test]
    fn zero_steps_is_identity() {
        let base = date(2025, 6, 10);
        assert_eq!(Period::Week.offset(base, 0), base);
        assert_eq!(Period::Month.offset(base, 0), base);
    }
}
