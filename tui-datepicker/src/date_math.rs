//! Calendar arithmetic shared by the viewport, the window generator and the
//! state machine.
//!
//! Months are 0-based (0 = January) and weekdays count from Sunday (0) to
//! Saturday (6). Every function is total: month indices above 11 wrap modulo
//! 12 and day numbers are clamped instead of rejected.

use chrono::{Datelike, NaiveDate};

/// Earliest year the picker will select.
pub const MIN_YEAR: i32 = 1900;
/// Latest year the picker will select.
pub const MAX_YEAR: i32 = 3000;

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let month = month % 12;
    // First day of the next month, minus one day
    let next_month_date = if month == 11 {
        year.checked_add(1)
            .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
    } else {
        NaiveDate::from_ymd_opt(year, month + 2, 1)
    };

    next_month_date
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or_else(|| match month + 1 {
            // Outside chrono's range
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            _ => {
                if is_leap_year(year) {
                    29
                } else {
                    28
                }
            }
        })
}

/// Weekday (0 = Sunday) of the first day of `month`.
pub fn first_weekday_of_month(year: i32, month: u32) -> u32 {
    let month = month % 12;
    NaiveDate::from_ymd_opt(year, month + 1, 1)
        .map(weekday)
        .unwrap_or_else(|| sakamoto_weekday(year, month + 1, 1))
}

/// Weekday of `date`, 0 = Sunday.
pub fn weekday(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Year, month and day equality. Time-of-day is ignored, so this works
/// across `NaiveDate`, `NaiveDateTime` and `DateTime` alike.
pub fn same_date<A: Datelike, B: Datelike>(a: &A, b: &B) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// `day` if it exists in the month, otherwise the month's last day.
/// Day 0 is lifted to 1.
pub fn clamp_day(year: i32, month: u32, day: u32) -> u32 {
    day.clamp(1, days_in_month(year, month))
}

/// Builds the date `year`/`month`/`day` with the day clamped into the month.
/// Returns `None` when the year is outside the supported range.
pub fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }
    let month = month % 12;
    NaiveDate::from_ymd_opt(year, month + 1, clamp_day(year, month, day))
}

pub fn in_supported_range(date: NaiveDate) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&date.year())
}

// Tomohiko Sakamoto's day-of-week, month 1-based.
fn sakamoto_weekday(year: i32, month: u32, day: u32) -> u32 {
    const OFFSETS: [i64; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let mut y = year as i64;
    if month < 3 {
        y -= 1;
    }
    let total = y + y.div_euclid(4) - y.div_euclid(100)
        + y.div_euclid(400)
        + OFFSETS[(month - 1) as usize]
        + day as i64;
    total.rem_euclid(7) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 0), 31);
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2025, 1), 28);
        assert_eq!(days_in_month(1900, 1), 28);
        assert_eq!(days_in_month(2000, 1), 29);
        assert_eq!(days_in_month(2024, 3), 30);
        assert_eq!(days_in_month(2024, 11), 31);
    }

    #[test]
    fn test_days_in_month_outside_chrono_range() {
        assert_eq!(days_in_month(i32::MAX, 1), 28);
        assert_eq!(days_in_month(i32::MAX, 11), 31);
    }

    #[test]
    fn test_first_weekday_of_month() {
        // 2024-03-01 was a Friday
        assert_eq!(first_weekday_of_month(2024, 2), 5);
        // 2023-10-01 was a Sunday
        assert_eq!(first_weekday_of_month(2023, 9), 0);
    }

    #[test]
    fn test_sakamoto_matches_chrono() {
        for year in [1900, 1999, 2000, 2024, 2100] {
            for month in 1..=12 {
                let expected = weekday(ymd(year, month, 1));
                assert_eq!(sakamoto_weekday(year, month, 1), expected, "{}-{}", year, month);
            }
        }
    }

    #[test]
    fn test_same_date_ignores_time() {
        let morning = ymd(2024, 3, 15).and_hms_opt(8, 0, 0).unwrap();
        let evening = ymd(2024, 3, 15).and_hms_opt(23, 59, 59).unwrap();
        assert!(same_date(&morning, &evening));
        assert!(same_date(&ymd(2024, 3, 15), &evening));
        assert!(!same_date(&ymd(2024, 3, 16), &evening));
    }

    #[test]
    fn test_clamp_day() {
        assert_eq!(clamp_day(2025, 1, 29), 28);
        assert_eq!(clamp_day(2024, 1, 29), 29);
        assert_eq!(clamp_day(2024, 3, 31), 30);
        assert_eq!(clamp_day(2024, 0, 15), 15);
        assert_eq!(clamp_day(2024, 0, 0), 1);
    }

    #[test]
    fn test_clamped_date() {
        assert_eq!(clamped_date(2025, 1, 29), Some(ymd(2025, 2, 28)));
        assert_eq!(clamped_date(MAX_YEAR + 1, 0, 1), None);
        assert_eq!(clamped_date(MIN_YEAR - 1, 0, 1), None);
    }
}
