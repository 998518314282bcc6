use chrono::{Days, NaiveDate};

use crate::date_math::{same_date, weekday};

/// Number of dates in the day grid.
pub const WINDOW_LEN: usize = 21;
/// Dates per grid row.
pub const WEEK_LEN: usize = 7;

/// Three contiguous weeks of dates, ascending, with the week holding the
/// selected date in the middle row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VisibleWindow {
    dates: Vec<NaiveDate>,
}

impl VisibleWindow {
    /// Starts on the Sunday one week before the selected date's week.
    pub fn generate(selected: NaiveDate) -> Self {
        let back = weekday(selected) as u64 + WEEK_LEN as u64;
        let start = selected
            .checked_sub_days(Days::new(back))
            .unwrap_or(selected);
        Self {
            dates: start.iter_days().take(WINDOW_LEN).collect(),
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.dates.iter()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<NaiveDate> {
        self.dates.get(index).copied()
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.dates.iter().position(|d| same_date(d, &date))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.index_of(date).is_some()
    }

    /// The grid rows, one week each.
    pub fn weeks(&self) -> impl Iterator<Item = &[NaiveDate]> {
        self.dates.chunks(WEEK_LEN)
    }
}
