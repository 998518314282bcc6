use chrono::{Datelike, NaiveDate};

use crate::locale::LocaleTable;

/// Number of entries in the year and month selectors.
pub const SELECTOR_LEN: usize = 5;
const SELECTOR_REACH: i32 = 2;

/// The year/month pair driving the year and month selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub year: i32,
    /// 0-based month
    pub month: u32,
}

impl Viewport {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month: month % 12,
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    /// Five consecutive years centered on the viewport year, ascending.
    pub fn visible_years(&self) -> [i32; SELECTOR_LEN] {
        std::array::from_fn(|i| self.year + i as i32 - SELECTOR_REACH)
    }

    /// Months at offsets -2..=+2 from the viewport month. Each entry carries
    /// the year it falls in, so stepping back two from January lands on
    /// November of the previous year.
    pub fn visible_months(&self) -> [MonthOption; SELECTOR_LEN] {
        std::array::from_fn(|i| {
            let shifted = self.month as i32 + i as i32 - SELECTOR_REACH;
            MonthOption {
                month: shifted.rem_euclid(12) as u32,
                year: self.year + shifted.div_euclid(12),
            }
        })
    }
}

/// One entry of the month selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthOption {
    pub month: u32,
    pub year: i32,
}

impl MonthOption {
    pub fn name<'a>(&self, table: &'a LocaleTable) -> &'a str {
        table.month_name(self.month)
    }

    pub fn short_name<'a>(&self, table: &'a LocaleTable) -> &'a str {
        table.month_short_name(self.month)
    }
}
