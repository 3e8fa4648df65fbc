//! Business-day calendars.
//!
//! Every date calculation in this crate takes a calendar explicitly, so
//! callers (and tests) decide which holidays apply.

pub mod bank;
pub mod holidays;

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};

pub use bank::{BankHolidayCalendar, CalendarConfig};
pub use holidays::{FederalHoliday, Holiday, SaturdayObservance};

/// Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// A source of bank holidays.
pub trait BusinessCalendar: Send + Sync {
    fn is_holiday(&self, date: NaiveDate) -> bool;

    /// Not a weekend and not a holiday.
    fn is_business_day(&self, date: NaiveDate) -> bool {
        !is_weekend(date) && !self.is_holiday(date)
    }

    /// `date` itself when it is a business day, otherwise the first
    /// business day after it.
    fn next_business_day(&self, date: NaiveDate) -> NaiveDate {
        let mut current = date;
        while !self.is_business_day(current) {
            match current.succ_opt() {
                Some(next) => current = next,
                None => break,
            }
        }
        current
    }

    /// `date` itself when it is a business day, otherwise the last
    /// business day before it.
    fn previous_business_day(&self, date: NaiveDate) -> NaiveDate {
        let mut current = date;
        while !self.is_business_day(current) {
            match current.pred_opt() {
                Some(prev) => current = prev,
                None => break,
            }
        }
        current
    }

    /// Business days in the half-open range `(start, end]`; negative when
    /// `end` is before `start`.
    fn business_days_between(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        let (from, to, sign) = if end >= start {
            (start, end, 1)
        } else {
            (end, start, -1)
        };
        let count = from
            .iter_days()
            .skip(1)
            .take_while(|d| *d <= to)
            .filter(|d| self.is_business_day(*d))
            .count() as i64;
        sign * count
    }
}

/// Calendar with an explicit, fixed holiday list.
#[derive(Debug, Clone, Default)]
pub struct FixedCalendar {
    holidays: HashSet<NaiveDate>,
}

impl FixedCalendar {
    pub fn new(holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
        }
    }
}

impl FromIterator<NaiveDate> for FixedCalendar {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl BusinessCalendar for FixedCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }
}

/// Weekends only, no holidays.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl BusinessCalendar for WeekendCalendar {
    fn is_holiday(&self, _date: NaiveDate) -> bool {
        false
    }
}
