//! US Federal Reserve bank holiday rules.
//!
//! Fixed-date holidays falling on a Sunday are observed the following Monday.
//! The Federal Reserve does not close on the Friday before a Saturday holiday;
//! [`SaturdayObservance::PrecedingFriday`] switches to the federal
//! (OPM) convention for callers that need it.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// First year the Federal Reserve closed for Juneteenth.
const JUNETEENTH_FIRST_YEAR: i32 = 2022;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FederalHoliday {
    NewYearsDay,
    MartinLutherKingJrDay,
    WashingtonsBirthday,
    MemorialDay,
    Juneteenth,
    IndependenceDay,
    LaborDay,
    ColumbusDay,
    VeteransDay,
    ThanksgivingDay,
    ChristmasDay,
}

impl FederalHoliday {
    pub const ALL: [FederalHoliday; 11] = [
        FederalHoliday::NewYearsDay,
        FederalHoliday::MartinLutherKingJrDay,
        FederalHoliday::WashingtonsBirthday,
        FederalHoliday::MemorialDay,
        FederalHoliday::Juneteenth,
        FederalHoliday::IndependenceDay,
        FederalHoliday::LaborDay,
        FederalHoliday::ColumbusDay,
        FederalHoliday::VeteransDay,
        FederalHoliday::ThanksgivingDay,
        FederalHoliday::ChristmasDay,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FederalHoliday::NewYearsDay => "New Year's Day",
            FederalHoliday::MartinLutherKingJrDay => "Birthday of Martin Luther King, Jr.",
            FederalHoliday::WashingtonsBirthday => "Washington's Birthday",
            FederalHoliday::MemorialDay => "Memorial Day",
            FederalHoliday::Juneteenth => "Juneteenth National Independence Day",
            FederalHoliday::IndependenceDay => "Independence Day",
            FederalHoliday::LaborDay => "Labor Day",
            FederalHoliday::ColumbusDay => "Columbus Day",
            FederalHoliday::VeteransDay => "Veterans Day",
            FederalHoliday::ThanksgivingDay => "Thanksgiving Day",
            FederalHoliday::ChristmasDay => "Christmas Day",
        }
    }

    /// The calendar date the holiday falls on in `year`, before any
    /// weekend observance shift.
    pub fn actual_date(&self, year: i32) -> Option<NaiveDate> {
        match self {
            FederalHoliday::NewYearsDay => NaiveDate::from_ymd_opt(year, 1, 1),
            FederalHoliday::MartinLutherKingJrDay => {
                NaiveDate::from_weekday_of_month_opt(year, 1, Weekday::Mon, 3)
            }
            FederalHoliday::WashingtonsBirthday => {
                NaiveDate::from_weekday_of_month_opt(year, 2, Weekday::Mon, 3)
            }
            FederalHoliday::MemorialDay => last_weekday_of_month(year, 5, Weekday::Mon),
            FederalHoliday::Juneteenth => {
                if year >= JUNETEENTH_FIRST_YEAR {
                    NaiveDate::from_ymd_opt(year, 6, 19)
                } else {
                    None
                }
            }
            FederalHoliday::IndependenceDay => NaiveDate::from_ymd_opt(year, 7, 4),
            FederalHoliday::LaborDay => NaiveDate::from_weekday_of_month_opt(year, 9, Weekday::Mon, 1),
            FederalHoliday::ColumbusDay => {
                NaiveDate::from_weekday_of_month_opt(year, 10, Weekday::Mon, 2)
            }
            FederalHoliday::VeteransDay => NaiveDate::from_ymd_opt(year, 11, 11),
            FederalHoliday::ThanksgivingDay => {
                NaiveDate::from_weekday_of_month_opt(year, 11, Weekday::Thu, 4)
            }
            FederalHoliday::ChristmasDay => NaiveDate::from_ymd_opt(year, 12, 25),
        }
    }
}

/// What happens to a holiday that lands on a Saturday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaturdayObservance {
    /// Banks stay open on the preceding Friday (Federal Reserve practice).
    #[default]
    NotObserved,
    /// The preceding Friday is a holiday.
    PrecedingFriday,
}

/// A bank holiday as observed in a given year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Holiday {
    pub name: String,
    /// Date the bank is closed.
    pub observed: NaiveDate,
    /// Date the holiday nominally falls on.
    pub actual: NaiveDate,
}

/// Apply weekend observance to a nominal holiday date.
pub fn observed_date(actual: NaiveDate, saturday: SaturdayObservance) -> Option<NaiveDate> {
    match actual.weekday() {
        Weekday::Sun => actual.checked_add_days(Days::new(1)),
        Weekday::Sat => match saturday {
            SaturdayObservance::NotObserved => None,
            SaturdayObservance::PrecedingFriday => actual.checked_sub_days(Days::new(1)),
        },
        _ => Some(actual),
    }
}

/// Every federal bank holiday whose observed date falls inside `year`,
/// sorted by observed date.
///
/// Neighbouring years are scanned too: with Friday observance a Saturday
/// New Year's Day closes banks on December 31 of the prior year.
pub fn federal_holidays(year: i32, saturday: SaturdayObservance) -> Vec<Holiday> {
    let mut holidays: Vec<Holiday> = [year - 1, year, year + 1]
        .into_iter()
        .flat_map(|source_year| {
            FederalHoliday::ALL.into_iter().filter_map(move |h| {
                let actual = h.actual_date(source_year)?;
                let observed = observed_date(actual, saturday)?;
                (observed.year() == year).then(|| Holiday {
                    name: h.name().to_string(),
                    observed,
                    actual,
                })
            })
        })
        .collect();

    holidays.sort_by_key(|h| h.observed);
    holidays
}

fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, 5)
        .or_else(|| NaiveDate::from_weekday_of_month_opt(year, month, weekday, 4))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_2023_schedule() {
        // Veterans Day 2023 fell on a Saturday and is skipped.
        let observed: Vec<NaiveDate> = federal_holidays(2023, SaturdayObservance::NotObserved)
            .into_iter()
            .map(|h| h.observed)
            .collect();
        assert_eq!(
            observed,
            vec![
                d(2023, 1, 2),
                d(2023, 1, 16),
                d(2023, 2, 20),
                d(2023, 5, 29),
                d(2023, 6, 19),
                d(2023, 7, 4),
                d(2023, 9, 4),
                d(2023, 10, 9),
                d(2023, 11, 23),
                d(2023, 12, 25),
            ]
        );
    }

    #[test]
    fn test_sunday_holiday_moves_to_monday() {
        // New Year's Day 2023 fell on a Sunday.
        let h = federal_holidays(2023, SaturdayObservance::NotObserved);
        let new_year = h.iter().find(|h| h.actual == d(2023, 1, 1)).unwrap();
        assert_eq!(new_year.observed, d(2023, 1, 2));
    }

    #[test]
    fn test_saturday_holiday_not_observed_by_default() {
        // Independence Day 2026 falls on a Saturday.
        let h = federal_holidays(2026, SaturdayObservance::NotObserved);
        assert!(h.iter().all(|h| h.actual != d(2026, 7, 4)));
    }

    #[test]
    fn test_saturday_holiday_friday_observance() {
        let h = federal_holidays(2026, SaturdayObservance::PrecedingFriday);
        assert!(h.iter().any(|h| h.observed == d(2026, 7, 3)));
    }

    #[test]
    fn test_saturday_new_year_lands_in_prior_year() {
        // January 1, 2022 was a Saturday.
        let h = federal_holidays(2021, SaturdayObservance::PrecedingFriday);
        let last = h.last().unwrap();
        assert_eq!(last.observed, d(2021, 12, 31));
        assert_eq!(last.actual, d(2022, 1, 1));
    }

    #[test]
    fn test_juneteenth_not_a_bank_holiday_before_2022() {
        let h = federal_holidays(2021, SaturdayObservance::NotObserved);
        assert!(h.iter().all(|h| h.name != FederalHoliday::Juneteenth.name()));
        // Christmas 2021 fell on a Saturday.
        assert_eq!(h.len(), 9);
    }

    #[test]
    fn test_memorial_day_is_last_monday() {
        assert_eq!(FederalHoliday::MemorialDay.actual_date(2024), Some(d(2024, 5, 27)));
        assert_eq!(FederalHoliday::MemorialDay.actual_date(2021), Some(d(2021, 5, 31)));
    }
}
