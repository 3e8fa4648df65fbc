use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::holidays::{federal_holidays, Holiday, SaturdayObservance};
use super::BusinessCalendar;

/// Tunables for [`BankHolidayCalendar`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub saturday_observance: SaturdayObservance,
    /// Extra closure dates (e.g. national days of mourning).
    pub additional_holidays: Vec<NaiveDate>,
}

/// US bank holiday calendar with lazily computed, per-year holiday sets.
///
/// The first lookup in a year computes that year's holidays; later lookups
/// reuse the memoised set for the lifetime of the calendar.
#[derive(Debug, Default)]
pub struct BankHolidayCalendar {
    config: CalendarConfig,
    by_year: RwLock<HashMap<i32, Arc<BTreeSet<NaiveDate>>>>,
}

impl BankHolidayCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CalendarConfig) -> Self {
        Self {
            config,
            by_year: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// Observed holiday dates for `year`.
    pub fn holiday_dates(&self, year: i32) -> Arc<BTreeSet<NaiveDate>> {
        if let Some(dates) = self
            .by_year
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&year)
        {
            return Arc::clone(dates);
        }

        let computed: Arc<BTreeSet<NaiveDate>> = Arc::new(
            self.holidays_in_year(year)
                .into_iter()
                .map(|h| h.observed)
                .collect(),
        );
        debug!(year, count = computed.len(), "populated bank holiday year");

        // Two threads may race to fill the same year; both compute the same
        // set, so whichever lands first wins.
        let mut by_year = self.by_year.write().unwrap_or_else(|e| e.into_inner());
        Arc::clone(by_year.entry(year).or_insert(computed))
    }

    /// Named holidays observed in `year`, including configured extras.
    pub fn holidays_in_year(&self, year: i32) -> Vec<Holiday> {
        let mut holidays = federal_holidays(year, self.config.saturday_observance);
        for extra in &self.config.additional_holidays {
            if extra.year() == year && !holidays.iter().any(|h| h.observed == *extra) {
                holidays.push(Holiday {
                    name: "Additional bank holiday".to_string(),
                    observed: *extra,
                    actual: *extra,
                });
            }
        }
        holidays.sort_by_key(|h| h.observed);
        holidays
    }

    /// Years whose holiday sets have been computed so far.
    pub fn cached_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self
            .by_year
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .copied()
            .collect();
        years.sort_unstable();
        years
    }
}

impl BusinessCalendar for BankHolidayCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holiday_dates(date.year()).contains(&date)
    }
}
