use chrono::{Datelike, NaiveDate, Weekday};
use lending_core::calendar::{
    BankHolidayCalendar, BusinessCalendar, CalendarConfig, FixedCalendar, SaturdayObservance,
};
use lending_core::dates::{
    add_business_days, format_client_date, format_server_date, parse_client_date, parse_server_date,
};
use pretty_assertions::assert_eq;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ===========================================================================
// Bank holiday calendar
// ===========================================================================

#[test]
fn test_2024_bank_holidays() {
    let cal = BankHolidayCalendar::new();
    let dates: Vec<NaiveDate> = cal.holidays_in_year(2024).iter().map(|h| h.observed).collect();
    assert_eq!(
        dates,
        vec![
            d(2024, 1, 1),
            d(2024, 1, 15),
            d(2024, 2, 19),
            d(2024, 5, 27),
            d(2024, 6, 19),
            d(2024, 7, 4),
            d(2024, 9, 2),
            d(2024, 10, 14),
            d(2024, 11, 11),
            d(2024, 11, 28),
            d(2024, 12, 25),
        ]
    );
}

#[test]
fn test_holidays_never_fall_on_weekends() {
    let cal = BankHolidayCalendar::with_config(CalendarConfig {
        saturday_observance: SaturdayObservance::PrecedingFriday,
        ..CalendarConfig::default()
    });
    for year in 2015..=2035 {
        for h in cal.holidays_in_year(year) {
            assert!(
                !matches!(h.observed.weekday(), Weekday::Sat | Weekday::Sun),
                "{} observed on {}",
                h.name,
                h.observed
            );
            assert_eq!(h.observed.year(), year);
        }
    }
}

#[test]
fn test_friday_observance_changes_business_days() {
    // Christmas 2021 fell on a Saturday.
    let fed = BankHolidayCalendar::new();
    let opm = BankHolidayCalendar::with_config(CalendarConfig {
        saturday_observance: SaturdayObservance::PrecedingFriday,
        ..CalendarConfig::default()
    });
    assert!(fed.is_business_day(d(2021, 12, 24)));
    assert!(!opm.is_business_day(d(2021, 12, 24)));
}

#[test]
fn test_calendar_config_from_json() {
    let config: CalendarConfig = serde_json::from_str(
        r#"{ "saturday_observance": "preceding_friday", "additional_holidays": ["2025-01-09"] }"#,
    )
    .unwrap();
    assert_eq!(config.saturday_observance, SaturdayObservance::PrecedingFriday);
    assert_eq!(config.additional_holidays, vec![d(2025, 1, 9)]);

    let empty: CalendarConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, CalendarConfig::default());
}

// ===========================================================================
// Business-day arithmetic
// ===========================================================================

#[test]
fn test_adding_zero_days_is_identity() {
    let cal = BankHolidayCalendar::new();
    for date in [d(2023, 1, 1), d(2023, 1, 2), d(2023, 1, 3), d(2023, 7, 4)] {
        assert_eq!(add_business_days(&cal, date, 0), date);
    }
}

#[test]
fn test_add_business_days_over_year_end() {
    let cal = BankHolidayCalendar::new();
    // Fri Dec 22, 2023 + 3: Tue 26, Wed 27, Thu 28 (Mon 25 is Christmas)
    assert_eq!(add_business_days(&cal, d(2023, 12, 22), 3), d(2023, 12, 28));
    // Fri Dec 29, 2023 + 1: Tue Jan 2 (Mon Jan 1 is New Year's Day)
    assert_eq!(add_business_days(&cal, d(2023, 12, 29), 1), d(2024, 1, 2));
}

#[test]
fn test_fixed_calendar_substitutes_for_bank_calendar() {
    let cal = FixedCalendar::new([d(2023, 1, 3), d(2023, 1, 4)]);
    assert_eq!(add_business_days(&cal, d(2023, 1, 2), 1), d(2023, 1, 5));
}

#[test]
fn test_business_days_between_matches_addition() {
    let cal = BankHolidayCalendar::new();
    let start = d(2024, 5, 20);
    for n in 0..15 {
        let end = add_business_days(&cal, start, n);
        assert_eq!(cal.business_days_between(start, end), i64::from(n));
    }
}

// ===========================================================================
// Date strings
// ===========================================================================

#[test]
fn test_every_day_of_a_leap_year_round_trips() {
    let mut date = d(2024, 1, 1);
    while date.year() == 2024 {
        assert_eq!(parse_server_date(&format_server_date(date)).unwrap(), date);
        assert_eq!(parse_client_date(&format_client_date(date)).unwrap(), date);
        date = date.succ_opt().unwrap();
    }
}
