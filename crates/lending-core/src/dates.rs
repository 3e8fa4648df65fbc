//! Date arithmetic and the two string representations used across the
//! platform: `MM/DD/YYYY` for display and `YYYY-MM-DD` for storage.

use chrono::{Days, NaiveDate};

use crate::calendar::BusinessCalendar;
use crate::error::LendingError;
use crate::LendingResult;

pub const CLIENT_DATE_FORMAT: &str = "%m/%d/%Y";
pub const SERVER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Walk forward from `date`, counting only business days, until `days`
/// of them have been consumed. `days == 0` returns `date` untouched even
/// when it is not a business day.
pub fn add_business_days(calendar: &dyn BusinessCalendar, date: NaiveDate, days: u32) -> NaiveDate {
    let mut current = date;
    let mut remaining = days;
    while remaining > 0 {
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
        if calendar.is_business_day(current) {
            remaining -= 1;
        }
    }
    current
}

/// Plain calendar-day offset. Saturates at the last representable date.
pub fn add_calendar_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

pub fn format_client_date(date: NaiveDate) -> String {
    date.format(CLIENT_DATE_FORMAT).to_string()
}

pub fn format_server_date(date: NaiveDate) -> String {
    date.format(SERVER_DATE_FORMAT).to_string()
}

/// Parse a `MM/DD/YYYY` string. Only the canonical zero-padded form is
/// accepted.
pub fn parse_client_date(s: &str) -> LendingResult<NaiveDate> {
    parse_strict(s, CLIENT_DATE_FORMAT, "MM/DD/YYYY")
}

/// Parse a `YYYY-MM-DD` string. Only the canonical zero-padded form is
/// accepted.
pub fn parse_server_date(s: &str) -> LendingResult<NaiveDate> {
    parse_strict(s, SERVER_DATE_FORMAT, "YYYY-MM-DD")
}

pub fn client_to_server_date_string(s: &str) -> LendingResult<String> {
    parse_client_date(s).map(format_server_date)
}

pub fn server_to_client_date_string(s: &str) -> LendingResult<String> {
    parse_server_date(s).map(format_client_date)
}

fn parse_strict(s: &str, fmt: &str, expected: &str) -> LendingResult<NaiveDate> {
    let date = NaiveDate::parse_from_str(s, fmt)
        .map_err(|e| LendingError::DateError(format!("'{s}' is not a valid {expected} date: {e}")))?;

    // chrono accepts unpadded fields; reject anything that would not
    // format back to the same string.
    if date.format(fmt).to_string() != s {
        return Err(LendingError::DateError(format!(
            "'{s}' is not in canonical {expected} form"
        )));
    }
    Ok(date)
}
