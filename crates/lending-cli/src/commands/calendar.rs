use chrono::{Datelike, NaiveDate};
use clap::{Args, ValueEnum};
use serde_json::{json, Value};

use lending_core::calendar::{BankHolidayCalendar, BusinessCalendar};
use lending_core::dates::{
    add_business_days, add_calendar_days, client_to_server_date_string, format_client_date,
    server_to_client_date_string,
};

use super::parse_date_arg;

/// Arguments for a business-day check
#[derive(Args)]
pub struct IsBusinessDayArgs {
    /// Date to check (YYYY-MM-DD or MM/DD/YYYY)
    #[arg(long, value_parser = parse_date_arg)]
    pub date: NaiveDate,
}

/// Arguments for business-day addition
#[derive(Args)]
pub struct AddBusinessDaysArgs {
    /// Start date
    #[arg(long, value_parser = parse_date_arg)]
    pub date: NaiveDate,

    /// Number of business days to add
    #[arg(long)]
    pub days: u32,
}

/// Arguments for calendar-day addition
#[derive(Args)]
pub struct AddCalendarDaysArgs {
    /// Start date
    #[arg(long, value_parser = parse_date_arg)]
    pub date: NaiveDate,

    /// Number of calendar days to add
    #[arg(long)]
    pub days: u32,
}

/// Arguments for the holiday listing
#[derive(Args)]
pub struct HolidaysArgs {
    /// Calendar year
    #[arg(long)]
    pub year: i32,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateFormat {
    /// YYYY-MM-DD
    Server,
    /// MM/DD/YYYY
    Client,
}

/// Arguments for date string conversion
#[derive(Args)]
pub struct ConvertDateArgs {
    /// Date string to convert
    pub value: String,

    /// Format of the input string
    #[arg(long, value_enum, default_value = "client")]
    pub from: DateFormat,
}

pub fn run_is_business_day(
    args: IsBusinessDayArgs,
    calendar: &BankHolidayCalendar,
) -> Result<Value, Box<dyn std::error::Error>> {
    let holiday = calendar
        .holidays_in_year(args.date.year())
        .into_iter()
        .find(|h| h.observed == args.date)
        .map(|h| h.name);
    Ok(json!({
        "date": args.date,
        "weekday": args.date.weekday().to_string(),
        "is_business_day": calendar.is_business_day(args.date),
        "holiday": holiday,
        "next_business_day": calendar.next_business_day(args.date),
    }))
}

pub fn run_add_business_days(
    args: AddBusinessDaysArgs,
    calendar: &BankHolidayCalendar,
) -> Result<Value, Box<dyn std::error::Error>> {
    let date = add_business_days(calendar, args.date, args.days);
    Ok(json!({
        "start": args.date,
        "business_days": args.days,
        "date": date,
        "date_display": format_client_date(date),
    }))
}

pub fn run_add_calendar_days(args: AddCalendarDaysArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let date = add_calendar_days(args.date, args.days);
    Ok(json!({
        "start": args.date,
        "calendar_days": args.days,
        "date": date,
        "date_display": format_client_date(date),
    }))
}

pub fn run_holidays(
    args: HolidaysArgs,
    calendar: &BankHolidayCalendar,
) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(calendar.holidays_in_year(args.year))?)
}

pub fn run_convert_date(args: ConvertDateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let converted = match args.from {
        DateFormat::Client => client_to_server_date_string(&args.value)?,
        DateFormat::Server => server_to_client_date_string(&args.value)?,
    };
    Ok(json!({ "input": args.value, "converted": converted }))
}
