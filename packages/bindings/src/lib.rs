use std::sync::OnceLock;

use lending_core::calendar::{BankHolidayCalendar, BusinessCalendar};
use lending_core::contract::ContractTerms;
use lending_core::dates::{self, format_server_date, parse_server_date};
use napi::Result as NapiResult;
use napi_derive::napi;

/// Bank calendar shared by every call made from the JS host.
static CALENDAR: OnceLock<BankHolidayCalendar> = OnceLock::new();

fn calendar() -> &'static BankHolidayCalendar {
    CALENDAR.get_or_init(BankHolidayCalendar::new)
}

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Calendar
// ---------------------------------------------------------------------------

#[napi]
pub fn is_business_day(date: String) -> NapiResult<bool> {
    let date = parse_server_date(&date).map_err(to_napi_error)?;
    Ok(calendar().is_business_day(date))
}

#[napi]
pub fn add_business_days(date: String, days: u32) -> NapiResult<String> {
    let date = parse_server_date(&date).map_err(to_napi_error)?;
    Ok(format_server_date(dates::add_business_days(calendar(), date, days)))
}

#[napi]
pub fn bank_holidays(year: i32) -> NapiResult<String> {
    serde_json::to_string(&calendar().holidays_in_year(year)).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Settlement
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_settlement(input_json: String) -> NapiResult<String> {
    let input: lending_core::settlement::SettlementInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = lending_core::settlement::calculate_settlement(&input, calendar())
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn deposit_date_for_reverse_draft_ach(payment_date: String) -> NapiResult<String> {
    let date = parse_server_date(&payment_date).map_err(to_napi_error)?;
    lending_core::settlement::compute_deposit_date_for_reverse_draft_ach(calendar(), Some(date))
        .map(format_server_date)
        .ok_or_else(|| to_napi_error("deposit date could not be computed"))
}

#[napi]
pub fn settlement_timeline(contract_json: Option<String>) -> NapiResult<String> {
    let terms = contract_json
        .as_deref()
        .map(ContractTerms::from_json)
        .transpose()
        .map_err(to_napi_error)?;
    let timeline = lending_core::settlement::settlement_timeline_config(terms.as_ref());
    serde_json::to_string(&lending_core::settlement::effective_timeline(timeline.as_ref()))
        .map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Purchase orders
// ---------------------------------------------------------------------------

#[napi]
pub fn purchase_order_due_date(input_json: String) -> NapiResult<String> {
    let input: lending_core::purchase_orders::PurchaseOrderInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        lending_core::purchase_orders::analyze_purchase_order(&input.purchase_order, &input.cutoff)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Borrowing base
// ---------------------------------------------------------------------------

#[napi]
pub fn borrowing_base(input_json: String) -> NapiResult<String> {
    let input: lending_core::borrowing_base::BorrowingBaseInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        lending_core::borrowing_base::analyze_borrowing_base(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
