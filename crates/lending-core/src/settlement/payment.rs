use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::warn;

use super::timeline::{settlement_days, settlement_timeline_config, TimelineSource};
use crate::calendar::BusinessCalendar;
use crate::contract::{Contract, ContractTerms, SettlementTimeline};
use crate::dates::{add_business_days, format_client_date};
use crate::types::{with_metadata, ComputationOutput, PaymentMethod};
use crate::LendingResult;

/// Reverse-draft ACH funds are deposited one business day after the
/// payment date, regardless of contract.
const REVERSE_DRAFT_ACH_DEPOSIT_DAYS: u32 = 1;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementInput {
    pub payment_method: Option<PaymentMethod>,
    pub payment_date: Option<NaiveDate>,
    /// Raw contract; defaults apply when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract: Option<Contract>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementOutput {
    pub settlement_date: Option<NaiveDate>,
    /// Settlement date as shown to users (MM/DD/YYYY).
    pub settlement_date_display: Option<String>,
    /// Only set for reverse-draft ACH payments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_date: Option<NaiveDate>,
    pub business_days: Option<u32>,
    pub timeline_source: Option<TimelineSource>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Expected settlement date of a payment.
///
/// `None` when either the method or the payment date is missing. Without a
/// timeline the hardcoded default mapping is used; methods missing from the
/// effective mapping settle after the fallback of 2 business days.
pub fn compute_settlement_date(
    calendar: &dyn BusinessCalendar,
    method: Option<PaymentMethod>,
    payment_date: Option<NaiveDate>,
    timeline: Option<&SettlementTimeline>,
) -> Option<NaiveDate> {
    let (method, payment_date) = (method?, payment_date?);
    let (days, source) = settlement_days(method, timeline);
    if source == TimelineSource::Fallback && timeline.is_some() {
        warn!(%method, days, "payment method missing from contract settlement timeline");
    }
    Some(add_business_days(calendar, payment_date, days))
}

/// Deposit date of a reverse-draft ACH: always one business day after the
/// payment date.
pub fn compute_deposit_date_for_reverse_draft_ach(
    calendar: &dyn BusinessCalendar,
    payment_date: Option<NaiveDate>,
) -> Option<NaiveDate> {
    payment_date.map(|d| add_business_days(calendar, d, REVERSE_DRAFT_ACH_DEPOSIT_DAYS))
}

/// Settlement date with the day count, its source and any warnings.
pub fn calculate_settlement(
    input: &SettlementInput,
    calendar: &dyn BusinessCalendar,
) -> LendingResult<ComputationOutput<SettlementOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let terms = input
        .contract
        .as_ref()
        .map(ContractTerms::from_contract)
        .transpose()?;
    let timeline = settlement_timeline_config(terms.as_ref());

    if input.payment_method.is_none() {
        warnings.push("Payment method missing; settlement date cannot be computed.".into());
    }
    if input.payment_date.is_none() {
        warnings.push("Payment date missing; settlement date cannot be computed.".into());
    }
    if let Some(date) = input.payment_date {
        if !calendar.is_business_day(date) {
            warnings.push(format!("Payment date {date} is not a business day."));
        }
    }

    let counted = input
        .payment_method
        .map(|m| settlement_days(m, timeline.as_ref()));
    if let Some((days, TimelineSource::Fallback)) = counted {
        warnings.push(format!(
            "No settlement timeline entry for this payment method; using {days} business days."
        ));
    }

    let settlement_date = compute_settlement_date(
        calendar,
        input.payment_method,
        input.payment_date,
        timeline.as_ref(),
    );
    let deposit_date = match input.payment_method {
        Some(PaymentMethod::ReverseDraftAch) => {
            compute_deposit_date_for_reverse_draft_ach(calendar, input.payment_date)
        }
        _ => None,
    };

    let output = SettlementOutput {
        settlement_date,
        settlement_date_display: settlement_date.map(format_client_date),
        deposit_date,
        business_days: counted.map(|(days, _)| days),
        timeline_source: counted.map(|(_, source)| source),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "business_days": "weekends and bank holidays excluded",
        "contract_provided": input.contract.is_some(),
    });

    Ok(with_metadata(
        "Payment Settlement Date",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}
