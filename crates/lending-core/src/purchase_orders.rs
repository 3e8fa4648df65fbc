//! Purchase order due dates.
//!
//! The due date is never stored; it is recomputed from the order date and
//! net terms every time. Net terms are calendar days.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::dates::{add_calendar_days, format_client_date};
use crate::types::{with_metadata, ComputationOutput};
use crate::LendingResult;

/// Default look-back window for [`CutoffPolicy::TrailingDays`].
pub const DEFAULT_CUTOFF_DAYS: u32 = 60;

fn default_cutoff_days() -> u32 {
    DEFAULT_CUTOFF_DAYS
}

// ---------------------------------------------------------------------------
// Cutoff policy
// ---------------------------------------------------------------------------

/// Earliest due date for which financing can still be requested.
pub trait FinancingCutoffPolicy {
    fn cutoff_date(&self) -> NaiveDate;

    /// Reference date the policy was evaluated at, if it has one.
    fn as_of(&self) -> Option<NaiveDate> {
        None
    }
}

/// Built-in cutoff policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CutoffPolicy {
    /// A fixed cutoff date.
    Fixed { cutoff_date: NaiveDate },
    /// `days` calendar days before `as_of`.
    TrailingDays {
        as_of: NaiveDate,
        #[serde(default = "default_cutoff_days")]
        days: u32,
    },
}

impl CutoffPolicy {
    pub fn trailing(as_of: NaiveDate) -> Self {
        CutoffPolicy::TrailingDays {
            as_of,
            days: DEFAULT_CUTOFF_DAYS,
        }
    }
}

impl FinancingCutoffPolicy for CutoffPolicy {
    fn cutoff_date(&self) -> NaiveDate {
        match *self {
            CutoffPolicy::Fixed { cutoff_date } => cutoff_date,
            CutoffPolicy::TrailingDays { as_of, days } => as_of
                .checked_sub_days(Days::new(u64::from(days)))
                .unwrap_or(NaiveDate::MIN),
        }
    }

    fn as_of(&self) -> Option<NaiveDate> {
        match *self {
            CutoffPolicy::Fixed { .. } => None,
            CutoffPolicy::TrailingDays { as_of, .. } => Some(as_of),
        }
    }
}

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub order_date: Option<NaiveDate>,
    /// Net payment terms in calendar days.
    pub net_terms: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueDateValidity {
    pub is_due_date_valid: bool,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrderInput {
    #[serde(flatten)]
    pub purchase_order: PurchaseOrder,
    pub cutoff: CutoffPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrderOutput {
    pub due_date: Option<NaiveDate>,
    pub due_date_display: Option<String>,
    pub is_due_date_valid: bool,
    pub cutoff_date: NaiveDate,
    /// Calendar days from the policy's as-of date to the due date.
    pub days_until_due: Option<i64>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// `order_date + net_terms` calendar days; `None` if either is missing.
/// Zero net terms is a real value and yields the order date.
pub fn compute_due_date(order_date: Option<NaiveDate>, net_terms: Option<u32>) -> Option<NaiveDate> {
    Some(add_calendar_days(order_date?, net_terms?))
}

/// A due date is valid when it exists and is not earlier than the policy's
/// cutoff. Dates compare the same way as their `YYYY-MM-DD` strings.
pub fn is_due_date_valid(
    order_date: Option<NaiveDate>,
    net_terms: Option<u32>,
    policy: &dyn FinancingCutoffPolicy,
) -> DueDateValidity {
    let due_date = compute_due_date(order_date, net_terms);
    DueDateValidity {
        is_due_date_valid: due_date.is_some_and(|d| d >= policy.cutoff_date()),
        due_date,
    }
}

/// Due date, validity against the cutoff and days remaining.
pub fn analyze_purchase_order(
    input: &PurchaseOrder,
    policy: &dyn FinancingCutoffPolicy,
) -> LendingResult<ComputationOutput<PurchaseOrderOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.order_date.is_none() {
        warnings.push("Order date missing; due date cannot be computed.".into());
    }
    if input.net_terms.is_none() {
        warnings.push("Net terms missing; due date cannot be computed.".into());
    }

    let validity = is_due_date_valid(input.order_date, input.net_terms, policy);
    let cutoff_date = policy.cutoff_date();
    if let Some(due) = validity.due_date {
        if !validity.is_due_date_valid {
            warnings.push(format!(
                "Due date {due} is before the financing cutoff {cutoff_date}."
            ));
        }
    }

    let days_until_due = validity
        .due_date
        .zip(policy.as_of())
        .map(|(due, as_of)| (due - as_of).num_days());

    let output = PurchaseOrderOutput {
        due_date: validity.due_date,
        due_date_display: validity.due_date.map(format_client_date),
        is_due_date_valid: validity.is_due_date_valid,
        cutoff_date,
        days_until_due,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "net_terms_basis": "calendar days",
        "cutoff_date": cutoff_date,
    });

    Ok(with_metadata(
        "Purchase Order Due Date",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}
