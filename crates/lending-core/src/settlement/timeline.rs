use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::contract::{ContractTerms, SettlementTimeline};
use crate::types::PaymentMethod;

/// Business days used when neither the contract nor the default mapping
/// lists a payment method.
pub const FALLBACK_SETTLEMENT_DAYS: u32 = 2;

impl SettlementTimeline {
    /// Mapping used when no contract is available.
    pub fn hardcoded_default() -> Self {
        [
            (PaymentMethod::Ach, 2),
            (PaymentMethod::ReverseDraftAch, 2),
            (PaymentMethod::Wire, 2),
            (PaymentMethod::Check, 2),
            (PaymentMethod::Cash, 2),
        ]
        .into_iter()
        .collect()
    }
}

/// The contract's settlement timeline.
///
/// `None` when there is no contract, telling the caller to use
/// [`SettlementTimeline::hardcoded_default`]. A contract without the
/// timeline field yields an empty mapping.
pub fn settlement_timeline_config(contract: Option<&ContractTerms>) -> Option<SettlementTimeline> {
    match contract {
        Some(terms) => Some(terms.settlement_timeline.clone()),
        None => {
            debug!("no contract; settlement timeline falls back to defaults");
            None
        }
    }
}

/// Where a day count came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineSource {
    Contract,
    Default,
    Fallback,
}

/// Business days to settlement for `method`, and where the number came from.
pub fn settlement_days(method: PaymentMethod, timeline: Option<&SettlementTimeline>) -> (u32, TimelineSource) {
    let (days, source) = match timeline {
        Some(t) => (t.days_for(method), TimelineSource::Contract),
        None => (
            SettlementTimeline::hardcoded_default().days_for(method),
            TimelineSource::Default,
        ),
    };
    match days {
        Some(d) => (d, source),
        None => (FALLBACK_SETTLEMENT_DAYS, TimelineSource::Fallback),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub payment_method: PaymentMethod,
    pub business_days: u32,
    pub source: TimelineSource,
}

/// The day count every payment method would actually settle with.
pub fn effective_timeline(timeline: Option<&SettlementTimeline>) -> Vec<TimelineEntry> {
    PaymentMethod::ALL
        .iter()
        .map(|&method| {
            let (business_days, source) = settlement_days(method, timeline);
            TimelineEntry {
                payment_method: method,
                business_days,
                source,
            }
        })
        .collect()
}
