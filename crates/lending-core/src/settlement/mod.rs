//! Payment settlement timelines and settlement/deposit date calculation.

pub mod payment;
pub mod timeline;

pub use payment::{
    calculate_settlement, compute_deposit_date_for_reverse_draft_ach, compute_settlement_date,
    SettlementInput, SettlementOutput,
};
pub use timeline::{
    effective_timeline, settlement_days, settlement_timeline_config, TimelineEntry,
    TimelineSource, FALLBACK_SETTLEMENT_DAYS,
};
