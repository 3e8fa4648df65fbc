//! Contract configuration.
//!
//! The backend stores a contract's product configuration as a versioned list
//! of `{internal_name, value}` records. [`ContractTerms::from_contract`] reads
//! that list once and produces a typed structure; everything downstream
//! works with [`ContractTerms`] only.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::LendingError;
use crate::types::{Money, PaymentMethod, ProductType, Rate};
use crate::LendingResult;

pub const FIELD_AR_PERCENTAGE: &str = "borrowing_base_accounts_receivable_percentage";
pub const FIELD_INVENTORY_PERCENTAGE: &str = "borrowing_base_inventory_percentage";
pub const FIELD_CASH_PERCENTAGE: &str = "borrowing_base_cash_percentage";
pub const FIELD_CASH_IN_DACA_PERCENTAGE: &str = "borrowing_base_cash_in_daca_percentage";
pub const FIELD_SETTLEMENT_TIMELINE: &str = "repayment_type_settlement_timeline";
pub const FIELD_FINANCING_TERMS: &str = "contract_financing_terms";
pub const FIELD_MAXIMUM_AMOUNT: &str = "maximum_amount";

// ---------------------------------------------------------------------------
// Raw boundary types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    pub product_type: ProductType,
    #[serde(default)]
    pub product_config: ProductConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductConfig {
    #[serde(default)]
    pub v1: ProductConfigVersion,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductConfigVersion {
    #[serde(default)]
    pub fields: Vec<ContractField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractField {
    pub internal_name: String,
    #[serde(default)]
    pub value: Value,
}

// ---------------------------------------------------------------------------
// Typed configuration
// ---------------------------------------------------------------------------

/// Business days from payment to settlement, per payment method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettlementTimeline(pub BTreeMap<PaymentMethod, u32>);

impl SettlementTimeline {
    pub fn days_for(&self, method: PaymentMethod) -> Option<u32> {
        self.0.get(&method).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse the JSON document stored in the contract field.
    ///
    /// Keys naming payment methods this crate does not model are skipped.
    /// Invalid JSON or a day count that is not a non-negative integer is a
    /// [`LendingError::ConfigError`].
    pub fn from_json(raw: &str) -> LendingResult<Self> {
        let entries: BTreeMap<String, u32> = serde_json::from_str(raw)
            .map_err(|e| config_error(FIELD_SETTLEMENT_TIMELINE, e.to_string()))?;

        let mut timeline = BTreeMap::new();
        for (key, days) in entries {
            match PaymentMethod::ALL.into_iter().find(|m| m.as_str() == key) {
                Some(method) => {
                    timeline.insert(method, days);
                }
                None => warn!(method = %key, days, "skipping unmodelled payment method in settlement timeline"),
            }
        }
        Ok(SettlementTimeline(timeline))
    }
}

impl FromIterator<(PaymentMethod, u32)> for SettlementTimeline {
    fn from_iter<I: IntoIterator<Item = (PaymentMethod, u32)>>(iter: I) -> Self {
        SettlementTimeline(iter.into_iter().collect())
    }
}

/// Strongly-typed view of a contract's product configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractTerms {
    pub product_type: Option<ProductType>,
    pub borrowing_base_accounts_receivable_percentage: Option<Rate>,
    pub borrowing_base_inventory_percentage: Option<Rate>,
    pub borrowing_base_cash_percentage: Option<Rate>,
    pub borrowing_base_cash_in_daca_percentage: Option<Rate>,
    /// Empty when the contract carries no timeline field.
    #[serde(default)]
    pub settlement_timeline: SettlementTimeline,
    pub contract_financing_terms: Option<u32>,
    pub maximum_amount: Option<Money>,
}

impl ContractTerms {
    /// Build typed terms from the raw field list.
    ///
    /// Missing fields default safely. A malformed settlement timeline or a
    /// non-numeric value in a numeric field is a [`LendingError::ConfigError`].
    pub fn from_contract(contract: &Contract) -> LendingResult<Self> {
        let mut terms = ContractTerms {
            product_type: Some(contract.product_type),
            ..ContractTerms::default()
        };
        let mut timeline_raw: Option<String> = None;

        for field in &contract.product_config.v1.fields {
            let name = field.internal_name.as_str();
            let value = &field.value;
            match name {
                FIELD_AR_PERCENTAGE => {
                    terms.borrowing_base_accounts_receivable_percentage = decimal_field(name, value)?
                }
                FIELD_INVENTORY_PERCENTAGE => {
                    terms.borrowing_base_inventory_percentage = decimal_field(name, value)?
                }
                FIELD_CASH_PERCENTAGE => terms.borrowing_base_cash_percentage = decimal_field(name, value)?,
                FIELD_CASH_IN_DACA_PERCENTAGE => {
                    terms.borrowing_base_cash_in_daca_percentage = decimal_field(name, value)?
                }
                FIELD_MAXIMUM_AMOUNT => terms.maximum_amount = decimal_field(name, value)?,
                FIELD_FINANCING_TERMS => terms.contract_financing_terms = days_field(name, value)?,
                FIELD_SETTLEMENT_TIMELINE => timeline_raw = timeline_field(value)?,
                _ => debug!(field = name, "ignoring contract field"),
            }
        }

        terms.settlement_timeline =
            SettlementTimeline::from_json(timeline_raw.as_deref().unwrap_or("{}"))?;
        Ok(terms)
    }

    /// Parse a raw contract JSON document straight into typed terms.
    pub fn from_json(raw: &str) -> LendingResult<Self> {
        let contract: Contract = serde_json::from_str(raw)?;
        Self::from_contract(&contract)
    }
}

// ---------------------------------------------------------------------------
// Field readers
// ---------------------------------------------------------------------------

fn config_error(field: &str, reason: impl Into<String>) -> LendingError {
    LendingError::ConfigError {
        field: field.into(),
        reason: reason.into(),
    }
}

/// Numbers and numeric strings are accepted; null and "" mean absent.
fn decimal_field(name: &str, value: &Value) -> LendingResult<Option<Decimal>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .map(Some)
            .map_err(|e| config_error(name, e.to_string())),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => Decimal::from_str(s.trim())
            .map(Some)
            .map_err(|_| config_error(name, format!("'{s}' is not a number"))),
        other => Err(config_error(name, format!("expected a number, got {other}"))),
    }
}

fn days_field(name: &str, value: &Value) -> LendingResult<Option<u32>> {
    let Some(dec) = decimal_field(name, value)? else {
        return Ok(None);
    };
    if dec.is_sign_negative() || !dec.fract().is_zero() {
        return Err(config_error(name, format!("{dec} is not a whole number of days")));
    }
    dec.to_u32()
        .map(Some)
        .ok_or_else(|| config_error(name, format!("{dec} days is out of range")))
}

/// The timeline is normally a JSON-encoded string; an inline object is
/// accepted as well.
fn timeline_field(value: &Value) -> LendingResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Object(_) => Ok(Some(value.to_string())),
        other => Err(config_error(
            FIELD_SETTLEMENT_TIMELINE,
            format!("expected a JSON string, got {other}"),
        )),
    }
}
