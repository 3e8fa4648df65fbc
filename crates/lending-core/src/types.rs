use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LendingError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.80 = 80%). Never as percentages.
pub type Rate = Decimal;

/// Financing product offered under a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    InventoryFinancing,
    InvoiceFinancing,
    LineOfCredit,
    PurchaseMoneyFinancing,
    DispensaryFinancing,
}

impl ProductType {
    /// Only revolving lines are sized by a borrowing base.
    pub fn uses_borrowing_base(&self) -> bool {
        matches!(self, ProductType::LineOfCredit)
    }
}

/// How a customer moves money to repay or fund a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Ach,
    ReverseDraftAch,
    Wire,
    Check,
    Cash,
    Unknown,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 6] = [
        PaymentMethod::Ach,
        PaymentMethod::ReverseDraftAch,
        PaymentMethod::Wire,
        PaymentMethod::Check,
        PaymentMethod::Cash,
        PaymentMethod::Unknown,
    ];

    /// Wire value, as stored by the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Ach => "ach",
            PaymentMethod::ReverseDraftAch => "reverse_draft_ach",
            PaymentMethod::Wire => "wire",
            PaymentMethod::Check => "check",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Ach => "ACH",
            PaymentMethod::ReverseDraftAch => "Reverse Draft ACH",
            PaymentMethod::Wire => "Wire",
            PaymentMethod::Check => "Check",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = LendingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        PaymentMethod::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == normalized)
            .ok_or_else(|| LendingError::InvalidInput {
                field: "payment_method".into(),
                reason: format!(
                    "unknown payment method '{s}' (expected one of: ach, reverse_draft_ach, wire, check, cash, unknown)"
                ),
            })
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
