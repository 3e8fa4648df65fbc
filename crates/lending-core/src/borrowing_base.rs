//! Borrowing base for revolving lines of credit.
//!
//! Each reported balance is advanced at the contract's percentage for that
//! category, plus a manually entered custom amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::contract::{Contract, ContractTerms};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::LendingResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Figures reported by the borrower. Absent values count as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BorrowingBaseApplication {
    pub monthly_accounts_receivable: Option<Money>,
    pub monthly_inventory: Option<Money>,
    pub monthly_cash: Option<Money>,
    pub amount_cash_in_daca: Option<Money>,
    pub amount_custom: Option<Money>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowingBaseResult {
    pub amount: Money,
    pub is_ar_visible: bool,
    pub is_inventory_visible: bool,
    pub is_cash_visible: bool,
    pub is_cash_in_daca_visible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowingBaseInput {
    pub application: BorrowingBaseApplication,
    pub contract: Contract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorrowingBaseCategory {
    AccountsReceivable,
    Inventory,
    Cash,
    CashInDaca,
    Custom,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowingBaseLineItem {
    pub category: BorrowingBaseCategory,
    pub reported: Money,
    pub advance_rate: Rate,
    pub eligible: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowingBaseOutput {
    #[serde(flatten)]
    pub result: BorrowingBaseResult,
    pub line_items: Vec<BorrowingBaseLineItem>,
    /// Borrowing base capped at the contract maximum, when one is set.
    pub available_amount: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Borrowing base amount and which input categories the contract enables.
///
/// Visibility depends only on the contract: a category is visible when its
/// percentage is strictly positive, whatever the borrower reported.
///
/// Products and sums that exceed the `Decimal` range saturate at
/// `Decimal::MAX` / `Decimal::MIN`.
pub fn calculate_borrowing_base(
    application: &BorrowingBaseApplication,
    terms: &ContractTerms,
) -> BorrowingBaseResult {
    let rates = AdvanceRates::from_terms(terms);
    Breakdown::new(application, &rates).result(&rates)
}

/// Borrowing base with a per-category breakdown and contract checks.
pub fn analyze_borrowing_base(
    input: &BorrowingBaseInput,
) -> LendingResult<ComputationOutput<BorrowingBaseOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let terms = ContractTerms::from_contract(&input.contract)?;
    let rates = AdvanceRates::from_terms(&terms);
    let breakdown = Breakdown::new(&input.application, &rates);
    let result = breakdown.result(&rates);
    let items = breakdown.items;

    if breakdown.saturated {
        warnings.push(format!(
            "Borrowing base exceeds the representable range; amount saturated at {}.",
            result.amount
        ));
    }

    if !input.contract.product_type.uses_borrowing_base() {
        warnings.push(format!(
            "Product type {:?} is not governed by a borrowing base.",
            input.contract.product_type
        ));
    }
    for item in &items {
        if item.reported < Decimal::ZERO {
            warnings.push(format!("Reported {:?} is negative.", item.category));
        }
        if item.advance_rate > Decimal::ONE {
            warnings.push(format!(
                "Advance rate for {:?} exceeds 100%.",
                item.category
            ));
        }
    }
    for item in items.iter().filter(|i| i.advance_rate.is_zero() && !i.reported.is_zero()) {
        if item.category != BorrowingBaseCategory::Custom {
            warnings.push(format!(
                "{:?} was reported but the contract advances 0% against it.",
                item.category
            ));
        }
    }

    let available_amount = match terms.maximum_amount {
        Some(max) if result.amount > max => {
            warnings.push(format!(
                "Borrowing base {} exceeds the contract maximum {}; availability capped.",
                result.amount, max
            ));
            max
        }
        _ => result.amount,
    };

    let output = BorrowingBaseOutput {
        result,
        line_items: items,
        available_amount,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "accounts_receivable_rate": rates.accounts_receivable.to_string(),
        "inventory_rate": rates.inventory.to_string(),
        "cash_rate": rates.cash.to_string(),
        "cash_in_daca_rate": rates.cash_in_daca.to_string(),
        "maximum_amount": terms.maximum_amount.map(|m| m.to_string()),
    });

    Ok(with_metadata(
        "Borrowing Base",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

struct AdvanceRates {
    accounts_receivable: Rate,
    inventory: Rate,
    cash: Rate,
    cash_in_daca: Rate,
}

impl AdvanceRates {
    fn from_terms(terms: &ContractTerms) -> Self {
        Self {
            accounts_receivable: terms
                .borrowing_base_accounts_receivable_percentage
                .unwrap_or_default(),
            inventory: terms.borrowing_base_inventory_percentage.unwrap_or_default(),
            cash: terms.borrowing_base_cash_percentage.unwrap_or_default(),
            cash_in_daca: terms.borrowing_base_cash_in_daca_percentage.unwrap_or_default(),
        }
    }
}

/// Line items and their total, with a flag set when any step overflowed.
struct Breakdown {
    items: Vec<BorrowingBaseLineItem>,
    amount: Money,
    saturated: bool,
}

impl Breakdown {
    fn new(app: &BorrowingBaseApplication, rates: &AdvanceRates) -> Self {
        let mut saturated = false;
        let items = line_items(app, rates, &mut saturated);
        let amount = items.iter().fold(Decimal::ZERO, |acc, item| {
            acc.checked_add(item.eligible).unwrap_or_else(|| {
                saturated = true;
                saturation_bound(item.eligible.is_sign_negative())
            })
        });
        Breakdown {
            items,
            amount,
            saturated,
        }
    }

    fn result(&self, rates: &AdvanceRates) -> BorrowingBaseResult {
        BorrowingBaseResult {
            amount: self.amount,
            is_ar_visible: rates.accounts_receivable > Decimal::ZERO,
            is_inventory_visible: rates.inventory > Decimal::ZERO,
            is_cash_visible: rates.cash > Decimal::ZERO,
            is_cash_in_daca_visible: rates.cash_in_daca > Decimal::ZERO,
        }
    }
}

fn saturation_bound(negative: bool) -> Money {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

fn line_items(
    app: &BorrowingBaseApplication,
    rates: &AdvanceRates,
    saturated: &mut bool,
) -> Vec<BorrowingBaseLineItem> {
    let mut item = |category, reported: Option<Money>, advance_rate: Rate| {
        let reported = reported.unwrap_or_default();
        let eligible = reported.checked_mul(advance_rate).unwrap_or_else(|| {
            *saturated = true;
            saturation_bound(reported.is_sign_negative() != advance_rate.is_sign_negative())
        });
        BorrowingBaseLineItem {
            category,
            reported,
            advance_rate,
            eligible,
        }
    };

    vec![
        item(
            BorrowingBaseCategory::AccountsReceivable,
            app.monthly_accounts_receivable,
            rates.accounts_receivable,
        ),
        item(BorrowingBaseCategory::Inventory, app.monthly_inventory, rates.inventory),
        item(BorrowingBaseCategory::Cash, app.monthly_cash, rates.cash),
        item(
            BorrowingBaseCategory::CashInDaca,
            app.amount_cash_in_daca,
            rates.cash_in_daca,
        ),
        // Custom amount is added as-is.
        item(BorrowingBaseCategory::Custom, app.amount_custom, Decimal::ONE),
    ]
}
